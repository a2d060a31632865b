//! Approximate ink mixing ratios for colors picked from an image.
//!
//! [`color`] converts between sampled RGB pixels and CMYK ink percentages, [`display`] turns
//! those percentages into the normalized values shown to a user, including the remaining white
//! share. The other modules provide a sampling surface, a magnifying loupe, a recency palette
//! and a printable report on top of that.

pub mod canvas;
pub mod color;
pub mod display;
pub mod loupe;
pub mod palette;
pub mod point;
pub mod report;

pub use color::{to_cmyk, to_rgb, Cmyk, Rgb};
pub use display::{format_for_display, DisplayPercentages};

use anyhow::{bail, Result};
use canvas::Canvas;
use log::info;
use palette::Palette;
use point::Point;

/// Samples every point in order, feeding the results through `palette`.
///
/// The palette is cleared first, like loading a fresh image.
pub fn pick_colors(canvas: &Canvas, points: &[Point], palette: &mut Palette) -> Result<()> {
    palette.clear();

    for point in points {
        if !point.is_finite() {
            bail!("Invalid position {:?}", point);
        }

        palette.select(canvas.sample(*point));
    }

    info!(
        "Picked {} points, {} distinct colors",
        points.len(),
        palette.len()
    );

    Ok(())
}
