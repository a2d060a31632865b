use crate::color::{Cmyk, Rgb};
use crate::point::Point;
use anyhow::{bail, Context, Result};
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, RgbImage};
use log::{debug, info};
use std::path;

/// Default bounds an image is fitted into before sampling.
pub const MAX_WIDTH: u32 = 660;
pub const MAX_HEIGHT: u32 = 450;

/// A 2D raster surface that can be sampled for colors.
pub trait PixelSource {
    fn dimensions(&self) -> (u32, u32);

    /// Reads the pixel at `(x, y)`. Callers keep coordinates inside [`PixelSource::dimensions`].
    fn rgb_at(&self, x: u32, y: u32) -> Rgb;

    fn contains(&self, x: i64, y: i64) -> bool {
        let (width, height) = self.dimensions();
        x >= 0 && y >= 0 && x < width as i64 && y < height as i64
    }
}

impl PixelSource for DynamicImage {
    fn dimensions(&self) -> (u32, u32) {
        GenericImageView::dimensions(self)
    }

    fn rgb_at(&self, x: u32, y: u32) -> Rgb {
        let channels = self.get_pixel(x, y);
        Rgb::new(channels[0], channels[1], channels[2])
    }
}

impl PixelSource for RgbImage {
    fn dimensions(&self) -> (u32, u32) {
        RgbImage::dimensions(self)
    }

    fn rgb_at(&self, x: u32, y: u32) -> Rgb {
        let channels = self.get_pixel(x, y);
        Rgb::new(channels[0], channels[1], channels[2])
    }
}

/// Fits `width` x `height` into the given bounds keeping the aspect ratio.
///
/// Width is limited first, then height, then width again. Images already inside the bounds are
/// left alone.
pub fn fit_dimensions(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (width, height);
    }

    let aspect = width as f64 / height as f64;
    let mut w = width as f64;
    let mut h = height as f64;

    if w > max_width as f64 {
        w = max_width as f64;
        h = w / aspect;
    }

    if h > max_height as f64 {
        h = max_height as f64;
        w = h * aspect;
    }

    if w > max_width as f64 {
        w = max_width as f64;
        h = w / aspect;
    }

    ((w as u32).max(1), (h as u32).max(1))
}

/// Decoded image scaled to fit the picking surface.
pub struct Canvas {
    image: RgbImage,
}

impl Canvas {
    pub fn new(img: &DynamicImage, max_width: u32, max_height: u32) -> Result<Self> {
        let (width, height) = GenericImageView::dimensions(img);

        if width == 0 || height == 0 {
            bail!("Image has no pixels ({}x{})", width, height);
        }

        let (fit_width, fit_height) = fit_dimensions(width, height, max_width, max_height);

        let image = if (fit_width, fit_height) == (width, height) {
            img.to_rgb8()
        } else {
            debug!(
                "Resize {}x{} to {}x{}",
                width, height, fit_width, fit_height
            );
            img.resize_exact(fit_width, fit_height, FilterType::Triangle)
                .to_rgb8()
        };

        Ok(Canvas { image })
    }

    pub fn open(filename: &path::Path, max_width: u32, max_height: u32) -> Result<Self> {
        info!("Load {}", filename.display());

        let img = image::open(filename)
            .with_context(|| format!("Failed to load image {}", filename.display()))?;

        Canvas::new(&img, max_width, max_height)
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Clamps a fractional position onto the nearest pixel inside the canvas.
    pub fn clamp(&self, point: Point) -> (u32, u32) {
        let max_x = (self.width() - 1) as f64;
        let max_y = (self.height() - 1) as f64;

        (
            point.x.max(0.0).min(max_x) as u32,
            point.y.max(0.0).min(max_y) as u32,
        )
    }

    pub fn rgb(&self, point: Point) -> Rgb {
        let (x, y) = self.clamp(point);
        self.rgb_at(x, y)
    }

    pub fn sample(&self, point: Point) -> Cmyk {
        let rgb = self.rgb(point);
        let cmyk = rgb.to_cmyk();
        debug!("Sample {} -> {} -> {}", point, rgb, cmyk);
        cmyk
    }

    /// Maps a point on a displayed rectangle of `display_width` x `display_height` onto canvas
    /// coordinates. Points outside the rectangle map to `None`.
    pub fn scale_from_display(
        &self,
        point: Point,
        display_width: f64,
        display_height: f64,
    ) -> Option<Point> {
        if !point.is_finite() || display_width <= 0.0 || display_height <= 0.0 {
            return None;
        }

        if point.x < 0.0 || point.x > display_width || point.y < 0.0 || point.y > display_height
        {
            return None;
        }

        let scale_x = self.width() as f64 / display_width;
        let scale_y = self.height() as f64 / display_height;

        Some(Point::new(point.x * scale_x, point.y * scale_y))
    }
}

impl PixelSource for Canvas {
    fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    fn rgb_at(&self, x: u32, y: u32) -> Rgb {
        self.image.rgb_at(x, y)
    }
}
