use crate::canvas::PixelSource;
use crate::point::Point;
use image::{Pixel, Rgba, RgbaImage};

pub const SIZE: u32 = 120;
pub const MAGNIFICATION: u32 = 4;
pub const CROSSHAIR: Rgba<u8> = Rgba([220, 38, 38, 204]);

/// Pixelated magnifier centered on a source position.
#[derive(Copy, Clone, Debug)]
pub struct Loupe {
    pub size: u32,
    pub magnification: u32,
    pub crosshair: Rgba<u8>,
}

impl Default for Loupe {
    fn default() -> Self {
        Loupe {
            size: SIZE,
            magnification: MAGNIFICATION,
            crosshair: CROSSHAIR,
        }
    }
}

impl Loupe {
    pub fn new(size: u32, magnification: u32) -> Self {
        Loupe {
            size,
            magnification: magnification.max(1),
            ..Loupe::default()
        }
    }

    /// Side length of the source square shown in the loupe.
    pub fn source_size(&self) -> f64 {
        self.size as f64 / self.magnification.max(1) as f64
    }

    /// Half length of each crosshair arm.
    pub fn crosshair_length(&self) -> u32 {
        (self.size / 10).min(5)
    }

    /// Renders the loupe for `center`. Area outside of `source` stays transparent.
    pub fn render<S: PixelSource>(&self, source: &S, center: Point) -> RgbaImage {
        let mut out = RgbaImage::new(self.size, self.size);
        let scale = self.source_size() / self.size as f64;
        let half = self.source_size() / 2.0;
        let top_left = center + Point::new(-half, -half);

        for (ox, oy, pixel) in out.enumerate_pixels_mut() {
            let sx = (top_left.x + ox as f64 * scale).floor() as i64;
            let sy = (top_left.y + oy as f64 * scale).floor() as i64;

            if source.contains(sx, sy) {
                let rgb = source.rgb_at(sx as u32, sy as u32);
                *pixel = Rgba([rgb.r, rgb.g, rgb.b, 255]);
            }
        }

        self.draw_crosshair(&mut out);
        out
    }

    fn draw_crosshair(&self, out: &mut RgbaImage) {
        let center = self.size / 2;
        let length = self.crosshair_length();

        if self.size == 0 {
            return;
        }

        let last = self.size - 1;
        let from = center.saturating_sub(length);
        let to = (center + length).min(last);

        for i in from..=to {
            out.get_pixel_mut(i, center).blend(&self.crosshair);

            if i != center {
                out.get_pixel_mut(center, i).blend(&self.crosshair);
            }
        }
    }
}
