use crate::color::{Cmyk, Rgb};
use crate::display::DisplayPercentages;
use log::debug;

/// Maximum number of recently selected colors kept around.
pub const CAPACITY: usize = 10;

/// Current selection plus the most recently selected colors, newest first.
#[derive(Clone, Debug)]
pub struct Palette {
    current: Option<Cmyk>,
    recent: Vec<Cmyk>,
    capacity: usize,
}

impl Default for Palette {
    fn default() -> Self {
        Palette::new(CAPACITY)
    }
}

impl Palette {
    pub fn new(capacity: usize) -> Self {
        Palette {
            current: None,
            recent: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Makes `color` the current selection and moves it to the front of the recent colors.
    pub fn select(&mut self, color: Cmyk) {
        self.current = Some(color);
        self.recent.retain(|c| *c != color);
        self.recent.insert(0, color);
        self.recent.truncate(self.capacity);
        debug!("Select {} ({} recent)", color, self.recent.len());
    }

    /// Forgets everything, used when a new image is loaded.
    pub fn clear(&mut self) {
        self.current = None;
        self.recent.clear();
    }

    pub fn current(&self) -> Option<Cmyk> {
        self.current
    }

    pub fn is_current(&self, color: &Cmyk) -> bool {
        self.current.as_ref() == Some(color)
    }

    pub fn recent(&self) -> &[Cmyk] {
        &self.recent
    }

    pub fn len(&self) -> usize {
        self.recent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recent.is_empty()
    }

    pub fn swatches(&self) -> impl Iterator<Item = (Cmyk, Rgb, DisplayPercentages)> + '_ {
        self.recent
            .iter()
            .map(|&color| (color, color.to_rgb(), color.display()))
    }
}
