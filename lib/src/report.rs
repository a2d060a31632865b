use crate::color::{Cmyk, Rgb};
use crate::display::DisplayPercentages;
use crate::palette::Palette;
use anyhow::{bail, Result};
use serde::Serialize;

pub const TITLE: &str = "Color Mixing Report";

pub const HEADERS: [&str; 6] = ["Color", "Cyan", "Magenta", "Yellow", "Black", "White"];

/// Background and text color of each header cell.
pub const HEADER_STYLES: [(Rgb, Rgb); 6] = [
    (Rgb { r: 220, g: 223, b: 225 }, Rgb { r: 0, g: 0, b: 0 }),
    (Rgb { r: 0, g: 183, b: 235 }, Rgb { r: 0, g: 0, b: 0 }),
    (Rgb { r: 236, g: 0, b: 140 }, Rgb { r: 255, g: 255, b: 255 }),
    (Rgb { r: 255, g: 215, b: 0 }, Rgb { r: 0, g: 0, b: 0 }),
    (Rgb { r: 50, g: 50, b: 50 }, Rgb { r: 255, g: 255, b: 255 }),
    (Rgb { r: 240, g: 240, b: 240 }, Rgb { r: 0, g: 0, b: 0 }),
];

/// Chips drawn under the ink headers.
pub const CHIPS: [Rgb; 5] = [
    Rgb { r: 0, g: 183, b: 235 },
    Rgb { r: 236, g: 0, b: 140 },
    Rgb { r: 255, g: 215, b: 0 },
    Rgb { r: 0, g: 0, b: 0 },
    Rgb { r: 255, g: 255, b: 255 },
];

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Row {
    pub color: Cmyk,
    pub swatch: Rgb,
    pub percentages: DisplayPercentages,
}

impl Row {
    pub fn new(color: Cmyk) -> Self {
        Row {
            color,
            swatch: color.to_rgb(),
            percentages: color.display(),
        }
    }

    /// Percentage cells in column order.
    pub fn labels(&self) -> Vec<String> {
        self.percentages
            .values()
            .iter()
            .map(|v| percent_label(*v))
            .collect()
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Report {
    pub title: String,
    pub date: Option<String>,
    pub rows: Vec<Row>,
}

impl Report {
    /// Builds a report from the recent colors of `palette`, newest first.
    pub fn new(palette: &Palette, title: &str, date: Option<String>) -> Result<Self> {
        if palette.is_empty() {
            bail!("No colors selected");
        }

        Ok(Report {
            title: title.to_string(),
            date,
            rows: rows(palette),
        })
    }
}

pub fn rows(palette: &Palette) -> Vec<Row> {
    palette.recent().iter().map(|c| Row::new(*c)).collect()
}

/// Formats a display value without trailing zeros, e.g. `25%` or `33.3%`.
pub fn percent_label(value: f64) -> String {
    format!("{}%", value)
}

#[cfg(feature = "svg")]
mod document {
    use super::{Report, Row, CHIPS, HEADERS, HEADER_STYLES};
    use crate::color::Rgb;
    use anyhow::Result;
    use log::info;
    use std::path;
    use svg::node::element::{Element, Rectangle};
    use svg::node::Text;
    use svg::{Document, Node};

    const PAGE_WIDTH: f64 = 210.0;
    const MARGIN: f64 = 14.0;
    const TABLE_TOP: f64 = 35.0;
    const COLOR_COLUMN_WIDTH: f64 = 30.0;
    const HEADER_HEIGHT: f64 = 8.0;
    const CHIP_HEIGHT: f64 = 8.0;
    const ROW_HEIGHT: f64 = 15.0;
    const PADDING: f64 = 2.0;
    const SWATCH_ASPECT: f64 = 2.0;
    const GRID: Rgb = Rgb { r: 100, g: 100, b: 100 };
    const CHIP_BORDER: Rgb = Rgb { r: 200, g: 200, b: 200 };

    fn fill(color: Rgb) -> String {
        format!("rgb({}, {}, {})", color.r, color.g, color.b)
    }

    fn column_x(index: usize) -> (f64, f64) {
        let ink_width = (PAGE_WIDTH - 2.0 * MARGIN - COLOR_COLUMN_WIDTH) / 5.0;

        if index == 0 {
            (MARGIN, COLOR_COLUMN_WIDTH)
        } else {
            (
                MARGIN + COLOR_COLUMN_WIDTH + (index - 1) as f64 * ink_width,
                ink_width,
            )
        }
    }

    fn text(x: f64, y: f64, size: f64, anchor: &str, color: Rgb, content: &str) -> Element {
        let mut element = Element::new("text");
        element.assign("x", x);
        element.assign("y", y);
        element.assign("font-family", "Helvetica, Arial, sans-serif");
        element.assign("font-size", size);
        element.assign("text-anchor", anchor);
        element.assign("dominant-baseline", "middle");
        element.assign("fill", fill(color));
        element.append(Text::new(content));
        element
    }

    fn cell(x: f64, y: f64, width: f64, height: f64, background: Rgb) -> Rectangle {
        Rectangle::new()
            .set("x", x)
            .set("y", y)
            .set("width", width)
            .set("height", height)
            .set("fill", fill(background))
            .set("stroke", fill(GRID))
            .set("stroke-width", 0.1)
    }

    /// Largest 2:1 rectangle centered inside the padded cell.
    fn swatch(x: f64, y: f64, width: f64, height: f64, color: Rgb) -> Rectangle {
        let available_width = width - 2.0 * PADDING;
        let available_height = height - 2.0 * PADDING;

        let (w, h) = if available_width / SWATCH_ASPECT <= available_height {
            (available_width, available_width / SWATCH_ASPECT)
        } else {
            (available_height * SWATCH_ASPECT, available_height)
        };

        let w = w.max(1.0);
        let h = h.max(1.0);

        Rectangle::new()
            .set("x", x + PADDING + (available_width - w) / 2.0)
            .set("y", y + PADDING + (available_height - h) / 2.0)
            .set("width", w)
            .set("height", h)
            .set("fill", fill(color))
    }

    fn draw_header(document: Document) -> Document {
        let mut document = document;

        for (index, (title, (background, foreground))) in
            HEADERS.iter().zip(HEADER_STYLES.iter()).enumerate()
        {
            let (x, width) = column_x(index);

            document = document
                .add(cell(x, TABLE_TOP, width, HEADER_HEIGHT, *background))
                .add(text(
                    x + width / 2.0,
                    TABLE_TOP + HEADER_HEIGHT / 2.0,
                    4.0,
                    "middle",
                    *foreground,
                    title,
                ));
        }

        let top = TABLE_TOP + HEADER_HEIGHT;
        let (x, width) = column_x(0);
        document = document.add(cell(x, top, width, CHIP_HEIGHT, Rgb::new(255, 255, 255)));

        for (index, chip) in CHIPS.iter().enumerate() {
            let (x, width) = column_x(index + 1);
            let mut rect = swatch(x, top, width, CHIP_HEIGHT, *chip);

            // White needs an outline to be visible on the white row.
            if *chip == Rgb::new(255, 255, 255) {
                rect = rect
                    .set("stroke", fill(CHIP_BORDER))
                    .set("stroke-width", 0.1);
            }

            document = document
                .add(cell(x, top, width, CHIP_HEIGHT, Rgb::new(255, 255, 255)))
                .add(rect);
        }

        document
    }

    fn draw_row(document: Document, row: &Row, top: f64) -> Document {
        let (x, width) = column_x(0);
        let mut document = document
            .add(cell(x, top, width, ROW_HEIGHT, Rgb::new(255, 255, 255)))
            .add(swatch(x, top, width, ROW_HEIGHT, row.swatch));

        for (index, label) in row.labels().iter().enumerate() {
            let (x, width) = column_x(index + 1);

            document = document
                .add(cell(x, top, width, ROW_HEIGHT, Rgb::new(255, 255, 255)))
                .add(text(
                    x + width - PADDING,
                    top + ROW_HEIGHT / 2.0,
                    4.0,
                    "end",
                    Rgb::new(0, 0, 0),
                    label,
                ));
        }

        document
    }

    pub fn render(report: &Report) -> Document {
        let body_top = TABLE_TOP + HEADER_HEIGHT + CHIP_HEIGHT;
        let height = body_top + report.rows.len() as f64 * ROW_HEIGHT + MARGIN;
        let black = Rgb::new(0, 0, 0);

        let mut document = Document::new()
            .set("viewBox", (0.0, 0.0, PAGE_WIDTH, height))
            .add(text(MARGIN, 22.0, 6.0, "start", black, &report.title));

        if let Some(date) = &report.date {
            document = document.add(text(
                MARGIN,
                30.0,
                3.5,
                "start",
                black,
                &format!("Date: {}", date),
            ));
        }

        document = draw_header(document);

        for (index, row) in report.rows.iter().enumerate() {
            document = draw_row(document, row, body_top + index as f64 * ROW_HEIGHT);
        }

        document
    }

    pub fn write_report(filename: &path::Path, report: &Report) -> Result<()> {
        info!(
            "Write report with {} colors to {}",
            report.rows.len(),
            filename.display()
        );

        svg::save(filename, &render(report))?;

        Ok(())
    }
}

#[cfg(feature = "svg")]
pub use document::{render, write_report};
