use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use inkmix::canvas::{self, Canvas};
use inkmix::loupe::{self, Loupe};
use inkmix::palette::{self, Palette};
use inkmix::point::Point;
use inkmix::report::{self, Report};
use inkmix::{Cmyk, DisplayPercentages, Rgb};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(version, about = "Approximate ink mixing ratios for image colors")]
struct Options {
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a single color
    Convert {
        /// Color as R,G,B or #rrggbb
        #[arg(long, conflicts_with = "cmyk", required_unless_present = "cmyk")]
        rgb: Option<Rgb>,

        /// Ink percentages as C,M,Y,K
        #[arg(long)]
        cmyk: Option<Cmyk>,
    },

    /// Pick colors from an image
    Pick {
        #[arg(long, short)]
        input: PathBuf,

        /// Position as X,Y in canvas pixels, may be repeated
        #[arg(long = "at", short = 'a')]
        points: Vec<Point>,

        /// JSON file with a point or a list of points
        #[arg(long)]
        picks: Option<PathBuf>,

        #[arg(long, default_value_t = canvas::MAX_WIDTH)]
        max_width: u32,

        #[arg(long, default_value_t = canvas::MAX_HEIGHT)]
        max_height: u32,

        /// Number of recent colors to keep
        #[arg(long, default_value_t = palette::CAPACITY)]
        capacity: usize,

        /// Write an SVG report of the picked colors
        #[arg(long)]
        report: Option<PathBuf>,

        #[arg(long, default_value = report::TITLE)]
        title: String,

        /// Date printed below the report title
        #[arg(long)]
        date: Option<String>,

        /// Write a magnified view around the last pick as PNG
        #[arg(long)]
        loupe: Option<PathBuf>,

        #[arg(long, default_value_t = loupe::SIZE)]
        loupe_size: u32,

        #[arg(long, default_value_t = loupe::MAGNIFICATION)]
        magnification: u32,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PointOrPoints {
    Point(Point),
    Points(Vec<Point>),
}

#[derive(Serialize)]
struct Entry {
    cmyk: Cmyk,
    rgb: Rgb,
    display: DisplayPercentages,
}

impl Entry {
    fn new(cmyk: Cmyk, rgb: Rgb) -> Self {
        Entry {
            cmyk,
            rgb,
            display: cmyk.display(),
        }
    }
}

fn print_entries(entries: &[Entry], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(entries)?);
        return Ok(());
    }

    for entry in entries {
        let labels = entry
            .display
            .values()
            .iter()
            .map(|v| report::percent_label(*v))
            .collect::<Vec<_>>();

        println!(
            "{}  {}  C {} M {} Y {} K {} W {}",
            entry.rgb, entry.cmyk, labels[0], labels[1], labels[2], labels[3], labels[4]
        );
    }

    Ok(())
}

fn read_picks(filename: &Path) -> Result<Vec<Point>> {
    let fh = std::fs::File::open(filename)
        .with_context(|| format!("Failed to open {}", filename.display()))?;

    let picks: PointOrPoints = serde_json::from_reader(fh)
        .with_context(|| format!("Failed to parse {}", filename.display()))?;

    Ok(match picks {
        PointOrPoints::Point(p) => vec![p],
        PointOrPoints::Points(p) => p,
    })
}

fn main() -> Result<()> {
    env_logger::init();

    let opt = Options::parse();

    match opt.command {
        Command::Convert { rgb, cmyk } => {
            let entry = match (rgb, cmyk) {
                (Some(rgb), _) => Entry::new(rgb.to_cmyk(), rgb),
                (None, Some(cmyk)) => Entry::new(cmyk, cmyk.to_rgb()),
                (None, None) => bail!("Either --rgb or --cmyk is required"),
            };

            print_entries(&[entry], opt.json)?;
        }
        Command::Pick {
            input,
            mut points,
            picks,
            max_width,
            max_height,
            capacity,
            report: report_file,
            title,
            date,
            loupe: loupe_file,
            loupe_size,
            magnification,
        } => {
            if let Some(picks) = picks {
                points.extend(read_picks(&picks)?);
            }

            if points.is_empty() {
                bail!("No positions given, use --at X,Y or --picks FILE");
            }

            let canvas = Canvas::open(&input, max_width, max_height)?;
            info!("Canvas is {}x{}", canvas.width(), canvas.height());

            let mut palette = Palette::new(capacity);
            inkmix::pick_colors(&canvas, &points, &mut palette)?;

            let entries = palette
                .swatches()
                .map(|(cmyk, rgb, display)| Entry { cmyk, rgb, display })
                .collect::<Vec<_>>();

            print_entries(&entries, opt.json)?;

            if let Some(filename) = report_file {
                let summary = Report::new(&palette, &title, date)?;
                report::write_report(&filename, &summary)?;
            }

            if let (Some(filename), Some(last)) = (loupe_file, points.last()) {
                info!("Write loupe around {} to {}", last, filename.display());

                let (x, y) = canvas.clamp(*last);
                let center = Point::new(x as f64 + 0.5, y as f64 + 0.5);

                Loupe::new(loupe_size, magnification)
                    .render(&canvas, center)
                    .save(&filename)
                    .with_context(|| format!("Failed to write {}", filename.display()))?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn options_are_consistent() {
        Options::command().debug_assert();
    }

    #[test]
    fn parse_pick() {
        let opt = Options::try_parse_from([
            "inkmix", "pick", "-i", "in.png", "--at", "1,2", "-a", "3.5,4", "--json",
        ])
        .unwrap();

        assert!(opt.json);

        match opt.command {
            Command::Pick {
                points, max_width, ..
            } => {
                assert_eq!(points, vec![Point::new(1.0, 2.0), Point::new(3.5, 4.0)]);
                assert_eq!(max_width, canvas::MAX_WIDTH);
            }
            _ => panic!("expected pick"),
        }
    }

    #[test]
    fn convert_needs_exactly_one_color() {
        assert!(Options::try_parse_from(["inkmix", "convert"]).is_err());
        assert!(
            Options::try_parse_from(["inkmix", "convert", "--rgb", "1,2,3", "--cmyk", "0,0,0,0"])
                .is_err()
        );
        assert!(Options::try_parse_from(["inkmix", "convert", "--cmyk", "0,0,0,101"]).is_err());
        assert!(Options::try_parse_from(["inkmix", "convert", "--rgb", "#00ff00"]).is_ok());
    }

    #[test]
    fn picks_file() {
        let dir = std::env::temp_dir().join(format!("inkmix-picks-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let single = dir.join("single.json");
        std::fs::write(&single, r#"{"x": 1, "y": 2}"#).unwrap();
        assert_eq!(read_picks(&single).unwrap(), vec![Point::new(1.0, 2.0)]);

        let list = dir.join("list.json");
        std::fs::write(&list, r#"[{"x": 1, "y": 2}, {"x": 3, "y": 4}]"#).unwrap();
        assert_eq!(read_picks(&list).unwrap().len(), 2);

        assert!(read_picks(&dir.join("missing.json")).is_err());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
