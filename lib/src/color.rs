use anyhow::{anyhow, bail, Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Below this, `1 - k` is treated as zero and chromatic inks are dropped.
const MIN_WHITE: f64 = 1e-6;

/// Additive 8-bit color as read from a raster surface.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Ink coverage in whole percent, one field per subtractive pigment.
///
/// Channels are independent: a converted color can have every channel close to 100, so the sum
/// is not bounded by 100. See [`crate::display`] for the normalized view.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cmyk {
    pub c: u8,
    pub m: u8,
    pub y: u8,
    pub k: u8,
}

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    pub fn to_cmyk(self) -> Cmyk {
        to_cmyk(self)
    }
}

impl Cmyk {
    pub fn new(c: u8, m: u8, y: u8, k: u8) -> Self {
        Cmyk { c, m, y, k }
    }

    pub fn to_rgb(self) -> Rgb {
        to_rgb(self)
    }

    /// Raw ink sum, may exceed 100.
    pub fn sum(&self) -> u32 {
        self.channels().iter().map(|&v| v as u32).sum()
    }

    pub fn channels(&self) -> [u8; 4] {
        [self.c, self.m, self.y, self.k]
    }
}

/// Rounds a unit fraction to a whole percentage, half away from zero.
///
/// The cast saturates, so tiny negative artifacts of the subtraction end up as 0.
pub(crate) fn round_percent(value: f64) -> u8 {
    (value * 100.0).round() as u8
}

/// Naive subtractive conversion of a sampled pixel into ink percentages.
pub fn to_cmyk(rgb: Rgb) -> Cmyk {
    if rgb.r == 0 && rgb.g == 0 && rgb.b == 0 {
        return Cmyk::new(0, 0, 0, 100);
    }

    let r = rgb.r as f64 / 255.0;
    let g = rgb.g as f64 / 255.0;
    let b = rgb.b as f64 / 255.0;

    let black = 1.0 - r.max(g.max(b));
    let white = 1.0 - black;

    if white < MIN_WHITE {
        return Cmyk::new(0, 0, 0, round_percent(black));
    }

    Cmyk::new(
        round_percent((1.0 - r - black) / white),
        round_percent((1.0 - g - black) / white),
        round_percent((1.0 - b - black) / white),
        round_percent(black),
    )
}

/// Approximate swatch color for an ink mix.
///
/// This is not the inverse of [`to_cmyk`]: both directions round, so a round trip can be off by
/// a few steps per channel. Channels above 100 are not rejected, the result saturates at 0.
pub fn to_rgb(cmyk: Cmyk) -> Rgb {
    let c = cmyk.c as f64 / 100.0;
    let m = cmyk.m as f64 / 100.0;
    let y = cmyk.y as f64 / 100.0;
    let k = cmyk.k as f64 / 100.0;

    let channel = |ink: f64| (255.0 * (1.0 - ink) * (1.0 - k)).round() as u8;

    Rgb::new(channel(c), channel(m), channel(y))
}

fn split_components(s: &str, expected: usize) -> Result<Vec<&str>> {
    let parts = s.split(',').map(str::trim).collect::<Vec<_>>();

    if parts.len() != expected {
        bail!(
            "expected {} comma separated values, got {} in `{}`",
            expected,
            parts.len(),
            s
        );
    }

    Ok(parts)
}

fn parse_component(s: &str, max: u8) -> Result<u8> {
    let value = s
        .parse::<u8>()
        .map_err(|e| anyhow!("invalid value `{}`: {}", s, e))?;

    if value > max {
        bail!("value {} out of range 0..={}", value, max);
    }

    Ok(value)
}

impl FromStr for Rgb {
    type Err = Error;

    /// Parses `R,G,B` or `#rrggbb`.
    fn from_str(s: &str) -> Result<Self> {
        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() {
                bail!("expected #rrggbb, got `{}`", s);
            }

            let channel = |i: usize| {
                u8::from_str_radix(&hex[i..i + 2], 16)
                    .map_err(|e| anyhow!("invalid hex color `{}`: {}", s, e))
            };

            return Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?));
        }

        let parts = split_components(s, 3)?;

        Ok(Rgb::new(
            parse_component(parts[0], u8::MAX)?,
            parse_component(parts[1], u8::MAX)?,
            parse_component(parts[2], u8::MAX)?,
        ))
    }
}

impl FromStr for Cmyk {
    type Err = Error;

    /// Parses `C,M,Y,K` with each value in 0..=100.
    fn from_str(s: &str) -> Result<Self> {
        let parts = split_components(s, 4)?;

        Ok(Cmyk::new(
            parse_component(parts[0], 100)?,
            parse_component(parts[1], 100)?,
            parse_component(parts[2], 100)?,
            parse_component(parts[3], 100)?,
        ))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Cmyk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "C {}% M {}% Y {}% K {}%",
            self.c, self.m, self.y, self.k
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn black_short_circuits() {
        assert_eq!(to_cmyk(Rgb::new(0, 0, 0)), Cmyk::new(0, 0, 0, 100));
    }

    #[test]
    fn white_has_no_ink() {
        assert_eq!(to_cmyk(Rgb::new(255, 255, 255)), Cmyk::new(0, 0, 0, 0));
    }

    #[test]
    fn primaries() {
        assert_eq!(to_cmyk(Rgb::new(255, 0, 0)), Cmyk::new(0, 100, 100, 0));
        assert_eq!(to_cmyk(Rgb::new(0, 255, 0)), Cmyk::new(100, 0, 100, 0));
        assert_eq!(to_cmyk(Rgb::new(0, 0, 255)), Cmyk::new(100, 100, 0, 0));
    }

    #[test]
    fn grays_are_pure_black_ink() {
        assert_eq!(to_cmyk(Rgb::new(128, 128, 128)), Cmyk::new(0, 0, 0, 50));
        assert_eq!(to_cmyk(Rgb::new(1, 1, 1)), Cmyk::new(0, 0, 0, 100));
    }

    #[test]
    fn mixed_color() {
        // 127/255 = 49.8% magenta
        assert_eq!(to_cmyk(Rgb::new(255, 128, 0)), Cmyk::new(0, 50, 100, 0));
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round_percent(0.125), 13);
        assert_eq!(round_percent(0.124), 12);
        assert_eq!(round_percent(-1e-12), 0);
    }

    #[test]
    fn swatch_of_extremes() {
        assert_eq!(to_rgb(Cmyk::new(0, 0, 0, 0)), Rgb::new(255, 255, 255));
        assert_eq!(to_rgb(Cmyk::new(0, 0, 0, 100)), Rgb::new(0, 0, 0));
        assert_eq!(to_rgb(Cmyk::new(0, 100, 100, 0)), Rgb::new(255, 0, 0));
    }

    #[test]
    fn swatch_rounds_half_up() {
        // 255 * 0.5 = 127.5
        assert_eq!(to_rgb(Cmyk::new(0, 0, 0, 50)), Rgb::new(128, 128, 128));
    }

    #[test]
    fn swatch_saturates_out_of_range_ink() {
        assert_eq!(to_rgb(Cmyk::new(200, 0, 0, 0)), Rgb::new(0, 255, 255));
    }

    #[test]
    fn parse_colors() {
        assert_eq!("12, 34,56".parse::<Rgb>().unwrap(), Rgb::new(12, 34, 56));
        assert_eq!("#ff8000".parse::<Rgb>().unwrap(), Rgb::new(255, 128, 0));
        assert_eq!(
            "0,50,100,0".parse::<Cmyk>().unwrap(),
            Cmyk::new(0, 50, 100, 0)
        );

        assert!("1,2".parse::<Rgb>().is_err());
        assert!("256,0,0".parse::<Rgb>().is_err());
        assert!("#ff80".parse::<Rgb>().is_err());
        assert!("0,0,0,101".parse::<Cmyk>().is_err());
        assert!("a,b,c,d".parse::<Cmyk>().is_err());
    }

    #[test]
    fn display_formats() {
        assert_eq!(Rgb::new(255, 128, 0).to_string(), "#ff8000");
        assert_eq!(Cmyk::new(0, 50, 100, 0).to_string(), "C 0% M 50% Y 100% K 0%");
    }

    proptest! {
        #[test]
        fn cmyk_channels_in_range(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
            let cmyk = to_cmyk(Rgb::new(r, g, b));

            for channel in cmyk.channels().iter() {
                prop_assert!(*channel <= 100);
            }
        }

        #[test]
        fn round_trip_is_close(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
            let rgb = Rgb::new(r, g, b);
            let back = to_rgb(to_cmyk(rgb));

            prop_assert!((back.r as i16 - r as i16).abs() <= 3, "{:?} -> {:?}", rgb, back);
            prop_assert!((back.g as i16 - g as i16).abs() <= 3, "{:?} -> {:?}", rgb, back);
            prop_assert!((back.b as i16 - b as i16).abs() <= 3, "{:?} -> {:?}", rgb, back);
        }

        #[test]
        fn more_black_is_darker(c in 0u8..=100, m in 0u8..=100, y in 0u8..=100, k in 0u8..100) {
            let lighter = to_rgb(Cmyk::new(c, m, y, k));
            let darker = to_rgb(Cmyk::new(c, m, y, k + 1));

            prop_assert!(darker.r <= lighter.r);
            prop_assert!(darker.g <= lighter.g);
            prop_assert!(darker.b <= lighter.b);
        }
    }
}
