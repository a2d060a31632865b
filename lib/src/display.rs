use crate::color::Cmyk;
use serde::{Deserialize, Serialize};

/// Percentages as shown to the user, one decimal each.
///
/// `c`, `m`, `y` and `k` describe the ink-only mixture and never sum to more than 100. `w` is the
/// share of the original mixture left uncovered by ink.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayPercentages {
    pub c: f64,
    pub m: f64,
    pub y: f64,
    pub k: f64,
    pub w: f64,
}

impl DisplayPercentages {
    pub fn inks(&self) -> [f64; 4] {
        [self.c, self.m, self.y, self.k]
    }

    /// Values in column order cyan, magenta, yellow, black, white.
    pub fn values(&self) -> [f64; 5] {
        [self.c, self.m, self.y, self.k, self.w]
    }
}

/// Rounds to one decimal place, half away from zero.
pub(crate) fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn format_for_display(cmyk: Cmyk) -> DisplayPercentages {
    let inks = [cmyk.c, cmyk.m, cmyk.y, cmyk.k].map(f64::from);
    let sum = inks.iter().sum::<f64>();

    // Inks alone cover the mixture, shrink them proportionally.
    let scaled = if sum > 100.0 {
        inks.map(|v| v * 100.0 / sum)
    } else {
        inks
    };

    // White always follows the unscaled sum.
    let white = if sum == 0.0 {
        100.0
    } else if sum > 100.0 {
        0.0
    } else {
        100.0 - sum
    };

    DisplayPercentages {
        c: round_tenth(scaled[0]),
        m: round_tenth(scaled[1]),
        y: round_tenth(scaled[2]),
        k: round_tenth(scaled[3]),
        w: round_tenth(white.max(0.0)),
    }
}

impl Cmyk {
    pub fn display(self) -> DisplayPercentages {
        format_for_display(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{to_cmyk, Rgb};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn percentages(c: f64, m: f64, y: f64, k: f64, w: f64) -> DisplayPercentages {
        DisplayPercentages { c, m, y, k, w }
    }

    #[test]
    fn no_ink_is_all_white() {
        assert_eq!(
            format_for_display(Cmyk::new(0, 0, 0, 0)),
            percentages(0.0, 0.0, 0.0, 0.0, 100.0)
        );
    }

    #[test]
    fn over_full_coverage_is_rescaled() {
        assert_eq!(
            format_for_display(Cmyk::new(50, 50, 50, 50)),
            percentages(25.0, 25.0, 25.0, 25.0, 0.0)
        );
    }

    #[test]
    fn partial_coverage_keeps_inks() {
        assert_eq!(
            format_for_display(Cmyk::new(30, 20, 10, 0)),
            percentages(30.0, 20.0, 10.0, 0.0, 40.0)
        );
    }

    #[test]
    fn exactly_full_coverage_has_no_white() {
        assert_eq!(
            format_for_display(Cmyk::new(0, 0, 0, 100)),
            percentages(0.0, 0.0, 0.0, 100.0, 0.0)
        );
        assert_eq!(
            format_for_display(Cmyk::new(25, 25, 25, 25)),
            percentages(25.0, 25.0, 25.0, 25.0, 0.0)
        );
    }

    #[test]
    fn rescaled_thirds() {
        // sum 300, each share is 33.33..
        assert_eq!(
            format_for_display(Cmyk::new(100, 100, 100, 0)),
            percentages(33.3, 33.3, 33.3, 0.0, 0.0)
        );
    }

    #[test]
    fn half_tenths_round_up() {
        // sum 160: 1.25, 36.25, 31.25, 31.25
        assert_eq!(
            format_for_display(Cmyk::new(2, 58, 50, 50)),
            percentages(1.3, 36.3, 31.3, 31.3, 0.0)
        );
        assert_eq!(round_tenth(0.25), 0.3);
        assert_eq!(round_tenth(0.24), 0.2);
    }

    #[test]
    fn tenths_pass_through() {
        for value in [0.0, 0.1, 12.3, 33.3, 99.9, 100.0].iter() {
            assert_eq!(round_tenth(*value), *value);
        }
    }

    #[test]
    fn converted_red() {
        let display = to_cmyk(Rgb::new(255, 0, 0)).display();

        assert_eq!(display, percentages(0.0, 50.0, 50.0, 0.0, 0.0));
    }

    proptest! {
        #[test]
        fn normalized_values_are_sane(c in 0u8..=100, m in 0u8..=100, y in 0u8..=100, k in 0u8..=100) {
            let cmyk = Cmyk::new(c, m, y, k);
            let display = format_for_display(cmyk);

            for value in display.values().iter() {
                prop_assert!(*value >= 0.0);
            }

            let inks = display.inks().iter().sum::<f64>();
            prop_assert!(inks <= 100.0 + 0.2);

            if cmyk.sum() > 100 {
                prop_assert_eq!(display.w, 0.0);
                prop_assert!((inks - 100.0).abs() <= 0.2);
            } else {
                prop_assert_eq!(display.w, 100.0 - cmyk.sum() as f64);
            }

            prop_assert_eq!(display, format_for_display(cmyk));
        }
    }
}
