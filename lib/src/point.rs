use anyhow::{anyhow, bail, Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;
use std::str::FromStr;

/// Location on a canvas or display surface, in possibly fractional pixels.
#[derive(Copy, Clone, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn origin() -> Self {
        Point::new(0.0, 0.0)
    }

    pub fn distance(&self, other: &Self) -> f64 {
        let xs = self.x - other.x;
        let ys = self.y - other.y;
        ((xs * xs) + (ys * ys)).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Point")
            .field("x", &self.x)
            .field("y", &self.y)
            .finish()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.distance(other) < 0.00001
    }
}

impl FromStr for Point {
    type Err = Error;

    /// Parses `X,Y`.
    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split(',').map(str::trim);

        let (x, y) = match (parts.next(), parts.next(), parts.next()) {
            (Some(x), Some(y), None) => (x, y),
            _ => bail!("expected X,Y, got `{}`", s),
        };

        let parse = |v: &str| {
            v.parse::<f64>()
                .map_err(|e| anyhow!("invalid coordinate `{}`: {}", v, e))
        };

        let point = Point::new(parse(x)?, parse(y)?);

        if !point.is_finite() {
            bail!("coordinates must be finite, got `{}`", s);
        }

        Ok(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse() {
        assert_eq!("10,20.5".parse::<Point>().unwrap(), Point::new(10.0, 20.5));
        assert_eq!(" 3 , 4 ".parse::<Point>().unwrap(), Point::new(3.0, 4.0));

        assert!("10".parse::<Point>().is_err());
        assert!("1,2,3".parse::<Point>().is_err());
        assert!("x,2".parse::<Point>().is_err());
        assert!("inf,2".parse::<Point>().is_err());
    }

    #[test]
    fn arithmetic() {
        let p = Point::new(1.0, 2.0) + Point::new(2.0, 2.0);

        assert_eq!(p, Point::new(3.0, 4.0));
        assert_eq!(Point::origin().distance(&Point::new(3.0, 4.0)), 5.0);
    }

    #[test]
    fn deserialize() {
        let points: Vec<Point> = serde_json::from_str(r#"[{"x": 1, "y": 2.5}]"#).unwrap();

        assert_eq!(points, vec![Point::new(1.0, 2.5)]);
    }
}
