//! Connector anchors.
//!
//! An anchor is the place where a connector attaches to a shape: a point on
//! one of the four sides of the shape's rectangle, together with that side's
//! outward direction.
//!
//! # Example
//!
//! ```
//! # use flowline_core::{anchor::{Anchor, Side}, geometry::{Bounds, Point}};
//! let bounds = Bounds::from_rect(0.0, 0.0, 120.0, 36.0);
//!
//! let anchor = Anchor::on_bounds(bounds, Side::Bottom);
//! assert_eq!(anchor.point(), Point::new(60.0, 36.0));
//! assert_eq!(anchor.side().direction(), Point::new(0.0, 1.0));
//! ```

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::{Bounds, Point};

/// Error returned when a side name is not one of `top`, `bottom`, `left`, `right`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown side `{0}`")]
pub struct UnknownSide(String);

/// One of the four sides of a rectangle a connector may attach to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    /// All sides in declaration order.
    pub const ALL: [Side; 4] = [Side::Top, Side::Bottom, Side::Left, Side::Right];

    /// Returns the outward unit direction of this side.
    pub fn direction(self) -> Point {
        match self {
            Self::Top => Point::new(0.0, -1.0),
            Self::Bottom => Point::new(0.0, 1.0),
            Self::Left => Point::new(-1.0, 0.0),
            Self::Right => Point::new(1.0, 0.0),
        }
    }

    /// Returns true for sides whose direction lies on the x axis.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// Returns the side facing the opposite way.
    pub fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns the lowercase name of this side.
    pub fn name(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// Parses an optional side name, falling back to `default` when the name is
    /// missing or not recognized.
    ///
    /// # Examples
    ///
    /// ```
    /// # use flowline_core::anchor::Side;
    /// assert_eq!(Side::parse_or(Some("left"), Side::Bottom), Side::Left);
    /// assert_eq!(Side::parse_or(Some("diagonal"), Side::Bottom), Side::Bottom);
    /// assert_eq!(Side::parse_or(None, Side::Top), Side::Top);
    /// ```
    pub fn parse_or(name: Option<&str>, default: Side) -> Side {
        match name.map(str::parse::<Side>) {
            Some(Ok(side)) => side,
            Some(Err(err)) => {
                log::warn!(default = default.name(); "{err}, using default side");
                default
            }
            None => default,
        }
    }

    /// Returns the midpoint of this side on the given rectangle.
    pub fn point_on(self, bounds: Bounds) -> Point {
        let center = bounds.center();
        match self {
            Self::Top => center.with_y(bounds.min_y()),
            Self::Bottom => center.with_y(bounds.max_y()),
            Self::Left => center.with_x(bounds.min_x()),
            Self::Right => center.with_x(bounds.max_x()),
        }
    }
}

impl FromStr for Side {
    type Err = UnknownSide;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            _ => Err(UnknownSide(s.to_string())),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A connector endpoint: a point and the side it leaves from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    point: Point,
    side: Side,
}

impl Anchor {
    pub fn new(point: Point, side: Side) -> Self {
        Self { point, side }
    }

    /// Creates the anchor at the midpoint of `side` on `bounds`.
    pub fn on_bounds(bounds: Bounds, side: Side) -> Self {
        Self::new(side.point_on(bounds), side)
    }

    pub fn point(self) -> Point {
        self.point
    }

    pub fn side(self) -> Side {
        self.side
    }

    /// Projects the anchor point outward along its side direction.
    pub fn stub(self, distance: f32) -> Point {
        self.point.add_point(self.side.direction().scale(distance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_directions_are_unit_and_outward() {
        for side in Side::ALL {
            let dir = side.direction();
            assert_eq!(dir.hypot(), 1.0);
            assert_eq!(dir.add_point(side.opposite().direction()), Point::new(0.0, 0.0));
        }
    }

    #[test]
    fn test_side_is_horizontal() {
        assert!(Side::Left.is_horizontal());
        assert!(Side::Right.is_horizontal());
        assert!(!Side::Top.is_horizontal());
        assert!(!Side::Bottom.is_horizontal());
    }

    #[test]
    fn test_side_from_str() {
        assert_eq!("top".parse::<Side>(), Ok(Side::Top));
        assert_eq!(" Right ".parse::<Side>(), Ok(Side::Right));
        assert!("middle".parse::<Side>().is_err());
    }

    #[test]
    fn test_side_display_roundtrip() {
        for side in Side::ALL {
            assert_eq!(side.to_string().parse::<Side>(), Ok(side));
        }
    }

    #[test]
    fn test_point_on_each_side() {
        let bounds = Bounds::from_rect(10.0, 20.0, 100.0, 40.0);

        assert_eq!(Side::Top.point_on(bounds), Point::new(60.0, 20.0));
        assert_eq!(Side::Bottom.point_on(bounds), Point::new(60.0, 60.0));
        assert_eq!(Side::Left.point_on(bounds), Point::new(10.0, 40.0));
        assert_eq!(Side::Right.point_on(bounds), Point::new(110.0, 40.0));
    }

    #[test]
    fn test_anchor_stub() {
        let anchor = Anchor::on_bounds(Bounds::from_rect(0.0, 0.0, 100.0, 40.0), Side::Right);
        assert_eq!(anchor.stub(20.0), Point::new(120.0, 20.0));
    }
}
