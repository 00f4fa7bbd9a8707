//! Connector style types.
//!
//! A connection's style is opaque to the geometry engine: it is stored with the
//! connection and handed back to the rendering layer untouched.

use std::{fmt, str};

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Defines the visual style of connector paths.
///
/// # Variants
///
/// - `Orthogonal`: Rounded elbow paths made of horizontal and vertical segments
/// - `Straight`: Direct line segments between anchors
/// - `Curved`: Smooth bezier curves between anchors
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectorKind {
    #[default]
    Orthogonal,
    Straight,
    Curved,
}

impl str::FromStr for ConnectorKind {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "orthogonal" => Ok(Self::Orthogonal),
            "straight" => Ok(Self::Straight),
            "curved" => Ok(Self::Curved),
            _ => Err("Invalid connector kind"),
        }
    }
}

/// Defines where arrow heads are drawn.
///
/// - `Forward`: `->` arrow pointing from source to destination
/// - `Backward`: `<-` arrow pointing from destination to source
/// - `Bidirectional`: `<->` arrows at both ends
/// - `Plain`: `-` line without arrow heads
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrowDirection {
    #[default]
    Forward, // ->
    Backward,      // <-
    Bidirectional, // <->
    Plain,         // -
}

impl ArrowDirection {
    fn symbol(self) -> &'static str {
        match self {
            Self::Forward => "->",
            Self::Backward => "<-",
            Self::Bidirectional => "<->",
            Self::Plain => "-",
        }
    }
}

impl str::FromStr for ArrowDirection {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "->" | "forward" => Ok(Self::Forward),
            "<-" | "backward" => Ok(Self::Backward),
            "<->" | "bidirectional" => Ok(Self::Bidirectional),
            "-" | "plain" => Ok(Self::Plain),
            _ => Err("Invalid arrow direction"),
        }
    }
}

impl fmt::Display for ArrowDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Visual style of a connection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionStyle {
    kind: ConnectorKind,
    arrow: ArrowDirection,
    color: Color,
}

impl ConnectionStyle {
    pub fn new(kind: ConnectorKind, arrow: ArrowDirection, color: Color) -> Self {
        Self { kind, arrow, color }
    }

    /// Gets the connector kind
    pub fn kind(&self) -> ConnectorKind {
        self.kind
    }

    /// Gets the arrow direction
    pub fn arrow(&self) -> ArrowDirection {
        self.arrow
    }

    /// Gets the stroke color
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns a copy with the given arrow direction
    pub fn with_arrow(mut self, arrow: ArrowDirection) -> Self {
        self.arrow = arrow;
        self
    }

    /// Returns a copy with the given color
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connector_kind_from_str() {
        assert_eq!("straight".parse(), Ok(ConnectorKind::Straight));
        assert_eq!("curved".parse(), Ok(ConnectorKind::Curved));
        assert_eq!("orthogonal".parse(), Ok(ConnectorKind::Orthogonal));
        assert!("zigzag".parse::<ConnectorKind>().is_err());
    }

    #[test]
    fn test_arrow_direction_from_str() {
        assert_eq!("->".parse(), Ok(ArrowDirection::Forward));
        assert_eq!("<-".parse(), Ok(ArrowDirection::Backward));
        assert_eq!("bidirectional".parse(), Ok(ArrowDirection::Bidirectional));
        assert_eq!("-".parse(), Ok(ArrowDirection::Plain));
        assert!(">>".parse::<ArrowDirection>().is_err());
    }

    #[test]
    fn test_arrow_direction_display() {
        assert_eq!(ArrowDirection::Forward.to_string(), "->");
        assert_eq!(ArrowDirection::Bidirectional.to_string(), "<->");
    }

    #[test]
    fn test_style_builders() {
        let red = Color::new("red").unwrap();
        let style = ConnectionStyle::default()
            .with_arrow(ArrowDirection::Plain)
            .with_color(red);

        assert_eq!(style.kind(), ConnectorKind::Orthogonal);
        assert_eq!(style.arrow(), ArrowDirection::Plain);
        assert_eq!(style.color(), red);
    }
}
