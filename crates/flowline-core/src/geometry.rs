//! Geometric primitives for shape placement and connector routing.
//!
//! This module provides the fundamental geometric types used throughout Flowline
//! for positioning shapes, testing containment, and computing connector paths.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate (or direction vector) in diagram space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - A rectangle defined by minimum and maximum coordinates
//! - [`Insets`] - Padding values for four sides
//!
//! # Coordinate System
//!
//! Flowline uses the same coordinate system as the DOM and SVG:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! - **Origin**: Top-left corner at `(0, 0)`
//! - **X-axis**: Increases rightward
//! - **Y-axis**: Increases downward
//!
//! Shapes are stored by their top-left corner, so [`Bounds::new_from_top_left`]
//! is the usual constructor.

use serde::{Deserialize, Serialize};

/// A 2D point representing a position in diagram coordinate space.
///
/// Points double as direction vectors: the router uses unit points for the
/// outward direction of anchor sides and for segment directions.
///
/// # Examples
///
/// ```
/// # use flowline_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 15.0);
/// assert_eq!(sum.y(), 25.0);
///
/// let mid = p1.midpoint(p2);
/// assert_eq!(mid.x(), 7.5);
/// assert_eq!(mid.y(), 12.5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Creates a new point with the specified x-coordinate
    pub fn with_x(mut self, x: f32) -> Self {
        self.x = x;
        self
    }

    /// Creates a new point with the specified y-coordinate
    pub fn with_y(mut self, y: f32) -> Self {
        self.y = y;
        self
    }

    /// Checks if both x and y coordinates are zero
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Adds another point to this point, returning a new point.
    ///
    /// # Examples
    ///
    /// ```
    /// # use flowline_core::geometry::Point;
    /// let position = Point::new(100.0, 50.0);
    /// let offset = Point::new(10.0, -5.0);
    ///
    /// let moved = position.add_point(offset);
    /// assert_eq!(moved.x(), 110.0);
    /// assert_eq!(moved.y(), 45.0);
    /// ```
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Calculates the midpoint between this point and another point
    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Calculates the hypotenuse (Euclidean length of the vector)
    pub fn hypot(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance to another point
    pub fn distance(self, other: Point) -> f32 {
        other.sub_point(self).hypot()
    }

    /// Multiplies both coordinates by the given factor.
    ///
    /// # Examples
    ///
    /// ```
    /// # use flowline_core::geometry::Point;
    /// let direction = Point::new(0.0, -1.0);
    ///
    /// let stub = direction.scale(20.0);
    /// assert_eq!(stub.x(), 0.0);
    /// assert_eq!(stub.y(), -20.0);
    /// ```
    pub fn scale(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Returns a new point with absolute values of both coordinates
    pub fn abs(self) -> Self {
        Self {
            x: self.x.abs(),
            y: self.y.abs(),
        }
    }

    /// Dot product of two vectors
    pub fn dot(self, other: Point) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the cross product of two vectors.
    ///
    /// With y pointing down, a positive value means `other` is a clockwise
    /// turn from `self`.
    pub fn cross(self, other: Point) -> f32 {
        self.x * other.y - self.y * other.x
    }

    /// Returns the unit vector in the direction of this point.
    ///
    /// Returns `None` for vectors too short to have a direction.
    pub fn normalize(self) -> Option<Self> {
        let length = self.hypot();
        if length <= f32::EPSILON {
            return None;
        }
        Some(self.scale(1.0 / length))
    }

    /// Returns true if both coordinates are within `tolerance` of the other point.
    pub fn approx_eq(self, other: Point, tolerance: f32) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns a new Size with the maximum width and height between this size and another
    pub fn max(self, other: Size) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }

    /// Returns true if both width and height are zero
    pub fn is_zero(self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }

    /// Returns true if both dimensions are strictly positive and finite
    pub fn is_positive(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }
}

/// Represents a rectangular bounding box with minimum and maximum coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates a new bounds from a top-left point and a size
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    /// Creates a new bounds from `x`, `y`, `width` and `height`, the way DOM rectangles are stored
    pub fn from_rect(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new_from_top_left(Point::new(x, y), Size::new(width, height))
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the center point of the bounds
    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns the top-left corner as a Point
    pub fn min_point(self) -> Point {
        Point {
            x: self.min_x,
            y: self.min_y,
        }
    }

    /// Converts bounds to a Size object
    pub fn to_size(self) -> Size {
        Size {
            width: self.width(),
            height: self.height(),
        }
    }

    /// Returns bounds with the same top-left corner and the given size
    pub fn with_size(self, size: Size) -> Self {
        Self::new_from_top_left(self.min_point(), size)
    }

    /// Merges two bounds to create a larger bounds that contains both.
    ///
    /// # Examples
    ///
    /// ```
    /// # use flowline_core::geometry::{Bounds, Point, Size};
    /// let first = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(100.0, 30.0));
    /// let second = Bounds::new_from_top_left(Point::new(10.0, 40.0), Size::new(120.0, 80.0));
    ///
    /// let combined = first.merge(&second);
    /// assert_eq!(combined.min_x(), 0.0);
    /// assert_eq!(combined.min_y(), 0.0);
    /// assert_eq!(combined.width(), 130.0);
    /// assert_eq!(combined.height(), 120.0);
    /// ```
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Moves the bounds by the specified offset.
    ///
    /// # Examples
    ///
    /// ```
    /// # use flowline_core::geometry::{Bounds, Point, Size};
    /// let bounds = Bounds::new_from_top_left(Point::new(10.0, 20.0), Size::new(50.0, 30.0));
    ///
    /// let moved = bounds.translate(Point::new(100.0, 50.0));
    /// assert_eq!(moved.min_x(), 110.0);
    /// assert_eq!(moved.min_y(), 70.0);
    /// assert_eq!(moved.width(), 50.0);
    /// assert_eq!(moved.height(), 30.0);
    /// ```
    pub fn translate(&self, offset: Point) -> Self {
        Self {
            min_x: self.min_x + offset.x,
            min_y: self.min_y + offset.y,
            max_x: self.max_x + offset.x,
            max_y: self.max_y + offset.y,
        }
    }

    /// Expands the bounds by adding insets on each side.
    pub fn add_padding(&self, insets: Insets) -> Self {
        Self {
            min_x: self.min_x - insets.left(),
            min_y: self.min_y - insets.top(),
            max_x: self.max_x + insets.right(),
            max_y: self.max_y + insets.bottom(),
        }
    }

    /// Returns true if the point lies inside the bounds, edges included.
    ///
    /// # Examples
    ///
    /// ```
    /// # use flowline_core::geometry::{Bounds, Point};
    /// let bounds = Bounds::from_rect(0.0, 0.0, 100.0, 50.0);
    /// assert!(bounds.contains_point(Point::new(100.0, 50.0)));
    /// assert!(!bounds.contains_point(Point::new(100.1, 25.0)));
    /// ```
    pub fn contains_point(self, point: Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    /// Returns true if the horizontal spans of both bounds share interior length.
    pub fn overlaps_horizontally(self, other: Bounds) -> bool {
        self.min_x < other.max_x && other.min_x < self.max_x
    }

    /// Returns true if the vertical spans of both bounds share interior length.
    pub fn overlaps_vertically(self, other: Bounds) -> bool {
        self.min_y < other.max_y && other.min_y < self.max_y
    }
}

/// Represents spacing around an element (padding, margin, etc.)
/// with potentially different values for each side
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    top: f32,
    right: f32,
    bottom: f32,
    left: f32,
}

impl Insets {
    /// Creates new insets with specified values for each side
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Creates uniform insets with the same value for all sides
    pub fn uniform(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Returns the top inset value
    pub fn top(self) -> f32 {
        self.top
    }

    /// Returns the right inset value
    pub fn right(self) -> f32 {
        self.right
    }

    /// Returns the bottom inset value
    pub fn bottom(self) -> f32 {
        self.bottom
    }

    /// Returns the left inset value
    pub fn left(self) -> f32 {
        self.left
    }

    /// Returns a new Insets with the specified top value
    pub fn with_top(self, top: f32) -> Self {
        Self { top, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_default() {
        let point = Point::default();
        assert_eq!(point.x(), 0.0);
        assert_eq!(point.y(), 0.0);
        assert!(point.is_zero());
    }

    #[test]
    fn test_point_add_sub() {
        let p1 = Point::new(5.0, 8.0);
        let p2 = Point::new(2.0, 3.0);
        assert_eq!(p1.add_point(p2), Point::new(7.0, 11.0));
        assert_eq!(p1.sub_point(p2), Point::new(3.0, 5.0));
    }

    #[test]
    fn test_point_distance() {
        let a = Point::new(1.0, 1.0);
        let b = Point::new(4.0, 5.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(b.distance(a), 5.0);
    }

    #[test]
    fn test_point_dot_and_cross() {
        let right = Point::new(1.0, 0.0);
        let down = Point::new(0.0, 1.0);

        assert_eq!(right.dot(down), 0.0);
        assert_eq!(right.dot(right), 1.0);

        // Right then down is a clockwise turn on screen
        assert_eq!(right.cross(down), 1.0);
        assert_eq!(down.cross(right), -1.0);
    }

    #[test]
    fn test_point_normalize() {
        let unit = Point::new(0.0, -40.0).normalize().unwrap();
        assert_eq!(unit, Point::new(0.0, -1.0));

        assert!(Point::new(0.0, 0.0).normalize().is_none());
    }

    #[test]
    fn test_point_approx_eq() {
        let a = Point::new(10.0, 10.0);
        assert!(a.approx_eq(Point::new(10.3, 9.8), 0.5));
        assert!(!a.approx_eq(Point::new(10.6, 10.0), 0.5));
    }

    #[test]
    fn test_size_is_positive() {
        assert!(Size::new(1.0, 1.0).is_positive());
        assert!(!Size::new(0.0, 10.0).is_positive());
        assert!(!Size::new(10.0, -1.0).is_positive());
        assert!(!Size::new(f32::INFINITY, 10.0).is_positive());
    }

    #[test]
    fn test_size_max() {
        let max_size = Size::new(10.0, 20.0).max(Size::new(15.0, 18.0));
        assert_eq!(max_size, Size::new(15.0, 20.0));
    }

    #[test]
    fn test_bounds_from_rect() {
        let bounds = Bounds::from_rect(10.0, 20.0, 30.0, 40.0);

        assert_eq!(bounds.min_x(), 10.0);
        assert_eq!(bounds.min_y(), 20.0);
        assert_eq!(bounds.max_x(), 40.0);
        assert_eq!(bounds.max_y(), 60.0);
        assert_eq!(bounds.to_size(), Size::new(30.0, 40.0));
        assert_eq!(bounds.center(), Point::new(25.0, 40.0));
    }

    #[test]
    fn test_bounds_with_size_keeps_top_left() {
        let bounds = Bounds::from_rect(5.0, 7.0, 100.0, 100.0).with_size(Size::new(10.0, 20.0));
        assert_eq!(bounds, Bounds::from_rect(5.0, 7.0, 10.0, 20.0));
    }

    #[test]
    fn test_bounds_merge() {
        let merged = Bounds::from_rect(1.0, 2.0, 4.0, 4.0).merge(&Bounds::from_rect(3.0, 0.0, 5.0, 4.0));
        assert_eq!(merged.min_x(), 1.0);
        assert_eq!(merged.min_y(), 0.0);
        assert_eq!(merged.max_x(), 8.0);
        assert_eq!(merged.max_y(), 6.0);
    }

    #[test]
    fn test_bounds_translate() {
        let translated = Bounds::from_rect(1.0, 2.0, 4.0, 4.0).translate(Point::new(3.0, -1.0));
        assert_eq!(translated, Bounds::from_rect(4.0, 1.0, 4.0, 4.0));
    }

    #[test]
    fn test_bounds_add_padding() {
        let padded = Bounds::from_rect(2.0, 3.0, 4.0, 5.0).add_padding(Insets::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(padded.min_x(), -2.0);
        assert_eq!(padded.min_y(), 2.0);
        assert_eq!(padded.max_x(), 8.0);
        assert_eq!(padded.max_y(), 11.0);
    }

    #[test]
    fn test_bounds_contains_point_is_inclusive() {
        let bounds = Bounds::from_rect(0.0, 0.0, 10.0, 10.0);

        assert!(bounds.contains_point(Point::new(0.0, 0.0)));
        assert!(bounds.contains_point(Point::new(10.0, 10.0)));
        assert!(bounds.contains_point(Point::new(5.0, 5.0)));
        assert!(!bounds.contains_point(Point::new(-0.1, 5.0)));
        assert!(!bounds.contains_point(Point::new(5.0, 10.1)));
    }

    #[test]
    fn test_bounds_overlap_spans() {
        let a = Bounds::from_rect(0.0, 0.0, 10.0, 10.0);
        let touching = Bounds::from_rect(10.0, 0.0, 10.0, 10.0);
        let below = Bounds::from_rect(2.0, 20.0, 4.0, 4.0);

        assert!(!a.overlaps_horizontally(touching));
        assert!(a.overlaps_vertically(touching));
        assert!(a.overlaps_horizontally(below));
        assert!(!a.overlaps_vertically(below));
    }

    #[test]
    fn test_insets_builders() {
        let insets = Insets::uniform(0.0).with_top(10.0);
        assert_eq!(insets.top(), 10.0);
        assert_eq!(insets.left(), 0.0);
        assert_eq!(Insets::uniform(5.0), Insets::new(5.0, 5.0, 5.0, 5.0));
    }
}
