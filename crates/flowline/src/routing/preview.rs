//! Destination side inference for live connection previews.

use flowline_core::{anchor::Side, geometry::Point};

/// Infers the side a preview path should enter the cursor from.
///
/// The dominant axis of `cursor - start` decides: moving right enters from the
/// left, moving left enters from the right, moving down enters from the top,
/// moving up enters from the bottom. Ties favour the vertical axis.
///
/// # Examples
///
/// ```
/// # use flowline::routing::preview_side;
/// # use flowline::geometry::Point;
/// # use flowline::anchor::Side;
/// let start = Point::new(0.0, 0.0);
/// assert_eq!(preview_side(start, Point::new(50.0, 10.0)), Side::Left);
/// assert_eq!(preview_side(start, Point::new(10.0, -50.0)), Side::Bottom);
/// ```
pub fn preview_side(start: Point, cursor: Point) -> Side {
    let delta = cursor.sub_point(start);
    if delta.x().abs() > delta.y().abs() {
        if delta.x() > 0.0 { Side::Left } else { Side::Right }
    } else if delta.y() < 0.0 {
        Side::Bottom
    } else {
        Side::Top
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dominant_axis() {
        let start = Point::new(100.0, 100.0);

        assert_eq!(preview_side(start, Point::new(200.0, 120.0)), Side::Left);
        assert_eq!(preview_side(start, Point::new(0.0, 120.0)), Side::Right);
        assert_eq!(preview_side(start, Point::new(120.0, 200.0)), Side::Top);
        assert_eq!(preview_side(start, Point::new(120.0, 0.0)), Side::Bottom);
    }

    #[test]
    fn test_ties_pick_vertical_axis() {
        let start = Point::new(0.0, 0.0);

        assert_eq!(preview_side(start, Point::new(30.0, 30.0)), Side::Top);
        assert_eq!(preview_side(start, Point::new(-30.0, -30.0)), Side::Bottom);
    }
}
