//! Elbow placement between two stub points.
//!
//! Every elbow list keeps the polyline orthogonal: consecutive points share
//! either their x or their y coordinate, starting from the source stub and
//! ending at the target stub.

use flowline_core::{anchor::Side, geometry::Point};

/// Computes the intermediate corner points between `start_stub` and `end_stub`.
pub(super) fn elbows(
    start_side: Side,
    start_stub: Point,
    end_side: Side,
    end_stub: Point,
    stub_length: f32,
) -> Vec<Point> {
    if start_side.is_horizontal() == end_side.is_horizontal() {
        parallel_elbows(start_side, start_stub, end_side, end_stub, stub_length)
    } else {
        cross_elbow(start_side, start_stub, end_side, end_stub)
    }
}

/// Both sides lie on the same axis.
fn parallel_elbows(
    start_side: Side,
    start_stub: Point,
    end_side: Side,
    end_stub: Point,
    stub_length: f32,
) -> Vec<Point> {
    let dir = start_side.direction();
    let horizontal = start_side.is_horizontal();

    if start_side == end_side {
        // Back-to-back: go one stub beyond the farther stub, then jog across.
        let (s, e) = if horizontal {
            (start_stub.x(), end_stub.x())
        } else {
            (start_stub.y(), end_stub.y())
        };
        let sign = if horizontal { dir.x() } else { dir.y() };
        let detour = if sign > 0.0 {
            s.max(e) + stub_length
        } else {
            s.min(e) - stub_length
        };
        return if horizontal {
            vec![start_stub.with_x(detour), end_stub.with_x(detour)]
        } else {
            vec![start_stub.with_y(detour), end_stub.with_y(detour)]
        };
    }

    let ahead = end_stub.sub_point(start_stub).dot(dir) >= 0.0;
    let mid = start_stub.midpoint(end_stub);
    match (horizontal, ahead) {
        (true, true) => vec![start_stub.with_x(mid.x()), end_stub.with_x(mid.x())],
        (true, false) => vec![start_stub.with_y(mid.y()), end_stub.with_y(mid.y())],
        (false, true) => vec![start_stub.with_y(mid.y()), end_stub.with_y(mid.y())],
        (false, false) => vec![start_stub.with_x(mid.x()), end_stub.with_x(mid.x())],
    }
}

/// One side is horizontal, the other vertical: a single corner.
fn cross_elbow(start_side: Side, start_stub: Point, end_side: Side, end_stub: Point) -> Vec<Point> {
    let (corner, fallback) = if start_side.is_horizontal() {
        (
            Point::new(end_stub.x(), start_stub.y()),
            Point::new(start_stub.x(), end_stub.y()),
        )
    } else {
        (
            Point::new(start_stub.x(), end_stub.y()),
            Point::new(end_stub.x(), start_stub.y()),
        )
    };

    let forward = end_stub.sub_point(start_stub).dot(start_side.direction()) >= 0.0;
    let approaches = end_stub.sub_point(corner).dot(end_side.direction()) <= 0.0;
    if forward && approaches {
        vec![corner]
    } else {
        vec![fallback]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_orthogonal(points: &[Point]) -> bool {
        points
            .windows(2)
            .all(|pair| pair[0].x() == pair[1].x() || pair[0].y() == pair[1].y())
    }

    #[test]
    fn test_back_to_back_right_detour() {
        let start = Point::new(120.0, 20.0);
        let end = Point::new(140.0, 220.0);
        let points = elbows(Side::Right, start, Side::Right, end, 20.0);

        assert_eq!(points, vec![Point::new(160.0, 20.0), Point::new(160.0, 220.0)]);
    }

    #[test]
    fn test_back_to_back_top_detour() {
        let start = Point::new(50.0, -20.0);
        let end = Point::new(300.0, 80.0);
        let points = elbows(Side::Top, start, Side::Top, end, 20.0);

        assert_eq!(points, vec![Point::new(50.0, -40.0), Point::new(300.0, -40.0)]);
    }

    #[test]
    fn test_facing_sides_use_mid_axis() {
        let start = Point::new(120.0, 20.0);
        let end = Point::new(280.0, 100.0);
        let points = elbows(Side::Right, start, Side::Left, end, 20.0);

        assert_eq!(points, vec![Point::new(200.0, 20.0), Point::new(200.0, 100.0)]);
    }

    #[test]
    fn test_facing_away_uses_perpendicular_mid_axis() {
        let start = Point::new(120.0, 20.0);
        let end = Point::new(-20.0, 220.0);
        let points = elbows(Side::Right, start, Side::Left, end, 20.0);

        assert_eq!(points, vec![Point::new(120.0, 120.0), Point::new(-20.0, 120.0)]);
    }

    #[test]
    fn test_cross_valid_l_shape() {
        // Right side out, into a top side down-right of it.
        let start = Point::new(120.0, 20.0);
        let end = Point::new(300.0, 180.0);
        let points = elbows(Side::Right, start, Side::Top, end, 20.0);

        assert_eq!(points, vec![Point::new(300.0, 20.0)]);
    }

    #[test]
    fn test_cross_invalid_l_shape_uses_other_diagonal() {
        // Target is behind the source side.
        let start = Point::new(120.0, 20.0);
        let end = Point::new(40.0, 180.0);
        let points = elbows(Side::Right, start, Side::Top, end, 20.0);

        assert_eq!(points, vec![Point::new(120.0, 180.0)]);
    }

    #[test]
    fn test_all_side_pairs_stay_orthogonal() {
        let start = Point::new(10.0, 10.0);
        let end = Point::new(-75.0, 140.0);
        for start_side in Side::ALL {
            for end_side in Side::ALL {
                let mut points = vec![start];
                points.extend(elbows(start_side, start, end_side, end, 20.0));
                points.push(end);
                assert!(
                    is_orthogonal(&points),
                    "{start_side} -> {end_side}: {points:?}"
                );
            }
        }
    }
}
