//! Connector path representation, simplification and corner rounding.

use flowline_core::geometry::Point;

/// Tolerance for deciding that two coordinates lie on the same axis line.
const AXIS_EPSILON: f32 = 1e-3;

/// A single drawing command of a connector path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    /// Straight segment from the current point.
    Line { to: Point },
    /// Circular arc from the current point.
    ///
    /// `sweep` is true when the arc turns clockwise on screen (y grows
    /// downward), matching the SVG sweep flag.
    Arc { to: Point, radius: f32, sweep: bool },
}

impl PathCommand {
    /// End point of the command.
    pub fn to(self) -> Point {
        match self {
            Self::Line { to } | Self::Arc { to, .. } => to,
        }
    }
}

/// An ordered list of path commands starting at `start`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectorPath {
    start: Point,
    commands: Vec<PathCommand>,
}

impl ConnectorPath {
    pub fn new(start: Point) -> Self {
        Self {
            start,
            commands: Vec::new(),
        }
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Current pen position: the end of the last command, or the start.
    pub fn end(&self) -> Point {
        self.commands
            .last()
            .map_or(self.start, |command| command.to())
    }

    /// The start point followed by the end point of every command.
    pub fn points(&self) -> Vec<Point> {
        std::iter::once(self.start)
            .chain(self.commands.iter().map(|command| command.to()))
            .collect()
    }

    /// Iterates the radii of all arcs.
    pub fn arc_radii(&self) -> impl Iterator<Item = f32> + '_ {
        self.commands.iter().filter_map(|command| match command {
            PathCommand::Arc { radius, .. } => Some(*radius),
            PathCommand::Line { .. } => None,
        })
    }

    /// Appends a line to `to`; zero-length lines are skipped.
    fn line_to(&mut self, to: Point) {
        if self.end().distance(to) > f32::EPSILON {
            self.commands.push(PathCommand::Line { to });
        }
    }

    fn arc_to(&mut self, to: Point, radius: f32, sweep: bool) {
        self.commands.push(PathCommand::Arc { to, radius, sweep });
    }

    /// Renders the path as SVG path data (`M`, `L` and `A` commands).
    pub fn to_path_data(&self) -> String {
        let mut data = format!("M {} {}", self.start.x(), self.start.y());
        for command in &self.commands {
            let segment = match *command {
                PathCommand::Line { to } => format!(" L {} {}", to.x(), to.y()),
                PathCommand::Arc { to, radius, sweep } => format!(
                    " A {} {} 0 0 {} {} {}",
                    radius,
                    radius,
                    u8::from(sweep),
                    to.x(),
                    to.y()
                ),
            };
            data.push_str(&segment);
        }
        data
    }
}

/// Removes near-duplicate consecutive points and interior points that lie on
/// the same horizontal or vertical line as both neighbours.
///
/// The first and last points are always kept.
pub(super) fn simplify(points: &[Point], merge_tolerance: f32) -> Vec<Point> {
    let mut deduped: Vec<Point> = Vec::with_capacity(points.len());
    let last_index = points.len().saturating_sub(1);
    for (i, &point) in points.iter().enumerate() {
        let kept = deduped.len();
        match deduped.last_mut() {
            Some(prev) if prev.distance(point) < merge_tolerance => {
                if i == last_index {
                    if kept == 1 {
                        deduped.push(point);
                    } else {
                        *prev = point;
                    }
                }
            }
            _ => deduped.push(point),
        }
    }

    let mut result: Vec<Point> = Vec::with_capacity(deduped.len());
    for point in deduped {
        while let [.., a, b] = result.as_slice() {
            if shares_axis_line(*a, *b, point) {
                result.pop();
            } else {
                break;
            }
        }
        result.push(point);
    }
    result
}

fn shares_axis_line(a: Point, b: Point, c: Point) -> bool {
    let vertical = (a.x() - b.x()).abs() < AXIS_EPSILON && (b.x() - c.x()).abs() < AXIS_EPSILON;
    let horizontal = (a.y() - b.y()).abs() < AXIS_EPSILON && (b.y() - c.y()).abs() < AXIS_EPSILON;
    vertical || horizontal
}

/// Turns a polyline into line and arc commands.
///
/// Each corner is rounded with `min(corner_radius, in / 2, out / 2)` where `in`
/// and `out` are the adjacent segment lengths; radii below `merge_tolerance`
/// produce a sharp corner.
pub(super) fn round_corners(points: &[Point], corner_radius: f32, merge_tolerance: f32) -> ConnectorPath {
    let Some((&start, rest)) = points.split_first() else {
        return ConnectorPath::new(Point::default());
    };
    let mut path = ConnectorPath::new(start);

    for window in points.windows(3) {
        let [prev, corner, next] = [window[0], window[1], window[2]];
        let incoming = corner.sub_point(prev);
        let outgoing = next.sub_point(corner);
        let (Some(dir_in), Some(dir_out)) = (incoming.normalize(), outgoing.normalize()) else {
            continue;
        };

        let cross = dir_in.cross(dir_out);
        if cross.abs() < AXIS_EPSILON {
            if dir_in.dot(dir_out) < 0.0 {
                path.line_to(corner);
            }
            continue;
        }

        let radius = corner_radius
            .min(incoming.hypot() / 2.0)
            .min(outgoing.hypot() / 2.0);
        if radius < merge_tolerance {
            path.line_to(corner);
            continue;
        }

        let arc_start = corner.sub_point(dir_in.scale(radius));
        let arc_end = corner.add_point(dir_out.scale(radius));
        path.line_to(arc_start);
        path.arc_to(arc_end, radius, cross > 0.0);
    }

    if let Some(&end) = rest.last() {
        path.line_to(end);
    }
    path
}
