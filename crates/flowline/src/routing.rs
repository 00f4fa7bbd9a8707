//! Orthogonal connector routing.
//!
//! The [`Router`] turns two anchors into a rounded orthogonal path:
//!
//! 1. Each anchor is projected outward by the stub length.
//! 2. Elbows between the two stubs are chosen from the side orientations.
//! 3. The polyline is simplified (near-duplicates and collinear points dropped).
//! 4. Corners are rounded into arcs.
//!
//! Routing is pure: the same anchors and configuration always yield the same
//! path. Store-level helpers resolve anchors from shape rectangles and skip
//! connections whose endpoints are missing or hidden.

mod elbow;
mod path;
mod preview;

pub use path::{ConnectorPath, PathCommand};
pub use preview::preview_side;

use log::{debug, trace};

use flowline_core::{
    anchor::{Anchor, Side},
    geometry::Point,
    identifier::Id,
    style::ConnectionStyle,
};

use crate::{config::RouterConfig, shape::Connection, store::DiagramStore};

/// A connection together with its computed path.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutedConnection {
    id: Id,
    style: ConnectionStyle,
    path: ConnectorPath,
}

impl RoutedConnection {
    pub fn id(&self) -> Id {
        self.id
    }

    pub fn style(&self) -> &ConnectionStyle {
        &self.style
    }

    pub fn path(&self) -> &ConnectorPath {
        &self.path
    }
}

/// Computes connector paths.
#[derive(Debug, Clone, Default)]
pub struct Router {
    config: RouterConfig,
}

impl Router {
    pub fn new(config: RouterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Routes a path from `start` to `end`.
    pub fn route(&self, start: Anchor, end: Anchor) -> ConnectorPath {
        let stub_length = self.config.stub_length();
        let start_stub = start.stub(stub_length);
        let end_stub = end.stub(stub_length);

        let mut points = Vec::with_capacity(6);
        points.push(start.point());
        points.push(start_stub);
        points.extend(elbow::elbows(
            start.side(),
            start_stub,
            end.side(),
            end_stub,
            stub_length,
        ));
        points.push(end_stub);
        points.push(end.point());

        let simplified = path::simplify(&points, self.config.merge_tolerance());
        trace!(
            raw = points.len(),
            simplified = simplified.len();
            "Route polyline simplified"
        );

        path::round_corners(
            &simplified,
            self.config.corner_radius(),
            self.config.merge_tolerance(),
        )
    }

    /// Routes a preview from `start` to a free cursor position, entering the
    /// cursor from the side given by [`preview_side`].
    pub fn route_preview(&self, start: Anchor, cursor: Point) -> ConnectorPath {
        let side = preview_side(start.point(), cursor);
        self.route(start, Anchor::new(cursor, side))
    }

    /// Routes a stored connection.
    ///
    /// Returns `None` when either endpoint is missing or hidden inside a
    /// collapsed container.
    pub fn route_connection(
        &self,
        store: &DiagramStore,
        connection: &Connection,
    ) -> Option<ConnectorPath> {
        let start = visible_anchor(store, connection.from(), connection.from_port())?;
        let end = visible_anchor(store, connection.to(), connection.to_port())?;
        Some(self.route(start, end))
    }

    /// Routes every connection in the store, in connection order.
    pub fn route_all(&self, store: &DiagramStore) -> Vec<RoutedConnection> {
        let mut skipped = 0usize;
        let routed: Vec<RoutedConnection> = store
            .connections()
            .filter_map(|connection| {
                let path = self.route_connection(store, connection);
                if path.is_none() {
                    skipped += 1;
                }
                path.map(|path| RoutedConnection {
                    id: connection.id(),
                    style: *connection.style(),
                    path,
                })
            })
            .collect();

        debug!(routed = routed.len(), skipped = skipped; "Connections routed");
        routed
    }
}

fn visible_anchor(store: &DiagramStore, id: Id, side: Side) -> Option<Anchor> {
    store
        .shape(id)
        .filter(|shape| !shape.is_hidden())
        .map(|shape| shape.anchor(side))
}
