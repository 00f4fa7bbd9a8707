//! Route invalidation.
//!
//! [`RouteCache`] keeps the last routed paths and recomputes them only when the
//! store signals a change. The paint order is refreshed before routing.

use log::trace;

use flowline_core::identifier::Id;

use crate::{
    routing::{RoutedConnection, Router},
    store::DiagramStore,
};

/// Cached connector paths.
#[derive(Debug)]
pub struct RouteCache {
    routes: Vec<RoutedConnection>,
    stale: bool,
}

impl RouteCache {
    /// Creates an empty cache that routes on the first refresh.
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            stale: true,
        }
    }

    /// Consumes the store's pending signals.
    ///
    /// Recomputes the z-order when the tree changed, then every connector path
    /// when any geometry changed. Returns true if paths were recomputed.
    pub fn refresh(&mut self, store: &mut DiagramStore, router: &Router) -> bool {
        let signals = store.take_signals();
        if signals.recompute_z_order() {
            store.recompute_z_order();
        }
        if !signals.redraw_connections() && !self.stale {
            trace!("Routes up to date");
            return false;
        }

        self.routes = router.route_all(store);
        self.stale = false;
        true
    }

    /// Forces the next [`refresh`](Self::refresh) to reroute.
    pub fn invalidate(&mut self) {
        self.stale = true;
    }

    /// Paths as of the last refresh, in connection order.
    pub fn routes(&self) -> &[RoutedConnection] {
        &self.routes
    }

    pub fn route(&self, id: Id) -> Option<&RoutedConnection> {
        self.routes.iter().find(|routed| routed.id() == id)
    }
}

impl Default for RouteCache {
    fn default() -> Self {
        Self::new()
    }
}
