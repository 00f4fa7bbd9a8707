//! Shape and connection store.
//!
//! [`DiagramStore`] is an arena: a flat, insertion-ordered map from [`Id`] to
//! [`Shape`] plus explicit id-based parent/children links. Every change to the
//! tree goes through [`DiagramStore::reparent`], which checks for cycles before
//! writing, so the parent relation stays acyclic and mutually consistent.
//!
//! The store does not route or group anything itself. It records which kind
//! of change happened in its [`Signals`] so the route cache knows what must be
//! recomputed.

use indexmap::IndexMap;
use log::{debug, trace};

use flowline_core::{
    geometry::{Bounds, Point},
    identifier::Id,
};

use crate::{
    error::FlowlineError,
    shape::{Connection, Shape},
};

/// Pending change notifications raised by store mutations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Signals {
    redraw_connections: bool,
    recompute_z_order: bool,
}

impl Signals {
    /// Geometry changed: connector paths must be recomputed.
    pub fn redraw_connections(self) -> bool {
        self.redraw_connections
    }

    /// The tree changed: the paint order must be recomputed.
    pub fn recompute_z_order(self) -> bool {
        self.recompute_z_order
    }

    pub fn is_empty(self) -> bool {
        !self.redraw_connections && !self.recompute_z_order
    }
}

/// Result of a [`DiagramStore::reparent`] request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reparent {
    /// The link was rewritten.
    Changed,
    /// The shape already had the requested parent.
    Unchanged,
    /// The requested parent is the shape itself or one of its descendants.
    Refused,
}

/// Arena of shapes and connections.
#[derive(Debug, Default)]
pub struct DiagramStore {
    shapes: IndexMap<Id, Shape>,
    connections: IndexMap<Id, Connection>,
    z_order: Vec<Id>,
    signals: Signals,
    connection_counter: usize,
}

impl DiagramStore {
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Shapes
    // -------------------------------------------------------------------------

    /// Adds a top-level shape.
    ///
    /// Tree links and collapse state of the given shape are reset; use
    /// [`reparent`](Self::reparent) to group it.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is already used or the size is not positive.
    pub fn add_shape(&mut self, shape: Shape) -> Result<(), FlowlineError> {
        let id = shape.id();
        if self.shapes.contains_key(&id) {
            return Err(FlowlineError::DuplicateShape(id));
        }
        validate_bounds(id, shape.bounds())?;

        let shape = Shape::new(id, shape.bounds()).with_label(shape.label());

        debug!(shape_id:% = id; "Shape added");
        self.shapes.insert(id, shape);
        self.mark_tree_changed();
        Ok(())
    }

    /// Removes a shape, the connections touching it, and ungroups its children.
    ///
    /// Children that were hidden by the removed shape become visible again,
    /// except below their own collapsed containers.
    ///
    /// # Errors
    ///
    /// Returns an error if the shape does not exist.
    pub fn remove_shape(&mut self, id: Id) -> Result<Shape, FlowlineError> {
        let mut removed = self
            .shapes
            .shift_remove(&id)
            .ok_or(FlowlineError::UnknownShape(id))?;

        if let Some(parent) = removed.parent().and_then(|p| self.shapes.get_mut(&p)) {
            parent.remove_child(id);
        }

        for child in removed.clear_children() {
            if let Some(shape) = self.shapes.get_mut(&child) {
                shape.set_parent(None);
            }
            self.apply_visibility(child, false);
        }

        let before = self.connections.len();
        self.connections.retain(|_, conn| !conn.touches(id));
        debug!(
            shape_id:% = id,
            dropped_connections = before - self.connections.len();
            "Shape removed"
        );

        self.mark_tree_changed();
        Ok(removed)
    }

    pub fn shape(&self, id: Id) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    pub(crate) fn shape_mut(&mut self, id: Id) -> Option<&mut Shape> {
        self.shapes.get_mut(&id)
    }

    /// Returns the shape or an [`FlowlineError::UnknownShape`] error.
    pub fn require_shape(&self, id: Id) -> Result<&Shape, FlowlineError> {
        self.shapes.get(&id).ok_or(FlowlineError::UnknownShape(id))
    }

    pub fn contains_shape(&self, id: Id) -> bool {
        self.shapes.contains_key(&id)
    }

    /// Iterates shapes in insertion order.
    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.values()
    }

    pub fn shapes_count(&self) -> usize {
        self.shapes.len()
    }

    /// Replaces a shape's rectangle without touching its descendants.
    ///
    /// # Errors
    ///
    /// Returns an error if the shape does not exist or the size is not positive.
    pub fn set_bounds(&mut self, id: Id, bounds: Bounds) -> Result<(), FlowlineError> {
        validate_bounds(id, bounds)?;
        let shape = self
            .shapes
            .get_mut(&id)
            .ok_or(FlowlineError::UnknownShape(id))?;
        if shape.bounds() != bounds {
            shape.set_bounds(bounds);
            self.mark_geometry_changed();
        }
        Ok(())
    }

    /// Moves a shape and all of its descendants by `offset`.
    ///
    /// # Errors
    ///
    /// Returns an error if the shape does not exist.
    pub fn move_subtree(&mut self, id: Id, offset: Point) -> Result<(), FlowlineError> {
        if !self.shapes.contains_key(&id) {
            return Err(FlowlineError::UnknownShape(id));
        }
        if offset.is_zero() {
            return Ok(());
        }

        let mut moved = vec![id];
        moved.extend(self.descendants(id));
        for shape_id in moved {
            if let Some(shape) = self.shapes.get_mut(&shape_id) {
                shape.set_bounds(shape.bounds().translate(offset));
            }
        }
        trace!(shape_id:% = id, dx = offset.x(), dy = offset.y(); "Subtree moved");

        self.mark_geometry_changed();
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Tree
    // -------------------------------------------------------------------------

    /// Moves `child` under `new_parent`, or to the top level when `None`.
    ///
    /// This is the only operation that writes tree links. A request that
    /// would make a shape its own ancestor is refused without any change.
    /// The child's subtree is hidden when the new parent is collapsed or
    /// hidden, and shown otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if either shape does not exist.
    pub fn reparent(&mut self, child: Id, new_parent: Option<Id>) -> Result<Reparent, FlowlineError> {
        let current = self.require_shape(child)?.parent();
        if let Some(parent) = new_parent {
            self.require_shape(parent)?;
            if parent == child || self.is_descendant(parent, child) {
                debug!(shape_id:% = child, parent_id:% = parent; "Cyclic grouping refused");
                return Ok(Reparent::Refused);
            }
        }

        if current == new_parent {
            return Ok(Reparent::Unchanged);
        }

        if let Some(old_parent) = current.and_then(|old| self.shapes.get_mut(&old)) {
            old_parent.remove_child(child);
        }

        let mut hidden_by_parent = false;
        if let Some(parent_shape) = new_parent.and_then(|parent| self.shapes.get_mut(&parent)) {
            parent_shape.push_child(child);
            hidden_by_parent = parent_shape.is_hidden() || parent_shape.is_collapsed();
        }

        if let Some(shape) = self.shapes.get_mut(&child) {
            shape.set_parent(new_parent);
        }
        self.apply_visibility(child, hidden_by_parent);

        debug!(
            shape_id:% = child,
            old_parent:? = current.map(|id| id.as_string()),
            new_parent:? = new_parent.map(|id| id.as_string());
            "Shape reparented"
        );

        self.mark_tree_changed();
        Ok(Reparent::Changed)
    }

    /// Returns true if `candidate` lies strictly below `ancestor` in the tree.
    pub fn is_descendant(&self, candidate: Id, ancestor: Id) -> bool {
        let mut current = self.shapes.get(&candidate).and_then(Shape::parent);
        // The step bound keeps a corrupted tree from looping forever.
        for _ in 0..self.shapes.len() {
            match current {
                Some(id) if id == ancestor => return true,
                Some(id) => current = self.shapes.get(&id).and_then(Shape::parent),
                None => return false,
            }
        }
        false
    }

    /// All shapes below `id`, in pre-order.
    pub fn descendants(&self, id: Id) -> Vec<Id> {
        let mut result = Vec::new();
        let mut stack: Vec<Id> = self
            .shapes
            .get(&id)
            .map(|shape| shape.children().iter().rev().copied().collect())
            .unwrap_or_default();

        while let Some(current) = stack.pop() {
            if result.contains(&current) {
                continue;
            }
            result.push(current);
            if let Some(shape) = self.shapes.get(&current) {
                stack.extend(shape.children().iter().rev().copied());
            }
        }
        result
    }

    /// Parent chain of `id`, nearest first.
    pub fn ancestors(&self, id: Id) -> Vec<Id> {
        let mut result = Vec::new();
        let mut current = self.shapes.get(&id).and_then(Shape::parent);
        while let Some(parent) = current {
            if result.contains(&parent) || result.len() >= self.shapes.len() {
                break;
            }
            result.push(parent);
            current = self.shapes.get(&parent).and_then(Shape::parent);
        }
        result
    }

    /// Number of ancestors of `id`.
    pub fn depth(&self, id: Id) -> usize {
        self.ancestors(id).len()
    }

    /// Shapes sharing the parent of `id` (top-level shapes when `id` has no
    /// parent), excluding `id` itself.
    pub fn siblings(&self, id: Id) -> Vec<Id> {
        let Some(shape) = self.shapes.get(&id) else {
            return Vec::new();
        };
        match shape.parent() {
            Some(parent) => self
                .shapes
                .get(&parent)
                .map(|p| p.children().iter().copied().filter(|c| *c != id).collect())
                .unwrap_or_default(),
            None => self
                .roots()
                .filter(|root| *root != id)
                .collect(),
        }
    }

    /// Top-level shapes in insertion order.
    pub fn roots(&self) -> impl Iterator<Item = Id> + '_ {
        self.shapes
            .values()
            .filter(|shape| shape.parent().is_none())
            .map(Shape::id)
    }

    /// Returns true if following parent links never revisits a shape.
    pub fn is_acyclic(&self) -> bool {
        self.shapes.keys().all(|id| {
            let mut seen = vec![*id];
            let mut current = self.shapes.get(id).and_then(Shape::parent);
            while let Some(parent) = current {
                if seen.contains(&parent) {
                    return false;
                }
                seen.push(parent);
                current = self.shapes.get(&parent).and_then(Shape::parent);
            }
            true
        })
    }

    /// Sets `hidden` on `id` and propagates visibility through its subtree:
    /// children of a collapsed or hidden shape are hidden.
    pub(crate) fn apply_visibility(&mut self, id: Id, hidden: bool) {
        let mut stack = vec![(id, hidden)];
        while let Some((current, hidden)) = stack.pop() {
            let Some(shape) = self.shapes.get_mut(&current) else {
                continue;
            };
            shape.set_hidden(hidden);
            let hide_children = hidden || shape.is_collapsed();
            stack.extend(
                shape
                    .children()
                    .iter()
                    .rev()
                    .map(|child| (*child, hide_children)),
            );
        }
    }

    // -------------------------------------------------------------------------
    // Z-order
    // -------------------------------------------------------------------------

    /// Computes the current paint order without caching it: a pre-order walk
    /// from the top-level shapes, so every shape is painted after (above) its
    /// ancestors.
    pub fn paint_order(&self) -> Vec<Id> {
        let mut order = Vec::with_capacity(self.shapes.len());
        for root in self.roots() {
            order.push(root);
            order.extend(self.descendants(root));
        }
        order
    }

    /// Recomputes the cached paint order.
    pub fn recompute_z_order(&mut self) {
        self.z_order = self.paint_order();
        trace!(shapes = self.z_order.len(); "Z-order recomputed");
    }

    /// Shapes in paint order, bottom first, as of the last recompute.
    pub fn z_order(&self) -> &[Id] {
        &self.z_order
    }

    // -------------------------------------------------------------------------
    // Connections
    // -------------------------------------------------------------------------

    /// Adds a connection between two existing shapes.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is taken or either endpoint does not exist.
    pub fn add_connection(&mut self, connection: Connection) -> Result<(), FlowlineError> {
        let id = connection.id();
        if self.connections.contains_key(&id) {
            return Err(FlowlineError::DuplicateConnection(id));
        }
        self.require_shape(connection.from())?;
        self.require_shape(connection.to())?;

        debug!(
            connection_id:% = id,
            from:% = connection.from(),
            to:% = connection.to();
            "Connection added"
        );
        self.connections.insert(id, connection);
        self.mark_geometry_changed();
        Ok(())
    }

    /// Removes a connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection does not exist.
    pub fn remove_connection(&mut self, id: Id) -> Result<Connection, FlowlineError> {
        let removed = self
            .connections
            .shift_remove(&id)
            .ok_or(FlowlineError::UnknownConnection(id))?;
        self.mark_geometry_changed();
        Ok(removed)
    }

    pub fn connection(&self, id: Id) -> Option<&Connection> {
        self.connections.get(&id)
    }

    /// Iterates connections in insertion order.
    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.connections.values()
    }

    pub fn connections_count(&self) -> usize {
        self.connections.len()
    }

    /// Returns an unused connection id of the form `connection-N`.
    pub fn next_connection_id(&mut self) -> Id {
        loop {
            let id = Id::numbered("connection", self.connection_counter);
            self.connection_counter += 1;
            if !self.connections.contains_key(&id) {
                return id;
            }
        }
    }

    // -------------------------------------------------------------------------
    // Signals
    // -------------------------------------------------------------------------

    /// Pending signals, without clearing them.
    pub fn signals(&self) -> Signals {
        self.signals
    }

    /// Returns and clears the pending signals.
    pub fn take_signals(&mut self) -> Signals {
        std::mem::take(&mut self.signals)
    }

    pub(crate) fn mark_geometry_changed(&mut self) {
        self.signals.redraw_connections = true;
    }

    pub(crate) fn mark_tree_changed(&mut self) {
        self.signals.recompute_z_order = true;
        self.signals.redraw_connections = true;
    }
}

fn validate_bounds(id: Id, bounds: Bounds) -> Result<(), FlowlineError> {
    let size = bounds.to_size();
    if !size.is_positive() {
        return Err(FlowlineError::InvalidSize {
            id,
            width: size.width(),
            height: size.height(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use flowline_core::anchor::Side;

    use super::*;

    fn shape(name: &str, x: f32, y: f32, w: f32, h: f32) -> Shape {
        Shape::new(Id::new(name), Bounds::from_rect(x, y, w, h))
    }

    fn store_with(names: &[&str]) -> DiagramStore {
        let mut store = DiagramStore::new();
        for (i, name) in names.iter().enumerate() {
            store
                .add_shape(shape(name, i as f32 * 200.0, 0.0, 100.0, 40.0))
                .unwrap();
        }
        store
    }

    #[test]
    fn test_add_shape_rejects_duplicates_and_empty_sizes() {
        let mut store = store_with(&["store-a"]);

        assert!(matches!(
            store.add_shape(shape("store-a", 0.0, 0.0, 10.0, 10.0)),
            Err(FlowlineError::DuplicateShape(_))
        ));
        assert!(matches!(
            store.add_shape(shape("store-flat", 0.0, 0.0, 10.0, 0.0)),
            Err(FlowlineError::InvalidSize { .. })
        ));
    }

    #[test]
    fn test_reparent_keeps_links_consistent() {
        let mut store = store_with(&["tree-a", "tree-b", "tree-c"]);
        let (a, b, c) = (Id::new("tree-a"), Id::new("tree-b"), Id::new("tree-c"));

        assert_eq!(store.reparent(b, Some(a)).unwrap(), Reparent::Changed);
        assert_eq!(store.reparent(b, Some(a)).unwrap(), Reparent::Unchanged);
        assert_eq!(store.reparent(b, Some(c)).unwrap(), Reparent::Changed);

        assert!(store.shape(a).unwrap().children().is_empty());
        assert_eq!(store.shape(c).unwrap().children(), &[b]);
        assert_eq!(store.shape(b).unwrap().parent(), Some(c));
    }

    #[test]
    fn test_reparent_refuses_cycles() {
        let mut store = store_with(&["cycle-a", "cycle-b", "cycle-c"]);
        let (a, b, c) = (Id::new("cycle-a"), Id::new("cycle-b"), Id::new("cycle-c"));
        store.reparent(b, Some(a)).unwrap();
        store.reparent(c, Some(b)).unwrap();

        assert_eq!(store.reparent(a, Some(c)).unwrap(), Reparent::Refused);
        assert_eq!(store.reparent(a, Some(a)).unwrap(), Reparent::Refused);
        assert_eq!(store.shape(a).unwrap().parent(), None);
        assert!(store.is_acyclic());
    }

    #[test]
    fn test_reparent_unknown_shape_is_error() {
        let mut store = store_with(&["known"]);
        assert!(matches!(
            store.reparent(Id::new("known"), Some(Id::new("missing"))),
            Err(FlowlineError::UnknownShape(_))
        ));
    }

    #[test]
    fn test_descendants_and_ancestors() {
        let mut store = store_with(&["walk-a", "walk-b", "walk-c", "walk-d"]);
        let ids: Vec<Id> = ["walk-a", "walk-b", "walk-c", "walk-d"]
            .iter()
            .map(|name| Id::new(name))
            .collect();
        store.reparent(ids[1], Some(ids[0])).unwrap();
        store.reparent(ids[2], Some(ids[1])).unwrap();
        store.reparent(ids[3], Some(ids[0])).unwrap();

        assert_eq!(store.descendants(ids[0]), vec![ids[1], ids[2], ids[3]]);
        assert_eq!(store.ancestors(ids[2]), vec![ids[1], ids[0]]);
        assert_eq!(store.depth(ids[2]), 2);
        assert!(store.is_descendant(ids[2], ids[0]));
        assert!(!store.is_descendant(ids[0], ids[2]));
        assert_eq!(store.siblings(ids[1]), vec![ids[3]]);
    }

    #[test]
    fn test_move_subtree_moves_descendants() {
        let mut store = store_with(&["move-a", "move-b"]);
        let (a, b) = (Id::new("move-a"), Id::new("move-b"));
        store.reparent(b, Some(a)).unwrap();
        store.take_signals();

        store.move_subtree(a, Point::new(10.0, 5.0)).unwrap();

        assert_eq!(store.shape(a).unwrap().bounds().min_point(), Point::new(10.0, 5.0));
        assert_eq!(store.shape(b).unwrap().bounds().min_point(), Point::new(210.0, 5.0));
        assert!(store.take_signals().redraw_connections());
    }

    #[test]
    fn test_remove_shape_cascades() {
        let mut store = store_with(&["rm-a", "rm-b", "rm-c"]);
        let (a, b, c) = (Id::new("rm-a"), Id::new("rm-b"), Id::new("rm-c"));
        store.reparent(b, Some(a)).unwrap();
        store
            .add_connection(Connection::new(Id::new("rm-ac"), a, Side::Bottom, c, Side::Top))
            .unwrap();
        store
            .add_connection(Connection::new(Id::new("rm-bc"), b, Side::Right, c, Side::Left))
            .unwrap();

        store.remove_shape(a).unwrap();

        assert!(!store.contains_shape(a));
        assert_eq!(store.shape(b).unwrap().parent(), None);
        assert_eq!(store.connections_count(), 1);
        assert!(store.connection(Id::new("rm-bc")).is_some());
    }

    #[test]
    fn test_remove_collapsed_container_reveals_children() {
        let mut store = store_with(&["reveal-a", "reveal-b"]);
        let (a, b) = (Id::new("reveal-a"), Id::new("reveal-b"));
        store.reparent(b, Some(a)).unwrap();
        store.shape_mut(a).unwrap().set_collapsed(true);
        store.apply_visibility(a, false);
        assert!(store.shape(b).unwrap().is_hidden());

        store.remove_shape(a).unwrap();
        assert!(!store.shape(b).unwrap().is_hidden());
    }

    #[test]
    fn test_add_connection_requires_endpoints() {
        let mut store = store_with(&["conn-a"]);
        let result = store.add_connection(Connection::new(
            Id::new("conn-x"),
            Id::new("conn-a"),
            Side::Bottom,
            Id::new("conn-missing"),
            Side::Top,
        ));
        assert!(matches!(result, Err(FlowlineError::UnknownShape(_))));
    }

    #[test]
    fn test_next_connection_id_skips_used_ids() {
        let mut store = store_with(&["next-a", "next-b"]);
        store
            .add_connection(Connection::new(
                Id::new("connection-0"),
                Id::new("next-a"),
                Side::Bottom,
                Id::new("next-b"),
                Side::Top,
            ))
            .unwrap();

        assert_eq!(store.next_connection_id(), Id::new("connection-1"));
    }

    #[test]
    fn test_z_order_places_descendants_above_ancestors() {
        let mut store = store_with(&["z-a", "z-b", "z-c"]);
        let (a, b, c) = (Id::new("z-a"), Id::new("z-b"), Id::new("z-c"));
        store.reparent(a, Some(c)).unwrap();
        store.recompute_z_order();

        assert_eq!(store.z_order(), &[b, c, a]);
    }

    #[test]
    fn test_signals_are_taken_once() {
        let mut store = store_with(&["sig-a"]);
        let signals = store.take_signals();
        assert!(signals.recompute_z_order());
        assert!(signals.redraw_connections());
        assert!(store.take_signals().is_empty());
    }
}
