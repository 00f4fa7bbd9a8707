//! Drop handling: infers the parent of a shape from where its center lands.

use log::{debug, trace};

use flowline_core::{geometry::Bounds, identifier::Id};

use super::{DropOutcome, GroupingEngine};
use crate::{
    error::FlowlineError,
    store::{DiagramStore, Reparent},
};

/// Returns true if the center of `inner` lies within `outer`, edges included.
pub fn contains_center(outer: Bounds, inner: Bounds) -> bool {
    outer.contains_point(inner.center())
}

impl GroupingEngine {
    /// Finds the shape that should contain `id` given its current position.
    ///
    /// Candidates are visible, expanded shapes other than `id` and its
    /// descendants whose rectangle contains the center of `id`. The candidate
    /// painted last (topmost) wins.
    pub fn find_container(&self, store: &DiagramStore, id: Id) -> Option<Id> {
        let shape = store.shape(id)?;
        let bounds = shape.bounds();
        let excluded = store.descendants(id);

        store.paint_order().into_iter().rev().find(|candidate| {
            *candidate != id
                && !excluded.contains(candidate)
                && store.shape(*candidate).is_some_and(|c| {
                    !c.is_hidden() && !c.is_collapsed() && contains_center(c.bounds(), bounds)
                })
        })
    }

    /// Regroups `id` after it was dropped at its current position.
    ///
    /// The topmost container under the shape's center becomes its parent. When
    /// no container is found and the current parent no longer contains the
    /// center, the shape becomes top-level. New and old parents are resized
    /// afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if the shape does not exist.
    pub fn handle_drop(&self, store: &mut DiagramStore, id: Id) -> Result<DropOutcome, FlowlineError> {
        let shape = store.require_shape(id)?;
        if shape.is_hidden() {
            return Ok(DropOutcome::Unchanged);
        }
        let bounds = shape.bounds();
        let old_parent = shape.parent();

        match self.find_container(store, id) {
            Some(parent) if Some(parent) == old_parent => {
                self.update_parent_size(store, parent)?;
                Ok(DropOutcome::Unchanged)
            }
            Some(parent) => {
                if store.reparent(id, Some(parent))? == Reparent::Refused {
                    return Ok(DropOutcome::Unchanged);
                }
                self.update_parent_size(store, parent)?;
                if let Some(previous) = old_parent {
                    self.update_parent_size(store, previous)?;
                }
                debug!(shape_id:% = id, parent_id:% = parent; "Shape grouped");
                Ok(DropOutcome::Grouped { parent })
            }
            None => {
                let Some(previous) = old_parent else {
                    trace!(shape_id:% = id; "Dropped outside any container");
                    return Ok(DropOutcome::Unchanged);
                };
                let still_inside = store
                    .shape(previous)
                    .is_some_and(|p| contains_center(p.bounds(), bounds));
                if still_inside {
                    self.update_parent_size(store, previous)?;
                    return Ok(DropOutcome::Unchanged);
                }

                store.reparent(id, None)?;
                self.update_parent_size(store, previous)?;
                debug!(shape_id:% = id, parent_id:% = previous; "Shape ungrouped");
                Ok(DropOutcome::Ungrouped { previous })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use flowline_core::geometry::Point;

    use super::*;
    use crate::shape::Shape;

    fn add(store: &mut DiagramStore, name: &str, x: f32, y: f32, w: f32, h: f32) -> Id {
        let id = Id::new(name);
        store
            .add_shape(Shape::new(id, Bounds::from_rect(x, y, w, h)))
            .unwrap();
        id
    }

    #[test]
    fn test_contains_center_is_inclusive() {
        let outer = Bounds::from_rect(0.0, 0.0, 100.0, 100.0);
        assert!(contains_center(outer, Bounds::from_rect(80.0, 80.0, 40.0, 40.0)));
        assert!(!contains_center(outer, Bounds::from_rect(90.0, 90.0, 40.0, 40.0)));
    }

    #[test]
    fn test_drop_into_container_and_back_out() {
        let mut store = DiagramStore::new();
        let engine = GroupingEngine::default();
        let group = add(&mut store, "drop-group", 0.0, 0.0, 400.0, 300.0);
        let card = add(&mut store, "drop-card", 100.0, 100.0, 120.0, 40.0);

        assert_eq!(
            engine.handle_drop(&mut store, card).unwrap(),
            DropOutcome::Grouped { parent: group }
        );
        assert_eq!(store.shape(card).unwrap().parent(), Some(group));
        assert_eq!(store.shape(group).unwrap().children(), &[card]);

        store.move_subtree(card, Point::new(500.0, 0.0)).unwrap();
        assert_eq!(
            engine.handle_drop(&mut store, card).unwrap(),
            DropOutcome::Ungrouped { previous: group }
        );
        assert_eq!(store.shape(card).unwrap().parent(), None);
        assert!(store.shape(group).unwrap().children().is_empty());
    }

    #[test]
    fn test_drop_inside_same_parent_is_unchanged() {
        let mut store = DiagramStore::new();
        let engine = GroupingEngine::default();
        let group = add(&mut store, "same-group", 0.0, 0.0, 400.0, 300.0);
        let card = add(&mut store, "same-card", 100.0, 100.0, 120.0, 40.0);
        engine.handle_drop(&mut store, card).unwrap();

        store.move_subtree(card, Point::new(20.0, 20.0)).unwrap();
        assert_eq!(
            engine.handle_drop(&mut store, card).unwrap(),
            DropOutcome::Unchanged
        );
        assert_eq!(store.shape(card).unwrap().parent(), Some(group));
    }

    #[test]
    fn test_topmost_container_wins() {
        let mut store = DiagramStore::new();
        let engine = GroupingEngine::default();
        let outer = add(&mut store, "top-outer", 0.0, 0.0, 600.0, 400.0);
        let inner = add(&mut store, "top-inner", 50.0, 80.0, 300.0, 200.0);
        let card = add(&mut store, "top-card", 100.0, 150.0, 80.0, 30.0);
        store.reparent(inner, Some(outer)).unwrap();

        assert_eq!(
            engine.handle_drop(&mut store, card).unwrap(),
            DropOutcome::Grouped { parent: inner }
        );
    }

    #[test]
    fn test_collapsed_shapes_are_not_targets() {
        let mut store = DiagramStore::new();
        let engine = GroupingEngine::default();
        let folded = add(&mut store, "folded-group", 0.0, 0.0, 400.0, 300.0);
        let inside = add(&mut store, "folded-inside", 10.0, 10.0, 20.0, 20.0);
        store.reparent(inside, Some(folded)).unwrap();
        store.shape_mut(folded).unwrap().set_collapsed(true);
        let card = add(&mut store, "folded-card", 100.0, 100.0, 120.0, 40.0);

        assert_eq!(
            engine.handle_drop(&mut store, card).unwrap(),
            DropOutcome::Unchanged
        );
    }

    #[test]
    fn test_descendants_are_not_targets() {
        let mut store = DiagramStore::new();
        let engine = GroupingEngine::default();
        let group = add(&mut store, "desc-group", 0.0, 0.0, 200.0, 200.0);
        let child = add(&mut store, "desc-child", 20.0, 20.0, 160.0, 160.0);
        store.reparent(child, Some(group)).unwrap();

        assert_eq!(engine.find_container(&store, group), None);
        assert_eq!(
            engine.handle_drop(&mut store, group).unwrap(),
            DropOutcome::Unchanged
        );
        assert!(store.is_acyclic());
    }

    #[test]
    fn test_regroup_resizes_new_parent() {
        let mut store = DiagramStore::new();
        let engine = GroupingEngine::default();
        let group = add(&mut store, "grow-group", 0.0, 0.0, 200.0, 100.0);
        let card = add(&mut store, "grow-card", 120.0, 60.0, 120.0, 40.0);

        engine.handle_drop(&mut store, card).unwrap();

        let bounds = store.shape(group).unwrap().bounds();
        assert_eq!(bounds.min_point(), Point::new(0.0, 0.0));
        assert_eq!(bounds.max_x(), 260.0);
        assert_eq!(bounds.max_y(), 120.0);
    }
}
