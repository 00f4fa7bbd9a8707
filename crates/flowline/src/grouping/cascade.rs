//! Cascading displacement of siblings after a container changes size.
//!
//! The x axis is planned first; the y axis is then planned against the
//! positions the x pass produced, and a sibling moved on x is not moved again
//! on y. Growth pushes every sibling beyond the old far edge; shrinking pulls
//! them back, nearest first, but never past a sibling that stays in place or
//! has already settled.

use log::debug;

use flowline_core::{
    geometry::{Bounds, Point},
    identifier::Id,
};

use super::GroupingEngine;
use crate::{error::FlowlineError, store::DiagramStore};

/// Slack when comparing edges that should coincide.
const EDGE_EPSILON: f32 = 1e-3;

#[derive(Debug, Clone, Copy)]
enum Axis {
    X,
    Y,
}

impl Axis {
    fn near_edge(self, bounds: Bounds) -> f32 {
        match self {
            Self::X => bounds.min_x(),
            Self::Y => bounds.min_y(),
        }
    }

    fn far_edge(self, bounds: Bounds) -> f32 {
        match self {
            Self::X => bounds.max_x(),
            Self::Y => bounds.max_y(),
        }
    }

    /// Returns true if the spans on the other axis overlap.
    fn cross_overlap(self, a: Bounds, b: Bounds) -> bool {
        match self {
            Self::X => a.overlaps_vertically(b),
            Self::Y => a.overlaps_horizontally(b),
        }
    }

    fn offset(self, delta: f32) -> Point {
        match self {
            Self::X => Point::new(delta, 0.0),
            Self::Y => Point::new(0.0, delta),
        }
    }
}

impl GroupingEngine {
    /// Moves the siblings of `container` to follow its change from `old` to
    /// `new` bounds.
    ///
    /// Siblings are the shapes sharing the container's parent, or the other
    /// top-level shapes. Moved siblings take their descendants along.
    ///
    /// # Errors
    ///
    /// Returns an error if the container does not exist.
    pub fn adjust_layout(
        &self,
        store: &mut DiagramStore,
        container: Id,
        old: Bounds,
        new: Bounds,
    ) -> Result<(), FlowlineError> {
        store.require_shape(container)?;

        let mut siblings: Vec<(Id, Bounds)> = store
            .siblings(container)
            .into_iter()
            .filter_map(|id| store.shape(id).map(|shape| (id, shape.bounds())))
            .collect();

        let mut offsets: Vec<(Id, Point)> = Vec::new();
        for axis in [Axis::X, Axis::Y] {
            let plan = plan_axis(axis, old, new, &siblings, |id| {
                offsets.iter().any(|(moved, _)| *moved == id)
            });
            for (id, delta) in plan {
                let offset = axis.offset(delta);
                if let Some((_, bounds)) =
                    siblings.iter_mut().find(|(sibling, _)| *sibling == id)
                {
                    *bounds = bounds.translate(offset);
                }
                offsets.push((id, offset));
            }
        }

        for (id, offset) in &offsets {
            store.move_subtree(*id, *offset)?;
        }

        debug!(
            shape_id:% = container,
            moved = offsets.len();
            "Layout adjusted"
        );
        Ok(())
    }
}

/// Plans the displacement of siblings along one axis.
///
/// Siblings for which `pinned` returns true stay where they are but still
/// block shrinking.
fn plan_axis(
    axis: Axis,
    old: Bounds,
    new: Bounds,
    siblings: &[(Id, Bounds)],
    pinned: impl Fn(Id) -> bool,
) -> Vec<(Id, f32)> {
    let old_edge = axis.far_edge(old);
    let delta = axis.far_edge(new) - old_edge;
    if delta.abs() < EDGE_EPSILON {
        return Vec::new();
    }
    let beyond = |id: Id, bounds: Bounds| {
        !pinned(id) && axis.near_edge(bounds) >= old_edge - EDGE_EPSILON
    };

    if delta > 0.0 {
        return siblings
            .iter()
            .filter(|(id, bounds)| beyond(*id, *bounds) && axis.cross_overlap(*bounds, new))
            .map(|(id, _)| (*id, delta))
            .collect();
    }

    let mut movers: Vec<(Id, Bounds)> = siblings
        .iter()
        .filter(|(id, bounds)| beyond(*id, *bounds) && axis.cross_overlap(*bounds, old))
        .copied()
        .collect();
    movers.sort_by(|a, b| axis.near_edge(a.1).total_cmp(&axis.near_edge(b.1)));

    let mut settled: Vec<Bounds> = siblings
        .iter()
        .filter(|(id, _)| !movers.iter().any(|(mover, _)| mover == id))
        .map(|(_, bounds)| *bounds)
        .collect();

    let mut plan = Vec::with_capacity(movers.len());
    for (id, bounds) in movers {
        let near = axis.near_edge(bounds);
        let shift = settled
            .iter()
            .filter(|blocker| {
                axis.far_edge(**blocker) <= near + EDGE_EPSILON
                    && axis.cross_overlap(**blocker, bounds)
            })
            .fold(delta, |shift, blocker| shift.max(axis.far_edge(*blocker) - near))
            .min(0.0);

        settled.push(bounds.translate(axis.offset(shift)));
        if shift < 0.0 {
            plan.push((id, shift));
        }
    }
    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Shape;

    fn add(store: &mut DiagramStore, name: &str, x: f32, y: f32, w: f32, h: f32) -> Id {
        let id = Id::new(name);
        store
            .add_shape(Shape::new(id, Bounds::from_rect(x, y, w, h)))
            .unwrap();
        id
    }

    fn min_point(store: &DiagramStore, id: Id) -> Point {
        store.shape(id).unwrap().bounds().min_point()
    }

    #[test]
    fn test_growth_pushes_siblings_at_the_edge() {
        let mut store = DiagramStore::new();
        let group = add(&mut store, "grow-box", 0.0, 0.0, 200.0, 100.0);
        let right = add(&mut store, "grow-right", 200.0, 20.0, 80.0, 40.0);
        let left = add(&mut store, "grow-left", -150.0, 20.0, 80.0, 40.0);
        let below = add(&mut store, "grow-below", 20.0, 140.0, 80.0, 40.0);

        let old = Bounds::from_rect(0.0, 0.0, 200.0, 100.0);
        let new = Bounds::from_rect(0.0, 0.0, 260.0, 130.0);
        GroupingEngine::default()
            .adjust_layout(&mut store, group, old, new)
            .unwrap();

        assert_eq!(min_point(&store, right), Point::new(260.0, 20.0));
        assert_eq!(min_point(&store, left), Point::new(-150.0, 20.0));
        assert_eq!(min_point(&store, below), Point::new(20.0, 170.0));
    }

    #[test]
    fn test_growth_ignores_siblings_outside_the_band() {
        let mut store = DiagramStore::new();
        let group = add(&mut store, "band-box", 0.0, 0.0, 200.0, 100.0);
        let far = add(&mut store, "band-far", 300.0, 500.0, 80.0, 40.0);

        let old = Bounds::from_rect(0.0, 0.0, 200.0, 100.0);
        let new = Bounds::from_rect(0.0, 0.0, 260.0, 100.0);
        GroupingEngine::default()
            .adjust_layout(&mut store, group, old, new)
            .unwrap();

        assert_eq!(min_point(&store, far), Point::new(300.0, 500.0));
    }

    #[test]
    fn test_shrink_pulls_siblings_back() {
        let mut store = DiagramStore::new();
        let group = add(&mut store, "shrink-box", 0.0, 0.0, 300.0, 200.0);
        let right = add(&mut store, "shrink-right", 320.0, 50.0, 80.0, 40.0);

        let old = Bounds::from_rect(0.0, 0.0, 300.0, 200.0);
        let new = Bounds::from_rect(0.0, 0.0, 160.0, 200.0);
        GroupingEngine::default()
            .adjust_layout(&mut store, group, old, new)
            .unwrap();

        assert_eq!(min_point(&store, right), Point::new(180.0, 50.0));
    }

    #[test]
    fn test_shrink_is_blocked_by_static_sibling() {
        let mut store = DiagramStore::new();
        let group = add(&mut store, "block-box", 0.0, 0.0, 300.0, 100.0);
        // Starts left of the old edge, so it stays; it overlaps the mover's band.
        let wall = add(&mut store, "block-wall", 250.0, 150.0, 100.0, 60.0);
        let mover = add(&mut store, "block-mover", 400.0, 80.0, 80.0, 100.0);

        let old = Bounds::from_rect(0.0, 0.0, 300.0, 100.0);
        let new = Bounds::from_rect(0.0, 0.0, 300.0 - 200.0, 100.0);
        GroupingEngine::default()
            .adjust_layout(&mut store, group, old, new)
            .unwrap();

        assert_eq!(min_point(&store, wall), Point::new(250.0, 150.0));
        // Pulled from 400 to the wall's right edge at 350, not to 200.
        assert_eq!(min_point(&store, mover), Point::new(350.0, 80.0));
    }

    #[test]
    fn test_shrink_chain_keeps_order() {
        let mut store = DiagramStore::new();
        let group = add(&mut store, "chain-box", 0.0, 0.0, 300.0, 100.0);
        let first = add(&mut store, "chain-first", 300.0, 0.0, 100.0, 100.0);
        let second = add(&mut store, "chain-second", 420.0, 0.0, 100.0, 100.0);

        let old = Bounds::from_rect(0.0, 0.0, 300.0, 100.0);
        let new = Bounds::from_rect(0.0, 0.0, 200.0, 100.0);
        GroupingEngine::default()
            .adjust_layout(&mut store, group, old, new)
            .unwrap();

        assert_eq!(min_point(&store, first), Point::new(200.0, 0.0));
        assert_eq!(min_point(&store, second), Point::new(320.0, 0.0));
    }

    #[test]
    fn test_displacement_moves_descendants() {
        let mut store = DiagramStore::new();
        let group = add(&mut store, "carry-box", 0.0, 0.0, 200.0, 100.0);
        let holder = add(&mut store, "carry-holder", 220.0, 0.0, 200.0, 100.0);
        let inner = add(&mut store, "carry-inner", 240.0, 40.0, 40.0, 20.0);
        store.reparent(inner, Some(holder)).unwrap();

        let old = Bounds::from_rect(0.0, 0.0, 200.0, 100.0);
        let new = Bounds::from_rect(0.0, 0.0, 250.0, 100.0);
        GroupingEngine::default()
            .adjust_layout(&mut store, group, old, new)
            .unwrap();

        assert_eq!(min_point(&store, holder), Point::new(270.0, 0.0));
        assert_eq!(min_point(&store, inner), Point::new(290.0, 40.0));
    }

    #[test]
    fn test_siblings_are_scoped_to_parent() {
        let mut store = DiagramStore::new();
        let outer = add(&mut store, "scope-outer", -50.0, -50.0, 800.0, 400.0);
        let group = add(&mut store, "scope-box", 0.0, 0.0, 200.0, 100.0);
        let stranger = add(&mut store, "scope-stranger", 200.0, 0.0, 80.0, 40.0);
        store.reparent(group, Some(outer)).unwrap();

        let old = Bounds::from_rect(0.0, 0.0, 200.0, 100.0);
        let new = Bounds::from_rect(0.0, 0.0, 300.0, 100.0);
        GroupingEngine::default()
            .adjust_layout(&mut store, group, old, new)
            .unwrap();

        // Top-level shape, not a sibling of the nested group.
        assert_eq!(min_point(&store, stranger), Point::new(200.0, 0.0));
    }

    #[test]
    fn test_sibling_moves_on_one_axis_only() {
        let mut store = DiagramStore::new();
        let group = add(&mut store, "diag-box", 0.0, 0.0, 160.0, 40.0);
        // Right of and below the small box: beyond both far edges.
        let corner = add(&mut store, "diag-corner", 160.0, 50.0, 100.0, 40.0);

        let old = Bounds::from_rect(0.0, 0.0, 160.0, 40.0);
        let new = Bounds::from_rect(0.0, 0.0, 300.0, 200.0);
        GroupingEngine::default()
            .adjust_layout(&mut store, group, old, new)
            .unwrap();

        assert_eq!(min_point(&store, corner), Point::new(300.0, 50.0));
    }
}
