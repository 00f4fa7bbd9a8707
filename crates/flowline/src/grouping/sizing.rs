//! Container auto-sizing.

use log::debug;

use flowline_core::{
    geometry::{Bounds, Point, Size},
    identifier::Id,
};

use super::GroupingEngine;
use crate::{error::FlowlineError, shape::Shape, store::DiagramStore};

impl GroupingEngine {
    /// Grows `container` so its visible children fit inside it, then repeats
    /// for every ancestor.
    ///
    /// The required rectangle is the children's bounding box plus the padding
    /// on every side and the header band on top. A container never gets smaller
    /// than its remembered expanded size, its top-left corner only moves left
    /// or up, and its bottom-right corner only moves right or down. Collapsed
    /// containers take their collapsed size instead.
    /// Shapes without children are left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the shape does not exist.
    pub fn update_parent_size(
        &self,
        store: &mut DiagramStore,
        container: Id,
    ) -> Result<(), FlowlineError> {
        store.require_shape(container)?;

        let mut current = Some(container);
        while let Some(id) = current {
            self.fit_container(store, id);
            current = store.shape(id).and_then(Shape::parent);
        }
        Ok(())
    }

    /// Resizes a single container. Returns the old and new bounds if they differ.
    pub(super) fn fit_container(&self, store: &mut DiagramStore, id: Id) -> Option<(Bounds, Bounds)> {
        let shape = store.shape(id)?;
        if !shape.is_container() {
            return None;
        }

        let old = shape.bounds();
        let collapsed = shape.is_collapsed();
        let new = if collapsed {
            old.with_size(
                shape
                    .collapsed_size()
                    .unwrap_or_else(|| self.config().collapsed_size()),
            )
        } else {
            let content = shape
                .children()
                .iter()
                .filter_map(|child| store.shape(*child))
                .filter(|child| !child.is_hidden())
                .map(Shape::bounds)
                .reduce(|acc, bounds| acc.merge(&bounds))?;
            let required = content.add_padding(self.config().container_insets());
            let floor = shape.expanded_size().unwrap_or_else(|| old.to_size());

            let origin = Point::new(
                old.min_x().min(required.min_x()),
                old.min_y().min(required.min_y()),
            );
            let size = Size::new(
                required.max_x().max(old.max_x()) - origin.x(),
                required.max_y().max(old.max_y()) - origin.y(),
            );
            Bounds::new_from_top_left(origin, size.max(floor))
        };

        let shape = store.shape_mut(id)?;
        if !collapsed {
            shape.set_expanded_size(Some(new.to_size()));
        }
        if new == old {
            return None;
        }
        shape.set_bounds(new);
        store.mark_geometry_changed();

        debug!(
            shape_id:% = id,
            width = new.width(),
            height = new.height();
            "Container resized"
        );
        Some((old, new))
    }
}
