//! Collapsing and expanding containers.

use log::debug;

use flowline_core::identifier::Id;

use super::{CollapseOutcome, GroupingEngine};
use crate::{error::FlowlineError, shape::Shape, store::DiagramStore};

impl GroupingEngine {
    /// Collapses an expanded container or expands a collapsed one.
    ///
    /// Collapsing remembers the current size as the expanded size, shrinks the
    /// shape to its remembered collapsed size (or the configured default) and
    /// hides every descendant. Expanding does the reverse: it remembers the
    /// collapsed size, restores the expanded size (or fits the children when
    /// none is known) and shows descendants that are not inside another
    /// collapsed container. Siblings are displaced afterwards and ancestors
    /// are resized, displacing their own siblings in turn.
    ///
    /// Shapes without children are left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the shape does not exist.
    pub fn toggle_collapse(
        &self,
        store: &mut DiagramStore,
        id: Id,
    ) -> Result<CollapseOutcome, FlowlineError> {
        let shape = store.require_shape(id)?;
        if !shape.is_container() {
            return Ok(CollapseOutcome::Unchanged);
        }

        let old = shape.bounds();
        let hidden = shape.is_hidden();
        let outcome = if shape.is_collapsed() {
            let expanded_size = shape.expanded_size();
            if let Some(shape) = store.shape_mut(id) {
                shape.set_collapsed_size(Some(old.to_size()));
                shape.set_collapsed(false);
            }
            store.apply_visibility(id, hidden);
            match expanded_size {
                Some(size) => store.set_bounds(id, old.with_size(size))?,
                None => {
                    self.fit_container(store, id);
                }
            }
            CollapseOutcome::Expanded
        } else {
            let collapsed_size = shape
                .collapsed_size()
                .unwrap_or_else(|| self.config().collapsed_size());
            if let Some(shape) = store.shape_mut(id) {
                shape.set_expanded_size(Some(old.to_size()));
                shape.set_collapsed(true);
            }
            store.apply_visibility(id, hidden);
            store.set_bounds(id, old.with_size(collapsed_size))?;
            CollapseOutcome::Collapsed
        };
        store.mark_tree_changed();

        let new = store.require_shape(id)?.bounds();
        debug!(
            shape_id:% = id,
            outcome:? = outcome,
            width = new.width(),
            height = new.height();
            "Container toggled"
        );

        self.adjust_layout(store, id, old, new)?;

        let mut child = id;
        while let Some(parent) = store.shape(child).and_then(Shape::parent) {
            if let Some((parent_old, parent_new)) = self.fit_container(store, parent) {
                self.adjust_layout(store, parent, parent_old, parent_new)?;
            }
            child = parent;
        }

        Ok(outcome)
    }
}
