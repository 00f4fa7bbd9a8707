//! Containment and grouping.
//!
//! The [`GroupingEngine`] infers parent-child nesting from spatial overlap,
//! keeps containers sized around their children, collapses and expands
//! containers, and pushes or pulls neighbouring shapes when a container's size
//! changes. It only talks to the [`DiagramStore`](crate::store::DiagramStore);
//! connector routing is triggered afterwards from the store's signals.
//!
//! # Overview
//!
//! - [`GroupingEngine::handle_drop`] - Regroup a shape after it was dropped.
//! - [`GroupingEngine::update_parent_size`] - Grow a container (and its ancestors) around its children.
//! - [`GroupingEngine::toggle_collapse`] - Collapse or expand a container.
//! - [`GroupingEngine::adjust_layout`] - Displace siblings after a container's size changed.

mod cascade;
mod collapse;
mod containment;
mod sizing;

pub use containment::contains_center;

use flowline_core::identifier::Id;

use crate::config::GroupingConfig;

/// Result of [`GroupingEngine::handle_drop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// The shape now belongs to `parent`.
    Grouped { parent: Id },
    /// The shape left `previous` and is now top-level.
    Ungrouped { previous: Id },
    /// Nesting did not change.
    Unchanged,
}

/// Result of [`GroupingEngine::toggle_collapse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollapseOutcome {
    Collapsed,
    Expanded,
    /// The shape has no children and cannot be collapsed.
    Unchanged,
}

/// Applies grouping rules to a store.
#[derive(Debug, Clone, Default)]
pub struct GroupingEngine {
    config: GroupingConfig,
}

impl GroupingEngine {
    pub fn new(config: GroupingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GroupingConfig {
        &self.config
    }
}
