//! Configuration types for the flowchart engine.
//!
//! This module provides the tunable constants of the router, the grouping
//! engine and the interaction controller. All types implement
//! [`serde::Deserialize`] so hosts can load them from any format; missing
//! sections and fields fall back to their defaults.
//!
//! # Overview
//!
//! - [`EngineConfig`] - Top-level configuration combining every section.
//! - [`RouterConfig`] - Stub length, corner radius and merge tolerance of connector paths.
//! - [`GroupingConfig`] - Container padding, header band and collapsed size.
//! - [`InteractionConfig`] - Minimum shape size and anchor snapping during gestures.
//!
//! # Example
//!
//! ```
//! # use flowline::config::EngineConfig;
//! let config = EngineConfig::default();
//! assert_eq!(config.router().stub_length(), 20.0);
//! assert_eq!(config.router().corner_radius(), 12.0);
//! ```

use serde::Deserialize;

use flowline_core::geometry::{Insets, Size};

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineConfig {
    /// Connector routing section.
    #[serde(default)]
    router: RouterConfig,

    /// Grouping and container sizing section.
    #[serde(default)]
    grouping: GroupingConfig,

    /// Pointer gesture section.
    #[serde(default)]
    interaction: InteractionConfig,
}

impl EngineConfig {
    /// Creates a new [`EngineConfig`] from its sections.
    pub fn new(
        router: RouterConfig,
        grouping: GroupingConfig,
        interaction: InteractionConfig,
    ) -> Self {
        Self {
            router,
            grouping,
            interaction,
        }
    }

    /// Returns the router configuration.
    pub fn router(&self) -> &RouterConfig {
        &self.router
    }

    /// Returns the grouping configuration.
    pub fn grouping(&self) -> &GroupingConfig {
        &self.grouping
    }

    /// Returns the interaction configuration.
    pub fn interaction(&self) -> &InteractionConfig {
        &self.interaction
    }
}

/// Constants of the orthogonal router.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Distance a path travels straight out of its anchor before any turn.
    stub_length: f32,

    /// Upper bound for the radius of rounded corners.
    corner_radius: f32,

    /// Points closer than this are merged during simplification.
    merge_tolerance: f32,
}

impl RouterConfig {
    /// Creates a new [`RouterConfig`].
    pub fn new(stub_length: f32, corner_radius: f32, merge_tolerance: f32) -> Self {
        Self {
            stub_length,
            corner_radius,
            merge_tolerance,
        }
    }

    pub fn stub_length(&self) -> f32 {
        self.stub_length
    }

    pub fn corner_radius(&self) -> f32 {
        self.corner_radius
    }

    pub fn merge_tolerance(&self) -> f32 {
        self.merge_tolerance
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            stub_length: 20.0,
            corner_radius: 12.0,
            merge_tolerance: 0.5,
        }
    }
}

/// Constants of the grouping engine.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct GroupingConfig {
    /// Space kept between a container's edges and its children.
    padding: f32,

    /// Extra space above the children reserved for the container's title.
    header_height: f32,

    /// Width of a collapsed container that was never collapsed before.
    collapsed_width: f32,

    /// Height of a collapsed container that was never collapsed before.
    collapsed_height: f32,
}

impl GroupingConfig {
    /// Creates a new [`GroupingConfig`].
    pub fn new(padding: f32, header_height: f32, collapsed_size: Size) -> Self {
        Self {
            padding,
            header_height,
            collapsed_width: collapsed_size.width(),
            collapsed_height: collapsed_size.height(),
        }
    }

    pub fn padding(&self) -> f32 {
        self.padding
    }

    pub fn header_height(&self) -> f32 {
        self.header_height
    }

    /// Insets applied around the children's bounding box: uniform padding plus
    /// the header band on top.
    pub fn container_insets(&self) -> Insets {
        Insets::uniform(self.padding).with_top(self.padding + self.header_height)
    }

    /// Size of a container collapsed for the first time.
    pub fn collapsed_size(&self) -> Size {
        Size::new(self.collapsed_width, self.collapsed_height)
    }
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            padding: 20.0,
            header_height: 32.0,
            collapsed_width: 160.0,
            collapsed_height: 40.0,
        }
    }
}

/// Constants of pointer gestures.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    min_shape_width: f32,
    min_shape_height: f32,

    /// Maximum distance between the pointer and an anchor for the anchor to be picked.
    anchor_snap_distance: f32,
}

impl InteractionConfig {
    /// Creates a new [`InteractionConfig`].
    pub fn new(min_shape_size: Size, anchor_snap_distance: f32) -> Self {
        Self {
            min_shape_width: min_shape_size.width(),
            min_shape_height: min_shape_size.height(),
            anchor_snap_distance,
        }
    }

    /// Smallest size a resize gesture can produce.
    pub fn min_shape_size(&self) -> Size {
        Size::new(self.min_shape_width, self.min_shape_height)
    }

    pub fn anchor_snap_distance(&self) -> f32 {
        self.anchor_snap_distance
    }
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            min_shape_width: 40.0,
            min_shape_height: 24.0,
            anchor_snap_distance: 12.0,
        }
    }
}
