//! Flowline - a flowchart geometry engine.
//!
//! Flowline keeps a tree of nested rectangles and the connections between
//! them. It routes connections as rounded orthogonal paths, infers nesting
//! from where shapes are dropped, keeps containers sized around their
//! children, and pushes neighbours aside when a container collapses or
//! expands.
//!
//! [`FlowchartEngine`] is the entry point; [`interaction::InteractionController`]
//! drives it from pointer events.

pub mod config;
pub mod engine;
pub mod grouping;
pub mod interaction;
pub mod invalidation;
pub mod routing;
pub mod scene;
pub mod shape;
pub mod store;

mod error;

pub use flowline_core::{anchor, color, geometry, identifier, style};

pub use engine::{CollapseAffordance, FlowchartEngine, Frame, ShapeView};
pub use error::FlowlineError;
