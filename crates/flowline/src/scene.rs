//! Serializable scene records.
//!
//! A [`Scene`] is the flat, persistence-friendly form of a [`DiagramStore`]:
//! one record per shape carrying its parent id, and one record per connection
//! carrying free-form port names. Children lists are not stored; they are
//! rebuilt from the parent links on load.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use flowline_core::{
    anchor::Side,
    geometry::{Bounds, Size},
    identifier::Id,
    style::ConnectionStyle,
};

use crate::{
    error::FlowlineError,
    shape::{Connection, Shape},
    store::{DiagramStore, Reparent},
};

/// A shape as stored in a scene file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeRecord {
    pub id: Id,
    #[serde(default)]
    pub label: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<Id>,
    #[serde(default)]
    pub collapsed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collapsed_size: Option<Size>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expanded_size: Option<Size>,
}

/// A connection as stored in a scene file.
///
/// Port names are kept as strings; unknown or missing names fall back to
/// `bottom` for the source and `top` for the target when loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionRecord {
    pub id: Id,
    pub from: Id,
    pub to: Id,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_port: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_port: Option<String>,
    #[serde(default)]
    pub style: ConnectionStyle,
}

/// Flat list of shape and connection records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub shapes: Vec<ShapeRecord>,
    #[serde(default)]
    pub connections: Vec<ConnectionRecord>,
}

impl DiagramStore {
    /// Builds a store from scene records.
    ///
    /// Shapes are inserted in record order, then grouped through
    /// [`reparent`](Self::reparent), then connections are added. The z-order is
    /// computed before returning.
    ///
    /// # Errors
    ///
    /// Returns an error for duplicate ids, non-positive sizes, references to
    /// unknown shapes, or parent links that form a cycle.
    pub fn from_scene(scene: &Scene) -> Result<Self, FlowlineError> {
        let mut store = Self::new();

        for record in &scene.shapes {
            let bounds = Bounds::from_rect(record.x, record.y, record.width, record.height);
            store.add_shape(Shape::new(record.id, bounds).with_label(record.label.clone()))?;
            if let Some(shape) = store.shape_mut(record.id) {
                shape.set_collapsed(record.collapsed);
                shape.set_collapsed_size(record.collapsed_size);
                shape.set_expanded_size(record.expanded_size);
            }
        }

        for record in &scene.shapes {
            let Some(parent) = record.parent else {
                continue;
            };
            if !store.contains_shape(parent) {
                return Err(FlowlineError::UnknownShape(parent));
            }
            if store.reparent(record.id, Some(parent))? == Reparent::Refused {
                return Err(FlowlineError::CyclicGrouping {
                    child: record.id,
                    parent,
                });
            }
        }

        for record in &scene.connections {
            let connection = Connection::with_port_names(
                record.id,
                record.from,
                record.from_port.as_deref(),
                record.to,
                record.to_port.as_deref(),
            )
            .with_style(record.style);
            store.add_connection(connection)?;
        }

        store.recompute_z_order();
        info!(
            shapes = store.shapes_count(),
            connections = store.connections_count();
            "Scene loaded"
        );
        Ok(store)
    }

    /// Snapshots the store as scene records, in insertion order.
    pub fn to_scene(&self) -> Scene {
        let shapes = self
            .shapes()
            .map(|shape| {
                let bounds = shape.bounds();
                ShapeRecord {
                    id: shape.id(),
                    label: shape.label().to_string(),
                    x: bounds.min_x(),
                    y: bounds.min_y(),
                    width: bounds.width(),
                    height: bounds.height(),
                    parent: shape.parent(),
                    collapsed: shape.is_collapsed(),
                    collapsed_size: shape.collapsed_size(),
                    expanded_size: shape.expanded_size(),
                }
            })
            .collect();

        let connections = self
            .connections()
            .map(|conn| ConnectionRecord {
                id: conn.id(),
                from: conn.from(),
                to: conn.to(),
                from_port: Some(port_name(conn.from_port())),
                to_port: Some(port_name(conn.to_port())),
                style: *conn.style(),
            })
            .collect();

        debug!(shapes = self.shapes_count(); "Scene snapshot taken");
        Scene {
            shapes,
            connections,
        }
    }
}

fn port_name(side: Side) -> String {
    side.name().to_string()
}
