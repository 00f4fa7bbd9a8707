//! Shapes and connections stored in the diagram.
//!
//! Both types are plain data. Tree links (`parent`, `children`), visibility and
//! the collapse caches are written only by [`DiagramStore`](crate::store::DiagramStore)
//! and the grouping engine, which keep them consistent.

use flowline_core::{
    anchor::{Anchor, Side},
    geometry::{Bounds, Point, Size},
    identifier::Id,
    style::ConnectionStyle,
};

/// A rectangle on the canvas, usually mirroring a document heading.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    id: Id,
    label: String,
    bounds: Bounds,
    parent: Option<Id>,
    children: Vec<Id>,
    collapsed: bool,
    collapsed_size: Option<Size>,
    expanded_size: Option<Size>,
    hidden: bool,
}

impl Shape {
    /// Creates a top-level, expanded shape.
    pub fn new(id: Id, bounds: Bounds) -> Self {
        Self {
            id,
            label: String::new(),
            bounds,
            parent: None,
            children: Vec::new(),
            collapsed: false,
            collapsed_size: None,
            expanded_size: None,
            hidden: false,
        }
    }

    /// Sets the label (builder style).
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn center(&self) -> Point {
        self.bounds.center()
    }

    pub fn size(&self) -> Size {
        self.bounds.to_size()
    }

    /// The containing shape, if this shape is grouped.
    pub fn parent(&self) -> Option<Id> {
        self.parent
    }

    /// Directly contained shapes, in grouping order.
    pub fn children(&self) -> &[Id] {
        &self.children
    }

    /// Returns true if the shape currently contains other shapes.
    pub fn is_container(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    /// Returns true if a collapsed ancestor hides this shape.
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Size the shape had when it was last collapsed.
    pub fn collapsed_size(&self) -> Option<Size> {
        self.collapsed_size
    }

    /// Largest size the shape had while expanded.
    pub fn expanded_size(&self) -> Option<Size> {
        self.expanded_size
    }

    /// Returns the anchor on the given side of this shape.
    pub fn anchor(&self, side: Side) -> Anchor {
        Anchor::on_bounds(self.bounds, side)
    }

    pub(crate) fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    pub(crate) fn set_parent(&mut self, parent: Option<Id>) {
        self.parent = parent;
    }

    pub(crate) fn push_child(&mut self, child: Id) {
        if !self.children.contains(&child) {
            self.children.push(child);
        }
    }

    pub(crate) fn remove_child(&mut self, child: Id) {
        self.children.retain(|id| *id != child);
    }

    pub(crate) fn clear_children(&mut self) -> Vec<Id> {
        std::mem::take(&mut self.children)
    }

    pub(crate) fn set_collapsed(&mut self, collapsed: bool) {
        self.collapsed = collapsed;
    }

    pub(crate) fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    pub(crate) fn set_collapsed_size(&mut self, size: Option<Size>) {
        self.collapsed_size = size;
    }

    pub(crate) fn set_expanded_size(&mut self, size: Option<Size>) {
        self.expanded_size = size;
    }
}

/// A connector between two shapes.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    id: Id,
    from: Id,
    from_port: Side,
    to: Id,
    to_port: Side,
    style: ConnectionStyle,
}

impl Connection {
    /// Creates a connection with the default style.
    pub fn new(id: Id, from: Id, from_port: Side, to: Id, to_port: Side) -> Self {
        Self {
            id,
            from,
            from_port,
            to,
            to_port,
            style: ConnectionStyle::default(),
        }
    }

    /// Creates a connection from untrusted port names.
    ///
    /// Missing or unknown names fall back to `bottom` for the source port and
    /// `top` for the target port.
    pub fn with_port_names(
        id: Id,
        from: Id,
        from_port: Option<&str>,
        to: Id,
        to_port: Option<&str>,
    ) -> Self {
        Self::new(
            id,
            from,
            Side::parse_or(from_port, Side::Bottom),
            to,
            Side::parse_or(to_port, Side::Top),
        )
    }

    /// Sets the style (builder style).
    pub fn with_style(mut self, style: ConnectionStyle) -> Self {
        self.style = style;
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn from(&self) -> Id {
        self.from
    }

    pub fn from_port(&self) -> Side {
        self.from_port
    }

    pub fn to(&self) -> Id {
        self.to
    }

    pub fn to_port(&self) -> Side {
        self.to_port
    }

    pub fn style(&self) -> &ConnectionStyle {
        &self.style
    }

    /// Returns true if either endpoint is the given shape.
    pub fn touches(&self, shape: Id) -> bool {
        self.from == shape || self.to == shape
    }
}
