//! Pointer gestures.
//!
//! The [`InteractionController`] turns pointer events into engine operations.
//! Its [`Gesture`] only changes at pointer down, pointer up and cancel; pointer
//! moves update the active gesture in place. Screen coordinates are converted
//! to diagram coordinates by subtracting the pan offset.

use log::{debug, trace};

use flowline_core::{
    anchor::Side,
    geometry::{Point, Size},
    identifier::Id,
};

use crate::{
    config::InteractionConfig, engine::FlowchartEngine, error::FlowlineError,
    grouping::DropOutcome, routing::ConnectorPath,
};

/// Edge or corner grabbed by a resize gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeHandle {
    Right,
    Bottom,
    BottomRight,
}

impl ResizeHandle {
    fn resize(self, initial: Size, delta: Point) -> Size {
        match self {
            Self::Right => Size::new(initial.width() + delta.x(), initial.height()),
            Self::Bottom => Size::new(initial.width(), initial.height() + delta.y()),
            Self::BottomRight => {
                Size::new(initial.width() + delta.x(), initial.height() + delta.y())
            }
        }
    }
}

/// The gesture in progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    /// A shape follows the pointer; `last` is the previous diagram position.
    Dragging { shape: Id, last: Point },
    /// A shape is resized relative to where the gesture started.
    Resizing {
        shape: Id,
        handle: ResizeHandle,
        start: Point,
        initial: Size,
    },
    /// A connection is being drawn from an anchor towards `cursor`.
    Connecting {
        from: Id,
        from_port: Side,
        cursor: Point,
    },
    /// The canvas follows the pointer; `last` is the previous screen position.
    Panning { last: Point },
}

/// What a finished gesture did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEnd {
    /// Nothing was in progress.
    None,
    Dropped(DropOutcome),
    Resized(Id),
    Connected(Id),
    /// The pointer was released away from any other shape's anchor.
    ConnectionAbandoned,
    Panned,
}

/// Owns the gesture state and the pan offset.
#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    config: InteractionConfig,
    gesture: Gesture,
    pan: Point,
}

impl InteractionController {
    pub fn new(config: InteractionConfig) -> Self {
        Self {
            config,
            gesture: Gesture::Idle,
            pan: Point::default(),
        }
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    pub fn pan_offset(&self) -> Point {
        self.pan
    }

    /// Converts a screen position to diagram coordinates.
    pub fn to_diagram(&self, screen: Point) -> Point {
        screen.sub_point(self.pan)
    }

    /// Starts dragging `shape`.
    ///
    /// # Errors
    ///
    /// Returns an error if the shape does not exist.
    pub fn pointer_down_shape(
        &mut self,
        engine: &FlowchartEngine,
        shape: Id,
        screen: Point,
    ) -> Result<(), FlowlineError> {
        engine.store().require_shape(shape)?;
        self.begin(Gesture::Dragging {
            shape,
            last: self.to_diagram(screen),
        });
        Ok(())
    }

    /// Starts resizing `shape` from `handle`.
    ///
    /// # Errors
    ///
    /// Returns an error if the shape does not exist.
    pub fn pointer_down_resize(
        &mut self,
        engine: &FlowchartEngine,
        shape: Id,
        handle: ResizeHandle,
        screen: Point,
    ) -> Result<(), FlowlineError> {
        let initial = engine.store().require_shape(shape)?.size();
        self.begin(Gesture::Resizing {
            shape,
            handle,
            start: self.to_diagram(screen),
            initial,
        });
        Ok(())
    }

    /// Starts drawing a connection from an anchor of `shape`.
    ///
    /// # Errors
    ///
    /// Returns an error if the shape does not exist.
    pub fn pointer_down_anchor(
        &mut self,
        engine: &FlowchartEngine,
        shape: Id,
        side: Side,
        screen: Point,
    ) -> Result<(), FlowlineError> {
        engine.store().require_shape(shape)?;
        self.begin(Gesture::Connecting {
            from: shape,
            from_port: side,
            cursor: self.to_diagram(screen),
        });
        Ok(())
    }

    /// Starts panning the canvas.
    pub fn pointer_down_canvas(&mut self, screen: Point) {
        self.begin(Gesture::Panning { last: screen });
    }

    fn begin(&mut self, gesture: Gesture) {
        trace!(gesture:? = gesture; "Gesture started");
        self.gesture = gesture;
    }

    /// Updates the active gesture.
    ///
    /// Dragging moves the shape (with its descendants) incrementally; resizing
    /// clamps to the minimum shape size.
    ///
    /// # Errors
    ///
    /// Returns an error if the gesture's shape no longer exists.
    pub fn pointer_move(
        &mut self,
        engine: &mut FlowchartEngine,
        screen: Point,
    ) -> Result<(), FlowlineError> {
        let point = self.to_diagram(screen);
        match &mut self.gesture {
            Gesture::Idle => {}
            Gesture::Dragging { shape, last } => {
                engine.move_shape(*shape, point.sub_point(*last))?;
                *last = point;
            }
            Gesture::Resizing {
                shape,
                handle,
                start,
                initial,
            } => {
                let size = handle
                    .resize(*initial, point.sub_point(*start))
                    .max(self.config.min_shape_size());
                engine.resize_shape(*shape, size)?;
            }
            Gesture::Connecting { cursor, .. } => *cursor = point,
            Gesture::Panning { last } => {
                self.pan = self.pan.add_point(screen.sub_point(*last));
                *last = screen;
            }
        }
        Ok(())
    }

    /// Finishes the active gesture and returns to [`Gesture::Idle`].
    ///
    /// Dropping a dragged shape regroups it. Releasing a connection over an
    /// anchor of a different shape creates the connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the gesture's shape no longer exists.
    pub fn pointer_up(
        &mut self,
        engine: &mut FlowchartEngine,
        screen: Point,
    ) -> Result<GestureEnd, FlowlineError> {
        self.pointer_move(engine, screen)?;
        let point = self.to_diagram(screen);

        let end = match std::mem::take(&mut self.gesture) {
            Gesture::Idle => GestureEnd::None,
            Gesture::Dragging { shape, .. } => GestureEnd::Dropped(engine.handle_drop(shape)?),
            Gesture::Resizing { shape, .. } => GestureEnd::Resized(shape),
            Gesture::Connecting {
                from, from_port, ..
            } => match engine.anchor_at(point) {
                Some((target, side)) if target != from => {
                    GestureEnd::Connected(engine.connect(from, from_port, target, side)?)
                }
                _ => GestureEnd::ConnectionAbandoned,
            },
            Gesture::Panning { .. } => GestureEnd::Panned,
        };

        debug!(outcome:? = end; "Gesture finished");
        Ok(end)
    }

    /// Abandons the active gesture. Changes already applied are kept.
    pub fn cancel(&mut self) {
        if self.gesture != Gesture::Idle {
            trace!(gesture:? = self.gesture; "Gesture cancelled");
        }
        self.gesture = Gesture::Idle;
    }

    /// Live preview path while a connection is being drawn.
    pub fn preview(&self, engine: &FlowchartEngine) -> Option<ConnectorPath> {
        match self.gesture {
            Gesture::Connecting {
                from,
                from_port,
                cursor,
            } => engine.preview(from, from_port, cursor),
            _ => None,
        }
    }
}
