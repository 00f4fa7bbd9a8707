//! The flowchart engine facade.
//!
//! [`FlowchartEngine`] owns the store, the router, the grouping engine and the
//! route cache. Every mutation finishes its grouping work (regrouping, sizing,
//! cascading) before routes are refreshed, so a [`Frame`] always shows
//! connector paths that match the final geometry.

use log::{debug, info};

use flowline_core::{
    anchor::Side,
    geometry::{Bounds, Point, Size},
    identifier::Id,
};

use crate::{
    config::EngineConfig,
    error::FlowlineError,
    grouping::{CollapseOutcome, DropOutcome, GroupingEngine},
    invalidation::RouteCache,
    routing::{ConnectorPath, RoutedConnection, Router},
    scene::Scene,
    shape::{Connection, Shape},
    store::DiagramStore,
};

/// Which toggle a container offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollapseAffordance {
    Collapse,
    Expand,
}

/// A visible shape as handed to the rendering layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeView {
    id: Id,
    label: String,
    bounds: Bounds,
    collapsed: bool,
    affordance: Option<CollapseAffordance>,
}

impl ShapeView {
    pub fn id(&self) -> Id {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    /// `None` for shapes without children.
    pub fn affordance(&self) -> Option<CollapseAffordance> {
        self.affordance
    }
}

/// Everything the rendering layer needs for one repaint.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    shapes: Vec<ShapeView>,
    connections: Vec<RoutedConnection>,
}

impl Frame {
    /// Visible shapes in paint order, bottom first.
    pub fn shapes(&self) -> &[ShapeView] {
        &self.shapes
    }

    /// Routed connections in connection order.
    pub fn connections(&self) -> &[RoutedConnection] {
        &self.connections
    }
}

/// Owns the diagram and applies every editing operation to it.
///
/// # Examples
///
/// ```
/// use flowline::{FlowchartEngine, anchor::Side, geometry::Bounds, identifier::Id, shape::Shape};
///
/// let mut engine = FlowchartEngine::default();
/// engine.add_shape(Shape::new(Id::new("doc-a"), Bounds::from_rect(0.0, 0.0, 120.0, 36.0)))?;
/// engine.add_shape(Shape::new(Id::new("doc-b"), Bounds::from_rect(0.0, 150.0, 120.0, 36.0)))?;
/// engine.connect(Id::new("doc-a"), Side::Bottom, Id::new("doc-b"), Side::Top)?;
///
/// let frame = engine.frame();
/// assert_eq!(frame.connections()[0].path().to_path_data(), "M 60 36 L 60 150");
/// # Ok::<(), flowline::FlowlineError>(())
/// ```
#[derive(Debug, Default)]
pub struct FlowchartEngine {
    config: EngineConfig,
    store: DiagramStore,
    router: Router,
    grouping: GroupingEngine,
    routes: RouteCache,
}

impl FlowchartEngine {
    /// Creates an empty engine with the given configuration.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_store(config, DiagramStore::new())
    }

    /// Creates an engine from scene records.
    ///
    /// # Errors
    ///
    /// Returns an error if the scene is inconsistent; see
    /// [`DiagramStore::from_scene`].
    pub fn from_scene(config: EngineConfig, scene: &Scene) -> Result<Self, FlowlineError> {
        let store = DiagramStore::from_scene(scene)?;
        Ok(Self::with_store(config, store))
    }

    fn with_store(config: EngineConfig, store: DiagramStore) -> Self {
        Self {
            router: Router::new(*config.router()),
            grouping: GroupingEngine::new(*config.grouping()),
            config,
            store,
            routes: RouteCache::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Read access to the underlying store.
    pub fn store(&self) -> &DiagramStore {
        &self.store
    }

    pub fn shape(&self, id: Id) -> Option<&Shape> {
        self.store.shape(id)
    }

    /// Snapshots the diagram as scene records.
    pub fn to_scene(&self) -> Scene {
        self.store.to_scene()
    }

    // -------------------------------------------------------------------------
    // Editing
    // -------------------------------------------------------------------------

    /// Adds a top-level shape.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is taken or the size is not positive.
    pub fn add_shape(&mut self, shape: Shape) -> Result<(), FlowlineError> {
        self.store.add_shape(shape)
    }

    /// Removes a shape and its connections; its children become top-level.
    ///
    /// # Errors
    ///
    /// Returns an error if the shape does not exist.
    pub fn remove_shape(&mut self, id: Id) -> Result<Shape, FlowlineError> {
        self.store.remove_shape(id)
    }

    /// Connects two shapes with a generated connection id.
    ///
    /// # Errors
    ///
    /// Returns an error if either shape does not exist.
    pub fn connect(
        &mut self,
        from: Id,
        from_port: Side,
        to: Id,
        to_port: Side,
    ) -> Result<Id, FlowlineError> {
        let id = self.store.next_connection_id();
        self.store
            .add_connection(Connection::new(id, from, from_port, to, to_port))?;
        Ok(id)
    }

    /// Adds a fully specified connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is taken or either shape does not exist.
    pub fn add_connection(&mut self, connection: Connection) -> Result<(), FlowlineError> {
        self.store.add_connection(connection)
    }

    /// Removes a connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection does not exist.
    pub fn disconnect(&mut self, id: Id) -> Result<Connection, FlowlineError> {
        self.store.remove_connection(id)
    }

    /// Moves a shape and its descendants by `offset` without regrouping.
    ///
    /// # Errors
    ///
    /// Returns an error if the shape does not exist.
    pub fn move_shape(&mut self, id: Id, offset: Point) -> Result<(), FlowlineError> {
        self.store.move_subtree(id, offset)
    }

    /// Sets a shape's size, keeping its top-left corner.
    ///
    /// The new size becomes the remembered expanded size of an expanded shape.
    /// The shape is then grown around its children, if any, and its ancestors
    /// are resized.
    ///
    /// # Errors
    ///
    /// Returns an error if the shape does not exist or the size is not positive.
    pub fn resize_shape(&mut self, id: Id, size: Size) -> Result<(), FlowlineError> {
        let shape = self.store.require_shape(id)?;
        let bounds = shape.bounds().with_size(size);
        let collapsed = shape.is_collapsed();

        self.store.set_bounds(id, bounds)?;
        if !collapsed {
            if let Some(shape) = self.store.shape_mut(id) {
                shape.set_expanded_size(Some(size));
            }
        }
        self.grouping.update_parent_size(&mut self.store, id)
    }

    /// Regroups a shape after it was dropped; see [`GroupingEngine::handle_drop`].
    ///
    /// # Errors
    ///
    /// Returns an error if the shape does not exist.
    pub fn handle_drop(&mut self, id: Id) -> Result<DropOutcome, FlowlineError> {
        self.grouping.handle_drop(&mut self.store, id)
    }

    /// Collapses or expands a container; see [`GroupingEngine::toggle_collapse`].
    ///
    /// # Errors
    ///
    /// Returns an error if the shape does not exist.
    pub fn toggle_collapse(&mut self, id: Id) -> Result<CollapseOutcome, FlowlineError> {
        self.grouping.toggle_collapse(&mut self.store, id)
    }

    // -------------------------------------------------------------------------
    // Hit testing
    // -------------------------------------------------------------------------

    /// Topmost visible shape containing `point`.
    pub fn shape_at(&self, point: Point) -> Option<Id> {
        self.store.paint_order().into_iter().rev().find(|id| {
            self.store
                .shape(*id)
                .is_some_and(|shape| !shape.is_hidden() && shape.bounds().contains_point(point))
        })
    }

    /// Nearest anchor of a visible shape within the snap distance of `point`.
    ///
    /// On equal distance the shape painted on top wins.
    pub fn anchor_at(&self, point: Point) -> Option<(Id, Side)> {
        let snap = self.config.interaction().anchor_snap_distance();
        let mut best: Option<(Id, Side, f32)> = None;

        for id in self.store.paint_order().into_iter().rev() {
            let Some(shape) = self.store.shape(id).filter(|shape| !shape.is_hidden()) else {
                continue;
            };
            for side in Side::ALL {
                let distance = shape.anchor(side).point().distance(point);
                let closer = best.is_none_or(|(_, _, current)| distance < current);
                if distance <= snap && closer {
                    best = Some((id, side, distance));
                }
            }
        }
        best.map(|(id, side, _)| (id, side))
    }

    /// Preview path from a shape's anchor to a free cursor position.
    pub fn preview(&self, from: Id, from_port: Side, cursor: Point) -> Option<ConnectorPath> {
        let shape = self.store.shape(from)?;
        Some(self.router.route_preview(shape.anchor(from_port), cursor))
    }

    // -------------------------------------------------------------------------
    // Output
    // -------------------------------------------------------------------------

    /// Applies pending store signals: z-order first, then connector paths.
    ///
    /// Returns true if paths were recomputed.
    pub fn refresh(&mut self) -> bool {
        let rerouted = self.routes.refresh(&mut self.store, &self.router);
        if rerouted {
            debug!(connections = self.routes.routes().len(); "Routes refreshed");
        }
        rerouted
    }

    /// Connector paths as of the last refresh.
    pub fn routes(&self) -> &[RoutedConnection] {
        self.routes.routes()
    }

    /// Refreshes and returns everything needed to repaint.
    pub fn frame(&mut self) -> Frame {
        self.refresh();

        let shapes: Vec<ShapeView> = self
            .store
            .z_order()
            .iter()
            .filter_map(|id| self.store.shape(*id))
            .filter(|shape| !shape.is_hidden())
            .map(|shape| ShapeView {
                id: shape.id(),
                label: shape.label().to_string(),
                bounds: shape.bounds(),
                collapsed: shape.is_collapsed(),
                affordance: shape.is_container().then(|| {
                    if shape.is_collapsed() {
                        CollapseAffordance::Expand
                    } else {
                        CollapseAffordance::Collapse
                    }
                }),
            })
            .collect();

        info!(
            shapes = shapes.len(),
            connections = self.routes.routes().len();
            "Frame built"
        );
        Frame {
            shapes,
            connections: self.routes.routes().to_vec(),
        }
    }
}
