//! Editor facade: the intent entry points and queries the presentation layer uses
//!
//! The editor owns the [`SceneGraph`] and the gesture in progress. Every
//! method runs to completion; the host calls them one event at a time.

pub mod containment;
pub mod gesture;
pub mod intent;
pub mod interaction;
pub mod routing;
pub mod validation;

use egui::{Pos2, Rect, Vec2};
use log::{debug, info, warn};

use crate::config::SceneConfig;
use crate::error::Result;
use crate::nodes::{Edge, EdgeId, Node, NodeId, NodeKind, NodeStyle, Orientation, PortId, SceneGraph};
use crate::snapshot::SceneSnapshot;

pub use gesture::{ListenerRegistry, PointerListener};
pub use intent::Intent;
pub use interaction::{ConnectionPreview, GestureKind, InteractionManager};
pub use routing::{Direction, RoutingHint, RoutingPolicy};
pub use validation::ConnectionRejection;

/// Interactive diagram editing session
#[derive(Debug, Default)]
pub struct Editor {
    graph: SceneGraph,
    interaction: InteractionManager,
}

impl Editor {
    /// Starts a new session
    pub fn new(config: SceneConfig) -> Self {
        Self {
            graph: SceneGraph::new(config),
            interaction: InteractionManager::new(),
        }
    }

    /// Read access to the scene
    pub fn scene(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.graph.node(id)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.graph.edge(id)
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot::capture(&self.graph, self.active_listeners())
    }

    /// Applies one recorded intent.
    ///
    /// A rejected connection is not an error; it is logged and leaves the scene
    /// unchanged.
    pub fn apply(&mut self, intent: &Intent) -> Result<()> {
        match intent {
            Intent::PlaceNode { kind, at } => {
                self.place_node(kind, *at)?;
            }
            Intent::AddNode { kind, position, size } => {
                self.add_node(kind, *position, size.map(|[w, h]| Vec2::new(w, h)))?;
            }
            Intent::MoveNode { node, position } => self.move_node(*node, *position)?,
            Intent::ResizeNode { node, size } => {
                self.resize_node(*node, *size)?;
            }
            Intent::Reparent { child, parent } => self.reparent(*child, *parent)?,
            Intent::BeginDrag { node, pointer } => self.begin_node_drag(*node, *pointer)?,
            Intent::UpdateDrag { pointer } => self.update_node_drag(*pointer)?,
            Intent::EndDrag { pointer } => {
                self.end_node_drag(*pointer)?;
            }
            Intent::BeginResize { node, pointer } => self.begin_resize(*node, *pointer)?,
            Intent::UpdateResize { pointer } => {
                self.update_resize(*pointer)?;
            }
            Intent::EndResize { pointer } => {
                self.end_resize(*pointer)?;
            }
            Intent::BeginConnection { source, pointer } => self.begin_connection(source.clone(), *pointer)?,
            Intent::UpdateConnection { pointer } => self.update_connection(*pointer)?,
            Intent::EndConnection { pointer } => {
                if self.end_connection(*pointer)?.is_none() {
                    info!("Connection released away from a valid target; discarded");
                }
            }
            Intent::Connect { source, target } => {
                if let Err(rejection) = self.connect(source, target) {
                    warn!("Connection {} -> {} rejected: {}", source, target, rejection);
                }
            }
            Intent::AbortGesture => self.abort_gesture(),
            Intent::ToggleCapability { node, capability } => {
                self.toggle_capability(*node, capability)?;
            }
            Intent::ToggleSubCapability { node, capability, sub } => {
                self.toggle_sub_capability(*node, capability, sub)?;
            }
            Intent::SetNodeOrientation { node, orientation } => self.set_node_orientation(*node, *orientation)?,
            Intent::SetGlobalOrientation { orientation } => self.set_global_orientation(*orientation),
            Intent::ToggleGlobalOrientation => {
                self.toggle_global_orientation();
            }
            Intent::SetNodeStyle { node, style } => self.set_node_style(*node, style.clone())?,
            Intent::DeleteNode { node } => {
                self.delete_node(*node)?;
            }
            Intent::DeleteEdge { edge } => {
                self.delete_edge(*edge)?;
            }
        }
        Ok(())
    }

    // ----- placement -----

    /// Drops a new node of the named kind centred on `point`
    pub fn place_node(&mut self, kind: &str, point: Pos2) -> Result<NodeId> {
        let kind = kind.parse::<NodeKind>().inspect_err(|e| warn!("{}", e))?;
        let size = self.graph.config().default_sizes.for_kind(kind);
        let id = self.graph.add_node(kind, point - size / 2.0, Some(size));
        info!("Placed {} node {} at ({:.1}, {:.1})", kind, id, point.x, point.y);
        Ok(id)
    }

    /// Adds a node with an explicit top-left corner and optional size
    pub fn add_node(&mut self, kind: &str, position: Pos2, size: Option<Vec2>) -> Result<NodeId> {
        self.graph.add_node_named(kind, position, size)
    }

    pub fn move_node(&mut self, id: NodeId, position: Pos2) -> Result<()> {
        self.graph.move_node(id, position)
    }

    pub fn resize_node(&mut self, id: NodeId, size: Vec2) -> Result<Vec2> {
        self.graph.resize_node(id, size)
    }

    pub fn reparent(&mut self, child: NodeId, parent: Option<NodeId>) -> Result<()> {
        self.graph.reparent(child, parent)
    }

    // ----- gestures -----

    pub fn begin_node_drag(&mut self, id: NodeId, pointer: Pos2) -> Result<()> {
        self.settle_unfinished_drag();
        self.interaction.start_drag(&self.graph, id, pointer)
    }

    pub fn update_node_drag(&mut self, pointer: Pos2) -> Result<()> {
        self.interaction.update_drag(&mut self.graph, pointer)
    }

    /// Releases the dragged node; returns the container it was embedded in
    pub fn end_node_drag(&mut self, pointer: Pos2) -> Result<Option<NodeId>> {
        self.interaction.end_drag(&mut self.graph, pointer)
    }

    pub fn begin_resize(&mut self, id: NodeId, pointer: Pos2) -> Result<()> {
        self.settle_unfinished_drag();
        self.interaction.start_resize(&self.graph, id, pointer)
    }

    pub fn update_resize(&mut self, pointer: Pos2) -> Result<Vec2> {
        self.interaction.update_resize(&mut self.graph, pointer)
    }

    pub fn end_resize(&mut self, pointer: Pos2) -> Result<Vec2> {
        self.interaction.end_resize(&mut self.graph, pointer)
    }

    pub fn begin_connection(&mut self, source: PortId, pointer: Pos2) -> Result<()> {
        self.settle_unfinished_drag();
        self.interaction.start_connection(&self.graph, source, pointer)
    }

    pub fn update_connection(&mut self, pointer: Pos2) -> Result<()> {
        self.interaction.update_connection(&self.graph, pointer)
    }

    /// Releases the connection drag; `None` means it was discarded
    pub fn end_connection(&mut self, pointer: Pos2) -> Result<Option<EdgeId>> {
        self.interaction.end_connection(&mut self.graph, pointer)
    }

    /// Ends whatever gesture is running, e.g. when the host loses the pointer.
    ///
    /// A node dragged when the gesture is cut short is settled where it stands,
    /// as if it had been released there.
    pub fn abort_gesture(&mut self) {
        self.settle_unfinished_drag();
        self.interaction.abort();
    }

    fn settle_unfinished_drag(&mut self) {
        let Some(node) = self.interaction.dragged_node() else {
            return;
        };
        self.interaction.abort();
        match self.graph.embed_at_current_position(node) {
            Ok(parent) => debug!("Settled unfinished drag of node {} in {:?}", node, parent),
            Err(err) => debug!("Unfinished drag of node {} not settled: {}", node, err),
        }
    }

    pub fn gesture(&self) -> Option<&GestureKind> {
        self.interaction.gesture()
    }

    pub fn connection_preview(&self) -> Option<ConnectionPreview> {
        self.interaction.connection_preview()
    }

    /// Global pointer events the host must currently forward
    pub fn active_listeners(&self) -> Vec<PointerListener> {
        self.interaction.listeners().active()
    }

    /// Connects two ports directly, bypassing the drag
    pub fn connect(&mut self, source: &PortId, target: &PortId) -> std::result::Result<EdgeId, ConnectionRejection> {
        self.graph.connect(source, Some(target))
    }

    // ----- node state -----

    pub fn toggle_capability(&mut self, id: NodeId, capability: &str) -> Result<bool> {
        self.graph.toggle_capability(id, capability)
    }

    pub fn toggle_sub_capability(&mut self, id: NodeId, capability: &str, sub: &str) -> Result<bool> {
        self.graph.toggle_sub_capability(id, capability, sub)
    }

    pub fn set_node_orientation(&mut self, id: NodeId, orientation: Orientation) -> Result<()> {
        self.graph.set_node_orientation(id, orientation)
    }

    pub fn set_global_orientation(&mut self, orientation: Orientation) {
        self.graph.set_global_orientation(orientation);
    }

    /// Flips the canvas-wide orientation; returns the new one
    pub fn toggle_global_orientation(&mut self) -> Orientation {
        let orientation = self.graph.orientation().flipped();
        self.graph.set_global_orientation(orientation);
        orientation
    }

    pub fn set_node_style(&mut self, id: NodeId, style: NodeStyle) -> Result<()> {
        self.graph.set_node_style(id, style)
    }

    // ----- deletion -----

    pub fn delete_node(&mut self, id: NodeId) -> Result<Node> {
        self.graph.delete_node(id)
    }

    pub fn delete_edge(&mut self, id: EdgeId) -> Result<Edge> {
        self.graph.delete_edge(id)
    }

    // ----- queries -----

    pub fn hit_test_container(&self, bbox: Rect) -> Option<NodeId> {
        self.graph.hit_test_container(bbox)
    }

    pub fn port_at(&self, point: Pos2) -> Option<PortId> {
        self.graph.port_at(point)
    }

    pub fn node_at(&self, point: Pos2) -> Option<NodeId> {
        self.graph.node_at(point)
    }
}
