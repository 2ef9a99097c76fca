//! Node interaction handling (dragging, resizing, connecting)
//!
//! At most one gesture runs at a time. Starting a new one abandons the old
//! one, and every way a gesture ends drops its [`PointerCapture`].

use egui::{Pos2, Vec2};
use log::debug;

use super::gesture::{ListenerRegistry, PointerCapture};
use crate::error::{Result, SceneError};
use crate::nodes::{EdgeId, MoveOptions, NodeId, PortId, SceneGraph};

/// What the pointer is currently doing
#[derive(Debug)]
pub enum GestureKind {
    /// Moving a node; `grab_offset` is the node origin relative to the pointer
    DragNode { node: NodeId, grab_offset: Vec2 },
    /// Resizing a node from its bottom-right handle
    ResizeNode {
        node: NodeId,
        start_size: Vec2,
        start_pointer: Pos2,
    },
    /// Dragging a new connection out of `source`
    Connect {
        source: PortId,
        pointer: Pos2,
        hover: Option<PortId>,
    },
}

#[derive(Debug)]
struct ActiveGesture {
    kind: GestureKind,
    _capture: PointerCapture,
}

/// In-flight connection, for drawing the rubber-band edge
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionPreview {
    pub source: PortId,
    pub pointer: Pos2,
    /// Port the connection would snap to if released now
    pub hover: Option<PortId>,
}

/// Manages the pointer gesture in progress
#[derive(Debug, Default)]
pub struct InteractionManager {
    gesture: Option<ActiveGesture>,
    listeners: ListenerRegistry,
}

impl InteractionManager {
    /// Creates a new interaction manager
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    pub fn gesture(&self) -> Option<&GestureKind> {
        self.gesture.as_ref().map(|g| &g.kind)
    }

    pub fn is_idle(&self) -> bool {
        self.gesture.is_none()
    }

    fn begin(&mut self, kind: GestureKind) {
        if let Some(old) = self.gesture.take() {
            debug!("Abandoning unfinished gesture {:?}", old.kind);
        }
        self.gesture = Some(ActiveGesture {
            kind,
            _capture: PointerCapture::acquire(&self.listeners),
        });
    }

    /// Ends the current gesture without applying anything further
    pub fn abort(&mut self) {
        if let Some(old) = self.gesture.take() {
            debug!("Aborted gesture {:?}", old.kind);
        }
    }

    /// Drops the gesture when `result` is an error so listeners are never stranded
    fn or_abort<T>(&mut self, result: Result<T>) -> Result<T> {
        if result.is_err() {
            self.abort();
        }
        result
    }

    // ----- node drag -----

    /// Start dragging `node`, grabbed at `pointer`
    pub fn start_drag(&mut self, graph: &SceneGraph, node: NodeId, pointer: Pos2) -> Result<()> {
        let origin = graph.node(node).ok_or(SceneError::UnknownNode(node))?.position;
        self.begin(GestureKind::DragNode {
            node,
            grab_offset: origin - pointer,
        });
        Ok(())
    }

    /// Update the dragged node's position.
    ///
    /// The node travels freely, even past its container's walls; which
    /// container holds it is settled on release.
    pub fn update_drag(&mut self, graph: &mut SceneGraph, pointer: Pos2) -> Result<()> {
        let Some(GestureKind::DragNode { node, grab_offset }) = self.gesture() else {
            return Err(SceneError::NoActiveGesture);
        };
        let (node, target) = (*node, pointer + *grab_offset);
        let free = MoveOptions {
            skip_containment: true,
        };
        let result = graph.move_node_with(node, target, free);
        self.or_abort(result)
    }

    /// Node being dragged, if a drag is in progress
    pub fn dragged_node(&self) -> Option<NodeId> {
        match self.gesture() {
            Some(GestureKind::DragNode { node, .. }) => Some(*node),
            _ => None,
        }
    }

    /// Release the dragged node and re-evaluate its container.
    ///
    /// Returns the container the node ended up in. A node no container
    /// encloses is detached from its old one.
    pub fn end_drag(&mut self, graph: &mut SceneGraph, pointer: Pos2) -> Result<Option<NodeId>> {
        self.update_drag(graph, pointer)?;
        let Some(ActiveGesture {
            kind: GestureKind::DragNode { node, .. },
            ..
        }) = self.gesture.take()
        else {
            return Err(SceneError::NoActiveGesture);
        };
        graph.embed_at_current_position(node)
    }

    // ----- node resize -----

    pub fn start_resize(&mut self, graph: &SceneGraph, node: NodeId, pointer: Pos2) -> Result<()> {
        let start_size = graph.node(node).ok_or(SceneError::UnknownNode(node))?.size;
        self.begin(GestureKind::ResizeNode {
            node,
            start_size,
            start_pointer: pointer,
        });
        Ok(())
    }

    /// Resize by the pointer's travel since the gesture began. Returns the applied size.
    pub fn update_resize(&mut self, graph: &mut SceneGraph, pointer: Pos2) -> Result<Vec2> {
        let Some(GestureKind::ResizeNode {
            node,
            start_size,
            start_pointer,
        }) = self.gesture()
        else {
            return Err(SceneError::NoActiveGesture);
        };
        let (node, size) = (*node, *start_size + (pointer - *start_pointer));
        let result = graph.resize_node(node, size);
        self.or_abort(result)
    }

    pub fn end_resize(&mut self, graph: &mut SceneGraph, pointer: Pos2) -> Result<Vec2> {
        let size = self.update_resize(graph, pointer)?;
        self.gesture = None;
        Ok(size)
    }

    // ----- connection drag -----

    pub fn start_connection(&mut self, graph: &SceneGraph, source: PortId, pointer: Pos2) -> Result<()> {
        if graph.port(&source).is_none() {
            return Err(SceneError::UnknownPort(source));
        }
        let hover = graph.port_at(pointer).filter(|p| *p != source);
        self.begin(GestureKind::Connect {
            source,
            pointer,
            hover,
        });
        Ok(())
    }

    pub fn update_connection(&mut self, graph: &SceneGraph, pointer: Pos2) -> Result<()> {
        let Some(ActiveGesture {
            kind:
                GestureKind::Connect {
                    source,
                    pointer: current,
                    hover,
                },
            ..
        }) = self.gesture.as_mut()
        else {
            return Err(SceneError::NoActiveGesture);
        };
        *current = pointer;
        *hover = graph.port_at(pointer).filter(|p| *p != *source);
        Ok(())
    }

    /// Drop the connection at `pointer`.
    ///
    /// Yields the new edge, or `None` when the connection was rejected; a
    /// rejection is not an error and leaves the scene unchanged.
    pub fn end_connection(&mut self, graph: &mut SceneGraph, pointer: Pos2) -> Result<Option<EdgeId>> {
        let Some(ActiveGesture {
            kind: GestureKind::Connect { source, .. },
            ..
        }) = self.gesture.take()
        else {
            return Err(SceneError::NoActiveGesture);
        };
        let target = graph.port_at(pointer);
        Ok(graph.connect(&source, target.as_ref()).ok())
    }

    pub fn connection_preview(&self) -> Option<ConnectionPreview> {
        match self.gesture() {
            Some(GestureKind::Connect {
                source,
                pointer,
                hover,
            }) => Some(ConnectionPreview {
                source: source.clone(),
                pointer: *pointer,
                hover: hover.clone(),
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::{NodeKind, PortKey};

    #[test]
    fn test_drag_moves_by_pointer_travel() {
        let mut graph = SceneGraph::default();
        let node = graph.add_node(NodeKind::Text, Pos2::new(100.0, 100.0), None);
        let mut interaction = InteractionManager::new();

        interaction.start_drag(&graph, node, Pos2::new(110.0, 120.0)).unwrap();
        assert_eq!(interaction.listeners().active_count(), 2);
        interaction.update_drag(&mut graph, Pos2::new(160.0, 170.0)).unwrap();
        assert_eq!(graph.node(node).unwrap().position, Pos2::new(150.0, 150.0));

        assert_eq!(interaction.end_drag(&mut graph, Pos2::new(170.0, 170.0)).unwrap(), None);
        assert_eq!(graph.node(node).unwrap().position, Pos2::new(160.0, 150.0));
        assert!(interaction.is_idle());
        assert_eq!(interaction.listeners().active_count(), 0);
    }

    #[test]
    fn test_drag_out_of_container_detaches() {
        let mut graph = SceneGraph::default();
        let container = graph.add_node(NodeKind::Container, Pos2::new(100.0, 100.0), None);
        let node = graph.add_node(NodeKind::Text, Pos2::new(150.0, 200.0), None);
        graph.reparent(node, Some(container)).unwrap();
        let mut interaction = InteractionManager::new();

        interaction.start_drag(&graph, node, Pos2::new(160.0, 210.0)).unwrap();
        assert_eq!(interaction.dragged_node(), Some(node));
        interaction.update_drag(&mut graph, Pos2::new(1000.0, 1000.0)).unwrap();
        // Not pulled back while the pointer is still down.
        assert_eq!(graph.node(node).unwrap().position, Pos2::new(990.0, 990.0));

        assert_eq!(interaction.end_drag(&mut graph, Pos2::new(1010.0, 1010.0)).unwrap(), None);
        assert_eq!(graph.parent_of(node), None);
        assert!(graph.children_of(container).is_empty());
        assert_eq!(graph.node(node).unwrap().position, Pos2::new(1000.0, 1000.0));
    }

    #[test]
    fn test_drag_within_container_keeps_parent_and_clamps() {
        let mut graph = SceneGraph::default();
        let container = graph.add_node(NodeKind::Container, Pos2::new(100.0, 100.0), None);
        let node = graph.add_node(NodeKind::Text, Pos2::new(150.0, 200.0), None);
        graph.reparent(node, Some(container)).unwrap();
        let mut interaction = InteractionManager::new();

        interaction.start_drag(&graph, node, Pos2::new(150.0, 200.0)).unwrap();
        assert_eq!(
            interaction.end_drag(&mut graph, Pos2::new(200.0, 110.0)).unwrap(),
            Some(container)
        );
        assert_eq!(graph.parent_of(node), Some(container));
        // Dropped over the header strip: still enclosed, then clamped below it.
        assert_eq!(graph.node(node).unwrap().position, Pos2::new(200.0, 140.0));
    }

    #[test]
    fn test_failed_update_releases_listeners() {
        let mut graph = SceneGraph::default();
        let node = graph.add_node(NodeKind::Text, Pos2::ZERO, None);
        let mut interaction = InteractionManager::new();
        interaction.start_drag(&graph, node, Pos2::ZERO).unwrap();

        graph.delete_node(node).unwrap();
        assert!(matches!(
            interaction.update_drag(&mut graph, Pos2::new(5.0, 5.0)),
            Err(SceneError::UnknownNode(_))
        ));
        assert!(interaction.is_idle());
        assert_eq!(interaction.listeners().active_count(), 0);
    }

    #[test]
    fn test_new_gesture_replaces_old_one() {
        let mut graph = SceneGraph::default();
        let node = graph.add_node(NodeKind::Text, Pos2::ZERO, None);
        let mut interaction = InteractionManager::new();
        for _ in 0..5 {
            interaction.start_drag(&graph, node, Pos2::ZERO).unwrap();
            interaction.start_resize(&graph, node, Pos2::ZERO).unwrap();
        }
        assert_eq!(interaction.listeners().active_count(), 2);
        assert!(matches!(
            interaction.update_drag(&mut graph, Pos2::ZERO),
            Err(SceneError::NoActiveGesture)
        ));
        interaction.abort();
        assert_eq!(interaction.listeners().active_count(), 0);
    }

    #[test]
    fn test_resize_respects_minimum() {
        let mut graph = SceneGraph::default();
        let node = graph.add_node(NodeKind::Text, Pos2::ZERO, None);
        let mut interaction = InteractionManager::new();
        interaction.start_resize(&graph, node, Pos2::new(200.0, 100.0)).unwrap();
        assert_eq!(
            interaction.update_resize(&mut graph, Pos2::new(260.0, 130.0)).unwrap(),
            Vec2::new(260.0, 130.0)
        );
        assert_eq!(
            interaction.end_resize(&mut graph, Pos2::new(0.0, 0.0)).unwrap(),
            Vec2::new(200.0, 100.0)
        );
        assert!(interaction.is_idle());
    }

    #[test]
    fn test_connection_drag_snaps_to_target() {
        let mut graph = SceneGraph::default();
        let a = graph.add_node(NodeKind::Text, Pos2::ZERO, None);
        let b = graph.add_node(NodeKind::Text, Pos2::new(400.0, 0.0), None);
        let source = PortId::new(a, PortKey::Right);
        let mut interaction = InteractionManager::new();

        interaction.start_connection(&graph, source.clone(), Pos2::new(200.0, 50.0)).unwrap();
        assert_eq!(interaction.connection_preview().unwrap().hover, None);
        interaction.update_connection(&graph, Pos2::new(395.0, 52.0)).unwrap();
        assert_eq!(
            interaction.connection_preview().unwrap().hover,
            Some(PortId::new(b, PortKey::Left))
        );

        let edge = interaction.end_connection(&mut graph, Pos2::new(395.0, 52.0)).unwrap();
        assert!(edge.is_some());
        assert_eq!(interaction.listeners().active_count(), 0);

        // Released over blank canvas: discarded, not an error.
        interaction.start_connection(&graph, source, Pos2::ZERO).unwrap();
        assert_eq!(interaction.end_connection(&mut graph, Pos2::new(1000.0, 1000.0)).unwrap(), None);
        assert_eq!(graph.edge_count(), 1);
    }
}
