//! Scene graph: nodes, edges and containment, plus the operations that mutate them
//!
//! Every public mutation validates its inputs before touching anything, so an
//! `Err` always leaves the scene exactly as it was.

use std::collections::{BTreeMap, BTreeSet};

use egui::{Pos2, Rect, Vec2};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::capability::ToggleError;
use super::node::{Node, NodeId, NodeKind, NodeStyle, Orientation};
use super::port::{Port, PortId};
use crate::config::{ChildPolicy, SceneConfig};
use crate::editor::containment;
use crate::editor::routing::{RoutingHint, RoutingPolicy};
use crate::editor::validation::{self, ConnectionRejection};
use crate::error::{Result, SceneError};
use crate::geometry;

/// Unique identifier for an edge
pub type EdgeId = usize;

/// A connection between two ports on different nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub source: PortId,
    pub target: PortId,
    pub routing: RoutingHint,
}

impl Edge {
    pub fn new(id: EdgeId, source: PortId, target: PortId, routing: RoutingHint) -> Self {
        Self {
            id,
            source,
            target,
            routing,
        }
    }

    /// Checks if either end of this edge is on `node`
    pub fn touches_node(&self, node: NodeId) -> bool {
        self.source.node == node || self.target.node == node
    }
}

/// Flags carried through a single move
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveOptions {
    /// Set on the corrective move issued by the containment constraint so the
    /// correction does not trigger another round of clamping.
    pub skip_containment: bool,
}

impl MoveOptions {
    pub fn correction() -> Self {
        Self {
            skip_containment: true,
        }
    }
}

/// The diagram being edited
#[derive(Debug, Clone)]
pub struct SceneGraph {
    config: SceneConfig,
    nodes: BTreeMap<NodeId, Node>,
    edges: BTreeMap<EdgeId, Edge>,
    children: BTreeMap<NodeId, Vec<NodeId>>,
    routing: RoutingPolicy,
    next_node_id: NodeId,
    next_edge_id: EdgeId,
}

impl SceneGraph {
    /// Creates an empty scene
    pub fn new(config: SceneConfig) -> Self {
        let routing = RoutingPolicy::new(config.orientation);
        Self {
            config,
            nodes: BTreeMap::new(),
            edges: BTreeMap::new(),
            children: BTreeMap::new(),
            routing,
            next_node_id: 0,
            next_edge_id: 0,
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn routing(&self) -> &RoutingPolicy {
        &self.routing
    }

    /// Canvas-wide orientation
    pub fn orientation(&self) -> Orientation {
        self.routing.orientation()
    }

    // ----- read model -----

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Nodes in creation order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(&id)
    }

    /// Edges in creation order
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn port(&self, id: &PortId) -> Option<&Port> {
        self.nodes.get(&id.node)?.port(&id.key)
    }

    /// Direct children of a container, in embedding order
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id)?.parent
    }

    /// `id` followed by all of its descendants
    pub fn subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = vec![id];
        let mut i = 0;
        while i < out.len() {
            out.extend_from_slice(self.children_of(out[i]));
            i += 1;
        }
        out
    }

    fn existing(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(&id).ok_or_else(|| {
            warn!("Intent on unknown node {}", id);
            SceneError::UnknownNode(id)
        })
    }

    // ----- queries -----

    /// Container a box of this size would be embedded in if dropped here
    pub fn hit_test_container(&self, bbox: Rect) -> Option<NodeId> {
        containment::find_parent(self, None, bbox)
    }

    /// Nearest connectable port within the snap radius of `point`
    pub fn port_at(&self, point: Pos2) -> Option<PortId> {
        let radius = self.config.snap_radius;
        let mut best: Option<(f32, NodeId, &Port)> = None;

        for node in self.nodes.values() {
            for port in node.ports().iter().filter(|p| p.connectable) {
                let distance = port.world_anchor(node.position).distance(point);
                if distance > radius {
                    continue;
                }
                // Later nodes win ties since they are drawn on top.
                let better = match best {
                    Some((d, id, _)) => distance < d || (distance == d && node.id > id),
                    None => true,
                };
                if better {
                    best = Some((distance, node.id, port));
                }
            }
        }
        best.map(|(_, _, port)| port.id.clone())
    }

    /// Topmost node under `point`. Containers sit below everything else.
    pub fn node_at(&self, point: Pos2) -> Option<NodeId> {
        self.nodes
            .values()
            .filter(|node| node.rect().contains(point))
            .max_by_key(|node| (!node.is_container(), node.id))
            .map(|node| node.id)
    }

    // ----- nodes -----

    fn clamp_size(&self, kind: NodeKind, size: Vec2) -> Vec2 {
        size.max(self.config.min_sizes.for_kind(kind))
    }

    /// Adds a node of `kind` with its top-left corner at `position`.
    ///
    /// Without an explicit size the kind's default size is used. The node
    /// takes the current global orientation.
    pub fn add_node(&mut self, kind: NodeKind, position: Pos2, size: Option<Vec2>) -> NodeId {
        let size = self.clamp_size(kind, size.unwrap_or_else(|| self.config.default_sizes.for_kind(kind)));
        let orientation = self.orientation();
        let id = self.next_node_id;
        self.next_node_id += 1;
        self.nodes
            .insert(id, Node::new(id, kind, position, size, orientation));
        debug!("Added {} node {} at ({:.1}, {:.1})", kind, id, position.x, position.y);
        id
    }

    /// Adds a node by kind name; fails only if the name is not a known kind
    pub fn add_node_named(&mut self, kind: &str, position: Pos2, size: Option<Vec2>) -> Result<NodeId> {
        let kind = kind.parse::<NodeKind>().inspect_err(|e| warn!("{}", e))?;
        Ok(self.add_node(kind, position, size))
    }

    /// Moves a node's top-left corner to `position`, clamping it into its container
    pub fn move_node(&mut self, id: NodeId, position: Pos2) -> Result<()> {
        self.move_node_with(id, position, MoveOptions::default())
    }

    /// Moves a node, carrying its descendants along by the same delta.
    ///
    /// Unless `options.skip_containment` is set, an embedded node is then
    /// clamped into its container with a second, corrective move that has the
    /// flag set.
    pub fn move_node_with(&mut self, id: NodeId, position: Pos2, options: MoveOptions) -> Result<()> {
        let delta = position - self.existing(id)?.position;
        self.translate_subtree(id, delta);

        if !options.skip_containment {
            if let Some(target) = containment::correction(self, id) {
                self.move_node_with(id, target, MoveOptions::correction())?;
            }
        }
        Ok(())
    }

    /// Moves a node by `delta`
    pub fn translate_node(&mut self, id: NodeId, delta: Vec2) -> Result<()> {
        let position = self.existing(id)?.position + delta;
        self.move_node(id, position)
    }

    fn translate_subtree(&mut self, id: NodeId, delta: Vec2) {
        if delta == Vec2::ZERO {
            return;
        }
        for node_id in self.subtree(id) {
            if let Some(node) = self.nodes.get_mut(&node_id) {
                node.position += delta;
            }
        }
    }

    /// Resizes a node, never below its kind's minimum size.
    ///
    /// The node is re-clamped into its own container, and if it is a container
    /// every child is re-clamped into it. Returns the size actually applied.
    pub fn resize_node(&mut self, id: NodeId, size: Vec2) -> Result<Vec2> {
        let kind = self.existing(id)?.kind();
        let size = self.clamp_size(kind, size);
        if let Some(node) = self.nodes.get_mut(&id) {
            node.size = size;
            node.relayout();
        }
        self.prune_dangling_edges(id);

        if let Some(target) = containment::correction(self, id) {
            self.move_node_with(id, target, MoveOptions::correction())?;
        }
        self.reclamp_children(id)?;
        Ok(size)
    }

    fn reclamp_children(&mut self, id: NodeId) -> Result<()> {
        for child in self.children_of(id).to_vec() {
            if let Some(target) = containment::correction(self, child) {
                self.move_node_with(child, target, MoveOptions::correction())?;
            }
        }
        Ok(())
    }

    /// Sets one node's orientation and relays out its ports
    pub fn set_node_orientation(&mut self, id: NodeId, orientation: Orientation) -> Result<()> {
        self.existing(id)?;
        if let Some(node) = self.nodes.get_mut(&id) {
            node.orientation = orientation;
            node.relayout();
        }
        self.prune_dangling_edges(id);
        Ok(())
    }

    /// Sets the canvas-wide orientation.
    ///
    /// Updates the routing rule for future connections, restamps every existing
    /// edge and propagates the orientation to every node.
    pub fn set_global_orientation(&mut self, orientation: Orientation) {
        self.routing.set_orientation(orientation);
        let restamped = self.routing.restamp(self.edges.values_mut());
        for node in self.nodes.values_mut() {
            node.orientation = orientation;
            node.relayout();
        }
        let ids: Vec<NodeId> = self.nodes.keys().copied().collect();
        for id in ids {
            self.prune_dangling_edges(id);
        }
        info!(
            "Global orientation set to {:?} ({} nodes, {} edges restamped)",
            orientation,
            self.nodes.len(),
            restamped
        );
    }

    /// Replaces a node's presentation attributes
    pub fn set_node_style(&mut self, id: NodeId, style: NodeStyle) -> Result<()> {
        self.existing(id)?;
        if let Some(node) = self.nodes.get_mut(&id) {
            node.style = style;
        }
        Ok(())
    }

    // ----- capabilities -----

    fn toggle_with(
        &mut self,
        id: NodeId,
        capability: &str,
        sub: Option<&str>,
    ) -> Result<bool> {
        let node = self.nodes.get_mut(&id).ok_or(SceneError::UnknownNode(id))?;
        let state = node.capabilities_mut().ok_or(SceneError::NotCapabilityNode(id))?;
        let toggled = match sub {
            Some(sub) => state.toggle_sub(capability, sub),
            None => state.toggle(capability),
        };
        let enabled = toggled.map_err(|e| match e {
            ToggleError::UnknownCapability => SceneError::UnknownCapability {
                node: id,
                capability: capability.to_string(),
            },
            ToggleError::UnknownSubCapability => SceneError::UnknownSubCapability {
                node: id,
                capability: capability.to_string(),
                sub: sub.unwrap_or_default().to_string(),
            },
        })?;
        node.relayout();
        self.prune_dangling_edges(id);
        Ok(enabled)
    }

    /// Flips a capability (and its subcapabilities in lockstep). Returns the new flag.
    pub fn toggle_capability(&mut self, id: NodeId, capability: &str) -> Result<bool> {
        self.toggle_with(id, capability, None)
            .inspect_err(|e| warn!("Ignoring capability toggle: {}", e))
    }

    /// Flips a single subcapability. Returns the subcapability's new flag.
    pub fn toggle_sub_capability(&mut self, id: NodeId, capability: &str, sub: &str) -> Result<bool> {
        self.toggle_with(id, capability, Some(sub))
            .inspect_err(|e| warn!("Ignoring subcapability toggle: {}", e))
    }

    // ----- edges -----

    /// Creates an edge if the connection is valid.
    ///
    /// `target` is the port under the drop point, if any. A rejection leaves
    /// the scene unchanged.
    pub fn connect(&mut self, source: &PortId, target: Option<&PortId>) -> std::result::Result<EdgeId, ConnectionRejection> {
        validation::validate_connection(self.port(source), target.and_then(|t| self.port(t)))
            .inspect_err(|reason| debug!("Rejected connection from {}: {}", source, reason))?;
        // validated above, so the target is present
        let target = target.cloned().ok_or(ConnectionRejection::NoTarget)?;

        let id = self.next_edge_id;
        self.next_edge_id += 1;
        debug!("Connected {} -> {} as edge {}", source, target, id);
        let edge = Edge::new(id, source.clone(), target, self.routing.hint());
        self.edges.insert(id, edge);
        Ok(id)
    }

    /// Removes a single edge
    pub fn delete_edge(&mut self, id: EdgeId) -> Result<Edge> {
        self.edges.remove(&id).ok_or_else(|| {
            warn!("Intent on unknown edge {}", id);
            SceneError::UnknownEdge(id)
        })
    }

    /// Drops edges that end on a port `node` no longer has
    fn prune_dangling_edges(&mut self, node: NodeId) {
        let Some(owner) = self.nodes.get(&node) else {
            return;
        };
        let live: BTreeSet<&PortId> = owner.ports().iter().map(|p| &p.id).collect();
        let dead: Vec<EdgeId> = self
            .edges
            .values()
            .filter(|e| {
                (e.source.node == node && !live.contains(&e.source))
                    || (e.target.node == node && !live.contains(&e.target))
            })
            .map(|e| e.id)
            .collect();
        for id in dead {
            debug!("Removing edge {} whose port vanished from node {}", id, node);
            self.edges.remove(&id);
        }
    }

    // ----- containment -----

    /// Moves `child` into `parent`, or detaches it when `parent` is `None`.
    ///
    /// Attaching requires `parent` to be a container that is not inside
    /// `child` and whose box fully encloses the child's box. The child is
    /// re-clamped afterwards.
    pub fn reparent(&mut self, child: NodeId, parent: Option<NodeId>) -> Result<()> {
        let child_rect = self.existing(child)?.rect();
        if let Some(parent_id) = parent {
            let parent_node = self.existing(parent_id)?;
            if !parent_node.is_container() {
                warn!("Cannot embed node {} in non-container {}", child, parent_id);
                return Err(SceneError::NotContainer(parent_id));
            }
            if self.subtree(child).contains(&parent_id) {
                warn!("Cannot embed node {} in its own descendant {}", child, parent_id);
                return Err(SceneError::ContainmentCycle { child, parent: parent_id });
            }
            if !geometry::encloses(parent_node.rect(), child_rect) {
                warn!("Node {} does not fit inside container {}", child, parent_id);
                return Err(SceneError::ContainmentPrecondition { child, parent: parent_id });
            }
        }

        let old = self.parent_of(child);
        if old == parent {
            return self.clamp_into_parent(child);
        }
        if let Some(old) = old {
            if let Some(siblings) = self.children.get_mut(&old) {
                siblings.retain(|&c| c != child);
                if siblings.is_empty() {
                    self.children.remove(&old);
                }
            }
        }
        if let Some(parent_id) = parent {
            self.children.entry(parent_id).or_default().push(child);
        }
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = parent;
        }
        info!("Node {} embedded in {:?} (was {:?})", child, parent, old);
        self.clamp_into_parent(child)
    }

    fn clamp_into_parent(&mut self, id: NodeId) -> Result<()> {
        match containment::correction(self, id) {
            Some(target) => self.move_node_with(id, target, MoveOptions::correction()),
            None => Ok(()),
        }
    }

    /// Re-evaluates which container `id` belongs to after it was dropped
    pub fn embed_at_current_position(&mut self, id: NodeId) -> Result<Option<NodeId>> {
        let rect = self.existing(id)?.rect();
        let parent = containment::find_parent(self, Some(id), rect);
        self.reparent(id, parent)?;
        Ok(parent)
    }

    // ----- deletion -----

    /// Removes a node and every edge incident to it.
    ///
    /// Children of a deleted container are detached or deleted according to
    /// the configured [`ChildPolicy`].
    pub fn delete_node(&mut self, id: NodeId) -> Result<Node> {
        self.existing(id)?;
        let children = self.children_of(id).to_vec();
        match self.config.child_policy {
            ChildPolicy::Detach => {
                for child in children {
                    if let Some(node) = self.nodes.get_mut(&child) {
                        node.parent = None;
                    }
                }
            }
            ChildPolicy::Delete => {
                for child in children {
                    self.delete_node(child)?;
                }
            }
        }
        self.children.remove(&id);

        if let Some(parent) = self.parent_of(id) {
            if let Some(siblings) = self.children.get_mut(&parent) {
                siblings.retain(|&c| c != id);
                if siblings.is_empty() {
                    self.children.remove(&parent);
                }
            }
        }
        self.edges.retain(|_, edge| !edge.touches_node(id));
        let node = self.nodes.remove(&id).ok_or(SceneError::UnknownNode(id))?;
        debug!("Deleted node {}", id);
        Ok(node)
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new(SceneConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::routing::Direction;
    use crate::nodes::PortKey;

    fn port(node: NodeId, key: PortKey) -> PortId {
        PortId::new(node, key)
    }

    fn interior_holds(graph: &SceneGraph, child: NodeId) -> bool {
        let node = graph.node(child).unwrap();
        let parent = graph.node(node.parent.unwrap()).unwrap();
        let insets = containment::Insets::from_config(graph.config());
        geometry::encloses(insets.interior(parent.rect()), node.rect())
    }

    #[test]
    fn test_add_node_uses_defaults_and_floor() {
        let mut graph = SceneGraph::default();
        let text = graph.add_node(NodeKind::Text, Pos2::ZERO, None);
        assert_eq!(graph.node(text).unwrap().size, Vec2::new(200.0, 100.0));

        let tiny = graph.add_node(NodeKind::Container, Pos2::ZERO, Some(Vec2::new(10.0, 10.0)));
        assert_eq!(graph.node(tiny).unwrap().size, Vec2::new(200.0, 150.0));

        assert!(matches!(
            graph.add_node_named("cloud", Pos2::ZERO, None),
            Err(SceneError::UnknownNodeKind(_))
        ));
        assert_eq!(graph.node_count(), 2);
    }

    #[test]
    fn test_connect_creates_edge_with_current_hint() {
        let mut graph = SceneGraph::default();
        let a = graph.add_node(NodeKind::Capability, Pos2::ZERO, None);
        let b = graph.add_node(NodeKind::Text, Pos2::new(500.0, 0.0), None);

        let edge = graph
            .connect(&port(a, PortKey::Output), Some(&port(b, PortKey::Left)))
            .unwrap();
        let edge = graph.edge(edge).unwrap();
        assert_eq!(edge.source, port(a, PortKey::Output));
        assert_eq!(edge.target, port(b, PortKey::Left));
        assert_eq!(edge.routing.start, Direction::Right);

        // Multi-edges between the same ports are allowed.
        assert!(graph.connect(&port(a, PortKey::Output), Some(&port(b, PortKey::Left))).is_ok());
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_rejected_connections_change_nothing() {
        let mut graph = SceneGraph::default();
        let a = graph.add_node(NodeKind::Capability, Pos2::ZERO, None);
        let out = port(a, PortKey::Output);

        assert_eq!(graph.connect(&out, Some(&out)), Err(ConnectionRejection::SamePort));
        assert_eq!(graph.connect(&out, Some(&port(a, PortKey::Input))), Err(ConnectionRejection::SameNode));
        assert_eq!(graph.connect(&out, None), Err(ConnectionRejection::NoTarget));
        assert_eq!(
            graph.connect(&out, Some(&port(99, PortKey::Left))),
            Err(ConnectionRejection::NoTarget)
        );
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_disabling_capability_drops_its_edges() {
        let mut graph = SceneGraph::default();
        let a = graph.add_node(NodeKind::Capability, Pos2::ZERO, None);
        let b = graph.add_node(NodeKind::Text, Pos2::new(600.0, 0.0), None);
        graph.toggle_capability(a, "memory").unwrap();
        let memory = port(a, PortKey::Capability("memory".into()));
        graph.connect(&memory, Some(&port(b, PortKey::Left))).unwrap();
        graph.connect(&port(a, PortKey::Output), Some(&port(b, PortKey::Left))).unwrap();

        graph.toggle_capability(a, "memory").unwrap();
        assert!(graph.port(&memory).is_none());
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_toggle_errors_leave_state_alone() {
        let mut graph = SceneGraph::default();
        let a = graph.add_node(NodeKind::Capability, Pos2::ZERO, None);
        let t = graph.add_node(NodeKind::Text, Pos2::ZERO, None);
        let before = graph.node(a).unwrap().capabilities().cloned();

        assert!(matches!(graph.toggle_capability(a, "nope"), Err(SceneError::UnknownCapability { .. })));
        assert!(matches!(
            graph.toggle_sub_capability(a, "embeddings", "nope"),
            Err(SceneError::UnknownSubCapability { .. })
        ));
        assert!(matches!(graph.toggle_capability(t, "memory"), Err(SceneError::NotCapabilityNode(_))));
        assert!(matches!(graph.toggle_capability(42, "memory"), Err(SceneError::UnknownNode(42))));
        assert_eq!(graph.node(a).unwrap().capabilities().cloned(), before);
    }

    #[test]
    fn test_move_clamps_child_into_container() {
        let mut graph = SceneGraph::default();
        let container = graph.add_node(NodeKind::Container, Pos2::new(100.0, 100.0), None);
        let child = graph.add_node(NodeKind::Text, Pos2::new(150.0, 150.0), None);
        graph.reparent(child, Some(container)).unwrap();

        graph.move_node(child, Pos2::new(-500.0, 1000.0)).unwrap();
        assert_eq!(graph.node(child).unwrap().position, Pos2::new(110.0, 290.0));
        assert!(interior_holds(&graph, child));
    }

    #[test]
    fn test_moving_container_carries_descendants() {
        let mut graph = SceneGraph::default();
        let outer = graph.add_node(NodeKind::Container, Pos2::ZERO, Some(Vec2::new(800.0, 600.0)));
        let inner = graph.add_node(NodeKind::Container, Pos2::new(50.0, 60.0), None);
        let leaf = graph.add_node(NodeKind::Text, Pos2::new(70.0, 110.0), None);
        graph.reparent(inner, Some(outer)).unwrap();
        graph.reparent(leaf, Some(inner)).unwrap();

        graph.translate_node(outer, Vec2::new(25.0, -5.0)).unwrap();
        assert_eq!(graph.node(inner).unwrap().position, Pos2::new(75.0, 55.0));
        assert_eq!(graph.node(leaf).unwrap().position, Pos2::new(95.0, 105.0));
        assert!(interior_holds(&graph, inner));
        assert!(interior_holds(&graph, leaf));
    }

    #[test]
    fn test_container_resize_reclamps_children() {
        let mut graph = SceneGraph::default();
        let container = graph.add_node(NodeKind::Container, Pos2::ZERO, Some(Vec2::new(600.0, 400.0)));
        let child = graph.add_node(NodeKind::Text, Pos2::new(350.0, 250.0), None);
        graph.reparent(child, Some(container)).unwrap();

        let applied = graph.resize_node(container, Vec2::new(300.0, 200.0)).unwrap();
        assert_eq!(applied, Vec2::new(300.0, 200.0));
        assert_eq!(graph.node(child).unwrap().position, Pos2::new(90.0, 90.0));
        assert!(interior_holds(&graph, child));

        // Interior smaller than the child: pinned to the interior's minimum corner.
        graph.resize_node(container, Vec2::new(200.0, 150.0)).unwrap();
        assert_eq!(graph.node(child).unwrap().position, Pos2::new(10.0, 40.0));
    }

    #[test]
    fn test_resize_enforces_minimum() {
        let mut graph = SceneGraph::default();
        let text = graph.add_node(NodeKind::Text, Pos2::ZERO, None);
        assert_eq!(graph.resize_node(text, Vec2::new(50.0, 500.0)).unwrap(), Vec2::new(200.0, 500.0));
        assert_eq!(graph.node(text).unwrap().port(&PortKey::Right).unwrap().anchor, Pos2::new(200.0, 250.0));
    }

    #[test]
    fn test_reparent_validates_before_mutating() {
        let mut graph = SceneGraph::default();
        let outer = graph.add_node(NodeKind::Container, Pos2::ZERO, Some(Vec2::new(800.0, 600.0)));
        let inner = graph.add_node(NodeKind::Container, Pos2::new(50.0, 50.0), None);
        let text = graph.add_node(NodeKind::Text, Pos2::new(1000.0, 1000.0), None);
        graph.reparent(inner, Some(outer)).unwrap();

        assert!(matches!(graph.reparent(outer, Some(inner)), Err(SceneError::ContainmentCycle { .. })));
        assert!(matches!(graph.reparent(inner, Some(text)), Err(SceneError::NotContainer(_))));
        assert!(matches!(
            graph.reparent(text, Some(outer)),
            Err(SceneError::ContainmentPrecondition { .. })
        ));
        assert_eq!(graph.parent_of(inner), Some(outer));
        assert_eq!(graph.parent_of(outer), None);
        assert_eq!(graph.children_of(outer), &[inner]);

        graph.reparent(inner, None).unwrap();
        assert!(graph.children_of(outer).is_empty());
    }

    #[test]
    fn test_delete_cascades_edges_and_detaches_children() {
        let mut graph = SceneGraph::default();
        let container = graph.add_node(NodeKind::Container, Pos2::ZERO, None);
        let child = graph.add_node(NodeKind::Text, Pos2::new(20.0, 50.0), None);
        let other = graph.add_node(NodeKind::Text, Pos2::new(600.0, 0.0), None);
        graph.reparent(child, Some(container)).unwrap();
        graph.connect(&port(container, PortKey::Right), Some(&port(other, PortKey::Left))).unwrap();
        graph.connect(&port(child, PortKey::Right), Some(&port(other, PortKey::Left))).unwrap();

        graph.delete_node(container).unwrap();
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.parent_of(child), None);
        assert!(graph.node(child).is_some());
        assert!(matches!(graph.delete_node(container), Err(SceneError::UnknownNode(_))));
    }

    #[test]
    fn test_delete_policy_removes_subtree() {
        let config = SceneConfig {
            child_policy: ChildPolicy::Delete,
            ..SceneConfig::default()
        };
        let mut graph = SceneGraph::new(config);
        let container = graph.add_node(NodeKind::Container, Pos2::ZERO, Some(Vec2::new(800.0, 600.0)));
        let inner = graph.add_node(NodeKind::Container, Pos2::new(20.0, 50.0), None);
        let leaf = graph.add_node(NodeKind::Text, Pos2::new(40.0, 100.0), None);
        graph.reparent(inner, Some(container)).unwrap();
        graph.reparent(leaf, Some(inner)).unwrap();

        graph.delete_node(container).unwrap();
        assert_eq!(graph.node_count(), 0);
    }

    #[test]
    fn test_port_at_snaps_within_radius() {
        let mut graph = SceneGraph::default();
        let text = graph.add_node(NodeKind::Text, Pos2::new(100.0, 100.0), None);
        assert_eq!(graph.port_at(Pos2::new(110.0, 155.0)), Some(port(text, PortKey::Left)));
        assert_eq!(graph.port_at(Pos2::new(200.0, 150.0)), None);
    }

    #[test]
    fn test_node_at_prefers_non_containers() {
        let mut graph = SceneGraph::default();
        let text = graph.add_node(NodeKind::Text, Pos2::new(120.0, 150.0), None);
        let container = graph.add_node(NodeKind::Container, Pos2::new(100.0, 100.0), None);
        assert_eq!(graph.node_at(Pos2::new(130.0, 160.0)), Some(text));
        assert_eq!(graph.node_at(Pos2::new(480.0, 380.0)), Some(container));
        assert_eq!(graph.node_at(Pos2::new(0.0, 0.0)), None);
    }

    #[test]
    fn test_global_orientation_restamps_and_relayouts() {
        let mut graph = SceneGraph::new(SceneConfig {
            orientation: Orientation::Vertical,
            ..SceneConfig::default()
        });
        let a = graph.add_node(NodeKind::Capability, Pos2::ZERO, None);
        let b = graph.add_node(NodeKind::Text, Pos2::new(600.0, 0.0), None);
        graph.toggle_capability(a, "tool").unwrap();
        graph.connect(&port(a, PortKey::Output), Some(&port(b, PortKey::Left))).unwrap();
        assert_eq!(graph.edges().next().unwrap().routing.start, Direction::Bottom);

        graph.set_global_orientation(Orientation::Horizontal);
        let edge = graph.edges().next().unwrap();
        assert_eq!((edge.routing.start, edge.routing.end), (Direction::Right, Direction::Left));
        let node = graph.node(a).unwrap();
        assert_eq!(node.orientation, Orientation::Horizontal);
        assert!(node.port(&PortKey::Capability("tool".into())).unwrap().label.is_some());
        assert_eq!(graph.edge_count(), 1);
    }
}
