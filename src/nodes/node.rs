//! Node types and core node functionality

use std::fmt;
use std::str::FromStr;

use egui::{Color32, Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

use super::capability::CapabilityState;
use super::egui_serde;
use super::layout::{self, LayoutInput};
use super::port::{Port, PortKey};
use crate::error::SceneError;

/// Unique identifier for a node
pub type NodeId = usize;

/// Layout mode of a node's ports and of edge routing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Vertical,
    Horizontal,
}

impl Orientation {
    pub fn is_vertical(self) -> bool {
        matches!(self, Orientation::Vertical)
    }

    pub fn flipped(self) -> Self {
        match self {
            Orientation::Vertical => Orientation::Horizontal,
            Orientation::Horizontal => Orientation::Vertical,
        }
    }
}

/// The closed set of node variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Free text block with a side port on each edge
    Text,
    /// Node whose ports are generated from its enabled capabilities
    Capability,
    /// Node that can hold other nodes
    Container,
}

impl NodeKind {
    pub const ALL: [NodeKind; 3] = [NodeKind::Text, NodeKind::Capability, NodeKind::Container];

    pub fn name(self) -> &'static str {
        match self {
            NodeKind::Text => "text",
            NodeKind::Capability => "capability",
            NodeKind::Container => "container",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NodeKind {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" | "text-node" => Ok(NodeKind::Text),
            "capability" | "multi-ai-node" | "oracle" => Ok(NodeKind::Capability),
            "container" | "block-node" => Ok(NodeKind::Container),
            other => Err(SceneError::UnknownNodeKind(other.to_string())),
        }
    }
}

/// Kind-specific node state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NodeBody {
    Text,
    Capability { capabilities: CapabilityState },
    Container,
}

impl NodeBody {
    pub fn for_kind(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Text => NodeBody::Text,
            NodeKind::Capability => NodeBody::Capability {
                capabilities: CapabilityState::default(),
            },
            NodeKind::Container => NodeBody::Container,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            NodeBody::Text => NodeKind::Text,
            NodeBody::Capability { .. } => NodeKind::Capability,
            NodeBody::Container => NodeKind::Container,
        }
    }
}

/// Presentation attributes edited through the node's properties sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeStyle {
    pub heading: String,
    #[serde(with = "egui_serde::color32")]
    pub background: Color32,
    #[serde(with = "egui_serde::color32")]
    pub text_color: Color32,
}

impl NodeStyle {
    pub fn for_kind(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Text => Self {
                heading: "Text Container".into(),
                background: Color32::from_rgb(0xc9, 0xce, 0xd6),
                text_color: Color32::BLACK,
            },
            NodeKind::Capability => Self {
                heading: "Oracle".into(),
                background: Color32::from_rgb(0x1e, 0x3a, 0x5f),
                text_color: Color32::WHITE,
            },
            NodeKind::Container => Self {
                heading: "Block Container".into(),
                background: Color32::from_rgb(0xf1, 0xf3, 0xf5),
                text_color: Color32::BLACK,
            },
        }
    }
}

/// A placed diagram element
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    #[serde(with = "egui_serde::pos2")]
    pub position: Pos2,
    #[serde(with = "egui_serde::vec2")]
    pub size: Vec2,
    pub orientation: Orientation,
    /// Container this node is embedded in. The scene graph owns the relation.
    pub parent: Option<NodeId>,
    pub body: NodeBody,
    pub style: NodeStyle,
    ports: Vec<Port>,
}

impl Node {
    /// Creates a node and lays out its ports
    pub fn new(id: NodeId, kind: NodeKind, position: Pos2, size: Vec2, orientation: Orientation) -> Self {
        let mut node = Self {
            id,
            position,
            size,
            orientation,
            parent: None,
            body: NodeBody::for_kind(kind),
            style: NodeStyle::for_kind(kind),
            ports: Vec::new(),
        };
        node.relayout();
        node
    }

    pub fn kind(&self) -> NodeKind {
        self.body.kind()
    }

    pub fn is_container(&self) -> bool {
        matches!(self.body, NodeBody::Container)
    }

    /// Returns the bounding rectangle of the node
    pub fn rect(&self) -> Rect {
        Rect::from_min_size(self.position, self.size)
    }

    pub fn capabilities(&self) -> Option<&CapabilityState> {
        match &self.body {
            NodeBody::Capability { capabilities } => Some(capabilities),
            _ => None,
        }
    }

    pub fn capabilities_mut(&mut self) -> Option<&mut CapabilityState> {
        match &mut self.body {
            NodeBody::Capability { capabilities } => Some(capabilities),
            _ => None,
        }
    }

    /// Current port list, in layout order
    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    pub fn port(&self, key: &PortKey) -> Option<&Port> {
        self.ports.iter().find(|p| &p.id.key == key)
    }

    /// Regenerates the port list from kind, capability state, orientation and size
    pub fn relayout(&mut self) {
        let leaves = self
            .capabilities()
            .map(CapabilityState::enabled_leaves)
            .unwrap_or_default();
        self.ports = layout::layout_ports(&LayoutInput {
            node: self.id,
            kind: self.kind(),
            leaves: &leaves,
            orientation: self.orientation,
            size: self.size,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parsing_accepts_aliases() {
        assert_eq!("block-node".parse::<NodeKind>().unwrap(), NodeKind::Container);
        assert_eq!("multi-ai-node".parse::<NodeKind>().unwrap(), NodeKind::Capability);
        assert_eq!("text".parse::<NodeKind>().unwrap(), NodeKind::Text);
        assert!(matches!(
            "sticky-note".parse::<NodeKind>(),
            Err(SceneError::UnknownNodeKind(name)) if name == "sticky-note"
        ));
    }

    #[test]
    fn test_new_node_has_ports() {
        let node = Node::new(
            7,
            NodeKind::Container,
            Pos2::new(10.0, 10.0),
            Vec2::new(400.0, 300.0),
            Orientation::Horizontal,
        );
        assert_eq!(node.ports().len(), 2);
        assert!(node.port(&PortKey::Left).is_some());
        assert!(node.is_container());
        assert_eq!(node.rect().max, Pos2::new(410.0, 310.0));
    }
}
