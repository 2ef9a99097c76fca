//! Port types for node connections
//!
//! Ports are derived state: the layout engine regenerates a node's full port
//! list whenever anything that shapes it changes. Nothing outside
//! [`super::layout`] constructs them.

use std::fmt;

use egui::Pos2;
use serde::{Deserialize, Serialize};

use super::egui_serde;
use super::node::NodeId;

/// Prefix of the key of every capability-generated port
const CAPABILITY_PREFIX: &str = "port-";

/// Identifies a port within its node
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum PortKey {
    /// Fixed input of a capability node
    Input,
    /// Fixed, orientation-dependent output of a capability node
    Output,
    /// Left side port of text and container nodes
    Left,
    /// Right side port of text and container nodes
    Right,
    /// Port generated by an enabled leaf capability
    Capability(String),
}

impl fmt::Display for PortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortKey::Input => f.write_str("input"),
            PortKey::Output => f.write_str("output"),
            PortKey::Left => f.write_str("left"),
            PortKey::Right => f.write_str("right"),
            PortKey::Capability(id) => write!(f, "{}{}", CAPABILITY_PREFIX, id),
        }
    }
}

impl From<PortKey> for String {
    fn from(key: PortKey) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for PortKey {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "input" => Ok(PortKey::Input),
            "output" => Ok(PortKey::Output),
            "left" => Ok(PortKey::Left),
            "right" => Ok(PortKey::Right),
            other => match other.strip_prefix(CAPABILITY_PREFIX) {
                Some(id) if !id.is_empty() => Ok(PortKey::Capability(id.to_string())),
                _ => Err(format!("unknown port key `{}`", other)),
            },
        }
    }
}

/// Globally unique port identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PortId {
    pub node: NodeId,
    pub key: PortKey,
}

impl PortId {
    pub fn new(node: NodeId, key: PortKey) -> Self {
        Self { node, key }
    }
}

impl fmt::Display for PortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.node, self.key)
    }
}

/// Side of the node a port logically belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortGroup {
    Left,
    Right,
    Top,
    Bottom,
}

/// Short line from the node body out to a capability port, plus its glyph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectorStub {
    #[serde(with = "egui_serde::pos2")]
    pub from: Pos2,
    #[serde(with = "egui_serde::pos2")]
    pub to: Pos2,
    /// Centre of the "plus" glyph marking the stub end
    #[serde(with = "egui_serde::pos2")]
    pub plus: Pos2,
}

/// Text drawn next to a port
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortLabel {
    pub text: String,
    #[serde(with = "egui_serde::pos2")]
    pub anchor: Pos2,
}

/// A connection anchor on a node. All positions are relative to the node origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Port {
    pub id: PortId,
    pub group: PortGroup,
    #[serde(with = "egui_serde::pos2")]
    pub anchor: Pos2,
    pub stub: Option<ConnectorStub>,
    pub label: Option<PortLabel>,
    /// Whether connections may end on this port
    pub connectable: bool,
}

impl Port {
    /// Creates a connectable port with no stub or label
    pub fn new(id: PortId, group: PortGroup, anchor: Pos2) -> Self {
        Self {
            id,
            group,
            anchor,
            stub: None,
            label: None,
            connectable: true,
        }
    }

    /// Anchor in scene coordinates for a node whose origin is `node_origin`
    pub fn world_anchor(&self, node_origin: Pos2) -> Pos2 {
        node_origin + self.anchor.to_vec2()
    }

    pub fn node(&self) -> NodeId {
        self.id.node
    }
}
