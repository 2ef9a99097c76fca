//! Serializable user intents, the replay format for editing sessions

use egui::{Pos2, Vec2};
use serde::{Deserialize, Serialize};

use crate::nodes::egui_serde;
use crate::nodes::{EdgeId, NodeId, NodeStyle, Orientation, PortId};

/// One user action against the editor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Intent {
    /// Drop a node from the palette, centred on `at`
    PlaceNode {
        kind: String,
        #[serde(with = "egui_serde::pos2")]
        at: Pos2,
    },
    AddNode {
        kind: String,
        #[serde(with = "egui_serde::pos2")]
        position: Pos2,
        #[serde(default)]
        size: Option<[f32; 2]>,
    },
    MoveNode {
        node: NodeId,
        #[serde(with = "egui_serde::pos2")]
        position: Pos2,
    },
    ResizeNode {
        node: NodeId,
        #[serde(with = "egui_serde::vec2")]
        size: Vec2,
    },
    Reparent {
        child: NodeId,
        #[serde(default)]
        parent: Option<NodeId>,
    },
    BeginDrag {
        node: NodeId,
        #[serde(with = "egui_serde::pos2")]
        pointer: Pos2,
    },
    UpdateDrag {
        #[serde(with = "egui_serde::pos2")]
        pointer: Pos2,
    },
    EndDrag {
        #[serde(with = "egui_serde::pos2")]
        pointer: Pos2,
    },
    BeginResize {
        node: NodeId,
        #[serde(with = "egui_serde::pos2")]
        pointer: Pos2,
    },
    UpdateResize {
        #[serde(with = "egui_serde::pos2")]
        pointer: Pos2,
    },
    EndResize {
        #[serde(with = "egui_serde::pos2")]
        pointer: Pos2,
    },
    BeginConnection {
        source: PortId,
        #[serde(with = "egui_serde::pos2")]
        pointer: Pos2,
    },
    UpdateConnection {
        #[serde(with = "egui_serde::pos2")]
        pointer: Pos2,
    },
    EndConnection {
        #[serde(with = "egui_serde::pos2")]
        pointer: Pos2,
    },
    Connect {
        source: PortId,
        target: PortId,
    },
    AbortGesture,
    ToggleCapability {
        node: NodeId,
        capability: String,
    },
    ToggleSubCapability {
        node: NodeId,
        capability: String,
        sub: String,
    },
    SetNodeOrientation {
        node: NodeId,
        orientation: Orientation,
    },
    SetGlobalOrientation {
        orientation: Orientation,
    },
    ToggleGlobalOrientation,
    SetNodeStyle {
        node: NodeId,
        style: NodeStyle,
    },
    DeleteNode {
        node: NodeId,
    },
    DeleteEdge {
        edge: EdgeId,
    },
}

impl Intent {
    /// Parses a JSON array of intents
    pub fn parse_script(json: &str) -> crate::error::Result<Vec<Intent>> {
        serde_json::from_str(json).map_err(|e| crate::error::SceneError::Script(e.to_string()))
    }
}
