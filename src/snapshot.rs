//! Serializable view of a scene, as printed by the `replay` command

use serde::Serialize;

use crate::editor::PointerListener;
use crate::error::{Result, SceneError};
use crate::nodes::{Edge, Node, Orientation, SceneGraph};

/// Snapshot format version
pub const SNAPSHOT_VERSION: &str = "1.0";

/// Snapshot metadata
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotMetadata {
    pub version: String,
    pub generated_at: String, // ISO 8601 timestamp
    pub generator: String,
}

/// Everything a renderer needs to draw the scene
#[derive(Debug, Clone, Serialize)]
pub struct SceneSnapshot {
    pub metadata: SnapshotMetadata,
    pub orientation: Orientation,
    /// Nodes in id order, ports included
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    /// Pointer listeners held by an unfinished gesture
    pub active_listeners: Vec<PointerListener>,
}

impl SceneSnapshot {
    pub fn capture(graph: &SceneGraph, active_listeners: Vec<PointerListener>) -> Self {
        Self {
            metadata: SnapshotMetadata {
                version: SNAPSHOT_VERSION.to_string(),
                generated_at: chrono::Utc::now().to_rfc3339(),
                generator: format!("diagram-scene {}", env!("CARGO_PKG_VERSION")),
            },
            orientation: graph.orientation(),
            nodes: graph.nodes().cloned().collect(),
            edges: graph.edges().cloned().collect(),
            active_listeners,
        }
    }

    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        json.map_err(|e| SceneError::Script(format!("failed to serialize snapshot: {}", e)))
    }

    /// The snapshot without its metadata, for comparing two scenes
    pub fn scene_value(&self) -> Result<serde_json::Value> {
        let mut value = serde_json::to_value(self)
            .map_err(|e| SceneError::Script(format!("failed to serialize snapshot: {}", e)))?;
        if let Some(map) = value.as_object_mut() {
            map.remove("metadata");
        }
        Ok(value)
    }
}
