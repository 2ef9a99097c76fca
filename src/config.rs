//! Runtime configuration for a scene
//!
//! Every field has a default taken from [`crate::constants`], so a config file
//! only needs to name the values it overrides.

use std::path::Path;

use egui::Vec2;
use serde::{Deserialize, Deserializer, Serialize};

use crate::constants;
use crate::error::{Result, SceneError};
use crate::nodes::{NodeKind, Orientation};

/// What happens to a container's children when the container is deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChildPolicy {
    /// Children stay in the scene as top-level nodes
    #[default]
    Detach,
    /// Children (and their descendants) are deleted with the container
    Delete,
}

/// `[width, height]` pair used for size settings in config files
pub type SizeSetting = [f32; 2];

/// Per-kind size settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KindSizes {
    pub text: SizeSetting,
    pub capability: SizeSetting,
    pub container: SizeSetting,
}

impl KindSizes {
    /// Looks up the setting for a node kind
    pub fn for_kind(&self, kind: NodeKind) -> Vec2 {
        let [w, h] = match kind {
            NodeKind::Text => self.text,
            NodeKind::Capability => self.capability,
            NodeKind::Container => self.container,
        };
        Vec2::new(w, h)
    }

    fn defaults() -> Self {
        Self {
            text: constants::node::TEXT_DEFAULT_SIZE,
            capability: constants::node::CAPABILITY_DEFAULT_SIZE,
            container: constants::node::CONTAINER_DEFAULT_SIZE,
        }
    }

    fn minimums() -> Self {
        Self {
            text: constants::node::TEXT_MIN_SIZE,
            capability: constants::node::CAPABILITY_MIN_SIZE,
            container: constants::node::CONTAINER_MIN_SIZE,
        }
    }
}

impl Default for KindSizes {
    fn default() -> Self {
        Self::defaults()
    }
}

/// Size table as written in a config file; kinds it leaves out keep their fallback
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct KindSizeOverrides {
    text: Option<SizeSetting>,
    capability: Option<SizeSetting>,
    container: Option<SizeSetting>,
}

impl KindSizeOverrides {
    fn over(self, base: KindSizes) -> KindSizes {
        KindSizes {
            text: self.text.unwrap_or(base.text),
            capability: self.capability.unwrap_or(base.capability),
            container: self.container.unwrap_or(base.container),
        }
    }
}

fn partial_default_sizes<'de, D>(deserializer: D) -> std::result::Result<KindSizes, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(KindSizeOverrides::deserialize(deserializer)?.over(KindSizes::defaults()))
}

fn partial_min_sizes<'de, D>(deserializer: D) -> std::result::Result<KindSizes, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(KindSizeOverrides::deserialize(deserializer)?.over(KindSizes::minimums()))
}

/// Scene configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Container inset on the left, right and bottom sides
    pub container_margin: f32,
    /// Container inset on the top side
    pub container_header: f32,
    /// Snap distance for connection drops
    pub snap_radius: f32,
    /// Size given to newly placed nodes
    #[serde(deserialize_with = "partial_default_sizes")]
    pub default_sizes: KindSizes,
    /// Floor applied by resize
    #[serde(deserialize_with = "partial_min_sizes")]
    pub min_sizes: KindSizes,
    /// What deleting a container does to its children
    pub child_policy: ChildPolicy,
    /// Global orientation a new scene starts with
    pub orientation: Orientation,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            container_margin: constants::container::MARGIN,
            container_header: constants::container::HEADER,
            snap_radius: constants::snap::RADIUS,
            default_sizes: KindSizes::defaults(),
            min_sizes: KindSizes::minimums(),
            child_policy: ChildPolicy::Detach,
            orientation: Orientation::Horizontal,
        }
    }
}

impl SceneConfig {
    /// Parses a JSON config, filling unspecified fields with defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| SceneError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a JSON config file
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SceneError::Config(format!("failed to read {}: {}", path.display(), e)))?;
        Self::from_json_str(&content)
    }

    fn validate(&self) -> Result<()> {
        if self.container_margin < 0.0 || self.container_header < 0.0 {
            return Err(SceneError::Config("container insets must not be negative".into()));
        }
        if self.snap_radius < 0.0 {
            return Err(SceneError::Config("snap radius must not be negative".into()));
        }
        for kind in NodeKind::ALL {
            let min = self.min_sizes.for_kind(kind);
            if min.x <= 0.0 || min.y <= 0.0 {
                return Err(SceneError::Config(format!(
                    "minimum size for {} must be positive",
                    kind.name()
                )));
            }
        }
        Ok(())
    }
}
