//! Capability schemas and per-node enabled state
//!
//! A capability node exposes one port per enabled *leaf* capability. A
//! capability with subcapabilities is never a leaf itself: its subcapabilities
//! are, and the parent's enabled flag is always the OR of theirs.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Static description of a subcapability
#[derive(Debug, Clone, PartialEq)]
pub struct SubCapabilitySchema {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: Option<&'static str>,
}

/// Static description of a capability
#[derive(Debug, Clone, PartialEq)]
pub struct CapabilitySchema {
    pub id: &'static str,
    pub label: &'static str,
    pub subcapabilities: Vec<SubCapabilitySchema>,
}

impl CapabilitySchema {
    fn leaf(id: &'static str, label: &'static str) -> Self {
        Self {
            id,
            label,
            subcapabilities: Vec::new(),
        }
    }
}

/// Capabilities every capability node starts with, in declaration order
pub static DEFAULT_CATALOG: Lazy<Vec<CapabilitySchema>> = Lazy::new(|| {
    vec![
        CapabilitySchema {
            id: "embeddings",
            label: "Embeddings",
            subcapabilities: vec![
                SubCapabilitySchema {
                    id: "google-embeddings",
                    label: "Google Embeddings",
                    icon: Some("https://www.gstatic.com/lamda/images/favicon_v1_150160cddff7f294ce30.svg"),
                },
                SubCapabilitySchema {
                    id: "facebook-embeddings",
                    label: "Facebook Embeddings",
                    icon: Some("https://static.xx.fbcdn.net/rsrc.php/yD/r/d4ZIVX-5C-b.ico"),
                },
                SubCapabilitySchema {
                    id: "openai-embeddings",
                    label: "OpenAI Embeddings",
                    icon: Some("https://openai.com/favicon.ico"),
                },
                SubCapabilitySchema {
                    id: "cohere-embeddings",
                    label: "Cohere Embeddings",
                    icon: Some("https://cohere.com/favicon.ico"),
                },
            ],
        },
        CapabilitySchema::leaf("memory", "Memory"),
        CapabilitySchema::leaf("tool", "Tool"),
        CapabilitySchema::leaf("apps", "Apps"),
        CapabilitySchema::leaf("text", "Text"),
        CapabilitySchema::leaf("image", "Image"),
        CapabilitySchema::leaf("chat", "Chat"),
    ]
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubCapability {
    pub id: String,
    pub label: String,
    pub icon: Option<String>,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Capability {
    pub id: String,
    pub label: String,
    pub enabled: bool,
    pub subcapabilities: Vec<SubCapability>,
}

impl Capability {
    pub fn has_subcapabilities(&self) -> bool {
        !self.subcapabilities.is_empty()
    }
}

/// An enabled leaf capability, in the order its port is laid out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnabledLeaf {
    pub id: String,
    pub label: String,
}

/// Why a toggle could not be applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleError {
    UnknownCapability,
    UnknownSubCapability,
}

/// Enabled state of one node's capabilities, kept in declaration order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapabilityState {
    capabilities: Vec<Capability>,
}

impl CapabilityState {
    /// Builds an all-disabled state from a schema
    pub fn from_schema(schema: &[CapabilitySchema]) -> Self {
        let capabilities = schema
            .iter()
            .map(|cap| Capability {
                id: cap.id.to_string(),
                label: cap.label.to_string(),
                enabled: false,
                subcapabilities: cap
                    .subcapabilities
                    .iter()
                    .map(|sub| SubCapability {
                        id: sub.id.to_string(),
                        label: sub.label.to_string(),
                        icon: sub.icon.map(str::to_string),
                        enabled: false,
                    })
                    .collect(),
            })
            .collect();
        Self { capabilities }
    }

    pub fn capabilities(&self) -> &[Capability] {
        &self.capabilities
    }

    pub fn get(&self, capability_id: &str) -> Option<&Capability> {
        self.capabilities.iter().find(|c| c.id == capability_id)
    }

    /// Flips a capability. Subcapabilities follow the new value in lockstep.
    ///
    /// Returns the capability's new enabled flag.
    pub fn toggle(&mut self, capability_id: &str) -> Result<bool, ToggleError> {
        let cap = self
            .capabilities
            .iter_mut()
            .find(|c| c.id == capability_id)
            .ok_or(ToggleError::UnknownCapability)?;
        let enabled = !cap.enabled;
        cap.enabled = enabled;
        for sub in &mut cap.subcapabilities {
            sub.enabled = enabled;
        }
        Ok(enabled)
    }

    /// Flips one subcapability and recomputes the parent's flag as the OR of its children.
    ///
    /// Returns the subcapability's new enabled flag.
    pub fn toggle_sub(&mut self, capability_id: &str, sub_id: &str) -> Result<bool, ToggleError> {
        let cap = self
            .capabilities
            .iter_mut()
            .find(|c| c.id == capability_id)
            .ok_or(ToggleError::UnknownCapability)?;
        let sub = cap
            .subcapabilities
            .iter_mut()
            .find(|s| s.id == sub_id)
            .ok_or(ToggleError::UnknownSubCapability)?;
        sub.enabled = !sub.enabled;
        let enabled = sub.enabled;
        cap.enabled = cap.subcapabilities.iter().any(|s| s.enabled);
        Ok(enabled)
    }

    /// Enabled leaves in declaration order. Each one becomes exactly one port.
    pub fn enabled_leaves(&self) -> Vec<EnabledLeaf> {
        let mut leaves = Vec::new();
        for cap in &self.capabilities {
            if cap.has_subcapabilities() {
                leaves.extend(cap.subcapabilities.iter().filter(|s| s.enabled).map(|s| EnabledLeaf {
                    id: s.id.clone(),
                    label: s.label.clone(),
                }));
            } else if cap.enabled {
                leaves.push(EnabledLeaf {
                    id: cap.id.clone(),
                    label: cap.label.clone(),
                });
            }
        }
        leaves
    }
}

impl Default for CapabilityState {
    fn default() -> Self {
        Self::from_schema(&DEFAULT_CATALOG)
    }
}
