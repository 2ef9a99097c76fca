//! Diagram scene library
//!
//! The model behind an interactive node-link diagram editor: nodes with
//! generated ports, containers that hold other nodes, validated connections
//! and orientation-aware edge routing. Rendering is left to the host.

pub mod config;
pub mod constants;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod nodes;
pub mod snapshot;

// Re-export commonly used types
pub use config::{ChildPolicy, SceneConfig};
pub use editor::{ConnectionRejection, Editor, Intent, RoutingHint};
pub use error::{Result, SceneError};
pub use nodes::{Edge, EdgeId, Node, NodeId, NodeKind, Orientation, Port, PortId, PortKey, SceneGraph};
pub use snapshot::SceneSnapshot;
