//! Scene data model - nodes, ports, capabilities, edges and the scene graph

pub mod capability;
pub mod egui_serde;
pub mod graph;
pub mod layout;
pub mod node;
pub mod port;

// Re-export core types
pub use capability::{Capability, CapabilityState, EnabledLeaf, SubCapability};
pub use graph::{Edge, EdgeId, MoveOptions, SceneGraph};
pub use node::{Node, NodeBody, NodeId, NodeKind, NodeStyle, Orientation};
pub use port::{ConnectorStub, Port, PortGroup, PortId, PortKey, PortLabel};
