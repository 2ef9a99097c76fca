use crate::nodes::{EdgeId, NodeId, PortId};

/// Errors reported for intents the scene cannot apply.
///
/// None of these are fatal: the scene is left untouched whenever one is returned.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("unknown node kind: {0}")]
    UnknownNodeKind(String),
    #[error("node {0} does not exist")]
    UnknownNode(NodeId),
    #[error("edge {0} does not exist")]
    UnknownEdge(EdgeId),
    #[error("port {0} does not exist")]
    UnknownPort(PortId),
    #[error("node {node} has no capability `{capability}`")]
    UnknownCapability { node: NodeId, capability: String },
    #[error("capability `{capability}` on node {node} has no subcapability `{sub}`")]
    UnknownSubCapability {
        node: NodeId,
        capability: String,
        sub: String,
    },
    #[error("node {0} is not a capability node")]
    NotCapabilityNode(NodeId),
    #[error("node {0} is not a container")]
    NotContainer(NodeId),
    #[error("node {child} cannot be placed inside its own descendant {parent}")]
    ContainmentCycle { child: NodeId, parent: NodeId },
    #[error("node {child} does not fit inside container {parent}")]
    ContainmentPrecondition { child: NodeId, parent: NodeId },
    #[error("no gesture in progress")]
    NoActiveGesture,
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("invalid intent script: {0}")]
    Script(String),
}

pub type Result<T> = std::result::Result<T, SceneError>;
