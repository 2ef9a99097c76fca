//! Connection validation
//!
//! A dragged connection becomes an edge only if it ends on a connectable port
//! of a different node. Several edges between the same pair of nodes or ports
//! are fine.

use std::fmt;

use crate::nodes::Port;

/// Why a connection attempt was discarded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionRejection {
    /// The source port no longer exists
    UnknownSource,
    /// Dropped on blank canvas or on a node body away from any port
    NoTarget,
    /// Dropped back onto the port it started from
    SamePort,
    /// Both ends on the same node
    SameNode,
    /// The target port does not accept connections
    NotConnectable,
}

impl fmt::Display for ConnectionRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            ConnectionRejection::UnknownSource => "source port does not exist",
            ConnectionRejection::NoTarget => "no port at drop point",
            ConnectionRejection::SamePort => "source and target are the same port",
            ConnectionRejection::SameNode => "source and target are on the same node",
            ConnectionRejection::NotConnectable => "target port is not connectable",
        };
        f.write_str(reason)
    }
}

/// Decides whether a connection from `source` to `target` may become an edge
pub fn validate_connection(source: Option<&Port>, target: Option<&Port>) -> Result<(), ConnectionRejection> {
    let source = source.ok_or(ConnectionRejection::UnknownSource)?;
    let target = target.ok_or(ConnectionRejection::NoTarget)?;

    if source.id == target.id {
        return Err(ConnectionRejection::SamePort);
    }
    if source.node() == target.node() {
        return Err(ConnectionRejection::SameNode);
    }
    if !target.connectable {
        return Err(ConnectionRejection::NotConnectable);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::{PortGroup, PortId, PortKey};
    use egui::Pos2;

    fn port(node: usize, key: PortKey) -> Port {
        Port::new(PortId::new(node, key), PortGroup::Left, Pos2::ZERO)
    }

    #[test]
    fn test_accepts_ports_on_distinct_nodes() {
        let a = port(1, PortKey::Output);
        let b = port(2, PortKey::Input);
        assert_eq!(validate_connection(Some(&a), Some(&b)), Ok(()));
    }

    #[test]
    fn test_rejects_same_port_and_same_node() {
        let a = port(1, PortKey::Output);
        let b = port(1, PortKey::Input);
        assert_eq!(validate_connection(Some(&a), Some(&a)), Err(ConnectionRejection::SamePort));
        assert_eq!(validate_connection(Some(&a), Some(&b)), Err(ConnectionRejection::SameNode));
    }

    #[test]
    fn test_rejects_blank_and_unconnectable_targets() {
        let a = port(1, PortKey::Output);
        let mut b = port(2, PortKey::Input);
        assert_eq!(validate_connection(Some(&a), None), Err(ConnectionRejection::NoTarget));
        assert_eq!(validate_connection(None, Some(&b)), Err(ConnectionRejection::UnknownSource));

        b.connectable = false;
        assert_eq!(validate_connection(Some(&a), Some(&b)), Err(ConnectionRejection::NotConnectable));
    }
}
