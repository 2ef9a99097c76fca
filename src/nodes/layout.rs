//! Port layout engine
//!
//! [`layout_ports`] is the single function that turns a node's kind, enabled
//! capabilities, orientation and size into its port list. It has no state and
//! always regenerates the whole list; port counts are in the single digits.
//!
//! Capability nodes get two fixed ports (input on the left, output on the right
//! when vertical or at the bottom when horizontal) plus one port per enabled
//! leaf capability:
//!
//! * vertical: the leaves sit on a line beneath the node, evenly spread
//!   between the side margins, each hanging off a short vertical stub;
//! * horizontal: the leaves fan out from the centre of the right edge, each
//!   with a radial stub and a text label just past its end.

use egui::{Pos2, Vec2};

use super::capability::EnabledLeaf;
use super::node::{NodeId, NodeKind, Orientation};
use super::port::{ConnectorStub, Port, PortGroup, PortId, PortKey, PortLabel};
use crate::constants::port as dims;
use crate::geometry;

/// Everything the port list depends on
#[derive(Debug, Clone, Copy)]
pub struct LayoutInput<'a> {
    pub node: NodeId,
    pub kind: NodeKind,
    pub leaves: &'a [EnabledLeaf],
    pub orientation: Orientation,
    pub size: Vec2,
}

/// Computes the full, ordered port list for a node
pub fn layout_ports(input: &LayoutInput<'_>) -> Vec<Port> {
    match input.kind {
        NodeKind::Text | NodeKind::Container => side_ports(input.node, input.size),
        NodeKind::Capability => {
            let mut ports = fixed_capability_ports(input.node, input.orientation, input.size);
            let fan = match input.orientation {
                Orientation::Vertical => vertical_leaf_ports(input.node, input.leaves, input.size),
                Orientation::Horizontal => horizontal_leaf_ports(input.node, input.leaves, input.size),
            };
            ports.extend(fan);
            ports
        }
    }
}

fn side_ports(node: NodeId, size: Vec2) -> Vec<Port> {
    let mid_y = size.y / 2.0;
    vec![
        Port::new(PortId::new(node, PortKey::Left), PortGroup::Left, Pos2::new(0.0, mid_y)),
        Port::new(PortId::new(node, PortKey::Right), PortGroup::Right, Pos2::new(size.x, mid_y)),
    ]
}

fn fixed_capability_ports(node: NodeId, orientation: Orientation, size: Vec2) -> Vec<Port> {
    let input = Port::new(
        PortId::new(node, PortKey::Input),
        PortGroup::Left,
        Pos2::new(-dims::RADIUS, size.y / 2.0),
    );
    // The output keeps its key across orientations so edges survive a toggle.
    let (group, anchor) = if orientation.is_vertical() {
        (PortGroup::Right, Pos2::new(size.x + dims::RADIUS, size.y / 2.0))
    } else {
        (PortGroup::Bottom, Pos2::new(size.x / 2.0, size.y + dims::RADIUS))
    };
    let output = Port::new(PortId::new(node, PortKey::Output), group, anchor);
    vec![input, output]
}

fn leaf_port(node: NodeId, leaf: &EnabledLeaf, group: PortGroup, from: Pos2, to: Pos2) -> Port {
    let mut port = Port::new(PortId::new(node, PortKey::Capability(leaf.id.clone())), group, to);
    port.stub = Some(ConnectorStub { from, to, plus: to });
    port
}

fn vertical_leaf_ports(node: NodeId, leaves: &[EnabledLeaf], size: Vec2) -> Vec<Port> {
    let start_y = size.y + dims::VERTICAL_STUB_OFFSET;
    let end_y = start_y + dims::VERTICAL_STUB_LENGTH;
    let xs = geometry::distribute_linear(leaves.len(), size.x, dims::VERTICAL_MARGIN);

    leaves
        .iter()
        .zip(xs)
        .map(|(leaf, x)| leaf_port(node, leaf, PortGroup::Bottom, Pos2::new(x, start_y), Pos2::new(x, end_y)))
        .collect()
}

fn horizontal_leaf_ports(node: NodeId, leaves: &[EnabledLeaf], size: Vec2) -> Vec<Port> {
    let origin = Pos2::new(size.x, size.y / 2.0);
    let angles = geometry::fan_angles(leaves.len(), dims::FAN_ANGLE_STEP_DEG);

    leaves
        .iter()
        .zip(angles)
        .map(|(leaf, angle)| {
            let end = origin + geometry::polar(dims::FAN_RADIUS, angle);
            let mut port = leaf_port(node, leaf, PortGroup::Right, origin, end);
            port.label = Some(PortLabel {
                text: leaf.label.clone(),
                anchor: end + Vec2::new(dims::SIZE, 0.0),
            });
            port
        })
        .collect()
}
