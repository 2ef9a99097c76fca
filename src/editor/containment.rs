//! Containment constraint
//!
//! Keeps an embedded node inside its container's interior (the container's
//! box minus a header strip on top and a margin on the other sides), and
//! picks the container a dropped node lands in.

use egui::{Pos2, Rect};

use crate::config::SceneConfig;
use crate::geometry;
use crate::nodes::{NodeId, SceneGraph};

/// Interior insets of a container
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Insets {
    pub margin: f32,
    pub header: f32,
}

impl Insets {
    pub fn from_config(config: &SceneConfig) -> Self {
        Self {
            margin: config.container_margin,
            header: config.container_header,
        }
    }

    /// The part of `container` children may occupy
    pub fn interior(&self, container: Rect) -> Rect {
        geometry::inset(container, self.margin, self.header)
    }
}

/// Position that keeps `child` inside the interior of `container`.
///
/// A child larger than the interior on an axis is pinned to the interior's
/// minimum on that axis. Applying the result again yields the same position.
pub fn clamped_position(child: Rect, container: Rect, insets: Insets) -> Pos2 {
    geometry::clamp_position(child.min, child.size(), insets.interior(container))
}

/// Where a node currently is versus where the constraint wants it
pub fn correction(graph: &SceneGraph, node: NodeId) -> Option<Pos2> {
    let child = graph.node(node)?;
    let parent = graph.node(child.parent?)?;
    let target = clamped_position(child.rect(), parent.rect(), Insets::from_config(graph.config()));
    (target != child.position).then_some(target)
}

/// Finds the container a box would be embedded in.
///
/// Candidates are containers whose box fully encloses `bbox`; `moving` and its
/// descendants never qualify. The smallest candidate wins, and among equal
/// areas the most recently added one.
pub fn find_parent(graph: &SceneGraph, moving: Option<NodeId>, bbox: Rect) -> Option<NodeId> {
    let excluded = moving.map(|id| graph.subtree(id)).unwrap_or_default();

    graph
        .nodes()
        .filter(|node| node.is_container() && !excluded.contains(&node.id))
        .filter(|node| geometry::encloses(node.rect(), bbox))
        .min_by(|a, b| {
            geometry::area(a.rect())
                .total_cmp(&geometry::area(b.rect()))
                .then_with(|| b.id.cmp(&a.id))
        })
        .map(|node| node.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::NodeKind;
    use egui::Vec2;

    const INSETS: Insets = Insets { margin: 10.0, header: 40.0 };

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::from_min_size(Pos2::new(x, y), Vec2::new(w, h))
    }

    #[test]
    fn test_clamp_keeps_child_in_interior() {
        let container = rect(100.0, 100.0, 400.0, 300.0);
        assert_eq!(clamped_position(rect(50.0, 50.0, 100.0, 50.0), container, INSETS), Pos2::new(110.0, 140.0));
        assert_eq!(clamped_position(rect(480.0, 380.0, 100.0, 50.0), container, INSETS), Pos2::new(390.0, 340.0));
        assert_eq!(clamped_position(rect(200.0, 200.0, 100.0, 50.0), container, INSETS), Pos2::new(200.0, 200.0));
    }

    #[test]
    fn test_clamp_is_idempotent() {
        let container = rect(0.0, 0.0, 300.0, 200.0);
        let once = clamped_position(rect(290.0, -5.0, 40.0, 40.0), container, INSETS);
        let twice = clamped_position(Rect::from_min_size(once, Vec2::new(40.0, 40.0)), container, INSETS);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_oversized_child_is_pinned_to_interior_min() {
        let container = rect(0.0, 0.0, 300.0, 200.0);
        let pinned = clamped_position(rect(50.0, 50.0, 350.0, 400.0), container, INSETS);
        assert_eq!(pinned, Pos2::new(10.0, 40.0));
    }

    #[test]
    fn test_find_parent_prefers_smallest_then_newest() {
        let mut graph = SceneGraph::default();
        let outer = graph.add_node(NodeKind::Container, Pos2::new(0.0, 0.0), Some(Vec2::new(800.0, 600.0)));
        let inner = graph.add_node(NodeKind::Container, Pos2::new(50.0, 50.0), Some(Vec2::new(400.0, 300.0)));
        let twin = graph.add_node(NodeKind::Container, Pos2::new(60.0, 60.0), Some(Vec2::new(400.0, 300.0)));

        let bbox = rect(100.0, 100.0, 50.0, 50.0);
        assert_eq!(find_parent(&graph, None, bbox), Some(twin));

        let wide = rect(10.0, 10.0, 500.0, 50.0);
        assert_eq!(find_parent(&graph, None, wide), Some(outer));

        // Inside `inner` but above `twin`'s top-left corner.
        assert_eq!(find_parent(&graph, None, rect(55.0, 55.0, 10.0, 10.0)), Some(inner));

        assert_eq!(find_parent(&graph, None, rect(900.0, 900.0, 10.0, 10.0)), None);
    }

    #[test]
    fn test_find_parent_skips_own_subtree() {
        let mut graph = SceneGraph::default();
        let container = graph.add_node(NodeKind::Container, Pos2::new(0.0, 0.0), None);
        let bbox = graph.node(container).unwrap().rect();
        assert_eq!(find_parent(&graph, Some(container), bbox), None);
        assert_eq!(find_parent(&graph, None, bbox), Some(container));
    }
}
