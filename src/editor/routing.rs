//! Global routing policy
//!
//! Maps the canvas-wide orientation to the direction hints the edge router
//! uses. New edges are stamped with the current hint; a toggle restamps every
//! existing edge.

use serde::{Deserialize, Serialize};

use crate::constants::routing as defaults;
use crate::nodes::{Edge, Orientation};

/// Side of a node an edge leaves or enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Top,
    Right,
    Bottom,
    Left,
}

/// Router settings attached to an edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingHint {
    pub router: String,
    pub padding: f32,
    pub start: Direction,
    pub end: Direction,
}

impl RoutingHint {
    pub fn for_orientation(orientation: Orientation) -> Self {
        let (start, end) = match orientation {
            Orientation::Vertical => (Direction::Bottom, Direction::Top),
            Orientation::Horizontal => (Direction::Right, Direction::Left),
        };
        Self {
            router: defaults::ROUTER.to_string(),
            padding: defaults::PADDING,
            start,
            end,
        }
    }
}

/// Holds the current global orientation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingPolicy {
    orientation: Orientation,
}

impl RoutingPolicy {
    pub fn new(orientation: Orientation) -> Self {
        Self { orientation }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Hint given to connections made from now on
    pub fn hint(&self) -> RoutingHint {
        RoutingHint::for_orientation(self.orientation)
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    /// Rewrites the hint of every given edge to the current rule
    pub fn restamp<'a>(&self, edges: impl IntoIterator<Item = &'a mut Edge>) -> usize {
        let hint = self.hint();
        let mut count = 0;
        for edge in edges {
            edge.routing = hint.clone();
            count += 1;
        }
        count
    }
}
