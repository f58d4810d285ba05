//! Automatic Layout
//!
//! Layout is a collaborator of the core, not part of it: a `Layout` receives
//! the current nodes and edges and proposes positions. The core applies the
//! proposal by overwriting position fields only. Labels, categories, ids and
//! edges pass through untouched.
//!
//! Algorithms may leave nodes unplaced (the bundled `LayeredLayout` does so
//! for nodes it cannot rank). Those nodes get a deterministic grid position
//! based on their index in the snapshot.

mod layered;

pub use layered::LayeredLayout;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::LayoutConfig;
use crate::graph::{Edge, GraphSnapshot, Node, NodeId, Position};

/// Direction in which ranks advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    #[serde(rename = "TB")]
    TopToBottom,
    #[serde(rename = "BT")]
    BottomToTop,
    #[serde(rename = "LR")]
    LeftToRight,
    #[serde(rename = "RL")]
    RightToLeft,
}

impl Direction {
    /// Whether ranks advance along the horizontal axis.
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Self::LeftToRight | Self::RightToLeft)
    }

    /// Whether ranks advance toward negative coordinates.
    pub fn is_reversed(&self) -> bool {
        matches!(self, Self::BottomToTop | Self::RightToLeft)
    }
}

/// A graph layout algorithm.
pub trait Layout {
    /// Propose top-left positions for nodes.
    ///
    /// Nodes missing from the returned map are placed on the fallback grid.
    fn layout(
        &self,
        nodes: &[Node],
        edges: &[Edge],
        direction: Direction,
    ) -> HashMap<NodeId, Position>;
}

/// Run `layout` over a snapshot and return a copy with new positions.
///
/// An empty snapshot is returned unchanged.
pub fn layout_snapshot(
    snapshot: &GraphSnapshot,
    layout: &dyn Layout,
    config: &LayoutConfig,
) -> GraphSnapshot {
    if snapshot.nodes().is_empty() {
        return snapshot.clone();
    }

    let mut positions = layout.layout(snapshot.nodes(), snapshot.edges(), config.direction);
    let mut fallbacks = 0;

    let nodes = snapshot
        .nodes()
        .iter()
        .enumerate()
        .map(|(index, node)| {
            let position = positions.remove(&node.id).unwrap_or_else(|| {
                fallbacks += 1;
                config.fallback.cell(index)
            });
            Node {
                position,
                ..node.clone()
            }
        })
        .collect();

    debug!(
        nodes = snapshot.node_count(),
        fallbacks,
        direction = ?config.direction,
        "laid out snapshot"
    );
    GraphSnapshot::new(nodes, snapshot.edges().to_vec())
}
