//! Layered Layout
//!
//! A small rank-based layout that stands in for a full layered layout
//! engine.
//!
//! # Algorithm
//!
//! 1. Compute in-degrees, counting only edges between known nodes
//! 2. Seed a queue with every node of in-degree zero (Kahn's algorithm)
//! 3. Pop nodes in order; each successor's rank becomes the longest path to
//!    it, and it is queued once all its inputs are processed
//! 4. Lay ranks out along the flow direction and center each rank across it
//!
//! Nodes on a cycle, or downstream of one, never reach in-degree zero. They
//! are left out of the result and end up on the fallback grid.

use std::collections::{HashMap, VecDeque};

use super::{Direction, Layout};
use crate::config::LayoutConfig;
use crate::graph::{Edge, Node, NodeId, Position};

/// Longest-path layered layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayeredLayout {
    node_width: f64,
    node_height: f64,
    rank_gap: f64,
    node_gap: f64,
}

impl LayeredLayout {
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            node_width: config.node_width,
            node_height: config.node_height,
            rank_gap: config.rank_gap,
            node_gap: config.node_gap,
        }
    }

    /// Rank every node reachable from a zero in-degree node.
    fn ranks(nodes: &[Node], edges: &[Edge]) -> HashMap<NodeId, usize> {
        let mut in_degree: HashMap<NodeId, usize> = nodes.iter().map(|n| (n.id, 0)).collect();
        let mut successors: HashMap<NodeId, Vec<NodeId>> = HashMap::new();

        for edge in edges {
            if !in_degree.contains_key(&edge.source) {
                continue;
            }
            if let Some(degree) = in_degree.get_mut(&edge.target) {
                *degree += 1;
                successors.entry(edge.source).or_default().push(edge.target);
            }
        }

        let mut ranks: HashMap<NodeId, usize> = HashMap::new();
        let mut queue: VecDeque<NodeId> = nodes
            .iter()
            .map(|n| n.id)
            .filter(|id| in_degree[id] == 0)
            .collect();
        for id in &queue {
            ranks.insert(*id, 0);
        }

        // Kahn's algorithm
        while let Some(node_id) = queue.pop_front() {
            let rank = ranks[&node_id];
            let Some(next) = successors.get(&node_id) else {
                continue;
            };
            for &successor in next {
                let entry = ranks.entry(successor).or_insert(0);
                *entry = (*entry).max(rank + 1);

                if let Some(degree) = in_degree.get_mut(&successor) {
                    *degree = degree.saturating_sub(1);
                    if *degree == 0 {
                        queue.push_back(successor);
                    }
                }
            }
        }

        // Successors of processed nodes get a provisional rank even when
        // they stay blocked behind a cycle; drop those.
        ranks.retain(|id, _| in_degree[id] == 0);
        ranks
    }
}

impl Default for LayeredLayout {
    fn default() -> Self {
        Self::new(&LayoutConfig::default())
    }
}

impl Layout for LayeredLayout {
    fn layout(
        &self,
        nodes: &[Node],
        edges: &[Edge],
        direction: Direction,
    ) -> HashMap<NodeId, Position> {
        let ranks = Self::ranks(nodes, edges);
        let depth = ranks.values().copied().max().unwrap_or(0);

        // Group by rank, keeping snapshot order within a rank.
        let mut layers: Vec<Vec<NodeId>> = vec![Vec::new(); depth + 1];
        for node in nodes {
            if let Some(&rank) = ranks.get(&node.id) {
                layers[rank].push(node.id);
            }
        }

        let (along, across) = if direction.is_horizontal() {
            (self.node_width + self.rank_gap, self.node_height + self.node_gap)
        } else {
            (self.node_height + self.rank_gap, self.node_width + self.node_gap)
        };

        let mut positions = HashMap::with_capacity(ranks.len());
        for (rank, layer) in layers.iter().enumerate() {
            let step = if direction.is_reversed() { depth - rank } else { rank };
            let main = step as f64 * along;
            let offset = (layer.len() as f64 - 1.0) / 2.0;

            for (slot, id) in layer.iter().enumerate() {
                let cross = (slot as f64 - offset) * across;
                let (cx, cy) = if direction.is_horizontal() {
                    (main, cross)
                } else {
                    (cross, main)
                };
                // Centers become top-left corners.
                positions.insert(
                    *id,
                    Position::new(cx - self.node_width / 2.0, cy - self.node_height / 2.0),
                );
            }
        }
        positions
    }
}
