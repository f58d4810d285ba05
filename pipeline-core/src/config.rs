//! Editor Configuration
//!
//! All knobs have defaults matching the editor's stock behavior, so an empty
//! JSON object is a valid configuration.

use serde::{Deserialize, Serialize};

use crate::graph::Position;
use crate::layout::Direction;

/// How the store treats a second edge between the same ordered node pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateEdgePolicy {
    /// Parallel edges are stored and counted individually.
    #[default]
    Allow,

    /// A parallel edge is rejected like a self-loop.
    Reject,
}

/// A row-major grid used for default node placement and layout fallback.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Position of the first cell.
    pub origin: Position,
    /// Horizontal distance between columns.
    pub column_spacing: f64,
    /// Vertical distance between rows.
    pub row_spacing: f64,
    /// Cells per row. Zero is treated as one.
    pub columns: usize,
}

impl GridConfig {
    /// Position of the `index`-th cell.
    pub fn cell(&self, index: usize) -> Position {
        let columns = self.columns.max(1);
        Position::new(
            self.origin.x + (index % columns) as f64 * self.column_spacing,
            self.origin.y + (index / columns) as f64 * self.row_spacing,
        )
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            origin: Position::new(200.0, 100.0),
            column_spacing: 200.0,
            row_spacing: 100.0,
            columns: 3,
        }
    }
}

/// Settings for automatic layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub direction: Direction,
    /// Width of the box reserved for each node.
    pub node_width: f64,
    /// Height of the box reserved for each node.
    pub node_height: f64,
    /// Gap between consecutive ranks.
    pub rank_gap: f64,
    /// Gap between nodes sharing a rank.
    pub node_gap: f64,
    /// Placement for nodes the layout algorithm leaves unplaced.
    pub fallback: GridConfig,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            direction: Direction::TopToBottom,
            node_width: 150.0,
            node_height: 60.0,
            rank_gap: 50.0,
            node_gap: 50.0,
            fallback: GridConfig::default(),
        }
    }
}

/// Configuration for an editing session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Smallest node count that can form a valid pipeline.
    pub min_nodes: usize,
    pub duplicate_edges: DuplicateEdgePolicy,
    /// Where new nodes land when the caller gives no position.
    pub placement: GridConfig,
    pub layout: LayoutConfig,
}

impl EditorConfig {
    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            min_nodes: 2,
            duplicate_edges: DuplicateEdgePolicy::Allow,
            placement: GridConfig::default(),
            layout: LayoutConfig::default(),
        }
    }
}
