//! Pipeline Nodes
//!
//! This module defines the node records held by the graph store.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::IdParseError;

/// Unique identifier for a node in a pipeline graph.
///
/// Ids are allocated by the owning `GraphStore` from a monotonically
/// increasing counter and are never reused, even after the node is removed.
/// The textual form is `node-<n>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NodeId(u64);

impl NodeId {
    const PREFIX: &'static str = "node-";

    /// Get the raw ID value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::PREFIX, self.0)
    }
}

impl FromStr for NodeId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        super::parse_prefixed(s, Self::PREFIX).map(Self)
    }
}

impl TryFrom<String> for NodeId {
    type Error = IdParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<NodeId> for String {
    fn from(id: NodeId) -> Self {
        id.to_string()
    }
}

/// The category of a pipeline node.
///
/// The validator never inspects categories; they only drive presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub enum NodeCategory {
    /// Produces data. The entry points of a pipeline.
    #[default]
    #[serde(rename = "dataSource")]
    Source,

    /// Transforms data flowing through it.
    Processing,

    /// Consumes data. The sinks of a pipeline.
    Output,
}

impl NodeCategory {
    /// All categories in menu order.
    pub const ALL: [NodeCategory; 3] = [Self::Source, Self::Processing, Self::Output];
}

/// Canvas coordinates of a node's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A node in the pipeline graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier for this node.
    pub id: NodeId,

    /// Display label. Never empty when created through the editor.
    pub label: String,

    /// What kind of pipeline stage this is.
    pub category: NodeCategory,

    /// Presentation state, owned by the layout and rendering collaborators.
    #[serde(default)]
    pub position: Position,
}

impl Node {
    /// Create a node record.
    pub fn new(
        id: NodeId,
        label: impl Into<String>,
        category: NodeCategory,
        position: Position,
    ) -> Self {
        Self {
            id,
            label: label.into(),
            category,
            position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_id_round_trips_through_text() {
        let id = NodeId::from(42);
        assert_eq!(id.to_string(), "node-42");
        assert_eq!("node-42".parse::<NodeId>().unwrap(), id);
    }

    #[test]
    fn node_id_rejects_foreign_text() {
        assert!("edge-1".parse::<NodeId>().is_err());
        assert!("node-".parse::<NodeId>().is_err());
        assert!("node-x".parse::<NodeId>().is_err());
    }

    #[test]
    fn category_uses_editor_tags() {
        let json = serde_json::to_string(&NodeCategory::Source).unwrap();
        assert_eq!(json, "\"dataSource\"");

        let parsed: NodeCategory = serde_json::from_str("\"processing\"").unwrap();
        assert_eq!(parsed, NodeCategory::Processing);
    }

    #[test]
    fn node_serializes_minimal_record() {
        let node = Node::new(
            NodeId::from(1),
            "Source",
            NodeCategory::Source,
            Position::new(10.0, 20.0),
        );
        let value = serde_json::to_value(&node).unwrap();

        assert_eq!(value["id"], "node-1");
        assert_eq!(value["label"], "Source");
        assert_eq!(value["category"], "dataSource");
        assert_eq!(value["position"]["x"], 10.0);
    }
}
