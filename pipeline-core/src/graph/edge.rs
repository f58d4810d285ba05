//! Pipeline Edges

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{IdParseError, NodeId};

/// Unique identifier for an edge. The textual form is `edge-<n>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EdgeId(u64);

impl EdgeId {
    const PREFIX: &'static str = "edge-";

    /// Get the raw ID value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl From<u64> for EdgeId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::PREFIX, self.0)
    }
}

impl FromStr for EdgeId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        super::parse_prefixed(s, Self::PREFIX).map(Self)
    }
}

impl TryFrom<String> for EdgeId {
    type Error = IdParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<EdgeId> for String {
    fn from(id: EdgeId) -> Self {
        id.to_string()
    }
}

/// A directed connection from `source` to `target`.
///
/// Edges created through the store always satisfy `source != target` and
/// reference nodes that exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
}

impl Edge {
    pub fn new(id: EdgeId, source: NodeId, target: NodeId) -> Self {
        Self { id, source, target }
    }

    /// Check whether `node` is either endpoint of this edge.
    pub fn touches(&self, node: NodeId) -> bool {
        self.source == node || self.target == node
    }

    /// Check whether both endpoints are the same node.
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_touches_both_endpoints() {
        let edge = Edge::new(EdgeId::from(1), NodeId::from(1), NodeId::from(2));
        assert!(edge.touches(NodeId::from(1)));
        assert!(edge.touches(NodeId::from(2)));
        assert!(!edge.touches(NodeId::from(3)));
        assert!(!edge.is_self_loop());
    }

    #[test]
    fn edge_serializes_endpoints_as_node_ids() {
        let edge = Edge::new(EdgeId::from(7), NodeId::from(1), NodeId::from(2));
        let value = serde_json::to_value(edge).unwrap();

        assert_eq!(value["id"], "edge-7");
        assert_eq!(value["source"], "node-1");
        assert_eq!(value["target"], "node-2");
    }
}
