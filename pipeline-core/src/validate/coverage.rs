//! Edge Coverage
//!
//! A pipeline needs every node to be wired into it. This check only asks
//! whether each node touches at least one edge; two disjoint connected pairs
//! pass, a lone node does not.

use super::index::GraphIndex;
use crate::graph::NodeId;

/// Nodes that are not an endpoint of any edge, in snapshot order.
pub(crate) fn isolated_nodes(index: &GraphIndex) -> Vec<NodeId> {
    index
        .ids
        .iter()
        .zip(&index.touched)
        .filter(|(_, &touched)| !touched)
        .map(|(&id, _)| id)
        .collect()
}
