//! Selection
//!
//! The selection is owned by the presentation layer. The store only reads it
//! as the input of a bulk delete.

use std::collections::HashSet;

use super::{EdgeId, NodeId};

/// A set of selected nodes and edges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub nodes: HashSet<NodeId>,
    pub edges: HashSet<EdgeId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a selection from node and edge ids.
    pub fn of<N, E>(nodes: N, edges: E) -> Self
    where
        N: IntoIterator<Item = NodeId>,
        E: IntoIterator<Item = EdgeId>,
    {
        Self {
            nodes: nodes.into_iter().collect(),
            edges: edges.into_iter().collect(),
        }
    }

    pub fn select_node(&mut self, id: NodeId) {
        self.nodes.insert(id);
    }

    pub fn select_edge(&mut self, id: EdgeId) {
        self.edges.insert(id);
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_collects_and_clears() {
        let mut selection = Selection::new();
        assert!(selection.is_empty());

        selection.select_node(NodeId::from(1));
        selection.select_node(NodeId::from(1));
        selection.select_edge(EdgeId::from(4));
        assert_eq!(selection.nodes.len(), 1);
        assert_eq!(selection, Selection::of([NodeId::from(1)], [EdgeId::from(4)]));

        selection.clear();
        assert!(selection.is_empty());
    }
}
