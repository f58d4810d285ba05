//! Graph Store
//!
//! The store owns the canonical node and edge collections for one editing
//! session and keeps them referentially intact: after every operation, each
//! edge's endpoints name nodes that exist.
//!
//! # Ordering
//!
//! Nodes and edges are kept in insertion order (`IndexMap`), and removals
//! shift rather than swap so that snapshots render in a stable order.
//!
//! # Ids
//!
//! Node and edge ids come from per-store counters starting at 1. Counters
//! only move forward, so an id is never handed out twice in a session.
//! Loaded ids must not exceed [`MAX_LOADED_ID`], which keeps the counters
//! far from wrapping.

use std::collections::HashSet;

use indexmap::IndexMap;
use tracing::debug;

use super::{Edge, EdgeId, GraphSnapshot, Node, NodeCategory, NodeId, Position, Selection};
use crate::config::{DuplicateEdgePolicy, EditorConfig, GridConfig};
use crate::error::{LoadError, RejectedMutation};

/// Largest raw id a loaded snapshot may carry.
pub const MAX_LOADED_ID: u64 = u64::MAX / 2;

/// Ids removed by a delete operation.
///
/// Empty when the operation was a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Removal {
    pub nodes: Vec<NodeId>,
    pub edges: Vec<EdgeId>,
}

impl Removal {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}

/// The mutable graph of an editing session.
#[derive(Debug, Clone)]
pub struct GraphStore {
    nodes: IndexMap<NodeId, Node>,
    edges: IndexMap<EdgeId, Edge>,
    next_node: u64,
    next_edge: u64,

    /// Number of nodes placed on the default grid so far.
    placed: usize,

    duplicate_edges: DuplicateEdgePolicy,
    placement: GridConfig,
}

impl GraphStore {
    /// Create an empty store with default settings.
    pub fn new() -> Self {
        Self::with_config(&EditorConfig::default())
    }

    /// Create an empty store using the session configuration.
    pub fn with_config(config: &EditorConfig) -> Self {
        Self {
            nodes: IndexMap::new(),
            edges: IndexMap::new(),
            next_node: 1,
            next_edge: 1,
            placed: 0,
            duplicate_edges: config.duplicate_edges,
            placement: config.placement,
        }
    }

    /// Rebuild a store from a snapshot that did not necessarily come from
    /// a store, such as one read from disk.
    ///
    /// Fails without partial results if the snapshot breaks any invariant
    /// the store would otherwise guarantee. Counters resume after the
    /// highest loaded ids.
    pub fn from_snapshot(
        snapshot: GraphSnapshot,
        config: &EditorConfig,
    ) -> Result<Self, LoadError> {
        let mut store = Self::with_config(config);
        let (nodes, edges) = snapshot.into_parts();

        for node in nodes {
            let id = node.id;
            if id.raw() > MAX_LOADED_ID {
                return Err(LoadError::NodeIdOutOfRange(id));
            }
            if store.nodes.insert(id, node).is_some() {
                return Err(LoadError::DuplicateNode(id));
            }
            store.next_node = store.next_node.max(id.raw() + 1);
        }

        let mut pairs = HashSet::new();
        for edge in edges {
            if edge.id.raw() > MAX_LOADED_ID {
                return Err(LoadError::EdgeIdOutOfRange(edge.id));
            }
            if edge.is_self_loop() {
                return Err(LoadError::SelfLoop { edge: edge.id, node: edge.source });
            }
            for node in [edge.source, edge.target] {
                if !store.nodes.contains_key(&node) {
                    return Err(LoadError::DanglingEdge { edge: edge.id, node });
                }
            }
            if store.duplicate_edges == DuplicateEdgePolicy::Reject
                && !pairs.insert((edge.source, edge.target))
            {
                return Err(LoadError::ParallelEdge { edge: edge.id });
            }
            if store.edges.insert(edge.id, edge).is_some() {
                return Err(LoadError::DuplicateEdge(edge.id));
            }
            store.next_edge = store.next_edge.max(edge.id.raw() + 1);
        }

        store.placed = store.nodes.len();
        debug!(
            nodes = store.nodes.len(),
            edges = store.edges.len(),
            "loaded graph store from snapshot"
        );
        Ok(store)
    }

    /// Add a node at the next default grid position.
    ///
    /// Labels are not checked here; the editor rejects blank labels before
    /// they reach the store.
    pub fn add_node(&mut self, label: impl Into<String>, category: NodeCategory) -> NodeId {
        let position = self.placement.cell(self.placed);
        self.placed += 1;
        self.add_node_at(label, category, position)
    }

    /// Add a node at a caller-supplied position.
    pub fn add_node_at(
        &mut self,
        label: impl Into<String>,
        category: NodeCategory,
        position: Position,
    ) -> NodeId {
        let id = NodeId::from(self.next_node);
        self.next_node += 1;

        let node = Node::new(id, label, category, position);
        debug!(node = %id, label = %node.label, ?category, "added node");
        self.nodes.insert(id, node);
        id
    }

    /// Remove a node and every edge that touches it.
    ///
    /// Removing an absent node is a no-op.
    pub fn remove_node(&mut self, id: NodeId) -> Removal {
        if self.nodes.shift_remove(&id).is_none() {
            return Removal::default();
        }

        let edges = self.drain_edges(|edge| edge.touches(id));
        debug!(node = %id, cascaded = edges.len(), "removed node");
        Removal {
            nodes: vec![id],
            edges,
        }
    }

    /// Connect `source` to `target`.
    ///
    /// Self-loops are refused before anything else is checked, so
    /// `add_edge(n, n)` is rejected whether or not `n` exists.
    pub fn add_edge(&mut self, source: NodeId, target: NodeId) -> Result<EdgeId, RejectedMutation> {
        if source == target {
            debug!(node = %source, "rejected self-loop");
            return Err(RejectedMutation::SelfLoop { node: source });
        }
        for node in [source, target] {
            if !self.nodes.contains_key(&node) {
                debug!(node = %node, "rejected edge to unknown node");
                return Err(RejectedMutation::UnknownNode { node });
            }
        }
        if self.duplicate_edges == DuplicateEdgePolicy::Reject
            && self.edges.values().any(|e| e.source == source && e.target == target)
        {
            debug!(%source, %target, "rejected parallel edge");
            return Err(RejectedMutation::DuplicateEdge { from: source, to: target });
        }

        let id = EdgeId::from(self.next_edge);
        self.next_edge += 1;
        self.edges.insert(id, Edge::new(id, source, target));
        debug!(edge = %id, %source, %target, "added edge");
        Ok(id)
    }

    /// Remove a single edge. Removing an absent edge is a no-op.
    pub fn remove_edge(&mut self, id: EdgeId) -> Removal {
        match self.edges.shift_remove(&id) {
            Some(_) => {
                debug!(edge = %id, "removed edge");
                Removal {
                    nodes: Vec::new(),
                    edges: vec![id],
                }
            }
            None => Removal::default(),
        }
    }

    /// Remove every selected node and edge in one step.
    ///
    /// The edge deletion set is the selected edges together with every edge
    /// incident to a selected node, whether or not that edge was selected.
    /// Both sets are computed before anything is removed.
    pub fn remove_selection(&mut self, selection: &Selection) -> Removal {
        let nodes: Vec<NodeId> = self
            .nodes
            .keys()
            .copied()
            .filter(|id| selection.nodes.contains(id))
            .collect();
        let doomed_edges: HashSet<EdgeId> = self
            .edges
            .values()
            .filter(|edge| {
                selection.edges.contains(&edge.id)
                    || selection.nodes.contains(&edge.source)
                    || selection.nodes.contains(&edge.target)
            })
            .map(|edge| edge.id)
            .collect();

        self.nodes.retain(|id, _| !selection.nodes.contains(id));
        let edges = self.drain_edges(|edge| doomed_edges.contains(&edge.id));

        debug!(nodes = nodes.len(), edges = edges.len(), "removed selection");
        Removal { nodes, edges }
    }

    /// Move a node. Returns `false` if the node does not exist.
    pub fn set_position(&mut self, id: NodeId, position: Position) -> bool {
        match self.nodes.get_mut(&id) {
            Some(node) => {
                node.position = position;
                true
            }
            None => false,
        }
    }

    /// Take an immutable, ordered copy of the graph.
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot::new(
            self.nodes.values().cloned().collect(),
            self.edges.values().copied().collect(),
        )
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(&id)
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Remove edges matching `doomed`, returning their ids in order.
    fn drain_edges<F>(&mut self, doomed: F) -> Vec<EdgeId>
    where
        F: Fn(&Edge) -> bool,
    {
        let removed: Vec<EdgeId> = self
            .edges
            .values()
            .filter(|edge| doomed(edge))
            .map(|edge| edge.id)
            .collect();
        self.edges.retain(|_, edge| !doomed(edge));
        removed
    }
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new()
    }
}
