//! Dense adjacency index over a snapshot.
//!
//! Node ids are mapped to positions in snapshot order so the traversals can
//! use flat vectors. Edges with an endpoint outside the snapshot are counted
//! and otherwise ignored.

use std::collections::HashMap;

use smallvec::SmallVec;

use crate::graph::{GraphSnapshot, NodeId};

pub(crate) struct GraphIndex {
    /// Node ids in snapshot order.
    pub ids: Vec<NodeId>,
    /// Outgoing neighbors per node, in edge order. Parallel edges repeat.
    pub successors: Vec<SmallVec<[usize; 4]>>,
    /// Whether each node is an endpoint of at least one edge.
    pub touched: Vec<bool>,
    /// Edges with at least one endpoint missing from the snapshot.
    pub dangling: usize,
}

impl GraphIndex {
    pub fn build(snapshot: &GraphSnapshot) -> Self {
        let ids: Vec<NodeId> = snapshot.nodes().iter().map(|n| n.id).collect();
        let mut position = HashMap::with_capacity(ids.len());
        for (i, id) in ids.iter().enumerate() {
            // A repeated id keeps its first slot.
            position.entry(*id).or_insert(i);
        }

        let mut successors = vec![SmallVec::new(); ids.len()];
        let mut touched = vec![false; ids.len()];
        let mut dangling = 0;

        for edge in snapshot.edges() {
            let from = position.get(&edge.source).copied();
            let to = position.get(&edge.target).copied();

            // The endpoint that does exist still counts as touched.
            for slot in [from, to].into_iter().flatten() {
                touched[slot] = true;
            }
            match (from, to) {
                (Some(from), Some(to)) => successors[from].push(to),
                _ => dangling += 1,
            }
        }

        Self {
            ids,
            successors,
            touched,
            dangling,
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }
}
