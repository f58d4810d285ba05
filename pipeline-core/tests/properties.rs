//! Property-Based Tests
//!
//! Random edit sequences against the store, checked against the invariants
//! the validator and store promise for every snapshot.

use std::collections::{HashMap, VecDeque};

use proptest::prelude::*;

use pipeline_core::graph::{
    Edge, EdgeId, GraphSnapshot, GraphStore, Node, NodeCategory, NodeId, Position, Selection,
};
use pipeline_core::validate::validate;
use pipeline_core::RejectedMutation;

#[derive(Debug, Clone)]
enum Op {
    AddNode,
    RemoveNode(u64),
    AddEdge(u64, u64),
    RemoveEdge(u64),
    RemoveSelection(Vec<u64>, Vec<u64>),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::AddNode),
        1 => (1u64..12).prop_map(Op::RemoveNode),
        4 => (1u64..12, 1u64..12).prop_map(|(s, t)| Op::AddEdge(s, t)),
        1 => (1u64..20).prop_map(Op::RemoveEdge),
        1 => (
            prop::collection::vec(1u64..12, 0..3),
            prop::collection::vec(1u64..20, 0..3)
        )
            .prop_map(|(n, e)| Op::RemoveSelection(n, e)),
    ]
}

fn run(ops: &[Op]) -> GraphStore {
    let mut store = GraphStore::new();
    for op in ops {
        match op {
            Op::AddNode => {
                store.add_node("n", NodeCategory::Processing);
            }
            Op::RemoveNode(id) => {
                store.remove_node(NodeId::from(*id));
            }
            Op::AddEdge(s, t) => {
                let _ = store.add_edge(NodeId::from(*s), NodeId::from(*t));
            }
            Op::RemoveEdge(id) => {
                store.remove_edge(EdgeId::from(*id));
            }
            Op::RemoveSelection(nodes, edges) => {
                let selection = Selection::of(
                    nodes.iter().copied().map(NodeId::from),
                    edges.iter().copied().map(EdgeId::from),
                );
                store.remove_selection(&selection);
            }
        }
    }
    store
}

/// Whether Kahn's algorithm leaves some nodes unsorted. Edges with a missing
/// endpoint are ignored.
fn kahn_finds_cycle(snapshot: &GraphSnapshot) -> bool {
    let mut in_degree: HashMap<NodeId, usize> =
        snapshot.nodes().iter().map(|n| (n.id, 0)).collect();
    let mut successors: HashMap<NodeId, Vec<NodeId>> = HashMap::new();

    for edge in snapshot.edges() {
        if !in_degree.contains_key(&edge.source) || !in_degree.contains_key(&edge.target) {
            continue;
        }
        successors.entry(edge.source).or_default().push(edge.target);
        *in_degree.entry(edge.target).or_default() += 1;
    }

    let mut ready: VecDeque<NodeId> = in_degree
        .iter()
        .filter(|(_, degree)| **degree == 0)
        .map(|(id, _)| *id)
        .collect();
    let mut sorted = 0;

    while let Some(id) = ready.pop_front() {
        sorted += 1;
        for next in successors.get(&id).into_iter().flatten() {
            if let Some(degree) = in_degree.get_mut(next) {
                *degree -= 1;
                if *degree == 0 {
                    ready.push_back(*next);
                }
            }
        }
    }

    sorted < in_degree.len()
}

prop_compose! {
    /// Arbitrary snapshots, including self-loops and dangling edges.
    fn arb_snapshot()(
        count in 0u64..10,
        pairs in prop::collection::vec((1u64..12, 1u64..12), 0..20)
    ) -> GraphSnapshot {
        let nodes = (1..=count)
            .map(|i| Node::new(NodeId::from(i), "n", NodeCategory::Processing, Position::default()))
            .collect();
        let edges = pairs
            .into_iter()
            .enumerate()
            .map(|(i, (s, t))| Edge::new(EdgeId::from(i as u64), NodeId::from(s), NodeId::from(t)))
            .collect();
        GraphSnapshot::new(nodes, edges)
    }
}

proptest! {
    /// Property: Validation is deterministic
    #[test]
    fn validation_is_deterministic(snapshot in arb_snapshot()) {
        prop_assert_eq!(validate(&snapshot), validate(&snapshot.clone()));
    }

    /// Property: Store snapshots never contain self-loops or dangling edges
    #[test]
    fn store_keeps_referential_integrity(ops in prop::collection::vec(arb_op(), 0..60)) {
        let store = run(&ops);
        let snapshot = store.snapshot();
        let report = validate(&snapshot);

        prop_assert_eq!(report.dangling_edges, 0);
        for edge in snapshot.edges() {
            prop_assert!(!edge.is_self_loop());
            prop_assert!(store.contains_node(edge.source));
            prop_assert!(store.contains_node(edge.target));
        }
    }

    /// Property: Removing a node leaves no edge touching it
    #[test]
    fn remove_node_cascades(ops in prop::collection::vec(arb_op(), 0..60), victim in 1u64..12) {
        let mut store = run(&ops);
        let victim = NodeId::from(victim);
        store.remove_node(victim);

        prop_assert!(store.edges().all(|e| !e.touches(victim)));
    }

    /// Property: Self-loops are always rejected and never stored
    #[test]
    fn self_loop_always_rejected(ops in prop::collection::vec(arb_op(), 0..40), node in 1u64..20) {
        let mut store = run(&ops);
        let before = store.edge_count();
        let node = NodeId::from(node);

        prop_assert_eq!(store.add_edge(node, node), Err(RejectedMutation::SelfLoop { node }));
        prop_assert_eq!(store.edge_count(), before);
    }

    /// Property: The validity flag is the conjunction of the three rules
    #[test]
    fn validity_is_conjunction(snapshot in arb_snapshot()) {
        let report = validate(&snapshot);
        prop_assert_eq!(
            report.is_valid_dag,
            report.has_minimum_nodes && report.no_cycles && report.all_nodes_connected
        );
        prop_assert_eq!(report.is_valid_dag, report.violations().is_empty());
        prop_assert_eq!(report.no_cycles, report.cycle.is_none());
    }

    /// Property: A reported cycle is a real closed walk in the snapshot
    #[test]
    fn cycle_witness_is_a_closed_walk(snapshot in arb_snapshot()) {
        if let Some(cycle) = validate(&snapshot).cycle {
            prop_assert!(cycle.len() >= 2);
            prop_assert_eq!(cycle.first(), cycle.last());
            for step in cycle.windows(2) {
                prop_assert!(snapshot
                    .edges()
                    .iter()
                    .any(|e| e.source == step[0] && e.target == step[1]));
            }
        }
    }

    /// Property: A cycle is reported exactly when a topological sort fails
    #[test]
    fn cycle_detection_agrees_with_topological_sort(snapshot in arb_snapshot()) {
        prop_assert_eq!(!validate(&snapshot).no_cycles, kahn_finds_cycle(&snapshot));
    }
}
