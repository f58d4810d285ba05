//! DAG Validation
//!
//! This module decides whether a graph snapshot is a legal pipeline and, if
//! it is not, which rule it breaks.
//!
//! # Rules
//!
//! A snapshot is a valid pipeline when all of the following hold:
//!
//! 1. It has at least the minimum number of nodes (two by default).
//! 2. It contains no directed cycle.
//! 3. Every node is an endpoint of at least one edge. With fewer than two
//!    nodes this holds vacuously.
//!
//! # Algorithm
//!
//! Validation is recomputed from scratch on every call:
//!
//! 1. Index the snapshot: map node ids to dense slots and build adjacency
//!    lists, setting aside edges whose endpoints are missing
//! 2. Run a depth-first search for a back-edge (`cycle`)
//! 3. Collect nodes no edge touches (`coverage`)
//!
//! Both passes are O(V + E). The validator holds no state between calls, so
//! the same snapshot always yields the same report.

mod coverage;
mod cycle;
mod index;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::EditorConfig;
use crate::graph::{GraphSnapshot, NodeId};
use index::GraphIndex;

/// A broken pipeline rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Violation {
    /// Fewer nodes than the configured minimum.
    TooFewNodes,
    /// At least one node touches no edge.
    IsolatedNodes,
    /// The graph contains a directed cycle.
    CycleDetected,
}

/// The outcome of validating one snapshot.
///
/// Serializes with the field names the status panel reads
/// (`nodeCount`, `isValidDAG`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub node_count: usize,
    pub edge_count: usize,
    pub has_minimum_nodes: bool,
    pub no_cycles: bool,
    pub all_nodes_connected: bool,
    #[serde(rename = "isValidDAG")]
    pub is_valid_dag: bool,

    /// Nodes that no edge touches. Empty when the coverage rule is vacuous.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub isolated_nodes: Vec<NodeId>,

    /// The first cycle found, as a closed path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cycle: Option<Vec<NodeId>>,

    /// Edges with an endpoint missing from the snapshot. Always zero for
    /// snapshots taken from a `GraphStore`.
    #[serde(default)]
    pub dangling_edges: usize,
}

impl ValidationReport {
    /// The rules this snapshot breaks, in the order the status panel lists
    /// them.
    pub fn violations(&self) -> Vec<Violation> {
        let mut violations = Vec::new();
        if !self.has_minimum_nodes {
            violations.push(Violation::TooFewNodes);
        }
        if !self.all_nodes_connected {
            violations.push(Violation::IsolatedNodes);
        }
        if !self.no_cycles {
            violations.push(Violation::CycleDetected);
        }
        violations
    }
}

/// Validates snapshots against the pipeline rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DagValidator {
    min_nodes: usize,
}

impl DagValidator {
    /// Below this many nodes the coverage rule holds vacuously.
    const COVERAGE_THRESHOLD: usize = 2;

    /// No pipeline is valid with fewer nodes than this.
    pub const FLOOR: usize = 2;

    /// Create a validator. Minimums below [`Self::FLOOR`] are raised to it.
    pub fn new(min_nodes: usize) -> Self {
        Self {
            min_nodes: min_nodes.max(Self::FLOOR),
        }
    }

    pub fn from_config(config: &EditorConfig) -> Self {
        Self::new(config.min_nodes)
    }

    pub fn min_nodes(&self) -> usize {
        self.min_nodes
    }

    /// Validate a snapshot.
    pub fn validate(&self, snapshot: &GraphSnapshot) -> ValidationReport {
        let index = GraphIndex::build(snapshot);
        let node_count = snapshot.node_count();

        let cycle = cycle::find_cycle(&index);
        let isolated_nodes = if node_count >= Self::COVERAGE_THRESHOLD {
            coverage::isolated_nodes(&index)
        } else {
            Vec::new()
        };

        let has_minimum_nodes = node_count >= self.min_nodes;
        let no_cycles = cycle.is_none();
        let all_nodes_connected = isolated_nodes.is_empty();

        let report = ValidationReport {
            node_count,
            edge_count: snapshot.edge_count(),
            has_minimum_nodes,
            no_cycles,
            all_nodes_connected,
            is_valid_dag: has_minimum_nodes && no_cycles && all_nodes_connected,
            isolated_nodes,
            cycle,
            dangling_edges: index.dangling,
        };

        trace!(
            nodes = report.node_count,
            edges = report.edge_count,
            valid = report.is_valid_dag,
            dangling = report.dangling_edges,
            "validated snapshot"
        );
        report
    }
}

impl Default for DagValidator {
    fn default() -> Self {
        Self::new(EditorConfig::default().min_nodes)
    }
}

/// Validate a snapshot with the default rules.
pub fn validate(snapshot: &GraphSnapshot) -> ValidationReport {
    DagValidator::default().validate(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, EdgeId, Node, NodeCategory, Position};

    fn node(id: u64) -> Node {
        Node::new(NodeId::from(id), format!("n{id}"), NodeCategory::Processing, Position::default())
    }

    fn snapshot(nodes: &[u64], edges: &[(u64, u64)]) -> GraphSnapshot {
        GraphSnapshot::new(
            nodes.iter().copied().map(node).collect(),
            edges
                .iter()
                .enumerate()
                .map(|(i, &(s, t))| {
                    Edge::new(EdgeId::from(i as u64 + 1), NodeId::from(s), NodeId::from(t))
                })
                .collect(),
        )
    }

    #[test]
    fn empty_graph_is_invalid_but_acyclic() {
        let report = validate(&GraphSnapshot::default());

        assert_eq!(report.node_count, 0);
        assert!(!report.has_minimum_nodes);
        assert!(report.no_cycles);
        assert!(report.all_nodes_connected);
        assert!(!report.is_valid_dag);
        assert_eq!(report.violations(), vec![Violation::TooFewNodes]);
    }

    #[test]
    fn single_node_fails_minimum_only() {
        let report = validate(&snapshot(&[1], &[]));

        assert!(!report.has_minimum_nodes);
        assert!(report.all_nodes_connected);
        assert!(report.isolated_nodes.is_empty());
        assert!(!report.is_valid_dag);
    }

    #[test]
    fn triangle_has_cycle() {
        let report = validate(&snapshot(&[1, 2, 3], &[(1, 2), (2, 3), (3, 1)]));

        assert!(!report.no_cycles);
        assert!(report.all_nodes_connected);
        assert!(!report.is_valid_dag);
        assert_eq!(report.violations(), vec![Violation::CycleDetected]);
    }

    #[test]
    fn chain_is_valid() {
        let report = validate(&snapshot(&[1, 2, 3], &[(1, 2), (2, 3)]));

        assert!(report.no_cycles);
        assert!(report.is_valid_dag);
        assert!(report.violations().is_empty());
        assert_eq!(report.cycle, None);
    }

    #[test]
    fn isolated_node_is_named() {
        let report = validate(&snapshot(&[1, 2, 3], &[(1, 2)]));

        assert!(!report.all_nodes_connected);
        assert_eq!(report.isolated_nodes, vec![NodeId::from(3)]);
        assert_eq!(report.violations(), vec![Violation::IsolatedNodes]);
    }

    #[test]
    fn disjoint_pairs_satisfy_coverage() {
        let report = validate(&snapshot(&[1, 2, 3, 4], &[(1, 2), (3, 4)]));
        assert!(report.all_nodes_connected);
        assert!(report.is_valid_dag);
    }

    #[test]
    fn violations_keep_panel_order() {
        let report = validate(&snapshot(&[1, 2, 3], &[(1, 2), (2, 1)]));
        assert_eq!(
            report.violations(),
            vec![Violation::IsolatedNodes, Violation::CycleDetected]
        );
    }

    #[test]
    fn dangling_endpoints_are_ignored() {
        // Edge 2 -> 9 names a node that is not in the snapshot.
        let report = validate(&snapshot(&[1, 2], &[(1, 2), (2, 9)]));

        assert_eq!(report.dangling_edges, 1);
        assert_eq!(report.edge_count, 2);
        assert!(report.no_cycles);
        assert!(report.is_valid_dag);
    }

    #[test]
    fn dangling_edge_does_not_cover_the_missing_side() {
        let report = validate(&snapshot(&[1, 2], &[(1, 9)]));

        assert_eq!(report.isolated_nodes, vec![NodeId::from(2)]);
        assert!(!report.all_nodes_connected);
    }

    #[test]
    fn injected_self_loop_fails_acyclicity() {
        let report = validate(&snapshot(&[1, 2], &[(1, 2), (2, 2)]));
        assert!(!report.no_cycles);
        assert_eq!(report.cycle, Some(vec![NodeId::from(2), NodeId::from(2)]));
    }

    #[test]
    fn custom_minimum() {
        let validator = DagValidator::new(3);
        let report = validator.validate(&snapshot(&[1, 2], &[(1, 2)]));

        assert!(!report.has_minimum_nodes);
        assert!(!report.is_valid_dag);
    }

    #[test]
    fn minimum_never_drops_below_two() {
        for min_nodes in [0, 1] {
            let validator = DagValidator::new(min_nodes);
            assert_eq!(validator.min_nodes(), 2);

            for report in [
                validator.validate(&GraphSnapshot::default()),
                validator.validate(&snapshot(&[1], &[])),
            ] {
                assert!(!report.has_minimum_nodes);
                assert!(!report.is_valid_dag);
            }
        }
    }

    #[test]
    fn configured_zero_minimum_is_raised() {
        let config = EditorConfig::from_json(r#"{"min_nodes": 0}"#).unwrap();
        let report = DagValidator::from_config(&config).validate(&GraphSnapshot::default());

        assert!(!report.has_minimum_nodes);
        assert!(!report.is_valid_dag);
    }

    #[test]
    fn validation_is_idempotent() {
        let snap = snapshot(&[1, 2, 3, 4], &[(1, 2), (2, 3), (3, 1), (4, 1)]);
        assert_eq!(validate(&snap), validate(&snap));
    }

    #[test]
    fn report_serializes_panel_fields() {
        let report = validate(&snapshot(&[1, 2], &[(1, 2)]));
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["nodeCount"], 2);
        assert_eq!(value["edgeCount"], 1);
        assert_eq!(value["hasMinimumNodes"], true);
        assert_eq!(value["noCycles"], true);
        assert_eq!(value["allNodesConnected"], true);
        assert_eq!(value["isValidDAG"], true);
        assert!(value.get("cycle").is_none());
    }
}
