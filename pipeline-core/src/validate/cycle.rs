//! Cycle Detection
//!
//! Depth-first search from every unvisited node, tracking which nodes are on
//! the current path separately from which have ever been visited. An edge
//! into a node still on the path is a back-edge and closes a cycle.
//!
//! The traversal uses an explicit stack rather than recursion so that long
//! chains cannot overflow the call stack. It stops at the first cycle.

use super::index::GraphIndex;
use crate::graph::NodeId;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    /// On the current DFS path.
    OnPath,
    Done,
}

/// Find one cycle, returned as a closed path whose first and last entries
/// are the same node. Returns `None` for acyclic graphs.
pub(crate) fn find_cycle(index: &GraphIndex) -> Option<Vec<NodeId>> {
    let mut marks = vec![Mark::Unvisited; index.len()];
    // (node, next successor to examine)
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for root in 0..index.len() {
        if marks[root] != Mark::Unvisited {
            continue;
        }
        marks[root] = Mark::OnPath;
        stack.push((root, 0));

        while let Some(frame) = stack.last_mut() {
            let (node, cursor) = *frame;
            let Some(&next) = index.successors[node].get(cursor) else {
                marks[node] = Mark::Done;
                stack.pop();
                continue;
            };
            frame.1 += 1;

            match marks[next] {
                Mark::Unvisited => {
                    marks[next] = Mark::OnPath;
                    stack.push((next, 0));
                }
                Mark::OnPath => return Some(witness(index, &stack, next)),
                Mark::Done => {}
            }
        }
    }

    None
}

/// Cut the current path at `entry` and close it.
fn witness(index: &GraphIndex, stack: &[(usize, usize)], entry: usize) -> Vec<NodeId> {
    let start = stack
        .iter()
        .position(|&(node, _)| node == entry)
        .unwrap_or(0);
    let mut cycle: Vec<NodeId> = stack[start..]
        .iter()
        .map(|&(node, _)| index.ids[node])
        .collect();
    cycle.push(index.ids[entry]);
    cycle
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, EdgeId, GraphSnapshot, Node, NodeCategory, Position};

    fn graph(nodes: u64, edges: &[(u64, u64)]) -> GraphIndex {
        let nodes = (1..=nodes)
            .map(|i| {
                Node::new(
                    NodeId::from(i),
                    format!("n{i}"),
                    NodeCategory::Processing,
                    Position::default(),
                )
            })
            .collect();
        let edges = edges
            .iter()
            .enumerate()
            .map(|(i, &(s, t))| {
                Edge::new(EdgeId::from(i as u64 + 1), NodeId::from(s), NodeId::from(t))
            })
            .collect();
        GraphIndex::build(&GraphSnapshot::new(nodes, edges))
    }

    fn ids(raw: &[u64]) -> Vec<NodeId> {
        raw.iter().copied().map(NodeId::from).collect()
    }

    #[test]
    fn empty_graph_has_no_cycle() {
        assert_eq!(find_cycle(&graph(0, &[])), None);
    }

    #[test]
    fn triangle_cycle_is_reported_closed() {
        let cycle = find_cycle(&graph(3, &[(1, 2), (2, 3), (3, 1)]));
        assert_eq!(cycle, Some(ids(&[1, 2, 3, 1])));
    }

    #[test]
    fn diamond_is_acyclic() {
        // Node 4 is reached twice; the second visit is a cross edge.
        let index = graph(4, &[(1, 2), (1, 3), (2, 4), (3, 4)]);
        assert_eq!(find_cycle(&index), None);
    }

    #[test]
    fn witness_excludes_the_lead_in() {
        let cycle = find_cycle(&graph(4, &[(1, 2), (2, 3), (3, 4), (4, 2)]));
        assert_eq!(cycle, Some(ids(&[2, 3, 4, 2])));
    }

    #[test]
    fn injected_self_loop_is_a_cycle() {
        let cycle = find_cycle(&graph(1, &[(1, 1)]));
        assert_eq!(cycle, Some(ids(&[1, 1])));
    }

    #[test]
    fn cycle_in_later_component_is_found() {
        let index = graph(5, &[(1, 2), (3, 4), (4, 5), (5, 3)]);
        assert_eq!(find_cycle(&index), Some(ids(&[3, 4, 5, 3])));
    }

    #[test]
    fn long_chain_does_not_overflow() {
        let edges: Vec<_> = (1..20_000).map(|i| (i, i + 1)).collect();
        assert_eq!(find_cycle(&graph(20_000, &edges)), None);
    }
}
