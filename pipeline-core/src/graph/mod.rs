//! Pipeline Graph
//!
//! This module holds the canonical graph state of an editing session.
//!
//! # Overview
//!
//! A pipeline is a directed graph where:
//!
//! - Nodes are typed pipeline stages (data sources, processing steps, outputs)
//! - Edges are directed connections: an edge from A to B means data flows
//!   from A into B
//!
//! The `GraphStore` is the only writer. Every mutation leaves the graph
//! referentially intact, and callers read it through immutable
//! `GraphSnapshot`s which the validator consumes.
//!
//! # Design Decisions
//!
//! 1. Ids are opaque and allocated by the store, never by callers, so an id
//!    always names at most one node or edge over a session's lifetime.
//!
//! 2. Positions live on the node record for serialization, but nothing in
//!    the validity engine reads them.

mod edge;
mod node;
mod selection;
mod snapshot;
mod store;

pub use edge::{Edge, EdgeId};
pub use node::{Node, NodeCategory, NodeId, Position};
pub use selection::Selection;
pub use snapshot::GraphSnapshot;
pub use store::{GraphStore, MAX_LOADED_ID, Removal};

use thiserror::Error;

/// A textual id did not have the expected `<prefix><number>` form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid id {input:?}: expected {prefix}<number>")]
pub struct IdParseError {
    input: String,
    prefix: &'static str,
}

fn parse_prefixed(s: &str, prefix: &'static str) -> Result<u64, IdParseError> {
    s.strip_prefix(prefix)
        .and_then(|digits| digits.parse().ok())
        .ok_or_else(|| IdParseError {
            input: s.to_string(),
            prefix,
        })
}
