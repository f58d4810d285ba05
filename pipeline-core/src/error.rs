//! Error Types
//!
//! Every failure in the core is local and recoverable. Mutations that are
//! refused leave the graph exactly as it was, and the caller receives one of
//! the structured outcomes below instead of a panic.

use thiserror::Error;

use crate::graph::{EdgeId, NodeId};

/// A mutation the store refused to apply.
///
/// Returned instead of an id from `GraphStore::add_edge`. No state changes
/// when this is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectedMutation {
    /// The edge would connect a node to itself.
    #[error("cannot connect node {node} to itself")]
    SelfLoop { node: NodeId },

    /// An edge endpoint does not exist in the store.
    #[error("node {node} does not exist")]
    UnknownNode { node: NodeId },

    /// An edge between the same ordered pair already exists and the store
    /// is configured to reject parallel edges.
    #[error("an edge from {from} to {to} already exists")]
    DuplicateEdge { from: NodeId, to: NodeId },
}

/// Errors raised when rebuilding a store from an externally sourced snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("duplicate node id {0}")]
    DuplicateNode(NodeId),

    #[error("duplicate edge id {0}")]
    DuplicateEdge(EdgeId),

    #[error("edge {edge} connects node {node} to itself")]
    SelfLoop { edge: EdgeId, node: NodeId },

    #[error("edge {edge} references missing node {node}")]
    DanglingEdge { edge: EdgeId, node: NodeId },

    #[error("edge {edge} duplicates an existing connection")]
    ParallelEdge { edge: EdgeId },

    /// A loaded id is too large for the session counter to continue past it.
    #[error("node id {0} is out of range")]
    NodeIdOutOfRange(NodeId),

    #[error("edge id {0} is out of range")]
    EdgeIdOutOfRange(EdgeId),
}

/// Errors crossing the serialization boundary.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("MessagePack encode error: {0}")]
    Encode(#[from] rmp_serde::encode::Error),

    #[error("MessagePack decode error: {0}")]
    Decode(#[from] rmp_serde::decode::Error),

    #[error(transparent)]
    Load(#[from] LoadError),
}

/// Errors surfaced by editor commands.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    /// Node labels must contain something other than whitespace.
    #[error("node label must not be empty")]
    EmptyLabel,

    #[error(transparent)]
    Rejected(#[from] RejectedMutation),
}
