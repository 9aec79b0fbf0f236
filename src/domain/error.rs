//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::arena::NodeId;

/// Domain errors represent violations of the tree's structural invariants.
/// These are independent of rendering and configuration concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("node {0} already has children")]
    NotALeaf(NodeId),

    #[error("node id already in use: {0}")]
    DuplicateNode(NodeId),

    #[error("cannot grow {existing} nodes by {requested}: limit is {limit}")]
    TooLarge {
        existing: usize,
        requested: usize,
        limit: usize,
    },
}

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, TreeError>;
