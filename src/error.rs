//! Error taxonomy for tree navigation and handle use.

use thiserror::Error;

/// Errors surfaced by tree operations.
///
/// Every error is reported synchronously to the caller of the offending
/// operation; the tree is never left partially mutated. Nothing is
/// logged, retried, or suppressed internally.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("child index {index} out of range for node with {len} children")]
    ChildOutOfRange { index: usize, len: usize },

    #[error("root node has no parent")]
    RootHasNoParent,

    #[error("stale handle: node no longer exists in this tree")]
    StaleHandle,

    #[error("foreign handle: minted by a different tree")]
    ForeignHandle,
}

pub type TreeResult<T> = Result<T, TreeError>;
