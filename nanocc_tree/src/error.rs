//! Result and errors.
use crate::NodeId;
use thiserror::Error;

pub type TreeResult<T> = std::result::Result<T, TreeError>;

/// Violations of the tree's structural invariants.
///
/// Every mutating operation checks its preconditions before touching
/// the arena, so a returned error means the tree is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("tree already has a root")]
    RootExists,

    #[error("node {0} already exists in the tree")]
    AlreadyMember(NodeId),

    /// The node was never allocated by this tree, or has been removed.
    #[error("node {0} is not part of the tree")]
    NotMember(NodeId),

    #[error("parent node {0} is not in the tree")]
    ParentNotFound(NodeId),

    #[error("node {node} is an ancestor of {parent}")]
    Cycle { node: NodeId, parent: NodeId },
}
