//! Virtual tree errors
//!
//! Every error here is a builder contract violation. They are raised by the
//! append that detects them and the tree is left as it was before that call.

use crate::{NodeId, NodeType};

/// Result type for virtual tree operations
pub type Result<T> = std::result::Result<T, VDomError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VDomError {
    /// Structural content appended to a value-bearing element
    #[error("Invalid child: <{tag}> only accepts text, got {child:?}")]
    InvalidChild { tag: String, child: NodeType },

    /// Append past the declared final child count
    #[error("Arity mismatch on {node:?}: expected exactly {expected} children")]
    ArityMismatch { node: NodeId, expected: usize },

    /// Child already linked under a parent
    #[error("Node {0:?} is already attached")]
    AlreadyAttached(NodeId),

    /// Node appended to itself
    #[error("Node {0:?} cannot be its own child")]
    HierarchyRequest(NodeId),

    #[error("Unknown node {0:?}")]
    UnknownNode(NodeId),

    #[error("Node {0:?} is not an element")]
    NotAnElement(NodeId),
}
