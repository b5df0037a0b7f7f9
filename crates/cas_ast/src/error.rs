//! Error types for cas_ast crate.

use crate::expression::NodeId;
use thiserror::Error;

/// Errors raised by structural edits on a [`Tree`](crate::Tree).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AstError {
    /// The root is the tree's only entry point and is never swapped out
    #[error("the root node cannot be replaced")]
    RootReplacement,

    /// The node has no parent slot to re-point
    #[error("node {0} is not attached to the tree")]
    Detached(NodeId),

    /// A replacement must be a fresh subtree, not one hanging elsewhere
    #[error("node {0} is already attached to a parent")]
    AlreadyAttached(NodeId),

    /// The replacement is an ancestor of the slot it would fill
    #[error("placing node {node} there would make it its own ancestor")]
    WouldCycle { node: NodeId },

    /// Internal invariant violation
    #[error("internal error: {0}")]
    InternalError(String),
}

/// Helper macro for invariant assertions in cas_ast.
/// In debug: uses debug_assert!
/// In release: returns Err(AstError::InternalError) if condition fails.
#[macro_export]
macro_rules! ensure_ast_invariant {
    ($cond:expr, $msg:literal $(, $args:expr)* $(,)?) => {
        if cfg!(debug_assertions) {
            debug_assert!($cond, $msg $(, $args)*);
        }
        if !$cond {
            return Err($crate::error::AstError::InternalError(format!($msg $(, $args)*)));
        }
    };
}
