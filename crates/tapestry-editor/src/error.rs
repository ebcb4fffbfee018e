//! Error types for editing operations.

use tapestry_core::{CoreError, NodeId};
use thiserror::Error;

/// Result type alias for editor operations.
pub type Result<T> = std::result::Result<T, EditorError>;

/// Errors reported by the mutation engine.
///
/// None of these leave the document modified: a failed operation is a no-op.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    /// Catalog miss, stale node id, or invalid document.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Drag gesture event that does not fit the current state.
    #[error("Cannot {action} while {state}")]
    InvalidTransition { action: &'static str, state: String },

    /// Attempt to move a node into its own subtree.
    #[error("Cannot move node '{node}' relative to '{target}', which is inside it")]
    InvalidMove { node: NodeId, target: NodeId },

    /// Drop into a node whose kind does not accept children.
    #[error("Node '{id}' of kind '{kind}' does not accept children")]
    NotAContainer { id: NodeId, kind: String },
}

impl EditorError {
    pub(crate) fn node_not_found(id: &NodeId) -> Self {
        EditorError::Core(CoreError::NodeNotFound { id: id.clone() })
    }

    pub(crate) fn unknown_kind(kind: &str) -> Self {
        EditorError::Core(CoreError::UnknownKind {
            kind: kind.to_string(),
        })
    }

    /// Whether this error is a stale node reference.
    pub fn is_node_not_found(&self) -> bool {
        matches!(self, EditorError::Core(CoreError::NodeNotFound { .. }))
    }

    /// Whether this error is a catalog miss.
    pub fn is_unknown_kind(&self) -> bool {
        matches!(self, EditorError::Core(CoreError::UnknownKind { .. }))
    }
}
