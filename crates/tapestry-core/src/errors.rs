//! Error types for the document model.

use crate::types::NodeId;
use std::fmt;
use thiserror::Error;

/// Result type alias for document model operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised by the document model and catalog lookups.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    #[error("Unknown component kind: {kind}")]
    UnknownKind { kind: String },

    #[error("Node not found: {id}")]
    NodeNotFound { id: NodeId },

    #[error("Invalid document: {}", format_issues(.issues))]
    InvalidDocument { issues: Vec<DocumentIssue> },

    #[error("Malformed document JSON: {message}")]
    Malformed { message: String },
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Malformed {
            message: err.to_string(),
        }
    }
}

/// A single structural problem found while validating a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentIssue {
    /// Two or more nodes share this id.
    DuplicateId(NodeId),
    /// A node of the given kind has an empty id.
    EmptyId { kind: String },
    /// The node with this id has an empty kind reference.
    EmptyKind(NodeId),
}

impl fmt::Display for DocumentIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateId(id) => write!(f, "duplicate node id '{}'", id),
            Self::EmptyId { kind } => write!(f, "node of kind '{}' has an empty id", kind),
            Self::EmptyKind(id) => write!(f, "node '{}' has an empty kind", id),
        }
    }
}

fn format_issues(issues: &[DocumentIssue]) -> String {
    issues
        .iter()
        .map(|issue| issue.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_document_message_lists_issues() {
        let err = CoreError::InvalidDocument {
            issues: vec![
                DocumentIssue::DuplicateId(NodeId::from("a")),
                DocumentIssue::EmptyKind(NodeId::from("b")),
            ],
        };
        assert_eq!(
            err.to_string(),
            "Invalid document: duplicate node id 'a'; node 'b' has an empty kind"
        );
    }
}
