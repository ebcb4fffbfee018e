//! Error types for code generation.

use std::path::PathBuf;
use tapestry_core::CoreError;
use thiserror::Error;

/// Result type alias for codegen operations.
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Errors that can occur during code generation.
///
/// Unknown kinds and odd property values never produce an error; they are
/// reported as [`GenerationWarning`](crate::GenerationWarning)s instead.
#[derive(Error, Debug)]
pub enum CodegenError {
    /// The document failed structural validation.
    #[error("Invalid document: {0}")]
    InvalidDocument(#[from] CoreError),

    /// Unrecognized target name.
    #[error("Unknown target '{0}' (expected react-native, react-native-ts or flutter)")]
    UnknownTarget(String),

    /// Template rendering error.
    #[error("Template error: {0}")]
    TemplateError(#[from] handlebars::RenderError),

    /// Invalid template.
    #[error("Invalid template: {0}")]
    InvalidTemplate(#[from] handlebars::TemplateError),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing generated files failed.
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
