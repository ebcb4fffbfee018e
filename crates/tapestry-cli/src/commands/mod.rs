//! Subcommand handlers.

pub mod catalog;
pub mod generate;
pub mod new;
pub mod template;

pub use catalog::CatalogArgs;
pub use generate::GenerateArgs;
pub use new::NewArgs;
pub use template::TemplateArgs;

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tapestry_core::Document;

/// Read and validate a document JSON file.
pub fn read_document(path: &Path) -> Result<Document> {
    let json = fs::read_to_string(path).with_context(|| format!("Failed to read document: {}", path.display()))?;
    Document::from_json(&json).with_context(|| format!("Invalid document: {}", path.display()))
}

pub fn write_document(path: &Path, document: &Document) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    let json = document.to_json().context("Failed to serialize document")?;
    fs::write(path, json + "\n").with_context(|| format!("Failed to write document: {}", path.display()))
}
