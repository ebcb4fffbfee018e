//! Generation results.

use crate::error::{CodegenError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tapestry_core::NodeId;

/// Role of a generated file in the bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    /// The generated screen.
    Screen,
    /// A stylesheet split out of the screen.
    Style,
    /// App entry point wiring the screen.
    Component,
    /// Package manifest or app configuration.
    Config,
}

/// A generated file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFile {
    /// Path relative to the project root, always with `/` separators.
    pub path: String,
    pub content: String,
    pub kind: FileKind,
}

impl GeneratedFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>, kind: FileKind) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            kind,
        }
    }
}

/// A package the generated project needs.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Dependency {
    pub name: String,
    pub version: String,
}

/// Why a node was emitted in degraded form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegradeReason {
    /// The kind is not in the catalog; a placeholder was emitted.
    UnknownKind,
    /// The kind does not accept children; they were skipped.
    ChildrenIgnored,
}

/// A node that could not be emitted faithfully.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationWarning {
    pub node_id: NodeId,
    pub kind: String,
    pub reason: DegradeReason,
}

impl fmt::Display for GenerationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            DegradeReason::UnknownKind => write!(
                f,
                "node '{}' has unknown kind '{}' and was emitted as a placeholder",
                self.node_id, self.kind
            ),
            DegradeReason::ChildrenIgnored => write!(
                f,
                "children of node '{}' were skipped: kind '{}' is not a container",
                self.node_id, self.kind
            ),
        }
    }
}

/// Everything one generation run produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationOutput {
    pub files: Vec<GeneratedFile>,
    /// Sorted by name.
    pub dependencies: Vec<Dependency>,
    /// Shell steps to run the project.
    pub instructions: Vec<String>,
    pub warnings: Vec<GenerationWarning>,
}

impl GenerationOutput {
    pub fn file(&self, path: &str) -> Option<&GeneratedFile> {
        self.files.iter().find(|f| f.path == path)
    }

    pub fn files_of(&self, kind: FileKind) -> impl Iterator<Item = &GeneratedFile> {
        self.files.iter().filter(move |f| f.kind == kind)
    }

    /// The screen file. Every bundle has exactly one.
    pub fn screen(&self) -> Option<&GeneratedFile> {
        self.files_of(FileKind::Screen).next()
    }

    /// Write every file below `root`, creating directories as needed.
    pub fn write_to(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(self.files.len());
        for file in &self.files {
            let path = file
                .path
                .split('/')
                .fold(root.to_path_buf(), |acc, part| acc.join(part));
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|source| CodegenError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
            fs::write(&path, &file.content).map_err(|source| CodegenError::Io {
                path: path.clone(),
                source,
            })?;
            written.push(path);
        }
        Ok(written)
    }
}
