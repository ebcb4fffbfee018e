//! Saved documents ("templates").
//!
//! The store treats a document as an opaque blob: it serializes on save and
//! validates on load, nothing more.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tapestry_core::{CoreError, Document};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

/// Errors from a document store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("No saved document with id '{0}'")]
    NotFound(DocumentId),

    #[error("Invalid document id '{0}': only letters, digits, '-' and '_' are allowed")]
    InvalidId(DocumentId),

    #[error("Stored document is invalid: {0}")]
    Invalid(#[from] CoreError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Identifier handed out by [`DocumentStore::save`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(pub String);

impl DocumentId {
    fn generate() -> Self {
        DocumentId(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the id is a single path component with no separators or dots.
    pub fn is_valid(&self) -> bool {
        !self.0.is_empty()
            && self
                .0
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(s: &str) -> Self {
        DocumentId(s.to_string())
    }
}

/// Listing entry for a saved document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredTemplate {
    pub id: DocumentId,
    pub name: String,
    pub nodes: usize,
}

/// Blob store for documents.
pub trait DocumentStore {
    /// Save under a display name. Every save gets a new id.
    fn save(&mut self, name: &str, document: &Document) -> Result<DocumentId, StoreError>;

    /// Load and validate a saved document.
    fn load(&self, id: &DocumentId) -> Result<Document, StoreError>;

    /// All saved documents.
    fn list(&self) -> Result<Vec<StoredTemplate>, StoreError>;
}

#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    name: String,
    document: Document,
}

impl Envelope {
    fn summary(&self, id: DocumentId) -> StoredTemplate {
        StoredTemplate {
            id,
            name: self.name.clone(),
            nodes: self.document.len(),
        }
    }
}

/// Volatile store, mostly for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: IndexMap<DocumentId, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn envelope(&self, id: &DocumentId) -> Result<Envelope, StoreError> {
        let json = self
            .entries
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        Ok(serde_json::from_str(json)?)
    }
}

impl DocumentStore for MemoryStore {
    fn save(&mut self, name: &str, document: &Document) -> Result<DocumentId, StoreError> {
        let id = DocumentId::generate();
        let envelope = Envelope {
            name: name.to_string(),
            document: document.clone(),
        };
        self.entries.insert(id.clone(), serde_json::to_string(&envelope)?);
        Ok(id)
    }

    fn load(&self, id: &DocumentId) -> Result<Document, StoreError> {
        let envelope = self.envelope(id)?;
        envelope.document.validate()?;
        Ok(envelope.document)
    }

    fn list(&self) -> Result<Vec<StoredTemplate>, StoreError> {
        self.entries
            .keys()
            .map(|id| Ok(self.envelope(id)?.summary(id.clone())))
            .collect()
    }
}

/// One pretty-printed JSON file per document, named `<id>.json`.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    /// Store rooted at `root`. The directory is created on first save.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, id: &DocumentId) -> Result<PathBuf, StoreError> {
        if !id.is_valid() {
            return Err(StoreError::InvalidId(id.clone()));
        }
        Ok(self.root.join(format!("{}.json", id)))
    }

    fn read_envelope(&self, path: &Path) -> Result<Envelope, StoreError> {
        let json = fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&json)?)
    }
}

impl DocumentStore for DirectoryStore {
    fn save(&mut self, name: &str, document: &Document) -> Result<DocumentId, StoreError> {
        fs::create_dir_all(&self.root).map_err(|source| StoreError::Io {
            path: self.root.clone(),
            source,
        })?;
        let id = DocumentId::generate();
        let path = self.path_for(&id)?;
        let envelope = Envelope {
            name: name.to_string(),
            document: document.clone(),
        };
        fs::write(&path, serde_json::to_string_pretty(&envelope)?).map_err(|source| {
            StoreError::Io {
                path: path.clone(),
                source,
            }
        })?;
        debug!(id = %id, path = %path.display(), "Saved document");
        Ok(id)
    }

    fn load(&self, id: &DocumentId) -> Result<Document, StoreError> {
        let path = self.path_for(id)?;
        if !path.is_file() {
            return Err(StoreError::NotFound(id.clone()));
        }
        let envelope = self.read_envelope(&path)?;
        envelope.document.validate()?;
        Ok(envelope.document)
    }

    fn list(&self) -> Result<Vec<StoredTemplate>, StoreError> {
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }
        let entries = fs::read_dir(&self.root).map_err(|source| StoreError::Io {
            path: self.root.clone(),
            source,
        })?;

        let mut templates = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|source| StoreError::Io {
                    path: self.root.clone(),
                    source,
                })?
                .path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let id = DocumentId::from(stem);
            templates.push(self.read_envelope(&path)?.summary(id));
        }
        templates.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(templates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tapestry_core::CanvasNode;
    use tempfile::TempDir;

    fn sample() -> Document {
        let mut doc = Document::new("Login");
        doc.nodes.push(
            CanvasNode::new("card", "card").with_child(CanvasNode::new("button", "button")),
        );
        doc
    }

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        let id = store.save("Login", &sample()).unwrap();
        assert_eq!(store.load(&id).unwrap(), sample());

        let listed = store.list().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Login");
        assert_eq!(listed[0].nodes, 2);
    }

    #[test]
    fn test_saves_get_distinct_ids() {
        let mut store = MemoryStore::new();
        let a = store.save("x", &sample()).unwrap();
        let b = store.save("x", &sample()).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_missing_id_is_not_found() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.load(&DocumentId::from("nope")),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_directory_store_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut store = DirectoryStore::new(dir.path().join("templates"));
        assert!(store.list().unwrap().is_empty());

        let id = store.save("Login", &sample()).unwrap();
        assert!(dir.path().join("templates").join(format!("{}.json", id)).is_file());
        assert_eq!(store.load(&id).unwrap(), sample());

        let listed = store.list().unwrap();
        assert_eq!(listed[0].id, id);
        assert_eq!(listed[0].name, "Login");
    }

    #[test]
    fn test_directory_store_rejects_invalid_document() {
        let dir = TempDir::new().unwrap();
        let store = DirectoryStore::new(dir.path());
        let json = r#"{"name":"dup","document":{"name":"dup","nodes":[
            {"id":"a","kind":"text"},{"id":"a","kind":"text"}]}}"#;
        std::fs::write(dir.path().join("bad.json"), json).unwrap();

        let err = store.load(&DocumentId::from("bad")).unwrap_err();
        assert!(matches!(err, StoreError::Invalid(CoreError::InvalidDocument { .. })));
    }

    #[test]
    fn test_directory_store_rejects_ids_with_separators() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("templates");
        let mut store = DirectoryStore::new(&root);
        store.save("Login", &sample()).unwrap();
        let outside = serde_json::json!({ "name": "Secret", "document": sample() });
        std::fs::write(dir.path().join("secret.json"), outside.to_string()).unwrap();

        for id in ["../secret", "..", "a/b", "a\\b", ""] {
            let err = store.load(&DocumentId::from(id)).unwrap_err();
            assert!(matches!(err, StoreError::InvalidId(_)), "{:?} gave {:?}", id, err);
        }
        assert!(DocumentId::generate().is_valid());
    }
}
