//! Interactive editing for Tapestry documents.
//!
//! The [`MutationEngine`] is the single writer of a [`Document`]: palette
//! inserts, drag reorders, duplicates, deletes, and property patches all go
//! through it. Drag gestures are modeled by [`DragState`] so the engine can be
//! driven without any pointer events. The [`Inspector`] maps a node's schema to
//! editable fields and routes edits back into the engine.
//!
//! [`Document`]: tapestry_core::Document

pub mod drag;
pub mod engine;
pub mod error;
pub mod history;
pub mod ids;
pub mod inspector;
pub mod store;

pub use drag::{DragState, DropAction, DropTarget};
pub use engine::{MutationEngine, Placement, DEFAULT_HISTORY_CAPACITY, DUPLICATE_OFFSET, STACK_STEP};
pub use error::{EditorError, Result};
pub use history::History;
pub use ids::{IdSource, RandomIds, SequentialIds};
pub use inspector::{coerce, Field, Inspector};
pub use store::{DirectoryStore, DocumentId, DocumentStore, MemoryStore, StoreError, StoredTemplate};
