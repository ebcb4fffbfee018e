//! Core types, component kinds, and the canvas document model for Tapestry.
//!
//! This crate provides the foundational types shared by every other tapestry crate:
//! - Property values and node geometry
//! - Component kind descriptors and their configuration schemas
//! - The canvas document tree and its structural queries
//! - Error types

pub mod document;
pub mod errors;
pub mod kind;
pub mod types;
pub mod variant;

pub use document::*;
pub use errors::*;
pub use kind::*;
pub use types::*;
pub use variant::*;
