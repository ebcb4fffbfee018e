//! Component catalog for the Tapestry screen builder.
//!
//! The catalog is the instruction set of the builder: every placeable kind,
//! its default properties, and the schema the inspector edits. It is built
//! once and then shared read-only by the editor and the code generator.
//!
//! # Example
//!
//! ```
//! use tapestry_catalog::{Catalog, kinds};
//!
//! let catalog = Catalog::builtin();
//! let button = catalog.get(kinds::BUTTON).unwrap();
//! assert_eq!(button.default_for("text").and_then(|v| v.as_str()), Some("Button"));
//! ```

mod builtin;
mod registry;

pub use builtin::kinds;
pub use registry::{Catalog, KindBuilder};
