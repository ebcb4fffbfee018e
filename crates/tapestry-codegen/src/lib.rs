//! Source generation from Tapestry documents.
//!
//! A [`Generator`] turns a validated [`Document`] snapshot into a flat list of
//! files for one target platform, together with the packages the project
//! needs and the commands to run it.
//!
//! # Targets
//!
//! - `react-native` - Expo project in JavaScript
//! - `react-native-ts` - Expo project in TypeScript
//! - `flutter` - Flutter project
//!
//! # Example
//!
//! ```ignore
//! use tapestry_codegen::{GenerateOptions, Generator, TargetFormat};
//!
//! let generator = Generator::new(Arc::new(Catalog::builtin()))?;
//! let output = generator.generate(&document, &GenerateOptions::for_target(TargetFormat::Flutter))?;
//! output.write_to(Path::new("out"))?;
//! ```
//!
//! [`Document`]: tapestry_core::Document

pub mod error;
pub mod generators;
pub mod options;
pub mod output;
pub mod props;
pub mod style;

pub use error::{CodegenError, Result};
pub use generators::{style_ident, CodeGenerator, FlutterGenerator, Generator, ReactNativeGenerator, TemplateEngine};
pub use options::{GenerateOptions, TargetFormat};
pub use output::{DegradeReason, Dependency, FileKind, GeneratedFile, GenerationOutput, GenerationWarning};
pub use props::Props;
pub use style::{StyleBlock, StyleValue};
