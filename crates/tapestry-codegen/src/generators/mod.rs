//! Code generators for mobile targets.

mod flutter;
mod react_native;
mod templates;

pub use flutter::FlutterGenerator;
pub use react_native::ReactNativeGenerator;
pub use templates::TemplateEngine;

use crate::error::Result;
use crate::options::{GenerateOptions, TargetFormat};
use crate::output::{DegradeReason, Dependency, FileKind, GenerationOutput, GenerationWarning};
use crate::props::Props;
use crate::style::{self, StyleBlock};
use regex::Regex;
use std::collections::{BTreeSet, HashSet};
use std::sync::{Arc, OnceLock};
use tapestry_catalog::Catalog;
use tapestry_core::{CanvasNode, ComponentKind, Document};
use tracing::{debug, warn};

/// Common trait for code generators.
pub trait CodeGenerator: Send + Sync {
    /// Target this generator emits.
    fn target(&self) -> TargetFormat;

    /// Target framework name.
    fn framework_name(&self) -> &'static str;

    /// Emit the full bundle for an already validated document.
    fn emit(&self, document: &Document, options: &GenerateOptions) -> Result<GenerationOutput>;
}

/// Entry point: validates, dispatches on target, post-processes.
pub struct Generator {
    react_native: ReactNativeGenerator,
    react_native_ts: ReactNativeGenerator,
    flutter: FlutterGenerator,
}

impl Generator {
    pub fn new(catalog: Arc<Catalog>) -> Result<Self> {
        Ok(Self {
            react_native: ReactNativeGenerator::new(catalog.clone())?,
            react_native_ts: ReactNativeGenerator::typescript(catalog.clone())?,
            flutter: FlutterGenerator::new(catalog)?,
        })
    }

    pub fn for_target(&self, target: TargetFormat) -> &dyn CodeGenerator {
        match target {
            TargetFormat::ReactNative => &self.react_native,
            TargetFormat::ReactNativeTs => &self.react_native_ts,
            TargetFormat::Flutter => &self.flutter,
        }
    }

    /// Generate a source bundle. Fails only on an invalid document.
    pub fn generate(&self, document: &Document, options: &GenerateOptions) -> Result<GenerationOutput> {
        document.validate()?;
        debug!(
            target = %options.target,
            nodes = document.len(),
            separate_stylesheet = options.separate_stylesheet,
            "Starting generation"
        );

        let mut output = self.for_target(options.target).emit(document, options)?;
        if options.minify {
            minify_output(&mut output)?;
        }
        for warning in &output.warnings {
            warn!(node = %warning.node_id, kind = %warning.kind, "{}", warning);
        }
        debug!(files = output.files.len(), warnings = output.warnings.len(), "Generation finished");
        Ok(output)
    }
}

/// Optional capabilities a screen pulls in; each maps to packages per target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) enum Feature {
    Icons,
    Haptics,
    KeyboardAware,
    NetworkImage,
}

/// A node entered during the pre-order walk.
pub(crate) struct Entered<'n> {
    pub ident: String,
    pub props: Props<'n>,
    /// The catalog entry; `None` means a placeholder must be emitted.
    pub kind: Option<&'n ComponentKind>,
}

/// Walk state shared by the emitters.
pub(crate) struct EmitContext<'a> {
    catalog: &'a Catalog,
    pub styles: Vec<StyleBlock>,
    pub warnings: Vec<GenerationWarning>,
    pub features: BTreeSet<Feature>,
    idents: HashSet<String>,
}

impl<'a> EmitContext<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            styles: Vec::new(),
            warnings: Vec::new(),
            features: BTreeSet::new(),
            idents: HashSet::new(),
        }
    }

    pub fn use_feature(&mut self, feature: Feature) {
        self.features.insert(feature);
    }

    /// Resolve a node and record its style block. Must be called before the
    /// node's children so blocks come out in pre-order.
    pub fn enter<'n>(&mut self, node: &'n CanvasNode) -> Entered<'n>
    where
        'a: 'n,
    {
        let kind: Option<&'n ComponentKind> = self.catalog.get(&node.kind);
        let props = Props::new(node, kind);
        let decls = match kind {
            Some(k) => style::synthesize(&node.kind, &props).unwrap_or_else(|| style::generic(k, &props)),
            None => {
                self.degrade(node, DegradeReason::UnknownKind);
                style::placeholder()
            }
        };
        if kind.map_or(false, |k| !k.container) && !node.children.is_empty() {
            self.degrade(node, DegradeReason::ChildrenIgnored);
        }

        let ident = self.unique_ident(&node.kind, node.id.as_str());
        self.styles.push(StyleBlock {
            ident: ident.clone(),
            decls,
        });
        Entered { ident, props, kind }
    }

    fn degrade(&mut self, node: &CanvasNode, reason: DegradeReason) {
        self.warnings.push(GenerationWarning {
            node_id: node.id.clone(),
            kind: node.kind.clone(),
            reason,
        });
    }

    fn unique_ident(&mut self, kind: &str, id: &str) -> String {
        let base = style_ident(kind, id);
        let mut ident = base.clone();
        let mut n = 2;
        while !self.idents.insert(ident.clone()) {
            ident = format!("{}_{}", base, n);
            n += 1;
        }
        ident
    }
}

fn non_ident_chars() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[^A-Za-z0-9_]").unwrap())
}

/// Deterministic style identifier `<kind>_<id>`, safe in JS and Dart.
pub fn style_ident(kind: &str, id: &str) -> String {
    let raw = format!("{}_{}", kind, id);
    let ident = non_ident_chars().replace_all(&raw, "_").into_owned();
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{}", ident)
    } else {
        ident
    }
}

pub(crate) fn pad(depth: usize) -> String {
    "  ".repeat(depth)
}

/// Resolve package names against a version table.
pub(crate) fn pinned(names: &BTreeSet<&str>, versions: &[(&str, &str)]) -> Vec<Dependency> {
    names
        .iter()
        .map(|name| Dependency {
            name: name.to_string(),
            version: versions
                .iter()
                .find(|(n, _)| n == name)
                .map_or("*", |(_, v)| v)
                .to_string(),
        })
        .collect()
}

/// Strip indentation, blank lines and whole-line `//` comments.
pub(crate) fn minify_code(content: &str) -> String {
    let mut out: String = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("//"))
        .collect::<Vec<_>>()
        .join("\n");
    out.push('\n');
    out
}

fn minify_output(output: &mut GenerationOutput) -> Result<()> {
    for file in &mut output.files {
        match file.kind {
            FileKind::Config if file.path.ends_with(".json") => {
                let value: serde_json::Value = serde_json::from_str(&file.content)?;
                file.content = value.to_string();
            }
            FileKind::Config => {}
            FileKind::Screen | FileKind::Style | FileKind::Component => {
                file.content = minify_code(&file.content);
            }
        }
    }
    Ok(())
}
