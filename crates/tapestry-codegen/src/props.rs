//! Typed property access with schema-default fallback.
//!
//! A node may carry a missing, transient (e.g. `""` in a number field) or
//! mistyped value. Getters fall back to the kind's default, then to the
//! caller's fallback, so emission never fails on property content.

use tapestry_core::{is_color_literal, CanvasNode, ComponentKind, FieldType, PropertyValue};

#[derive(Debug, Clone, Copy)]
pub struct Props<'a> {
    node: &'a CanvasNode,
    kind: Option<&'a ComponentKind>,
}

impl<'a> Props<'a> {
    pub fn new(node: &'a CanvasNode, kind: Option<&'a ComponentKind>) -> Self {
        Self { node, kind }
    }

    fn resolve<T>(&self, key: &str, extract: impl Fn(&'a PropertyValue) -> Option<T>) -> Option<T> {
        self.node
            .property(key)
            .and_then(&extract)
            .or_else(|| self.kind.and_then(|k| k.default_for(key)).and_then(&extract))
    }

    pub fn text(&self, key: &str) -> &'a str {
        self.resolve(key, PropertyValue::as_str).unwrap_or("")
    }

    pub fn number(&self, key: &str) -> f64 {
        self.resolve(key, PropertyValue::as_number).unwrap_or(0.0)
    }

    /// Positive number, for sizes that must not collapse.
    pub fn positive(&self, key: &str, fallback: f64) -> f64 {
        self.resolve(key, |v| v.as_number().filter(|n| *n > 0.0))
            .unwrap_or(fallback)
    }

    pub fn flag(&self, key: &str) -> bool {
        self.resolve(key, PropertyValue::as_bool).unwrap_or(false)
    }

    /// A valid color literal, or `transparent`.
    pub fn color(&self, key: &str) -> &'a str {
        self.resolve(key, |v| v.as_color().filter(|c| is_color_literal(c)))
            .unwrap_or("transparent")
    }

    /// A select value that is one of the field's options.
    pub fn choice(&self, key: &str) -> &'a str {
        let field = self.kind.and_then(|k| k.field(key));
        self.resolve(key, |v| {
            v.as_str()
                .filter(|s| field.map_or(true, |f| f.constraints.allows(s)))
        })
        .unwrap_or("")
    }

    /// Non-empty values of the kind's text fields, in schema order.
    pub fn labels(&self) -> Vec<&'a str> {
        let Some(kind) = self.kind else {
            return Vec::new();
        };
        kind.config_schema
            .iter()
            .filter(|f| matches!(f.field_type, FieldType::Text | FieldType::Textarea))
            .map(|f| self.text(&f.key))
            .filter(|t| !t.trim().is_empty())
            .collect()
    }

    /// Non-empty trimmed lines of a multi-line text field.
    pub fn lines(&self, key: &str) -> Vec<&'a str> {
        self.text(key)
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect()
    }
}
