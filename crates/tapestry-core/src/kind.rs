//! Component kinds and their configuration schemas.
//!
//! A [`ComponentKind`] is the catalog entry for one placeable UI element. It
//! carries the default property set copied into every new node and the
//! ordered list of fields the inspector exposes for editing.

use crate::types::{PropertyValue, Size};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Palette grouping. Has no effect on behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Layout,
    Input,
    Display,
    Navigation,
    Media,
}

impl Category {
    /// All categories in palette order.
    pub const ALL: [Category; 5] = [
        Category::Layout,
        Category::Input,
        Category::Display,
        Category::Navigation,
        Category::Media,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Layout => "Layout",
            Self::Input => "Input",
            Self::Display => "Display",
            Self::Navigation => "Navigation",
            Self::Media => "Media",
        }
    }
}

/// Editor control used for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Textarea,
    Number,
    Color,
    Boolean,
    Select,
    Slider,
}

impl FieldType {
    /// Whether a stored value has the shape this field expects.
    pub fn accepts(&self, value: &PropertyValue, constraints: &Constraints) -> bool {
        match self {
            Self::Text | Self::Textarea => matches!(value, PropertyValue::Text(_)),
            Self::Number | Self::Slider => value.as_number().is_some(),
            Self::Boolean => value.as_bool().is_some(),
            Self::Color => value.as_color().is_some(),
            Self::Select => match value {
                PropertyValue::Choice(s) | PropertyValue::Text(s) => constraints.allows(s),
                _ => false,
            },
        }
    }
}

/// One entry of a select field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Bounds and choices attached to a field.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Constraints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
}

impl Constraints {
    /// Clamp a number into `[min, max]`.
    pub fn clamp(&self, value: f64) -> f64 {
        let value = match self.min {
            Some(min) if value < min => min,
            _ => value,
        };
        match self.max {
            Some(max) if value > max => max,
            _ => value,
        }
    }

    /// Whether a select value is one of the listed options.
    ///
    /// A field with no options accepts anything.
    pub fn allows(&self, value: &str) -> bool {
        self.options.is_empty() || self.options.iter().any(|o| o.value == value)
    }
}

/// Declarative description of one editable property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub key: String,
    pub label: String,
    pub field_type: FieldType,
    pub default_value: PropertyValue,
    #[serde(default)]
    pub constraints: Constraints,
}

impl FieldDescriptor {
    /// Whether a stored value can be used as-is for this field.
    pub fn accepts(&self, value: &PropertyValue) -> bool {
        self.field_type.accepts(value, &self.constraints)
    }
}

/// A catalog entry: one placeable type of UI element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentKind {
    pub id: String,
    pub label: String,
    pub category: Category,
    /// Whether nodes of this kind accept children.
    #[serde(default)]
    pub container: bool,
    pub default_properties: IndexMap<String, PropertyValue>,
    pub config_schema: Vec<FieldDescriptor>,
    #[serde(default)]
    pub default_size: Size,
}

impl ComponentKind {
    /// Look up a schema field by key.
    pub fn field(&self, key: &str) -> Option<&FieldDescriptor> {
        self.config_schema.iter().find(|f| f.key == key)
    }

    /// Default for a property: the kind's default map first, then the schema.
    pub fn default_for(&self, key: &str) -> Option<&PropertyValue> {
        self.default_properties
            .get(key)
            .or_else(|| self.field(key).map(|f| &f.default_value))
    }
}
