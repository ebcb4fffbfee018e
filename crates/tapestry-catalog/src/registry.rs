//! Catalog registry for storing and looking up component kinds.

use indexmap::IndexMap;
use tapestry_core::{
    Category, ComponentKind, Constraints, CoreError, Dimension, FieldDescriptor, FieldType,
    NodeId, CanvasNode, PropertyValue, SelectOption, Size,
};
use tracing::warn;

/// A registry of component kinds, in registration order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    kinds: IndexMap<String, ComponentKind>,
}

impl Catalog {
    /// Create a new empty catalog.
    pub fn new() -> Self {
        Self {
            kinds: IndexMap::new(),
        }
    }

    /// Register a kind. A later registration with the same id replaces the
    /// earlier one but keeps its palette position.
    pub fn register(&mut self, kind: ComponentKind) {
        if self.kinds.contains_key(&kind.id) {
            warn!(kind = %kind.id, "replacing already registered component kind");
        }
        self.kinds.insert(kind.id.clone(), kind);
    }

    /// All kinds in registration order.
    pub fn list(&self) -> impl Iterator<Item = &ComponentKind> {
        self.kinds.values()
    }

    /// Get a kind by id.
    pub fn get(&self, kind_id: &str) -> Option<&ComponentKind> {
        self.kinds.get(kind_id)
    }

    /// Check if a kind exists.
    pub fn contains(&self, kind_id: &str) -> bool {
        self.kinds.contains_key(kind_id)
    }

    /// Schema fields for a kind. Unknown kinds have no fields.
    pub fn schema_for(&self, kind_id: &str) -> &[FieldDescriptor] {
        self.get(kind_id)
            .map(|k| k.config_schema.as_slice())
            .unwrap_or(&[])
    }

    /// Kinds of one category, for palette grouping.
    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &ComponentKind> {
        self.kinds.values().filter(move |k| k.category == category)
    }

    /// Create a node of `kind_id` with a copy of its defaults.
    pub fn instantiate(&self, kind_id: &str, id: NodeId) -> Result<CanvasNode, CoreError> {
        self.get(kind_id)
            .map(|kind| CanvasNode::from_kind(kind, id))
            .ok_or_else(|| CoreError::UnknownKind {
                kind: kind_id.to_string(),
            })
    }

    /// Number of registered kinds.
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

/// Builder for creating component kinds.
///
/// Every field method records both the schema descriptor and the default
/// value, so defaults and schema cannot drift apart.
pub struct KindBuilder {
    id: String,
    label: String,
    category: Category,
    container: bool,
    defaults: IndexMap<String, PropertyValue>,
    schema: Vec<FieldDescriptor>,
    size: Size,
}

impl KindBuilder {
    /// Create a new kind builder.
    pub fn new(id: &str, label: &str, category: Category) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            category,
            container: false,
            defaults: IndexMap::new(),
            schema: Vec::new(),
            size: Size::default(),
        }
    }

    /// Accept child nodes.
    pub fn container(mut self) -> Self {
        self.container = true;
        self
    }

    /// Set the default size.
    pub fn size(mut self, width: Dimension, height: Dimension) -> Self {
        self.size = Size::new(width, height);
        self
    }

    /// Add a single-line text field.
    pub fn text(self, key: &str, label: &str, default: &str) -> Self {
        self.field(key, label, FieldType::Text, PropertyValue::text(default), Constraints::default())
    }

    /// Add a multi-line text field.
    pub fn textarea(self, key: &str, label: &str, default: &str) -> Self {
        self.field(
            key,
            label,
            FieldType::Textarea,
            PropertyValue::text(default),
            Constraints::default(),
        )
    }

    /// Add a free numeric field bounded by `min..=max`.
    pub fn number(self, key: &str, label: &str, default: f64, min: f64, max: f64) -> Self {
        self.field(
            key,
            label,
            FieldType::Number,
            PropertyValue::Number(default),
            Constraints {
                min: Some(min),
                max: Some(max),
                ..Default::default()
            },
        )
    }

    /// Add a slider.
    pub fn slider(self, key: &str, label: &str, default: f64, min: f64, max: f64, step: f64) -> Self {
        self.field(
            key,
            label,
            FieldType::Slider,
            PropertyValue::Number(default),
            Constraints {
                min: Some(min),
                max: Some(max),
                step: Some(step),
                options: Vec::new(),
            },
        )
    }

    /// Add a color picker.
    pub fn color(self, key: &str, label: &str, default: &str) -> Self {
        self.field(key, label, FieldType::Color, PropertyValue::color(default), Constraints::default())
    }

    /// Add a toggle.
    pub fn boolean(self, key: &str, label: &str, default: bool) -> Self {
        self.field(key, label, FieldType::Boolean, PropertyValue::Bool(default), Constraints::default())
    }

    /// Add a select with `(value, label)` options.
    pub fn select(self, key: &str, label: &str, default: &str, options: &[(&str, &str)]) -> Self {
        self.field(
            key,
            label,
            FieldType::Select,
            PropertyValue::choice(default),
            Constraints {
                options: options
                    .iter()
                    .map(|(value, label)| SelectOption::new(*value, *label))
                    .collect(),
                ..Default::default()
            },
        )
    }

    fn field(
        mut self,
        key: &str,
        label: &str,
        field_type: FieldType,
        default_value: PropertyValue,
        constraints: Constraints,
    ) -> Self {
        self.defaults.insert(key.to_string(), default_value.clone());
        self.schema.push(FieldDescriptor {
            key: key.to_string(),
            label: label.to_string(),
            field_type,
            default_value,
            constraints,
        });
        self
    }

    /// Build the component kind.
    pub fn build(self) -> ComponentKind {
        ComponentKind {
            id: self.id,
            label: self.label,
            category: self.category,
            container: self.container,
            default_properties: self.defaults,
            config_schema: self.schema,
            default_size: self.size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_new() {
        let catalog = Catalog::new();
        assert!(catalog.is_empty());
        assert!(catalog.schema_for("button").is_empty());
    }

    #[test]
    fn test_catalog_register() {
        let mut catalog = Catalog::new();
        let kind = KindBuilder::new("chip", "Chip", Category::Display)
            .text("text", "Text", "Chip")
            .build();

        catalog.register(kind);
        assert!(catalog.contains("chip"));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_reregister_keeps_position() {
        let mut catalog = Catalog::new();
        catalog.register(KindBuilder::new("a", "A", Category::Layout).build());
        catalog.register(KindBuilder::new("b", "B", Category::Layout).build());
        catalog.register(KindBuilder::new("a", "A2", Category::Media).build());

        let ids: Vec<_> = catalog.list().map(|k| (k.id.as_str(), k.label.as_str())).collect();
        assert_eq!(ids, vec![("a", "A2"), ("b", "B")]);
    }

    #[test]
    fn test_kind_builder_records_defaults_and_schema() {
        let kind = KindBuilder::new("stepper", "Stepper", Category::Input)
            .slider("value", "Value", 3.0, 0.0, 10.0, 1.0)
            .select("tone", "Tone", "calm", &[("calm", "Calm"), ("loud", "Loud")])
            .container()
            .build();

        assert!(kind.container);
        assert_eq!(kind.config_schema.len(), 2);
        assert_eq!(kind.default_properties.get("value"), Some(&PropertyValue::Number(3.0)));
        let tone = kind.field("tone").unwrap();
        assert_eq!(tone.field_type, FieldType::Select);
        assert_eq!(tone.constraints.options.len(), 2);
    }

    #[test]
    fn test_instantiate_copies_defaults() {
        let mut catalog = Catalog::new();
        catalog.register(
            KindBuilder::new("chip", "Chip", Category::Display)
                .text("text", "Text", "Chip")
                .build(),
        );

        let mut node = catalog.instantiate("chip", NodeId::from("n1")).unwrap();
        node.properties.insert("text".to_string(), PropertyValue::text("Changed"));

        let kind = catalog.get("chip").unwrap();
        assert_eq!(kind.default_properties.get("text"), Some(&PropertyValue::text("Chip")));

        let err = catalog.instantiate("carousel", NodeId::from("n2")).unwrap_err();
        assert_eq!(
            err,
            CoreError::UnknownKind {
                kind: "carousel".to_string()
            }
        );
    }
}
