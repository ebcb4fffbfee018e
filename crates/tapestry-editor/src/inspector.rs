//! Property inspector binding: schema-driven fields for the selected node.

use crate::engine::MutationEngine;
use crate::error::{EditorError, Result};
use regex::Regex;
use std::sync::{Arc, OnceLock};
use tapestry_catalog::Catalog;
use tapestry_core::{CanvasNode, FieldDescriptor, FieldType, NodeId, PropertyValue};
use tracing::debug;

/// One editable field with the value the control should show.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub descriptor: FieldDescriptor,
    pub value: PropertyValue,
}

/// Maps nodes to editable fields and routes edits through the engine.
#[derive(Debug, Clone)]
pub struct Inspector {
    catalog: Arc<Catalog>,
}

impl Inspector {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// Fields for a node in schema order. Empty when there is no node or its
    /// kind is unknown. Missing properties show the schema default.
    pub fn fields_for(&self, node: Option<&CanvasNode>) -> Vec<Field> {
        let Some(node) = node else {
            return Vec::new();
        };
        self.catalog
            .schema_for(&node.kind)
            .iter()
            .map(|descriptor| Field {
                descriptor: descriptor.clone(),
                value: node
                    .property(&descriptor.key)
                    .cloned()
                    .unwrap_or_else(|| descriptor.default_value.clone()),
            })
            .collect()
    }

    /// Coerce raw control input for `key` and patch it onto the node.
    ///
    /// Returns `Ok(false)` without touching the document when `key` is not in
    /// the node's schema.
    pub fn edit(
        &self,
        engine: &mut MutationEngine,
        node_id: &NodeId,
        key: &str,
        raw: &str,
    ) -> Result<bool> {
        let Some(descriptor) = self.descriptor(engine, node_id, key)? else {
            return Ok(false);
        };
        engine.patch_properties(node_id, [(key, coerce(&descriptor, raw))])?;
        Ok(true)
    }

    /// Patch an already typed value, as sent by toggles and color pickers.
    pub fn edit_value(
        &self,
        engine: &mut MutationEngine,
        node_id: &NodeId,
        key: &str,
        value: PropertyValue,
    ) -> Result<bool> {
        if self.descriptor(engine, node_id, key)?.is_none() {
            return Ok(false);
        }
        engine.patch_properties(node_id, [(key, value)])?;
        Ok(true)
    }

    fn descriptor(
        &self,
        engine: &MutationEngine,
        node_id: &NodeId,
        key: &str,
    ) -> Result<Option<FieldDescriptor>> {
        let node = engine
            .document()
            .find_node(node_id)
            .ok_or_else(|| EditorError::node_not_found(node_id))?;
        let descriptor = self
            .catalog
            .get(&node.kind)
            .and_then(|kind| kind.field(key))
            .cloned();
        if descriptor.is_none() {
            debug!(node = %node_id, key, "Ignoring edit of field outside schema");
        }
        Ok(descriptor)
    }
}

fn color_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^#?([0-9a-fA-F]{3}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$").unwrap()
    })
}

/// Turn raw control input into a typed value for `descriptor`.
///
/// Input that does not parse is kept as `Text` so a half-typed edit survives
/// until it becomes valid; code generation falls back to the schema default
/// for it in the meantime.
pub fn coerce(descriptor: &FieldDescriptor, raw: &str) -> PropertyValue {
    let trimmed = raw.trim();
    match descriptor.field_type {
        FieldType::Text | FieldType::Textarea => PropertyValue::Text(raw.to_string()),
        FieldType::Number | FieldType::Slider => match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => PropertyValue::Number(descriptor.constraints.clamp(n)),
            _ => PropertyValue::Text(raw.to_string()),
        },
        FieldType::Boolean => match trimmed.to_ascii_lowercase().as_str() {
            "true" | "1" | "on" | "yes" => PropertyValue::Bool(true),
            "false" | "0" | "off" | "no" => PropertyValue::Bool(false),
            _ => PropertyValue::Text(raw.to_string()),
        },
        FieldType::Color => {
            if trimmed.eq_ignore_ascii_case("transparent") {
                PropertyValue::color("transparent")
            } else if color_pattern().is_match(trimmed) {
                let hex = trimmed.trim_start_matches('#').to_ascii_lowercase();
                PropertyValue::Color(format!("#{}", hex))
            } else {
                PropertyValue::Text(raw.to_string())
            }
        }
        FieldType::Select => {
            if descriptor.constraints.allows(trimmed) {
                PropertyValue::choice(trimmed)
            } else {
                PropertyValue::Text(raw.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Placement;
    use crate::ids::SequentialIds;
    use tapestry_catalog::kinds;

    fn setup() -> (MutationEngine, Inspector) {
        let catalog = Arc::new(Catalog::builtin());
        let engine = MutationEngine::with_ids(catalog.clone(), SequentialIds::default());
        (engine, Inspector::new(catalog))
    }

    fn field(kind: &str, key: &str) -> FieldDescriptor {
        Catalog::builtin()
            .get(kind)
            .and_then(|k| k.field(key))
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_fields_follow_schema_with_defaults() {
        let (mut engine, inspector) = setup();
        let id = engine.insert(kinds::BUTTON, Placement::End).unwrap();
        engine
            .patch_properties(&id, [("text", PropertyValue::text("Simpan"))])
            .unwrap();

        let fields = inspector.fields_for(engine.document().find_node(&id));
        let schema = engine.catalog().schema_for(kinds::BUTTON);
        assert_eq!(fields.len(), schema.len());
        assert_eq!(fields[0].descriptor.key, "text");
        assert_eq!(fields[0].value, PropertyValue::text("Simpan"));
    }

    #[test]
    fn test_missing_property_shows_default() {
        let (_, inspector) = setup();
        let node = CanvasNode::new("a", kinds::BUTTON);
        let fields = inspector.fields_for(Some(&node));
        let color = fields
            .iter()
            .find(|f| f.descriptor.key == "backgroundColor")
            .unwrap();
        assert_eq!(color.value.as_color(), Some("#2563eb"));
    }

    #[test]
    fn test_no_node_or_unknown_kind_has_no_fields() {
        let (_, inspector) = setup();
        assert!(inspector.fields_for(None).is_empty());
        assert!(inspector
            .fields_for(Some(&CanvasNode::new("a", "carousel")))
            .is_empty());
    }

    #[test]
    fn test_coerce_numbers_clamp() {
        let radius = field(kinds::BUTTON, "borderRadius");
        let max = radius.constraints.max.unwrap();
        assert_eq!(coerce(&radius, "12"), PropertyValue::Number(12.0));
        assert_eq!(coerce(&radius, "100000"), PropertyValue::Number(max));
        assert_eq!(coerce(&radius, "-5"), PropertyValue::Number(radius.constraints.min.unwrap()));
        assert_eq!(coerce(&radius, ""), PropertyValue::text(""));
        assert_eq!(coerce(&radius, "1e"), PropertyValue::text("1e"));
    }

    #[test]
    fn test_coerce_booleans_and_colors() {
        let disabled = field(kinds::BUTTON, "disabled");
        assert_eq!(coerce(&disabled, "On"), PropertyValue::Bool(true));
        assert_eq!(coerce(&disabled, "0"), PropertyValue::Bool(false));
        assert_eq!(coerce(&disabled, "maybe"), PropertyValue::text("maybe"));

        let color = field(kinds::BUTTON, "backgroundColor");
        assert_eq!(coerce(&color, "#FFF"), PropertyValue::color("#fff"));
        assert_eq!(coerce(&color, "2563EB"), PropertyValue::color("#2563eb"));
        assert_eq!(coerce(&color, "#12"), PropertyValue::text("#12"));
    }

    #[test]
    fn test_coerce_select_accepts_listed_options() {
        let variant = field(kinds::BUTTON, "variant");
        assert_eq!(coerce(&variant, "outline"), PropertyValue::choice("outline"));
        assert_eq!(coerce(&variant, "neon"), PropertyValue::text("neon"));
    }

    #[test]
    fn test_edit_patches_through_engine() {
        let (mut engine, inspector) = setup();
        let id = engine.insert(kinds::BUTTON, Placement::End).unwrap();

        assert!(inspector.edit(&mut engine, &id, "fontSize", "18").unwrap());
        let node = engine.document().find_node(&id).unwrap();
        assert_eq!(node.property("fontSize"), Some(&PropertyValue::Number(18.0)));
        assert!(engine.can_undo());
    }

    #[test]
    fn test_edit_outside_schema_is_ignored() {
        let (mut engine, inspector) = setup();
        let id = engine.insert(kinds::TEXT, Placement::End).unwrap();
        let before = engine.document().clone();

        assert!(!inspector.edit(&mut engine, &id, "bogus", "1").unwrap());
        assert_eq!(engine.document(), &before);
        assert!(inspector
            .edit(&mut engine, &NodeId::from("ghost"), "text", "x")
            .unwrap_err()
            .is_node_not_found());
    }

    #[test]
    fn test_edit_value_toggles_boolean() {
        let (mut engine, inspector) = setup();
        let id = engine.insert(kinds::SWITCH, Placement::End).unwrap();
        assert!(inspector
            .edit_value(&mut engine, &id, "value", PropertyValue::Bool(true))
            .unwrap());
        let node = engine.document().find_node(&id).unwrap();
        assert_eq!(node.property("value").and_then(|v| v.as_bool()), Some(true));
    }
}
