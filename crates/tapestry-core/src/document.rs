//! Canvas document model.
//!
//! A [`Document`] is an ordered forest of [`CanvasNode`] values describing one
//! screen. Parents own their children; there are no back-references, so every
//! lookup goes through the node id.

use crate::errors::{CoreError, DocumentIssue, Result};
use crate::kind::ComponentKind;
use crate::types::{NodeId, Position, PropertyValue, Size};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A placed instance of a component kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasNode {
    pub id: NodeId,
    /// Catalog kind id. Re-resolved against the catalog on every use.
    pub kind: String,
    #[serde(default)]
    pub properties: IndexMap<String, PropertyValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<CanvasNode>,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub size: Size,
}

impl CanvasNode {
    /// Create a bare node with no properties.
    pub fn new(id: impl Into<NodeId>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            properties: IndexMap::new(),
            children: Vec::new(),
            position: Position::default(),
            size: Size::default(),
        }
    }

    /// Create a node seeded with a copy of the kind's defaults.
    pub fn from_kind(kind: &ComponentKind, id: NodeId) -> Self {
        Self {
            id,
            kind: kind.id.clone(),
            properties: kind.default_properties.clone(),
            children: Vec::new(),
            position: Position::default(),
            size: kind.default_size,
        }
    }

    /// Set a property.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Add a child node.
    pub fn with_child(mut self, child: CanvasNode) -> Self {
        self.children.push(child);
        self
    }

    /// Get a property value.
    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    /// Pre-order walk of this node and its descendants.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }

    /// Whether `id` is this node or one of its descendants.
    pub fn subtree_contains(&self, id: &NodeId) -> bool {
        self.walk().any(|n| &n.id == id)
    }

    /// Deep copy of the subtree with every id replaced by a fresh one.
    pub fn clone_with_fresh_ids(&self, fresh_id: &mut dyn FnMut() -> NodeId) -> CanvasNode {
        CanvasNode {
            id: fresh_id(),
            kind: self.kind.clone(),
            properties: self.properties.clone(),
            children: self
                .children
                .iter()
                .map(|child| child.clone_with_fresh_ids(fresh_id))
                .collect(),
            position: self.position,
            size: self.size,
        }
    }
}

/// Pre-order iterator over a node forest.
pub struct Walk<'a> {
    stack: Vec<&'a CanvasNode>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a CanvasNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Where a node sits in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeLocation {
    /// Parent id, `None` for root-level nodes
    pub parent: Option<NodeId>,
    /// Index among its siblings
    pub index: usize,
}

/// One screen: an ordered sequence of root-level nodes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub nodes: Vec<CanvasNode>,
}

impl Document {
    /// Create a new empty document.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: Vec::new(),
        }
    }

    /// Parse a document from its JSON interchange form and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: Document = serde_json::from_str(json)?;
        doc.validate()?;
        Ok(doc)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Whether the document has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Total number of nodes, at every depth.
    pub fn len(&self) -> usize {
        self.walk().count()
    }

    /// Pre-order walk over every node.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: self.nodes.iter().rev().collect(),
        }
    }

    /// All node ids in pre-order.
    pub fn ids(&self) -> Vec<NodeId> {
        self.walk().map(|n| n.id.clone()).collect()
    }

    /// Whether a node with this id exists anywhere in the tree.
    pub fn contains(&self, id: &NodeId) -> bool {
        self.find_node(id).is_some()
    }

    /// Find a node by id.
    pub fn find_node(&self, id: &NodeId) -> Option<&CanvasNode> {
        self.walk().find(|n| &n.id == id)
    }

    /// Find a node by id for mutation.
    pub fn find_node_mut(&mut self, id: &NodeId) -> Option<&mut CanvasNode> {
        find_in_mut(&mut self.nodes, id)
    }

    /// Parent and sibling index of a node.
    pub fn locate(&self, id: &NodeId) -> Option<NodeLocation> {
        locate_in(&self.nodes, None, id)
    }

    /// Index of a node among its siblings.
    pub fn index_of(&self, id: &NodeId) -> Option<usize> {
        self.locate(id).map(|loc| loc.index)
    }

    /// Sibling list under `parent` (`None` for the root sequence).
    pub fn siblings(&self, parent: Option<&NodeId>) -> Option<&[CanvasNode]> {
        match parent {
            None => Some(&self.nodes),
            Some(id) => self.find_node(id).map(|n| n.children.as_slice()),
        }
    }

    /// Mutable sibling list under `parent`.
    pub fn siblings_mut(&mut self, parent: Option<&NodeId>) -> Option<&mut Vec<CanvasNode>> {
        match parent {
            None => Some(&mut self.nodes),
            Some(id) => self.find_node_mut(id).map(|n| &mut n.children),
        }
    }

    /// Number of siblings under `parent`, or 0 if the parent does not exist.
    pub fn sibling_count(&self, parent: Option<&NodeId>) -> usize {
        self.siblings(parent).map_or(0, |s| s.len())
    }

    /// Insert `node` under `parent` at `index`, clamped to the sibling count.
    pub fn insert(&mut self, parent: Option<&NodeId>, index: usize, node: CanvasNode) -> Result<()> {
        let siblings = self.siblings_mut(parent).ok_or_else(|| CoreError::NodeNotFound {
            id: parent.cloned().unwrap_or_else(|| NodeId::from("")),
        })?;
        let index = index.min(siblings.len());
        siblings.insert(index, node);
        Ok(())
    }

    /// Detach a node and its whole subtree.
    pub fn remove(&mut self, id: &NodeId) -> Option<CanvasNode> {
        let location = self.locate(id)?;
        let siblings = self.siblings_mut(location.parent.as_ref())?;
        Some(siblings.remove(location.index))
    }

    /// Check structural invariants: non-empty ids and kinds, unique ids.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        let mut issues = Vec::new();

        for node in self.walk() {
            if node.id.as_str().is_empty() {
                issues.push(DocumentIssue::EmptyId {
                    kind: node.kind.clone(),
                });
                continue;
            }
            if node.kind.trim().is_empty() {
                issues.push(DocumentIssue::EmptyKind(node.id.clone()));
            }
            if !seen.insert(&node.id) && reported.insert(&node.id) {
                issues.push(DocumentIssue::DuplicateId(node.id.clone()));
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(CoreError::InvalidDocument { issues })
        }
    }
}

fn find_in_mut<'a>(nodes: &'a mut [CanvasNode], id: &NodeId) -> Option<&'a mut CanvasNode> {
    for node in nodes.iter_mut() {
        if &node.id == id {
            return Some(node);
        }
        if let Some(found) = find_in_mut(&mut node.children, id) {
            return Some(found);
        }
    }
    None
}

fn locate_in(nodes: &[CanvasNode], parent: Option<&NodeId>, id: &NodeId) -> Option<NodeLocation> {
    for (index, node) in nodes.iter().enumerate() {
        if &node.id == id {
            return Some(NodeLocation {
                parent: parent.cloned(),
                index,
            });
        }
        if let Some(found) = locate_in(&node.children, Some(&node.id), id) {
            return Some(found);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        let mut doc = Document::new("Home");
        doc.nodes.push(
            CanvasNode::new("c1", "container")
                .with_child(CanvasNode::new("b1", "button"))
                .with_child(CanvasNode::new("t1", "text")),
        );
        doc.nodes.push(CanvasNode::new("t2", "text"));
        doc
    }

    #[test]
    fn test_walk_is_pre_order() {
        let doc = sample();
        let ids: Vec<_> = doc.ids().into_iter().map(|id| id.0).collect();
        assert_eq!(ids, vec!["c1", "b1", "t1", "t2"]);
        assert_eq!(doc.len(), 4);
    }

    #[test]
    fn test_find_and_locate() {
        let doc = sample();
        assert_eq!(doc.find_node(&"t1".into()).map(|n| n.kind.as_str()), Some("text"));
        assert_eq!(
            doc.locate(&"t1".into()),
            Some(NodeLocation {
                parent: Some("c1".into()),
                index: 1
            })
        );
        assert_eq!(doc.index_of(&"t2".into()), Some(1));
        assert_eq!(doc.sibling_count(Some(&"c1".into())), 2);
        assert_eq!(doc.sibling_count(Some(&"ghost".into())), 0);
        assert!(doc.find_node(&"ghost".into()).is_none());
    }

    #[test]
    fn test_remove_detaches_subtree() {
        let mut doc = sample();
        let removed = doc.remove(&"c1".into()).unwrap();
        assert_eq!(removed.children.len(), 2);
        assert!(!doc.contains(&"b1".into()));
        assert_eq!(doc.ids(), vec![NodeId::from("t2")]);
    }

    #[test]
    fn test_insert_clamps_index() {
        let mut doc = sample();
        doc.insert(None, 99, CanvasNode::new("x", "divider")).unwrap();
        assert_eq!(doc.nodes.last().map(|n| n.id.as_str()), Some("x"));

        let err = doc
            .insert(Some(&"ghost".into()), 0, CanvasNode::new("y", "text"))
            .unwrap_err();
        assert!(matches!(err, CoreError::NodeNotFound { .. }));
    }

    #[test]
    fn test_validate_reports_duplicates_once() {
        let mut doc = sample();
        doc.nodes.push(CanvasNode::new("b1", "badge"));
        doc.nodes.push(CanvasNode::new("b1", "badge"));
        doc.nodes.push(CanvasNode::new("", "text"));

        match doc.validate() {
            Err(CoreError::InvalidDocument { issues }) => {
                assert_eq!(
                    issues,
                    vec![
                        DocumentIssue::DuplicateId("b1".into()),
                        DocumentIssue::EmptyId {
                            kind: "text".to_string()
                        },
                    ]
                );
            }
            other => panic!("expected invalid document, got {:?}", other),
        }
    }

    #[test]
    fn test_clone_with_fresh_ids() {
        let doc = sample();
        let mut counter = 0;
        let mut fresh = || {
            counter += 1;
            NodeId(format!("copy{}", counter))
        };
        let copy = doc.nodes[0].clone_with_fresh_ids(&mut fresh);
        let ids: Vec<_> = copy.walk().map(|n| n.id.0.clone()).collect();
        assert_eq!(ids, vec!["copy1", "copy2", "copy3"]);
        assert_eq!(copy.children[0].kind, "button");
    }

    #[test]
    fn test_json_round_trip_keeps_structure() {
        let mut doc = sample();
        if let Some(node) = doc.find_node_mut(&"b1".into()) {
            node.properties
                .insert("text".to_string(), PropertyValue::text("Simpan"));
        }
        let json = doc.to_json().unwrap();
        let back = Document::from_json(&json).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        assert!(matches!(
            Document::from_json("{ nodes: "),
            Err(CoreError::Malformed { .. })
        ));
    }
}
