//! The mutation engine, sole writer of the canvas document.
//!
//! Every operation is all-or-nothing: a failed call leaves the document,
//! the selection and the history exactly as they were.

use crate::drag::{DragState, DropAction, DropTarget};
use crate::error::{EditorError, Result};
use crate::history::History;
use crate::ids::{IdSource, RandomIds};
use std::sync::Arc;
use tapestry_catalog::Catalog;
use tapestry_core::{CanvasNode, Document, NodeId, NodeLocation, Position, PropertyValue};
use tracing::{debug, warn};

/// Vertical distance between stacked siblings, in points.
pub const STACK_STEP: f64 = 64.0;

/// Offset applied to both axes of a duplicated node, in points.
pub const DUPLICATE_OFFSET: f64 = 16.0;

/// Default number of undo snapshots kept.
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Where an inserted node goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// Append to the root sequence.
    End,
    /// Immediately before an existing node, among its siblings.
    Before(NodeId),
    /// Last child of a container.
    Into(NodeId),
}

impl From<DropTarget> for Placement {
    fn from(target: DropTarget) -> Self {
        match target {
            DropTarget::Canvas => Placement::End,
            DropTarget::Node(id) => Placement::Before(id),
            DropTarget::Into(id) => Placement::Into(id),
        }
    }
}

/// Owns the document being edited along with selection, drag and history state.
pub struct MutationEngine {
    catalog: Arc<Catalog>,
    document: Document,
    ids: Box<dyn IdSource>,
    selection: Option<NodeId>,
    drag: DragState,
    history: History,
}

impl MutationEngine {
    /// Engine over an empty document with random node ids.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self::with_ids(catalog, RandomIds)
    }

    /// Engine with a custom id source.
    pub fn with_ids(catalog: Arc<Catalog>, ids: impl IdSource + 'static) -> Self {
        Self {
            catalog,
            document: Document::default(),
            ids: Box::new(ids),
            selection: None,
            drag: DragState::Idle,
            history: History::new(DEFAULT_HISTORY_CAPACITY),
        }
    }

    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history = History::new(capacity);
        self
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    pub fn selection(&self) -> Option<&NodeId> {
        self.selection.as_ref()
    }

    pub fn selected_node(&self) -> Option<&CanvasNode> {
        self.selection
            .as_ref()
            .and_then(|id| self.document.find_node(id))
    }

    pub fn drag_state(&self) -> &DragState {
        &self.drag
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Open a document for editing. Discards history and selection.
    pub fn load(&mut self, document: Document) -> Result<()> {
        document.validate()?;
        debug!(name = %document.name, nodes = document.len(), "Loaded document");
        self.document = document;
        self.history.clear();
        self.selection = None;
        self.drag = DragState::Idle;
        Ok(())
    }

    /// Swap in a whole document as one undoable step.
    pub fn replace_document(&mut self, document: Document) -> Result<()> {
        document.validate()?;
        let before = std::mem::replace(&mut self.document, document);
        self.history.record(before);
        self.selection = None;
        debug!(nodes = self.document.len(), "Replaced document");
        Ok(())
    }

    /// Remove every node.
    pub fn clear(&mut self) {
        if self.document.is_empty() {
            return;
        }
        let before = self.document.clone();
        self.document.nodes.clear();
        self.history.record(before);
        self.selection = None;
        debug!("Cleared document");
    }

    /// Create a node of `kind_id` with fresh id and default properties. The
    /// new node becomes selected.
    pub fn insert(&mut self, kind_id: &str, placement: Placement) -> Result<NodeId> {
        if !self.catalog.contains(kind_id) {
            warn!(kind = kind_id, "Insert of unknown kind");
            return Err(EditorError::unknown_kind(kind_id));
        }

        let (parent, index) = match &placement {
            Placement::End => (None, self.document.nodes.len()),
            Placement::Before(target) => {
                let location = self.require_location(target)?;
                (location.parent, location.index)
            }
            Placement::Into(container) => {
                self.require_container(container)?;
                let count = self.document.sibling_count(Some(container));
                (Some(container.clone()), count)
            }
        };

        let id = self.fresh_id();
        let mut node = self.catalog.instantiate(kind_id, id.clone())?;
        node.position = Position::new(0.0, index as f64 * STACK_STEP);

        self.transact(|doc| Ok(doc.insert(parent.as_ref(), index, node)?))?;
        self.selection = Some(id.clone());
        debug!(node = %id, kind = kind_id, ?parent, index, "Inserted node");
        Ok(id)
    }

    /// Move `node_id` to the sibling slot currently held by `target_id`.
    ///
    /// The node is detached first and then reinserted at the target's former
    /// index, so after the call it sits exactly where the target was. A target
    /// under another parent moves the node into that parent.
    pub fn reorder(&mut self, node_id: &NodeId, target_id: &NodeId) -> Result<()> {
        if node_id == target_id {
            return Ok(());
        }
        let source = self.require_location(node_id)?;
        let target = self.require_location(target_id)?;
        self.reject_cycle(node_id, target_id)?;

        self.transact(|doc| {
            let node = doc
                .remove(node_id)
                .ok_or_else(|| EditorError::node_not_found(node_id))?;
            let index = if source.parent == target.parent {
                target.index
            } else {
                doc.index_of(target_id).unwrap_or(target.index)
            };
            doc.insert(target.parent.as_ref(), index, node)?;
            Ok(())
        })?;
        debug!(node = %node_id, target = %target_id, "Reordered node");
        Ok(())
    }

    /// Move a node to the end of a container's children.
    pub fn move_into(&mut self, node_id: &NodeId, container_id: &NodeId) -> Result<()> {
        self.require_location(node_id)?;
        self.require_container(container_id)?;
        self.reject_cycle(node_id, container_id)?;

        self.transact(|doc| {
            let node = doc
                .remove(node_id)
                .ok_or_else(|| EditorError::node_not_found(node_id))?;
            let end = doc.sibling_count(Some(container_id));
            doc.insert(Some(container_id), end, node)?;
            Ok(())
        })?;
        debug!(node = %node_id, container = %container_id, "Moved node into container");
        Ok(())
    }

    /// Move a node to the end of the root sequence.
    pub fn move_to_end(&mut self, node_id: &NodeId) -> Result<()> {
        self.require_location(node_id)?;
        self.transact(|doc| {
            let node = doc
                .remove(node_id)
                .ok_or_else(|| EditorError::node_not_found(node_id))?;
            doc.nodes.push(node);
            Ok(())
        })?;
        debug!(node = %node_id, "Moved node to end");
        Ok(())
    }

    /// Deep-copy a node and its subtree right after the original. Every copied
    /// node gets a fresh id; the copy becomes selected.
    pub fn duplicate(&mut self, node_id: &NodeId) -> Result<NodeId> {
        let location = self.require_location(node_id)?;
        let source = self
            .document
            .find_node(node_id)
            .ok_or_else(|| EditorError::node_not_found(node_id))?;
        if !self.catalog.contains(&source.kind) {
            return Err(EditorError::unknown_kind(&source.kind));
        }

        let ids = self.ids.as_mut();
        let document = &self.document;
        let mut copy = source.clone_with_fresh_ids(&mut || next_free_id(ids, document));
        copy.position = source
            .position
            .offset(DUPLICATE_OFFSET, DUPLICATE_OFFSET);
        let copy_id = copy.id.clone();

        self.transact(|doc| Ok(doc.insert(location.parent.as_ref(), location.index + 1, copy)?))?;
        self.selection = Some(copy_id.clone());
        debug!(source = %node_id, copy = %copy_id, "Duplicated node");
        Ok(copy_id)
    }

    /// Remove a node with its whole subtree and return it.
    pub fn delete(&mut self, node_id: &NodeId) -> Result<CanvasNode> {
        self.require_location(node_id)?;
        let removed = self.transact(|doc| {
            doc.remove(node_id)
                .ok_or_else(|| EditorError::node_not_found(node_id))
        })?;

        let selection_removed = self
            .selection
            .as_ref()
            .map_or(false, |selected| removed.subtree_contains(selected));
        if selection_removed {
            self.selection = None;
        }
        debug!(node = %node_id, removed = removed.walk().count(), "Deleted node");
        Ok(removed)
    }

    /// Shallow-merge `partial` into a node's properties. Keys outside the
    /// kind's schema are kept.
    pub fn patch_properties<I, K>(&mut self, node_id: &NodeId, partial: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, PropertyValue)>,
        K: Into<String>,
    {
        self.require_location(node_id)?;
        self.transact(|doc| {
            let node = doc
                .find_node_mut(node_id)
                .ok_or_else(|| EditorError::node_not_found(node_id))?;
            for (key, value) in partial {
                node.properties.insert(key.into(), value);
            }
            Ok(())
        })?;
        debug!(node = %node_id, "Patched properties");
        Ok(())
    }

    /// Patch a single property.
    pub fn set_property(
        &mut self,
        node_id: &NodeId,
        key: &str,
        value: impl Into<PropertyValue>,
    ) -> Result<()> {
        self.patch_properties(node_id, [(key, value.into())])
    }

    pub fn select(&mut self, node_id: &NodeId) -> Result<()> {
        self.require_location(node_id)?;
        self.selection = Some(node_id.clone());
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Step back one mutation. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let changed = self.history.undo(&mut self.document);
        if changed {
            self.prune_selection();
            debug!("Undo");
        }
        changed
    }

    /// Re-apply the last undone mutation.
    pub fn redo(&mut self) -> bool {
        let changed = self.history.redo(&mut self.document);
        if changed {
            self.prune_selection();
            debug!("Redo");
        }
        changed
    }

    pub fn begin_drag_from_palette(&mut self, kind_id: &str) -> Result<()> {
        self.drag = self.drag.begin_from_palette(kind_id)?;
        Ok(())
    }

    pub fn begin_drag_node(&mut self, node_id: &NodeId) -> Result<()> {
        let next = self.drag.begin_node(node_id)?;
        self.require_location(node_id)?;
        self.drag = next;
        Ok(())
    }

    /// Complete the current drag over `target` and apply its mutation.
    ///
    /// Returns the inserted or moved node. The drag returns to idle whether
    /// or not the mutation succeeds.
    pub fn drop_on(&mut self, target: DropTarget) -> Result<NodeId> {
        let action = self.drag.release(target)?;
        self.drag = DragState::Dropped(action.clone());
        let outcome = self.apply_drop(action);
        self.drag = DragState::Idle;
        outcome
    }

    /// Release outside any target. Never mutates the document.
    pub fn drop_outside(&mut self) {
        self.drag = self.drag.cancel();
    }

    fn apply_drop(&mut self, action: DropAction) -> Result<NodeId> {
        match action {
            DropAction::Insert { kind, target } => self.insert(&kind, target.into()),
            DropAction::Move { node, target } => {
                match target {
                    DropTarget::Canvas => self.move_to_end(&node)?,
                    DropTarget::Node(other) => self.reorder(&node, &other)?,
                    DropTarget::Into(container) => self.move_into(&node, &container)?,
                }
                Ok(node)
            }
        }
    }

    /// Run a document mutation, recording history on success and rolling
    /// back on failure.
    fn transact<T>(&mut self, apply: impl FnOnce(&mut Document) -> Result<T>) -> Result<T> {
        let before = self.document.clone();
        match apply(&mut self.document) {
            Ok(value) => {
                self.history.record(before);
                Ok(value)
            }
            Err(err) => {
                self.document = before;
                Err(err)
            }
        }
    }

    fn fresh_id(&mut self) -> NodeId {
        next_free_id(self.ids.as_mut(), &self.document)
    }

    fn require_location(&self, node_id: &NodeId) -> Result<NodeLocation> {
        self.document.locate(node_id).ok_or_else(|| {
            warn!(node = %node_id, "Stale node reference");
            EditorError::node_not_found(node_id)
        })
    }

    fn require_container(&self, node_id: &NodeId) -> Result<()> {
        let node = self.document.find_node(node_id).ok_or_else(|| {
            warn!(node = %node_id, "Stale node reference");
            EditorError::node_not_found(node_id)
        })?;
        match self.catalog.get(&node.kind) {
            Some(kind) if kind.container => Ok(()),
            _ => Err(EditorError::NotAContainer {
                id: node_id.clone(),
                kind: node.kind.clone(),
            }),
        }
    }

    fn reject_cycle(&self, node_id: &NodeId, target_id: &NodeId) -> Result<()> {
        let inside = self
            .document
            .find_node(node_id)
            .map_or(false, |node| node.subtree_contains(target_id));
        if inside {
            Err(EditorError::InvalidMove {
                node: node_id.clone(),
                target: target_id.clone(),
            })
        } else {
            Ok(())
        }
    }

    fn prune_selection(&mut self) {
        let stale = self
            .selection
            .as_ref()
            .map_or(false, |id| !self.document.contains(id));
        if stale {
            self.selection = None;
        }
    }
}

fn next_free_id(ids: &mut dyn IdSource, document: &Document) -> NodeId {
    loop {
        let id = ids.next_id();
        if !document.contains(&id) {
            return id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;
    use proptest::prelude::*;
    use tapestry_catalog::kinds;

    fn engine() -> MutationEngine {
        MutationEngine::with_ids(Arc::new(Catalog::builtin()), SequentialIds::default())
    }

    fn root_ids(engine: &MutationEngine) -> Vec<String> {
        engine
            .document()
            .nodes
            .iter()
            .map(|n| n.id.as_str().to_string())
            .collect()
    }

    #[test]
    fn test_insert_copies_defaults_and_stacks() {
        let mut engine = engine();
        let a = engine.insert(kinds::BUTTON, Placement::End).unwrap();
        let b = engine.insert(kinds::TEXT, Placement::End).unwrap();

        let doc = engine.document();
        assert_eq!(doc.nodes.len(), 2);
        let button = doc.find_node(&a).unwrap();
        assert_eq!(button.property("text").and_then(|v| v.as_str()), Some("Button"));
        assert_eq!(button.position, Position::new(0.0, 0.0));
        assert_eq!(doc.find_node(&b).unwrap().position, Position::new(0.0, STACK_STEP));
        assert_eq!(engine.selection(), Some(&b));
    }

    #[test]
    fn test_insert_unknown_kind_is_rejected() {
        let mut engine = engine();
        let err = engine.insert("carousel", Placement::End).unwrap_err();
        assert!(err.is_unknown_kind());
        assert!(engine.document().is_empty());
        assert!(!engine.can_undo());
    }

    #[test]
    fn test_insert_before_node() {
        let mut engine = engine();
        let a = engine.insert(kinds::TEXT, Placement::End).unwrap();
        let b = engine.insert(kinds::BUTTON, Placement::Before(a.clone())).unwrap();
        assert_eq!(root_ids(&engine), vec![b.to_string(), a.to_string()]);
    }

    #[test]
    fn test_insert_into_container() {
        let mut engine = engine();
        let card = engine.insert(kinds::CARD, Placement::End).unwrap();
        let child = engine.insert(kinds::TEXT, Placement::Into(card.clone())).unwrap();

        let location = engine.document().locate(&child).unwrap();
        assert_eq!(location.parent, Some(card));
        assert_eq!(location.index, 0);
    }

    #[test]
    fn test_insert_into_leaf_is_rejected() {
        let mut engine = engine();
        let text = engine.insert(kinds::TEXT, Placement::End).unwrap();
        let err = engine.insert(kinds::BUTTON, Placement::Into(text)).unwrap_err();
        assert!(matches!(err, EditorError::NotAContainer { .. }));
        assert_eq!(engine.document().len(), 1);
    }

    #[test]
    fn test_reorder_two_texts_swaps() {
        let mut engine = engine();
        let first = engine.insert(kinds::TEXT, Placement::End).unwrap();
        let second = engine.insert(kinds::TEXT, Placement::End).unwrap();

        engine.reorder(&second, &first).unwrap();
        assert_eq!(root_ids(&engine), vec![second.to_string(), first.to_string()]);
    }

    #[test]
    fn test_reorder_same_id_is_noop() {
        let mut engine = engine();
        let a = engine.insert(kinds::TEXT, Placement::End).unwrap();
        let before = engine.document().clone();
        engine.reorder(&a, &a).unwrap();
        assert_eq!(engine.document(), &before);
    }

    #[test]
    fn test_reorder_across_parents() {
        let mut engine = engine();
        let button = engine.insert(kinds::BUTTON, Placement::End).unwrap();
        let container = engine.insert(kinds::CONTAINER, Placement::End).unwrap();
        let inner = engine.insert(kinds::TEXT, Placement::Into(container.clone())).unwrap();

        engine.reorder(&button, &inner).unwrap();
        let location = engine.document().locate(&button).unwrap();
        assert_eq!(location.parent, Some(container));
        assert_eq!(location.index, 0);
        assert_eq!(engine.document().nodes.len(), 1);
    }

    #[test]
    fn test_move_into_own_descendant_is_rejected() {
        let mut engine = engine();
        let outer = engine.insert(kinds::CONTAINER, Placement::End).unwrap();
        let inner = engine.insert(kinds::CONTAINER, Placement::Into(outer.clone())).unwrap();
        let before = engine.document().clone();

        let err = engine.move_into(&outer, &inner).unwrap_err();
        assert!(matches!(err, EditorError::InvalidMove { .. }));
        let err = engine.reorder(&outer, &inner).unwrap_err();
        assert!(matches!(err, EditorError::InvalidMove { .. }));
        assert_eq!(engine.document(), &before);
    }

    #[test]
    fn test_duplicate_is_isolated() {
        let mut engine = engine();
        let card = engine.insert(kinds::CARD, Placement::End).unwrap();
        let child = engine.insert(kinds::BUTTON, Placement::Into(card.clone())).unwrap();

        let copy = engine.duplicate(&card).unwrap();
        assert_eq!(root_ids(&engine), vec![card.to_string(), copy.to_string()]);
        assert_eq!(engine.selection(), Some(&copy));

        let copy_node = engine.document().find_node(&copy).unwrap().clone();
        let original = engine.document().find_node(&card).unwrap().clone();
        assert_eq!(
            copy_node.position,
            original.position.offset(DUPLICATE_OFFSET, DUPLICATE_OFFSET)
        );
        let copied_child = copy_node.children[0].id.clone();
        assert_ne!(copied_child, child);

        engine
            .set_property(&copied_child, "text", PropertyValue::text("Copy"))
            .unwrap();
        let original_child = engine.document().find_node(&child).unwrap();
        assert_eq!(original_child.property("text").and_then(|v| v.as_str()), Some("Button"));
        assert!(engine.document().validate().is_ok());
    }

    #[test]
    fn test_delete_cascades_and_clears_selection() {
        let mut engine = engine();
        let container = engine.insert(kinds::CONTAINER, Placement::End).unwrap();
        let button = engine.insert(kinds::BUTTON, Placement::Into(container.clone())).unwrap();
        engine.select(&button).unwrap();

        let removed = engine.delete(&container).unwrap();
        assert_eq!(removed.children.len(), 1);
        assert!(engine.document().find_node(&button).is_none());
        assert!(engine.document().is_empty());
        assert_eq!(engine.selection(), None);
    }

    #[test]
    fn test_stale_ids_leave_document_unchanged() {
        let mut engine = engine();
        engine.insert(kinds::TEXT, Placement::End).unwrap();
        let before = engine.document().clone();
        let ghost = NodeId::from("ghost");

        assert!(engine.delete(&ghost).unwrap_err().is_node_not_found());
        assert!(engine.duplicate(&ghost).unwrap_err().is_node_not_found());
        assert!(engine
            .set_property(&ghost, "text", PropertyValue::text("x"))
            .unwrap_err()
            .is_node_not_found());
        assert!(engine.select(&ghost).unwrap_err().is_node_not_found());
        assert_eq!(engine.document(), &before);
    }

    #[test]
    fn test_patch_is_shallow_merge() {
        let mut engine = engine();
        let button = engine.insert(kinds::BUTTON, Placement::End).unwrap();
        engine
            .patch_properties(
                &button,
                [
                    ("text", PropertyValue::text("Simpan")),
                    ("analyticsTag", PropertyValue::text("save")),
                ],
            )
            .unwrap();

        let node = engine.document().find_node(&button).unwrap();
        assert_eq!(node.property("text").and_then(|v| v.as_str()), Some("Simpan"));
        assert_eq!(node.property("analyticsTag").and_then(|v| v.as_str()), Some("save"));
        assert_eq!(node.property("backgroundColor").and_then(|v| v.as_str()), Some("#2563eb"));
    }

    #[test]
    fn test_undo_redo_restores_exact_documents() {
        let mut engine = engine();
        let empty = engine.document().clone();
        let a = engine.insert(kinds::TEXT, Placement::End).unwrap();
        let one = engine.document().clone();
        engine.set_property(&a, "text", PropertyValue::text("Hi")).unwrap();
        let patched = engine.document().clone();

        assert!(engine.undo());
        assert_eq!(engine.document(), &one);
        assert!(engine.undo());
        assert_eq!(engine.document(), &empty);
        assert_eq!(engine.selection(), None);
        assert!(!engine.undo());

        assert!(engine.redo());
        assert!(engine.redo());
        assert_eq!(engine.document(), &patched);
        assert!(!engine.redo());
    }

    #[test]
    fn test_failed_mutation_records_no_history() {
        let mut engine = engine();
        engine.insert(kinds::TEXT, Placement::End).unwrap();
        let _ = engine.delete(&NodeId::from("ghost"));
        assert!(engine.undo());
        assert!(!engine.undo());
    }

    #[test]
    fn test_clear_and_replace_document() {
        let mut engine = engine();
        engine.insert(kinds::TEXT, Placement::End).unwrap();
        engine.clear();
        assert!(engine.document().is_empty());
        assert!(engine.undo());
        assert_eq!(engine.document().len(), 1);

        let invalid = Document {
            name: "bad".to_string(),
            nodes: vec![CanvasNode::new("x", "text"), CanvasNode::new("x", "text")],
        };
        let before = engine.document().clone();
        assert!(engine.replace_document(invalid).is_err());
        assert_eq!(engine.document(), &before);
    }

    #[test]
    fn test_palette_drag_inserts_on_drop() {
        let mut engine = engine();
        engine.begin_drag_from_palette(kinds::BUTTON).unwrap();
        assert!(engine.drag_state().is_dragging());

        let id = engine.drop_on(DropTarget::Canvas).unwrap();
        assert!(engine.drag_state().is_idle());
        assert_eq!(engine.document().find_node(&id).unwrap().kind, kinds::BUTTON);
    }

    #[test]
    fn test_drag_cancel_leaves_document_untouched() {
        let mut engine = engine();
        let a = engine.insert(kinds::TEXT, Placement::End).unwrap();
        let before = engine.document().clone();

        engine.begin_drag_node(&a).unwrap();
        engine.drop_outside();
        assert!(engine.drag_state().is_idle());
        assert_eq!(engine.document(), &before);

        engine.begin_drag_from_palette(kinds::BUTTON).unwrap();
        engine.drop_outside();
        assert_eq!(engine.document(), &before);
    }

    #[test]
    fn test_begin_drag_while_dragging_is_rejected() {
        let mut engine = engine();
        engine.begin_drag_from_palette(kinds::TEXT).unwrap();
        let err = engine.begin_drag_from_palette(kinds::BUTTON).unwrap_err();
        assert!(matches!(err, EditorError::InvalidTransition { .. }));
        assert_eq!(
            engine.drag_state(),
            &DragState::DraggingFromPalette(kinds::TEXT.to_string())
        );
    }

    #[test]
    fn test_drop_into_container_moves_node() {
        let mut engine = engine();
        let text = engine.insert(kinds::TEXT, Placement::End).unwrap();
        let card = engine.insert(kinds::CARD, Placement::End).unwrap();

        engine.begin_drag_node(&text).unwrap();
        engine.drop_on(DropTarget::Into(card.clone())).unwrap();
        assert_eq!(engine.document().locate(&text).unwrap().parent, Some(card));
    }

    #[test]
    fn test_failed_drop_returns_to_idle() {
        let mut engine = engine();
        engine.begin_drag_from_palette("carousel").unwrap();
        assert!(engine.drop_on(DropTarget::Canvas).unwrap_err().is_unknown_kind());
        assert!(engine.drag_state().is_idle());
        assert!(engine.document().is_empty());
    }

    /// Id source that keeps handing out ids already in use.
    struct Colliding(SequentialIds, u32);

    impl IdSource for Colliding {
        fn next_id(&mut self) -> NodeId {
            self.1 += 1;
            if self.1 % 3 == 0 {
                NodeId::from("n1")
            } else {
                self.0.next_id()
            }
        }
    }

    #[derive(Debug, Clone)]
    enum Op {
        Insert(usize),
        InsertInto(usize),
        Duplicate(usize),
        Delete(usize),
        Reorder(usize, usize),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0usize..16).prop_map(Op::Insert),
            (0usize..8).prop_map(Op::InsertInto),
            (0usize..8).prop_map(Op::Duplicate),
            (0usize..8).prop_map(Op::Delete),
            (0usize..8, 0usize..8).prop_map(|(a, b)| Op::Reorder(a, b)),
        ]
    }

    proptest! {
        #[test]
        fn prop_ids_stay_unique(ops in proptest::collection::vec(op(), 1..40)) {
            let catalog = Arc::new(Catalog::builtin());
            let kind_ids: Vec<String> = catalog.list().map(|k| k.id.clone()).collect();
            let mut engine = MutationEngine::with_ids(catalog, Colliding(SequentialIds::default(), 0));

            for op in ops {
                let ids = engine.document().ids();
                let pick = |i: usize| ids.get(i % ids.len().max(1)).cloned();
                let _ = match op {
                    Op::Insert(k) => engine.insert(&kind_ids[k % kind_ids.len()], Placement::End).map(|_| ()),
                    Op::InsertInto(i) => match pick(i) {
                        Some(parent) => engine.insert(kinds::TEXT, Placement::Into(parent)).map(|_| ()),
                        None => Ok(()),
                    },
                    Op::Duplicate(i) => match pick(i) {
                        Some(id) => engine.duplicate(&id).map(|_| ()),
                        None => Ok(()),
                    },
                    Op::Delete(i) => match pick(i) {
                        Some(id) => engine.delete(&id).map(|_| ()),
                        None => Ok(()),
                    },
                    Op::Reorder(a, b) => match (pick(a), pick(b)) {
                        (Some(a), Some(b)) => engine.reorder(&a, &b),
                        _ => Ok(()),
                    },
                };
                prop_assert!(engine.document().validate().is_ok());
            }
        }

        #[test]
        fn prop_reorder_matches_list_move(count in 2usize..8, from in 0usize..8, to in 0usize..8) {
            let from = from % count;
            let to = to % count;
            let mut engine = engine();
            for _ in 0..count {
                engine.insert(kinds::TEXT, Placement::End).unwrap();
            }

            let mut model = root_ids(&engine);
            let moved = model.remove(from);
            model.insert(to, moved.clone());

            let source = NodeId::from(moved.as_str());
            let target = engine.document().nodes[to].id.clone();
            engine.reorder(&source, &target).unwrap();

            prop_assert_eq!(root_ids(&engine), model);
            prop_assert_eq!(engine.document().index_of(&source), Some(to));
        }
    }
}
