//! Drag-and-drop gesture state machine.
//!
//! ```text
//! Idle --begin_from_palette(kind)--> DraggingFromPalette
//! Idle --begin_node(id)----------->  DraggingExistingNode
//! Dragging* --drop_on(target)----->  Dropped --(engine applies)--> Idle
//! Dragging* --cancel-------------->  Idle
//! ```
//!
//! Transitions are pure: each returns the next state and never touches the
//! document. The engine applies the [`DropAction`] carried by `Dropped`.

use crate::error::{EditorError, Result};
use tapestry_core::NodeId;

/// Where a drag ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// The canvas background: append at the end of the screen.
    Canvas,
    /// An existing node: take its position among its siblings.
    Node(NodeId),
    /// Inside a container node: append as its last child.
    Into(NodeId),
}

/// The mutation a completed drop asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropAction {
    Insert { kind: String, target: DropTarget },
    Move { node: NodeId, target: DropTarget },
}

/// Current phase of the drag gesture.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    DraggingFromPalette(String),
    DraggingExistingNode(NodeId),
    Dropped(DropAction),
}

impl DragState {
    pub fn is_idle(&self) -> bool {
        matches!(self, DragState::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(
            self,
            DragState::DraggingFromPalette(_) | DragState::DraggingExistingNode(_)
        )
    }

    /// Start dragging a new component out of the palette.
    pub fn begin_from_palette(&self, kind: &str) -> Result<DragState> {
        match self {
            DragState::Idle => Ok(DragState::DraggingFromPalette(kind.to_string())),
            other => Err(other.reject("begin a palette drag")),
        }
    }

    /// Start dragging a node already on the canvas.
    pub fn begin_node(&self, id: &NodeId) -> Result<DragState> {
        match self {
            DragState::Idle => Ok(DragState::DraggingExistingNode(id.clone())),
            other => Err(other.reject("begin a node drag")),
        }
    }

    /// Release over a drop target, yielding the `Dropped` state.
    pub fn drop_on(&self, target: DropTarget) -> Result<DragState> {
        self.release(target).map(DragState::Dropped)
    }

    /// The action a release over `target` asks for.
    pub fn release(&self, target: DropTarget) -> Result<DropAction> {
        match self {
            DragState::DraggingFromPalette(kind) => Ok(DropAction::Insert {
                kind: kind.clone(),
                target,
            }),
            DragState::DraggingExistingNode(node) => Ok(DropAction::Move {
                node: node.clone(),
                target,
            }),
            other => Err(other.reject("drop")),
        }
    }

    /// Release outside any drop target, or abort. Always safe.
    pub fn cancel(&self) -> DragState {
        DragState::Idle
    }

    fn reject(&self, action: &'static str) -> EditorError {
        let state = match self {
            DragState::Idle => "idle".to_string(),
            DragState::DraggingFromPalette(kind) => format!("dragging '{}' from the palette", kind),
            DragState::DraggingExistingNode(id) => format!("dragging node '{}'", id),
            DragState::Dropped(_) => "applying a drop".to_string(),
        };
        EditorError::InvalidTransition { action, state }
    }
}
