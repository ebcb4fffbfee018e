//! Bounded undo/redo history of document snapshots.

use std::collections::VecDeque;
use tapestry_core::Document;

/// Undo and redo stacks. The oldest snapshot is dropped once `capacity` is
/// reached; a capacity of zero disables history.
#[derive(Debug, Clone)]
pub struct History {
    past: VecDeque<Document>,
    future: Vec<Document>,
    capacity: usize,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        Self {
            past: VecDeque::new(),
            future: Vec::new(),
            capacity,
        }
    }

    /// Record the document as it was before a successful mutation.
    pub fn record(&mut self, before: Document) {
        if self.capacity == 0 {
            return;
        }
        if self.past.len() == self.capacity {
            self.past.pop_front();
        }
        self.past.push_back(before);
        self.future.clear();
    }

    /// Swap `current` with the previous snapshot. Returns false if there is none.
    pub fn undo(&mut self, current: &mut Document) -> bool {
        match self.past.pop_back() {
            Some(previous) => {
                self.future.push(std::mem::replace(current, previous));
                true
            }
            None => false,
        }
    }

    /// Swap `current` with the next snapshot. Returns false if there is none.
    pub fn redo(&mut self, current: &mut Document) -> bool {
        match self.future.pop() {
            Some(next) => {
                self.past.push_back(std::mem::replace(current, next));
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }
}
