//! Node id generation.

use tapestry_core::NodeId;
use uuid::Uuid;

/// Source of fresh node ids. Implementations must never repeat an id.
pub trait IdSource: Send {
    fn next_id(&mut self) -> NodeId;
}

/// Random v4 UUIDs in simple (hyphen-free) form.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl IdSource for RandomIds {
    fn next_id(&mut self) -> NodeId {
        NodeId(Uuid::new_v4().simple().to_string())
    }
}

/// Monotonic ids such as `n1`, `n2`, ...; handy for readable output and tests.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("n")
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> NodeId {
        let id = NodeId(format!("{}{}", self.prefix, self.next));
        self.next += 1;
        id
    }
}
