//! Identifier allocation.

/// Monotonic allocator for positive integer ids.
///
/// Ids start at 1 and are never handed out twice for the lifetime of the
/// sequence, regardless of what the caller later does with them.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IdSequence {
    last: u64,
}

impl IdSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve and return the next id.
    pub fn next_id(&mut self) -> u64 {
        self.last = self.last.checked_add(1).expect("id sequence exhausted");
        self.last
    }
}
