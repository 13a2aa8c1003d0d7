//! Row Mutation Lock
//!
//! Ids of rows with a stock toggle in flight. Acquire before the request,
//! release on both success and failure.

use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowLocks {
    held: HashSet<String>,
}

impl RowLocks {
    /// Returns false (and changes nothing) if the row is already locked
    pub fn try_acquire(&mut self, id: &str) -> bool {
        self.held.insert(id.to_string())
    }

    pub fn release(&mut self, id: &str) {
        self.held.remove(id);
    }

    pub fn is_locked(&self, id: &str) -> bool {
        self.held.contains(id)
    }

    pub fn len(&self) -> usize {
        self.held.len()
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }
}
