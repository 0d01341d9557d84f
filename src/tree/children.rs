//! Ordered child list for directory nodes
//!
//! Entries are `(pathname, NodeId)` pairs kept sorted by pathname, with no
//! two entries sharing a pathname.

use crate::error::TreeError;
use crate::types::NodeId;
use std::cmp::Ordering;

#[derive(Debug, Clone, Default)]
pub struct Children {
    entries: Vec<(String, NodeId)>, // sorted by pathname
}

impl Children {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<NodeId> {
        self.entries.get(index).map(|(_, id)| *id)
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.entries.iter().map(|(_, id)| *id)
    }

    /// Binary search with a caller-supplied comparator.
    ///
    /// `Ok(index)` on a hit, `Err(index)` with the insertion point otherwise.
    pub fn search_by<F>(&self, compare: F) -> Result<usize, usize>
    where
        F: FnMut(&(String, NodeId)) -> Ordering,
    {
        self.entries.binary_search_by(compare)
    }

    /// Find the entry whose pathname equals `pathname`
    pub fn find_path(&self, pathname: &str) -> Result<usize, usize> {
        self.search_by(|(key, _)| key.as_str().cmp(pathname))
    }

    /// Find the entry for exactly this node
    pub fn find_node(&self, pathname: &str, id: NodeId) -> Option<usize> {
        self.search_by(|(key, entry)| key.as_str().cmp(pathname).then(entry.cmp(&id)))
            .ok()
    }

    /// Insert at `index`, which must come from a failed `find_path`
    pub fn insert_at(&mut self, index: usize, pathname: &str, id: NodeId) -> Result<(), TreeError> {
        self.entries.try_reserve(1).map_err(|e| {
            TreeError::MemoryError(format!("Failed to grow child list for {}: {}", pathname, e))
        })?;
        self.entries.insert(index, (pathname.to_string(), id));
        Ok(())
    }

    /// Remove the last entry
    pub fn pop(&mut self) -> Option<NodeId> {
        self.entries.pop().map(|(_, id)| id)
    }

    pub fn remove_at(&mut self, index: usize) -> Option<NodeId> {
        if index < self.entries.len() {
            Some(self.entries.remove(index).1)
        } else {
            None
        }
    }
}
