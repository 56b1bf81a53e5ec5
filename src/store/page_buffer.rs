// src/store/page_buffer.rs
//
// The items/seen-ids pair both stores are built on.
//
// Keeping the ordered list and the id set behind one type makes their mirror
// invariant structural: every mutation updates both sides or neither, so no
// call site can drift them apart.

use std::collections::HashSet;

use crate::domain::{MediaId, MediaItem};

/// Ordered, deduplicated item storage
///
/// Invariant at every return point: `seen_ids` holds exactly the ids of
/// `items`, and no id appears in `items` twice. Insertion order is fetch
/// order; nothing here reorders.
#[derive(Debug, Default)]
pub(crate) struct PageBuffer {
    items: Vec<MediaItem>,
    seen_ids: HashSet<MediaId>,
}

impl PageBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append every incoming item whose id has not been seen yet
    ///
    /// First occurrence wins: a repeated id keeps the position (and the
    /// fields) of its first appearance. Returns how many items were appended.
    pub fn merge(&mut self, incoming: Vec<MediaItem>) -> usize {
        let mut appended = 0;
        for item in incoming {
            if self.seen_ids.insert(item.id) {
                self.items.push(item);
                appended += 1;
            }
        }
        appended
    }

    /// Append a single item unless its id is already present
    pub fn insert(&mut self, item: MediaItem) -> bool {
        if self.seen_ids.insert(item.id) {
            self.items.push(item);
            true
        } else {
            false
        }
    }

    /// Remove an id and every item carrying it
    ///
    /// Returns the removed entries with their original positions, ordered
    /// ascending, in the exact shape `restore` takes back.
    pub fn remove(&mut self, id: MediaId) -> Vec<(usize, MediaItem)> {
        if !self.seen_ids.remove(&id) {
            return Vec::new();
        }

        let mut removed = Vec::new();
        let mut kept = Vec::with_capacity(self.items.len());
        for (index, item) in self.items.drain(..).enumerate() {
            if item.id == id {
                removed.push((index, item));
            } else {
                kept.push(item);
            }
        }
        self.items = kept;
        removed
    }

    /// Re-insert previously removed entries at their recorded positions
    pub fn restore(&mut self, entries: Vec<(usize, MediaItem)>) {
        for (index, item) in entries {
            if self.seen_ids.insert(item.id) {
                let at = index.min(self.items.len());
                self.items.insert(at, item);
            }
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.seen_ids.clear();
    }

    pub fn contains(&self, id: MediaId) -> bool {
        self.seen_ids.contains(&id)
    }

    pub fn to_vec(&self) -> Vec<MediaItem> {
        self.items.clone()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// True when the id set mirrors the item list exactly
    #[cfg(test)]
    pub fn is_consistent(&self) -> bool {
        self.seen_ids.len() == self.items.len()
            && self.items.iter().all(|item| self.seen_ids.contains(&item.id))
    }
}
