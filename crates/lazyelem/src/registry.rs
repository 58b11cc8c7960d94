//! Watch Registry
//!
//! Ordered pending entries plus batch accumulation groups.

use std::rc::Rc;

use crate::{ElementId, LoadKind};

/// Callback invoked with a single loaded target.
pub type LoadCallback = Rc<dyn Fn(ElementId)>;

/// Callback invoked once per flush with every batched target.
pub type BatchCallback = Rc<dyn Fn(&[ElementId])>;

/// A single pending watch.
pub struct WatchEntry {
    pub kind: LoadKind,
    pub target: ElementId,
    /// Invoked after the entry dispatches (non-batch kinds).
    pub callback: Option<LoadCallback>,
    /// Batch group the target is reported into (batch kind only).
    pub batch_group: Option<usize>,
}

/// Accumulator for entries sharing one batch callback.
///
/// A flush clears the collected list but keeps the group, so later
/// passes keep accumulating into it. Group slots are never reused while
/// the loader lives; entry indices stay valid.
pub struct BatchGroup {
    pub callback: BatchCallback,
    pub collected: Vec<ElementId>,
}

/// Ordered set of pending watches and their batch groups.
///
/// Insertion order is registration order and survives mid-iteration
/// removal: `remove` shifts later entries down without reordering.
#[derive(Default)]
pub struct Registry {
    entries: Vec<WatchEntry>,
    groups: Vec<BatchGroup>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: WatchEntry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[WatchEntry] {
        &self.entries
    }

    /// Remove and return the entry at `index`, preserving order.
    pub fn remove(&mut self, index: usize) -> WatchEntry {
        self.entries.remove(index)
    }

    /// Drop every entry watching `target`; returns how many were removed.
    pub fn remove_target(&mut self, target: ElementId) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.target != target);
        before - self.entries.len()
    }

    /// Reset entries and batch groups.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.groups.clear();
    }

    /// Find or create the batch group for `callback`, keyed by identity.
    pub fn batch_group_for(&mut self, callback: &BatchCallback) -> usize {
        if let Some(index) = self
            .groups
            .iter()
            .position(|group| Rc::ptr_eq(&group.callback, callback))
        {
            return index;
        }
        self.groups.push(BatchGroup {
            callback: callback.clone(),
            collected: Vec::new(),
        });
        self.groups.len() - 1
    }

    /// Append a target to a batch group's collected list.
    pub fn collect_into(&mut self, group: usize, target: ElementId) {
        self.groups[group].collected.push(target);
    }

    pub fn groups_mut(&mut self) -> &mut [BatchGroup] {
        &mut self.groups
    }
}
