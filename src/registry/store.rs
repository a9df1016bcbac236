//! # ListenerRegistry: the owned map from key to entry.
//!
//! All shared mutable state of the dispatcher lives here: per-key
//! committed/shadow lists and active counters, behind one mutex.
//!
//! ## Rules
//! - The lock is held only for list operations. It is released before
//!   any handler runs, so handlers may register, remove and dispatch
//!   reentrantly without deadlocking.
//! - `begin` combines the handler-presence check, the pass snapshot and
//!   the counter increment under a single acquisition; the returned
//!   [`ActiveGuard`] performs the matching exit+merge on drop.
//! - Registration never triggers a merge; removal does, so tombstoned
//!   handlers disappear from the mutable list immediately when that is
//!   safe.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::handlers::HandlerRef;
use crate::keys::Key;
use crate::registry::{ActiveGuard, HandlerRecord, KeyEntry};

/// Fixed-order snapshot of a key's committed list, taken at pass start.
///
/// Holds record references, not values: flag mutations made while the
/// pass runs are visible to it, structural mutations are not.
pub(crate) type Pass = Vec<Arc<HandlerRecord>>;

/// Per-key handler lists plus in-flight accounting. No dispatch logic.
pub(crate) struct ListenerRegistry {
    entries: Mutex<HashMap<Key, KeyEntry>>,
}

impl ListenerRegistry {
    pub(crate) fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Registers a handler under `key`, at the front when `prepend`.
    ///
    /// While the key has in-flight passes the insertion lands in the
    /// shadow list and becomes visible to dispatches only after the
    /// window closes.
    pub(crate) fn register(
        &self,
        key: Key,
        callback: HandlerRef,
        once: bool,
        prepend: bool,
    ) {
        let mut entries = self.entries.lock();
        let entry = entries.entry(key).or_insert_with(KeyEntry::new);
        entry.insert(HandlerRecord::new(callback, once), prepend);
    }

    /// Tombstones the first live handler under `key` whose callback is
    /// the same allocation as `callback`. Returns whether one matched.
    pub(crate) fn remove(&self, key: &Key, callback: &HandlerRef) -> bool {
        let mut entries = self.entries.lock();
        let Some(entry) = entries.get_mut(key) else {
            return false;
        };
        let found = entry.tombstone_first(callback);
        if found {
            entry.merge();
            if entry.is_idle_empty() {
                entries.remove(key);
            }
        }
        found
    }

    /// Tombstones every handler under `key`.
    pub(crate) fn remove_all(&self, key: &Key) {
        let mut entries = self.entries.lock();
        if let Some(entry) = entries.get_mut(key) {
            entry.tombstone_all();
            entry.merge();
            if entry.is_idle_empty() {
                entries.remove(key);
            }
        }
    }

    /// Tombstones every handler under every known key.
    pub(crate) fn clear(&self) {
        let mut entries = self.entries.lock();
        for entry in entries.values_mut() {
            entry.tombstone_all();
            entry.merge();
        }
        entries.retain(|_, entry| !entry.is_idle_empty());
    }

    /// Opens a pass over `key`: snapshots the committed list and
    /// increments the active counter in one step.
    ///
    /// Returns `None` without touching the counter when the key has no
    /// handlers at call time.
    pub(crate) fn begin(&self, key: &Key) -> Option<(Pass, ActiveGuard<'_>)> {
        let mut entries = self.entries.lock();
        let entry = entries.get_mut(key)?;
        if !entry.has_handlers() {
            return None;
        }
        let pass = entry.snapshot();
        entry.enter();
        Some((pass, ActiveGuard::new(self, key.clone())))
    }

    /// Closes a pass: decrements the active counter and merges.
    ///
    /// Called exactly once per `begin`, from [`ActiveGuard::drop`].
    pub(crate) fn release(&self, key: &Key) {
        let mut entries = self.entries.lock();
        if let Some(entry) = entries.get_mut(key) {
            entry.exit();
            entry.merge();
            if entry.is_idle_empty() {
                entries.remove(key);
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn committed_len(&self, key: &Key) -> usize {
        let entries = self.entries.lock();
        entries
            .get(key)
            .map(|entry| entry.snapshot().len())
            .unwrap_or(0)
    }
}
