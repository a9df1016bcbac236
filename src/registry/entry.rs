//! # Per-key entry: committed list, shadow list, active counter.
//!
//! The committed list is what a dispatch starting *now* snapshots. The
//! shadow list exists only while a mutation has occurred during an
//! active invocation window; it is lazily cloned from committed on the
//! first such mutation and reconciled back by [`KeyEntry::merge`].
//!
//! The active counter counts in-flight passes. It is a counter, not a
//! flag: overlapping passes of one key are legal, and shadow state may
//! only replace committed state once the counter is back to zero —
//! committing at the first exit would let a still-in-flight outer pass
//! observe structural mutation mid-iteration.

use std::sync::Arc;

use crate::handlers::HandlerRef;
use crate::registry::HandlerRecord;

/// One key's handler lists and in-flight state.
pub(crate) struct KeyEntry {
    committed: Vec<Arc<HandlerRecord>>,
    shadow: Option<Vec<Arc<HandlerRecord>>>,
    active: usize,
}

impl KeyEntry {
    pub(crate) fn new() -> Self {
        Self {
            committed: Vec::new(),
            shadow: None,
            active: 0,
        }
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active > 0
    }

    /// True when a dispatch starting now would find handlers.
    pub(crate) fn has_handlers(&self) -> bool {
        !self.committed.is_empty()
    }

    /// True once the entry can be dropped from the key map.
    pub(crate) fn is_idle_empty(&self) -> bool {
        !self.is_active() && self.committed.is_empty() && self.shadow.is_none()
    }

    /// Fixed snapshot of the committed list for a new pass.
    pub(crate) fn snapshot(&self) -> Vec<Arc<HandlerRecord>> {
        self.committed.clone()
    }

    pub(crate) fn enter(&mut self) {
        self.active += 1;
    }

    /// Decrements the active counter. The counter never goes negative;
    /// each pass exits exactly once via its guard.
    pub(crate) fn exit(&mut self) {
        debug_assert!(self.active > 0, "exit without matching enter");
        self.active = self.active.saturating_sub(1);
    }

    /// Inserts a freshly registered handler at the front or back of the
    /// currently mutable list.
    pub(crate) fn insert(&mut self, record: Arc<HandlerRecord>, prepend: bool) {
        let list = self.mutable_list();
        if prepend {
            list.insert(0, record);
        } else {
            list.push(record);
        }
    }

    /// Tombstones the first live record matching `callback` in the
    /// currently mutable list. Returns whether a match was found.
    ///
    /// Duplicate registrations need duplicate calls: one call removes
    /// at most one handler.
    pub(crate) fn tombstone_first(&mut self, callback: &HandlerRef) -> bool {
        let list = self.mutable_list();
        for record in list.iter() {
            if !record.is_tombstoned() && record.matches(callback) {
                record.tombstone();
                return true;
            }
        }
        false
    }

    /// Tombstones every handler of this key, in both lists.
    ///
    /// Records are shared between committed and shadow, but handlers
    /// registered during the current window exist in shadow only, so
    /// both lists are walked.
    pub(crate) fn tombstone_all(&mut self) {
        for record in &self.committed {
            record.tombstone();
        }
        if let Some(shadow) = &self.shadow {
            for record in shadow {
                record.tombstone();
            }
        }
    }

    /// Reconciles committed and shadow state.
    ///
    /// | active > 0 | shadow | result                                   |
    /// |------------|--------|------------------------------------------|
    /// | no         | no     | committed ← sweep(committed)             |
    /// | no         | yes    | committed ← sweep(shadow); shadow ← None |
    /// | yes        | no     | shadow ← sweep(clone(committed))         |
    /// | yes        | yes    | shadow ← sweep(shadow)                   |
    pub(crate) fn merge(&mut self) {
        match (self.is_active(), self.shadow.take()) {
            (false, None) => self.committed = sweep(&self.committed),
            (false, Some(shadow)) => self.committed = sweep(&shadow),
            (true, None) => self.shadow = Some(sweep(&self.committed)),
            (true, Some(shadow)) => self.shadow = Some(sweep(&shadow)),
        }
    }

    /// The list a registration or removal mutates right now: shadow
    /// (cloned from committed on first use) while passes are in flight,
    /// committed otherwise.
    fn mutable_list(&mut self) -> &mut Vec<Arc<HandlerRecord>> {
        if self.active > 0 {
            self.shadow.get_or_insert_with(|| self.committed.clone())
        } else {
            &mut self.committed
        }
    }
}

/// Order-stable filter-copy dropping every spent record.
///
/// A filter-copy cannot skip adjacent spent entries the way an
/// index-mutating in-place delete can.
fn sweep(list: &[Arc<HandlerRecord>]) -> Vec<Arc<HandlerRecord>> {
    list.iter()
        .filter(|record| !record.is_spent())
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::HandlerFn;

    fn record(once: bool) -> Arc<HandlerRecord> {
        HandlerRecord::new(HandlerFn::arc(|_args| Ok(())), once)
    }

    fn live_count(list: &[Arc<HandlerRecord>]) -> usize {
        list.len()
    }

    #[test]
    fn test_merge_idle_without_shadow_sweeps_committed() {
        let mut entry = KeyEntry::new();
        entry.insert(record(true), false);
        entry.insert(record(false), false);
        entry.insert(record(true), false);

        // Consume both once-handlers, then merge while idle.
        for r in entry.snapshot() {
            r.claim();
        }
        entry.merge();

        assert_eq!(live_count(&entry.snapshot()), 1);
        assert!(entry.shadow.is_none());
    }

    #[test]
    fn test_merge_idle_with_shadow_commits_shadow() {
        let mut entry = KeyEntry::new();
        entry.insert(record(false), false);

        entry.enter();
        // Mutation during the window lands in shadow.
        entry.insert(record(false), false);
        assert_eq!(live_count(&entry.snapshot()), 1);
        entry.exit();
        entry.merge();

        assert_eq!(live_count(&entry.snapshot()), 2);
        assert!(entry.shadow.is_none());
    }

    #[test]
    fn test_merge_active_without_shadow_builds_shadow() {
        let mut entry = KeyEntry::new();
        entry.insert(record(true), false);
        entry.insert(record(false), false);

        entry.enter();
        entry.enter();
        for r in entry.snapshot() {
            r.claim();
        }
        entry.exit();
        entry.merge();

        // Still active: committed untouched, shadow pre-swept.
        assert_eq!(live_count(&entry.snapshot()), 2);
        assert_eq!(live_count(entry.shadow.as_ref().unwrap()), 1);

        entry.exit();
        entry.merge();
        assert_eq!(live_count(&entry.snapshot()), 1);
        assert!(entry.shadow.is_none());
    }

    #[test]
    fn test_merge_active_with_shadow_sweeps_shadow_only() {
        let mut entry = KeyEntry::new();
        entry.insert(record(false), false);

        entry.enter();
        entry.insert(record(true), false);
        entry.shadow.as_ref().unwrap()[1].claim();
        entry.merge();

        assert_eq!(live_count(entry.shadow.as_ref().unwrap()), 1);
        assert_eq!(live_count(&entry.snapshot()), 1);
    }

    #[test]
    fn test_sweep_is_order_stable_across_adjacent_removals() {
        let keep_a = record(false);
        let drop_b = record(false);
        let drop_c = record(false);
        let keep_d = record(false);
        drop_b.tombstone();
        drop_c.tombstone();

        let swept = sweep(&[
            Arc::clone(&keep_a),
            drop_b,
            drop_c,
            Arc::clone(&keep_d),
        ]);

        assert_eq!(swept.len(), 2);
        assert!(Arc::ptr_eq(&swept[0], &keep_a));
        assert!(Arc::ptr_eq(&swept[1], &keep_d));
    }

    #[test]
    fn test_tombstone_first_removes_one_match_per_call() {
        let handler = HandlerFn::arc(|_args| Ok(())) as HandlerRef;
        let mut entry = KeyEntry::new();
        entry.insert(HandlerRecord::new(handler.clone(), false), false);
        entry.insert(HandlerRecord::new(handler.clone(), false), false);

        assert!(entry.tombstone_first(&handler));
        entry.merge();
        assert_eq!(live_count(&entry.snapshot()), 1);

        assert!(entry.tombstone_first(&handler));
        entry.merge();
        assert!(entry.is_idle_empty());

        assert!(!entry.tombstone_first(&handler));
    }

    #[test]
    fn test_prepend_inserts_at_front() {
        let first = record(false);
        let second = record(false);
        let mut entry = KeyEntry::new();
        entry.insert(Arc::clone(&first), false);
        entry.insert(Arc::clone(&second), true);

        let snapshot = entry.snapshot();
        assert!(Arc::ptr_eq(&snapshot[0], &second));
        assert!(Arc::ptr_eq(&snapshot[1], &first));
    }

    #[test]
    fn test_tombstone_all_reaches_shadow_only_records() {
        let mut entry = KeyEntry::new();
        entry.insert(record(false), false);

        entry.enter();
        entry.insert(record(false), false);
        entry.tombstone_all();
        entry.exit();
        entry.merge();

        assert!(entry.is_idle_empty());
    }
}
