//! # Handler record: one registered handler and its lifecycle flags.
//!
//! A record is shared (`Arc`) between the committed list, the shadow
//! list and any in-flight passes, so flag mutations are visible
//! everywhere at once while list structure stays fixed per pass.
//!
//! Lifecycle: `invoked` flips false→true at most once, at the moment a
//! once-handler begins executing; `tombstoned` flips false→true on a
//! matching remove. A record with either flag set is dropped from its
//! lists by the next sweep.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::handlers::HandlerRef;

/// A registered handler plus its once/invoked/tombstoned state.
pub(crate) struct HandlerRecord {
    callback: HandlerRef,
    once: bool,
    invoked: AtomicBool,
    tombstoned: AtomicBool,
}

impl HandlerRecord {
    /// Creates a shared record for a freshly registered handler.
    pub(crate) fn new(callback: HandlerRef, once: bool) -> Arc<Self> {
        Arc::new(Self {
            callback,
            once,
            invoked: AtomicBool::new(false),
            tombstoned: AtomicBool::new(false),
        })
    }

    /// The handler to invoke.
    pub(crate) fn callback(&self) -> &HandlerRef {
        &self.callback
    }

    /// Decides whether the current pass invokes this handler, claiming
    /// the once-slot when applicable.
    ///
    /// Sets `invoked ← once` at the moment the handler begins
    /// executing: for a once-handler the swap makes the claim
    /// exactly-once even when two passes over the same key overlap.
    /// Tombstoning is deliberately not consulted here — a handler
    /// tombstoned mid-pass is still invoked by an already-snapshotted
    /// pass.
    pub(crate) fn claim(&self) -> bool {
        if self.once {
            !self.invoked.swap(true, Ordering::AcqRel)
        } else {
            !self.invoked.load(Ordering::Acquire)
        }
    }

    /// Marks the handler logically removed.
    pub(crate) fn tombstone(&self) {
        self.tombstoned.store(true, Ordering::Release);
    }

    pub(crate) fn is_tombstoned(&self) -> bool {
        self.tombstoned.load(Ordering::Acquire)
    }

    /// True once the next sweep should drop this record.
    pub(crate) fn is_spent(&self) -> bool {
        self.invoked.load(Ordering::Acquire) || self.is_tombstoned()
    }

    /// Identity comparison against a caller-held handle.
    pub(crate) fn matches(&self, callback: &HandlerRef) -> bool {
        Arc::ptr_eq(&self.callback, callback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::HandlerFn;

    fn handler() -> HandlerRef {
        HandlerFn::arc(|_args| Ok(()))
    }

    #[test]
    fn test_once_claim_is_exactly_once() {
        let record = HandlerRecord::new(handler(), true);
        assert!(record.claim());
        assert!(!record.claim());
        assert!(record.is_spent());
    }

    #[test]
    fn test_plain_handler_claims_repeatedly() {
        let record = HandlerRecord::new(handler(), false);
        assert!(record.claim());
        assert!(record.claim());
        assert!(!record.is_spent());
    }

    #[test]
    fn test_tombstone_does_not_block_claim() {
        let record = HandlerRecord::new(handler(), false);
        record.tombstone();
        assert!(record.claim());
        assert!(record.is_spent());
    }

    #[test]
    fn test_identity_match() {
        let h = handler();
        let record = HandlerRecord::new(h.clone(), false);
        assert!(record.matches(&h));
        assert!(!record.matches(&handler()));
    }
}
