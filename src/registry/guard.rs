//! # Scoped release for in-flight passes.
//!
//! [`ActiveGuard`] pairs every successful `begin` with exactly one
//! exit+merge, no matter how the pass ends: normal completion, an `?`
//! propagation out of a failing handler, or a dropped `emit_async`
//! future. Leaking the exit would leak the key's active counter and
//! keep its shadow state from ever committing.

use crate::keys::Key;
use crate::registry::ListenerRegistry;

/// Holds one increment of a key's active counter.
pub(crate) struct ActiveGuard<'a> {
    registry: &'a ListenerRegistry,
    key: Key,
}

impl<'a> ActiveGuard<'a> {
    pub(crate) fn new(registry: &'a ListenerRegistry, key: Key) -> Self {
        Self { registry, key }
    }
}

impl Drop for ActiveGuard<'_> {
    fn drop(&mut self) {
        self.registry.release(&self.key);
    }
}
