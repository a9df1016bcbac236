//! Dispatch engine: synchronous and sequential-async passes over the
//! listener registry.
//!
//! Both entry points snapshot the committed list as it exists at call
//! time — the *pass*. A pass holds record references, so later flag
//! mutations (once-consumption, tombstoning) are visible to it, while
//! insertions and removals never change its length or order: a dispatch
//! commits to the handlers that existed when it started.
//!
//! ## Eligibility
//! Each handler's turn re-checks `invoked` via
//! [`HandlerRecord::claim`](crate::registry::HandlerRecord): already
//! consumed handlers are skipped, once-handlers are claimed exactly
//! once even when two async passes over the same key overlap.
//! Tombstoning mid-pass does not exempt a handler from an
//! already-snapshotted pass.
//!
//! ## Failure
//! A failing handler ends its pass fail-fast; the error propagates to
//! the caller and the remaining handlers are not invoked. The pass's
//! [`ActiveGuard`](crate::registry::ActiveGuard) still runs exit+merge
//! on the way out, so the active counter never leaks.

use crate::error::HandlerError;
use crate::handlers::Args;
use crate::keys::Key;
use crate::registry::ListenerRegistry;

/// Invokes registered handlers over a [`ListenerRegistry`].
pub(crate) struct Dispatcher {
    registry: ListenerRegistry,
}

impl Dispatcher {
    pub(crate) fn new() -> Self {
        Self {
            registry: ListenerRegistry::new(),
        }
    }

    pub(crate) fn registry(&self) -> &ListenerRegistry {
        &self.registry
    }

    /// Synchronous pass. Never suspends.
    ///
    /// Returns `false` without side effects when the key has no
    /// handlers at call time.
    pub(crate) fn emit(&self, key: &Key, args: &Args) -> Result<bool, HandlerError> {
        let Some((pass, _guard)) = self.registry.begin(key) else {
            return Ok(false);
        };
        for record in &pass {
            if record.claim() {
                record.callback().call(args)?;
            }
        }
        Ok(true)
    }

    /// Sequential asynchronous pass: each handler's completion is
    /// awaited before the next handler's eligibility is evaluated.
    pub(crate) async fn emit_async(
        &self,
        key: &Key,
        args: &Args,
    ) -> Result<bool, HandlerError> {
        let Some((pass, _guard)) = self.registry.begin(key) else {
            return Ok(false);
        };
        for record in &pass {
            if record.claim() {
                record.callback().call_async(args).await?;
            }
        }
        Ok(true)
    }
}
