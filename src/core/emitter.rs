//! # Emitter: the thin registration/dispatch facade.
//!
//! [`Emitter`] wires the strict-key policy in front of the internal
//! registry and exposes the dispatcher's two entry points. It adds no
//! algorithmic behavior of its own: every consistency guarantee lives
//! in the registry and dispatch modules.
//!
//! Registration methods return `&Self` (inside a `Result` where the
//! policy can fail) to support call chaining. All methods take `&self`;
//! share an emitter across tasks with `Arc`.
//!
//! ## Example
//! ```
//! use eventry::{Emitter, HandlerFn};
//!
//! # fn main() -> Result<(), eventry::RegistryError> {
//! let emitter = Emitter::new();
//! emitter
//!     .on("greet", HandlerFn::arc(|_args| Ok(())))?
//!     .once("greet", HandlerFn::arc(|_args| Ok(())))?;
//!
//! assert!(emitter.emit("greet", &[]).unwrap());
//! # Ok(())
//! # }
//! ```

use crate::core::EmitterConfig;
use crate::dispatch::Dispatcher;
use crate::error::{HandlerError, RegistryError};
use crate::handlers::{Args, HandlerRef};
use crate::keys::Key;

/// Keyed publish/subscribe emitter.
///
/// Handlers registered under a key run when that key is emitted, in
/// registration order (subject to prepend placement). Mutating the
/// handler set from inside a running handler is safe, including for
/// the key currently being dispatched.
pub struct Emitter {
    cfg: EmitterConfig,
    dispatcher: Dispatcher,
}

impl Emitter {
    /// Creates an emitter with the default (non-strict) configuration.
    pub fn new() -> Self {
        Self::with_config(EmitterConfig::default())
    }

    /// Creates an emitter with the given configuration.
    pub fn with_config(cfg: EmitterConfig) -> Self {
        Self {
            cfg,
            dispatcher: Dispatcher::new(),
        }
    }

    /// Registers a handler to run on every emit of `key`.
    pub fn on(
        &self,
        key: impl Into<Key>,
        handler: HandlerRef,
    ) -> Result<&Self, RegistryError> {
        self.register(key.into(), handler, false, false)
    }

    /// Registers a handler to run on the next emit of `key` only.
    pub fn once(
        &self,
        key: impl Into<Key>,
        handler: HandlerRef,
    ) -> Result<&Self, RegistryError> {
        self.register(key.into(), handler, true, false)
    }

    /// Like [`Emitter::on`], but the handler is placed at the front of
    /// the invocation order.
    pub fn prepend_listener(
        &self,
        key: impl Into<Key>,
        handler: HandlerRef,
    ) -> Result<&Self, RegistryError> {
        self.register(key.into(), handler, false, true)
    }

    /// Like [`Emitter::once`], but the handler is placed at the front
    /// of the invocation order.
    pub fn prepend_once_listener(
        &self,
        key: impl Into<Key>,
        handler: HandlerRef,
    ) -> Result<&Self, RegistryError> {
        self.register(key.into(), handler, true, true)
    }

    /// Removes the first live registration of `handler` under `key`.
    ///
    /// Identity-based: `handler` must be a clone of the handle that was
    /// registered. Handlers registered multiple times need one call per
    /// registration. Unknown keys and unmatched handlers are no-ops.
    pub fn remove_listener(&self, key: impl Into<Key>, handler: &HandlerRef) -> &Self {
        self.dispatcher.registry().remove(&key.into(), handler);
        self
    }

    /// Removes every handler registered under `key`.
    pub fn remove_all_listeners(&self, key: impl Into<Key>) -> &Self {
        self.dispatcher.registry().remove_all(&key.into());
        self
    }

    /// Removes every handler under every key.
    pub fn clear(&self) -> &Self {
        self.dispatcher.registry().clear();
        self
    }

    /// Invokes all handlers of `key` synchronously, in order.
    ///
    /// Returns `Ok(false)` when the key had no handlers at call time. A
    /// failing handler ends the pass and its error is returned.
    pub fn emit(&self, key: impl Into<Key>, args: &Args) -> Result<bool, HandlerError> {
        self.dispatcher.emit(&key.into(), args)
    }

    /// Invokes all handlers of `key` sequentially, awaiting each one
    /// before the next is considered.
    ///
    /// Returns `Ok(false)` when the key had no handlers at call time.
    pub async fn emit_async(
        &self,
        key: impl Into<Key>,
        args: &Args,
    ) -> Result<bool, HandlerError> {
        self.dispatcher.emit_async(&key.into(), args).await
    }

    fn register(
        &self,
        key: Key,
        handler: HandlerRef,
        once: bool,
        prepend: bool,
    ) -> Result<&Self, RegistryError> {
        self.cfg.check(&key)?;
        self.dispatcher.registry().register(key, handler, once, prepend);
        Ok(self)
    }
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Emitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Emitter")
            .field("cfg", &self.cfg)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use parking_lot::Mutex;

    use crate::handlers::HandlerFn;
    use crate::keys::Token;

    fn counting(hits: &Arc<AtomicUsize>) -> HandlerRef {
        let hits = Arc::clone(hits);
        HandlerFn::arc(move |_args| {
            hits.fetch_add(1, Ordering::Relaxed);
            Ok(())
        })
    }

    #[test]
    fn test_chained_registration() {
        let emitter = Emitter::new();
        let hits = Arc::new(AtomicUsize::new(0));

        emitter
            .on("test", counting(&hits))
            .unwrap()
            .once("test", counting(&hits))
            .unwrap();

        emitter.emit("test", &[]).unwrap();
        emitter.emit("test", &[]).unwrap();
        assert_eq!(hits.load(Ordering::Relaxed), 3);
    }

    #[test]
    fn test_prepend_runs_before_earlier_registrations() {
        let emitter = Emitter::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        let named = |name: &'static str| {
            let log = Arc::clone(&log);
            HandlerFn::arc(move |_args| {
                log.lock().push(name);
                Ok(())
            }) as HandlerRef
        };

        emitter.on("test", named("h1")).unwrap();
        emitter.prepend_listener("test", named("h2")).unwrap();
        emitter.prepend_once_listener("test", named("h3")).unwrap();

        emitter.emit("test", &[]).unwrap();
        assert_eq!(*log.lock(), ["h3", "h2", "h1"]);

        log.lock().clear();
        emitter.emit("test", &[]).unwrap();
        assert_eq!(*log.lock(), ["h2", "h1"]);
    }

    #[test]
    fn test_strict_mode_rejects_unlisted_key() {
        let emitter = Emitter::with_config(EmitterConfig::strict(["event"]));
        let hits = Arc::new(AtomicUsize::new(0));

        let err = emitter.on("test", counting(&hits)).unwrap_err();
        assert!(matches!(err, RegistryError::KeyNotAllowed { .. }));
        assert!(emitter.on("event", counting(&hits)).is_ok());

        // The rejected registration left no state behind.
        assert!(!emitter.emit("test", &[]).unwrap());
        assert!(emitter.emit("event", &[]).unwrap());
        assert_eq!(hits.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_remove_listener_by_identity() {
        let emitter = Emitter::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let h = counting(&hits);

        emitter.on("test", h.clone()).unwrap();
        emitter.on("test", h.clone()).unwrap();
        emitter.remove_listener("test", &h);

        emitter.emit("test", &[]).unwrap();
        assert_eq!(hits.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_clear_silences_every_key() {
        let emitter = Emitter::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let token = Token::new("other");

        emitter.once("test", counting(&hits)).unwrap();
        emitter.once(token.clone(), counting(&hits)).unwrap();
        emitter.clear();

        assert!(!emitter.emit("test", &[]).unwrap());
        assert!(!emitter.emit(token, &[]).unwrap());
        assert_eq!(hits.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_token_keys_are_isolated() {
        let emitter = Emitter::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let a = Token::new("same-label");
        let b = Token::new("same-label");

        emitter.on(a.clone(), counting(&hits)).unwrap();

        assert!(!emitter.emit(b, &[]).unwrap());
        assert!(emitter.emit(a, &[]).unwrap());
        assert_eq!(hits.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn test_emit_async_through_facade() {
        let emitter = Emitter::new();
        let hits = Arc::new(AtomicUsize::new(0));

        emitter.once("test", counting(&hits)).unwrap();
        assert!(emitter.emit_async("test", &[]).await.unwrap());
        assert!(!emitter.emit_async("test", &[]).await.unwrap());
        assert_eq!(hits.load(Ordering::Relaxed), 1);
    }
}
