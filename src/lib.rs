//! # eventry
//!
//! **Eventry** is an in-process publish/subscribe dispatcher for Rust.
//!
//! Callers register handlers under a key and later trigger all handlers
//! registered for that key with a set of arguments. The crate's focus
//! is making mutation of the handler set safe while that same set is
//! being iterated: a handler running inside a dispatch may register or
//! remove handlers for the very key being dispatched, and two async
//! dispatches of one key may overlap.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   on/once/prepend*          emit(key, args)        emit_async(key, args)
//!        │                         │                         │
//!        ▼                         ▼                         ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Emitter (facade)                                                 │
//! │  - EmitterConfig (optional strict-key policy, checked here)       │
//! └──────────────┬────────────────────────────────────────────────────┘
//!                ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Dispatcher                                                       │
//! │  - snapshots committed[key] into a fixed pass                     │
//! │  - per handler turn: claim() then call / call_async().await       │
//! │  - ActiveGuard runs exit+merge on every path out                  │
//! └──────────────┬────────────────────────────────────────────────────┘
//!                ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  ListenerRegistry                                                 │
//! │  key ──► { committed: [HandlerRecord…],                           │
//! │            shadow:    copy-on-first-write while active,           │
//! │            active:    in-flight pass counter }                    │
//! └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ### Consistency model
//! ```text
//! begin(key):   pass ← snapshot(committed);  active += 1
//! register/remove while active > 0:  mutate shadow (cloned lazily)
//! release(key): active -= 1;  merge:
//!     active == 0, no shadow  → committed ← sweep(committed)
//!     active == 0, shadow     → committed ← sweep(shadow)
//!     active  > 0, no shadow  → shadow    ← sweep(clone(committed))
//!     active  > 0, shadow     → shadow    ← sweep(shadow)
//! ```
//!
//! A pass holds handler *records* (not copies): once-consumption and
//! tombstoning are visible mid-pass, insertions and removals are not.
//! Once-handlers are claimed exactly-once even across overlapping
//! async passes, because eligibility is re-checked at each handler's
//! turn rather than when the pass was captured.
//!
//! Execution is single-threaded cooperative: there is no locking
//! around handler invocation, only around the list operations
//! themselves, so handlers may freely re-enter the emitter.
//!
//! ## Features
//! | Area             | Description                                               | Key types                                |
//! |------------------|-----------------------------------------------------------|------------------------------------------|
//! | **Registration** | Append/prepend, one-shot, identity-based removal.         | [`Emitter`], [`HandlerRef`]              |
//! | **Dispatch**     | Synchronous and sequential-async passes.                  | [`Emitter::emit`], [`Emitter::emit_async`] |
//! | **Handlers**     | Trait plus function-backed sync/async implementations.    | [`Handler`], [`HandlerFn`], [`AsyncHandlerFn`] |
//! | **Keys**         | String keys and identity-keyed opaque tokens.             | [`Key`], [`Token`]                       |
//! | **Policy**       | Optional strict allow-list at the registration boundary.  | [`EmitterConfig`]                        |
//! | **Errors**       | Typed errors for policy and handler failures.             | [`RegistryError`], [`HandlerError`]      |
//!
//! ## Example
//! ```rust
//! use eventry::{arg, Emitter, HandlerFn};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let emitter = Emitter::new();
//!
//!     emitter.on("greet", HandlerFn::arc(|args| {
//!         let name = args[0]
//!             .downcast_ref::<&str>()
//!             .ok_or_else(|| eventry::HandlerError::fail("expected a name"))?;
//!         println!("hello, {name}");
//!         Ok(())
//!     }))?;
//!
//!     let delivered = emitter.emit("greet", &[arg("world")])?;
//!     assert!(delivered);
//!     Ok(())
//! }
//! ```

mod core;
mod dispatch;
mod error;
mod handlers;
mod keys;
mod registry;

// ---- Public re-exports ----

pub use crate::core::{Emitter, EmitterConfig};
pub use error::{HandlerError, RegistryError};
pub use handlers::{arg, Args, AsyncHandlerFn, Handler, HandlerFn, HandlerRef, Value};
pub use keys::{Key, Token};
