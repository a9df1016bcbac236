//! Listener registry: per-key handler lists kept consistent under
//! reentrant mutation and overlapping dispatches.
//!
//! ## Contents
//! - [`HandlerRecord`] — one registered handler plus its
//!   once/invoked/tombstoned state.
//! - [`KeyEntry`] — a key's committed list, shadow list and active
//!   counter, with the merge/sweep algorithms.
//! - [`ListenerRegistry`] — the owned map from key to entry, exposing
//!   the register/remove/begin primitives. No dispatch logic lives
//!   here.
//! - [`ActiveGuard`] — scoped release that runs exit+merge on every
//!   path out of a pass, including error unwinds.
//!
//! ## Rules
//! - While a key has in-flight passes, structural mutation targets the
//!   shadow list (lazily cloned from committed), never committed.
//! - The lock around the key map is held only for list operations,
//!   never while a handler runs, so handlers may freely re-enter the
//!   registry.

mod entry;
mod guard;
mod record;
mod store;

pub(crate) use entry::KeyEntry;
pub(crate) use guard::ActiveGuard;
pub(crate) use record::HandlerRecord;
pub(crate) use store::ListenerRegistry;
