//! Public emitter surface.
//!
//! ## Contents
//! - [`Emitter`] — the facade exposing `on`/`once`/`emit`/`emit_async`
//!   over the internal registry and dispatcher.
//! - [`EmitterConfig`] — optional strict-key policy, enforced at the
//!   registration boundary only.

mod config;
mod emitter;

pub use config::EmitterConfig;
pub use emitter::Emitter;
