//! Keys under which handlers are grouped.
//!
//! Two kinds of keys are supported:
//! - [`Key::Name`] — string keys, compared by content.
//! - [`Key::Token`] — opaque unique tokens, compared by identity.
//!
//! Handlers registered under different keys never interact.

mod key;
mod token;

pub use key::Key;
pub use token::Token;
