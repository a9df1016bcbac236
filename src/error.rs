//! Error types used by the registry, the dispatchers and handlers.
//!
//! This module defines two main error enums:
//!
//! - [`RegistryError`] — errors raised at the registration boundary
//!   (strict-key policy violations).
//! - [`HandlerError`] — errors raised by individual handler invocations
//!   and propagated out of a dispatch.
//!
//! Both types provide helper methods (`as_label`, `as_message`) for
//! logging/metrics.

use thiserror::Error;

use crate::keys::Key;

/// # Errors produced at the registration boundary.
///
/// These are policy failures: the registry itself is never touched when
/// one of them is returned.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Strict mode is enabled and the key is not in the allowed set.
    #[error("key \"{key}\" is not in the allowed set")]
    KeyNotAllowed {
        /// The rejected key.
        key: Key,
    },
}

impl RegistryError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use eventry::{Key, RegistryError};
    ///
    /// let err = RegistryError::KeyNotAllowed { key: Key::from("boot") };
    /// assert_eq!(err.as_label(), "key_not_allowed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RegistryError::KeyNotAllowed { .. } => "key_not_allowed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            RegistryError::KeyNotAllowed { key } => {
                format!("key not allowed: {key}")
            }
        }
    }
}

/// # Errors produced by handler execution.
///
/// A failing handler stops its pass fail-fast: the error propagates to
/// the caller of `emit`/`emit_async` and the remaining handlers of that
/// pass are not invoked. The per-key active counter is still released.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum HandlerError {
    /// Handler reported a failure.
    #[error("handler failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// An async-only handler was reached by a synchronous dispatch while
    /// no tokio runtime was available to detach it onto.
    #[error("async handler invoked synchronously outside a tokio runtime")]
    NoRuntime,
}

impl HandlerError {
    /// Builds a [`HandlerError::Fail`] from any displayable cause.
    ///
    /// # Example
    /// ```
    /// use eventry::HandlerError;
    ///
    /// let err = HandlerError::fail("boom");
    /// assert_eq!(err.as_label(), "handler_failed");
    /// ```
    pub fn fail(error: impl Into<String>) -> Self {
        HandlerError::Fail {
            error: error.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            HandlerError::Fail { .. } => "handler_failed",
            HandlerError::NoRuntime => "handler_no_runtime",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            HandlerError::Fail { error } => format!("error: {error}"),
            HandlerError::NoRuntime => "no tokio runtime".to_string(),
        }
    }
}
