//! # Handler trait and the argument model.
//!
//! A handler is a fixed-signature callable over a uniform argument
//! list: a slice of opaque [`Value`]s. There is no arity inspection;
//! handlers downcast the values they expect.
//!
//! Every handler supports both dispatch flavors:
//! - [`Handler::call`] — used by the synchronous `emit`.
//! - [`Handler::call_async`] — used by the sequential `emit_async`;
//!   defaults to the synchronous path.

use std::any::Any;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::HandlerError;

/// Opaque argument value passed to handlers.
///
/// Cheap to clone; downcast on the receiving side:
///
/// ```
/// use eventry::{arg, Value};
///
/// let v: Value = arg(42u32);
/// assert_eq!(v.downcast_ref::<u32>(), Some(&42));
/// ```
pub type Value = Arc<dyn Any + Send + Sync>;

/// The uniform argument list handed to every handler of a pass.
pub type Args = [Value];

/// Shared handler handle.
///
/// Identity of this `Arc` is the handler's identity for removal.
pub type HandlerRef = Arc<dyn Handler>;

/// Boxes a value into an opaque argument.
pub fn arg<T: Any + Send + Sync>(value: T) -> Value {
    Arc::new(value)
}

/// # The unit of work a dispatch invokes.
///
/// Implementations should be cheap to call repeatedly; shared state
/// belongs in explicit `Arc`s captured by the implementation.
///
/// # Example
/// ```
/// use eventry::{Args, Handler, HandlerError};
///
/// struct Counter(std::sync::atomic::AtomicUsize);
///
/// #[async_trait::async_trait]
/// impl Handler for Counter {
///     fn call(&self, _args: &Args) -> Result<(), HandlerError> {
///         self.0.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Handler: Send + Sync + 'static {
    /// Synchronous invocation, used by `emit`.
    fn call(&self, args: &Args) -> Result<(), HandlerError>;

    /// Asynchronous invocation, used by `emit_async`.
    ///
    /// Defaults to the synchronous path, so purely synchronous handlers
    /// participate in async dispatch without extra work.
    async fn call_async(&self, args: &Args) -> Result<(), HandlerError> {
        self.call(args)
    }
}
