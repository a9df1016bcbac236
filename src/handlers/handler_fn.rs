//! # Function-backed handlers (`HandlerFn`, `AsyncHandlerFn`).
//!
//! [`HandlerFn`] wraps a synchronous closure; [`AsyncHandlerFn`] wraps a
//! closure that *creates* a fresh future per invocation. Both produce
//! shared handles via `arc()`.
//!
//! ## Sync dispatch over async handlers
//! When a synchronous `emit` reaches an [`AsyncHandlerFn`], the future
//! is started detached on the ambient tokio runtime and is **not**
//! awaited; its failure, if any, is reported to stderr. This mirrors a
//! promise-returning listener fired by a non-awaiting emit. Outside a
//! runtime the dispatch fails with [`HandlerError::NoRuntime`].

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;
use futures::FutureExt;

use crate::error::HandlerError;
use crate::handlers::handler::{Args, Handler, Value};

/// Function-backed synchronous handler.
///
/// ## Example
/// ```
/// use eventry::{HandlerFn, HandlerRef};
///
/// let h: HandlerRef = HandlerFn::arc(|_args| Ok(()));
/// ```
pub struct HandlerFn<F> {
    f: F,
}

impl<F> HandlerFn<F>
where
    F: Fn(&Args) -> Result<(), HandlerError> + Send + Sync + 'static,
{
    /// Creates a new function-backed handler.
    ///
    /// Prefer [`HandlerFn::arc`] when you immediately need a
    /// [`HandlerRef`](crate::HandlerRef).
    pub fn new(f: F) -> Self {
        Self { f }
    }

    /// Creates the handler and returns it as a shared handle.
    pub fn arc(f: F) -> Arc<Self> {
        Arc::new(Self::new(f))
    }
}

#[async_trait]
impl<F> Handler for HandlerFn<F>
where
    F: Fn(&Args) -> Result<(), HandlerError> + Send + Sync + 'static,
{
    fn call(&self, args: &Args) -> Result<(), HandlerError> {
        (self.f)(args)
    }
}

type BoxHandlerFuture = BoxFuture<'static, Result<(), HandlerError>>;

/// Function-backed asynchronous handler.
///
/// Wraps a closure that receives an owned copy of the argument list
/// (the values themselves are shared `Arc`s) and returns a future.
///
/// ## Example
/// ```
/// use eventry::{AsyncHandlerFn, HandlerRef};
///
/// let h: HandlerRef = AsyncHandlerFn::arc(|_args| async {
///     tokio::task::yield_now().await;
///     Ok(())
/// });
/// ```
pub struct AsyncHandlerFn {
    f: Box<dyn Fn(Vec<Value>) -> BoxHandlerFuture + Send + Sync>,
}

impl AsyncHandlerFn {
    /// Creates a new function-backed async handler.
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn(Vec<Value>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), HandlerError>> + Send + 'static,
    {
        Self {
            f: Box::new(move |args| f(args).boxed()),
        }
    }

    /// Creates the handler and returns it as a shared handle.
    pub fn arc<F, Fut>(f: F) -> Arc<Self>
    where
        F: Fn(Vec<Value>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), HandlerError>> + Send + 'static,
    {
        Arc::new(Self::new(f))
    }
}

#[async_trait]
impl Handler for AsyncHandlerFn {
    /// Starts the future detached; does not await it.
    fn call(&self, args: &Args) -> Result<(), HandlerError> {
        let fut = (self.f)(args.to_vec());
        let handle = tokio::runtime::Handle::try_current()
            .map_err(|_| HandlerError::NoRuntime)?;
        handle.spawn(async move {
            if let Err(err) = fut.await {
                eprintln!("[eventry] detached async handler failed: {err}");
            }
        });
        Ok(())
    }

    async fn call_async(&self, args: &Args) -> Result<(), HandlerError> {
        (self.f)(args.to_vec()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_handler_fn_invokes_closure() {
        let hits = Arc::new(AtomicUsize::new(0));
        let h = {
            let hits = Arc::clone(&hits);
            HandlerFn::arc(move |_args| {
                hits.fetch_add(1, Ordering::Relaxed);
                Ok(())
            })
        };

        h.call(&[]).unwrap();
        h.call(&[]).unwrap();
        assert_eq!(hits.load(Ordering::Relaxed), 2);
    }

    #[tokio::test]
    async fn test_async_handler_awaited_path() {
        let hits = Arc::new(AtomicUsize::new(0));
        let h = {
            let hits = Arc::clone(&hits);
            AsyncHandlerFn::arc(move |_args| {
                let hits = Arc::clone(&hits);
                async move {
                    hits.fetch_add(1, Ordering::Relaxed);
                    Ok(())
                }
            })
        };

        h.call_async(&[]).await.unwrap();
        assert_eq!(hits.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_async_handler_sync_path_needs_runtime() {
        let h = AsyncHandlerFn::arc(|_args| async { Ok(()) });
        assert!(matches!(h.call(&[]), Err(HandlerError::NoRuntime)));
    }

    #[tokio::test]
    async fn test_async_handler_sync_path_detaches() {
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let tx = Arc::new(parking_lot::Mutex::new(Some(tx)));
        let h = AsyncHandlerFn::arc(move |_args| {
            let tx = Arc::clone(&tx);
            async move {
                if let Some(tx) = tx.lock().take() {
                    let _ = tx.send(());
                }
                Ok(())
            }
        });

        h.call(&[]).unwrap();
        rx.await.unwrap();
    }
}
