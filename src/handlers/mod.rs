//! Handler abstractions and function-backed implementations.
//!
//! This module provides the [`Handler`] trait (the unit of work a
//! dispatch invokes), the shared handle type [`HandlerRef`], and two
//! function-backed implementations:
//!
//! - [`HandlerFn`] — wraps a synchronous closure.
//! - [`AsyncHandlerFn`] — wraps a closure producing a future.
//!
//! Handler identity is the `Arc` allocation behind a [`HandlerRef`]:
//! removal compares handles with `Arc::ptr_eq`, so keep a clone of the
//! handle you registered if you intend to remove it later.

mod handler;
mod handler_fn;

pub use handler::{arg, Args, Handler, HandlerRef, Value};
pub use handler_fn::{AsyncHandlerFn, HandlerFn};
