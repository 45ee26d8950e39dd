//! # Subscriber callbacks.
//!
//! - [`Handler`]: the extension point for receiving published payloads.
//! - [`HandlerFn`]: adapter that turns a plain async closure into a handler.
//! - [`HandlerRef`]: the shared handle the registry stores; its `Arc`
//!   pointer is the unit of subscriber identity.

mod handler;
mod handler_fn;

pub use handler::{Handler, HandlerRef};
pub use handler_fn::HandlerFn;
