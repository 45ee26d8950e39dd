//! # Function-backed handler (`HandlerFn`).
//!
//! [`HandlerFn`] wraps a closure `F: Fn(P) -> Fut`, producing a fresh future
//! per delivery. State shared across deliveries lives in the closure's
//! captures; wrap it in `Arc` explicitly when several handlers need it.
//!
//! ## Example
//! ```
//! use eventvisor::{DispatchError, Handler, HandlerFn, HandlerRef};
//!
//! let h: HandlerRef<u32> = HandlerFn::arc("doubler", |n: u32| async move {
//!     let _ = n * 2;
//!     Ok::<_, DispatchError>(())
//! });
//!
//! assert_eq!(h.name(), "doubler");
//! ```

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::DispatchError;

use super::handler::Handler;

/// Function-backed handler implementation.
///
/// Wraps a closure that *creates* a new future per delivery.
pub struct HandlerFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> HandlerFn<F> {
    /// Creates a new function-backed handler.
    ///
    /// Prefer [`HandlerFn::arc`] when the result goes straight into a
    /// subscription.
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }

    /// Creates the handler and returns it as a shared `Arc` handle.
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

#[async_trait]
impl<P, F, Fut> Handler<P> for HandlerFn<F>
where
    P: Send + 'static,
    F: Fn(P) -> Fut + Send + Sync + 'static, // Fn, not FnMut
    Fut: Future<Output = Result<(), DispatchError>> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn call(&self, payload: P) -> Result<(), DispatchError> {
        (self.f)(payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::HandlerRef;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn test_closure_receives_payload() {
        let seen = Arc::new(AtomicU32::new(0));
        let h: HandlerRef<u32> = {
            let seen = seen.clone();
            HandlerFn::arc("tap", move |n: u32| {
                let seen = seen.clone();
                async move {
                    seen.store(n, Ordering::SeqCst);
                    Ok::<_, DispatchError>(())
                }
            })
        };

        h.call(41).await.unwrap();

        assert_eq!(seen.load(Ordering::SeqCst), 41);
        assert_eq!(h.name(), "tap");
    }

    #[tokio::test]
    async fn test_closure_errors_pass_through() {
        let h: HandlerRef<u32> = HandlerFn::arc("flaky", |_n: u32| async move {
            Err(DispatchError::fail("boom"))
        });

        let err = h.call(1).await.unwrap_err();
        assert_eq!(err.as_label(), "handler_failed");
    }
}
