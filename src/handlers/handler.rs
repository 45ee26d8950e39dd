//! The [`Handler`] trait: an async, named subscriber callback.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::DispatchError;

/// Shared handle to a subscriber callback.
///
/// The registry stores these and treats the `Arc` pointer as the
/// subscriber's identity: the same handle can be unsubscribed later, a
/// value-equal copy cannot.
pub type HandlerRef<P> = Arc<dyn Handler<P>>;

/// # Asynchronous subscriber callback for payloads of type `P`.
///
/// Implementors receive one owned payload per matching publish. Returning
/// `Err` (or panicking) affects only this handler's delivery: the dispatcher
/// reports the failure and the publish proceeds for everyone else.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use eventvisor::{DispatchError, Handler};
///
/// struct Audit;
///
/// #[async_trait]
/// impl Handler<String> for Audit {
///     fn name(&self) -> &str {
///         "audit"
///     }
///
///     async fn call(&self, line: String) -> Result<(), DispatchError> {
///         println!("audit: {line}");
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Handler<P>: Send + Sync + 'static {
    /// Returns the handler name used in failure reports.
    ///
    /// The default is `std::any::type_name::<Self>()`, which gets noisy in
    /// logs - override it where a short name helps.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Processes one published payload.
    async fn call(&self, payload: P) -> Result<(), DispatchError>;
}
