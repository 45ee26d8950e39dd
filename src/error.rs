//! Error types for event delivery.
//!
//! [`DispatchError`] classifies the ways one subscriber invocation can go
//! wrong during fan-out. Failures are always isolated per handler: the
//! dispatcher reports them through the diagnostic channel and never returns
//! them to the publisher, so these values show up in logs rather than in
//! `Result`s from publish calls.
//!
//! The helper methods (`as_label`, `as_message`) produce stable strings for
//! logging.

use std::time::Duration;
use thiserror::Error;

/// # Outcome of a failed handler invocation.
///
/// Produced by handlers themselves (`Failed`), or by the dispatcher when a
/// handler panics or misses the configured deadline. A failing or timed-out
/// handler is not retried.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum DispatchError {
    /// Handler returned an error from its `call`.
    #[error("handler failed: {error}")]
    Failed {
        /// The underlying error message.
        error: String,
    },

    /// Handler panicked while processing the payload.
    #[error("handler panicked: {info}")]
    Panicked {
        /// Best-effort description of the panic payload.
        info: String,
    },

    /// Handler did not settle within the configured deadline.
    #[error("handler timed out after {timeout:?}")]
    Timeout {
        /// The deadline that was exceeded.
        timeout: Duration,
    },
}

impl DispatchError {
    /// Creates a [`DispatchError::Failed`] from any message.
    ///
    /// # Example
    /// ```
    /// use eventvisor::DispatchError;
    ///
    /// let err = DispatchError::fail("boom");
    /// assert_eq!(err.as_label(), "handler_failed");
    /// ```
    pub fn fail(error: impl Into<String>) -> Self {
        DispatchError::Failed {
            error: error.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use eventvisor::DispatchError;
    /// use std::time::Duration;
    ///
    /// let err = DispatchError::Timeout { timeout: Duration::from_secs(1) };
    /// assert_eq!(err.as_label(), "handler_timeout");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            DispatchError::Failed { .. } => "handler_failed",
            DispatchError::Panicked { .. } => "handler_panicked",
            DispatchError::Timeout { .. } => "handler_timeout",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            DispatchError::Failed { error } => format!("error: {error}"),
            DispatchError::Panicked { info } => format!("panic: {info}"),
            DispatchError::Timeout { timeout } => format!("timeout: {timeout:?}"),
        }
    }

    /// Returns `true` for [`DispatchError::Timeout`].
    ///
    /// Timeouts travel the same reporting channel as other failures but stay
    /// distinguishable by kind.
    ///
    /// # Example
    /// ```
    /// use eventvisor::DispatchError;
    /// use std::time::Duration;
    ///
    /// let slow = DispatchError::Timeout { timeout: Duration::from_secs(1) };
    /// assert!(slow.is_timeout());
    ///
    /// let broken = DispatchError::fail("boom");
    /// assert!(!broken.is_timeout());
    /// ```
    pub fn is_timeout(&self) -> bool {
        matches!(self, DispatchError::Timeout { .. })
    }
}
