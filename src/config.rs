//! # Dispatcher configuration.
//!
//! [`Config`] defines a bus's behavior: the per-key subscriber cap, the
//! diagnostic threshold, and the deadline applied to awaited deliveries.
//!
//! A partial configuration is written with struct update syntax over the
//! defaults:
//!
//! ```
//! use std::time::Duration;
//! use eventvisor::{Config, LogLevel};
//!
//! let cfg = Config {
//!     max_subscribers: 8,
//!     log_level: LogLevel::Warn,
//!     ..Config::default()
//! };
//!
//! assert_eq!(cfg.subscriber_limit(), Some(8));
//! assert_eq!(cfg.publish_timeout(), Some(Duration::from_secs(10)));
//! ```
//!
//! ## Sentinels
//! - `max_subscribers = 0` → no per-key cap
//! - `timeout = 0s` → no deadline on awaited publishes

use std::time::Duration;

use crate::diag::LogLevel;

/// Per-bus configuration, fixed once the bus is constructed.
///
/// All fields are public; prefer the accessors over raw sentinel checks.
#[derive(Clone, Debug)]
pub struct Config {
    /// Maximum number of subscribers per event key (0 = unlimited).
    ///
    /// At the cap, further subscriptions for that key are rejected with a
    /// warning and a no-op handle. Other keys are unaffected.
    pub max_subscribers: usize,

    /// Diagnostic threshold; messages above it never reach the sink.
    pub log_level: LogLevel,

    /// Per-handler deadline for awaited fan-out (0 = no deadline).
    ///
    /// A handler still running past the deadline is abandoned and reported
    /// as timed out. Fire-and-forget publishes never apply a deadline.
    pub timeout: Duration,
}

impl Config {
    /// Returns the per-key subscriber cap, `None` meaning unlimited.
    #[inline]
    #[must_use]
    pub fn subscriber_limit(&self) -> Option<usize> {
        if self.max_subscribers == 0 {
            None
        } else {
            Some(self.max_subscribers)
        }
    }

    /// Returns the awaited-publish deadline, `None` meaning no deadline.
    ///
    /// # Example
    /// ```
    /// use std::time::Duration;
    /// use eventvisor::Config;
    ///
    /// let mut cfg = Config::default();
    /// assert_eq!(cfg.publish_timeout(), Some(Duration::from_secs(10)));
    ///
    /// cfg.timeout = Duration::ZERO;
    /// assert_eq!(cfg.publish_timeout(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn publish_timeout(&self) -> Option<Duration> {
        if self.timeout == Duration::ZERO {
            None
        } else {
            Some(self.timeout)
        }
    }
}

impl Default for Config {
    /// Provides a default configuration:
    /// - `max_subscribers = 0` (unlimited)
    /// - `log_level = LogLevel::Error`
    /// - `timeout = 10s`
    fn default() -> Self {
        Self {
            max_subscribers: 0,
            log_level: LogLevel::Error,
            timeout: Duration::from_secs(10),
        }
    }
}
