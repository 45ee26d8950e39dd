//! Severity levels for the diagnostic channel.

use std::fmt;

/// Severity of a diagnostic message.
///
/// Levels are ordered `Error < Warn < Info < Debug`. A configured threshold
/// admits its own level and everything more severe, so the default threshold
/// of [`LogLevel::Error`] keeps the channel quiet except for delivery
/// failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    /// Subscriber failures, panics, and timeouts.
    Error,
    /// Soft conditions, such as a subscription rejected at capacity.
    Warn,
    /// Coarse lifecycle notes (registry cleared).
    Info,
    /// Per-operation detail (subscriptions, fan-out sizes).
    Debug,
}

impl LogLevel {
    /// Returns the lowercase name of the level.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }

    /// True when a message at `level` passes a threshold of `self`.
    ///
    /// # Example
    /// ```
    /// use eventvisor::LogLevel;
    ///
    /// assert!(LogLevel::Warn.allows(LogLevel::Error));
    /// assert!(LogLevel::Warn.allows(LogLevel::Warn));
    /// assert!(!LogLevel::Warn.allows(LogLevel::Info));
    /// ```
    #[must_use]
    pub fn allows(self, level: LogLevel) -> bool {
        level <= self
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(LogLevel::Error < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Debug);
    }

    #[test]
    fn test_error_threshold_admits_errors_only() {
        let threshold = LogLevel::Error;
        assert!(threshold.allows(LogLevel::Error));
        assert!(!threshold.allows(LogLevel::Warn));
        assert!(!threshold.allows(LogLevel::Info));
        assert!(!threshold.allows(LogLevel::Debug));
    }

    #[test]
    fn test_debug_threshold_admits_everything() {
        let threshold = LogLevel::Debug;
        assert!(threshold.allows(LogLevel::Error));
        assert!(threshold.allows(LogLevel::Warn));
        assert!(threshold.allows(LogLevel::Info));
        assert!(threshold.allows(LogLevel::Debug));
    }
}
