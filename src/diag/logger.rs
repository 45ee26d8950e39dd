//! Diagnostic sink and the threshold gate in front of it.
//!
//! The dispatcher never writes to stdout or a file on its own. Every
//! diagnostic message goes through [`Logger`], which drops anything above the
//! configured [`LogLevel`] threshold and forwards the rest to a [`LogSink`].
//! The default sink, [`TracingSink`], hands messages to the `tracing` macros
//! so the host application keeps control over formatting and destinations.

use std::sync::Arc;

use super::level::LogLevel;

/// One-way diagnostic sink.
///
/// Implementations receive only messages that already passed the threshold.
/// They have no way to report back and should not block.
pub trait LogSink: Send + Sync + 'static {
    /// Writes one diagnostic message.
    fn write(&self, level: LogLevel, message: &str);
}

/// Default sink: forwards to the `tracing` macros under target `eventvisor`.
#[derive(Debug, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn write(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Error => tracing::error!(target: "eventvisor", "{message}"),
            LogLevel::Warn => tracing::warn!(target: "eventvisor", "{message}"),
            LogLevel::Info => tracing::info!(target: "eventvisor", "{message}"),
            LogLevel::Debug => tracing::debug!(target: "eventvisor", "{message}"),
        }
    }
}

/// Threshold gate bound to one sink.
///
/// Cheap to clone: clones share the sink. Stateless per call; the threshold
/// is fixed at construction.
#[derive(Clone)]
pub struct Logger {
    level: LogLevel,
    sink: Arc<dyn LogSink>,
}

impl Logger {
    /// Creates a logger with the given threshold and sink.
    pub fn new(level: LogLevel, sink: Arc<dyn LogSink>) -> Self {
        Self { level, sink }
    }

    /// True when a message at `level` would reach the sink.
    #[must_use]
    pub fn enabled(&self, level: LogLevel) -> bool {
        self.level.allows(level)
    }

    /// Forwards `message` at `level` if it passes the threshold.
    pub fn log(&self, level: LogLevel, message: &str) {
        if self.enabled(level) {
            self.sink.write(level, message);
        }
    }

    /// Logs at [`LogLevel::Error`].
    pub fn error(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Error, message.as_ref());
    }

    /// Logs at [`LogLevel::Warn`].
    pub fn warn(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Warn, message.as_ref());
    }

    /// Logs at [`LogLevel::Info`].
    pub fn info(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Info, message.as_ref());
    }

    /// Logs at [`LogLevel::Debug`].
    pub fn debug(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Debug, message.as_ref());
    }
}
