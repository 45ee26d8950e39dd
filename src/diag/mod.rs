//! # Diagnostics: severity levels, the sink seam, and the threshold gate.
//!
//! The dispatcher never lets a subscriber failure escape a publish call, so
//! the diagnostic channel is the only place those failures become visible.
//! This module provides the pieces of that channel:
//!
//! - [`LogLevel`]: severity ordering and the threshold semantics.
//! - [`LogSink`]: the output seam; implement it to capture messages.
//! - [`TracingSink`]: default sink that forwards to the `tracing` macros.
//! - [`Logger`]: threshold gate the dispatcher writes through.
//!
//! ```text
//! dispatcher ──► Logger (threshold) ──► LogSink ──► tracing / custom
//! ```

mod level;
mod logger;

pub use level::LogLevel;
pub use logger::{LogSink, Logger, TracingSink};
