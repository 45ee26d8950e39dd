//! # Subscriber registry: event keys and the shared subscriber map.
//!
//! - [`EventKey`]: cheap-to-clone channel name used for subscribe and
//!   publish.
//! - [`Registry`]: the map from key to ordered subscriber set. Handles are
//!   shared-state: clones point at the same map, and
//!   [`Registry::shared`] hands out one process-wide map per payload type.
//! - [`AddOutcome`]: what an add did, so callers can tell a fresh
//!   registration from a duplicate or a capacity rejection.

mod key;
mod registry;

pub use key::EventKey;
pub use registry::{AddOutcome, Registry};
