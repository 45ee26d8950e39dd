//! # Dispatch: the bus facade and the guarded delivery path.
//!
//! - [`EventBus`]: subscribe/unsubscribe, the four publish flavors, `clear`,
//!   and the debug queries.
//! - [`Subscription`]: idempotent per-registration unsubscribe handle.
//! - `deliver` internals run each delivery on its own task with deadline
//!   enforcement and failure isolation.

mod bus;
mod deliver;

pub use bus::{EventBus, Subscription};
