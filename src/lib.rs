//! # eventvisor
//!
//! **Eventvisor** is a keyed in-process publish/subscribe dispatcher for
//! async Rust.
//!
//! Subscribers register async handlers under string event keys; publishers
//! fan a payload out to every current subscriber of a key, or of all keys,
//! with a per-handler deadline and per-handler failure isolation. Everything
//! stays inside the current process: no network hop, no persistence, no
//! replay for late subscribers.
//!
//! ## Architecture
//! ```text
//!  subscribe(key, handler) ──┐            ┌── publish(key, payload).await
//!  unsubscribe / clear ──────┤            ├── publish_sync(key, payload)
//!                            ▼            ▼
//!                  ┌───────────────────────────────┐
//!                  │ EventBus<P>  (Config, Logger) │
//!                  └───────┬──────────────┬────────┘
//!                          │              │ snapshot at call time
//!                          ▼              ▼
//!                    Registry<P>    [ h1, h2, .. hN ]
//!               (EventKey → ordered    │ one Tokio task per delivery
//!                subscriber sets)      ▼
//!                               deadline + isolation
//!                                      │
//!                          failures ──► Logger ──► LogSink (tracing)
//! ```
//!
//! ## Delivery rules
//! - Per key, handlers start in insertion order; completion order is
//!   unspecified.
//! - `publish(..).await` resolves once every delivery settles (success,
//!   error, panic, or timeout). It never returns an error.
//! - `publish_sync(..)` spawns the deliveries and returns; nothing is
//!   awaited, no deadline applies, failures are still reported.
//! - One handler's failure, panic, or timeout never affects another
//!   handler's delivery.
//! - A timed-out handler is abandoned, not stopped: its work may finish in
//!   the background and its result is discarded. No retries.
//!
//! ## Sharing
//! [`EventBus::new`] binds to a process-wide registry shared by every bus
//! over the same payload type, so independently configured buses see the
//! same subscriptions. [`EventBus::with_registry`] plus [`Registry::new`]
//! gives an isolated bus; prefer that in tests.
//!
//! ## Example
//! ```rust
//! use eventvisor::{Config, DispatchError, EventBus, HandlerFn, Registry};
//!
//! #[derive(Clone)]
//! struct Tick {
//!     n: u64,
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let bus: EventBus<Tick> = EventBus::with_registry(Config::default(), Registry::new());
//!
//!     let sub = bus.subscribe(
//!         "ticks",
//!         HandlerFn::arc("printer", |t: Tick| async move {
//!             println!("tick #{}", t.n);
//!             Ok::<_, DispatchError>(())
//!         }),
//!     );
//!
//!     bus.publish("ticks", Tick { n: 1 }).await;
//!     assert_eq!(bus.subscriber_count("ticks"), 1);
//!
//!     sub.unsubscribe();
//!     assert!(bus.keys().is_empty());
//! }
//! ```
mod config;
mod diag;
mod dispatch;
mod error;
mod handlers;
mod registry;

// ---- Public re-exports ----

pub use config::Config;
pub use diag::{LogLevel, LogSink, TracingSink};
pub use dispatch::{EventBus, Subscription};
pub use error::DispatchError;
pub use handlers::{Handler, HandlerFn, HandlerRef};
pub use registry::{AddOutcome, EventKey, Registry};
