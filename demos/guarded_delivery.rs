//! # Example: guarded_delivery
//!
//! Failure isolation under one publish: a handler that errors, one that
//! panics, and one that outruns the deadline. None of them stops delivery
//! to the healthy subscriber, and every failure lands on the diagnostic
//! channel.
//!
//! Demonstrates how to:
//! - Tighten the per-handler deadline via [`Config::timeout`].
//! - Raise the diagnostic threshold to `debug` and watch the fan-out.
//! - Route diagnostics through `tracing` (the default sink).
//!
//! ## Flow
//! ```text
//! publish("jobs", "batch-1").await
//!     ├─► healthy ── Ok            (prints, settles instantly)
//!     ├─► flaky ──── Err           (logged: [deliver-failed])
//!     ├─► grumpy ─── panic!        (logged: [deliver-panic])
//!     └─► sleepy ─── 1h sleep      (abandoned at 200ms: [deliver-timeout])
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example guarded_delivery
//! ```

use std::time::Duration;

use eventvisor::{Config, DispatchError, EventBus, HandlerFn, LogLevel, Registry};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // 1. Route the bus diagnostics through a tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter("eventvisor=debug")
        .init();

    // 2. Tight deadline, chatty diagnostics
    let cfg = Config {
        log_level: LogLevel::Debug,
        timeout: Duration::from_millis(200),
        ..Config::default()
    };
    let bus: EventBus<String> = EventBus::with_registry(cfg, Registry::new());

    // 3. One healthy subscriber and three kinds of trouble
    bus.subscribe(
        "jobs",
        HandlerFn::arc("healthy", |job: String| async move {
            println!("[healthy] processed {job}");
            Ok::<_, DispatchError>(())
        }),
    );

    bus.subscribe(
        "jobs",
        HandlerFn::arc("flaky", |job: String| async move {
            Err(DispatchError::fail(format!("cannot process {job}")))
        }),
    );

    bus.subscribe(
        "jobs",
        HandlerFn::arc("grumpy", |_job: String| async move {
            panic!("refuses to work");
        }),
    );

    bus.subscribe(
        "jobs",
        HandlerFn::arc("sleepy", |_job: String| async move {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok::<_, DispatchError>(())
        }),
    );

    // 4. Resolves after ~200ms: healthy, flaky, and grumpy settle at once,
    //    sleepy is abandoned at the deadline.
    bus.publish("jobs", "batch-1".to_string()).await;

    println!("done: the publisher never saw a single failure");
    Ok(())
}
