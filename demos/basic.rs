//! # Example: basic
//!
//! Smallest end-to-end walkthrough: one bus, two subscribers on the same
//! key, both publish flavors, and the debug queries.
//!
//! Demonstrates how to:
//! - Define subscribers with [`HandlerFn`] and register them with
//!   `subscribe`.
//! - Fan a payload out with `publish` (awaited) and `publish_sync`
//!   (fire-and-forget).
//! - Inspect the registry with `subscriber_count` and `keys`.
//! - Detach a single subscription and wipe the rest with `clear`.
//!
//! ## Flow
//! ```text
//! subscribe("orders", audit)
//! subscribe("orders", mailer)
//!     ├─► publish("orders", OrderPlaced).await    (both settle first)
//!     ├─► publish("orders", OrderShipped).await
//!     ├─► publish_sync("orders", OrderPlaced)     (returns immediately)
//!     ├─► audit.unsubscribe()
//!     └─► clear()
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example basic
//! ```

use std::time::Duration;

use eventvisor::{Config, DispatchError, EventBus, HandlerFn, Registry};

#[derive(Clone, Debug)]
enum ShopEvent {
    OrderPlaced { id: u64 },
    OrderShipped { id: u64 },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // 1. Build the bus (defaults: unlimited subscribers, 10s deadline)
    let bus: EventBus<ShopEvent> = EventBus::with_registry(Config::default(), Registry::new());

    // 2. Register two subscribers under the same key
    let audit = bus.subscribe(
        "orders",
        HandlerFn::arc("audit", |ev: ShopEvent| async move {
            println!("[audit] {ev:?}");
            Ok::<_, DispatchError>(())
        }),
    );

    bus.subscribe(
        "orders",
        HandlerFn::arc("mailer", |ev: ShopEvent| async move {
            if let ShopEvent::OrderShipped { id } = ev {
                tokio::time::sleep(Duration::from_millis(50)).await;
                println!("[mailer] shipping notice for order {id}");
            }
            Ok::<_, DispatchError>(())
        }),
    );

    println!("keys = {:?}", bus.keys());
    println!("orders subscribers = {}", bus.subscriber_count("orders"));

    // 3. Awaited fan-out: returns once both handlers settle
    bus.publish("orders", ShopEvent::OrderPlaced { id: 7 }).await;
    bus.publish("orders", ShopEvent::OrderShipped { id: 7 }).await;

    // 4. Fire-and-forget fan-out: returns before the handlers run
    bus.publish_sync("orders", ShopEvent::OrderPlaced { id: 8 });
    tokio::time::sleep(Duration::from_millis(100)).await;

    // 5. Detach one subscriber, then wipe the registry
    audit.unsubscribe();
    println!("orders subscribers = {}", bus.subscriber_count("orders"));

    bus.clear();
    println!("keys after clear = {:?}", bus.keys());
    Ok(())
}
