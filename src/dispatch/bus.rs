//! # The event bus: subscribe, publish, and the debug surface.
//!
//! [`EventBus`] ties the pieces together: it checks the capacity cap on
//! subscribe, snapshots the registry on publish, and fans the payload out
//! through the guarded delivery path.
//!
//! ```text
//!  publish(key, p).await            publish_sync(key, p)
//!      │ snapshot(key)                  │ snapshot(key)
//!      ▼                                ▼
//!  [ h1, h2, .. hN ]               [ h1, h2, .. hN ]
//!      │ one guarded task each         │ one detached task each
//!      ▼                               ▼ (returns immediately)
//!  join_all ──► deadline + isolation ──► failures to the Logger
//! ```
//!
//! ## Rules
//! - Fan-out works on a snapshot taken when the publish starts; subscribers
//!   added or removed afterwards do not affect that publish.
//! - Per key, deliveries start in insertion order. Completion order is
//!   unspecified, as is the interleaving across keys in `publish_all`.
//! - No publish flavor ever returns an error. Handler failures, panics, and
//!   timeouts surface only on the diagnostic channel.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures::future;

use crate::config::Config;
use crate::diag::{LogSink, Logger, TracingSink};
use crate::handlers::HandlerRef;
use crate::registry::{AddOutcome, EventKey, Registry};

use super::deliver;

/// Keyed publish/subscribe dispatcher over payloads of type `P`.
///
/// A bus is a cheap handle: clones share the registry, configuration, and
/// logger. Buses built with [`EventBus::new`] additionally share the
/// process-wide registry for `P` with every other such bus.
pub struct EventBus<P> {
    registry: Registry<P>,
    config: Config,
    logger: Logger,
}

impl<P> Clone for EventBus<P> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
            config: self.config.clone(),
            logger: self.logger.clone(),
        }
    }
}

impl<P> EventBus<P>
where
    P: Clone + Send + 'static,
{
    /// Creates a bus bound to the process-wide registry for `P`.
    ///
    /// Independently configured buses created this way see the same
    /// subscriptions. For an isolated bus (tests, embedded components) pair
    /// [`EventBus::with_registry`] with [`Registry::new`].
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self::with_registry(config, Registry::shared())
    }

    /// Creates a bus over an explicit registry handle.
    #[must_use]
    pub fn with_registry(config: Config, registry: Registry<P>) -> Self {
        let logger = Logger::new(config.log_level, Arc::new(TracingSink));
        Self {
            registry,
            config,
            logger,
        }
    }

    /// Replaces the diagnostic sink, keeping the configured threshold.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.logger = Logger::new(self.config.log_level, sink);
        self
    }

    /// Registers `handler` under `key` and returns its [`Subscription`]
    /// handle.
    ///
    /// - At the configured `max_subscribers` cap the handler is not
    ///   registered: a warning is emitted and the returned handle is an
    ///   inactive no-op. The cap is per key; other keys are unaffected. The
    ///   count check and the insert are one registry critical section, so
    ///   concurrent subscribes cannot push a key past the cap.
    /// - Re-registering a pointer-identical handle keeps the single existing
    ///   entry, even at a full key; either handle can later unsubscribe it.
    pub fn subscribe(&self, key: impl Into<EventKey>, handler: HandlerRef<P>) -> Subscription<P> {
        let key = key.into();

        match self
            .registry
            .add(&key, &handler, self.config.subscriber_limit())
        {
            AddOutcome::Added => {
                self.logger.debug(format!(
                    "[subscribe] key={key} handler={} subscribers={}",
                    handler.name(),
                    self.registry.count(&key)
                ));
                Subscription::active(self.registry.clone(), key, handler)
            }
            AddOutcome::Duplicate => Subscription::active(self.registry.clone(), key, handler),
            AddOutcome::AtCapacity => {
                self.logger.warn(format!(
                    "[limit] key={key} handler={} max={}: subscription rejected",
                    handler.name(),
                    self.config.max_subscribers
                ));
                Subscription::inactive(self.registry.clone(), key, handler)
            }
        }
    }

    /// Removes `handler` from `key` by pointer identity.
    ///
    /// Silent no-op when the key or the handler is not registered. Publishes
    /// already in flight keep their snapshot and still deliver to the
    /// removed handler.
    pub fn unsubscribe(&self, key: impl Into<EventKey>, handler: &HandlerRef<P>) {
        let key = key.into();
        if self.registry.remove(&key, handler) {
            self.logger
                .debug(format!("[unsubscribe] key={key} handler={}", handler.name()));
        }
    }

    /// Fans `payload` out to every subscriber of `key` and waits until all
    /// deliveries settle.
    ///
    /// Handlers start in insertion order, run concurrently, and each is held
    /// to [`Config::publish_timeout`]. Failures and timeouts are isolated
    /// per handler and reported through the diagnostic channel; the call
    /// itself always completes.
    pub async fn publish(&self, key: impl Into<EventKey>, payload: P) {
        let key = key.into();
        let Some(handlers) = self.registry.snapshot(&key) else {
            self.logger
                .debug(format!("[publish] key={key} no subscribers"));
            return;
        };
        self.logger.debug(format!(
            "[publish] key={key} subscribers={}",
            handlers.len()
        ));
        self.settle_batch(handlers.into_iter().map(|h| (key.clone(), h)), payload)
            .await;
    }

    /// Fire-and-forget fan-out to every subscriber of `key`.
    ///
    /// Every delivery is spawned before this returns; completions are not
    /// awaited and no deadline applies. Failures still reach the diagnostic
    /// channel from the detached deliveries.
    ///
    /// Must be called from within a Tokio runtime context.
    pub fn publish_sync(&self, key: impl Into<EventKey>, payload: P) {
        let key = key.into();
        let Some(handlers) = self.registry.snapshot(&key) else {
            self.logger
                .debug(format!("[publish] key={key} no subscribers"));
            return;
        };
        self.logger.debug(format!(
            "[publish] key={key} subscribers={} detached",
            handlers.len()
        ));
        self.spawn_batch(handlers.into_iter().map(|h| (key.clone(), h)), payload);
    }

    /// [`publish`](EventBus::publish) applied to every registered key.
    ///
    /// The whole batch is snapshotted when the call starts; keys added or
    /// removed while it settles are not re-consulted. Failure reports keep
    /// each delivery's own key.
    pub async fn publish_all(&self, payload: P) {
        let entries = self.flatten_all();
        if entries.is_empty() {
            self.logger.debug("[publish-all] no subscribers");
            return;
        }
        self.logger
            .debug(format!("[publish-all] deliveries={}", entries.len()));
        self.settle_batch(entries.into_iter(), payload).await;
    }

    /// [`publish_sync`](EventBus::publish_sync) applied to every registered
    /// key.
    ///
    /// Must be called from within a Tokio runtime context.
    pub fn publish_all_sync(&self, payload: P) {
        let entries = self.flatten_all();
        if entries.is_empty() {
            self.logger.debug("[publish-all] no subscribers");
            return;
        }
        self.logger.debug(format!(
            "[publish-all] deliveries={} detached",
            entries.len()
        ));
        self.spawn_batch(entries.into_iter(), payload);
    }

    /// Unregisters everything on this bus's registry.
    ///
    /// Publishes already in flight captured their snapshot and still
    /// complete.
    pub fn clear(&self) {
        let dropped = self.registry.clear();
        self.logger.info(format!("[clear] keys={dropped}"));
    }

    /// Current subscriber count for `key` (0 when absent).
    #[must_use]
    pub fn subscriber_count(&self, key: impl Into<EventKey>) -> usize {
        self.registry.count(&key.into())
    }

    /// Sorted list of keys that currently hold at least one subscriber.
    #[must_use]
    pub fn keys(&self) -> Vec<EventKey> {
        self.registry.keys()
    }

    /// Flattens the full registry snapshot into `(key, handler)` deliveries.
    fn flatten_all(&self) -> Vec<(EventKey, HandlerRef<P>)> {
        self.registry
            .snapshot_all()
            .into_iter()
            .flat_map(|(key, handlers)| handlers.into_iter().map(move |h| (key.clone(), h)))
            .collect()
    }

    /// Starts one guarded delivery per entry and awaits settlement of all.
    async fn settle_batch(
        &self,
        entries: impl Iterator<Item = (EventKey, HandlerRef<P>)>,
        payload: P,
    ) {
        let deadline = self.config.publish_timeout();
        let deliveries: Vec<_> = entries
            .map(|(key, handler)| {
                deliver::deliver(key, handler, payload.clone(), deadline, self.logger.clone())
            })
            .collect();
        future::join_all(deliveries).await;
    }

    /// Spawns one detached delivery per entry.
    fn spawn_batch(&self, entries: impl Iterator<Item = (EventKey, HandlerRef<P>)>, payload: P) {
        for (key, handler) in entries {
            deliver::deliver_detached(key, handler, payload.clone(), self.logger.clone());
        }
    }
}

/// Handle tied to one `(key, handler)` registration.
///
/// Calling [`unsubscribe`](Subscription::unsubscribe) once removes the
/// registration; further calls are no-ops. Dropping the handle does NOT
/// unsubscribe: a subscription outlives the handle until it is explicitly
/// removed or the registry is cleared.
pub struct Subscription<P> {
    registry: Registry<P>,
    key: EventKey,
    handler: HandlerRef<P>,
    done: AtomicBool,
}

impl<P> Subscription<P> {
    fn active(registry: Registry<P>, key: EventKey, handler: HandlerRef<P>) -> Self {
        Self {
            registry,
            key,
            handler,
            done: AtomicBool::new(false),
        }
    }

    /// Handle for a registration that never happened (capacity rejection);
    /// every call on it is a no-op.
    fn inactive(registry: Registry<P>, key: EventKey, handler: HandlerRef<P>) -> Self {
        Self {
            registry,
            key,
            handler,
            done: AtomicBool::new(true),
        }
    }

    /// The key this handle was created for.
    #[must_use]
    pub fn key(&self) -> &EventKey {
        &self.key
    }

    /// True until [`unsubscribe`](Subscription::unsubscribe) first fires
    /// (false from the start for a capacity-rejected handle).
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.done.load(Ordering::SeqCst)
    }

    /// Removes the registration. Idempotent: only the first call acts.
    ///
    /// Equivalent to one [`EventBus::unsubscribe`] call with the same key
    /// and handler.
    pub fn unsubscribe(&self) {
        if self.done.swap(true, Ordering::SeqCst) {
            return;
        }
        self.registry.remove(&self.key, &self.handler);
    }
}
