//! # Subscriber map keyed by event key.
//!
//! [`Registry`] owns the only shared mutable state in the crate: the map from
//! [`EventKey`] to the ordered set of subscribed handlers. A `Registry<P>` is
//! a handle; clones share the same map, which is how several buses can serve
//! the same subscriptions.
//!
//! ## Rules
//! - Handler identity is `Arc` pointer identity: adding the same handle twice
//!   keeps one entry, and removal matches by pointer, never by value.
//! - Per-key order is insertion order.
//! - A key exists iff its set is non-empty. The last removal for a key drops
//!   the key itself, so [`keys`](Registry::keys) and the counters never see
//!   stale empty entries.
//! - The optional per-key cap is enforced in the same critical section as
//!   the insert, so concurrent adds cannot overshoot it.
//! - Reads hand out snapshots; later mutations do not affect a snapshot
//!   already taken.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;

use crate::handlers::HandlerRef;

use super::key::EventKey;

/// Process-wide default registries, one slot per payload type.
static SHARED: OnceLock<Mutex<HashMap<TypeId, Box<dyn Any + Send + Sync>>>> = OnceLock::new();

/// What [`Registry::add`] did with the handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// Registered as a new entry under the key.
    Added,
    /// A pointer-identical entry already exists; the map is unchanged.
    Duplicate,
    /// The key already holds the capped number of handlers; the map is
    /// unchanged.
    AtCapacity,
}

/// Shared-state handle to a subscriber map over payloads of type `P`.
pub struct Registry<P> {
    inner: Arc<Mutex<HashMap<EventKey, Vec<HandlerRef<P>>>>>,
}

impl<P> Clone for Registry<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P> Default for Registry<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Registry<P> {
    /// Creates a fresh, isolated registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Adds `handler` under `key`, honoring an optional per-key cap.
    ///
    /// The duplicate scan, the cap check, and the insert share one lock
    /// acquisition, so concurrent adds cannot push a key past `limit`. A
    /// pointer-identical entry reports [`AddOutcome::Duplicate`] whether or
    /// not the key is full; `limit: None` means uncapped. A rejected add
    /// never creates the key.
    pub fn add(&self, key: &EventKey, handler: &HandlerRef<P>, limit: Option<usize>) -> AddOutcome {
        let mut map = self.inner.lock();
        let len = match map.get(key) {
            Some(set) if set.iter().any(|h| Arc::ptr_eq(h, handler)) => {
                return AddOutcome::Duplicate;
            }
            Some(set) => set.len(),
            None => 0,
        };
        if limit.is_some_and(|cap| len >= cap) {
            return AddOutcome::AtCapacity;
        }
        map.entry(key.clone()).or_default().push(Arc::clone(handler));
        AddOutcome::Added
    }

    /// Removes the pointer-identical `handler` from `key`, dropping the key
    /// once its set empties.
    ///
    /// Returns `false` when the key or the handler was not registered.
    pub fn remove(&self, key: &EventKey, handler: &HandlerRef<P>) -> bool {
        let mut map = self.inner.lock();
        let Some(set) = map.get_mut(key) else {
            return false;
        };
        let Some(pos) = set.iter().position(|h| Arc::ptr_eq(h, handler)) else {
            return false;
        };
        set.remove(pos);
        if set.is_empty() {
            map.remove(key);
        }
        true
    }

    /// Returns a snapshot of the handlers under `key`, in insertion order.
    #[must_use]
    pub fn snapshot(&self, key: &EventKey) -> Option<Vec<HandlerRef<P>>> {
        self.inner.lock().get(key).cloned()
    }

    /// Returns a snapshot of every key with its handlers, sorted by key.
    #[must_use]
    pub fn snapshot_all(&self) -> Vec<(EventKey, Vec<HandlerRef<P>>)> {
        let mut entries: Vec<(EventKey, Vec<HandlerRef<P>>)> = self
            .inner
            .lock()
            .iter()
            .map(|(key, set)| (key.clone(), set.clone()))
            .collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    /// Returns the number of handlers under `key` (0 when absent).
    #[must_use]
    pub fn count(&self, key: &EventKey) -> usize {
        self.inner.lock().get(key).map_or(0, Vec::len)
    }

    /// Returns the sorted list of keys that currently hold subscribers.
    #[must_use]
    pub fn keys(&self) -> Vec<EventKey> {
        let mut keys: Vec<EventKey> = self.inner.lock().keys().cloned().collect();
        keys.sort_unstable();
        keys
    }

    /// Removes every key and handler. Returns the number of keys dropped.
    pub fn clear(&self) -> usize {
        let mut map = self.inner.lock();
        let dropped = map.len();
        map.clear();
        dropped
    }

    /// Number of keys with at least one subscriber.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// True when no key holds a subscriber.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

impl<P: 'static> Registry<P> {
    /// Returns the process-wide default registry for payload type `P`.
    ///
    /// Every call with the same `P` yields handles to the same map, which is
    /// what makes independently constructed buses share subscriptions. Buses
    /// over different payload types never share.
    #[must_use]
    pub fn shared() -> Self {
        let mut slots = SHARED.get_or_init(|| Mutex::new(HashMap::new())).lock();
        let slot = slots
            .entry(TypeId::of::<P>())
            .or_insert_with(|| Box::new(Registry::<P>::new()));
        slot.downcast_ref::<Registry<P>>()
            .expect("shared slot is keyed by TypeId::of::<P>")
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DispatchError;
    use crate::handlers::Handler;
    use async_trait::async_trait;

    struct Noop;

    #[async_trait]
    impl Handler<u32> for Noop {
        async fn call(&self, _payload: u32) -> Result<(), DispatchError> {
            Ok(())
        }
    }

    fn handler() -> HandlerRef<u32> {
        Arc::new(Noop)
    }

    #[test]
    fn test_add_is_idempotent_per_handle() {
        let reg: Registry<u32> = Registry::new();
        let key = EventKey::from("a");
        let h = handler();

        assert_eq!(reg.add(&key, &h, None), AddOutcome::Added);
        assert_eq!(reg.add(&key, &h, None), AddOutcome::Duplicate);
        assert_eq!(reg.count(&key), 1);
    }

    #[test]
    fn test_distinct_handles_both_register() {
        let reg: Registry<u32> = Registry::new();
        let key = EventKey::from("a");

        assert_eq!(reg.add(&key, &handler(), None), AddOutcome::Added);
        assert_eq!(reg.add(&key, &handler(), None), AddOutcome::Added);
        assert_eq!(reg.count(&key), 2);
    }

    #[test]
    fn test_remove_last_handler_drops_the_key() {
        let reg: Registry<u32> = Registry::new();
        let key = EventKey::from("a");
        let h = handler();

        reg.add(&key, &h, None);
        assert!(reg.remove(&key, &h));
        assert_eq!(reg.count(&key), 0);
        assert!(reg.keys().is_empty());
        assert!(reg.is_empty());

        assert!(!reg.remove(&key, &h));
    }

    #[test]
    fn test_remove_matches_by_pointer_identity() {
        let reg: Registry<u32> = Registry::new();
        let key = EventKey::from("a");
        let registered = handler();
        let stranger = handler();

        reg.add(&key, &registered, None);
        assert!(!reg.remove(&key, &stranger));
        assert_eq!(reg.count(&key), 1);
    }

    #[test]
    fn test_capped_add_stops_new_registrations_only() {
        let reg: Registry<u32> = Registry::new();
        let key = EventKey::from("a");
        let first = handler();

        assert_eq!(reg.add(&key, &first, Some(1)), AddOutcome::Added);
        assert_eq!(reg.add(&key, &handler(), Some(1)), AddOutcome::AtCapacity);
        // A handler already present is a duplicate even at a full key.
        assert_eq!(reg.add(&key, &first, Some(1)), AddOutcome::Duplicate);
        assert_eq!(reg.count(&key), 1);
    }

    #[test]
    fn test_rejected_add_leaves_no_empty_key() {
        let reg: Registry<u32> = Registry::new();
        let key = EventKey::from("a");

        assert_eq!(reg.add(&key, &handler(), Some(0)), AddOutcome::AtCapacity);
        assert!(reg.keys().is_empty());
        assert_eq!(reg.len(), 0);
    }

    #[test]
    fn test_concurrent_adds_never_exceed_the_cap() {
        let reg: Registry<u32> = Registry::new();
        let key = EventKey::from("contested");
        let barrier = Arc::new(std::sync::Barrier::new(8));

        let threads: Vec<_> = (0..8)
            .map(|_| {
                let reg = reg.clone();
                let key = key.clone();
                let barrier = Arc::clone(&barrier);
                let h = handler();
                std::thread::spawn(move || {
                    barrier.wait();
                    reg.add(&key, &h, Some(1))
                })
            })
            .collect();

        let added = threads
            .into_iter()
            .map(|t| t.join().unwrap())
            .filter(|outcome| *outcome == AddOutcome::Added)
            .count();

        assert_eq!(added, 1);
        assert_eq!(reg.count(&key), 1);
    }

    #[test]
    fn test_snapshot_is_isolated_from_later_mutation() {
        let reg: Registry<u32> = Registry::new();
        let key = EventKey::from("a");

        reg.add(&key, &handler(), None);
        let snap = reg.snapshot(&key).unwrap();
        reg.add(&key, &handler(), None);

        assert_eq!(snap.len(), 1);
        assert_eq!(reg.count(&key), 2);
    }

    #[test]
    fn test_keys_are_sorted() {
        let reg: Registry<u32> = Registry::new();
        reg.add(&EventKey::from("b"), &handler(), None);
        reg.add(&EventKey::from("a"), &handler(), None);
        reg.add(&EventKey::from("c"), &handler(), None);

        let keys = reg.keys();
        let names: Vec<&str> = keys.iter().map(|k| k.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_clear_reports_dropped_keys() {
        let reg: Registry<u32> = Registry::new();
        reg.add(&EventKey::from("a"), &handler(), None);
        reg.add(&EventKey::from("b"), &handler(), None);
        assert_eq!(reg.len(), 2);

        assert_eq!(reg.clear(), 2);
        assert!(reg.is_empty());
        assert_eq!(reg.clear(), 0);
    }

    #[test]
    fn test_clones_share_the_map() {
        let reg: Registry<u32> = Registry::new();
        let alias = reg.clone();
        let key = EventKey::from("a");

        reg.add(&key, &handler(), None);
        assert_eq!(alias.count(&key), 1);

        alias.clear();
        assert!(reg.is_empty());
    }

    #[test]
    fn test_shared_is_per_payload_type() {
        enum LocalPayload {}

        struct LocalNoop;

        #[async_trait]
        impl Handler<LocalPayload> for LocalNoop {
            async fn call(&self, _payload: LocalPayload) -> Result<(), DispatchError> {
                Ok(())
            }
        }

        let first: Registry<LocalPayload> = Registry::shared();
        let second: Registry<LocalPayload> = Registry::shared();
        let key = EventKey::from("joint");
        let h: HandlerRef<LocalPayload> = Arc::new(LocalNoop);

        first.add(&key, &h, None);
        assert_eq!(second.count(&key), 1);

        second.remove(&key, &h);
        assert_eq!(first.count(&key), 0);
    }
}
