//! Event keys: the channel names subscriptions and publishes are matched on.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// Name of one logical event channel.
///
/// Keys are opaque strings: any two publishes with equal keys reach the same
/// subscribers, and no pattern matching or hierarchy is applied. The value is
/// an `Arc<str>` inside, so clones are cheap and keys work directly as map
/// keys.
///
/// Bus and registry methods take `impl Into<EventKey>`, which lets string
/// literals flow through:
///
/// ```
/// use eventvisor::EventKey;
///
/// let key = EventKey::from("orders");
/// assert_eq!(key.as_str(), "orders");
/// assert_eq!(key.to_string(), "orders");
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventKey(Arc<str>);

impl EventKey {
    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EventKey {
    fn from(s: &str) -> Self {
        EventKey(Arc::from(s))
    }
}

impl From<String> for EventKey {
    fn from(s: String) -> Self {
        EventKey(Arc::from(s))
    }
}

impl From<&EventKey> for EventKey {
    fn from(key: &EventKey) -> Self {
        key.clone()
    }
}

impl From<Arc<str>> for EventKey {
    fn from(s: Arc<str>) -> Self {
        EventKey(s)
    }
}

impl Borrow<str> for EventKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EventKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for EventKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}
