//! Live catalog feed.
//!
//! The hosted catalog pushes full snapshots on every change; no delta or
//! pagination contract exists. [`CatalogFeed`] holds the latest snapshot
//! behind an [`ArcSwap`] and fans each publish out to registered
//! subscribers. Subscribing returns a [`FeedSubscription`] handle so
//! teardown is explicit and deterministic: dropping the handle (or calling
//! [`FeedSubscription::unsubscribe`]) stops further callbacks.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use arc_swap::ArcSwap;
use dashmap::DashMap;
use vitrine_core::CatalogItem;

/// Callback invoked with each new catalog snapshot.
pub type CatalogCallback = dyn Fn(&[CatalogItem]) + Send + Sync;

/// Push-style source of catalog snapshots.
///
/// Publishing swaps the snapshot first, then notifies subscribers, so a
/// subscriber reading [`CatalogFeed::snapshot`] from its callback always
/// sees data at least as new as the batch it was called with. Callbacks
/// run on the publisher's thread and must not subscribe or unsubscribe
/// from inside the callback (the registry is locked during fan-out).
pub struct CatalogFeed {
    snapshot: ArcSwap<Vec<CatalogItem>>,
    subscribers: Arc<DashMap<u64, Box<CatalogCallback>>>,
    next_subscription_id: AtomicU64,
}

impl Default for CatalogFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogFeed {
    /// Creates a feed with an empty snapshot and no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            snapshot: ArcSwap::from_pointee(Vec::new()),
            subscribers: Arc::new(DashMap::new()),
            next_subscription_id: AtomicU64::new(0),
        }
    }

    /// The latest published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Vec<CatalogItem>> {
        self.snapshot.load_full()
    }

    /// Registers `callback` and immediately invokes it with the current
    /// snapshot, mirroring the upstream store's subscribe semantics.
    ///
    /// The callback fires on every subsequent [`publish`](Self::publish)
    /// until the returned handle is dropped or unsubscribed.
    pub fn subscribe<F>(&self, callback: F) -> FeedSubscription
    where
        F: Fn(&[CatalogItem]) + Send + Sync + 'static,
    {
        let current = self.snapshot.load_full();
        callback(current.as_slice());

        let id = self.next_subscription_id.fetch_add(1, Ordering::Relaxed);
        self.subscribers.insert(id, Box::new(callback));
        FeedSubscription {
            id,
            subscribers: Arc::downgrade(&self.subscribers),
        }
    }

    /// Publishes a new full snapshot and notifies every subscriber.
    pub fn publish(&self, items: Vec<CatalogItem>) {
        let snapshot = Arc::new(items);
        self.snapshot.store(Arc::clone(&snapshot));
        for entry in self.subscribers.iter() {
            (entry.value())(snapshot.as_slice());
        }
    }

    /// Decodes raw catalog documents and publishes the decodable ones.
    ///
    /// A document that fails to decode is skipped with a warning; the rest
    /// of the batch still goes out. This is the malformed-item firewall:
    /// one bad document never blanks the storefront.
    pub fn publish_documents(&self, documents: Vec<serde_json::Value>) {
        let mut items = Vec::with_capacity(documents.len());
        for document in documents {
            match CatalogItem::from_document(document) {
                Ok(item) => items.push(item),
                Err(error) => {
                    tracing::warn!(%error, "skipping malformed catalog document");
                }
            }
        }
        self.publish(items);
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

/// Handle for one feed subscription.
///
/// Dropping the handle unsubscribes; [`unsubscribe`](Self::unsubscribe)
/// does the same with intent spelled out at the call site.
pub struct FeedSubscription {
    id: u64,
    subscribers: Weak<DashMap<u64, Box<CatalogCallback>>>,
}

impl FeedSubscription {
    /// Stops further callbacks. Consumes the handle.
    pub fn unsubscribe(self) {
        // Drop does the work.
    }
}

impl Drop for FeedSubscription {
    fn drop(&mut self) {
        if let Some(subscribers) = self.subscribers.upgrade() {
            subscribers.remove(&self.id);
        }
    }
}
