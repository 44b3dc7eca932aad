//! Guest cart: a locally persisted, time-boxed line-item collection.
//!
//! Unauthenticated shoppers get a cart persisted under a fixed storage key
//! as JSON `{ "items": [...], "timestamp": millis }`. The snapshot expires
//! three hours after its last save; expiry is enforced lazily on read, not
//! by a background timer. Persistence failures never surface as hard
//! errors: reads degrade to an empty cart, writes are best-effort, and the
//! in-memory line list returned to the caller stays authoritative.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use vitrine_core::CatalogItem;

use crate::clock::{ClockSource, SystemClock};
use crate::storage::kv::KeyValueStore;

/// Snapshot lifetime: three hours, matching a typical browse session.
pub const GUEST_CART_EXPIRY_MS: u64 = 3 * 60 * 60 * 1000;

/// One cart line for a (product, size) pair.
///
/// Carries a denormalized snapshot of the product taken at add time, so the
/// cart stays renderable without a catalog round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestCartLine {
    pub product_id: String,
    pub size: String,
    pub quantity: u32,
    /// Product as it looked when added.
    pub product: CatalogItem,
}

/// The persisted wire shape: line items plus their save time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestCartSnapshot {
    pub items: Vec<GuestCartLine>,
    /// Milliseconds since the Unix epoch at save time.
    pub timestamp: u64,
}

/// Storage key and expiry window for a [`GuestCartStore`].
#[derive(Debug, Clone)]
pub struct GuestCartConfig {
    /// Fixed key the snapshot is persisted under.
    pub storage_key: String,
    /// Snapshot lifetime in milliseconds.
    pub expiry_ms: u64,
}

impl Default for GuestCartConfig {
    fn default() -> Self {
        Self {
            storage_key: "vitrineGuestCart".to_owned(),
            expiry_ms: GUEST_CART_EXPIRY_MS,
        }
    }
}

/// Guest cart operations over an injected persistence layer.
///
/// Every mutation loads the current lines, applies the change in memory,
/// persists best-effort, and returns the updated lines. Callers keep the
/// returned list as UI state; a failed write only means the next session
/// may not see it.
pub struct GuestCartStore {
    persistence: Arc<dyn KeyValueStore>,
    clock: Box<dyn ClockSource>,
    config: GuestCartConfig,
}

impl GuestCartStore {
    /// Store with the default key, three-hour expiry, and system clock.
    #[must_use]
    pub fn new(persistence: Arc<dyn KeyValueStore>) -> Self {
        Self::with_config(persistence, Box::new(SystemClock), GuestCartConfig::default())
    }

    /// Store with an explicit clock and configuration.
    #[must_use]
    pub fn with_config(
        persistence: Arc<dyn KeyValueStore>,
        clock: Box<dyn ClockSource>,
        config: GuestCartConfig,
    ) -> Self {
        Self {
            persistence,
            clock,
            config,
        }
    }

    /// Reads the current cart lines.
    ///
    /// An absent snapshot is an empty cart, not an error. An expired
    /// snapshot is deleted (best-effort) and reported empty. Unreadable or
    /// unparseable payloads degrade to empty with a warning.
    pub async fn load(&self) -> Vec<GuestCartLine> {
        let payload = match self.persistence.get(&self.config.storage_key).await {
            Ok(Some(payload)) => payload,
            Ok(None) => return Vec::new(),
            Err(error) => {
                tracing::warn!(
                    key = %self.config.storage_key,
                    %error,
                    "guest cart read failed; treating as empty"
                );
                return Vec::new();
            }
        };

        let snapshot: GuestCartSnapshot = match serde_json::from_str(&payload) {
            Ok(snapshot) => snapshot,
            Err(error) => {
                tracing::warn!(
                    key = %self.config.storage_key,
                    %error,
                    "guest cart payload unparseable; treating as empty"
                );
                return Vec::new();
            }
        };

        // A snapshot stamped in the future (clock rollback) never expires.
        let age_ms = self.clock.now().saturating_sub(snapshot.timestamp);
        if age_ms > self.config.expiry_ms {
            tracing::debug!(
                key = %self.config.storage_key,
                age_ms,
                "guest cart expired; clearing"
            );
            self.clear().await;
            return Vec::new();
        }

        snapshot.items
    }

    /// Persists `lines` under a fresh timestamp, resetting the snapshot age.
    pub async fn save(&self, lines: &[GuestCartLine]) {
        let snapshot = GuestCartSnapshot {
            items: lines.to_vec(),
            timestamp: self.clock.now(),
        };
        let payload = match serde_json::to_string(&snapshot) {
            Ok(payload) => payload,
            Err(error) => {
                tracing::warn!(
                    key = %self.config.storage_key,
                    %error,
                    "guest cart snapshot failed to encode; keeping in-memory state only"
                );
                return;
            }
        };
        if let Err(error) = self.persistence.set(&self.config.storage_key, &payload).await {
            tracing::warn!(
                key = %self.config.storage_key,
                %error,
                "guest cart write failed; keeping in-memory state only"
            );
        }
    }

    /// Adds `quantity` of a (product, size) pair.
    ///
    /// An existing line for the pair is incremented rather than duplicated;
    /// otherwise a new line is appended carrying `product` as its
    /// denormalized reference. A zero `quantity` is bumped to 1. Returns
    /// the updated lines.
    pub async fn add_or_increment(
        &self,
        product_id: &str,
        size: &str,
        quantity: u32,
        product: CatalogItem,
    ) -> Vec<GuestCartLine> {
        let quantity = quantity.max(1);
        let mut lines = self.load().await;
        let existing = lines
            .iter()
            .position(|line| line.product_id == product_id && line.size == size);
        if let Some(index) = existing {
            lines[index].quantity = lines[index].quantity.saturating_add(quantity);
        } else {
            lines.push(GuestCartLine {
                product_id: product_id.to_owned(),
                size: size.to_owned(),
                quantity,
                product,
            });
        }
        self.save(&lines).await;
        lines
    }

    /// Sets the quantity of a (product, size) line.
    ///
    /// Zero removes the line entirely. A pair with no matching line leaves
    /// the cart unchanged. Returns the updated lines.
    pub async fn update_quantity(
        &self,
        product_id: &str,
        size: &str,
        new_quantity: u32,
    ) -> Vec<GuestCartLine> {
        let mut lines = self.load().await;
        if new_quantity == 0 {
            lines.retain(|line| !(line.product_id == product_id && line.size == size));
        } else if let Some(line) = lines
            .iter_mut()
            .find(|line| line.product_id == product_id && line.size == size)
        {
            line.quantity = new_quantity;
        }
        self.save(&lines).await;
        lines
    }

    /// Removes the line for a (product, size) pair. Returns the updated
    /// lines.
    pub async fn remove(&self, product_id: &str, size: &str) -> Vec<GuestCartLine> {
        let mut lines = self.load().await;
        lines.retain(|line| !(line.product_id == product_id && line.size == size));
        self.save(&lines).await;
        lines
    }

    /// Deletes the persisted snapshot entirely (explicit clear, checkout,
    /// or expiry).
    pub async fn clear(&self) {
        if let Err(error) = self.persistence.remove(&self.config.storage_key).await {
            tracing::warn!(
                key = %self.config.storage_key,
                %error,
                "guest cart clear failed"
            );
        }
    }

    /// Sum of line price x quantity across the cart.
    #[must_use]
    pub fn total_price(lines: &[GuestCartLine]) -> f64 {
        lines
            .iter()
            .map(|line| line.product.price * f64::from(line.quantity))
            .sum()
    }
}
