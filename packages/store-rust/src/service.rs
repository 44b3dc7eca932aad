//! Cart service facade for collaborating screens.
//!
//! Any screen that mutates the cart (product detail, cart, checkout)
//! receives an `Arc<dyn CartService>` instead of reaching into ambient
//! shared state. The one production implementation is
//! [`GuestCartStore`]; tests substitute their own.

use async_trait::async_trait;
use vitrine_core::CatalogItem;

use crate::storage::guest_cart::{GuestCartLine, GuestCartStore};

/// Cart operations exposed to screens. Used as `Arc<dyn CartService>`.
///
/// Every mutation returns the full updated line list — the caller's new UI
/// state — and never fails: persistence problems degrade internally per
/// the guest cart's failure semantics.
#[async_trait]
pub trait CartService: Send + Sync {
    /// Current cart lines (empty when absent or expired).
    async fn load(&self) -> Vec<GuestCartLine>;

    /// Adds `quantity` of a (product, size) pair, merging with any
    /// existing line.
    async fn add_or_increment(
        &self,
        product_id: &str,
        size: &str,
        quantity: u32,
        product: CatalogItem,
    ) -> Vec<GuestCartLine>;

    /// Sets a line's quantity; zero removes the line.
    async fn update_quantity(
        &self,
        product_id: &str,
        size: &str,
        new_quantity: u32,
    ) -> Vec<GuestCartLine>;

    /// Removes the line for a (product, size) pair.
    async fn remove(&self, product_id: &str, size: &str) -> Vec<GuestCartLine>;

    /// Deletes the cart entirely.
    async fn clear(&self);
}

#[async_trait]
impl CartService for GuestCartStore {
    async fn load(&self) -> Vec<GuestCartLine> {
        GuestCartStore::load(self).await
    }

    async fn add_or_increment(
        &self,
        product_id: &str,
        size: &str,
        quantity: u32,
        product: CatalogItem,
    ) -> Vec<GuestCartLine> {
        GuestCartStore::add_or_increment(self, product_id, size, quantity, product).await
    }

    async fn update_quantity(
        &self,
        product_id: &str,
        size: &str,
        new_quantity: u32,
    ) -> Vec<GuestCartLine> {
        GuestCartStore::update_quantity(self, product_id, size, new_quantity).await
    }

    async fn remove(&self, product_id: &str, size: &str) -> Vec<GuestCartLine> {
        GuestCartStore::remove(self, product_id, size).await
    }

    async fn clear(&self) {
        GuestCartStore::clear(self).await;
    }
}
