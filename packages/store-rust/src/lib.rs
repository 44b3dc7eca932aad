//! `Vitrine` Store — guest cart persistence, key-value engine, and the live catalog feed.

pub mod clock;
pub mod feed;
pub mod service;
pub mod storage;

pub use clock::{ClockSource, SystemClock};
pub use feed::{CatalogFeed, FeedSubscription};
pub use service::CartService;
pub use storage::{
    GuestCartConfig, GuestCartLine, GuestCartSnapshot, GuestCartStore, KeyValueStore,
    MemoryKeyValueStore, GUEST_CART_EXPIRY_MS,
};
