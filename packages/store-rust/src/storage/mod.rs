//! Guest cart storage: the key-value persistence contract, the persisted
//! snapshot types, and the cart store that ties them together.
//!
//! Two layers, mirroring the split between device persistence and cart
//! semantics:
//!
//! - [`KeyValueStore`]: narrow async string key-value contract over the
//!   external persistence layer
//! - [`GuestCartStore`]: cart operations with lazy expiry and degraded-
//!   persistence failure semantics

pub mod guest_cart;
pub mod kv;

pub use guest_cart::*;
pub use kv::*;
