//! Clock abstraction for guest cart expiry.
//!
//! The cart store checks snapshot age lazily on every read, so its notion
//! of "now" must be injectable: tests replace [`SystemClock`] with a
//! virtual clock and drive time explicitly.

use std::time::{SystemTime, UNIX_EPOCH};

/// Source of the current wall-clock time.
pub trait ClockSource: Send + Sync {
    /// Current time in milliseconds since the Unix epoch.
    fn now(&self) -> u64;
}

/// Production clock backed by `std::time::SystemTime`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl ClockSource for SystemClock {
    fn now(&self) -> u64 {
        // Millisecond timestamps fit in u64 until well past the year 500
        // million; a pre-epoch system clock degrades to 0.
        #[allow(clippy::cast_possible_truncation)]
        {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_millis() as u64
        }
    }
}
