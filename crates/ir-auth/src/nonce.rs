//! Per-client nonce counter

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

/// Monotonic nonce sequence owned by a single client
///
/// Seeded once from the wall clock; every later value is pure arithmetic, so
/// the sequence keeps increasing regardless of clock resolution or skew.
/// Each client owns its own source. Two sources signing for the same API key
/// will eventually collide and the exchange rejects stale nonces.
#[derive(Debug)]
pub struct NonceSource {
    next: AtomicU64,
}

impl NonceSource {
    /// Create a source seeded with the current time in milliseconds
    pub fn new() -> Self {
        let millis = Utc::now().timestamp_millis().max(0) as u64;
        Self::starting_at(millis)
    }

    /// Create a source whose first nonce is `initial`
    pub fn starting_at(initial: u64) -> Self {
        Self {
            next: AtomicU64::new(initial),
        }
    }

    /// Take the next nonce
    ///
    /// Read and increment happen as one atomic step, so concurrent callers
    /// always receive distinct values.
    pub fn next(&self) -> u64 {
        self.next.fetch_add(1, Ordering::SeqCst)
    }

    /// Value the next call to [`NonceSource::next`] will return
    pub fn peek(&self) -> u64 {
        self.next.load(Ordering::SeqCst)
    }
}

impl Default for NonceSource {
    fn default() -> Self {
        Self::new()
    }
}
