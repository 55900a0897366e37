//! Public address cache and refresh cadence
//!
//! The cache only ever holds a complete, validated address. A failed or
//! timed-out fetch leaves the previous value in place, so the screen shows
//! either the latest good address or the placeholder.

use netglance_protocol::PublicAddress;

use crate::status::UNAVAILABLE;

/// Result of one refresh decision
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FetchOutcome {
    /// The refresh interval has not elapsed; no fetch was attempted
    NotDue,
    /// A fetch succeeded and replaced the cached value
    Refreshed(PublicAddress),
    /// A fetch failed; the cached value (possibly the placeholder) was kept
    KeptStale,
}

/// Cached public address plus the time of the last fetch attempt
#[derive(Debug, Clone)]
pub struct AddressCache {
    address: Option<PublicAddress>,
    /// Uptime (ms) when the last attempt finished
    last_attempt_ms: Option<u64>,
    interval_ms: u64,
}

impl AddressCache {
    /// Create an empty cache that refreshes every `interval_ms`
    pub const fn new(interval_ms: u64) -> Self {
        Self {
            address: None,
            last_attempt_ms: None,
            interval_ms,
        }
    }

    /// Whether a fetch should be attempted at `now_ms`
    ///
    /// Always true before the first attempt.
    pub fn is_due(&self, now_ms: u64) -> bool {
        match self.last_attempt_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) > self.interval_ms,
        }
    }

    /// Record a finished attempt
    ///
    /// The attempt time is updated whether or not the fetch succeeded, so a
    /// failing service is retried once per interval rather than every tick.
    pub fn record(&mut self, now_ms: u64, result: Option<PublicAddress>) -> FetchOutcome {
        self.last_attempt_ms = Some(now_ms);
        match result {
            Some(address) => {
                self.address = Some(address.clone());
                FetchOutcome::Refreshed(address)
            }
            None => FetchOutcome::KeptStale,
        }
    }

    /// Text to display: the last good address or the placeholder
    pub fn label(&self) -> &str {
        self.address
            .as_ref()
            .map(PublicAddress::as_str)
            .unwrap_or(UNAVAILABLE)
    }

    /// Uptime of the last attempt
    pub fn last_attempt_ms(&self) -> Option<u64> {
        self.last_attempt_ms
    }
}
