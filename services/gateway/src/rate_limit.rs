//! Sliding-window rate limiter
//!
//! Per-key request counting over a fixed window. Each key's first request
//! opens a window; requests inside the window increment the count and are
//! refused once the count has reached the maximum. A request after the
//! window has fully elapsed opens a fresh window with a clean count.
//!
//! State is per-key, so the map is sharded (`DashMap`) and each decision
//! holds only its own key's entry.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::{debug, warn};

use crate::error::GatewayError;

/// Default window length: one minute.
pub const DEFAULT_WINDOW_MS: i64 = 60_000;

#[derive(Debug, Clone, Copy)]
struct WindowRecord {
    count: u32,
    window_start_ms: i64,
}

/// Per-key sliding-window rate limiter.
///
/// Instances are independent: two limiters never share counts even for the
/// same key. Time is an explicit `now_ms` argument; the caller owns the
/// clock.
#[derive(Debug)]
pub struct RateLimiter {
    records: DashMap<String, WindowRecord>,
    max_requests: u32,
    window_ms: i64,
}

impl RateLimiter {
    /// Create a limiter allowing `max_requests` per one-minute window.
    pub fn new(max_requests: u32) -> Self {
        Self::with_window(max_requests, DEFAULT_WINDOW_MS)
    }

    /// Create a limiter with an explicit window length.
    pub fn with_window(max_requests: u32, window_ms: i64) -> Self {
        Self {
            records: DashMap::new(),
            max_requests,
            window_ms,
        }
    }

    /// Record a request for `key` at time `now_ms` and report whether it
    /// must be refused.
    ///
    /// The request is counted either way. Returns `true` once `key` has
    /// already made `max_requests` requests in the current window.
    pub fn is_rate_limited(&self, key: &str, now_ms: i64) -> bool {
        match self.records.entry(key.to_owned()) {
            Entry::Vacant(slot) => {
                slot.insert(WindowRecord {
                    count: 1,
                    window_start_ms: now_ms,
                });
                false
            }
            Entry::Occupied(mut slot) => {
                let record = slot.get_mut();
                if now_ms - record.window_start_ms > self.window_ms {
                    record.count = 1;
                    record.window_start_ms = now_ms;
                    return false;
                }
                let prior = record.count;
                record.count = record.count.saturating_add(1);
                let limited = prior >= self.max_requests;
                if limited {
                    warn!(key, count = prior, "rate limit exceeded");
                }
                limited
            }
        }
    }

    /// `Result`-shaped variant of [`is_rate_limited`](Self::is_rate_limited)
    /// for dispatchers that propagate with `?`.
    pub fn check(&self, key: &str, now_ms: i64) -> Result<(), GatewayError> {
        if self.is_rate_limited(key, now_ms) {
            return Err(GatewayError::RateLimitExceeded(key.to_owned()));
        }
        Ok(())
    }

    /// Drop records whose window has fully elapsed.
    ///
    /// Purely a memory reclaim: an expired record and no record decide
    /// requests identically, so sweeping never changes outcomes.
    pub fn sweep(&self, now_ms: i64) {
        let before = self.records.len();
        self.records
            .retain(|_, record| now_ms - record.window_start_ms <= self.window_ms);
        let removed = before - self.records.len();
        if removed > 0 {
            debug!(removed, "swept expired rate-limit records");
        }
    }

    /// Number of keys currently tracked.
    pub fn tracked_keys(&self) -> usize {
        self.records.len()
    }
}
