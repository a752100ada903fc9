//! Gateway support utilities
//!
//! In-process request protection for the vault BFF routes: a bounded TTL
//! cache with FIFO eviction and a sliding-window rate limiter. Both are
//! explicitly constructed, caller-owned instances — never hidden globals —
//! so tests and dispatchers control their lifecycle.
//!
//! Both take the current time as an explicit `now_ms` argument; the caller
//! owns the clock.

pub mod cache;
pub mod error;
pub mod rate_limit;

pub use cache::TtlCache;
pub use error::GatewayError;
pub use rate_limit::RateLimiter;
