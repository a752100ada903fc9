//! Error types for the vault computation core
//!
//! Comprehensive error taxonomy using thiserror. Invalid-input and
//! arithmetic-domain decisions are made once, at the point of computation,
//! and are part of each function's documented contract — callers never need
//! to pre-validate.

use thiserror::Error;

/// Top-level core error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Intent error: {0}")]
    Intent(#[from] IntentError),

    #[error("PnL error: {0}")]
    Pnl(#[from] PnlError),

    #[error("Market error: {0}")]
    Market(#[from] MarketError),
}

/// Intent-hashing errors
///
/// Malformed inputs fail fast here rather than silently producing a wrong
/// commitment hash.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntentError {
    #[error("Invalid address: {input}")]
    InvalidAddress { input: String },

    #[error("Invalid call data hex: {input}")]
    InvalidCallData { input: String },
}

/// Position P&L errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PnlError {
    #[error("Value out of 256-bit range for {field}")]
    ValueOutOfRange { field: &'static str },
}

/// Market scoring errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarketError {
    /// No market matches the requested underlying asset. Distinct from an
    /// empty collection — an expected, common outcome for per-asset queries.
    #[error("Market not found: {asset}")]
    NotFound { asset: String },

    #[error("Invalid asset address: {input}")]
    InvalidAsset { input: String },

    /// A single market's snapshot failed to load. Scoped to that market so
    /// independent lookups can proceed.
    #[error("Upstream fetch failed: {reason}")]
    Upstream { reason: String },
}
