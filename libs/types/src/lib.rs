//! Types library for the vault computation core
//!
//! This library provides the domain types shared across the vault core:
//! intent/batch commitments, vault position accounting, lending-market
//! snapshots, and the error taxonomy.
//!
//! # Modules
//! - `intent`: per-chain call batches and their commitment hashes
//! - `position`: vault position inputs and P&L result types
//! - `market`: lending-market snapshot shapes and score records
//! - `numeric`: fixed-point helpers and decimal-string rendering
//! - `errors`: error taxonomy

// Public modules
pub mod errors;
pub mod intent;
pub mod market;
pub mod numeric;
pub mod position;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::errors::*;
    pub use crate::intent::*;
    pub use crate::market::*;
    pub use crate::numeric::*;
    pub use crate::position::*;
}
