//! Yield Engine Service
//!
//! Computes annualized yield, liquidity-risk and yield-risk scores, and
//! categorical risk labels from raw lending-market data.
//!
//! Two protocol families are scored by deliberately separate modules: the
//! block-rate family compounds an 18-decimal per-block rate, while the ray
//! family reads a 1e27-scaled rate that is already an annual figure. The
//! families also use different score ranges and weight tables, so they share
//! only the "snapshot in, score record out" surface — never formulas.

pub mod block_rate;
pub mod classify;
pub mod engine;
pub mod ray_rate;

pub use engine::{YieldEngine, YieldEngineConfig};
