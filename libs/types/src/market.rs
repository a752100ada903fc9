//! Lending-market snapshot shapes and score records
//!
//! Two protocol families feed the yield scorer, and their shapes are kept
//! deliberately distinct: the block-rate family quotes 18-decimal per-block
//! rates with an 18-decimal collateral factor, while the ray family quotes
//! 1e27-scaled annual rates with an LTV in basis points. The families use
//! different formulas, score ranges, and conventions; unifying them would
//! blur exactly the differences that matter.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which protocol family produced a score record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProtocolFamily {
    /// Per-block compound-rate convention (18-decimal rates)
    BlockRate,
    /// Ray (1e27) annual-rate convention
    RayRate,
}

/// Categorical risk label, ordered by severity.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    /// The more severe of two labels ("high" beats "moderate" beats "low").
    pub fn more_severe(self, other: RiskLevel) -> RiskLevel {
        self.max(other)
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
        };
        write!(f, "{label}")
    }
}

/// Raw reserve data from a block-rate-family lending market.
///
/// Transient — fetched fresh per request, optionally cached by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRateMarket {
    pub symbol: String,
    /// Underlying asset address (market identifier for lookups)
    pub underlying: Address,
    /// Supply rate per block, 18-decimal fixed point
    pub supply_rate_per_block: U256,
    /// Borrow rate per block, 18-decimal fixed point
    pub borrow_rate_per_block: U256,
    /// Total supplied, raw underlying units
    pub total_supply: U256,
    /// Total borrowed, raw underlying units
    pub total_borrows: U256,
    /// Collateral factor, 18-decimal fixed point
    pub collateral_factor: U256,
    /// Oracle price, 18-decimal fixed point; `None` when the oracle has no quote
    pub underlying_price: Option<U256>,
}

/// Raw reserve data from a ray-rate-family lending market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RayRateMarket {
    pub symbol: String,
    /// Underlying asset address (market identifier for lookups)
    pub underlying: Address,
    /// Supply-side annual rate, ray-scaled (1e27)
    pub liquidity_rate: U256,
    /// Variable borrow annual rate, ray-scaled (1e27)
    pub variable_borrow_rate: U256,
    /// Total supplied, raw underlying units
    pub total_supplied: U256,
    /// Total borrowed, raw underlying units
    pub total_borrowed: U256,
    /// Loan-to-value in basis points
    pub ltv: U256,
    /// Oracle price; `None` when unavailable
    pub price: Option<U256>,
}

/// Computed score record for one market.
///
/// Scores and percentages are display-only heuristics, so f64 is acceptable
/// here — unlike the settlement-critical integer paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketScore {
    pub symbol: String,
    pub underlying: Address,
    pub protocol: ProtocolFamily,
    /// Annualized supply yield, percent
    pub supply_apy: f64,
    /// Annualized borrow cost, percent
    pub borrow_apy: f64,
    /// Borrowed fraction of supplied liquidity, in [0, 1]
    pub utilization: f64,
    /// Liquidity heuristic; 0–120 for block-rate markets, 0–100 for ray markets
    pub liquidity_score: f64,
    /// Yield heuristic, 0–100 for both families
    pub yield_score: f64,
    pub liquidity_risk: RiskLevel,
    pub yield_risk: RiskLevel,
    /// The more severe of the two risk labels
    pub overall_risk: RiskLevel,
}
