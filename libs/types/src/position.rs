//! Vault position accounting types
//!
//! A `VaultPosition` is the raw on-chain-shaped input for P&L accounting:
//! share balance, exchange rate, cost basis, and realized P&L. The derived
//! figures live in `PositionPnl`, never in stored state.

use alloy_primitives::{I256, U256};
use serde::{Deserialize, Serialize};

/// A user's vault holding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultPosition {
    /// Share balance, 18-decimal fixed point
    pub share_balance: U256,
    /// Underlying per share, 18-decimal fixed point
    pub rate: U256,
    /// Originally deposited underlying amount, in the asset's native decimals
    pub cost_basis: U256,
    /// Realized P&L to date, same precision as `cost_basis`
    pub realized_pnl: I256,
    /// Underlying asset decimals, used for display rendering
    pub asset_decimals: u8,
}

impl VaultPosition {
    pub fn new(
        share_balance: U256,
        rate: U256,
        cost_basis: U256,
        realized_pnl: I256,
        asset_decimals: u8,
    ) -> Self {
        Self {
            share_balance,
            rate,
            cost_basis,
            realized_pnl,
            asset_decimals,
        }
    }
}

/// Exact P&L figures for a position, with display strings.
///
/// Invariants: `total_pnl_raw == realized + unrealized` and
/// `unrealized_pnl_raw == underlying_value_raw - cost_basis`, as integer
/// equalities. The percentage fields are `None` when the cost basis is zero —
/// a distinct "undefined" state, not zero and not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionPnl {
    /// Current underlying value, native decimals
    pub underlying_value_raw: U256,
    /// Signed unrealized P&L, native decimals
    pub unrealized_pnl_raw: I256,
    /// Signed total P&L, native decimals
    pub total_pnl_raw: I256,
    /// Total P&L over cost basis, 18-decimal fixed point
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pnl_pct_scaled: Option<I256>,

    /// Display string at asset decimals
    pub underlying_value: String,
    /// Display string at asset decimals
    pub unrealized_pnl: String,
    /// Display string at asset decimals
    pub total_pnl: String,
    /// Display string, always at 18 decimals (a ratio, not an asset amount)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pnl_pct: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_construction() {
        let pos = VaultPosition::new(
            U256::from(10u8),
            U256::from(2u8),
            U256::from(5u8),
            I256::ZERO,
            18,
        );
        assert_eq!(pos.share_balance, U256::from(10u8));
        assert_eq!(pos.asset_decimals, 18);
    }

    #[test]
    fn test_pnl_percentage_absent_in_json() {
        let pnl = PositionPnl {
            underlying_value_raw: U256::ZERO,
            unrealized_pnl_raw: I256::ZERO,
            total_pnl_raw: I256::ZERO,
            pnl_pct_scaled: None,
            underlying_value: "0".to_string(),
            unrealized_pnl: "0".to_string(),
            total_pnl: "0".to_string(),
            pnl_pct: None,
        };
        let json = serde_json::to_string(&pnl).unwrap();
        // Undefined percentage is omitted, not rendered as null or zero
        assert!(!json.contains("pnl_pct"));
    }
}
