//! Position P&L Calculator — exact fixed-point vault accounting
//!
//! Converts share balance + exchange rate + cost basis into exact
//! profit/loss figures and display strings. All arithmetic is 256-bit
//! integer with truncating division; vault share amounts routinely exceed
//! the safe-integer range of f64, so no floating point is used.
//!
//! Invariants, as exact integer equalities:
//! - `unrealized == underlying_value - cost_basis`
//! - `total == realized + unrealized`

use alloy_primitives::{I256, U256};

use types::errors::PnlError;
use types::numeric::{format_units, pow10, WAD_DECIMALS};
use types::position::{PositionPnl, VaultPosition};

/// Percentage figures are always rendered at 18 decimals; they are ratios,
/// not asset amounts.
const PCT_DECIMALS: u8 = 18;

/// Compute P&L for a position with no extra intermediate precision.
pub fn compute_position_pnl(position: &VaultPosition) -> Result<PositionPnl, PnlError> {
    compute_position_pnl_with_precision(position, 0)
}

/// Compute P&L for a position.
///
/// The underlying value is
/// `share_balance * rate * 10^extra_precision / 10^18 / 10^extra_precision`,
/// truncating at each division in that order. With `extra_precision = 0`
/// this reduces to `share_balance * rate / 10^18`.
///
/// Percentage fields are `None` when the cost basis is zero (an undefined
/// ratio, not an error). Inputs whose exact result exceeds the 256-bit
/// range return `PnlError::ValueOutOfRange` instead of truncating.
pub fn compute_position_pnl_with_precision(
    position: &VaultPosition,
    extra_precision: u32,
) -> Result<PositionPnl, PnlError> {
    let underlying_value_raw =
        underlying_value(position.share_balance, position.rate, extra_precision)?;

    let underlying_i = to_signed(underlying_value_raw, "underlying_value")?;
    let cost_basis_i = to_signed(position.cost_basis, "cost_basis")?;

    // Both operands are non-negative and below 2^255, so the difference
    // cannot overflow the signed range.
    let unrealized_pnl_raw = underlying_i - cost_basis_i;

    let total_pnl_raw = position
        .realized_pnl
        .checked_add(unrealized_pnl_raw)
        .ok_or(PnlError::ValueOutOfRange { field: "total_pnl" })?;

    let pnl_pct_scaled = if position.cost_basis.is_zero() {
        None
    } else {
        // total * 1e18 / cost_basis, truncating toward zero
        let wad = I256::from_raw(pow10(WAD_DECIMALS));
        let scaled = total_pnl_raw
            .checked_mul(wad)
            .ok_or(PnlError::ValueOutOfRange { field: "pnl_pct" })?
            / cost_basis_i;
        Some(scaled)
    };

    let decimals = position.asset_decimals;
    Ok(PositionPnl {
        underlying_value_raw,
        unrealized_pnl_raw,
        total_pnl_raw,
        pnl_pct_scaled,
        underlying_value: format_units(underlying_i, decimals),
        unrealized_pnl: format_units(unrealized_pnl_raw, decimals),
        total_pnl: format_units(total_pnl_raw, decimals),
        pnl_pct: pnl_pct_scaled.map(|pct| format_units(pct, PCT_DECIMALS)),
    })
}

/// `floor(floor(share * rate * 10^p / 10^18) / 10^p)` in pure 256-bit
/// arithmetic.
///
/// Splitting the share balance at the wad boundary keeps the computation
/// exact: `floor(s*r*e/W) == (s/W)*r*e + floor((s%W)*r*e/W)` because the
/// first term is an exact multiple of W.
fn underlying_value(
    share_balance: U256,
    rate: U256,
    extra_precision: u32,
) -> Result<U256, PnlError> {
    let wad = pow10(WAD_DECIMALS);
    let extra = pow10(extra_precision);

    let whole_shares = share_balance / wad;
    let remainder = share_balance % wad;

    let head = whole_shares
        .checked_mul(rate)
        .and_then(|v| v.checked_mul(extra))
        .ok_or(PnlError::ValueOutOfRange {
            field: "underlying_value",
        })?;
    let tail = remainder
        .checked_mul(rate)
        .and_then(|v| v.checked_mul(extra))
        .ok_or(PnlError::ValueOutOfRange {
            field: "underlying_value",
        })?
        / wad;

    let scaled = head.checked_add(tail).ok_or(PnlError::ValueOutOfRange {
        field: "underlying_value",
    })?;

    Ok(scaled / extra)
}

fn to_signed(value: U256, field: &'static str) -> Result<I256, PnlError> {
    I256::try_from(value).map_err(|_| PnlError::ValueOutOfRange { field })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_pnl_identities(
            share_balance in any::<u128>(),
            rate in 0u128..10_000_000_000_000_000_000_000,
            cost_basis in any::<u128>(),
            realized in any::<i64>(),
        ) {
            let pos = VaultPosition::new(
                U256::from(share_balance),
                U256::from(rate),
                U256::from(cost_basis),
                I256::try_from(realized).unwrap(),
                18,
            );
            let pnl = compute_position_pnl(&pos).unwrap();

            let underlying = I256::try_from(pnl.underlying_value_raw).unwrap();
            let cost = I256::try_from(pos.cost_basis).unwrap();
            prop_assert_eq!(pnl.unrealized_pnl_raw, underlying - cost);
            prop_assert_eq!(
                pnl.total_pnl_raw,
                pos.realized_pnl + pnl.unrealized_pnl_raw
            );
        }

        #[test]
        fn prop_zero_cost_basis_never_defines_percentage(
            share_balance in any::<u128>(),
            rate in any::<u128>(),
        ) {
            let pos = VaultPosition::new(
                U256::from(share_balance),
                U256::from(rate),
                U256::ZERO,
                I256::ZERO,
                18,
            );
            let pnl = compute_position_pnl(&pos).unwrap();
            prop_assert!(pnl.pnl_pct_scaled.is_none());
            prop_assert!(pnl.pnl_pct.is_none());
        }

        #[test]
        fn prop_extra_precision_is_raw_value_neutral(
            share_balance in any::<u64>(),
            rate in any::<u64>(),
            precision in 0u32..12,
        ) {
            let pos = VaultPosition::new(
                U256::from(share_balance),
                U256::from(rate),
                U256::from(1u8),
                I256::ZERO,
                18,
            );
            let base = compute_position_pnl_with_precision(&pos, 0).unwrap();
            let scaled = compute_position_pnl_with_precision(&pos, precision).unwrap();
            prop_assert_eq!(base.underlying_value_raw, scaled.underlying_value_raw);
        }
    }
}
