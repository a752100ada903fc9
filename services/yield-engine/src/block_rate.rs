//! Scoring for the block-rate protocol family
//!
//! Markets in this family quote an 18-decimal rate accrued per block, so the
//! annualized yield compounds the per-block rate over the blocks in a year.
//! Liquidity scores for this family live on a 0–120 scale.

use alloy_primitives::{Address, U256};

use types::market::BlockRateMarket;
use types::numeric::to_f64;

use crate::classify::is_stablecoin;

/// Maximum liquidity score for this family.
pub const MAX_LIQUIDITY_SCORE: f64 = 120.0;

/// Fixed-point precision of the integer utilization ratio.
const RATIO_PRECISION: u64 = 1_000_000;

/// Compound-interest annualization of a per-block rate, as a percentage:
/// `((1 + rate/10^decimals)^periods - 1) * 100`.
pub fn supply_apy(rate_per_block: U256, periods_per_year: u32, decimals: u32) -> f64 {
    annualize(rate_per_block, periods_per_year, decimals)
}

/// Borrow-side annualization; same compounding convention as the supply side.
pub fn borrow_apy(rate_per_block: U256, periods_per_year: u32, decimals: u32) -> f64 {
    annualize(rate_per_block, periods_per_year, decimals)
}

fn annualize(rate_per_block: U256, periods_per_year: u32, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    let per_period = to_f64(rate_per_block) / scale;
    ((1.0 + per_period).powf(f64::from(periods_per_year)) - 1.0) * 100.0
}

/// Borrowed fraction of supplied liquidity, in [0, 1].
///
/// Zero supply is defined as zero utilization, never a division error. The
/// ratio is computed as a rounded integer at 6-decimal precision to avoid
/// floating point over large reserve values.
pub fn utilization(total_borrows: U256, total_supply: U256) -> f64 {
    if total_supply.is_zero() {
        return 0.0;
    }

    let precision = U256::from(RATIO_PRECISION);
    let rounded = total_borrows
        .checked_mul(precision)
        .and_then(|scaled| scaled.checked_add(total_supply >> 1))
        .map(|scaled| scaled / total_supply);

    match rounded {
        Some(ratio) => to_f64(ratio) / RATIO_PRECISION as f64,
        // Reserves so large the scaled numerator exceeds 256 bits; the
        // display-only ratio falls back to plain division
        None => to_f64(total_borrows) / to_f64(total_supply),
    }
}

/// Liquidity heuristic for a block-rate market, clamped to 0–120.
///
/// | Factor                   | Contribution                               |
/// |--------------------------|--------------------------------------------|
/// | utilization band         | ≤0.45: 40, ≤0.80: 55, ≤0.92: 30, else 10   |
/// | oracle price available   | +20                                        |
/// | stablecoin underlying    | +25                                        |
/// | collateral factor (1e18) | ≥0.8: +20, ≥0.5: +12, >0: +5               |
pub fn liquidity_score(market: &BlockRateMarket) -> f64 {
    let util = utilization(market.total_borrows, market.total_supply);

    let mut score: f64 = if util <= 0.45 {
        40.0
    } else if util <= 0.80 {
        55.0
    } else if util <= 0.92 {
        30.0
    } else {
        10.0
    };

    if market.underlying_price.is_some() {
        score += 20.0;
    }
    if is_stablecoin(&market.symbol) {
        score += 25.0;
    }

    let collateral_factor = to_f64(market.collateral_factor) / 1e18;
    score += if collateral_factor >= 0.8 {
        20.0
    } else if collateral_factor >= 0.5 {
        12.0
    } else if collateral_factor > 0.0 {
        5.0
    } else {
        0.0
    };

    score.clamp(0.0, MAX_LIQUIDITY_SCORE)
}

/// Yield heuristic for a block-rate market, clamped to 0–100.
///
/// | Term            | Contribution                                     |
/// |-----------------|--------------------------------------------------|
/// | supply APY      | capped at 15%, weight 45                         |
/// | borrow APY      | capped at 25%, weight 20                         |
/// | spread bonus    | borrow−supply ≥4: 15, ≥1.5: 8, >0: 3             |
/// | synergy bonus   | util>0.6 ∧ borrow>5: 20; util>0.4 ∧ borrow>3: 10 |
pub fn yield_score(supply_apy: f64, borrow_apy: f64, utilization: f64) -> f64 {
    let mut score =
        (supply_apy.min(15.0) / 15.0) * 45.0 + (borrow_apy.min(25.0) / 25.0) * 20.0;

    let spread = borrow_apy - supply_apy;
    score += if spread >= 4.0 {
        15.0
    } else if spread >= 1.5 {
        8.0
    } else if spread > 0.0 {
        3.0
    } else {
        0.0
    };

    score += if utilization > 0.6 && borrow_apy > 5.0 {
        20.0
    } else if utilization > 0.4 && borrow_apy > 3.0 {
        10.0
    } else {
        0.0
    };

    score.clamp(0.0, 100.0)
}

/// First market whose underlying matches, or `None`.
///
/// First-match-then-stop: callers iterating lazily can skip fetching the
/// remaining markets once a match is found.
pub fn find_market<'a>(
    markets: &'a [BlockRateMarket],
    underlying: Address,
) -> Option<&'a BlockRateMarket> {
    markets.iter().find(|market| market.underlying == underlying)
}
