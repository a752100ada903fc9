//! Scoring for the ray-rate protocol family
//!
//! Markets in this family quote rates in ray units (1e27) that already
//! express an annual figure, so annualization is a straight rescale — NOT
//! the compound formula of the block-rate family. Liquidity scores for this
//! family live on a 0–100 scale.

use alloy_primitives::{Address, U256};

use types::market::RayRateMarket;
use types::numeric::to_f64;

use crate::classify::is_stablecoin;

/// Maximum liquidity score for this family.
pub const MAX_LIQUIDITY_SCORE: f64 = 100.0;

/// Ray scaling factor (1e27).
const RAY: f64 = 1e27;

/// Basis-point scaling of the LTV field.
const BPS: f64 = 10_000.0;

/// Fixed-point precision of the integer utilization ratio.
const RATIO_PRECISION: u64 = 1_000_000;

/// Annualized supply yield as a percentage: `(rate / 10^27) * 100`.
///
/// The source rate is already a continuously-expressed annual rate in this
/// family's convention; compounding it again would overstate the yield.
pub fn supply_apy(liquidity_rate: U256) -> f64 {
    to_f64(liquidity_rate) / RAY * 100.0
}

/// Annualized variable borrow cost as a percentage.
pub fn borrow_apy(variable_borrow_rate: U256) -> f64 {
    to_f64(variable_borrow_rate) / RAY * 100.0
}

/// Borrowed fraction of supplied liquidity, in [0, 1].
///
/// Zero supply is defined as zero utilization. Same 6-decimal integer-ratio
/// construction as the block-rate family, kept separate by design.
pub fn utilization(total_borrowed: U256, total_supplied: U256) -> f64 {
    if total_supplied.is_zero() {
        return 0.0;
    }

    let precision = U256::from(RATIO_PRECISION);
    let rounded = total_borrowed
        .checked_mul(precision)
        .and_then(|scaled| scaled.checked_add(total_supplied >> 1))
        .map(|scaled| scaled / total_supplied);

    match rounded {
        Some(ratio) => to_f64(ratio) / RATIO_PRECISION as f64,
        None => to_f64(total_borrowed) / to_f64(total_supplied),
    }
}

/// Liquidity heuristic for a ray-rate market, clamped to 0–100.
///
/// | Factor                 | Contribution                              |
/// |------------------------|-------------------------------------------|
/// | utilization band       | ≤0.50: 35, ≤0.85: 45, ≤0.95: 22, else 8   |
/// | oracle price available | +15                                       |
/// | stablecoin underlying  | +20                                       |
/// | LTV (basis points)     | ≥0.75: +20, ≥0.40: +10, else +4           |
pub fn liquidity_score(market: &RayRateMarket) -> f64 {
    let util = utilization(market.total_borrowed, market.total_supplied);

    let mut score: f64 = if util <= 0.50 {
        35.0
    } else if util <= 0.85 {
        45.0
    } else if util <= 0.95 {
        22.0
    } else {
        8.0
    };

    if market.price.is_some() {
        score += 15.0;
    }
    if is_stablecoin(&market.symbol) {
        score += 20.0;
    }

    let ltv = to_f64(market.ltv) / BPS;
    score += if ltv >= 0.75 {
        20.0
    } else if ltv >= 0.40 {
        10.0
    } else {
        4.0
    };

    score.clamp(0.0, MAX_LIQUIDITY_SCORE)
}

/// Yield heuristic for a ray-rate market, clamped to 0–100.
///
/// | Term          | Contribution                                       |
/// |---------------|----------------------------------------------------|
/// | supply APY    | capped at 12%, weight 50                           |
/// | borrow APY    | capped at 20%, weight 18                           |
/// | spread bonus  | borrow−supply ≥3: 12, ≥1: 6, >0: 2                 |
/// | synergy bonus | util>0.65 ∧ borrow>4: 20; util>0.45 ∧ borrow>2.5: 9 |
pub fn yield_score(supply_apy: f64, borrow_apy: f64, utilization: f64) -> f64 {
    let mut score =
        (supply_apy.min(12.0) / 12.0) * 50.0 + (borrow_apy.min(20.0) / 20.0) * 18.0;

    let spread = borrow_apy - supply_apy;
    score += if spread >= 3.0 {
        12.0
    } else if spread >= 1.0 {
        6.0
    } else if spread > 0.0 {
        2.0
    } else {
        0.0
    };

    score += if utilization > 0.65 && borrow_apy > 4.0 {
        20.0
    } else if utilization > 0.45 && borrow_apy > 2.5 {
        9.0
    } else {
        0.0
    };

    score.clamp(0.0, 100.0)
}

/// First market whose underlying matches, or `None`. First-match-then-stop.
pub fn find_market<'a>(
    markets: &'a [RayRateMarket],
    underlying: Address,
) -> Option<&'a RayRateMarket> {
    markets.iter().find(|market| market.underlying == underlying)
}
