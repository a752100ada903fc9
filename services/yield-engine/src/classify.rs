//! Risk classification and shared symbol heuristics
//!
//! Thresholds differ by score kind and are fixed business rules:
//! liquidity scores classify at 40/80, yield scores at 33/66.

use types::market::RiskLevel;

/// Which scoring dimension a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreKind {
    Liquidity,
    Yield,
}

/// Stablecoin symbols matched (case-insensitively, as substrings) when
/// scoring liquidity. Stable-denominated markets carry less exit risk.
pub const STABLECOIN_SYMBOLS: &[&str] = &[
    "USDC", "USDT", "DAI", "USDS", "FRAX", "LUSD", "GUSD", "USDE",
];

/// Substring match against the fixed stablecoin set, case-insensitive.
pub fn is_stablecoin(symbol: &str) -> bool {
    let upper = symbol.to_uppercase();
    STABLECOIN_SYMBOLS.iter().any(|name| upper.contains(name))
}

/// Classify a score into a categorical risk label.
///
/// | Kind      | low  | moderate | high |
/// |-----------|------|----------|------|
/// | liquidity | ≤ 40 | ≤ 80     | > 80 |
/// | yield     | ≤ 33 | ≤ 66     | > 66 |
pub fn classify_risk(score: f64, kind: ScoreKind) -> RiskLevel {
    let (low_max, moderate_max) = match kind {
        ScoreKind::Liquidity => (40.0, 80.0),
        ScoreKind::Yield => (33.0, 66.0),
    };

    if score <= low_max {
        RiskLevel::Low
    } else if score <= moderate_max {
        RiskLevel::Moderate
    } else {
        RiskLevel::High
    }
}
