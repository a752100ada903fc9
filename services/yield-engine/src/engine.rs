//! Yield Engine — orchestrator
//!
//! Ties the per-family scorers and risk classification together, and owns
//! the lookup semantics: per-market failure isolation for bulk scoring, and
//! first-match, case-insensitive asset lookups that surface a distinct
//! "not found" outcome.

use std::str::FromStr;

use alloy_primitives::Address;

use types::errors::MarketError;
use types::market::{BlockRateMarket, MarketScore, ProtocolFamily, RayRateMarket};

use crate::block_rate;
use crate::classify::{classify_risk, ScoreKind};
use crate::ray_rate;

/// Yield engine configuration
#[derive(Debug, Clone)]
pub struct YieldEngineConfig {
    /// Compounding periods per year for block-rate markets
    pub blocks_per_year: u32,
    /// Fixed-point decimals of block-rate market rates
    pub block_rate_decimals: u32,
}

impl Default for YieldEngineConfig {
    fn default() -> Self {
        Self {
            // ~15-second blocks: 4 * 60 * 24 * 365
            blocks_per_year: 2_102_400,
            block_rate_decimals: 18,
        }
    }
}

/// Yield engine service
#[derive(Debug, Clone, Default)]
pub struct YieldEngine {
    config: YieldEngineConfig,
}

impl YieldEngine {
    /// Create a new yield engine with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new yield engine with custom configuration
    pub fn with_config(config: YieldEngineConfig) -> Self {
        Self { config }
    }

    /// Score a single block-rate market.
    pub fn score_block_rate_market(&self, market: &BlockRateMarket) -> MarketScore {
        let supply_apy = block_rate::supply_apy(
            market.supply_rate_per_block,
            self.config.blocks_per_year,
            self.config.block_rate_decimals,
        );
        let borrow_apy = block_rate::borrow_apy(
            market.borrow_rate_per_block,
            self.config.blocks_per_year,
            self.config.block_rate_decimals,
        );
        let utilization = block_rate::utilization(market.total_borrows, market.total_supply);
        let liquidity_score = block_rate::liquidity_score(market);
        let yield_score = block_rate::yield_score(supply_apy, borrow_apy, utilization);

        score_record(
            market.symbol.clone(),
            market.underlying,
            ProtocolFamily::BlockRate,
            supply_apy,
            borrow_apy,
            utilization,
            liquidity_score,
            yield_score,
        )
    }

    /// Score a single ray-rate market.
    pub fn score_ray_rate_market(&self, market: &RayRateMarket) -> MarketScore {
        let supply_apy = ray_rate::supply_apy(market.liquidity_rate);
        let borrow_apy = ray_rate::borrow_apy(market.variable_borrow_rate);
        let utilization = ray_rate::utilization(market.total_borrowed, market.total_supplied);
        let liquidity_score = ray_rate::liquidity_score(market);
        let yield_score = ray_rate::yield_score(supply_apy, borrow_apy, utilization);

        score_record(
            market.symbol.clone(),
            market.underlying,
            ProtocolFamily::RayRate,
            supply_apy,
            borrow_apy,
            utilization,
            liquidity_score,
            yield_score,
        )
    }

    /// Score every block-rate market fetch outcome.
    ///
    /// One market's fetch failure never aborts the rest; each failure is
    /// surfaced in place so independent markets still score.
    pub fn score_block_rate_markets(
        &self,
        fetches: impl IntoIterator<Item = Result<BlockRateMarket, MarketError>>,
    ) -> Vec<Result<MarketScore, MarketError>> {
        fetches
            .into_iter()
            .map(|fetch| fetch.map(|market| self.score_block_rate_market(&market)))
            .collect()
    }

    /// Score every ray-rate market fetch outcome, isolating failures.
    pub fn score_ray_rate_markets(
        &self,
        fetches: impl IntoIterator<Item = Result<RayRateMarket, MarketError>>,
    ) -> Vec<Result<MarketScore, MarketError>> {
        fetches
            .into_iter()
            .map(|fetch| fetch.map(|market| self.score_ray_rate_market(&market)))
            .collect()
    }

    /// Score the single block-rate market for `asset`.
    ///
    /// `asset` is parsed to an address (rejecting malformed input fast), so
    /// matching is case-insensitive. Iteration stops at the first match;
    /// with a lazy fetch iterator the remaining markets are never fetched.
    /// A missing asset — or a matching asset whose own fetch failed — is
    /// `NotFound`: from the caller's perspective that vault is unavailable.
    pub fn find_block_rate_market(
        &self,
        fetches: impl IntoIterator<Item = (Address, Result<BlockRateMarket, MarketError>)>,
        asset: &str,
    ) -> Result<MarketScore, MarketError> {
        let target = parse_asset(asset)?;
        for (underlying, fetch) in fetches {
            if underlying == target {
                return match fetch {
                    Ok(market) => Ok(self.score_block_rate_market(&market)),
                    Err(_) => Err(not_found(asset)),
                };
            }
        }
        Err(not_found(asset))
    }

    /// Score the single ray-rate market for `asset`. Same lookup semantics
    /// as the block-rate variant.
    pub fn find_ray_rate_market(
        &self,
        fetches: impl IntoIterator<Item = (Address, Result<RayRateMarket, MarketError>)>,
        asset: &str,
    ) -> Result<MarketScore, MarketError> {
        let target = parse_asset(asset)?;
        for (underlying, fetch) in fetches {
            if underlying == target {
                return match fetch {
                    Ok(market) => Ok(self.score_ray_rate_market(&market)),
                    Err(_) => Err(not_found(asset)),
                };
            }
        }
        Err(not_found(asset))
    }
}

fn parse_asset(asset: &str) -> Result<Address, MarketError> {
    Address::from_str(asset).map_err(|_| MarketError::InvalidAsset {
        input: asset.to_owned(),
    })
}

fn not_found(asset: &str) -> MarketError {
    MarketError::NotFound {
        asset: asset.to_owned(),
    }
}

#[allow(clippy::too_many_arguments)]
fn score_record(
    symbol: String,
    underlying: Address,
    protocol: ProtocolFamily,
    supply_apy: f64,
    borrow_apy: f64,
    utilization: f64,
    liquidity_score: f64,
    yield_score: f64,
) -> MarketScore {
    let liquidity_risk = classify_risk(liquidity_score, ScoreKind::Liquidity);
    let yield_risk = classify_risk(yield_score, ScoreKind::Yield);

    MarketScore {
        symbol,
        underlying,
        protocol,
        supply_apy,
        borrow_apy,
        utilization,
        liquidity_score,
        yield_score,
        liquidity_risk,
        yield_risk,
        overall_risk: liquidity_risk.more_severe(yield_risk),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::U256;

    const ASSET: &str = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";

    fn block_market(symbol: &str) -> BlockRateMarket {
        BlockRateMarket {
            symbol: symbol.to_string(),
            underlying: Address::repeat_byte(0xaa),
            supply_rate_per_block: U256::from(11_000_000_000u64),
            borrow_rate_per_block: U256::from(18_000_000_000u64),
            total_supply: U256::from(1_000u64),
            total_borrows: U256::from(600u64),
            collateral_factor: U256::from(750_000_000_000_000_000u64),
            underlying_price: Some(U256::from(1_000_000_000_000_000_000u64)),
        }
    }

    fn ray_market(symbol: &str) -> RayRateMarket {
        RayRateMarket {
            symbol: symbol.to_string(),
            underlying: Address::repeat_byte(0xaa),
            liquidity_rate: U256::from(3u8) * U256::from(10u8).pow(U256::from(25u8)),
            variable_borrow_rate: U256::from(5u8) * U256::from(10u8).pow(U256::from(25u8)),
            total_supplied: U256::from(1_000u64),
            total_borrowed: U256::from(500u64),
            ltv: U256::from(8_000u64),
            price: Some(U256::from(1u8)),
        }
    }

    #[test]
    fn test_score_record_carries_protocol_tag() {
        let engine = YieldEngine::new();
        let block_score = engine.score_block_rate_market(&block_market("USDC"));
        assert_eq!(block_score.protocol, ProtocolFamily::BlockRate);

        let ray_score = engine.score_ray_rate_market(&ray_market("USDC"));
        assert_eq!(ray_score.protocol, ProtocolFamily::RayRate);
    }

    #[test]
    fn test_overall_risk_is_more_severe_label() {
        let engine = YieldEngine::new();
        let score = engine.score_block_rate_market(&block_market("USDC"));
        assert_eq!(
            score.overall_risk,
            score.liquidity_risk.more_severe(score.yield_risk)
        );
        assert!(score.overall_risk >= score.liquidity_risk);
        assert!(score.overall_risk >= score.yield_risk);
    }

    #[test]
    fn test_bulk_scoring_isolates_fetch_failures() {
        let engine = YieldEngine::new();
        let fetches = vec![
            Ok(block_market("USDC")),
            Err(MarketError::Upstream {
                reason: "rpc timeout".to_string(),
            }),
            Ok(block_market("WETH")),
        ];

        let scores = engine.score_block_rate_markets(fetches);
        assert_eq!(scores.len(), 3);
        assert!(scores[0].is_ok());
        assert!(matches!(scores[1], Err(MarketError::Upstream { .. })));
        assert!(scores[2].is_ok());
    }

    #[test]
    fn test_find_matches_case_insensitively() {
        let engine = YieldEngine::new();
        let fetches = vec![(Address::repeat_byte(0xaa), Ok(block_market("USDC")))];

        let upper = ASSET.to_uppercase().replace("0X", "0x");
        let found = engine.find_block_rate_market(fetches, &upper).unwrap();
        assert_eq!(found.symbol, "USDC");
    }

    #[test]
    fn test_find_missing_asset_is_not_found() {
        let engine = YieldEngine::new();
        let fetches = vec![(Address::repeat_byte(0xbb), Ok(block_market("WETH")))];

        let result = engine.find_block_rate_market(fetches, ASSET);
        assert_eq!(
            result,
            Err(MarketError::NotFound {
                asset: ASSET.to_string()
            })
        );
    }

    #[test]
    fn test_find_failed_target_fetch_is_not_found() {
        // The target's own snapshot failed to load: surfaced as NotFound,
        // not as a generic upstream failure
        let engine = YieldEngine::new();
        let fetches = vec![(
            Address::repeat_byte(0xaa),
            Err(MarketError::Upstream {
                reason: "rpc timeout".to_string(),
            }),
        )];

        let result = engine.find_ray_rate_market(fetches, ASSET);
        assert_eq!(
            result,
            Err(MarketError::NotFound {
                asset: ASSET.to_string()
            })
        );
    }

    #[test]
    fn test_find_malformed_asset_fails_fast() {
        let engine = YieldEngine::new();
        let result = engine.find_block_rate_market(vec![], "not-an-address");
        assert_eq!(
            result,
            Err(MarketError::InvalidAsset {
                input: "not-an-address".to_string()
            })
        );
    }

    #[test]
    fn test_find_short_circuits_remaining_fetches() {
        let engine = YieldEngine::new();

        // A lazy iterator that panics if polled past the first match
        let fetches = std::iter::once((Address::repeat_byte(0xaa), Ok(block_market("USDC"))))
            .chain(std::iter::once_with(|| -> (Address, Result<BlockRateMarket, MarketError>) {
                panic!("must not fetch past the first match")
            }));

        let found = engine.find_block_rate_market(fetches, ASSET).unwrap();
        assert_eq!(found.symbol, "USDC");
    }

    #[test]
    fn test_default_config() {
        let config = YieldEngineConfig::default();
        assert_eq!(config.blocks_per_year, 2_102_400);
        assert_eq!(config.block_rate_decimals, 18);
    }
}
