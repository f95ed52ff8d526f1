//! Simulation runner — wires together config, population, engine, and metrics.
//!
//! `run_simulation()` is the single entry point used by the CLI and tests:
//! validate the config, derive independent RNG streams from the seed, draw
//! the population, run the auction, and summarize the outcome.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use auctionlab_core::rng::{AUCTION_STREAM, POPULATION_STREAM};
use auctionlab_core::{
    AuctionEngine, AuctionError, Auctioneer, Bidder, BidderId, RngHierarchy, RoundRecord,
    RoundStats,
};

use crate::config::{ConfigError, SimulationConfig};
use crate::metrics::{seller_surplus, strategy_breakdown, RevenueStats, StrategyBreakdown};
use crate::population::generate_population;

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("auction setup error: {0}")]
    Auction(#[from] AuctionError),
}

/// Current schema version for persisted artifacts.
pub const SCHEMA_VERSION: u32 = 1;

/// One bidder's identity and outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BidderSummary {
    pub id: BidderId,
    pub base_valuation: f64,
    pub strategy: String,
    pub units_won: u32,
}

impl From<&Bidder> for BidderSummary {
    fn from(bidder: &Bidder) -> Self {
        Self {
            id: bidder.id(),
            base_valuation: bidder.base_valuation(),
            strategy: bidder.strategy_name().to_string(),
            units_won: bidder.units_won(),
        }
    }
}

/// Complete result of a single simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Schema version for forward-compatible deserialization.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    /// Hex content hash of the config.
    pub run_id: String,
    pub seed: u64,
    pub config: SimulationConfig,
    pub bidders: Vec<BidderSummary>,
    pub history: Vec<RoundRecord>,
    pub round_stats: Vec<RoundStats>,
    pub revenue: RevenueStats,
    pub breakdown: Vec<StrategyBreakdown>,
    /// Present only when the config sets a seller valuation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller_surplus: Option<f64>,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

impl SimulationResult {
    pub fn bidder(&self, id: BidderId) -> Option<&BidderSummary> {
        self.bidders.iter().find(|b| b.id == id)
    }

    /// Bidders ordered by units won (descending), ties by id.
    pub fn ranked_bidders(&self) -> Vec<&BidderSummary> {
        let mut ranked: Vec<&BidderSummary> = self.bidders.iter().collect();
        ranked.sort_by(|a, b| b.units_won.cmp(&a.units_won).then(a.id.cmp(&b.id)));
        ranked
    }
}

/// Run one simulation end to end. Deterministic for a fixed config.
pub fn run_simulation(config: &SimulationConfig) -> Result<SimulationResult, RunError> {
    config.validate()?;

    let run_id = config.run_id()?;
    let rngs = RngHierarchy::new(config.auction.seed);
    let mut population_rng = rngs.rng_for(&run_id, POPULATION_STREAM, 0);
    let mut auction_rng = rngs.rng_for(&run_id, AUCTION_STREAM, 0);

    let bidders = generate_population(&config.population, &config.strategies, &mut population_rng)?;
    let auctioneer = match config.auction.seller_valuation {
        Some(valuation) => Auctioneer::with_valuation(config.auction.reserve_price, valuation)?,
        None => Auctioneer::new(config.auction.reserve_price)?,
    };

    info!(
        run_id = %run_id.short(),
        seed = config.auction.seed,
        bidders = bidders.len(),
        rounds = config.auction.num_rounds,
        "starting simulation"
    );

    let mut engine = AuctionEngine::new(auctioneer, bidders, config.auction.num_rounds)?;
    engine.run(&mut auction_rng);

    let bidders: Vec<BidderSummary> = engine.bidders().iter().map(BidderSummary::from).collect();
    let history = engine.history().to_vec();
    let revenue = RevenueStats::compute(&history);
    let breakdown = strategy_breakdown(&bidders, &history);
    let surplus = config
        .auction
        .seller_valuation
        .map(|v| seller_surplus(&history, v));

    info!(
        run_id = %run_id.short(),
        sold = revenue.sold_rounds,
        revenue = revenue.total_revenue,
        "simulation finished"
    );

    Ok(SimulationResult {
        schema_version: SCHEMA_VERSION,
        run_id: run_id.to_hex(),
        seed: config.auction.seed,
        config: config.clone(),
        bidders,
        history,
        round_stats: engine.round_stats().to_vec(),
        revenue,
        breakdown,
        seller_surplus: surplus,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_runs_every_round() {
        let config = SimulationConfig::default_preset();
        let result = run_simulation(&config).unwrap();
        assert_eq!(result.schema_version, SCHEMA_VERSION);
        assert_eq!(result.history.len(), config.auction.num_rounds);
        assert_eq!(result.round_stats.len(), config.auction.num_rounds);
        assert_eq!(result.bidders.len(), config.population.num_bidders as usize);
        assert_eq!(result.run_id, config.run_id().unwrap().to_hex());
        assert!(result.seller_surplus.is_some());
    }

    #[test]
    fn invalid_config_is_rejected_before_running() {
        let mut config = SimulationConfig::default_preset();
        config.auction.num_rounds = 0;
        assert!(matches!(run_simulation(&config), Err(RunError::Config(_))));
    }

    #[test]
    fn surplus_absent_without_seller_valuation() {
        let mut config = SimulationConfig::default_preset();
        config.auction.seller_valuation = None;
        let result = run_simulation(&config).unwrap();
        assert!(result.seller_surplus.is_none());
    }

    #[test]
    fn ranked_bidders_orders_by_wins() {
        let result = run_simulation(&SimulationConfig::default_preset()).unwrap();
        let ranked = result.ranked_bidders();
        for pair in ranked.windows(2) {
            assert!(pair[0].units_won >= pair[1].units_won);
        }
    }
}
