//! AuctionLab Runner — simulation orchestration, metrics, and artifacts.
//!
//! This crate builds on `auctionlab-core` to provide:
//! - TOML simulation configs with a default preset
//! - Weighted bidder population generation
//! - Single-run orchestration with deterministic RNG streams
//! - Revenue statistics and per-strategy breakdowns
//! - JSON/CSV/Markdown export

pub mod config;
pub mod export;
pub mod metrics;
pub mod population;
pub mod runner;

pub use config::{AuctionConfig, ConfigError, MAX_SEED, PopulationConfig, SimulationConfig, WeightedStrategy};
pub use export::{
    export_bidders_csv, export_history_csv, export_json, import_json, load_artifacts,
    render_markdown, save_artifacts,
};
pub use metrics::{seller_surplus, strategy_breakdown, RevenueStats, RevenueSummary, StrategyBreakdown};
pub use population::generate_population;
pub use runner::{run_simulation, BidderSummary, RunError, SimulationResult, SCHEMA_VERSION};
