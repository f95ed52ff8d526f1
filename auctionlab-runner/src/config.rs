//! Serializable simulation configuration.
//!
//! A `SimulationConfig` captures everything needed to reproduce a run: the
//! auction parameters, how the bidder population is drawn, the weighted pool
//! of strategies, and the master seed. It round-trips through TOML.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use auctionlab_core::strategy::{create_strategy, ShadingConfig, StrategyConfig};
use auctionlab_core::valuation::DEFAULT_VALUATION_STD_DEV;
use auctionlab_core::{AuctionError, RunId};

/// Errors from loading or validating a config.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config TOML: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("failed to encode config for hashing: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
    #[error("invalid strategy #{index}: {source}")]
    Strategy {
        index: usize,
        #[source]
        source: AuctionError,
    },
}

/// Largest accepted seed: TOML stores integers as i64.
pub const MAX_SEED: u64 = i64::MAX as u64;

/// Complete configuration of one simulation run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationConfig {
    pub auction: AuctionConfig,
    pub population: PopulationConfig,
    pub strategies: Vec<WeightedStrategy>,
}

/// Auctioneer and round parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuctionConfig {
    pub reserve_price: f64,
    /// Seller's own valuation of the item, for surplus reporting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller_valuation: Option<f64>,
    pub num_rounds: usize,
    /// Master seed. Limited to `MAX_SEED` because TOML integers are i64.
    #[serde(default)]
    pub seed: u64,
}

/// How bidder base valuations are drawn.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PopulationConfig {
    pub num_bidders: u32,
    pub valuation_min: f64,
    pub valuation_max: f64,
    /// Std dev of the per-round Gaussian noise around each base valuation.
    #[serde(default = "default_valuation_std_dev")]
    pub valuation_std_dev: f64,
}

/// A pool entry: a strategy and its relative sampling weight.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeightedStrategy {
    #[serde(default = "default_weight")]
    pub weight: f64,
    pub strategy: StrategyConfig,
}

fn default_valuation_std_dev() -> f64 {
    DEFAULT_VALUATION_STD_DEV
}

fn default_weight() -> f64 {
    1.0
}

impl SimulationConfig {
    /// Parse a config from a TOML string and validate it.
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file and validate it.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// The classic setup: reserve 750, seller valuation 1000, 20 bidders
    /// valued U(500, 1500), 5 rounds, equal thirds Nash / proportional / follower.
    pub fn default_preset() -> Self {
        let reserve_price = 750.0;
        let num_bidders = 20;
        let proportional = StrategyConfig::SimpleProportional { risk_factor: 0.85 };
        Self {
            auction: AuctionConfig {
                reserve_price,
                seller_valuation: Some(1000.0),
                num_rounds: 5,
                seed: 42,
            },
            population: PopulationConfig {
                num_bidders,
                valuation_min: 500.0,
                valuation_max: 1500.0,
                valuation_std_dev: DEFAULT_VALUATION_STD_DEV,
            },
            strategies: vec![
                WeightedStrategy {
                    weight: 1.0,
                    strategy: StrategyConfig::NashEquilibrium {
                        shading: ShadingConfig::Linear {
                            num_bidders,
                            reserve_price,
                        },
                    },
                },
                WeightedStrategy {
                    weight: 1.0,
                    strategy: proportional.clone(),
                },
                WeightedStrategy {
                    weight: 1.0,
                    strategy: StrategyConfig::Follower {
                        max_deviation: 10.0,
                        fallback: Box::new(proportional),
                    },
                },
            ],
        }
    }

    /// Check every constraint that would otherwise surface mid-setup.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let a = &self.auction;
        if !a.reserve_price.is_finite() || a.reserve_price < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "reserve_price must be finite and >= 0, got {}",
                a.reserve_price
            )));
        }
        if let Some(v) = a.seller_valuation {
            if !v.is_finite() || v < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "seller_valuation must be finite and >= 0, got {v}"
                )));
            }
        }
        if a.seed > MAX_SEED {
            return Err(ConfigError::Invalid(format!(
                "seed must be <= {MAX_SEED}, got {}",
                a.seed
            )));
        }
        if a.num_rounds == 0 {
            return Err(ConfigError::Invalid("num_rounds must be >= 1".into()));
        }

        let p = &self.population;
        if p.num_bidders == 0 {
            return Err(ConfigError::Invalid("num_bidders must be >= 1".into()));
        }
        if !p.valuation_min.is_finite() || !p.valuation_max.is_finite() {
            return Err(ConfigError::Invalid("valuation range must be finite".into()));
        }
        if p.valuation_min < 0.0 || p.valuation_min > p.valuation_max {
            return Err(ConfigError::Invalid(format!(
                "valuation range must satisfy 0 <= min <= max, got [{}, {}]",
                p.valuation_min, p.valuation_max
            )));
        }
        if !p.valuation_std_dev.is_finite() || p.valuation_std_dev < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "valuation_std_dev must be finite and >= 0, got {}",
                p.valuation_std_dev
            )));
        }

        if self.strategies.is_empty() {
            return Err(ConfigError::Invalid("strategy pool is empty".into()));
        }
        for (index, entry) in self.strategies.iter().enumerate() {
            if !entry.weight.is_finite() || entry.weight <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "strategy #{index} weight must be finite and > 0, got {}",
                    entry.weight
                )));
            }
            create_strategy(&entry.strategy)
                .map_err(|source| ConfigError::Strategy { index, source })?;
        }
        Ok(())
    }

    /// Deterministic content hash of this config (seed included).
    pub fn run_id(&self) -> Result<RunId, ConfigError> {
        // serde_json keeps struct field order, so the encoding is stable.
        let json = serde_json::to_vec(self)?;
        Ok(RunId::from_bytes(&json))
    }
}
