//! Factory system — converts serializable `StrategyConfig` into runtime strategies.
//!
//! Configs are plain data (TOML/JSON friendly); every parameter is validated
//! here, so a config that builds once builds every time.

use serde::{Deserialize, Serialize};

use crate::error::AuctionError;

use super::{BiddingStrategy, Follower, NashEquilibrium, SimpleProportional, DEFAULT_MAX_DEVIATION};

/// Serializable description of a bidding strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StrategyConfig {
    NashEquilibrium {
        shading: ShadingConfig,
    },
    SimpleProportional {
        risk_factor: f64,
    },
    Follower {
        #[serde(default = "default_max_deviation")]
        max_deviation: f64,
        fallback: Box<StrategyConfig>,
    },
}

/// Serializable shading rule for `StrategyConfig::NashEquilibrium`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum ShadingConfig {
    Linear {
        num_bidders: u32,
        reserve_price: f64,
    },
    UniformBounds {
        lower: f64,
        upper: f64,
        num_bidders: u32,
    },
}

fn default_max_deviation() -> f64 {
    DEFAULT_MAX_DEVIATION
}

impl StrategyConfig {
    /// Report label, identical to `BiddingStrategy::name` of the built strategy.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NashEquilibrium { .. } => "nash_equilibrium",
            Self::SimpleProportional { .. } => "simple_proportional",
            Self::Follower { .. } => "follower",
        }
    }
}

/// Create a bidding strategy from a `StrategyConfig`.
pub fn create_strategy(config: &StrategyConfig) -> Result<BiddingStrategy, AuctionError> {
    match config {
        StrategyConfig::NashEquilibrium { shading } => {
            let nash = match *shading {
                ShadingConfig::Linear {
                    num_bidders,
                    reserve_price,
                } => NashEquilibrium::linear(num_bidders, reserve_price)?,
                ShadingConfig::UniformBounds {
                    lower,
                    upper,
                    num_bidders,
                } => NashEquilibrium::uniform_bounds(lower, upper, num_bidders)?,
            };
            Ok(nash.into())
        }
        StrategyConfig::SimpleProportional { risk_factor } => {
            Ok(SimpleProportional::new(*risk_factor)?.into())
        }
        StrategyConfig::Follower {
            max_deviation,
            fallback,
        } => {
            let fallback = create_strategy(fallback)?;
            Ok(Follower::with_max_deviation(fallback, *max_deviation)?.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn follower_toml() -> &'static str {
        r#"
type = "follower"

[fallback]
type = "simple_proportional"
risk_factor = 0.85
"#
    }

    #[test]
    fn follower_config_defaults_max_deviation() {
        let config: StrategyConfig = toml::from_str(follower_toml()).unwrap();
        match &config {
            StrategyConfig::Follower { max_deviation, .. } => assert_eq!(*max_deviation, 10.0),
            other => panic!("unexpected config {other:?}"),
        }
        let strategy = create_strategy(&config).unwrap();
        assert_eq!(strategy.name(), config.label());
    }

    #[test]
    fn nash_config_from_json() {
        let json = r#"{"type":"nash_equilibrium","shading":{"rule":"uniform_bounds","lower":500.0,"upper":1500.0,"num_bidders":20}}"#;
        let config: StrategyConfig = serde_json::from_str(json).unwrap();
        let strategy = create_strategy(&config).unwrap();
        assert_eq!(strategy.name(), "nash_equilibrium");
    }

    #[test]
    fn invalid_parameters_surface_as_errors() {
        let bad_risk = StrategyConfig::SimpleProportional { risk_factor: 1.5 };
        assert_eq!(
            create_strategy(&bad_risk).unwrap_err(),
            AuctionError::InvalidRiskFactor(1.5)
        );

        let bad_fallback = StrategyConfig::Follower {
            max_deviation: 10.0,
            fallback: Box::new(bad_risk),
        };
        assert!(create_strategy(&bad_fallback).is_err());

        let bad_nash = StrategyConfig::NashEquilibrium {
            shading: ShadingConfig::Linear {
                num_bidders: 0,
                reserve_price: 750.0,
            },
        };
        assert_eq!(
            create_strategy(&bad_nash).unwrap_err(),
            AuctionError::InvalidBidderCount
        );
    }

    #[test]
    fn unknown_type_is_rejected_by_serde() {
        let json = r#"{"type":"truthful"}"#;
        assert!(serde_json::from_str::<StrategyConfig>(json).is_err());
    }
}
