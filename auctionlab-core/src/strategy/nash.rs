//! Nash-equilibrium bid shading for first-price sealed-bid auctions.
//!
//! Two shading formulas circulate under the "Nash equilibrium" name, and they
//! disagree on both parameters and math. Both are available as `ShadingRule`
//! variants; `Linear` is the default used by presets:
//!
//! - `Linear`: bid = v * (n - 1) / n, or the reserve price when n <= 1.
//! - `UniformBounds`: symmetric equilibrium for values drawn from U[a, b],
//!   bid = v - (b - a) / n * (1 - ((v - a) / (b - a))^n).
//!
//! `Custom` plugs in any other shading function.

use crate::error::AuctionError;

/// How a valuation is shaded into a bid.
#[derive(Debug, Clone, Copy)]
pub enum ShadingRule {
    Linear {
        num_bidders: u32,
        reserve_price: f64,
    },
    UniformBounds {
        lower: f64,
        upper: f64,
        num_bidders: u32,
    },
    Custom(fn(f64) -> f64),
}

impl ShadingRule {
    /// Apply the rule. Never divides by zero; the result is clamped to >= 0.
    pub fn shade(&self, valuation: f64) -> f64 {
        let bid = match *self {
            Self::Linear {
                num_bidders,
                reserve_price,
            } => {
                if num_bidders > 1 {
                    let n = num_bidders as f64;
                    valuation * (n - 1.0) / n
                } else {
                    reserve_price
                }
            }
            Self::UniformBounds {
                lower,
                upper,
                num_bidders,
            } => {
                let n = num_bidders as f64;
                let span = upper - lower;
                let ratio = (valuation - lower) / span;
                let exponent = i32::try_from(num_bidders).unwrap_or(i32::MAX);
                let shaded = valuation - span / n * (1.0 - ratio.powi(exponent));
                shaded.min(valuation)
            }
            Self::Custom(f) => f(valuation),
        };
        bid.max(0.0)
    }
}

/// Equilibrium-style shading strategy.
#[derive(Debug, Clone, Copy)]
pub struct NashEquilibrium {
    rule: ShadingRule,
}

impl NashEquilibrium {
    /// Linear shading `v * (n - 1) / n`, falling back to the reserve when n == 1.
    pub fn linear(num_bidders: u32, reserve_price: f64) -> Result<Self, AuctionError> {
        if num_bidders == 0 {
            return Err(AuctionError::InvalidBidderCount);
        }
        if !reserve_price.is_finite() || reserve_price < 0.0 {
            return Err(AuctionError::InvalidReservePrice(reserve_price));
        }
        Ok(Self {
            rule: ShadingRule::Linear {
                num_bidders,
                reserve_price,
            },
        })
    }

    /// Closed-form equilibrium for valuations distributed U[lower, upper].
    pub fn uniform_bounds(lower: f64, upper: f64, num_bidders: u32) -> Result<Self, AuctionError> {
        if num_bidders == 0 {
            return Err(AuctionError::InvalidBidderCount);
        }
        if !lower.is_finite() || !upper.is_finite() || lower >= upper {
            return Err(AuctionError::InvalidBounds { lower, upper });
        }
        Ok(Self {
            rule: ShadingRule::UniformBounds {
                lower,
                upper,
                num_bidders,
            },
        })
    }

    pub fn custom(shade: fn(f64) -> f64) -> Self {
        Self {
            rule: ShadingRule::Custom(shade),
        }
    }

    pub fn rule(&self) -> &ShadingRule {
        &self.rule
    }

    pub fn generate_bid(&self, valuation: f64) -> f64 {
        self.rule.shade(valuation)
    }
}
