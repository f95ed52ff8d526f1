//! Simple proportional shading: bid a fixed fraction of the valuation.

use crate::error::AuctionError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimpleProportional {
    /// Fraction of the valuation to bid, in (0, 1].
    pub risk_factor: f64,
}

impl SimpleProportional {
    pub fn new(risk_factor: f64) -> Result<Self, AuctionError> {
        if !(risk_factor > 0.0 && risk_factor <= 1.0) {
            return Err(AuctionError::InvalidRiskFactor(risk_factor));
        }
        Ok(Self { risk_factor })
    }

    pub fn generate_bid(&self, valuation: f64) -> f64 {
        (valuation * self.risk_factor).max(0.0)
    }
}
