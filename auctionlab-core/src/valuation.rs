//! Per-round private valuations.
//!
//! Each round a bidder's valuation is its fixed base valuation perturbed by
//! zero-mean Gaussian noise, clamped below at zero. Draws are memoryless; the
//! caller supplies the random source.

use rand::Rng;
use rand_distr::StandardNormal;

use crate::error::AuctionError;

/// Default standard deviation of the valuation noise.
pub const DEFAULT_VALUATION_STD_DEV: f64 = 50.0;

/// Gaussian valuation noise around a base valuation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValuationSource {
    std_dev: f64,
}

impl ValuationSource {
    pub fn new(std_dev: f64) -> Result<Self, AuctionError> {
        if !std_dev.is_finite() || std_dev < 0.0 {
            return Err(AuctionError::InvalidStdDev(std_dev));
        }
        Ok(Self { std_dev })
    }

    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    /// Draw this round's valuation for a bidder with the given base.
    pub fn draw<R: Rng + ?Sized>(&self, base_valuation: f64, rng: &mut R) -> f64 {
        let z: f64 = rng.sample(StandardNormal);
        (base_valuation + self.std_dev * z).max(0.0)
    }
}

impl Default for ValuationSource {
    fn default() -> Self {
        Self {
            std_dev: DEFAULT_VALUATION_STD_DEV,
        }
    }
}
