//! Follower strategy — anchor near the previous winning bid.
//!
//! The follower remembers the last winning bid it observed. It learns it two
//! ways that converge once a round closes: by reading the most recent record
//! of the history it is handed, and through the engine's round-close hook.
//! A history read always overwrites the remembered value, so an unsold last
//! round clears a stale anchor.
//!
//! With an anchor that is positive and affordable (<= valuation) the bid is
//! `clamp(anchor + U(-max_deviation, max_deviation), 0, valuation)`.
//! Otherwise the fallback strategy decides alone.

use rand::Rng;

use crate::domain::History;
use crate::error::AuctionError;

use super::BiddingStrategy;

/// Default half-width of the uniform jitter around the anchor.
pub const DEFAULT_MAX_DEVIATION: f64 = 10.0;

#[derive(Debug, Clone)]
pub struct Follower {
    last_winner_bid: Option<f64>,
    fallback: Box<BiddingStrategy>,
    max_deviation: f64,
}

impl Follower {
    pub fn new(fallback: BiddingStrategy) -> Self {
        Self {
            last_winner_bid: None,
            fallback: Box::new(fallback),
            max_deviation: DEFAULT_MAX_DEVIATION,
        }
    }

    pub fn with_max_deviation(
        fallback: BiddingStrategy,
        max_deviation: f64,
    ) -> Result<Self, AuctionError> {
        if !max_deviation.is_finite() || max_deviation < 0.0 {
            return Err(AuctionError::InvalidMaxDeviation(max_deviation));
        }
        Ok(Self {
            max_deviation,
            ..Self::new(fallback)
        })
    }

    pub fn last_winner_bid(&self) -> Option<f64> {
        self.last_winner_bid
    }

    pub fn max_deviation(&self) -> f64 {
        self.max_deviation
    }

    pub fn fallback(&self) -> &BiddingStrategy {
        &self.fallback
    }

    pub fn generate_bid<R: Rng + ?Sized>(
        &mut self,
        valuation: f64,
        history: &History,
        rng: &mut R,
    ) -> f64 {
        if let Some(latest) = history.last() {
            self.last_winner_bid = latest.winning_bid();
        }

        match self.last_winner_bid {
            Some(anchor) if anchor > 0.0 && anchor <= valuation => {
                let jitter = if self.max_deviation > 0.0 {
                    self.max_deviation * rng.gen_range(-1.0_f64..=1.0)
                } else {
                    0.0
                };
                (anchor + jitter).clamp(0.0, valuation)
            }
            _ => self.fallback.generate_bid(valuation, history, rng),
        }
    }

    /// Record the winning bid of the round that just closed.
    ///
    /// Nested followers in the fallback chain see the same update.
    pub fn on_round_closed(&mut self, winning_bid: f64) {
        self.last_winner_bid = Some(winning_bid);
        self.fallback.on_round_closed(winning_bid);
    }
}
