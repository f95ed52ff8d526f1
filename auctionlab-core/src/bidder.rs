//! Bidders — a base valuation, a strategy, and a win counter.
//!
//! Each round the bidder draws a private valuation from its valuation source
//! and asks its strategy for a bid. Only the engine touches `units_won`.

use rand::Rng;
use tracing::warn;

use crate::domain::{BidderId, History};
use crate::error::AuctionError;
use crate::strategy::BiddingStrategy;
use crate::valuation::ValuationSource;

#[derive(Debug, Clone)]
pub struct Bidder {
    id: BidderId,
    base_valuation: f64,
    strategy: BiddingStrategy,
    valuation_source: ValuationSource,
    units_won: u32,
}

impl Bidder {
    /// Create a bidder with the default valuation noise (std dev 50).
    pub fn new(
        id: BidderId,
        base_valuation: f64,
        strategy: BiddingStrategy,
    ) -> Result<Self, AuctionError> {
        Self::with_valuation_source(id, base_valuation, strategy, ValuationSource::default())
    }

    pub fn with_valuation_source(
        id: BidderId,
        base_valuation: f64,
        strategy: BiddingStrategy,
        valuation_source: ValuationSource,
    ) -> Result<Self, AuctionError> {
        if !base_valuation.is_finite() || base_valuation < 0.0 {
            return Err(AuctionError::InvalidBaseValuation {
                bidder: id,
                value: base_valuation,
            });
        }
        Ok(Self {
            id,
            base_valuation,
            strategy,
            valuation_source,
            units_won: 0,
        })
    }

    pub fn id(&self) -> BidderId {
        self.id
    }

    pub fn base_valuation(&self) -> f64 {
        self.base_valuation
    }

    pub fn strategy(&self) -> &BiddingStrategy {
        &self.strategy
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    pub fn valuation_source(&self) -> &ValuationSource {
        &self.valuation_source
    }

    pub fn units_won(&self) -> u32 {
        self.units_won
    }

    /// Draw this round's valuation and turn it into a bid.
    ///
    /// Returns `None` (abstention) if the strategy produced something that is
    /// not a finite, non-negative amount.
    pub fn place_bid<R: Rng + ?Sized>(&mut self, history: &History, rng: &mut R) -> Option<f64> {
        let valuation = self.valuation_source.draw(self.base_valuation, rng);
        let bid = self.strategy.generate_bid(valuation, history, rng);
        if bid.is_finite() && bid >= 0.0 {
            Some(bid)
        } else {
            warn!(bidder = %self.id, bid, "discarding unusable bid, bidder abstains");
            None
        }
    }

    pub(crate) fn record_win(&mut self) {
        self.units_won += 1;
    }

    pub(crate) fn notify_round_closed(&mut self, winning_bid: f64) {
        self.strategy.on_round_closed(winning_bid);
    }
}
