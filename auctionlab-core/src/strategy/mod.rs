//! Bidding strategies — map a private valuation and the round history to a bid.
//!
//! The family is closed: Nash-equilibrium shading, simple proportional
//! shading, and the stateful follower. Every strategy must return a finite
//! bid >= 0 for any valuation >= 0 and any history, including an empty one.
//! Negative intermediate results are clamped here, never by the engine.
//!
//! Randomness is always passed in by the caller so runs replay exactly under
//! a fixed seed.

pub mod factory;
pub mod follower;
pub mod nash;
pub mod proportional;

use rand::Rng;

use crate::domain::History;

pub use factory::{create_strategy, ShadingConfig, StrategyConfig};
pub use follower::{Follower, DEFAULT_MAX_DEVIATION};
pub use nash::{NashEquilibrium, ShadingRule};
pub use proportional::SimpleProportional;

/// A bidding strategy owned by exactly one bidder.
#[derive(Debug, Clone)]
pub enum BiddingStrategy {
    NashEquilibrium(NashEquilibrium),
    SimpleProportional(SimpleProportional),
    Follower(Follower),
}

impl BiddingStrategy {
    /// Stable label used in reports (e.g. "nash_equilibrium").
    pub fn name(&self) -> &'static str {
        match self {
            Self::NashEquilibrium(_) => "nash_equilibrium",
            Self::SimpleProportional(_) => "simple_proportional",
            Self::Follower(_) => "follower",
        }
    }

    /// Produce a bid for this round's valuation.
    ///
    /// `history` holds every closed round, oldest first. Only the follower
    /// reads it; the others ignore it.
    pub fn generate_bid<R: Rng + ?Sized>(
        &mut self,
        valuation: f64,
        history: &History,
        rng: &mut R,
    ) -> f64 {
        match self {
            Self::NashEquilibrium(s) => s.generate_bid(valuation),
            Self::SimpleProportional(s) => s.generate_bid(valuation),
            Self::Follower(s) => s.generate_bid(valuation, history, rng),
        }
    }

    /// Round-close hook, called by the engine after a round with a winner.
    ///
    /// Stateless strategies ignore it.
    pub fn on_round_closed(&mut self, winning_bid: f64) {
        if let Self::Follower(s) = self {
            s.on_round_closed(winning_bid);
        }
    }

    pub fn is_follower(&self) -> bool {
        matches!(self, Self::Follower(_))
    }
}

impl From<NashEquilibrium> for BiddingStrategy {
    fn from(s: NashEquilibrium) -> Self {
        Self::NashEquilibrium(s)
    }
}

impl From<SimpleProportional> for BiddingStrategy {
    fn from(s: SimpleProportional) -> Self {
        Self::SimpleProportional(s)
    }
}

impl From<Follower> for BiddingStrategy {
    fn from(s: Follower) -> Self {
        Self::Follower(s)
    }
}
