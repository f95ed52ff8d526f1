//! AuctionLab Core — repeated sealed-bid auction engine and bidding strategies.
//!
//! This crate contains the heart of the simulator:
//! - Domain types (bidder ids, round records, per-round stats)
//! - Valuation source with Gaussian per-round noise
//! - Closed family of bidding strategies (Nash shading, proportional, follower)
//! - Bidders and the reserve-price auctioneer
//! - Five-phase round loop (collect, filter, select, apply, notify)
//! - Deterministic RNG hierarchy so runs replay under a fixed seed

pub mod auctioneer;
pub mod bidder;
pub mod domain;
pub mod engine;
pub mod error;
pub mod rng;
pub mod strategy;
pub mod valuation;

pub use auctioneer::Auctioneer;
pub use bidder::Bidder;
pub use domain::{Award, BidderId, History, RoundRecord, RoundStats, RunId};
pub use engine::AuctionEngine;
pub use error::AuctionError;
pub use rng::RngHierarchy;
pub use strategy::{
    create_strategy, BiddingStrategy, Follower, NashEquilibrium, ShadingConfig, ShadingRule,
    SimpleProportional, StrategyConfig,
};
pub use valuation::ValuationSource;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: all core types are Send + Sync.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<BidderId>();
        require_sync::<BidderId>();
        require_send::<RoundRecord>();
        require_sync::<RoundRecord>();
        require_send::<RoundStats>();
        require_sync::<RoundStats>();
        require_send::<RunId>();
        require_sync::<RunId>();

        require_send::<BiddingStrategy>();
        require_sync::<BiddingStrategy>();
        require_send::<StrategyConfig>();
        require_sync::<StrategyConfig>();
        require_send::<ValuationSource>();
        require_sync::<ValuationSource>();

        require_send::<Bidder>();
        require_sync::<Bidder>();
        require_send::<Auctioneer>();
        require_sync::<Auctioneer>();
        require_send::<AuctionEngine>();
        require_sync::<AuctionEngine>();
        require_send::<RngHierarchy>();
        require_sync::<RngHierarchy>();
    }

    /// Architecture contract: strategies see the history read-only.
    ///
    /// `generate_bid` takes `&History` (a shared slice), so no strategy can
    /// rewrite past rounds. If the signature changes to `&mut`, this stops
    /// compiling.
    #[test]
    fn strategies_receive_history_read_only() {
        fn _check(
            s: &mut BiddingStrategy,
            history: &History,
            rng: &mut rand::rngs::StdRng,
        ) -> f64 {
            s.generate_bid(100.0, history, rng)
        }
    }
}
