//! The round loop.
//!
//! The engine owns the auctioneer, the bidders (in a fixed order that decides
//! ties) and the history. It advances one round per `step` until `num_rounds`
//! rounds are recorded, then stays finished. A started run cannot fail: empty
//! rounds and abstentions are ordinary outcomes.

use std::collections::HashSet;

use rand::Rng;
use tracing::{debug, info};

use crate::auctioneer::Auctioneer;
use crate::bidder::Bidder;
use crate::domain::{BidderId, RoundRecord, RoundStats};
use crate::error::AuctionError;

use super::selection::{select_winner, SubmittedBid};

#[derive(Debug, Clone)]
pub struct AuctionEngine {
    auctioneer: Auctioneer,
    bidders: Vec<Bidder>,
    num_rounds: usize,
    history: Vec<RoundRecord>,
    round_stats: Vec<RoundStats>,
}

impl AuctionEngine {
    pub fn new(
        auctioneer: Auctioneer,
        bidders: Vec<Bidder>,
        num_rounds: usize,
    ) -> Result<Self, AuctionError> {
        if num_rounds == 0 {
            return Err(AuctionError::InvalidRoundCount);
        }
        let mut seen = HashSet::with_capacity(bidders.len());
        for bidder in &bidders {
            if !seen.insert(bidder.id()) {
                return Err(AuctionError::DuplicateBidder(bidder.id()));
            }
        }
        Ok(Self {
            auctioneer,
            bidders,
            num_rounds,
            history: Vec::with_capacity(num_rounds),
            round_stats: Vec::with_capacity(num_rounds),
        })
    }

    /// Run every remaining round and return the full history.
    pub fn run<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &[RoundRecord] {
        info!(
            rounds = self.num_rounds,
            bidders = self.bidders.len(),
            reserve_price = self.auctioneer.reserve_price(),
            "auction started"
        );
        while self.step(rng).is_some() {}
        let sold = self.history.iter().filter(|r| r.is_sold()).count();
        info!(rounds = self.history.len(), sold, "auction finished");
        &self.history
    }

    /// Run a single round. Returns `None` once all rounds have been played.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<&RoundRecord> {
        if self.is_finished() {
            return None;
        }
        let round = self.history.len() + 1;

        // Phase 1: collect
        let mut submitted = Vec::with_capacity(self.bidders.len());
        for (bidder_index, bidder) in self.bidders.iter_mut().enumerate() {
            if let Some(bid) = bidder.place_bid(&self.history, rng) {
                submitted.push(SubmittedBid { bidder_index, bid });
            }
        }

        // Phases 2 + 3: filter and select
        let accepted = submitted
            .iter()
            .filter(|b| self.auctioneer.is_bid_acceptable(b.bid))
            .count();
        let winner = select_winner(&submitted, &self.auctioneer);

        // Phase 4: apply
        let record = match winner {
            Some(SubmittedBid { bidder_index, bid }) => {
                let bidder = &mut self.bidders[bidder_index];
                bidder.record_win();
                RoundRecord::sold(round, bidder.id(), bid)
            }
            None => RoundRecord::unsold(round),
        };
        self.history.push(record);
        self.round_stats.push(RoundStats {
            round,
            submitted: submitted.len(),
            abstained: self.bidders.len() - submitted.len(),
            accepted,
        });
        debug!(
            round,
            submitted = submitted.len(),
            accepted,
            winner = ?record.winner(),
            bid = ?record.winning_bid(),
            "round closed"
        );

        // Phase 5: notify
        if let Some(winning_bid) = record.winning_bid() {
            for bidder in &mut self.bidders {
                bidder.notify_round_closed(winning_bid);
            }
        }

        self.history.last()
    }

    pub fn is_finished(&self) -> bool {
        self.history.len() >= self.num_rounds
    }

    /// Number of rounds played so far.
    pub fn current_round(&self) -> usize {
        self.history.len()
    }

    pub fn num_rounds(&self) -> usize {
        self.num_rounds
    }

    pub fn history(&self) -> &[RoundRecord] {
        &self.history
    }

    pub fn round_stats(&self) -> &[RoundStats] {
        &self.round_stats
    }

    pub fn auctioneer(&self) -> &Auctioneer {
        &self.auctioneer
    }

    pub fn bidders(&self) -> &[Bidder] {
        &self.bidders
    }

    pub fn bidder(&self, id: BidderId) -> Option<&Bidder> {
        self.bidders.iter().find(|b| b.id() == id)
    }

    pub fn units_won(&self, id: BidderId) -> Option<u32> {
        self.bidder(id).map(Bidder::units_won)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{BiddingStrategy, Follower, SimpleProportional};
    use crate::valuation::ValuationSource;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn exact_bidder(id: u32, base: f64, strategy: BiddingStrategy) -> Bidder {
        Bidder::with_valuation_source(
            BidderId(id),
            base,
            strategy,
            ValuationSource::new(0.0).unwrap(),
        )
        .unwrap()
    }

    fn proportional(risk: f64) -> BiddingStrategy {
        SimpleProportional::new(risk).unwrap().into()
    }

    #[test]
    fn rejects_zero_rounds() {
        let a = Auctioneer::new(0.0).unwrap();
        assert_eq!(
            AuctionEngine::new(a, vec![], 0).unwrap_err(),
            AuctionError::InvalidRoundCount
        );
    }

    #[test]
    fn rejects_duplicate_bidders() {
        let a = Auctioneer::new(0.0).unwrap();
        let bidders = vec![
            exact_bidder(1, 10.0, proportional(0.5)),
            exact_bidder(1, 20.0, proportional(0.5)),
        ];
        assert_eq!(
            AuctionEngine::new(a, bidders, 1).unwrap_err(),
            AuctionError::DuplicateBidder(BidderId(1))
        );
    }

    #[test]
    fn step_advances_one_round_then_stops() {
        let a = Auctioneer::new(0.0).unwrap();
        let bidders = vec![exact_bidder(1, 100.0, proportional(0.5))];
        let mut engine = AuctionEngine::new(a, bidders, 2).unwrap();
        let mut rng = StdRng::seed_from_u64(0);

        assert_eq!(engine.step(&mut rng).map(|r| r.round), Some(1));
        assert_eq!(engine.current_round(), 1);
        assert!(!engine.is_finished());
        assert_eq!(engine.step(&mut rng).map(|r| r.round), Some(2));
        assert!(engine.is_finished());
        assert!(engine.step(&mut rng).is_none());
        assert_eq!(engine.history().len(), 2);
    }

    #[test]
    fn no_bidders_records_unsold_rounds() {
        let a = Auctioneer::new(0.0).unwrap();
        let mut engine = AuctionEngine::new(a, vec![], 3).unwrap();
        let history = engine.run(&mut StdRng::seed_from_u64(0));
        assert_eq!(history.len(), 3);
        assert!(history.iter().all(|r| !r.is_sold()));
        assert!(engine.round_stats().iter().all(|s| s.submitted == 0));
    }

    #[test]
    fn round_stats_count_abstentions_and_acceptances() {
        let a = Auctioneer::new(750.0).unwrap();
        let bidders = vec![
            exact_bidder(1, 1000.0, proportional(0.85)),
            exact_bidder(2, 600.0, proportional(0.85)),
            exact_bidder(
                3,
                100.0,
                crate::strategy::NashEquilibrium::custom(|_| f64::INFINITY).into(),
            ),
        ];
        let mut engine = AuctionEngine::new(a, bidders, 1).unwrap();
        engine.run(&mut StdRng::seed_from_u64(0));
        let stats = engine.round_stats()[0];
        assert_eq!(stats.submitted, 2);
        assert_eq!(stats.abstained, 1);
        assert_eq!(stats.accepted, 1);
    }

    #[test]
    fn followers_are_notified_after_a_win() {
        let a = Auctioneer::new(0.0).unwrap();
        let follower: BiddingStrategy = Follower::with_max_deviation(proportional(0.5), 0.0)
            .unwrap()
            .into();
        let bidders = vec![
            exact_bidder(1, 1000.0, proportional(0.9)),
            exact_bidder(2, 1000.0, follower),
        ];
        let mut engine = AuctionEngine::new(a, bidders, 1).unwrap();
        engine.run(&mut StdRng::seed_from_u64(0));

        match engine.bidders()[1].strategy() {
            BiddingStrategy::Follower(f) => assert_eq!(f.last_winner_bid(), Some(900.0)),
            other => panic!("unexpected strategy {}", other.name()),
        }
    }

    #[test]
    fn units_won_lookup() {
        let a = Auctioneer::new(0.0).unwrap();
        let bidders = vec![
            exact_bidder(1, 10.0, proportional(1.0)),
            exact_bidder(2, 20.0, proportional(1.0)),
        ];
        let mut engine = AuctionEngine::new(a, bidders, 4).unwrap();
        engine.run(&mut StdRng::seed_from_u64(0));
        assert_eq!(engine.units_won(BidderId(2)), Some(4));
        assert_eq!(engine.units_won(BidderId(1)), Some(0));
        assert_eq!(engine.units_won(BidderId(99)), None);
    }
}
