//! Winner selection over one round's submitted bids.

use crate::auctioneer::Auctioneer;

/// A bid as collected by the engine, tagged with the bidder's position in
/// the engine's bidder list (the collection order).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubmittedBid {
    pub bidder_index: usize,
    pub bid: f64,
}

/// Pick the highest acceptable bid.
///
/// Bids below the reserve are ignored regardless of how they compare to the
/// others. Among equal maximal bids the one collected first wins, which is
/// what a stable descending sort followed by taking the head would give.
pub fn select_winner(bids: &[SubmittedBid], auctioneer: &Auctioneer) -> Option<SubmittedBid> {
    bids.iter()
        .filter(|b| auctioneer.is_bid_acceptable(b.bid))
        .fold(None, |best: Option<SubmittedBid>, candidate| match best {
            Some(current) if current.bid >= candidate.bid => Some(current),
            _ => Some(*candidate),
        })
}
