//! Domain types for AuctionLab

pub mod ids;
pub mod round;

pub use ids::{BidderId, RunId};
pub use round::{Award, RoundRecord, RoundStats};

/// Read-only view of the rounds played so far, oldest first.
pub type History = [RoundRecord];
