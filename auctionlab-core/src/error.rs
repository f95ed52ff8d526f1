//! Configuration errors raised while building auction components.
//!
//! Every variant is a construction-time rejection. Once an `AuctionEngine`
//! exists, running it cannot fail.

use crate::domain::BidderId;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AuctionError {
    #[error("reserve price must be finite and >= 0, got {0}")]
    InvalidReservePrice(f64),
    #[error("seller valuation must be finite and >= 0, got {0}")]
    InvalidSellerValuation(f64),
    #[error("number of rounds must be >= 1")]
    InvalidRoundCount,
    #[error("risk factor must be in (0, 1], got {0}")]
    InvalidRiskFactor(f64),
    #[error("number of bidders must be >= 1")]
    InvalidBidderCount,
    #[error("distribution bounds must be finite with lower < upper, got [{lower}, {upper}]")]
    InvalidBounds { lower: f64, upper: f64 },
    #[error("max deviation must be finite and >= 0, got {0}")]
    InvalidMaxDeviation(f64),
    #[error("valuation std dev must be finite and >= 0, got {0}")]
    InvalidStdDev(f64),
    #[error("base valuation for bidder {bidder} must be finite and >= 0, got {value}")]
    InvalidBaseValuation { bidder: BidderId, value: f64 },
    #[error("duplicate bidder id: {0}")]
    DuplicateBidder(BidderId),
}
