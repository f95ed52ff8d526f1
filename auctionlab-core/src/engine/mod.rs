//! Auction engine — the round loop and winner selection.
//!
//! Each round runs five phases in order:
//!
//! 1. Collect: every bidder bids (or abstains), in bidder order
//! 2. Filter: drop bids below the reserve price
//! 3. Select: highest acceptable bid wins, earliest bidder on ties
//! 4. Apply: credit the winner, append the round record
//! 5. Notify: push the winning bid through every strategy's round-close hook

pub mod round_loop;
pub mod selection;

pub use round_loop::AuctionEngine;
pub use selection::{select_winner, SubmittedBid};
