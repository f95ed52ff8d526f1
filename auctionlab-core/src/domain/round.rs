//! Round records — the append-only auction history.
//!
//! A round either sells the item (winner + winning bid) or does not (neither).
//! The mixed state is unrepresentable: the award is a single `Option`.
//! On the wire a record is the flat `{round, winner, bid}` row used by
//! external tabular tools, and deserialization rejects rows with only one of
//! `winner`/`bid` present.

use serde::{Deserialize, Serialize};

use super::BidderId;

/// The winner of a round and the price they bid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Award {
    pub bidder: BidderId,
    pub bid: f64,
}

/// Outcome of a single auction round.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "RoundRow", try_from = "RoundRow")]
pub struct RoundRecord {
    /// 1-based round number.
    pub round: usize,
    pub award: Option<Award>,
}

impl RoundRecord {
    pub fn sold(round: usize, bidder: BidderId, bid: f64) -> Self {
        Self {
            round,
            award: Some(Award { bidder, bid }),
        }
    }

    pub fn unsold(round: usize) -> Self {
        Self { round, award: None }
    }

    pub fn winner(&self) -> Option<BidderId> {
        self.award.map(|a| a.bidder)
    }

    pub fn winning_bid(&self) -> Option<f64> {
        self.award.map(|a| a.bid)
    }

    pub fn is_sold(&self) -> bool {
        self.award.is_some()
    }
}

/// Flat serialized form of a `RoundRecord`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RoundRow {
    round: usize,
    winner: Option<BidderId>,
    bid: Option<f64>,
}

impl From<RoundRecord> for RoundRow {
    fn from(record: RoundRecord) -> Self {
        Self {
            round: record.round,
            winner: record.winner(),
            bid: record.winning_bid(),
        }
    }
}

impl TryFrom<RoundRow> for RoundRecord {
    type Error = String;

    fn try_from(row: RoundRow) -> Result<Self, Self::Error> {
        match (row.winner, row.bid) {
            (Some(bidder), Some(bid)) => Ok(Self::sold(row.round, bidder, bid)),
            (None, None) => Ok(Self::unsold(row.round)),
            _ => Err(format!(
                "round {}: winner and bid must be both set or both unset",
                row.round
            )),
        }
    }
}

/// Per-round bid counts, kept alongside the history for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundStats {
    pub round: usize,
    /// Bidders that produced a bid.
    pub submitted: usize,
    /// Bidders that produced no usable bid.
    pub abstained: usize,
    /// Submitted bids at or above the reserve price.
    pub accepted: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sold_record_serializes_flat() {
        let rec = RoundRecord::sold(3, BidderId(2), 850.0);
        let json = serde_json::to_string(&rec).unwrap();
        assert_eq!(json, r#"{"round":3,"winner":2,"bid":850.0}"#);
    }

    #[test]
    fn unsold_record_serializes_nulls() {
        let rec = RoundRecord::unsold(1);
        let json = serde_json::to_string(&rec).unwrap();
        assert_eq!(json, r#"{"round":1,"winner":null,"bid":null}"#);
        let back: RoundRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rec);
    }

    #[test]
    fn mixed_row_is_rejected() {
        let err = serde_json::from_str::<RoundRecord>(r#"{"round":1,"winner":4,"bid":null}"#);
        assert!(err.is_err());
        let err = serde_json::from_str::<RoundRecord>(r#"{"round":1,"winner":null,"bid":10.0}"#);
        assert!(err.is_err());
    }

    #[test]
    fn accessors_agree_on_award() {
        let rec = RoundRecord::sold(1, BidderId(9), 10.0);
        assert!(rec.is_sold());
        assert_eq!(rec.winner(), Some(BidderId(9)));
        assert_eq!(rec.winning_bid(), Some(10.0));

        let empty = RoundRecord::unsold(2);
        assert!(!empty.is_sold());
        assert_eq!(empty.winner(), None);
        assert_eq!(empty.winning_bid(), None);
    }
}
