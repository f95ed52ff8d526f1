//! The auctioneer — owns the reserve price and decides bid acceptability.

use crate::error::AuctionError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Auctioneer {
    reserve_price: f64,
    /// Seller's own valuation of the item. Reporting only.
    valuation: Option<f64>,
}

impl Auctioneer {
    pub fn new(reserve_price: f64) -> Result<Self, AuctionError> {
        if !reserve_price.is_finite() || reserve_price < 0.0 {
            return Err(AuctionError::InvalidReservePrice(reserve_price));
        }
        Ok(Self {
            reserve_price,
            valuation: None,
        })
    }

    pub fn with_valuation(reserve_price: f64, valuation: f64) -> Result<Self, AuctionError> {
        if !valuation.is_finite() || valuation < 0.0 {
            return Err(AuctionError::InvalidSellerValuation(valuation));
        }
        Ok(Self {
            valuation: Some(valuation),
            ..Self::new(reserve_price)?
        })
    }

    pub fn reserve_price(&self) -> f64 {
        self.reserve_price
    }

    pub fn valuation(&self) -> Option<f64> {
        self.valuation
    }

    /// True iff `bid >= reserve_price`. NaN is never acceptable.
    pub fn is_bid_acceptable(&self, bid: f64) -> bool {
        bid >= self.reserve_price
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_at_and_above_reserve() {
        let a = Auctioneer::new(750.0).unwrap();
        assert!(a.is_bid_acceptable(750.0));
        assert!(a.is_bid_acceptable(850.0));
        assert!(!a.is_bid_acceptable(749.99));
        assert!(!a.is_bid_acceptable(f64::NAN));
        assert!(!a.is_bid_acceptable(f64::NEG_INFINITY));
    }

    #[test]
    fn zero_reserve_accepts_everything_non_negative() {
        let a = Auctioneer::new(0.0).unwrap();
        assert!(a.is_bid_acceptable(0.0));
        assert!(!a.is_bid_acceptable(-0.01));
    }

    #[test]
    fn rejects_invalid_reserve() {
        assert_eq!(
            Auctioneer::new(-1.0).unwrap_err(),
            AuctionError::InvalidReservePrice(-1.0)
        );
        assert!(Auctioneer::new(f64::INFINITY).is_err());
        assert!(Auctioneer::with_valuation(750.0, -5.0).is_err());
        assert!(Auctioneer::with_valuation(-750.0, 5.0).is_err());
    }

    #[test]
    fn seller_valuation_is_carried() {
        let a = Auctioneer::with_valuation(750.0, 1000.0).unwrap();
        assert_eq!(a.valuation(), Some(1000.0));
        assert_eq!(a.reserve_price(), 750.0);
        assert_eq!(Auctioneer::new(750.0).unwrap().valuation(), None);
    }
}
