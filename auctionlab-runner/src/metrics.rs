//! Revenue metrics — pure functions over a finished auction history.
//!
//! Every metric is a pure function: history (and bidder summaries) in,
//! numbers out. No dependencies on the engine or the runner.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use auctionlab_core::{BidderId, RoundRecord};

use crate::runner::BidderSummary;

/// Descriptive statistics over the winning bids of sold rounds.
///
/// Mirrors the usual `describe()` table: count, mean, sample std, min,
/// quartiles (linear interpolation) and max. Unsold rounds are skipped; with
/// nothing sold every field is zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RevenueSummary {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub max: f64,
}

/// Aggregate revenue metrics for a single run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueStats {
    pub rounds: usize,
    pub sold_rounds: usize,
    /// Fraction of rounds that sold (0.0 when no rounds ran).
    pub fill_rate: f64,
    pub total_revenue: f64,
    pub summary: RevenueSummary,
}

impl RevenueStats {
    pub fn compute(history: &[RoundRecord]) -> Self {
        let revenues = revenue_series(history);
        let rounds = history.len();
        let sold_rounds = revenues.len();
        Self {
            rounds,
            sold_rounds,
            fill_rate: if rounds == 0 {
                0.0
            } else {
                sold_rounds as f64 / rounds as f64
            },
            total_revenue: revenues.iter().sum(),
            summary: describe(&revenues),
        }
    }
}

/// Per-strategy share of the outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyBreakdown {
    pub strategy: String,
    pub bidders: usize,
    pub units_won: u32,
    pub revenue: f64,
}

/// Group bidders by strategy label and total their wins and payments.
///
/// Sorted by strategy label.
pub fn strategy_breakdown(bidders: &[BidderSummary], history: &[RoundRecord]) -> Vec<StrategyBreakdown> {
    let label_of: HashMap<BidderId, &str> = bidders
        .iter()
        .map(|b| (b.id, b.strategy.as_str()))
        .collect();

    let mut shares: BTreeMap<&str, StrategyBreakdown> = BTreeMap::new();
    for b in bidders {
        let share = shares.entry(b.strategy.as_str()).or_insert_with(|| StrategyBreakdown {
            strategy: b.strategy.clone(),
            bidders: 0,
            units_won: 0,
            revenue: 0.0,
        });
        share.bidders += 1;
        share.units_won += b.units_won;
    }
    for award in history.iter().filter_map(|r| r.award) {
        if let Some(share) = label_of
            .get(&award.bidder)
            .and_then(|label| shares.get_mut(label))
        {
            share.revenue += award.bid;
        }
    }
    shares.into_values().collect()
}

/// Seller surplus: revenue minus the seller's valuation, per sold round.
pub fn seller_surplus(history: &[RoundRecord], seller_valuation: f64) -> f64 {
    revenue_series(history)
        .iter()
        .map(|bid| bid - seller_valuation)
        .sum()
}

/// Winning bids of sold rounds, in round order.
pub fn revenue_series(history: &[RoundRecord]) -> Vec<f64> {
    history.iter().filter_map(RoundRecord::winning_bid).collect()
}

// ─── Statistics helpers ─────────────────────────────────────────────

pub fn describe(values: &[f64]) -> RevenueSummary {
    if values.is_empty() {
        return RevenueSummary::default();
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    RevenueSummary {
        count: values.len(),
        mean: mean_f64(values),
        std: std_dev(values),
        min: sorted[0],
        p25: quantile_sorted(&sorted, 0.25),
        p50: quantile_sorted(&sorted, 0.50),
        p75: quantile_sorted(&sorted, 0.75),
        max: sorted[sorted.len() - 1],
    }
}

fn mean_f64(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1 denominator). Zero for fewer than 2 values.
fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean_f64(values);
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    var.sqrt()
}

/// Quantile with linear interpolation between closest ranks.
fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}
