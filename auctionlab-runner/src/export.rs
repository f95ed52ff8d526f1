//! Reporting and export — JSON, CSV, and Markdown artifact generation.
//!
//! Provides three export formats for simulation results:
//! - **JSON**: full round-trip serialization with schema versioning
//! - **CSV**: round history and bidder table for external analysis tools
//! - **Markdown**: human-readable single-run report
//!
//! Persisted results carry a `schema_version` field. Versions newer than
//! this build understands are rejected on load.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use auctionlab_core::RoundRecord;

use crate::runner::{BidderSummary, SimulationResult, SCHEMA_VERSION};

// ─── JSON export ────────────────────────────────────────────────────

/// Serialize a `SimulationResult` to pretty JSON.
pub fn export_json(result: &SimulationResult) -> Result<String> {
    serde_json::to_string_pretty(result).context("failed to serialize SimulationResult to JSON")
}

/// Deserialize a `SimulationResult` from JSON, rejecting unknown schema versions.
pub fn import_json(json: &str) -> Result<SimulationResult> {
    let result: SimulationResult =
        serde_json::from_str(json).context("failed to deserialize SimulationResult from JSON")?;
    if result.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            result.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(result)
}

// ─── CSV export ─────────────────────────────────────────────────────

/// Export the round history as CSV.
///
/// Columns: round, winner, bid. Unsold rounds leave winner and bid empty.
pub fn export_history_csv(history: &[RoundRecord]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["round", "winner", "bid"])?;
    for r in history {
        wtr.write_record([
            r.round.to_string(),
            r.winner().map(|id| id.to_string()).unwrap_or_default(),
            r.winning_bid()
                .map(|bid| format!("{bid:.2}"))
                .unwrap_or_default(),
        ])?;
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Export the bidder table as CSV.
///
/// Columns: id, base_valuation, strategy, units_won
pub fn export_bidders_csv(bidders: &[BidderSummary]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["id", "base_valuation", "strategy", "units_won"])?;
    for b in bidders {
        wtr.write_record([
            &b.id.to_string(),
            &format!("{:.2}", b.base_valuation),
            &b.strategy,
            &b.units_won.to_string(),
        ])?;
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

// ─── Artifact bundle ────────────────────────────────────────────────

/// Save the full artifact set for a single simulation run.
///
/// Creates a directory named `run_{id prefix}_{timestamp}/` under
/// `output_dir` containing:
/// - `result.json` — the full `SimulationResult`
/// - `history.csv` — one row per round
/// - `bidders.csv` — one row per bidder
/// - `report.md` — Markdown summary
///
/// Returns the path to the created directory.
pub fn save_artifacts(result: &SimulationResult, output_dir: &Path) -> Result<PathBuf> {
    let prefix: String = result.run_id.chars().take(12).collect();
    let dirname = format!(
        "run_{}_{}",
        prefix,
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    );
    let run_dir = output_dir.join(dirname);
    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("failed to create artifact dir: {}", run_dir.display()))?;

    std::fs::write(run_dir.join("result.json"), export_json(result)?)?;
    std::fs::write(run_dir.join("history.csv"), export_history_csv(&result.history)?)?;
    std::fs::write(run_dir.join("bidders.csv"), export_bidders_csv(&result.bidders)?)?;
    std::fs::write(run_dir.join("report.md"), render_markdown(result))?;

    Ok(run_dir)
}

/// Load a `SimulationResult` from an artifact directory's result.json.
///
/// Rejects unknown schema versions.
pub fn load_artifacts(dir: &Path) -> Result<SimulationResult> {
    let path = dir.join("result.json");
    let json = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    import_json(&json)
}

// ─── Markdown report ────────────────────────────────────────────────

/// Generate a Markdown report for a single simulation run.
pub fn render_markdown(result: &SimulationResult) -> String {
    let mut md = String::with_capacity(4096);
    let a = &result.config.auction;
    let p = &result.config.population;

    md.push_str("# Auction Simulation Report\n\n");

    md.push_str("## Setup\n\n");
    md.push_str("| Field | Value |\n");
    md.push_str("| --- | --- |\n");
    md.push_str(&format!("| Run ID | {} |\n", result.run_id));
    md.push_str(&format!("| Seed | {} |\n", result.seed));
    md.push_str(&format!("| Reserve Price | {:.2} |\n", a.reserve_price));
    if let Some(v) = a.seller_valuation {
        md.push_str(&format!("| Seller Valuation | {v:.2} |\n"));
    }
    md.push_str(&format!("| Rounds | {} |\n", a.num_rounds));
    md.push_str(&format!(
        "| Bidders | {} (valuations {:.0} to {:.0}, noise σ {:.1}) |\n",
        p.num_bidders, p.valuation_min, p.valuation_max, p.valuation_std_dev
    ));
    md.push('\n');

    let r = &result.revenue;
    let s = &r.summary;
    md.push_str("## Revenue Summary\n\n");
    md.push_str("| Metric | Value |\n");
    md.push_str("| --- | --- |\n");
    md.push_str(&format!(
        "| Sold Rounds | {} / {} ({:.1}%) |\n",
        r.sold_rounds,
        r.rounds,
        r.fill_rate * 100.0
    ));
    md.push_str(&format!("| Total Revenue | {:.2} |\n", r.total_revenue));
    md.push_str(&format!("| Mean | {:.2} |\n", s.mean));
    md.push_str(&format!("| Std | {:.2} |\n", s.std));
    md.push_str(&format!("| Min | {:.2} |\n", s.min));
    md.push_str(&format!("| 25% | {:.2} |\n", s.p25));
    md.push_str(&format!("| 50% | {:.2} |\n", s.p50));
    md.push_str(&format!("| 75% | {:.2} |\n", s.p75));
    md.push_str(&format!("| Max | {:.2} |\n", s.max));
    if let Some(surplus) = result.seller_surplus {
        md.push_str(&format!("| Seller Surplus | {surplus:.2} |\n"));
    }
    md.push('\n');

    md.push_str("## Strategies\n\n");
    md.push_str("| Strategy | Bidders | Units Won | Revenue |\n");
    md.push_str("| --- | --- | --- | --- |\n");
    for b in &result.breakdown {
        md.push_str(&format!(
            "| {} | {} | {} | {:.2} |\n",
            b.strategy, b.bidders, b.units_won, b.revenue
        ));
    }
    md.push('\n');

    md.push_str("## Round History\n\n");
    md.push_str("| Round | Winner | Bid |\n");
    md.push_str("| --- | --- | --- |\n");
    for rec in &result.history {
        match rec.award {
            Some(award) => md.push_str(&format!(
                "| {} | {} | {:.2} |\n",
                rec.round, award.bidder, award.bid
            )),
            None => md.push_str(&format!("| {} | - | unsold |\n", rec.round)),
        }
    }
    md.push('\n');

    md.push_str("## Bidders\n\n");
    md.push_str("| Bidder | Base Valuation | Strategy | Units Won |\n");
    md.push_str("| --- | --- | --- | --- |\n");
    for b in &result.bidders {
        md.push_str(&format!(
            "| {} | {:.2} | {} | {} |\n",
            b.id, b.base_valuation, b.strategy, b.units_won
        ));
    }
    md.push('\n');

    md.push_str(&format!(
        "_Generated {}_\n",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    ));

    md
}
