//! AuctionLab CLI — run repeated sealed-bid auction simulations.
//!
//! Commands:
//! - `run` — execute a simulation from a TOML config file or the default preset
//! - `preset` — print the default preset as TOML

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use auctionlab_runner::{
    run_simulation, save_artifacts, SimulationConfig, SimulationResult, MAX_SEED,
};

#[derive(Parser)]
#[command(
    name = "auctionlab",
    about = "AuctionLab CLI — repeated sealed-bid auction simulator"
)]
struct Cli {
    /// Enable debug logging (per-round detail).
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation from a TOML config file or the default preset.
    Run {
        /// Path to a TOML config file. Defaults to the built-in preset.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the master seed (0 to i64::MAX).
        #[arg(long, value_parser = clap::value_parser!(u64).range(..=MAX_SEED))]
        seed: Option<u64>,

        /// Override the number of rounds.
        #[arg(long)]
        rounds: Option<usize>,

        /// Output directory for run artifacts.
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,

        /// Print the summary only; write no artifacts.
        #[arg(long, default_value_t = false)]
        no_save: bool,
    },
    /// Print the default preset as TOML.
    Preset,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Commands::Run {
            config,
            seed,
            rounds,
            output_dir,
            no_save,
        } => run_cmd(config, seed, rounds, output_dir, no_save),
        Commands::Preset => {
            let toml = SimulationConfig::default_preset().to_toml()?;
            print!("{toml}");
            Ok(())
        }
    }
}

fn run_cmd(
    config_path: Option<PathBuf>,
    seed: Option<u64>,
    rounds: Option<usize>,
    output_dir: PathBuf,
    no_save: bool,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => {
            debug!(path = %path.display(), "loading config");
            SimulationConfig::from_file(&path)
                .with_context(|| format!("failed to load config {}", path.display()))?
        }
        None => SimulationConfig::default_preset(),
    };
    if let Some(seed) = seed {
        config.auction.seed = seed;
    }
    if let Some(rounds) = rounds {
        config.auction.num_rounds = rounds;
    }

    let result = run_simulation(&config)?;

    print_bidders(&result);
    print_history(&result);
    print_summary(&result);

    if !no_save {
        let run_dir = save_artifacts(&result, &output_dir)?;
        println!();
        println!("Artifacts saved to: {}", run_dir.display());
    }
    Ok(())
}

fn print_bidders(result: &SimulationResult) {
    println!();
    println!("=== Bidders ===");
    println!("{:>6}  {:>14}  {:<20}  {:>9}", "Bidder", "Base Valuation", "Strategy", "Units Won");
    for b in &result.bidders {
        println!(
            "{:>6}  {:>14.2}  {:<20}  {:>9}",
            b.id, b.base_valuation, b.strategy, b.units_won
        );
    }
}

fn print_history(result: &SimulationResult) {
    println!();
    println!("=== Rounds ===");
    println!("{:>5}  {:>6}  {:>10}  {:>9}  {:>8}", "Round", "Winner", "Bid", "Submitted", "Accepted");
    for (rec, stats) in result.history.iter().zip(&result.round_stats) {
        match rec.award {
            Some(award) => println!(
                "{:>5}  {:>6}  {:>10.2}  {:>9}  {:>8}",
                rec.round, award.bidder, award.bid, stats.submitted, stats.accepted
            ),
            None => println!(
                "{:>5}  {:>6}  {:>10}  {:>9}  {:>8}",
                rec.round, "-", "unsold", stats.submitted, stats.accepted
            ),
        }
    }
}

fn print_summary(result: &SimulationResult) {
    let r = &result.revenue;
    let s = &r.summary;
    println!();
    println!("=== Revenue ===");
    println!("Run ID:         {}", result.run_id.chars().take(12).collect::<String>());
    println!("Seed:           {}", result.seed);
    println!(
        "Sold Rounds:    {} / {} ({:.1}%)",
        r.sold_rounds,
        r.rounds,
        r.fill_rate * 100.0
    );
    println!("Total Revenue:  {:.2}", r.total_revenue);
    println!("Mean:           {:.2}", s.mean);
    println!("Std:            {:.2}", s.std);
    println!("Min:            {:.2}", s.min);
    println!("25%:            {:.2}", s.p25);
    println!("50%:            {:.2}", s.p50);
    println!("75%:            {:.2}", s.p75);
    println!("Max:            {:.2}", s.max);
    if let Some(surplus) = result.seller_surplus {
        println!("Seller Surplus: {surplus:.2}");
    }
    println!();
    println!("--- By Strategy ---");
    for b in &result.breakdown {
        println!(
            "{:<20}  bidders {:>3}  units {:>3}  revenue {:>10.2}",
            b.strategy, b.bidders, b.units_won, b.revenue
        );
    }
}
