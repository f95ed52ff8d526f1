//! Bidder population generation.
//!
//! Bidder `i` (ids start at 1) gets a base valuation drawn uniformly from
//! `[valuation_min, valuation_max]` and a strategy sampled from the weighted
//! pool. Every bidder gets its own freshly built strategy, so follower state
//! is never shared between bidders.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use auctionlab_core::strategy::create_strategy;
use auctionlab_core::{Bidder, BidderId, ValuationSource};

use crate::config::{ConfigError, PopulationConfig, WeightedStrategy};
use crate::runner::RunError;

/// Draw a bidder population.
pub fn generate_population<R: Rng + ?Sized>(
    population: &PopulationConfig,
    pool: &[WeightedStrategy],
    rng: &mut R,
) -> Result<Vec<Bidder>, RunError> {
    let weights = WeightedIndex::new(pool.iter().map(|w| w.weight))
        .map_err(|e| ConfigError::Invalid(format!("strategy pool weights: {e}")))?;
    let valuation_source = ValuationSource::new(population.valuation_std_dev)?;

    let mut bidders = Vec::with_capacity(population.num_bidders as usize);
    for i in 1..=population.num_bidders {
        let base_valuation =
            rng.gen_range(population.valuation_min..=population.valuation_max);
        let entry = &pool[weights.sample(rng)];
        let strategy = create_strategy(&entry.strategy)?;
        bidders.push(Bidder::with_valuation_source(
            BidderId(i),
            base_valuation,
            strategy,
            valuation_source,
        )?);
    }
    Ok(bidders)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;
    use auctionlab_core::StrategyConfig;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn ids_are_sequential_and_valuations_in_range() {
        let config = SimulationConfig::default_preset();
        let mut rng = StdRng::seed_from_u64(1);
        let bidders = generate_population(&config.population, &config.strategies, &mut rng).unwrap();

        assert_eq!(bidders.len(), 20);
        for (i, b) in bidders.iter().enumerate() {
            assert_eq!(b.id(), BidderId(i as u32 + 1));
            assert!((500.0..=1500.0).contains(&b.base_valuation()));
            assert_eq!(b.valuation_source().std_dev(), 50.0);
            assert_eq!(b.units_won(), 0);
        }
    }

    #[test]
    fn same_seed_same_population() {
        let config = SimulationConfig::default_preset();
        let a = generate_population(
            &config.population,
            &config.strategies,
            &mut StdRng::seed_from_u64(9),
        )
        .unwrap();
        let b = generate_population(
            &config.population,
            &config.strategies,
            &mut StdRng::seed_from_u64(9),
        )
        .unwrap();
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.base_valuation(), y.base_valuation());
            assert_eq!(x.strategy_name(), y.strategy_name());
        }
    }

    #[test]
    fn single_entry_pool_assigns_everyone_that_strategy() {
        let mut config = SimulationConfig::default_preset();
        config.strategies.truncate(1);
        config.strategies[0].strategy = StrategyConfig::SimpleProportional { risk_factor: 0.5 };
        let bidders = generate_population(
            &config.population,
            &config.strategies,
            &mut StdRng::seed_from_u64(2),
        )
        .unwrap();
        assert!(bidders.iter().all(|b| b.strategy_name() == "simple_proportional"));
    }

    #[test]
    fn degenerate_range_gives_fixed_valuation() {
        let mut config = SimulationConfig::default_preset();
        config.population.valuation_min = 800.0;
        config.population.valuation_max = 800.0;
        let bidders = generate_population(
            &config.population,
            &config.strategies,
            &mut StdRng::seed_from_u64(3),
        )
        .unwrap();
        assert!(bidders.iter().all(|b| b.base_valuation() == 800.0));
    }

    #[test]
    fn zero_weight_pool_is_rejected() {
        let mut config = SimulationConfig::default_preset();
        for entry in &mut config.strategies {
            entry.weight = 0.0;
        }
        let err = generate_population(
            &config.population,
            &config.strategies,
            &mut StdRng::seed_from_u64(4),
        );
        assert!(matches!(err, Err(RunError::Config(_))));
    }
}
