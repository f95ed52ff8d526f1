//! Deterministic RNG hierarchy.
//!
//! A master seed generates deterministic sub-seeds for each `(run_id, stream, index)`
//! tuple. Sub-seeds are derived via BLAKE3 hashing, so the population draw and the
//! auction rounds consume independent streams: changing how many numbers one stream
//! uses never shifts the other.

use crate::domain::RunId;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Stream label for bidder population generation.
pub const POPULATION_STREAM: &str = "population";
/// Stream label for valuation noise and follower deviations during the run.
pub const AUCTION_STREAM: &str = "auction";

/// Deterministic RNG hierarchy.
#[derive(Debug, Clone)]
pub struct RngHierarchy {
    master_seed: u64,
}

impl RngHierarchy {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Derive a deterministic sub-seed for a specific (run_id, stream, index).
    ///
    /// Independent of derivation order.
    pub fn sub_seed(&self, run_id: &RunId, stream: &str, index: u64) -> u64 {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&self.master_seed.to_le_bytes());
        hasher.update(&run_id.0);
        hasher.update(stream.as_bytes());
        hasher.update(&index.to_le_bytes());
        let hash = hasher.finalize();
        let mut head = [0u8; 8];
        head.copy_from_slice(&hash.as_bytes()[..8]);
        u64::from_le_bytes(head)
    }

    /// Create a seeded StdRng for a sub-stream.
    pub fn rng_for(&self, run_id: &RunId, stream: &str, index: u64) -> StdRng {
        StdRng::seed_from_u64(self.sub_seed(run_id, stream, index))
    }
}
