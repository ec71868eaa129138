//! Reproducible seed sets with ChaCha8.
//!
//! The initial seed always occupies slot 0; extra variation seeds come
//! from a ChaCha8Rng seeded by the initial seed. Same inputs -> same
//! seeds, always.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Inclusive range variation seeds are drawn from.
const SEED_RANGE: std::ops::RangeInclusive<u64> = 1..=10_000;

/// Build the seed set for a run.
///
/// `variations` is clamped to at least 1. The generator draws one value
/// per slot and slot 0 is then overwritten with `initial_seed`. The draw
/// that landed there is discarded, not reused, so the tail of the set is
/// the same whether or not the override changed anything.
pub fn build_seed_set(initial_seed: u64, variations: usize) -> Vec<u64> {
    let variations = variations.max(1);
    if variations == 1 {
        return vec![initial_seed];
    }

    let mut rng = ChaCha8Rng::seed_from_u64(initial_seed);
    let mut seeds: Vec<u64> = (0..variations)
        .map(|_| rng.gen_range(SEED_RANGE))
        .collect();
    seeds[0] = initial_seed;
    seeds
}
