//! Sampling without replacement for the editor-pick query
//!
//! Rejection sampling over an index set: draw a position, add it to the
//! set, repeat until the set holds `k` distinct positions. Generic over the
//! RNG so tests can pin a seed.

use std::collections::HashSet;

use rand::Rng;

/// Draw `k` distinct indices from `0..population` uniformly at random
///
/// If `k >= population` every index is returned. The expected number of
/// draws stays small as long as `k` is not close to `population`; the
/// degenerate near-full case still terminates because each round has a
/// positive chance of hitting an unseen index.
pub fn sample_distinct<R: Rng + ?Sized>(rng: &mut R, population: usize, k: usize) -> HashSet<usize> {
    if k >= population {
        return (0..population).collect();
    }

    let mut picked = HashSet::with_capacity(k);
    while picked.len() < k {
        picked.insert(rng.gen_range(0..population));
    }
    picked
}
