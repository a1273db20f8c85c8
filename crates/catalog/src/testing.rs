//! Test-data generation helpers
//!
//! Shared by integration tests and benches; not part of the store's
//! operational surface. Generates unique throwaway listings with
//! sequential identifiers and randomized price and stock.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use shelf_core::types::{Isbn, StockBook};

/// First identifier handed out by a fresh generator
const FIRST_ISBN: Isbn = 10_000;

/// Generator of unique throwaway listings
pub struct BookSetGenerator {
    rng: StdRng,
    next_isbn: Isbn,
}

impl BookSetGenerator {
    /// Create a generator seeded from the OS
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Create a generator with a pinned seed, for reproducible tests
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng,
            next_isbn: FIRST_ISBN,
        }
    }

    /// Produce `num` fresh listings with distinct ascending identifiers
    ///
    /// Prices land in `[50, 250]` and initial stock in `[1, 20]`; demand
    /// and rating counters start zeroed.
    pub fn next_stock_books(&mut self, num: usize) -> Vec<StockBook> {
        (0..num)
            .map(|_| {
                let isbn = self.next_isbn;
                self.next_isbn += 1;
                StockBook::new(
                    isbn,
                    format!("Title{}", isbn),
                    format!("Author{}", isbn),
                    50.0 + self.rng.gen_range(0..=200) as f32,
                    self.rng.gen_range(1..=20),
                )
            })
            .collect()
    }

    /// Pick up to `num` identifiers from `isbns` uniformly at random
    pub fn sample_isbns(&mut self, isbns: &[Isbn], num: usize) -> Vec<Isbn> {
        isbns
            .choose_multiple(&mut self.rng, num)
            .copied()
            .collect()
    }
}

impl Default for BookSetGenerator {
    fn default() -> Self {
        Self::new()
    }
}
