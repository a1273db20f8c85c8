//! The shared catalog and its two-level locking protocol
//!
//! One coarse reader/writer lock guards the map's key set; one fine lock
//! per record guards that record's fields. The coarse lock is held
//! **exclusively** only by operations that insert or remove keys
//! (`add_books`, `remove_books`, `remove_all_books`). Everything else,
//! value mutation and every query alike, holds it **shared** and serializes at
//! the record level instead, so buys, restocks, ratings, and reads on
//! different titles run fully in parallel.
//!
//! Every operation follows the same shape: validate the whole batch, take
//! the coarse lock at the right mode, check existence against the live map,
//! acquire the affected record locks in ascending identifier order (see
//! [`crate::locking`]), mutate or snapshot, release everything. Validation
//! failures mutate nothing; the one documented exception is the buy path,
//! which commits sale-miss counters on availability failures because the
//! demand query is fed by exactly that signal.
//!
//! No I/O happens under any lock, and no lock is held across a return.

use parking_lot::{Mutex, RwLock};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use shelf_core::error::{CatalogError, Result};
use shelf_core::request::BatchRequest;
use shelf_core::traits::{StockManager, Storefront};
use shelf_core::types::{Book, BookCopy, BookRating, EditorPick, Isbn, StockBook};
use shelf_core::validate;

use crate::config::CatalogConfig;
use crate::locking::{sorted_write_locks, Shelves};
use crate::rank;
use crate::record::StockRecord;
use crate::sample;

/// Shared in-memory inventory store
///
/// Cheap to share behind an `Arc`; every method takes `&self` and blocks
/// the calling thread until the operation commits or fails.
pub struct Catalog {
    /// Coarse lock over the title map; per-record locks live in the values
    shelves: RwLock<Shelves>,
    /// RNG for the editor-pick query, seedable for deterministic tests
    sampler: Mutex<StdRng>,
}

impl Catalog {
    /// Create an empty catalog with default configuration
    pub fn new() -> Self {
        Self::with_config(&CatalogConfig::default())
    }

    /// Create an empty catalog from a [`CatalogConfig`]
    pub fn with_config(config: &CatalogConfig) -> Self {
        let rng = match config.sample_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            shelves: RwLock::new(Shelves::with_capacity_and_hasher(
                config.initial_capacity,
                Default::default(),
            )),
            sampler: Mutex::new(rng),
        }
    }

    /// Check that an identifier is well formed and present in the map
    fn ensure_in_stock(shelves: &Shelves, isbn: Isbn) -> Result<()> {
        validate::validate_isbn(isbn)?;
        if !shelves.contains_key(&isbn) {
            return Err(CatalogError::IsbnNotFound(isbn));
        }
        Ok(())
    }

    /// Add new titles with their initial stock, all or nothing
    pub fn add_books(&self, books: &[StockBook]) -> Result<Vec<StockBook>> {
        for book in books {
            validate::validate_new_book(book)?;
        }
        validate::ensure_unique_isbns(books.iter().map(|b| b.isbn))?;

        let mut shelves = self.shelves.write();
        for book in books {
            if shelves.contains_key(&book.isbn) {
                return Err(CatalogError::DuplicateIsbn(book.isbn));
            }
        }

        let mut added = Vec::with_capacity(books.len());
        for book in books {
            let record = StockRecord::new(book);
            added.push(record.to_stock_book());
            shelves.insert(book.isbn, RwLock::new(record));
        }

        debug!(added = added.len(), "listed new titles");
        Ok(added)
    }

    /// Restock existing titles, all or nothing
    ///
    /// Also clears each touched record's sale-miss counter; restocking is
    /// the defined remedy for unmet demand.
    pub fn add_copies(&self, copies: &[BookCopy]) -> Result<Vec<StockBook>> {
        for copy in copies {
            validate::validate_copy(copy)?;
        }
        validate::ensure_unique_isbns(copies.iter().map(|c| c.isbn))?;

        let shelves = self.shelves.read();
        for copy in copies {
            Self::ensure_in_stock(&shelves, copy.isbn)?;
        }

        let mut ordered = copies.to_vec();
        ordered.sort_unstable_by_key(|c| c.isbn);
        let mut guards = sorted_write_locks(&shelves, ordered.iter().map(|c| c.isbn))?;

        let mut restocked = Vec::with_capacity(ordered.len());
        for (guard, copy) in guards.iter_mut().zip(&ordered) {
            guard.add_copies(copy.num_copies);
            restocked.push(guard.to_stock_book());
        }
        Ok(restocked)
    }

    /// Buy copies of existing titles
    ///
    /// All quantities are debited, or none are. Availability is checked
    /// across the whole batch before anything changes; every short record
    /// advances its sale-miss counter by the unmet amount even though the
    /// batch then fails; the demand query reports exactly those counters.
    pub fn buy_books(&self, copies: &[BookCopy]) -> Result<Vec<StockBook>> {
        for copy in copies {
            validate::validate_copy(copy)?;
        }
        validate::ensure_unique_isbns(copies.iter().map(|c| c.isbn))?;

        let shelves = self.shelves.read();
        for copy in copies {
            Self::ensure_in_stock(&shelves, copy.isbn)?;
        }

        let mut ordered = copies.to_vec();
        ordered.sort_unstable_by_key(|c| c.isbn);
        let mut guards = sorted_write_locks(&shelves, ordered.iter().map(|c| c.isbn))?;

        // Scan the whole batch before touching any quantity; a short record
        // is noted but never stops the scan.
        let mut shortfalls: Vec<(usize, i64)> = Vec::new();
        for (i, (guard, copy)) in guards.iter().zip(&ordered).enumerate() {
            if !guard.has_copies(copy.num_copies) {
                shortfalls.push((i, copy.num_copies - guard.num_copies()));
            }
        }

        if !shortfalls.is_empty() {
            for &(i, missed) in &shortfalls {
                guards[i].record_sale_miss(missed);
            }
            debug!(
                misses = shortfalls.len(),
                "purchase failed on availability, demand recorded"
            );
            return Err(CatalogError::InsufficientStock {
                misses: shortfalls.len(),
            });
        }

        let mut bought = Vec::with_capacity(ordered.len());
        for (guard, copy) in guards.iter_mut().zip(&ordered) {
            guard.sell_copies(copy.num_copies);
            bought.push(guard.to_stock_book());
        }
        Ok(bought)
    }

    /// Rate existing titles, all or nothing
    pub fn rate_books(&self, ratings: &[BookRating]) -> Result<Vec<StockBook>> {
        for rating in ratings {
            validate::validate_rating(rating)?;
        }
        validate::ensure_unique_isbns(ratings.iter().map(|r| r.isbn))?;

        let shelves = self.shelves.read();
        for rating in ratings {
            Self::ensure_in_stock(&shelves, rating.isbn)?;
        }

        let mut ordered = ratings.to_vec();
        ordered.sort_unstable_by_key(|r| r.isbn);
        let mut guards = sorted_write_locks(&shelves, ordered.iter().map(|r| r.isbn))?;

        let mut rated = Vec::with_capacity(ordered.len());
        for (guard, rating) in guards.iter_mut().zip(&ordered) {
            guard.add_rating(rating.rating);
            rated.push(guard.to_stock_book());
        }
        Ok(rated)
    }

    /// Set or clear editor-pick flags on existing titles, all or nothing
    pub fn update_editor_picks(&self, picks: &[EditorPick]) -> Result<Vec<StockBook>> {
        for pick in picks {
            validate::validate_isbn(pick.isbn)?;
        }
        validate::ensure_unique_isbns(picks.iter().map(|p| p.isbn))?;

        let shelves = self.shelves.read();
        for pick in picks {
            Self::ensure_in_stock(&shelves, pick.isbn)?;
        }

        let mut ordered = picks.to_vec();
        ordered.sort_unstable_by_key(|p| p.isbn);
        let mut guards = sorted_write_locks(&shelves, ordered.iter().map(|p| p.isbn))?;

        let mut flagged = Vec::with_capacity(ordered.len());
        for (guard, pick) in guards.iter_mut().zip(&ordered) {
            guard.set_editor_pick(pick.editor_pick);
            flagged.push(guard.to_stock_book());
        }
        Ok(flagged)
    }

    /// Remove the given titles, all or nothing
    pub fn remove_books(&self, isbns: &[Isbn]) -> Result<()> {
        for &isbn in isbns {
            validate::validate_isbn(isbn)?;
        }
        validate::ensure_unique_isbns(isbns.iter().copied())?;

        let mut shelves = self.shelves.write();
        for &isbn in isbns {
            if !shelves.contains_key(&isbn) {
                return Err(CatalogError::IsbnNotFound(isbn));
            }
        }
        for isbn in isbns {
            shelves.remove(isbn);
        }
        Ok(())
    }

    /// Remove every title from the catalog
    pub fn remove_all_books(&self) -> Result<()> {
        let mut shelves = self.shelves.write();
        let removed = shelves.len();
        shelves.clear();
        info!(removed, "cleared catalog");
        Ok(())
    }

    /// Snapshot every record, in arbitrary order
    pub fn get_books(&self) -> Result<Vec<StockBook>> {
        let shelves = self.shelves.read();
        Ok(shelves
            .values()
            .map(|record| record.read().to_stock_book())
            .collect())
    }

    /// Snapshot the records for the given identifiers, in input order
    pub fn get_books_by_isbn(&self, isbns: &[Isbn]) -> Result<Vec<StockBook>> {
        let shelves = self.shelves.read();
        for &isbn in isbns {
            Self::ensure_in_stock(&shelves, isbn)?;
        }

        let mut found = Vec::with_capacity(isbns.len());
        for &isbn in isbns {
            let record = shelves.get(&isbn).ok_or(CatalogError::IsbnNotFound(isbn))?;
            found.push(record.read().to_stock_book());
        }
        Ok(found)
    }

    /// Storefront view of the given identifiers, in input order
    pub fn browse_books(&self, isbns: &[Isbn]) -> Result<Vec<Book>> {
        let shelves = self.shelves.read();
        for &isbn in isbns {
            Self::ensure_in_stock(&shelves, isbn)?;
        }

        let mut found = Vec::with_capacity(isbns.len());
        for &isbn in isbns {
            let record = shelves.get(&isbn).ok_or(CatalogError::IsbnNotFound(isbn))?;
            found.push(record.read().to_book());
        }
        Ok(found)
    }

    /// Snapshot every record with outstanding sale misses
    pub fn get_books_in_demand(&self) -> Result<Vec<StockBook>> {
        let shelves = self.shelves.read();
        Ok(shelves
            .values()
            .filter_map(|cell| {
                let record = cell.read();
                record.in_demand().then(|| record.to_stock_book())
            })
            .collect())
    }

    /// Up to `num_books` titles under the smoothed-rating order
    ///
    /// Ascending smoothed score, ties broken by higher rating count; see
    /// [`crate::rank`] for the pinned contract. Requests larger than the
    /// catalog truncate to the full set.
    pub fn get_top_rated_books(&self, num_books: i64) -> Result<Vec<Book>> {
        let want = validate::validate_request_count(num_books)?;

        let mut all = {
            let shelves = self.shelves.read();
            shelves
                .values()
                .map(|record| record.read().to_stock_book())
                .collect::<Vec<_>>()
        };

        rank::sort_top_rated(&mut all);
        all.truncate(want);
        Ok(all.iter().map(StockBook::to_book).collect())
    }

    /// Up to `num_books` editor picks, sampled without replacement
    ///
    /// Returns all flagged titles when no more than `num_books` are
    /// flagged. Sampling happens after every lock is released.
    pub fn get_editor_picks(&self, num_books: i64) -> Result<Vec<Book>> {
        let want = validate::validate_request_count(num_books)?;

        let picks: Vec<Book> = {
            let shelves = self.shelves.read();
            shelves
                .values()
                .filter_map(|cell| {
                    let record = cell.read();
                    record.is_editor_pick().then(|| record.to_book())
                })
                .collect()
        };

        if picks.len() <= want {
            return Ok(picks);
        }

        let chosen = {
            let mut rng = self.sampler.lock();
            sample::sample_distinct(&mut *rng, picks.len(), want)
        };
        Ok(picks
            .into_iter()
            .enumerate()
            .filter(|(i, _)| chosen.contains(i))
            .map(|(_, book)| book)
            .collect())
    }

    /// Dispatch a decoded wire batch to the matching operation
    ///
    /// Removal requests return an empty payload on success; every other
    /// operation returns the post-state snapshots of the touched records.
    pub fn apply(&self, request: &BatchRequest) -> Result<Vec<StockBook>> {
        match request {
            BatchRequest::AddBooks { books } => self.add_books(books),
            BatchRequest::AddCopies { copies } => self.add_copies(copies),
            BatchRequest::BuyBooks { copies } => self.buy_books(copies),
            BatchRequest::RateBooks { ratings } => self.rate_books(ratings),
            BatchRequest::UpdateEditorPicks { picks } => self.update_editor_picks(picks),
            BatchRequest::RemoveBooks { isbns } => {
                self.remove_books(isbns)?;
                Ok(Vec::new())
            }
            BatchRequest::RemoveAllBooks => {
                self.remove_all_books()?;
                Ok(Vec::new())
            }
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl StockManager for Catalog {
    fn add_books(&self, books: &[StockBook]) -> Result<Vec<StockBook>> {
        Catalog::add_books(self, books)
    }

    fn add_copies(&self, copies: &[BookCopy]) -> Result<Vec<StockBook>> {
        Catalog::add_copies(self, copies)
    }

    fn get_books(&self) -> Result<Vec<StockBook>> {
        Catalog::get_books(self)
    }

    fn get_books_by_isbn(&self, isbns: &[Isbn]) -> Result<Vec<StockBook>> {
        Catalog::get_books_by_isbn(self, isbns)
    }

    fn get_books_in_demand(&self) -> Result<Vec<StockBook>> {
        Catalog::get_books_in_demand(self)
    }

    fn update_editor_picks(&self, picks: &[EditorPick]) -> Result<Vec<StockBook>> {
        Catalog::update_editor_picks(self, picks)
    }

    fn remove_books(&self, isbns: &[Isbn]) -> Result<()> {
        Catalog::remove_books(self, isbns)
    }

    fn remove_all_books(&self) -> Result<()> {
        Catalog::remove_all_books(self)
    }
}

impl Storefront for Catalog {
    fn buy_books(&self, copies: &[BookCopy]) -> Result<Vec<StockBook>> {
        Catalog::buy_books(self, copies)
    }

    fn browse_books(&self, isbns: &[Isbn]) -> Result<Vec<Book>> {
        Catalog::browse_books(self, isbns)
    }

    fn get_editor_picks(&self, num_books: i64) -> Result<Vec<Book>> {
        Catalog::get_editor_picks(self, num_books)
    }

    fn get_top_rated_books(&self, num_books: i64) -> Result<Vec<Book>> {
        Catalog::get_top_rated_books(self, num_books)
    }

    fn rate_books(&self, ratings: &[BookRating]) -> Result<Vec<StockBook>> {
        Catalog::rate_books(self, ratings)
    }
}
