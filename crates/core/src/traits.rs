//! Capability surfaces of the inventory store
//!
//! Two traits split the catalog's operations by who may call them:
//! - [`StockManager`]: the back-office surface (curate titles, restock,
//!   inspect demand)
//! - [`Storefront`]: the buyer surface (browse, buy, rate)
//!
//! Both are implemented by the in-memory catalog; a remote proxy backed by a
//! wire transport implements the same traits, which is why every method
//! returns a `Result` even where the in-memory implementation cannot fail.
//!
//! Mutating operations return post-state snapshots of the records they
//! touched. All methods block the calling thread until the operation has
//! committed or failed; implementations must be safe to share across
//! threads (`Send + Sync`).

use crate::error::Result;
use crate::types::{Book, BookCopy, BookRating, EditorPick, Isbn, StockBook};

/// Back-office surface: owns the title set and the stock levels
pub trait StockManager: Send + Sync {
    /// Add new titles with their initial stock, all or nothing
    ///
    /// # Errors
    ///
    /// Fails the whole batch if any entry is malformed, duplicates an
    /// existing identifier, or repeats an identifier within the batch.
    /// Nothing is inserted on failure.
    fn add_books(&self, books: &[StockBook]) -> Result<Vec<StockBook>>;

    /// Add copies to existing titles, all or nothing
    ///
    /// A successful restock also clears each touched record's sale-miss
    /// counter: restocking is the defined remedy for unmet demand.
    ///
    /// # Errors
    ///
    /// Fails the whole batch with no mutation if any identifier is invalid
    /// or absent, any delta is non-positive, or an identifier repeats.
    fn add_copies(&self, copies: &[BookCopy]) -> Result<Vec<StockBook>>;

    /// Snapshot every record in the catalog, in arbitrary order
    fn get_books(&self) -> Result<Vec<StockBook>>;

    /// Snapshot the records for the given identifiers, in input order
    ///
    /// # Errors
    ///
    /// Fails if any identifier is invalid or absent.
    fn get_books_by_isbn(&self, isbns: &[Isbn]) -> Result<Vec<StockBook>>;

    /// Snapshot every record with outstanding sale misses
    fn get_books_in_demand(&self) -> Result<Vec<StockBook>>;

    /// Set or clear the editor-pick flag on existing titles, all or nothing
    ///
    /// # Errors
    ///
    /// Fails the whole batch with no mutation if any identifier is invalid,
    /// absent, or repeated.
    fn update_editor_picks(&self, picks: &[EditorPick]) -> Result<Vec<StockBook>>;

    /// Remove the given titles from the catalog, all or nothing
    ///
    /// # Errors
    ///
    /// Fails with no mutation if any identifier is invalid, absent, or
    /// repeated.
    fn remove_books(&self, isbns: &[Isbn]) -> Result<()>;

    /// Remove every title from the catalog
    fn remove_all_books(&self) -> Result<()>;
}

/// Buyer surface: purchases, ratings, and curated browsing
pub trait Storefront: Send + Sync {
    /// Buy copies of existing titles, all or nothing on quantities
    ///
    /// If every record has sufficient stock, all quantities are debited. If
    /// any record is short, no quantity changes anywhere, but every short
    /// record's sale-miss counter is still advanced by the unmet amount
    /// before the batch fails. The demand query is fed by exactly this
    /// side effect.
    ///
    /// # Errors
    ///
    /// - Validation failure (invalid/absent/repeated identifier,
    ///   non-positive quantity): no mutation at all.
    /// - [`CatalogError::InsufficientStock`]: sale-miss counters committed,
    ///   quantities untouched.
    ///
    /// [`CatalogError::InsufficientStock`]: crate::error::CatalogError::InsufficientStock
    fn buy_books(&self, copies: &[BookCopy]) -> Result<Vec<StockBook>>;

    /// Look up the storefront view of the given titles, in input order
    ///
    /// # Errors
    ///
    /// Fails if any identifier is invalid or absent.
    fn browse_books(&self, isbns: &[Isbn]) -> Result<Vec<Book>>;

    /// Sample up to `num_books` distinct editor picks uniformly at random
    ///
    /// Returns all flagged titles when there are no more than `num_books`
    /// of them; order is arbitrary.
    ///
    /// # Errors
    ///
    /// Fails if `num_books` is negative.
    fn get_editor_picks(&self, num_books: i64) -> Result<Vec<Book>>;

    /// Return up to `num_books` titles under the smoothed-rating order
    ///
    /// The order is the original store's observable contract: ascending
    /// smoothed score, ties broken by higher rating count. Requests larger
    /// than the catalog truncate to the full set.
    ///
    /// # Errors
    ///
    /// Fails if `num_books` is negative.
    fn get_top_rated_books(&self, num_books: i64) -> Result<Vec<Book>>;

    /// Rate existing titles, all or nothing
    ///
    /// # Errors
    ///
    /// Fails the whole batch with no mutation if any identifier is invalid,
    /// absent, or repeated, or any rating is outside `[0, 5]`.
    fn rate_books(&self, ratings: &[BookRating]) -> Result<Vec<StockBook>>;
}
