//! Mutable per-title inventory state
//!
//! A [`StockRecord`] owns every field that changes after a title is listed:
//! copies on hand, the sale-miss counter, the rating accumulators, and the
//! editor-pick flag. The identity fields are frozen at creation.
//!
//! Records live inside the catalog map, each behind its own reader/writer
//! lock; all mutation happens through `&mut self`, which callers can only
//! obtain while holding that lock for writing. State leaves the lock scope
//! only as owned snapshot copies.

use shelf_core::types::{Book, Isbn, StockBook};

/// Mutable inventory state for one title
#[derive(Debug)]
pub struct StockRecord {
    /// Frozen identity fields
    book: Book,
    /// Copies on hand, never negative
    num_copies: i64,
    /// Cumulative unmet purchase demand
    sale_misses: i64,
    /// Number of ratings received
    times_rated: i64,
    /// Sum of all ratings received
    total_rating: i64,
    /// Editor curation flag
    editor_pick: bool,
}

impl StockRecord {
    /// Create a record from a validated new listing
    ///
    /// Only the identity fields and the initial copy count are taken from
    /// the listing; the demand and rating counters always start at zero.
    pub fn new(listing: &StockBook) -> Self {
        Self {
            book: listing.to_book(),
            num_copies: listing.num_copies,
            sale_misses: 0,
            times_rated: 0,
            total_rating: 0,
            editor_pick: false,
        }
    }

    /// Title identifier
    pub fn isbn(&self) -> Isbn {
        self.book.isbn
    }

    /// Copies currently on hand
    pub fn num_copies(&self) -> i64 {
        self.num_copies
    }

    /// Whether at least `want` copies are on hand
    pub fn has_copies(&self, want: i64) -> bool {
        self.num_copies >= want
    }

    /// Restock: add copies and clear the demand counter
    ///
    /// Restocking is the defined remedy for unmet demand, so a restocked
    /// title drops out of the demand query.
    pub fn add_copies(&mut self, delta: i64) {
        self.num_copies += delta;
        self.sale_misses = 0;
    }

    /// Debit sold copies; availability must have been checked first
    pub fn sell_copies(&mut self, count: i64) {
        debug_assert!(self.num_copies >= count, "availability checked before sale");
        self.num_copies -= count;
    }

    /// Advance the demand counter by an unmet amount
    pub fn record_sale_miss(&mut self, missed: i64) {
        self.sale_misses += missed;
    }

    /// Whether this title has outstanding unmet demand
    pub fn in_demand(&self) -> bool {
        self.sale_misses > 0
    }

    /// Accumulate one rating
    pub fn add_rating(&mut self, rating: i64) {
        self.times_rated += 1;
        self.total_rating += rating;
    }

    /// Set or clear the editor-pick flag
    pub fn set_editor_pick(&mut self, flag: bool) {
        self.editor_pick = flag;
    }

    /// Whether this title is an editor pick
    pub fn is_editor_pick(&self) -> bool {
        self.editor_pick
    }

    /// Owned storefront snapshot
    pub fn to_book(&self) -> Book {
        self.book.clone()
    }

    /// Owned back-office snapshot
    pub fn to_stock_book(&self) -> StockBook {
        StockBook {
            isbn: self.book.isbn,
            title: self.book.title.clone(),
            author: self.book.author.clone(),
            price: self.book.price,
            num_copies: self.num_copies,
            sale_misses: self.sale_misses,
            times_rated: self.times_rated,
            total_rating: self.total_rating,
            editor_pick: self.editor_pick,
        }
    }
}
