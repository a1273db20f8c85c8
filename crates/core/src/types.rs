//! Contract types for the shelfdb catalog
//!
//! This module defines the shared vocabulary of both capability surfaces:
//! - Book: immutable storefront view of a title
//! - StockBook: immutable back-office view (adds inventory counters)
//! - BookCopy / BookRating / EditorPick: batch entry types
//!
//! Identifiers travel as plain `i64` so that malformed wire values (zero,
//! negative) are representable and rejected by validation instead of being
//! unconstructible. Valid identifiers are always >= 1.

use serde::{Deserialize, Serialize};

/// Title identifier ("ISBN"). Valid values are positive.
pub type Isbn = i64;

/// Immutable storefront view of a title
///
/// Identity fields only; never reflects inventory state. Returned by the
/// storefront surface and embedded in [`StockBook`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Title identifier
    pub isbn: Isbn,
    /// Title name
    pub title: String,
    /// Author name
    pub author: String,
    /// Unit price
    pub price: f32,
}

/// Immutable back-office view of a title
///
/// Extends the identity fields with the inventory counters maintained by the
/// catalog. Also the input shape for adding titles: a fresh listing carries
/// its initial copy count and zeroed counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockBook {
    /// Title identifier
    pub isbn: Isbn,
    /// Title name
    pub title: String,
    /// Author name
    pub author: String,
    /// Unit price
    pub price: f32,
    /// Copies currently on hand
    pub num_copies: i64,
    /// Cumulative unmet purchase demand
    pub sale_misses: i64,
    /// Number of ratings received
    pub times_rated: i64,
    /// Sum of all ratings received
    pub total_rating: i64,
    /// Editor curation flag
    pub editor_pick: bool,
}

impl StockBook {
    /// Create a fresh listing with zeroed counters
    pub fn new(
        isbn: Isbn,
        title: impl Into<String>,
        author: impl Into<String>,
        price: f32,
        num_copies: i64,
    ) -> Self {
        Self {
            isbn,
            title: title.into(),
            author: author.into(),
            price,
            num_copies,
            sale_misses: 0,
            times_rated: 0,
            total_rating: 0,
            editor_pick: false,
        }
    }

    /// Plain average rating, `None` if the title was never rated
    pub fn average_rating(&self) -> Option<f32> {
        if self.times_rated == 0 {
            None
        } else {
            Some(self.total_rating as f32 / self.times_rated as f32)
        }
    }

    /// Smoothed rating score used by the top-rated ordering
    ///
    /// `total_rating / (times_rated + 1)`: defined for never-rated titles
    /// and damped for titles with few ratings.
    pub fn smoothed_rating(&self) -> f64 {
        self.total_rating as f64 / (self.times_rated as f64 + 1.0)
    }

    /// Project down to the storefront view
    pub fn to_book(&self) -> Book {
        Book {
            isbn: self.isbn,
            title: self.title.clone(),
            author: self.author.clone(),
            price: self.price,
        }
    }
}

/// Batch entry: a number of copies of one title
///
/// Used both for restocking (`num_copies` is the delta to add) and for
/// purchases (`num_copies` is the quantity requested). Must be positive in
/// either role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookCopy {
    /// Title identifier
    pub isbn: Isbn,
    /// Copy count, always positive when valid
    pub num_copies: i64,
}

impl BookCopy {
    /// Create a batch entry
    pub fn new(isbn: Isbn, num_copies: i64) -> Self {
        Self { isbn, num_copies }
    }
}

/// Batch entry: one rating for one title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRating {
    /// Title identifier
    pub isbn: Isbn,
    /// Rating value, in `[0, 5]` when valid
    pub rating: i64,
}

impl BookRating {
    /// Create a batch entry
    pub fn new(isbn: Isbn, rating: i64) -> Self {
        Self { isbn, rating }
    }
}

/// Batch entry: editor-pick flag update for one title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorPick {
    /// Title identifier
    pub isbn: Isbn,
    /// New flag value
    pub editor_pick: bool,
}

impl EditorPick {
    /// Create a batch entry
    pub fn new(isbn: Isbn, editor_pick: bool) -> Self {
        Self { isbn, editor_pick }
    }
}
