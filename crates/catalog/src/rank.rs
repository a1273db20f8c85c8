//! Top-rated ordering
//!
//! The rating score is smoothed as `total_rating / (times_rated + 1)`:
//! defined for never-rated titles and damped for titles with few ratings.
//! The query orders ascending by that score; among equal scores the title
//! with more ratings comes first, and remaining ties fall back to ascending
//! identifier so the order is total.
//!
//! Ascending is the contract the original store's clients observe, kept
//! verbatim for compatibility. Flipping it is a one-line change here if the
//! product ever decides "top" should mean highest-first.

use std::cmp::Ordering;

use shelf_core::types::StockBook;

/// Compare two snapshots under the top-rated order
pub fn top_rated_order(a: &StockBook, b: &StockBook) -> Ordering {
    a.smoothed_rating()
        .total_cmp(&b.smoothed_rating())
        .then_with(|| b.times_rated.cmp(&a.times_rated))
        .then_with(|| a.isbn.cmp(&b.isbn))
}

/// Sort snapshots in place under the top-rated order
pub fn sort_top_rated(books: &mut [StockBook]) {
    books.sort_unstable_by(top_rated_order);
}
