//! Batch precondition validation
//!
//! Pure well-formedness checks, run against a whole batch before any lock is
//! taken on its behalf. Existence and duplicate-against-catalog checks need
//! the catalog's coarse lock and live with the catalog itself; everything
//! here is lock-free and side-effect-free.

use crate::error::{CatalogError, Result};
use crate::types::{BookCopy, BookRating, Isbn, StockBook};

/// Check that an identifier is positive
pub fn validate_isbn(isbn: Isbn) -> Result<()> {
    if isbn < 1 {
        return Err(CatalogError::InvalidIsbn(isbn));
    }
    Ok(())
}

/// Check the identity fields and initial copy count of a new listing
pub fn validate_new_book(book: &StockBook) -> Result<()> {
    validate_isbn(book.isbn)?;

    if book.title.trim().is_empty() {
        return Err(CatalogError::invalid_field("title", "must not be empty"));
    }
    if book.author.trim().is_empty() {
        return Err(CatalogError::invalid_field("author", "must not be empty"));
    }
    if book.num_copies < 1 {
        return Err(CatalogError::invalid_field(
            "num_copies",
            format!("{} is not a positive copy count", book.num_copies),
        ));
    }
    if book.price < 0.0 {
        return Err(CatalogError::invalid_field(
            "price",
            format!("{} is negative", book.price),
        ));
    }

    Ok(())
}

/// Check a restock/purchase entry: valid identifier, positive copy count
pub fn validate_copy(copy: &BookCopy) -> Result<()> {
    validate_isbn(copy.isbn)?;

    if copy.num_copies < 1 {
        return Err(CatalogError::invalid_field(
            "num_copies",
            format!("{} is not a positive copy count", copy.num_copies),
        ));
    }

    Ok(())
}

/// Check a rating entry: valid identifier, rating in `[0, 5]`
pub fn validate_rating(rating: &BookRating) -> Result<()> {
    validate_isbn(rating.isbn)?;

    if !(0..=5).contains(&rating.rating) {
        return Err(CatalogError::invalid_field(
            "rating",
            format!("{} is out of [0, 5]", rating.rating),
        ));
    }

    Ok(())
}

/// Reject batches that name the same identifier twice
///
/// Every multi-record operation acquires per-record write locks in sorted
/// identifier order; a repeated identifier would make it lock the same
/// record twice, so duplicates are screened out before any lock is taken.
pub fn ensure_unique_isbns(isbns: impl IntoIterator<Item = Isbn>) -> Result<()> {
    let mut seen = std::collections::HashSet::new();
    for isbn in isbns {
        if !seen.insert(isbn) {
            return Err(CatalogError::DuplicateIsbn(isbn));
        }
    }
    Ok(())
}

/// Check a query's requested result count, converting it to a usize
pub fn validate_request_count(num_books: i64) -> Result<usize> {
    if num_books < 0 {
        return Err(CatalogError::invalid_field(
            "num_books",
            format!("{} is negative", num_books),
        ));
    }
    Ok(num_books as usize)
}
