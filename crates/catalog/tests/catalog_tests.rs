//! Sequential semantics of the catalog operations
//!
//! These tests pin the batch contracts: all-or-nothing validation, the buy
//! path's demand bookkeeping, restock clearing demand, rating accumulation,
//! the top-rated ordering, editor-pick sampling, and removal.

use std::collections::HashSet;

use shelf_catalog::Catalog;
use shelf_core::error::CatalogError;
use shelf_core::types::{BookCopy, BookRating, EditorPick, Isbn, StockBook};

const TEST_ISBN: Isbn = 3_044_560;
const NUM_COPIES: i64 = 5;

// ============================================================================
// Test Helpers
// ============================================================================

fn store_with_default_book() -> Catalog {
    let catalog = Catalog::new();
    catalog
        .add_books(&[StockBook::new(
            TEST_ISBN,
            "Harry Potter and JUnit",
            "JK Unit",
            7.0,
            NUM_COPIES,
        )])
        .unwrap();
    catalog
}

fn add_book(catalog: &Catalog, isbn: Isbn, copies: i64) {
    catalog
        .add_books(&[StockBook::new(
            isbn,
            "Test of Thrones",
            "George RR Testin'",
            10.0,
            copies,
        )])
        .unwrap();
}

/// Full catalog state, sorted by identifier, for before/after comparisons
fn state_of(catalog: &Catalog) -> Vec<StockBook> {
    let mut books = catalog.get_books().unwrap();
    books.sort_by_key(|b| b.isbn);
    books
}

// ============================================================================
// Buying
// ============================================================================

#[test]
fn test_buy_all_copies_of_default_book() {
    let catalog = store_with_default_book();
    catalog
        .buy_books(&[BookCopy::new(TEST_ISBN, NUM_COPIES)])
        .unwrap();

    let book = &catalog.get_books_by_isbn(&[TEST_ISBN]).unwrap()[0];
    assert_eq!(book.num_copies, 0);
    assert_eq!(book.sale_misses, 0);
}

#[test]
fn test_buy_invalid_isbn_changes_nothing() {
    let catalog = store_with_default_book();
    let before = state_of(&catalog);

    let err = catalog
        .buy_books(&[BookCopy::new(TEST_ISBN, 1), BookCopy::new(-1, 1)])
        .unwrap_err();
    assert_eq!(err, CatalogError::InvalidIsbn(-1));
    assert_eq!(state_of(&catalog), before);
}

#[test]
fn test_buy_non_existing_isbn_changes_nothing() {
    let catalog = store_with_default_book();
    let before = state_of(&catalog);

    let err = catalog
        .buy_books(&[BookCopy::new(TEST_ISBN, 1), BookCopy::new(100_000, 1)])
        .unwrap_err();
    assert_eq!(err, CatalogError::IsbnNotFound(100_000));
    assert_eq!(state_of(&catalog), before);
}

#[test]
fn test_buy_non_positive_quantity_changes_nothing() {
    let catalog = store_with_default_book();
    let before = state_of(&catalog);

    for quantity in [0, -1] {
        let err = catalog
            .buy_books(&[BookCopy::new(TEST_ISBN, quantity)])
            .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::InvalidField {
                field: "num_copies",
                ..
            }
        ));
    }
    assert_eq!(state_of(&catalog), before);
}

#[test]
fn test_buy_duplicate_isbn_in_batch_rejected() {
    let catalog = store_with_default_book();
    let before = state_of(&catalog);

    let err = catalog
        .buy_books(&[BookCopy::new(TEST_ISBN, 1), BookCopy::new(TEST_ISBN, 2)])
        .unwrap_err();
    assert_eq!(err, CatalogError::DuplicateIsbn(TEST_ISBN));
    assert_eq!(state_of(&catalog), before);
}

#[test]
fn test_buy_too_many_books_records_miss_and_decrements_nothing() {
    let catalog = store_with_default_book();

    let err = catalog
        .buy_books(&[BookCopy::new(TEST_ISBN, NUM_COPIES + 2)])
        .unwrap_err();
    assert_eq!(err, CatalogError::InsufficientStock { misses: 1 });

    let book = &catalog.get_books_by_isbn(&[TEST_ISBN]).unwrap()[0];
    assert_eq!(book.num_copies, NUM_COPIES);
    assert_eq!(book.sale_misses, 2);
}

#[test]
fn test_failed_buy_spares_the_available_titles_but_counts_every_miss() {
    let catalog = store_with_default_book();
    add_book(&catalog, 555, 10);
    add_book(&catalog, 777, 1);

    // 555 has plenty, TEST_ISBN and 777 are short.
    let err = catalog
        .buy_books(&[
            BookCopy::new(555, 3),
            BookCopy::new(TEST_ISBN, NUM_COPIES + 1),
            BookCopy::new(777, 4),
        ])
        .unwrap_err();
    assert_eq!(err, CatalogError::InsufficientStock { misses: 2 });

    let books = catalog
        .get_books_by_isbn(&[555, TEST_ISBN, 777])
        .unwrap();
    assert_eq!(books[0].num_copies, 10);
    assert_eq!(books[0].sale_misses, 0);
    assert_eq!(books[1].num_copies, NUM_COPIES);
    assert_eq!(books[1].sale_misses, 1);
    assert_eq!(books[2].num_copies, 1);
    assert_eq!(books[2].sale_misses, 3);
}

#[test]
fn test_successful_buy_returns_post_state_snapshots() {
    let catalog = store_with_default_book();
    let bought = catalog
        .buy_books(&[BookCopy::new(TEST_ISBN, 2)])
        .unwrap();
    assert_eq!(bought.len(), 1);
    assert_eq!(bought[0].num_copies, NUM_COPIES - 2);
}

// ============================================================================
// Adding titles
// ============================================================================

#[test]
fn test_add_books_rejects_invalid_isbn_batchwide() {
    let catalog = store_with_default_book();
    let before = state_of(&catalog);

    let err = catalog
        .add_books(&[
            StockBook::new(90_001, "Fine", "Author", 5.0, 3),
            StockBook::new(-1, "Broken", "Author", 5.0, 3),
        ])
        .unwrap_err();
    assert_eq!(err, CatalogError::InvalidIsbn(-1));
    assert_eq!(state_of(&catalog), before);
}

#[test]
fn test_add_books_rejects_invalid_copies_batchwide() {
    let catalog = store_with_default_book();
    let before = state_of(&catalog);

    let err = catalog
        .add_books(&[StockBook::new(90_001, "Broken", "Author", 5.0, 0)])
        .unwrap_err();
    assert!(matches!(
        err,
        CatalogError::InvalidField {
            field: "num_copies",
            ..
        }
    ));
    assert_eq!(state_of(&catalog), before);
}

#[test]
fn test_add_books_rejects_negative_price_batchwide() {
    let catalog = store_with_default_book();
    let before = state_of(&catalog);

    let err = catalog
        .add_books(&[StockBook::new(90_001, "Broken", "Author", -5.0, 3)])
        .unwrap_err();
    assert!(matches!(
        err,
        CatalogError::InvalidField { field: "price", .. }
    ));
    assert_eq!(state_of(&catalog), before);
}

#[test]
fn test_add_books_rejects_existing_isbn_batchwide() {
    let catalog = store_with_default_book();
    let before = state_of(&catalog);

    let err = catalog
        .add_books(&[
            StockBook::new(90_001, "New", "Author", 5.0, 3),
            StockBook::new(TEST_ISBN, "Old", "Author", 5.0, 3),
        ])
        .unwrap_err();
    assert_eq!(err, CatalogError::DuplicateIsbn(TEST_ISBN));
    assert_eq!(state_of(&catalog), before);
}

#[test]
fn test_add_books_ignores_carried_counters() {
    let catalog = Catalog::new();
    let mut listing = StockBook::new(1, "T", "A", 1.0, 4);
    listing.sale_misses = 7;
    listing.times_rated = 7;
    listing.total_rating = 21;
    listing.editor_pick = true;

    let added = catalog.add_books(&[listing]).unwrap();
    assert_eq!(added[0].sale_misses, 0);
    assert_eq!(added[0].times_rated, 0);
    assert_eq!(added[0].total_rating, 0);
    assert!(!added[0].editor_pick);
}

// ============================================================================
// Restocking
// ============================================================================

#[test]
fn test_add_copies_increments_stock() {
    let catalog = store_with_default_book();
    catalog
        .add_copies(&[BookCopy::new(TEST_ISBN, 4)])
        .unwrap();
    let book = &catalog.get_books_by_isbn(&[TEST_ISBN]).unwrap()[0];
    assert_eq!(book.num_copies, NUM_COPIES + 4);
}

#[test]
fn test_add_copies_invalid_delta_changes_nothing() {
    let catalog = store_with_default_book();
    let before = state_of(&catalog);

    for delta in [0, -3] {
        assert!(catalog
            .add_copies(&[BookCopy::new(TEST_ISBN, delta)])
            .is_err());
    }
    assert_eq!(state_of(&catalog), before);
}

#[test]
fn test_add_copies_invalid_isbn_changes_nothing() {
    let catalog = store_with_default_book();
    let before = state_of(&catalog);

    assert_eq!(
        catalog.add_copies(&[BookCopy::new(-1, 4)]).unwrap_err(),
        CatalogError::InvalidIsbn(-1)
    );
    assert_eq!(
        catalog
            .add_copies(&[BookCopy::new(TEST_ISBN, 4), BookCopy::new(100_000, 4)])
            .unwrap_err(),
        CatalogError::IsbnNotFound(100_000)
    );
    assert_eq!(state_of(&catalog), before);
}

// ============================================================================
// Demand
// ============================================================================

#[test]
fn test_books_in_demand_after_sale_miss() {
    let catalog = store_with_default_book();
    assert!(catalog.get_books_in_demand().unwrap().is_empty());

    catalog
        .buy_books(&[BookCopy::new(TEST_ISBN, NUM_COPIES + 1)])
        .unwrap_err();

    let in_demand = catalog.get_books_in_demand().unwrap();
    assert_eq!(in_demand.len(), 1);
    assert_eq!(in_demand[0].isbn, TEST_ISBN);
    assert_eq!(in_demand[0].sale_misses, 1);
}

#[test]
fn test_books_in_demand_cleared_after_restock() {
    let catalog = store_with_default_book();
    catalog
        .buy_books(&[BookCopy::new(TEST_ISBN, NUM_COPIES + 1)])
        .unwrap_err();
    assert_eq!(catalog.get_books_in_demand().unwrap().len(), 1);

    catalog
        .add_copies(&[BookCopy::new(TEST_ISBN, 10)])
        .unwrap();
    assert!(catalog.get_books_in_demand().unwrap().is_empty());
}

#[test]
fn test_repeated_misses_accumulate() {
    let catalog = store_with_default_book();
    for _ in 0..3 {
        catalog
            .buy_books(&[BookCopy::new(TEST_ISBN, NUM_COPIES + 2)])
            .unwrap_err();
    }
    let in_demand = catalog.get_books_in_demand().unwrap();
    assert_eq!(in_demand[0].sale_misses, 6);
}

// ============================================================================
// Rating
// ============================================================================

#[test]
fn test_rate_books_validation() {
    let catalog = store_with_default_book();
    let before = state_of(&catalog);

    assert_eq!(
        catalog
            .rate_books(&[BookRating::new(-1, 4)])
            .unwrap_err(),
        CatalogError::InvalidIsbn(-1)
    );
    for rating in [6, -1] {
        assert!(matches!(
            catalog
                .rate_books(&[BookRating::new(TEST_ISBN, rating)])
                .unwrap_err(),
            CatalogError::InvalidField {
                field: "rating",
                ..
            }
        ));
    }
    assert_eq!(state_of(&catalog), before);
}

#[test]
fn test_rate_books_accumulates_sum_and_count() {
    let catalog = store_with_default_book();
    for rating in 0..=5 {
        catalog
            .rate_books(&[BookRating::new(TEST_ISBN, rating)])
            .unwrap();
    }

    let book = &catalog.get_books_by_isbn(&[TEST_ISBN]).unwrap()[0];
    assert_eq!(book.times_rated, 6);
    assert_eq!(book.total_rating, 15);
    assert_eq!(book.average_rating(), Some(2.5));
}

#[test]
fn test_rate_books_batch_is_all_or_nothing() {
    let catalog = store_with_default_book();
    add_book(&catalog, 555, 5);
    let before = state_of(&catalog);

    catalog
        .rate_books(&[BookRating::new(555, 4), BookRating::new(TEST_ISBN, 6)])
        .unwrap_err();
    assert_eq!(state_of(&catalog), before);
}

// ============================================================================
// Top rated
// ============================================================================

#[test]
fn test_top_rated_rejects_negative_count() {
    let catalog = store_with_default_book();
    assert!(catalog.get_top_rated_books(-1).is_err());
}

#[test]
fn test_top_rated_truncates_to_catalog_size() {
    let catalog = store_with_default_book();
    add_book(&catalog, 1, 10);
    add_book(&catalog, 2, 10);
    add_book(&catalog, 3, 10);

    assert_eq!(catalog.get_top_rated_books(10).unwrap().len(), 4);
    assert_eq!(catalog.get_top_rated_books(2).unwrap().len(), 2);
}

#[test]
fn test_top_rated_ordering_matches_reference_sequences() {
    let catalog = store_with_default_book();
    add_book(&catalog, 1, 10);
    add_book(&catalog, 2, 10);
    add_book(&catalog, 3, 10);

    catalog
        .rate_books(&[
            BookRating::new(TEST_ISBN, 3),
            BookRating::new(1, 1),
            BookRating::new(2, 2),
        ])
        .unwrap();
    let order: Vec<Isbn> = catalog
        .get_top_rated_books(4)
        .unwrap()
        .iter()
        .map(|b| b.isbn)
        .collect();
    assert_eq!(order, vec![3, 1, 2, TEST_ISBN]);

    // A zero rating drags the smoothed score of TEST_ISBN down to a tie
    // with book 2; more ratings sort first among equals.
    catalog
        .rate_books(&[BookRating::new(TEST_ISBN, 0)])
        .unwrap();
    let order: Vec<Isbn> = catalog
        .get_top_rated_books(4)
        .unwrap()
        .iter()
        .map(|b| b.isbn)
        .collect();
    assert_eq!(order, vec![3, 1, TEST_ISBN, 2]);
}

#[test]
fn test_top_rated_never_mutates() {
    let catalog = store_with_default_book();
    add_book(&catalog, 1, 10);
    let before = state_of(&catalog);
    catalog.get_top_rated_books(5).unwrap();
    assert_eq!(state_of(&catalog), before);
}

// ============================================================================
// Editor picks
// ============================================================================

#[test]
fn test_editor_picks_rejects_negative_count() {
    let catalog = store_with_default_book();
    assert!(catalog.get_editor_picks(-1).is_err());
}

#[test]
fn test_editor_picks_returns_all_when_request_covers_flagged() {
    let catalog = store_with_default_book();
    catalog
        .update_editor_picks(&[EditorPick::new(TEST_ISBN, true)])
        .unwrap();

    let picks = catalog.get_editor_picks(5).unwrap();
    assert_eq!(picks.len(), 1);
    assert_eq!(picks[0].isbn, TEST_ISBN);
}

#[test]
fn test_editor_picks_samples_distinct_flagged_titles() {
    let catalog = store_with_default_book();
    for isbn in 1..=10 {
        add_book(&catalog, isbn, 5);
    }
    let flags: Vec<EditorPick> = (1..=8).map(|isbn| EditorPick::new(isbn, true)).collect();
    catalog.update_editor_picks(&flags).unwrap();

    for _ in 0..20 {
        let picks = catalog.get_editor_picks(3).unwrap();
        assert_eq!(picks.len(), 3);
        let distinct: HashSet<Isbn> = picks.iter().map(|b| b.isbn).collect();
        assert_eq!(distinct.len(), 3);
        assert!(picks.iter().all(|b| (1..=8).contains(&b.isbn)));
    }
}

#[test]
fn test_editor_picks_unflag_removes_from_pool() {
    let catalog = store_with_default_book();
    catalog
        .update_editor_picks(&[EditorPick::new(TEST_ISBN, true)])
        .unwrap();
    catalog
        .update_editor_picks(&[EditorPick::new(TEST_ISBN, false)])
        .unwrap();
    assert!(catalog.get_editor_picks(5).unwrap().is_empty());
}

#[test]
fn test_update_editor_picks_requires_existing_isbn() {
    let catalog = store_with_default_book();
    let err = catalog
        .update_editor_picks(&[
            EditorPick::new(TEST_ISBN, true),
            EditorPick::new(100_000, true),
        ])
        .unwrap_err();
    assert_eq!(err, CatalogError::IsbnNotFound(100_000));
    assert!(catalog.get_editor_picks(5).unwrap().is_empty());
}

// ============================================================================
// Queries and removal
// ============================================================================

#[test]
fn test_get_books_by_isbn_validation() {
    let catalog = store_with_default_book();
    assert_eq!(
        catalog
            .get_books_by_isbn(&[TEST_ISBN, -1])
            .unwrap_err(),
        CatalogError::InvalidIsbn(-1)
    );
    assert_eq!(
        catalog
            .get_books_by_isbn(&[TEST_ISBN, 100_000])
            .unwrap_err(),
        CatalogError::IsbnNotFound(100_000)
    );
}

#[test]
fn test_browse_books_returns_storefront_view_in_input_order() {
    let catalog = store_with_default_book();
    add_book(&catalog, 555, 5);

    let books = catalog.browse_books(&[555, TEST_ISBN]).unwrap();
    assert_eq!(books[0].isbn, 555);
    assert_eq!(books[1].isbn, TEST_ISBN);
    assert_eq!(books[1].title, "Harry Potter and JUnit");
}

#[test]
fn test_remove_books_removes_only_named_titles() {
    let catalog = store_with_default_book();
    add_book(&catalog, 555, 5);
    add_book(&catalog, 777, 5);

    catalog.remove_books(&[555]).unwrap();

    let remaining: HashSet<Isbn> = catalog
        .get_books()
        .unwrap()
        .iter()
        .map(|b| b.isbn)
        .collect();
    assert_eq!(remaining, HashSet::from([TEST_ISBN, 777]));
}

#[test]
fn test_remove_books_is_all_or_nothing() {
    let catalog = store_with_default_book();
    add_book(&catalog, 555, 5);
    let before = state_of(&catalog);

    assert_eq!(
        catalog.remove_books(&[555, 100_000]).unwrap_err(),
        CatalogError::IsbnNotFound(100_000)
    );
    assert_eq!(
        catalog.remove_books(&[555, -1]).unwrap_err(),
        CatalogError::InvalidIsbn(-1)
    );
    assert_eq!(state_of(&catalog), before);
}

#[test]
fn test_remove_all_books_empties_the_catalog() {
    let catalog = store_with_default_book();
    add_book(&catalog, 555, 5);
    add_book(&catalog, 777, 5);
    assert_eq!(catalog.get_books().unwrap().len(), 3);

    catalog.remove_all_books().unwrap();
    assert!(catalog.get_books().unwrap().is_empty());

    // The store stays usable after structural churn.
    add_book(&catalog, 555, 5);
    assert_eq!(catalog.get_books().unwrap().len(), 1);
}
