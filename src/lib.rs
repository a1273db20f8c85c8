//! shelfdb: a concurrent in-memory inventory store for a multi-seller
//! bookstore
//!
//! Many storefront clients buy stock while back-office clients add,
//! restock, and curate titles, all against one shared catalog. Membership
//! of the catalog is guarded by a coarse reader/writer lock; each record's
//! fields are guarded by that record's own lock; multi-record operations
//! take their record locks in ascending identifier order, which is the
//! system's entire deadlock-freedom argument.
//!
//! The contract layer (types, errors, validation, capability traits, wire
//! batches) lives in `shelf-core`; the locking catalog lives in
//! `shelf-catalog`; this crate re-exports both as the public surface.
//!
//! ```
//! use shelfdb::{Catalog, BookCopy, StockBook};
//!
//! let catalog = Catalog::new();
//! catalog
//!     .add_books(&[StockBook::new(42, "Systems", "A. Author", 30.0, 5)])
//!     .unwrap();
//! catalog.buy_books(&[BookCopy::new(42, 2)]).unwrap();
//! assert_eq!(catalog.get_books_by_isbn(&[42]).unwrap()[0].num_copies, 3);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub use shelf_catalog::{Catalog, CatalogConfig};
pub use shelf_core::{
    BatchRequest, Book, BookCopy, BookRating, CatalogError, EditorPick, Isbn, Result, StockBook,
    StockManager, Storefront,
};

/// Test-data generation helpers, re-exported for benches and embedders'
/// test suites.
pub mod testing {
    pub use shelf_catalog::testing::BookSetGenerator;
}
