//! Shared contract layer for shelfdb
//!
//! This crate defines everything both capability surfaces agree on:
//! - types: Book / StockBook snapshots and batch entry types
//! - error: the failure taxonomy, one error per failed batch
//! - validate: lock-free batch precondition checks
//! - traits: the StockManager and Storefront surfaces
//! - request: the tagged wire batch and its decode seam
//!
//! No locking lives here; the concurrent catalog is `shelf-catalog`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod request;
pub mod traits;
pub mod types;
pub mod validate;

pub use error::{CatalogError, Result};
pub use request::BatchRequest;
pub use traits::{StockManager, Storefront};
pub use types::{Book, BookCopy, BookRating, EditorPick, Isbn, StockBook};
