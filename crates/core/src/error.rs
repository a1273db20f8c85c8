//! Error types for the shelfdb catalog
//!
//! One enum covers the whole failure taxonomy of both capability surfaces.
//! We use `thiserror` for automatic `Display` and `Error` trait
//! implementations.
//!
//! A batch either succeeds as a unit or fails with a single error; there is
//! no per-entry partial reporting. No failure is fatal to the store.

use crate::types::Isbn;
use thiserror::Error;

/// Result type alias for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Error taxonomy for catalog operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// A request arrived without its required entry collection
    #[error("request is missing its entry collection")]
    NullInput,

    /// Identifier is non-positive or otherwise malformed
    #[error("isbn {0} is invalid")]
    InvalidIsbn(Isbn),

    /// A field of a batch entry is out of its valid domain
    #[error("invalid {field}: {reason}")]
    InvalidField {
        /// Name of the offending field
        field: &'static str,
        /// What was wrong with it
        reason: String,
    },

    /// Identifier already present on add, or repeated within one batch
    #[error("isbn {0} is duplicated")]
    DuplicateIsbn(Isbn),

    /// Identifier absent where existence is required
    #[error("isbn {0} is not in the catalog")]
    IsbnNotFound(Isbn),

    /// A purchase could not be satisfied by the stock on hand
    ///
    /// The failed batch still committed its sale-miss counters; see the
    /// buy operation's contract.
    #[error("purchase unavailable: {misses} title(s) short on stock")]
    InsufficientStock {
        /// How many titles in the batch were short
        misses: usize,
    },
}

impl CatalogError {
    /// Convenience constructor for [`CatalogError::InvalidField`]
    pub fn invalid_field(field: &'static str, reason: impl Into<String>) -> Self {
        CatalogError::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}
