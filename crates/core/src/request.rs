//! Wire batch requests
//!
//! The transport in front of the store ships one tagged batch per call.
//! [`BatchRequest`] is that message, and [`BatchRequest::from_json`] is the
//! decode seam: a payload that names an operation but omits its entry
//! collection fails with [`CatalogError::NullInput`], which the typed trait
//! surfaces cannot express on their own.

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};
use crate::types::{BookCopy, BookRating, EditorPick, Isbn, StockBook};

/// One complete batch, as delivered by the transport
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum BatchRequest {
    /// Add new titles with initial stock
    AddBooks {
        /// New listings
        books: Vec<StockBook>,
    },
    /// Restock existing titles
    AddCopies {
        /// Restock deltas
        copies: Vec<BookCopy>,
    },
    /// Purchase copies of existing titles
    BuyBooks {
        /// Requested quantities
        copies: Vec<BookCopy>,
    },
    /// Rate existing titles
    RateBooks {
        /// Ratings
        ratings: Vec<BookRating>,
    },
    /// Set or clear editor-pick flags
    UpdateEditorPicks {
        /// Flag updates
        picks: Vec<EditorPick>,
    },
    /// Remove titles from the catalog
    RemoveBooks {
        /// Identifiers to remove
        isbns: Vec<Isbn>,
    },
    /// Remove every title from the catalog
    RemoveAllBooks,
}

/// Loosely-typed mirror of the wire payload, used to distinguish a missing
/// collection (NullInput) from a malformed one (decode error).
#[derive(Deserialize)]
struct RawRequest {
    op: Option<String>,
    books: Option<Vec<StockBook>>,
    copies: Option<Vec<BookCopy>>,
    ratings: Option<Vec<BookRating>>,
    picks: Option<Vec<EditorPick>>,
    isbns: Option<Vec<Isbn>>,
}

impl BatchRequest {
    /// Decode a request from its JSON wire form
    ///
    /// # Errors
    ///
    /// - [`CatalogError::InvalidField`] if the payload is not valid JSON,
    ///   has no `op`, or names an unknown operation.
    /// - [`CatalogError::NullInput`] if the operation's entry collection is
    ///   missing from the payload.
    pub fn from_json(payload: &str) -> Result<Self> {
        let raw: RawRequest = serde_json::from_str(payload)
            .map_err(|e| CatalogError::invalid_field("request", e.to_string()))?;

        let op = raw
            .op
            .ok_or_else(|| CatalogError::invalid_field("op", "missing operation tag"))?;

        match op.as_str() {
            "add_books" => raw
                .books
                .map(|books| BatchRequest::AddBooks { books })
                .ok_or(CatalogError::NullInput),
            "add_copies" => raw
                .copies
                .map(|copies| BatchRequest::AddCopies { copies })
                .ok_or(CatalogError::NullInput),
            "buy_books" => raw
                .copies
                .map(|copies| BatchRequest::BuyBooks { copies })
                .ok_or(CatalogError::NullInput),
            "rate_books" => raw
                .ratings
                .map(|ratings| BatchRequest::RateBooks { ratings })
                .ok_or(CatalogError::NullInput),
            "update_editor_picks" => raw
                .picks
                .map(|picks| BatchRequest::UpdateEditorPicks { picks })
                .ok_or(CatalogError::NullInput),
            "remove_books" => raw
                .isbns
                .map(|isbns| BatchRequest::RemoveBooks { isbns })
                .ok_or(CatalogError::NullInput),
            "remove_all_books" => Ok(BatchRequest::RemoveAllBooks),
            other => Err(CatalogError::invalid_field(
                "op",
                format!("unknown operation '{}'", other),
            )),
        }
    }

    /// Encode this request to its JSON wire form
    pub fn to_json(&self) -> String {
        // Serialization of these derived types cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}
