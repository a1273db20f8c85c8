//! Lock-ordering protocol for multi-record operations
//!
//! Whenever an operation must hold write locks on several records at once,
//! it acquires them in ascending identifier order, strictly after the
//! catalog's coarse lock. Release order is unconstrained. Because every
//! multi-record path routes through [`sorted_write_locks`], no two
//! operations can form a cycle of waits; this total order is the system's
//! only deadlock-avoidance mechanism; there are no timeouts and no retry.
//!
//! Preconditions, both established by the caller under the same coarse
//! guard it still holds:
//! - every identifier is present in the map
//! - no identifier repeats (the per-record locks are not reentrant)

use parking_lot::{RwLock, RwLockWriteGuard};
use rustc_hash::FxHashMap;
use shelf_core::error::{CatalogError, Result};
use shelf_core::types::Isbn;

use crate::record::StockRecord;

/// The catalog's map interior: one locked record per title
pub(crate) type Shelves = FxHashMap<Isbn, RwLock<StockRecord>>;

/// Acquire write locks on the given records in ascending identifier order
///
/// Returns the guards ordered by ascending identifier, so callers that sort
/// their batch entries the same way can zip entries with guards. Guards
/// already acquired are released on the error path by drop.
///
/// # Errors
///
/// Returns [`CatalogError::IsbnNotFound`] if an identifier is absent; the
/// caller's existence check should have ruled this out.
pub(crate) fn sorted_write_locks<'a>(
    shelves: &'a Shelves,
    isbns: impl IntoIterator<Item = Isbn>,
) -> Result<Vec<RwLockWriteGuard<'a, StockRecord>>> {
    let mut ordered: Vec<Isbn> = isbns.into_iter().collect();
    ordered.sort_unstable();

    let mut guards = Vec::with_capacity(ordered.len());
    for isbn in ordered {
        let record = shelves.get(&isbn).ok_or(CatalogError::IsbnNotFound(isbn))?;
        guards.push(record.write());
    }
    Ok(guards)
}
