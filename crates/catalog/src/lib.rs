//! Concurrent in-memory catalog for shelfdb
//!
//! This crate implements the inventory store behind both capability
//! surfaces:
//! - catalog: the two-level-locked title map and every operation on it
//! - locking: sorted-identifier lock acquisition, the deadlock-avoidance
//!   discipline every multi-record operation routes through
//! - record: mutable per-title state, only ever exposed as owned snapshots
//! - rank / sample: the top-rated ordering and editor-pick sampling
//! - testing: throwaway data generation for tests and benches

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod catalog;
pub mod config;
mod locking;
pub mod rank;
pub mod record;
pub mod sample;
pub mod testing;

pub use catalog::Catalog;
pub use config::CatalogConfig;
