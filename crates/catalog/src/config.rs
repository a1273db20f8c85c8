//! Catalog configuration
//!
//! A plain serde-derived struct with defaults; embedding processes that
//! read their settings from a file can deserialize one of these directly.

use serde::{Deserialize, Serialize};

/// Configuration for an in-memory catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Pre-allocated capacity of the catalog map.
    #[serde(default)]
    pub initial_capacity: usize,
    /// Seed for the editor-pick sampler. `None` seeds from the OS; tests
    /// pin this for reproducible sampling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_seed: Option<u64>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 0,
            sample_seed: None,
        }
    }
}
