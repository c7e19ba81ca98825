//! Listing configuration.

use serde::{Deserialize, Serialize};
use vitrine_core::{Error, Result};

/// Listing configuration.
///
/// Pages provide this to configure their initial state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Items per page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Sort key selected when a page mounts.
    #[serde(default = "default_sort")]
    pub default_sort: String,
}

fn default_page_size() -> usize {
    6
}

fn default_sort() -> String {
    "name".to_string()
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            default_sort: default_sort(),
        }
    }
}

impl ListingConfig {
    /// Check values that serde cannot.
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(Error::config("listing.page_size must be at least 1"));
        }
        if self.default_sort.trim().is_empty() {
            return Err(Error::config("listing.default_sort must not be empty"));
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
