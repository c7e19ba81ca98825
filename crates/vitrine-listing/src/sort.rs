//! Sort comparators and the comparator registry.
//!
//! Every comparator is a total order: after its primary key it falls back to
//! the display name and finally the id, so equal-looking records always come
//! out in the same order.
//!
//! The [`SortRegistry`] holds the comparators a page offers, keyed by the
//! name the user selects, in registration order so menus render stably.
//!
//! # Example
//!
//! ```rust
//! use vitrine_listing::record::Record;
//! use vitrine_listing::sort::{by_count, SortRegistry};
//!
//! let registry = SortRegistry::<Record>::standard()
//!     .register("features", "Most features", by_count("features"));
//!
//! assert_eq!(registry.keys(), vec!["name", "tags", "features"]);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use vitrine_core::{Error, Result};

use crate::record::Listable;

/// A shareable comparator.
pub type Comparator<R> = Arc<dyn Fn(&R, &R) -> Ordering + Send + Sync>;

// ============================================================================
// Comparators
// ============================================================================

/// Compare display strings: case-folded first, then the raw text.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Tie-breaker shared by all comparators: name, then id.
fn tie_break<R: Listable>(a: &R, b: &R) -> Ordering {
    compare_text(a.name(), b.name()).then_with(|| a.id().cmp(b.id()))
}

/// Alphabetical by name.
pub fn by_name<R: Listable + 'static>() -> Comparator<R> {
    Arc::new(|a: &R, b: &R| tie_break(a, b))
}

/// Descending by a numeric metric; records without the metric go last.
pub fn by_count<R: Listable + 'static>(metric: impl Into<String>) -> Comparator<R> {
    let metric = metric.into();
    Arc::new(move |a: &R, b: &R| {
        let primary = match (a.metric(&metric), b.metric(&metric)) {
            (Some(x), Some(y)) => y.total_cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        primary.then_with(|| tie_break(a, b))
    })
}

/// Descending by number of tags.
pub fn by_tag_count<R: Listable + 'static>() -> Comparator<R> {
    Arc::new(|a: &R, b: &R| {
        b.tags()
            .len()
            .cmp(&a.tags().len())
            .then_with(|| tie_break(a, b))
    })
}

/// Ascending by position of a string attribute in an explicit rank table.
///
/// Matching is case-insensitive. Values missing from the table (and records
/// without the attribute) go last.
///
/// ```rust
/// use vitrine_listing::record::Record;
/// use vitrine_listing::sort::{by_rank, sort};
///
/// let records = vec![
///     Record::new("a", "A").with_field("complexity", "high"),
///     Record::new("b", "B").with_field("complexity", "low"),
///     Record::new("c", "C").with_field("complexity", "medium"),
/// ];
/// let cmp = by_rank("complexity", &["low", "medium", "high"]);
/// let sorted = sort(&records, cmp.as_ref());
/// let ids: Vec<_> = sorted.iter().map(|r| r.id.as_str()).collect();
/// assert_eq!(ids, vec!["b", "c", "a"]);
/// ```
pub fn by_rank<R: Listable + 'static>(attribute: impl Into<String>, ranks: &[&str]) -> Comparator<R> {
    let attribute = attribute.into();
    let ranks: Vec<String> = ranks.iter().map(|r| r.to_lowercase()).collect();
    Arc::new(move |a: &R, b: &R| {
        let rank_of = |record: &R| {
            record
                .attribute(&attribute)
                .and_then(|value| {
                    let value = value.to_lowercase();
                    ranks.iter().position(|r| *r == value)
                })
                .unwrap_or(usize::MAX)
        };
        rank_of(a).cmp(&rank_of(b)).then_with(|| tie_break(a, b))
    })
}

/// Return a sorted copy; the input is left untouched.
pub fn sort<R: Clone>(records: &[R], comparator: &(dyn Fn(&R, &R) -> Ordering + Send + Sync)) -> Vec<R> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| comparator(a, b));
    sorted
}

// ============================================================================
// SortState
// ============================================================================

/// The user's selected sort key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    /// Registry key of the selected comparator.
    pub key: String,
}

impl SortState {
    /// Select a key.
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl Default for SortState {
    fn default() -> Self {
        Self::new("name")
    }
}

// ============================================================================
// SortRegistry
// ============================================================================

struct SortEntry<R> {
    key: String,
    label: String,
    comparator: Comparator<R>,
}

/// Named comparators offered by a listing.
pub struct SortRegistry<R> {
    entries: Vec<SortEntry<R>>,
}

impl<R: Listable + 'static> SortRegistry<R> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Registry with `name` (alphabetical) and `tags` (most tags first).
    pub fn standard() -> Self {
        Self::new()
            .register("name", "Name", by_name())
            .register("tags", "Most tags", by_tag_count())
    }

    /// Add a comparator. Registering an existing key replaces it in place.
    pub fn register(
        mut self,
        key: impl Into<String>,
        label: impl Into<String>,
        comparator: Comparator<R>,
    ) -> Self {
        let key = key.into();
        let label = label.into();
        match self.entries.iter_mut().find(|e| e.key == key) {
            Some(entry) => {
                log::debug!("Replacing sort comparator '{key}'");
                entry.label = label;
                entry.comparator = comparator;
            }
            None => self.entries.push(SortEntry {
                key,
                label,
                comparator,
            }),
        }
        self
    }

    /// Look up a comparator by key.
    pub fn get(&self, key: &str) -> Option<&Comparator<R>> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| &e.comparator)
    }

    /// Check if a key is registered.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Registered keys, in registration order.
    pub fn keys(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.key.as_str()).collect()
    }

    /// `(key, label)` pairs for menus.
    pub fn options(&self) -> Vec<(&str, &str)> {
        self.entries
            .iter()
            .map(|e| (e.key.as_str(), e.label.as_str()))
            .collect()
    }

    /// Number of registered comparators.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sort a copy of `records` with the named comparator.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the key is not registered.
    pub fn sort(&self, records: &[R], key: &str) -> Result<Vec<R>>
    where
        R: Clone,
    {
        let comparator = self
            .get(key)
            .ok_or_else(|| Error::not_found("sort key", key))?;
        Ok(sort(records, comparator.as_ref()))
    }
}

impl<R: Listable + 'static> Default for SortRegistry<R> {
    fn default() -> Self {
        Self::standard()
    }
}

impl<R> Clone for SortRegistry<R> {
    fn clone(&self) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .map(|e| SortEntry {
                    key: e.key.clone(),
                    label: e.label.clone(),
                    comparator: Arc::clone(&e.comparator),
                })
                .collect(),
        }
    }
}

impl<R> fmt::Debug for SortRegistry<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<&str> = self.entries.iter().map(|e| e.key.as_str()).collect();
        f.debug_struct("SortRegistry").field("keys", &keys).finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
