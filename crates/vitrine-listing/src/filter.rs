//! Filter predicates.
//!
//! A record is shown when every active predicate accepts it. The two
//! built-in predicates come from [`FilterState`]:
//!
//! - **query**: the case-insensitive query is a substring of the record's
//!   name, description, or any tag. An empty query matches everything.
//! - **category**: [`CategoryFilter::All`] matches everything,
//!   [`CategoryFilter::Exact`] compares against the record's category, and
//!   [`CategoryFilter::Tag`] looks for a case-insensitive substring of any tag.
//!
//! Pages with extra controls add their own named predicates to a
//! [`PredicateSet`].

use std::collections::BTreeSet;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::record::Listable;

// ============================================================================
// FilterState
// ============================================================================

/// Category selection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CategoryFilter {
    /// No category restriction.
    #[default]
    All,
    /// Record category must equal this value.
    Exact(String),
    /// Some tag must contain this fragment (case-insensitive).
    Tag(String),
}

impl CategoryFilter {
    /// Returns `true` if this filter restricts anything.
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::All)
    }
}

/// Parses `all` (or an empty string), `tag:<fragment>`, or an exact category.
impl FromStr for CategoryFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        match s.strip_prefix("tag:") {
            Some(fragment) => Ok(Self::Tag(fragment.trim().to_string())),
            None => Ok(Self::Exact(s.to_string())),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Exact(category) => write!(f, "{category}"),
            Self::Tag(fragment) => write!(f, "tag:{fragment}"),
        }
    }
}

/// User-controlled filter inputs for one listing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterState {
    /// Free-text query.
    #[serde(default)]
    pub query: String,

    /// Category or tag selection.
    #[serde(default)]
    pub category: CategoryFilter,
}

impl FilterState {
    /// Create an empty filter state (matches everything).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the free-text query.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Set the category selection.
    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    /// Returns `true` if any predicate is active.
    pub fn is_active(&self) -> bool {
        !self.query.trim().is_empty() || self.category.is_active()
    }

    /// Check a single record against both predicates.
    pub fn matches<R: Listable + ?Sized>(&self, record: &R) -> bool {
        matches_query(record, &self.query) && matches_category(record, &self.category)
    }
}

// ============================================================================
// Predicates
// ============================================================================

/// Free-text predicate: name, description, or any tag contains the query.
/// A blank query matches everything; any other query is used as typed.
pub fn matches_query<R: Listable + ?Sized>(record: &R, query: &str) -> bool {
    if query.trim().is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    record.name().to_lowercase().contains(&needle)
        || record.description().to_lowercase().contains(&needle)
        || record
            .tags()
            .iter()
            .any(|tag| tag.to_lowercase().contains(&needle))
}

/// Category predicate.
pub fn matches_category<R: Listable + ?Sized>(record: &R, category: &CategoryFilter) -> bool {
    match category {
        CategoryFilter::All => true,
        CategoryFilter::Exact(wanted) => record.category() == Some(wanted.as_str()),
        CategoryFilter::Tag(fragment) => {
            let fragment = fragment.to_lowercase();
            record
                .tags()
                .iter()
                .any(|tag| tag.to_lowercase().contains(&fragment))
        }
    }
}

/// Apply a filter state, preserving input order.
///
/// Empty input yields empty output.
pub fn filter<R: Listable + Clone>(records: &[R], state: &FilterState) -> Vec<R> {
    records
        .iter()
        .filter(|record| state.matches(*record))
        .cloned()
        .collect()
}

/// Distinct categories present in a dataset, sorted, for filter menus.
pub fn categories<R: Listable>(records: &[R]) -> Vec<String> {
    records
        .iter()
        .filter_map(|record| record.category())
        .map(String::from)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

// ============================================================================
// PredicateSet
// ============================================================================

type PredicateFn<R> = Box<dyn Fn(&R) -> bool + Send + Sync>;

/// A named collection of predicates combined with logical AND.
pub struct PredicateSet<R> {
    predicates: Vec<(String, PredicateFn<R>)>,
}

impl<R: Listable + 'static> PredicateSet<R> {
    /// Create an empty set (matches everything).
    pub fn new() -> Self {
        Self {
            predicates: Vec::new(),
        }
    }

    /// Build the active predicates of a filter state.
    ///
    /// Inactive inputs (empty query, `All`) contribute no predicate.
    pub fn from_state(state: &FilterState) -> Self {
        let mut set = Self::new();
        if !state.query.trim().is_empty() {
            let query = state.query.clone();
            set = set.with("query", move |record: &R| matches_query(record, &query));
        }
        if state.category.is_active() {
            let category = state.category.clone();
            set = set.with("category", move |record: &R| {
                matches_category(record, &category)
            });
        }
        set
    }

    /// Add a named predicate.
    pub fn with<F>(mut self, name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&R) -> bool + Send + Sync + 'static,
    {
        self.predicates.push((name.into(), Box::new(predicate)));
        self
    }

    /// Names of the active predicates, in insertion order.
    pub fn names(&self) -> Vec<&str> {
        self.predicates.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Number of active predicates.
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    /// Returns `true` if no predicate is active.
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Returns `true` if every predicate accepts the record.
    pub fn matches(&self, record: &R) -> bool {
        self.predicates.iter().all(|(_, test)| test(record))
    }

    /// Filter records, preserving order.
    pub fn apply(&self, records: &[R]) -> Vec<R>
    where
        R: Clone,
    {
        records
            .iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect()
    }
}

impl<R: Listable + 'static> Default for PredicateSet<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> fmt::Debug for PredicateSet<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.predicates.iter().map(|(n, _)| n.as_str()).collect();
        f.debug_struct("PredicateSet").field("predicates", &names).finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::record::Record;

    fn zkvms() -> Vec<Record> {
        vec![
            Record::new("sp1", "SP1")
                .with_description("Performant RISC-V zkVM")
                .with_tags(["RISC-V", "STARK"])
                .with_category("general-purpose"),
            Record::new("cairo", "Cairo")
                .with_description("Provable programs for StarkNet")
                .with_tags(["custom-isa", "stark"])
                .with_category("domain-specific"),
            Record::new("jolt", "Jolt")
                .with_description("Lookup-based zkVM")
                .with_tags(["risc-v", "lasso"])
                .with_category("general-purpose"),
        ]
    }

    fn ids(records: &[Record]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    // ------------------------------------------------------------------------
    // CategoryFilter parsing
    // ------------------------------------------------------------------------

    #[test]
    fn test_category_filter_parse() {
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!("ALL".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!("".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "tag:stark".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Tag("stark".to_string())
        );
        assert_eq!(
            "domain-specific".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Exact("domain-specific".to_string())
        );
    }

    #[test]
    fn test_category_filter_display_roundtrip() {
        for text in ["all", "tag:risc", "general-purpose"] {
            let parsed: CategoryFilter = text.parse().unwrap();
            assert_eq!(parsed.to_string(), text);
        }
    }

    // ------------------------------------------------------------------------
    // Query predicate
    // ------------------------------------------------------------------------

    #[test]
    fn test_empty_query_matches_all() {
        let records = zkvms();
        assert_eq!(filter(&records, &FilterState::new()).len(), 3);
        let blank = FilterState::new().with_query("   ");
        assert_eq!(filter(&records, &blank).len(), 3);
    }

    #[test]
    fn test_query_matches_name_case_insensitive() {
        let state = FilterState::new().with_query("cAIRo");
        assert_eq!(ids(&filter(&zkvms(), &state)), vec!["cairo"]);
    }

    #[test]
    fn test_query_matches_description() {
        let state = FilterState::new().with_query("lookup");
        assert_eq!(ids(&filter(&zkvms(), &state)), vec!["jolt"]);
    }

    #[test]
    fn test_query_matching_only_tag_keeps_record() {
        let state = FilterState::new().with_query("LASSO");
        assert_eq!(ids(&filter(&zkvms(), &state)), vec!["jolt"]);
    }

    #[test]
    fn test_query_surrounding_spaces_are_significant() {
        let records = vec![
            Record::new("zksync", "zkSync Era"),
            Record::new("polygon", "Polygon zkEVM"),
        ];
        let state = FilterState::new().with_query(" zk");
        assert_eq!(ids(&filter(&records, &state)), vec!["polygon"]);
        let state = FilterState::new().with_query("zk");
        assert_eq!(filter(&records, &state).len(), 2);
    }

    #[test]
    fn test_query_no_match_is_empty_not_error() {
        let state = FilterState::new().with_query("plonky");
        assert!(filter(&zkvms(), &state).is_empty());
    }

    // ------------------------------------------------------------------------
    // Category predicate
    // ------------------------------------------------------------------------

    #[test]
    fn test_exact_category() {
        let state =
            FilterState::new().with_category(CategoryFilter::Exact("general-purpose".into()));
        assert_eq!(ids(&filter(&zkvms(), &state)), vec!["sp1", "jolt"]);
    }

    #[test]
    fn test_tag_category_substring_case_insensitive() {
        let state = FilterState::new().with_category(CategoryFilter::Tag("risc".into()));
        assert_eq!(ids(&filter(&zkvms(), &state)), vec!["sp1", "jolt"]);
    }

    #[test]
    fn test_query_and_category_are_anded() {
        let state = FilterState::new()
            .with_query("stark")
            .with_category(CategoryFilter::Exact("general-purpose".into()));
        assert_eq!(ids(&filter(&zkvms(), &state)), vec!["sp1"]);
    }

    #[test]
    fn test_empty_dataset() {
        let state = FilterState::new().with_query("anything");
        assert!(filter::<Record>(&[], &state).is_empty());
    }

    #[test]
    fn test_categories_distinct_sorted() {
        assert_eq!(
            categories(&zkvms()),
            vec!["domain-specific".to_string(), "general-purpose".to_string()]
        );
    }

    // ------------------------------------------------------------------------
    // PredicateSet
    // ------------------------------------------------------------------------

    #[test]
    fn test_predicate_set_from_inactive_state_is_empty() {
        let set = PredicateSet::<Record>::from_state(&FilterState::new());
        assert!(set.is_empty());
        assert_eq!(set.apply(&zkvms()).len(), 3);
    }

    #[test]
    fn test_predicate_set_names() {
        let state = FilterState::new()
            .with_query("v")
            .with_category(CategoryFilter::Tag("stark".into()));
        let set = PredicateSet::<Record>::from_state(&state);
        assert_eq!(set.names(), vec!["query", "category"]);
    }

    #[test]
    fn test_predicate_set_agrees_with_filter() {
        let state = FilterState::new()
            .with_query("zkvm")
            .with_category(CategoryFilter::Exact("general-purpose".into()));
        let records = zkvms();
        assert_eq!(
            PredicateSet::from_state(&state).apply(&records),
            filter(&records, &state)
        );
    }

    #[test]
    fn test_predicate_set_custom_predicate() {
        let set = PredicateSet::<Record>::new().with("has-two-tags", |r| r.tags.len() == 2);
        assert_eq!(set.len(), 1);
        assert_eq!(set.apply(&zkvms()).len(), 3);

        let set = set.with("not-cairo", |r| r.id != "cairo");
        assert_eq!(ids(&set.apply(&zkvms())), vec!["sp1", "jolt"]);
    }

    #[test]
    fn test_filter_state_serialization() {
        let state = FilterState::new()
            .with_query("risc")
            .with_category(CategoryFilter::Tag("stark".into()));
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"kind\":\"tag\""));
        let back: FilterState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
