//! Per-page listing state.
//!
//! A [`ListingView`] owns everything one listing page needs: the loaded
//! records, the filter and sort selections, and the page cursor. Every read
//! re-runs filter → sort → paginate over the full dataset; datasets are tens
//! of records, so nothing is cached between calls.
//!
//! Rules enforced here:
//!
//! - Changing the filter or the sort key resets to page 1.
//! - Replacing the dataset resets to page 1.
//! - Changing the page clamps it to the filtered range and reports
//!   [`PageChange::ScrollToTop`] when the page actually moves.

use serde::Serialize;
use vitrine_core::{Error, Result};

use crate::config::ListingConfig;
use crate::filter::{CategoryFilter, FilterState};
use crate::paginate::{total_pages, Page, PageChange, PageState};
use crate::record::Listable;
use crate::sort::{sort, SortRegistry};

/// State owner for one listing page.
#[derive(Debug, Clone)]
pub struct ListingView<R> {
    records: Vec<R>,
    filter: FilterState,
    sort_key: String,
    registry: SortRegistry<R>,
    page: PageState,
}

/// What a page renders for the current state.
#[derive(Debug, Clone, Serialize)]
pub struct ListingSnapshot<R> {
    /// The visible page.
    pub page: Page<R>,
    /// Active filter.
    pub filter: FilterState,
    /// Active sort key.
    pub sort_key: String,
    /// Size of the unfiltered dataset.
    pub dataset_size: usize,
}

impl<R> ListingSnapshot<R> {
    /// The filter removed everything (the "no results" state).
    pub fn is_empty_result(&self) -> bool {
        self.page.total_items == 0
    }

    /// One-line summary, e.g. `Showing 7–12 of 14`.
    pub fn summary(&self) -> String {
        match self.page.item_range() {
            Some((first, last)) => format!(
                "Showing {first}–{last} of {} (page {}/{})",
                self.page.total_items, self.page.page, self.page.total_pages
            ),
            None => "No results".to_string(),
        }
    }
}

impl<R: Listable + Clone + 'static> ListingView<R> {
    /// Mount a view over `records`.
    ///
    /// If the configured default sort is not registered, the first
    /// registered key is used instead.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an invalid config or an empty
    /// registry.
    pub fn new(records: Vec<R>, registry: SortRegistry<R>, config: &ListingConfig) -> Result<Self> {
        config.validate()?;
        let sort_key = if registry.contains(&config.default_sort) {
            config.default_sort.clone()
        } else {
            let fallback = registry
                .keys()
                .first()
                .map(|k| k.to_string())
                .ok_or_else(|| Error::config("sort registry is empty"))?;
            log::warn!(
                "Default sort '{}' not registered, using '{fallback}'",
                config.default_sort
            );
            fallback
        };

        Ok(Self {
            records,
            filter: FilterState::default(),
            sort_key,
            registry,
            page: PageState::new(config.page_size)?,
        })
    }

    /// The full, unfiltered dataset.
    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Current filter.
    pub fn filter_state(&self) -> &FilterState {
        &self.filter
    }

    /// Current sort key.
    pub fn sort_key(&self) -> &str {
        &self.sort_key
    }

    /// Registered sort options.
    pub fn registry(&self) -> &SortRegistry<R> {
        &self.registry
    }

    /// Current page number.
    pub fn current_page(&self) -> usize {
        self.page.current()
    }

    /// Replace the whole dataset (a fresh fetch).
    pub fn replace_records(&mut self, records: Vec<R>) {
        self.records = records;
        self.page.reset();
    }

    /// Set the free-text query.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filter.query = query.into();
        self.page.reset();
    }

    /// Set the category selection.
    pub fn set_category(&mut self, category: CategoryFilter) {
        self.filter.category = category;
        self.page.reset();
    }

    /// Replace the whole filter state.
    pub fn set_filter(&mut self, filter: FilterState) {
        self.filter = filter;
        self.page.reset();
    }

    /// Select a sort key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unregistered key; state is unchanged.
    pub fn set_sort(&mut self, key: &str) -> Result<()> {
        if !self.registry.contains(key) {
            return Err(Error::not_found("sort key", key));
        }
        self.sort_key = key.to_string();
        self.page.reset();
        Ok(())
    }

    /// Go to a page, clamped to the filtered range.
    pub fn set_page(&mut self, page: usize) -> PageChange {
        let last = total_pages(self.filtered_len(), self.page.size());
        self.page.set_page(page.clamp(1, last))
    }

    /// Next page, if there is one.
    pub fn next_page(&mut self) -> PageChange {
        self.set_page(self.page.current() + 1)
    }

    /// Previous page, if there is one.
    pub fn previous_page(&mut self) -> PageChange {
        self.set_page(self.page.current().saturating_sub(1))
    }

    /// Filtered and sorted records (all pages).
    pub fn visible(&self) -> Vec<R> {
        let filtered: Vec<R> = self
            .records
            .iter()
            .filter(|record| self.filter.matches(*record))
            .cloned()
            .collect();
        match self.registry.get(&self.sort_key) {
            Some(comparator) => sort(&filtered, comparator.as_ref()),
            None => filtered,
        }
    }

    fn filtered_len(&self) -> usize {
        self.records
            .iter()
            .filter(|record| self.filter.matches(*record))
            .count()
    }

    /// Render the current state.
    pub fn snapshot(&self) -> ListingSnapshot<R> {
        ListingSnapshot {
            page: self.page.apply(&self.visible()),
            filter: self.filter.clone(),
            sort_key: self.sort_key.clone(),
            dataset_size: self.records.len(),
        }
    }

    /// Find a record by id in the full dataset.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no record has this id.
    pub fn find(&self, id: &str) -> Result<&R> {
        self.records
            .iter()
            .find(|record| record.id() == id)
            .ok_or_else(|| Error::not_found("record", id))
    }
}
