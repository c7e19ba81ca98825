//! Listing engine for Vitrine.
//!
//! Everything a listing page does between "the dataset is loaded" and "these
//! cards are on screen": filter, sort, paginate. All operations are pure and
//! synchronous, and re-run in full whenever a control changes.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                   vitrine-listing                    │
//! ├──────────────────────────────────────────────────────┤
//! │  Listable / Record        (what can be listed)       │
//! │  FilterState, PredicateSet (AND of predicates)       │
//! │  SortRegistry, comparators (total orders)            │
//! │  paginate, PageState       (1-indexed pages)         │
//! ├──────────────────────────────────────────────────────┤
//! │  ListingView              (state owner per page)     │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use vitrine_listing::{ListingConfig, ListingView, Record, SortRegistry};
//!
//! let records: Vec<Record> = (1..=7)
//!     .map(|i| Record::new(format!("vm-{i}"), format!("VM {i}")))
//!     .collect();
//!
//! let mut view = ListingView::new(records, SortRegistry::standard(), &ListingConfig::default())?;
//! view.set_page(2);
//! assert_eq!(view.snapshot().page.items.len(), 1);
//!
//! view.set_query("vm");
//! assert_eq!(view.current_page(), 1);
//! # Ok::<(), vitrine_core::Error>(())
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub mod filter;
pub mod paginate;
pub mod record;
pub mod sort;
pub mod view;

mod proptests;

// Re-exports
pub use config::ListingConfig;
pub use filter::{filter, CategoryFilter, FilterState, PredicateSet};
pub use paginate::{paginate, Page, PageChange, PageState};
pub use record::{Listable, Record};
pub use sort::{Comparator, SortRegistry, SortState};
pub use view::{ListingSnapshot, ListingView};
