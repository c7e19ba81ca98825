//! Dataset fetching for Vitrine.
//!
//! Reads static JSON datasets from the published site (HTTP) or a local data
//! directory, parses them into [`Dataset`]s, and reports progress through a
//! [`LoadHandle`](vitrine_core::LoadHandle).
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use vitrine_core::LoadHandle;
//! use vitrine_fetch::{create_source, Dataset, DatasetCache, DatasetFetcher, Resource, SourceConfig};
//! use vitrine_listing::Record;
//!
//! let source = create_source(&SourceConfig {
//!     data_dir: Some("public/data".into()),
//!     ..Default::default()
//! })?;
//! let fetcher = DatasetFetcher::new(source).with_cache(Arc::new(DatasetCache::new()));
//!
//! let handle: LoadHandle<Dataset<Record>> = LoadHandle::new("zkvms");
//! fetcher.load(&Resource::zkvms(), &handle).await;
//! ```

#![forbid(unsafe_code)]

pub mod cache;
pub mod dataset;
pub mod fetcher;
pub mod source;

// Re-exports
pub use cache::{CachedPayload, DatasetCache};
pub use dataset::{Dataset, Resource};
pub use fetcher::DatasetFetcher;
pub use source::{create_source, DataSource, DirSource, HttpSource, SourceConfig};
