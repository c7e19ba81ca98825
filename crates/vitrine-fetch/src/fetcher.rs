//! Dataset fetcher.
//!
//! Combines a [`DataSource`], an optional [`DatasetCache`], and the payload
//! parser. A page mounts, calls [`DatasetFetcher::load`] with its
//! [`LoadHandle`], and renders whatever state the handle settles into.
//!
//! A failed read is terminal for that mount: the handle moves to `Failed`
//! and nothing retries. Remounting starts a new load.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use vitrine_core::{Error, LoadHandle, Result};

use crate::cache::DatasetCache;
use crate::dataset::{Dataset, Resource};
use crate::source::DataSource;

/// Reads and parses datasets from a source.
#[derive(Clone)]
pub struct DatasetFetcher {
    source: Arc<dyn DataSource>,
    cache: Option<Arc<DatasetCache>>,
}

impl DatasetFetcher {
    /// Fetcher without a cache: every call reads the source.
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self {
            source,
            cache: None,
        }
    }

    /// Attach a payload cache.
    pub fn with_cache(mut self, cache: Arc<DatasetCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// The attached cache, if any.
    pub fn cache(&self) -> Option<&Arc<DatasetCache>> {
        self.cache.as_ref()
    }

    /// The underlying source.
    pub fn source(&self) -> &dyn DataSource {
        self.source.as_ref()
    }

    /// Read raw bytes, consulting the cache first.
    pub async fn read(&self, path: &str) -> Result<Arc<Vec<u8>>> {
        if let Some(cache) = &self.cache
            && let Some(hit) = cache.get(path)
        {
            log::debug!("Cache hit for '{path}' (fetched {})", hit.fetched_at);
            return Ok(hit.bytes);
        }

        let bytes = self.source.read(path).await?;
        log::info!(
            "Read {} bytes from {}",
            bytes.len(),
            self.source.locate(path)
        );

        match &self.cache {
            Some(cache) => Ok(cache.insert(path, bytes).bytes),
            None => Ok(Arc::new(bytes)),
        }
    }

    /// Read and parse a whole JSON document.
    pub async fn fetch_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let bytes = self.read(path).await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            self.forget(path);
            Error::from(e)
        })
    }

    /// Read and parse a dataset resource.
    ///
    /// A payload that fails to parse is dropped from the cache so that the
    /// next attempt reads the source again.
    pub async fn fetch<R: DeserializeOwned>(&self, resource: &Resource) -> Result<Dataset<R>> {
        let bytes = self.read(&resource.path).await?;
        Dataset::from_json(&bytes, &resource.field).inspect_err(|_| self.forget(&resource.path))
    }

    /// Run one load cycle against `handle`.
    ///
    /// Returns `false` when the result arrived after the handle was
    /// unmounted or superseded and was therefore discarded.
    pub async fn load<R: DeserializeOwned>(
        &self,
        resource: &Resource,
        handle: &LoadHandle<Dataset<R>>,
    ) -> bool {
        let ticket = handle.begin();
        let result = self.fetch(resource).await;
        handle.resolve(ticket, result)
    }

    /// Drop any cached payload for `path`.
    pub fn forget(&self, path: &str) {
        if let Some(cache) = &self.cache {
            cache.invalidate(path);
        }
    }
}

impl std::fmt::Debug for DatasetFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatasetFetcher")
            .field("source", &self.source.name())
            .field("cached", &self.cache.as_ref().map(|c| c.len()))
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
