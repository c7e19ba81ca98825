//! Data source trait and factory.
//!
//! This module defines the `DataSource` trait that every resource reader
//! satisfies, plus the two implementations a site needs.
//!
//! # Sources
//!
//! - `HttpSource`: reads `<base_url>/<path>` over HTTP (the deployed site)
//! - `DirSource`: reads `<root>/<path>` from disk (a local checkout)
//!
//! # Example
//!
//! ```rust,ignore
//! use vitrine_fetch::{create_source, SourceConfig};
//!
//! let config = SourceConfig {
//!     base_url: Some("https://example.org/data".to_string()),
//!     ..Default::default()
//! };
//! let source = create_source(&config)?;
//! let bytes = source.read("zkvms.json").await?;
//! ```

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use vitrine_core::resolver::expand_tilde;
use vitrine_core::{Error, Result};

/// Where datasets are read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Base URL of the published data directory. Takes precedence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Local data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,

    /// Keep the last payload per resource path between fetches.
    #[serde(default = "default_true")]
    pub cache: bool,
}

fn default_true() -> bool {
    true
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            data_dir: None,
            cache: default_true(),
        }
    }
}

/// Abstract resource reader.
///
/// One call is exactly one read: no retry, no caching (see
/// [`DatasetCache`](crate::cache::DatasetCache) for that).
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Read the raw bytes of a resource path (relative to the source root).
    async fn read(&self, path: &str) -> Result<Vec<u8>>;

    /// Source kind, for diagnostics.
    fn name(&self) -> &str;

    /// Human-readable location of a path, for logs.
    fn locate(&self, path: &str) -> String;
}

/// Create a data source from configuration.
///
/// Selection logic:
/// 1. `base_url` set → `HttpSource`
/// 2. `data_dir` set → `DirSource`
///
/// # Errors
///
/// Returns a configuration error when neither is set.
pub fn create_source(config: &SourceConfig) -> Result<Arc<dyn DataSource>> {
    if let Some(base_url) = &config.base_url {
        return Ok(Arc::new(HttpSource::new(base_url)?));
    }
    if let Some(dir) = &config.data_dir {
        return Ok(Arc::new(DirSource::new(expand_tilde(dir))));
    }
    Err(Error::config(
        "no data source configured: set source.base_url or source.data_dir",
    ))
}

// ============================================================================
// HttpSource
// ============================================================================

/// Reads resources over HTTP relative to a base URL.
pub struct HttpSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSource {
    /// Create a source rooted at `base_url`.
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("vitrine/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::fetch(base_url, format!("cannot build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Full URL for a resource path.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl DataSource for HttpSource {
    async fn read(&self, path: &str) -> Result<Vec<u8>> {
        let url = self.url_for(path);
        log::debug!("GET {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::fetch(path, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::fetch(path, format!("HTTP {status}")));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::fetch(path, e.to_string()))?;
        Ok(body.to_vec())
    }

    fn name(&self) -> &str {
        "http"
    }

    fn locate(&self, path: &str) -> String {
        self.url_for(path)
    }
}

impl std::fmt::Debug for HttpSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpSource")
            .field("base_url", &self.base_url)
            .finish()
    }
}

// ============================================================================
// DirSource
// ============================================================================

/// Reads resources from a local directory.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    /// Create a source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a resource path under the root, refusing `..` and absolute
    /// components.
    pub fn resolve(&self, path: &str) -> Result<PathBuf> {
        let relative = Path::new(path.trim_start_matches('/'));
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(Error::fetch(path, "path escapes the data directory"));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl DataSource for DirSource {
    async fn read(&self, path: &str) -> Result<Vec<u8>> {
        let full = self.resolve(path)?;
        log::debug!("read {}", full.display());
        tokio::fs::read(&full)
            .await
            .map_err(|e| Error::io_with_path(e, &full))
    }

    fn name(&self) -> &str {
        "dir"
    }

    fn locate(&self, path: &str) -> String {
        self.root
            .join(path.trim_start_matches('/'))
            .display()
            .to_string()
    }
}

// ============================================================================
// Tests
// ============================================================================
