//! Layered configuration.
//!
//! Precedence, lowest to highest:
//!
//! 1. built-in defaults
//! 2. the TOML config file (`--config`, `VITRINE_CONFIG`, or
//!    `<config dir>/vitrine/config.toml`)
//! 3. `VITRINE_DATA_DIR` / `VITRINE_BASE_URL`
//! 4. `--data-dir` / `--base-url`
//!
//! With no source configured anywhere, datasets are read from
//! `./public/data`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use vitrine_bench::BenchConfig;
use vitrine_content::ContentConfig;
use vitrine_core::{Error, PathResolver, Result};
use vitrine_fetch::SourceConfig;
use vitrine_listing::ListingConfig;

/// Project name used for the config directory and env prefix.
pub const PROJECT: &str = "vitrine";

/// Data directory used when nothing else is configured.
pub const DEFAULT_DATA_DIR: &str = "./public/data";

/// Full configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VitrineConfig {
    /// Where datasets come from.
    #[serde(default)]
    pub source: SourceConfig,

    /// Listing defaults.
    #[serde(default)]
    pub listing: ListingConfig,

    /// Telemetry index and program ids.
    #[serde(default)]
    pub bench: BenchConfig,

    /// Content directory layout.
    #[serde(default)]
    pub content: ContentConfig,
}

/// Path resolver for this project.
pub fn resolver() -> PathResolver {
    PathResolver::new(PROJECT).with_data_fallback(DEFAULT_DATA_DIR)
}

impl VitrineConfig {
    /// Parse TOML.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(format!("invalid config: {e}")))
    }

    /// Serialize to pretty TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Load a config file.
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        Self::from_toml_str(&content)
            .map_err(|e| Error::config(format!("{}: {e}", path.display())))
    }

    /// Load from the resolved config path.
    ///
    /// A missing file at the default location yields defaults; a missing
    /// file that was asked for explicitly is an error.
    pub fn load(explicit: Option<&str>) -> Result<(Self, Option<PathBuf>)> {
        let Some(path) = resolver().config_file(explicit) else {
            log::debug!("No config directory on this platform, using defaults");
            return Ok((Self::default(), None));
        };

        if path.exists() {
            log::debug!("Loading config from {}", path.display());
            return Ok((Self::load_file(&path)?, Some(path)));
        }
        if explicit.is_some() {
            return Err(Error::config(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        log::debug!("No config file at {}, using defaults", path.display());
        Ok((Self::default(), None))
    }

    /// Apply `VITRINE_*` overrides through `lookup` (normally `std::env::var`).
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let resolver = resolver();
        if let Some(dir) = lookup(&resolver.env_var("DATA_DIR")) {
            self.source.data_dir = Some(dir);
        }
        if let Some(url) = lookup(&resolver.env_var("BASE_URL")) {
            self.source.base_url = Some(url);
        }
    }

    /// Apply command-line overrides. A directory given on the command line
    /// beats any configured URL.
    pub fn apply_flags(&mut self, data_dir: Option<&str>, base_url: Option<&str>) {
        if let Some(dir) = data_dir {
            self.source.data_dir = Some(dir.to_string());
            self.source.base_url = None;
        }
        if let Some(url) = base_url {
            self.source.base_url = Some(url.to_string());
        }
    }

    /// Fill in the fallback data directory when no source is set.
    pub fn ensure_source(&mut self) {
        if self.source.base_url.is_none() && self.source.data_dir.is_none() {
            self.source.data_dir = resolver()
                .data_dir(None)
                .map(|p| p.display().to_string());
        }
    }

    /// Check values that serde cannot.
    pub fn validate(&self) -> Result<()> {
        self.listing.validate()?;
        self.bench.validate()?;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
