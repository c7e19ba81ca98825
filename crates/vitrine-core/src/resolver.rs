//! Configurable path resolver for the config file and data directory.
//!
//! `PathResolver` locates the configuration file and the local data
//! directory using environment variables, an explicit override, and
//! fallback paths.
//!
//! # Example
//!
//! ```no_run
//! use vitrine_core::resolver::PathResolver;
//!
//! let resolver = PathResolver::new("vitrine").with_data_fallback("./public/data");
//!
//! // Checks VITRINE_CONFIG, then <config dir>/vitrine/config.toml
//! if let Some(config) = resolver.config_file(None) {
//!     println!("Config: {:?}", config);
//! }
//! ```

use std::env;
use std::path::PathBuf;

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

/// Configurable path resolver for a project.
#[derive(Debug, Clone)]
pub struct PathResolver {
    /// Project name (e.g., "vitrine")
    project_name: String,
    /// Environment variable prefix (e.g., "VITRINE")
    env_prefix: String,
    /// Config file name inside the project config directory
    config_file_name: String,
    /// Fallback data directory (expanded with tilde)
    data_fallback: Option<PathBuf>,
}

impl PathResolver {
    /// Create a new resolver for the given project name.
    ///
    /// The project name is converted to an environment variable prefix:
    /// - "vitrine" → "VITRINE"
    /// - "zk-site" → "ZK_SITE"
    pub fn new(project_name: &str) -> Self {
        let env_prefix = project_name.to_uppercase().replace(['-', ' '], "_");

        Self {
            project_name: project_name.to_string(),
            env_prefix,
            config_file_name: "config.toml".to_string(),
            data_fallback: None,
        }
    }

    /// Set the fallback data directory (supports ~ expansion).
    pub fn with_data_fallback(mut self, path: &str) -> Self {
        self.data_fallback = Some(expand_tilde(path));
        self
    }

    /// Project name this resolver was created for.
    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    /// Get the environment variable name for a given suffix.
    ///
    /// # Example
    /// ```
    /// use vitrine_core::resolver::PathResolver;
    ///
    /// let resolver = PathResolver::new("vitrine");
    /// assert_eq!(resolver.env_var("DATA_DIR"), "VITRINE_DATA_DIR");
    /// ```
    pub fn env_var(&self, suffix: &str) -> String {
        format!("{}_{}", self.env_prefix, suffix)
    }

    /// Default config file location: `<config dir>/<project>/config.toml`.
    pub fn default_config_file(&self) -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(&self.project_name).join(&self.config_file_name))
    }

    /// Resolve the config file path.
    ///
    /// Checks in order:
    /// 1. Explicit path (e.g. `--config`)
    /// 2. `{PROJECT}_CONFIG` environment variable
    /// 3. Platform default location
    ///
    /// The returned path may not exist yet.
    pub fn config_file(&self, explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(expand_tilde(path));
        }
        if let Ok(path) = env::var(self.env_var("CONFIG")) {
            return Some(expand_tilde(&path));
        }
        self.default_config_file()
    }

    /// Resolve the data directory.
    ///
    /// Checks in order:
    /// 1. Explicit path (config file or command line)
    /// 2. `{PROJECT}_DATA_DIR` environment variable
    /// 3. Fallback path (if configured)
    pub fn data_dir(&self, explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(expand_tilde(path));
        }
        if let Ok(path) = env::var(self.env_var("DATA_DIR")) {
            return Some(expand_tilde(&path));
        }
        self.data_fallback.clone()
    }
}
