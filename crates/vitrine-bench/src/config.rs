//! Benchmark configuration.

use serde::{Deserialize, Serialize};
use vitrine_core::{Error, Result};

/// Program ids attributed when no list is configured, in match order.
pub const DEFAULT_PROGRAMS: &[&str] = &[
    "fibonacci",
    "loop",
    "sha2",
    "keccak",
    "ecdsa",
    "eddsa",
    "bigmem",
    "rsp",
];

/// Where the telemetry index lives and which programs it is counted for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Telemetry index path relative to the data root.
    #[serde(default = "default_index_path")]
    pub index_path: String,

    /// Known program ids. Order decides which id wins an ambiguous filename.
    #[serde(default = "default_programs")]
    pub programs: Vec<String>,
}

fn default_index_path() -> String {
    "telemetry/index.json".to_string()
}

fn default_programs() -> Vec<String> {
    DEFAULT_PROGRAMS.iter().map(|s| s.to_string()).collect()
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            index_path: default_index_path(),
            programs: default_programs(),
        }
    }
}

impl BenchConfig {
    /// Check values that serde cannot.
    pub fn validate(&self) -> Result<()> {
        if self.index_path.trim().is_empty() {
            return Err(Error::config("bench.index_path must not be empty"));
        }
        if let Some(blank) = self.programs.iter().find(|id| id.trim().is_empty()) {
            return Err(Error::config(format!(
                "bench.programs contains a blank id: {blank:?}"
            )));
        }
        Ok(())
    }
}
