//! Telemetry index document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The published list of telemetry files (`telemetry/index.json`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TelemetryIndex {
    /// Telemetry filenames.
    #[serde(default, alias = "filenames")]
    pub files: Vec<String>,

    /// When the index was regenerated.
    #[serde(
        default,
        rename = "lastUpdated",
        alias = "last_updated",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_updated: Option<DateTime<Utc>>,
}

impl TelemetryIndex {
    /// Number of listed files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// True when no files are listed.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
