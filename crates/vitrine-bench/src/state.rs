//! Benchmark counts as seen by listing cards.
//!
//! Loading never fails from the caller's point of view: when the telemetry
//! index cannot be read, counts stay empty (every program reads 0), the
//! loading flag clears, and a warning is logged.

use chrono::{DateTime, Utc};
use serde::Serialize;
use vitrine_fetch::DatasetFetcher;

use crate::aggregate::{Aggregator, BenchmarkIndex};
use crate::index::TelemetryIndex;

/// Counts plus loading status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkState {
    /// Per-program counts.
    pub counts: BenchmarkIndex,
    /// True until the index read settles.
    pub loading: bool,
    /// Index timestamp, when it was read.
    pub last_updated: Option<DateTime<Utc>>,
    /// Files listed in the index.
    pub files_listed: usize,
}

impl Default for BenchmarkState {
    fn default() -> Self {
        Self::loading()
    }
}

impl BenchmarkState {
    /// Initial state before the index read settles.
    pub fn loading() -> Self {
        Self {
            counts: BenchmarkIndex::default(),
            loading: true,
            last_updated: None,
            files_listed: 0,
        }
    }

    /// Settled state from a parsed index.
    pub fn from_index(index: &TelemetryIndex, aggregator: &Aggregator) -> Self {
        Self {
            counts: aggregator.aggregate(&index.files),
            loading: false,
            last_updated: index.last_updated,
            files_listed: index.len(),
        }
    }

    /// Settled state after a failed read.
    pub fn unavailable() -> Self {
        Self {
            loading: false,
            ..Self::loading()
        }
    }

    /// Read the index at `path` and count it.
    pub async fn load(fetcher: &DatasetFetcher, path: &str, aggregator: &Aggregator) -> Self {
        match fetcher.fetch_json::<TelemetryIndex>(path).await {
            Ok(index) => {
                let state = Self::from_index(&index, aggregator);
                log::info!(
                    "Counted {} of {} telemetry files ({} unmatched)",
                    state.counts.total(),
                    state.files_listed,
                    state.counts.unmatched()
                );
                state
            }
            Err(e) => {
                log::warn!("Telemetry index unavailable, benchmark counts left empty: {e}");
                Self::unavailable()
            }
        }
    }

    /// Count for one program (0 while loading or when unavailable).
    pub fn count(&self, id: &str) -> usize {
        self.counts.count(id)
    }
}
