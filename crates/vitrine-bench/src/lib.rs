//! Benchmark telemetry aggregation for Vitrine.
//!
//! Counts how many telemetry files exist for each known benchmark program by
//! matching filenames from the telemetry index against a fixed, ordered list
//! of program ids.
//!
//! # Example
//!
//! ```rust
//! use vitrine_bench::Aggregator;
//!
//! let aggregator = Aggregator::new(["fibonacci", "ecdsa"]);
//! let index = aggregator.aggregate(["telemetry_fibonacci_run1.json", "notes.json"]);
//!
//! assert_eq!(index.count("fibonacci"), 1);
//! assert_eq!(index.count("ecdsa"), 0);
//! assert_eq!(index.unmatched(), 1);
//! ```

#![forbid(unsafe_code)]

pub mod aggregate;
pub mod config;
pub mod index;
pub mod state;

// Re-exports
pub use aggregate::{aggregate, Aggregator, Ambiguity, BenchmarkIndex};
pub use config::{BenchConfig, DEFAULT_PROGRAMS};
pub use index::TelemetryIndex;
pub use state::BenchmarkState;
