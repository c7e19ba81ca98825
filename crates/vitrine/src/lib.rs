//! Vitrine umbrella crate.
//!
//! Re-exports the Vitrine components. Use feature flags to pick the parts
//! you need; `core` and `listing` are always available.

#![doc = include_str!("../README.md")]

pub use vitrine_core as core;
pub use vitrine_listing as listing;

#[cfg(feature = "fetch")]
pub use vitrine_fetch as fetch;

#[cfg(feature = "bench")]
pub use vitrine_bench as bench;

#[cfg(feature = "content")]
pub use vitrine_content as content;

#[cfg(feature = "cli")]
pub use vitrine_cli as cli;
