//! Vitrine Core: shared types, errors, and utilities.
//!
//! This crate provides the foundational types used across all Vitrine crates.
//! It has no internal Vitrine dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`ids`]: Slug normalization and detail-page paths
//! - [`load`]: Loading / ready / failed state for a single fetch
//! - [`resolver`]: Config file and data directory resolution

#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]

pub mod error;
pub mod ids;
pub mod load;
pub mod resolver;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use ids::{detail_path, normalize_id, underscore_id};
pub use load::{LoadHandle, LoadState, LoadTicket};
pub use resolver::PathResolver;
