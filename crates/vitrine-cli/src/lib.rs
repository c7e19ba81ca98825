//! # vitrine-cli
//!
//! Command-line front end for Vitrine:
//! - `list` / `show`: filter, sort, and page through a dataset
//! - `bench`: per-program telemetry counts
//! - `posts`: the blog index from the content directory
//! - `config`: inspect and initialize the layered configuration

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_handlers;

pub use cli::{Cli, Command, ConfigAction};
pub use commands::App;
pub use config::VitrineConfig;
