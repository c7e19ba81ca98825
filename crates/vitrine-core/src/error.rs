//! Error types for vitrine-core.
//!
//! Every library crate in the workspace reports failures through this one
//! enum. The taxonomy is deliberately small: a listing page only ever needs
//! to know whether a fetch failed (and show the message) or whether a
//! requested id was absent from a loaded dataset.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for Vitrine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading and presenting datasets.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Network error or non-success response while reading a resource.
    #[error("Failed to fetch {resource}: {message}")]
    Fetch {
        /// Resource path that was requested.
        resource: String,
        /// Human-readable cause.
        message: String,
    },

    /// Filesystem error, optionally tied to a path.
    #[error("I/O error{}: {source}", fmt_path(.path))]
    Io {
        /// Path being accessed, if known.
        path: Option<PathBuf>,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Payload was read but did not have the expected shape.
    #[error("Parse error: {0}")]
    Parse(String),

    /// JSON deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Requested id is absent from a loaded dataset.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// What was being looked up (e.g. "zkvm", "post", "sort key").
        kind: String,
        /// The id that was requested.
        id: String,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Any other failed operation.
    #[error("Operation failed: {0}")]
    Operation(String),
}

fn fmt_path(path: &Option<PathBuf>) -> String {
    match path {
        Some(p) => format!(" at {}", p.display()),
        None => String::new(),
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io { path: None, source }
    }
}

impl Error {
    /// Creates a fetch error for a resource.
    pub fn fetch<R, M>(resource: R, message: M) -> Self
    where
        R: Into<String>,
        M: Into<String>,
    {
        Error::Fetch {
            resource: resource.into(),
            message: message.into(),
        }
    }

    /// Wraps an I/O error with the path that caused it.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::Io {
            path: Some(path.as_ref().to_path_buf()),
            source,
        }
    }

    /// Creates a parse error.
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Error::Parse(message.into())
    }

    /// Creates a not-found error.
    pub fn not_found<K, I>(kind: K, id: I) -> Self
    where
        K: Into<String>,
        I: Into<String>,
    {
        Error::NotFound {
            kind: kind.into(),
            id: id.into(),
        }
    }

    /// Creates a configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config(message.into())
    }

    /// Creates a generic operation error.
    pub fn operation<S: Into<String>>(message: S) -> Self {
        Error::Operation(message.into())
    }

    /// Returns `true` for errors a page renders as "could not load".
    ///
    /// Malformed payloads count as fetch failures.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            Error::Fetch { .. } | Error::Io { .. } | Error::Parse(_) | Error::Json(_)
        )
    }

    /// Returns `true` if a requested id was absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}
