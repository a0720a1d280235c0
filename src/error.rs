//! Error taxonomy for lookup operations.
//!
//! Hard faults are errors; data-absence conditions ("no such record",
//! "file not indexed") are ordinary return values so callers can render a
//! precise message for each.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FindError {
    /// The index root does not exist or is not a directory.
    #[error("index root {path:?} is not a readable directory")]
    InvalidRoot {
        path: PathBuf,
        #[source]
        source: Option<std::io::Error>,
    },

    /// The record store could not be opened or queried. Distinct from the
    /// absence of matching rows, which resolution reports as a result value.
    #[error("record store unavailable: {0}")]
    StoreUnavailable(#[from] rusqlite::Error),

    /// The name file could not be read or parsed.
    #[error("name file {path:?}: {message}")]
    MetadataLoad { path: PathBuf, message: String },

    #[error("configuration error: {0}")]
    Config(String),

    /// The system handler for the resolved file could not be spawned.
    #[error("failed to open {path:?} with the system handler")]
    Launch {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<config::ConfigError> for FindError {
    fn from(err: config::ConfigError) -> Self {
        FindError::Config(err.to_string())
    }
}
