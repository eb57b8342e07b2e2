//! Error types for the settings crate.
//!
//! None of these are fatal to the application: load failures degrade to the
//! default document and save failures are logged.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while persisting the configuration.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The state directory could not be determined or created.
    #[error("State directory error: {0}")]
    StateDirectory(String),

    /// Reading the stored document failed.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing the stored document failed.
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The stored document is not valid JSON or lacks required fields.
    #[error("Corrupted state document: {0}")]
    Corrupted(#[from] serde_json::Error),

    /// The stored document is valid JSON but not an object.
    #[error("State document must be a JSON object, found {0}")]
    NotAnObject(&'static str),

    /// I/O error during other store operations.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
}

/// Result type alias for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;
