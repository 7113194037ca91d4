//! Error types for hsk-coverage-core.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// A value parsed but is outside its accepted range.
    #[error("invalid configuration: {field} {reason}")]
    OutOfRange {
        /// Offending configuration key.
        field: &'static str,
        /// What the accepted range is.
        reason: String,
    },
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while loading word lists and tracked sets.
#[derive(Error, Debug)]
pub enum DataError {
    /// The file could not be read.
    #[error("failed to read {path}")]
    Read {
        /// Path that was being read.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file was read but its JSON did not match any known layout.
    #[error("failed to parse {path}")]
    Parse {
        /// Path that was being parsed.
        path: Utf8PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

/// Result type alias using [`DataError`].
pub type DataResult<T> = Result<T, DataError>;

/// Errors that can occur while planning a flashcard export.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExportError {
    /// None of the tracked words belong to the core HSK levels.
    #[error("no tracked words to export")]
    NoTrackedWords,
}

/// Result type alias using [`ExportError`].
pub type ExportResult<T> = Result<T, ExportError>;
