//! Error types for flesch-index-core.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while loading a document's source text.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The source file could not be read.
    #[error("reading {path}: {source}")]
    Read {
        /// Path that failed to read.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The source file is larger than the configured input limit.
    #[error("input too large: {path} is {size} bytes (limit: {limit} bytes)")]
    InputTooLarge {
        /// Path of the oversized file.
        path: Utf8PathBuf,
        /// Size of the file in bytes.
        size: u64,
        /// Configured limit in bytes.
        limit: usize,
    },
}

/// Result type alias using [`DocumentError`].
pub type DocumentResult<T> = Result<T, DocumentError>;

/// Errors raised when a score is requested for a degenerate document.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreError {
    /// No terminated sentence was found in the text.
    #[error("document has no sentences")]
    NoSentences,

    /// Sentences were found, but none of them contain a word.
    #[error("document has no words")]
    NoWords,
}

/// Result type alias using [`ScoreError`].
pub type ScoreResult<T> = Result<T, ScoreError>;

/// Errors that can occur while writing chart images.
#[derive(Error, Debug)]
pub enum ChartError {
    /// The platform data directory could not be determined.
    #[error("cannot determine a data directory for chart output")]
    NoDataDir,

    /// The output directory could not be created.
    #[error("creating chart directory {path}: {source}")]
    CreateDir {
        /// Directory that failed to be created.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// There is nothing to draw.
    #[error("cannot chart an empty distribution")]
    EmptyDistribution,

    /// Encoding or writing the PNG failed.
    #[error("saving chart {path}: {source}")]
    Save {
        /// Destination of the chart.
        path: Utf8PathBuf,
        /// Underlying image failure.
        #[source]
        source: image::ImageError,
    },
}

/// Result type alias using [`ChartError`].
pub type ChartResult<T> = Result<T, ChartError>;
