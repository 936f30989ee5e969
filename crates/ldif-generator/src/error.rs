//! Error types for the ldif-generator crate.
//!
//! Each concern gets its own semantic enum built with `thiserror`:
//! configuration and pool invariants, word-list reads, and output writes.
//! [`GeneratorError`] wraps them for the top-level run so the binary can
//! report the whole cause chain.

use camino::Utf8PathBuf;
use thiserror::Error;

use crate::pools::PoolKind;

/// Errors raised when the run configuration or the word pools cannot
/// satisfy the requested generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// The requested population size is not positive.
    #[error("size must be a positive integer, got {value}")]
    InvalidSize {
        /// Size supplied by the caller.
        value: usize,
    },

    /// The maximum number of entries per file is not positive.
    #[error("maximum entries per file must be a positive integer, got {value}")]
    InvalidMaxEntriesPerFile {
        /// Limit supplied by the caller.
        value: usize,
    },

    /// The base DN is empty or whitespace-only.
    #[error("base DN must not be empty")]
    EmptyBaseDn,

    /// The output prefix is empty or names a directory.
    #[error("output prefix must name a file, got '{value}'")]
    EmptyOutputPrefix {
        /// Prefix supplied by the caller.
        value: String,
    },

    /// A path supplied on the command line is not valid UTF-8.
    #[error("path is not valid UTF-8: {value}")]
    NonUtf8Path {
        /// Lossy rendering of the offending path.
        value: String,
    },

    /// A word pool contains no usable entries.
    #[error("word pool '{pool}' is empty")]
    EmptyPool {
        /// Pool that was empty.
        pool: PoolKind,
    },

    /// The name pools cannot produce enough distinct display names.
    #[error(
        "name pools can produce at most {capacity} distinct display names, \
         but {requested} were requested"
    )]
    PoolTooSmall {
        /// Requested population size.
        requested: usize,
        /// Number of distinct display names the pools can produce.
        capacity: usize,
    },

    /// Too many consecutive duplicate draws were discarded.
    #[error(
        "gave up after {attempts} consecutive duplicate names \
         ({generated} of {requested} entries generated)"
    )]
    RetryBudgetExhausted {
        /// Consecutive duplicate draws before giving up.
        attempts: usize,
        /// Entries generated before giving up.
        generated: usize,
        /// Requested population size.
        requested: usize,
    },
}

/// Errors raised while loading word lists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoolError {
    /// A word-list file could not be read.
    #[error("failed to read word list at '{path}': {message}")]
    Read {
        /// Path to the word-list file.
        path: Utf8PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The word list was read but is unusable.
    #[error("invalid word list")]
    Invalid {
        /// Underlying pool invariant violation.
        #[from]
        source: ConfigurationError,
    },
}

/// Errors raised while writing output files.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OutputError {
    /// An output file could not be created.
    #[error("failed to create output file '{path}': {message}")]
    Create {
        /// Path of the file being created.
        path: Utf8PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// Writing to or flushing an output file failed.
    #[error("failed to write output file '{path}': {message}")]
    Write {
        /// Path of the file being written.
        path: Utf8PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// A line was written before any file was started.
    #[error("no output file is open")]
    NoOpenFile,
}

/// Fatal errors surfaced by a generation run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeneratorError {
    /// The configuration or the pools are unusable.
    #[error("invalid configuration")]
    Configuration {
        /// Underlying configuration error.
        #[from]
        source: ConfigurationError,
    },

    /// The word lists could not be loaded.
    #[error("failed to load word pools")]
    Pools {
        /// Underlying pool error.
        #[from]
        source: PoolError,
    },

    /// An output file could not be written.
    #[error("failed to write LDIF output")]
    Output {
        /// Underlying output error.
        #[from]
        source: OutputError,
    },
}
