//! Configuration error types.

use thiserror::Error;

/// Errors that can occur while validating the run configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No vanity prefix was given.
    #[error("must provide vanity URL prefix")]
    MissingPrefix,

    /// The vanity prefix could not be parsed as `host[/path]`.
    #[error("invalid vanity prefix '{prefix}': {message}")]
    InvalidPrefix { prefix: String, message: String },

    /// The search list had no usable entries.
    #[error("search list must contain at least one entry")]
    EmptySearch,

    /// A search entry with a `/` was not a valid `owner/repo` reference.
    #[error("invalid repository reference '{entry}', expected 'owner/repo'")]
    InvalidSearchEntry { entry: String },

    /// No output directory was given.
    #[error("must provide an output directory")]
    MissingOutput,

    /// Concurrency must allow at least one repository at a time.
    #[error("concurrency must be at least 1, got {value}")]
    InvalidConcurrency { value: usize },
}
