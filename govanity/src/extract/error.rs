//! Package extraction error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while extracting packages from a repository.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Failed to create the temporary working directory.
    #[error("Failed to create temp directory: {0}")]
    TempDir(#[source] std::io::Error),

    /// Failed to start an external tool.
    #[error("Failed to execute {program}: {source}")]
    Spawn {
        program: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// Clone failed.
    #[error("Failed to clone {url}: {message}")]
    CloneFailed { url: String, message: String },

    /// The package listing tool reported an error.
    #[error("Failed to list packages: {message}")]
    ListFailed { message: String },

    /// A listing line was not in `importPath:dir` form.
    #[error("Malformed package listing line: {line}")]
    MalformedListing { line: String },

    /// Failed to resolve symlinks in a path.
    #[error("Failed to resolve '{path}': {source}")]
    ResolvePath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A listed package directory is not inside the clone.
    #[error("Package directory '{dir}' is outside of '{root}'")]
    OutsideRoot { dir: PathBuf, root: PathBuf },

    /// Extraction was interrupted.
    #[error("Package extraction cancelled")]
    Cancelled,
}
