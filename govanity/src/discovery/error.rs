//! Repository discovery error types.

use thiserror::Error;

/// Errors that can occur during repository discovery.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// GitHub API error.
    #[error("GitHub API error: {0}")]
    GitHubError(#[from] octocrab::Error),

    /// The owner or repository does not exist or is not visible.
    #[error("{name} not found on GitHub")]
    NotFound {
        /// Owner or `owner/name` that was looked up.
        name: String,
    },

    /// Discovery was interrupted.
    #[error("Repository discovery cancelled")]
    Cancelled,
}
