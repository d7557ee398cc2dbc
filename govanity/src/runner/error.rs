//! Runner error types.

/// Errors that abort a run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// GitHub API client initialization errors.
    #[error(transparent)]
    Octocrab(#[from] octocrab::Error),

    /// The page template failed to compile.
    #[error(transparent)]
    Template(#[from] crate::templates::TemplateError),

    /// Repository discovery failed outright.
    #[error(transparent)]
    Discovery(crate::discovery::DiscoveryError),

    /// The CNAME file could not be written.
    #[error("Failed to write CNAME file: {0}")]
    Cname(#[source] crate::pages::PageError),

    /// The run was interrupted.
    #[error("Run cancelled")]
    Cancelled,
}

impl From<crate::discovery::DiscoveryError> for RunnerError {
    fn from(error: crate::discovery::DiscoveryError) -> Self {
        match error {
            crate::discovery::DiscoveryError::Cancelled => Self::Cancelled,
            other => Self::Discovery(other),
        }
    }
}
