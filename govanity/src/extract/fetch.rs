//! Repository fetching.

use super::process::{run, stderr_message};
use super::ExtractError;
use std::path::Path;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Places a checkout of a repository into a directory.
#[allow(async_fn_in_trait)]
pub trait RepositoryFetcher {
    /// Fetches `url` into the existing, empty directory `dest`.
    async fn fetch(
        &self,
        url: &str,
        dest: &Path,
        cancel: &CancellationToken,
    ) -> Result<(), ExtractError>;
}

/// Fetches repositories with a single-commit `git clone`.
#[derive(Debug, Clone, Default)]
pub struct GitFetcher;

impl RepositoryFetcher for GitFetcher {
    async fn fetch(
        &self,
        url: &str,
        dest: &Path,
        cancel: &CancellationToken,
    ) -> Result<(), ExtractError> {
        debug!(url, dest = %dest.display(), "Cloning repository");

        let mut command = Command::new("git");
        command
            .args(["clone", "--depth=1", "--quiet", url])
            .arg(dest)
            // Missing or private repositories must fail instead of prompting.
            .env("GIT_TERMINAL_PROMPT", "0");

        let output = run("git", command, cancel).await?;
        if !output.status.success() {
            return Err(ExtractError::CloneFailed {
                url: url.to_string(),
                message: stderr_message(&output),
            });
        }

        Ok(())
    }
}
