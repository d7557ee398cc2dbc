//! Repository discovery.
//!
//! Turns the configured search list into the repositories worth cloning:
//! explicit `owner/repo` entries are always kept, owner entries are expanded
//! through the GitHub API and filtered down to non-fork Go repositories.

mod error;
mod repository;
mod source;

pub use error::DiscoveryError;
pub use repository::{DiscoveredRepository, OwnerRepository};
pub use source::RepositorySource;

use crate::config::SearchEntry;
use std::collections::HashSet;
use std::future::Future;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, info_span, warn, Instrument};

/// Language a repository must contain to be scanned.
pub const TARGET_LANGUAGE: &str = "Go";

/// Discovers repositories to scan for vanity packages.
///
/// Explicit entries come first, in the order given, followed by the
/// repositories of each owner. Listing failures for one owner are logged
/// and the remaining owners are still scanned.
///
/// # Errors
///
/// Returns [`DiscoveryError::Cancelled`] if `cancel` fires.
pub async fn discover_repositories<S: RepositorySource>(
    source: &S,
    search: &[SearchEntry],
    cancel: &CancellationToken,
) -> Result<Vec<DiscoveredRepository>, DiscoveryError> {
    let span = info_span!("discover", entries = search.len());

    async {
        let mut explicit = HashSet::new();
        let mut owners = Vec::new();
        let mut repositories = Vec::new();

        for entry in search {
            match entry {
                SearchEntry::Owner(owner) => owners.push(owner.as_str()),
                SearchEntry::Repository { owner, name } => {
                    explicit.insert(repository_key(owner, name));
                    repositories.push(DiscoveredRepository::github(owner, name));
                }
            }
        }

        for owner in owners {
            let found = scan_owner(source, owner, &explicit, cancel).await?;
            repositories.extend(found);
        }

        let repositories = deduplicate_repositories(repositories);
        info!(count = repositories.len(), "Discovery complete");
        Ok(repositories)
    }
    .instrument(span)
    .await
}

/// Lists an owner's repositories and keeps the non-fork Go ones.
async fn scan_owner<S: RepositorySource>(
    source: &S,
    owner: &str,
    explicit: &HashSet<String>,
    cancel: &CancellationToken,
) -> Result<Vec<DiscoveredRepository>, DiscoveryError> {
    let listed = match cancellable(cancel, source.owner_repositories(owner)).await {
        Ok(listed) => listed,
        Err(DiscoveryError::Cancelled) => return Err(DiscoveryError::Cancelled),
        Err(e) => {
            warn!(owner, error = %e, "Failed to list repositories");
            return Ok(Vec::new());
        }
    };

    let mut selected = Vec::new();
    for repo in listed {
        let full_name = format!("{owner}/{}", repo.name);

        if explicit.contains(&repository_key(owner, &repo.name)) {
            debug!(repo = %full_name, "Skipping, explicitly listed");
            continue;
        }

        if repo.fork {
            debug!(repo = %full_name, "Skipping, is a fork");
            continue;
        }

        if repo.language.as_deref() != Some(TARGET_LANGUAGE) {
            let languages = match cancellable(cancel, source.languages(owner, &repo.name)).await {
                Ok(languages) => languages,
                Err(DiscoveryError::Cancelled) => return Err(DiscoveryError::Cancelled),
                Err(e) => {
                    warn!(repo = %full_name, error = %e, "Failed to list languages");
                    continue;
                }
            };

            if !languages.iter().any(|l| l == TARGET_LANGUAGE) {
                debug!(repo = %full_name, "Skipping, not a Go repository");
                continue;
            }
        }

        selected.push(DiscoveredRepository {
            owner: owner.to_string(),
            name: repo.name,
            full_name,
            clone_url: repo.clone_url,
        });
    }

    info!(owner, count = selected.len(), "Scanned owner");
    Ok(selected)
}

/// GitHub names are case-insensitive.
fn repository_key(owner: &str, name: &str) -> String {
    format!("{owner}/{name}").to_ascii_lowercase()
}

/// Races a discovery call against cancellation.
async fn cancellable<T>(
    cancel: &CancellationToken,
    call: impl Future<Output = Result<T, DiscoveryError>>,
) -> Result<T, DiscoveryError> {
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(DiscoveryError::Cancelled),
        result = call => result,
    }
}

/// Deduplicates repositories by clone URL, keeping the first occurrence.
fn deduplicate_repositories(repositories: Vec<DiscoveredRepository>) -> Vec<DiscoveredRepository> {
    let mut seen = HashSet::new();
    repositories
        .into_iter()
        .filter(|repo| seen.insert(repo.clone_url.clone()))
        .collect()
}
