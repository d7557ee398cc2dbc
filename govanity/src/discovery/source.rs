//! Repository listing backends.

use super::{DiscoveryError, OwnerRepository};
use crate::rate_limit::report_core_rate_limit;
use octocrab::models::Repository;
use octocrab::{Octocrab, Page};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Results per page when listing an owner's repositories.
const RESULTS_PER_PAGE: u8 = 100;

/// Source of repository metadata for owner scans.
#[allow(async_fn_in_trait)]
pub trait RepositorySource {
    /// Lists every repository owned by a user or organization.
    async fn owner_repositories(&self, owner: &str)
        -> Result<Vec<OwnerRepository>, DiscoveryError>;

    /// Lists the languages GitHub detected in a repository.
    async fn languages(&self, owner: &str, name: &str) -> Result<Vec<String>, DiscoveryError>;

    /// Logs how much API quota is left before an owner scan.
    async fn report_quota(&self, _authenticated: bool, _cancel: &CancellationToken) {}
}

impl RepositorySource for Octocrab {
    async fn owner_repositories(
        &self,
        owner: &str,
    ) -> Result<Vec<OwnerRepository>, DiscoveryError> {
        let mut page = self
            .users(owner)
            .repos()
            .per_page(RESULTS_PER_PAGE)
            .send()
            .await
            .map_err(|e| not_found_as(owner, e))?;

        let mut repositories = extract_page_repositories(owner, &page);

        while let Some(next_page) = self.get_page::<Repository>(&page.next).await? {
            repositories.extend(extract_page_repositories(owner, &next_page));
            page = next_page;
        }

        debug!(owner, count = repositories.len(), "Listed owner repositories");
        Ok(repositories)
    }

    async fn languages(&self, owner: &str, name: &str) -> Result<Vec<String>, DiscoveryError> {
        let languages = self
            .repos(owner, name)
            .list_languages()
            .await
            .map_err(|e| not_found_as(&format!("{owner}/{name}"), e))?;
        Ok(languages.into_keys().collect())
    }

    async fn report_quota(&self, authenticated: bool, cancel: &CancellationToken) {
        report_core_rate_limit(self, authenticated, cancel).await;
    }
}

/// Maps a GitHub 404 to [`DiscoveryError::NotFound`].
fn not_found_as(name: &str, error: octocrab::Error) -> DiscoveryError {
    match error {
        octocrab::Error::GitHub { source, .. } if source.status_code.as_u16() == 404 => {
            DiscoveryError::NotFound {
                name: name.to_string(),
            }
        }
        other => other.into(),
    }
}

/// Converts a page of API repositories into owner scan entries.
fn extract_page_repositories(owner: &str, page: &Page<Repository>) -> Vec<OwnerRepository> {
    page.items
        .iter()
        .map(|repo| OwnerRepository {
            name: repo.name.clone(),
            fork: repo.fork.unwrap_or(false),
            language: repo
                .language
                .as_ref()
                .and_then(|language| language.as_str())
                .map(str::to_string),
            clone_url: repo
                .svn_url
                .as_ref()
                .or(repo.html_url.as_ref())
                .map(ToString::to_string)
                .unwrap_or_else(|| format!("https://github.com/{owner}/{}", repo.name)),
        })
        .collect()
}
