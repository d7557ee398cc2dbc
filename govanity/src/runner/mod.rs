//! Orchestrates discovery, extraction, and page generation.

mod error;

pub use error::RunnerError;

use crate::config::{SearchEntry, VanityConfig};
use crate::discovery::{discover_repositories, DiscoveredRepository, RepositorySource};
use crate::extract::{
    extract_packages, ExtractError, GitFetcher, GoListLister, PackageLister, RepositoryFetcher,
};
use crate::package::VanityPackage;
use crate::pages::{page_path, write_cname, write_pages};
use crate::summary::{RepositoryResult, RunSummary};
use crate::templates::TemplateRenderer;
use futures::stream::{self, StreamExt};
use octocrab::Octocrab;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// Runs a full scan and writes the resulting pages.
///
/// The repository source, fetcher, and package lister default to the GitHub
/// API, `git`, and `go list`.
pub struct Runner<S = Octocrab, F = GitFetcher, L = GoListLister> {
    config: VanityConfig,
    source: S,
    fetcher: F,
    lister: L,
    renderer: TemplateRenderer,
}

impl Runner {
    /// Builds a runner backed by GitHub, `git`, and `go list`.
    pub fn new(config: VanityConfig) -> Result<Self, RunnerError> {
        let mut builder = Octocrab::builder();
        if let Some(token) = config.token() {
            builder = builder.personal_token(token.to_string());
        }
        let octocrab = builder.build()?;

        Self::with_collaborators(config, octocrab, GitFetcher, GoListLister)
    }
}

impl<S, F, L> Runner<S, F, L>
where
    S: RepositorySource,
    F: RepositoryFetcher,
    L: PackageLister,
{
    /// Builds a runner from explicit collaborators.
    pub fn with_collaborators(
        config: VanityConfig,
        source: S,
        fetcher: F,
        lister: L,
    ) -> Result<Self, RunnerError> {
        Ok(Self {
            config,
            source,
            fetcher,
            lister,
            renderer: TemplateRenderer::new()?,
        })
    }

    /// Returns the run configuration.
    pub fn config(&self) -> &VanityConfig {
        &self.config
    }

    /// Executes the full flow.
    ///
    /// Failures of single repositories or pages are logged and counted in
    /// the returned summary.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] if discovery fails outright, the CNAME file
    /// cannot be written, or `cancel` fires.
    pub async fn run(&self, cancel: &CancellationToken) -> Result<RunSummary, RunnerError> {
        let config = &self.config;
        let mut summary = RunSummary::new(config.dry_run());

        info!(
            prefix = %config.prefix(),
            search = ?config.search().iter().map(ToString::to_string).collect::<Vec<_>>(),
            out = %config.out().display(),
            token = config.token().is_some(),
            cname = config.write_cname(),
            dry_run = config.dry_run(),
            concurrency = config.concurrency(),
            "Starting run"
        );

        let scans_owners = config
            .search()
            .iter()
            .any(|entry| matches!(entry, SearchEntry::Owner(_)));
        if scans_owners {
            self.source
                .report_quota(config.token().is_some(), cancel)
                .await;
        }

        let repositories = discover_repositories(&self.source, config.search(), cancel).await?;
        summary.repositories_discovered = repositories.len();

        if repositories.is_empty() {
            warn!("No repositories found");
        }

        let packages = self.extract_all(repositories, cancel, &mut summary).await?;

        if config.dry_run() {
            print_dry_run_preview(config, &packages);
            return Ok(summary);
        }

        let report = write_pages(&packages, config.prefix(), config.out(), &self.renderer).await;
        summary.record_pages(&report);

        if config.write_cname() {
            write_cname(config.out(), config.prefix_host())
                .await
                .map_err(RunnerError::Cname)?;
            summary.cname_written = true;
        }

        Ok(summary)
    }

    /// Extracts packages from every repository, `concurrency` at a time.
    ///
    /// Results keep discovery order regardless of concurrency.
    async fn extract_all(
        &self,
        repositories: Vec<DiscoveredRepository>,
        cancel: &CancellationToken,
        summary: &mut RunSummary,
    ) -> Result<Vec<VanityPackage>, RunnerError> {
        let prefix = self.config.prefix();
        let fetcher = &self.fetcher;
        let lister = &self.lister;

        let outcomes: Vec<(DiscoveredRepository, Result<Vec<VanityPackage>, ExtractError>)> =
            stream::iter(repositories)
                .map(|repo| async move {
                    info!(repo = %repo.full_name, url = %repo.clone_url, "Pulling repository");
                    let result =
                        extract_packages(&repo.clone_url, prefix, fetcher, lister, cancel).await;
                    (repo, result)
                })
                .buffered(self.config.concurrency())
                .collect()
                .await;

        if cancel.is_cancelled() {
            return Err(RunnerError::Cancelled);
        }

        let mut packages = Vec::new();
        for (repo, outcome) in outcomes {
            let result = match outcome {
                Ok(found) => {
                    let result = RepositoryResult::Extracted {
                        repository: repo.clone_url,
                        packages: found.len(),
                    };
                    packages.extend(found);
                    result
                }
                Err(ExtractError::Cancelled) => return Err(RunnerError::Cancelled),
                Err(e) => {
                    error!(repo = %repo.full_name, error = %e, "Failed to extract packages");
                    RepositoryResult::Failed {
                        repository: repo.clone_url,
                        error: e.to_string(),
                    }
                }
            };
            summary.record_result(&result);
        }

        Ok(packages)
    }
}

fn print_dry_run_preview(config: &VanityConfig, packages: &[VanityPackage]) {
    println!("\n[DRY RUN] Prefix: {}", config.prefix());
    println!("  Found {} matching packages:\n", packages.len());

    for (i, package) in packages.iter().enumerate() {
        println!("  [{}/{}] {}", i + 1, packages.len(), package.import_path);
        println!("    Repository: {}", package.repo_url);
        println!("    Import prefix: {}", package.import_prefix());
        match page_path(config.prefix(), &package.import_path, config.out()) {
            Ok(path) => println!("    Would write: {}", path.display()),
            Err(e) => println!("    Would skip: {e}"),
        }
    }

    if config.write_cname() {
        println!(
            "\n  Would write CNAME: {}",
            config.out().join(crate::pages::CNAME_FILE).display()
        );
    }

    println!();
}
