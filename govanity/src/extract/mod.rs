//! Package extraction.
//!
//! This module clones a repository into a temporary directory, lists its
//! packages, and keeps those whose import comment starts with the vanity
//! prefix, recording how deep each one sits below the repository root.

mod error;
mod fetch;
mod listing;
mod process;

pub use error::ExtractError;
pub use fetch::{GitFetcher, RepositoryFetcher};
pub use listing::{parse_listing, GoListLister, ListedPackage, PackageLister};

use crate::package::VanityPackage;
use std::path::Path;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, info_span, Instrument};

/// Extracts the packages of one repository that match `prefix`.
///
/// The checkout lives in a temporary directory that is removed when this
/// function returns, whether or not extraction succeeded.
///
/// # Arguments
///
/// * `repo_url` - URL handed to the fetcher
/// * `prefix` - Vanity prefix import comments must start with
/// * `fetcher` - Places the repository into the working directory
/// * `lister` - Lists the packages of the checkout
/// * `cancel` - Aborts in-flight clones and listings
///
/// # Errors
///
/// Returns [`ExtractError`] if the working directory cannot be created, or
/// fetching, listing, or path resolution fails.
pub async fn extract_packages<F, L>(
    repo_url: &str,
    prefix: &str,
    fetcher: &F,
    lister: &L,
    cancel: &CancellationToken,
) -> Result<Vec<VanityPackage>, ExtractError>
where
    F: RepositoryFetcher,
    L: PackageLister,
{
    let span = info_span!("extract", repo = %repo_url);

    async {
        let temp_dir = tempfile::Builder::new()
            .prefix("govanity")
            .tempdir()
            .map_err(ExtractError::TempDir)?;

        // The listing tool reports resolved paths, so compare against the
        // resolved root. On macOS the temp dir itself sits behind a symlink.
        let root = resolve(temp_dir.path()).await?;

        fetcher.fetch(repo_url, &root, cancel).await?;
        let listed = lister.list_packages(&root, cancel).await?;

        let mut packages = Vec::new();
        for package in listed {
            if !package.import_path.starts_with(prefix) {
                debug!(dir = %package.dir.display(), "Skipping, no matching import comment");
                continue;
            }

            let depth = package_depth(&root, &package.dir).await?;
            info!(import = %package.import_path, depth, "Found match");
            packages.push(VanityPackage::new(package.import_path, repo_url, depth));
        }

        info!(count = packages.len(), "Found matching packages");
        Ok(packages)
    }
    .instrument(span)
    .await
}

/// Counts the directories between `root` and the package directory `dir`.
///
/// `root` must already be resolved. Returns 0 when `dir` is the root itself.
///
/// # Errors
///
/// Returns [`ExtractError::ResolvePath`] if `dir` cannot be resolved, or
/// [`ExtractError::OutsideRoot`] if it does not live below `root`.
pub async fn package_depth(root: &Path, dir: &Path) -> Result<usize, ExtractError> {
    let dir = resolve(dir).await?;
    let relative = dir
        .strip_prefix(root)
        .map_err(|_| ExtractError::OutsideRoot {
            dir: dir.clone(),
            root: root.to_path_buf(),
        })?;
    Ok(relative.components().count())
}

async fn resolve(path: &Path) -> Result<std::path::PathBuf, ExtractError> {
    tokio::fs::canonicalize(path)
        .await
        .map_err(|source| ExtractError::ResolvePath {
            path: path.to_path_buf(),
            source,
        })
}
