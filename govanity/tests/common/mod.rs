//! Test doubles for driving the runner without network or toolchains.

#![allow(dead_code)]

use govanity::{
    DiscoveryError, ExtractError, ListedPackage, OwnerRepository, PackageLister,
    RepositoryFetcher, RepositorySource,
};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tokio_util::sync::CancellationToken;

/// File the fixture fetcher writes and the fixture lister reads.
const LISTING_FILE: &str = ".listing";

/// Repository source with fixed owner listings.
#[derive(Default)]
pub struct FixtureSource {
    owners: HashMap<String, Vec<OwnerRepository>>,
}

impl FixtureSource {
    pub fn with_go_repo(mut self, owner: &str, name: &str) -> Self {
        self.owners
            .entry(owner.to_string())
            .or_default()
            .push(OwnerRepository {
                name: name.to_string(),
                fork: false,
                language: Some("Go".to_string()),
                clone_url: format!("https://github.com/{owner}/{name}"),
            });
        self
    }
}

impl RepositorySource for FixtureSource {
    async fn owner_repositories(
        &self,
        owner: &str,
    ) -> Result<Vec<OwnerRepository>, DiscoveryError> {
        Ok(self.owners.get(owner).cloned().unwrap_or_default())
    }

    async fn languages(&self, _owner: &str, _name: &str) -> Result<Vec<String>, DiscoveryError> {
        Ok(Vec::new())
    }
}

/// Fetcher that materializes fixture repositories keyed by clone URL.
///
/// Each repository is a list of `(import comment, relative dir)` pairs.
/// URLs without a fixture fail like a missing remote would.
#[derive(Default)]
pub struct FixtureFetcher {
    repositories: HashMap<String, Vec<(String, String)>>,
}

impl FixtureFetcher {
    pub fn with_repo(mut self, url: &str, packages: &[(&str, &str)]) -> Self {
        self.repositories.insert(
            url.to_string(),
            packages
                .iter()
                .map(|(import, dir)| (import.to_string(), dir.to_string()))
                .collect(),
        );
        self
    }
}

impl RepositoryFetcher for FixtureFetcher {
    async fn fetch(
        &self,
        url: &str,
        dest: &Path,
        _cancel: &CancellationToken,
    ) -> Result<(), ExtractError> {
        let packages = self
            .repositories
            .get(url)
            .ok_or_else(|| ExtractError::CloneFailed {
                url: url.to_string(),
                message: "repository not found".to_string(),
            })?;

        let mut listing = String::new();
        for (import, dir) in packages {
            fs::create_dir_all(dest.join(dir)).unwrap();
            listing.push_str(&format!("{import}:{dir}\n"));
        }
        fs::write(dest.join(LISTING_FILE), listing).unwrap();
        Ok(())
    }
}

/// Lister that reads the fixture listing and resolves dirs against the root.
pub struct FixtureLister;

impl PackageLister for FixtureLister {
    async fn list_packages(
        &self,
        dir: &Path,
        _cancel: &CancellationToken,
    ) -> Result<Vec<ListedPackage>, ExtractError> {
        let listing = fs::read(dir.join(LISTING_FILE)).unwrap();
        Ok(govanity::parse_listing(&listing)?
            .into_iter()
            .map(|package| ListedPackage {
                dir: dir.join(package.dir),
                ..package
            })
            .collect())
    }
}

/// Relative paths of every file below `root`, sorted.
pub fn files_under(root: &Path) -> Vec<String> {
    let mut files = Vec::new();
    collect_files(root, root, &mut files);
    files.sort();
    files
}

fn collect_files(root: &Path, dir: &Path, files: &mut Vec<String>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries {
        let path = entry.unwrap().path();
        if path.is_dir() {
            collect_files(root, &path, files);
        } else {
            let relative = path.strip_prefix(root).unwrap();
            files.push(relative.to_string_lossy().replace('\\', "/"));
        }
    }
}
