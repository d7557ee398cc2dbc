//! Discovered repository information.

/// A repository selected for package extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredRepository {
    /// Repository owner (user or organization).
    pub owner: String,

    /// Repository name.
    pub name: String,

    /// Full repository name in "owner/name" format.
    pub full_name: String,

    /// URL passed to `git clone`.
    pub clone_url: String,
}

impl DiscoveredRepository {
    /// Creates a repository reference for an explicit `owner/name` entry.
    pub fn github(owner: &str, name: &str) -> Self {
        Self {
            owner: owner.to_string(),
            name: name.to_string(),
            full_name: format!("{owner}/{name}"),
            clone_url: format!("https://github.com/{owner}/{name}"),
        }
    }
}

/// A repository as listed for an owner, before language filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerRepository {
    /// Repository name.
    pub name: String,

    /// Whether the repository is a fork.
    pub fork: bool,

    /// Primary language reported by GitHub.
    pub language: Option<String>,

    /// URL passed to `git clone`.
    pub clone_url: String,
}
