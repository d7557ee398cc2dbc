//! Search list parsing.

use super::ConfigError;
use std::fmt;

/// One entry of the search list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SearchEntry {
    /// A user or organization whose repositories are scanned.
    Owner(String),

    /// A single repository included unconditionally.
    Repository {
        /// Repository owner.
        owner: String,
        /// Repository name.
        name: String,
    },
}

impl SearchEntry {
    /// Parses a single trimmed, non-empty entry.
    fn parse(entry: &str) -> Result<Self, ConfigError> {
        let Some((owner, name)) = entry.split_once('/') else {
            return Ok(Self::Owner(entry.to_string()));
        };

        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(ConfigError::InvalidSearchEntry {
                entry: entry.to_string(),
            });
        }

        Ok(Self::Repository {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

impl fmt::Display for SearchEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Owner(owner) => f.write_str(owner),
            Self::Repository { owner, name } => write!(f, "{owner}/{name}"),
        }
    }
}

/// Splits a comma separated search list into entries.
///
/// Whitespace around entries is trimmed and empty entries are dropped.
///
/// # Errors
///
/// Returns [`ConfigError::EmptySearch`] if no entries remain, or
/// [`ConfigError::InvalidSearchEntry`] for a malformed `owner/repo` entry.
pub fn parse_search_list(search: &str) -> Result<Vec<SearchEntry>, ConfigError> {
    let entries = search
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(SearchEntry::parse)
        .collect::<Result<Vec<_>, _>>()?;

    if entries.is_empty() {
        return Err(ConfigError::EmptySearch);
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_owners_and_repositories() {
        let entries = parse_search_list("vcabbage/go-tftp, packag ,,").unwrap();

        assert_eq!(
            entries,
            vec![
                SearchEntry::Repository {
                    owner: "vcabbage".to_string(),
                    name: "go-tftp".to_string(),
                },
                SearchEntry::Owner("packag".to_string()),
            ]
        );
    }

    #[test]
    fn display_round_trips_full_name() {
        let entries = parse_search_list("alice,bob/explicit-repo").unwrap();
        let rendered: Vec<String> = entries.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["alice", "bob/explicit-repo"]);
    }

    #[test]
    fn rejects_malformed_repository() {
        for entry in ["/repo", "owner/", "a/b/c"] {
            let result = parse_search_list(entry);
            assert!(
                matches!(result, Err(ConfigError::InvalidSearchEntry { .. })),
                "{entry} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_blank_list() {
        assert!(matches!(
            parse_search_list(""),
            Err(ConfigError::EmptySearch)
        ));
    }
}
