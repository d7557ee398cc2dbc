//! Run configuration.
//!
//! This module validates the raw prefix, search list, and output directory
//! and derives the values the rest of the run needs from them, such as the
//! host component written to `CNAME`.

mod error;
mod search;

pub use error::ConfigError;
pub use search::{parse_search_list, SearchEntry};

use std::path::{Path, PathBuf};
use url::Url;

/// Validated configuration for a single run.
#[derive(Debug, Clone)]
pub struct VanityConfig {
    /// Vanity import prefix matched against import comments (e.g. `pack.ag`).
    prefix: String,
    /// Host (and port, if any) of the prefix.
    prefix_host: String,
    /// Owners and explicit repositories to search.
    search: Vec<SearchEntry>,
    /// Base directory generated files are written to.
    out: PathBuf,
    /// GitHub token used to raise API rate limits.
    token: Option<String>,
    /// Whether to write a `CNAME` file next to the pages.
    write_cname: bool,
    /// Whether to report matches without writing anything.
    dry_run: bool,
    /// Maximum number of repositories processed at once.
    concurrency: usize,
}

impl VanityConfig {
    /// Creates a configuration from the required settings.
    ///
    /// `search` is the raw comma separated list of owners and `owner/repo`
    /// references.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the prefix, search list, or output directory
    /// is missing or malformed.
    pub fn new(prefix: &str, search: &str, out: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let prefix = prefix.trim();
        let prefix_host = parse_prefix_host(prefix)?;
        let search = parse_search_list(search)?;

        let out = out.into();
        if out.as_os_str().is_empty() {
            return Err(ConfigError::MissingOutput);
        }

        Ok(Self {
            prefix: prefix.to_string(),
            prefix_host,
            search,
            out,
            token: None,
            write_cname: false,
            dry_run: false,
            concurrency: 1,
        })
    }

    /// Sets the GitHub token. Empty tokens are treated as absent.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    /// Enables or disables writing the `CNAME` file.
    pub fn with_cname(mut self, write_cname: bool) -> Self {
        self.write_cname = write_cname;
        self
    }

    /// Enables or disables dry-run mode.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Sets how many repositories may be processed at once.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidConcurrency`] for zero.
    pub fn with_concurrency(mut self, concurrency: usize) -> Result<Self, ConfigError> {
        if concurrency == 0 {
            return Err(ConfigError::InvalidConcurrency { value: concurrency });
        }
        self.concurrency = concurrency;
        Ok(self)
    }

    /// Returns the vanity import prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the host of the prefix, including a non-default port.
    pub fn prefix_host(&self) -> &str {
        &self.prefix_host
    }

    /// Returns the parsed search entries.
    pub fn search(&self) -> &[SearchEntry] {
        &self.search
    }

    /// Returns the output base directory.
    pub fn out(&self) -> &Path {
        &self.out
    }

    /// Returns the GitHub token, if any.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Returns whether a `CNAME` file should be written.
    pub fn write_cname(&self) -> bool {
        self.write_cname
    }

    /// Returns whether dry-run mode is enabled.
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Returns the max number of repositories processed at once.
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }
}

/// Extracts the host from a scheme-less prefix such as `pack.ag/cmd`.
///
/// An explicit port is kept (`localhost:8080`), except 443, which the
/// `https` parse treats as the default.
fn parse_prefix_host(prefix: &str) -> Result<String, ConfigError> {
    if prefix.is_empty() {
        return Err(ConfigError::MissingPrefix);
    }

    let invalid = |message: &str| ConfigError::InvalidPrefix {
        prefix: prefix.to_string(),
        message: message.to_string(),
    };

    if prefix.contains("://") {
        return Err(invalid("prefix must not include a scheme"));
    }

    let url = Url::parse(&format!("https://{prefix}")).map_err(|e| invalid(&e.to_string()))?;
    let host = url
        .host_str()
        .filter(|host| !host.is_empty())
        .ok_or_else(|| invalid("prefix has no host component"))?;

    Ok(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_config_with_defaults() {
        let config = VanityConfig::new("pack.ag", "vcabbage/go-tftp, packag", "/tmp/site").unwrap();

        assert_eq!(config.prefix(), "pack.ag");
        assert_eq!(config.prefix_host(), "pack.ag");
        assert_eq!(config.search().len(), 2);
        assert_eq!(config.out(), Path::new("/tmp/site"));
        assert_eq!(config.token(), None);
        assert!(!config.write_cname());
        assert!(!config.dry_run());
        assert_eq!(config.concurrency(), 1);
    }

    #[test]
    fn prefix_host_ignores_path() {
        let config = VanityConfig::new("example.com/go", "alice", "out").unwrap();
        assert_eq!(config.prefix_host(), "example.com");
    }

    #[test]
    fn prefix_host_keeps_port() {
        let host = parse_prefix_host("localhost:8080/pkgs").unwrap();
        assert_eq!(host, "localhost:8080");

        let config = VanityConfig::new("pack.ag:8443", "alice", "out").unwrap();
        assert_eq!(config.prefix_host(), "pack.ag:8443");
    }

    #[test]
    fn rejects_missing_prefix() {
        let result = VanityConfig::new("  ", "alice", "out");
        assert!(matches!(result, Err(ConfigError::MissingPrefix)));
    }

    #[test]
    fn rejects_prefix_with_scheme() {
        let result = VanityConfig::new("https://pack.ag", "alice", "out");
        assert!(matches!(result, Err(ConfigError::InvalidPrefix { .. })));
    }

    #[test]
    fn rejects_unparsable_prefix() {
        let result = VanityConfig::new("bad host/x", "alice", "out");
        assert!(matches!(result, Err(ConfigError::InvalidPrefix { .. })));
    }

    #[test]
    fn rejects_empty_search() {
        let result = VanityConfig::new("pack.ag", " , ,", "out");
        assert!(matches!(result, Err(ConfigError::EmptySearch)));
    }

    #[test]
    fn rejects_missing_output() {
        let result = VanityConfig::new("pack.ag", "alice", "");
        assert!(matches!(result, Err(ConfigError::MissingOutput)));
    }

    #[test]
    fn empty_token_is_absent() {
        let config = VanityConfig::new("pack.ag", "alice", "out")
            .unwrap()
            .with_token(Some(String::new()));
        assert_eq!(config.token(), None);

        let config = config.with_token(Some("ghp_abc".to_string()));
        assert_eq!(config.token(), Some("ghp_abc"));
    }

    #[test]
    fn rejects_zero_concurrency() {
        let result = VanityConfig::new("pack.ag", "alice", "out")
            .unwrap()
            .with_concurrency(0);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidConcurrency { value: 0 })
        ));
    }
}
