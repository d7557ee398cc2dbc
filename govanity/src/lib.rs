#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod config;
pub mod discovery;
pub mod extract;
pub mod package;
pub mod pages;
pub mod rate_limit;
pub mod runner;
pub mod summary;
pub mod templates;

pub use config::{parse_search_list, ConfigError, SearchEntry, VanityConfig};
pub use discovery::{
    discover_repositories, DiscoveredRepository, DiscoveryError, OwnerRepository,
    RepositorySource, TARGET_LANGUAGE,
};
pub use extract::{
    extract_packages, package_depth, parse_listing, ExtractError, GitFetcher, GoListLister,
    ListedPackage, PackageLister, RepositoryFetcher,
};
pub use package::{import_prefix, VanityPackage};
pub use pages::{page_path, write_cname, write_page, write_pages, PageError, PageReport};
pub use rate_limit::{check_core_rate_limit, report_core_rate_limit, RateLimitInfo};
pub use runner::{Runner, RunnerError};
pub use summary::{RepositoryResult, RunSummary};
pub use templates::{create_handlebars_registry, TemplateError, TemplateRenderer};
