//! Per-repository result types.

/// Result of processing a single repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryResult {
    /// Packages were extracted.
    Extracted {
        /// Repository clone URL.
        repository: String,
        /// Number of packages matching the prefix.
        packages: usize,
    },

    /// Extraction failed.
    Failed {
        /// Repository clone URL.
        repository: String,
        /// Error message.
        error: String,
    },
}
