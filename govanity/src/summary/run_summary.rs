//! Run summary types.

use super::result::RepositoryResult;
use crate::pages::PageReport;

/// Summary of a complete run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Number of repositories discovered.
    pub repositories_discovered: usize,

    /// Number of repositories extracted successfully.
    pub repositories_extracted: usize,

    /// Number of repositories that failed to clone or list.
    pub repositories_failed: usize,

    /// Number of packages matching the prefix.
    pub packages_matched: usize,

    /// Number of pages written.
    pub pages_written: usize,

    /// Number of pages that failed to write.
    pub pages_failed: usize,

    /// Whether a CNAME file was written.
    pub cname_written: bool,

    /// Whether this was a dry run.
    pub dry_run: bool,
}

impl RunSummary {
    /// Creates a new empty summary.
    #[must_use]
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Default::default()
        }
    }

    /// Updates the summary with a repository result.
    pub fn record_result(&mut self, result: &RepositoryResult) {
        match result {
            RepositoryResult::Extracted { packages, .. } => {
                self.repositories_extracted += 1;
                self.packages_matched += packages;
            }
            RepositoryResult::Failed { .. } => self.repositories_failed += 1,
        }
    }

    /// Updates the summary with the outcome of writing pages.
    pub fn record_pages(&mut self, report: &PageReport) {
        self.pages_written += report.written.len();
        self.pages_failed += report.failed;
    }

    /// Returns true if any repository or page failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.repositories_failed > 0 || self.pages_failed > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn can_record_results() {
        let mut summary = RunSummary::new(false);

        summary.record_result(&RepositoryResult::Extracted {
            repository: "https://github.com/vcabbage/go-tftp".to_string(),
            packages: 3,
        });
        summary.record_result(&RepositoryResult::Failed {
            repository: "https://github.com/nobody/missing".to_string(),
            error: "repository not found".to_string(),
        });

        assert_eq!(summary.repositories_extracted, 1);
        assert_eq!(summary.repositories_failed, 1);
        assert_eq!(summary.packages_matched, 3);
        assert!(summary.has_failures());
    }

    #[test]
    fn can_record_pages() {
        let mut summary = RunSummary::new(false);

        summary.record_pages(&PageReport {
            written: vec![PathBuf::from("out/tftp.html")],
            failed: 0,
        });

        assert_eq!(summary.pages_written, 1);
        assert!(!summary.has_failures());
    }
}
