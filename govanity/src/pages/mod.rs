//! Output file writing.
//!
//! One HTML page is written per matched package, at a path mirroring the
//! package's import path below the vanity prefix. An optional `CNAME` file
//! lets GitHub Pages serve the output under the prefix's host.

mod error;

pub use error::PageError;

use crate::package::VanityPackage;
use crate::templates::TemplateRenderer;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// Extension appended to every page path.
pub const PAGE_EXTENSION: &str = ".html";

/// Page written for a package whose import path equals the prefix.
pub const INDEX_PAGE: &str = "index.html";

/// Name of the GitHub Pages custom domain file.
pub const CNAME_FILE: &str = "CNAME";

/// Outcome of writing all pages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageReport {
    /// Paths of pages written successfully.
    pub written: Vec<PathBuf>,

    /// Number of pages that could not be written.
    pub failed: usize,
}

/// Computes the page path for an import path.
///
/// The prefix is stripped from the front of `import_path`, the remainder is
/// joined onto `out`, and `.html` is appended, so `example.com/repo/sub`
/// under prefix `example.com` becomes `<out>/repo/sub.html`.
///
/// # Errors
///
/// Returns [`PageError::UnsafePath`] if the remainder contains `..`.
pub fn page_path(prefix: &str, import_path: &str, out: &Path) -> Result<PathBuf, PageError> {
    let relative = import_path
        .strip_prefix(prefix)
        .unwrap_or(import_path)
        .trim_start_matches('/');

    if relative.is_empty() {
        return Ok(out.join(INDEX_PAGE));
    }

    if relative.split('/').any(|segment| segment == "..") {
        return Err(PageError::UnsafePath {
            import_path: import_path.to_string(),
        });
    }

    let mut path = out.join(relative).into_os_string();
    path.push(PAGE_EXTENSION);
    Ok(PathBuf::from(path))
}

/// Renders and writes the page for a single package.
///
/// Existing files are overwritten and missing parent directories created.
///
/// # Errors
///
/// Returns [`PageError`] if the import prefix is unusable, the path is
/// unsafe, rendering fails, or the file cannot be written.
pub async fn write_page(
    package: &VanityPackage,
    prefix: &str,
    out: &Path,
    renderer: &TemplateRenderer,
) -> Result<PathBuf, PageError> {
    let import_prefix = package.import_prefix();
    if import_prefix.is_empty() {
        return Err(PageError::UnusableImportPrefix {
            import_path: package.import_path.clone(),
        });
    }

    let path = page_path(prefix, &package.import_path, out)?;
    let html = renderer.render_page(&import_prefix, package)?;

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|source| PageError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
    }

    tokio::fs::write(&path, html)
        .await
        .map_err(|source| PageError::Io {
            path: path.clone(),
            source,
        })?;

    debug!(path = %path.display(), import_prefix = %import_prefix, "Wrote page");
    Ok(path)
}

/// Writes pages for all packages.
///
/// A failure for one package is logged and counted; the remaining pages are
/// still written.
pub async fn write_pages(
    packages: &[VanityPackage],
    prefix: &str,
    out: &Path,
    renderer: &TemplateRenderer,
) -> PageReport {
    let mut report = PageReport::default();

    for package in packages {
        match write_page(package, prefix, out, renderer).await {
            Ok(path) => report.written.push(path),
            Err(e) => {
                error!(import = %package.import_path, error = %e, "Failed to write page");
                report.failed += 1;
            }
        }
    }

    info!(
        written = report.written.len(),
        failed = report.failed,
        "Pages written"
    );
    report
}

/// Writes `<out>/CNAME` containing `host` and a trailing newline.
///
/// # Errors
///
/// Returns [`PageError::Io`] if the directory or file cannot be written.
pub async fn write_cname(out: &Path, host: &str) -> Result<PathBuf, PageError> {
    tokio::fs::create_dir_all(out)
        .await
        .map_err(|source| PageError::Io {
            path: out.to_path_buf(),
            source,
        })?;

    let path = out.join(CNAME_FILE);
    tokio::fs::write(&path, format!("{host}\n"))
        .await
        .map_err(|source| PageError::Io {
            path: path.clone(),
            source,
        })?;

    info!(path = %path.display(), host, "Wrote CNAME");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn renderer() -> TemplateRenderer {
        TemplateRenderer::new().unwrap()
    }

    #[test]
    fn strips_prefix_and_appends_extension() {
        let path = page_path("example.com", "example.com/repo/sub", Path::new("/out")).unwrap();
        assert_eq!(path, PathBuf::from("/out/repo/sub.html"));
    }

    #[test]
    fn keeps_dots_in_last_segment() {
        let path = page_path("pack.ag", "pack.ag/amqp.v1", Path::new("out")).unwrap();
        assert_eq!(path, PathBuf::from("out/amqp.v1.html"));
    }

    #[test]
    fn prefix_package_becomes_index() {
        let path = page_path("pack.ag", "pack.ag", Path::new("out")).unwrap();
        assert_eq!(path, PathBuf::from("out/index.html"));
    }

    #[test]
    fn rejects_parent_segments() {
        let result = page_path("pack.ag", "pack.ag/../../etc/passwd", Path::new("out"));
        assert!(matches!(result, Err(PageError::UnsafePath { .. })));
    }

    #[tokio::test]
    async fn writes_page_and_creates_directories() {
        let temp = TempDir::new().unwrap();
        let package = VanityPackage::new(
            "pack.ag/tftp/netascii",
            "https://github.com/vcabbage/go-tftp",
            1,
        );

        let path = write_page(&package, "pack.ag", temp.path(), &renderer())
            .await
            .unwrap();

        assert_eq!(path, temp.path().join("tftp/netascii.html"));
        let html = fs::read_to_string(&path).unwrap();
        assert!(html.contains("content=\"pack.ag/tftp git https://github.com/vcabbage/go-tftp\""));
    }

    #[tokio::test]
    async fn overwrites_existing_page() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("tftp.html"), "stale").unwrap();
        let package = VanityPackage::new("pack.ag/tftp", "https://github.com/vcabbage/go-tftp", 0);

        write_page(&package, "pack.ag", temp.path(), &renderer())
            .await
            .unwrap();

        let html = fs::read_to_string(temp.path().join("tftp.html")).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
    }

    #[tokio::test]
    async fn continues_after_failed_page() {
        let temp = TempDir::new().unwrap();
        let packages = vec![
            VanityPackage::new("pack.ag/bad%zz", "https://github.com/a/bad", 0),
            VanityPackage::new("pack.ag/good", "https://github.com/a/good", 0),
        ];

        let report = write_pages(&packages, "pack.ag", temp.path(), &renderer()).await;

        assert_eq!(report.failed, 1);
        assert_eq!(report.written, vec![temp.path().join("good.html")]);
    }

    #[tokio::test]
    async fn writes_cname_with_newline() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("site");

        let path = write_cname(&out, "pack.ag").await.unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), "pack.ag\n");
    }
}
