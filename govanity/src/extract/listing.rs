//! Package metadata listing.

use super::process::{run, stderr_message};
use super::ExtractError;
use bstr::ByteSlice;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// A package reported by a [`PackageLister`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedPackage {
    /// Declared import path from the import comment, empty if there is none.
    pub import_path: String,

    /// Absolute source directory of the package.
    pub dir: PathBuf,
}

/// Lists the packages contained in a checkout.
#[allow(async_fn_in_trait)]
pub trait PackageLister {
    /// Lists every package below `dir`.
    async fn list_packages(
        &self,
        dir: &Path,
        cancel: &CancellationToken,
    ) -> Result<Vec<ListedPackage>, ExtractError>;
}

/// Lists packages with `go list`.
#[derive(Debug, Clone, Default)]
pub struct GoListLister;

/// Template passed to `go list -f`.
const GO_LIST_FORMAT: &str = "-f={{.ImportComment}}:{{.Dir}}";

impl PackageLister for GoListLister {
    async fn list_packages(
        &self,
        dir: &Path,
        cancel: &CancellationToken,
    ) -> Result<Vec<ListedPackage>, ExtractError> {
        debug!(dir = %dir.display(), "Listing packages");

        let mut command = Command::new("go");
        command
            .args(["list", GO_LIST_FORMAT, "./..."])
            .current_dir(dir);

        let output = run("go", command, cancel).await?;
        if !output.status.success() {
            return Err(ExtractError::ListFailed {
                message: stderr_message(&output),
            });
        }

        parse_listing(&output.stdout)
    }
}

/// Parses `importPath:dir` lines.
///
/// The split happens at the first `:`, so directories may contain colons
/// (Windows drive letters). Blank lines are ignored.
///
/// # Errors
///
/// Returns [`ExtractError::MalformedListing`] for a line without a separator
/// or with a non UTF-8 import path.
pub fn parse_listing(output: &[u8]) -> Result<Vec<ListedPackage>, ExtractError> {
    let mut packages = Vec::new();

    for line in output.lines() {
        if line.trim().is_empty() {
            continue;
        }

        let malformed = || ExtractError::MalformedListing {
            line: line.to_str_lossy().into_owned(),
        };

        let (import_path, dir) = line.split_once_str(":").ok_or_else(malformed)?;
        let import_path = import_path.to_str().map_err(|_| malformed())?;
        let dir = dir.to_path().map_err(|_| malformed())?;

        packages.push(ListedPackage {
            import_path: import_path.trim().to_string(),
            dir: dir.to_path_buf(),
        });
    }

    Ok(packages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_import_comments_and_dirs() {
        let output = b"pack.ag/tftp:/tmp/govanity123\n:/tmp/govanity123/cmd/tftpd\npack.ag/tftp/netascii:/tmp/govanity123/netascii\n";

        let packages = parse_listing(output).unwrap();

        assert_eq!(
            packages,
            vec![
                ListedPackage {
                    import_path: "pack.ag/tftp".to_string(),
                    dir: PathBuf::from("/tmp/govanity123"),
                },
                ListedPackage {
                    import_path: String::new(),
                    dir: PathBuf::from("/tmp/govanity123/cmd/tftpd"),
                },
                ListedPackage {
                    import_path: "pack.ag/tftp/netascii".to_string(),
                    dir: PathBuf::from("/tmp/govanity123/netascii"),
                },
            ]
        );
    }

    #[test]
    fn splits_at_first_colon_only() {
        let packages = parse_listing(b"example.com/x:C:\\src\\x\r\n").unwrap();

        assert_eq!(packages[0].import_path, "example.com/x");
        assert_eq!(packages[0].dir, PathBuf::from("C:\\src\\x"));
    }

    #[test]
    fn ignores_blank_lines() {
        let packages = parse_listing(b"\n\n").unwrap();
        assert!(packages.is_empty());
    }

    #[test]
    fn rejects_line_without_separator() {
        let result = parse_listing(b"pack.ag/tftp\n");
        assert!(matches!(result, Err(ExtractError::MalformedListing { .. })));
    }
}
