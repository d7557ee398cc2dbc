//! Matched packages and import prefix calculation.

use serde::Serialize;
use url::Url;

/// A package whose import comment matched the vanity prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VanityPackage {
    /// Declared import path (e.g. `pack.ag/tftp/netascii`).
    pub import_path: String,

    /// Clone URL of the repository the package was found in.
    pub repo_url: String,

    /// Number of directories the package sits below the repository root.
    pub depth: usize,
}

impl VanityPackage {
    /// Creates a new matched package.
    pub fn new(import_path: impl Into<String>, repo_url: impl Into<String>, depth: usize) -> Self {
        Self {
            import_path: import_path.into(),
            repo_url: repo_url.into(),
            depth,
        }
    }

    /// Returns the import path of the repository root.
    ///
    /// This is the path `go get` resolves to the whole repository, so nested
    /// packages share the `go-import` prefix of their repository. An empty
    /// string means the declared import path was malformed.
    pub fn import_prefix(&self) -> String {
        import_prefix(&self.import_path, self.depth)
    }
}

/// Drops the last `depth` segments of `import_path`.
///
/// Paths with a scheme (`https://host/a/b`) keep their scheme and authority
/// and only the URL path is trimmed. A `depth` larger than the number of
/// segments is clamped. Malformed paths yield an empty string.
pub fn import_prefix(import_path: &str, depth: usize) -> String {
    if has_scheme(import_path) {
        return url_import_prefix(import_path, depth).unwrap_or_default();
    }

    if !is_valid_plain_path(import_path) {
        return String::new();
    }

    let segments: Vec<&str> = import_path.split('/').collect();
    let keep = segments.len() - depth.min(segments.len());
    segments[..keep].join("/")
}

fn url_import_prefix(import_path: &str, depth: usize) -> Option<String> {
    let mut url = Url::parse(import_path).ok()?;
    let segments: Vec<String> = url.path_segments()?.map(str::to_owned).collect();
    let keep = segments.len() - depth.min(segments.len());
    let kept = &segments[..keep];

    url.set_path(&kept.join("/"));
    let mut prefix = url.to_string();
    if kept.is_empty() && prefix.ends_with('/') {
        prefix.pop();
    }
    Some(prefix)
}

/// Returns true if `path` starts with `scheme://` before its first `/`.
fn has_scheme(path: &str) -> bool {
    let Some((scheme, _)) = path.split_once("://") else {
        return false;
    };

    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Checks the structure of a scheme-less path.
///
/// Rejects control characters, whitespace, broken percent-escapes, and a
/// colon in the first segment, which would otherwise read as a scheme.
fn is_valid_plain_path(path: &str) -> bool {
    if path.chars().any(|c| c.is_control() || c.is_whitespace()) {
        return false;
    }

    let first_segment = path.split('/').next().unwrap_or_default();
    if first_segment.contains(':') {
        return false;
    }

    let bytes = path.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let escape = bytes.get(i + 1..i + 3);
            if !escape.is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit)) {
                return false;
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    true
}
