//! Normalized path handling for cross-platform compatibility

use std::path::{Path, PathBuf};

use crate::constants::MARKDOWN_EXTENSIONS;

/// A path normalized to use forward slashes internally.
///
/// Linter output, git status entries and directory walks all report paths
/// in slightly different shapes. Everything that crosses the tool boundary
/// goes through this type so that the same file always produces the same
/// string (and therefore the same declined-issue key).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    ///
    /// Converts backslashes to forward slashes and drops leading `./`
    /// segments, so `./docs\guide.md` becomes `docs/guide.md`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        let mut normalized = path_str.replace('\\', "/");
        while normalized.starts_with("./") {
            normalized.drain(..2);
        }
        Self { inner: normalized }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        let trimmed = self.inner.trim_end_matches('/');
        trimmed.rsplit('/').next().filter(|name| !name.is_empty())
    }

    /// Get the extension if present.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 {
                None
            } else {
                Some(&name[idx + 1..])
            }
        })
    }

    /// Whether the path carries one of the markdown extensions.
    pub fn is_markdown(&self) -> bool {
        self.extension().is_some_and(|ext| {
            MARKDOWN_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
    }

    /// Express `path` relative to `base`.
    ///
    /// Both sides are canonicalized when possible so that symlinked temp
    /// directories and `\\?\` prefixes do not defeat the prefix match.
    /// Returns `None` when `path` is not inside `base`.
    pub fn relative_to(path: &Path, base: &Path) -> Option<Self> {
        let path = dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        let base = dunce::canonicalize(base).unwrap_or_else(|_| base.to_path_buf());
        path.strip_prefix(&base).ok().map(Self::new)
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}

impl From<NormalizedPath> for String {
    fn from(p: NormalizedPath) -> Self {
        p.inner
    }
}
