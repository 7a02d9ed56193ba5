//! [`MarkdownWorkspace`] builder for lint and fix scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::git;

/// A temporary directory of markdown files with setup and assertion helpers.
///
/// # Example
///
/// ```rust,no_run
/// use mdlint_test_utils::MarkdownWorkspace;
///
/// let ws = MarkdownWorkspace::new();
/// ws.write("README.md", "# Title   \n\n### Skipped level\n");
/// ws.assert_file_contains("README.md", "Skipped level");
/// ```
pub struct MarkdownWorkspace {
    temp_dir: TempDir,
}

impl Default for MarkdownWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownWorkspace {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("MarkdownWorkspace::new: failed to create temp dir"),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `rel` inside the workspace.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.root().join(rel)
    }

    /// Write `content` to `rel`, creating parent directories.
    pub fn write(&self, rel: &str, content: &str) -> &Self {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .unwrap_or_else(|e| panic!("write: failed to create {}: {e}", parent.display()));
        }
        fs::write(&path, content)
            .unwrap_or_else(|e| panic!("write: failed to write {}: {e}", path.display()));
        self
    }

    /// Read `rel` as text.
    pub fn read(&self, rel: &str) -> String {
        let path = self.path(rel);
        fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("read: failed to read {}: {e}", path.display()))
    }

    /// Initialise the workspace as a git repository.
    pub fn init_git(&self) -> git2::Repository {
        git::real_git_repo(self.root())
    }

    /// Assert that `rel` exists.
    pub fn assert_file_exists(&self, rel: &str) {
        let path = self.path(rel);
        assert!(path.exists(), "Expected file to exist: {}", path.display());
    }

    /// Assert that `rel` does **not** exist.
    pub fn assert_file_not_exists(&self, rel: &str) {
        let path = self.path(rel);
        assert!(!path.exists(), "Expected file NOT to exist: {}", path.display());
    }

    /// Assert that the file at `rel` contains `content`.
    pub fn assert_file_contains(&self, rel: &str, content: &str) {
        let actual = self.read(rel);
        assert!(
            actual.contains(content),
            "File {} does not contain expected content.\nExpected: {}\nActual: {}",
            rel,
            content,
            actual
        );
    }
}
