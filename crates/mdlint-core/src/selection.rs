//! Which files a lint or fix call operates on

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Discovery mode used when no explicit files are given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Staged, unstaged and untracked markdown files; all files outside a repository
    #[default]
    Changed,
    /// Every markdown file under the root
    All,
    /// Only the explicit file list; behaves as `All` when none is given
    File,
}

/// Resolve the file list for a call.
///
/// A non-empty `explicit` list is returned verbatim. Discovery runs on the
/// blocking pool since both git status and the tree walk hit the disk.
pub async fn resolve_files(
    root: &Path,
    explicit: Option<Vec<String>>,
    scope: Scope,
) -> Result<Vec<String>> {
    if let Some(files) = explicit
        && !files.is_empty()
    {
        return Ok(files);
    }

    let root: PathBuf = root.to_path_buf();
    tokio::task::spawn_blocking(move || discover(&root, scope)).await?
}

fn discover(root: &Path, scope: Scope) -> Result<Vec<String>> {
    let files = match scope {
        Scope::Changed => match mdlint_git::changed_markdown_files(root)? {
            Some(files) => files,
            None => {
                tracing::debug!(root = %root.display(), "Not a git worktree, linting all files");
                mdlint_fs::markdown_files(root)?
            }
        },
        Scope::All | Scope::File => mdlint_fs::markdown_files(root)?,
    };

    tracing::debug!(?scope, count = files.len(), "Resolved markdown files");
    Ok(files.into_iter().map(String::from).collect())
}
