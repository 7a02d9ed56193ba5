//! Working-tree change discovery

use std::collections::BTreeSet;
use std::path::Path;

use git2::{ErrorCode, Repository, Status, StatusOptions};
use mdlint_fs::NormalizedPath;

use crate::Result;

/// Statuses that make a file worth linting: added, modified, renamed or
/// retyped in the index, the working tree, or both. Untracked files show
/// up as `WT_NEW`.
const CHANGED: Status = Status::INDEX_NEW
    .union(Status::INDEX_MODIFIED)
    .union(Status::INDEX_RENAMED)
    .union(Status::INDEX_TYPECHANGE)
    .union(Status::WT_NEW)
    .union(Status::WT_MODIFIED)
    .union(Status::WT_RENAMED)
    .union(Status::WT_TYPECHANGE);

/// Files that no longer exist on disk cannot be linted.
const GONE: Status = Status::INDEX_DELETED.union(Status::WT_DELETED);

/// Open the non-bare repository containing `root`, if any.
fn open_worktree(root: &Path) -> Result<Option<Repository>> {
    match Repository::discover(root) {
        Ok(repo) if repo.is_bare() => Ok(None),
        Ok(repo) => Ok(Some(repo)),
        Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// List the changed markdown files under `root`.
///
/// Returns `Ok(None)` when `root` is not inside a git working tree so the
/// caller can fall back to enumerating the whole tree.
///
/// The union of staged changes, unstaged changes and untracked files that
/// are not ignored is returned, restricted to markdown files, expressed
/// relative to `root` and sorted. Files outside `root` (when `root` is a
/// subdirectory of the repository) are dropped, as are deleted files.
pub fn changed_markdown_files(root: &Path) -> Result<Option<Vec<NormalizedPath>>> {
    let Some(repo) = open_worktree(root)? else {
        tracing::debug!(root = %root.display(), "Not inside a git working tree");
        return Ok(None);
    };
    let Some(workdir) = repo.workdir() else {
        return Ok(None);
    };

    let mut opts = StatusOptions::new();
    opts.include_untracked(true)
        .recurse_untracked_dirs(true)
        .include_ignored(false)
        .exclude_submodules(true);

    let statuses = repo.statuses(Some(&mut opts))?;

    let mut files = BTreeSet::new();
    for entry in statuses.iter() {
        let status = entry.status();
        if !status.intersects(CHANGED) || status.intersects(GONE) {
            continue;
        }

        // Non UTF-8 paths cannot be handed to the linter reliably
        let Some(path) = entry.path() else {
            tracing::warn!("Skipping changed file with non UTF-8 path");
            continue;
        };

        let candidate = NormalizedPath::new(path);
        if !candidate.is_markdown() {
            continue;
        }

        match NormalizedPath::relative_to(&workdir.join(candidate.to_native()), root) {
            Some(relative) => {
                files.insert(relative);
            }
            None => {
                tracing::trace!(path = %candidate, "Changed file outside root");
            }
        }
    }

    tracing::debug!(count = files.len(), "Discovered changed markdown files");
    Ok(Some(files.into_iter().collect()))
}
