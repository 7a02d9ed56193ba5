//! Markdown tree enumeration

use std::collections::BTreeSet;
use std::path::Path;

use walkdir::{DirEntry, WalkDir};

use crate::constants::is_excluded_dir;
use crate::{Error, NormalizedPath, Result};

/// Recursively list the markdown files under `root`.
///
/// Paths are relative to `root`, forward-slashed, sorted and unique.
/// Directories named in [`crate::EXCLUDED_DIRS`] are pruned at any depth.
/// Entries that cannot be read (permission errors, dangling links) are
/// skipped with a warning; only a failure to read `root` itself is an error.
pub fn markdown_files(root: &Path) -> Result<Vec<NormalizedPath>> {
    if !root.is_dir() {
        return Err(Error::Walk {
            path: root.to_path_buf(),
            message: "not a directory".to_string(),
        });
    }

    let mut files = BTreeSet::new();
    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| !is_pruned(entry));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                return Err(Error::Walk {
                    path: root.to_path_buf(),
                    message: e.to_string(),
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, "Skipping unreadable entry");
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        let relative = NormalizedPath::new(relative);
        if relative.is_markdown() {
            files.insert(relative);
        }
    }

    tracing::debug!(root = %root.display(), count = files.len(), "Enumerated markdown files");
    Ok(files.into_iter().collect())
}

fn is_pruned(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry.file_name().to_str().is_some_and(is_excluded_dir)
}
