//! Git repository fixtures.

use std::path::Path;

/// Initialises a real git repository using `git2` (no commits).
///
/// # Panics
/// Panics if `git2::Repository::init` fails.
pub fn real_git_repo(path: &Path) -> git2::Repository {
    git2::Repository::init(path).unwrap_or_else(|e| {
        panic!(
            "real_git_repo: failed to init repository at {}: {e}",
            path.display()
        )
    })
}

/// Stages every non-ignored file and commits it on `HEAD`.
///
/// # Panics
/// Panics if any git operation fails.
pub fn commit_all(repo: &git2::Repository, message: &str) -> git2::Oid {
    let mut index = repo.index().expect("commit_all: failed to open index");
    index
        .add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)
        .expect("commit_all: failed to stage files");
    index.write().expect("commit_all: failed to write index");
    let tree_id = index.write_tree().expect("commit_all: failed to write tree");
    let tree = repo.find_tree(tree_id).expect("commit_all: missing tree");
    let sig = git2::Signature::now("Test User", "test@example.com")
        .expect("commit_all: failed to build signature");

    let parent = repo.head().ok().and_then(|head| head.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .expect("commit_all: failed to commit")
}

/// Stages a single path (relative to the worktree root).
///
/// # Panics
/// Panics if the path cannot be staged.
pub fn stage(repo: &git2::Repository, path: &str) {
    let mut index = repo.index().expect("stage: failed to open index");
    index
        .add_path(Path::new(path))
        .unwrap_or_else(|e| panic!("stage: failed to add {path}: {e}"));
    index.write().expect("stage: failed to write index");
}
