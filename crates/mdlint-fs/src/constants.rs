//! Constants shared by path filtering and tree enumeration.

/// File extensions treated as markdown (compared case-insensitively).
pub const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];

/// Directory names never descended into when enumerating the tree.
///
/// Matched against every path segment, so a nested `docs/node_modules`
/// is skipped as well as the top-level one.
pub const EXCLUDED_DIRS: &[&str] = &["node_modules", "dist", ".git"];

/// Returns `true` if `name` is one of [`EXCLUDED_DIRS`].
pub fn is_excluded_dir(name: &str) -> bool {
    EXCLUDED_DIRS.contains(&name)
}
