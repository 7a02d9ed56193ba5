//! Error types for mdlint-git

/// Result type for mdlint-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in mdlint-git operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),
}
