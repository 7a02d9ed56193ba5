//! Error types for mdlint-core

/// Result type for mdlint-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in mdlint-core operations
///
/// Lint and fix outcomes are reported through [`crate::LintResult`] and
/// [`crate::FixResult`]; these errors cover the surrounding plumbing
/// (file discovery, config writes).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] mdlint_fs::Error),

    #[error("Git error: {0}")]
    Git(#[from] mdlint_git::Error),

    #[error("Background task failed: {0}")]
    Task(String),
}

impl From<tokio::task::JoinError> for Error {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Task(err.to_string())
    }
}
