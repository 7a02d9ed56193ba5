//! Server configuration

use std::path::{Path, PathBuf};

use mdlint_core::LinterSettings;

/// Everything the server needs to know at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Working tree that tools operate on; every subprocess runs here
    pub root: PathBuf,
    pub linter: LinterSettings,
}

impl ServerConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            linter: LinterSettings::default(),
        }
    }

    pub fn with_linter(mut self, linter: LinterSettings) -> Self {
        self.linter = linter;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}
