//! Linter invocation settings

use std::time::Duration;

/// Default timeout for lint and fix invocations.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// How the external linter is launched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinterSettings {
    /// Launcher program, probed by the prerequisite check (`npx`)
    pub launcher: String,
    /// Linter package passed as the launcher's first argument
    pub package: String,
    /// Upper bound for a single lint or fix invocation
    pub timeout: Duration,
}

impl Default for LinterSettings {
    fn default() -> Self {
        Self {
            launcher: "npx".to_string(),
            package: "markdownlint-cli2".to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl LinterSettings {
    pub fn with_launcher(mut self, launcher: impl Into<String>) -> Self {
        self.launcher = launcher.into();
        self
    }

    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = package.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
