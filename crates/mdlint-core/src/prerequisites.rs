//! Launcher availability check
//!
//! Every lint and fix entry point runs this first and stops with the
//! installation guidance when the launcher cannot be invoked.

use std::path::Path;

use crate::process::{Invocation, ProcessRunner};
use crate::settings::LinterSettings;

/// Installation hints shown when the launcher is missing.
pub const INSTALLATION_GUIDE: &str = "\
To use this plugin, you need Node.js installed:
- Download from https://nodejs.org/
- Or use a version manager like nvm: https://github.com/nvm-sh/nvm
- macOS: brew install node
- Ubuntu/Debian: apt install nodejs npm
- Windows: Download installer from nodejs.org";

/// The launcher could not be invoked.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{missing} is not available. {installation_guide}")]
pub struct PrerequisiteError {
    /// The program that failed the probe
    pub missing: String,
    pub installation_guide: String,
}

impl PrerequisiteError {
    pub fn new(missing: impl Into<String>) -> Self {
        Self {
            missing: missing.into(),
            installation_guide: INSTALLATION_GUIDE.to_string(),
        }
    }
}

/// A successful probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prerequisites {
    /// Trimmed output of `<launcher> --version`
    pub npx_version: String,
}

/// Probe the launcher with `--version`.
pub async fn check_prerequisites(
    runner: &dyn ProcessRunner,
    settings: &LinterSettings,
    cwd: &Path,
) -> Result<Prerequisites, PrerequisiteError> {
    let invocation = Invocation::new(&settings.launcher)
        .arg("--version")
        .current_dir(cwd);
    let output = runner.run(&invocation).await;

    if !output.success() {
        tracing::warn!(
            launcher = %settings.launcher,
            exit_code = output.exit_code,
            "Launcher prerequisite check failed"
        );
        return Err(PrerequisiteError::new(&settings.launcher));
    }

    Ok(Prerequisites {
        npx_version: output.stdout.trim().to_string(),
    })
}
