//! Lint adapter over the external markdownlint-cli2 process

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

use crate::issue::LintIssue;
use crate::parser::parse_output;
use crate::prerequisites::{PrerequisiteError, Prerequisites, check_prerequisites};
use crate::process::{Invocation, ProcessRunner};
use crate::settings::LinterSettings;

/// Fallback error text when the linter fails without printing anything.
pub const UNKNOWN_LINT_ERROR: &str = "Unknown markdownlint error";

/// Outcome of one lint pass.
///
/// `success` is true only for a clean exit with no issues. A failure with
/// no issues and an `error` is a tooling failure, not a finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LintResult {
    pub success: bool,
    pub issues: Vec<LintIssue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LintResult {
    pub fn clean() -> Self {
        Self {
            success: true,
            issues: Vec::new(),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            issues: Vec::new(),
            error: Some(error.into()),
        }
    }

    fn with_issues(issues: Vec<LintIssue>) -> Self {
        Self {
            success: false,
            issues,
            error: None,
        }
    }
}

/// Runs markdownlint-cli2 over files relative to a root directory.
#[derive(Clone)]
pub struct Linter {
    pub(crate) runner: Arc<dyn ProcessRunner>,
    settings: LinterSettings,
    root: PathBuf,
}

impl Linter {
    pub fn new(
        runner: Arc<dyn ProcessRunner>,
        settings: LinterSettings,
        root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            runner,
            settings,
            root: root.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn settings(&self) -> &LinterSettings {
        &self.settings
    }

    /// Probe the launcher.
    pub async fn check_prerequisites(&self) -> Result<Prerequisites, PrerequisiteError> {
        check_prerequisites(self.runner.as_ref(), &self.settings, &self.root).await
    }

    /// Lint `files`.
    ///
    /// An empty list is trivially clean and spawns nothing. Otherwise the
    /// launcher is probed first and its failure is returned as the result's
    /// `error`.
    pub async fn lint(&self, files: &[String]) -> LintResult {
        if files.is_empty() {
            return LintResult::clean();
        }

        if let Err(e) = self.check_prerequisites().await {
            return LintResult::failed(e.to_string());
        }

        self.run_check(files).await
    }

    /// One linter invocation without the prerequisite probe.
    pub(crate) async fn run_check(&self, files: &[String]) -> LintResult {
        let output = self.runner.run(&self.invocation(files, false)).await;

        if output.success() {
            tracing::debug!(files = files.len(), "Lint clean");
            return LintResult::clean();
        }

        // markdownlint-cli2 reports diagnostics on stderr; read both streams
        let combined = format!("{}\n{}", output.stderr, output.stdout);
        let issues = parse_output(&combined);

        if !issues.is_empty() {
            tracing::debug!(files = files.len(), issues = issues.len(), "Lint found issues");
            return LintResult::with_issues(issues);
        }

        let error = [output.stderr.trim(), output.stdout.trim()]
            .into_iter()
            .find(|text| !text.is_empty())
            .unwrap_or(UNKNOWN_LINT_ERROR)
            .to_string();
        tracing::warn!(exit_code = output.exit_code, %error, "Linter failed without diagnostics");
        LintResult::failed(error)
    }

    pub(crate) fn invocation(&self, files: &[String], fix: bool) -> Invocation {
        let mut invocation = Invocation::new(&self.settings.launcher).arg(&self.settings.package);
        if fix {
            invocation = invocation.arg("--fix");
        }
        invocation
            .args(files.iter().cloned())
            .current_dir(&self.root)
            .timeout(self.settings.timeout)
    }
}

impl std::fmt::Debug for Linter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Linter")
            .field("settings", &self.settings)
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}
