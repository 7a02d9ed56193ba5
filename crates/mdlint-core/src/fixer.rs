//! Fix orchestration: baseline lint, `--fix`, verifying re-lint

use serde::Serialize;

use crate::issue::LintIssue;
use crate::linter::Linter;

/// Outcome of a fix pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FixResult {
    pub success: bool,
    /// Baseline issue count minus post-fix issue count, unclamped
    pub fixed_count: i64,
    pub remaining_issues: Vec<LintIssue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FixResult {
    fn nothing_to_fix() -> Self {
        Self {
            success: true,
            fixed_count: 0,
            remaining_issues: Vec::new(),
            error: None,
        }
    }

    fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            fixed_count: 0,
            remaining_issues: Vec::new(),
            error: Some(error.into()),
        }
    }
}

impl Linter {
    /// Run the linter's fix mode over `files` and report what changed.
    ///
    /// The fix invocation's own exit code is ignored; the re-lint that
    /// follows decides `remaining_issues`. Only a failed prerequisite check
    /// makes the result unsuccessful.
    pub async fn fix(&self, files: &[String]) -> FixResult {
        if files.is_empty() {
            return FixResult::nothing_to_fix();
        }

        if let Err(e) = self.check_prerequisites().await {
            return FixResult::failed(e.to_string());
        }

        let before = self.run_check(files).await;
        if let Some(error) = &before.error {
            tracing::warn!(%error, "Baseline lint failed before fix");
        }

        let output = self.runner.run(&self.invocation(files, true)).await;
        tracing::debug!(
            files = files.len(),
            exit_code = output.exit_code,
            "Fix mode finished"
        );

        let after = self.run_check(files).await;
        if let Some(error) = &after.error {
            tracing::warn!(%error, "Re-lint failed after fix");
        }

        let fixed_count = before.issues.len() as i64 - after.issues.len() as i64;
        tracing::debug!(
            before = before.issues.len(),
            after = after.issues.len(),
            fixed_count,
            "Fix pass complete"
        );

        FixResult {
            success: true,
            fixed_count,
            remaining_issues: after.issues,
            error: None,
        }
    }
}
