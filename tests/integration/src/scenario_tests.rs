//! End-to-end lint / fix / init scenarios through the MCP server
//!
//! Every test drives the server with JSON-RPC `tools/call` messages and a
//! fake markdownlint process, so no Node.js installation is required.

use std::sync::Arc;

use mdlint_core::{LinterSettings, is_auto_fixable};
use mdlint_mcp::{McpServer, ServerConfig};
use mdlint_test_utils::git::{commit_all, stage};
use mdlint_test_utils::{FakeMarkdownlint, MarkdownWorkspace};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

/// Trailing spaces on line 1 (MD009, fixable) and a skipped heading level
/// on line 3 (MD001, not fixable).
const TWO_ISSUES: &str = "# Title   \n\n### Skipped level\n";

struct Session {
    ws: MarkdownWorkspace,
    runner: Arc<FakeMarkdownlint>,
    server: McpServer,
}

impl Session {
    fn new() -> Self {
        Self::with_runner(FakeMarkdownlint::new())
    }

    fn with_runner(runner: FakeMarkdownlint) -> Self {
        let ws = MarkdownWorkspace::new();
        let runner = Arc::new(runner);
        let server = McpServer::with_runner(ServerConfig::new(ws.root()), runner.clone());
        Self { ws, runner, server }
    }

    /// Call a tool and return its parsed JSON payload.
    async fn call(&self, name: &str, arguments: Value) -> Value {
        let request = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "tools/call",
            "params": {"name": name, "arguments": arguments},
        });
        let raw = self.server.handle_message(&request.to_string()).await.unwrap();
        let response: Value = serde_json::from_str(&raw).unwrap();
        assert!(
            response["result"].get("isError").is_none(),
            "unexpected tool error: {response}"
        );
        let text = response["result"]["content"][0]["text"].as_str().unwrap();
        serde_json::from_str(text).unwrap()
    }

    async fn lint(&self, files: &[&str]) -> Value {
        self.call("lint_markdown", json!({ "files": files })).await
    }

    async fn fix(&self, files: &[&str]) -> Value {
        self.call("fix_markdown", json!({ "files": files })).await
    }
}

fn rule_ids(issues: &Value) -> Vec<String> {
    issues
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["ruleId"].as_str().unwrap().to_string())
        .collect()
}

// ==========================================================================
// Lint
// ==========================================================================

#[tokio::test]
async fn test_lint_reports_fixable_and_manual_issues() {
    let session = Session::new();
    session.ws.write("README.md", TWO_ISSUES);

    let result = session.lint(&["README.md"]).await;

    assert_eq!(result["success"], false);
    assert_eq!(result["totalIssues"], 2);
    assert_eq!(result["declinedIssuesHidden"], 0);
    assert_eq!(result["autoFixableCount"], 1);
    assert!(result.get("error").is_none());

    let issues = result["issues"].as_array().unwrap();
    assert_eq!(
        issues[0],
        json!({
            "file": "README.md",
            "line": 1,
            "column": 8,
            "ruleId": "MD009",
            "ruleDescription": "no-trailing-spaces: Trailing spaces",
            "message": "Expected: 0 or 2; Actual: 3",
            "fixable": true,
        })
    );
    assert_eq!(issues[1]["ruleId"], "MD001");
    assert_eq!(issues[1]["line"], 3);
    assert_eq!(issues[1]["column"], 1);
    assert_eq!(issues[1]["fixable"], false);

    let summary = result["summary"].as_str().unwrap();
    assert!(summary.starts_with("Found 2 issues in 1 file:"));
    assert!(summary.contains("**README.md**"));
    assert!(summary.contains("- Line 3: MD001 - Expected: h2; Actual: h3"));
    assert!(summary.ends_with("1 issue is auto-fixable."));
}

#[tokio::test]
async fn test_fixable_flag_matches_rule_set() {
    let session = Session::new();
    session
        .ws
        .write("a.md", TWO_ISSUES)
        .write("b.md", "# B\n\n\n\nText \n#### Deep\n");

    let result = session.lint(&["a.md", "b.md"]).await;

    let issues = result["issues"].as_array().unwrap();
    assert!(issues.len() >= 4);
    for issue in issues {
        let rule_id = issue["ruleId"].as_str().unwrap();
        assert_eq!(issue["fixable"], is_auto_fixable(rule_id), "{rule_id}");
    }
}

#[tokio::test]
async fn test_clean_file_passes() {
    let session = Session::new();
    session.ws.write("README.md", "# Title\n\n## Section\n\nText.\n");

    let result = session.lint(&["README.md"]).await;

    assert_eq!(result["success"], true);
    assert_eq!(result["issues"], json!([]));
    assert_eq!(result["summary"], "All markdown files pass linting.");
}

#[tokio::test]
async fn test_lint_scope_all_skips_dependency_dirs() {
    let session = Session::new();
    session
        .ws
        .write("README.md", TWO_ISSUES)
        .write("node_modules/pkg/README.md", TWO_ISSUES)
        .write("dist/README.md", TWO_ISSUES);

    let result = session.call("lint_markdown", json!({"scope": "all"})).await;

    assert_eq!(result["totalIssues"], 2);
    let calls = session.runner.linter_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].args, vec!["markdownlint-cli2", "README.md"]);
}

#[tokio::test]
async fn test_lint_scope_changed_uses_git_status() {
    let session = Session::new();
    let repo = session.ws.init_git();
    session
        .ws
        .write("committed.md", TWO_ISSUES)
        .write("docs/guide.md", "# Guide\n");
    commit_all(&repo, "initial");

    session.ws.write("docs/guide.md", "# Guide\n\n### Skip\n");
    session.ws.write("new.md", "# New   \n");
    session.ws.write("staged.md", "# Staged\n");
    stage(&repo, "staged.md");

    let result = session.call("lint_markdown", json!({})).await;

    let calls = session.runner.linter_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0].args,
        vec!["markdownlint-cli2", "docs/guide.md", "new.md", "staged.md"]
    );
    assert_eq!(rule_ids(&result["issues"]), vec!["MD001", "MD009"]);
}

#[tokio::test]
async fn test_lint_outside_git_falls_back_to_all() {
    let session = Session::new();
    session.ws.write("a.md", "# A\n").write("sub/b.markdown", "# B\n");

    session.call("lint_markdown", json!({"scope": "changed"})).await;

    let calls = session.runner.linter_calls();
    assert_eq!(calls[0].args, vec!["markdownlint-cli2", "a.md", "sub/b.markdown"]);
}

#[tokio::test]
async fn test_missing_launcher_returns_guidance() {
    let session = Session::with_runner(FakeMarkdownlint::without_npx());
    session.ws.write("README.md", TWO_ISSUES);

    let lint = session.lint(&["README.md"]).await;
    assert_eq!(lint["success"], false);
    assert_eq!(lint["issues"], json!([]));
    let error = lint["error"].as_str().unwrap();
    assert!(error.starts_with("npx is not available."));
    assert!(error.contains("https://nodejs.org/"));
    assert_eq!(lint["summary"], lint["error"]);

    let fix = session.fix(&["README.md"]).await;
    assert_eq!(fix["success"], false);
    assert_eq!(fix["fixedCount"], 0);
    assert_eq!(fix["claudeFixAvailable"], false);
    assert!(fix["error"].as_str().unwrap().starts_with("npx is not available."));

    assert!(session.runner.linter_calls().is_empty());
    session.ws.assert_file_contains("README.md", "# Title   \n");
}

// ==========================================================================
// Fix
// ==========================================================================

#[tokio::test]
async fn test_fix_removes_trailing_spaces_and_keeps_heading_issue() {
    let session = Session::new();
    session.ws.write("README.md", TWO_ISSUES);

    let result = session.fix(&["README.md"]).await;

    assert_eq!(result["success"], true);
    assert_eq!(result["fixedCount"], 1);
    assert_eq!(rule_ids(&result["remainingIssues"]), vec!["MD001"]);
    assert_eq!(result["totalRemainingIssues"], 1);
    assert_eq!(result["claudeFixAvailable"], true);
    let summary = result["summary"].as_str().unwrap();
    assert!(summary.starts_with("Auto-fixed 1 issue.\n\n1 issue remaining:"));
    assert!(summary.contains("- README.md:3: MD001 - Expected: h2; Actual: h3"));
    assert!(summary.ends_with("Would you like that?"));

    assert_eq!(session.ws.read("README.md"), "# Title\n\n### Skipped level\n");
    assert_eq!(session.runner.fix_calls(), 1);
}

#[tokio::test]
async fn test_fix_is_idempotent() {
    let session = Session::new();
    session.ws.write("README.md", TWO_ISSUES);

    let first = session.fix(&["README.md"]).await;
    let second = session.fix(&["README.md"]).await;

    assert_eq!(first["fixedCount"], 1);
    assert_eq!(second["fixedCount"], 0);
    assert_eq!(second["remainingIssues"], first["remainingIssues"]);
    assert!(!second["summary"].as_str().unwrap().contains("Auto-fixed"));
}

#[tokio::test]
async fn test_fix_auto_only_does_not_offer_assistance() {
    let session = Session::new();
    session.ws.write("README.md", TWO_ISSUES);

    let result = session
        .call("fix_markdown", json!({"files": ["README.md"], "auto_only": true}))
        .await;

    assert_eq!(result["claudeFixAvailable"], false);
    assert!(!result["summary"].as_str().unwrap().contains("Would you like that?"));
}

#[tokio::test]
async fn test_fix_everything_fixable() {
    let session = Session::new();
    session.ws.write("README.md", "# Title \n\n\n## Next  \n");

    let result = session.fix(&["README.md"]).await;

    assert_eq!(result["fixedCount"], 2);
    assert_eq!(result["remainingIssues"], json!([]));
    assert_eq!(result["claudeFixAvailable"], false);
    assert_eq!(
        result["summary"],
        "Auto-fixed 2 issues.\nAll markdown files now pass linting."
    );
}

#[tokio::test]
async fn test_fix_invocation_sequence() {
    let session = Session::new();
    session.ws.write("README.md", TWO_ISSUES);

    session.fix(&["README.md"]).await;

    let calls = session.runner.calls();
    let args: Vec<Vec<String>> = calls.iter().map(|c| c.args.clone()).collect();
    assert_eq!(
        args,
        vec![
            vec!["--version".to_string()],
            vec!["markdownlint-cli2".to_string(), "README.md".to_string()],
            vec!["markdownlint-cli2".to_string(), "--fix".to_string(), "README.md".to_string()],
            vec!["markdownlint-cli2".to_string(), "README.md".to_string()],
        ]
    );
    assert!(calls.iter().all(|c| c.cwd.as_deref() == Some(session.ws.root())));
}

// ==========================================================================
// Empty file lists
// ==========================================================================

#[tokio::test]
async fn test_empty_workspace_spawns_nothing() {
    let session = Session::new();

    let lint = session.call("lint_markdown", json!({"files": []})).await;
    assert_eq!(lint["success"], true);
    assert_eq!(lint["issues"], json!([]));
    assert_eq!(lint["summary"], "No markdown files to check.");

    let fix = session.call("fix_markdown", json!({"files": []})).await;
    assert_eq!(fix["success"], true);
    assert_eq!(fix["fixedCount"], 0);
    assert_eq!(fix["summary"], "No markdown files to fix.");

    assert!(session.runner.calls().is_empty());
}

#[tokio::test]
async fn test_linter_on_empty_list_spawns_nothing() {
    let ws = MarkdownWorkspace::new();
    let runner = Arc::new(FakeMarkdownlint::new());
    let linter = mdlint_core::Linter::new(runner.clone(), LinterSettings::default(), ws.root());

    let lint = linter.lint(&[]).await;
    let fix = linter.fix(&[]).await;

    assert!(lint.success && lint.issues.is_empty());
    assert!(fix.success && fix.fixed_count == 0 && fix.remaining_issues.is_empty());
    assert!(runner.calls().is_empty());
}

// ==========================================================================
// Config
// ==========================================================================

#[tokio::test]
async fn test_init_config_twice() {
    let session = Session::new();

    let first = session.call("init_markdownlint_config", json!({})).await;
    assert_eq!(first["success"], true);
    assert_eq!(first["created"], true);
    session.ws.assert_file_exists(".markdownlint.jsonc");
    let written = session.ws.read(".markdownlint.jsonc");

    let second = session.call("init_markdownlint_config", json!({})).await;
    assert_eq!(second["success"], true);
    assert_eq!(second["created"], false);
    assert_eq!(second["path"], first["path"]);
    assert!(second["message"].as_str().unwrap().contains("already exists"));
    assert_eq!(session.ws.read(".markdownlint.jsonc"), written);
}

#[tokio::test]
async fn test_init_config_respects_other_config_names() {
    let session = Session::new();
    session.ws.write(".markdownlint.yaml", "default: true\n");

    let result = session.call("init_markdownlint_config", json!({})).await;

    assert_eq!(result["created"], false);
    assert!(result["path"].as_str().unwrap().ends_with(".markdownlint.yaml"));
    session.ws.assert_file_not_exists(".markdownlint.jsonc");
}
