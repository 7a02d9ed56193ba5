//! Declined-issue session behaviour across lint, fix and the decline tools

use std::sync::Arc;

use mdlint_mcp::{McpServer, ServerConfig};
use mdlint_test_utils::{FakeMarkdownlint, MarkdownWorkspace};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

const TWO_ISSUES: &str = "# Title   \n\n### Skipped level\n";

fn setup() -> (MarkdownWorkspace, McpServer) {
    let ws = MarkdownWorkspace::new();
    ws.write("README.md", TWO_ISSUES);
    let server = McpServer::with_runner(ServerConfig::new(ws.root()), Arc::new(FakeMarkdownlint::new()));
    (ws, server)
}

async fn call(server: &McpServer, name: &str, arguments: Value) -> Value {
    let request = json!({
        "jsonrpc": "2.0",
        "id": "session",
        "method": "tools/call",
        "params": {"name": name, "arguments": arguments},
    });
    let raw = server.handle_message(&request.to_string()).await.unwrap();
    let response: Value = serde_json::from_str(&raw).unwrap();
    let text = response["result"]["content"][0]["text"].as_str().unwrap();
    serde_json::from_str(text).unwrap()
}

async fn lint_readme(server: &McpServer) -> Value {
    call(server, "lint_markdown", json!({"files": ["README.md"]})).await
}

async fn decline(server: &McpServer, file: &str, line: u64, rule_id: &str) -> Value {
    call(
        server,
        "decline_fix",
        json!({"file": file, "line": line, "ruleId": rule_id}),
    )
    .await
}

#[tokio::test]
async fn test_declined_issue_is_hidden_from_lint() {
    let (_ws, server) = setup();

    let declined = decline(&server, "README.md", 3, "MD001").await;
    assert_eq!(declined["success"], true);
    assert_eq!(declined["declinedCount"], 1);
    assert_eq!(
        declined["message"],
        "Declined fix for MD001 at README.md:3. Will not prompt again this session."
    );

    let result = lint_readme(&server).await;
    let issues = result["issues"].as_array().unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0]["ruleId"], "MD009");
    assert_eq!(result["totalIssues"], 2);
    assert_eq!(result["declinedIssuesHidden"], 1);
    assert_eq!(result["autoFixableCount"], 1);
    assert!(!result["summary"].as_str().unwrap().contains("MD001"));
}

#[tokio::test]
async fn test_decline_is_idempotent() {
    let (_ws, server) = setup();

    let first = decline(&server, "README.md", 3, "MD001").await;
    let second = decline(&server, "README.md", 3, "MD001").await;

    assert_eq!(first["declinedCount"], 1);
    assert_eq!(second["declinedCount"], 1);
    let listed = call(&server, "get_declined_fixes", json!({})).await;
    assert_eq!(
        listed,
        json!({"declinedFixes": ["README.md:3:MD001"], "count": 1})
    );
}

#[tokio::test]
async fn test_declined_key_must_match_exactly() {
    let (_ws, server) = setup();

    decline(&server, "README.md", 2, "MD001").await;
    decline(&server, "./README.md", 3, "MD001").await;

    let result = lint_readme(&server).await;
    assert_eq!(result["declinedIssuesHidden"], 0);
    assert_eq!(result["issues"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_decline_accepts_whole_float_line() {
    let (_ws, server) = setup();

    let declined = call(
        &server,
        "decline_fix",
        json!({"file": "README.md", "line": 3.0, "ruleId": "MD001"}),
    )
    .await;

    assert_eq!(declined["success"], true);
    assert_eq!(lint_readme(&server).await["declinedIssuesHidden"], 1);
}

#[tokio::test]
async fn test_decline_missing_rule_id_leaves_set_unchanged() {
    let (_ws, server) = setup();

    let result = call(
        &server,
        "decline_fix",
        json!({"file": "README.md", "line": 3}),
    )
    .await;

    assert_eq!(result["success"], false);
    assert_eq!(result["error"], "Missing required parameters: ruleId");
    assert!(server.declined().is_empty());
    assert_eq!(
        call(&server, "get_declined_fixes", json!({})).await["count"],
        0
    );
}

#[tokio::test]
async fn test_decline_without_arguments_names_every_parameter() {
    let (_ws, server) = setup();

    let result = call(&server, "decline_fix", Value::Null).await;

    assert_eq!(result["success"], false);
    assert_eq!(
        result["error"],
        "Missing required parameters: file, line, ruleId"
    );
}

#[tokio::test]
async fn test_clear_reports_previous_size_and_restores_issues() {
    let (_ws, server) = setup();
    decline(&server, "README.md", 1, "MD009").await;
    decline(&server, "README.md", 3, "MD001").await;
    decline(&server, "other.md", 7, "MD012").await;
    assert_eq!(lint_readme(&server).await["declinedIssuesHidden"], 2);

    let cleared = call(&server, "clear_declined_fixes", json!({})).await;

    assert_eq!(
        cleared,
        json!({
            "success": true,
            "message": "Cleared 3 declined fixes. All issues will be shown again.",
        })
    );
    let result = lint_readme(&server).await;
    assert_eq!(result["declinedIssuesHidden"], 0);
    assert_eq!(result["issues"].as_array().unwrap().len(), 2);

    let again = call(&server, "clear_declined_fixes", json!({})).await;
    assert_eq!(
        again["message"],
        "Cleared 0 declined fixes. All issues will be shown again."
    );
}

#[tokio::test]
async fn test_list_preserves_decline_order() {
    let (_ws, server) = setup();
    decline(&server, "b.md", 2, "MD012").await;
    decline(&server, "a.md", 1, "MD009").await;
    decline(&server, "b.md", 2, "MD012").await;

    let listed = call(&server, "get_declined_fixes", json!({})).await;

    assert_eq!(
        listed["declinedFixes"],
        json!(["b.md:2:MD012", "a.md:1:MD009"])
    );
    assert_eq!(listed["count"], 2);
}

#[tokio::test]
async fn test_fix_hides_declined_remaining_issues() {
    let (ws, server) = setup();
    decline(&server, "README.md", 3, "MD001").await;

    let result = call(&server, "fix_markdown", json!({"files": ["README.md"]})).await;

    assert_eq!(result["success"], true);
    assert_eq!(result["fixedCount"], 1);
    assert_eq!(result["remainingIssues"], json!([]));
    assert_eq!(result["totalRemainingIssues"], 1);
    assert_eq!(result["declinedIssuesHidden"], 1);
    assert_eq!(result["claudeFixAvailable"], false);
    assert_eq!(ws.read("README.md"), "# Title\n\n### Skipped level\n");
}

#[tokio::test]
async fn test_declined_set_is_per_server() {
    let (ws, first) = setup();
    decline(&first, "README.md", 3, "MD001").await;

    let second = McpServer::with_runner(ServerConfig::new(ws.root()), Arc::new(FakeMarkdownlint::new()));

    assert_eq!(lint_readme(&second).await["declinedIssuesHidden"], 0);
    assert_eq!(lint_readme(&first).await["declinedIssuesHidden"], 1);
}

#[tokio::test]
async fn test_concurrent_declines_are_all_recorded() {
    let (_ws, server) = setup();
    let server = Arc::new(server);

    let mut handles = Vec::new();
    for line in 1..=20u64 {
        let server = server.clone();
        handles.push(tokio::spawn(async move {
            decline(&server, "README.md", line, "MD009").await
        }));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap()["success"], true);
    }

    assert_eq!(server.declined().len(), 20);
    assert_eq!(lint_readme(&server).await["declinedIssuesHidden"], 1);
}
