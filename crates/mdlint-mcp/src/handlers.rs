//! MCP Tool Handlers
//!
//! Dispatches tool calls to mdlint-core and applies the session's declined
//! issues to every lint and fix response before it leaves the server.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use mdlint_core::{
    ConfigInit, DeclinedIssues, DeclinedKey, LintIssue, Linter, ProcessRunner, Scope,
    init_config, resolve_files,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};

use crate::config::ServerConfig;
use crate::summary::{NO_FILES_TO_CHECK, NO_FILES_TO_FIX, fix_summary, lint_summary};
use crate::tools::{
    CLEAR_DECLINED_FIXES, DECLINE_FIX, FIX_MARKDOWN, GET_DECLINED_FIXES, INIT_CONFIG,
    LINT_MARKDOWN,
};
use crate::{Error, Result};

/// Shared state for tool calls: the working tree, the linter and the
/// session's declined issues.
pub struct ToolContext {
    root: PathBuf,
    linter: Linter,
    declined: DeclinedIssues,
}

impl ToolContext {
    pub fn new(config: ServerConfig, runner: Arc<dyn ProcessRunner>) -> Self {
        let linter = Linter::new(runner, config.linter, config.root.clone());
        Self {
            root: config.root,
            linter,
            declined: DeclinedIssues::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn linter(&self) -> &Linter {
        &self.linter
    }

    pub fn declined(&self) -> &DeclinedIssues {
        &self.declined
    }
}

/// Handle a tool call by dispatching to the appropriate handler
///
/// An unknown tool name is a normal result carrying an `error` field, not
/// an `Err`.
pub async fn handle_tool_call(ctx: &ToolContext, tool_name: &str, arguments: Value) -> Result<Value> {
    tracing::debug!(tool = tool_name, "Handling tool call");

    match tool_name {
        LINT_MARKDOWN => handle_lint(ctx, arguments).await,
        FIX_MARKDOWN => handle_fix(ctx, arguments).await,
        INIT_CONFIG => handle_init_config(ctx),
        DECLINE_FIX => handle_decline(ctx, &arguments),
        GET_DECLINED_FIXES => handle_get_declined(ctx),
        CLEAR_DECLINED_FIXES => handle_clear_declined(ctx),
        _ => {
            tracing::warn!(tool = tool_name, "Unknown tool");
            Ok(json!({ "error": format!("Unknown tool: {}", tool_name) }))
        }
    }
}

/// Deserialize tool arguments, treating absent arguments as all defaults.
fn parse_args<T: DeserializeOwned + Default>(arguments: Value) -> Result<T> {
    if arguments.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(arguments).map_err(|e| Error::invalid_arguments(e.to_string()))
}

// ============================================================================
// Lint / Fix
// ============================================================================

#[derive(Debug, Default, serde::Deserialize)]
struct LintArgs {
    #[serde(default)]
    files: Option<Vec<String>>,
    #[serde(default)]
    scope: Option<Scope>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LintResponse {
    success: bool,
    issues: Vec<LintIssue>,
    summary: String,
    auto_fixable_count: usize,
    total_issues: usize,
    declined_issues_hidden: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl LintResponse {
    fn empty(summary: impl Into<String>) -> Self {
        Self {
            success: true,
            issues: Vec::new(),
            summary: summary.into(),
            auto_fixable_count: 0,
            total_issues: 0,
            declined_issues_hidden: 0,
            error: None,
        }
    }

    fn failed(error: String) -> Self {
        Self {
            success: false,
            summary: error.clone(),
            error: Some(error),
            ..Self::empty("")
        }
    }
}

async fn handle_lint(ctx: &ToolContext, arguments: Value) -> Result<Value> {
    let args: LintArgs = parse_args(arguments)?;
    let files = resolve_files(&ctx.root, args.files, args.scope.unwrap_or_default()).await?;

    if files.is_empty() {
        return Ok(serde_json::to_value(LintResponse::empty(NO_FILES_TO_CHECK))?);
    }

    let result = ctx.linter.lint(&files).await;
    if let Some(error) = result.error {
        return Ok(serde_json::to_value(LintResponse::failed(error))?);
    }

    let filtered = ctx.declined.filter(result.issues);
    let auto_fixable_count = filtered.visible.iter().filter(|i| i.fixable).count();
    let summary = lint_summary(&filtered.visible, auto_fixable_count);

    tracing::info!(
        files = files.len(),
        issues = filtered.total,
        hidden = filtered.hidden,
        "Lint complete"
    );

    Ok(serde_json::to_value(LintResponse {
        success: result.success,
        issues: filtered.visible,
        summary,
        auto_fixable_count,
        total_issues: filtered.total,
        declined_issues_hidden: filtered.hidden,
        error: None,
    })?)
}

#[derive(Debug, Default, serde::Deserialize)]
struct FixArgs {
    #[serde(default)]
    files: Option<Vec<String>>,
    #[serde(default)]
    auto_only: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FixResponse {
    success: bool,
    fixed_count: i64,
    remaining_issues: Vec<LintIssue>,
    summary: String,
    claude_fix_available: bool,
    total_remaining_issues: usize,
    declined_issues_hidden: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl FixResponse {
    fn empty(summary: impl Into<String>) -> Self {
        Self {
            success: true,
            fixed_count: 0,
            remaining_issues: Vec::new(),
            summary: summary.into(),
            claude_fix_available: false,
            total_remaining_issues: 0,
            declined_issues_hidden: 0,
            error: None,
        }
    }

    fn failed(error: String) -> Self {
        Self {
            success: false,
            summary: error.clone(),
            error: Some(error),
            ..Self::empty("")
        }
    }
}

async fn handle_fix(ctx: &ToolContext, arguments: Value) -> Result<Value> {
    let args: FixArgs = parse_args(arguments)?;
    let files = resolve_files(&ctx.root, args.files, Scope::Changed).await?;

    if files.is_empty() {
        return Ok(serde_json::to_value(FixResponse::empty(NO_FILES_TO_FIX))?);
    }

    let result = ctx.linter.fix(&files).await;
    if let Some(error) = result.error {
        return Ok(serde_json::to_value(FixResponse::failed(error))?);
    }

    let filtered = ctx.declined.filter(result.remaining_issues);
    let claude_fix_available = !args.auto_only && !filtered.visible.is_empty();
    let summary = fix_summary(result.fixed_count, &filtered.visible, claude_fix_available);

    tracing::info!(
        files = files.len(),
        fixed = result.fixed_count,
        remaining = filtered.total,
        hidden = filtered.hidden,
        "Fix complete"
    );

    Ok(serde_json::to_value(FixResponse {
        success: result.success,
        fixed_count: result.fixed_count,
        remaining_issues: filtered.visible,
        summary,
        claude_fix_available,
        total_remaining_issues: filtered.total,
        declined_issues_hidden: filtered.hidden,
        error: None,
    })?)
}

// ============================================================================
// Config
// ============================================================================

#[derive(Debug, Serialize)]
struct InitConfigResponse {
    success: bool,
    created: bool,
    path: String,
    message: String,
}

fn handle_init_config(ctx: &ToolContext) -> Result<Value> {
    let response = match init_config(&ctx.root) {
        Ok(ConfigInit::Created { path }) => InitConfigResponse {
            success: true,
            created: true,
            message: format!(
                "Created starter markdownlint config at {}. You can customize the rules as needed.",
                path
            ),
            path: path.into(),
        },
        Ok(ConfigInit::Existing { path }) => InitConfigResponse {
            success: true,
            created: false,
            message: format!("Markdownlint config already exists at {}. No changes made.", path),
            path: path.into(),
        },
        Err(e) => {
            tracing::warn!(error = %e, "Failed to create markdownlint config");
            InitConfigResponse {
                success: false,
                created: false,
                path: String::new(),
                message: format!("Failed to create config: {}", e),
            }
        }
    };
    Ok(serde_json::to_value(response)?)
}

// ============================================================================
// Declined issues
// ============================================================================

/// Read a non-empty string argument.
fn string_arg<'a>(args: &'a Map<String, Value>, name: &str) -> Option<&'a str> {
    args.get(name)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// Read a positive whole line number. `12.0` is accepted, `0` and `1.5` are not.
fn line_arg(args: &Map<String, Value>) -> Option<u64> {
    let value = args.get("line")?;
    if let Some(line) = value.as_u64() {
        return (line > 0).then_some(line);
    }
    value
        .as_f64()
        .filter(|f| *f >= 1.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
        .map(|f| f as u64)
}

fn handle_decline(ctx: &ToolContext, arguments: &Value) -> Result<Value> {
    let empty = Map::new();
    let args = arguments.as_object().unwrap_or(&empty);

    let file = string_arg(args, "file");
    let line = line_arg(args);
    let rule_id = string_arg(args, "ruleId");

    let (Some(file), Some(line), Some(rule_id)) = (file, line, rule_id) else {
        let missing: Vec<&str> = [
            ("file", file.is_none()),
            ("line", line.is_none()),
            ("ruleId", rule_id.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, absent)| absent.then_some(name))
        .collect();
        return Ok(json!({
            "success": false,
            "error": format!("Missing required parameters: {}", missing.join(", ")),
        }));
    };

    let declined_count = ctx.declined.decline(DeclinedKey::new(file, line, rule_id));

    Ok(json!({
        "success": true,
        "message": format!(
            "Declined fix for {} at {}:{}. Will not prompt again this session.",
            rule_id, file, line
        ),
        "declinedCount": declined_count,
    }))
}

fn handle_get_declined(ctx: &ToolContext) -> Result<Value> {
    let declined: Vec<String> = ctx.declined.list().into_iter().map(String::from).collect();
    Ok(json!({
        "count": declined.len(),
        "declinedFixes": declined,
    }))
}

fn handle_clear_declined(ctx: &ToolContext) -> Result<Value> {
    let previous = ctx.declined.clear();
    Ok(json!({
        "success": true,
        "message": format!("Cleared {} declined fixes. All issues will be shown again.", previous),
    }))
}
