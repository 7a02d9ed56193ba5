//! MCP tool definitions
//!
//! - `lint_markdown` - Check markdown files and return structured issues
//! - `fix_markdown` - Auto-fix, then report the remaining issues
//! - `init_markdownlint_config` - Create a starter config, never overwriting
//! - `decline_fix` - Hide an issue for the rest of the session
//! - `get_declined_fixes` - List declined issues
//! - `clear_declined_fixes` - Forget all declined issues

use serde::{Deserialize, Serialize};
use serde_json::json;

pub const LINT_MARKDOWN: &str = "lint_markdown";
pub const FIX_MARKDOWN: &str = "fix_markdown";
pub const INIT_CONFIG: &str = "init_markdownlint_config";
pub const DECLINE_FIX: &str = "decline_fix";
pub const GET_DECLINED_FIXES: &str = "get_declined_fixes";
pub const CLEAR_DECLINED_FIXES: &str = "clear_declined_fixes";

/// Tool definition for MCP protocol
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: serde_json::Value,
}

/// Result from a tool invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub content: Vec<ToolContent>,
    #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

/// Content types for tool results
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ToolContent {
    #[serde(rename = "text")]
    Text { text: String },
}

impl ToolResult {
    /// Create a successful text result
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text {
                text: content.into(),
            }],
            is_error: None,
        }
    }

    /// Create an error result
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text {
                text: message.into(),
            }],
            is_error: Some(true),
        }
    }
}

/// Get all available tool definitions
pub fn get_tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: LINT_MARKDOWN.to_string(),
            description: "Check markdown files for style and formatting issues using markdownlint. \
                Returns structured list of issues with file, line, rule ID, and whether each is auto-fixable."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "files": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Array of file paths to lint. If empty, lints changed files (git status)."
                    },
                    "scope": {
                        "type": "string",
                        "enum": ["changed", "all", "file"],
                        "description": "Scope of files to lint: \"changed\" (git status), \"all\" (all .md files), or \"file\" (specific files). Defaults to \"changed\"."
                    }
                }
            }),
        },
        ToolDefinition {
            name: FIX_MARKDOWN.to_string(),
            description: "Auto-fix markdown issues using markdownlint --fix. \
                Returns count of fixed issues and any remaining issues that need manual or assisted fixing."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "files": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Array of file paths to fix. If empty, fixes changed files (git status)."
                    },
                    "auto_only": {
                        "type": "boolean",
                        "description": "If true, only apply auto-fixes. If false (default), remaining issues are flagged for assisted fixing."
                    }
                }
            }),
        },
        ToolDefinition {
            name: INIT_CONFIG.to_string(),
            description: "Create a starter .markdownlint.jsonc configuration file with sensible defaults. \
                Will not overwrite existing config."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {}
            }),
        },
        ToolDefinition {
            name: DECLINE_FIX.to_string(),
            description: "Mark a specific issue as declined for this session. \
                It will not be reported again until the session ends or declines are cleared."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "file": {
                        "type": "string",
                        "description": "File path of the issue"
                    },
                    "line": {
                        "type": "number",
                        "description": "Line number of the issue"
                    },
                    "ruleId": {
                        "type": "string",
                        "description": "Rule ID (e.g., MD001, MD022)"
                    }
                },
                "required": ["file", "line", "ruleId"]
            }),
        },
        ToolDefinition {
            name: GET_DECLINED_FIXES.to_string(),
            description: "Get list of issues that have been declined this session.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {}
            }),
        },
        ToolDefinition {
            name: CLEAR_DECLINED_FIXES.to_string(),
            description: "Clear all declined fixes, re-enabling prompts for them.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {}
            }),
        },
    ]
}
