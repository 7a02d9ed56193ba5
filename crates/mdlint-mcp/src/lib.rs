//! MCP server for markdownlint
//!
//! Exposes markdown linting, auto-fixing and config initialization as MCP
//! tools, plus a session-scoped list of declined issues that are hidden
//! from every later lint and fix response.
//!
//! # Architecture
//!
//! ```text
//! [ MCP Client (Claude/IDE) ]
//!        | (JSON-RPC over stdio)
//!        v
//! [ mdlint-mcp (McpServer) ]
//!        |  tools/call -> handlers::handle_tool_call
//!        |                  +--> DeclinedIssues (session state)
//!        v
//! [ mdlint-core ]
//!        +--> resolve_files (git2 / directory walk)
//!        +--> Linter::lint / Linter::fix --> npx markdownlint-cli2
//! ```
//!
//! # Tools
//!
//! - `lint_markdown` - Lint changed, all, or explicit files
//! - `fix_markdown` - Run `--fix`, then report what is left
//! - `init_markdownlint_config` - Create a starter `.markdownlint.jsonc`
//! - `decline_fix` - Hide one issue for the rest of the session
//! - `get_declined_fixes` - List hidden issues
//! - `clear_declined_fixes` - Show everything again

pub mod config;
pub mod error;
pub mod handlers;
pub mod protocol;
pub mod server;
pub mod summary;
pub mod tools;

pub use config::ServerConfig;
pub use error::{Error, Result};
pub use handlers::ToolContext;
pub use server::McpServer;
pub use tools::{ToolContent, ToolDefinition, ToolResult, get_tool_definitions};
