//! markdownlint MCP Server
//!
//! Exposes markdownlint-cli2 linting and fixing to agentic IDEs over the
//! Model Context Protocol.
//!
//! # Usage
//!
//! ```bash
//! mdlint-mcp [--root <path>] [--launcher npx] [--linter markdownlint-cli2] [--timeout-secs 60]
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Control log verbosity (default: `mdlint_mcp=info`)
//!
//! # Protocol
//!
//! The server communicates via JSON-RPC 2.0 over stdio:
//! - Requests/responses go through stdout
//! - Logs go to stderr (to avoid interfering with the protocol)

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use mdlint_core::LinterSettings;
use mdlint_mcp::{McpServer, ServerConfig};

/// MCP server for markdownlint
#[derive(Parser)]
#[command(name = "mdlint-mcp")]
#[command(about = "MCP server for markdownlint")]
#[command(version)]
struct Args {
    /// Working tree to lint; subprocesses run here
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// Launcher used to run the linter package
    #[arg(long, default_value = "npx")]
    launcher: String,

    /// Linter package passed to the launcher
    #[arg(long, default_value = "markdownlint-cli2")]
    linter: String,

    /// Timeout for each lint or fix invocation, in seconds
    #[arg(long, default_value_t = 60)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging to stderr (stdout is reserved for MCP protocol)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mdlint_mcp=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if !args.root.is_dir() {
        return Err(format!("root {} is not a directory", args.root.display()).into());
    }

    let linter = LinterSettings::default()
        .with_launcher(args.launcher)
        .with_package(args.linter)
        .with_timeout(Duration::from_secs(args.timeout_secs));
    let config = ServerConfig::new(args.root).with_linter(linter);

    tracing::info!(
        root = ?config.root,
        launcher = %config.linter.launcher,
        linter = %config.linter.package,
        "Starting mdlint-mcp server"
    );

    McpServer::new(config).run().await?;

    tracing::info!("mdlint-mcp server stopped");
    Ok(())
}
