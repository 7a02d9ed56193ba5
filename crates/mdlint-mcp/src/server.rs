//! MCP Server implementation
//!
//! Reads newline-delimited JSON-RPC from stdin and writes responses to
//! stdout. Each message is handled on its own task so a slow lint does not
//! block `ping` or a decline; all responses go through a single writer task.

use std::path::Path;
use std::sync::Arc;

use mdlint_core::{DeclinedIssues, ProcessRunner, TokioProcessRunner};
use serde_json::{Value, json};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;

use crate::config::ServerConfig;
use crate::handlers::{ToolContext, handle_tool_call};
use crate::protocol::{
    INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, InitializeResult, JsonRpcRequest,
    JsonRpcResponse, METHOD_NOT_FOUND, PARSE_ERROR, PROTOCOL_VERSION, SERVER_NAME,
    ServerCapabilities, ServerInfo, ToolCallParams, ToolsCapability,
};
use crate::tools::{ToolDefinition, ToolResult, get_tool_definitions};
use crate::{Error, Result};

/// Pending responses buffered ahead of the writer.
const WRITE_QUEUE_DEPTH: usize = 64;

/// MCP Server for markdownlint
///
/// # Example
///
/// ```ignore
/// use mdlint_mcp::{McpServer, ServerConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     McpServer::new(ServerConfig::new(".")).run().await?;
///     Ok(())
/// }
/// ```
pub struct McpServer {
    context: Arc<ToolContext>,
    tools: Vec<ToolDefinition>,
}

impl McpServer {
    /// Create a server that runs the real linter through `tokio::process`.
    pub fn new(config: ServerConfig) -> Self {
        Self::with_runner(config, Arc::new(TokioProcessRunner))
    }

    /// Create a server with a custom process runner.
    pub fn with_runner(config: ServerConfig, runner: Arc<dyn ProcessRunner>) -> Self {
        Self {
            context: Arc::new(ToolContext::new(config, runner)),
            tools: get_tool_definitions(),
        }
    }

    pub fn root(&self) -> &Path {
        self.context.root()
    }

    pub fn tools(&self) -> &[ToolDefinition] {
        &self.tools
    }

    /// Issues declined in this session.
    pub fn declined(&self) -> &DeclinedIssues {
        self.context.declined()
    }

    /// Serve MCP over the process's stdin and stdout until stdin closes.
    pub async fn run(self) -> Result<()> {
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }

    /// Serve MCP over an arbitrary reader/writer pair.
    ///
    /// Returns after `reader` reaches EOF and every in-flight request has
    /// been answered.
    pub async fn serve<R, W>(self, reader: R, writer: W) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let server = Arc::new(self);
        let (tx, rx) = mpsc::channel::<String>(WRITE_QUEUE_DEPTH);
        let writer_task = tokio::spawn(write_loop(writer, rx));

        tracing::info!(root = %server.root().display(), "MCP server ready, listening on stdio");

        let mut reader = BufReader::new(reader);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }
            // Invalid UTF-8 is replaced so the line still gets an answer
            let line = String::from_utf8_lossy(&buf).trim().to_string();
            if line.is_empty() {
                continue;
            }

            tracing::debug!(request = %line, "Received message");

            let server = Arc::clone(&server);
            let tx = tx.clone();
            tokio::spawn(async move {
                let response = match server.handle_message(&line).await {
                    Ok(response) => response,
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to handle message");
                        match encode(JsonRpcResponse::error(
                            Value::Null,
                            INTERNAL_ERROR,
                            format!("Internal error: {}", e),
                        )) {
                            Ok(response) => response,
                            Err(_) => return,
                        }
                    }
                };
                if !response.is_empty() && tx.send(response).await.is_err() {
                    tracing::warn!("Response dropped, writer has stopped");
                }
            });
        }

        tracing::info!("Input closed, waiting for in-flight requests");
        drop(tx);
        writer_task.await??;
        Ok(())
    }

    /// Handle a single MCP message
    ///
    /// Returns the serialized response, or an empty string when the message
    /// is a notification. Malformed input produces a JSON-RPC error
    /// response rather than an `Err`.
    pub async fn handle_message(&self, message: &str) -> Result<String> {
        let value: Value = match serde_json::from_str(message) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, "Unparseable message");
                return encode(JsonRpcResponse::error(
                    Value::Null,
                    PARSE_ERROR,
                    format!("Parse error: {}", e),
                ));
            }
        };

        let raw_id = value.get("id").cloned().unwrap_or(Value::Null);
        let request: JsonRpcRequest = match serde_json::from_value(value) {
            Ok(request) => request,
            Err(e) => {
                return encode(JsonRpcResponse::error(
                    raw_id,
                    INVALID_REQUEST,
                    format!("Invalid request: {}", e),
                ));
            }
        };

        if request.is_notification() {
            tracing::debug!(method = %request.method, "Notification received");
            return Ok(String::new());
        }

        let Some(id) = request.id else {
            tracing::debug!(method = %request.method, "Request without id, not answering");
            return Ok(String::new());
        };

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(id)?,
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => self.handle_tools_list(id),
            "tools/call" => self.handle_tools_call(id, request.params).await?,
            _ => JsonRpcResponse::error(
                id,
                METHOD_NOT_FOUND,
                format!("Method not found: {}", request.method),
            ),
        };

        encode(response)
    }

    fn handle_initialize(&self, id: Value) -> Result<JsonRpcResponse> {
        tracing::info!(root = %self.root().display(), "Client initialized session");

        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: ToolsCapability {
                    list_changed: false,
                },
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        Ok(JsonRpcResponse::success(id, serde_json::to_value(result)?))
    }

    fn handle_tools_list(&self, id: Value) -> JsonRpcResponse {
        let tools_value: Vec<Value> = self
            .tools
            .iter()
            .map(|t| {
                json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect();

        JsonRpcResponse::success(id, json!({ "tools": tools_value }))
    }

    /// Run a tool on its own task so a panic inside it becomes an
    /// `isError` result instead of taking the server down.
    async fn handle_tools_call(&self, id: Value, params: Value) -> Result<JsonRpcResponse> {
        let params: ToolCallParams = match serde_json::from_value(params) {
            Ok(params) => params,
            Err(e) => {
                return Ok(JsonRpcResponse::error(
                    id,
                    INVALID_PARAMS,
                    format!("Invalid params: {}", e),
                ));
            }
        };

        let tool_name = params.name.clone();
        let context = Arc::clone(&self.context);
        let outcome = tokio::spawn(async move {
            handle_tool_call(&context, &params.name, params.arguments).await
        })
        .await;

        let tool_result = match outcome {
            Ok(Ok(result)) => ToolResult::text(serde_json::to_string_pretty(&result)?),
            Ok(Err(e)) => {
                tracing::warn!(tool = %tool_name, error = %e, "Tool call failed");
                ToolResult::error(error_text(&e.to_string())?)
            }
            Err(e) => {
                tracing::error!(tool = %tool_name, error = %e, "Tool call panicked");
                ToolResult::error(error_text(&Error::from(e).to_string())?)
            }
        };

        Ok(JsonRpcResponse::success(id, serde_json::to_value(tool_result)?))
    }
}

fn encode(response: JsonRpcResponse) -> Result<String> {
    serde_json::to_string(&response).map_err(Error::from)
}

fn error_text(message: &str) -> Result<String> {
    Ok(serde_json::to_string_pretty(&json!({ "error": message }))?)
}

async fn write_loop<W>(mut writer: W, mut rx: mpsc::Receiver<String>) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(response) = rx.recv().await {
        writer.write_all(response.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
    }
    Ok(())
}
