//! MCP server implementation

use crate::core::services::Services;
use crate::mcp::error::McpError;
use crate::mcp::handlers::ProtocolHandlers;
use crate::mcp::protocol::*;
use crate::mcp::transport::StdioTransport;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

pub struct McpServer {
    handlers: Arc<ProtocolHandlers>,
}

impl McpServer {
    pub fn new(services: Arc<Services>) -> Self {
        Self {
            handlers: Arc::new(ProtocolHandlers::new(services)),
        }
    }

    /// Run the MCP server on stdio until EOF or Ctrl+C
    pub async fn run(&self) -> Result<(), McpError> {
        info!("Starting es-mcp server");

        let stdin = BufReader::new(tokio::io::stdin());
        let shutdown = async {
            tokio::signal::ctrl_c().await.ok();
            info!("Received shutdown signal");
        };

        self.serve(stdin, tokio::io::stdout(), shutdown).await?;

        info!("MCP server shutting down");
        Ok(())
    }

    /// Serve newline-delimited JSON-RPC from `reader` to `writer`
    ///
    /// Each request is handled in its own task; responses may be
    /// written out of order and are matched by id. Returns once the
    /// input ends (or `shutdown` resolves) and every in-flight request
    /// has been answered.
    pub async fn serve<R, W, S>(&self, mut reader: R, writer: W, shutdown: S) -> Result<(), McpError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
        S: std::future::Future<Output = ()>,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<JsonRpcResponse>();

        let writer_task = tokio::spawn(async move {
            let mut transport = StdioTransport::with_writer(writer);
            while let Some(response) = rx.recv().await {
                transport.send_response(response).await?;
            }
            Ok::<(), McpError>(())
        });

        let mut buf = Vec::new();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                read = reader.read_until(b'\n', &mut buf) => {
                    if read? == 0 {
                        break; // EOF
                    }
                    let raw = std::mem::take(&mut buf);
                    let line = match String::from_utf8(raw) {
                        Ok(line) => line,
                        Err(e) => {
                            error!("Dropping non UTF-8 line: {}", e);
                            let err = McpError::ParseError(format!("invalid UTF-8: {e}"));
                            let response = JsonRpcResponse::error(None, err.code(), err.to_string());
                            let _ = tx.send(response);
                            continue;
                        }
                    };
                    if line.trim().is_empty() {
                        continue;
                    }

                    let handlers = Arc::clone(&self.handlers);
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        let response = process_message(&handlers, line.trim_end()).await;
                        // Receiver only goes away if the writer failed
                        let _ = tx.send(response);
                    });
                }

                _ = &mut shutdown => break,
            }
        }

        // Writer drains once every in-flight task has dropped its sender
        drop(tx);
        writer_task
            .await
            .map_err(|e| McpError::InternalError(format!("writer task failed: {e}")))?
    }
}

async fn process_message(handlers: &ProtocolHandlers, line: &str) -> JsonRpcResponse {
    debug!("Received: {}", line);

    let request: JsonRpcRequest = match serde_json::from_str(line) {
        Ok(request) => request,
        Err(e) => {
            error!("Error parsing message: {}", e);
            let err = McpError::ParseError(e.to_string());
            return JsonRpcResponse::error(None, err.code(), err.to_string());
        }
    };

    if request.jsonrpc != JSONRPC_VERSION {
        let err = McpError::InvalidRequest(format!(
            "unsupported jsonrpc version '{}'",
            request.jsonrpc
        ));
        return JsonRpcResponse::error(request.id, err.code(), err.to_string());
    }

    handlers.dispatch(request).await
}
