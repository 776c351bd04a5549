// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! MCP server implementation

use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncWrite};
use tokio::task::{AbortHandle, JoinError, JoinSet};

use super::protocol::*;
use super::transport::{self, Incoming, MessageReader, MessageWriter};
use crate::error::{LedgerError, Result};
use crate::ledger::{Dispatcher, LedgerTool};

/// MCP server state
#[derive(Clone)]
pub struct McpServer {
    /// Tool dispatcher shared by every request task
    dispatcher: Dispatcher,
    /// Set once the client sends `notifications/initialized`
    initialized: Arc<AtomicBool>,
}

impl McpServer {
    /// Create a new MCP server
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher,
            initialized: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    /// Serve on the process stdin/stdout until stdin closes.
    pub async fn run(&self) -> Result<()> {
        let (reader, writer) = transport::stdio();
        self.serve(reader, writer).await
    }

    /// Serve requests from `reader`, answering through `writer`.
    ///
    /// Every request runs in its own task, so a slow ledger command never
    /// blocks other calls. `notifications/cancelled` aborts the matching
    /// task, which drops (and kills) its ledger command without answering.
    /// Returns once input ends and all in-flight requests have finished.
    pub async fn serve<R, W>(
        &self,
        mut reader: MessageReader<R>,
        writer: MessageWriter<W>,
    ) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        tracing::info!("[MCP] Starting Model Context Protocol server");

        let mut tasks = JoinSet::new();
        let mut in_flight: HashMap<String, AbortHandle> = HashMap::new();

        loop {
            let message = match reader.next_message().await {
                Ok(Some(message)) => message,
                Ok(None) => {
                    tracing::info!("[MCP] Input closed, shutting down");
                    break;
                }
                Err(e) => {
                    tracing::error!("[MCP] Failed to read request: {}", e);
                    break;
                }
            };

            while let Some(done) = tasks.try_join_next() {
                finish_task(done, &mut in_flight);
            }

            let request = match message {
                Incoming::Request(request) => request,
                Incoming::Unparsable(detail) => {
                    let mut error = JsonRpcError::parse_error();
                    error.data = Some(Value::String(detail));
                    if !write_or_log(&writer, JsonRpcResponse::failure(None, error)).await {
                        break;
                    }
                    continue;
                }
                Incoming::Invalid { id, detail } => {
                    let mut error = JsonRpcError::invalid_request();
                    error.data = Some(Value::String(detail));
                    if !write_or_log(&writer, JsonRpcResponse::failure(id, error)).await {
                        break;
                    }
                    continue;
                }
            };

            if request.is_notification() && request.method == "notifications/cancelled" {
                cancel_request(request.params.as_ref(), &mut in_flight);
                continue;
            }

            tracing::debug!("[MCP] Received request: {}", request.method);
            let key = request.id.as_ref().map(request_key);
            let server = self.clone();
            let writer = writer.clone();
            let done_key = key.clone();
            let handle = tasks.spawn(async move {
                if let Some(response) = server.handle_request(request).await {
                    if let Err(e) = writer.write_response(&response).await {
                        tracing::error!("[MCP] Failed to write response: {}", e);
                    }
                }
                done_key
            });
            if let Some(key) = key {
                in_flight.insert(key, handle);
            }
        }

        while let Some(done) = tasks.join_next().await {
            finish_task(done, &mut in_flight);
        }

        Ok(())
    }

    /// Handle a JSON-RPC request. Notifications yield `None`.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.jsonrpc != "2.0" {
            return (!request.is_notification())
                .then(|| JsonRpcResponse::failure(request.id, JsonRpcError::invalid_request()));
        }

        if request.is_notification() {
            self.handle_notification(&request);
            return None;
        }

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(request),
            "ping" => JsonRpcResponse::success(request.id, Value::Object(Default::default())),
            "tools/list" => self.handle_tools_list(request),
            "tools/call" => self.handle_tools_call(request).await,
            _ => JsonRpcResponse::failure(request.id, JsonRpcError::method_not_found()),
        };
        Some(response)
    }

    fn handle_notification(&self, request: &JsonRpcRequest) {
        match request.method.as_str() {
            "notifications/initialized" | "initialized" => {
                self.initialized.store(true, Ordering::SeqCst);
                tracing::info!("[MCP] Server initialized");
            }
            "notifications/cancelled" => {
                tracing::debug!("[MCP] Cancellation outside the serve loop ignored");
            }
            other => tracing::debug!("[MCP] Ignoring notification: {}", other),
        }
    }

    /// Handle initialize request
    fn handle_initialize(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let params: InitializeParams = match request
            .params
            .map(serde_json::from_value::<InitializeParams>)
        {
            Some(Ok(params)) => params,
            _ => return JsonRpcResponse::failure(request.id, JsonRpcError::invalid_params()),
        };

        tracing::info!(
            "[MCP] Initialize from client: {} v{} (protocol {})",
            params.client_info.name,
            params.client_info.version,
            params.protocol_version
        );

        to_response(request.id, &InitializeResult::for_server())
    }

    /// Handle tools/list request
    fn handle_tools_list(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let tools = self
            .dispatcher
            .definitions()
            .into_iter()
            .map(Tool::from)
            .collect();

        to_response(request.id, &ToolsListResult { tools })
    }

    /// Handle tools/call request
    async fn handle_tools_call(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let params: CallToolParams = match request
            .params
            .map(serde_json::from_value::<CallToolParams>)
        {
            Some(Ok(params)) => params,
            _ => return JsonRpcResponse::failure(request.id, JsonRpcError::invalid_params()),
        };

        if !self.is_initialized() {
            tracing::warn!("[MCP] tools/call before initialization completed");
        }

        tracing::info!("[MCP] Calling tool: {}", params.name);

        let result = match self.dispatcher.call(&params.name, params.arguments).await {
            Ok(text) => CallToolResult::text(text),
            Err(e @ LedgerError::UnknownTool(_)) => {
                return JsonRpcResponse::failure(request.id, JsonRpcError::unknown_tool(&e));
            }
            Err(e) => {
                tracing::warn!(kind = e.kind(), "[MCP] Tool {} failed: {}", params.name, e);
                CallToolResult::error(e.to_string())
            }
        };

        to_response(request.id, &result)
    }

    /// Names of the tools this server exposes.
    pub fn tool_names(&self) -> Vec<&'static str> {
        LedgerTool::ALL.iter().map(|tool| tool.name()).collect()
    }
}

fn to_response<T: serde::Serialize>(id: Option<Value>, result: &T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(e) => {
            tracing::error!("[MCP] Failed to serialize result: {}", e);
            JsonRpcResponse::failure(id, JsonRpcError::internal_error())
        }
    }
}

/// Map key for a request id. Ids are compared by their JSON text.
fn request_key(id: &Value) -> String {
    id.to_string()
}

/// Abort the task answering the request named in `notifications/cancelled`.
fn cancel_request(params: Option<&Value>, in_flight: &mut HashMap<String, AbortHandle>) {
    let parsed = params.and_then(|p| serde_json::from_value::<CancelledParams>(p.clone()).ok());
    let Some(params) = parsed else {
        tracing::warn!("[MCP] Ignoring cancellation without a requestId");
        return;
    };

    match in_flight.remove(&request_key(&params.request_id)) {
        Some(handle) => {
            handle.abort();
            tracing::info!(
                "[MCP] Cancelled request {} ({})",
                params.request_id,
                params.reason.as_deref().unwrap_or("no reason given")
            );
        }
        None => tracing::debug!(
            "[MCP] Cancellation for unknown or finished request {}",
            params.request_id
        ),
    }
}

fn finish_task(
    result: std::result::Result<Option<String>, JoinError>,
    in_flight: &mut HashMap<String, AbortHandle>,
) {
    match result {
        Ok(Some(key)) => {
            in_flight.remove(&key);
        }
        Ok(None) => {}
        Err(e) if e.is_cancelled() => tracing::debug!("[MCP] Request task aborted"),
        Err(e) => tracing::error!("[MCP] Request task failed: {}", e),
    }
}

async fn write_or_log<W>(writer: &MessageWriter<W>, response: JsonRpcResponse) -> bool
where
    W: AsyncWrite + Unpin,
{
    match writer.write_response(&response).await {
        Ok(()) => true,
        Err(e) => {
            tracing::error!("[MCP] Failed to write response: {}", e);
            false
        }
    }
}
