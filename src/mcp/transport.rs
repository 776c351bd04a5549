// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! MCP transport layer - stdio-based communication
//!
//! MCP servers communicate via stdio (standard input/output) using
//! newline-delimited JSON-RPC 2.0. The reader is owned by the server loop;
//! the writer is cloned into every request task and serializes whole lines.

use serde_json::Value;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::Mutex;

use super::protocol::{JsonRpcRequest, JsonRpcResponse};
use crate::error::Result;

/// One line read from the client
#[derive(Debug)]
pub enum Incoming {
    /// A well-formed request or notification
    Request(JsonRpcRequest),
    /// Not UTF-8 or not JSON; answered with a parse error
    Unparsable(String),
    /// Valid JSON that is not a request; carries the id when one is readable
    Invalid { id: Option<Value>, detail: String },
}

impl Incoming {
    /// Classify one trimmed, non-empty line.
    pub fn from_line(line: &[u8]) -> Self {
        let text = match std::str::from_utf8(line) {
            Ok(text) => text,
            Err(e) => return Incoming::Unparsable(format!("invalid UTF-8: {}", e)),
        };

        let value: Value = match serde_json::from_str(text) {
            Ok(value) => value,
            Err(e) => return Incoming::Unparsable(e.to_string()),
        };

        let id = value.get("id").cloned();
        match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(req) => Incoming::Request(req),
            Err(e) => Incoming::Invalid {
                id,
                detail: e.to_string(),
            },
        }
    }
}

/// Reads JSON-RPC messages, one per line
pub struct MessageReader<R> {
    reader: R,
}

impl<R> MessageReader<R>
where
    R: AsyncBufRead + Unpin,
{
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Next message, or `None` at end of input. Blank lines are skipped.
    ///
    /// Lines are read as bytes, so a line that is not UTF-8 is reported as
    /// unparsable instead of ending the stream.
    pub async fn next_message(&mut self) -> Result<Option<Incoming>> {
        loop {
            let mut line = Vec::new();
            if self.reader.read_until(b'\n', &mut line).await? == 0 {
                return Ok(None);
            }

            let line = line.trim_ascii();
            if line.is_empty() {
                continue;
            }

            let incoming = Incoming::from_line(line);
            match &incoming {
                Incoming::Unparsable(detail) => {
                    tracing::error!("Failed to parse JSON-RPC request: {}", detail)
                }
                Incoming::Invalid { detail, .. } => {
                    tracing::error!("Invalid JSON-RPC request: {}", detail)
                }
                Incoming::Request(_) => {}
            }
            return Ok(Some(incoming));
        }
    }
}

/// Writes JSON-RPC responses, one per line. Clones share the same sink.
pub struct MessageWriter<W> {
    inner: Arc<Mutex<W>>,
}

impl<W> Clone for MessageWriter<W> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<W> MessageWriter<W>
where
    W: AsyncWrite + Unpin,
{
    pub fn new(writer: W) -> Self {
        Self {
            inner: Arc::new(Mutex::new(writer)),
        }
    }

    /// Write a response as a single line and flush.
    pub async fn write_response(&self, response: &JsonRpcResponse) -> Result<()> {
        let mut json = serde_json::to_string(response)?;
        json.push('\n');

        let mut writer = self.inner.lock().await;
        writer.write_all(json.as_bytes()).await?;
        writer.flush().await?;

        Ok(())
    }

    /// Recover the sink once every clone has been dropped.
    pub fn into_inner(self) -> Option<W> {
        Arc::try_unwrap(self.inner).ok().map(Mutex::into_inner)
    }
}

/// Reader and writer bound to the process stdin/stdout.
pub fn stdio() -> (
    MessageReader<BufReader<tokio::io::Stdin>>,
    MessageWriter<tokio::io::Stdout>,
) {
    (
        MessageReader::new(BufReader::new(tokio::io::stdin())),
        MessageWriter::new(tokio::io::stdout()),
    )
}
