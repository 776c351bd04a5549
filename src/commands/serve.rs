// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! MCP server command

use crate::config::Settings;
use crate::error::Result;
use crate::ledger::Dispatcher;
use crate::mcp::{McpServer, PROTOCOL_VERSION};

/// Build the server for the given settings.
pub fn build_server(settings: &Settings) -> McpServer {
    McpServer::new(Dispatcher::new(settings.ledger.clone()))
}

/// Execute the MCP server command
pub async fn execute(settings: &Settings) -> Result<()> {
    let ledger = &settings.ledger;
    let base_path = ledger.resolved_base_path();

    tracing::info!(
        protocol = PROTOCOL_VERSION,
        base_path = %base_path.display(),
        binary = %ledger.binary,
        "Starting ledger MCP server"
    );

    if !base_path.is_dir() {
        tracing::warn!(
            "Ledger base path {} does not exist; every call will fail until it does",
            base_path.display()
        );
    }

    let server = build_server(settings);
    for name in server.tool_names() {
        tracing::debug!("Registered tool: {}", name);
    }

    server.run().await
}
