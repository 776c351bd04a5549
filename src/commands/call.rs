// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! One-shot tool calls and tool listing from the command line

use serde_json::{Map, Value};

use crate::cli::CallArgs;
use crate::config::Settings;
use crate::error::Result;
use crate::ledger::{Dispatcher, LedgerTool, ToolRequest};
use crate::mcp::Tool;

/// Build the request a `call` invocation stands for.
pub fn request_from_args(args: &CallArgs) -> ToolRequest {
    let mut arguments = Map::new();
    if let Some(year) = &args.year {
        arguments.insert("year".to_string(), Value::String(year.clone()));
    }
    if let Some(account) = &args.account {
        arguments.insert("account".to_string(), Value::String(account.clone()));
    }
    ToolRequest::new(args.tool.clone(), arguments)
}

/// Run one tool through the same dispatcher the server uses.
pub async fn execute(settings: &Settings, args: &CallArgs) -> Result<String> {
    let dispatcher = Dispatcher::new(settings.ledger.clone());
    dispatcher.dispatch(&request_from_args(args)).await
}

/// Tool definitions as pretty JSON, in `tools/list` shape.
pub fn tools_json() -> Result<String> {
    let tools: Vec<Tool> = LedgerTool::definitions()
        .into_iter()
        .map(Tool::from)
        .collect();
    Ok(serde_json::to_string_pretty(&tools)?)
}
