// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Tool dispatcher
//!
//! Validates a tool request, resolves the ledger file for the requested year,
//! runs the external command through a [`LedgerRunner`], and formats its output.
//! The dispatcher holds only read-only configuration, so a single instance
//! can serve any number of concurrent calls.

use serde_json::Value;
use std::sync::Arc;

use crate::config::LedgerConfig;
use crate::error::{LedgerError, Result};

use super::command::CommandInvocation;
use super::format::format_output;
use super::query::{LedgerQuery, ToolRequest};
use super::runner::{LedgerRunner, ProcessRunner};
use super::schema::ToolDefinition;
use super::tool::LedgerTool;

/// Maps tool calls onto ledger command invocations
#[derive(Clone)]
pub struct Dispatcher {
    config: Arc<LedgerConfig>,
    runner: Arc<dyn LedgerRunner>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    /// Create a dispatcher that spawns the configured ledger binary.
    pub fn new(config: LedgerConfig) -> Self {
        Self::with_runner(config, Arc::new(ProcessRunner::new()))
    }

    /// Create a dispatcher with a custom runner.
    pub fn with_runner(config: LedgerConfig, runner: Arc<dyn LedgerRunner>) -> Self {
        Self {
            config: Arc::new(config),
            runner,
        }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Definitions of every tool, in advertised order.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        LedgerTool::definitions()
    }

    /// Call a tool by name with loose JSON arguments.
    pub async fn call(&self, name: &str, arguments: Option<Value>) -> Result<String> {
        let request = ToolRequest::from_value(name, arguments)?;
        self.dispatch(&request).await
    }

    /// Validate and execute a request.
    pub async fn dispatch(&self, request: &ToolRequest) -> Result<String> {
        let query = request.validate()?;
        self.execute(&query).await
    }

    /// Execute an already validated query.
    pub async fn execute(&self, query: &LedgerQuery) -> Result<String> {
        let invocation = CommandInvocation::for_query(&self.config, query);

        tracing::info!(
            tool = %query.tool,
            year = %query.year,
            account = query.account.as_deref().unwrap_or("-"),
            "Running ledger query"
        );

        ensure_ledger_file(&invocation).await?;

        let raw = self.runner.run(&invocation).await.map_err(|e| {
            tracing::warn!(tool = %query.tool, year = %query.year, "Ledger query failed: {}", e);
            e
        })?;

        Ok(format_output(query, &raw))
    }
}

/// A missing year file is an execution failure, never an empty result.
async fn ensure_ledger_file(invocation: &CommandInvocation) -> Result<()> {
    match tokio::fs::metadata(&invocation.ledger_file).await {
        Ok(meta) if meta.is_file() => Ok(()),
        Ok(_) => Err(LedgerError::Execution(format!(
            "ledger path is not a file: {}",
            invocation.ledger_file.display()
        ))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(LedgerError::Execution(
            format!(
                "no ledger file for this year: {}",
                invocation.ledger_file.display()
            ),
        )),
        Err(e) => Err(LedgerError::Execution(format!(
            "cannot read ledger file {}: {}",
            invocation.ledger_file.display(),
            e
        ))),
    }
}
