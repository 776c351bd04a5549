// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Ledger query tools
//!
//! Three read-only tools (`list-accounts`, `account-balance`,
//! `account-register`) backed by an external ledger-compatible command.
//! Ledger syntax is never parsed here; command output is relayed after
//! light formatting.

pub mod command;
pub mod dispatcher;
pub mod format;
pub mod query;
pub mod runner;
pub mod schema;
pub mod tool;

pub use command::CommandInvocation;
pub use dispatcher::Dispatcher;
pub use query::{LedgerQuery, ToolRequest};
pub use runner::{LedgerRunner, ProcessRunner};
pub use schema::{InputSchema, SchemaBuilder, ToolDefinition};
pub use tool::LedgerTool;
