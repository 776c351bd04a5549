// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! ledger-service - read-only ledger queries for AI assistants.
//!
//! This crate exposes three tools (`list-accounts`, `account-balance`,
//! `account-register`) over the Model Context Protocol. Each call is
//! validated, turned into an invocation of an external ledger-compatible
//! command for the requested year, and answered with that command's output.
//!
//! Architecture highlights:
//! - `ledger`: tool enum, argument validation, command construction, the
//!   runner seam, output formatting, and the dispatcher tying them together
//! - `mcp`: JSON-RPC 2.0 stdio transport and the MCP request handlers
//! - `config`: process-wide settings (base path, file layout, binary)
//! - `cli`, `commands`: the `ledger-service` binary

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod ledger;
pub mod mcp;

pub use error::{LedgerError, Result};
