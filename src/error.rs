// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Error types for the ledger service
//!
//! Dispatch failures fall into three categories (validation, unknown tool,
//! execution). The remaining variants cover startup and I/O concerns.

use thiserror::Error;

/// Main error type for ledger service operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// A required argument is missing, empty, or malformed
    #[error("Invalid arguments: {0}")]
    Validation(String),

    /// Tool name outside the fixed set
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// The external ledger command failed or could not be run
    #[error("Ledger command failed: {0}")]
    Execution(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LedgerError {
    /// Stable category name, reported to callers alongside the message.
    pub fn kind(&self) -> &'static str {
        match self {
            LedgerError::Validation(_) => "validation",
            LedgerError::UnknownTool(_) => "unknown_tool",
            LedgerError::Execution(_) => "execution",
            LedgerError::Config(_) => "config",
            LedgerError::Io(_) => "io",
            LedgerError::Json(_) => "json",
        }
    }

    /// Whether the caller can fix the failure by changing its arguments.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            LedgerError::Validation(_) | LedgerError::UnknownTool(_)
        )
    }
}

/// Result type alias for ledger service operations
pub type Result<T> = std::result::Result<T, LedgerError>;
