// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! The closed set of ledger tools

use std::fmt;
use std::str::FromStr;

use crate::error::LedgerError;

use super::schema::{SchemaBuilder, ToolDefinition};

/// One of the three read-only ledger queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LedgerTool {
    /// Enumerate every account in the year's ledger
    ListAccounts,
    /// Balance of a single account
    AccountBalance,
    /// Transaction register of a single account
    AccountRegister,
}

impl LedgerTool {
    /// All tools, in the order they are advertised.
    pub const ALL: [LedgerTool; 3] = [
        LedgerTool::ListAccounts,
        LedgerTool::AccountBalance,
        LedgerTool::AccountRegister,
    ];

    /// Wire name of the tool.
    pub fn name(self) -> &'static str {
        match self {
            LedgerTool::ListAccounts => "list-accounts",
            LedgerTool::AccountBalance => "account-balance",
            LedgerTool::AccountRegister => "account-register",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            LedgerTool::ListAccounts => "List all ledger accounts",
            LedgerTool::AccountBalance => "Get the balance of an account",
            LedgerTool::AccountRegister => "Get the register of an account",
        }
    }

    /// Whether the tool operates on a single named account.
    pub fn requires_account(self) -> bool {
        match self {
            LedgerTool::ListAccounts => false,
            LedgerTool::AccountBalance | LedgerTool::AccountRegister => true,
        }
    }

    /// Definition advertised through `tools/list`.
    pub fn definition(self) -> ToolDefinition {
        let schema = SchemaBuilder::new().string(
            "year",
            "Four-digit year selecting the ledger file, e.g. \"2024\"",
            true,
        );
        let schema = if self.requires_account() {
            schema.string(
                "account",
                "Full account name, e.g. \"Expenses:Food\"",
                true,
            )
        } else {
            schema
        };

        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: schema.build(),
        }
    }

    /// Definitions for every tool.
    pub fn definitions() -> Vec<ToolDefinition> {
        Self::ALL.iter().map(|tool| tool.definition()).collect()
    }
}

impl fmt::Display for LedgerTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LedgerTool {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tool| tool.name() == s)
            .ok_or_else(|| LedgerError::UnknownTool(s.to_string()))
    }
}
