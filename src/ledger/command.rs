// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! External command construction

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::LedgerConfig;

use super::query::LedgerQuery;
use super::tool::LedgerTool;

/// A fully resolved invocation of the external ledger command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    /// Program to spawn
    pub program: String,
    /// Arguments, in order
    pub args: Vec<String>,
    /// Ledger file the command reads
    pub ledger_file: PathBuf,
    /// Maximum run time
    pub timeout: Duration,
}

impl CommandInvocation {
    /// Build `<binary> [extra_args..] -f <file> <verb> [account]`.
    pub fn for_query(config: &LedgerConfig, query: &LedgerQuery) -> Self {
        let ledger_file = config.ledger_file(&query.year);

        let verb = match query.tool {
            LedgerTool::ListAccounts => &config.verbs.accounts,
            LedgerTool::AccountBalance => &config.verbs.balance,
            LedgerTool::AccountRegister => &config.verbs.register,
        };

        let mut args = config.extra_args.clone();
        args.push("-f".to_string());
        args.push(ledger_file.display().to_string());
        args.push(verb.clone());
        if let Some(account) = &query.account {
            args.push(account.clone());
        }

        Self {
            program: config.binary.clone(),
            args,
            ledger_file,
            timeout: config.timeout(),
        }
    }
}

impl fmt::Display for CommandInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.contains(char::is_whitespace) {
                write!(f, " '{}'", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}
