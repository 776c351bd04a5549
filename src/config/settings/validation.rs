// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use std::path::PathBuf;

use crate::error::{LedgerError, Result};

use super::{Settings, YEAR_PLACEHOLDER};

impl Settings {
    /// Apply `LEDGER_BASE_PATH` / `LEDGER_BINARY` from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary lookup. Empty values are ignored.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Priority: env var > config file.
        if let Some(base) = lookup("LEDGER_BASE_PATH").filter(|v| !v.trim().is_empty()) {
            self.ledger.base_path = PathBuf::from(base);
        }
        if let Some(binary) = lookup("LEDGER_BINARY").filter(|v| !v.trim().is_empty()) {
            self.ledger.binary = binary;
        }
    }

    /// Reject settings the dispatcher cannot work with.
    pub fn validate(&self) -> Result<()> {
        let ledger = &self.ledger;

        if ledger.binary.trim().is_empty() {
            return Err(LedgerError::Config(
                "ledger.binary cannot be empty".to_string(),
            ));
        }

        if !ledger.file_pattern.contains(YEAR_PLACEHOLDER) {
            return Err(LedgerError::Config(format!(
                "ledger.file_pattern '{}' must contain {}",
                ledger.file_pattern, YEAR_PLACEHOLDER
            )));
        }

        if ledger.timeout_secs == 0 {
            return Err(LedgerError::Config(
                "ledger.timeout_secs must be greater than zero".to_string(),
            ));
        }

        let verbs = [
            &ledger.verbs.accounts,
            &ledger.verbs.balance,
            &ledger.verbs.register,
        ];
        if verbs.iter().any(|v| v.trim().is_empty()) {
            return Err(LedgerError::Config(
                "ledger.verbs entries cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
