// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Settings management for the ledger service
//!
//! Handles loading settings from ~/.ledger-service/settings.json. Settings are
//! read once at startup and shared read-only for the rest of the process.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

mod io;
mod validation;

/// Placeholder substituted with the requested year in `file_pattern`.
pub const YEAR_PLACEHOLDER: &str = "{year}";

/// Main settings structure, stored in ~/.ledger-service/settings.json
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Ledger command and file layout
    #[serde(default)]
    pub ledger: LedgerConfig,
}

/// Where ledger files live and how the external command is run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Directory holding the per-year ledger files
    #[serde(default = "default_base_path")]
    pub base_path: PathBuf,

    /// File location relative to `base_path`; `{year}` is replaced
    #[serde(default = "default_file_pattern")]
    pub file_pattern: String,

    /// Ledger-compatible binary (`ledger`, `hledger`, or an absolute path)
    #[serde(default = "default_binary")]
    pub binary: String,

    /// Arguments passed before `-f <file>` on every invocation
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_args: Vec<String>,

    /// Per-invocation timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Subcommand names used for each query
    #[serde(default)]
    pub verbs: VerbsConfig,
}

/// Subcommand verbs of the external tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerbsConfig {
    #[serde(default = "default_accounts_verb")]
    pub accounts: String,

    #[serde(default = "default_balance_verb")]
    pub balance: String,

    #[serde(default = "default_register_verb")]
    pub register: String,
}

impl LedgerConfig {
    /// Base path with a leading `~` expanded.
    pub fn resolved_base_path(&self) -> PathBuf {
        expand_tilde(&self.base_path)
    }

    /// Full path of the ledger file for `year`.
    pub fn ledger_file(&self, year: &str) -> PathBuf {
        let relative = self.file_pattern.replace(YEAR_PLACEHOLDER, year);
        self.resolved_base_path().join(relative)
    }

    /// Invocation timeout as a `Duration`.
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
            file_pattern: default_file_pattern(),
            binary: default_binary(),
            extra_args: Vec::new(),
            timeout_secs: default_timeout_secs(),
            verbs: VerbsConfig::default(),
        }
    }
}

impl Default for VerbsConfig {
    fn default() -> Self {
        Self {
            accounts: default_accounts_verb(),
            balance: default_balance_verb(),
            register: default_register_verb(),
        }
    }
}

/// Expand ~ to home directory in a path.
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    path.to_path_buf()
}

fn default_base_path() -> PathBuf {
    PathBuf::from("~/ledger")
}

fn default_file_pattern() -> String {
    "{year}/experiment.ledger".to_string()
}

fn default_binary() -> String {
    "ledger".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_accounts_verb() -> String {
    "accounts".to_string()
}

fn default_balance_verb() -> String {
    "balance".to_string()
}

fn default_register_verb() -> String {
    "register".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ledger_config_default() {
        let config = LedgerConfig::default();
        assert_eq!(config.binary, "ledger");
        assert_eq!(config.file_pattern, "{year}/experiment.ledger");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.extra_args.is_empty());
        assert_eq!(config.verbs.accounts, "accounts");
        assert_eq!(config.verbs.balance, "balance");
        assert_eq!(config.verbs.register, "register");
    }

    #[test]
    fn test_ledger_file_substitutes_year() {
        let config = LedgerConfig {
            base_path: PathBuf::from("/data/ledger"),
            ..Default::default()
        };

        assert_eq!(
            config.ledger_file("2024"),
            PathBuf::from("/data/ledger/2024/experiment.ledger")
        );
    }

    #[test]
    fn test_ledger_file_flat_pattern() {
        let config = LedgerConfig {
            base_path: PathBuf::from("/data"),
            file_pattern: "{year}.journal".to_string(),
            ..Default::default()
        };

        assert_eq!(
            config.ledger_file("2023"),
            PathBuf::from("/data/2023.journal")
        );
    }

    #[test]
    fn test_expand_tilde() {
        let expanded = expand_tilde(std::path::Path::new("~/books"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expanded, home.join("books"));
        }
    }

    #[test]
    fn test_expand_tilde_absolute_untouched() {
        let expanded = expand_tilde(std::path::Path::new("/srv/books"));
        assert_eq!(expanded, PathBuf::from("/srv/books"));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let json = r#"{"ledger": {"base_path": "/srv/books"}}"#;
        let settings: Settings = serde_json::from_str(json).unwrap();

        assert_eq!(settings.ledger.base_path, PathBuf::from("/srv/books"));
        assert_eq!(settings.ledger.binary, "ledger");
        assert_eq!(settings.ledger.verbs.register, "register");
    }

    #[test]
    fn test_settings_load_from_nonexistent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nonexistent.json");

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.ledger.binary, "ledger");
    }

    #[test]
    fn test_settings_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");

        let mut settings = Settings::default();
        settings.ledger.binary = "hledger".to_string();
        settings.ledger.timeout_secs = 5;

        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded.ledger.binary, "hledger");
        assert_eq!(loaded.ledger.timeout_secs, 5);
    }

    #[test]
    fn test_settings_save_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("settings.json");

        Settings::default().save_to(&path).unwrap();
        assert!(path.exists());
    }
}
