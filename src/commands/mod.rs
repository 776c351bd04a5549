// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Subcommand implementations
//!
//! Settings resolution is shared: defaults, then the settings file, then
//! environment variables, then CLI flags.

pub mod call;
pub mod init;
pub mod serve;

use std::path::PathBuf;

use crate::cli::Cli;
use crate::config::Settings;
use crate::error::Result;

/// Settings file selected by `--config`, or the default location.
pub fn settings_path(cli: &Cli) -> PathBuf {
    cli.config.clone().unwrap_or_else(Settings::default_path)
}

/// Load, override, and validate settings for this process.
pub fn load_settings(cli: &Cli) -> Result<Settings> {
    let path = settings_path(cli);
    tracing::debug!("Loading settings from {}", path.display());

    let mut settings = Settings::load_from(&path)?;
    settings.apply_env_overrides();
    apply_cli_overrides(&mut settings, cli);
    settings.validate()?;

    Ok(settings)
}

/// CLI flags win over every other source.
pub fn apply_cli_overrides(settings: &mut Settings, cli: &Cli) {
    if let Some(base_path) = &cli.base_path {
        settings.ledger.base_path = base_path.clone();
    }
    if let Some(binary) = &cli.binary {
        settings.ledger.binary = binary.clone();
    }
    if let Some(timeout) = cli.timeout {
        settings.ledger.timeout_secs = timeout;
    }
}
