// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Settings file initialization

use std::path::Path;

use crate::config::Settings;
use crate::error::{LedgerError, Result};

/// Write `settings` to `path`, refusing to clobber an existing file unless forced.
/// Settings that `serve` would reject are never written.
pub fn execute(path: &Path, settings: &Settings, force: bool) -> Result<()> {
    settings.validate()?;

    if path.exists() && !force {
        return Err(LedgerError::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    settings.save_to(path)?;
    tracing::info!("Wrote settings to {}", path.display());
    Ok(())
}
