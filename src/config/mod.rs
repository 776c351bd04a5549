// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Configuration module for the ledger service
//!
//! Handles loading and validating the process-wide settings.

pub mod settings;

pub use settings::*;
