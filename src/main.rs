// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! ledger-service - MCP server for ledger queries
//!
//! Entry point for the ledger-service binary.

use clap::Parser;

use ledger_service::cli::{Cli, Commands};
use ledger_service::commands;
use ledger_service::config::Settings;
use ledger_service::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing. stdout carries the protocol, so logs go to stderr.
    let mut env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::WARN.into());

    // `-v` enables this crate's diagnostics; `RUST_LOG` still takes precedence.
    if cli.verbose > 0 {
        let level = if cli.verbose > 1 { "trace" } else { "debug" };
        if let Ok(parsed) = format!("ledger_service={}", level).parse() {
            env_filter = env_filter.add_directive(parsed);
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Init(ref args)) => {
            let path = commands::settings_path(&cli);
            let mut settings = Settings::default();
            commands::apply_cli_overrides(&mut settings, &cli);
            commands::init::execute(&path, &settings, args.force)?;
            println!("Wrote {}", path.display());
            Ok(())
        }
        Some(Commands::Tools) => {
            println!("{}", commands::call::tools_json()?);
            Ok(())
        }
        Some(Commands::Call(ref args)) => {
            let settings = commands::load_settings(&cli)?;
            match commands::call::execute(&settings, args).await {
                Ok(text) => {
                    println!("{}", text);
                    Ok(())
                }
                Err(e) => {
                    eprintln!("Error [{}]: {}", e.kind(), e);
                    std::process::exit(1);
                }
            }
        }
        Some(Commands::Serve) | None => {
            let settings = commands::load_settings(&cli)?;
            commands::serve::execute(&settings).await
        }
    }
}
