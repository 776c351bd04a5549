// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! CLI argument definitions using Clap
//!
//! Defines all command-line arguments and subcommands for the ledger service.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// ledger-service - read-only ledger queries over the Model Context Protocol
#[derive(Parser, Debug)]
#[command(name = "ledger-service")]
#[command(version, about = "Read-only ledger queries over the Model Context Protocol")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Directory holding the per-year ledger files (overrides config)
    #[arg(long, global = true)]
    pub base_path: Option<PathBuf>,

    /// Ledger-compatible binary to run (overrides config)
    #[arg(long, global = true)]
    pub binary: Option<String>,

    /// Command timeout in seconds (overrides config)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the MCP server on stdio (default when no command given)
    Serve,

    /// Print the tool definitions as JSON
    Tools,

    /// Run a single tool and print its result
    Call(CallArgs),

    /// Write a default settings file
    Init(InitArgs),
}

/// Arguments for the call subcommand
#[derive(clap::Args, Debug)]
pub struct CallArgs {
    /// Tool name (list-accounts, account-balance, account-register)
    pub tool: String,

    /// Ledger year
    #[arg(short, long)]
    pub year: Option<String>,

    /// Account name (balance and register)
    #[arg(short, long)]
    pub account: Option<String>,
}

/// Arguments for the init subcommand
#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing settings file
    #[arg(short, long)]
    pub force: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::parse_from(["ledger-service"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_serve_command() {
        let cli = Cli::parse_from(["ledger-service", "serve"]);
        assert!(matches!(cli.command, Some(Commands::Serve)));
    }

    #[test]
    fn test_verbose_count() {
        let cli = Cli::parse_from(["ledger-service", "-vv", "serve"]);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_global_overrides_after_subcommand() {
        let cli = Cli::parse_from([
            "ledger-service",
            "serve",
            "--base-path",
            "/books",
            "--binary",
            "hledger",
            "--timeout",
            "5",
        ]);
        assert_eq!(cli.base_path, Some(PathBuf::from("/books")));
        assert_eq!(cli.binary.as_deref(), Some("hledger"));
        assert_eq!(cli.timeout, Some(5));
    }

    #[test]
    fn test_call_with_year_and_account() {
        let cli = Cli::parse_from([
            "ledger-service",
            "call",
            "account-balance",
            "-y",
            "2024",
            "-a",
            "Expenses:Food",
        ]);
        if let Some(Commands::Call(args)) = cli.command {
            assert_eq!(args.tool, "account-balance");
            assert_eq!(args.year.as_deref(), Some("2024"));
            assert_eq!(args.account.as_deref(), Some("Expenses:Food"));
        } else {
            panic!("Expected Call command");
        }
    }

    #[test]
    fn test_call_requires_tool() {
        assert!(Cli::try_parse_from(["ledger-service", "call"]).is_err());
    }

    #[test]
    fn test_init_force() {
        let cli = Cli::parse_from(["ledger-service", "init", "--force"]);
        if let Some(Commands::Init(args)) = cli.command {
            assert!(args.force);
        } else {
            panic!("Expected Init command");
        }
    }
}
