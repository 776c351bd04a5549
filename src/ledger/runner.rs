// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Ledger command execution
//!
//! [`LedgerRunner`] is the seam between the dispatcher and the external
//! process. [`ProcessRunner`] spawns the real command; tests substitute
//! their own implementation.

use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::time::timeout;

use crate::error::{LedgerError, Result};

use super::command::CommandInvocation;

/// Runs a ledger command and returns its standard output
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LedgerRunner: Send + Sync {
    async fn run(&self, invocation: &CommandInvocation) -> Result<String>;
}

/// Runs the command as a child process
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl LedgerRunner for ProcessRunner {
    async fn run(&self, invocation: &CommandInvocation) -> Result<String> {
        tracing::debug!(command = %invocation, "Spawning ledger command");

        // kill_on_drop reaps the child if the call is cancelled mid-flight
        let mut child = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    LedgerError::Execution(format!(
                        "ledger command not found: {}",
                        invocation.program
                    ))
                } else {
                    LedgerError::Execution(format!(
                        "failed to start {}: {}",
                        invocation.program, e
                    ))
                }
            })?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        let result = timeout(invocation.timeout, async {
            let (stdout, stderr) = tokio::join!(read_all(stdout), read_all(stderr));
            let status = child.wait().await?;
            Ok::<_, std::io::Error>((status, stdout, stderr))
        })
        .await;

        let (status, stdout, stderr) = match result {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(LedgerError::Execution(format!(
                    "failed to wait for {}: {}",
                    invocation.program, e
                )))
            }
            Err(_) => {
                // kill() also waits, so the child never outlives the call
                if let Err(e) = child.kill().await {
                    tracing::warn!("Failed to kill timed out ledger command: {}", e);
                }
                return Err(LedgerError::Execution(format!(
                    "{} timed out after {}s",
                    invocation.program,
                    invocation.timeout.as_secs_f64()
                )));
            }
        };

        if !status.success() {
            let code = status
                .code()
                .map(|c| c.to_string())
                .unwrap_or_else(|| "signal".to_string());
            let stderr = stderr.trim();
            let detail = if stderr.is_empty() {
                "no error output".to_string()
            } else {
                stderr.to_string()
            };
            return Err(LedgerError::Execution(format!(
                "{} exited with {}: {}",
                invocation.program, code, detail
            )));
        }

        if !stderr.trim().is_empty() {
            tracing::debug!(stderr = %stderr.trim(), "Ledger command wrote to stderr");
        }

        Ok(stdout)
    }
}

/// Drain a pipe to a string, decoding lossily.
async fn read_all<R>(pipe: Option<R>) -> String
where
    R: AsyncRead + Unpin,
{
    let Some(mut pipe) = pipe else {
        return String::new();
    };
    let mut buf = Vec::new();
    if let Err(e) = pipe.read_to_end(&mut buf).await {
        tracing::warn!("Failed reading ledger command output: {}", e);
    }
    String::from_utf8_lossy(&buf).into_owned()
}
