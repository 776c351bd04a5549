// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Text formatting of ledger command output

use super::query::LedgerQuery;
use super::tool::LedgerTool;

/// Turn raw command stdout into the text returned to the caller.
pub fn format_output(query: &LedgerQuery, raw: &str) -> String {
    match query.tool {
        LedgerTool::ListAccounts => format_accounts(raw),
        LedgerTool::AccountBalance => format_balance(query.account_name(), raw),
        LedgerTool::AccountRegister => format_register(query.account_name(), raw),
    }
}

/// `Ledger Accounts:` followed by one `- name` line per non-blank account.
pub fn format_accounts(raw: &str) -> String {
    let mut text = String::from("Ledger Accounts:");
    let mut any = false;
    for account in raw.lines().map(str::trim).filter(|l| !l.is_empty()) {
        text.push_str("\n- ");
        text.push_str(account);
        any = true;
    }
    if !any {
        text.push_str("\n(no accounts)");
    }
    text
}

pub fn format_balance(account: &str, raw: &str) -> String {
    let balance = raw.trim();
    if balance.is_empty() {
        format!("The balance of {} is 0 (no postings)", account)
    } else if balance.contains('\n') {
        // Multi-commodity balances keep their column layout
        format!("The balance of {} is:\n{}", account, trim_block(raw))
    } else {
        format!("The balance of {} is {}", account, balance)
    }
}

pub fn format_register(account: &str, raw: &str) -> String {
    let register = trim_block(raw);
    if register.is_empty() {
        format!("The register of {} is empty", account)
    } else {
        format!("The register of {} is:\n{}", account, register)
    }
}

/// Drop leading/trailing blank lines and trailing spaces, keep indentation.
fn trim_block(raw: &str) -> String {
    let lines: Vec<&str> = raw.lines().map(str::trim_end).collect();
    let start = lines.iter().position(|l| !l.is_empty()).unwrap_or(lines.len());
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(start, |i| i + 1);
    lines[start..end].join("\n")
}
