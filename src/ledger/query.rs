// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Tool requests and argument validation
//!
//! A [`ToolRequest`] is what arrives from the caller: a tool name and a loose
//! JSON argument map. Validation turns it into a [`LedgerQuery`] or fails
//! before anything is executed.

use serde_json::{Map, Value};

use crate::error::{LedgerError, Result};

use super::tool::LedgerTool;

/// An incoming tool call, as received
#[derive(Debug, Clone)]
pub struct ToolRequest {
    pub name: String,
    pub arguments: Map<String, Value>,
}

impl ToolRequest {
    pub fn new(name: impl Into<String>, arguments: Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }

    /// Build from an optional JSON value. `null` or absent means no arguments.
    ///
    /// An unknown tool name is reported before the shape of the arguments.
    pub fn from_value(name: impl Into<String>, arguments: Option<Value>) -> Result<Self> {
        let name = name.into();
        name.parse::<LedgerTool>()?;

        let arguments = match arguments {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(map)) => map,
            Some(other) => {
                return Err(LedgerError::Validation(format!(
                    "arguments must be an object, got {}",
                    json_type_name(&other)
                )))
            }
        };
        Ok(Self::new(name, arguments))
    }

    /// Resolve the tool and validate its arguments.
    pub fn validate(&self) -> Result<LedgerQuery> {
        let tool: LedgerTool = self.name.parse()?;
        LedgerQuery::from_arguments(tool, &self.arguments)
    }
}

/// Validated, immutable arguments for one tool call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerQuery {
    pub tool: LedgerTool,
    pub year: String,
    pub account: Option<String>,
}

impl LedgerQuery {
    /// Validate `arguments` for `tool`.
    pub fn from_arguments(tool: LedgerTool, arguments: &Map<String, Value>) -> Result<Self> {
        let year = required_string(arguments, "year")?;
        validate_year(&year)?;

        let account = if tool.requires_account() {
            let account = required_string(arguments, "account")?;
            validate_account(&account)?;
            Some(account)
        } else {
            None
        };

        Ok(Self {
            tool,
            year,
            account,
        })
    }

    /// Account name, or "" for account-less tools.
    pub fn account_name(&self) -> &str {
        self.account.as_deref().unwrap_or_default()
    }
}

/// Read a required, non-empty string argument. Numbers are accepted as text.
fn required_string(arguments: &Map<String, Value>, key: &str) -> Result<String> {
    let value = match arguments.get(key) {
        None | Some(Value::Null) => {
            return Err(LedgerError::Validation(format!("{} is required", key)))
        }
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => {
            return Err(LedgerError::Validation(format!(
                "{} must be a string, got {}",
                key,
                json_type_name(other)
            )))
        }
    };

    if value.is_empty() {
        return Err(LedgerError::Validation(format!("{} cannot be empty", key)));
    }
    Ok(value)
}

/// The year becomes a path component, so it must be exactly four digits.
fn validate_year(year: &str) -> Result<()> {
    if year.len() == 4 && year.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(LedgerError::Validation(format!(
            "year must be a four-digit year, got '{}'",
            year
        )))
    }
}

/// Accounts are passed positionally; a leading dash would read as a flag.
fn validate_account(account: &str) -> Result<()> {
    if account.starts_with('-') {
        return Err(LedgerError::Validation(format!(
            "account must not start with '-', got '{}'",
            account
        )));
    }
    if account.chars().any(|c| c.is_control()) {
        return Err(LedgerError::Validation(
            "account must not contain control characters".to_string(),
        ));
    }
    Ok(())
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_unknown_name_wins_over_bad_arguments() {
        let err = ToolRequest::from_value("drop-books", Some(json!("2024"))).unwrap_err();
        assert!(matches!(err, LedgerError::UnknownTool(ref n) if n == "drop-books"));
    }

    #[test]
    fn test_list_accounts_needs_only_year() {
        let query =
            LedgerQuery::from_arguments(LedgerTool::ListAccounts, &args(json!({"year": "2024"})))
                .unwrap();

        assert_eq!(query.year, "2024");
        assert!(query.account.is_none());
        assert_eq!(query.account_name(), "");
    }

    #[test]
    fn test_list_accounts_ignores_account() {
        let query = LedgerQuery::from_arguments(
            LedgerTool::ListAccounts,
            &args(json!({"year": "2024", "account": "Assets"})),
        )
        .unwrap();
        assert!(query.account.is_none());
    }

    #[test]
    fn test_missing_year_for_every_tool() {
        for tool in LedgerTool::ALL {
            let err =
                LedgerQuery::from_arguments(tool, &args(json!({"account": "Assets"}))).unwrap_err();
            assert!(matches!(err, LedgerError::Validation(_)));
            assert!(err.to_string().contains("year is required"));
        }
    }

    #[test]
    fn test_missing_account() {
        for tool in [LedgerTool::AccountBalance, LedgerTool::AccountRegister] {
            let err = LedgerQuery::from_arguments(tool, &args(json!({"year": "2024"}))).unwrap_err();
            assert!(err.to_string().contains("account is required"));
        }
    }

    #[test]
    fn test_empty_and_whitespace_rejected() {
        let err = LedgerQuery::from_arguments(
            LedgerTool::AccountBalance,
            &args(json!({"year": "2024", "account": "   "})),
        )
        .unwrap_err();
        assert!(err.to_string().contains("account cannot be empty"));

        let err =
            LedgerQuery::from_arguments(LedgerTool::ListAccounts, &args(json!({"year": ""})))
                .unwrap_err();
        assert!(err.to_string().contains("year cannot be empty"));
    }

    #[test]
    fn test_null_treated_as_missing() {
        let err =
            LedgerQuery::from_arguments(LedgerTool::ListAccounts, &args(json!({"year": null})))
                .unwrap_err();
        assert!(err.to_string().contains("year is required"));
    }

    #[test]
    fn test_numeric_year_accepted() {
        let query =
            LedgerQuery::from_arguments(LedgerTool::ListAccounts, &args(json!({"year": 2023})))
                .unwrap();
        assert_eq!(query.year, "2023");
    }

    #[test]
    fn test_year_path_traversal_rejected() {
        for year in ["../etc", "20245", "24", "2o24", "2024/.."] {
            let err =
                LedgerQuery::from_arguments(LedgerTool::ListAccounts, &args(json!({"year": year})))
                    .unwrap_err();
            assert!(err.to_string().contains("four-digit"), "year {}", year);
        }
    }

    #[test]
    fn test_account_flag_rejected() {
        let err = LedgerQuery::from_arguments(
            LedgerTool::AccountRegister,
            &args(json!({"year": "2024", "account": "--file=/etc/passwd"})),
        )
        .unwrap_err();
        assert!(err.to_string().contains("must not start with '-'"));
    }

    #[test]
    fn test_wrong_type_rejected() {
        let err = LedgerQuery::from_arguments(
            LedgerTool::AccountBalance,
            &args(json!({"year": "2024", "account": ["Assets"]})),
        )
        .unwrap_err();
        assert!(err.to_string().contains("account must be a string, got array"));
    }

    #[test]
    fn test_account_trimmed() {
        let query = LedgerQuery::from_arguments(
            LedgerTool::AccountBalance,
            &args(json!({"year": "2024", "account": "  Expenses:Food "})),
        )
        .unwrap();
        assert_eq!(query.account.as_deref(), Some("Expenses:Food"));
    }

    #[test]
    fn test_request_unknown_tool() {
        let request = ToolRequest::new("drop-table", args(json!({"year": "2024"})));
        assert!(matches!(
            request.validate(),
            Err(LedgerError::UnknownTool(_))
        ));
    }

    #[test]
    fn test_request_null_arguments() {
        let request = ToolRequest::from_value("list-accounts", None).unwrap();
        assert!(request.arguments.is_empty());

        let request = ToolRequest::from_value("list-accounts", Some(Value::Null)).unwrap();
        assert!(matches!(
            request.validate(),
            Err(LedgerError::Validation(_))
        ));
    }

    #[test]
    fn test_request_non_object_arguments() {
        let err = ToolRequest::from_value("list-accounts", Some(json!("2024"))).unwrap_err();
        assert!(err.to_string().contains("arguments must be an object"));
    }
}
