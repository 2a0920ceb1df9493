//! Import/export of the full transaction list as a JSON document. Import
//! validates the document shape field by field before anything reaches the
//! store: one bad element rejects the whole document.

use std::collections::HashSet;
use std::fmt;

use chrono::NaiveDate;
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::errors::Result;
use crate::ledger::{Transaction, ValidationError};

const REQUIRED_FIELDS: &[&str] = &["id", "kind", "occurredAt", "description", "amount"];

/// One field-level problem found while validating an import document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub index: usize,
    pub field: String,
    pub message: String,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "element {}: {}: {}", self.index, self.field, self.message)
    }
}

/// Wholesale rejection of an import document, carrying every field-level
/// issue found so the caller can surface them together.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("import document rejected: {}", format_issues(.issues))]
pub struct ImportError {
    pub issues: Vec<FieldIssue>,
}

fn format_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(FieldIssue::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ImportError {
    fn document(message: impl Into<String>) -> Self {
        Self {
            issues: vec![FieldIssue {
                index: 0,
                field: "document".into(),
                message: message.into(),
            }],
        }
    }
}

/// Serializes the full transaction sequence to a structured text document.
pub fn export_document(transactions: &[Transaction]) -> Result<String> {
    Ok(serde_json::to_string_pretty(transactions)?)
}

/// Parses and validates an import document, returning the replacement
/// sequence for [`crate::ledger::TransactionStore::replace_all`]. The store
/// is only touched by the caller after this succeeds.
///
/// Validation runs in two layers: a shape pass over the raw JSON (required
/// fields, types, id uniqueness), then
/// [`Transaction::check_invariants`] on every deserialized record for the
/// semantic rules shared with manual entry.
pub fn import_document(input: &str) -> Result<Vec<Transaction>> {
    let elements: Vec<Value> = serde_json::from_str(input)
        .map_err(|err| ImportError::document(format!("not a JSON array: {}", err)))?;

    let mut issues = Vec::new();
    let mut seen_ids = HashSet::new();
    for (index, element) in elements.iter().enumerate() {
        validate_shape(index, element, &mut seen_ids, &mut issues);
    }
    if !issues.is_empty() {
        return Err(ImportError { issues }.into());
    }

    let transactions: Vec<Transaction> = serde_json::from_value(Value::Array(elements))?;
    for (index, transaction) in transactions.iter().enumerate() {
        if let Err(err) = transaction.check_invariants() {
            issues.push(FieldIssue {
                index,
                field: field_of(&err).to_string(),
                message: err.to_string(),
            });
        }
    }
    if !issues.is_empty() {
        return Err(ImportError { issues }.into());
    }
    Ok(transactions)
}

fn field_of(err: &ValidationError) -> &'static str {
    match err {
        ValidationError::DescriptionTooShort { .. } => "description",
        ValidationError::NonPositiveAmount => "amount",
        ValidationError::MissingClientName => "clientName",
        ValidationError::MissingCategory => "category",
        ValidationError::DuplicateId(_) => "id",
    }
}

fn validate_shape(
    index: usize,
    element: &Value,
    seen_ids: &mut HashSet<Uuid>,
    issues: &mut Vec<FieldIssue>,
) {
    let mut push = |field: &str, message: String| {
        issues.push(FieldIssue {
            index,
            field: field.to_string(),
            message,
        });
    };

    let Some(object) = element.as_object() else {
        push("document", "element is not an object".into());
        return;
    };

    for field in REQUIRED_FIELDS.iter().copied() {
        if !object.contains_key(field) {
            push(field, "required field is missing".into());
        }
    }

    if let Some(raw) = object.get("id") {
        match raw.as_str().and_then(|s| Uuid::parse_str(s).ok()) {
            Some(id) => {
                if !seen_ids.insert(id) {
                    push("id", format!("duplicate id {}", id));
                }
            }
            None => push("id", "must be a UUID string".into()),
        }
    }

    let kind = object.get("kind").and_then(Value::as_str);
    if let Some(raw) = object.get("kind") {
        if !matches!(kind, Some("sale") | Some("expense")) {
            push("kind", format!("must be \"sale\" or \"expense\", got {}", raw));
        }
    }

    if let Some(raw) = object.get("occurredAt") {
        let parsed = raw
            .as_str()
            .and_then(|s| s.parse::<NaiveDate>().ok());
        if parsed.is_none() {
            push("occurredAt", "must be an ISO date (YYYY-MM-DD)".into());
        }
    }

    if let Some(raw) = object.get("description") {
        if raw.as_str().is_none() {
            push("description", "must be a string".into());
        }
    }

    if let Some(raw) = object.get("amount") {
        if raw.as_f64().is_none() {
            push("amount", "must be a number".into());
        }
    }
}
