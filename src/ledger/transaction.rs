use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Shortest description accepted for a transaction.
pub const MIN_DESCRIPTION_LEN: usize = 2;

/// Field-level failure raised before a draft ever reaches the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("description must be at least {min} characters")]
    DescriptionTooShort { min: usize },
    #[error("amount must be a positive number")]
    NonPositiveAmount,
    #[error("client name is required for sales")]
    MissingClientName,
    #[error("category is required for expenses")]
    MissingCategory,
    #[error("duplicate transaction id: {0}")]
    DuplicateId(Uuid),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Sale,
    Expense,
}

/// A single recorded sale or expense event. Immutable once created;
/// corrections happen by replacing the store contents, never in place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: Uuid,
    pub kind: TransactionKind,
    pub occurred_at: NaiveDate,
    pub description: String,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Transaction {
    /// Creates a validated sale. The client name is mandatory and the
    /// category stays empty.
    pub fn sale(
        occurred_at: NaiveDate,
        description: impl Into<String>,
        amount: f64,
        client_name: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let description = validated_description(description.into())?;
        let amount = validated_amount(amount)?;
        let client_name = client_name.into().trim().to_string();
        if client_name.is_empty() {
            return Err(ValidationError::MissingClientName);
        }
        Ok(Self {
            id: Uuid::new_v4(),
            kind: TransactionKind::Sale,
            occurred_at,
            description,
            amount,
            client_name: Some(client_name),
            category: None,
        })
    }

    /// Creates a validated expense. The category is mandatory and the
    /// client name stays empty.
    pub fn expense(
        occurred_at: NaiveDate,
        description: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let description = validated_description(description.into())?;
        let amount = validated_amount(amount)?;
        let category = category.into().trim().to_string();
        if category.is_empty() {
            return Err(ValidationError::MissingCategory);
        }
        Ok(Self {
            id: Uuid::new_v4(),
            kind: TransactionKind::Expense,
            occurred_at,
            description,
            amount,
            client_name: None,
            category: Some(category),
        })
    }

    pub fn is_sale(&self) -> bool {
        matches!(self.kind, TransactionKind::Sale)
    }

    pub fn is_expense(&self) -> bool {
        matches!(self.kind, TransactionKind::Expense)
    }

    /// Re-checks the invariants on an already-materialized record, e.g. one
    /// deserialized from an import document.
    pub fn check_invariants(&self) -> Result<(), ValidationError> {
        validated_description(self.description.clone())?;
        validated_amount(self.amount)?;
        match self.kind {
            TransactionKind::Sale => {
                if self
                    .client_name
                    .as_deref()
                    .map(str::trim)
                    .unwrap_or_default()
                    .is_empty()
                {
                    return Err(ValidationError::MissingClientName);
                }
            }
            TransactionKind::Expense => {
                if self
                    .category
                    .as_deref()
                    .map(str::trim)
                    .unwrap_or_default()
                    .is_empty()
                {
                    return Err(ValidationError::MissingCategory);
                }
            }
        }
        Ok(())
    }
}

fn validated_description(raw: String) -> Result<String, ValidationError> {
    let trimmed = raw.trim().to_string();
    if trimmed.chars().count() < MIN_DESCRIPTION_LEN {
        return Err(ValidationError::DescriptionTooShort {
            min: MIN_DESCRIPTION_LEN,
        });
    }
    Ok(trimmed)
}

fn validated_amount(amount: f64) -> Result<f64, ValidationError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(ValidationError::NonPositiveAmount);
    }
    Ok(amount)
}
