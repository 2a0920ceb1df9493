//! Boundary to the external expense categorization service. The core only
//! owns the request/response contract and the single-slot request
//! discipline; actual I/O lives with the host.

use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::ledger::ValidationError;

/// Shortest description worth sending to the advisor.
pub const MIN_SUGGESTION_DESCRIPTION_LEN: usize = 3;

/// Input contract: a draft expense's free-text description and amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionRequest {
    pub description: String,
    pub amount: f64,
}

impl SuggestionRequest {
    /// Validates the draft fields before any call leaves the core.
    pub fn new(
        description: impl Into<String>,
        amount: f64,
    ) -> std::result::Result<Self, ValidationError> {
        let description = description.into().trim().to_string();
        if description.chars().count() < MIN_SUGGESTION_DESCRIPTION_LEN {
            return Err(ValidationError::DescriptionTooShort {
                min: MIN_SUGGESTION_DESCRIPTION_LEN,
            });
        }
        if !amount.is_finite() || amount <= 0.0 {
            return Err(ValidationError::NonPositiveAmount);
        }
        Ok(Self {
            description,
            amount,
        })
    }
}

/// Output contract: a suggested category label with a confidence score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySuggestion {
    pub category: String,
    pub confidence: f64,
}

impl CategorySuggestion {
    /// Clamps confidence into `[0, 1]`; services occasionally over-report.
    pub fn new(category: impl Into<String>, confidence: f64) -> Self {
        Self {
            category: category.into(),
            confidence: confidence.clamp(0.0, 1.0),
        }
    }
}

/// Seam the host implements over its network or process boundary. A failed
/// call surfaces as [`crate::errors::LedgerError::AdvisorUnavailable`] and
/// never blocks manual category entry.
pub trait CategoryAdvisor {
    fn suggest(&self, request: &SuggestionRequest) -> Result<CategorySuggestion>;
}

/// Token identifying one in-flight suggestion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestionToken(u64);

/// Single-slot request state: at most one outstanding suggestion matters
/// per draft. Issuing a new token invalidates interest in every prior one,
/// so completions are compared by generation instead of being cancelled.
#[derive(Debug, Default)]
pub struct SuggestionSlot {
    generation: u64,
}

impl SuggestionSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers interest in a fresh request, superseding any prior one.
    pub fn begin(&mut self) -> SuggestionToken {
        self.generation += 1;
        SuggestionToken(self.generation)
    }

    pub fn is_current(&self, token: SuggestionToken) -> bool {
        token.0 == self.generation
    }

    /// Accepts a completion only when its token is still current; stale
    /// responses are dropped.
    pub fn accept(
        &self,
        token: SuggestionToken,
        suggestion: CategorySuggestion,
    ) -> Option<CategorySuggestion> {
        if self.is_current(token) {
            Some(suggestion)
        } else {
            tracing::debug!(
                stale = token.0,
                current = self.generation,
                "stale category suggestion ignored"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_validates_draft_fields() {
        assert!(SuggestionRequest::new("Lunch with client", 42.0).is_ok());
        assert_eq!(
            SuggestionRequest::new("ab", 42.0).unwrap_err(),
            ValidationError::DescriptionTooShort { min: 3 }
        );
        assert_eq!(
            SuggestionRequest::new("Lunch", 0.0).unwrap_err(),
            ValidationError::NonPositiveAmount
        );
    }

    #[test]
    fn confidence_is_clamped() {
        assert_eq!(CategorySuggestion::new("Meals", 1.7).confidence, 1.0);
        assert_eq!(CategorySuggestion::new("Meals", -0.2).confidence, 0.0);
    }

    #[test]
    fn newer_request_supersedes_older_completion() {
        let mut slot = SuggestionSlot::new();
        let first = slot.begin();
        let second = slot.begin();

        let stale = slot.accept(first, CategorySuggestion::new("Meals", 0.9));
        assert_eq!(stale, None);

        let fresh = slot.accept(second, CategorySuggestion::new("Travel", 0.8));
        assert_eq!(fresh, Some(CategorySuggestion::new("Travel", 0.8)));
    }
}
