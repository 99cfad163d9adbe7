//! Per-category monthly budget limit
//!
//! Limits are keyed by category label with at most one active limit per
//! category; setting a limit for an existing category replaces it. Categories
//! form an open set of plain labels, with no referential link to expenses.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// A monthly spending ceiling for a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetLimit {
    pub category: String,
    pub monthly_limit: Money,
    #[serde(default)]
    pub description: String,
}

impl BudgetLimit {
    pub fn new(category: impl Into<String>, monthly_limit: Money) -> Self {
        Self {
            category: category.into(),
            monthly_limit,
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn validate(&self) -> Result<(), LimitValidationError> {
        if self.category.trim().is_empty() {
            return Err(LimitValidationError::BlankCategory);
        }
        if !self.monthly_limit.is_positive() {
            return Err(LimitValidationError::NonPositiveLimit);
        }
        Ok(())
    }
}

/// Validation failures for budget limits
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LimitValidationError {
    BlankCategory,
    NonPositiveLimit,
}

impl fmt::Display for LimitValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlankCategory => write!(f, "Budget category cannot be empty"),
            Self::NonPositiveLimit => write!(f, "Monthly limit must be positive"),
        }
    }
}

impl std::error::Error for LimitValidationError {}
