//! Custom error types for tally
//!
//! This module defines the error hierarchy for the crate using thiserror
//! for ergonomic error definitions.
//!
//! The split follows the engine's failure policy: mutating operations fail
//! loudly with [`TallyError::Validation`] or [`TallyError::NotFound`], while
//! read and aggregation operations never fail because of absent data.

use thiserror::Error;

/// The main error type for tally operations
#[derive(Error, Debug)]
pub enum TallyError {
    /// Malformed input at a mutating call (non-positive amount, blank label)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Operation referenced an identifier or category with no record
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Storage layer errors (lock poisoning, corrupt data files)
    #[error("Storage error: {0}")]
    Storage(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl TallyError {
    /// Create a "not found" error for income entries
    pub fn income_not_found(identifier: impl ToString) -> Self {
        Self::NotFound {
            entity_type: "Income entry",
            identifier: identifier.to_string(),
        }
    }

    /// Create a "not found" error for expense entries
    pub fn expense_not_found(identifier: impl ToString) -> Self {
        Self::NotFound {
            entity_type: "Expense entry",
            identifier: identifier.to_string(),
        }
    }

    /// Create a "not found" error for budget limits
    pub fn limit_not_found(identifier: impl ToString) -> Self {
        Self::NotFound {
            entity_type: "Budget limit",
            identifier: identifier.to_string(),
        }
    }

    /// Create a "not found" error for savings goals
    pub fn goal_not_found(identifier: impl ToString) -> Self {
        Self::NotFound {
            entity_type: "Savings goal",
            identifier: identifier.to_string(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for TallyError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for TallyError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for tally operations
pub type TallyResult<T> = Result<T, TallyError>;
