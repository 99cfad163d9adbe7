//! Savings goal model
//!
//! A goal's lifecycle state is never stored: ACTIVE / COMPLETED / OVERDUE is
//! derived from (current_amount, target_date, as_of_date) at query time, so
//! there is no completion flag to go stale. The stored current_amount is
//! unclamped: withdrawals can drive it negative and contributions can
//! overshoot the target; clamping happens only in the display percentage.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::GoalId;
use super::money::Money;

/// A savings goal with a target amount and deadline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingsGoal {
    pub id: GoalId,
    pub name: String,
    pub target_amount: Money,
    pub current_amount: Money,
    pub target_date: NaiveDate,
    pub category: String,
    #[serde(default)]
    pub description: String,
}

/// Derived lifecycle state of a goal at a given date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalStatus {
    Active,
    Completed,
    Overdue,
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Completed => write!(f, "completed"),
            Self::Overdue => write!(f, "overdue"),
        }
    }
}

impl SavingsGoal {
    /// Whether the target has been reached or exceeded
    pub fn is_completed(&self) -> bool {
        self.current_amount >= self.target_amount
    }

    /// Whether the deadline has passed with the goal unmet
    ///
    /// A goal that has reached its target is never overdue, regardless of
    /// how far past the target date `as_of` is.
    pub fn is_overdue(&self, as_of: NaiveDate) -> bool {
        self.target_date < as_of && !self.is_completed()
    }

    /// Lifecycle state at `as_of`
    pub fn status(&self, as_of: NaiveDate) -> GoalStatus {
        if self.is_completed() {
            GoalStatus::Completed
        } else if self.target_date < as_of {
            GoalStatus::Overdue
        } else {
            GoalStatus::Active
        }
    }

    /// Display progress in the 0–100 range
    ///
    /// Capped at 100 for overshoot and floored at 0 for a withdrawn-negative
    /// balance. A zero target amount (unreachable through creation
    /// validation, but possible in stored legacy data) yields 0 rather than
    /// a division error.
    pub fn progress_percent(&self) -> f64 {
        self.current_amount
            .percent_of(self.target_amount)
            .clamp(0.0, 100.0)
    }

    /// Amount still needed to reach the target, floored at zero
    pub fn remaining_amount(&self) -> Money {
        if self.is_completed() {
            Money::zero()
        } else {
            self.target_amount - self.current_amount
        }
    }

    /// Days until the target date, clamped at zero once the deadline passes
    pub fn days_remaining(&self, as_of: NaiveDate) -> i64 {
        (self.target_date - as_of).num_days().max(0)
    }
}

/// Draft of a savings goal, before an identifier is assigned
#[derive(Debug, Clone)]
pub struct NewGoal {
    pub name: String,
    pub target_amount: Money,
    pub current_amount: Money,
    pub target_date: NaiveDate,
    pub category: String,
    pub description: String,
}

impl NewGoal {
    pub fn new(
        name: impl Into<String>,
        target_amount: Money,
        target_date: NaiveDate,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            target_amount,
            current_amount: Money::zero(),
            target_date,
            category: category.into(),
            description: String::new(),
        }
    }

    pub fn starting_at(mut self, current_amount: Money) -> Self {
        self.current_amount = current_amount;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Creation-time validation
    ///
    /// A past target date is deliberately allowed; such a goal simply reports
    /// as overdue from the start.
    pub fn validate(&self) -> Result<(), GoalValidationError> {
        if self.name.trim().is_empty() {
            return Err(GoalValidationError::BlankName);
        }
        if self.category.trim().is_empty() {
            return Err(GoalValidationError::BlankCategory);
        }
        if !self.target_amount.is_positive() {
            return Err(GoalValidationError::NonPositiveTarget);
        }
        if self.current_amount.is_negative() {
            return Err(GoalValidationError::NegativeCurrent);
        }
        Ok(())
    }

    pub(crate) fn into_goal(self, id: GoalId) -> SavingsGoal {
        SavingsGoal {
            id,
            name: self.name,
            target_amount: self.target_amount,
            current_amount: self.current_amount,
            target_date: self.target_date,
            category: self.category,
            description: self.description,
        }
    }
}

/// Validation failures for goal drafts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalValidationError {
    BlankName,
    BlankCategory,
    NonPositiveTarget,
    NegativeCurrent,
}

impl fmt::Display for GoalValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlankName => write!(f, "Goal name cannot be empty"),
            Self::BlankCategory => write!(f, "Goal category cannot be empty"),
            Self::NonPositiveTarget => write!(f, "Target amount must be positive"),
            Self::NegativeCurrent => write!(f, "Starting amount cannot be negative"),
        }
    }
}

impl std::error::Error for GoalValidationError {}
