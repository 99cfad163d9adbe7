//! Income and expense ledger entries
//!
//! Entries are immutable once persisted: an edit is modeled as delete +
//! recreate, so there is no update path to keep consistent. Validation runs
//! on the draft types before the store ever sees a record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{ExpenseId, IncomeId};
use super::money::Money;

/// A recorded income entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeEntry {
    pub id: IncomeId,
    pub date: NaiveDate,
    pub source: String,
    pub amount: Money,
    #[serde(default)]
    pub description: String,
}

/// A recorded expense entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseEntry {
    pub id: ExpenseId,
    pub date: NaiveDate,
    pub category: String,
    pub amount: Money,
    #[serde(default)]
    pub description: String,
}

/// Draft of an income entry, before an identifier is assigned
#[derive(Debug, Clone)]
pub struct NewIncome {
    pub date: NaiveDate,
    pub source: String,
    pub amount: Money,
    pub description: String,
}

impl NewIncome {
    pub fn new(date: NaiveDate, source: impl Into<String>, amount: Money) -> Self {
        Self {
            date,
            source: source.into(),
            amount,
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn validate(&self) -> Result<(), EntryValidationError> {
        if !self.amount.is_positive() {
            return Err(EntryValidationError::NonPositiveAmount);
        }
        if self.source.trim().is_empty() {
            return Err(EntryValidationError::BlankSource);
        }
        Ok(())
    }

    pub(crate) fn into_entry(self, id: IncomeId) -> IncomeEntry {
        IncomeEntry {
            id,
            date: self.date,
            source: self.source,
            amount: self.amount,
            description: self.description,
        }
    }
}

/// Draft of an expense entry, before an identifier is assigned
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub date: NaiveDate,
    pub category: String,
    pub amount: Money,
    pub description: String,
}

impl NewExpense {
    pub fn new(date: NaiveDate, category: impl Into<String>, amount: Money) -> Self {
        Self {
            date,
            category: category.into(),
            amount,
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn validate(&self) -> Result<(), EntryValidationError> {
        if !self.amount.is_positive() {
            return Err(EntryValidationError::NonPositiveAmount);
        }
        if self.category.trim().is_empty() {
            return Err(EntryValidationError::BlankCategory);
        }
        Ok(())
    }

    pub(crate) fn into_entry(self, id: ExpenseId) -> ExpenseEntry {
        ExpenseEntry {
            id,
            date: self.date,
            category: self.category,
            amount: self.amount,
            description: self.description,
        }
    }
}

/// Common view over income and expense entries
///
/// The filter and sort machinery works against this trait so the same
/// predicate code serves both sides of the ledger. The label is the income
/// source or the expense category.
pub trait LedgerEntry {
    fn raw_id(&self) -> u64;
    fn date(&self) -> NaiveDate;
    fn label(&self) -> &str;
    fn amount(&self) -> Money;
    fn description(&self) -> &str;
}

impl LedgerEntry for IncomeEntry {
    fn raw_id(&self) -> u64 {
        self.id.value()
    }

    fn date(&self) -> NaiveDate {
        self.date
    }

    fn label(&self) -> &str {
        &self.source
    }

    fn amount(&self) -> Money {
        self.amount
    }

    fn description(&self) -> &str {
        &self.description
    }
}

impl LedgerEntry for ExpenseEntry {
    fn raw_id(&self) -> u64 {
        self.id.value()
    }

    fn date(&self) -> NaiveDate {
        self.date
    }

    fn label(&self) -> &str {
        &self.category
    }

    fn amount(&self) -> Money {
        self.amount
    }

    fn description(&self) -> &str {
        &self.description
    }
}

/// Validation failures for entry drafts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryValidationError {
    NonPositiveAmount,
    BlankSource,
    BlankCategory,
}

impl fmt::Display for EntryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount => write!(f, "Amount must be positive"),
            Self::BlankSource => write!(f, "Income source cannot be empty"),
            Self::BlankCategory => write!(f, "Expense category cannot be empty"),
        }
    }
}

impl std::error::Error for EntryValidationError {}
