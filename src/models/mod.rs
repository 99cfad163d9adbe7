//! Core data models for tally
//!
//! This module contains the data structures that represent the budgeting
//! domain: ledger entries, budget limits, savings goals, and the calendar
//! and money primitives they share.

pub mod entry;
pub mod filter;
pub mod goal;
pub mod ids;
pub mod limit;
pub mod money;
pub mod month;

pub use entry::{ExpenseEntry, IncomeEntry, LedgerEntry, NewExpense, NewIncome};
pub use filter::{EntryFilter, EntrySort, GoalFilter};
pub use goal::{GoalStatus, NewGoal, SavingsGoal};
pub use ids::{ExpenseId, GoalId, IncomeId};
pub use limit::BudgetLimit;
pub use money::Money;
pub use month::{Month, MonthRange};
