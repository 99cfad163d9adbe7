//! Read-side reports and time series
//!
//! Reports are stateless: each one is generated from the current store
//! contents and explicit arguments, with no hidden clock reads. Anything
//! date-dependent takes `as_of` from the caller.

pub mod goals;
pub mod monthly;
pub mod series;

pub use goals::{GoalProgressReport, GoalProgressRow, GoalsOverview};
pub use monthly::{CategorySpend, MonthlySummary};
pub use series::{
    income_vs_expenses_series, spending_trend, MonthSpend, MonthTotals, MonthlyTotalsSeries,
};
