//! Business logic services
//!
//! Services borrow the store and layer validation, persistence, and
//! aggregation on top of it. Each logical operation is atomic with respect
//! to a single table.

pub mod budget;
pub mod goals;

pub use budget::{BudgetService, BudgetStatus, OverspendAlert};
pub use goals::GoalService;
