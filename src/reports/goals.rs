//! Goal progress report
//!
//! One row per goal with its derived status at the evaluation date, plus an
//! overview aggregate across the whole set. Like every report, this is a pure
//! function of store contents and the explicit `as_of` date.

use chrono::NaiveDate;

use crate::error::TallyResult;
use crate::models::{GoalStatus, Money, SavingsGoal};
use crate::storage::LedgerStore;

/// One goal with its state at the evaluation date
#[derive(Debug, Clone)]
pub struct GoalProgressRow {
    pub goal: SavingsGoal,
    pub status: GoalStatus,
    /// Display percentage, capped to the 0..=100 range
    pub percent: f64,
}

/// Aggregate view across all goals
#[derive(Debug, Clone, PartialEq)]
pub struct GoalsOverview {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
    pub overdue: usize,
    pub total_target: Money,
    pub total_saved: Money,
    /// Saved as a percentage of the combined target, 0 when no goals exist
    pub overall_percent: f64,
}

/// Progress of every savings goal at a given date
#[derive(Debug, Clone)]
pub struct GoalProgressReport {
    pub as_of: NaiveDate,
    /// Rows sorted by target date ascending, ties by name
    pub rows: Vec<GoalProgressRow>,
    pub overview: GoalsOverview,
}

impl GoalProgressReport {
    pub fn generate(store: &LedgerStore, as_of: NaiveDate) -> TallyResult<Self> {
        let mut goals = store.goals.all()?;
        goals.sort_by(|a, b| {
            a.target_date
                .cmp(&b.target_date)
                .then_with(|| a.name.cmp(&b.name))
        });

        let mut overview = GoalsOverview {
            total: goals.len(),
            active: 0,
            completed: 0,
            overdue: 0,
            total_target: Money::zero(),
            total_saved: Money::zero(),
            overall_percent: 0.0,
        };

        let mut rows = Vec::with_capacity(goals.len());
        for goal in goals {
            let status = goal.status(as_of);
            match status {
                GoalStatus::Active => overview.active += 1,
                GoalStatus::Completed => overview.completed += 1,
                GoalStatus::Overdue => overview.overdue += 1,
            }
            overview.total_target += goal.target_amount;
            overview.total_saved += goal.current_amount;

            let percent = goal.progress_percent();
            rows.push(GoalProgressRow {
                goal,
                status,
                percent,
            });
        }

        overview.overall_percent = overview
            .total_saved
            .percent_of(overview.total_target)
            .clamp(0.0, 100.0);

        Ok(Self {
            as_of,
            rows,
            overview,
        })
    }
}
