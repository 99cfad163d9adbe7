//! Savings goal service
//!
//! Progress updates are additive deltas applied under a single write lock,
//! so two concurrent contributions both land. The stored amount is never
//! clamped; overshoot past the target and withdrawal below zero are both
//! preserved as-is.

use chrono::NaiveDate;
use tracing::info;

use crate::error::{TallyError, TallyResult};
use crate::models::{GoalFilter, GoalId, GoalStatus, Money, NewGoal, SavingsGoal};
use crate::storage::LedgerStore;

/// Service for savings goal tracking
pub struct GoalService<'a> {
    store: &'a LedgerStore,
}

impl<'a> GoalService<'a> {
    pub fn new(store: &'a LedgerStore) -> Self {
        Self { store }
    }

    /// Create a new savings goal
    pub fn create_goal(&self, draft: NewGoal) -> TallyResult<GoalId> {
        draft
            .validate()
            .map_err(|e| TallyError::Validation(e.to_string()))?;

        let raw = self
            .store
            .goals
            .insert_with(|id| draft.into_goal(GoalId::from_raw(id)))?;
        self.store.goals.save()?;

        let id = GoalId::from_raw(raw);
        info!(id = %id, "Created savings goal");
        Ok(id)
    }

    /// Fetch a goal by identifier
    pub fn goal(&self, id: GoalId) -> TallyResult<SavingsGoal> {
        self.store
            .goals
            .get(id.value())?
            .ok_or_else(|| TallyError::goal_not_found(id))
    }

    /// Apply a contribution (or withdrawal, when negative) to a goal
    ///
    /// Returns the updated goal. The new balance is stored unclamped.
    pub fn update_progress(&self, id: GoalId, delta: Money) -> TallyResult<SavingsGoal> {
        let updated = self
            .store
            .goals
            .modify(id.value(), |goal| goal.current_amount += delta)?
            .ok_or_else(|| TallyError::goal_not_found(id))?;
        self.store.goals.save()?;

        info!(id = %id, delta = %delta, balance = %updated.current_amount, "Updated goal progress");
        Ok(updated)
    }

    /// Display progress of a goal in the 0..=100 range
    pub fn progress_percent(&self, id: GoalId) -> TallyResult<f64> {
        Ok(self.goal(id)?.progress_percent())
    }

    /// Whether a goal's deadline has passed with the target unmet
    pub fn is_overdue(&self, id: GoalId, as_of: NaiveDate) -> TallyResult<bool> {
        Ok(self.goal(id)?.is_overdue(as_of))
    }

    /// Goals passing the filter, in ascending id order
    pub fn list_goals(&self, filter: &GoalFilter) -> TallyResult<Vec<SavingsGoal>> {
        self.store.goals.query(|g| filter.matches(g))
    }

    /// Goals in the given category, in ascending id order
    pub fn goals_by_category(&self, category: &str) -> TallyResult<Vec<SavingsGoal>> {
        self.store.goals.query(|g| g.category == category)
    }

    /// Active goals whose deadline falls within `days` of `as_of`
    ///
    /// Sorted soonest deadline first. Completed and already-overdue goals
    /// are excluded.
    pub fn goals_due_within(&self, days: i64, as_of: NaiveDate) -> TallyResult<Vec<SavingsGoal>> {
        let mut due: Vec<SavingsGoal> = self.store.goals.query(|g| {
            g.status(as_of) == GoalStatus::Active && (g.target_date - as_of).num_days() <= days
        })?;
        due.sort_by(|a, b| {
            a.target_date
                .cmp(&b.target_date)
                .then(a.id.cmp(&b.id))
        });
        Ok(due)
    }

    /// Delete a goal by identifier
    pub fn delete_goal(&self, id: GoalId) -> TallyResult<()> {
        if !self.store.goals.remove(id.value())? {
            return Err(TallyError::goal_not_found(id));
        }
        self.store.goals.save()?;
        info!(id = %id, "Deleted savings goal");
        Ok(())
    }
}
