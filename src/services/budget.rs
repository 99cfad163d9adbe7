//! Budget service for ledger entries and spending limits
//!
//! All mutations validate first, then apply, then persist the affected table.
//! Read paths never fail on absent data: an unknown category or an empty
//! month aggregates to zero rather than an error.

use tracing::{debug, info, warn};

use crate::error::{TallyError, TallyResult};
use crate::models::{
    BudgetLimit, EntryFilter, ExpenseEntry, ExpenseId, IncomeEntry, IncomeId, LedgerEntry, Money,
    Month, NewExpense, NewIncome,
};
use crate::storage::LedgerStore;

/// Spending position for one category in one month
///
/// The derived fields are `None` when the category has no limit set. A limit
/// of zero (possible in legacy data files, not through [`set_budget_limit`])
/// leaves `percentage_used` as `None` since the ratio is meaningless, while
/// `over_budget` still reports whether anything was spent at all.
///
/// [`set_budget_limit`]: BudgetService::set_budget_limit
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetStatus {
    pub category: String,
    pub spent: Money,
    pub limit: Option<Money>,
    pub remaining: Option<Money>,
    pub percentage_used: Option<f64>,
    pub over_budget: Option<bool>,
}

/// A category whose monthly spend exceeded its limit
#[derive(Debug, Clone, PartialEq)]
pub struct OverspendAlert {
    pub category: String,
    pub limit: Money,
    pub spent: Money,
    pub overspent: Money,
    pub percent_over: f64,
}

/// Service for ledger operations and budget limit evaluation
pub struct BudgetService<'a> {
    store: &'a LedgerStore,
}

impl<'a> BudgetService<'a> {
    pub fn new(store: &'a LedgerStore) -> Self {
        Self { store }
    }

    /// Record a new income entry
    pub fn add_income(&self, draft: NewIncome) -> TallyResult<IncomeId> {
        draft
            .validate()
            .map_err(|e| TallyError::Validation(e.to_string()))?;

        let raw = self
            .store
            .income
            .insert_with(|id| draft.into_entry(IncomeId::from_raw(id)))?;
        self.store.income.save()?;

        let id = IncomeId::from_raw(raw);
        info!(id = %id, "Recorded income entry");
        Ok(id)
    }

    /// Record a new expense entry
    pub fn add_expense(&self, draft: NewExpense) -> TallyResult<ExpenseId> {
        draft
            .validate()
            .map_err(|e| TallyError::Validation(e.to_string()))?;

        let raw = self
            .store
            .expenses
            .insert_with(|id| draft.into_entry(ExpenseId::from_raw(id)))?;
        self.store.expenses.save()?;

        let id = ExpenseId::from_raw(raw);
        info!(id = %id, "Recorded expense entry");
        Ok(id)
    }

    /// Delete an income entry by identifier
    pub fn delete_income(&self, id: IncomeId) -> TallyResult<()> {
        if !self.store.income.remove(id.value())? {
            return Err(TallyError::income_not_found(id));
        }
        self.store.income.save()?;
        info!(id = %id, "Deleted income entry");
        Ok(())
    }

    /// Delete an expense entry by identifier
    pub fn delete_expense(&self, id: ExpenseId) -> TallyResult<()> {
        if !self.store.expenses.remove(id.value())? {
            return Err(TallyError::expense_not_found(id));
        }
        self.store.expenses.save()?;
        info!(id = %id, "Deleted expense entry");
        Ok(())
    }

    /// Income entries passing the filter
    pub fn income(&self, filter: &EntryFilter) -> TallyResult<Vec<IncomeEntry>> {
        let mut entries = self.store.income.query(|e| filter.matches(e))?;
        filter.order(&mut entries);
        Ok(entries)
    }

    /// Expense entries passing the filter
    pub fn expenses(&self, filter: &EntryFilter) -> TallyResult<Vec<ExpenseEntry>> {
        let mut entries = self.store.expenses.query(|e| filter.matches(e))?;
        filter.order(&mut entries);
        Ok(entries)
    }

    /// Total income recorded in a month
    pub fn monthly_income(&self, month: Month) -> TallyResult<Money> {
        Ok(self
            .store
            .income
            .query(|e| month.contains(e.date))?
            .iter()
            .map(|e| e.amount)
            .sum())
    }

    /// Total expenses recorded in a month
    pub fn monthly_expenses(&self, month: Month) -> TallyResult<Money> {
        Ok(self
            .store
            .expenses
            .query(|e| month.contains(e.date))?
            .iter()
            .map(|e| e.amount)
            .sum())
    }

    /// Total spend for one category in a month (case-sensitive match)
    pub fn monthly_spend(&self, category: &str, month: Month) -> TallyResult<Money> {
        Ok(self
            .store
            .expenses
            .query(|e| e.category == category && month.contains(e.date))?
            .iter()
            .map(|e| e.amount)
            .sum())
    }

    /// Set or replace the monthly limit for a category
    pub fn set_budget_limit(&self, limit: BudgetLimit) -> TallyResult<()> {
        limit
            .validate()
            .map_err(|e| TallyError::Validation(e.to_string()))?;

        info!(category = %limit.category, limit = %limit.monthly_limit, "Set budget limit");
        self.store.limits.upsert(limit)?;
        self.store.limits.save()
    }

    /// Remove the limit for a category
    pub fn remove_budget_limit(&self, category: &str) -> TallyResult<()> {
        if !self.store.limits.remove(category)? {
            return Err(TallyError::limit_not_found(category));
        }
        self.store.limits.save()?;
        info!(category = %category, "Removed budget limit");
        Ok(())
    }

    /// The limit set for a category, if any
    pub fn budget_limit(&self, category: &str) -> TallyResult<Option<BudgetLimit>> {
        self.store.limits.get(category)
    }

    /// All limits, sorted by category
    pub fn budget_limits(&self) -> TallyResult<Vec<BudgetLimit>> {
        self.store.limits.all()
    }

    /// Spending position of a category for a month
    ///
    /// Always succeeds: a category with no limit and no spending yields a
    /// status with zero spend and no derived fields.
    pub fn budget_status(&self, category: &str, month: Month) -> TallyResult<BudgetStatus> {
        let spent = self.monthly_spend(category, month)?;
        let limit = self.store.limits.get(category)?;
        debug!(category = %category, month = %month, spent = %spent, "Evaluated budget status");
        Ok(Self::status_for(category, spent, limit))
    }

    fn status_for(category: &str, spent: Money, limit: Option<BudgetLimit>) -> BudgetStatus {
        match limit {
            Some(limit) => {
                let cap = limit.monthly_limit;
                BudgetStatus {
                    category: category.to_string(),
                    spent,
                    limit: Some(cap),
                    remaining: Some(cap - spent),
                    percentage_used: if cap.is_zero() {
                        None
                    } else {
                        Some(spent.percent_of(cap))
                    },
                    over_budget: Some(spent > cap),
                }
            }
            None => BudgetStatus {
                category: category.to_string(),
                spent,
                limit: None,
                remaining: None,
                percentage_used: None,
                over_budget: None,
            },
        }
    }

    /// Categories whose spend for the month exceeds their limit
    ///
    /// Sorted by category. Categories without a limit never alert.
    pub fn overspending_alerts(&self, month: Month) -> TallyResult<Vec<OverspendAlert>> {
        let mut alerts = Vec::new();
        for limit in self.store.limits.all()? {
            let spent = self.monthly_spend(&limit.category, month)?;
            if spent > limit.monthly_limit {
                let overspent = spent - limit.monthly_limit;
                warn!(
                    category = %limit.category,
                    month = %month,
                    overspent = %overspent,
                    "Category over budget"
                );
                alerts.push(OverspendAlert {
                    category: limit.category,
                    limit: limit.monthly_limit,
                    spent,
                    overspent,
                    percent_over: overspent.percent_of(limit.monthly_limit),
                });
            }
        }
        Ok(alerts)
    }

    /// Full-text search over both sides of the ledger
    ///
    /// Case-insensitive substring match against the label (source or
    /// category) and the description.
    pub fn search(&self, query: &str) -> TallyResult<(Vec<IncomeEntry>, Vec<ExpenseEntry>)> {
        let needle = query.to_lowercase();
        let matches = |label: &str, description: &str| {
            label.to_lowercase().contains(&needle)
                || description.to_lowercase().contains(&needle)
        };

        let income = self
            .store
            .income
            .query(|e| matches(e.label(), e.description()))?;
        let expenses = self
            .store
            .expenses
            .query(|e| matches(e.label(), e.description()))?;
        Ok((income, expenses))
    }
}
