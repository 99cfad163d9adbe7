//! Monthly summary report
//!
//! A pure aggregation of one calendar month of ledger activity: totals,
//! savings rate, per-category breakdown, and the spending position of every
//! budgeted or active category.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::TallyResult;
use crate::models::{Money, Month};
use crate::services::{BudgetService, BudgetStatus, OverspendAlert};
use crate::storage::LedgerStore;

/// Total spend for one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySpend {
    pub category: String,
    pub amount: Money,
}

/// One month of ledger activity, aggregated
#[derive(Debug, Clone)]
pub struct MonthlySummary {
    pub month: Month,
    pub total_income: Money,
    pub total_expenses: Money,
    pub net: Money,
    /// Net as a percentage of income, 0 when there was no income
    pub savings_rate: f64,
    /// Spend per category, largest first (ties by category name)
    pub category_breakdown: Vec<CategorySpend>,
    /// Status rows for every category with a limit or with spend this month,
    /// sorted by category
    pub budget_status: Vec<BudgetStatus>,
    pub alerts: Vec<OverspendAlert>,
}

impl MonthlySummary {
    pub fn generate(store: &LedgerStore, month: Month) -> TallyResult<Self> {
        let budget = BudgetService::new(store);

        let total_income = budget.monthly_income(month)?;
        let total_expenses = budget.monthly_expenses(month)?;
        let net = total_income - total_expenses;
        let savings_rate = net.percent_of(total_income);

        let mut by_category: BTreeMap<String, Money> = BTreeMap::new();
        for entry in store.expenses.query(|e| month.contains(e.date))? {
            *by_category.entry(entry.category).or_insert(Money::zero()) += entry.amount;
        }

        let mut categories: BTreeSet<String> = by_category.keys().cloned().collect();
        for limit in store.limits.all()? {
            categories.insert(limit.category);
        }

        let mut budget_status = Vec::with_capacity(categories.len());
        for category in &categories {
            budget_status.push(budget.budget_status(category, month)?);
        }

        let mut category_breakdown: Vec<CategorySpend> = by_category
            .into_iter()
            .map(|(category, amount)| CategorySpend { category, amount })
            .collect();
        category_breakdown.sort_by(|a, b| {
            b.amount
                .cmp(&a.amount)
                .then_with(|| a.category.cmp(&b.category))
        });

        let alerts = budget.overspending_alerts(month)?;

        Ok(Self {
            month,
            total_income,
            total_expenses,
            net,
            savings_rate,
            category_breakdown,
            budget_status,
            alerts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TallyPaths;
    use crate::models::{BudgetLimit, NewExpense, NewIncome};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn month(y: i32, m: u32) -> Month {
        Month::new(y, m).unwrap()
    }

    fn open_store(dir: &TempDir) -> LedgerStore {
        LedgerStore::open(TallyPaths::with_base_dir(dir.path().to_path_buf())).unwrap()
    }

    #[test]
    fn test_empty_month_summary_is_all_zero() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);

        let summary = MonthlySummary::generate(&store, month(2024, 1)).unwrap();
        assert_eq!(summary.total_income, Money::zero());
        assert_eq!(summary.total_expenses, Money::zero());
        assert_eq!(summary.net, Money::zero());
        assert_eq!(summary.savings_rate, 0.0);
        assert!(summary.category_breakdown.is_empty());
        assert!(summary.budget_status.is_empty());
        assert!(summary.alerts.is_empty());
    }

    #[test]
    fn test_totals_net_and_savings_rate() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        let budget = BudgetService::new(&store);

        budget
            .add_income(NewIncome::new(
                date(2024, 1, 1),
                "Salary",
                Money::from_cents(400_000),
            ))
            .unwrap();
        budget
            .add_expense(NewExpense::new(
                date(2024, 1, 10),
                "Housing",
                Money::from_cents(100_000),
            ))
            .unwrap();

        let summary = MonthlySummary::generate(&store, month(2024, 1)).unwrap();
        assert_eq!(summary.net, Money::from_cents(300_000));
        assert!((summary.savings_rate - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_breakdown_sorted_by_amount_then_category() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        let budget = BudgetService::new(&store);

        for (category, cents) in [("Food", 5_000), ("Housing", 90_000), ("Transit", 5_000)] {
            budget
                .add_expense(NewExpense::new(
                    date(2024, 1, 10),
                    category,
                    Money::from_cents(cents),
                ))
                .unwrap();
        }

        let summary = MonthlySummary::generate(&store, month(2024, 1)).unwrap();
        let order: Vec<&str> = summary
            .category_breakdown
            .iter()
            .map(|c| c.category.as_str())
            .collect();
        assert_eq!(order, vec!["Housing", "Food", "Transit"]);
    }

    #[test]
    fn test_status_union_covers_limits_and_spend() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        let budget = BudgetService::new(&store);

        // a limit with no spend, and spend with no limit
        budget
            .set_budget_limit(BudgetLimit::new("Housing", Money::from_cents(200_000)))
            .unwrap();
        budget
            .add_expense(NewExpense::new(
                date(2024, 1, 10),
                "Food",
                Money::from_cents(5_000),
            ))
            .unwrap();

        let summary = MonthlySummary::generate(&store, month(2024, 1)).unwrap();
        let categories: Vec<&str> = summary
            .budget_status
            .iter()
            .map(|s| s.category.as_str())
            .collect();
        assert_eq!(categories, vec!["Food", "Housing"]);

        let food = &summary.budget_status[0];
        assert_eq!(food.limit, None);
        assert_eq!(food.spent, Money::from_cents(5_000));

        let housing = &summary.budget_status[1];
        assert_eq!(housing.spent, Money::zero());
        assert_eq!(housing.remaining, Some(Money::from_cents(200_000)));
    }

    #[test]
    fn test_alerts_surface_in_summary() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        let budget = BudgetService::new(&store);

        budget
            .set_budget_limit(BudgetLimit::new("Food", Money::from_cents(10_000)))
            .unwrap();
        budget
            .add_expense(NewExpense::new(
                date(2024, 1, 10),
                "Food",
                Money::from_cents(11_000),
            ))
            .unwrap();

        let summary = MonthlySummary::generate(&store, month(2024, 1)).unwrap();
        assert_eq!(summary.alerts.len(), 1);
        assert_eq!(summary.alerts[0].overspent, Money::from_cents(1_000));
    }

    #[test]
    fn test_expenses_exceeding_income_yield_negative_rate() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        let budget = BudgetService::new(&store);

        budget
            .add_income(NewIncome::new(
                date(2024, 1, 1),
                "Salary",
                Money::from_cents(100_000),
            ))
            .unwrap();
        budget
            .add_expense(NewExpense::new(
                date(2024, 1, 10),
                "Housing",
                Money::from_cents(150_000),
            ))
            .unwrap();

        let summary = MonthlySummary::generate(&store, month(2024, 1)).unwrap();
        assert_eq!(summary.net, Money::from_cents(-50_000));
        assert!((summary.savings_rate + 50.0).abs() < 1e-9);
    }
}
