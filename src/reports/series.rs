//! Month-by-month time series
//!
//! Series are lazy iterators over a contiguous month range: every month in
//! the range produces a row, with zero totals when the ledger has no activity
//! there. The iterators are `Clone`, so a caller can restart a series without
//! re-querying the store for the months already seen.

use chrono::NaiveDate;

use crate::error::TallyResult;
use crate::models::{Money, Month, MonthRange};
use crate::services::BudgetService;
use crate::storage::LedgerStore;

/// Income and expense totals for one month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthTotals {
    pub month: Month,
    pub income: Money,
    pub expenses: Money,
}

impl MonthTotals {
    pub fn net(&self) -> Money {
        self.income - self.expenses
    }
}

/// Spend in one category for one month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthSpend {
    pub month: Month,
    pub amount: Money,
}

/// Lazy iterator of [`MonthTotals`] over a contiguous month range
#[derive(Clone)]
pub struct MonthlyTotalsSeries<'a> {
    store: &'a LedgerStore,
    months: MonthRange,
}

impl<'a> MonthlyTotalsSeries<'a> {
    pub fn new(store: &'a LedgerStore, months: MonthRange) -> Self {
        Self { store, months }
    }
}

impl Iterator for MonthlyTotalsSeries<'_> {
    type Item = TallyResult<MonthTotals>;

    fn next(&mut self) -> Option<Self::Item> {
        let month = self.months.next()?;
        let budget = BudgetService::new(self.store);
        let totals = budget.monthly_income(month).and_then(|income| {
            Ok(MonthTotals {
                month,
                income,
                expenses: budget.monthly_expenses(month)?,
            })
        });
        Some(totals)
    }
}

/// Income and expense totals for each month of `[start_month, end_month]`
/// within one year
///
/// Returns an empty vector when either month number is out of range or the
/// range is reversed.
pub fn income_vs_expenses_series(
    store: &LedgerStore,
    year: i32,
    start_month: u32,
    end_month: u32,
) -> TallyResult<Vec<MonthTotals>> {
    let (Some(start), Some(end)) = (Month::new(year, start_month), Month::new(year, end_month))
    else {
        return Ok(Vec::new());
    };
    MonthlyTotalsSeries::new(store, start.range_to(end)).collect()
}

/// Spend in one category over the `n_months` calendar months ending at
/// `as_of`'s month, oldest first
pub fn spending_trend(
    store: &LedgerStore,
    category: &str,
    n_months: u32,
    as_of: NaiveDate,
) -> TallyResult<Vec<MonthSpend>> {
    let budget = BudgetService::new(store);
    Month::of(as_of)
        .window_ending(n_months)
        .map(|month| {
            Ok(MonthSpend {
                month,
                amount: budget.monthly_spend(category, month)?,
            })
        })
        .collect()
}
