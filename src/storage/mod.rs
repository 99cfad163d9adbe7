//! Storage layer for tally
//!
//! JSON file storage with atomic writes and per-table locking. The engine
//! treats each logical operation as an atomic unit over a single table; no
//! cross-table transaction is assumed anywhere.

pub mod file_io;
pub mod limits;
pub mod table;

pub use file_io::{read_json, write_json_atomic};
pub use limits::LimitTable;
pub use table::{Record, Table};

use crate::config::paths::TallyPaths;
use crate::error::TallyError;
use crate::models::{ExpenseEntry, IncomeEntry, SavingsGoal};

impl Record for IncomeEntry {
    fn record_id(&self) -> u64 {
        self.id.value()
    }
}

impl Record for ExpenseEntry {
    fn record_id(&self) -> u64 {
        self.id.value()
    }
}

impl Record for SavingsGoal {
    fn record_id(&self) -> u64 {
        self.id.value()
    }
}

/// Main storage coordinator that provides access to all tables
pub struct LedgerStore {
    paths: TallyPaths,
    pub income: Table<IncomeEntry>,
    pub expenses: Table<ExpenseEntry>,
    pub goals: Table<SavingsGoal>,
    pub limits: LimitTable,
}

impl LedgerStore {
    /// Create a new LedgerStore instance
    pub fn open(paths: TallyPaths) -> Result<Self, TallyError> {
        paths.ensure_directories()?;

        Ok(Self {
            income: Table::new(paths.income_file()),
            expenses: Table::new(paths.expenses_file()),
            goals: Table::new(paths.goals_file()),
            limits: LimitTable::new(paths.limits_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &TallyPaths {
        &self.paths
    }

    /// Load all tables from disk
    pub fn load_all(&self) -> Result<(), TallyError> {
        self.income.load()?;
        self.expenses.load()?;
        self.goals.load()?;
        self.limits.load()?;
        Ok(())
    }

    /// Save all tables to disk
    pub fn save_all(&self) -> Result<(), TallyError> {
        self.income.save()?;
        self.expenses.save()?;
        self.goals.save()?;
        self.limits.save()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetLimit, Money, NewIncome};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TallyPaths::with_base_dir(temp_dir.path().to_path_buf());
        let _store = LedgerStore::open(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
    }

    #[test]
    fn test_save_all_and_load_all_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TallyPaths::with_base_dir(temp_dir.path().to_path_buf());

        {
            let store = LedgerStore::open(paths.clone()).unwrap();
            store
                .income
                .insert_with(|id| {
                    NewIncome::new(
                        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                        "Salary",
                        Money::from_cents(500_000),
                    )
                    .into_entry(id.into())
                })
                .unwrap();
            store
                .limits
                .upsert(BudgetLimit::new("Housing", Money::from_cents(200_000)))
                .unwrap();
            store.save_all().unwrap();
        }

        let store = LedgerStore::open(paths).unwrap();
        store.load_all().unwrap();

        assert_eq!(store.income.len().unwrap(), 1);
        assert!(store.limits.get("Housing").unwrap().is_some());
        assert!(store.expenses.is_empty().unwrap());
    }
}
