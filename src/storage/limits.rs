//! Budget limit table
//!
//! Limits are stored as a map keyed by category, so "at most one active
//! limit per category" holds by construction: setting a limit for an
//! existing category replaces the previous one.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::TallyError;
use crate::models::BudgetLimit;

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Default, Serialize, Deserialize)]
struct LimitData {
    #[serde(default)]
    limits: Vec<BudgetLimit>,
}

/// Upsert-by-category store for budget limits
pub struct LimitTable {
    path: PathBuf,
    limits: RwLock<BTreeMap<String, BudgetLimit>>,
}

impl LimitTable {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            limits: RwLock::new(BTreeMap::new()),
        }
    }

    /// Load limits from disk, replacing in-memory state
    pub fn load(&self) -> Result<(), TallyError> {
        let data: LimitData = read_json(&self.path)?;

        let mut limits = self.write_lock()?;
        limits.clear();
        for limit in data.limits {
            limits.insert(limit.category.clone(), limit);
        }
        Ok(())
    }

    /// Save limits to disk (sorted by category)
    pub fn save(&self) -> Result<(), TallyError> {
        let limits = self.read_lock()?;
        let data = LimitData {
            limits: limits.values().cloned().collect(),
        };
        write_json_atomic(&self.path, &data)
    }

    /// Insert or replace the limit for a category
    pub fn upsert(&self, limit: BudgetLimit) -> Result<(), TallyError> {
        let mut limits = self.write_lock()?;
        limits.insert(limit.category.clone(), limit);
        Ok(())
    }

    /// Get the limit for a category, if one is set
    pub fn get(&self, category: &str) -> Result<Option<BudgetLimit>, TallyError> {
        Ok(self.read_lock()?.get(category).cloned())
    }

    /// Remove the limit for a category; returns false if none was set
    pub fn remove(&self, category: &str) -> Result<bool, TallyError> {
        Ok(self.write_lock()?.remove(category).is_some())
    }

    /// All limits, sorted by category
    pub fn all(&self) -> Result<Vec<BudgetLimit>, TallyError> {
        Ok(self.read_lock()?.values().cloned().collect())
    }

    fn read_lock(
        &self,
    ) -> Result<std::sync::RwLockReadGuard<'_, BTreeMap<String, BudgetLimit>>, TallyError> {
        self.limits
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write_lock(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, BTreeMap<String, BudgetLimit>>, TallyError> {
        self.limits
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use tempfile::TempDir;

    #[test]
    fn test_upsert_replaces_existing_limit() {
        let dir = TempDir::new().unwrap();
        let table = LimitTable::new(dir.path().join("limits.json"));

        table
            .upsert(BudgetLimit::new("Housing", Money::from_cents(100_000)))
            .unwrap();
        table
            .upsert(BudgetLimit::new("Housing", Money::from_cents(200_000)))
            .unwrap();

        let all = table.all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].monthly_limit.cents(), 200_000);
    }

    #[test]
    fn test_get_and_remove() {
        let dir = TempDir::new().unwrap();
        let table = LimitTable::new(dir.path().join("limits.json"));

        table
            .upsert(BudgetLimit::new("Food", Money::from_cents(50_000)))
            .unwrap();

        assert!(table.get("Food").unwrap().is_some());
        assert!(table.get("Travel").unwrap().is_none());

        assert!(table.remove("Food").unwrap());
        assert!(!table.remove("Food").unwrap());
    }

    #[test]
    fn test_all_sorted_by_category() {
        let dir = TempDir::new().unwrap();
        let table = LimitTable::new(dir.path().join("limits.json"));

        for category in ["Travel", "Food", "Housing"] {
            table
                .upsert(BudgetLimit::new(category, Money::from_cents(1_000)))
                .unwrap();
        }

        let categories: Vec<String> = table
            .all()
            .unwrap()
            .into_iter()
            .map(|l| l.category)
            .collect();
        assert_eq!(categories, vec!["Food", "Housing", "Travel"]);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("limits.json");

        {
            let table = LimitTable::new(path.clone());
            table
                .upsert(BudgetLimit::new("Housing", Money::from_cents(200_000)))
                .unwrap();
            table.save().unwrap();
        }

        let table = LimitTable::new(path);
        table.load().unwrap();
        assert_eq!(
            table.get("Housing").unwrap().unwrap().monthly_limit.cents(),
            200_000
        );
    }
}
