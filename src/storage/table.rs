//! Generic record table with auto-incrementing identifiers
//!
//! Backs the engine's store contract: insert assigns the next identifier in
//! sequence (starting at 1), reads observe only fully-applied writes, and a
//! read-modify-write runs under a single write lock so two concurrent updates
//! to the same record both apply. Identifiers are never reused within a
//! process lifetime; deletion leaves the sequence untouched.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::error::TallyError;

use super::file_io::{read_json, write_json_atomic};

/// A record that carries its own store identifier
pub trait Record: Clone {
    fn record_id(&self) -> u64;
}

#[derive(Debug)]
struct Inner<T> {
    records: BTreeMap<u64, T>,
    next_id: u64,
}

/// On-disk shape: a plain list of records
#[derive(Debug, Serialize, Deserialize)]
struct TableData<T> {
    #[serde(default = "Vec::new")]
    records: Vec<T>,
}

impl<T> Default for TableData<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

/// In-memory record table persisted to a JSON file
pub struct Table<T> {
    path: PathBuf,
    inner: RwLock<Inner<T>>,
}

impl<T> Table<T>
where
    T: Record + Serialize + DeserializeOwned,
{
    /// Create an empty table backed by the given file
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            inner: RwLock::new(Inner {
                records: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Load records from disk, replacing in-memory state
    ///
    /// The identifier sequence resumes after the highest persisted id.
    pub fn load(&self) -> Result<(), TallyError> {
        let data: TableData<T> = read_json(&self.path)?;

        let mut inner = self.write_lock()?;
        inner.records.clear();
        let mut max_id = 0;
        for record in data.records {
            let id = record.record_id();
            max_id = max_id.max(id);
            inner.records.insert(id, record);
        }
        inner.next_id = max_id + 1;
        Ok(())
    }

    /// Save all records to disk (in id order)
    pub fn save(&self) -> Result<(), TallyError> {
        let inner = self.read_lock()?;
        let data = TableData {
            records: inner.records.values().cloned().collect(),
        };
        write_json_atomic(&self.path, &data)
    }

    /// Insert a record built from the next identifier; returns that identifier
    pub fn insert_with(&self, build: impl FnOnce(u64) -> T) -> Result<u64, TallyError> {
        let mut inner = self.write_lock()?;
        let id = inner.next_id;
        inner.next_id += 1;
        inner.records.insert(id, build(id));
        Ok(id)
    }

    /// Get a record by identifier
    pub fn get(&self, id: u64) -> Result<Option<T>, TallyError> {
        Ok(self.read_lock()?.records.get(&id).cloned())
    }

    /// Apply a mutation to a record under the write lock
    ///
    /// Returns the updated record, or None if the identifier is unknown.
    pub fn modify(&self, id: u64, apply: impl FnOnce(&mut T)) -> Result<Option<T>, TallyError> {
        let mut inner = self.write_lock()?;
        match inner.records.get_mut(&id) {
            Some(record) => {
                apply(record);
                Ok(Some(record.clone()))
            }
            None => Ok(None),
        }
    }

    /// Remove a record; returns false if the identifier is unknown
    pub fn remove(&self, id: u64) -> Result<bool, TallyError> {
        Ok(self.write_lock()?.records.remove(&id).is_some())
    }

    /// All records in ascending id order (a stable order for callers)
    pub fn all(&self) -> Result<Vec<T>, TallyError> {
        Ok(self.read_lock()?.records.values().cloned().collect())
    }

    /// Records passing the predicate, in ascending id order
    pub fn query(&self, predicate: impl Fn(&T) -> bool) -> Result<Vec<T>, TallyError> {
        Ok(self
            .read_lock()?
            .records
            .values()
            .filter(|r| predicate(r))
            .cloned()
            .collect())
    }

    /// Number of stored records
    pub fn len(&self) -> Result<usize, TallyError> {
        Ok(self.read_lock()?.records.len())
    }

    pub fn is_empty(&self) -> Result<bool, TallyError> {
        Ok(self.len()? == 0)
    }

    fn read_lock(&self) -> Result<std::sync::RwLockReadGuard<'_, Inner<T>>, TallyError> {
        self.inner
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write_lock(&self) -> Result<std::sync::RwLockWriteGuard<'_, Inner<T>>, TallyError> {
        self.inner
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))
    }
}
