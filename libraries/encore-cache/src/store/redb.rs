//! Embedded-database persistent tier
//!
//! One redb table holds the whole keyspace, so non-cache keys written by other
//! components live next to cache entries, as they would in browser storage.

use super::{PersistentStore, StoreResult};
use crate::error::StoreError;
use ::redb::{Database, ReadableTable, TableDefinition};
use std::path::Path;

const TABLE: TableDefinition<&str, &str> = TableDefinition::new("kv");

/// Persistent store backed by a redb database file
pub struct RedbStore {
    db: Database,
}

impl RedbStore {
    /// Open (or create) the database at `path`
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let db = Database::create(path).map_err(StoreError::backend)?;

        // Create the table up front so reads on a fresh file don't fail
        let txn = db.begin_write().map_err(StoreError::backend)?;
        txn.open_table(TABLE).map_err(StoreError::backend)?;
        txn.commit().map_err(StoreError::backend)?;

        tracing::debug!(path = %path.display(), "Opened persistent cache store");
        Ok(Self { db })
    }
}

impl std::fmt::Debug for RedbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbStore").finish_non_exhaustive()
    }
}

impl PersistentStore for RedbStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let txn = self.db.begin_read().map_err(StoreError::backend)?;
        let table = txn.open_table(TABLE).map_err(StoreError::backend)?;
        let value = table.get(key).map_err(StoreError::backend)?;
        Ok(value.map(|guard| guard.value().to_string()))
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let txn = self.db.begin_write().map_err(StoreError::backend)?;
        {
            let mut table = txn.open_table(TABLE).map_err(StoreError::backend)?;
            table.insert(key, value).map_err(StoreError::backend)?;
        }
        txn.commit().map_err(StoreError::backend)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let txn = self.db.begin_write().map_err(StoreError::backend)?;
        {
            let mut table = txn.open_table(TABLE).map_err(StoreError::backend)?;
            table.remove(key).map_err(StoreError::backend)?;
        }
        txn.commit().map_err(StoreError::backend)
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        let txn = self.db.begin_read().map_err(StoreError::backend)?;
        let table = txn.open_table(TABLE).map_err(StoreError::backend)?;

        let mut keys = Vec::new();
        for item in table.iter().map_err(StoreError::backend)? {
            let (key, _) = item.map_err(StoreError::backend)?;
            keys.push(key.value().to_string());
        }
        Ok(keys)
    }
}
