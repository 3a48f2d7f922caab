//! In-memory storage engine for tests and development.

use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use uuid::Uuid;

use super::{StorageEngine, StoreError, StoreResult};

type Collections = HashMap<String, BTreeMap<Uuid, Vec<u8>>>;

/// Non-persistent engine backed by a map per collection.
#[derive(Default)]
pub struct MemoryEngine {
    collections: RwLock<Collections>,
}

impl MemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Collections>> {
        self.collections.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Collections>> {
        self.collections.write().map_err(|_| StoreError::LockPoisoned)
    }
}

#[async_trait]
impl StorageEngine for MemoryEngine {
    async fn get(&self, collection: &str, id: Uuid) -> StoreResult<Option<Vec<u8>>> {
        let collections = self.read()?;
        Ok(collections.get(collection).and_then(|docs| docs.get(&id)).cloned())
    }

    async fn put(&self, collection: &str, id: Uuid, doc: Vec<u8>) -> StoreResult<()> {
        let mut collections = self.write()?;
        collections.entry(collection.to_string()).or_default().insert(id, doc);
        Ok(())
    }

    async fn put_many(&self, collection: &str, docs: Vec<(Uuid, Vec<u8>)>) -> StoreResult<()> {
        // One write-lock hold makes the batch atomic.
        let mut collections = self.write()?;
        let entry = collections.entry(collection.to_string()).or_default();
        for (id, doc) in docs {
            entry.insert(id, doc);
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, id: Uuid) -> StoreResult<bool> {
        let mut collections = self.write()?;
        Ok(collections.get_mut(collection).is_some_and(|docs| docs.remove(&id).is_some()))
    }

    async fn scan(&self, collection: &str) -> StoreResult<Vec<Vec<u8>>> {
        let collections = self.read()?;
        Ok(collections.get(collection).map(|docs| docs.values().cloned().collect()).unwrap_or_default())
    }

    async fn count(&self, collection: &str) -> StoreResult<usize> {
        let collections = self.read()?;
        Ok(collections.get(collection).map(BTreeMap::len).unwrap_or(0))
    }
}
