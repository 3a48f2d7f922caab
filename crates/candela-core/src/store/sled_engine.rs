//! Sled-backed storage engine.
//!
//! One sled tree per collection, named `collection_<name>`. Sled calls are
//! blocking, so every operation goes through `spawn_blocking`. Bulk inserts
//! use `apply_batch`, which is atomic within a single tree.

use std::path::Path;

use async_trait::async_trait;
use tokio::task;
use uuid::Uuid;

use super::{StorageEngine, StoreResult};

pub struct SledEngine {
    db: sled::Db,
}

impl SledEngine {
    /// Open (or create) a persistent database under `path`.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        std::fs::create_dir_all(path)?;
        let db = sled::open(path.join("sled"))?;
        Ok(Self { db })
    }

    /// Throwaway database for tests; nothing is flushed to disk.
    pub fn temporary() -> StoreResult<Self> {
        let db = sled::Config::new().temporary(true).open()?;
        Ok(Self { db })
    }

    fn tree(&self, collection: &str) -> StoreResult<sled::Tree> {
        Ok(self.db.open_tree(format!("collection_{}", collection))?)
    }
}

#[async_trait]
impl StorageEngine for SledEngine {
    async fn get(&self, collection: &str, id: Uuid) -> StoreResult<Option<Vec<u8>>> {
        let tree = self.tree(collection)?;
        let value = task::spawn_blocking(move || tree.get(id.as_bytes())).await??;
        Ok(value.map(|ivec| ivec.to_vec()))
    }

    async fn put(&self, collection: &str, id: Uuid, doc: Vec<u8>) -> StoreResult<()> {
        let tree = self.tree(collection)?;
        task::spawn_blocking(move || tree.insert(id.as_bytes(), doc)).await??;
        Ok(())
    }

    async fn put_many(&self, collection: &str, docs: Vec<(Uuid, Vec<u8>)>) -> StoreResult<()> {
        let tree = self.tree(collection)?;
        task::spawn_blocking(move || {
            let mut batch = sled::Batch::default();
            for (id, doc) in docs {
                batch.insert(id.as_bytes(), doc);
            }
            tree.apply_batch(batch)
        })
        .await??;
        Ok(())
    }

    async fn delete(&self, collection: &str, id: Uuid) -> StoreResult<bool> {
        let tree = self.tree(collection)?;
        let removed = task::spawn_blocking(move || tree.remove(id.as_bytes())).await??;
        Ok(removed.is_some())
    }

    async fn scan(&self, collection: &str) -> StoreResult<Vec<Vec<u8>>> {
        let tree = self.tree(collection)?;
        let values = task::spawn_blocking(move || {
            tree.iter()
                .values()
                .map(|value| value.map(|ivec| ivec.to_vec()))
                .collect::<Result<Vec<_>, sled::Error>>()
        })
        .await??;
        Ok(values)
    }

    async fn count(&self, collection: &str) -> StoreResult<usize> {
        let tree = self.tree(collection)?;
        Ok(task::spawn_blocking(move || tree.len()).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_many_is_visible_as_one_batch() {
        let engine = SledEngine::temporary().unwrap();
        let docs: Vec<(Uuid, Vec<u8>)> =
            (0..4).map(|i| (Uuid::new_v4(), vec![i as u8])).collect();

        engine.put_many("orders", docs.clone()).await.unwrap();

        assert_eq!(engine.count("orders").await.unwrap(), 4);
        for (id, doc) in docs {
            assert_eq!(engine.get("orders", id).await.unwrap(), Some(doc));
        }
    }

    #[tokio::test]
    async fn test_collections_are_isolated() {
        let engine = SledEngine::temporary().unwrap();
        let id = Uuid::new_v4();

        engine.put("products", id, b"candle".to_vec()).await.unwrap();

        assert!(engine.get("orders", id).await.unwrap().is_none());
        assert_eq!(engine.count("products").await.unwrap(), 1);
        assert_eq!(engine.count("orders").await.unwrap(), 0);
    }
}
