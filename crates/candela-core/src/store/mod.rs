//! Document store abstraction
//!
//! Collections of JSON documents behind a pluggable [`StorageEngine`]:
//! [`MemoryEngine`] for tests and development, [`SledEngine`] for persistent
//! deployments. Services work through the typed [`Collection`] wrapper and
//! never touch raw bytes.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

pub mod memory;
pub mod sled_engine;

pub use memory::MemoryEngine;
pub use sled_engine::SledEngine;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from the storage layer
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(#[from] sled::Error),

    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("document serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage task failed: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("storage lock poisoned")]
    LockPoisoned,
}

/// A record that lives in a named store collection.
pub trait Document: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Collection name, e.g. `"products"`.
    const COLLECTION: &'static str;

    fn id(&self) -> Uuid;
}

/// Raw document storage: JSON bytes keyed by id within named collections.
///
/// `put_many` must be atomic within one collection; there are no
/// cross-collection transactions anywhere in this system.
#[async_trait]
pub trait StorageEngine: Send + Sync {
    async fn get(&self, collection: &str, id: Uuid) -> StoreResult<Option<Vec<u8>>>;

    async fn put(&self, collection: &str, id: Uuid, doc: Vec<u8>) -> StoreResult<()>;

    async fn put_many(&self, collection: &str, docs: Vec<(Uuid, Vec<u8>)>) -> StoreResult<()>;

    /// Returns whether a document was actually removed.
    async fn delete(&self, collection: &str, id: Uuid) -> StoreResult<bool>;

    async fn scan(&self, collection: &str) -> StoreResult<Vec<Vec<u8>>>;

    async fn count(&self, collection: &str) -> StoreResult<usize>;
}

/// Typed view over one collection of an engine.
pub struct Collection<T: Document> {
    engine: Arc<dyn StorageEngine>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Document> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self { engine: Arc::clone(&self.engine), _marker: PhantomData }
    }
}

impl<T: Document> Collection<T> {
    pub fn new(engine: Arc<dyn StorageEngine>) -> Self {
        Self { engine, _marker: PhantomData }
    }

    pub async fn insert(&self, doc: &T) -> StoreResult<()> {
        let bytes = serde_json::to_vec(doc)?;
        self.engine.put(T::COLLECTION, doc.id(), bytes).await
    }

    /// Bulk insert as a single atomic store write (no partial success).
    pub async fn insert_many(&self, docs: &[T]) -> StoreResult<()> {
        let mut entries = Vec::with_capacity(docs.len());
        for doc in docs {
            entries.push((doc.id(), serde_json::to_vec(doc)?));
        }
        self.engine.put_many(T::COLLECTION, entries).await
    }

    pub async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<T>> {
        match self.engine.get(T::COLLECTION, id).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    pub async fn find_all(&self) -> StoreResult<Vec<T>> {
        let raw = self.engine.scan(T::COLLECTION).await?;
        let mut docs = Vec::with_capacity(raw.len());
        for bytes in raw {
            docs.push(serde_json::from_slice(&bytes)?);
        }
        Ok(docs)
    }

    /// Full-collection filter. Fine at this system's scale; nothing here is
    /// indexed beyond the primary key.
    pub async fn find_where<F>(&self, predicate: F) -> StoreResult<Vec<T>>
    where
        F: Fn(&T) -> bool,
    {
        let mut docs = self.find_all().await?;
        docs.retain(|doc| predicate(doc));
        Ok(docs)
    }

    /// Overwrite an existing document (same key as `insert`).
    pub async fn replace(&self, doc: &T) -> StoreResult<()> {
        self.insert(doc).await
    }

    pub async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        self.engine.delete(T::COLLECTION, id).await
    }

    pub async fn count(&self) -> StoreResult<usize> {
        self.engine.count(T::COLLECTION).await
    }

    pub async fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.count().await? == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        id: Uuid,
        body: String,
    }

    impl Document for Note {
        const COLLECTION: &'static str = "notes";

        fn id(&self) -> Uuid {
            self.id
        }
    }

    fn note(body: &str) -> Note {
        Note { id: Uuid::new_v4(), body: body.to_string() }
    }

    #[tokio::test]
    async fn test_collection_round_trip_memory() {
        let collection = Collection::<Note>::new(Arc::new(MemoryEngine::new()));
        let doc = note("hello");

        collection.insert(&doc).await.unwrap();
        let loaded = collection.find_by_id(doc.id).await.unwrap().unwrap();
        assert_eq!(loaded, doc);
    }

    #[tokio::test]
    async fn test_collection_round_trip_sled() {
        let engine = SledEngine::temporary().unwrap();
        let collection = Collection::<Note>::new(Arc::new(engine));
        let doc = note("persistent");

        collection.insert(&doc).await.unwrap();
        let loaded = collection.find_by_id(doc.id).await.unwrap().unwrap();
        assert_eq!(loaded, doc);

        assert!(collection.delete(doc.id).await.unwrap());
        assert!(!collection.delete(doc.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_insert_many_and_count() {
        let collection = Collection::<Note>::new(Arc::new(MemoryEngine::new()));
        assert!(collection.is_empty().await.unwrap());

        let docs = vec![note("a"), note("b"), note("c")];
        collection.insert_many(&docs).await.unwrap();

        assert_eq!(collection.count().await.unwrap(), 3);
        let matched = collection.find_where(|n| n.body == "b").await.unwrap();
        assert_eq!(matched.len(), 1);
    }

    #[tokio::test]
    async fn test_replace_overwrites() {
        let collection = Collection::<Note>::new(Arc::new(MemoryEngine::new()));
        let mut doc = note("before");
        collection.insert(&doc).await.unwrap();

        doc.body = "after".to_string();
        collection.replace(&doc).await.unwrap();

        let loaded = collection.find_by_id(doc.id).await.unwrap().unwrap();
        assert_eq!(loaded.body, "after");
        assert_eq!(collection.count().await.unwrap(), 1);
    }
}
