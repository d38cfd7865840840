//! Shared Store Handle
//!
//! Serializes access to a [`BoundedStore`] for concurrent callers.

use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use crate::store::{BoundedStore, StoreStatistics};

/// Cloneable handle to one store shared across tasks.
///
/// Anything that mutates the store, `read` included (it moves counters and
/// LRU recency), takes the write lock for the whole call, so an eviction
/// pass inside `create` is never observed half done.
#[derive(Debug)]
pub struct SharedStore<K, V> {
    inner: Arc<RwLock<BoundedStore<K, V>>>,
}

impl<K, V> Clone for SharedStore<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> SharedStore<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new(store: BoundedStore<K, V>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    pub async fn create(&self, key: K, value: V) -> bool {
        self.inner.write().await.create(key, value)
    }

    pub async fn create_with_ttl(&self, key: K, value: V, ttl: Duration) -> bool {
        self.inner.write().await.create_with_ttl(key, value, ttl)
    }

    /// Returns a copy of the record.
    pub async fn read(&self, key: &K) -> Option<V> {
        self.inner.write().await.read(key).cloned()
    }

    pub async fn update(&self, key: &K, value: V) -> bool {
        self.inner.write().await.update(key, value)
    }

    // == Update With ==
    /// Reads the record, derives a new one from it and stores it, all under
    /// one write lock.
    ///
    /// Counts as one read followed by one update. Returns false (after
    /// counting a miss) if the key is absent.
    pub async fn update_with<F>(&self, key: &K, f: F) -> bool
    where
        F: FnOnce(&V) -> V,
    {
        let mut store = self.inner.write().await;
        let Some(next) = store.read(key).map(f) else {
            return false;
        };
        store.update(key, next)
    }

    pub async fn delete(&self, key: &K) -> bool {
        self.inner.write().await.delete(key)
    }

    /// Copies of all live records, in no particular order.
    pub async fn list(&self) -> Vec<V> {
        self.inner.read().await.list().into_iter().cloned().collect()
    }

    pub async fn statistics(&self) -> StoreStatistics {
        self.inner.read().await.statistics()
    }

    pub async fn contains(&self, key: &K) -> bool {
        self.inner.read().await.contains(key)
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}
