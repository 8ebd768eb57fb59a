use crate::key::{KeyValue, PartitionKey};
use crate::stats::{Counter, PartitionOps, PartitionStats};
use hashbrown::HashMap;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;
#[cfg(feature = "lock-timing")]
use std::time::Instant;

type Table<V> = HashMap<KeyValue, Arc<V>>;

/// A single partition: one table behind its own read-write lock.
///
/// Key operations lock through `read` or `write`, which record the
/// acquisition. Every guard is dropped before its method returns.
pub(crate) struct Partition<V> {
    table: RwLock<Table<V>>,
    stats: PartitionStats,
}

impl<V> Partition<V>
where
    V: Send + Sync,
{
    pub fn new() -> Self {
        Self {
            table: RwLock::new(HashMap::new()),
            stats: PartitionStats::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            table: RwLock::new(HashMap::with_capacity(capacity)),
            stats: PartitionStats::new(),
        }
    }

    #[inline]
    fn read(&self) -> RwLockReadGuard<'_, Table<V>> {
        self.counted(|| self.table.read())
    }

    #[inline]
    fn write(&self) -> RwLockWriteGuard<'_, Table<V>> {
        self.counted(|| self.table.write())
    }

    /// Acquire a lock for a key operation, recording the acquisition.
    #[inline]
    fn counted<G>(&self, acquire: impl FnOnce() -> G) -> G {
        #[cfg(feature = "lock-timing")]
        let start = Instant::now();
        let guard = acquire();
        self.stats.add(Counter::LockAcquisitions, 1);
        #[cfg(feature = "lock-timing")]
        self.stats
            .add(Counter::LockWaitNanos, start.elapsed().as_nanos() as u64);
        guard
    }

    /// Look up a key under the shared lock.
    pub fn get<K: PartitionKey + ?Sized>(&self, key: &K) -> Option<Arc<V>> {
        let key = key.key_ref();
        let result = self.read().get(&key).cloned();
        if result.is_some() {
            self.stats.add(Counter::Reads, 1);
        }
        result
    }

    /// Insert or overwrite under the exclusive lock, returning the previous value.
    pub fn put<K: PartitionKey + ?Sized>(&self, key: &K, value: V) -> Option<Arc<V>> {
        let key = key.value();
        let value = Arc::new(value);
        let result = self.write().insert(key, value);
        if result.is_none() {
            self.stats.add(Counter::Writes, 1);
        }
        result
    }

    /// Delete a key under the exclusive lock. Absent keys are a no-op.
    pub fn remove<K: PartitionKey + ?Sized>(&self, key: &K) -> Option<Arc<V>> {
        let key = key.key_ref();
        let result = self.write().remove(&key);
        if result.is_some() {
            self.stats.add(Counter::Removes, 1);
        }
        result
    }

    /// Check if a key exists without cloning the value.
    pub fn contains<K: PartitionKey + ?Sized>(&self, key: &K) -> bool {
        let key = key.key_ref();
        self.read().contains_key(&key)
    }

    /// Entry count. Scans take the lock directly and are not counted.
    pub fn len(&self) -> usize {
        self.table.read().len()
    }

    pub fn stats(&self) -> PartitionOps {
        self.stats.snapshot()
    }
}
