use crate::config::{validate_capacity, Config};
use crate::error::Error;
use crate::group::PartitionGroup;
use crate::key::PartitionKey;
use crate::stats::{Diagnostics, PartitionDiagnostics, PartitionOps, Stats};
use crate::value::Value;
use std::fmt::Display;
use std::sync::Arc;

const EMPTY_STRING: &str = "";

/// Partitioned concurrent map.
///
/// Keys are routed by their hash code to one of a fixed, power-of-two number
/// of partitions, each with its own read-write lock. Operations on keys in
/// different partitions never block each other. Values are wrapped in
/// `Arc<V>` so reads hand them out without copying.
///
/// # Example
///
/// ```rust
/// use partmap::{ConcurrentMap, StringKey, Value};
///
/// let map: ConcurrentMap = ConcurrentMap::new(2)?;
/// map.put(StringKey::new("sharkchili"), Value::from("Ak47"))
///     .put(7, Value::from(1.5));
///
/// assert_eq!(map.get_as_string(StringKey::new("sharkchili")), ("Ak47".to_string(), true));
/// assert_eq!(map.get_as_string(StringKey::new("missing")), (String::new(), false));
/// assert_eq!(map.get_float64(7), (1.5, true));
/// # Ok::<(), partmap::Error>(())
/// ```
pub struct ConcurrentMap<V = Value> {
    partitions: PartitionGroup<V>,
    capacity: usize,
}

impl<V> ConcurrentMap<V>
where
    V: Send + Sync,
{
    /// Create a map with `capacity` partitions.
    ///
    /// Fails if `capacity` is less than 2 or not a power of two.
    pub fn new(capacity: usize) -> Result<Self, Error> {
        Self::with_config(Config::new().capacity(capacity)?)
    }

    /// Create a new map with custom config.
    pub fn with_config(config: Config) -> Result<Self, Error> {
        validate_capacity(config.capacity)?;
        Ok(Self::from_config(config))
    }

    fn from_config(config: Config) -> Self {
        tracing::debug!(
            capacity = config.capacity,
            capacity_per_partition = ?config.capacity_per_partition,
            "creating concurrent map"
        );
        Self {
            partitions: PartitionGroup::new(config.capacity, config.capacity_per_partition),
            capacity: config.capacity,
        }
    }

    /// Number of partitions.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of partitions. Same as [`capacity`](Self::capacity).
    pub fn partition_count(&self) -> usize {
        self.partitions.len()
    }

    /// The index of the partition `key` routes to.
    ///
    /// Constant for a given key over the lifetime of the map.
    pub fn partition_index<K: PartitionKey>(&self, key: K) -> usize {
        self.partitions.route(key.hash_code())
    }

    /// Insert or overwrite a value. Returns the map for chaining.
    ///
    /// ```rust
    /// use partmap::ConcurrentMap;
    ///
    /// let map: ConcurrentMap<&str> = ConcurrentMap::new(4)?;
    /// map.put("a", "1").put("b", "2").put("a", "3");
    /// assert_eq!(*map.get("a").unwrap(), "3");
    /// # Ok::<(), partmap::Error>(())
    /// ```
    pub fn put<K: PartitionKey>(&self, key: K, value: V) -> &Self {
        self.partitions.partition_for(&key).put(&key, value);
        self
    }

    /// Get a value by key.
    pub fn get<K: PartitionKey>(&self, key: K) -> Option<Arc<V>> {
        self.partitions.partition_for(&key).get(&key)
    }

    /// Get a value by key, returning `(fallback, false)` if it is absent.
    pub fn get_or<K: PartitionKey>(&self, key: K, fallback: V) -> (Arc<V>, bool) {
        match self.get(key) {
            Some(value) => (value, true),
            None => (Arc::new(fallback), false),
        }
    }

    /// Get a value rendered with its `Display` impl, or `("", false)` if absent.
    pub fn get_as_string<K: PartitionKey>(&self, key: K) -> (String, bool)
    where
        V: Display,
    {
        match self.get(key) {
            Some(value) => (value.to_string(), true),
            None => (EMPTY_STRING.to_string(), false),
        }
    }

    /// Remove a key if present. Returns the map for chaining.
    pub fn remove<K: PartitionKey>(&self, key: K) -> &Self {
        self.partitions.partition_for(&key).remove(&key);
        self
    }

    /// Check if a key is present.
    pub fn has<K: PartitionKey>(&self, key: K) -> bool {
        self.partitions.partition_for(&key).contains(&key)
    }

    /// Count entries by visiting each partition in turn under its read lock.
    ///
    /// Only one partition is locked at a time, so concurrent writers may make
    /// the result match no single instant. With no concurrent mutation it is
    /// exact.
    pub fn approximate_size(&self) -> usize {
        let size: usize = self.partitions.iter().map(|p| p.len()).sum();
        tracing::trace!(size, "approximate size scan");
        size
    }

    /// A strict, consistent size is not supported; it would need every
    /// partition locked at once.
    ///
    /// Always returns [`Error::Unsupported`] without touching any partition.
    /// Use [`approximate_size`](Self::approximate_size) instead.
    pub fn length(&self) -> Result<usize, Error> {
        tracing::warn!("strict length requested; use approximate_size");
        Err(Error::Unsupported("length"))
    }

    /// Check if the map is empty, with the same caveat as `approximate_size`.
    pub fn is_empty(&self) -> bool {
        self.partitions.iter().all(|p| p.len() == 0)
    }

    /// Entry count of each partition, in index order.
    pub fn partition_loads(&self) -> Vec<usize> {
        self.partitions.iter().map(|p| p.len()).collect()
    }

    /// Get detailed statistics about the map and its partitions.
    pub fn stats(&self) -> Stats {
        let partition_sizes = self.partition_loads();
        let operations: Vec<PartitionOps> = self.partitions.iter().map(|p| p.stats()).collect();
        let size: usize = partition_sizes.iter().sum();

        Stats {
            size,
            partition_sizes,
            operations,
        }
    }

    /// Per-partition loads and counters plus balance figures.
    pub fn diagnostics(&self) -> Diagnostics {
        let partitions = self
            .partitions
            .iter()
            .map(|p| PartitionDiagnostics {
                entries: p.len(),
                ops: p.stats(),
            })
            .collect();
        Diagnostics::from_partitions(partitions)
    }
}

impl ConcurrentMap<Value> {
    fn get_typed<K, T>(&self, key: K, convert: impl FnOnce(&Value) -> Option<T>) -> (T, bool)
    where
        K: PartitionKey,
        T: Default,
    {
        match self.get(key).as_deref().and_then(convert) {
            Some(value) => (value, true),
            None => (T::default(), false),
        }
    }

    /// Get a `Bool` value. Absent keys and other types yield `(false, false)`.
    pub fn get_bool<K: PartitionKey>(&self, key: K) -> (bool, bool) {
        self.get_typed(key, Value::as_bool)
    }

    /// Get an `Int` value. Absent keys and other types yield `(0, false)`.
    pub fn get_int<K: PartitionKey>(&self, key: K) -> (i32, bool) {
        self.get_typed(key, Value::as_int)
    }

    /// Get an `Int64` value. Absent keys and other types yield `(0, false)`.
    pub fn get_int64<K: PartitionKey>(&self, key: K) -> (i64, bool) {
        self.get_typed(key, Value::as_int64)
    }

    /// Get a `Float64` value. Absent keys and other types yield `(0.0, false)`.
    pub fn get_float64<K: PartitionKey>(&self, key: K) -> (f64, bool) {
        self.get_typed(key, Value::as_float64)
    }
}

impl<V> Default for ConcurrentMap<V>
where
    V: Send + Sync,
{
    fn default() -> Self {
        Self::from_config(Config::default())
    }
}

impl<V> std::fmt::Debug for ConcurrentMap<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConcurrentMap")
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}
