use crate::error::Error;

/// Smallest accepted partition count.
pub const MIN_CAPACITY: usize = 2;

/// Partition count used by [`Config::default`].
pub const DEFAULT_CAPACITY: usize = 16;

/// Check that `capacity` is at least [`MIN_CAPACITY`] and a power of two.
pub fn validate_capacity(capacity: usize) -> Result<(), Error> {
    if capacity < MIN_CAPACITY {
        tracing::debug!(capacity, "rejected capacity below minimum of {}", MIN_CAPACITY);
        return Err(Error::CapacityTooSmall(capacity));
    }
    if capacity & (capacity - 1) != 0 {
        tracing::debug!(capacity, "rejected capacity that is not a power of two");
        return Err(Error::CapacityNotPowerOfTwo(capacity));
    }
    Ok(())
}

/// Configuration for a ConcurrentMap instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub(crate) capacity: usize,
    pub(crate) capacity_per_partition: Option<usize>,
}

impl Config {
    /// Create a new config with defaults (16 partitions).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of partitions. Must be a power of two and at least 2.
    pub fn capacity(mut self, capacity: usize) -> Result<Self, Error> {
        validate_capacity(capacity)?;
        self.capacity = capacity;
        Ok(self)
    }

    /// Set initial table capacity per partition. Total capacity will be
    /// approximately `capacity_per_partition * capacity`. Omitted by default.
    pub fn capacity_per_partition(mut self, capacity: usize) -> Self {
        self.capacity_per_partition = Some(capacity);
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            capacity_per_partition: None,
        }
    }
}

/// Builder for creating a ConcurrentMap with custom configuration.
///
/// ```rust
/// use partmap::{ConcurrentMap, ConcurrentMapBuilder};
///
/// let map: ConcurrentMap<i32> = ConcurrentMapBuilder::new()
///     .capacity(32)?
///     .capacity_per_partition(64)
///     .build()?;
/// assert_eq!(map.capacity(), 32);
/// # Ok::<(), partmap::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct ConcurrentMapBuilder {
    config: Config,
}

impl ConcurrentMapBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of partitions. Must be a power of two and at least 2.
    pub fn capacity(mut self, capacity: usize) -> Result<Self, Error> {
        self.config = self.config.capacity(capacity)?;
        Ok(self)
    }

    /// Set initial table capacity per partition.
    pub fn capacity_per_partition(mut self, capacity: usize) -> Self {
        self.config = self.config.capacity_per_partition(capacity);
        self
    }

    /// Build a ConcurrentMap with the configured settings.
    pub fn build<V>(self) -> Result<crate::ConcurrentMap<V>, Error>
    where
        V: Send + Sync,
    {
        crate::ConcurrentMap::with_config(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_capacity() {
        assert_eq!(validate_capacity(0), Err(Error::CapacityTooSmall(0)));
        assert_eq!(validate_capacity(1), Err(Error::CapacityTooSmall(1)));
        assert_eq!(validate_capacity(3), Err(Error::CapacityNotPowerOfTwo(3)));
        assert_eq!(validate_capacity(12), Err(Error::CapacityNotPowerOfTwo(12)));
        for capacity in [2, 4, 16, 1024] {
            assert!(validate_capacity(capacity).is_ok());
        }
    }

    #[test]
    fn test_config_rejects_without_changing() {
        assert!(Config::new().capacity(6).is_err());
        let config = Config::new().capacity(8).unwrap().capacity_per_partition(4);
        assert_eq!(config.capacity, 8);
        assert_eq!(config.capacity_per_partition, Some(4));
    }
}
