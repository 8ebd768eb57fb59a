use crate::key::PartitionKey;
use crate::partition::Partition;

/// A fixed, ordered set of partitions and the router that picks one per key.
///
/// The length is a power of two and never changes, so routing needs no lock.
pub(crate) struct PartitionGroup<V> {
    partitions: Box<[Partition<V>]>,
    mask: usize,
}

impl<V> PartitionGroup<V>
where
    V: Send + Sync,
{
    /// Allocate `count` empty partitions. `count` must be a power of two.
    pub fn new(count: usize, capacity_per_partition: Option<usize>) -> Self {
        debug_assert!(count.is_power_of_two());
        let partitions = (0..count)
            .map(|_| match capacity_per_partition {
                Some(capacity) => Partition::with_capacity(capacity),
                None => Partition::new(),
            })
            .collect();

        Self {
            partitions,
            mask: count - 1,
        }
    }

    /// Map a hash code to a partition index: `hash_code & (len - 1)`.
    ///
    /// Negative hash codes still land in range because the mask is
    /// non-negative.
    #[inline]
    pub fn route(&self, hash_code: i64) -> usize {
        (hash_code & self.mask as i64) as usize
    }

    #[inline]
    pub fn partition_for<K: PartitionKey + ?Sized>(&self, key: &K) -> &Partition<V> {
        &self.partitions[self.route(key.hash_code())]
    }

    pub fn len(&self) -> usize {
        self.partitions.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Partition<V>> {
        self.partitions.iter()
    }
}
