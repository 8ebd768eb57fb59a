//! Statistics and diagnostics types.

#[cfg(feature = "metrics")]
use std::sync::atomic::{AtomicU64, Ordering};

/// Per-partition operation statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartitionOps {
    /// Number of lookups that found their key.
    pub reads: u64,
    /// Number of puts that created a new entry.
    pub writes: u64,
    /// Number of removes that deleted an entry.
    pub removes: u64,
    /// Number of lock acquisitions (0 when metrics feature disabled).
    pub lock_acquisitions: u64,
    /// Cumulative lock wait time in nanoseconds (0 when lock-timing disabled).
    pub lock_wait_nanos: u64,
}

impl PartitionOps {
    /// Reads + writes + removes.
    pub fn total(&self) -> u64 {
        self.reads + self.writes + self.removes
    }
}

/// Counters kept per partition.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Counter {
    Reads,
    Writes,
    Removes,
    LockAcquisitions,
    #[cfg_attr(not(feature = "lock-timing"), allow(dead_code))]
    LockWaitNanos,
}

#[cfg(feature = "metrics")]
const COUNTERS: usize = 5;

/// Thread-safe counters for a single partition, one slot per [`Counter`].
#[cfg(feature = "metrics")]
pub(crate) struct PartitionStats {
    counters: [AtomicU64; COUNTERS],
}

#[cfg(feature = "metrics")]
impl PartitionStats {
    pub fn new() -> Self {
        Self {
            counters: Default::default(),
        }
    }

    #[inline]
    pub fn add(&self, counter: Counter, n: u64) {
        self.counters[counter as usize].fetch_add(n, Ordering::Relaxed);
    }

    fn load(&self, counter: Counter) -> u64 {
        self.counters[counter as usize].load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> PartitionOps {
        PartitionOps {
            reads: self.load(Counter::Reads),
            writes: self.load(Counter::Writes),
            removes: self.load(Counter::Removes),
            lock_acquisitions: self.load(Counter::LockAcquisitions),
            lock_wait_nanos: self.load(Counter::LockWaitNanos),
        }
    }
}

/// Zero-sized placeholder when metrics are disabled.
#[cfg(not(feature = "metrics"))]
pub(crate) struct PartitionStats;

#[cfg(not(feature = "metrics"))]
impl PartitionStats {
    pub fn new() -> Self {
        PartitionStats
    }

    #[inline]
    pub fn add(&self, _counter: Counter, _n: u64) {}

    pub fn snapshot(&self) -> PartitionOps {
        PartitionOps::default()
    }
}

/// Aggregate statistics for a ConcurrentMap instance.
///
/// Gathered one partition at a time, so like
/// [`approximate_size`](crate::ConcurrentMap::approximate_size) it is not a
/// single-instant snapshot under concurrent mutation.
#[derive(Debug, Clone)]
pub struct Stats {
    /// Total number of entries across all partitions.
    pub size: usize,
    /// Number of entries in each partition.
    pub partition_sizes: Vec<usize>,
    /// Operation counts for each partition.
    pub operations: Vec<PartitionOps>,
}

/// Per-partition diagnostics snapshot.
#[derive(Debug, Clone)]
pub struct PartitionDiagnostics {
    /// Number of entries in this partition.
    pub entries: usize,
    /// Operation counters (all 0 when metrics disabled).
    pub ops: PartitionOps,
}

/// Structured snapshot for load introspection.
#[derive(Debug, Clone)]
pub struct Diagnostics {
    /// Total number of entries across all partitions.
    pub total_entries: usize,
    /// Per-partition diagnostics.
    pub partitions: Vec<PartitionDiagnostics>,
    /// Total read + write + remove operations (0 when metrics disabled).
    pub total_operations: u64,
    /// Average load (entries) per partition.
    pub avg_load_per_partition: f64,
    /// Max load / avg load ratio; 0.0 for an empty map.
    pub max_load_ratio: f64,
}

impl Diagnostics {
    pub(crate) fn from_partitions(partitions: Vec<PartitionDiagnostics>) -> Self {
        let total_entries: usize = partitions.iter().map(|p| p.entries).sum();
        let total_operations = partitions.iter().map(|p| p.ops.total()).sum();
        let max_entries = partitions.iter().map(|p| p.entries).max().unwrap_or(0);

        let avg_load_per_partition = if partitions.is_empty() {
            0.0
        } else {
            total_entries as f64 / partitions.len() as f64
        };
        let max_load_ratio = if avg_load_per_partition > 0.0 {
            max_entries as f64 / avg_load_per_partition
        } else {
            0.0
        };

        Self {
            total_entries,
            partitions,
            total_operations,
            avg_load_per_partition,
            max_load_ratio,
        }
    }
}
