//! # partmap
//!
//! A partitioned concurrent map.
//!
//! Every key exposes a 64-bit hash code and a comparable value. The hash code
//! picks one of a fixed, power-of-two number of partitions
//! (`hash_code & (partitions - 1)`); the value is what that partition's table
//! stores the entry under. Each partition has its own read-write lock, so
//! operations on keys in different partitions never contend.
//!
//! ## Features
//!
//! - **Partitioned locking**: one `RwLock` per partition, no global lock
//! - **Deterministic routing**: the same key always reaches the same partition
//! - **Heterogeneous keys**: integers, strings, or any `Hash + Eq` value
//! - **Dynamic values**: the default value type is [`Value`], with checked
//!   typed accessors
//! - **Introspection**: per-partition loads and, with the `metrics` feature,
//!   operation counters
//!
//! ## Example
//!
//! ```rust
//! use partmap::{ConcurrentMap, Int64Key, StringKey, Value};
//!
//! let map: ConcurrentMap = ConcurrentMap::new(8)?;
//!
//! map.put(StringKey::new("name"), Value::from("partmap"))
//!     .put(Int64Key::new(42), Value::from(42i64))
//!     .put(7, Value::from(true));
//!
//! assert_eq!(map.get_as_string("name"), ("partmap".to_string(), true));
//! assert_eq!(map.get_int64(42i64), (42, true));
//! assert!(map.get_bool(7).0);
//!
//! map.remove(7);
//! assert!(!map.has(7));
//! assert_eq!(map.approximate_size(), 2);
//! # Ok::<(), partmap::Error>(())
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use partmap::{ConcurrentMap, ConcurrentMapBuilder};
//!
//! let map: ConcurrentMap<String> = ConcurrentMapBuilder::new()
//!     .capacity(32)?  // Must be a power of two, at least 2
//!     .capacity_per_partition(128)
//!     .build()?;
//! # Ok::<(), partmap::Error>(())
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]

/// Configuration and builder types.
pub mod config;
/// Error types.
pub mod error;
/// Internal partition group and router.
mod group;
/// Stable hash codes for keys.
pub mod hash;
/// Partition key types.
pub mod key;
/// Main ConcurrentMap implementation.
pub mod map;
/// Internal partition implementation.
mod partition;
/// Statistics and diagnostics.
pub mod stats;
/// Dynamic value type.
pub mod value;

// Re-export main types
pub use config::{Config, ConcurrentMapBuilder};
pub use error::Error;
pub use key::{AnyKey, Int64Key, IntKey, KeyRef, KeyValue, PartitionKey, StringKey};
pub use map::ConcurrentMap;
pub use stats::{Diagnostics, PartitionDiagnostics, PartitionOps, Stats};
pub use value::Value;
