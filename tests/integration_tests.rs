use partmap::{
    AnyKey, Config, ConcurrentMap, ConcurrentMapBuilder, Error, Int64Key, IntKey, StringKey,
    Value,
};
use std::sync::Arc;

#[test]
fn test_basic_put_get() {
    let map: ConcurrentMap<&str> = ConcurrentMap::new(4).unwrap();

    map.put("key1", "value1");
    assert_eq!(*map.get("key1").unwrap(), "value1");

    // Overwrite
    map.put("key1", "value2");
    assert_eq!(*map.get("key1").unwrap(), "value2");
    assert_eq!(map.approximate_size(), 1);
}

#[test]
fn test_remove() {
    let map: ConcurrentMap<&str> = ConcurrentMap::new(4).unwrap();

    map.put("key1", "value1");
    map.remove("key1");
    assert!(map.get("key1").is_none());

    // Removing an absent key is a no-op
    map.remove("key1");
    assert!(map.is_empty());
}

#[test]
fn test_get_or_fallback() {
    let map: ConcurrentMap = ConcurrentMap::new(2).unwrap();
    map.put(StringKey::new("sharkchili"), "Ak47".into());

    let (value, found) = map.get_or(StringKey::new("sharkchili"), "standBy".into());
    assert!(found);
    assert_eq!(value.as_str(), Some("Ak47"));

    let (value, found) = map.get_or(StringKey::new("nobody"), "standBy".into());
    assert!(!found);
    assert_eq!(value.as_str(), Some("standBy"));
}

#[test]
fn test_get_as_string() {
    let map: ConcurrentMap = ConcurrentMap::new(2).unwrap();
    map.put(StringKey::new("sharkchili"), "Ak47".into())
        .put(IntKey::new(1), 99.into())
        .put(Int64Key::new(2), false.into());

    assert_eq!(
        map.get_as_string(StringKey::new("sharkchili")),
        ("Ak47".to_string(), true)
    );
    assert_eq!(map.get_as_string(IntKey::new(1)), ("99".to_string(), true));
    assert_eq!(map.get_as_string(Int64Key::new(2)), ("false".to_string(), true));
    assert_eq!(
        map.get_as_string(StringKey::new("missing")),
        (String::new(), false)
    );
}

#[test]
fn test_get_as_string_generic_values() {
    let map: ConcurrentMap<u64> = ConcurrentMap::new(2).unwrap();
    map.put(1, 18_446_744_073_709_551_615u64);
    assert_eq!(
        map.get_as_string(1),
        ("18446744073709551615".to_string(), true)
    );
}

#[test]
fn test_has() {
    let map: ConcurrentMap<()> = ConcurrentMap::new(8).unwrap();
    map.put(IntKey::new(3), ());

    assert!(map.has(IntKey::new(3)));
    assert!(map.has(3));
    // Same hash code, different key value
    assert!(!map.has(Int64Key::new(3)));
    assert!(!map.has("3"));
}

#[test]
fn test_custom_keys() {
    #[derive(Debug, PartialEq, Eq, Hash)]
    struct Coord {
        x: i32,
        y: i32,
    }

    let map: ConcurrentMap<&str> = ConcurrentMap::new(16).unwrap();
    map.put(AnyKey::new(Coord { x: 1, y: 2 }), "home");

    assert_eq!(*map.get(AnyKey::new(Coord { x: 1, y: 2 })).unwrap(), "home");
    assert!(map.get(AnyKey::new(Coord { x: 2, y: 1 })).is_none());

    let key = AnyKey::new(Coord { x: 5, y: 5 });
    map.put(&key, "away");
    assert!(map.has(&key));
    map.remove(&key);
    assert!(!map.has(&key));
}

#[test]
fn test_typed_accessors() {
    let map: ConcurrentMap = ConcurrentMap::new(4).unwrap();
    map.put("bool", true.into())
        .put("int", (-7).into())
        .put("int64", (1i64 << 40).into())
        .put("float", 3.5.into())
        .put("other", Value::other(vec![1u8, 2, 3]));

    assert_eq!(map.get_bool("bool"), (true, true));
    assert_eq!(map.get_int("int"), (-7, true));
    assert_eq!(map.get_int64("int64"), (1 << 40, true));
    assert_eq!(map.get_float64("float"), (3.5, true));

    assert_eq!(map.get_bool("int"), (false, false));
    assert_eq!(map.get_int("float"), (0, false));
    assert_eq!(map.get_int64("other"), (0, false));
    assert_eq!(map.get_float64("absent"), (0.0, false));

    let other = map.get("other").unwrap();
    assert_eq!(other.downcast_ref::<Vec<u8>>(), Some(&vec![1, 2, 3]));
    assert_eq!(map.get_as_string("other"), ("[1, 2, 3]".to_string(), true));
}

#[test]
fn test_length_unsupported() {
    let map: ConcurrentMap = ConcurrentMap::new(2).unwrap();
    map.put("a", 1.into());
    assert_eq!(map.length().unwrap_err(), Error::Unsupported("length"));
    // The failed call leaves the map untouched
    assert_eq!(map.get_int("a"), (1, true));
}

#[test]
fn test_approximate_size_and_is_empty() {
    let map: ConcurrentMap<usize> = ConcurrentMap::new(16).unwrap();

    assert!(map.is_empty());
    assert_eq!(map.approximate_size(), 0);

    for i in 0..500 {
        map.put(format!("key_{}", i), i);
    }
    assert!(!map.is_empty());
    assert_eq!(map.approximate_size(), 500);

    for i in 0..100 {
        map.remove(format!("key_{}", i));
    }
    assert_eq!(map.approximate_size(), 400);
}

#[test]
fn test_stats() {
    let map: ConcurrentMap<&str> = ConcurrentMap::default();

    map.put("key1", "value1");
    map.put("key2", "value2");
    map.get("key1");
    map.get("key2");
    map.remove("key1");

    let stats = map.stats();
    assert_eq!(stats.size, 1);
    assert_eq!(stats.partition_sizes.len(), 16); // Default 16 partitions
    assert_eq!(stats.operations.len(), 16);

    let total_ops: u64 = stats.operations.iter().map(|op| op.total()).sum();
    if cfg!(feature = "metrics") {
        assert_eq!(total_ops, 5);
    } else {
        assert_eq!(total_ops, 0);
    }
}

#[cfg(feature = "metrics")]
#[test]
fn test_stats_scans_are_not_counted() {
    let map: ConcurrentMap<i64> = ConcurrentMap::new(2).unwrap();
    map.put("a", 0).put("b", 1);
    map.get("a");

    let first = map.stats().operations;
    let second = map.stats().operations;
    assert_eq!(first, second);

    map.approximate_size();
    map.is_empty();
    map.partition_loads();
    map.diagnostics();
    assert_eq!(map.stats().operations, first);

    let acquisitions: u64 = first.iter().map(|op| op.lock_acquisitions).sum();
    assert_eq!(acquisitions, 3);
}

#[test]
fn test_diagnostics() {
    let map: ConcurrentMap<i64> = ConcurrentMap::new(4).unwrap();
    for i in 0..8i64 {
        map.put(i, i);
    }

    let diag = map.diagnostics();
    assert_eq!(diag.total_entries, 8);
    assert_eq!(diag.partitions.len(), 4);
    assert_eq!(diag.avg_load_per_partition, 2.0);
    assert_eq!(diag.max_load_ratio, 1.0);
}

#[test]
fn test_construction_errors() {
    assert_eq!(
        ConcurrentMap::<Value>::new(0).unwrap_err(),
        Error::CapacityTooSmall(0)
    );
    assert_eq!(
        ConcurrentMap::<Value>::new(1).unwrap_err(),
        Error::CapacityTooSmall(1)
    );
    assert_eq!(
        ConcurrentMap::<Value>::new(3).unwrap_err(),
        Error::CapacityNotPowerOfTwo(3)
    );
    for capacity in [2, 4, 16] {
        let map = ConcurrentMap::<Value>::new(capacity).unwrap();
        assert_eq!(map.partition_count(), capacity);
    }
}

#[test]
fn test_builder() {
    let map = ConcurrentMapBuilder::new()
        .capacity(8)
        .unwrap()
        .capacity_per_partition(32)
        .build::<i32>()
        .unwrap();

    map.put("test".to_string(), 42);
    assert_eq!(*map.get("test").unwrap(), 42);
    assert_eq!(map.capacity(), 8);
}

#[test]
fn test_builder_invalid_capacity() {
    // Not a power of two
    assert!(ConcurrentMapBuilder::new().capacity(7).is_err());

    // Too small
    assert!(ConcurrentMapBuilder::new().capacity(0).is_err());
    assert!(ConcurrentMapBuilder::new().capacity(1).is_err());
}

#[test]
fn test_with_config() {
    let config = Config::new().capacity(64).unwrap();
    let map: ConcurrentMap<bool> = ConcurrentMap::with_config(config).unwrap();
    assert_eq!(map.partition_count(), 64);
}

#[test]
fn test_arc_sharing() {
    let map: ConcurrentMap<&str> = ConcurrentMap::new(2).unwrap();

    map.put("key", "value");
    let arc1 = map.get("key").unwrap();
    let arc2 = map.get("key").unwrap();

    // Both should point to the same value
    assert!(Arc::ptr_eq(&arc1, &arc2));

    // A removed value stays alive for holders
    map.remove("key");
    assert_eq!(*arc1, "value");
}
