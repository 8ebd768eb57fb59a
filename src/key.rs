//! Partition keys.
//!
//! A key separates *where* an entry lives (its hash code, which picks the
//! partition) from *what* the entry is stored under (its [`KeyValue`], which
//! the partition's table compares). Equal keys always agree on both.

use crate::hash::hash_code;
use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use hashbrown::Equivalent;

/// A key that can be routed to a partition and stored in its table.
pub trait PartitionKey {
    /// The 64-bit hash code used for routing. Need not be unique.
    fn hash_code(&self) -> i64;

    /// A borrowed view of the table key, used for lookups without allocating.
    fn key_ref(&self) -> KeyRef<'_>;

    /// The owned value the partition's table stores the entry under.
    fn value(&self) -> KeyValue {
        self.key_ref().to_value()
    }
}

/// The comparable value a partition table is keyed by.
///
/// `Int(5)` and `Int64(5)` share a hash code, so they land in the same
/// partition, but they are distinct entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyValue {
    /// A 32-bit integer key.
    Int(i32),
    /// A 64-bit integer key.
    Int64(i64),
    /// A string key.
    Str(String),
    /// A caller-supplied comparable value.
    Custom(CustomValue),
}

impl Hash for KeyValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key_ref().hash(state);
    }
}

impl PartitionKey for KeyValue {
    fn hash_code(&self) -> i64 {
        self.key_ref().hash_code()
    }

    fn key_ref(&self) -> KeyRef<'_> {
        match self {
            KeyValue::Int(v) => KeyRef::Int(*v),
            KeyValue::Int64(v) => KeyRef::Int64(*v),
            KeyValue::Str(s) => KeyRef::Str(s),
            KeyValue::Custom(c) => KeyRef::Custom(c),
        }
    }

    fn value(&self) -> KeyValue {
        self.clone()
    }
}

/// Borrowed form of [`KeyValue`].
///
/// Hashes and compares exactly like the owned value it mirrors, so a table
/// keyed by `KeyValue` can be searched with it without allocating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRef<'a> {
    /// A 32-bit integer key.
    Int(i32),
    /// A 64-bit integer key.
    Int64(i64),
    /// A borrowed string key.
    Str(&'a str),
    /// A borrowed caller-supplied value.
    Custom(&'a CustomValue),
}

impl KeyRef<'_> {
    /// Clone into an owned [`KeyValue`].
    pub fn to_value(self) -> KeyValue {
        match self {
            KeyRef::Int(v) => KeyValue::Int(v),
            KeyRef::Int64(v) => KeyValue::Int64(v),
            KeyRef::Str(s) => KeyValue::Str(s.to_owned()),
            KeyRef::Custom(c) => KeyValue::Custom(c.clone()),
        }
    }
}

// Tag first so that Int(5) and Int64(5) hash apart.
impl Hash for KeyRef<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            KeyRef::Int(v) => {
                state.write_u8(0);
                v.hash(state);
            }
            KeyRef::Int64(v) => {
                state.write_u8(1);
                v.hash(state);
            }
            KeyRef::Str(s) => {
                state.write_u8(2);
                s.hash(state);
            }
            KeyRef::Custom(c) => {
                state.write_u8(3);
                c.hash(state);
            }
        }
    }
}

impl Equivalent<KeyValue> for KeyRef<'_> {
    fn equivalent(&self, key: &KeyValue) -> bool {
        *self == key.key_ref()
    }
}

impl PartitionKey for KeyRef<'_> {
    fn hash_code(&self) -> i64 {
        match self {
            KeyRef::Int(v) => i64::from(*v),
            KeyRef::Int64(v) => *v,
            KeyRef::Str(s) => hash_code(*s),
            KeyRef::Custom(c) => c.hash_code,
        }
    }

    fn key_ref(&self) -> KeyRef<'_> {
        *self
    }
}

/// Object-safe view of a `Hash + Eq` value.
trait DynKey: Any + fmt::Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn dyn_eq(&self, other: &dyn DynKey) -> bool;
    fn dyn_hash(&self, state: &mut dyn Hasher);
}

impl<T> DynKey for T
where
    T: Hash + Eq + Any + fmt::Debug + Send + Sync,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn dyn_eq(&self, other: &dyn DynKey) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .map_or(false, |other| other == self)
    }

    fn dyn_hash(&self, mut state: &mut dyn Hasher) {
        TypeId::of::<T>().hash(&mut state);
        self.hash(&mut state);
    }
}

/// A type-erased comparable key value, carrying its routing hash code.
///
/// Two custom values are equal only when they hold the same type and the
/// values compare equal.
#[derive(Clone)]
pub struct CustomValue {
    hash_code: i64,
    inner: Arc<dyn DynKey>,
}

impl CustomValue {
    /// Borrow the wrapped value if it has type `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.as_ref().as_any().downcast_ref::<T>()
    }
}

impl PartialEq for CustomValue {
    fn eq(&self, other: &Self) -> bool {
        self.inner.as_ref().dyn_eq(other.inner.as_ref())
    }
}

impl Eq for CustomValue {}

impl Hash for CustomValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.as_ref().dyn_hash(state);
    }
}

impl fmt::Debug for CustomValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.inner.as_ref(), f)
    }
}

/// A 32-bit integer key. Its hash code is the value widened to 64 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntKey(pub i32);

impl IntKey {
    /// Create a new integer key.
    pub fn new(value: i32) -> Self {
        IntKey(value)
    }
}

impl PartitionKey for IntKey {
    #[inline]
    fn hash_code(&self) -> i64 {
        i64::from(self.0)
    }

    fn key_ref(&self) -> KeyRef<'_> {
        KeyRef::Int(self.0)
    }
}

/// A 64-bit integer key. Its hash code is the value itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Int64Key(pub i64);

impl Int64Key {
    /// Create a new 64-bit integer key.
    pub fn new(value: i64) -> Self {
        Int64Key(value)
    }
}

impl PartitionKey for Int64Key {
    #[inline]
    fn hash_code(&self) -> i64 {
        self.0
    }

    fn key_ref(&self) -> KeyRef<'_> {
        KeyRef::Int64(self.0)
    }
}

/// A string key, routed by a stable string hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StringKey(pub String);

impl StringKey {
    /// Create a new string key.
    pub fn new(value: impl Into<String>) -> Self {
        StringKey(value.into())
    }
}

impl PartitionKey for StringKey {
    fn hash_code(&self) -> i64 {
        hash_code(self.0.as_str())
    }

    fn key_ref(&self) -> KeyRef<'_> {
        KeyRef::Str(&self.0)
    }
}

/// A key wrapping any comparable value supplied by the caller.
///
/// ```rust
/// use partmap::{AnyKey, ConcurrentMap};
///
/// #[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// struct UserId(u32);
///
/// let map: ConcurrentMap<&str> = ConcurrentMap::new(4)?;
/// map.put(AnyKey::new(UserId(7)), "alice");
/// assert!(map.has(AnyKey::new(UserId(7))));
/// assert!(!map.has(AnyKey::new(7u32)));
/// # Ok::<(), partmap::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct AnyKey {
    value: CustomValue,
}

impl AnyKey {
    /// Wrap a value, deriving its hash code from the value's `Hash` impl.
    pub fn new<T>(value: T) -> Self
    where
        T: Hash + Eq + fmt::Debug + Send + Sync + 'static,
    {
        let hash = hash_code(&value);
        Self::with_hash_code(hash, value)
    }

    /// Wrap a value with an explicit hash code.
    ///
    /// Values that compare equal must be given the same hash code.
    pub fn with_hash_code<T>(hash_code: i64, value: T) -> Self
    where
        T: Hash + Eq + fmt::Debug + Send + Sync + 'static,
    {
        AnyKey {
            value: CustomValue {
                hash_code,
                inner: Arc::new(value),
            },
        }
    }
}

impl PartitionKey for AnyKey {
    #[inline]
    fn hash_code(&self) -> i64 {
        self.value.hash_code
    }

    fn key_ref(&self) -> KeyRef<'_> {
        KeyRef::Custom(&self.value)
    }
}

impl PartitionKey for i32 {
    #[inline]
    fn hash_code(&self) -> i64 {
        IntKey(*self).hash_code()
    }

    fn key_ref(&self) -> KeyRef<'_> {
        KeyRef::Int(*self)
    }
}

impl PartitionKey for i64 {
    #[inline]
    fn hash_code(&self) -> i64 {
        *self
    }

    fn key_ref(&self) -> KeyRef<'_> {
        KeyRef::Int64(*self)
    }
}

impl PartitionKey for str {
    fn hash_code(&self) -> i64 {
        hash_code(self)
    }

    fn key_ref(&self) -> KeyRef<'_> {
        KeyRef::Str(self)
    }
}

impl PartitionKey for String {
    fn hash_code(&self) -> i64 {
        hash_code(self.as_str())
    }

    fn key_ref(&self) -> KeyRef<'_> {
        KeyRef::Str(self)
    }
}

impl<K: PartitionKey + ?Sized> PartitionKey for &K {
    #[inline]
    fn hash_code(&self) -> i64 {
        (**self).hash_code()
    }

    fn key_ref(&self) -> KeyRef<'_> {
        (**self).key_ref()
    }

    fn value(&self) -> KeyValue {
        (**self).value()
    }
}
