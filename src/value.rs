//! Dynamically typed values.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Object-safe view of an arbitrary value stored in [`Value::Other`].
pub trait OpaqueValue: Any + fmt::Debug + Send + Sync {
    /// Upcast for downcasting.
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any + fmt::Debug + Send + Sync> OpaqueValue for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A dynamically typed value, the default value type of a
/// [`ConcurrentMap`](crate::ConcurrentMap).
///
/// The typed accessors are checked: asking for the wrong type yields `None`
/// rather than a converted value.
///
/// ```rust
/// use partmap::Value;
///
/// let v = Value::from(42);
/// assert_eq!(v.as_int(), Some(42));
/// assert_eq!(v.as_int64(), None);
/// assert_eq!(v.to_string(), "42");
/// ```
#[derive(Debug, Clone)]
pub enum Value {
    /// A boolean.
    Bool(bool),
    /// A 32-bit integer.
    Int(i32),
    /// A 64-bit integer.
    Int64(i64),
    /// A 64-bit float.
    Float64(f64),
    /// A string.
    Str(String),
    /// Any other value, shared behind an `Arc`.
    Other(Arc<dyn OpaqueValue>),
}

impl Value {
    /// Wrap an arbitrary value.
    pub fn other<T: Any + fmt::Debug + Send + Sync>(value: T) -> Self {
        Value::Other(Arc::new(value))
    }

    /// The boolean, if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The integer, if this is an `Int`.
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// The integer, if this is an `Int64`.
    pub fn as_int64(&self) -> Option<i64> {
        match self {
            Value::Int64(i) => Some(*i),
            _ => None,
        }
    }

    /// The float, if this is a `Float64`.
    pub fn as_float64(&self) -> Option<f64> {
        match self {
            Value::Float64(f) => Some(*f),
            _ => None,
        }
    }

    /// The string slice, if this is a `Str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the held value as `T`, whichever variant holds it.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        let any: &dyn Any = match self {
            Value::Bool(b) => b,
            Value::Int(i) => i,
            Value::Int64(i) => i,
            Value::Float64(f) => f,
            Value::Str(s) => s,
            Value::Other(other) => other.as_ref().as_any(),
        };
        any.downcast_ref::<T>()
    }
}

impl PartialEq for Value {
    /// `Other` values compare by identity; everything else by value.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Int64(a), Value::Int64(b)) => a == b,
            (Value::Float64(a), Value::Float64(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Other(a), Value::Other(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Int64(i) => write!(f, "{}", i),
            Value::Float64(v) => write!(f, "{}", v),
            Value::Str(s) => f.write_str(s),
            Value::Other(other) => write!(f, "{:?}", other),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int64(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float64(f)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}
