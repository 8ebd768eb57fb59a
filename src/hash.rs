use std::hash::{Hash, Hasher};

/// Compute the hash code used to route string and custom keys.
///
/// The hasher is built with fixed keys, so equal values produce equal codes
/// for the whole life of the process. With the `fxhash` feature the faster,
/// less well-distributed FxHasher is used instead of ahash.
pub fn hash_code<T: Hash + ?Sized>(value: &T) -> i64 {
    #[cfg(not(feature = "fxhash"))]
    let mut hasher = ahash::AHasher::default();
    #[cfg(feature = "fxhash")]
    let mut hasher = fxhash::FxHasher::default();

    value.hash(&mut hasher);
    hasher.finish() as i64
}
