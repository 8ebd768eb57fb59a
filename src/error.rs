/// Errors that can occur when building or operating on a ConcurrentMap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The requested capacity is below the minimum of two partitions.
    CapacityTooSmall(usize),
    /// The requested capacity is not a power of two.
    CapacityNotPowerOfTwo(usize),
    /// The named operation is not supported by this map.
    Unsupported(&'static str),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::CapacityTooSmall(capacity) => {
                write!(f, "capacity must be at least 2 (got {})", capacity)
            }
            Error::CapacityNotPowerOfTwo(capacity) => {
                write!(f, "capacity must be a power of two (got {})", capacity)
            }
            Error::Unsupported(operation) => write!(f, "unsupported operation: {}", operation),
        }
    }
}

impl std::error::Error for Error {}
