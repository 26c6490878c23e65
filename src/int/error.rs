//! Error types for integer set construction and positional access.

/// Errors reported by [`OrderedSet`](super::OrderedSet) and its backings.
///
/// Only positional access and validated construction can fail; set algebra
/// is total over well-formed inputs.
///
/// # Examples
///
/// ```rust
/// use molint::int::{OrderedSet, OrderedSetError};
///
/// let set = OrderedSet::of_range(1, 3);
/// assert_eq!(
///     set.get_at(3),
///     Err(OrderedSetError::IndexOutOfBounds { index: 3, size: 3 })
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderedSetError {
    /// A positional lookup was outside `[0, size)`.
    IndexOutOfBounds {
        /// The requested position.
        index: usize,
        /// The size of the set at the time of the lookup.
        size: usize,
    },
    /// Input to a validated constructor was not strictly increasing.
    NotStrictlySorted {
        /// Position of the first element that is not greater than its predecessor.
        position: usize,
    },
}

impl std::fmt::Display for OrderedSetError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IndexOutOfBounds { index, size } => {
                write!(formatter, "index {index} out of bounds for set of size {size}")
            }
            Self::NotStrictlySorted { position } => write!(
                formatter,
                "element at position {position} is not greater than its predecessor"
            ),
        }
    }
}

impl std::error::Error for OrderedSetError {}
