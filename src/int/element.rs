//! Integer element types stored in interval and sorted-array sets.
//!
//! [`Element`] is sealed and implemented for every primitive integer type.
//! All offset arithmetic is carried out in `i128`, which holds every value
//! (and every difference of two values) of the supported types, so computing
//! `end = start + size` or `x - start` never overflows in an intermediate step.

use std::fmt::{Debug, Display};
use std::hash::Hash;

mod sealed {
    pub trait Sealed {}
}

/// An integer type that can be stored in an [`OrderedSet`](super::OrderedSet).
///
/// # Examples
///
/// ```rust
/// use molint::int::Element;
///
/// assert_eq!(<u32 as Element>::ZERO, 0);
/// assert_eq!(7u8.to_wide(), 7);
/// assert_eq!(i16::from_wide(-3), -3);
/// ```
pub trait Element:
    Copy + Ord + Hash + Debug + Display + Send + Sync + 'static + sealed::Sealed
{
    /// The additive identity, used as the start of the canonical empty interval.
    const ZERO: Self;

    /// The largest representable value.
    const MAX: Self;

    /// Widens the value to `i128` without loss.
    fn to_wide(self) -> i128;

    /// Narrows an `i128` back to the element type.
    ///
    /// The value must be representable in `Self`; callers only pass values
    /// derived from existing elements and in-range offsets.
    fn from_wide(value: i128) -> Self;
}

macro_rules! impl_element_for {
    ($($t:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $t {}

            impl Element for $t {
                const ZERO: Self = 0;
                const MAX: Self = <$t>::MAX;

                #[inline]
                fn to_wide(self) -> i128 {
                    i128::from(self)
                }

                #[inline]
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                fn from_wide(value: i128) -> Self {
                    value as $t
                }
            }
        )*
    };
}

impl_element_for!(i8, i16, i32, i64, u8, u16, u32, u64);

macro_rules! impl_element_for_pointer_sized {
    ($($t:ty => $wide:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $t {}

            impl Element for $t {
                const ZERO: Self = 0;
                const MAX: Self = <$t>::MAX;

                #[inline]
                #[allow(clippy::cast_lossless)]
                fn to_wide(self) -> i128 {
                    i128::from(self as $wide)
                }

                #[inline]
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                fn from_wide(value: i128) -> Self {
                    value as $t
                }
            }
        )*
    };
}

// `i128: From<usize>` is not implemented, so go through the 64-bit types.
impl_element_for_pointer_sized!(isize => i64, usize => u64);

/// Offset `start` by `offset` positions.
#[inline]
pub(crate) fn offset<T: Element>(start: T, offset: usize) -> T {
    T::from_wide(start.to_wide() + offset as i128)
}

/// Exclusive upper bound of the element type, one past `T::MAX`.
#[inline]
pub(crate) fn upper_limit<T: Element>() -> i128 {
    T::MAX.to_wide() + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_zero_constants() {
        assert_eq!(<i8 as Element>::ZERO, 0);
        assert_eq!(<u64 as Element>::ZERO, 0);
        assert_eq!(<usize as Element>::ZERO, 0);
    }

    #[rstest]
    #[case::min(i64::MIN)]
    #[case::max(i64::MAX)]
    #[case::negative(-17)]
    fn test_wide_round_trip_i64(#[case] value: i64) {
        assert_eq!(i64::from_wide(value.to_wide()), value);
    }

    #[rstest]
    fn test_usize_widening_keeps_full_range() {
        assert_eq!(usize::MAX.to_wide(), i128::from(u64::MAX));
    }

    #[rstest]
    fn test_offset() {
        assert_eq!(offset(10u32, 5), 15);
        assert_eq!(offset(-3i32, 3), 0);
        assert_eq!(offset(i64::MIN, usize::MAX), i64::MAX);
    }

    #[rstest]
    fn test_upper_limit_is_one_past_max() {
        assert_eq!(upper_limit::<u8>(), 256);
        assert_eq!(upper_limit::<i64>(), i128::from(i64::MAX) + 1);
        assert_eq!(upper_limit::<u64>(), i128::from(u64::MAX) + 1);
    }
}
