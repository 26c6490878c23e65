//! Contiguous half-open integer ranges.
//!
//! [`Interval`] stores `[start, end)` in constant space. It is the compact
//! backing of [`OrderedSet`](super::OrderedSet) and the type used to describe
//! index windows (`Interval<usize>`) in range queries.
//!
//! The exclusive end is kept widened to `i128`, so an interval may reach
//! `T::MAX` and may span every value of a 64-bit element type. Such an
//! interval holds `2^64` integers, one more than `usize::MAX`; use
//! [`Interval::wide_size`] where that count matters.
//!
//! # Time Complexity
//!
//! Every operation on an interval is O(1).
//!
//! # Examples
//!
//! ```rust
//! use molint::int::Interval;
//!
//! let interval = Interval::of_range(3, 6); // {3, 4, 5, 6}
//! assert_eq!(interval.size(), 4);
//! assert!(interval.has(6));
//! assert_eq!(interval.index_of(5), Some(2));
//!
//! let half_open = Interval::of_bounds(3, 6); // {3, 4, 5}
//! assert!(!half_open.has(6));
//! ```

use super::element::{Element, offset, upper_limit};
use super::error::OrderedSetError;
use std::ops::Range;

/// A half-open range `[start, end)` of integers.
///
/// Empty intervals are normalized so that all of them compare equal.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval<T: Element = i32> {
    start: T,
    end: i128,
}

impl<T: Element> Interval<T> {
    /// Creates the empty interval.
    #[inline]
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            start: T::ZERO,
            end: 0,
        }
    }

    /// Interval `[start, end)` for a widened exclusive end.
    ///
    /// `end` must not exceed one past `T::MAX`.
    #[inline]
    pub(crate) fn from_wide_bounds(start: T, end: i128) -> Self {
        if end <= start.to_wide() {
            Self::empty()
        } else {
            Self { start, end }
        }
    }

    /// Creates the interval `[value, value + 1)`.
    #[inline]
    #[must_use]
    pub fn of_singleton(value: T) -> Self {
        Self {
            start: value,
            end: value.to_wide() + 1,
        }
    }

    /// Creates the interval containing `min..=max`.
    ///
    /// Returns the empty interval when `max < min`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use molint::int::Interval;
    ///
    /// assert_eq!(Interval::of_range(0, 4).size(), 5);
    /// assert!(Interval::of_range(4, 0).is_empty());
    ///
    /// let everything = Interval::of_range(i64::MIN, i64::MAX);
    /// assert!(everything.has(i64::MAX));
    /// assert_eq!(everything.wide_size(), 1u128 << 64);
    /// ```
    #[must_use]
    pub fn of_range(min: T, max: T) -> Self {
        Self::from_wide_bounds(min, max.to_wide() + 1)
    }

    /// Creates the half-open interval `[start, end)`.
    ///
    /// Returns the empty interval when `end <= start`.
    #[must_use]
    pub fn of_bounds(start: T, end: T) -> Self {
        Self::from_wide_bounds(start, end.to_wide())
    }

    /// Creates the interval `[0, length)`, truncated at `T::MAX`.
    #[inline]
    #[must_use]
    pub fn of_length(length: usize) -> Self {
        #[allow(clippy::cast_lossless)]
        let end = (length as i128).min(upper_limit::<T>());
        Self::from_wide_bounds(T::ZERO, end)
    }

    /// Returns the inclusive lower bound. The empty interval starts at zero.
    #[inline]
    #[must_use]
    pub const fn start(&self) -> T {
        self.start
    }

    /// Returns the exclusive upper bound, or `None` when it does not fit in `T`
    /// (an interval whose last element is `T::MAX`).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use molint::int::Interval;
    ///
    /// assert_eq!(Interval::of_bounds(3, 7).end(), Some(7));
    /// assert_eq!(Interval::of_range(250u8, 255).end(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn end(&self) -> Option<T> {
        (self.end < upper_limit::<T>()).then(|| T::from_wide(self.end))
    }

    /// Returns the number of integers in the interval.
    ///
    /// Saturates at `usize::MAX`. Only an interval covering the full range of
    /// a 64-bit element type holds more; [`wide_size`](Self::wide_size) is
    /// exact for every interval.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        usize::try_from(self.wide_size()).unwrap_or(usize::MAX)
    }

    /// Returns the exact number of integers in the interval.
    #[inline]
    #[must_use]
    pub fn wide_size(&self) -> u128 {
        // The empty interval is [0, 0), so the difference is zero there too.
        self.end.abs_diff(self.start_wide())
    }

    /// Returns `true` if the interval contains no integers.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.end <= self.start_wide()
    }

    /// Returns the smallest element, or `None` if empty.
    #[inline]
    #[must_use]
    pub fn min(&self) -> Option<T> {
        (!self.is_empty()).then_some(self.start)
    }

    /// Returns the largest element, or `None` if empty.
    #[inline]
    #[must_use]
    pub fn max(&self) -> Option<T> {
        (!self.is_empty()).then(|| T::from_wide(self.end - 1))
    }

    #[inline]
    pub(crate) fn start_wide(&self) -> i128 {
        self.start.to_wide()
    }

    /// Exclusive upper bound, widened so that intervals ending at `T::MAX` are representable.
    #[inline]
    pub(crate) const fn end_wide(&self) -> i128 {
        self.end
    }

    /// Returns `true` if `value` lies in the interval.
    #[inline]
    #[must_use]
    pub fn has(&self, value: T) -> bool {
        let value = value.to_wide();
        value >= self.start_wide() && value < self.end
    }

    /// Returns the rank of `value`, or `None` if it is not in the interval.
    ///
    /// Ranks always fit in `usize` on 64-bit targets.
    #[inline]
    #[must_use]
    pub fn index_of(&self, value: T) -> Option<usize> {
        if self.has(value) {
            usize::try_from(value.to_wide() - self.start_wide()).ok()
        } else {
            None
        }
    }

    /// Returns the element at position `index`, or `None` if out of range.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<T> {
        #[allow(clippy::cast_lossless)]
        let position = index as i128;
        (position < self.end - self.start_wide()).then(|| offset(self.start, index))
    }

    /// Returns the element at position `index`.
    ///
    /// # Errors
    ///
    /// Returns [`OrderedSetError::IndexOutOfBounds`] if `index >= size`.
    #[inline]
    pub fn get_at(&self, index: usize) -> Result<T, OrderedSetError> {
        self.get(index).ok_or(OrderedSetError::IndexOutOfBounds {
            index,
            size: self.size(),
        })
    }

    /// Returns `true` if the two intervals share at least one integer.
    #[must_use]
    pub fn are_intersecting(&self, other: &Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.start_wide() < other.end
            && other.start_wide() < self.end
    }

    /// Returns `true` if every integer of `self` lies in `other`.
    ///
    /// The empty interval is a sub-interval of everything.
    #[must_use]
    pub fn is_sub_interval(&self, other: &Self) -> bool {
        self.is_empty()
            || (!other.is_empty()
                && other.start_wide() <= self.start_wide()
                && self.end <= other.end)
    }

    /// Returns the overlap of the two intervals.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use molint::int::Interval;
    ///
    /// let overlap = Interval::of_bounds(0, 10).intersect(&Interval::of_bounds(5, 20));
    /// assert_eq!(overlap, Interval::of_bounds(5, 10));
    /// ```
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Self {
        if !self.are_intersecting(other) {
            return Self::empty();
        }
        Self::from_wide_bounds(self.start.max(other.start), self.end.min(other.end))
    }

    /// Returns the interval spanning both inputs if they overlap or touch.
    ///
    /// Two intervals whose union has a gap cannot be represented as a single
    /// interval, in which case `None` is returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use molint::int::Interval;
    ///
    /// let left = Interval::of_bounds(0, 5);
    /// assert_eq!(left.try_union(&Interval::of_bounds(5, 10)), Some(Interval::of_bounds(0, 10)));
    /// assert_eq!(left.try_union(&Interval::of_bounds(6, 10)), None);
    /// ```
    #[must_use]
    pub fn try_union(&self, other: &Self) -> Option<Self> {
        if self.is_empty() {
            return Some(*other);
        }
        if other.is_empty() {
            return Some(*self);
        }
        (self.start_wide() <= other.end && other.start_wide() <= self.end).then(|| {
            Self::from_wide_bounds(self.start.min(other.start), self.end.max(other.end))
        })
    }

    /// Index of the first element `>= value` for a widened query value.
    pub(crate) fn lower_bound_wide(&self, value: i128) -> usize {
        if value <= self.start_wide() {
            0
        } else if value >= self.end {
            self.size()
        } else {
            usize::try_from(value - self.start_wide()).unwrap_or(usize::MAX)
        }
    }

    /// Returns the index of the first element `>= value`, or `size` if there is none.
    ///
    /// Like [`size`](Self::size), the past-the-end index saturates at
    /// `usize::MAX` for an interval over a full 64-bit range.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use molint::int::Interval;
    ///
    /// let interval = Interval::of_bounds(10, 20);
    /// assert_eq!(interval.find_predecessor_index(5), 0);
    /// assert_eq!(interval.find_predecessor_index(13), 3);
    /// assert_eq!(interval.find_predecessor_index(25), 10);
    /// ```
    #[must_use]
    pub fn find_predecessor_index(&self, value: T) -> usize {
        self.lower_bound_wide(value.to_wide())
    }

    /// Like [`find_predecessor_index`](Self::find_predecessor_index), with the
    /// result clamped to the index window `range`.
    #[must_use]
    pub fn find_predecessor_index_in_interval(&self, value: T, range: Interval<usize>) -> usize {
        let window = index_window(range, self.size());
        self.find_predecessor_index(value)
            .clamp(window.start, window.end)
    }

    /// Returns the indices of the elements that lie in `min..=max`.
    #[must_use]
    pub fn find_range(&self, min: T, max: T) -> Interval<usize> {
        if max < min {
            return Interval::empty();
        }
        let start = self.lower_bound_wide(min.to_wide());
        let end = self.lower_bound_wide(max.to_wide() + 1);
        Interval::of_bounds(start, end)
    }

    /// Returns an iterator over the integers in ascending order.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> IntervalIterator<T> {
        IntervalIterator {
            front: self.start_wide(),
            back: self.end.max(self.start_wide()),
            marker: std::marker::PhantomData,
        }
    }
}

/// Converts an index interval into a `Range` clamped to `[0, size]`.
pub(crate) fn index_window(range: Interval<usize>, size: usize) -> Range<usize> {
    let start = range.start().min(size);
    let end = usize::try_from(range.end_wide())
        .unwrap_or(usize::MAX)
        .min(size)
        .max(start);
    start..end
}

impl<T: Element> Default for Interval<T> {
    #[inline]
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Element> std::fmt::Debug for Interval<T> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "[{}, {})", self.start, self.end_wide())
    }
}

impl<T: Element> std::fmt::Display for Interval<T> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, formatter)
    }
}

impl<T: Element> IntoIterator for Interval<T> {
    type Item = T;
    type IntoIter = IntervalIterator<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Element> IntoIterator for &Interval<T> {
    type Item = T;
    type IntoIter = IntervalIterator<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Ascending iterator over the integers of an [`Interval`].
///
/// Not an `ExactSizeIterator`: an interval over a full 64-bit range yields
/// more items than `usize` can count.
#[derive(Clone, Debug)]
pub struct IntervalIterator<T> {
    front: i128,
    back: i128,
    marker: std::marker::PhantomData<T>,
}

impl<T: Element> Iterator for IntervalIterator<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        (self.front < self.back).then(|| {
            let value = T::from_wide(self.front);
            self.front += 1;
            value
        })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        usize::try_from(self.back - self.front)
            .map_or((usize::MAX, None), |remaining| (remaining, Some(remaining)))
    }
}

impl<T: Element> DoubleEndedIterator for IntervalIterator<T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        (self.front < self.back).then(|| {
            self.back -= 1;
            T::from_wide(self.back)
        })
    }
}

impl<T: Element> std::iter::FusedIterator for IntervalIterator<T> {}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T> serde::Serialize for Interval<T>
where
    T: Element + serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serde::Serialize::serialize(&(self.start, self.wide_size()), serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for Interval<T>
where
    T: Element + serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let (start, size) = <(T, u128)>::deserialize(deserializer)?;
        i128::try_from(size)
            .ok()
            .and_then(|size| start.to_wide().checked_add(size))
            .filter(|end| *end <= upper_limit::<T>())
            .map(|end| Self::from_wide_bounds(start, end))
            .ok_or_else(|| serde::de::Error::custom("interval extends past the element range"))
    }
}
