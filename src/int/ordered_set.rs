//! Ordered integer sets with interchangeable interval and array backings.
//!
//! This module provides [`OrderedSet`], the representation-agnostic set used
//! for atom and element index bookkeeping.
//!
//! # Overview
//!
//! An `OrderedSet` is backed either by:
//! - an [`Interval`], when the elements form one contiguous run (O(1) storage)
//! - a [`SortedArray`], when they do not (O(n) storage, binary searchable)
//!
//! Which backing is used is invisible to the results of every operation:
//! two sets with the same elements compare equal and hash identically.
//! Constructors and algebra pick the cheaper backing where they can, so the
//! union of two touching intervals stays an interval while a general union
//! falls back to a merged array.
//!
//! # Functional Programming Principles
//!
//! All operations are pure:
//! - **Immutability**: inputs are never modified; every result is a new value
//! - **Structural Sharing**: array backings live in an `Arc<[T]>`, so clones
//!   and results equal to an input share storage
//! - **Thread Safety**: sets are `Send + Sync` and can be queried from any
//!   number of threads without synchronization
//!
//! # Time Complexity
//!
//! | Operation                   | Interval | `SortedArray`  |
//! |-----------------------------|----------|----------------|
//! | `has` / `index_of`          | O(1)     | O(log n)       |
//! | `get` / `get_at`            | O(1)     | O(1)           |
//! | `min` / `max` / `size`      | O(1)     | O(1)           |
//! | `find_predecessor_index`    | O(1)     | O(log n)       |
//! | `find_range`                | O(1)     | O(log n)       |
//! | `union`/`intersect`/`subtract` | O(1) when both are intervals and the result is one | O(n + m) |
//!
//! # Limits
//!
//! Intervals are exact for every element type, so `[i64::MIN, i64::MAX]`
//! holds all `2^64` of its elements. Results that stay contiguous are never
//! enumerated. A result that needs an array backing is, and an array of
//! `2^64` elements cannot be allocated.
//!
//! # Examples
//!
//! ```rust
//! use molint::int::OrderedSet;
//!
//! let residues = OrderedSet::of_bounds(0, 5);
//! let ligand = OrderedSet::of_sorted_array(vec![7, 9, 12]);
//!
//! let union = residues.union(&ligand);
//! assert_eq!(union.size(), 8);
//! assert!(union.is_sorted_array());
//!
//! // Touching intervals merge into one interval
//! let merged = residues.union(&OrderedSet::of_bounds(5, 10));
//! assert!(merged.is_interval());
//! assert_eq!(merged, OrderedSet::of_range(0, 9));
//! ```

use super::element::Element;
use super::error::OrderedSetError;
use super::hash::{hash3, hash4};
use super::interval::{Interval, IntervalIterator, index_window};
use super::sorted_array::{
    SortedArray, are_intersecting_slices, difference_slices, intersection_size_slices,
    intersection_slices, is_contiguous_slice, is_subset_slices, union_slices,
};
use std::hash::{Hash, Hasher};
use std::ops::Range;
use std::sync::Arc;

/// A set of distinct integers in ascending order.
///
/// See the [module documentation](self) for an overview.
///
/// # Type Parameters
///
/// * `T` - The integer element type. Defaults to `i32`.
#[derive(Clone)]
pub enum OrderedSet<T: Element = i32> {
    /// A contiguous run of integers.
    Interval(Interval<T>),
    /// An explicit strictly increasing array.
    SortedArray(SortedArray<T>),
}

static_assertions::assert_impl_all!(OrderedSet<i32>: Send, Sync);
static_assertions::assert_impl_all!(OrderedSet<usize>: Send, Sync);
static_assertions::assert_impl_all!(SortedArray<u32>: Send, Sync);
static_assertions::assert_impl_all!(Interval<i64>: Send, Sync, Copy);

impl<T: Element> OrderedSet<T> {
    // =========================================================================
    // Construction
    // =========================================================================

    /// Returns the canonical empty set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use molint::int::OrderedSet;
    ///
    /// let empty: OrderedSet = OrderedSet::empty();
    /// assert!(empty.is_empty());
    /// assert!(empty.is_interval());
    /// ```
    #[inline]
    #[must_use]
    pub const fn empty() -> Self {
        Self::Interval(Interval::empty())
    }

    /// Returns the set `{value}`.
    #[inline]
    #[must_use]
    pub fn of_singleton(value: T) -> Self {
        Self::Interval(Interval::of_singleton(value))
    }

    /// Returns the set `{min, min + 1, ..., max}`, or the empty set when `max < min`.
    #[inline]
    #[must_use]
    pub fn of_range(min: T, max: T) -> Self {
        Self::Interval(Interval::of_range(min, max))
    }

    /// Returns the set `{start, ..., end - 1}`, or the empty set when `end <= start`.
    #[inline]
    #[must_use]
    pub fn of_bounds(start: T, end: T) -> Self {
        Self::Interval(Interval::of_bounds(start, end))
    }

    /// Creates a set from a strictly increasing sequence.
    ///
    /// Empty input yields the empty set and contiguous input is stored as an
    /// interval; otherwise the sequence is wrapped without copying when it is
    /// already an `Arc<[T]>`.
    ///
    /// # Preconditions
    ///
    /// The sequence must be sorted in strictly ascending order (no duplicates).
    /// This is the caller's responsibility: it is only checked by
    /// `debug_assert!`, and in release builds invalid input yields incorrect
    /// results from every later operation. Use
    /// [`try_of_sorted_array`](Self::try_of_sorted_array) for untrusted input.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use molint::int::OrderedSet;
    ///
    /// let sparse = OrderedSet::of_sorted_array(vec![1, 3, 5]);
    /// assert!(sparse.is_sorted_array());
    ///
    /// let dense = OrderedSet::of_sorted_array(vec![4, 5, 6]);
    /// assert!(dense.is_interval());
    /// ```
    #[must_use]
    pub fn of_sorted_array(elements: impl Into<Arc<[T]>>) -> Self {
        Self::normalized(SortedArray::of_sorted_array(elements))
    }

    /// Validated form of [`of_sorted_array`](Self::of_sorted_array).
    ///
    /// # Errors
    ///
    /// Returns [`OrderedSetError::NotStrictlySorted`] if the sequence is not
    /// strictly increasing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use molint::int::{OrderedSet, OrderedSetError};
    ///
    /// assert!(OrderedSet::try_of_sorted_array(vec![1, 2, 8]).is_ok());
    /// assert_eq!(
    ///     OrderedSet::try_of_sorted_array(vec![1, 8, 2]).unwrap_err(),
    ///     OrderedSetError::NotStrictlySorted { position: 2 }
    /// );
    /// ```
    pub fn try_of_sorted_array(elements: impl Into<Arc<[T]>>) -> Result<Self, OrderedSetError> {
        SortedArray::try_of_sorted_array(elements).map(Self::normalized)
    }

    /// Creates a set from arbitrary input by sorting and deduplicating it.
    #[must_use]
    pub fn of_unsorted_array(elements: Vec<T>) -> Self {
        Self::normalized(SortedArray::of_unsorted_array(elements))
    }

    /// Picks the cheapest backing for an array. O(1).
    fn normalized(array: SortedArray<T>) -> Self {
        match (array.min(), array.max()) {
            (Some(min), Some(max)) if array.is_contiguous() => {
                Self::Interval(Interval::of_range(min, max))
            }
            (Some(_), Some(_)) => Self::SortedArray(array),
            _ => Self::empty(),
        }
    }

    /// Builds a set from the strictly increasing result of an algebra kernel.
    fn from_sorted_vec(elements: Vec<T>) -> Self {
        match (elements.first().copied(), elements.last().copied()) {
            (Some(min), Some(max)) if is_contiguous_slice(&elements) => {
                Self::Interval(Interval::of_range(min, max))
            }
            (Some(_), Some(_)) => Self::SortedArray(SortedArray::of_sorted_array(elements)),
            _ => Self::empty(),
        }
    }

    // =========================================================================
    // Discrimination
    // =========================================================================

    /// Returns `true` if the set is backed by an [`Interval`].
    #[inline]
    #[must_use]
    pub const fn is_interval(&self) -> bool {
        matches!(self, Self::Interval(_))
    }

    /// Returns `true` if the set is backed by a [`SortedArray`].
    #[inline]
    #[must_use]
    pub const fn is_sorted_array(&self) -> bool {
        matches!(self, Self::SortedArray(_))
    }

    /// Returns the interval backing, if any.
    #[inline]
    #[must_use]
    pub const fn as_interval(&self) -> Option<&Interval<T>> {
        match self {
            Self::Interval(interval) => Some(interval),
            Self::SortedArray(_) => None,
        }
    }

    /// Returns the array backing, if any.
    #[inline]
    #[must_use]
    pub const fn as_sorted_array(&self) -> Option<&SortedArray<T>> {
        match self {
            Self::Interval(_) => None,
            Self::SortedArray(array) => Some(array),
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Returns the number of elements. O(1).
    ///
    /// Saturates at `usize::MAX`, which only an interval over the full range of
    /// a 64-bit element type exceeds. [`wide_size`](Self::wide_size) is exact.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        match self {
            Self::Interval(interval) => interval.size(),
            Self::SortedArray(array) => array.size(),
        }
    }

    /// Returns the exact number of elements.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use molint::int::OrderedSet;
    ///
    /// let everything = OrderedSet::of_range(u64::MIN, u64::MAX);
    /// assert_eq!(everything.wide_size(), 1u128 << 64);
    /// ```
    #[inline]
    #[must_use]
    pub fn wide_size(&self) -> u128 {
        match self {
            Self::Interval(interval) => interval.wide_size(),
            Self::SortedArray(array) => wide_count(array.size()),
        }
    }

    /// Returns `true` if the set has no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Returns the smallest element, or `None` if the set is empty. O(1).
    #[inline]
    #[must_use]
    pub fn min(&self) -> Option<T> {
        match self {
            Self::Interval(interval) => interval.min(),
            Self::SortedArray(array) => array.min(),
        }
    }

    /// Returns the largest element, or `None` if the set is empty. O(1).
    #[inline]
    #[must_use]
    pub fn max(&self) -> Option<T> {
        match self {
            Self::Interval(interval) => interval.max(),
            Self::SortedArray(array) => array.max(),
        }
    }

    /// Returns `true` if the set contains `value`.
    ///
    /// # Complexity
    ///
    /// - O(1) for interval backings
    /// - O(log n) for array backings (binary search)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use molint::int::OrderedSet;
    ///
    /// let set = OrderedSet::of_sorted_array(vec![2, 4, 8]);
    /// assert!(set.has(4));
    /// assert!(!set.has(5));
    /// ```
    #[inline]
    #[must_use]
    pub fn has(&self, value: T) -> bool {
        match self {
            Self::Interval(interval) => interval.has(value),
            Self::SortedArray(array) => array.has(value),
        }
    }

    /// Returns the rank of `value` in the ascending enumeration of the set,
    /// or `None` if `value` is not a member.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use molint::int::OrderedSet;
    ///
    /// let set = OrderedSet::of_sorted_array(vec![2, 4, 8]);
    /// assert_eq!(set.index_of(8), Some(2));
    /// assert_eq!(set.index_of(3), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn index_of(&self, value: T) -> Option<usize> {
        match self {
            Self::Interval(interval) => interval.index_of(value),
            Self::SortedArray(array) => array.index_of(value),
        }
    }

    /// Returns the rank of `value` if it occurs inside the index window `range`.
    #[must_use]
    pub fn index_of_in_interval(&self, value: T, range: Interval<usize>) -> Option<usize> {
        match self {
            Self::Interval(interval) => {
                let window = index_window(range, interval.size());
                interval
                    .index_of(value)
                    .filter(|index| window.contains(index))
            }
            Self::SortedArray(array) => array.index_of_in_interval(value, range),
        }
    }

    /// Returns the element at position `index`, or `None` if out of range.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<T> {
        match self {
            Self::Interval(interval) => interval.get(index),
            Self::SortedArray(array) => array.get(index),
        }
    }

    /// Returns the element at position `index`.
    ///
    /// # Errors
    ///
    /// Returns [`OrderedSetError::IndexOutOfBounds`] if `index >= size`. This is
    /// the only failing operation on a well-formed set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use molint::int::OrderedSet;
    ///
    /// let set = OrderedSet::of_sorted_array(vec![10, 20, 30]);
    /// assert_eq!(set.get_at(1), Ok(20));
    /// assert!(set.get_at(3).is_err());
    /// ```
    #[inline]
    pub fn get_at(&self, index: usize) -> Result<T, OrderedSetError> {
        match self {
            Self::Interval(interval) => interval.get_at(index),
            Self::SortedArray(array) => array.get_at(index),
        }
    }

    /// Approximate, representation-independent hash of the set.
    ///
    /// The hash mixes the size, the smallest and largest element and, for sets
    /// of more than two elements, the middle element. It does not look at every
    /// element: large non-contiguous sets that agree on this summary collide.
    /// Equality never depends on it, so hash-based containers stay correct and
    /// only lose speed on such collisions. The empty set hashes to `0`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use molint::int::{OrderedSet, SortedArray};
    ///
    /// let interval = OrderedSet::of_range(0, 4);
    /// let array = OrderedSet::SortedArray(SortedArray::of_sorted_array(vec![0, 1, 2, 3, 4]));
    /// assert_eq!(interval.hash_code(), array.hash_code());
    /// ```
    #[must_use]
    pub fn hash_code(&self) -> i32 {
        let (Some(min), Some(max)) = (self.min(), self.max()) else {
            return 0;
        };
        let size = self.wide_size();
        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let size_code = size as i32;
        if size > 2 {
            let middle = usize::try_from(size >> 1)
                .ok()
                .and_then(|index| self.get(index))
                .map_or(0, element_code);
            hash4(size_code, element_code(min), element_code(max), middle)
        } else {
            hash3(size_code, element_code(min), element_code(max))
        }
    }

    // =========================================================================
    // Relations
    // =========================================================================

    /// Returns `true` if both sets contain exactly the same elements.
    ///
    /// Sizes are compared first; two intervals are compared by their bounds in
    /// O(1). This is also the [`PartialEq`] implementation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use molint::int::{OrderedSet, SortedArray};
    ///
    /// let interval = OrderedSet::of_range(0, 4);
    /// let array = OrderedSet::SortedArray(SortedArray::of_sorted_array(vec![0, 1, 2, 3, 4]));
    /// assert!(interval.are_equal(&array));
    /// ```
    #[must_use]
    pub fn are_equal(&self, other: &Self) -> bool {
        if self.wide_size() != other.wide_size() {
            return false;
        }
        match (self, other) {
            (Self::Interval(left), Self::Interval(right)) => left == right,
            // A strictly increasing array with the interval's size and bounds is the interval.
            (Self::Interval(interval), Self::SortedArray(array))
            | (Self::SortedArray(array), Self::Interval(interval)) => {
                interval.min() == array.min() && interval.max() == array.max()
            }
            (Self::SortedArray(left), Self::SortedArray(right)) => {
                left.as_slice() == right.as_slice()
            }
        }
    }

    /// Returns `true` if every element of `self` is in `other`.
    ///
    /// The empty set is a subset of every set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use molint::int::OrderedSet;
    ///
    /// let chain = OrderedSet::of_bounds(0, 100);
    /// let selection = OrderedSet::of_sorted_array(vec![3, 50, 99]);
    /// assert!(selection.is_subset(&chain));
    /// assert!(!chain.is_subset(&selection));
    /// ```
    #[must_use]
    pub fn is_subset(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Interval(left), Self::Interval(right)) => left.is_sub_interval(right),
            (Self::Interval(interval), Self::SortedArray(array)) => {
                wide_count(array_window_within(array, interval).len()) == interval.wide_size()
            }
            (Self::SortedArray(array), Self::Interval(interval)) => {
                match (array.min(), array.max()) {
                    (Some(min), Some(max)) => interval.has(min) && interval.has(max),
                    _ => true,
                }
            }
            (Self::SortedArray(left), Self::SortedArray(right)) => {
                is_subset_slices(left.as_slice(), right.as_slice())
            }
        }
    }

    /// Returns `true` if the sets share at least one element.
    ///
    /// # Complexity
    ///
    /// - O(1) for two intervals
    /// - O(log n) for an interval and an array
    /// - O(n + m) worst case for two arrays, stopping at the first common element
    #[must_use]
    pub fn are_intersecting(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Interval(left), Self::Interval(right)) => left.are_intersecting(right),
            (Self::Interval(interval), Self::SortedArray(array))
            | (Self::SortedArray(array), Self::Interval(interval)) => {
                !array_window_within(array, interval).is_empty()
            }
            (Self::SortedArray(left), Self::SortedArray(right)) => {
                are_intersecting_slices(left.as_slice(), right.as_slice())
            }
        }
    }

    /// Returns `|self ∩ other|` without building the intersection.
    ///
    /// The count is exact, including for intervals over a full 64-bit range.
    #[must_use]
    pub fn intersection_size(&self, other: &Self) -> u128 {
        match (self, other) {
            (Self::Interval(left), Self::Interval(right)) => left.intersect(right).wide_size(),
            (Self::Interval(interval), Self::SortedArray(array))
            | (Self::SortedArray(array), Self::Interval(interval)) => {
                wide_count(array_window_within(array, interval).len())
            }
            (Self::SortedArray(left), Self::SortedArray(right)) => {
                wide_count(intersection_size_slices(left.as_slice(), right.as_slice()))
            }
        }
    }

    /// Returns `|self ∪ other|` without building the union.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use molint::int::OrderedSet;
    ///
    /// let below_max = OrderedSet::of_bounds(0u64, u64::MAX);
    /// let top = OrderedSet::of_singleton(u64::MAX);
    /// assert_eq!(below_max.union_size(&top), 1u128 << 64);
    /// ```
    #[must_use]
    pub fn union_size(&self, other: &Self) -> u128 {
        self.wide_size() + (other.wide_size() - self.intersection_size(other))
    }

    // =========================================================================
    // Algebra
    // =========================================================================

    /// Returns the set of elements in `self`, `other`, or both.
    ///
    /// Two intervals that overlap or touch produce an interval. Other inputs
    /// are merged with a two-pointer walk; a result that turns out to be
    /// contiguous is still stored as an interval.
    ///
    /// # Complexity
    ///
    /// O(1) for touching intervals, O(n + m) otherwise.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use molint::int::OrderedSet;
    ///
    /// let left = OrderedSet::of_sorted_array(vec![1, 3, 5]);
    /// let right = OrderedSet::of_sorted_array(vec![2, 3, 9]);
    /// assert_eq!(left.union(&right).to_vec(), vec![1, 2, 3, 5, 9]);
    /// ```
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        match (self, other) {
            (Self::Interval(left), Self::Interval(right)) => left.try_union(right).map_or_else(
                || Self::union_separated_intervals(left, right),
                Self::Interval,
            ),
            (Self::Interval(interval), Self::SortedArray(array))
            | (Self::SortedArray(array), Self::Interval(interval)) => {
                Self::union_interval_array(interval, array)
            }
            (Self::SortedArray(left), Self::SortedArray(right)) => {
                if right.is_empty() {
                    return self.clone();
                }
                if left.is_empty() {
                    return other.clone();
                }
                Self::from_sorted_vec(union_slices(left.as_slice(), right.as_slice()))
            }
        }
    }

    /// Union of two non-empty intervals separated by a gap.
    fn union_separated_intervals(left: &Interval<T>, right: &Interval<T>) -> Self {
        let (lower, upper) = if left.start() < right.start() {
            (left, right)
        } else {
            (right, left)
        };
        let mut elements = Vec::with_capacity(lower.size().saturating_add(upper.size()));
        elements.extend(lower.iter());
        elements.extend(upper.iter());
        Self::SortedArray(SortedArray::of_sorted_array(elements))
    }

    fn union_interval_array(interval: &Interval<T>, array: &SortedArray<T>) -> Self {
        if interval.is_empty() {
            return Self::SortedArray(array.clone());
        }
        let window = array_window_around(array, interval);
        if window.start == 0 && window.end == array.size() {
            return Self::Interval(*interval);
        }

        let slice = array.as_slice();
        let (below, above) = (&slice[..window.start], &slice[window.end..]);
        if extends_downward(below, interval.start_wide())
            && extends_upward(above, interval.end_wide())
        {
            let start = below.first().copied().unwrap_or_else(|| interval.start());
            let end = above.last().map_or(interval.end_wide(), |last| last.to_wide() + 1);
            return Self::Interval(Interval::from_wide_bounds(start, end));
        }

        let mut elements =
            Vec::with_capacity(interval.size().saturating_add(below.len() + above.len()));
        elements.extend_from_slice(below);
        elements.extend(interval.iter());
        elements.extend_from_slice(above);
        Self::from_sorted_vec(elements)
    }

    /// Returns the set of elements in both `self` and `other`.
    ///
    /// # Complexity
    ///
    /// - O(1) for two intervals
    /// - O(log n + k) for an interval and an array, where k is the result size
    /// - O(n + m) for two arrays
    ///
    /// # Examples
    ///
    /// ```rust
    /// use molint::int::OrderedSet;
    ///
    /// let chain = OrderedSet::of_bounds(10, 20);
    /// let selection = OrderedSet::of_sorted_array(vec![5, 12, 15, 25]);
    /// assert_eq!(chain.intersect(&selection).to_vec(), vec![12, 15]);
    /// ```
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Self {
        match (self, other) {
            (Self::Interval(left), Self::Interval(right)) => Self::Interval(left.intersect(right)),
            (Self::Interval(interval), Self::SortedArray(array))
            | (Self::SortedArray(array), Self::Interval(interval)) => {
                let window = array_window_within(array, interval);
                if window.len() == array.size() {
                    Self::normalized(array.clone())
                } else {
                    Self::from_sorted_vec(array.as_slice()[window].to_vec())
                }
            }
            (Self::SortedArray(left), Self::SortedArray(right)) => {
                Self::from_sorted_vec(intersection_slices(left.as_slice(), right.as_slice()))
            }
        }
    }

    /// Returns the elements of `self` that are not in `other`.
    ///
    /// Subtracting an interval from an interval stays an interval unless the
    /// subtrahend punches a hole into the middle, in which case the surviving
    /// elements are enumerated into an array.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use molint::int::OrderedSet;
    ///
    /// let chain = OrderedSet::of_bounds(0, 10);
    ///
    /// let trimmed = chain.subtract(&OrderedSet::of_bounds(7, 20));
    /// assert_eq!(trimmed, OrderedSet::of_bounds(0, 7));
    /// assert!(trimmed.is_interval());
    ///
    /// let holed = chain.subtract(&OrderedSet::of_sorted_array(vec![3, 4]));
    /// assert!(holed.is_sorted_array());
    /// assert_eq!(holed.to_vec(), vec![0, 1, 2, 5, 6, 7, 8, 9]);
    /// ```
    #[must_use]
    pub fn subtract(&self, other: &Self) -> Self {
        match (self, other) {
            (Self::Interval(left), Self::Interval(right)) => Self::subtract_intervals(left, right),
            (Self::Interval(interval), Self::SortedArray(array)) => {
                let window = array_window_within(array, interval);
                if window.is_empty() {
                    return self.clone();
                }
                let removed = &array.as_slice()[window];
                let leading = removed
                    .iter()
                    .zip(interval.iter())
                    .take_while(|(removed, value)| **removed == *value)
                    .count();
                let trailing = removed[leading..]
                    .iter()
                    .rev()
                    .zip(interval.iter().rev())
                    .take_while(|(removed, value)| **removed == *value)
                    .count();
                if leading + trailing == removed.len() {
                    return Self::trimmed_interval(interval, leading, trailing);
                }

                let mut removed = removed.iter().peekable();
                let mut elements = Vec::with_capacity(interval.size().saturating_sub(removed.len()));
                for value in interval.iter() {
                    if removed.next_if_eq(&&value).is_none() {
                        elements.push(value);
                    }
                }
                Self::from_sorted_vec(elements)
            }
            (Self::SortedArray(array), Self::Interval(interval)) => {
                let window = array_window_around(array, interval);
                if window.is_empty() {
                    return self.clone();
                }
                let slice = array.as_slice();
                let mut elements = Vec::with_capacity(slice.len() - window.len());
                elements.extend_from_slice(&slice[..window.start]);
                elements.extend_from_slice(&slice[window.end..]);
                Self::from_sorted_vec(elements)
            }
            (Self::SortedArray(left), Self::SortedArray(right)) => {
                if !are_intersecting_slices(left.as_slice(), right.as_slice()) {
                    return self.clone();
                }
                Self::from_sorted_vec(difference_slices(left.as_slice(), right.as_slice()))
            }
        }
    }

    /// `interval` without its first `leading` and last `trailing` elements.
    fn trimmed_interval(interval: &Interval<T>, leading: usize, trailing: usize) -> Self {
        #[allow(clippy::cast_lossless)]
        let start = interval.start_wide() + leading as i128;
        #[allow(clippy::cast_lossless)]
        let end = interval.end_wide() - trailing as i128;
        if start >= end {
            return Self::empty();
        }
        Self::Interval(Interval::from_wide_bounds(T::from_wide(start), end))
    }

    fn subtract_intervals(left: &Interval<T>, right: &Interval<T>) -> Self {
        if !left.are_intersecting(right) {
            return Self::Interval(*left);
        }
        if left.is_sub_interval(right) {
            return Self::empty();
        }

        // `right.end_wide()` is inside `left` whenever `upper` is used, so it fits in `T`.
        let upper = || Interval::from_wide_bounds(T::from_wide(right.end_wide()), left.end_wide());
        let lower = || Interval::from_wide_bounds(left.start(), right.start_wide());

        if right.start_wide() <= left.start_wide() {
            Self::Interval(upper())
        } else if right.end_wide() >= left.end_wide() {
            Self::Interval(lower())
        } else {
            let lower = lower();
            let upper = upper();
            let mut elements = Vec::with_capacity(lower.size().saturating_add(upper.size()));
            elements.extend(lower.iter());
            elements.extend(upper.iter());
            Self::SortedArray(SortedArray::of_sorted_array(elements))
        }
    }

    // =========================================================================
    // Positional and range queries
    // =========================================================================

    /// Returns the index of the first element `>= value`, or `size` if every
    /// element is smaller.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use molint::int::OrderedSet;
    ///
    /// let set = OrderedSet::of_sorted_array(vec![1, 3, 5, 7, 9]);
    /// assert_eq!(set.find_predecessor_index(4), 2);
    /// assert_eq!(set.find_predecessor_index(100), 5);
    /// ```
    #[inline]
    #[must_use]
    pub fn find_predecessor_index(&self, value: T) -> usize {
        match self {
            Self::Interval(interval) => interval.find_predecessor_index(value),
            Self::SortedArray(array) => array.find_predecessor_index(value),
        }
    }

    /// Lower-bound search restricted to the index window `range`.
    ///
    /// The window is clamped to `[0, size]` and the result always lies inside
    /// it, which lets callers that already know the neighbourhood of `value`
    /// skip the rest of the set.
    #[inline]
    #[must_use]
    pub fn find_predecessor_index_in_interval(&self, value: T, range: Interval<usize>) -> usize {
        match self {
            Self::Interval(interval) => interval.find_predecessor_index_in_interval(value, range),
            Self::SortedArray(array) => array.find_predecessor_index_in_interval(value, range),
        }
    }

    /// Returns the interval of *indices* of the elements whose values lie in
    /// `min..=max`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use molint::int::{Interval, OrderedSet};
    ///
    /// let set = OrderedSet::of_sorted_array(vec![1, 3, 5, 7, 9]);
    /// assert_eq!(set.find_range(3, 7), Interval::of_bounds(1, 4));
    /// ```
    #[inline]
    #[must_use]
    pub fn find_range(&self, min: T, max: T) -> Interval<usize> {
        match self {
            Self::Interval(interval) => interval.find_range(min, max),
            Self::SortedArray(array) => array.find_range(min, max),
        }
    }

    // =========================================================================
    // Iteration
    // =========================================================================

    /// Calls `function(value, index, &mut context)` for every element in
    /// ascending order and returns the final context.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use molint::int::OrderedSet;
    ///
    /// let set = OrderedSet::of_sorted_array(vec![2, 4, 8]);
    /// let weighted = set.for_each(|value, index, sum| *sum += value * index as i32, 0);
    /// assert_eq!(weighted, 2 * 0 + 4 * 1 + 8 * 2);
    /// ```
    pub fn for_each<Context, F>(&self, mut function: F, mut context: Context) -> Context
    where
        F: FnMut(T, usize, &mut Context),
    {
        for (index, value) in self.iter().enumerate() {
            function(value, index, &mut context);
        }
        context
    }

    /// Returns an iterator over the elements in ascending order.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> OrderedSetIterator<'_, T> {
        OrderedSetIterator {
            inner: match self {
                Self::Interval(interval) => OrderedSetIteratorInner::Interval(interval.iter()),
                Self::SortedArray(array) => {
                    OrderedSetIteratorInner::SortedArray(array.as_slice().iter())
                }
            },
        }
    }

    /// Returns the elements as a `Vec` in ascending order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        match self {
            Self::Interval(interval) => interval.iter().collect(),
            Self::SortedArray(array) => array.as_slice().to_vec(),
        }
    }

    /// Element at a position known to be in range.
    #[cfg(feature = "rayon")]
    fn value_at(&self, index: usize) -> T {
        match self {
            Self::Interval(interval) => super::element::offset(interval.start(), index),
            Self::SortedArray(array) => array.as_slice()[index],
        }
    }

    /// Returns a parallel iterator over the elements.
    ///
    /// The iterator is indexed, so `collect` preserves ascending order. It
    /// covers the first [`size`](Self::size) elements, which is every element
    /// unless the set spans a full 64-bit range.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use molint::int::OrderedSet;
    /// use rayon::prelude::*;
    ///
    /// let set = OrderedSet::of_bounds(0, 1000);
    /// let total: i64 = set.par_iter().map(i64::from).sum();
    /// assert_eq!(total, 499_500);
    /// ```
    #[cfg(feature = "rayon")]
    pub fn par_iter(&self) -> impl rayon::iter::IndexedParallelIterator<Item = T> + '_ {
        use rayon::prelude::*;
        (0..self.size())
            .into_par_iter()
            .map(move |index| self.value_at(index))
    }
}

#[allow(clippy::cast_possible_truncation)]
fn element_code<T: Element>(value: T) -> i32 {
    value.to_wide() as i32
}

#[allow(clippy::cast_lossless)]
const fn wide_count(length: usize) -> u128 {
    length as u128
}

/// `true` if `below` is empty or a run of consecutive integers ending at `start - 1`.
fn extends_downward<T: Element>(below: &[T], start: i128) -> bool {
    below
        .last()
        .is_none_or(|last| last.to_wide() + 1 == start && is_contiguous_slice(below))
}

/// `true` if `above` is empty or a run of consecutive integers starting at `end`.
fn extends_upward<T: Element>(above: &[T], end: i128) -> bool {
    above
        .first()
        .is_none_or(|first| first.to_wide() == end && is_contiguous_slice(above))
}

/// Positions of the array elements that lie inside `interval`.
fn array_window_within<T: Element>(array: &SortedArray<T>, interval: &Interval<T>) -> Range<usize> {
    if interval.is_empty() {
        return 0..0;
    }
    array_window_around(array, interval)
}

/// Positions of the array elements in `[interval.start, interval.end)`.
fn array_window_around<T: Element>(array: &SortedArray<T>, interval: &Interval<T>) -> Range<usize> {
    let slice = array.as_slice();
    let start = slice.partition_point(|element| element.to_wide() < interval.start_wide());
    let end = start
        + slice[start..].partition_point(|element| element.to_wide() < interval.end_wide());
    start..end
}

impl<T: Element> Default for OrderedSet<T> {
    #[inline]
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Element> PartialEq for OrderedSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.are_equal(other)
    }
}

impl<T: Element> Eq for OrderedSet<T> {}

impl<T: Element> Hash for OrderedSet<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u128(self.wide_size());
        state.write_i32(self.hash_code());
    }
}

impl<T: Element> std::fmt::Debug for OrderedSet<T> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Interval(interval) => formatter.debug_tuple("Interval").field(interval).finish(),
            Self::SortedArray(array) => formatter.debug_tuple("SortedArray").field(array).finish(),
        }
    }
}

impl<T: Element> std::fmt::Display for OrderedSet<T> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{{")?;
        for (index, value) in self.iter().enumerate() {
            if index > 0 {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{value}")?;
        }
        write!(formatter, "}}")
    }
}

impl<T: Element> From<Interval<T>> for OrderedSet<T> {
    #[inline]
    fn from(interval: Interval<T>) -> Self {
        Self::Interval(interval)
    }
}

/// Wraps the array as is, keeping the array backing even for contiguous input.
impl<T: Element> From<SortedArray<T>> for OrderedSet<T> {
    #[inline]
    fn from(array: SortedArray<T>) -> Self {
        Self::SortedArray(array)
    }
}

impl<T: Element> FromIterator<T> for OrderedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::of_unsorted_array(iter.into_iter().collect())
    }
}

impl<'a, T: Element> IntoIterator for &'a OrderedSet<T> {
    type Item = T;
    type IntoIter = OrderedSetIterator<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Ascending iterator over the elements of an [`OrderedSet`].
pub struct OrderedSetIterator<'a, T> {
    inner: OrderedSetIteratorInner<'a, T>,
}

enum OrderedSetIteratorInner<'a, T> {
    Interval(IntervalIterator<T>),
    SortedArray(std::slice::Iter<'a, T>),
}

impl<T: Element> Iterator for OrderedSetIterator<'_, T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            OrderedSetIteratorInner::Interval(iter) => iter.next(),
            OrderedSetIteratorInner::SortedArray(iter) => iter.next().copied(),
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.inner {
            OrderedSetIteratorInner::Interval(iter) => iter.size_hint(),
            OrderedSetIteratorInner::SortedArray(iter) => iter.size_hint(),
        }
    }
}

impl<T: Element> DoubleEndedIterator for OrderedSetIterator<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            OrderedSetIteratorInner::Interval(iter) => iter.next_back(),
            OrderedSetIteratorInner::SortedArray(iter) => iter.next_back().copied(),
        }
    }
}

impl<T: Element> std::iter::FusedIterator for OrderedSetIterator<'_, T> {}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T> serde::Serialize for OrderedSet<T>
where
    T: Element + serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for OrderedSet<T>
where
    T: Element + serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer
            .deserialize_seq(super::sorted_array::StrictlySortedVisitor::new())
            .map(Self::normalized)
    }
}
