//! Explicit sets of integers stored as strictly increasing arrays.
//!
//! [`SortedArray`] wraps an `Arc<[T]>` whose elements are strictly
//! increasing. Cloning shares the allocation, and nothing can mutate the
//! elements once they are wrapped.
//!
//! # Time Complexity
//!
//! | Operation                 | Complexity |
//! |---------------------------|------------|
//! | `has` / `index_of`        | O(log n)   |
//! | `get` / `get_at`          | O(1)       |
//! | `find_predecessor_index`  | O(log n)   |
//! | `find_range`              | O(log n)   |
//! | `min` / `max` / `size`    | O(1)       |

use super::element::Element;
use super::error::OrderedSetError;
use super::interval::{Interval, index_window};
use std::cmp::Ordering;
use std::sync::Arc;

/// A strictly increasing sequence of integers with shared, immutable storage.
///
/// # Examples
///
/// ```rust
/// use molint::int::SortedArray;
///
/// let array = SortedArray::of_sorted_array(vec![1, 3, 5, 7, 9]);
/// assert!(array.has(5));
/// assert_eq!(array.index_of(7), Some(3));
/// assert_eq!(array.find_predecessor_index(4), 2);
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SortedArray<T: Element = i32>(Arc<[T]>);

impl<T: Element> SortedArray<T> {
    /// Creates an empty array.
    #[must_use]
    pub fn empty() -> Self {
        Self(Arc::from(Vec::new()))
    }

    /// Wraps a strictly increasing sequence.
    ///
    /// # Preconditions
    ///
    /// - Elements must be in strictly ascending order
    /// - No duplicate elements are allowed
    ///
    /// The input is not validated in release builds; invalid input yields
    /// incorrect results from every query on the array (a logic error, not
    /// memory unsafety). Debug builds check the precondition with
    /// `debug_assert!`. Use [`try_of_sorted_array`](Self::try_of_sorted_array)
    /// for untrusted input.
    ///
    /// Passing an existing `Arc<[T]>` shares it without copying.
    #[must_use]
    pub fn of_sorted_array(elements: impl Into<Arc<[T]>>) -> Self {
        let elements = elements.into();
        debug_assert!(
            first_unsorted_position(&elements).is_none(),
            "{}",
            SORTED_INVARIANT_PANIC_MESSAGE
        );
        Self(elements)
    }

    /// Wraps a sequence after checking that it is strictly increasing.
    ///
    /// # Errors
    ///
    /// Returns [`OrderedSetError::NotStrictlySorted`] with the position of the
    /// first element that is not greater than its predecessor.
    pub fn try_of_sorted_array(elements: impl Into<Arc<[T]>>) -> Result<Self, OrderedSetError> {
        let elements = elements.into();
        match first_unsorted_position(&elements) {
            Some(position) => Err(OrderedSetError::NotStrictlySorted { position }),
            None => Ok(Self(elements)),
        }
    }

    /// Sorts and deduplicates arbitrary input.
    #[must_use]
    pub fn of_unsorted_array(mut elements: Vec<T>) -> Self {
        elements.sort_unstable();
        elements.dedup();
        Self(Arc::from(elements))
    }

    /// Returns the number of elements.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the array has no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the underlying elements.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    /// Returns the shared backing storage.
    #[inline]
    #[must_use]
    pub fn as_shared(&self) -> &Arc<[T]> {
        &self.0
    }

    /// Returns the first element, or `None` if empty.
    #[inline]
    #[must_use]
    pub fn min(&self) -> Option<T> {
        self.0.first().copied()
    }

    /// Returns the last element, or `None` if empty.
    #[inline]
    #[must_use]
    pub fn max(&self) -> Option<T> {
        self.0.last().copied()
    }

    /// Binary search for `value`.
    #[inline]
    #[must_use]
    pub fn has(&self, value: T) -> bool {
        self.0.binary_search(&value).is_ok()
    }

    /// Returns the rank of `value`, or `None` if absent.
    #[inline]
    #[must_use]
    pub fn index_of(&self, value: T) -> Option<usize> {
        self.0.binary_search(&value).ok()
    }

    /// Returns the element at position `index`, or `None` if out of range.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<T> {
        self.0.get(index).copied()
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

    /// Returns the index of the first element `>= value`, or `size` if there is none.
    #[inline]
    #[must_use]
    pub fn find_predecessor_index(&self, value: T) -> usize {
        self.0.partition_point(|element| *element < value)
    }

    /// Lower-bound search restricted to the index window `range`.
    ///
    /// The window is clamped to `[0, size]`; the result always lies inside it.
    #[must_use]
    pub fn find_predecessor_index_in_interval(&self, value: T, range: Interval<usize>) -> usize {
        let window = index_window(range, self.size());
        window.start + self.0[window.clone()].partition_point(|element| *element < value)
    }

    /// Returns the rank of `value` if it occurs inside the index window `range`.
    #[must_use]
    pub fn index_of_in_interval(&self, value: T, range: Interval<usize>) -> Option<usize> {
        let window = index_window(range, self.size());
        self.0[window.clone()]
            .binary_search(&value)
            .ok()
            .map(|position| window.start + position)
    }

    /// Returns the indices of the elements that lie in `min..=max`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use molint::int::{Interval, SortedArray};
    ///
    /// let array = SortedArray::of_sorted_array(vec![1, 3, 5, 7, 9]);
    /// assert_eq!(array.find_range(3, 7), Interval::of_bounds(1, 4));
    /// ```
    #[must_use]
    pub fn find_range(&self, min: T, max: T) -> Interval<usize> {
        if max < min {
            return Interval::empty();
        }
        let start = self.find_predecessor_index(min);
        let end = start + self.0[start..].partition_point(|element| *element <= max);
        Interval::of_bounds(start, end)
    }

    /// Returns `true` if the elements form one run of consecutive integers.
    #[must_use]
    pub fn is_contiguous(&self) -> bool {
        is_contiguous_slice(&self.0)
    }

    /// Returns an iterator over the elements in ascending order.
    #[inline]
    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, T>> {
        self.0.iter().copied()
    }
}

impl<T: Element> Default for SortedArray<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Element> std::fmt::Debug for SortedArray<T> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.debug_list().entries(self.0.iter()).finish()
    }
}

impl<'a, T: Element> IntoIterator for &'a SortedArray<T> {
    type Item = T;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, T>>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Message for the debug-build check in [`SortedArray::of_sorted_array`].
pub(crate) const SORTED_INVARIANT_PANIC_MESSAGE: &str =
    "of_sorted_array requires strictly increasing elements (sorted + deduplicated)";

/// Position of the first element that is not greater than its predecessor.
pub(crate) fn first_unsorted_position<T: Ord>(slice: &[T]) -> Option<usize> {
    slice
        .windows(2)
        .position(|window| window[0] >= window[1])
        .map(|position| position + 1)
}

pub(crate) fn is_contiguous_slice<T: Element>(slice: &[T]) -> bool {
    match (slice.first(), slice.last()) {
        (Some(first), Some(last)) => last.to_wide() - first.to_wide() + 1 == slice.len() as i128,
        _ => false,
    }
}

// =============================================================================
// Two-pointer kernels over strictly increasing slices
// =============================================================================

/// Merges two strictly increasing slices into a strictly increasing `Vec`.
///
/// When the ranges do not overlap the comparison loop is skipped and the
/// inputs are concatenated.
pub(crate) fn union_slices<T: Element>(left: &[T], right: &[T]) -> Vec<T> {
    let (Some(left_first), Some(left_last), Some(right_first), Some(right_last)) =
        (left.first(), left.last(), right.first(), right.last())
    else {
        return if left.is_empty() { right.to_vec() } else { left.to_vec() };
    };

    let mut result = Vec::with_capacity(left.len() + right.len());
    if left_last < right_first {
        result.extend_from_slice(left);
        result.extend_from_slice(right);
        return result;
    }
    if right_last < left_first {
        result.extend_from_slice(right);
        result.extend_from_slice(left);
        return result;
    }

    let mut left_index = 0;
    let mut right_index = 0;
    while left_index < left.len() && right_index < right.len() {
        match left[left_index].cmp(&right[right_index]) {
            Ordering::Less => {
                result.push(left[left_index]);
                left_index += 1;
            }
            Ordering::Greater => {
                result.push(right[right_index]);
                right_index += 1;
            }
            Ordering::Equal => {
                result.push(left[left_index]);
                left_index += 1;
                right_index += 1;
            }
        }
    }
    result.extend_from_slice(&left[left_index..]);
    result.extend_from_slice(&right[right_index..]);
    result
}

/// Elements present in both strictly increasing slices.
pub(crate) fn intersection_slices<T: Element>(left: &[T], right: &[T]) -> Vec<T> {
    if !ranges_overlap(left, right) {
        return Vec::new();
    }

    let mut result = Vec::with_capacity(left.len().min(right.len()));
    let mut left_index = 0;
    let mut right_index = 0;
    while left_index < left.len() && right_index < right.len() {
        match left[left_index].cmp(&right[right_index]) {
            Ordering::Less => left_index += 1,
            Ordering::Greater => right_index += 1,
            Ordering::Equal => {
                result.push(left[left_index]);
                left_index += 1;
                right_index += 1;
            }
        }
    }
    result
}

/// Elements of `left` that are not in `right`.
pub(crate) fn difference_slices<T: Element>(left: &[T], right: &[T]) -> Vec<T> {
    if !ranges_overlap(left, right) {
        return left.to_vec();
    }

    let mut result = Vec::with_capacity(left.len());
    let mut left_index = 0;
    let mut right_index = 0;
    while left_index < left.len() && right_index < right.len() {
        match left[left_index].cmp(&right[right_index]) {
            Ordering::Less => {
                result.push(left[left_index]);
                left_index += 1;
            }
            Ordering::Greater => right_index += 1,
            Ordering::Equal => {
                left_index += 1;
                right_index += 1;
            }
        }
    }
    result.extend_from_slice(&left[left_index..]);
    result
}

/// Number of elements present in both slices.
pub(crate) fn intersection_size_slices<T: Element>(left: &[T], right: &[T]) -> usize {
    if !ranges_overlap(left, right) {
        return 0;
    }

    let mut count = 0;
    let mut left_index = 0;
    let mut right_index = 0;
    while left_index < left.len() && right_index < right.len() {
        match left[left_index].cmp(&right[right_index]) {
            Ordering::Less => left_index += 1,
            Ordering::Greater => right_index += 1,
            Ordering::Equal => {
                count += 1;
                left_index += 1;
                right_index += 1;
            }
        }
    }
    count
}

/// Returns `true` as soon as a common element is found.
pub(crate) fn are_intersecting_slices<T: Element>(left: &[T], right: &[T]) -> bool {
    if !ranges_overlap(left, right) {
        return false;
    }

    let mut left_index = 0;
    let mut right_index = 0;
    while left_index < left.len() && right_index < right.len() {
        match left[left_index].cmp(&right[right_index]) {
            Ordering::Less => left_index += 1,
            Ordering::Greater => right_index += 1,
            Ordering::Equal => return true,
        }
    }
    false
}

/// Returns `true` if every element of `left` occurs in `right`.
pub(crate) fn is_subset_slices<T: Element>(left: &[T], right: &[T]) -> bool {
    if left.len() > right.len() {
        return false;
    }

    let mut right_index = 0;
    for element in left {
        right_index += right[right_index..].partition_point(|candidate| candidate < element);
        if right.get(right_index) != Some(element) {
            return false;
        }
        right_index += 1;
    }
    true
}

fn ranges_overlap<T: Ord>(left: &[T], right: &[T]) -> bool {
    match (left.first(), left.last(), right.first(), right.last()) {
        (Some(left_first), Some(left_last), Some(right_first), Some(right_last)) => {
            left_first <= right_last && right_first <= left_last
        }
        _ => false,
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T> serde::Serialize for SortedArray<T>
where
    T: Element + serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.0.iter())
    }
}

#[cfg(feature = "serde")]
pub(crate) struct StrictlySortedVisitor<T> {
    marker: std::marker::PhantomData<T>,
}

#[cfg(feature = "serde")]
impl<T> StrictlySortedVisitor<T> {
    pub(crate) const fn new() -> Self {
        Self {
            marker: std::marker::PhantomData,
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::de::Visitor<'de> for StrictlySortedVisitor<T>
where
    T: Element + serde::Deserialize<'de>,
{
    type Value = SortedArray<T>;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a strictly increasing sequence of integers")
    }

    fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        let mut elements = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some(element) = access.next_element()? {
            elements.push(element);
        }
        SortedArray::try_of_sorted_array(elements).map_err(serde::de::Error::custom)
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for SortedArray<T>
where
    T: Element + serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(StrictlySortedVisitor::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_of_sorted_array_shares_backing_storage() {
        let shared: Arc<[i32]> = Arc::from(vec![1, 4, 9]);
        let array = SortedArray::of_sorted_array(Arc::clone(&shared));
        assert!(Arc::ptr_eq(array.as_shared(), &shared));
        assert_eq!(Arc::strong_count(&shared), 2);
    }

    #[rstest]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "strictly increasing")]
    fn test_of_sorted_array_unsorted_panics_in_debug() {
        let _ = SortedArray::of_sorted_array(vec![3, 1, 2]);
    }

    #[rstest]
    #[case::unsorted(vec![3, 1, 2], 1)]
    #[case::duplicate(vec![1, 2, 2, 3], 2)]
    fn test_try_of_sorted_array_reports_position(#[case] elements: Vec<i32>, #[case] position: usize) {
        assert_eq!(
            SortedArray::try_of_sorted_array(elements),
            Err(OrderedSetError::NotStrictlySorted { position })
        );
    }

    #[rstest]
    fn test_of_unsorted_array_sorts_and_deduplicates() {
        let array = SortedArray::of_unsorted_array(vec![5, 1, 3, 1, 5]);
        assert_eq!(array.as_slice(), &[1, 3, 5]);
    }

    #[rstest]
    #[case::below(0, 0)]
    #[case::exact(5, 2)]
    #[case::between(6, 3)]
    #[case::above(10, 5)]
    fn test_find_predecessor_index(#[case] value: i32, #[case] expected: usize) {
        let array = SortedArray::of_sorted_array(vec![1, 3, 5, 7, 9]);
        assert_eq!(array.find_predecessor_index(value), expected);
    }

    #[rstest]
    fn test_find_predecessor_index_in_interval_stays_in_window() {
        let array = SortedArray::of_sorted_array(vec![1, 3, 5, 7, 9]);
        let window = Interval::of_bounds(1usize, 3);
        assert_eq!(array.find_predecessor_index_in_interval(0, window), 1);
        assert_eq!(array.find_predecessor_index_in_interval(5, window), 2);
        assert_eq!(array.find_predecessor_index_in_interval(9, window), 3);
    }

    #[rstest]
    fn test_index_of_in_interval() {
        let array = SortedArray::of_sorted_array(vec![1, 3, 5, 7, 9]);
        let window = Interval::of_bounds(1usize, 3);
        assert_eq!(array.index_of_in_interval(5, window), Some(2));
        assert_eq!(array.index_of_in_interval(9, window), None);
    }

    #[rstest]
    fn test_is_contiguous() {
        assert!(SortedArray::of_sorted_array(vec![4, 5, 6]).is_contiguous());
        assert!(!SortedArray::of_sorted_array(vec![4, 6]).is_contiguous());
        assert!(!SortedArray::<i32>::empty().is_contiguous());
    }

    #[rstest]
    fn test_union_slices_deduplicates() {
        assert_eq!(union_slices(&[1, 3, 5], &[2, 3, 4]), vec![1, 2, 3, 4, 5]);
        assert_eq!(union_slices(&[7, 8], &[1, 2]), vec![1, 2, 7, 8]);
        assert_eq!(union_slices::<i32>(&[], &[1]), vec![1]);
    }

    #[rstest]
    fn test_intersection_and_difference_slices() {
        assert_eq!(intersection_slices(&[1, 2, 3, 4, 5], &[3, 4, 5, 6, 7]), vec![3, 4, 5]);
        assert_eq!(difference_slices(&[1, 2, 3, 4, 5], &[3, 4, 5, 6, 7]), vec![1, 2]);
        assert_eq!(intersection_size_slices(&[1, 2, 3, 4, 5], &[3, 4, 5, 6, 7]), 3);
    }

    #[rstest]
    fn test_subset_and_intersecting_slices() {
        assert!(is_subset_slices(&[2, 4], &[1, 2, 3, 4]));
        assert!(!is_subset_slices(&[2, 5], &[1, 2, 3, 4]));
        assert!(are_intersecting_slices(&[1, 9], &[5, 9]));
        assert!(!are_intersecting_slices(&[1, 3], &[2, 4]));
    }
}
