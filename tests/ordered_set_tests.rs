//! Unit tests for OrderedSet.
//!
//! These tests exercise the public API across both backings, including the
//! representation choices made by constructors and set algebra.

use molint::int::{Interval, OrderedSet, OrderedSetError, SortedArray};
use rstest::rstest;
use std::collections::HashSet;
use std::sync::Arc;

fn forced_array(elements: &[i32]) -> OrderedSet {
    OrderedSet::from(SortedArray::of_sorted_array(elements.to_vec()))
}

// =============================================================================
// Construction
// =============================================================================

#[rstest]
fn test_of_range_is_inclusive() {
    let set = OrderedSet::of_range(2, 5);
    assert_eq!(set.to_vec(), vec![2, 3, 4, 5]);
    assert_eq!(set.min(), Some(2));
    assert_eq!(set.max(), Some(5));
}

#[rstest]
fn test_of_bounds_is_half_open() {
    let set = OrderedSet::of_bounds(2, 5);
    assert_eq!(set.to_vec(), vec![2, 3, 4]);
    assert!(!set.has(5));
}

#[rstest]
#[case::range(OrderedSet::of_range(5, 4))]
#[case::bounds(OrderedSet::of_bounds(5, 5))]
#[case::array(OrderedSet::of_sorted_array(Vec::<i32>::new()))]
#[case::unsorted(OrderedSet::of_unsorted_array(Vec::<i32>::new()))]
fn test_empty_constructions_equal_canonical_empty(#[case] set: OrderedSet) {
    assert!(set.is_empty());
    assert!(set.is_interval());
    assert_eq!(set, OrderedSet::empty());
}

#[rstest]
fn test_of_singleton() {
    let set = OrderedSet::of_singleton(42u32);
    assert_eq!(set.size(), 1);
    assert!(set.has(42));
    assert_eq!(set.index_of(42), Some(0));
}

#[rstest]
fn test_try_of_sorted_array_rejects_duplicates() {
    assert_eq!(
        OrderedSet::try_of_sorted_array(vec![1, 2, 2]).unwrap_err(),
        OrderedSetError::NotStrictlySorted { position: 2 }
    );
}

#[rstest]
fn test_of_unsorted_array_sorts_and_deduplicates() {
    let set = OrderedSet::of_unsorted_array(vec![9, 1, 5, 1, 9]);
    assert_eq!(set.to_vec(), vec![1, 5, 9]);
}

#[rstest]
fn test_from_iterator_collects_into_set() {
    let set: OrderedSet<u16> = [4u16, 2, 3, 2].into_iter().collect();
    assert!(set.is_interval());
    assert_eq!(set, OrderedSet::of_range(2, 4));
}

#[rstest]
fn test_caller_array_is_shared_not_copied() {
    let backing: Arc<[i32]> = Arc::from(vec![10, 20, 30]);
    let set = OrderedSet::of_sorted_array(Arc::clone(&backing));
    let copy = set.clone();
    assert_eq!(Arc::strong_count(&backing), 3);
    assert_eq!(copy, set);
}

// =============================================================================
// Queries
// =============================================================================

#[rstest]
fn test_interval_size_and_membership() {
    let set = OrderedSet::of_bounds(3, 9);
    assert_eq!(set.size(), 6);
    for value in -5..15 {
        assert_eq!(set.has(value), (3..9).contains(&value), "value {value}");
    }
}

#[rstest]
fn test_get_at_inverts_index_of_for_array() {
    let elements = [1, 4, 9, 16, 25, 36];
    let set = OrderedSet::of_sorted_array(elements.to_vec());
    for value in elements {
        let index = set.index_of(value);
        assert_eq!(index.map(|index| set.get_at(index)), Some(Ok(value)));
    }
}

#[rstest]
#[case::interval(OrderedSet::of_bounds(0, 3))]
#[case::array(forced_array(&[1, 5, 9]))]
fn test_get_at_out_of_range_is_error(#[case] set: OrderedSet) {
    assert_eq!(
        set.get_at(3),
        Err(OrderedSetError::IndexOutOfBounds { index: 3, size: 3 })
    );
    assert_eq!(set.get(3), None);
}

#[rstest]
fn test_index_of_missing_value() {
    assert_eq!(OrderedSet::of_bounds(0, 3).index_of(3), None);
    assert_eq!(forced_array(&[1, 5, 9]).index_of(4), None);
}

// =============================================================================
// Equality and hashing
// =============================================================================

#[rstest]
fn test_representation_independent_equality() {
    let interval = OrderedSet::of_range(0, 4);
    let array = forced_array(&[0, 1, 2, 3, 4]);
    assert!(interval.is_interval());
    assert!(array.is_sorted_array());
    assert!(interval.are_equal(&array));
    assert_eq!(interval, array);
    assert_eq!(interval.hash_code(), array.hash_code());
}

#[rstest]
fn test_hash_set_treats_backings_as_one_key() {
    let mut seen = HashSet::new();
    seen.insert(OrderedSet::of_range(0, 4));
    assert!(!seen.insert(forced_array(&[0, 1, 2, 3, 4])));
    assert_eq!(seen.len(), 1);
}

#[rstest]
#[case::different_sizes(OrderedSet::of_range(0, 4), forced_array(&[0, 1, 2, 3]))]
#[case::same_bounds_with_gap(OrderedSet::of_range(0, 4), forced_array(&[0, 2, 4]))]
#[case::same_size_shifted(OrderedSet::of_range(0, 2), OrderedSet::of_range(1, 3))]
#[case::arrays(forced_array(&[1, 3]), forced_array(&[1, 4]))]
fn test_unequal_sets(#[case] left: OrderedSet, #[case] right: OrderedSet) {
    assert!(!left.are_equal(&right));
    assert_ne!(left, right);
}

// =============================================================================
// Algebra
// =============================================================================

#[rstest]
fn test_union_of_touching_intervals_is_interval() {
    let union = OrderedSet::of_bounds(0, 5).union(&OrderedSet::of_bounds(5, 10));
    assert!(union.is_interval());
    assert_eq!(union.as_interval(), Some(&Interval::of_bounds(0, 10)));
}

#[rstest]
fn test_union_of_overlapping_intervals_is_interval() {
    let union = OrderedSet::of_bounds(0, 6).union(&OrderedSet::of_bounds(3, 10));
    assert_eq!(union.as_interval(), Some(&Interval::of_bounds(0, 10)));
}

#[rstest]
fn test_union_is_idempotent() {
    let set = forced_array(&[1, 3, 7]);
    assert_eq!(set.union(&set), set);
}

#[rstest]
fn test_subtract_creating_hole_falls_back_to_array() {
    let result = OrderedSet::of_bounds(0, 10).subtract(&OrderedSet::of_sorted_array(vec![3, 4]));
    assert!(result.is_sorted_array());
    assert_eq!(result.to_vec(), vec![0, 1, 2, 5, 6, 7, 8, 9]);
}

#[rstest]
fn test_subtract_forced_array_hole() {
    let result = OrderedSet::of_bounds(0, 10).subtract(&forced_array(&[3, 4]));
    assert!(result.is_sorted_array());
    assert_eq!(result.to_vec(), vec![0, 1, 2, 5, 6, 7, 8, 9]);
}

#[rstest]
fn test_subtract_covering_interval_is_empty() {
    let result = OrderedSet::of_bounds(2, 5).subtract(&OrderedSet::of_bounds(0, 10));
    assert!(result.is_empty());
}

#[rstest]
fn test_algebra_does_not_modify_inputs() {
    let left = forced_array(&[1, 2, 3, 8]);
    let right = OrderedSet::of_range(2, 6);
    let _ = left.union(&right);
    let _ = left.intersect(&right);
    let _ = left.subtract(&right);
    assert_eq!(left.to_vec(), vec![1, 2, 3, 8]);
    assert_eq!(right.to_vec(), vec![2, 3, 4, 5, 6]);
}

#[rstest]
#[case::interval(OrderedSet::of_bounds(3, 8))]
#[case::array(forced_array(&[1, 4, 9]))]
#[case::empty(OrderedSet::empty())]
fn test_empty_set_laws(#[case] set: OrderedSet) {
    let empty: OrderedSet = OrderedSet::empty();
    assert_eq!(empty.union(&set), set);
    assert_eq!(set.union(&empty), set);
    assert_eq!(empty.intersect(&set), empty);
    assert!(!empty.are_intersecting(&set));
    assert_eq!(set.subtract(&empty), set);
    assert!(empty.is_subset(&set));
}

#[rstest]
fn test_are_intersecting_mixed_backings() {
    let interval = OrderedSet::of_bounds(10, 20);
    assert!(interval.are_intersecting(&forced_array(&[1, 15, 30])));
    assert!(!interval.are_intersecting(&forced_array(&[1, 9, 20])));
    assert!(forced_array(&[1, 9, 20]).are_intersecting(&OrderedSet::of_range(20, 21)));
}

// =============================================================================
// Positional and range queries
// =============================================================================

#[rstest]
fn test_find_range_returns_index_interval() {
    let set = OrderedSet::of_sorted_array(vec![1, 3, 5, 7, 9]);
    assert_eq!(set.find_range(3, 7), Interval::of_bounds(1, 4));
}

#[rstest]
#[case::interval(OrderedSet::of_bounds(10, 20), 12, 14, Interval::of_bounds(2, 5))]
#[case::nothing(forced_array(&[1, 3, 5]), 6, 9, Interval::empty())]
#[case::inverted(forced_array(&[1, 3, 5]), 5, 1, Interval::empty())]
#[case::everything(forced_array(&[1, 3, 5]), i32::MIN, i32::MAX, Interval::of_bounds(0, 3))]
fn test_find_range_cases(
    #[case] set: OrderedSet,
    #[case] min: i32,
    #[case] max: i32,
    #[case] expected: Interval<usize>,
) {
    assert_eq!(set.find_range(min, max), expected);
}

#[rstest]
fn test_find_predecessor_index_in_interval_limits_search() {
    let set = forced_array(&[2, 4, 6, 8, 10, 12]);
    let window = Interval::of_bounds(2usize, 4);
    assert_eq!(set.find_predecessor_index_in_interval(1, window), 2);
    assert_eq!(set.find_predecessor_index_in_interval(7, window), 3);
    assert_eq!(set.find_predecessor_index_in_interval(100, window), 4);
}

#[rstest]
fn test_find_predecessor_index_beyond_all_elements() {
    assert_eq!(forced_array(&[2, 4]).find_predecessor_index(5), 2);
    assert_eq!(OrderedSet::of_bounds(0, 4).find_predecessor_index(5), 4);
}

// =============================================================================
// Iteration
// =============================================================================

#[rstest]
fn test_for_each_visits_in_order_and_returns_context() {
    let set = forced_array(&[3, 6, 9]);
    let visited = set.for_each(
        |value, index, visited: &mut Vec<(i32, usize)>| visited.push((value, index)),
        Vec::new(),
    );
    assert_eq!(visited, vec![(3, 0), (6, 1), (9, 2)]);
}

#[rstest]
fn test_iterators_agree_across_backings() {
    let interval = OrderedSet::of_bounds(0, 5);
    let array = forced_array(&[0, 1, 2, 3, 4]);
    assert!(interval.iter().eq(array.iter()));
    assert_eq!(interval.iter().size_hint(), (5, Some(5)));
    assert_eq!(array.iter().rev().collect::<Vec<_>>(), vec![4, 3, 2, 1, 0]);
}

#[rstest]
fn test_wide_element_types() {
    let set = OrderedSet::of_range(u64::MAX - 2, u64::MAX);
    assert_eq!(set.size(), 3);
    assert!(set.has(u64::MAX));
    let holed = set.subtract(&OrderedSet::of_singleton(u64::MAX - 1));
    assert_eq!(holed.to_vec(), vec![u64::MAX - 2, u64::MAX]);
}

// =============================================================================
// Element type limits
// =============================================================================

#[rstest]
fn test_of_range_spanning_all_of_i64() {
    let everything = OrderedSet::of_range(i64::MIN, i64::MAX);
    assert_eq!(everything.wide_size(), 1u128 << 64);
    assert_eq!(everything.min(), Some(i64::MIN));
    assert_eq!(everything.max(), Some(i64::MAX));
    assert!(everything.has(i64::MIN));
    assert!(everything.has(i64::MAX));
    assert!(everything.has(0));
}

#[rstest]
fn test_halves_of_i64_union_into_full_range() {
    let union = OrderedSet::of_range(i64::MIN, -1).union(&OrderedSet::of_range(0, i64::MAX));
    assert!(union.is_interval());
    assert_eq!(union, OrderedSet::of_range(i64::MIN, i64::MAX));
    assert_eq!(union.hash_code(), OrderedSet::of_range(i64::MIN, i64::MAX).hash_code());
}

#[rstest]
#[case::interval(OrderedSet::of_singleton(u64::MAX))]
#[case::array(OrderedSet::from(SortedArray::of_sorted_array(vec![1u64, u64::MAX])))]
fn test_touching_union_reaching_u64_max(#[case] top: OrderedSet<u64>) {
    let below_max = OrderedSet::of_bounds(0u64, u64::MAX);
    let union = below_max.union(&top);
    assert!(union.is_interval());
    assert_eq!(union.max(), Some(u64::MAX));
    assert!(union.has(u64::MAX));
    assert_eq!(union.wide_size(), 1u128 << 64);
    assert_eq!(below_max.union_size(&top), 1u128 << 64);
    assert_eq!(union, OrderedSet::of_range(u64::MIN, u64::MAX));
}

#[rstest]
fn test_sets_one_element_apart_at_u64_max_are_unequal() {
    let below_max = OrderedSet::of_bounds(0u64, u64::MAX);
    let everything = OrderedSet::of_range(0u64, u64::MAX);
    assert_ne!(below_max, everything);
    assert!(below_max.is_subset(&everything));
    assert!(!everything.is_subset(&below_max));
    assert_eq!(everything.intersection_size(&everything), 1u128 << 64);
    assert_eq!(everything.intersection_size(&below_max), u128::from(u64::MAX));
}

#[rstest]
#[case::keep_top(OrderedSet::of_range(i64::MIN, i64::MAX - 1), i64::MAX)]
#[case::keep_bottom(OrderedSet::of_range(i64::MIN + 1, i64::MAX), i64::MIN)]
fn test_subtract_from_full_i64_range(#[case] removed: OrderedSet<i64>, #[case] survivor: i64) {
    let everything = OrderedSet::of_range(i64::MIN, i64::MAX);
    let result = everything.subtract(&removed);
    assert!(result.is_interval());
    assert_eq!(result.to_vec(), vec![survivor]);
}

#[rstest]
fn test_union_size_counts_beyond_usize() {
    let everything = OrderedSet::of_range(u64::MIN, u64::MAX);
    assert_eq!(everything.union_size(&everything), 1u128 << 64);
    assert_eq!(everything.union_size(&OrderedSet::empty()), 1u128 << 64);
}
