#![cfg(feature = "rayon")]
//! Tests for parallel traversal of ordered sets.

use molint::int::{OrderedSet, SortedArray};
use rayon::prelude::*;
use rstest::rstest;

#[rstest]
#[case::interval(OrderedSet::of_bounds(-50, 5000))]
#[case::array(OrderedSet::of_sorted_array((0..2000).map(|value| value * 3).collect::<Vec<i32>>()))]
#[case::empty(OrderedSet::empty())]
fn test_par_iter_matches_sequential_order(#[case] set: OrderedSet) {
    let parallel: Vec<i32> = set.par_iter().collect();
    assert_eq!(parallel, set.to_vec());
}

#[rstest]
fn test_sets_are_shared_across_threads() {
    let set = OrderedSet::from(SortedArray::of_sorted_array(vec![1u32, 4, 9, 16]));
    let hits: usize = (0u32..20)
        .into_par_iter()
        .filter(|value| set.has(*value))
        .count();
    assert_eq!(hits, 4);
}
