//! Integer set primitives for index bookkeeping.
//!
//! This module provides immutable sets of integers used to describe atom,
//! residue and element index collections:
//!
//! - [`Interval`]: a contiguous half-open range `[start, end)`, O(1) storage
//! - [`SortedArray`]: an explicit strictly increasing array, O(n) storage
//! - [`OrderedSet`]: either of the two behind one representation-agnostic API
//!
//! # Representation Independence
//!
//! An [`OrderedSet`] picks whichever backing is cheaper, but equality,
//! hashing and every algebra result depend only on the elements:
//!
//! ```rust
//! use molint::int::{OrderedSet, SortedArray};
//!
//! let interval = OrderedSet::of_range(0, 4);
//! let array = OrderedSet::from(SortedArray::of_sorted_array(vec![0, 1, 2, 3, 4]));
//!
//! assert!(interval.is_interval());
//! assert!(array.is_sorted_array());
//! assert_eq!(interval, array);
//! assert_eq!(interval.hash_code(), array.hash_code());
//! ```
//!
//! # Index Windows
//!
//! Range queries return `Interval<usize>` values that describe positions in
//! the ascending enumeration of a set, not element values:
//!
//! ```rust
//! use molint::int::{Interval, OrderedSet};
//!
//! let atoms = OrderedSet::of_sorted_array(vec![1, 3, 5, 7, 9]);
//! let window = atoms.find_range(3, 7);
//! assert_eq!(window, Interval::of_bounds(1, 4));
//!
//! let values: Vec<i32> = window.iter().filter_map(|index| atoms.get(index)).collect();
//! assert_eq!(values, vec![3, 5, 7]);
//! ```

mod element;
mod error;
pub mod hash;
mod interval;
mod ordered_set;
mod sorted_array;

pub use element::Element;
pub use error::OrderedSetError;
pub use interval::Interval;
pub use interval::IntervalIterator;
pub use ordered_set::OrderedSet;
pub use ordered_set::OrderedSetIterator;
pub use sorted_array::SortedArray;
