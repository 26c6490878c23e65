//! # molint
//!
//! Ordered integer sets for molecular index bookkeeping.
//!
//! ## Overview
//!
//! Molecular scenes address atoms, residues and chains through large index
//! collections that are often contiguous and sometimes sparse. This library
//! stores them compactly and provides fast, purely functional set algebra:
//!
//! - **Intervals**: contiguous half-open ranges in constant space
//! - **Sorted Arrays**: explicit strictly increasing index arrays with shared storage
//! - **Ordered Sets**: one API over both, choosing the cheaper backing
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for every set type
//! - `rayon`: parallel iteration over ordered sets
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use molint::prelude::*;
//!
//! let chain = OrderedSet::of_bounds(0, 100);
//! let selection = OrderedSet::of_sorted_array(vec![4, 8, 15, 16, 23, 42]);
//!
//! assert!(selection.is_subset(&chain));
//! let remaining = chain.subtract(&selection);
//! assert_eq!(remaining.size(), 94);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use molint::prelude::*;
/// ```
pub mod prelude {
    pub use crate::int::*;
}

pub mod int;
