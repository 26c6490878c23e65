//! Small integer mixing functions used for approximate set hashes.
//!
//! These combine a handful of 32-bit values into one. They are fast and
//! deterministic across platforms, not collision resistant.

#[inline]
const fn avalanche(mut value: i32) -> i32 {
    value ^= value >> 4;
    value = (value ^ 0xdead_beef_u32 as i32).wrapping_add(value << 5);
    value ^ (value >> 11)
}

#[inline]
const fn combine(accumulator: i32, value: i32) -> i32 {
    accumulator.wrapping_mul(31).wrapping_add(value)
}

/// Mixes three values.
#[must_use]
pub const fn hash3(first: i32, second: i32, third: i32) -> i32 {
    avalanche(combine(combine(combine(23, first), second), third))
}

/// Mixes four values.
#[must_use]
pub const fn hash4(first: i32, second: i32, third: i32, fourth: i32) -> i32 {
    avalanche(combine(combine(combine(combine(23, first), second), third), fourth))
}
