//! Ordering of version ranges by generality
//!
//! Ranges sort by `(lower bound, upper bound)` ascending: looser floors first,
//! ties broken by looser ceilings. Equal keys keep their input order.

use std::cmp::Ordering;

use crate::variant::range::{BoundValue, VersionRange};

/// Sort key of a range: `(greatest lower bound, least upper bound)`
pub fn generality_key(range: &VersionRange) -> (BoundValue, BoundValue) {
    (range.lower_bound(), range.upper_bound())
}

pub fn compare_generality(a: &VersionRange, b: &VersionRange) -> Ordering {
    generality_key(a).cmp(&generality_key(b))
}

/// Stable sort from most general to most specific
pub fn sort_by_generality(ranges: &mut [VersionRange]) {
    ranges.sort_by_cached_key(generality_key);
}

/// Owned variant of [`sort_by_generality`]
pub fn sorted_by_generality(mut ranges: Vec<VersionRange>) -> Vec<VersionRange> {
    sort_by_generality(&mut ranges);
    ranges
}
