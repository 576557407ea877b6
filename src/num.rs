//! Floating-point comparison with an epsilon tolerance.
//!
//! Every ordering decision in this crate that needs a notion of "close enough
//! to be equal" goes through [`flp_cmp`]. The snap rounder, the angle
//! comparisons, and the output-ring simplification all rely on this one
//! comparator being used uniformly; substituting a different epsilon scheme in
//! one place breaks invariants in the others.

use std::cmp::Ordering;

const EPSILON: f64 = f64::EPSILON;

/// Compares two floats, treating them as equal when their difference is
/// within a machine-epsilon-scaled magnitude of both.
///
/// Values that are both within `EPSILON` of zero are equal to each other
/// (and, via the rounder's zero seed, to exactly `0.0`).
pub(crate) fn flp_cmp(a: f64, b: f64) -> Ordering {
    // are they both near zero?
    if -EPSILON < a && a < EPSILON && -EPSILON < b && b < EPSILON {
        return Ordering::Equal;
    }

    // are they relatively close to each other?
    let ab = a - b;
    if ab * ab < EPSILON * EPSILON * a * b {
        return Ordering::Equal;
    }

    if a < b {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}
