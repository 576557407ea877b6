//! Snap-rounding of input coordinates.
//!
//! Two coordinates that are numerically indistinguishable (under
//! [`flp_cmp`](crate::num::flp_cmp)) must be *bit-identical* by the time the
//! sweep sees them, or ordering decisions made at different times disagree
//! and the topology falls apart. The rounder guarantees this by remembering
//! every value it has seen, independently per axis, and collapsing any new
//! value onto an existing neighbor it compares equal to.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::ops::Bound;

use ordered_float::OrderedFloat;

use crate::geom::Point;
use crate::num::flp_cmp;

/// Snap-rounds points, one [`CoordRounder`] per axis.
///
/// One rounder is owned by each [`Operation`](crate::operation::Operation),
/// so runs never share rounding state.
#[derive(Debug)]
pub(crate) struct PtRounder {
    x: CoordRounder,
    y: CoordRounder,
}

impl PtRounder {
    pub fn new() -> Self {
        PtRounder {
            x: CoordRounder::new(),
            y: CoordRounder::new(),
        }
    }

    #[allow(dead_code)]
    pub fn reset(&mut self) {
        self.x = CoordRounder::new();
        self.y = CoordRounder::new();
    }

    pub fn round(&mut self, x: f64, y: f64) -> Point {
        Point {
            x: self.x.round(x),
            y: self.y.round(y),
        }
    }
}

/// One axis worth of seen values.
#[derive(Debug)]
struct CoordRounder {
    seen: BTreeSet<OrderedFloat<f64>>,
}

impl CoordRounder {
    fn new() -> Self {
        let mut seen = BTreeSet::new();
        // seed with zero, so values smaller than the epsilon collapse to
        // exactly 0.0 rather than to whichever tiny value came first
        seen.insert(OrderedFloat(0.0));
        CoordRounder { seen }
    }

    // Note: this can round values backwards or forwards. We are rounding not
    // just raw input coordinates but also computed intersections, which can
    // land on either side of a previously-seen value.
    fn round(&mut self, coord: f64) -> f64 {
        let key = OrderedFloat(coord);

        if let Some(existing) = self.seen.get(&key) {
            return existing.0;
        }
        if let Some(prev) = self.seen.range(..key).next_back() {
            if flp_cmp(coord, prev.0) == Ordering::Equal {
                return prev.0;
            }
        }
        if let Some(next) = self
            .seen
            .range((Bound::Excluded(key), Bound::Unbounded))
            .next()
        {
            if flp_cmp(coord, next.0) == Ordering::Equal {
                return next.0;
            }
        }

        self.seen.insert(key);
        coord
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_inputs_identical_bits() {
        let mut r = PtRounder::new();
        let a = r.round(1.25, -3.5);
        let b = r.round(1.25, -3.5);
        assert_eq!(a.x.to_bits(), b.x.to_bits());
        assert_eq!(a.y.to_bits(), b.y.to_bits());
    }

    #[test]
    fn nearby_value_collapses_to_first_seen() {
        let mut r = PtRounder::new();
        let first = r.round(1.0, 0.0);
        let second = r.round(1.0 + f64::EPSILON, 0.0);
        assert_eq!(first.x.to_bits(), second.x.to_bits());
        assert_eq!(second.x, 1.0);
    }

    #[test]
    fn tiny_values_collapse_to_zero() {
        let mut r = PtRounder::new();
        let p = r.round(1e-19, -1e-20);
        assert_eq!(p.x.to_bits(), 0.0f64.to_bits());
        assert_eq!(p.y.to_bits(), 0.0f64.to_bits());
    }

    #[test]
    fn negative_zero_is_canonicalized() {
        let mut r = PtRounder::new();
        let p = r.round(-0.0, -0.0);
        assert_eq!(p.x.to_bits(), 0.0f64.to_bits());
    }

    #[test]
    fn distant_values_pass_through() {
        let mut r = PtRounder::new();
        let p = r.round(1.0, 2.0);
        let q = r.round(1.5, 2.5);
        assert_eq!(p.x, 1.0);
        assert_eq!(q.x, 1.5);
        assert_eq!(q.y, 2.5);
    }

    #[test]
    fn reset_forgets_seen_values() {
        let mut r = PtRounder::new();
        r.round(1.0, 1.0);
        r.reset();
        let p = r.round(1.0 + f64::EPSILON, 1.0);
        // with no memory of 1.0, the perturbed value is kept as-is
        assert_eq!(p.x, 1.0 + f64::EPSILON);
    }
}
