//! Geometric primitives: points, vector math, and bounding boxes.

use std::cmp::Ordering;

use ordered_float::OrderedFloat;

use crate::num::flp_cmp;

/// A two-dimensional point with snap-rounded coordinates.
///
/// Points are compared by `x` and then by `y`, which is the order the sweep
/// line (moving left-to-right) encounters them. Raw float equality is
/// correct here because every point in the system has already been through
/// the rounder: numerically indistinguishable values share exact bits.
#[derive(Clone, Copy, PartialEq, serde::Serialize)]
pub(crate) struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// The key used to pool coincident sweep events. Safe because rounded
    /// coordinates are canonical: value equality implies bit equality.
    pub fn bits(&self) -> (u64, u64) {
        (self.x.to_bits(), self.y.to_bits())
    }
}

impl Eq for Point {}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> Ordering {
        (OrderedFloat(self.x), OrderedFloat(self.y))
            .cmp(&(OrderedFloat(other.x), OrderedFloat(other.y)))
    }
}

impl PartialOrd for Point {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Debug for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:?}, {:?})", self.x, self.y)
    }
}

/// A displacement between two points.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Vector {
    pub x: f64,
    pub y: f64,
}

pub(crate) fn cross_product(a: Vector, b: Vector) -> f64 {
    a.x * b.y - a.y * b.x
}

pub(crate) fn dot_product(a: Vector, b: Vector) -> f64 {
    a.x * b.x + a.y * b.y
}

fn length(v: Vector) -> f64 {
    dot_product(v, v).sqrt()
}

/// Orientation of `end1` vs `end2` as seen from `base`: `Greater` when the
/// turn from `end1` to `end2` is clockwise, `Less` when counterclockwise,
/// `Equal` when the three points are (within the epsilon) collinear.
pub(crate) fn compare_vector_angles(base: Point, end1: Point, end2: Point) -> Ordering {
    let v1 = Vector {
        x: end1.x - base.x,
        y: end1.y - base.y,
    };
    let v2 = Vector {
        x: end2.x - base.x,
        y: end2.y - base.y,
    };
    flp_cmp(cross_product(v2, v1), 0.0)
}

/// Sine of the angle at `shared` from the ray towards `base` to the ray
/// towards `angle`.
pub(crate) fn sine_of_angle(shared: Point, base: Point, angle: Point) -> f64 {
    let v_base = Vector {
        x: base.x - shared.x,
        y: base.y - shared.y,
    };
    let v_angle = Vector {
        x: angle.x - shared.x,
        y: angle.y - shared.y,
    };
    cross_product(v_angle, v_base) / length(v_angle) / length(v_base)
}

/// Cosine of the same angle as [`sine_of_angle`].
pub(crate) fn cosine_of_angle(shared: Point, base: Point, angle: Point) -> f64 {
    let v_base = Vector {
        x: base.x - shared.x,
        y: base.y - shared.y,
    };
    let v_angle = Vector {
        x: angle.x - shared.x,
        y: angle.y - shared.y,
    };
    dot_product(v_angle, v_base) / length(v_angle) / length(v_base)
}

/// Where does the line through `pt` along `v` cross the horizontal line at
/// `y`? `None` for horizontal lines.
fn horizontal_intersection(pt: Point, v: Vector, y: f64) -> Option<Point> {
    if v.y == 0.0 {
        return None;
    }
    Some(Point {
        x: pt.x + (v.x / v.y) * (y - pt.y),
        y,
    })
}

/// Where does the line through `pt` along `v` cross the vertical line at
/// `x`? `None` for vertical lines.
fn vertical_intersection(pt: Point, v: Vector, x: f64) -> Option<Point> {
    if v.x == 0.0 {
        return None;
    }
    Some(Point {
        x,
        y: pt.y + (v.y / v.x) * (x - pt.x),
    })
}

/// Intersection of the line through `pt1` along `v1` with the line through
/// `pt2` along `v2`, or `None` if the lines are parallel.
///
/// Vertical and horizontal lines are solved explicitly, avoiding the
/// division noise of the general parametric form.
pub(crate) fn intersection(pt1: Point, v1: Vector, pt2: Point, v2: Vector) -> Option<Point> {
    if v1.x == 0.0 {
        return vertical_intersection(pt2, v2, pt1.x);
    }
    if v2.x == 0.0 {
        return vertical_intersection(pt1, v1, pt2.x);
    }
    if v1.y == 0.0 {
        return horizontal_intersection(pt2, v2, pt1.y);
    }
    if v2.y == 0.0 {
        return horizontal_intersection(pt1, v1, pt2.y);
    }

    // General case, following Schneider & Eberly.
    let kross = cross_product(v1, v2);
    if kross == 0.0 {
        return None;
    }

    let ve = Vector {
        x: pt2.x - pt1.x,
        y: pt2.y - pt1.y,
    };
    let d1 = cross_product(ve, v1) / kross;
    let d2 = cross_product(ve, v2) / kross;

    // average the two equivalent computations to minimize rounding error
    let x1 = pt1.x + d2 * v1.x;
    let x2 = pt2.x + d1 * v2.x;
    let y1 = pt1.y + d2 * v1.y;
    let y2 = pt2.y + d1 * v2.y;
    Some(Point {
        x: (x1 + x2) / 2.0,
        y: (y1 + y2) / 2.0,
    })
}

/// An axis-aligned bounding box, as lower-left and upper-right corners.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Bbox {
    pub ll: Point,
    pub ur: Point,
}

impl Bbox {
    /// The degenerate box covering just `p`.
    pub fn at(p: Point) -> Self {
        Bbox { ll: p, ur: p }
    }

    pub fn contains(&self, p: Point) -> bool {
        self.ll.x <= p.x && p.x <= self.ur.x && self.ll.y <= p.y && p.y <= self.ur.y
    }

    /// Grows the box to cover `p`.
    pub fn expand(&mut self, p: Point) {
        if p.x < self.ll.x {
            self.ll.x = p.x;
        }
        if p.x > self.ur.x {
            self.ur.x = p.x;
        }
        if p.y < self.ll.y {
            self.ll.y = p.y;
        }
        if p.y > self.ur.y {
            self.ur.y = p.y;
        }
    }

    /// Grows the box to cover all of `other`.
    pub fn merge(&mut self, other: &Bbox) {
        self.expand(other.ll);
        self.expand(other.ur);
    }
}

/// The overlap of two boxes, or `None` if they are disjoint. Boxes that
/// merely touch overlap in a degenerate (zero-width or zero-height) box.
pub(crate) fn bbox_overlap(b1: &Bbox, b2: &Bbox) -> Option<Bbox> {
    if b2.ur.x < b1.ll.x || b1.ur.x < b2.ll.x || b2.ur.y < b1.ll.y || b1.ur.y < b2.ll.y {
        return None;
    }

    let lower_x = if b1.ll.x < b2.ll.x { b2.ll.x } else { b1.ll.x };
    let upper_x = if b1.ur.x < b2.ur.x { b1.ur.x } else { b2.ur.x };
    let lower_y = if b1.ll.y < b2.ll.y { b2.ll.y } else { b1.ll.y };
    let upper_y = if b1.ur.y < b2.ur.y { b1.ur.y } else { b2.ur.y };

    Some(Bbox {
        ll: Point {
            x: lower_x,
            y: lower_y,
        },
        ur: Point {
            x: upper_x,
            y: upper_y,
        },
    })
}
