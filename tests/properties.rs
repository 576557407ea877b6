//! Algebraic identities that must hold between the operations, checked on
//! randomized rectangles and right triangles. Integer-valued vertices keep
//! the expected areas exact up to float summation noise.

use proptest::prelude::*;

use polyclip::{difference, intersection, union, xor, Geometry};

const TOLERANCE: f64 = 1e-9;

fn shoelace(ring: &[[f64; 2]]) -> f64 {
    let mut sum = 0.0;
    for w in ring.windows(2) {
        sum += w[0][0] * w[1][1] - w[1][0] * w[0][1];
    }
    sum / 2.0
}

fn area(geom: &[Vec<Vec<[f64; 2]>>]) -> f64 {
    let mut total = 0.0;
    for poly in geom {
        total += shoelace(&poly[0]).abs();
        for hole in &poly[1..] {
            total -= shoelace(hole).abs();
        }
    }
    total
}

fn rect() -> impl Strategy<Value = Geometry> {
    (-10i32..10, -10i32..10, 1i32..6, 1i32..6).prop_map(|(x, y, w, h)| {
        let (x, y, w, h) = (x as f64, y as f64, w as f64, h as f64);
        Geometry::Polygon(vec![vec![[x, y], [x + w, y], [x + w, y + h], [x, y + h]]])
    })
}

// right triangles, listed clockwise half the time
fn tri() -> impl Strategy<Value = Geometry> {
    (-10i32..10, -10i32..10, 1i32..6, 1i32..6, any::<bool>()).prop_map(|(x, y, w, h, cw)| {
        let (x, y, w, h) = (x as f64, y as f64, w as f64, h as f64);
        let mut ring = vec![[x, y], [x + w, y], [x + w, y + h]];
        if cw {
            ring.reverse();
        }
        Geometry::Polygon(vec![ring])
    })
}

proptest! {
    #[test]
    fn union_is_commutative(a in rect(), b in rect()) {
        let ab = area(&union(&a, &[b.clone()]).unwrap());
        let ba = area(&union(&b, &[a]).unwrap());
        prop_assert!((ab - ba).abs() < TOLERANCE);
    }

    #[test]
    fn intersection_is_commutative(a in rect(), b in rect()) {
        let ab = area(&intersection(&a, &[b.clone()]).unwrap());
        let ba = area(&intersection(&b, &[a]).unwrap());
        prop_assert!((ab - ba).abs() < TOLERANCE);
    }

    #[test]
    fn xor_is_union_minus_intersection(a in rect(), b in rect()) {
        let xor_area = area(&xor(&a, &[b.clone()]).unwrap());
        let union_area = area(&union(&a, &[b.clone()]).unwrap());
        let inter_area = area(&intersection(&a, &[b]).unwrap());
        prop_assert!((xor_area - (union_area - inter_area)).abs() < TOLERANCE);
    }

    #[test]
    fn difference_and_intersection_partition_the_subject(a in rect(), b in rect()) {
        let subject_area = area(&union(&a, &[]).unwrap());
        let diff_area = area(&difference(&a, &[b.clone()]).unwrap());
        let inter_area = area(&intersection(&a, &[b]).unwrap());
        prop_assert!((diff_area + inter_area - subject_area).abs() < TOLERANCE);
    }

    #[test]
    fn union_covers_both_operands(a in rect(), b in rect()) {
        let union_area = area(&union(&a, &[b.clone()]).unwrap());
        let a_area = area(&union(&a, &[]).unwrap());
        let b_area = area(&union(&b, &[]).unwrap());
        prop_assert!(union_area + TOLERANCE >= a_area.max(b_area));
        prop_assert!(union_area <= a_area + b_area + TOLERANCE);
    }

    #[test]
    fn three_way_union_is_order_independent(a in rect(), b in rect(), c in rect()) {
        let abc = area(&union(&a, &[b.clone(), c.clone()]).unwrap());
        let cba = area(&union(&c, &[b, a]).unwrap());
        prop_assert!((abc - cba).abs() < TOLERANCE);
    }

    #[test]
    fn xor_identity_holds_with_sloped_edges(a in tri(), b in tri()) {
        let xor_area = area(&xor(&a, &[b.clone()]).unwrap());
        let union_area = area(&union(&a, &[b.clone()]).unwrap());
        let inter_area = area(&intersection(&a, &[b]).unwrap());
        prop_assert!((xor_area - (union_area - inter_area)).abs() < TOLERANCE);
    }

    #[test]
    fn partition_holds_for_triangle_and_rect(a in tri(), b in rect()) {
        let subject_area = area(&union(&a, &[]).unwrap());
        let diff_area = area(&difference(&a, &[b.clone()]).unwrap());
        let inter_area = area(&intersection(&a, &[b]).unwrap());
        prop_assert!((diff_area + inter_area - subject_area).abs() < TOLERANCE);
    }

    #[test]
    fn intersection_is_commutative_for_triangles(a in tri(), b in tri()) {
        let ab = area(&intersection(&a, &[b.clone()]).unwrap());
        let ba = area(&intersection(&b, &[a]).unwrap());
        prop_assert!((ab - ba).abs() < TOLERANCE);
    }
}
