//! Output geometry: walking in-result segments into closed rings, nesting
//! rings into polygons, and rendering coordinate arrays.

use std::cmp::Ordering;

use crate::geom::{compare_vector_angles, cosine_of_angle, sine_of_angle, Point};
use crate::operation::Operation;
use crate::sweep_event::EventIdx;
use crate::Error;

typed_idx!(
    /// Handle to a [`RingOut`].
    OutRingIdx,
    "or"
);

/// A closed ring of the result, as the chain of events it passes through.
#[derive(Debug)]
pub(crate) struct RingOut {
    pub events: Vec<EventIdx>,
    /// Index into the composed polygon list, once assigned.
    pub poly: Option<usize>,
    is_exterior: Option<bool>,
    enclosing: Option<Option<OutRingIdx>>,
}

/// A polygon of the result: one exterior ring and its holes.
#[derive(Debug)]
pub(crate) struct PolyOut {
    pub exterior: OutRingIdx,
    pub interiors: Vec<OutRingIdx>,
}

/// Order among candidate continuations of a ring walk: smallest is the
/// leftmost turn relative to the incoming direction. Candidates on or above
/// the incoming axis sort by descending cosine, candidates below it by
/// ascending cosine, and above always beats below.
fn leftmost_cmp(a: (f64, f64), b: (f64, f64)) -> Ordering {
    let (a_sine, a_cosine) = a;
    let (b_sine, b_cosine) = b;
    if a_sine >= 0.0 && b_sine >= 0.0 {
        if a_cosine < b_cosine {
            return Ordering::Greater;
        }
        if a_cosine > b_cosine {
            return Ordering::Less;
        }
        return Ordering::Equal;
    }
    if a_sine < 0.0 && b_sine < 0.0 {
        if a_cosine < b_cosine {
            return Ordering::Less;
        }
        if a_cosine > b_cosine {
            return Ordering::Greater;
        }
        return Ordering::Equal;
    }
    if b_sine < a_sine {
        return Ordering::Less;
    }
    if b_sine > a_sine {
        return Ordering::Greater;
    }
    Ordering::Equal
}

impl Operation {
    /// Chains every in-result segment into closed rings.
    ///
    /// The walk starts at an unclaimed segment and repeatedly steps to the
    /// leftmost available continuation. Revisiting a fork point means the
    /// walk traced a loop hanging off the ring; the loop is snipped out and
    /// emitted as its own ring (reversed, since it was traced from the
    /// wrong side) before the walk resumes.
    pub(crate) fn build_rings(&mut self, segments: &[crate::segment::SegIdx]) -> Result<Vec<OutRingIdx>, Error> {
        let mut rings = Vec::new();
        for &segment in segments {
            if !self.is_in_result(segment) || self.segs[segment].ring_out.is_some() {
                continue;
            }

            let mut prev_event;
            let mut event = self.segs[segment].left;
            let mut next_event = self.segs[segment].right;
            let mut events = vec![event];
            let starting_point = self.events[event].point;
            // fork points already passed, with the walk position at the time
            let mut forks: Vec<(usize, Point)> = Vec::new();

            loop {
                prev_event = event;
                event = next_event;
                events.push(event);

                if self.events[event].point == starting_point {
                    break;
                }

                loop {
                    let available = self.available_linked_events(event);

                    if available.is_empty() {
                        let first = self.events[events[0]].point;
                        let last = self.events[events[events.len() - 1]].point;
                        return Err(Error::UnclosedRing {
                            start: [first.x, first.y],
                            end: [last.x, last.y],
                        });
                    }

                    if available.len() == 1 {
                        next_event = self.events[available[0]].other;
                        break;
                    }

                    let point = self.events[event].point;
                    if let Some(ix) = forks.iter().position(|&(_, p)| p == point) {
                        // closed a side loop; emit it and keep walking
                        let (index, _) = forks[ix];
                        forks.truncate(ix);
                        let mut ring_events = events.split_off(index);
                        let first_other = self.events[ring_events[0]].other;
                        ring_events.insert(0, first_other);
                        ring_events.reverse();
                        rings.push(self.new_ring_out(ring_events));
                        continue;
                    }

                    forks.push((events.len(), point));

                    let base_pt = self.events[prev_event].point;
                    let shared = self.events[event].point;
                    let angles = |this: &Self, cand: EventIdx| {
                        let other_pt = this.events[this.events[cand].other].point;
                        (
                            sine_of_angle(shared, base_pt, other_pt),
                            cosine_of_angle(shared, base_pt, other_pt),
                        )
                    };
                    let mut best = available[0];
                    let mut best_angles = angles(self, best);
                    for &cand in &available[1..] {
                        let cand_angles = angles(self, cand);
                        if leftmost_cmp(cand_angles, best_angles) == Ordering::Less {
                            best = cand;
                            best_angles = cand_angles;
                        }
                    }
                    next_event = self.events[best].other;
                    break;
                }
            }

            rings.push(self.new_ring_out(events));
        }
        Ok(rings)
    }

    fn new_ring_out(&mut self, events: Vec<EventIdx>) -> OutRingIdx {
        let ring = self.out_rings.next_idx();
        for &evt in &events {
            let seg = self.events[evt].segment;
            self.segs[seg].ring_out = Some(ring);
        }
        self.out_rings.push(RingOut {
            events,
            poly: None,
            is_exterior: None,
            enclosing: None,
        })
    }

    /// A ring is exterior when nothing encloses it, or when its enclosing
    /// ring is itself interior (a polygon inside a hole).
    pub(crate) fn ring_is_exterior(&mut self, ring: OutRingIdx) -> bool {
        if let Some(is_exterior) = self.out_rings[ring].is_exterior {
            return is_exterior;
        }
        let is_exterior = match self.enclosing_ring(ring) {
            None => true,
            Some(enclosing) => !self.ring_is_exterior(enclosing),
        };
        self.out_rings[ring].is_exterior = Some(is_exterior);
        is_exterior
    }

    fn enclosing_ring(&mut self, ring: OutRingIdx) -> Option<OutRingIdx> {
        if let Some(enclosing) = self.out_rings[ring].enclosing {
            return enclosing;
        }
        let enclosing = self.calc_enclosing_ring(ring);
        self.out_rings[ring].enclosing = Some(enclosing);
        enclosing
    }

    /// The result ring directly containing this one, found by scanning down
    /// the in-result segments below the ring's leftmost event.
    fn calc_enclosing_ring(&mut self, ring: OutRingIdx) -> Option<OutRingIdx> {
        let events = self.out_rings[ring].events.clone();
        let mut leftmost = events[0];
        for &evt in &events[1..] {
            if self.compare_events(leftmost, evt) == Ordering::Greater {
                leftmost = evt;
            }
        }

        let mut prev_seg = self.prev_in_result(self.events[leftmost].segment);
        let mut prev_prev_seg = match prev_seg {
            Some(s) => self.prev_in_result(s),
            None => None,
        };

        loop {
            // nothing below us; no ring encloses us
            let prev = prev_seg?;
            let prev_ring = self.segs[prev].ring_out?;

            // nothing below the segment below us: its ring is exterior and
            // is what encloses us
            let Some(prev_prev) = prev_prev_seg else {
                return Some(prev_ring);
            };
            let Some(prev_prev_ring) = self.segs[prev_prev].ring_out else {
                return Some(prev_ring);
            };

            if prev_prev_ring != prev_ring {
                // the two nearest segments below belong to different rings;
                // whether prev_ring encloses us depends on which of the two
                // encloses the other
                if self.enclosing_ring(prev_prev_ring) != Some(prev_ring) {
                    return Some(prev_ring);
                }
                return self.enclosing_ring(prev_ring);
            }

            // both segments belong to the same ring: we sit above a
            // peninsula of it, which tells us nothing. keep scanning down
            prev_seg = self.prev_in_result(prev_prev);
            prev_prev_seg = match prev_seg {
                Some(s) => self.prev_in_result(s),
                None => None,
            };
        }
    }

    /// The ring's coordinates, closed, exterior rings wound forward and
    /// interior rings reversed. `None` when simplification leaves nothing
    /// with area: collinear points are dropped, and a ring needs three
    /// distinct corners to stand.
    pub(crate) fn ring_geom(&mut self, ring: OutRingIdx) -> Option<Vec<[f64; 2]>> {
        let events = self.out_rings[ring].events.clone();

        let mut prev_pt = self.events[events[0]].point;
        let mut points = vec![prev_pt];
        for ix in 1..events.len() - 1 {
            let pt = self.events[events[ix]].point;
            let next_pt = self.events[events[ix + 1]].point;
            if compare_vector_angles(pt, prev_pt, next_pt) == Ordering::Equal {
                continue;
            }
            points.push(pt);
            prev_pt = pt;
        }

        // ring was entirely collinear
        if points.len() == 1 {
            return None;
        }

        // the starting point may itself be superfluous
        let pt = points[0];
        let next_pt = points[1];
        if compare_vector_angles(pt, prev_pt, next_pt) == Ordering::Equal {
            points.remove(0);
        }

        if points.len() < 3 {
            return None;
        }
        points.push(points[0]);

        let coords: Vec<[f64; 2]> = if self.ring_is_exterior(ring) {
            points.iter().map(|p| [p.x, p.y]).collect()
        } else {
            points.iter().rev().map(|p| [p.x, p.y]).collect()
        };
        Some(coords)
    }

    /// Nests rings into polygons: each interior ring attaches to the
    /// polygon of its enclosing exterior ring.
    pub(crate) fn compose_polys(&mut self, rings: &[OutRingIdx]) -> Vec<PolyOut> {
        let mut polys: Vec<PolyOut> = Vec::new();
        for &ring in rings {
            if self.out_rings[ring].poly.is_some() {
                continue;
            }
            if self.ring_is_exterior(ring) {
                self.out_rings[ring].poly = Some(polys.len());
                polys.push(PolyOut {
                    exterior: ring,
                    interiors: Vec::new(),
                });
            } else {
                // an interior ring always has an enclosing ring
                let Some(enclosing) = self.enclosing_ring(ring) else {
                    debug_assert!(false, "interior ring without an enclosing ring");
                    continue;
                };
                let poly_ix = match self.out_rings[enclosing].poly {
                    Some(ix) => ix,
                    None => {
                        let ix = polys.len();
                        self.out_rings[enclosing].poly = Some(ix);
                        polys.push(PolyOut {
                            exterior: enclosing,
                            interiors: Vec::new(),
                        });
                        ix
                    }
                };
                self.out_rings[ring].poly = Some(poly_ix);
                polys[poly_ix].interiors.push(ring);
            }
        }
        polys
    }

    /// The polygon's coordinate rings, or `None` when its exterior
    /// simplified away (holes of a vanished polygon vanish with it).
    pub(crate) fn poly_geom(&mut self, poly: &PolyOut) -> Option<Vec<Vec<[f64; 2]>>> {
        let exterior = self.ring_geom(poly.exterior)?;
        let mut geom = vec![exterior];
        for &interior in &poly.interiors {
            if let Some(ring) = self.ring_geom(interior) {
                geom.push(ring);
            }
        }
        Some(geom)
    }
}
