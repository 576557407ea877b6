//! Segments and their sweep-line ordering.
//!
//! This is the heart of the algorithm: the segment comparator that orders
//! the sweep-line status, the intersection finder, splitting, duplicate
//! consumption, and the ring-coverage state from which each operation
//! decides whether a segment belongs in the result.

use std::cmp::Ordering;

use tracing::trace;

use crate::geom::{bbox_overlap, intersection, Bbox, Point, Vector};
use crate::geom_in::{MultiPolyIdx, PolyIdx, RingIdx};
use crate::geom_out::OutRingIdx;
use crate::operation::{Operation, OpType};
use crate::sweep_event::EventIdx;

typed_idx!(
    /// Handle to a [`Segment`] in the segment arena. Creation order doubles
    /// as the final comparator tiebreak.
    SegIdx,
    "s"
);

/// An edge of an input ring (or a piece of one, after splitting).
#[derive(Debug)]
pub(crate) struct Segment {
    pub left: EventIdx,
    pub right: EventIdx,
    /// The input rings this segment (now) borders, parallel to `windings`.
    /// Starts as one ring; consumption of coincident duplicates merges more
    /// in.
    pub rings: Vec<RingIdx>,
    /// Winding contribution per ring: +1 when the ring traverses this
    /// segment left-to-right, -1 right-to-left.
    pub windings: Vec<i32>,
    /// The segment directly below us in the sweep line at the moment our
    /// left event was finished. Fixed once set; coverage state is derived
    /// from this chain after the sweep.
    pub prev: Option<SegIdx>,
    pub consumed_by: Option<SegIdx>,
    /// The output ring that claimed this segment, if any.
    pub ring_out: Option<OutRingIdx>,
    prev_in_result: Option<Option<SegIdx>>,
    in_result: Option<bool>,
    before_state: Option<CoverState>,
    after_state: Option<CoverState>,
}

impl Segment {
    fn new(left: EventIdx, right: EventIdx, rings: Vec<RingIdx>, windings: Vec<i32>) -> Self {
        Segment {
            left,
            right,
            rings,
            windings,
            prev: None,
            consumed_by: None,
            ring_out: None,
            prev_in_result: None,
            in_result: None,
            before_state: None,
            after_state: None,
        }
    }
}

/// Which rings, polys, and multipolys cover a horizontal slice of the plane,
/// just below or just above a segment.
#[derive(Clone, Debug, Default)]
pub(crate) struct CoverState {
    pub rings: Vec<RingIdx>,
    pub windings: Vec<i32>,
    pub multipolys: Vec<MultiPolyIdx>,
}

impl Operation {
    /// Creates a segment for one edge of an input ring. `pt1` and `pt2` are
    /// in ring traversal order and must be distinct.
    pub(crate) fn segment_from_ring(&mut self, pt1: Point, pt2: Point, ring: RingIdx) -> SegIdx {
        debug_assert!(pt1 != pt2);
        let (left_pt, right_pt, winding) = if pt1 < pt2 {
            (pt1, pt2, 1)
        } else {
            (pt2, pt1, -1)
        };
        let seg = self.segs.next_idx();
        let (left, right) = self.new_event_pair(left_pt, right_pt, seg);
        self.segs
            .push(Segment::new(left, right, vec![ring], vec![winding]));
        self.check_group_consume(left);
        self.check_group_consume(right);
        seg
    }

    pub(crate) fn seg_bbox(&self, seg: SegIdx) -> Bbox {
        let l = self.events[self.segs[seg].left].point;
        let r = self.events[self.segs[seg].right].point;
        Bbox {
            ll: Point::new(l.x, if l.y < r.y { l.y } else { r.y }),
            ur: Point::new(r.x, if l.y > r.y { l.y } else { r.y }),
        }
    }

    fn seg_vector(&self, seg: SegIdx) -> Vector {
        let l = self.events[self.segs[seg].left].point;
        let r = self.events[self.segs[seg].right].point;
        Vector {
            x: r.x - l.x,
            y: r.y - l.y,
        }
    }

    pub(crate) fn is_an_endpoint(&self, seg: SegIdx, pt: Point) -> bool {
        self.events[self.segs[seg].left].point == pt
            || self.events[self.segs[seg].right].point == pt
    }

    /// Is the point above (`Greater`), on (`Equal`), or below (`Less`) the
    /// segment's line?
    ///
    /// The interpolation is tried from both endpoints; agreeing with either
    /// counts as "on". Horizontal and vertical segments fall out naturally:
    /// the division by a zero component yields an infinity or NaN whose
    /// comparisons are all false, deferring to the other interpolation.
    pub(crate) fn compare_point(&self, seg: SegIdx, pt: Point) -> Ordering {
        if self.is_an_endpoint(seg, pt) {
            return Ordering::Equal;
        }
        let l = self.events[self.segs[seg].left].point;
        let r = self.events[self.segs[seg].right].point;
        let v = self.seg_vector(seg);

        if l.x == r.x {
            // exactly vertical
            if pt.x == l.x {
                return Ordering::Equal;
            }
            return if pt.x < l.x {
                Ordering::Greater
            } else {
                Ordering::Less
            };
        }

        let y_dist = (pt.y - l.y) / v.y;
        let x_from_y = l.x + y_dist * v.x;
        if pt.x == x_from_y {
            return Ordering::Equal;
        }

        let x_dist = (pt.x - l.x) / v.x;
        let y_from_x = l.y + x_dist * v.y;
        if pt.y == y_from_x {
            return Ordering::Equal;
        }
        if pt.y < y_from_x {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    }

    /// Sweep-line status order: which segment is lower at the sweep's
    /// current position. `Less` means `a` is below `b`.
    ///
    /// The comparator must stay consistent while both segments overlap in x,
    /// which is why it reasons from endpoints and collinearity checks rather
    /// than evaluating y at a shared x.
    pub(crate) fn compare_segments(&self, a: SegIdx, b: SegIdx) -> Ordering {
        if a == b {
            return Ordering::Equal;
        }
        let al = self.events[self.segs[a].left].point;
        let ar = self.events[self.segs[a].right].point;
        let bl = self.events[self.segs[b].left].point;
        let br = self.events[self.segs[b].right].point;

        // disjoint in x: order by x
        if br.x < al.x {
            return Ordering::Greater;
        }
        if ar.x < bl.x {
            return Ordering::Less;
        }

        if al.x < bl.x {
            // b's left endpoint is in a's x-span
            if bl.y < al.y && bl.y < ar.y {
                return Ordering::Greater;
            }
            if bl.y > al.y && bl.y > ar.y {
                return Ordering::Less;
            }
            match self.compare_point(a, bl) {
                Ordering::Less => return Ordering::Greater,
                Ordering::Greater => return Ordering::Less,
                Ordering::Equal => {}
            }
            match self.compare_point(b, ar) {
                Ordering::Equal => {}
                ord => return ord,
            }
            // collinear; the segment starting further left comes first
            return Ordering::Less;
        }

        if al.x > bl.x {
            if al.y < bl.y && al.y < br.y {
                return Ordering::Less;
            }
            if al.y > bl.y && al.y > br.y {
                return Ordering::Greater;
            }
            match self.compare_point(b, al) {
                Ordering::Equal => {}
                ord => return ord,
            }
            match self.compare_point(a, br) {
                Ordering::Less => return Ordering::Greater,
                Ordering::Greater => return Ordering::Less,
                Ordering::Equal => {}
            }
            return Ordering::Greater;
        }

        // left endpoints in the same vertical plane: lower one first
        if al.y < bl.y {
            return Ordering::Less;
        }
        if al.y > bl.y {
            return Ordering::Greater;
        }

        // identical left endpoints; judge by the left-more right endpoint
        if ar.x < br.x {
            match self.compare_point(b, ar) {
                Ordering::Equal => {}
                ord => return ord,
            }
        }
        if ar.x > br.x {
            match self.compare_point(a, br) {
                Ordering::Less => return Ordering::Greater,
                Ordering::Greater => return Ordering::Less,
                Ordering::Equal => {}
            }
        }

        if ar.x != br.x {
            // near-vertical segments with opposite slopes: the one bending
            // down comes first
            let ay = ar.y - al.y;
            let ax = ar.x - al.x;
            let by = br.y - bl.y;
            let bx = br.x - bl.x;
            if ay > ax && by < bx {
                return Ordering::Greater;
            }
            if ay < ax && by > bx {
                return Ordering::Less;
            }
        }

        if ar.x > br.x {
            return Ordering::Greater;
        }
        if ar.x < br.x {
            return Ordering::Less;
        }

        // same left endpoint and same right x: the lower right endpoint
        // comes first
        if ar.y < br.y {
            return Ordering::Less;
        }
        if ar.y > br.y {
            return Ordering::Greater;
        }

        // exact duplicates; creation order keeps the comparator stable
        a.cmp(&b)
    }

    /// The point where `a` and `b` intersect, or `None` if they don't.
    ///
    /// Endpoint touches are preferred over computed crossings so that
    /// already-canonical points are reused; overlapping collinear segments
    /// report the earliest endpoint interior to the other segment. Computed
    /// crossings go through the rounder before being returned.
    pub(crate) fn get_intersection(&mut self, a: SegIdx, b: SegIdx) -> Option<Point> {
        let a_bbox = self.seg_bbox(a);
        let b_bbox = self.seg_bbox(b);
        let overlap = bbox_overlap(&a_bbox, &b_bbox)?;

        let alp = self.events[self.segs[a].left].point;
        let arp = self.events[self.segs[a].right].point;
        let blp = self.events[self.segs[b].left].point;
        let brp = self.events[self.segs[b].right].point;

        let touches_b_left = a_bbox.contains(blp) && self.compare_point(a, blp) == Ordering::Equal;
        let touches_a_left = b_bbox.contains(alp) && self.compare_point(b, alp) == Ordering::Equal;
        let touches_b_right = a_bbox.contains(brp) && self.compare_point(a, brp) == Ordering::Equal;
        let touches_a_right = b_bbox.contains(arp) && self.compare_point(b, arp) == Ordering::Equal;

        // overlapping collinear segments starting at the same point
        if touches_a_left && touches_b_left {
            if touches_a_right && !touches_b_right {
                return Some(arp);
            }
            if !touches_a_right && touches_b_right {
                return Some(brp);
            }
            // same segment, or one fully inside the other sharing both ends
            return None;
        }

        if touches_a_left {
            if touches_b_right && alp == brp {
                return None;
            }
            return Some(alp);
        }
        if touches_b_left {
            if touches_a_right && blp == arp {
                return None;
            }
            return Some(blp);
        }

        if touches_a_right && touches_b_right {
            return None;
        }
        if touches_a_right {
            return Some(arp);
        }
        if touches_b_right {
            return Some(brp);
        }

        let pt = intersection(alp, self.seg_vector(a), blp, self.seg_vector(b))?;
        if !overlap.contains(pt) {
            return None;
        }
        Some(self.rounder.round(pt.x, pt.y))
    }

    /// Splits the segment at an interior point, producing a new trailing
    /// segment. Returns the two new events, right half of the cut first.
    ///
    /// Rounding can place the split point on the far side of an endpoint;
    /// when that happens the affected half has its events swapped so that
    /// left stays left, with the windings negated to match.
    pub(crate) fn split_segment(&mut self, seg: SegIdx, point: Point) -> Vec<EventIdx> {
        trace!(seg = ?seg, point = ?point, "splitting segment");
        let old_left = self.segs[seg].left;
        let old_right = self.segs[seg].right;
        let new_seg = self.segs.next_idx();

        let new_right = self.new_event(point, false, seg, old_left);
        let new_left = self.new_event(point, true, new_seg, old_right);

        self.segs[seg].right = new_right;
        self.events[old_left].other = new_right;

        let rings = self.segs[seg].rings.clone();
        let windings = self.segs[seg].windings.clone();
        self.segs
            .push(Segment::new(new_left, old_right, rings, windings));
        self.events[old_right].segment = new_seg;
        self.events[old_right].other = new_left;

        if self.events[new_left].point > self.events[old_right].point {
            self.swap_events(new_seg);
        }
        if self.events[old_left].point > self.events[new_right].point {
            self.swap_events(seg);
        }

        self.check_group_consume(new_left);
        self.check_group_consume(new_right);

        vec![new_right, new_left]
    }

    fn swap_events(&mut self, seg: SegIdx) {
        let s = &mut self.segs[seg];
        std::mem::swap(&mut s.left, &mut s.right);
        for w in &mut s.windings {
            *w = -*w;
        }
        let (left, right) = (s.left, s.right);
        self.events[left].is_left = true;
        self.events[right].is_left = false;
    }

    pub(crate) fn ultimate_consumer(&self, seg: SegIdx) -> SegIdx {
        let mut seg = seg;
        while let Some(consumer) = self.segs[seg].consumed_by {
            seg = consumer;
        }
        seg
    }

    /// Merges two exactly-coincident segments, folding the consumee's ring
    /// windings into the consumer. The lower segment (by status order)
    /// survives, except that a segment never consumes its own `prev`.
    pub(crate) fn consume_segments(&mut self, a: SegIdx, b: SegIdx) {
        let mut consumer = self.ultimate_consumer(a);
        let mut consumee = self.ultimate_consumer(b);
        match self.compare_segments(consumer, consumee) {
            Ordering::Equal => return,
            Ordering::Greater => std::mem::swap(&mut consumer, &mut consumee),
            Ordering::Less => {}
        }
        if self.segs[consumer].prev == Some(consumee) {
            std::mem::swap(&mut consumer, &mut consumee);
        }
        trace!(consumer = ?consumer, consumee = ?consumee, "consuming duplicate segment");

        let rings = std::mem::take(&mut self.segs[consumee].rings);
        let windings = std::mem::take(&mut self.segs[consumee].windings);
        for (ring, winding) in rings.into_iter().zip(windings) {
            match self.segs[consumer].rings.iter().position(|&r| r == ring) {
                Some(ix) => self.segs[consumer].windings[ix] += winding,
                None => {
                    self.segs[consumer].rings.push(ring);
                    self.segs[consumer].windings.push(winding);
                }
            }
        }
        self.segs[consumee].consumed_by = Some(consumer);

        let consumee_left = self.segs[consumee].left;
        let consumee_right = self.segs[consumee].right;
        let consumer_left = self.segs[consumer].left;
        let consumer_right = self.segs[consumer].right;
        self.events[consumee_left].consumed_by = Some(consumer_left);
        self.events[consumee_right].consumed_by = Some(consumer_right);
    }

    /// Coverage just below this segment: the after-state of the nearest
    /// surviving segment beneath it, or nothing at the bottom of the sweep.
    fn before_state(&mut self, seg: SegIdx) -> CoverState {
        if let Some(state) = &self.segs[seg].before_state {
            return state.clone();
        }
        let state = match self.segs[seg].prev {
            None => CoverState::default(),
            Some(prev) => {
                let prev = self.ultimate_consumer(prev);
                self.after_state(prev)
            }
        };
        self.segs[seg].before_state = Some(state.clone());
        state
    }

    /// Coverage just above this segment: the before-state with our own ring
    /// windings folded in, re-deriving which polys and multipolys cover the
    /// slice (non-zero winding rule; an interior ring cancels its poly).
    fn after_state(&mut self, seg: SegIdx) -> CoverState {
        if let Some(state) = &self.segs[seg].after_state {
            return state.clone();
        }
        let mut state = self.before_state(seg);

        let own_rings = self.segs[seg].rings.clone();
        let own_windings = self.segs[seg].windings.clone();
        for (ring, winding) in own_rings.into_iter().zip(own_windings) {
            match state.rings.iter().position(|&r| r == ring) {
                Some(ix) => state.windings[ix] += winding,
                None => {
                    state.rings.push(ring);
                    state.windings.push(winding);
                }
            }
        }

        let mut polys_after: Vec<PolyIdx> = Vec::new();
        let mut polys_exclude: Vec<PolyIdx> = Vec::new();
        for ix in 0..state.rings.len() {
            if state.windings[ix] == 0 {
                continue;
            }
            let ring = state.rings[ix];
            let poly = self.rings[ring].poly;
            if polys_exclude.contains(&poly) {
                continue;
            }
            if self.rings[ring].is_exterior {
                polys_after.push(poly);
            } else {
                polys_exclude.push(poly);
                if let Some(pos) = polys_after.iter().position(|&p| p == poly) {
                    polys_after.remove(pos);
                }
            }
        }

        state.multipolys.clear();
        for poly in polys_after {
            let mp = self.polys[poly].multipoly;
            if !state.multipolys.contains(&mp) {
                state.multipolys.push(mp);
            }
        }

        self.segs[seg].after_state = Some(state.clone());
        state
    }

    /// Does this segment separate inside from outside, for the operation
    /// being run? Consumed segments never do; their consumer answers for
    /// them.
    pub(crate) fn is_in_result(&mut self, seg: SegIdx) -> bool {
        if self.segs[seg].consumed_by.is_some() {
            return false;
        }
        if let Some(in_result) = self.segs[seg].in_result {
            return in_result;
        }
        let mps_before = self.before_state(seg).multipolys;
        let mps_after = self.after_state(seg).multipolys;
        let in_result = match self.op {
            OpType::Union => mps_before.is_empty() != mps_after.is_empty(),
            OpType::Intersection => {
                let (least, most) = if mps_before.len() < mps_after.len() {
                    (mps_before.len(), mps_after.len())
                } else {
                    (mps_after.len(), mps_before.len())
                };
                most == self.num_multipolys && least < most
            }
            OpType::Xor => {
                let diff = mps_before.len().abs_diff(mps_after.len());
                diff % 2 == 1
            }
            OpType::Difference => {
                let is_just_subject = |mps: &[MultiPolyIdx]| {
                    mps.len() == 1 && self.multipolys[mps[0]].is_subject
                };
                is_just_subject(&mps_before) != is_just_subject(&mps_after)
            }
        };
        self.segs[seg].in_result = Some(in_result);
        in_result
    }

    /// The nearest segment below this one that made it into the result.
    pub(crate) fn prev_in_result(&mut self, seg: SegIdx) -> Option<SegIdx> {
        if let Some(memo) = self.segs[seg].prev_in_result {
            return memo;
        }
        let result = match self.segs[seg].prev {
            None => None,
            Some(prev) => {
                if self.is_in_result(prev) {
                    Some(prev)
                } else {
                    self.prev_in_result(prev)
                }
            }
        };
        self.segs[seg].prev_in_result = Some(result);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::Limits;
    use crate::typed_vec::Idx;

    fn ctx() -> Operation {
        Operation::new(OpType::Union, Limits::default())
    }

    fn pt(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    // builds a free-standing segment, with a throwaway ring handle
    fn seg(ctx: &mut Operation, p1: Point, p2: Point) -> SegIdx {
        ctx.segment_from_ring(p1, p2, RingIdx::new(0))
    }

    #[test]
    fn orientation_sets_winding() {
        let mut c = ctx();
        let fwd = seg(&mut c, pt(0.0, 0.0), pt(1.0, 1.0));
        assert_eq!(c.segs[fwd].windings, vec![1]);
        assert!(c.events[c.segs[fwd].left].is_left);
        assert_eq!(c.events[c.segs[fwd].left].point, pt(0.0, 0.0));

        let bwd = seg(&mut c, pt(3.0, 1.0), pt(2.0, 0.0));
        assert_eq!(c.segs[bwd].windings, vec![-1]);
        assert_eq!(c.events[c.segs[bwd].left].point, pt(2.0, 0.0));
    }

    #[test]
    fn compare_point_positions() {
        let mut c = ctx();
        let s = seg(&mut c, pt(0.0, 0.0), pt(2.0, 2.0));
        assert_eq!(c.compare_point(s, pt(1.0, 1.0)), Ordering::Equal);
        assert_eq!(c.compare_point(s, pt(1.0, 2.0)), Ordering::Greater);
        assert_eq!(c.compare_point(s, pt(1.0, 0.0)), Ordering::Less);
        // endpoints are on the segment
        assert_eq!(c.compare_point(s, pt(0.0, 0.0)), Ordering::Equal);
    }

    #[test]
    fn compare_point_vertical() {
        let mut c = ctx();
        let s = seg(&mut c, pt(1.0, 0.0), pt(1.0, 2.0));
        assert_eq!(c.compare_point(s, pt(1.0, 1.0)), Ordering::Equal);
        assert_eq!(c.compare_point(s, pt(0.5, 1.0)), Ordering::Greater);
        assert_eq!(c.compare_point(s, pt(1.5, 1.0)), Ordering::Less);
    }

    #[test]
    fn status_order_vertical_stack() {
        let mut c = ctx();
        let low = seg(&mut c, pt(0.0, 0.0), pt(2.0, 0.0));
        let high = seg(&mut c, pt(0.0, 1.0), pt(2.0, 1.0));
        assert_eq!(c.compare_segments(low, high), Ordering::Less);
        assert_eq!(c.compare_segments(high, low), Ordering::Greater);
    }

    #[test]
    fn status_order_shared_left_endpoint() {
        let mut c = ctx();
        let flat = seg(&mut c, pt(0.0, 0.0), pt(2.0, 0.0));
        let steep = seg(&mut c, pt(0.0, 0.0), pt(2.0, 2.0));
        assert_eq!(c.compare_segments(flat, steep), Ordering::Less);
    }

    #[test]
    fn status_order_shared_left_endpoint_same_right_x() {
        // right endpoints share an x; the order must come from their y,
        // not from creation order
        let mut c = ctx();
        let steep = seg(&mut c, pt(0.0, 0.0), pt(2.0, 2.0));
        let flat = seg(&mut c, pt(0.0, 0.0), pt(2.0, 0.0));
        assert_eq!(c.compare_segments(flat, steep), Ordering::Less);
        assert_eq!(c.compare_segments(steep, flat), Ordering::Greater);
    }

    #[test]
    fn duplicate_segments_across_rings_are_merged() {
        let mut c = ctx();
        let s1 = c.segment_from_ring(pt(0.0, 0.0), pt(1.0, 0.0), RingIdx::new(0));
        // identical endpoints trigger consumption at construction
        let s2 = c.segment_from_ring(pt(0.0, 0.0), pt(1.0, 0.0), RingIdx::new(1));
        assert_eq!(c.ultimate_consumer(s2), s1);
        assert_eq!(c.segs[s1].rings.len(), 2);
    }

    #[test]
    fn crossing_segments_intersect() {
        let mut c = ctx();
        let a = seg(&mut c, pt(0.0, 0.0), pt(2.0, 2.0));
        let b = seg(&mut c, pt(0.0, 2.0), pt(2.0, 0.0));
        assert_eq!(c.get_intersection(a, b), Some(pt(1.0, 1.0)));
    }

    #[test]
    fn endpoint_touch_is_preferred() {
        let mut c = ctx();
        let a = seg(&mut c, pt(0.0, 0.0), pt(2.0, 0.0));
        let b = seg(&mut c, pt(1.0, 0.0), pt(3.0, 5.0));
        // b's left endpoint lies on a
        assert_eq!(c.get_intersection(a, b), Some(pt(1.0, 0.0)));
    }

    #[test]
    fn segments_sharing_only_an_endpoint_do_not_intersect() {
        let mut c = ctx();
        let a = seg(&mut c, pt(0.0, 0.0), pt(1.0, 1.0));
        let b = seg(&mut c, pt(1.0, 1.0), pt(2.0, 0.0));
        assert_eq!(c.get_intersection(a, b), None);
    }

    #[test]
    fn disjoint_segments_do_not_intersect() {
        let mut c = ctx();
        let a = seg(&mut c, pt(0.0, 0.0), pt(1.0, 0.0));
        let b = seg(&mut c, pt(5.0, 5.0), pt(6.0, 5.0));
        assert_eq!(c.get_intersection(a, b), None);
    }

    #[test]
    fn split_produces_two_halves() {
        let mut c = ctx();
        let s = seg(&mut c, pt(0.0, 0.0), pt(2.0, 2.0));
        let new_events = c.split_segment(s, pt(1.0, 1.0));
        assert_eq!(new_events.len(), 2);

        // left half keeps the handle, right half is the new segment
        assert_eq!(c.events[c.segs[s].left].point, pt(0.0, 0.0));
        assert_eq!(c.events[c.segs[s].right].point, pt(1.0, 1.0));

        let new_seg = c.events[new_events[1]].segment;
        assert_eq!(c.events[c.segs[new_seg].left].point, pt(1.0, 1.0));
        assert_eq!(c.events[c.segs[new_seg].right].point, pt(2.0, 2.0));
        assert_eq!(c.segs[new_seg].windings, c.segs[s].windings);
    }

    #[test]
    fn consume_merges_windings() {
        let mut c = ctx();
        let a = c.segment_from_ring(pt(0.0, 0.0), pt(1.0, 0.0), RingIdx::new(0));
        let b = c.segment_from_ring(pt(1.0, 0.0), pt(0.0, 0.0), RingIdx::new(0));
        // same ring, opposite traversal: windings cancel
        let survivor = c.ultimate_consumer(b);
        assert_eq!(survivor, a);
        assert_eq!(c.segs[a].windings, vec![0]);
    }
}
