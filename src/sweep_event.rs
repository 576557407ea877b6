//! Sweep events: the endpoints of segments, in the order the sweep visits
//! them.
//!
//! Every segment contributes two events, one per endpoint, cross-linked
//! through `other`. Events sharing a point are pooled into a coincidence
//! group the moment they are created; since all points come out of the
//! rounder canonicalized, bit-equality of coordinates is exactly "same
//! point", and the group can be looked up by the coordinate bits.

use std::cmp::Ordering;

use crate::geom::Point;
use crate::operation::Operation;
use crate::segment::SegIdx;

typed_idx!(
    /// Handle to a [`SweepEvent`] in the event arena.
    EventIdx,
    "e"
);

typed_idx!(
    /// Handle to a coincidence group: the set of events sharing one point.
    GroupIdx,
    "g"
);

/// One endpoint of a segment, as seen by the sweep.
#[derive(Debug)]
pub(crate) struct SweepEvent {
    pub point: Point,
    /// Whether this is the left (first-swept) endpoint of its segment.
    pub is_left: bool,
    pub segment: SegIdx,
    /// The event at the segment's opposite endpoint.
    pub other: EventIdx,
    /// The coincidence group of all events at `point`.
    pub group: GroupIdx,
    /// Set when our segment was merged into another; points at the
    /// corresponding event of the consuming segment.
    pub consumed_by: Option<EventIdx>,
    /// Queue membership flag, maintained by the event queue.
    pub in_queue: bool,
}

impl Operation {
    /// Creates the linked left/right event pair for the segment at `seg` and
    /// pools both events with the other events at their points.
    pub(crate) fn new_event_pair(
        &mut self,
        left_pt: Point,
        right_pt: Point,
        seg: SegIdx,
    ) -> (EventIdx, EventIdx) {
        let left = self.events.next_idx();
        let right = EventIdx(left.0 + 1);
        self.events.push(SweepEvent {
            point: left_pt,
            is_left: true,
            segment: seg,
            other: right,
            group: GroupIdx(0),
            consumed_by: None,
            in_queue: false,
        });
        self.events.push(SweepEvent {
            point: right_pt,
            is_left: false,
            segment: seg,
            other: left,
            group: GroupIdx(0),
            consumed_by: None,
            in_queue: false,
        });
        self.pool_event(left);
        self.pool_event(right);
        (left, right)
    }

    /// Creates a single event (used when splitting a segment, where the two
    /// new events belong to different segments) and pools it.
    pub(crate) fn new_event(
        &mut self,
        point: Point,
        is_left: bool,
        seg: SegIdx,
        other: EventIdx,
    ) -> EventIdx {
        let idx = self.events.push(SweepEvent {
            point,
            is_left,
            segment: seg,
            other,
            group: GroupIdx(0),
            consumed_by: None,
            in_queue: false,
        });
        self.pool_event(idx);
        idx
    }

    /// Adds the event to the coincidence group of its point, creating the
    /// group if this is the first event there.
    fn pool_event(&mut self, e: EventIdx) {
        let key = self.events[e].point.bits();
        let group = match self.point_groups.get(&key) {
            Some(&g) => g,
            None => {
                let g = self.groups.push(Vec::new());
                self.point_groups.insert(key, g);
                g
            }
        };
        self.groups[group].push(e);
        self.events[e].group = group;
    }

    /// Merges segments that have become exact duplicates: two events in the
    /// same group whose opposite endpoints also share a group bound segments
    /// with identical endpoints, and one consumes the other.
    pub(crate) fn check_group_consume(&mut self, e: EventIdx) {
        let members = self.groups[self.events[e].group].clone();
        for i in 0..members.len() {
            for j in (i + 1)..members.len() {
                let (e1, e2) = (members[i], members[j]);
                let s1 = self.events[e1].segment;
                let s2 = self.events[e2].segment;
                if self.segs[s1].consumed_by.is_some() || self.segs[s2].consumed_by.is_some() {
                    continue;
                }
                let o1 = self.events[e1].other;
                let o2 = self.events[e2].other;
                if self.events[o1].group != self.events[o2].group {
                    continue;
                }
                self.consume_segments(s1, s2);
            }
        }
    }

    /// The events at this point whose segments are in the result and not yet
    /// claimed by an output ring. These are the candidate continuations when
    /// walking output rings.
    pub(crate) fn available_linked_events(&mut self, e: EventIdx) -> Vec<EventIdx> {
        let members = self.groups[self.events[e].group].clone();
        let mut available = Vec::new();
        for evt in members {
            if evt == e {
                continue;
            }
            let seg = self.events[evt].segment;
            if self.segs[seg].ring_out.is_some() {
                continue;
            }
            if self.is_in_result(seg) {
                available.push(evt);
            }
        }
        available
    }

    /// Queue order: by point (x, then y); at the same point, right events
    /// before left events (finish segments before starting new ones); among
    /// same-sided events, sweep-line segment order.
    pub(crate) fn compare_events(&self, a: EventIdx, b: EventIdx) -> Ordering {
        let ea = &self.events[a];
        let eb = &self.events[b];
        let pt_cmp = ea.point.cmp(&eb.point);
        if pt_cmp != Ordering::Equal {
            return pt_cmp;
        }
        if ea.is_left != eb.is_left {
            return if ea.is_left {
                Ordering::Greater
            } else {
                Ordering::Less
            };
        }
        self.compare_segments(ea.segment, eb.segment)
    }
}
