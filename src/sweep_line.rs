//! The sweep-line status: the segments currently crossing the sweep,
//! ordered bottom to top.
//!
//! The status is a sorted `Vec` searched by [`Operation::compare_segments`].
//! Splits and consumption can perturb the comparator for segments already in
//! the status, so lookups fall back to a linear scan when the binary search
//! misses, and any segment about to be split is removed first and re-inserted
//! at its fresh position afterwards.

use crate::geom::Point;
use crate::operation::Operation;
use crate::queue::EventQueue;
use crate::segment::SegIdx;
use crate::sweep_event::EventIdx;
use crate::Error;

#[derive(Debug, Default)]
pub(crate) struct SweepLine {
    tree: Vec<SegIdx>,
    /// Segments whose left events have been fully processed, in processing
    /// order. Output rings are built from this list after the sweep.
    pub finished: Vec<SegIdx>,
}

impl SweepLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Processes one event, returning any events newly created (or displaced)
    /// by splits; the caller re-queues them.
    pub fn process(
        &mut self,
        ctx: &mut Operation,
        queue: &mut EventQueue,
        event: EventIdx,
    ) -> Result<Vec<EventIdx>, Error> {
        let seg = ctx.events[event].segment;
        let mut new_events = Vec::new();

        // our segment was merged into another; tidy up and move on
        if ctx.events[event].consumed_by.is_some() {
            if ctx.events[event].is_left {
                let other = ctx.events[event].other;
                queue.remove(ctx, other);
            } else {
                self.tree_remove(seg);
            }
            return Ok(new_events);
        }

        let pos = if ctx.events[event].is_left {
            self.tree_insert(ctx, seg)
        } else {
            self.tree_find(ctx, seg).ok_or_else(|| {
                let l = ctx.events[ctx.segs[seg].left].point;
                let r = ctx.events[ctx.segs[seg].right].point;
                Error::SegmentNotInSweepLine {
                    left: [l.x, l.y],
                    right: [r.x, r.y],
                }
            })?
        };

        let prev_seg = self.neighbor_below(ctx, pos);
        let next_seg = self.neighbor_above(ctx, pos);

        if ctx.events[event].is_left {
            // where the sweep first meets this segment, check it against
            // both neighbors for crossings
            let mut my_splitter: Option<Point> = None;

            if let Some(prev) = prev_seg {
                if let Some(inter) = ctx.get_intersection(prev, seg) {
                    if !ctx.is_an_endpoint(seg, inter) {
                        my_splitter = Some(inter);
                    }
                    if !ctx.is_an_endpoint(prev, inter) {
                        new_events.extend(self.split_safely(ctx, queue, prev, inter));
                    }
                }
            }

            if let Some(next) = next_seg {
                if let Some(inter) = ctx.get_intersection(next, seg) {
                    if !ctx.is_an_endpoint(seg, inter) {
                        // keep only the earliest split point; ties go to the
                        // one found against the lower neighbor
                        my_splitter = Some(match my_splitter {
                            None => inter,
                            Some(prior) => {
                                if prior <= inter {
                                    prior
                                } else {
                                    inter
                                }
                            }
                        });
                    }
                    if !ctx.is_an_endpoint(next, inter) {
                        new_events.extend(self.split_safely(ctx, queue, next, inter));
                    }
                }
            }

            if let Some(splitter) = my_splitter {
                // pull our right event out of the queue before the split
                // invalidates its position
                let right = ctx.segs[seg].right;
                queue.remove(ctx, right);
                new_events.push(right);
                new_events.extend(ctx.split_segment(seg, splitter));
            }

            if !new_events.is_empty() {
                // ordering may have shifted; take ourselves out and redo
                // this event once the queue has settled
                self.tree_remove(seg);
                new_events.push(event);
            } else {
                self.finished.push(seg);
                ctx.segs[seg].prev = prev_seg;
            }
        } else {
            // the sweep is done with this segment; its neighbors become
            // adjacent and may cross
            if let (Some(prev), Some(next)) = (prev_seg, next_seg) {
                if let Some(inter) = ctx.get_intersection(prev, next) {
                    if !ctx.is_an_endpoint(prev, inter) {
                        new_events.extend(self.split_safely(ctx, queue, prev, inter));
                    }
                    if !ctx.is_an_endpoint(next, inter) {
                        new_events.extend(self.split_safely(ctx, queue, next, inter));
                    }
                }
            }
            self.tree_remove(seg);
        }

        Ok(new_events)
    }

    /// Splits a segment that is (possibly) in the status: remove it, pull
    /// its right event, split, and re-insert the surviving left half.
    fn split_safely(
        &mut self,
        ctx: &mut Operation,
        queue: &mut EventQueue,
        seg: SegIdx,
        pt: Point,
    ) -> Vec<EventIdx> {
        self.tree_remove(seg);
        let right = ctx.segs[seg].right;
        queue.remove(ctx, right);
        let mut new_events = ctx.split_segment(seg, pt);
        new_events.push(right);
        // splitting can trigger consumption of the left half
        if ctx.segs[seg].consumed_by.is_none() {
            self.tree_insert(ctx, seg);
        }
        new_events
    }

    /// Inserts at the comparator's position, returning it.
    fn tree_insert(&mut self, ctx: &Operation, seg: SegIdx) -> usize {
        let pos = match self
            .tree
            .binary_search_by(|&other| ctx.compare_segments(other, seg))
        {
            Ok(p) | Err(p) => p,
        };
        self.tree.insert(pos, seg);
        pos
    }

    /// Finds a segment's position. Binary search first; a linear scan
    /// rescues segments whose comparator drifted after insertion.
    fn tree_find(&self, ctx: &Operation, seg: SegIdx) -> Option<usize> {
        if let Ok(pos) = self
            .tree
            .binary_search_by(|&other| ctx.compare_segments(other, seg))
        {
            if self.tree[pos] == seg {
                return Some(pos);
            }
        }
        self.tree.iter().position(|&s| s == seg)
    }

    /// Removes by identity; absent segments are a no-op.
    fn tree_remove(&mut self, seg: SegIdx) {
        if let Some(pos) = self.tree.iter().position(|&s| s == seg) {
            self.tree.remove(pos);
        }
    }

    fn neighbor_below(&self, ctx: &Operation, pos: usize) -> Option<SegIdx> {
        self.tree[..pos]
            .iter()
            .rev()
            .copied()
            .find(|&s| ctx.segs[s].consumed_by.is_none())
    }

    fn neighbor_above(&self, ctx: &Operation, pos: usize) -> Option<SegIdx> {
        self.tree[pos + 1..]
            .iter()
            .copied()
            .find(|&s| ctx.segs[s].consumed_by.is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Point;
    use crate::geom_in::RingIdx;
    use crate::operation::{Limits, OpType};
    use crate::typed_vec::Idx;

    fn ctx() -> Operation {
        Operation::new(OpType::Union, Limits::default())
    }

    fn pt(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    // runs the queue to exhaustion, the way the operation driver does
    fn drain(ctx: &mut Operation, queue: &mut EventQueue, sweep: &mut SweepLine) {
        while let Some(event) = queue.pop(ctx) {
            let new_events = sweep.process(ctx, queue, event).unwrap();
            for e in new_events {
                if ctx.events[e].consumed_by.is_none() {
                    queue.push(ctx, e);
                }
            }
        }
    }

    fn load(ctx: &mut Operation, queue: &mut EventQueue, segs: &[SegIdx]) {
        for &s in segs {
            let (l, r) = (ctx.segs[s].left, ctx.segs[s].right);
            queue.push(ctx, l);
            queue.push(ctx, r);
        }
    }

    #[test]
    fn disjoint_segments_pass_through() {
        let mut c = ctx();
        let a = c.segment_from_ring(pt(0.0, 0.0), pt(1.0, 0.0), RingIdx::new(0));
        let b = c.segment_from_ring(pt(0.0, 2.0), pt(1.0, 2.0), RingIdx::new(0));
        let mut q = EventQueue::new();
        let mut sweep = SweepLine::new();
        load(&mut c, &mut q, &[a, b]);
        drain(&mut c, &mut q, &mut sweep);
        assert_eq!(sweep.finished.len(), 2);
        assert!(sweep.tree.is_empty());
    }

    #[test]
    fn crossing_segments_are_split() {
        let mut c = ctx();
        let a = c.segment_from_ring(pt(0.0, 0.0), pt(2.0, 2.0), RingIdx::new(0));
        let b = c.segment_from_ring(pt(0.0, 2.0), pt(2.0, 0.0), RingIdx::new(1));
        let mut q = EventQueue::new();
        let mut sweep = SweepLine::new();
        load(&mut c, &mut q, &[a, b]);
        drain(&mut c, &mut q, &mut sweep);
        // each input segment became two halves meeting at (1, 1)
        assert_eq!(c.segs.len(), 4);
        assert_eq!(sweep.finished.len(), 4);
        for s in sweep.finished {
            assert!(c.is_an_endpoint(s, pt(1.0, 1.0)));
        }
    }

    #[test]
    fn t_intersection_splits_only_the_crossed_segment() {
        let mut c = ctx();
        let through = c.segment_from_ring(pt(0.0, 0.0), pt(2.0, 0.0), RingIdx::new(0));
        let touching = c.segment_from_ring(pt(1.0, 0.0), pt(1.0, 2.0), RingIdx::new(1));
        let mut q = EventQueue::new();
        let mut sweep = SweepLine::new();
        load(&mut c, &mut q, &[through, touching]);
        drain(&mut c, &mut q, &mut sweep);
        // the horizontal segment splits at (1, 0); the vertical one does not
        assert_eq!(c.segs.len(), 3);
        assert_eq!(sweep.finished.len(), 3);
    }

    #[test]
    fn prev_links_record_vertical_order() {
        let mut c = ctx();
        let low = c.segment_from_ring(pt(0.0, 0.0), pt(2.0, 0.0), RingIdx::new(0));
        let high = c.segment_from_ring(pt(0.0, 1.0), pt(2.0, 1.0), RingIdx::new(1));
        let mut q = EventQueue::new();
        let mut sweep = SweepLine::new();
        load(&mut c, &mut q, &[low, high]);
        drain(&mut c, &mut q, &mut sweep);
        assert_eq!(c.segs[low].prev, None);
        assert_eq!(c.segs[high].prev, Some(low));
    }

    #[test]
    fn coincident_segments_are_consumed_not_split() {
        let mut c = ctx();
        let a = c.segment_from_ring(pt(0.0, 0.0), pt(2.0, 0.0), RingIdx::new(0));
        let b = c.segment_from_ring(pt(0.0, 0.0), pt(2.0, 0.0), RingIdx::new(1));
        // consumption happened eagerly, at construction
        assert_eq!(c.ultimate_consumer(b), a);
        let mut q = EventQueue::new();
        let mut sweep = SweepLine::new();
        load(&mut c, &mut q, &[a, b]);
        drain(&mut c, &mut q, &mut sweep);
        assert_eq!(c.segs.len(), 2);
        assert_eq!(sweep.finished.len(), 1);
        assert_eq!(c.segs[a].rings.len(), 2);
    }
}
