//! The event queue: a binary min-heap over event handles, ordered by
//! [`Operation::compare_events`].
//!
//! The comparator lives on the operation context, so the heap cannot use
//! `std::collections::BinaryHeap`; sifting takes the context explicitly.
//! Removal is lazy: a removed event keeps its slot but drops its `in_queue`
//! flag, and `pop` discards stale slots as it meets them. Re-pushing a
//! removed event inserts a fresh slot at its now-correct position, which is
//! what keeps the order honest across segment splits.

use crate::operation::Operation;
use crate::sweep_event::EventIdx;

#[derive(Debug, Default)]
pub(crate) struct EventQueue {
    heap: Vec<EventIdx>,
    /// Number of live (non-stale) entries.
    live: usize,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.live
    }

    /// Inserts an event. Idempotent: an event already in the queue stays
    /// where it is.
    pub fn push(&mut self, ctx: &mut Operation, e: EventIdx) {
        if ctx.events[e].in_queue {
            return;
        }
        ctx.events[e].in_queue = true;
        self.live += 1;
        self.heap.push(e);
        self.sift_up(ctx, self.heap.len() - 1);
    }

    /// Marks an event as no longer queued. The heap slot stays behind and is
    /// skipped at pop time.
    pub fn remove(&mut self, ctx: &mut Operation, e: EventIdx) {
        if ctx.events[e].in_queue {
            ctx.events[e].in_queue = false;
            self.live -= 1;
        }
    }

    /// Removes and returns the earliest live event.
    pub fn pop(&mut self, ctx: &mut Operation) -> Option<EventIdx> {
        while !self.heap.is_empty() {
            let top = self.heap.swap_remove(0);
            if !self.heap.is_empty() {
                self.sift_down(ctx, 0);
            }
            if ctx.events[top].in_queue {
                ctx.events[top].in_queue = false;
                self.live -= 1;
                return Some(top);
            }
        }
        None
    }

    fn sift_up(&mut self, ctx: &Operation, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if ctx.compare_events(self.heap[i], self.heap[parent]).is_lt() {
                self.heap.swap(i, parent);
                i = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, ctx: &Operation, mut i: usize) {
        loop {
            let left = 2 * i + 1;
            let right = left + 1;
            let mut smallest = i;
            if left < self.heap.len()
                && ctx.compare_events(self.heap[left], self.heap[smallest]).is_lt()
            {
                smallest = left;
            }
            if right < self.heap.len()
                && ctx
                    .compare_events(self.heap[right], self.heap[smallest])
                    .is_lt()
            {
                smallest = right;
            }
            if smallest == i {
                break;
            }
            self.heap.swap(i, smallest);
            i = smallest;
        }
    }
}
