//! The operation context and driver.
//!
//! An [`Operation`] owns every arena and the rounder for one boolean-op run;
//! nothing outlives it, and concurrent runs never share state. The driver
//! loads the operands, sweeps, and assembles the output.

use std::collections::HashMap;

use tracing::debug;

use crate::geom::bbox_overlap;
use crate::geom_in::{MultiPolyIdx, MultiPolyIn, PolyIn, RingIn};
use crate::geom_out::RingOut;
use crate::queue::EventQueue;
use crate::rounder::PtRounder;
use crate::segment::Segment;
use crate::sweep_event::SweepEvent;
use crate::sweep_line::SweepLine;
use crate::typed_vec::TypedVec;
use crate::{
    geom_in::PolyIdx, geom_in::RingIdx, geom_out::OutRingIdx, segment::SegIdx,
    sweep_event::EventIdx, sweep_event::GroupIdx,
};
use crate::{Error, Geometry, MultiPolygon};

/// The boolean operation to perform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpType {
    /// Area covered by any operand.
    Union,
    /// Area covered by every operand.
    Intersection,
    /// Area covered by an odd number of operands.
    Xor,
    /// Area of the subject not covered by any other operand.
    Difference,
}

/// Ceilings on intermediate state, to fail fast instead of thrashing when
/// an input produces a pathological blowup of intersections.
#[derive(Clone, Copy, Debug)]
pub struct Limits {
    /// Maximum number of events queued at once.
    pub max_queue_size: usize,
    /// Maximum number of segments the sweep may retire.
    pub max_sweep_segments: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_queue_size: 1_000_000,
            max_sweep_segments: 1_000_000,
        }
    }
}

/// All state for one run: the arenas, the rounder, and the operation
/// parameters. Methods are implemented next to the types they mostly touch.
pub(crate) struct Operation {
    pub op: OpType,
    pub num_multipolys: usize,
    pub limits: Limits,
    pub rounder: PtRounder,
    pub events: TypedVec<EventIdx, SweepEvent>,
    pub segs: TypedVec<SegIdx, Segment>,
    pub rings: TypedVec<RingIdx, RingIn>,
    pub polys: TypedVec<PolyIdx, PolyIn>,
    pub multipolys: TypedVec<MultiPolyIdx, MultiPolyIn>,
    /// Coincidence groups: all events at one point.
    pub groups: TypedVec<GroupIdx, Vec<EventIdx>>,
    /// Group lookup by the point's coordinate bits.
    pub point_groups: HashMap<(u64, u64), GroupIdx>,
    pub out_rings: TypedVec<OutRingIdx, RingOut>,
}

impl Operation {
    pub fn new(op: OpType, limits: Limits) -> Self {
        Operation {
            op,
            num_multipolys: 0,
            limits,
            rounder: PtRounder::new(),
            events: TypedVec::default(),
            segs: TypedVec::default(),
            rings: TypedVec::default(),
            polys: TypedVec::default(),
            multipolys: TypedVec::default(),
            groups: TypedVec::default(),
            point_groups: HashMap::new(),
            out_rings: TypedVec::default(),
        }
    }
}

/// Runs one boolean operation over a subject and any number of other
/// operands.
pub(crate) fn run(
    op: OpType,
    subject: &Geometry,
    others: &[Geometry],
    limits: Limits,
) -> Result<MultiPolygon, Error> {
    let mut ctx = Operation::new(op, limits);

    let mut operands = vec![ctx.add_geometry(subject, true)?];
    for geom in others {
        operands.push(ctx.add_geometry(geom, false)?);
    }
    ctx.num_multipolys = operands.len();

    // a clip that cannot touch the subject cannot change the difference
    if op == OpType::Difference {
        let subject_bbox = ctx.multipolys[operands[0]].bbox;
        operands.retain(|&mp| {
            ctx.multipolys[mp].is_subject
                || bbox_overlap(&ctx.multipolys[mp].bbox, &subject_bbox).is_some()
        });
    }

    // any disjoint pair empties an intersection
    if op == OpType::Intersection {
        for i in 0..operands.len() {
            for j in (i + 1)..operands.len() {
                let a = &ctx.multipolys[operands[i]].bbox;
                let b = &ctx.multipolys[operands[j]].bbox;
                if bbox_overlap(a, b).is_none() {
                    debug!("disjoint operand bboxes, intersection is empty");
                    return Ok(Vec::new());
                }
            }
        }
    }

    let mut queue = EventQueue::new();
    for &mp in &operands {
        let polys = ctx.multipolys[mp].polys.clone();
        for poly in polys {
            let mut ring_list = vec![ctx.polys[poly].exterior];
            ring_list.extend(ctx.polys[poly].interiors.iter().copied());
            for ring in ring_list {
                let segments = ctx.rings[ring].segments.clone();
                for seg in segments {
                    let (left, right) = (ctx.segs[seg].left, ctx.segs[seg].right);
                    queue.push(&mut ctx, left);
                    queue.push(&mut ctx, right);
                    if queue.len() > ctx.limits.max_queue_size {
                        return Err(Error::QueueOverflow {
                            size: queue.len(),
                            limit: ctx.limits.max_queue_size,
                        });
                    }
                }
            }
        }
    }
    debug!(events = ctx.events.len(), queued = queue.len(), op = ?op, "event queue filled");

    let mut sweep = SweepLine::new();
    while let Some(event) = queue.pop(&mut ctx) {
        if queue.len() > ctx.limits.max_queue_size {
            return Err(Error::QueueOverflow {
                size: queue.len(),
                limit: ctx.limits.max_queue_size,
            });
        }
        if sweep.finished.len() > ctx.limits.max_sweep_segments {
            return Err(Error::SweepLineOverflow {
                size: sweep.finished.len(),
                limit: ctx.limits.max_sweep_segments,
            });
        }
        let new_events = sweep.process(&mut ctx, &mut queue, event)?;
        for e in new_events {
            if ctx.events[e].consumed_by.is_none() {
                queue.push(&mut ctx, e);
            }
        }
    }
    debug!(segments = sweep.finished.len(), "sweep complete");

    #[cfg(feature = "debug-svg")]
    {
        svg::save("out.svg", &dump_svg(&ctx, &sweep.finished)).unwrap();
    }

    let rings = ctx.build_rings(&sweep.finished)?;
    let polys = ctx.compose_polys(&rings);
    debug!(rings = rings.len(), polys = polys.len(), "output assembled");

    let mut result = Vec::with_capacity(polys.len());
    for poly in &polys {
        if let Some(geom) = ctx.poly_geom(poly) {
            result.push(geom);
        }
    }
    Ok(result)
}

#[cfg(feature = "debug-svg")]
fn dump_svg(ctx: &Operation, segments: &[SegIdx]) -> svg::Document {
    use svg::node::element::Line;

    let mut document = svg::Document::new();
    for &seg in segments {
        let l = ctx.events[ctx.segs[seg].left].point;
        let r = ctx.events[ctx.segs[seg].right].point;
        let color = if ctx.segs[seg].consumed_by.is_some() {
            "gray"
        } else {
            "black"
        };
        document = document.add(
            Line::new()
                .set("x1", l.x)
                .set("y1", l.y)
                .set("x2", r.x)
                .set("y2", r.y)
                .set("stroke", color)
                .set("stroke-width", "0.05"),
        );
    }
    document
}
