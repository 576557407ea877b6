#![doc = include_str!("../README.md")]
#![deny(missing_docs)]

#[macro_use]
mod typed_vec;

mod geom;
mod geom_in;
mod geom_out;
mod num;
mod operation;
mod queue;
mod rounder;
mod segment;
mod sweep_event;
mod sweep_line;

pub use operation::{Limits, OpType};

/// Result geometry: a list of polygons, each a list of rings, each a closed
/// list of `[x, y]` coordinates. The first ring of a polygon is its
/// exterior (wound counterclockwise); the rest are holes (wound clockwise).
pub type MultiPolygon = Vec<Vec<Vec<[f64; 2]>>>;

/// An input operand: either a single polygon or a multipolygon, as nested
/// coordinate arrays. Rings may be given open or closed.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Geometry {
    /// One polygon: an exterior ring followed by any holes.
    Polygon(Vec<Vec<[f64; 2]>>),
    /// Several polygons.
    MultiPolygon(Vec<Vec<Vec<[f64; 2]>>>),
}

impl From<Vec<Vec<[f64; 2]>>> for Geometry {
    fn from(poly: Vec<Vec<[f64; 2]>>) -> Self {
        Geometry::Polygon(poly)
    }
}

impl From<Vec<Vec<Vec<[f64; 2]>>>> for Geometry {
    fn from(multipoly: Vec<Vec<Vec<[f64; 2]>>>) -> Self {
        Geometry::MultiPolygon(multipoly)
    }
}

/// The ways an operation can fail.
#[derive(Clone, Copy, Debug, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// An input coordinate was NaN or infinite.
    NonFiniteCoordinate {
        /// The offending vertex's x coordinate.
        x: f64,
        /// The offending vertex's y coordinate.
        y: f64,
    },
    /// An input ring had no coordinates at all.
    EmptyRing,
    /// An input polygon had no rings.
    EmptyPolygon,
    /// An input ring collapsed to a single point.
    DegenerateRing {
        /// The x coordinate the ring collapsed to.
        x: f64,
        /// The y coordinate the ring collapsed to.
        y: f64,
    },
    /// The event queue outgrew [`Limits::max_queue_size`].
    QueueOverflow {
        /// The queue size that tripped the limit.
        size: usize,
        /// The configured ceiling.
        limit: usize,
    },
    /// The sweep retired more segments than [`Limits::max_sweep_segments`].
    SweepLineOverflow {
        /// The segment count that tripped the limit.
        size: usize,
        /// The configured ceiling.
        limit: usize,
    },
    /// A segment's right endpoint arrived but the segment was not in the
    /// sweep-line status. Indicates inconsistent ordering, usually from
    /// coordinates of wildly mixed magnitudes.
    SegmentNotInSweepLine {
        /// Left endpoint of the missing segment.
        left: [f64; 2],
        /// Right endpoint of the missing segment.
        right: [f64; 2],
    },
    /// An output ring could not be closed. Indicates an internal
    /// inconsistency in the sweep results.
    UnclosedRing {
        /// Where the ring walk started.
        start: [f64; 2],
        /// Where the ring walk got stuck.
        end: [f64; 2],
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::NonFiniteCoordinate { x, y } => {
                write!(f, "non-finite input coordinate [{x}, {y}]")
            }
            Error::EmptyRing => write!(f, "input ring has no coordinates"),
            Error::EmptyPolygon => write!(f, "input polygon has no rings"),
            Error::DegenerateRing { x, y } => {
                write!(f, "input ring collapses to the single point [{x}, {y}]")
            }
            Error::QueueOverflow { size, limit } => {
                write!(f, "event queue grew to {size} events, over the limit of {limit}")
            }
            Error::SweepLineOverflow { size, limit } => {
                write!(
                    f,
                    "sweep line retired {size} segments, over the limit of {limit}"
                )
            }
            Error::SegmentNotInSweepLine { left, right } => {
                write!(
                    f,
                    "segment [{}, {}] -> [{}, {}] missing from the sweep line at its right endpoint",
                    left[0], left[1], right[0], right[1]
                )
            }
            Error::UnclosedRing { start, end } => {
                write!(
                    f,
                    "unable to close output ring started at [{}, {}]; walk ended at [{}, {}]",
                    start[0], start[1], end[0], end[1]
                )
            }
        }
    }
}

impl std::error::Error for Error {}

/// The union of the subject and all other operands.
pub fn union(subject: &Geometry, others: &[Geometry]) -> Result<MultiPolygon, Error> {
    operation::run(OpType::Union, subject, others, Limits::default())
}

/// The intersection of the subject with all other operands.
pub fn intersection(subject: &Geometry, others: &[Geometry]) -> Result<MultiPolygon, Error> {
    operation::run(OpType::Intersection, subject, others, Limits::default())
}

/// The symmetric difference: area covered by an odd number of operands.
pub fn xor(subject: &Geometry, others: &[Geometry]) -> Result<MultiPolygon, Error> {
    operation::run(OpType::Xor, subject, others, Limits::default())
}

/// The subject minus all other operands.
pub fn difference(subject: &Geometry, others: &[Geometry]) -> Result<MultiPolygon, Error> {
    operation::run(OpType::Difference, subject, others, Limits::default())
}

/// Runs any operation with explicit [`Limits`].
pub fn boolean_op(
    op: OpType,
    subject: &Geometry,
    others: &[Geometry],
    limits: Limits,
) -> Result<MultiPolygon, Error> {
    operation::run(op, subject, others, limits)
}
