//! Overhang detection: would dropping a shard now trap one that comes later?
//!
//! A shard lands on a contact edge. If its remaining vertex projects outside
//! the contact edge's x-span, the shard overhangs the region next to the
//! contact edge. Whatever fills that region must already be in place, which
//! is the case exactly when the side of the shard facing it (the obstructed
//! line) is already exposed.

use crate::frontier::Frontier;
use crate::geometry::{Edge, Triangle};

/// Outcome of testing a candidate placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clearance {
    /// The shard sits within the contact edge's span and shadows nothing.
    Concave,
    /// The shard overhangs, but the obstructed line is already exposed or lies
    /// on the floor.
    Supported(Edge),
    /// The shard overhangs an edge no placed shard has reached yet.
    Blocked(Edge),
}

impl Clearance {
    /// Can the shard be dropped now?
    pub fn is_safe(&self) -> bool {
        !matches!(self, Self::Blocked(_))
    }

    /// The obstructed line, if the shard overhangs.
    pub fn obstructed(&self) -> Option<Edge> {
        match self {
            Self::Concave => None,
            Self::Supported(line) | Self::Blocked(line) => Some(*line),
        }
    }
}

/// Does every vertex of `triangle` project inside the x-span of `contact`?
pub fn is_concave(triangle: &Triangle, contact: &Edge) -> bool {
    overhang_line(triangle, contact).is_none()
}

/// The obstructed line for dropping `triangle` onto `contact`, or `None` if
/// the drop is concave.
///
/// Starts from the first side (in cyclic order) that reaches outside the span,
/// oriented away from the over-extending vertex, then swings its far end to
/// the lowest vertex adjacent to that vertex.
pub fn overhang_line(triangle: &Triangle, contact: &Edge) -> Option<Edge> {
    let (lo, hi) = (contact.min_x(), contact.max_x());
    let outside = |x: i32| x < lo || x > hi;

    let line = triangle.edges().iter().find_map(|edge| {
        if outside(edge.p1.x) {
            Some(*edge)
        } else if outside(edge.p2.x) {
            Some(edge.reversed())
        } else {
            None
        }
    })?;

    Some(extend_to_lowest(triangle, line))
}

fn extend_to_lowest(triangle: &Triangle, mut line: Edge) -> Edge {
    for edge in triangle.edges() {
        if edge.p1 == line.p1 && edge.p2.y < line.p2.y {
            line.p2 = edge.p2;
        } else if edge.p2 == line.p1 && edge.p1.y < line.p2.y {
            line.p2 = edge.p1;
        }
    }
    line
}

/// Classify dropping `triangle` onto `contact` given the current frontier.
///
/// Pure: the frontier is only read, so callers may probe many candidates.
pub fn clearance(frontier: &Frontier, triangle: &Triangle, contact: &Edge) -> Clearance {
    match overhang_line(triangle, contact) {
        None => Clearance::Concave,
        Some(line) if frontier.border().is_bottom_edge(&line) || frontier.contains(&line) => {
            Clearance::Supported(line)
        }
        Some(line) => Clearance::Blocked(line),
    }
}
