//! Grid points, edges, triangles and the rectangular puzzle border.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShardError};

/// A vertex on the integer puzzle grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate, growing upwards.
    pub y: i32,
}

impl Point {
    /// Create a new point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// A line segment between two grid points.
///
/// Edges keep the direction they were built with, because a triangle's edges
/// form a directed cycle, but equality ignores direction: `a -> b` equals
/// `b -> a`. Two triangles glued along a side therefore hold equal edges.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Edge {
    /// Start point.
    pub p1: Point,
    /// End point.
    pub p2: Point,
}

impl Edge {
    /// Create a new edge from `p1` to `p2`.
    pub const fn new(p1: Point, p2: Point) -> Self {
        Self { p1, p2 }
    }

    /// The same segment walked the other way.
    pub fn reversed(self) -> Self {
        Self::new(self.p2, self.p1)
    }

    /// Smallest x-coordinate of the two endpoints.
    pub fn min_x(&self) -> i32 {
        self.p1.x.min(self.p2.x)
    }

    /// Largest x-coordinate of the two endpoints.
    pub fn max_x(&self) -> i32 {
        self.p1.x.max(self.p2.x)
    }

    /// Is `p` one of the endpoints?
    pub fn has_endpoint(&self, p: Point) -> bool {
        self.p1 == p || self.p2 == p
    }

    /// Do both endpoints sit at height `y`?
    pub fn lies_on_y(&self, y: i32) -> bool {
        self.p1.y == y && self.p2.y == y
    }

    /// Do both endpoints sit at abscissa `x`?
    pub fn lies_on_x(&self, x: i32) -> bool {
        self.p1.x == x && self.p2.x == x
    }

    /// Zero-length edge.
    pub fn is_degenerate(&self) -> bool {
        self.p1 == self.p2
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        (self.p1 == other.p1 && self.p2 == other.p2) || (self.p1 == other.p2 && self.p2 == other.p1)
    }
}

impl Eq for Edge {}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} --> {}", self.p1, self.p2)
    }
}

/// A numbered shard: three edges forming a closed cycle.
///
/// Edge `i` ends where edge `(i + 1) % 3` starts. The cyclic order is fixed
/// at construction; the obstruction test walks it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTriangle")]
pub struct Triangle {
    /// Identifier assigned when the puzzle was loaded.
    pub id: usize,
    edges: [Edge; 3],
}

/// Deserialized form of [`Triangle`], checked by [`Triangle::new`].
#[derive(Deserialize)]
struct RawTriangle {
    id: usize,
    edges: [Edge; 3],
}

impl TryFrom<RawTriangle> for Triangle {
    type Error = ShardError;

    fn try_from(raw: RawTriangle) -> Result<Self> {
        Self::new(raw.id, raw.edges)
    }
}

impl Triangle {
    /// Build a triangle from three vertices in order.
    ///
    /// The edges are `a -> b`, `b -> c`, `c -> a`.
    pub fn from_vertices(id: usize, [a, b, c]: [Point; 3]) -> Self {
        Self {
            id,
            edges: [Edge::new(a, b), Edge::new(b, c), Edge::new(c, a)],
        }
    }

    /// Build a triangle from three edges, checking that they close.
    pub fn new(id: usize, edges: [Edge; 3]) -> Result<Self> {
        let triangle = Self { id, edges };
        triangle.check_closed()?;
        Ok(triangle)
    }

    /// The three edges in cyclic order.
    pub fn edges(&self) -> &[Edge; 3] {
        &self.edges
    }

    /// The three vertices, each the start of the matching edge.
    pub fn vertices(&self) -> [Point; 3] {
        [self.edges[0].p1, self.edges[1].p1, self.edges[2].p1]
    }

    /// Edges other than the one at `index`, in cyclic order.
    pub fn other_edges(&self, index: usize) -> impl Iterator<Item = Edge> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(move |(i, _)| *i != index)
            .map(|(_, e)| *e)
    }

    /// The vertex that is not an endpoint of `base`.
    pub fn apex(&self, base: &Edge) -> Option<Point> {
        self.vertices().into_iter().find(|v| !base.has_endpoint(*v))
    }

    /// Twice the signed area (positive for counter-clockwise winding).
    ///
    /// Computed in `i128`, which holds the result for any pair of `i32` spans.
    pub fn doubled_area(&self) -> i128 {
        let [a, b, c] = self.vertices();
        let abx = i128::from(b.x) - i128::from(a.x);
        let aby = i128::from(b.y) - i128::from(a.y);
        let acx = i128::from(c.x) - i128::from(a.x);
        let acy = i128::from(c.y) - i128::from(a.y);
        abx * acy - aby * acx
    }

    fn check_closed(&self) -> Result<()> {
        for i in 0..3 {
            let next = (i + 1) % 3;
            if self.edges[i].p2 != self.edges[next].p1 {
                return Err(ShardError::OpenTriangle {
                    id: self.id,
                    edge: i,
                    next,
                });
            }
        }
        Ok(())
    }

    /// Reject open cycles, zero-length edges and collinear vertices.
    pub fn validate(&self) -> Result<()> {
        self.check_closed()?;
        if let Some(i) = self.edges.iter().position(Edge::is_degenerate) {
            return Err(ShardError::degenerate(
                self.id,
                format!("edge {} has zero length", i),
            ));
        }
        if self.doubled_area() == 0 {
            return Err(ShardError::degenerate(self.id, "vertices are collinear"));
        }
        Ok(())
    }
}

/// Axis-aligned bounding box of every vertex in a puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleBorder {
    /// Left side.
    pub min_x: i32,
    /// Bottom side.
    pub min_y: i32,
    /// Right side.
    pub max_x: i32,
    /// Top side.
    pub max_y: i32,
}

impl PuzzleBorder {
    /// Compute the border of a set of triangles.
    pub fn of(triangles: &[Triangle]) -> Result<Self> {
        let mut vertices = triangles.iter().flat_map(|t| t.vertices());
        let first = vertices.next().ok_or(ShardError::EmptyPuzzle)?;
        let mut border = Self {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        for v in vertices {
            border.min_x = border.min_x.min(v.x);
            border.min_y = border.min_y.min(v.y);
            border.max_x = border.max_x.max(v.x);
            border.max_y = border.max_y.max(v.y);
        }
        Ok(border)
    }

    /// Does `edge` run along one of the four sides?
    pub fn is_border_edge(&self, edge: &Edge) -> bool {
        edge.lies_on_x(self.min_x)
            || edge.lies_on_x(self.max_x)
            || edge.lies_on_y(self.min_y)
            || edge.lies_on_y(self.max_y)
    }

    /// Does `edge` run along the bottom side?
    pub fn is_bottom_edge(&self, edge: &Edge) -> bool {
        edge.lies_on_y(self.min_y)
    }

    /// Width of the rectangle.
    pub fn width(&self) -> u32 {
        self.max_x.abs_diff(self.min_x)
    }

    /// Height of the rectangle.
    pub fn height(&self) -> u32 {
        self.max_y.abs_diff(self.min_y)
    }
}

impl fmt::Display for PuzzleBorder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "x {}..{}, y {}..{}",
            self.min_x, self.max_x, self.min_y, self.max_y
        )
    }
}

/// Compute the rectangular border of a puzzle.
pub fn compute_border(triangles: &[Triangle]) -> Result<PuzzleBorder> {
    PuzzleBorder::of(triangles)
}

/// Does `edge` lie on the rectangle's outline?
pub fn is_border_edge(edge: &Edge, border: &PuzzleBorder) -> bool {
    border.is_border_edge(edge)
}
