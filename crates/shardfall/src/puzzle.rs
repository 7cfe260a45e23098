//! Puzzle files.
//!
//! The text format is a triangle count on the first non-blank line, followed
//! by one line per triangle holding six integers `x1 y1 x2 y2 x3 y3`:
//!
//! ```text
//! 2
//! 0 0 1 0 1 1
//! 1 1 0 1 0 0
//! ```
//!
//! Triangles are numbered by their position in the file, starting at 0.

use std::collections::HashSet;
use std::fmt::Write as _;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShardError};
use crate::geometry::{Point, PuzzleBorder, Triangle};
use crate::solver::{solve, SolveSettings, Solution};

/// A set of shards tiling a rectangle.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Puzzle {
    /// The shards, in file order.
    pub triangles: Vec<Triangle>,
}

impl Puzzle {
    /// Wrap a list of shards.
    pub fn new(triangles: Vec<Triangle>) -> Self {
        Self { triangles }
    }

    /// Parse the text format.
    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty());

        let (count_line, count_text) = lines
            .next()
            .ok_or_else(|| ShardError::parse(1, "missing triangle count"))?;
        let count: usize = count_text.parse().map_err(|_| {
            ShardError::parse(
                count_line,
                format!("invalid triangle count '{}'", count_text),
            )
        })?;

        let mut triangles = Vec::with_capacity(count);
        let mut last_line = count_line;
        for id in 0..count {
            let (line_no, line) = lines.next().ok_or_else(|| {
                ShardError::parse(
                    last_line + 1,
                    format!("expected {} triangles, found {}", count, id),
                )
            })?;
            triangles.push(parse_triangle(id, line_no, line)?);
            last_line = line_no;
        }

        if let Some((line_no, _)) = lines.next() {
            return Err(ShardError::parse(
                line_no,
                format!("unexpected content after {} triangles", count),
            ));
        }

        Ok(Self { triangles })
    }

    /// Read a puzzle file.
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Render the text format.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.triangles.len());
        for triangle in &self.triangles {
            let [a, b, c] = triangle.vertices();
            let _ = writeln!(
                out,
                "{} {} {} {} {} {}",
                a.x, a.y, b.x, b.y, c.x, c.y
            );
        }
        out
    }

    /// Write a puzzle file.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_text())?;
        Ok(())
    }

    /// Bounding rectangle of all shards.
    pub fn border(&self) -> Result<PuzzleBorder> {
        PuzzleBorder::of(&self.triangles)
    }

    /// Check every shard before solving.
    pub fn validate(&self) -> Result<()> {
        validate_triangles(&self.triangles)
    }

    /// Find a drop order.
    pub fn solve(&self, settings: &SolveSettings) -> Result<Solution> {
        solve(&self.triangles, settings)
    }

    /// A ten-shard window, 4 by 4, whose solution needs an overhang to wait.
    pub fn demo() -> Self {
        const SHARDS: [[i32; 6]; 10] = [
            [2, 0, 0, 0, 0, 1],
            [2, 0, 1, 1, 0, 1],
            [1, 1, 2, 0, 3, 1],
            [2, 0, 3, 1, 4, 0],
            [4, 1, 4, 0, 3, 1],
            [0, 1, 0, 4, 1, 1],
            [2, 4, 1, 1, 0, 4],
            [3, 1, 2, 4, 1, 1],
            [3, 1, 4, 1, 2, 4],
            [2, 4, 4, 4, 4, 1],
        ];
        let triangles = SHARDS
            .iter()
            .enumerate()
            .map(|(id, c)| {
                Triangle::from_vertices(
                    id,
                    [
                        Point::new(c[0], c[1]),
                        Point::new(c[2], c[3]),
                        Point::new(c[4], c[5]),
                    ],
                )
            })
            .collect();
        Self { triangles }
    }
}

impl FromStr for Puzzle {
    type Err = ShardError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

fn parse_triangle(id: usize, line_no: usize, line: &str) -> Result<Triangle> {
    let coords = line
        .split_whitespace()
        .map(|token| {
            token.parse::<i32>().map_err(|_| {
                ShardError::parse(line_no, format!("invalid coordinate '{}'", token))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    if coords.len() != 6 {
        return Err(ShardError::parse(
            line_no,
            format!("expected 6 integers, found {}", coords.len()),
        ));
    }

    Ok(Triangle::from_vertices(
        id,
        [
            Point::new(coords[0], coords[1]),
            Point::new(coords[2], coords[3]),
            Point::new(coords[4], coords[5]),
        ],
    ))
}

/// Reject empty puzzles, open or degenerate shards, and repeated ids.
pub fn validate_triangles(triangles: &[Triangle]) -> Result<()> {
    if triangles.is_empty() {
        return Err(ShardError::EmptyPuzzle);
    }
    let mut seen = HashSet::with_capacity(triangles.len());
    for triangle in triangles {
        triangle.validate()?;
        if !seen.insert(triangle.id) {
            return Err(ShardError::DuplicateId(triangle.id));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = "2\n0 0 1 0 1 1\n1 1 0 1 0 0\n";

    #[test]
    fn test_parse_square() {
        let puzzle = Puzzle::parse(SQUARE).unwrap();
        assert_eq!(puzzle.triangles.len(), 2);
        assert_eq!(puzzle.triangles[1].id, 1);
        assert_eq!(
            puzzle.triangles[1].vertices(),
            [Point::new(1, 1), Point::new(0, 1), Point::new(0, 0)]
        );
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        let text = "\n\n  2 \n0 0 1 0 1 1\n\n   1 1   0 1 0 0\n\n";
        let puzzle: Puzzle = text.parse().unwrap();
        assert_eq!(puzzle, Puzzle::parse(SQUARE).unwrap());
    }

    #[test]
    fn test_parse_errors() {
        let err = Puzzle::parse("").unwrap_err();
        assert!(matches!(err, ShardError::Parse { line: 1, .. }));

        let err = Puzzle::parse("two\n").unwrap_err();
        assert!(matches!(err, ShardError::Parse { line: 1, .. }));

        let err = Puzzle::parse("1\n0 0 1 0 1\n").unwrap_err();
        assert!(matches!(err, ShardError::Parse { line: 2, .. }));

        let err = Puzzle::parse("1\n0 0 1 0 1 x\n").unwrap_err();
        assert!(err.to_string().contains("invalid coordinate 'x'"));

        let err = Puzzle::parse("2\n0 0 1 0 1 1\n").unwrap_err();
        assert!(err.to_string().contains("expected 2 triangles, found 1"));

        let err = Puzzle::parse("1\n0 0 1 0 1 1\n5\n").unwrap_err();
        assert!(matches!(err, ShardError::Parse { line: 3, .. }));
    }

    #[test]
    fn test_text_round_trip() {
        let demo = Puzzle::demo();
        let text = demo.to_text();
        assert!(text.starts_with("10\n2 0 0 0 0 1\n"));
        assert_eq!(Puzzle::parse(&text).unwrap(), demo);
    }

    #[test]
    fn test_validate() {
        assert!(matches!(
            validate_triangles(&[]),
            Err(ShardError::EmptyPuzzle)
        ));
        assert!(Puzzle::demo().validate().is_ok());

        let mut puzzle = Puzzle::parse(SQUARE).unwrap();
        puzzle.triangles[1].id = 0;
        assert!(matches!(puzzle.validate(), Err(ShardError::DuplicateId(0))));

        let flat = Puzzle::parse("1\n0 0 1 0 2 0\n").unwrap();
        assert!(matches!(
            flat.validate(),
            Err(ShardError::DegenerateTriangle { id: 0, .. })
        ));
    }
}
