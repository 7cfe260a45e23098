#![warn(missing_docs)]

//! Drop-order solver for rectangles tiled by triangular shards.
//!
//! A window has shattered into triangles. The shards can only be put back by
//! dropping them in from above, one at a time, so a shard may go in only if it
//! does not overhang a gap that a later shard still has to fall into. This
//! crate finds such an order.
//!
//! The solver seeds itself with the shards resting on the bottom border that
//! overhang nothing, tracks the exposed upper surface of everything placed so
//! far (the frontier), and repeatedly drops the first shard that fits a
//! frontier edge without trapping anything beneath it.
//!
//! # Example
//!
//! ```
//! use shardfall::{Puzzle, SolveSettings};
//!
//! let puzzle: Puzzle = "2\n0 0 1 0 1 1\n1 1 0 1 0 0\n".parse()?;
//! let solution = puzzle.solve(&SolveSettings::default())?;
//! assert_eq!(solution.ids(), vec![0, 1]);
//! # Ok::<(), shardfall::ShardError>(())
//! ```

pub mod error;
pub mod frontier;
pub mod geometry;
pub mod obstruction;
pub mod puzzle;
pub mod solver;
pub mod start;

pub use error::{Result, ShardError};
pub use frontier::Frontier;
pub use geometry::{compute_border, is_border_edge, Edge, Point, PuzzleBorder, Triangle};
pub use obstruction::{clearance, is_concave, overhang_line, Clearance};
pub use puzzle::{validate_triangles, Puzzle};
pub use solver::{solve, PlacementKind, SolveSettings, SolveStep, Solution, SolverState, Step};
pub use start::{select_starters, Starter};
