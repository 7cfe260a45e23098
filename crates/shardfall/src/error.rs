//! Error types for puzzle loading and solving.

use thiserror::Error;

/// Errors that can occur while loading, validating or solving a puzzle.
#[derive(Error, Debug)]
pub enum ShardError {
    /// I/O error reading or writing a puzzle file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Puzzle file syntax error.
    #[error("parse error at line {line}: {message}")]
    Parse {
        /// Line number (1-indexed).
        line: usize,
        /// Error message.
        message: String,
    },

    /// The puzzle has no triangles, so it has no border.
    #[error("puzzle has no triangles")]
    EmptyPuzzle,

    /// A triangle's edges do not chain into a closed cycle.
    #[error("triangle {id} is not closed: edge {edge} does not end where edge {next} starts")]
    OpenTriangle {
        /// Identifier of the offending triangle.
        id: usize,
        /// Index of the edge whose second endpoint is wrong.
        edge: usize,
        /// Index of the edge that should start there.
        next: usize,
    },

    /// A triangle has a zero-length edge or no area.
    #[error("triangle {id} is degenerate: {reason}")]
    DegenerateTriangle {
        /// Identifier of the offending triangle.
        id: usize,
        /// What is wrong with it.
        reason: String,
    },

    /// Two triangles carry the same identifier.
    #[error("duplicate triangle identifier {0}")]
    DuplicateId(usize),

    /// No triangle on the bottom border can be dropped first.
    #[error("no solution: no triangle on the bottom border can be dropped first")]
    NoStartingTriangle,

    /// No exposed edge accepts any remaining triangle.
    #[error("no solution: the puzzle cannot be solved ({placed} placed, {remaining} remaining)")]
    Unsolvable {
        /// Triangles placed before the solver got stuck.
        placed: usize,
        /// Triangles still waiting to be placed.
        remaining: usize,
    },

    /// The configured step ceiling was reached.
    #[error("step limit of {0} exceeded")]
    StepLimitExceeded(usize),

    /// Invalid solve settings.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

impl ShardError {
    /// Create a parse error.
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    /// Create a degenerate-triangle error.
    pub fn degenerate(id: usize, reason: impl Into<String>) -> Self {
        Self::DegenerateTriangle {
            id,
            reason: reason.into(),
        }
    }

    /// True for the failures that mean the tiling has no drop order.
    pub fn is_unsolvable(&self) -> bool {
        matches!(self, Self::Unsolvable { .. } | Self::NoStartingTriangle)
    }

    /// True for failures caused by malformed input rather than by the search.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::EmptyPuzzle
                | Self::OpenTriangle { .. }
                | Self::DegenerateTriangle { .. }
                | Self::DuplicateId(_)
        )
    }
}

/// Result type for shardfall operations.
pub type Result<T> = std::result::Result<T, ShardError>;
