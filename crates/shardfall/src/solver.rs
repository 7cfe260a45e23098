//! The insertion state machine.
//!
//! State is `(remaining, frontier, placed)`. Each step scans frontier lines
//! (outer), remaining shards (middle) and each shard's sides (inner), and
//! commits the first side that matches a frontier line and passes the
//! obstruction test. Commitments are never revisited.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use crate::error::{Result, ShardError};
use crate::frontier::Frontier;
use crate::geometry::{Edge, PuzzleBorder, Triangle};
use crate::obstruction::{clearance, Clearance};
use crate::puzzle::validate_triangles;
use crate::start::{select_starters, Starter};

/// Solve parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SolveSettings {
    /// Reject open or degenerate shards and duplicate ids before solving.
    pub validate_input: bool,
    /// Give up after this many insertions (starting shards not counted).
    pub max_steps: Option<usize>,
    /// Keep a snapshot of every placement in [`Solution::steps`].
    pub record_trace: bool,
}

impl Default for SolveSettings {
    fn default() -> Self {
        Self {
            validate_input: true,
            max_steps: None,
            record_trace: false,
        }
    }
}

impl SolveSettings {
    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        if self.max_steps == Some(0) {
            return Err(ShardError::InvalidSettings(
                "max_steps must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// How a shard entered the solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementKind {
    /// Dropped onto the floor before the search started.
    Start,
    /// Dropped onto an exposed frontier line.
    Insert,
}

/// One placement, with the frontier as it stood afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveStep {
    /// Identifier of the placed shard.
    pub triangle: usize,
    /// Starting shard or insertion.
    pub kind: PlacementKind,
    /// The edge the shard landed on (its floor side for starting shards).
    pub contact: Edge,
    /// The obstructed line that had to be exposed already, if the shard
    /// overhangs.
    pub obstructed: Option<Edge>,
    /// Frontier after the placement. Starting shards all report the frontier
    /// left once every starter is down.
    pub frontier: Vec<Edge>,
}

/// Outcome of a single state-machine step.
#[derive(Debug, Clone)]
pub enum Step {
    /// A shard was placed.
    Placed(SolveStep),
    /// Every shard is placed and nothing is exposed.
    Done,
}

/// A complete drop order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    /// Shards in the order they are dropped.
    pub order: Vec<Triangle>,
    /// Per-placement snapshots, when tracing was requested.
    pub steps: Vec<SolveStep>,
}

impl Solution {
    /// Identifiers in drop order.
    pub fn ids(&self) -> Vec<usize> {
        self.order.iter().map(|t| t.id).collect()
    }

    /// Number of shards placed.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Is the order empty?
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
struct Transition {
    frontier_index: usize,
    triangle_index: usize,
    edge_index: usize,
    clearance: Clearance,
}

/// Solver state owned by a single solve.
#[derive(Debug, Clone)]
pub struct SolverState {
    border: PuzzleBorder,
    remaining: Vec<Triangle>,
    frontier: Frontier,
    placed: Vec<Triangle>,
    starters: Vec<Starter>,
}

impl SolverState {
    /// Compute the border and drop the starting shards.
    pub fn new(triangles: Vec<Triangle>) -> Result<Self> {
        let border = PuzzleBorder::of(&triangles)?;
        let mut remaining = triangles;
        let mut frontier = Frontier::new(border);
        let starters = select_starters(&mut remaining, &mut frontier);
        let placed = starters.iter().map(|s| s.triangle.clone()).collect();

        Ok(Self {
            border,
            remaining,
            frontier,
            placed,
            starters,
        })
    }

    /// The puzzle border.
    pub fn border(&self) -> &PuzzleBorder {
        &self.border
    }

    /// Exposed lines.
    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    /// Shards not yet placed, in scan order.
    pub fn remaining(&self) -> &[Triangle] {
        &self.remaining
    }

    /// Shards placed so far, in drop order.
    pub fn placed(&self) -> &[Triangle] {
        &self.placed
    }

    /// The starting shards chosen at construction.
    pub fn starters(&self) -> &[Starter] {
        &self.starters
    }

    /// Everything placed and nothing exposed.
    pub fn is_finished(&self) -> bool {
        self.frontier.is_empty() && self.remaining.is_empty()
    }

    /// Snapshots for the starting shards.
    pub fn starter_steps(&self) -> Vec<SolveStep> {
        self.starters
            .iter()
            .map(|s| SolveStep {
                triangle: s.triangle.id,
                kind: PlacementKind::Start,
                contact: s.base,
                obstructed: None,
                frontier: self.frontier.lines().to_vec(),
            })
            .collect()
    }

    /// Perform one transition.
    pub fn step(&mut self) -> Result<Step> {
        if self.frontier.is_empty() {
            if self.remaining.is_empty() {
                return Ok(Step::Done);
            }
            if self.placed.is_empty() {
                warn!(remaining = self.remaining.len(), "no starting shard");
                return Err(ShardError::NoStartingTriangle);
            }
            return Err(self.stuck());
        }

        match self.find_transition() {
            Some(transition) => Ok(Step::Placed(self.commit(transition))),
            None => Err(self.stuck()),
        }
    }

    fn stuck(&self) -> ShardError {
        warn!(
            placed = self.placed.len(),
            remaining = self.remaining.len(),
            frontier = self.frontier.len(),
            "puzzle cannot be solved"
        );
        ShardError::Unsolvable {
            placed: self.placed.len(),
            remaining: self.remaining.len(),
        }
    }

    fn find_transition(&self) -> Option<Transition> {
        for (frontier_index, line) in self.frontier.lines().iter().enumerate() {
            for (triangle_index, triangle) in self.remaining.iter().enumerate() {
                for (edge_index, edge) in triangle.edges().iter().enumerate() {
                    if edge != line {
                        continue;
                    }
                    let verdict = clearance(&self.frontier, triangle, edge);
                    if let Clearance::Blocked(obstructed) = verdict {
                        trace!(
                            triangle = triangle.id,
                            contact = %edge,
                            obstructed = %obstructed,
                            "would block a later shard"
                        );
                        continue;
                    }
                    return Some(Transition {
                        frontier_index,
                        triangle_index,
                        edge_index,
                        clearance: verdict,
                    });
                }
            }
        }
        None
    }

    fn commit(&mut self, transition: Transition) -> SolveStep {
        let contact = self.frontier.remove_at(transition.frontier_index);
        let triangle = self.remaining.remove(transition.triangle_index);

        for edge in triangle.other_edges(transition.edge_index) {
            self.frontier.add_if_interior(edge);
        }
        let obstructed = transition.clearance.obstructed();
        if let Some(line) = obstructed {
            self.frontier.remove_all(&line);
        }
        self.frontier.cancel_duplicates();

        debug!(
            step = self.placed.len(),
            triangle = triangle.id,
            contact = %contact,
            obstructed = ?obstructed,
            frontier = self.frontier.len(),
            "placed shard"
        );

        let step = SolveStep {
            triangle: triangle.id,
            kind: PlacementKind::Insert,
            contact,
            obstructed,
            frontier: self.frontier.lines().to_vec(),
        };
        self.placed.push(triangle);
        step
    }

    /// Consume the state, returning the placed shards in order.
    pub fn into_order(self) -> Vec<Triangle> {
        self.placed
    }
}

/// Find a drop order for `triangles`.
///
/// Fails with [`ShardError::Unsolvable`] or [`ShardError::NoStartingTriangle`]
/// when no order exists under the greedy rule; partial orders are discarded.
pub fn solve(triangles: &[Triangle], settings: &SolveSettings) -> Result<Solution> {
    settings.validate()?;
    if settings.validate_input {
        validate_triangles(triangles)?;
    }

    let mut state = SolverState::new(triangles.to_vec())?;
    let mut steps = if settings.record_trace {
        state.starter_steps()
    } else {
        Vec::new()
    };

    let mut inserted = 0;
    loop {
        if let Some(limit) = settings.max_steps {
            if inserted >= limit && !state.is_finished() {
                warn!(limit, "step limit reached");
                return Err(ShardError::StepLimitExceeded(limit));
            }
        }
        match state.step()? {
            Step::Done => break,
            Step::Placed(step) => {
                inserted += 1;
                if settings.record_trace {
                    steps.push(step);
                }
            }
        }
    }

    info!(triangles = triangles.len(), "puzzle solved");
    Ok(Solution {
        order: state.into_order(),
        steps,
    })
}
