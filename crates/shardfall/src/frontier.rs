//! The exposed upper surface of the shards placed so far.

use crate::geometry::{Edge, PuzzleBorder};

/// Ordered multiset of exposed, non-border edges ("boundary lines").
///
/// Entries keep insertion order because the solver scans them front to back
/// and the first acceptable match wins.
#[derive(Debug, Clone)]
pub struct Frontier {
    border: PuzzleBorder,
    lines: Vec<Edge>,
}

impl Frontier {
    /// Create an empty frontier inside `border`.
    pub fn new(border: PuzzleBorder) -> Self {
        Self {
            border,
            lines: Vec::new(),
        }
    }

    /// The border used to filter additions.
    pub fn border(&self) -> &PuzzleBorder {
        &self.border
    }

    /// Current entries in scan order.
    pub fn lines(&self) -> &[Edge] {
        &self.lines
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Is nothing exposed?
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Is an edge equal to `edge` exposed?
    pub fn contains(&self, edge: &Edge) -> bool {
        self.lines.contains(edge)
    }

    /// Add `edge` unless it lies on the border. Returns whether it was added.
    pub fn add_if_interior(&mut self, edge: Edge) -> bool {
        if self.border.is_border_edge(&edge) {
            return false;
        }
        self.lines.push(edge);
        true
    }

    /// Remove the first entry equal to `edge`, if any.
    pub fn remove_match(&mut self, edge: &Edge) -> Option<Edge> {
        let index = self.lines.iter().position(|e| e == edge)?;
        Some(self.lines.remove(index))
    }

    /// Remove every entry equal to `edge`. Returns how many were removed.
    pub fn remove_all(&mut self, edge: &Edge) -> usize {
        let before = self.lines.len();
        self.lines.retain(|e| e != edge);
        before - self.lines.len()
    }

    /// Remove the entry at `index`.
    pub(crate) fn remove_at(&mut self, index: usize) -> Edge {
        self.lines.remove(index)
    }

    /// Drop both copies of every pair of equal entries.
    ///
    /// A pair means two placed shards are glued along that edge, so it is no
    /// longer part of the exposed surface. Survivors keep their order.
    pub fn cancel_duplicates(&mut self) {
        let mut i = 0;
        while i < self.lines.len() {
            let twin = (i + 1..self.lines.len()).find(|&j| self.lines[j] == self.lines[i]);
            match twin {
                Some(j) => {
                    self.lines.remove(j);
                    self.lines.remove(i);
                }
                None => i += 1,
            }
        }
    }
}
