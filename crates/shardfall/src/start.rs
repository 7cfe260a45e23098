//! Starting shards: those resting on the floor that shadow nothing.

use tracing::debug;

use crate::frontier::Frontier;
use crate::geometry::{Edge, Triangle};
use crate::obstruction::is_concave;

/// A shard dropped straight onto the bottom border.
#[derive(Debug, Clone)]
pub struct Starter {
    /// The shard.
    pub triangle: Triangle,
    /// Its side lying on the bottom border.
    pub base: Edge,
}

/// Move every safe floor shard out of `remaining`, in scan order.
///
/// A shard qualifies if one of its sides lies on the bottom border and the
/// shard is concave with respect to that side. Each starter's interior sides
/// are pushed onto `frontier`, and sides shared by two starters are cancelled
/// afterwards. Shards that do not qualify stay in `remaining` for the solver.
pub fn select_starters(remaining: &mut Vec<Triangle>, frontier: &mut Frontier) -> Vec<Starter> {
    let border = *frontier.border();
    let mut starters = Vec::new();
    let mut i = 0;

    while i < remaining.len() {
        let base = remaining[i]
            .edges()
            .iter()
            .find(|edge| border.is_bottom_edge(edge) && is_concave(&remaining[i], edge))
            .copied();

        match base {
            Some(base) => {
                let triangle = remaining.remove(i);
                for edge in triangle.edges() {
                    frontier.add_if_interior(*edge);
                }
                debug!(triangle = triangle.id, base = %base, "starting shard");
                starters.push(Starter { triangle, base });
            }
            None => i += 1,
        }
    }

    frontier.cancel_duplicates();
    starters
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point, PuzzleBorder};

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_pinwheel_has_one_starter() {
        let mut remaining = vec![
            Triangle::from_vertices(0, [p(0, 0), p(2, 0), p(1, 1)]),
            Triangle::from_vertices(1, [p(2, 0), p(2, 2), p(1, 1)]),
            Triangle::from_vertices(2, [p(2, 2), p(0, 2), p(1, 1)]),
            Triangle::from_vertices(3, [p(0, 2), p(0, 0), p(1, 1)]),
        ];
        let border = PuzzleBorder::of(&remaining).unwrap();
        let mut frontier = Frontier::new(border);

        let starters = select_starters(&mut remaining, &mut frontier);

        assert_eq!(starters.len(), 1);
        assert_eq!(starters[0].triangle.id, 0);
        assert_eq!(starters[0].base, Edge::new(p(0, 0), p(2, 0)));
        assert_eq!(remaining.len(), 3);
        assert_eq!(
            frontier.lines(),
            &[Edge::new(p(2, 0), p(1, 1)), Edge::new(p(1, 1), p(0, 0))]
        );
    }

    #[test]
    fn test_overhanging_floor_shard_waits() {
        // Triangle 0 leans right over triangle 1's slope.
        let mut remaining = vec![
            Triangle::from_vertices(0, [p(0, 0), p(1, 0), p(3, 2)]),
            Triangle::from_vertices(1, [p(1, 0), p(3, 0), p(3, 2)]),
            Triangle::from_vertices(2, [p(0, 0), p(3, 2), p(0, 2)]),
        ];
        let border = PuzzleBorder::of(&remaining).unwrap();
        let mut frontier = Frontier::new(border);

        let starters = select_starters(&mut remaining, &mut frontier);

        assert_eq!(starters.len(), 1);
        assert_eq!(starters[0].triangle.id, 1);
        assert_eq!(remaining.iter().map(|t| t.id).collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(frontier.lines(), &[Edge::new(p(3, 2), p(1, 0))]);
    }

    #[test]
    fn test_shared_side_between_starters_cancels() {
        let mut remaining = vec![
            Triangle::from_vertices(0, [p(0, 0), p(2, 0), p(2, 2)]),
            Triangle::from_vertices(1, [p(2, 0), p(4, 0), p(2, 2)]),
            Triangle::from_vertices(2, [p(0, 0), p(2, 2), p(0, 2)]),
            Triangle::from_vertices(3, [p(4, 0), p(4, 2), p(2, 2)]),
        ];
        let border = PuzzleBorder::of(&remaining).unwrap();
        let mut frontier = Frontier::new(border);

        let starters = select_starters(&mut remaining, &mut frontier);

        assert_eq!(starters.len(), 2);
        assert_eq!(
            frontier.lines(),
            &[Edge::new(p(2, 2), p(0, 0)), Edge::new(p(4, 0), p(2, 2))]
        );
    }
}
