use std::{fmt::Display, ops::Deref, str::FromStr};

use crate::graph::{CellGraph, CellId};
use crate::grid::{Direction, Geometry, Point};

/// Sequence of moves from the start cell to the goal
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Moves(Vec<Direction>);

impl Moves {
    /// Follow the moves from `start`, returning every coordinate visited
    /// (including `start`). Returns `None` if a move leaves the grid.
    pub fn replay(&self, start: Point, geometry: &Geometry) -> Option<Vec<Point>> {
        let mut points = Vec::with_capacity(self.0.len() + 1);
        points.push(start);

        let mut current = start;
        for direction in &self.0 {
            current = direction.step(current, geometry.rows, geometry.columns)?;
            points.push(current);
        }

        Some(points)
    }
}

impl Deref for Moves {
    type Target = [Direction];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromIterator<Direction> for Moves {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        Moves(iter.into_iter().collect())
    }
}

impl Display for Moves {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for direction in &self.0 {
            write!(f, "{}", direction)?;
        }

        Ok(())
    }
}

impl FromStr for Moves {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .map(|c| c.encode_utf8(&mut [0; 4]).parse())
            .collect()
    }
}

/// Walk the `previous` links from `goal` back to the start and return the moves
/// in start-to-goal order
pub fn reconstruct(graph: &CellGraph, goal: CellId) -> Moves {
    let mut moves: Vec<Direction> = Vec::new();

    let mut current = goal;
    while let Some(previous) = graph[current].previous {
        moves.push(Direction::between(graph[previous].point, graph[current].point));
        current = previous;
    }

    moves.reverse();
    Moves(moves)
}

/// Coordinates of the cells on the discovery path from the start to `goal`
pub fn trail(graph: &CellGraph, goal: CellId) -> Vec<Point> {
    let mut points = vec![graph[goal].point];

    let mut current = goal;
    while let Some(previous) = graph[current].previous {
        points.push(graph[previous].point);
        current = previous;
    }

    points.reverse();
    points
}
