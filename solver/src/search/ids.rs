use log::trace;

use crate::error::{Result, SolveError};
use crate::graph::{CellGraph, CellId};
use crate::path::reconstruct;
use crate::search::{Solution, Solver};

/// Iterative-deepening depth-first search.
///
/// Runs a depth-limited search from the start cell with the depth bound going
/// from the number of rows up to the number of cells minus one. The expansion
/// count accumulates over all iterations.
#[derive(Copy, Clone, Debug, Default)]
pub struct Ids;

impl Solver for Ids {
    fn name(&self) -> &'static str {
        "IDS"
    }

    fn solve(&self, graph: &CellGraph) -> Result<Solution> {
        let geometry = graph.geometry();
        let first = geometry.rows;
        let last = (geometry.rows * geometry.columns)
            .saturating_sub(1)
            .max(first);

        let mut expansions = 0;
        for limit in first..=last {
            if let Some(goal) = depth_limited(graph, graph.start(), limit, &mut expansions) {
                trace!("IDS reached the goal with depth limit {}", limit);
                return Ok(Solution {
                    goal,
                    expansions,
                    moves: reconstruct(graph, goal),
                });
            }
        }

        Err(SolveError::Unsolvable {
            goal: geometry.goal(),
            expansions,
        })
    }
}

/// Returns the first goal found below `cell`, or `None` if the bound cut off
/// every branch
fn depth_limited(
    graph: &CellGraph,
    cell: CellId,
    limit: usize,
    expansions: &mut usize,
) -> Option<CellId> {
    let current = &graph[cell];
    if current.is_goal() {
        return Some(cell);
    }
    if current.g > limit {
        return None;
    }

    *expansions += 1;

    current
        .successors
        .iter()
        .find_map(|&next| depth_limited(graph, next, limit, expansions))
}

#[cfg(test)]
mod test {

    use super::*;
    use crate::grid::{Direction, Geometry, OccupancyGrid, Point};

    fn geometry(rows: usize, columns: usize) -> Geometry {
        Geometry {
            rows,
            columns,
            cell_thickness: 6,
            wall_thickness: 2,
        }
    }

    fn solve_path(geometry: &Geometry, start: Point, path: &str) -> Result<Solution> {
        let mut grid = OccupancyGrid::carve(geometry);
        let moves: crate::path::Moves = path.parse().unwrap();
        grid.open_path(geometry, start, moves.iter().copied());

        let graph = CellGraph::build(&grid, geometry, start).unwrap();
        Ids.solve(&graph)
    }

    #[test]
    fn test_straight_corridor() {
        let solution = solve_path(&geometry(5, 3), Point::new(0, 1), "DDDD").unwrap();

        assert_eq!(solution.moves.to_string(), "DDDD");
        assert_eq!(solution.expansions, 4);
    }

    #[test]
    fn test_deepens_past_row_count() {
        // the goal is four moves away but the first bound is two
        let solution = solve_path(&geometry(2, 3), Point::new(0, 0), "RRDL").unwrap();

        assert_eq!(solution.moves.to_string(), "RRDL");
        assert_eq!(solution.expansions, 7);
    }

    #[test]
    fn test_open_maze_short_circuits() {
        let geometry = geometry(2, 3);
        let mut grid = OccupancyGrid::carve(&geometry);
        for row in 0..geometry.rows {
            for col in 0..geometry.columns {
                grid.open_passage(&geometry, Point::new(row, col), Direction::Right);
                grid.open_passage(&geometry, Point::new(row, col), Direction::Down);
            }
        }

        let graph = CellGraph::build(&grid, &geometry, Point::new(0, 0)).unwrap();
        let solution = Ids.solve(&graph).unwrap();

        assert_eq!(solution.moves.to_string(), "RD");
        assert_eq!(solution.expansions, 3);
        assert_eq!(graph[solution.goal].g, 2);
    }

    #[test]
    fn test_adjacent_goal() {
        let solution = solve_path(&geometry(2, 3), Point::new(0, 1), "D").unwrap();

        assert_eq!(solution.moves.to_string(), "D");
        assert_eq!(solution.expansions, 1);
    }

    #[test]
    fn test_start_on_goal() {
        let solution = solve_path(&geometry(2, 3), Point::new(1, 1), "").unwrap();

        assert!(solution.moves.is_empty());
        assert_eq!(solution.expansions, 0);
    }

    #[test]
    fn test_single_column() {
        let solution = solve_path(&geometry(3, 1), Point::new(0, 0), "DD").unwrap();

        assert_eq!(solution.moves.to_string(), "DD");
        assert_eq!(solution.expansions, 2);
    }

    #[test]
    fn test_unsolvable() {
        // one expansion of the isolated start per depth bound 2..=5
        assert_eq!(
            solve_path(&geometry(2, 3), Point::new(0, 0), ""),
            Err(SolveError::Unsolvable {
                goal: Point::new(1, 1),
                expansions: 4,
            })
        );
    }
}
