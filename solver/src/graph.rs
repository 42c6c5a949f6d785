//! Discovery of the traversable cells of a maze image.
//!
//! The graph is built eagerly from the start cell with a depth-first scan over
//! the neighbours of each cell (left, right, up, down). A neighbour is only
//! instantiated when the path through the current cell is strictly cheaper
//! than the best cost recorded for its coordinate so far. This keeps the
//! construction finite, but it is not a full shortest-path relaxation: when a
//! cheaper route to an already expanded coordinate turns up later, a new cell
//! is created for it while the more expensive one (and its subtree) stays in
//! the graph. On loop-free mazes every coordinate ends up with exactly one
//! optimal cell.

use std::ops::Index;

use log::debug;

use crate::error::{Result, SolveError};
use crate::grid::{Direction, Geometry, GridStorage, OccupancyGrid, Point};

/// Handle to a cell inside a [`CellGraph`]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct CellId(usize);

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Cell {
    pub point: Point,
    /// number of moves from the start along the discovery path
    pub g: usize,
    /// Manhattan distance to the goal
    pub h: usize,
    /// the cell this one was discovered from, `None` for the start
    pub previous: Option<CellId>,
    pub successors: Vec<CellId>,
}

impl Cell {
    pub fn is_goal(&self) -> bool {
        self.h == 0
    }

    pub fn is_start(&self) -> bool {
        self.previous.is_none()
    }

    /// Estimated total cost of a path to the goal through this cell
    pub fn f(&self) -> usize {
        self.g + self.h
    }
}

#[derive(Debug)]
pub struct CellGraph {
    geometry: Geometry,
    cells: Vec<Cell>,
    best_cost: GridStorage<usize>,
}

impl CellGraph {
    /// Discover every cell reachable from `start` in the maze pictured by `grid`
    pub fn build(grid: &OccupancyGrid, geometry: &Geometry, start: Point) -> Result<Self> {
        grid.check_geometry(geometry)?;
        if !geometry.contains(start) {
            return Err(SolveError::StartOutOfBounds {
                start,
                rows: geometry.rows,
                columns: geometry.columns,
            });
        }

        // upper bound on the length of any path through the maze
        let unreached = geometry.rows * geometry.columns;
        let mut best_cost = GridStorage::new(geometry.rows, geometry.columns, unreached);
        *best_cost.get_mut(start) = 0;

        let mut cells = vec![Cell {
            point: start,
            g: 0,
            h: geometry.heuristic(start),
            previous: None,
            successors: Vec::new(),
        }];

        // each frame is a cell and the index of the next direction to scan
        let mut stack = vec![(CellId(0), 0)];

        while let Some(frame) = stack.last_mut() {
            let (id, next) = *frame;
            let Some(&direction) = Direction::SCAN_ORDER.get(next) else {
                stack.pop();
                continue;
            };
            frame.1 += 1;

            let point = cells[id.0].point;
            let g = cells[id.0].g + 1;

            let Some(neighbor) = direction.step(point, geometry.rows, geometry.columns) else {
                continue;
            };
            if best_cost.get(neighbor) <= g || !is_passage(grid, geometry, point, direction) {
                continue;
            }

            *best_cost.get_mut(neighbor) = g;

            let child = CellId(cells.len());
            cells.push(Cell {
                point: neighbor,
                g,
                h: geometry.heuristic(neighbor),
                previous: Some(id),
                successors: Vec::new(),
            });
            cells[id.0].successors.push(child);
            stack.push((child, 0));
        }

        debug!(
            "built cell graph with {} cells from start {}",
            cells.len(),
            start
        );

        Ok(Self {
            geometry: *geometry,
            cells,
            best_cost,
        })
    }

    pub fn start(&self) -> CellId {
        CellId(0)
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Lowest cost at which each coordinate was reached during construction
    pub fn best_cost(&self) -> &GridStorage<usize> {
        &self.best_cost
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CellId, &Cell)> {
        self.cells
            .iter()
            .enumerate()
            .map(|(index, cell)| (CellId(index), cell))
    }
}

impl Index<CellId> for CellGraph {
    type Output = Cell;

    fn index(&self, id: CellId) -> &Self::Output {
        &self.cells[id.0]
    }
}

/// Two-pixel probe from the center of `cell` towards its neighbour. The pixel
/// half a cell away and the one right after it must both be open, so a single
/// misclassified pixel on a wall boundary does not connect two cells.
fn is_passage(
    grid: &OccupancyGrid,
    geometry: &Geometry,
    cell: Point,
    direction: Direction,
) -> bool {
    let center = geometry.center(cell);
    let half = geometry.cell_thickness / 2;

    let probe = |offset: usize| -> Option<Point> {
        match direction {
            Direction::Left => Some(Point::new(
                center.row,
                center.col.checked_sub(half + offset)?,
            )),
            Direction::Right => Some(Point::new(center.row, center.col + half + offset)),
            Direction::Up => Some(Point::new(
                center.row.checked_sub(half + offset)?,
                center.col,
            )),
            Direction::Down => Some(Point::new(center.row + half + offset, center.col)),
        }
    };

    [0, 1]
        .into_iter()
        .all(|offset| probe(offset).is_some_and(|pixel| grid.is_open(pixel)))
}
