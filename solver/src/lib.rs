//! Solve rasterized mazes: decode the image into an occupancy grid, discover the
//! graph of traversable cells from a start cell, then search it with
//! iterative-deepening DFS and A*.

pub mod batch;
pub mod config;
pub mod error;
pub mod graph;
pub mod grid;
pub mod path;
pub mod search;
pub mod util;

pub use error::SolveError;
pub use graph::{Cell, CellGraph, CellId};
pub use grid::{Direction, Geometry, OccupancyGrid, Point};
pub use path::Moves;
pub use search::{AStar, Ids, Solution, Solver};
