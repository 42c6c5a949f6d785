use thiserror::Error;

use crate::grid::Point;

/// Errors raised while building or searching a cell graph
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error(
        "occupancy grid is {actual_width}x{actual_height} pixels, geometry expects {expected_width}x{expected_height}"
    )]
    GeometryMismatch {
        expected_width: usize,
        expected_height: usize,
        actual_width: usize,
        actual_height: usize,
    },

    #[error("start {start} lies outside the {rows}x{columns} cell grid")]
    StartOutOfBounds {
        start: Point,
        rows: usize,
        columns: usize,
    },

    #[error("no path to goal {goal} after {expansions} expansions")]
    Unsolvable { goal: Point, expansions: usize },
}

pub type Result<T> = std::result::Result<T, SolveError>;
