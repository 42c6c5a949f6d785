use crate::error::Result;
use crate::graph::{CellGraph, CellId};
use crate::path::Moves;

pub mod astar;
pub mod ids;

pub use astar::AStar;
pub use ids::Ids;

/// Outcome of a successful search
#[derive(Debug, PartialEq, Clone, Eq)]
pub struct Solution {
    pub goal: CellId,
    /// number of nodes the search expanded, as counted by the strategy
    pub expansions: usize,
    pub moves: Moves,
}

/// A search strategy over a prebuilt cell graph
pub trait Solver {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Search from the start cell of `graph` to a goal cell. Exhausting the
    /// search space yields [`SolveError::Unsolvable`](crate::SolveError::Unsolvable).
    fn solve(&self, graph: &CellGraph) -> Result<Solution>;
}
