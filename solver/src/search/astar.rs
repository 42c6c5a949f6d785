use std::{cmp::Ordering, collections::BinaryHeap};

use crate::error::{Result, SolveError};
use crate::graph::{CellGraph, CellId};
use crate::path::reconstruct;
use crate::search::{Solution, Solver};

/// The objects that we store in the priority queue
#[derive(Debug)]
struct ToVisit {
    /// g + h of the cell
    cost: usize,
    /// push sequence number, earlier pushes win ties
    order: usize,
    cell: CellId,
}

impl Ord for ToVisit {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.cost
            .cmp(&other.cost)
            .then_with(|| self.order.cmp(&other.order))
            .reverse() // reverse for BinaryHeap to be a min-heap
    }
}

impl PartialOrd for ToVisit {
    fn partial_cmp(&self, other: &ToVisit) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ToVisit {
    fn eq(&self, other: &ToVisit) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ToVisit {}

/// Best-first search ranking the frontier by `g + h`.
///
/// Every push onto the frontier counts as one expansion, the initial push of
/// the start cell included.
#[derive(Copy, Clone, Debug, Default)]
pub struct AStar;

impl Solver for AStar {
    fn name(&self) -> &'static str {
        "A*"
    }

    fn solve(&self, graph: &CellGraph) -> Result<Solution> {
        let start = graph.start();

        let mut visit_list: BinaryHeap<ToVisit> = BinaryHeap::with_capacity(graph.len());
        visit_list.push(ToVisit {
            cost: graph[start].f(),
            order: 0,
            cell: start,
        });
        let mut expansions = 1;

        let mut current = start;
        while !graph[current].is_goal() {
            let Some(visit) = visit_list.pop() else {
                return Err(SolveError::Unsolvable {
                    goal: graph.geometry().goal(),
                    expansions,
                });
            };

            current = visit.cell;
            for &next in &graph[current].successors {
                visit_list.push(ToVisit {
                    cost: graph[next].f(),
                    order: expansions,
                    cell: next,
                });
                expansions += 1;
            }
        }

        Ok(Solution {
            goal: current,
            expansions,
            moves: reconstruct(graph, current),
        })
    }
}
