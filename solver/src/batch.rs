use std::{
    fmt::Display,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::Context;
use log::{debug, info, warn};

use crate::config::BatchConfig;
use crate::error::{Result, SolveError};
use crate::graph::CellGraph;
use crate::grid::{Geometry, OccupancyGrid, Point};
use crate::search::{AStar, Ids, Solution, Solver};
use crate::util::load_occupancy;

/// Results of both solvers on one maze
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeReport {
    pub cells: usize,
    pub ids: Result<Solution>,
    pub astar: Result<Solution>,
}

impl MazeReport {
    pub fn is_solved(&self) -> bool {
        self.ids.is_ok() && self.astar.is_ok()
    }
}

fn expansions(outcome: &Result<Solution>) -> usize {
    match outcome {
        Ok(solution) => solution.expansions,
        Err(SolveError::Unsolvable { expansions, .. }) => *expansions,
        Err(_) => 0,
    }
}

/// One output line: `<ids expansions>, <a* expansions>, <ids moves>`
impl Display for MazeReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}, ", expansions(&self.ids), expansions(&self.astar))?;
        match &self.ids {
            Ok(solution) => write!(f, "{}", solution.moves),
            Err(_) => write!(f, "unsolvable"),
        }
    }
}

fn run_solver(solver: &dyn Solver, graph: &CellGraph) -> Result<Solution> {
    let outcome = solver.solve(graph);
    match &outcome {
        Ok(solution) => debug!(
            "{}: {} expansions, {} moves",
            solver.name(),
            solution.expansions,
            solution.moves.len()
        ),
        Err(err) => warn!("{}: {}", solver.name(), err),
    }
    outcome
}

/// Build the cell graph of one maze and run both solvers on it. Only malformed
/// input is an error, an unsolvable maze is reported in the result.
pub fn solve_maze(grid: &OccupancyGrid, geometry: &Geometry, start: Point) -> Result<MazeReport> {
    let graph = CellGraph::build(grid, geometry, start)?;

    Ok(MazeReport {
        cells: graph.len(),
        ids: run_solver(&Ids, &graph),
        astar: run_solver(&AStar, &graph),
    })
}

/// Solve every maze of the batch in order. Unreadable images and malformed
/// geometry abort the whole run.
pub fn run(config: &BatchConfig) -> anyhow::Result<Vec<MazeReport>> {
    let start = config.start();
    info!(
        "solving {} mazes of {}x{} cells from {}",
        config.mazes.len(),
        config.geometry.rows,
        config.geometry.columns,
        start
    );

    let mut reports = Vec::with_capacity(config.mazes.len());
    for path in &config.mazes {
        info!("reading maze image {}", path.display());
        let grid = load_occupancy(path)?;

        let report = solve_maze(&grid, &config.geometry, start)
            .with_context(|| format!("failed to solve {}", path.display()))?;
        info!("{}: {} cells, {}", path.display(), report.cells, report);

        reports.push(report);
    }

    Ok(reports)
}

pub fn write_report(reports: &[MazeReport], mut writer: impl Write) -> std::io::Result<()> {
    for report in reports {
        writeln!(writer, "{}", report)?;
    }
    writer.flush()
}

pub fn write_output(path: impl AsRef<Path>, reports: &[MazeReport]) -> anyhow::Result<()> {
    let path = path.as_ref();
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;

    write_report(reports, BufWriter::new(file))
        .with_context(|| format!("failed to write {}", path.display()))?;

    info!("wrote {} results to {}", reports.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod test {

    use super::*;
    use crate::grid::Direction;

    fn geometry() -> Geometry {
        Geometry {
            rows: 3,
            columns: 3,
            cell_thickness: 6,
            wall_thickness: 2,
        }
    }

    #[test]
    fn test_report_line() {
        let geometry = geometry();
        let start = Point::new(0, 0);
        let mut grid = OccupancyGrid::carve(&geometry);
        grid.open_path(&geometry, start, [Direction::Down, Direction::Down, Direction::Right]);

        let report = solve_maze(&grid, &geometry, start).unwrap();

        assert!(report.is_solved());
        assert_eq!(report.cells, 4);
        assert_eq!(report.to_string(), "3, 4, DDR");
    }

    #[test]
    fn test_unsolvable_report_line() {
        let geometry = geometry();
        let grid = OccupancyGrid::carve(&geometry);

        let report = solve_maze(&grid, &geometry, Point::new(0, 0)).unwrap();

        assert!(!report.is_solved());
        // one IDS expansion per depth bound 3..=8
        assert_eq!(report.to_string(), "6, 1, unsolvable");
    }

    #[test]
    fn test_malformed_geometry_is_fatal() {
        let grid = OccupancyGrid::new(10, 10);

        assert!(matches!(
            solve_maze(&grid, &geometry(), Point::new(0, 0)),
            Err(SolveError::GeometryMismatch { .. })
        ));
    }

    #[test]
    fn test_write_report() {
        let geometry = geometry();
        let start = Point::new(0, 1);
        let mut grid = OccupancyGrid::carve(&geometry);
        grid.open_path(&geometry, start, [Direction::Down, Direction::Down]);

        let reports = vec![
            solve_maze(&grid, &geometry, start).unwrap(),
            solve_maze(&OccupancyGrid::carve(&geometry), &geometry, start).unwrap(),
        ];

        let mut out = Vec::new();
        write_report(&reports, &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "2, 3, DD\n6, 1, unsolvable\n"
        );
    }

    #[test]
    fn test_missing_image_aborts_run() {
        let config = BatchConfig {
            mazes: vec!["does/not/exist.png".into()],
            ..BatchConfig::default()
        };

        assert!(run(&config).is_err());
    }
}
