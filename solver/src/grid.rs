use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SolveError};

/// A position on either the cell grid or the pixel grid, `row` grows downward
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub row: usize,
    pub col: usize,
}

impl Point {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Manhattan distance between two points
    pub fn manhattan(&self, other: Point) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// The order in which neighbours are scanned when building the graph
    pub const SCAN_ORDER: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Return the neighbour of `point` in this direction if it stays inside a
    /// `rows` x `columns` grid
    pub fn step(&self, point: Point, rows: usize, columns: usize) -> Option<Point> {
        let next = match self {
            Direction::Left => Point::new(point.row, point.col.checked_sub(1)?),
            Direction::Right => Point::new(point.row, point.col + 1),
            Direction::Up => Point::new(point.row.checked_sub(1)?, point.col),
            Direction::Down => Point::new(point.row + 1, point.col),
        };

        (next.row < rows && next.col < columns).then_some(next)
    }

    /// The direction of the move that leads from `from` to the adjacent `to`
    pub fn between(from: Point, to: Point) -> Direction {
        if from.row < to.row {
            Direction::Down
        } else if from.row > to.row {
            Direction::Up
        } else if from.col > to.col {
            Direction::Left
        } else {
            Direction::Right
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Direction::Left => "L",
                Direction::Right => "R",
                Direction::Up => "U",
                Direction::Down => "D",
            }
        )
    }
}

impl FromStr for Direction {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "L" => Ok(Direction::Left),
            "R" => Ok(Direction::Right),
            "U" => Ok(Direction::Up),
            "D" => Ok(Direction::Down),
            _ => Err(anyhow::anyhow!("Invalid direction: {}", s)),
        }
    }
}

/// Layout of the maze image: a `rows` x `columns` grid of square cells, each
/// `cell_thickness` pixels wide, separated and surrounded by walls that are
/// `wall_thickness` pixels wide
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Geometry {
    pub rows: usize,
    pub columns: usize,
    pub cell_thickness: usize,
    pub wall_thickness: usize,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            rows: 50,
            columns: 51,
            cell_thickness: 14,
            wall_thickness: 2,
        }
    }
}

impl Geometry {
    /// Distance in pixels between the origins of two adjacent cells
    pub fn pitch(&self) -> usize {
        self.cell_thickness + self.wall_thickness
    }

    pub fn pixel_width(&self) -> usize {
        self.columns * self.pitch() + self.wall_thickness
    }

    pub fn pixel_height(&self) -> usize {
        self.rows * self.pitch() + self.wall_thickness
    }

    pub fn contains(&self, point: Point) -> bool {
        point.row < self.rows && point.col < self.columns
    }

    /// The goal is fixed at the middle of the bottom row
    pub fn goal(&self) -> Point {
        Point::new(self.rows.saturating_sub(1), self.columns / 2)
    }

    /// Manhattan distance from `point` to the goal
    pub fn heuristic(&self, point: Point) -> usize {
        point.manhattan(self.goal())
    }

    /// Pixel at the center of a cell
    pub fn center(&self, cell: Point) -> Point {
        let pitch = self.pitch();
        Point::new(pitch * cell.row + pitch / 2, pitch * cell.col + pitch / 2)
    }

    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.columns == 0 {
            return Err(SolveError::InvalidGeometry(format!(
                "cell grid must not be empty, got {}x{}",
                self.rows, self.columns
            )));
        }
        if self.cell_thickness < 2 || self.wall_thickness == 0 {
            return Err(SolveError::InvalidGeometry(format!(
                "cells must be at least 2 px and walls at least 1 px thick, got {} px and {} px",
                self.cell_thickness, self.wall_thickness
            )));
        }
        // offsets within one pitch: wall at [0, wall), cell interior after it
        let pitch = self.pitch();
        let center = pitch / 2;
        let half = self.cell_thickness / 2;
        let wall = 0..self.wall_thickness;

        let centered = center >= self.wall_thickness && center < pitch;
        let backward = center > half
            && wall.contains(&(center - half))
            && wall.contains(&(center - half - 1));
        let forward = (pitch..pitch + self.wall_thickness).contains(&(center + half + 1));

        if !(centered && backward && forward) {
            return Err(SolveError::InvalidGeometry(format!(
                "a {} px cell with {} px walls does not put the neighbour probe on the wall",
                self.cell_thickness, self.wall_thickness
            )));
        }

        Ok(())
    }
}

/// Binary classification of every pixel of a maze image, `true` is open space
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OccupancyGrid {
    width: usize,
    height: usize,
    pixels: Vec<bool>,
}

impl OccupancyGrid {
    /// Create a grid where every pixel is a wall
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![false; width * height],
        }
    }

    /// Render a maze where every cell interior is open and every wall is closed
    pub fn carve(geometry: &Geometry) -> Self {
        let mut grid = Self::new(geometry.pixel_width(), geometry.pixel_height());

        for row in 0..geometry.rows {
            for col in 0..geometry.columns {
                let top = geometry.pitch() * row + geometry.wall_thickness;
                let left = geometry.pitch() * col + geometry.wall_thickness;
                grid.fill(
                    top..top + geometry.cell_thickness,
                    left..left + geometry.cell_thickness,
                );
            }
        }

        grid
    }

    /// Open the wall between `cell` and its neighbour in `direction`. Returns the
    /// neighbour, or `None` if it would lie outside the cell grid.
    pub fn open_passage(
        &mut self,
        geometry: &Geometry,
        cell: Point,
        direction: Direction,
    ) -> Option<Point> {
        let neighbor = direction.step(cell, geometry.rows, geometry.columns)?;

        // always open the wall on the right of / below the upper-left cell
        let (origin, horizontal) = match direction {
            Direction::Left => (neighbor, true),
            Direction::Right => (cell, true),
            Direction::Up => (neighbor, false),
            Direction::Down => (cell, false),
        };

        let pitch = geometry.pitch();
        if horizontal {
            let top = pitch * origin.row + geometry.wall_thickness;
            let left = pitch * (origin.col + 1);
            self.fill(
                top..top + geometry.cell_thickness,
                left..left + geometry.wall_thickness,
            );
        } else {
            let top = pitch * (origin.row + 1);
            let left = pitch * origin.col + geometry.wall_thickness;
            self.fill(
                top..top + geometry.wall_thickness,
                left..left + geometry.cell_thickness,
            );
        }

        Some(neighbor)
    }

    /// Open every passage along a walk from `start`, stopping early at the border.
    /// Returns the last cell reached.
    pub fn open_path(
        &mut self,
        geometry: &Geometry,
        start: Point,
        moves: impl IntoIterator<Item = Direction>,
    ) -> Point {
        let mut current = start;
        for direction in moves {
            match self.open_passage(geometry, current, direction) {
                Some(next) => current = next,
                None => break,
            }
        }
        current
    }

    fn fill(&mut self, rows: std::ops::Range<usize>, cols: std::ops::Range<usize>) {
        for row in rows {
            for col in cols.clone() {
                self.set(Point::new(row, col), true);
            }
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Pixels outside the grid count as walls
    pub fn is_open(&self, pixel: Point) -> bool {
        pixel.row < self.height && pixel.col < self.width && self.pixels[self.index(pixel)]
    }

    pub fn set(&mut self, pixel: Point, open: bool) {
        if pixel.row < self.height && pixel.col < self.width {
            let index = self.index(pixel);
            self.pixels[index] = open;
        }
    }

    fn index(&self, pixel: Point) -> usize {
        pixel.row * self.width + pixel.col
    }

    /// Check that this grid is the image of a maze with the given geometry
    pub fn check_geometry(&self, geometry: &Geometry) -> Result<()> {
        geometry.validate()?;

        if self.width != geometry.pixel_width() || self.height != geometry.pixel_height() {
            return Err(SolveError::GeometryMismatch {
                expected_width: geometry.pixel_width(),
                expected_height: geometry.pixel_height(),
                actual_width: self.width,
                actual_height: self.height,
            });
        }

        Ok(())
    }
}

impl Display for OccupancyGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..self.height {
            for col in 0..self.width {
                write!(
                    f,
                    "{}",
                    if self.is_open(Point::new(row, col)) {
                        " "
                    } else {
                        "X"
                    }
                )?;
            }
            write!(f, "\n")?;
        }

        Ok(())
    }
}

/// One value per cell of a rectangular grid, stored row-major in a single vec
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GridStorage<T> {
    columns: usize,
    values: Vec<T>,
}

impl<T: Copy> GridStorage<T> {
    pub fn new(rows: usize, columns: usize, value: T) -> Self {
        Self {
            columns,
            values: vec![value; rows * columns],
        }
    }

    pub fn get(&self, node: Point) -> T {
        self.values[node.row * self.columns + node.col]
    }

    pub fn get_mut(&mut self, node: Point) -> &mut T {
        &mut self.values[node.row * self.columns + node.col]
    }
}

impl<T: Display> Display for GridStorage<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.values.chunks(self.columns.max(1)) {
            for cell in row {
                write!(f, "{:03} ", cell)?;
            }
            write!(f, "\n")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {

    use super::*;

    fn small_geometry() -> Geometry {
        Geometry {
            rows: 2,
            columns: 3,
            cell_thickness: 6,
            wall_thickness: 2,
        }
    }

    #[test]
    fn test_default_geometry_dimensions() {
        let geometry = Geometry::default();

        assert_eq!(geometry.pixel_width(), 51 * 16 + 2);
        assert_eq!(geometry.pixel_height(), 50 * 16 + 2);
        assert_eq!(geometry.goal(), Point::new(49, 25));
        assert_eq!(geometry.heuristic(Point::new(0, 25)), 49);
    }

    #[test]
    fn test_heuristic_uses_integer_division() {
        let geometry = Geometry {
            columns: 4,
            ..small_geometry()
        };

        assert_eq!(geometry.goal(), Point::new(1, 2));
        assert_eq!(geometry.heuristic(Point::new(0, 0)), 3);
        assert_eq!(geometry.heuristic(Point::new(1, 3)), 1);
    }

    #[test]
    fn test_direction_step_respects_bounds() {
        let origin = Point::new(0, 0);

        assert_eq!(Direction::Left.step(origin, 2, 3), None);
        assert_eq!(Direction::Up.step(origin, 2, 3), None);
        assert_eq!(Direction::Right.step(origin, 2, 3), Some(Point::new(0, 1)));
        assert_eq!(Direction::Down.step(origin, 2, 3), Some(Point::new(1, 0)));
        assert_eq!(Direction::Down.step(Point::new(1, 2), 2, 3), None);
        assert_eq!(Direction::Right.step(Point::new(1, 2), 2, 3), None);
    }

    #[test]
    fn test_direction_letters() {
        for direction in Direction::SCAN_ORDER {
            let parsed: Direction = direction.to_string().parse().unwrap();
            assert_eq!(parsed, direction);
        }
        assert!("x".parse::<Direction>().is_err());
    }

    #[test]
    fn test_carve_opens_cell_interiors_only() {
        let geometry = small_geometry();
        let grid = OccupancyGrid::carve(&geometry);

        assert_eq!(grid.width(), 26);
        assert_eq!(grid.height(), 18);

        // the center of every cell is open, the wall column between them is not
        assert!(grid.is_open(geometry.center(Point::new(0, 0))));
        assert!(grid.is_open(geometry.center(Point::new(1, 2))));
        assert!(!grid.is_open(Point::new(4, 8)));
        assert!(!grid.is_open(Point::new(0, 4)));
    }

    #[test]
    fn test_open_passage() {
        let geometry = small_geometry();
        let mut grid = OccupancyGrid::carve(&geometry);

        assert_eq!(
            grid.open_passage(&geometry, Point::new(0, 1), Direction::Left),
            Some(Point::new(0, 0))
        );
        assert!(grid.is_open(Point::new(4, 8)));
        assert!(grid.is_open(Point::new(4, 9)));

        assert_eq!(
            grid.open_passage(&geometry, Point::new(0, 0), Direction::Up),
            None
        );
    }

    #[test]
    fn test_check_geometry() {
        let geometry = small_geometry();
        let grid = OccupancyGrid::carve(&geometry);

        assert!(grid.check_geometry(&geometry).is_ok());

        let wider = Geometry {
            columns: 4,
            ..geometry
        };
        assert!(matches!(
            grid.check_geometry(&wider),
            Err(SolveError::GeometryMismatch {
                expected_width: 34,
                actual_width: 26,
                ..
            })
        ));

        let thin = Geometry {
            cell_thickness: 1,
            ..geometry
        };
        assert!(matches!(
            grid.check_geometry(&thin),
            Err(SolveError::InvalidGeometry(_))
        ));

        // the far probe pixel must reach the next wall, otherwise every
        // right and down neighbour looks connected
        for (cell_thickness, wall_thickness) in [(14, 3), (15, 2), (14, 4)] {
            let skewed = Geometry {
                rows: 1,
                columns: 2,
                cell_thickness,
                wall_thickness,
            };
            let closed = OccupancyGrid::carve(&skewed);
            assert!(matches!(
                closed.check_geometry(&skewed),
                Err(SolveError::InvalidGeometry(_))
            ));
        }

        assert!(Geometry::default().validate().is_ok());
    }

    #[test]
    fn test_out_of_range_pixels_are_walls() {
        let mut grid = OccupancyGrid::new(2, 2);
        grid.set(Point::new(1, 1), true);
        grid.set(Point::new(5, 5), true);

        assert!(grid.is_open(Point::new(1, 1)));
        assert!(!grid.is_open(Point::new(5, 5)));
        assert_eq!(grid.to_string(), "XX\nX \n");
    }

    #[test]
    fn test_grid_storage() {
        let mut storage = GridStorage::new(2, 2, 7usize);
        *storage.get_mut(Point::new(1, 0)) = 3;

        assert_eq!(storage.get(Point::new(1, 0)), 3);
        assert_eq!(storage.get(Point::new(0, 1)), 7);
        assert_eq!(storage.to_string(), "007 007 \n003 007 \n");
    }
}
