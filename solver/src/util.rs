use std::path::Path;

use anyhow::Context;
use image::{DynamicImage, GenericImageView};

use crate::grid::{OccupancyGrid, Point};

/// Classify every pixel of `img`: only pure white counts as open space, any
/// other color is a wall
pub fn parse_img(img: &DynamicImage) -> Result<OccupancyGrid, anyhow::Error> {
    let width = img.width() as usize;
    let height = img.height() as usize;

    let mut grid = OccupancyGrid::new(width, height);

    for row in 0..height {
        for col in 0..width {
            let [r, g, b, _] = img.get_pixel(col as u32, row as u32).0;
            let sum = r as u32 + g as u32 + b as u32;

            grid.set(Point::new(row, col), sum / (3 * 255) == 1);
        }
    }

    Ok(grid)
}

pub fn load_occupancy(path: impl AsRef<Path>) -> Result<OccupancyGrid, anyhow::Error> {
    let path = path.as_ref();
    let img = image::open(path)
        .with_context(|| format!("failed to read maze image {}", path.display()))?;

    parse_img(&img)
}
