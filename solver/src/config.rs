use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::grid::{Geometry, Point};

/// Which mazes to solve and where to write the results
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)] // missing fields fall back to the stock batch
pub struct BatchConfig {
    /// maze images, solved and reported in this order
    pub mazes: Vec<PathBuf>,
    pub output: PathBuf,
    pub geometry: Geometry,
    /// defaults to the middle of the top row
    pub start: Option<Point>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            mazes: (1..=5)
                .map(|index| PathBuf::from(format!("./maze{}.png", index)))
                .collect(),
            output: PathBuf::from("./output.txt"),
            geometry: Geometry::default(),
            start: None,
        }
    }
}

impl BatchConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, anyhow::Error> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;

        Self::from_json(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self, anyhow::Error> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn start(&self) -> Point {
        self.start
            .unwrap_or_else(|| Point::new(0, self.geometry.columns.saturating_sub(1) / 2))
    }
}
