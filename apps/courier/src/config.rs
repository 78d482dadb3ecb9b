//! TOML configuration for the courier demo.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rb_core::{SimConfig, SimRng};
use rb_spatial::{load_layout_path, parse_layout, Cell, Grid};
use serde::Deserialize;

/// Used when the config names no layout file.
pub const DEFAULT_LAYOUT: &str = include_str!("../layouts/warehouse.txt");

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub sim:        SimConfig,
    /// Text layout file; the built-in warehouse when absent.
    pub layout:     Option<PathBuf>,
    pub output_dir: PathBuf,
    /// Pace ticks in wall-clock time instead of running flat out.
    pub realtime:   bool,
    pub scatter:    Option<ScatterConfig>,
}

/// Extra packages and blockades painted on random empty cells.
#[derive(Debug, Clone, Deserialize)]
pub struct ScatterConfig {
    pub seed:      u64,
    #[serde(default)]
    pub packages:  usize,
    #[serde(default)]
    pub blockades: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sim:        SimConfig::default(),
            layout:     None,
            output_dir: PathBuf::from("output/courier"),
            realtime:   false,
            scatter:    None,
        }
    }
}

impl AppConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(content)?;
        config.sim.validate()?;
        Ok(config)
    }

    /// The authored layout with any scatter applied.
    pub fn load_grid(&self) -> Result<Grid> {
        let mut grid = match &self.layout {
            Some(path) => load_layout_path(path)
                .with_context(|| format!("loading layout {}", path.display()))?,
            None => parse_layout(DEFAULT_LAYOUT)?,
        };
        if let Some(scatter) = &self.scatter {
            let mut rng = SimRng::new(scatter.seed);
            // Blockades first; packages then only land on cells still empty.
            grid.scatter(Cell::Blockade, scatter.blockades, &mut rng.child(0));
            grid.scatter(Cell::Package, scatter.packages, &mut rng.child(1));
        }
        Ok(grid)
    }
}
