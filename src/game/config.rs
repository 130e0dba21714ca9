use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::grid::{Grid, Position};

/// Largest playfield accepted by [`GameConfig::validate`]
pub const MAX_CELLS: usize = 1 << 20;

/// An RGB color triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const GREEN: Rgb = Rgb(0, 255, 0);
    pub const RED: Rgb = Rgb(255, 0, 0);
}

/// Colors used for each kind of cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub snake: Rgb,
    pub food: Rgb,
    pub background: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            snake: Rgb::GREEN,
            food: Rgb::RED,
            background: Rgb::BLACK,
        }
    }
}

/// Configuration for the game
///
/// Passed by value into [`GameEngine::new`](super::GameEngine::new); there is
/// no process-wide state, so independent games can coexist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid, in cells
    pub grid_width: usize,
    /// Height of the game grid, in cells
    pub grid_height: usize,
    /// Side of one cell in pixels
    pub cell_size: u32,
    /// Simulation ticks per second
    pub tick_rate: f64,
    pub palette: Palette,
    /// Fixed RNG seed for reproducible food placement
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 32,
            grid_height: 24,
            cell_size: 20,
            tick_rate: 20.0,
            palette: Palette::default(),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.grid_width, self.grid_height)
    }

    /// Time between two ticks.
    ///
    /// Panics on a tick rate that [`validate`](Self::validate) rejects.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.tick_rate)
    }

    /// Top-left pixel of a cell
    pub fn to_pixels(&self, pos: Position) -> (i32, i32) {
        let size = self.cell_size as i32;
        (pos.x * size, pos.y * size)
    }

    /// Cell containing a pixel coordinate
    pub fn from_pixels(&self, x: i32, y: i32) -> Position {
        let size = self.cell_size as i32;
        Position::new(x.div_euclid(size), y.div_euclid(size))
    }

    /// Playfield size in pixels
    pub fn screen_size(&self) -> (u32, u32) {
        (
            self.grid_width as u32 * self.cell_size,
            self.grid_height as u32 * self.cell_size,
        )
    }

    /// Check the invariants the engine relies on.
    ///
    /// The grid needs at least two cells: after a reset the snake occupies one
    /// and the food must always have somewhere else to go.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.grid_width > 0 && self.grid_height > 0,
            "grid must be at least 1x1, got {}x{}",
            self.grid_width,
            self.grid_height
        );
        ensure!(
            i32::try_from(self.grid_width).is_ok() && i32::try_from(self.grid_height).is_ok(),
            "grid dimensions must fit in i32, got {}x{}",
            self.grid_width,
            self.grid_height
        );
        let cells = self.grid_width.checked_mul(self.grid_height);
        ensure!(
            cells.is_some_and(|n| n <= MAX_CELLS),
            "grid {}x{} exceeds {} cells",
            self.grid_width,
            self.grid_height,
            MAX_CELLS
        );
        ensure!(
            cells.is_some_and(|n| n >= 2),
            "grid must have at least 2 cells, got {}x{}",
            self.grid_width,
            self.grid_height
        );
        ensure!(self.cell_size > 0, "cell size must be positive");
        let span = self.grid_width.max(self.grid_height) as u64 * self.cell_size as u64;
        ensure!(
            span <= i32::MAX as u64,
            "playfield of {} px does not fit in pixel coordinates",
            span
        );
        ensure!(
            self.tick_rate.is_finite() && self.tick_rate > 0.0,
            "tick rate must be a positive number, got {}",
            self.tick_rate
        );
        let interval = Duration::try_from_secs_f64(1.0 / self.tick_rate)
            .with_context(|| format!("tick rate {} is too slow", self.tick_rate))?;
        ensure!(
            !interval.is_zero(),
            "tick rate {} is too fast",
            self.tick_rate
        );
        Ok(())
    }

    /// Load a configuration from a JSON file; missing fields keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: GameConfig = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        config
            .validate()
            .with_context(|| format!("Invalid config {:?}", path))?;
        Ok(config)
    }

    /// Save the configuration as pretty JSON, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {:?}", parent))?;
            }
        }
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config to {:?}", path))?;
        Ok(())
    }
}
