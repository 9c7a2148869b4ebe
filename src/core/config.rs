//! Grid configuration.
//!
//! A `GameConfig` is validated once, when it is built or deserialized. Every
//! rules operation then takes it as given and never fails.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::position::Position;

/// Default grid width and height.
pub const DEFAULT_GRID_SIZE: u32 = 20;

/// Length of the snake at the start of a game.
pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// Narrowest grid the starting snake fits on (`width / 2 - 2 >= 0`).
pub const MIN_GRID_WIDTH: u32 = 4;

/// Largest accepted dimension; keeps every coordinate inside `i32`.
pub const MAX_GRID_DIMENSION: u32 = 1 << 15;

/// Why a grid configuration was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid width {width} is too narrow for the starting snake (minimum {min})")]
    WidthTooSmall { width: u32, min: u32 },

    #[error("grid height must be at least 1")]
    ZeroHeight,

    #[error("grid dimension {value} exceeds the maximum of {max}")]
    TooLarge { value: u32, max: u32 },

    #[error("tick interval must be non-zero")]
    ZeroTickInterval,
}

/// Fixed board dimensions for one game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawGameConfig")]
pub struct GameConfig {
    grid_width: u32,
    grid_height: u32,
}

impl GameConfig {
    /// Create a validated configuration.
    pub fn new(grid_width: u32, grid_height: u32) -> Result<Self, ConfigError> {
        if grid_width < MIN_GRID_WIDTH {
            return Err(ConfigError::WidthTooSmall {
                width: grid_width,
                min: MIN_GRID_WIDTH,
            });
        }
        if grid_height == 0 {
            return Err(ConfigError::ZeroHeight);
        }
        for value in [grid_width, grid_height] {
            if value > MAX_GRID_DIMENSION {
                return Err(ConfigError::TooLarge {
                    value,
                    max: MAX_GRID_DIMENSION,
                });
            }
        }

        Ok(Self {
            grid_width,
            grid_height,
        })
    }

    /// Square grid of the given side.
    pub fn square(size: u32) -> Result<Self, ConfigError> {
        Self::new(size, size)
    }

    /// Replace the width, keeping the height.
    pub fn with_grid_width(self, grid_width: u32) -> Result<Self, ConfigError> {
        Self::new(grid_width, self.grid_height)
    }

    /// Replace the height, keeping the width.
    pub fn with_grid_height(self, grid_height: u32) -> Result<Self, ConfigError> {
        Self::new(self.grid_width, grid_height)
    }

    #[must_use]
    pub const fn grid_width(&self) -> u32 {
        self.grid_width
    }

    #[must_use]
    pub const fn grid_height(&self) -> u32 {
        self.grid_height
    }

    /// Total number of cells; also the food placement attempt budget.
    #[must_use]
    pub const fn cell_count(&self) -> u64 {
        self.grid_width as u64 * self.grid_height as u64
    }

    /// Grid center (floor division), where the head starts.
    #[must_use]
    pub const fn start_position(&self) -> Position {
        Position::new((self.grid_width / 2) as i32, (self.grid_height / 2) as i32)
    }

    /// Check whether `pos` lies on this grid.
    #[must_use]
    pub const fn contains(&self, pos: Position) -> bool {
        pos.within(self.grid_width, self.grid_height)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: DEFAULT_GRID_SIZE,
            grid_height: DEFAULT_GRID_SIZE,
        }
    }
}

#[derive(Deserialize)]
struct RawGameConfig {
    #[serde(default = "default_grid_size")]
    grid_width: u32,
    #[serde(default = "default_grid_size")]
    grid_height: u32,
}

fn default_grid_size() -> u32 {
    DEFAULT_GRID_SIZE
}

impl TryFrom<RawGameConfig> for GameConfig {
    type Error = ConfigError;

    fn try_from(raw: RawGameConfig) -> Result<Self, Self::Error> {
        GameConfig::new(raw.grid_width, raw.grid_height)
    }
}
