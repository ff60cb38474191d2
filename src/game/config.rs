use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use super::action::Direction;
use super::state::Position;

/// Reasons a [`GameConfig`] can be rejected
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to write config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("board size must be between 2 and {max}, got {got}")]
    BoardSize { got: usize, max: usize },

    #[error("speed bounds are inverted: min {min_ms}ms > initial {initial_ms}ms")]
    SpeedBounds { min_ms: u64, initial_ms: u64 },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("initial snake must not be empty")]
    EmptySnake,

    #[error("initial snake segment {0:?} is outside the board")]
    SnakeOutOfBounds(Position),

    #[error("initial snake segments {0:?} and {1:?} are not adjacent")]
    SnakeNotContiguous(Position, Position),

    #[error("initial snake occupies {0:?} more than once")]
    SnakeOverlaps(Position),

    #[error("initial direction {0:?} points back into the snake")]
    DirectionIntoBody(Direction),

    #[error("initial food {0:?} is outside the board or on the snake")]
    FoodPlacement(Position),
}

/// Configuration for the game
///
/// Every field has a default, so a TOML file only needs to name the values it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width and height of the square grid
    pub board_size: usize,
    /// Starting segments, head first
    pub initial_snake: Vec<Position>,
    /// Food cell of a fresh game
    pub initial_food: Position,
    /// Direction of a fresh game
    pub initial_direction: Direction,

    /// Tick interval of a fresh game, also the slowest the game ever gets
    pub initial_speed_ms: u64,
    /// Fastest tick interval
    pub min_speed_ms: u64,
    /// Interval reduction per food eaten
    pub speed_increment_ms: u64,

    /// Base points per food, scaled by the multiplier
    pub points_per_food: u32,
    /// Consecutive foods needed to raise the multiplier by one
    pub foods_per_multiplier_step: u32,
    /// Pending direction changes kept between ticks
    pub intent_buffer_capacity: usize,

    /// Total time the post-crash shrink takes
    pub dissolve_duration_ms: u64,
    /// Lower bound for one shrink step
    pub min_dissolve_step_ms: u64,
    /// How long the crash highlight stays on
    pub crash_flash_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: 20,
            initial_snake: vec![
                Position::new(10, 10),
                Position::new(9, 10),
                Position::new(8, 10),
            ],
            initial_food: Position::new(15, 10),
            initial_direction: Direction::Right,
            initial_speed_ms: 150,
            min_speed_ms: 60,
            speed_increment_ms: 5,
            points_per_food: 10,
            foods_per_multiplier_step: 3,
            intent_buffer_capacity: 2,
            dissolve_duration_ms: 1000,
            min_dissolve_step_ms: 30,
            crash_flash_ms: 400,
        }
    }
}

impl GameConfig {
    /// Largest supported board edge
    pub const MAX_BOARD_SIZE: usize = 256;

    /// Parse a TOML document and validate the result
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Render as a TOML document that [`GameConfig::from_toml_str`] reads back
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every value the engine relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size < 2 || self.board_size > Self::MAX_BOARD_SIZE {
            return Err(ConfigError::BoardSize {
                got: self.board_size,
                max: Self::MAX_BOARD_SIZE,
            });
        }

        if self.min_speed_ms > self.initial_speed_ms {
            return Err(ConfigError::SpeedBounds {
                min_ms: self.min_speed_ms,
                initial_ms: self.initial_speed_ms,
            });
        }
        for (name, value) in [
            ("min_speed_ms", self.min_speed_ms),
            ("speed_increment_ms", self.speed_increment_ms),
            ("dissolve_duration_ms", self.dissolve_duration_ms),
            ("min_dissolve_step_ms", self.min_dissolve_step_ms),
            ("crash_flash_ms", self.crash_flash_ms),
        ] {
            if value == 0 {
                return Err(ConfigError::Zero(name));
            }
        }
        if self.foods_per_multiplier_step == 0 {
            return Err(ConfigError::Zero("foods_per_multiplier_step"));
        }
        if self.intent_buffer_capacity == 0 {
            return Err(ConfigError::Zero("intent_buffer_capacity"));
        }

        self.validate_snake()?;

        if !self.in_bounds(self.initial_food) || self.initial_snake.contains(&self.initial_food) {
            return Err(ConfigError::FoodPlacement(self.initial_food));
        }

        Ok(())
    }

    fn validate_snake(&self) -> Result<(), ConfigError> {
        let Some(&head) = self.initial_snake.first() else {
            return Err(ConfigError::EmptySnake);
        };

        for (i, &segment) in self.initial_snake.iter().enumerate() {
            if !self.in_bounds(segment) {
                return Err(ConfigError::SnakeOutOfBounds(segment));
            }
            if self.initial_snake[..i].contains(&segment) {
                return Err(ConfigError::SnakeOverlaps(segment));
            }
        }

        for pair in self.initial_snake.windows(2) {
            if pair[0].manhattan_distance(pair[1]) != 1 {
                return Err(ConfigError::SnakeNotContiguous(pair[0], pair[1]));
            }
        }

        if self.initial_snake.get(1) == Some(&head.moved_in_direction(self.initial_direction)) {
            return Err(ConfigError::DirectionIntoBody(self.initial_direction));
        }

        Ok(())
    }

    fn in_bounds(&self, pos: Position) -> bool {
        let size = self.board_size as i32;
        (0..size).contains(&pos.x) && (0..size).contains(&pos.y)
    }
}
