use serde::{Deserialize, Serialize};

use super::action::Direction;
use super::config::GameConfig;
use super::intent::IntentBuffer;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    pub fn manhattan_distance(&self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

/// The snake in the game
///
/// Segments are stored head first. The snake may be empty once the crash
/// dissolve has eaten all of it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
}

impl Snake {
    pub fn new(body: Vec<Position>) -> Self {
        Self { body }
    }

    pub fn head(&self) -> Option<Position> {
        self.body.first().copied()
    }

    pub fn tail(&self) -> Option<Position> {
        self.body.last().copied()
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Position] {
        self.body.get(1..).unwrap_or_default()
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Put a new head in front, dropping the tail unless the snake grows
    pub fn advance(&mut self, new_head: Position, grow: bool) {
        self.body.insert(0, new_head);

        if !grow {
            self.body.pop();
        }
    }

    /// Remove the last segment
    pub fn shrink(&mut self) -> Option<Position> {
        self.body.pop()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Lifecycle phase, derived from the session flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Ready,
    Running,
    Paused,
    Dissolving,
    GameOver,
}

/// Complete session state of one game
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    pub direction: Direction,
    pub board_size: usize,
    /// Current tick interval in milliseconds
    pub speed_ms: u64,

    pub running: bool,
    pub started: bool,
    pub game_over: bool,
    pub dissolving: bool,
    /// Short-lived highlight right after a crash
    pub crashing: bool,

    pub score: u32,
    pub multiplier: u32,
    pub consecutive_food: u32,
    pub steps: u32,
    /// Snake length when the crash happened, paces the dissolve
    pub crash_length: usize,

    pub intents: IntentBuffer,
}

impl GameState {
    /// Fresh session built from the configured starting values
    pub fn new(config: &GameConfig) -> Self {
        Self {
            snake: Snake::new(config.initial_snake.clone()),
            food: config.initial_food,
            direction: config.initial_direction,
            board_size: config.board_size,
            speed_ms: config.initial_speed_ms,
            running: false,
            started: false,
            game_over: false,
            dissolving: false,
            crashing: false,
            score: 0,
            multiplier: 1,
            consecutive_food: 0,
            steps: 0,
            crash_length: 0,
            intents: IntentBuffer::new(config.intent_buffer_capacity),
        }
    }

    pub fn phase(&self) -> Phase {
        if self.game_over {
            Phase::GameOver
        } else if self.dissolving {
            Phase::Dissolving
        } else if self.running {
            Phase::Running
        } else if self.started {
            Phase::Paused
        } else {
            Phase::Ready
        }
    }

    pub fn is_paused(&self) -> bool {
        self.phase() == Phase::Paused
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        let size = self.board_size as i32;
        pos.x >= 0 && pos.x < size && pos.y >= 0 && pos.y < size
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.contains(pos)
    }
}
