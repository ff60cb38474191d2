use super::action::Direction;
use super::state::{GameState, Phase, Position};

/// Read-only view of a session handed to the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub snake: Vec<Position>,
    pub food: Position,
    pub direction: Direction,
    pub board_size: usize,
    pub score: u32,
    pub multiplier: u32,
    pub speed_ms: u64,
    pub phase: Phase,
    pub running: bool,
    pub paused: bool,
    pub game_over: bool,
    pub dissolving: bool,
    pub crashing: bool,
}

impl From<&GameState> for GameSnapshot {
    fn from(state: &GameState) -> Self {
        Self {
            snake: state.snake.body.clone(),
            food: state.food,
            direction: state.direction,
            board_size: state.board_size,
            score: state.score,
            multiplier: state.multiplier,
            speed_ms: state.speed_ms,
            phase: state.phase(),
            running: state.running,
            paused: state.is_paused(),
            game_over: state.game_over,
            dissolving: state.dissolving,
            crashing: state.crashing,
        }
    }
}

impl GameSnapshot {
    pub fn head(&self) -> Option<Position> {
        self.snake.first().copied()
    }
}
