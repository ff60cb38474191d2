use super::{
    action::{Command, Direction},
    config::GameConfig,
    snapshot::GameSnapshot,
    state::{CollisionType, GameState, Phase, Position},
};
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::time::Duration;

/// What a tick did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The game was not running, nothing changed
    Idle,
    /// The snake moved one cell
    Moved,
    /// The snake moved onto the food and grew
    Ate,
    /// The move was blocked; the dissolve sequence has begun (or the game is over)
    Crashed(CollisionType),
}

/// What a dissolve step did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DissolveOutcome {
    /// No dissolve in progress
    Idle,
    /// One tail segment removed, more remain
    Shrunk { remaining: usize },
    /// The snake is gone and the game is over
    Finished,
}

/// The game engine that owns the session and applies every rule
///
/// The session can be read through [`GameEngine::state`] and
/// [`GameEngine::snapshot`]; it only changes through the engine's operations.
///
/// ```
/// use snake_engine::game::{Command, Direction, GameConfig, GameEngine, Phase};
///
/// let mut engine = GameEngine::with_seed(GameConfig::default(), 3);
/// engine.apply(Command::Turn(Direction::Down));
/// engine.advance_tick();
///
/// assert_eq!(engine.phase(), Phase::Running);
/// assert_eq!(engine.state().snake.len(), 3);
/// ```
///
/// ```compile_fail
/// use snake_engine::game::{GameConfig, GameEngine};
///
/// let mut engine = GameEngine::new(GameConfig::default());
/// engine.state_mut().score = 1_000;
/// ```
pub struct GameEngine {
    config: GameConfig,
    state: GameState,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Engine whose food placement is reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Self {
        let state = GameState::new(&config);
        Self { config, state, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Lets tests stage a position
    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::from(&self.state)
    }

    /// Delay between two ticks at the current speed
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.state.speed_ms)
    }

    /// Delay between two dissolve steps, paced so the whole shrink takes the
    /// configured duration
    pub fn dissolve_step_interval(&self) -> Duration {
        let per_segment = match self.state.crash_length {
            0 => 0,
            len => self.config.dissolve_duration_ms / len as u64,
        };
        Duration::from_millis(per_segment.max(self.config.min_dissolve_step_ms))
    }

    pub fn crash_flash_duration(&self) -> Duration {
        Duration::from_millis(self.config.crash_flash_ms)
    }

    /// Route an input command to the matching lifecycle operation
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Turn(direction) => {
                self.queue_direction(direction);
            }
            Command::Start => {
                self.start();
            }
            Command::TogglePause => {
                self.toggle_pause();
            }
            Command::Reset => self.reset(),
        }
    }

    /// Reinitialize the whole session
    pub fn reset(&mut self) {
        self.state = GameState::new(&self.config);
        log::info!("Game reset");
    }

    /// Leave the ready state. Returns false if the game had already started.
    pub fn start(&mut self) -> bool {
        if self.state.phase() != Phase::Ready {
            return false;
        }
        self.state.started = true;
        self.state.running = true;
        log::info!("Game started");
        true
    }

    /// Pause a running game or resume a paused one; a ready game is started.
    /// Returns true if the phase changed.
    pub fn toggle_pause(&mut self) -> bool {
        match self.state.phase() {
            Phase::Ready => self.start(),
            Phase::Running => {
                self.state.running = false;
                log::debug!("Game paused");
                true
            }
            Phase::Paused => {
                self.state.running = true;
                log::debug!("Game resumed");
                true
            }
            Phase::Dissolving | Phase::GameOver => false,
        }
    }

    /// Record a direction change for a coming tick. The first one starts a
    /// fresh game. Returns false if the intent was dropped.
    pub fn queue_direction(&mut self, direction: Direction) -> bool {
        match self.state.phase() {
            Phase::Ready => {
                let queued = self.state.intents.push(direction);
                self.start();
                queued
            }
            Phase::Running => self.state.intents.push(direction),
            Phase::Paused | Phase::Dissolving | Phase::GameOver => false,
        }
    }

    /// Execute one step of the game
    pub fn advance_tick(&mut self) -> TickOutcome {
        if !self.state.running {
            return TickOutcome::Idle;
        }

        let Some(head) = self.state.snake.head() else {
            debug_assert!(false, "snake is empty while running");
            self.finish_game();
            return TickOutcome::Idle;
        };
        debug_assert!(
            !self.state.snake.contains(self.state.food),
            "food {:?} is inside the snake",
            self.state.food
        );

        // The direction sticks even when the move below fails
        let direction = self.state.intents.resolve(self.state.direction);
        self.state.direction = direction;
        self.state.steps += 1;

        let new_head = head.moved_in_direction(direction);

        if let Some(collision_type) = self.check_collision(new_head) {
            self.begin_dissolve(collision_type);
            return TickOutcome::Crashed(collision_type);
        }

        let ate_food = new_head == self.state.food;
        self.state.snake.advance(new_head, ate_food);

        if ate_food {
            self.eat_food();
            TickOutcome::Ate
        } else {
            TickOutcome::Moved
        }
    }

    /// Remove one tail segment of a crashed snake
    pub fn dissolve_step(&mut self) -> DissolveOutcome {
        if !self.state.dissolving {
            return DissolveOutcome::Idle;
        }

        self.state.snake.shrink();

        if self.state.snake.is_empty() {
            self.finish_game();
            DissolveOutcome::Finished
        } else {
            DissolveOutcome::Shrunk {
                remaining: self.state.snake.len(),
            }
        }
    }

    /// Turn off the crash highlight
    pub fn clear_crash_flash(&mut self) {
        self.state.crashing = false;
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, pos: Position) -> Option<CollisionType> {
        if !self.state.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        if self.state.snake.collides_with_body(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    fn eat_food(&mut self) {
        let state = &mut self.state;

        state.score += self.config.points_per_food * state.multiplier;
        state.consecutive_food += 1;
        state.multiplier = 1 + state.consecutive_food / self.config.foods_per_multiplier_step;
        state.speed_ms = state
            .speed_ms
            .saturating_sub(self.config.speed_increment_ms)
            .max(self.config.min_speed_ms);

        log::debug!(
            "Food eaten at {:?}: score {} x{} speed {}ms",
            state.food,
            state.score,
            state.multiplier,
            state.speed_ms
        );

        self.state.food = self.spawn_food_avoid_snake();
        debug_assert!(!self.state.snake.contains(self.state.food));
    }

    fn begin_dissolve(&mut self, collision_type: CollisionType) {
        log::info!(
            "Crashed ({:?}) with score {} and length {}",
            collision_type,
            self.state.score,
            self.state.snake.len()
        );

        self.state.running = false;
        self.state.crashing = true;
        self.state.intents.clear();
        self.state.crash_length = self.state.snake.len();

        if self.state.snake.is_empty() {
            self.finish_game();
        } else {
            self.state.dissolving = true;
        }
    }

    fn finish_game(&mut self) {
        let state = &mut self.state;
        state.running = false;
        state.dissolving = false;
        state.game_over = true;
        state.consecutive_food = 0;
        state.multiplier = 1;
        log::info!("Game over, final score {}", state.score);
    }

    /// Spawn food at a random empty position. Loops forever on a full board.
    fn spawn_food_avoid_snake(&mut self) -> Position {
        let size = self.state.board_size as i32;
        loop {
            let pos = Position::new(self.rng.gen_range(0..size), self.rng.gen_range(0..size));

            if !self.state.is_occupied_by_snake(pos) {
                return pos;
            }
        }
    }
}
