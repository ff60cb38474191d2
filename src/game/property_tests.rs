#![cfg(test)]
use crate::game::{
    Command, Direction, DissolveOutcome, GameConfig, GameEngine, GameState, Position, TickOutcome,
};
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
enum Step {
    Command(Command),
    Tick,
    Dissolve,
}

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Up),
        Just(Direction::Down),
        Just(Direction::Left),
        Just(Direction::Right),
    ]
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        6 => Just(Step::Tick),
        3 => direction().prop_map(|d| Step::Command(Command::Turn(d))),
        1 => Just(Step::Command(Command::Start)),
        1 => Just(Step::Command(Command::TogglePause)),
        1 => Just(Step::Command(Command::Reset)),
        2 => Just(Step::Dissolve),
    ]
}

/// Small board so food is eaten often
fn small_board() -> GameConfig {
    GameConfig {
        board_size: 8,
        initial_snake: vec![Position::new(3, 3), Position::new(2, 3), Position::new(1, 3)],
        initial_food: Position::new(6, 3),
        ..GameConfig::default()
    }
}

fn check_invariants(state: &GameState, config: &GameConfig) -> Result<(), TestCaseError> {
    prop_assert_eq!(
        state.multiplier,
        1 + state.consecutive_food / config.foods_per_multiplier_step
    );
    prop_assert!(!state.snake.contains(state.food), "food {:?} on snake", state.food);
    prop_assert!(state.speed_ms >= config.min_speed_ms);
    prop_assert!(state.speed_ms <= config.initial_speed_ms);
    prop_assert!(state.intents.len() <= config.intent_buffer_capacity);
    if state.running {
        prop_assert!(!state.snake.is_empty());
    }
    Ok(())
}

fn check_tick(
    before: &GameState,
    after: &GameState,
    outcome: TickOutcome,
    config: &GameConfig,
) -> Result<(), TestCaseError> {
    match outcome {
        TickOutcome::Moved | TickOutcome::Ate => {
            let old_head = before.snake.head().unwrap();
            prop_assert!(!after.direction.is_opposite(before.direction));
            prop_assert_eq!(
                after.snake.head(),
                Some(old_head.moved_in_direction(after.direction))
            );

            let grew = outcome == TickOutcome::Ate;
            let kept = if grew {
                before.snake.len()
            } else {
                before.snake.len() - 1
            };
            prop_assert_eq!(after.snake.len(), before.snake.len() + grew as usize);
            prop_assert_eq!(&after.snake.body[1..], &before.snake.body[..kept]);

            if grew {
                prop_assert_eq!(
                    after.score,
                    before.score + config.points_per_food * before.multiplier
                );
                prop_assert_eq!(after.consecutive_food, before.consecutive_food + 1);
            } else {
                prop_assert_eq!(after.score, before.score);
                prop_assert_eq!(after.food, before.food);
            }
        }
        TickOutcome::Crashed(_) => {
            prop_assert_eq!(&after.snake, &before.snake);
            prop_assert!(!after.running);
        }
        TickOutcome::Idle => prop_assert_eq!(after, before),
    }
    Ok(())
}

fn run_steps(config: GameConfig, seed: u64, steps: Vec<Step>) -> Result<(), TestCaseError> {
    let mut engine = GameEngine::with_seed(config.clone(), seed);
    let mut last_speed = engine.state().speed_ms;
    check_invariants(engine.state(), &config)?;

    for step in steps {
        let before = engine.state().clone();

        match step {
            Step::Command(command) => engine.apply(command),
            Step::Tick => {
                let outcome = engine.advance_tick();
                check_tick(&before, engine.state(), outcome, &config)?;
            }
            Step::Dissolve => {
                let outcome = engine.dissolve_step();
                if let DissolveOutcome::Shrunk { remaining } = outcome {
                    prop_assert_eq!(remaining, before.snake.len() - 1);
                }
            }
        }

        let state = engine.state();
        check_invariants(state, &config)?;

        if matches!(step, Step::Command(Command::Reset)) {
            prop_assert_eq!(state, &GameState::new(&config));
        } else {
            prop_assert!(state.speed_ms <= last_speed, "interval went up within a life");
        }
        last_speed = state.speed_ms;
    }
    Ok(())
}

proptest! {
    #[test]
    fn rules_hold_on_small_board(
        seed in any::<u64>(),
        steps in proptest::collection::vec(step(), 1..200)
    ) {
        run_steps(small_board(), seed, steps)?;
    }

    #[test]
    fn rules_hold_on_default_board(
        seed in any::<u64>(),
        steps in proptest::collection::vec(step(), 1..200)
    ) {
        run_steps(GameConfig::default(), seed, steps)?;
    }
}
