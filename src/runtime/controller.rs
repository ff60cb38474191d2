use crate::game::{Command, DissolveOutcome, GameEngine, GameSnapshot, Phase, TickOutcome};

use super::scheduler::{Due, Scheduler, TimerKind};

/// What a fired timer did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Tick(TickOutcome),
    Dissolve(DissolveOutcome),
    CrashFlashCleared,
}

impl TimerEvent {
    /// True if this event moved the session into the game-over state
    pub fn ended_game(&self) -> bool {
        matches!(self, TimerEvent::Dissolve(DissolveOutcome::Finished))
    }
}

/// Couples the engine to its timers
///
/// The engine decides what happens; the controller decides when. Every phase
/// change goes through [`Controller::sync_timers`], which drops whatever was
/// pending before arming the timers the new phase needs.
pub struct Controller {
    engine: GameEngine,
    scheduler: Scheduler,
}

impl Controller {
    pub fn new(engine: GameEngine) -> Self {
        Self {
            engine,
            scheduler: Scheduler::new(),
        }
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut GameEngine {
        &mut self.engine
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.engine.snapshot()
    }

    pub fn next_due(&self) -> Option<Due> {
        self.scheduler.next_due()
    }

    /// Apply an input command and re-arm the timers if the phase changed
    pub fn handle_command(&mut self, command: Command) -> Phase {
        let before = self.engine.phase();
        self.engine.apply(command);
        let after = self.engine.phase();

        if command == Command::Reset {
            log::debug!("Reset from {:?}, all timers cancelled", before);
            self.scheduler.cancel_all();
        } else if before != after {
            log::debug!("{:?} moved {:?} -> {:?}", command, before, after);
            self.sync_timers();
        }

        after
    }

    /// Run the work of a timer that just fired
    pub fn on_timer(&mut self, kind: TimerKind) -> TimerEvent {
        self.scheduler.cancel(kind);

        match kind {
            TimerKind::Tick => {
                let outcome = self.engine.advance_tick();
                match outcome {
                    TickOutcome::Moved | TickOutcome::Ate => {
                        self.scheduler
                            .schedule(TimerKind::Tick, self.engine.tick_interval());
                    }
                    TickOutcome::Crashed(_) => {
                        self.sync_timers();
                        self.scheduler
                            .schedule(TimerKind::CrashFlash, self.engine.crash_flash_duration());
                    }
                    TickOutcome::Idle => {}
                }
                TimerEvent::Tick(outcome)
            }
            TimerKind::DissolveStep => {
                let outcome = self.engine.dissolve_step();
                match outcome {
                    DissolveOutcome::Shrunk { .. } => self.scheduler.schedule(
                        TimerKind::DissolveStep,
                        self.engine.dissolve_step_interval(),
                    ),
                    DissolveOutcome::Finished => {
                        log::debug!("Dissolve finished")
                    }
                    DissolveOutcome::Idle => {}
                }
                TimerEvent::Dissolve(outcome)
            }
            TimerKind::CrashFlash => {
                self.engine.clear_crash_flash();
                TimerEvent::CrashFlashCleared
            }
        }
    }

    /// Cancel the tick and dissolve timers, then arm the one the current phase needs
    fn sync_timers(&mut self) {
        self.scheduler.cancel(TimerKind::Tick);
        self.scheduler.cancel(TimerKind::DissolveStep);

        match self.engine.phase() {
            Phase::Running => {
                let delay = self.engine.tick_interval();
                log::debug!("Tick armed in {:?}", delay);
                self.scheduler.schedule(TimerKind::Tick, delay);
            }
            Phase::Dissolving => {
                let delay = self.engine.dissolve_step_interval();
                log::debug!("Dissolve armed, one segment every {:?}", delay);
                self.scheduler.schedule(TimerKind::DissolveStep, delay);
            }
            phase => log::debug!("No timers while {:?}", phase),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{CollisionType, Direction, GameConfig, Position};
    use crate::runtime::scheduler::wait_for;
    use std::time::Duration;
    use tokio::time::Instant;

    fn controller() -> Controller {
        Controller::new(GameEngine::with_seed(GameConfig::default(), 42))
    }

    async fn fire_next(controller: &mut Controller) -> TimerEvent {
        let kind = wait_for(controller.next_due()).await;
        controller.on_timer(kind)
    }

    fn stage_at_wall(controller: &mut Controller) {
        let state = controller.engine_mut().state_mut();
        state.snake.body = vec![
            Position::new(19, 10),
            Position::new(18, 10),
            Position::new(17, 10),
        ];
        state.food = Position::new(1, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ready_has_no_timers() {
        let controller = controller();
        assert_eq!(controller.next_due(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_schedules_tick_at_speed() {
        let mut controller = controller();
        let now = Instant::now();

        assert_eq!(controller.handle_command(Command::Start), Phase::Running);
        assert_eq!(
            controller.scheduler().deadline(TimerKind::Tick),
            Some(now + Duration::from_millis(150))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_follow_each_other() {
        let mut controller = controller();
        controller.handle_command(Command::Turn(Direction::Down));
        let start = Instant::now();

        assert_eq!(fire_next(&mut controller).await, TimerEvent::Tick(TickOutcome::Moved));
        assert_eq!(fire_next(&mut controller).await, TimerEvent::Tick(TickOutcome::Moved));

        assert!(start.elapsed() >= Duration::from_millis(300));
        assert!(start.elapsed() < Duration::from_millis(305));
        assert_eq!(
            controller.engine().state().snake.head(),
            Some(Position::new(10, 12))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_eating_speeds_up_next_tick() {
        let mut controller = controller();
        controller.handle_command(Command::Start);
        controller.engine_mut().state_mut().food = Position::new(11, 10);

        let event = fire_next(&mut controller).await;
        assert_eq!(event, TimerEvent::Tick(TickOutcome::Ate));

        let now = Instant::now();
        assert_eq!(
            controller.scheduler().deadline(TimerKind::Tick),
            Some(now + Duration::from_millis(145))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_cancels_and_resume_reschedules() {
        let mut controller = controller();
        controller.handle_command(Command::Start);

        assert_eq!(controller.handle_command(Command::TogglePause), Phase::Paused);
        assert_eq!(controller.next_due(), None);

        tokio::time::advance(Duration::from_secs(5)).await;
        let now = Instant::now();
        assert_eq!(controller.handle_command(Command::TogglePause), Phase::Running);
        assert_eq!(
            controller.scheduler().deadline(TimerKind::Tick),
            Some(now + Duration::from_millis(150))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_turn_does_not_reschedule_running_tick() {
        let mut controller = controller();
        controller.handle_command(Command::Start);
        let deadline = controller.scheduler().deadline(TimerKind::Tick);

        tokio::time::advance(Duration::from_millis(50)).await;
        controller.handle_command(Command::Turn(Direction::Up));

        assert_eq!(controller.scheduler().deadline(TimerKind::Tick), deadline);
    }

    #[tokio::test(start_paused = true)]
    async fn test_crash_dissolves_then_game_over() {
        let mut controller = controller();
        controller.handle_command(Command::Start);
        stage_at_wall(&mut controller);

        let event = fire_next(&mut controller).await;
        assert_eq!(
            event,
            TimerEvent::Tick(TickOutcome::Crashed(CollisionType::Wall))
        );
        assert!(!controller.scheduler().is_scheduled(TimerKind::Tick));
        assert!(controller.scheduler().is_scheduled(TimerKind::DissolveStep));
        assert!(controller.scheduler().is_scheduled(TimerKind::CrashFlash));

        let crashed_at = Instant::now();
        let mut events = Vec::new();
        while controller.next_due().is_some() {
            events.push(fire_next(&mut controller).await);
        }

        assert_eq!(
            events,
            vec![
                TimerEvent::Dissolve(DissolveOutcome::Shrunk { remaining: 2 }),
                TimerEvent::CrashFlashCleared,
                TimerEvent::Dissolve(DissolveOutcome::Shrunk { remaining: 1 }),
                TimerEvent::Dissolve(DissolveOutcome::Finished),
            ]
        );
        assert!(events.last().unwrap().ended_game());
        assert!(crashed_at.elapsed() >= Duration::from_millis(999));
        assert!(crashed_at.elapsed() < Duration::from_millis(1005));
        assert_eq!(controller.engine().phase(), Phase::GameOver);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_during_dissolve_cancels_everything() {
        let mut controller = controller();
        controller.handle_command(Command::Start);
        stage_at_wall(&mut controller);
        fire_next(&mut controller).await;
        assert_eq!(controller.engine().phase(), Phase::Dissolving);

        assert_eq!(controller.handle_command(Command::Reset), Phase::Ready);
        assert_eq!(controller.next_due(), None);
        assert_eq!(controller.engine().state().snake.len(), 3);
        assert!(!controller.engine().state().crashing);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_while_running_stops_ticks() {
        let mut controller = controller();
        controller.handle_command(Command::Start);
        fire_next(&mut controller).await;

        controller.handle_command(Command::Reset);
        assert_eq!(controller.next_due(), None);
        assert_eq!(
            controller.engine().state().snake.head(),
            Some(Position::new(10, 10))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_timer_is_harmless() {
        let mut controller = controller();
        controller.handle_command(Command::Start);
        controller.handle_command(Command::TogglePause);

        // A tick delivered after pausing changes nothing
        let event = controller.on_timer(TimerKind::Tick);
        assert_eq!(event, TimerEvent::Tick(TickOutcome::Idle));
        assert_eq!(controller.next_due(), None);
        assert_eq!(
            controller.engine().state().snake.head(),
            Some(Position::new(10, 10))
        );
    }
}
