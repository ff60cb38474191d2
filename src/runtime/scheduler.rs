//! Cancellable delayed tasks for the game loop
//!
//! Each [`TimerKind`] owns exactly one deadline slot. Scheduling a kind again
//! replaces its deadline and cancelling clears it, so a callback that was
//! cancelled can never fire later.

use std::time::Duration;
use tokio::time::{Instant, sleep_until};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Next movement step
    Tick,
    /// Next tail removal of a crashed snake
    DissolveStep,
    /// End of the crash highlight
    CrashFlash,
}

/// The earliest pending timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Due {
    pub kind: TimerKind,
    pub at: Instant,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    tick: Option<Instant>,
    dissolve: Option<Instant>,
    crash_flash: Option<Instant>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire `kind` once `delay` has passed, replacing any earlier deadline
    pub fn schedule(&mut self, kind: TimerKind, delay: Duration) {
        *self.slot_mut(kind) = Some(Instant::now() + delay);
    }

    pub fn cancel(&mut self, kind: TimerKind) {
        *self.slot_mut(kind) = None;
    }

    pub fn cancel_all(&mut self) {
        self.tick = None;
        self.dissolve = None;
        self.crash_flash = None;
    }

    pub fn deadline(&self, kind: TimerKind) -> Option<Instant> {
        match kind {
            TimerKind::Tick => self.tick,
            TimerKind::DissolveStep => self.dissolve,
            TimerKind::CrashFlash => self.crash_flash,
        }
    }

    pub fn is_scheduled(&self, kind: TimerKind) -> bool {
        self.deadline(kind).is_some()
    }

    /// Earliest pending deadline; ties go to the tick
    pub fn next_due(&self) -> Option<Due> {
        [
            TimerKind::Tick,
            TimerKind::DissolveStep,
            TimerKind::CrashFlash,
        ]
        .into_iter()
        .filter_map(|kind| self.deadline(kind).map(|at| Due { kind, at }))
        .min_by_key(|due| due.at)
    }

    fn slot_mut(&mut self, kind: TimerKind) -> &mut Option<Instant> {
        match kind {
            TimerKind::Tick => &mut self.tick,
            TimerKind::DissolveStep => &mut self.dissolve,
            TimerKind::CrashFlash => &mut self.crash_flash,
        }
    }
}

/// Sleep until `due` and report which timer it was. Never resolves without one.
///
/// Takes the deadline by value so the select loop does not hold a borrow of
/// the scheduler while it waits.
pub async fn wait_for(due: Option<Due>) -> TimerKind {
    match due {
        Some(due) => {
            sleep_until(due.at).await;
            due.kind
        }
        None => std::future::pending().await,
    }
}
