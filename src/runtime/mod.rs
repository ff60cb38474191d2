//! Timer-driven lifecycle around the pure game engine

pub mod controller;
pub mod scheduler;

pub use controller::{Controller, TimerEvent};
pub use scheduler::{Due, Scheduler, TimerKind, wait_for};
