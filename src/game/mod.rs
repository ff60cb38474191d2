//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Timers live in [`crate::runtime`]; the engine only exposes the delays it wants.

pub mod action;
pub mod config;
pub mod engine;
pub mod intent;
pub mod snapshot;
pub mod state;

mod property_tests;

// Re-export commonly used types
pub use action::{Command, Direction};
pub use config::{ConfigError, GameConfig};
pub use engine::{DissolveOutcome, GameEngine, TickOutcome};
pub use intent::IntentBuffer;
pub use snapshot::GameSnapshot;
pub use state::{CollisionType, GameState, Phase, Position, Snake};
