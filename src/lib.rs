//! Snake Engine - a tick-driven Snake game
//!
//! This library provides:
//! - Core game logic with no I/O (game module)
//! - Cancellable timers driving the game lifecycle (runtime module)
//! - Terminal input mapping and rendering (input and render modules)
//! - A keyboard-driven terminal mode (modes module)

pub mod game;
pub mod input;
pub mod logger;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod runtime;
