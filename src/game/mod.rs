//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The engine is advanced by an external driver, so it can be unit tested without timers.

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use config::{Difficulty, GameConfig};
pub use engine::{GameEngine, TickOutcome};
pub use state::{GameOverReason, GameState, Phase, Position, Snake};
