//! Tile Snake - the classic Snake game in the terminal
//!
//! This library provides:
//! - Core game logic driven by an external tick (game module)
//! - TUI rendering (render module)
//! - Keyboard and mouse-swipe input (input module)
//! - High score persistence and sound cues (persistence, audio modules)
//! - The interactive driver (modes module)

pub mod audio;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod persistence;
pub mod render;
