use anyhow::{Context, Result, ensure};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::action::Direction;
use super::state::Position;

/// Largest grid side accepted by [`GameConfig::validate`]
pub const MAX_TILE_COUNT: usize = 256;

/// Speed setting; maps to the period between ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn tick_interval(&self) -> Duration {
        match self {
            Difficulty::Easy => Duration::from_millis(150),
            Difficulty::Medium => Duration::from_millis(100),
            Difficulty::Hard => Duration::from_millis(50),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of cells per axis of the square grid
    pub tile_count: usize,
    /// Length of the snake at the start of a game
    pub initial_length: usize,
    /// Direction the snake is heading at the start of a game
    pub initial_direction: Direction,
    /// Points awarded per food
    pub food_score: u32,
    pub difficulty: Difficulty,
    /// Minimum mouse drag, in cells, recognised as a swipe
    pub swipe_threshold: i32,
    /// Where the high score is persisted
    pub high_score_path: PathBuf,
    /// Ring the terminal bell on eat / game over
    pub sound: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tile_count: 20,
            initial_length: 1,
            initial_direction: Direction::Right,
            food_score: 1,
            difficulty: Difficulty::default(),
            swipe_threshold: 3,
            high_score_path: PathBuf::from(".tile_snake_high_score.json"),
            sound: true,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(tile_count: usize) -> Self {
        Self {
            tile_count,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10)
    }

    /// Load a configuration from a JSON file; missing fields take defaults
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: GameConfig =
            serde_json::from_str(&json).context("Failed to parse game config")?;
        Ok(config)
    }

    /// Head position of a freshly reset snake: the grid centre
    pub fn initial_head(&self) -> Position {
        let center = (self.tile_count / 2) as i32;
        Position::new(center, center)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.tile_count >= 2,
            "tile_count must be at least 2 (got {})",
            self.tile_count
        );
        ensure!(
            self.tile_count <= MAX_TILE_COUNT,
            "tile_count must be at most {} (got {})",
            MAX_TILE_COUNT,
            self.tile_count
        );
        ensure!(
            (1..=self.tile_count).contains(&self.initial_length),
            "initial_length must be between 1 and {} (got {})",
            self.tile_count,
            self.initial_length
        );

        // Segments trail behind the head, so they need room on that side.
        let head = self.initial_head();
        let behind = match self.initial_direction {
            Direction::Right => head.x,
            Direction::Left => self.tile_count as i32 - 1 - head.x,
            Direction::Down => head.y,
            Direction::Up => self.tile_count as i32 - 1 - head.y,
        };
        ensure!(
            self.initial_length as i32 - 1 <= behind,
            "initial snake of length {} does not fit on a {}x{} grid heading {:?}",
            self.initial_length,
            self.tile_count,
            self.tile_count,
            self.initial_direction
        );
        ensure!(self.swipe_threshold > 0, "swipe_threshold must be positive");

        Ok(())
    }
}
