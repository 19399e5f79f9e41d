//! Durable storage for the single best score
//!
//! The score is kept in a small JSON document under a fixed key, so the
//! file can be inspected or reset by hand.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;

#[derive(Debug, Default, Serialize, Deserialize)]
struct HighScoreRecord {
    #[serde(rename = "snakeHighScore", default)]
    high_score: u32,
}

/// Where the high score lives between runs
pub trait HighScoreStore {
    fn load(&self) -> Result<u32>;
    fn save(&mut self, score: u32) -> Result<()>;
}

/// High score persisted as JSON on disk
pub struct FileHighScoreStore {
    path: PathBuf,
}

impl FileHighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HighScoreStore for FileHighScoreStore {
    /// A missing file means no game has been recorded yet
    fn load(&self) -> Result<u32> {
        if !self.path.exists() {
            return Ok(0);
        }

        let json = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read high score from {:?}", self.path))?;
        let record: HighScoreRecord =
            serde_json::from_str(&json).context("Failed to parse high score file")?;
        Ok(record.high_score)
    }

    fn save(&mut self, score: u32) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        let json = serde_json::to_string_pretty(&HighScoreRecord { high_score: score })
            .context("Failed to serialize high score")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write high score to {:?}", self.path))?;
        Ok(())
    }
}

/// In-process store, used by tests.
///
/// Clones share the same slot, so a test can keep one handle while the
/// game owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScoreStore {
    score: Rc<Cell<u32>>,
    saves: Rc<Cell<u32>>,
}

impl MemoryHighScoreStore {
    pub fn with_score(score: u32) -> Self {
        let store = Self::default();
        store.score.set(score);
        store
    }

    pub fn score(&self) -> u32 {
        self.score.get()
    }

    /// Number of times `save` has been called
    pub fn saves(&self) -> u32 {
        self.saves.get()
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn load(&self) -> Result<u32> {
        Ok(self.score.get())
    }

    fn save(&mut self, score: u32) -> Result<()> {
        self.score.set(score);
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_reads_zero() {
        let dir = TempDir::new().unwrap();
        let store = FileHighScoreStore::new(dir.path().join("score.json"));
        assert_eq!(store.load().unwrap(), 0);
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("score.json");
        let mut store = FileHighScoreStore::new(&path);

        store.save(17).unwrap();
        assert_eq!(FileHighScoreStore::new(&path).load().unwrap(), 17);

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"snakeHighScore\""));
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("score.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(FileHighScoreStore::new(&path).load().is_err());
    }

    #[test]
    fn test_memory_store_clones_share_state() {
        let handle = MemoryHighScoreStore::with_score(1);
        let mut store = handle.clone();
        store.save(3).unwrap();
        store.save(5).unwrap();

        assert_eq!(handle.load().unwrap(), 5);
        assert_eq!(handle.score(), 5);
        assert_eq!(handle.saves(), 2);
    }
}
