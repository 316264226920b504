//! Persisted best score
//!
//! The store is a fixed four byte file holding one little-endian `u32`. A
//! missing or truncated file reads as zero, and the file is only rewritten
//! when a score beats what is already stored.

use anyhow::{Context, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Size of the high score file in bytes
pub const RECORD_LEN: usize = 4;

/// Somewhere a best score is kept between sessions
pub trait ScoreStore {
    /// Highest score recorded so far
    fn best(&self) -> u32;

    /// Offer a finished session's score.
    /// Returns `true` if it replaced the stored best.
    fn record(&mut self, score: u32) -> Result<bool>;
}

/// Best score kept in a small binary file
#[derive(Debug, Clone)]
pub struct HighScoreFile {
    path: PathBuf,
    best: u32,
}

impl HighScoreFile {
    /// Open the store, reading the current best if the file exists
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let best = read_score(&path)?;
        debug!(path = %path.display(), best, "loaded high score");
        Ok(Self { path, best })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for HighScoreFile {
    fn best(&self) -> u32 {
        self.best
    }

    fn record(&mut self, score: u32) -> Result<bool> {
        // Another process may have written since we opened
        let stored = read_score(&self.path)?;
        if score <= stored {
            self.best = stored;
            return Ok(false);
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
        std::fs::write(&self.path, score.to_le_bytes())
            .with_context(|| format!("Failed to write high score to {:?}", self.path))?;
        self.best = score;
        Ok(true)
    }
}

fn read_score(path: &Path) -> Result<u32> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(bytes
            .get(..RECORD_LEN)
            .and_then(|b| b.try_into().ok())
            .map(u32::from_le_bytes)
            .unwrap_or(0)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(0),
        Err(err) => Err(err).with_context(|| format!("Failed to read high score from {:?}", path)),
    }
}

/// In-memory store for variants without a persisted best, and for tests
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    best: u32,
}

impl MemoryScoreStore {
    pub fn new(best: u32) -> Self {
        Self { best }
    }
}

impl ScoreStore for MemoryScoreStore {
    fn best(&self) -> u32 {
        self.best
    }

    fn record(&mut self, score: u32) -> Result<bool> {
        if score > self.best {
            self.best = score;
            return Ok(true);
        }
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_reads_zero() {
        let dir = TempDir::new().unwrap();
        let store = HighScoreFile::open(dir.path().join("highscore.dat")).unwrap();
        assert_eq!(store.best(), 0);
    }

    #[test]
    fn test_short_file_reads_zero() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("highscore.dat");
        std::fs::write(&path, [7u8, 0]).unwrap();

        let store = HighScoreFile::open(&path).unwrap();
        assert_eq!(store.best(), 0);
    }

    #[test]
    fn test_only_improvements_are_written() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("highscore.dat");
        let mut store = HighScoreFile::open(&path).unwrap();

        assert!(store.record(50).unwrap());
        assert!(!store.record(30).unwrap());
        assert_eq!(store.best(), 50);

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(bytes.len(), RECORD_LEN);
        assert_eq!(HighScoreFile::open(&path).unwrap().best(), 50);
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/deeper/highscore.dat");
        let mut store = HighScoreFile::open(&path).unwrap();

        assert!(store.record(12).unwrap());
        assert!(path.exists());
    }

    #[test]
    fn test_memory_store_is_monotonic() {
        let mut store = MemoryScoreStore::default();
        assert!(store.record(10).unwrap());
        assert!(!store.record(5).unwrap());
        assert!(!store.record(10).unwrap());
        assert_eq!(store.best(), 10);
    }
}
