//! Best-score storage

pub mod highscore;

pub use highscore::{HighScoreFile, MemoryScoreStore, ScoreStore};
