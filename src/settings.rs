use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Runtime settings for the front end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where the single-player best score is kept
    pub highscore_file: PathBuf,
    /// Log output; the terminal belongs to the UI
    pub log_file: PathBuf,
    /// Target time between rendered frames
    pub frame_interval_ms: u64,
    /// How often elapsed time is fed to the simulation
    pub sim_poll_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            highscore_file: PathBuf::from("highscore.dat"),
            log_file: PathBuf::from("snake_arcade.log"),
            frame_interval_ms: 16,
            sim_poll_ms: 5,
        }
    }
}

impl Settings {
    /// Read settings from a JSON file; missing keys keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {:?}", path))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse settings in {:?}", path))
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms.max(1))
    }

    pub fn sim_poll_interval(&self) -> Duration {
        Duration::from_millis(self.sim_poll_ms.max(1))
    }
}
