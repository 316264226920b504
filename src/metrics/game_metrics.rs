use std::time::{Duration, Instant};

use crate::game::GameState;

/// Per-process play statistics shown in the HUD
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub best_this_run: u32,
    pub games_played: u32,
    last_state: GameState,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            best_this_run: 0,
            games_played: 0,
            last_state: GameState::Menu,
        }
    }

    /// Called once per frame with the session's current phase and score
    pub fn observe(&mut self, state: GameState, score: u32) {
        match (self.last_state, state) {
            (previous, GameState::Playing) if previous != GameState::Playing => {
                self.on_game_start()
            }
            (GameState::Playing, GameState::GameOver) => self.on_game_over(score),
            _ => {}
        }
        if state == GameState::Playing {
            self.elapsed_time = self.start_time.elapsed();
        }
        self.last_state = state;
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.games_played += 1;
        if final_score > self.best_this_run {
            self.best_this_run = final_score;
        }
    }

    pub fn format_time(&self) -> String {
        format_clock(self.elapsed_time)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// `MM:SS`, truncated to whole seconds
pub fn format_clock(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_formatting() {
        assert_eq!(format_clock(Duration::from_secs(125)), "02:05");
        assert_eq!(format_clock(Duration::from_secs(0)), "00:00");
        assert_eq!(format_clock(Duration::from_millis(119_999)), "01:59");
        assert_eq!(format_clock(Duration::from_secs(3661)), "61:01");
    }

    #[test]
    fn test_best_score_tracking() {
        let mut metrics = GameMetrics::new();

        metrics.on_game_over(10);
        assert_eq!(metrics.best_this_run, 10);
        assert_eq!(metrics.games_played, 1);

        metrics.on_game_over(5);
        assert_eq!(metrics.best_this_run, 10); // Should not decrease
        assert_eq!(metrics.games_played, 2);
    }

    #[test]
    fn test_observe_counts_transitions_once() {
        let mut metrics = GameMetrics::new();

        metrics.observe(GameState::Playing, 0);
        metrics.observe(GameState::Playing, 3);
        metrics.observe(GameState::GameOver, 4);
        metrics.observe(GameState::GameOver, 4);

        assert_eq!(metrics.games_played, 1);
        assert_eq!(metrics.best_this_run, 4);
    }

    #[test]
    fn test_game_start_resets_time() {
        let mut metrics = GameMetrics::new();
        std::thread::sleep(Duration::from_millis(50));
        metrics.observe(GameState::Playing, 0);

        assert!(metrics.elapsed_time.as_millis() < 50);
    }
}
