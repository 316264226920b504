use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use std::time::{Duration, Instant};
use tokio::time::interval;
use tracing::{debug, info};

use super::terminal::{self, Tui};
use crate::game::GameSession;
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::persistence::ScoreStore;
use crate::render::Renderer;

/// Runs one game variant in the terminal until the player quits
pub struct PlayMode {
    session: GameSession,
    store: Box<dyn ScoreStore>,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    frame_interval: Duration,
    sim_interval: Duration,
    should_quit: bool,
}

impl PlayMode {
    pub fn new(
        mut session: GameSession,
        store: Box<dyn ScoreStore>,
        frame_interval: Duration,
        sim_interval: Duration,
    ) -> Self {
        session.load_best(&*store);
        let input_handler = InputHandler::new(session.variant());

        Self {
            session,
            store,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler,
            frame_interval,
            sim_interval,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = terminal::setup()?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        terminal::restore(&mut terminal)?;
        info!(games = self.metrics.games_played, best = self.metrics.best_this_run, "leaving play mode");

        result
    }

    async fn run_game_loop(&mut self, terminal: &mut Tui) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Elapsed time is fed to the session often; it decides when the snakes move
        let mut sim_timer = interval(self.sim_interval);
        let mut render_timer = interval(self.frame_interval);
        let mut last_update = Instant::now();

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event)?;
                    }
                }

                _ = sim_timer.tick() => {
                    let now = Instant::now();
                    let dt = now - last_update;
                    last_update = now;
                    if let Some(report) = self.session.update(dt, &mut *self.store)? {
                        if !report.collisions.is_empty() {
                            debug!(collisions = ?report.collisions, "collisions this step");
                        }
                    }
                }

                _ = render_timer.tick() => {
                    self.metrics.observe(self.session.state(), self.session.score());
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.session, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit || self.session.should_exit() {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            match self
                .input_handler
                .handle_key_event(key, self.session.state())
            {
                KeyAction::GameAction(action) => self.session.apply(action)?,
                KeyAction::Quit => self.should_quit = true,
                KeyAction::None => {}
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameConfig, GameState};
    use crate::persistence::MemoryScoreStore;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn mode(config: GameConfig, best: u32) -> PlayMode {
        PlayMode::new(
            GameSession::seeded(config, 8),
            Box::new(MemoryScoreStore::new(best)),
            Duration::from_millis(16),
            Duration::from_millis(5),
        )
    }

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_game_initialization() {
        let mode = mode(GameConfig::classic(), 12);
        assert_eq!(mode.session.state(), GameState::Menu);
        assert_eq!(mode.session.best_score(), 12);
    }

    #[test]
    fn test_enter_starts_and_q_quits() {
        let mut mode = mode(GameConfig::versus(), 0);

        mode.handle_event(press(KeyCode::Enter)).unwrap();
        assert_eq!(mode.session.state(), GameState::Playing);
        assert_eq!(mode.session.world().snakes.len(), 2);

        mode.handle_event(press(KeyCode::Char('q'))).unwrap();
        assert!(mode.session.should_exit());
    }
}
