use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use std::ffi::OsString;
use std::time::Duration;
use tokio::time::interval;
use tracing::info;

use super::terminal::{self, Tui};
use crate::game::Variant;
use crate::render::{Renderer, LAUNCHER_ENTRIES};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LauncherAction {
    None,
    Launch(Variant),
    Quit,
}

/// Top-level menu that picks a variant and hands the process over to it
pub struct Launcher {
    selected: usize,
    renderer: Renderer,
    frame_interval: Duration,
}

impl Launcher {
    pub fn new(frame_interval: Duration) -> Self {
        Self {
            selected: 0,
            renderer: Renderer::new(),
            frame_interval,
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> LauncherAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return LauncherAction::Quit;
        }

        let count = LAUNCHER_ENTRIES.len();
        match key.code {
            KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
                self.selected = (self.selected + count - 1) % count;
                LauncherAction::None
            }
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
                self.selected = (self.selected + 1) % count;
                LauncherAction::None
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                LauncherAction::Launch(LAUNCHER_ENTRIES[self.selected].1)
            }
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => LauncherAction::Quit,
            _ => LauncherAction::None,
        }
    }

    /// Show the menu until a variant is chosen; `None` means the user quit
    pub async fn run(&mut self) -> Result<Option<Variant>> {
        let mut terminal = terminal::setup()?;
        let result = self.run_menu_loop(&mut terminal).await;
        terminal::restore(&mut terminal)?;
        result
    }

    async fn run_menu_loop(&mut self, terminal: &mut Tui) -> Result<Option<Variant>> {
        let mut event_stream = EventStream::new();
        let mut render_timer = interval(self.frame_interval);

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(Event::Key(key))) = maybe_event {
                        if key.kind != KeyEventKind::Press {
                            continue;
                        }
                        match self.handle_key(key) {
                            LauncherAction::Launch(variant) => return Ok(Some(variant)),
                            LauncherAction::Quit => return Ok(None),
                            LauncherAction::None => {}
                        }
                    }
                }

                _ = render_timer.tick() => {
                    let selected = self.selected;
                    terminal.draw(|frame| {
                        self.renderer.render_launcher(frame, selected);
                    }).context("Failed to draw launcher")?;
                }

                _ = tokio::signal::ctrl_c() => return Ok(None),
            }
        }
    }
}

/// Command-line subcommand that starts `variant`
pub fn subcommand(variant: Variant) -> &'static str {
    match variant {
        Variant::Classic => "classic",
        Variant::Challenge => "challenge",
        Variant::Versus => "versus",
    }
}

/// Replace the current process with the chosen variant's executable
pub fn launch(variant: Variant, forward_args: Vec<OsString>) -> Result<()> {
    let exe = std::env::current_exe().context("Failed to locate the current executable")?;
    let mut command = std::process::Command::new(&exe);
    command.args(&forward_args).arg(subcommand(variant));

    info!(?exe, variant = subcommand(variant), "launching game");

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        // exec only returns on failure
        let err = command.exec();
        return Err(err).with_context(|| format!("Failed to exec {:?}", exe));
    }

    #[cfg(not(unix))]
    {
        let status = command
            .status()
            .with_context(|| format!("Failed to run {:?}", exe))?;
        std::process::exit(status.code().unwrap_or(1));
    }
}
