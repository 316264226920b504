use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use snake_arcade::game::{GameConfig, GameSession, Variant};
use snake_arcade::modes::{launcher, Launcher, PlayMode};
use snake_arcade::persistence::{HighScoreFile, MemoryScoreStore, ScoreStore};
use snake_arcade::settings::Settings;
use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "snake_arcade")]
#[command(version, about = "Terminal snake: classic, challenge and two-player")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// JSON settings file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the single-player high score file
    #[arg(long, global = true)]
    highscore_file: Option<PathBuf>,

    /// Override the log file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Seed the random source for a reproducible game
    #[arg(long, global = true)]
    seed: Option<u64>,
}

#[derive(Clone, Copy, Subcommand)]
enum Command {
    /// Pick a variant from the launcher menu
    Menu,
    /// Single player with a persisted high score
    Classic,
    /// Single player with feature toggles
    Challenge,
    /// Two players on one keyboard
    Versus,
}

impl Cli {
    fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        if let Some(path) = &self.highscore_file {
            settings.highscore_file = path.clone();
        }
        if let Some(path) = &self.log_file {
            settings.log_file = path.clone();
        }
        Ok(settings)
    }

    /// Global options to pass on when the launcher starts a variant
    fn forwarded_args(&self) -> Vec<OsString> {
        let mut args = Vec::new();
        if let Some(path) = &self.config {
            args.push("--config".into());
            args.push(path.into());
        }
        if let Some(path) = &self.highscore_file {
            args.push("--highscore-file".into());
            args.push(path.into());
        }
        if let Some(path) = &self.log_file {
            args.push("--log-file".into());
            args.push(path.into());
        }
        if let Some(seed) = self.seed {
            args.push("--seed".into());
            args.push(seed.to_string().into());
        }
        args
    }
}

fn init_logging(settings: &Settings) -> Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&settings.log_file)
        .with_context(|| format!("Failed to open log file {:?}", settings.log_file))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "snake_arcade=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Arc::new(file)),
        )
        .init();
    Ok(())
}

async fn play(variant: Variant, cli: &Cli, settings: &Settings) -> Result<()> {
    let config = GameConfig::for_variant(variant);
    let session = match cli.seed {
        Some(seed) => GameSession::seeded(config, seed),
        None => GameSession::from_entropy(config),
    };

    let store: Box<dyn ScoreStore> = if session.config().tracks_high_score {
        let file = HighScoreFile::open(&settings.highscore_file)?;
        info!(path = %file.path().display(), best = file.best(), "high score file opened");
        Box::new(file)
    } else {
        Box::new(MemoryScoreStore::default())
    };

    info!(?variant, seed = ?cli.seed, "starting game");
    let mut mode = PlayMode::new(
        session,
        store,
        settings.frame_interval(),
        settings.sim_poll_interval(),
    );
    mode.run().await
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = cli.settings()?;
    init_logging(&settings)?;

    match cli.command.unwrap_or(Command::Menu) {
        Command::Menu => {
            let mut menu = Launcher::new(settings.frame_interval());
            if let Some(variant) = menu.run().await? {
                launcher::launch(variant, cli.forwarded_args())?;
            }
        }
        Command::Classic => play(Variant::Classic, &cli, &settings).await?,
        Command::Challenge => play(Variant::Challenge, &cli, &settings).await?,
        Command::Versus => play(Variant::Versus, &cli, &settings).await?,
    }

    Ok(())
}
