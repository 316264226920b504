use anyhow::{Context, Result};
use rand::{rngs::StdRng, SeedableRng};
use std::time::Duration;
use tracing::{info, warn};

use super::{
    action::{Action, Control, PlayerSlot},
    config::{Features, FoodPolicy, GameConfig, Variant},
    engine::{self, StepReport},
    placement::{self, PlacementError},
    state::{Food, GameState, Snake, World},
};
use crate::persistence::ScoreStore;

/// Result of a finished two-player game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Winner(PlayerSlot),
    Draw,
}

/// Owns one variant's world and drives it through menu, play and game over
pub struct GameSession {
    config: GameConfig,
    /// Challenge toggles as currently checked in the menu
    features: Features,
    state: GameState,
    world: World,
    rng: StdRng,
    step_clock: Duration,
    fruit_clock: Duration,
    obstacle_clock: Duration,
    time_remaining: Option<Duration>,
    timed_out: bool,
    best_score: u32,
    /// The last finished game raised the stored best
    new_best: bool,
    should_exit: bool,
}

impl GameSession {
    pub fn new(config: GameConfig, rng: StdRng) -> Self {
        let world = World::new(config.grid);
        let features = config.features;

        Self {
            config,
            features,
            state: GameState::Menu,
            world,
            rng,
            step_clock: Duration::ZERO,
            fruit_clock: Duration::ZERO,
            obstacle_clock: Duration::ZERO,
            time_remaining: None,
            timed_out: false,
            best_score: 0,
            new_best: false,
            should_exit: false,
        }
    }

    /// Deterministic session for replays and tests
    pub fn seeded(config: GameConfig, seed: u64) -> Self {
        Self::new(config, StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy(config: GameConfig) -> Self {
        Self::new(config, StdRng::from_entropy())
    }

    /// Seed the displayed best score from persistent storage
    pub fn load_best(&mut self, store: &dyn ScoreStore) {
        self.best_score = store.best();
    }

    /// Rebuild the world for the current ruleset
    pub fn reset(&mut self) -> Result<(), PlacementError> {
        let mut world = World::new(self.config.grid);
        world.snakes = self
            .config
            .spawns
            .iter()
            .map(|spawn| {
                Snake::straight(spawn.head, spawn.velocity, spawn.length)
                    .with_identity(&spawn.name, spawn.color)
            })
            .collect();
        self.world = world;

        if self.config.has_obstacles() {
            placement::place_obstacles(
                &mut self.rng,
                &mut self.world,
                self.config.moving_obstacles,
            )?;
        }
        match self.config.food_policy {
            FoodPolicy::Relocate => {
                placement::initial_foods(&mut self.rng, &mut self.world, &self.config)?
            }
            FoodPolicy::MaintainActive { pool, active } => {
                self.world.foods = vec![Food::inactive(); pool];
                placement::maintain_active_foods(&mut self.rng, &mut self.world, active)?;
            }
        }

        self.step_clock = Duration::ZERO;
        self.fruit_clock = Duration::ZERO;
        self.obstacle_clock = Duration::ZERO;
        self.time_remaining = self.config.time_limit;
        self.timed_out = false;
        self.new_best = false;
        Ok(())
    }

    /// Apply one normalized input signal
    pub fn apply(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Steer { player, direction } => {
                if self.state == GameState::Playing {
                    if let Some(snake) = self.world.snakes.get_mut(player.index()) {
                        snake.steer(direction);
                    }
                }
            }
            Action::Activate(control) => self.activate(control)?,
        }
        Ok(())
    }

    fn activate(&mut self, control: Control) -> Result<()> {
        match (control, self.state) {
            (Control::Play, GameState::Menu) => self.start()?,
            (Control::PlayAgain, GameState::GameOver) => {
                // The challenge game over screen leads back to feature selection
                if self.config.variant == Variant::Challenge {
                    self.state = GameState::Menu;
                } else {
                    self.start()?;
                }
            }
            (Control::Menu, _) => {
                if self.state == GameState::Playing {
                    info!(score = self.score(), "session abandoned");
                }
                self.state = GameState::Menu;
            }
            (Control::Toggle(feature), GameState::Menu) => {
                if self.config.variant == Variant::Challenge {
                    self.features.toggle(feature);
                }
            }
            (Control::Chaos, GameState::Menu) => {
                if self.config.variant == Variant::Challenge {
                    self.features = Features::chaos();
                }
            }
            (Control::Exit, _) => self.should_exit = true,
            _ => {}
        }
        Ok(())
    }

    fn start(&mut self) -> Result<()> {
        if self.config.variant == Variant::Challenge {
            self.config = GameConfig::challenge(self.features);
        }
        self.reset().context("Failed to set up the board")?;
        self.state = GameState::Playing;
        info!(mode = %self.config.mode_name, "session started");
        Ok(())
    }

    /// Advance the simulation by `dt` of wall-clock time.
    ///
    /// Runs the countdown, the drifting fruit and obstacles on their own
    /// intervals, then at most one snake step once `update_delay` has built
    /// up. Returns the step report when the snakes moved.
    pub fn update(&mut self, dt: Duration, store: &mut dyn ScoreStore) -> Result<Option<StepReport>> {
        if self.state != GameState::Playing {
            return Ok(None);
        }

        if let Some(remaining) = self.time_remaining {
            let remaining = remaining.saturating_sub(dt);
            self.time_remaining = Some(remaining);
            if remaining.is_zero() {
                self.expire_timer();
                self.finish(store)?;
                return Ok(None);
            }
        }

        if let Some(interval) = self.config.fruit_move_interval {
            self.fruit_clock += dt;
            if self.fruit_clock >= interval {
                self.fruit_clock = Duration::ZERO;
                engine::move_foods(&mut self.world);
            }
        }
        if let Some(interval) = self.config.obstacle_move_interval {
            self.obstacle_clock += dt;
            if self.obstacle_clock >= interval {
                self.obstacle_clock = Duration::ZERO;
                engine::move_obstacles(&mut self.world);
            }
        }

        self.step_clock += dt;
        let mut report = None;
        if self.step_clock >= self.config.update_delay {
            self.step_clock = Duration::ZERO;
            report = Some(self.step());
        }

        if self.is_terminal() {
            self.finish(store)?;
        }
        Ok(report)
    }

    /// Force one snake step regardless of elapsed time
    pub fn tick(&mut self, store: &mut dyn ScoreStore) -> Result<StepReport> {
        if self.state != GameState::Playing {
            return Ok(StepReport::default());
        }
        let report = self.step();
        if self.is_terminal() {
            self.finish(store)?;
        }
        Ok(report)
    }

    fn step(&mut self) -> StepReport {
        let mut report = StepReport::default();

        // Snakes move in player order, so later players see earlier ones' new bodies
        for index in 0..self.world.snakes.len() {
            if let Some(kind) = engine::step_snake(&mut self.world, index, &self.config) {
                report.collisions.push((index, kind));
            }
        }

        for index in 0..self.world.snakes.len() {
            if let Some(food) = engine::consume_food(&mut self.world, index) {
                report.eaten.push((index, food));
                if self.config.food_policy == FoodPolicy::Relocate {
                    if let Err(err) = placement::respawn_food(&mut self.rng, &mut self.world, food) {
                        warn!(%err, "eaten food not replaced");
                        report.placement_failures += 1;
                    }
                }
            }
        }

        if let FoodPolicy::MaintainActive { active, .. } = self.config.food_policy {
            if let Err(err) =
                placement::maintain_active_foods(&mut self.rng, &mut self.world, active)
            {
                warn!(%err, "food pool not refilled");
                report.placement_failures += 1;
            }
        }

        report
    }

    fn expire_timer(&mut self) {
        self.timed_out = true;
        if self.config.variant != Variant::Versus {
            if let Some(snake) = self.world.snakes.first_mut() {
                snake.alive = false;
            }
        }
        info!("time is up");
    }

    fn is_terminal(&self) -> bool {
        match self.config.variant {
            Variant::Versus => self.timed_out || self.world.snakes.iter().all(|s| !s.alive),
            Variant::Classic | Variant::Challenge => {
                self.world.primary().map_or(true, |s| !s.alive)
            }
        }
    }

    fn finish(&mut self, store: &mut dyn ScoreStore) -> Result<()> {
        self.state = GameState::GameOver;
        let score = self.score();

        if self.config.tracks_high_score {
            self.new_best = store.record(score)?;
            if self.new_best {
                info!(score, "new high score");
            }
            self.best_score = store.best();
        }
        info!(score, mode = %self.config.mode_name, "game over");
        Ok(())
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable board access for scripted scenarios
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn features(&self) -> Features {
        self.features
    }

    pub fn variant(&self) -> Variant {
        self.config.variant
    }

    /// Primary player's score
    pub fn score(&self) -> u32 {
        self.world.primary().map_or(0, |s| s.score)
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    /// Whether the finished game beat the stored best score
    pub fn is_new_best(&self) -> bool {
        self.new_best
    }

    pub fn time_remaining(&self) -> Option<Duration> {
        self.time_remaining
    }

    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    /// Winner by score once a two-player game is over
    pub fn outcome(&self) -> Option<Outcome> {
        if self.state != GameState::GameOver || self.world.snakes.len() < 2 {
            return None;
        }
        let a = self.world.snakes[0].score;
        let b = self.world.snakes[1].score;
        Some(match a.cmp(&b) {
            std::cmp::Ordering::Greater => Outcome::Winner(PlayerSlot::One),
            std::cmp::Ordering::Less => Outcome::Winner(PlayerSlot::Two),
            std::cmp::Ordering::Equal => Outcome::Draw,
        })
    }
}
