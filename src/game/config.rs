use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::grid::{Grid, GRID_HEIGHT, GRID_WIDTH};
use super::state::{Position, SnakeColor, Velocity};

/// Which of the three games a session plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Variant {
    Classic,
    Challenge,
    Versus,
}

/// A single challenge-mode toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Feature {
    MovingFruit,
    MultiFruit,
    Timed,
    Speed,
    Obstacles,
}

impl Feature {
    /// Menu order
    pub const ALL: [Feature; 5] = [
        Feature::MovingFruit,
        Feature::MultiFruit,
        Feature::Timed,
        Feature::Speed,
        Feature::Obstacles,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Feature::MovingFruit => "Moving Fruit",
            Feature::MultiFruit => "Multi-Fruit",
            Feature::Timed => "Timed Mode",
            Feature::Speed => "Speed Mode",
            Feature::Obstacles => "Moving Obstacle",
        }
    }
}

/// Enabled challenge-mode features
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Features {
    pub moving_fruit: bool,
    pub multi_fruit: bool,
    pub timed: bool,
    pub obstacles: bool,
    pub speed: bool,
}

impl Features {
    /// Everything on
    pub fn chaos() -> Self {
        Self {
            moving_fruit: true,
            multi_fruit: true,
            timed: true,
            obstacles: true,
            speed: true,
        }
    }

    pub fn is_chaos(&self) -> bool {
        *self == Self::chaos()
    }

    pub fn is_classic(&self) -> bool {
        *self == Self::default()
    }

    pub fn is_enabled(&self, feature: Feature) -> bool {
        match feature {
            Feature::MovingFruit => self.moving_fruit,
            Feature::MultiFruit => self.multi_fruit,
            Feature::Timed => self.timed,
            Feature::Speed => self.speed,
            Feature::Obstacles => self.obstacles,
        }
    }

    pub fn toggle(&mut self, feature: Feature) {
        let flag = match feature {
            Feature::MovingFruit => &mut self.moving_fruit,
            Feature::MultiFruit => &mut self.multi_fruit,
            Feature::Timed => &mut self.timed,
            Feature::Speed => &mut self.speed,
            Feature::Obstacles => &mut self.obstacles,
        };
        *flag = !*flag;
    }

    /// Human readable name of this feature combination
    pub fn mode_name(&self) -> String {
        if self.is_chaos() {
            return "CHAOS MODE".to_string();
        }
        if self.is_classic() {
            return "CLASSIC".to_string();
        }

        let mut tokens: Vec<&str> = Vec::new();
        if self.speed {
            tokens.push("SPEED");
        }
        if self.timed {
            tokens.push("TIMED");
        }
        if self.obstacles {
            tokens.push(if self.moving_fruit {
                "MVG-OBSTACLE"
            } else {
                "OBSTACLE"
            });
        }
        if self.multi_fruit {
            tokens.push("MULTI-FRUIT");
        } else if self.moving_fruit && !self.obstacles {
            // with obstacles on, the MVG- prefix already names the movement
            tokens.push("MVG-FRUIT");
        }
        tokens.join("+")
    }
}

/// How eaten food is replaced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FoodPolicy {
    /// Eaten food jumps to a new free cell straight away
    Relocate,
    /// A fixed pool where exactly `active` items are live after every tick
    MaintainActive { pool: usize, active: usize },
}

/// Starting layout for one snake
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub head: Position,
    pub velocity: Velocity,
    pub length: usize,
    pub name: String,
    pub color: SnakeColor,
}

/// Ruleset for one play session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub variant: Variant,
    pub grid: Grid,
    pub features: Features,
    /// Time between snake steps
    pub update_delay: Duration,
    /// Countdown length, if the session is timed
    pub time_limit: Option<Duration>,
    pub fruit_move_interval: Option<Duration>,
    pub moving_obstacles: bool,
    pub obstacle_move_interval: Option<Duration>,
    pub food_policy: FoodPolicy,
    /// Heads die on the other snake's body
    pub opponent_collisions: bool,
    /// Score is compared to the persisted best on game over
    pub tracks_high_score: bool,
    pub spawns: Vec<SpawnPoint>,
    pub mode_name: String,
}

/// Snake step interval with the speed feature on
pub const FAST_UPDATE_DELAY: Duration = Duration::from_millis(100);
/// Default snake step interval
pub const NORMAL_UPDATE_DELAY: Duration = Duration::from_millis(150);
pub const CHALLENGE_TIME_LIMIT: Duration = Duration::from_secs(60);
pub const VERSUS_TIME_LIMIT: Duration = Duration::from_secs(120);
pub const FRUIT_MOVE_INTERVAL: Duration = Duration::from_millis(500);
pub const OBSTACLE_MOVE_INTERVAL: Duration = Duration::from_millis(800);
/// Slots in the two-player food pool
pub const VERSUS_FOOD_POOL: usize = 10;
/// Live foods in the two-player game
pub const VERSUS_ACTIVE_FOODS: usize = 2;

impl GameConfig {
    /// Single player: one apple, persisted best score
    pub fn classic() -> Self {
        Self {
            variant: Variant::Classic,
            grid: Grid::default(),
            features: Features::default(),
            update_delay: NORMAL_UPDATE_DELAY,
            time_limit: None,
            fruit_move_interval: None,
            moving_obstacles: false,
            obstacle_move_interval: None,
            food_policy: FoodPolicy::Relocate,
            opponent_collisions: false,
            tracks_high_score: true,
            spawns: vec![SpawnPoint {
                head: Position::new(5, 5),
                velocity: Velocity::new(1, 0),
                length: 5,
                name: "Player".to_string(),
                color: SnakeColor::Green,
            }],
            mode_name: "CLASSIC".to_string(),
        }
    }

    /// Challenge mode with the given feature set
    pub fn challenge(features: Features) -> Self {
        let moving_obstacles = features.obstacles && features.moving_fruit;
        let grid = Grid::default();

        Self {
            variant: Variant::Challenge,
            grid,
            features,
            update_delay: if features.speed {
                FAST_UPDATE_DELAY
            } else {
                NORMAL_UPDATE_DELAY
            },
            time_limit: features.timed.then_some(CHALLENGE_TIME_LIMIT),
            fruit_move_interval: features.moving_fruit.then_some(FRUIT_MOVE_INTERVAL),
            moving_obstacles,
            obstacle_move_interval: moving_obstacles.then_some(OBSTACLE_MOVE_INTERVAL),
            food_policy: FoodPolicy::Relocate,
            opponent_collisions: false,
            tracks_high_score: false,
            spawns: vec![SpawnPoint {
                head: grid.center(),
                velocity: Velocity::new(1, 0),
                length: 3,
                name: "Player".to_string(),
                color: SnakeColor::Green,
            }],
            mode_name: features.mode_name(),
        }
    }

    /// Two players on one keyboard, two minutes on the clock
    pub fn versus() -> Self {
        Self {
            variant: Variant::Versus,
            grid: Grid::default(),
            features: Features::default(),
            update_delay: NORMAL_UPDATE_DELAY,
            time_limit: Some(VERSUS_TIME_LIMIT),
            fruit_move_interval: None,
            moving_obstacles: false,
            obstacle_move_interval: None,
            food_policy: FoodPolicy::MaintainActive {
                pool: VERSUS_FOOD_POOL,
                active: VERSUS_ACTIVE_FOODS,
            },
            opponent_collisions: true,
            tracks_high_score: false,
            spawns: vec![
                SpawnPoint {
                    head: Position::new(5, 5),
                    velocity: Velocity::new(1, 0),
                    length: 3,
                    name: "Player A".to_string(),
                    color: SnakeColor::Green,
                },
                SpawnPoint {
                    head: Position::new(GRID_WIDTH - 6, GRID_HEIGHT - 6),
                    velocity: Velocity::new(-1, 0),
                    length: 3,
                    name: "Player B".to_string(),
                    color: SnakeColor::Blue,
                },
            ],
            mode_name: "TWO PLAYER".to_string(),
        }
    }

    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Classic => Self::classic(),
            Variant::Challenge => Self::challenge(Features::default()),
            Variant::Versus => Self::versus(),
        }
    }

    pub fn has_obstacles(&self) -> bool {
        self.features.obstacles
    }
}
