//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The same engine runs the classic, challenge and two-player variants; a
//! [`GameConfig`] picks the rules.

pub mod action;
pub mod config;
pub mod engine;
pub mod grid;
pub mod placement;
pub mod session;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Control, Direction, PlayerSlot};
pub use config::{Feature, Features, FoodPolicy, GameConfig, Variant};
pub use engine::StepReport;
pub use grid::{Grid, GRID_HEIGHT, GRID_WIDTH};
pub use placement::PlacementError;
pub use session::{GameSession, Outcome};
pub use state::{
    CollisionType, Food, FoodKind, GameState, Obstacle, Position, Snake, SnakeColor, Velocity,
    World, MAX_SNAKE_LENGTH,
};
