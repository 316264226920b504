use rand::Rng;
use serde::{Deserialize, Serialize};

use super::action::Direction;
use super::grid::Grid;

/// Longest a snake can grow
pub const MAX_SNAKE_LENGTH: usize = 100;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn stepped(&self, velocity: Velocity) -> Self {
        self.moved_by(velocity.dx, velocity.dy)
    }
}

/// Per-tick displacement, each component in {-1, 0, 1}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Velocity {
    pub dx: i32,
    pub dy: i32,
}

impl Velocity {
    pub const ZERO: Velocity = Velocity { dx: 0, dy: 0 };

    pub fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    pub fn reversed(&self) -> Self {
        Self::new(-self.dx, -self.dy)
    }

    /// Uniform draw from the eight neighbouring steps
    pub fn random_nonzero<R: Rng + ?Sized>(rng: &mut R) -> Self {
        loop {
            let v = Self::new(rng.gen_range(-1..=1), rng.gen_range(-1..=1));
            if !v.is_zero() {
                return v;
            }
        }
    }
}

/// Display colour of a snake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnakeColor {
    Green,
    Blue,
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    pub velocity: Velocity,
    /// Direction of the last step actually taken
    pub heading: Option<Direction>,
    pub alive: bool,
    pub score: u32,
    pub color: SnakeColor,
    pub name: String,
}

impl Snake {
    /// Lay out a straight snake trailing behind `head`, opposite to `velocity`
    pub fn straight(head: Position, velocity: Velocity, length: usize) -> Self {
        let length = length.clamp(1, MAX_SNAKE_LENGTH);
        let mut body = Vec::with_capacity(MAX_SNAKE_LENGTH);
        body.push(head);
        let back = velocity.reversed();
        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev.stepped(back));
        }

        Self {
            body,
            velocity,
            heading: Direction::from_velocity(velocity),
            alive: true,
            score: 0,
            color: SnakeColor::Green,
            name: String::from("Player"),
        }
    }

    pub fn with_identity(mut self, name: &str, color: SnakeColor) -> Self {
        self.name = name.to_string();
        self.color = color;
        self
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    /// Change velocity unless it would reverse the last step taken.
    /// Several turns between two steps are all checked against that step.
    /// Returns whether the velocity changed.
    pub fn steer(&mut self, direction: Direction) -> bool {
        if !self.alive {
            return false;
        }
        if self.heading.is_some_and(|heading| heading.is_opposite(direction)) {
            return false;
        }
        let next = direction.velocity();
        let changed = next != self.velocity;
        self.velocity = next;
        changed
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Visual and scoring category of a fruit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FoodKind {
    Apple,
    Banana,
    Grapes,
    Star,
}

impl FoodKind {
    pub const ALL: [FoodKind; 4] = [
        FoodKind::Apple,
        FoodKind::Banana,
        FoodKind::Grapes,
        FoodKind::Star,
    ];

    pub fn index(&self) -> usize {
        match self {
            FoodKind::Apple => 0,
            FoodKind::Banana => 1,
            FoodKind::Grapes => 2,
            FoodKind::Star => 3,
        }
    }

    /// Points awarded when eaten in challenge mode
    pub fn value(&self) -> u32 {
        match self {
            FoodKind::Apple => 1,
            FoodKind::Banana => 2,
            FoodKind::Grapes => 3,
            FoodKind::Star => 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    pub position: Position,
    pub active: bool,
    pub value: u32,
    pub kind: FoodKind,
    pub moving: bool,
    pub velocity: Velocity,
}

impl Food {
    /// A stationary apple worth one point
    pub fn apple(position: Position) -> Self {
        Self {
            position,
            active: true,
            value: 1,
            kind: FoodKind::Apple,
            moving: false,
            velocity: Velocity::ZERO,
        }
    }

    pub fn of_kind(position: Position, kind: FoodKind) -> Self {
        Self {
            value: kind.value(),
            kind,
            ..Self::apple(position)
        }
    }

    pub fn inactive() -> Self {
        Self {
            active: false,
            ..Self::apple(Position::new(0, 0))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Obstacle {
    pub position: Position,
    pub moving: bool,
    pub velocity: Velocity,
}

impl Obstacle {
    pub fn fixed(position: Position) -> Self {
        Self {
            position,
            moving: false,
            velocity: Velocity::ZERO,
        }
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
    /// Snake ran into the other player
    Opponent,
    /// Snake ran into an obstacle
    Obstacle,
}

/// Top-level phase of a play session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameState {
    #[default]
    Menu,
    Playing,
    GameOver,
}

/// Every entity on the board for one session
#[derive(Debug, Clone, PartialEq)]
pub struct World {
    pub grid: Grid,
    pub snakes: Vec<Snake>,
    pub foods: Vec<Food>,
    pub obstacles: Vec<Obstacle>,
}

impl World {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            snakes: Vec::new(),
            foods: Vec::new(),
            obstacles: Vec::new(),
        }
    }

    /// The first snake; single-player sessions have only this one
    pub fn primary(&self) -> Option<&Snake> {
        self.snakes.first()
    }

    /// Check if a position is occupied by any snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snakes.iter().any(|s| s.body.contains(&pos))
    }

    pub fn active_foods(&self) -> impl Iterator<Item = &Food> {
        self.foods.iter().filter(|f| f.active)
    }

    pub fn obstacle_at(&self, pos: Position) -> bool {
        self.obstacles.iter().any(|o| o.position == pos)
    }
}
