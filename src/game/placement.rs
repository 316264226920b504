//! Random placement of food and obstacles on free cells
//!
//! Placement samples uniformly random cells and rejects any that an
//! [`Occupant`] claims. Sampling is bounded: after [`MAX_RANDOM_ATTEMPTS`]
//! misses the resolver scans the whole grid and picks among the free cells,
//! so a crowded board never spins forever and a full one reports
//! [`PlacementError::BoardSaturated`].

use rand::{seq::SliceRandom, Rng};
use thiserror::Error;
use tracing::debug;

use super::config::GameConfig;
use super::grid::Grid;
use super::state::{Food, FoodKind, Obstacle, Position, Snake, Velocity, World};

/// Random samples tried before falling back to a full scan
pub const MAX_RANDOM_ATTEMPTS: usize = 512;

/// Obstacles stay outside this Chebyshev radius of the primary snake's head
pub const HEAD_CLEARANCE: i32 = 3;

/// Inclusive range of obstacles generated per session
pub const OBSTACLE_COUNT_RANGE: std::ops::RangeInclusive<usize> = 15..=30;

/// Inclusive range of fruits in multi-fruit mode
pub const MULTI_FRUIT_RANGE: std::ops::RangeInclusive<usize> = 3..=5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("no free cell left on the {width}x{height} board")]
    BoardSaturated { width: i32, height: i32 },
}

/// Anything that claims grid cells
pub trait Occupant {
    fn occupies(&self, pos: Position) -> bool;
}

impl Occupant for Position {
    fn occupies(&self, pos: Position) -> bool {
        *self == pos
    }
}

impl Occupant for Snake {
    fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }
}

impl Occupant for Food {
    fn occupies(&self, pos: Position) -> bool {
        self.active && self.position == pos
    }
}

impl Occupant for Obstacle {
    fn occupies(&self, pos: Position) -> bool {
        self.position == pos
    }
}

impl<T: Occupant> Occupant for Vec<T> {
    fn occupies(&self, pos: Position) -> bool {
        self.iter().any(|item| item.occupies(pos))
    }
}

impl<T: Occupant> Occupant for Option<T> {
    fn occupies(&self, pos: Position) -> bool {
        self.as_ref().is_some_and(|item| item.occupies(pos))
    }
}

/// Square keep-out zone: cells with both axis distances below `radius`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exclusion {
    pub center: Position,
    pub radius: i32,
}

impl Occupant for Exclusion {
    fn occupies(&self, pos: Position) -> bool {
        (pos.x - self.center.x).abs() < self.radius && (pos.y - self.center.y).abs() < self.radius
    }
}

/// Find a random cell none of `occupied` claims
pub fn place<R: Rng + ?Sized>(
    rng: &mut R,
    grid: &Grid,
    occupied: &[&dyn Occupant],
) -> Result<Position, PlacementError> {
    let saturated = PlacementError::BoardSaturated {
        width: grid.width,
        height: grid.height,
    };
    if grid.cell_count() == 0 {
        return Err(saturated);
    }
    let is_free = |pos: Position| !occupied.iter().any(|o| o.occupies(pos));

    for _ in 0..MAX_RANDOM_ATTEMPTS {
        let candidate = grid.random_cell(rng);
        if is_free(candidate) {
            return Ok(candidate);
        }
    }

    let free: Vec<Position> = grid.cells().filter(|&pos| is_free(pos)).collect();
    debug!(
        free = free.len(),
        "random placement exhausted, picking from full scan"
    );
    free.choose(rng).copied().ok_or(saturated)
}

/// Move `world.foods[index]` to a fresh free cell and reactivate it.
///
/// Moving fruit is given a new random heading.
pub fn respawn_food<R: Rng + ?Sized>(
    rng: &mut R,
    world: &mut World,
    index: usize,
) -> Result<(), PlacementError> {
    if index >= world.foods.len() {
        return Ok(());
    }
    world.foods[index].active = false;
    let position = place(
        rng,
        &world.grid,
        &[&world.snakes, &world.obstacles, &world.foods],
    )?;

    let food = &mut world.foods[index];
    food.position = position;
    food.active = true;
    if food.moving {
        food.velocity = Velocity::random_nonzero(rng);
    }
    Ok(())
}

/// Replace the obstacle field with a fresh random one
pub fn place_obstacles<R: Rng + ?Sized>(
    rng: &mut R,
    world: &mut World,
    moving_obstacles: bool,
) -> Result<(), PlacementError> {
    world.obstacles.clear();
    let clearance = world.primary().map(|snake| Exclusion {
        center: snake.head(),
        radius: HEAD_CLEARANCE,
    });

    let count = rng.gen_range(OBSTACLE_COUNT_RANGE);
    for _ in 0..count {
        let position = place(
            rng,
            &world.grid,
            &[&world.snakes, &world.foods, &world.obstacles, &clearance],
        )?;
        let mut obstacle = Obstacle::fixed(position);
        if moving_obstacles && rng.gen_ratio(1, 3) {
            obstacle.moving = true;
            obstacle.velocity = Velocity::random_nonzero(rng);
        }
        world.obstacles.push(obstacle);
    }
    debug!(count, "placed obstacles");
    Ok(())
}

/// Populate the challenge-mode fruit set
pub fn initial_foods<R: Rng + ?Sized>(
    rng: &mut R,
    world: &mut World,
    config: &GameConfig,
) -> Result<(), PlacementError> {
    world.foods.clear();

    if !config.features.multi_fruit {
        let mut food = Food::apple(Position::new(0, 0));
        food.active = false;
        food.moving = config.features.moving_fruit;
        world.foods.push(food);
        return respawn_food(rng, world, 0);
    }

    let count = rng.gen_range(MULTI_FRUIT_RANGE);
    for index in 0..count {
        let kind = FoodKind::ALL[rng.gen_range(0..FoodKind::ALL.len())];
        let mut food = Food::of_kind(Position::new(0, 0), kind);
        food.active = false;
        // Higher value fruit is more likely to move
        food.moving = config.features.moving_fruit && rng.gen_range(0..5) < kind.index() + 2;
        world.foods.push(food);
        respawn_food(rng, world, index)?;
    }
    Ok(())
}

/// Keep exactly `target` foods of the pool active.
///
/// Extra active foods are switched off from the front of the pool, missing
/// ones are respawned from the first inactive slots.
pub fn maintain_active_foods<R: Rng + ?Sized>(
    rng: &mut R,
    world: &mut World,
    target: usize,
) -> Result<(), PlacementError> {
    let mut active = world.active_foods().count();

    for food in world.foods.iter_mut() {
        if active <= target {
            break;
        }
        if food.active {
            food.active = false;
            active -= 1;
        }
    }

    let mut index = 0;
    while active < target && index < world.foods.len() {
        if !world.foods[index].active {
            respawn_food(rng, world, index)?;
            active += 1;
        }
        index += 1;
    }
    Ok(())
}
