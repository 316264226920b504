//! Per-tick movement, collision and eating rules shared by every variant

use tracing::debug;

use super::action::Direction;
use super::config::GameConfig;
use super::grid::Grid;
use super::state::{CollisionType, Position, Snake, Velocity, World, MAX_SNAKE_LENGTH};

/// What happened during one snake step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    /// Snakes that died this step, by index
    pub collisions: Vec<(usize, CollisionType)>,
    /// (snake index, food index) pairs eaten this step
    pub eaten: Vec<(usize, usize)>,
    /// Foods that could not be put back on a full board
    pub placement_failures: usize,
}

impl StepReport {
    pub fn collision_for(&self, snake: usize) -> Option<CollisionType> {
        self.collisions
            .iter()
            .find(|(idx, _)| *idx == snake)
            .map(|(_, kind)| *kind)
    }
}

/// Shift every segment into its predecessor's cell, then move the head.
/// Dead snakes are left untouched.
pub fn advance(snake: &mut Snake) {
    if !snake.alive {
        return;
    }
    for i in (1..snake.body.len()).rev() {
        snake.body[i] = snake.body[i - 1];
    }
    snake.body[0] = snake.body[0].stepped(snake.velocity);
    if let Some(direction) = Direction::from_velocity(snake.velocity) {
        snake.heading = Some(direction);
    }
}

/// Duplicate the tail segment; it separates on the next advance.
/// Returns false once the snake is at full length.
pub fn grow(snake: &mut Snake) -> bool {
    if snake.len() >= MAX_SNAKE_LENGTH {
        return false;
    }
    let tail = snake.tail();
    snake.body.push(tail);
    true
}

/// First collision of snake `index`'s head, checked wall, self, opponent, obstacle
pub fn detect_collision(world: &World, index: usize, config: &GameConfig) -> Option<CollisionType> {
    let snake = world.snakes.get(index)?;
    let head = snake.head();

    if !world.grid.contains(head) {
        return Some(CollisionType::Wall);
    }
    if snake.collides_with_body(head) {
        return Some(CollisionType::SelfCollision);
    }
    if config.opponent_collisions {
        let hit_opponent = world
            .snakes
            .iter()
            .enumerate()
            .any(|(other, s)| other != index && s.alive && s.body.contains(&head));
        if hit_opponent {
            return Some(CollisionType::Opponent);
        }
    }
    if config.has_obstacles() && world.obstacle_at(head) {
        return Some(CollisionType::Obstacle);
    }
    None
}

/// Advance one snake and kill it if its new head collides
pub fn step_snake(world: &mut World, index: usize, config: &GameConfig) -> Option<CollisionType> {
    let snake = world.snakes.get_mut(index)?;
    if !snake.alive {
        return None;
    }
    advance(snake);

    let collision = detect_collision(world, index, config);
    if let Some(kind) = collision {
        let snake = &mut world.snakes[index];
        snake.alive = false;
        debug!(snake = %snake.name, ?kind, score = snake.score, "snake died");
    }
    collision
}

/// Let snake `index` eat the active food under its head.
/// Returns the eaten food's index.
pub fn consume_food(world: &mut World, index: usize) -> Option<usize> {
    let head = match world.snakes.get(index) {
        Some(snake) if snake.alive => snake.head(),
        _ => return None,
    };
    let food_index = world
        .foods
        .iter()
        .position(|f| f.active && f.position == head)?;

    let food = &mut world.foods[food_index];
    food.active = false;
    let value = food.value;

    let snake = &mut world.snakes[index];
    snake.score += value;
    grow(snake);
    debug!(snake = %snake.name, value, score = snake.score, "food eaten");
    Some(food_index)
}

/// Bounce rule for drifting entities.
///
/// An axis that would leave the grid is inverted and the move retried. If
/// the target is still off-grid or blocked the entity stays put and its
/// velocity is reversed.
pub fn drift(
    position: Position,
    mut velocity: Velocity,
    grid: &Grid,
    blocked: impl Fn(Position) -> bool,
) -> (Position, Velocity) {
    let mut next = position.stepped(velocity);
    if next.x < 0 || next.x >= grid.width {
        velocity.dx = -velocity.dx;
        next = position.stepped(velocity);
    }
    if next.y < 0 || next.y >= grid.height {
        velocity.dy = -velocity.dy;
        next = position.stepped(velocity);
    }

    if !grid.contains(next) || blocked(next) {
        return (position, velocity.reversed());
    }
    (next, velocity)
}

/// Move every active moving fruit one step; obstacles block fruit
pub fn move_foods(world: &mut World) {
    for i in 0..world.foods.len() {
        let food = world.foods[i];
        if !food.active || !food.moving {
            continue;
        }
        let obstacles = &world.obstacles;
        let (position, velocity) = drift(food.position, food.velocity, &world.grid, |p| {
            obstacles.iter().any(|o| o.position == p)
        });
        world.foods[i].position = position;
        world.foods[i].velocity = velocity;
    }
}

/// Move every moving obstacle one step; other obstacles and active fruit block
pub fn move_obstacles(world: &mut World) {
    for i in 0..world.obstacles.len() {
        let obstacle = world.obstacles[i];
        if !obstacle.moving {
            continue;
        }
        let obstacles = &world.obstacles;
        let foods = &world.foods;
        let (position, velocity) =
            drift(obstacle.position, obstacle.velocity, &world.grid, |p| {
                obstacles
                    .iter()
                    .enumerate()
                    .any(|(j, o)| j != i && o.position == p)
                    || foods.iter().any(|f| f.active && f.position == p)
            });
        world.obstacles[i].position = position;
        world.obstacles[i].velocity = velocity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::config::{Features, GameConfig};
    use crate::game::state::{Food, Obstacle};

    fn snake_at(head: (i32, i32), v: (i32, i32), len: usize) -> Snake {
        Snake::straight(Position::new(head.0, head.1), Velocity::new(v.0, v.1), len)
    }

    fn world_with(snakes: Vec<Snake>) -> World {
        let mut world = World::new(Grid::default());
        world.snakes = snakes;
        world
    }

    #[test]
    fn test_segments_follow_predecessor() {
        let mut snake = snake_at((10, 10), (1, 0), 6);
        snake.velocity = Velocity::new(0, 1);
        let before = snake.body.clone();

        advance(&mut snake);

        assert_eq!(snake.head(), Position::new(10, 11));
        for i in 1..snake.len() {
            assert_eq!(snake.body[i], before[i - 1]);
        }
    }

    #[test]
    fn test_dead_snake_is_frozen() {
        let mut snake = snake_at((10, 10), (1, 0), 4);
        snake.alive = false;
        let before = snake.clone();

        for _ in 0..5 {
            advance(&mut snake);
        }
        assert_eq!(snake, before);

        let mut world = world_with(vec![snake.clone()]);
        assert_eq!(step_snake(&mut world, 0, &GameConfig::classic()), None);
        assert_eq!(world.snakes[0], before);
    }

    #[test]
    fn test_grow_then_advance_stays_continuous() {
        let mut snake = snake_at((10, 10), (1, 0), 3);
        grow(&mut snake);
        advance(&mut snake);

        assert_eq!(snake.len(), 4);
        for pair in snake.body.windows(2) {
            let gap = (pair[0].x - pair[1].x).abs() + (pair[0].y - pair[1].y).abs();
            assert_eq!(gap, 1);
        }
    }

    #[test]
    fn test_grow_caps_at_max_length() {
        let mut snake = snake_at((50, 0), (1, 0), MAX_SNAKE_LENGTH);
        assert!(!grow(&mut snake));
        assert_eq!(snake.len(), MAX_SNAKE_LENGTH);
    }

    #[test]
    fn test_wall_collision() {
        let mut world = world_with(vec![snake_at((0, 5), (-1, 0), 3)]);
        let hit = step_snake(&mut world, 0, &GameConfig::classic());

        assert_eq!(hit, Some(CollisionType::Wall));
        assert!(!world.snakes[0].alive);
    }

    #[test]
    fn test_wall_checked_before_self() {
        // Next head (-1,5) is off-grid and also where the last segment lands
        let mut snake = snake_at((0, 5), (-1, 0), 1);
        snake.body = vec![
            Position::new(0, 5),
            Position::new(0, 4),
            Position::new(-1, 4),
            Position::new(-1, 5),
            Position::new(-1, 6),
        ];
        let mut world = world_with(vec![snake]);

        advance(&mut world.snakes[0]);
        assert!(world.snakes[0].collides_with_body(world.snakes[0].head()));
        assert_eq!(
            detect_collision(&world, 0, &GameConfig::classic()),
            Some(CollisionType::Wall)
        );
    }

    #[test]
    fn test_self_collision() {
        let mut snake = snake_at((5, 5), (1, 0), 5);
        let mut world = world_with(vec![]);
        let config = GameConfig::classic();

        snake.steer(crate::game::Direction::Down);
        world.snakes.push(snake);
        step_snake(&mut world, 0, &config);
        world.snakes[0].steer(crate::game::Direction::Left);
        step_snake(&mut world, 0, &config);
        world.snakes[0].steer(crate::game::Direction::Up);
        let hit = step_snake(&mut world, 0, &config);

        assert_eq!(hit, Some(CollisionType::SelfCollision));
    }

    #[test]
    fn test_opponent_collision_only_when_alive() {
        let config = GameConfig::versus();
        let a = snake_at((4, 5), (1, 0), 3);
        let b = snake_at((5, 5), (0, -1), 3);
        let mut world = world_with(vec![a, b]);

        assert_eq!(
            step_snake(&mut world, 0, &config),
            Some(CollisionType::Opponent)
        );

        let a = snake_at((4, 5), (1, 0), 3);
        let mut b = snake_at((5, 5), (0, -1), 3);
        b.alive = false;
        let mut world = world_with(vec![a, b]);
        assert_eq!(step_snake(&mut world, 0, &config), None);
    }

    #[test]
    fn test_opponents_ignored_outside_versus() {
        let a = snake_at((4, 5), (1, 0), 3);
        let b = snake_at((5, 5), (0, -1), 3);
        let mut world = world_with(vec![a, b]);
        assert_eq!(step_snake(&mut world, 0, &GameConfig::classic()), None);
    }

    #[test]
    fn test_obstacle_collision() {
        let config = GameConfig::challenge(Features {
            obstacles: true,
            ..Features::default()
        });
        let mut world = world_with(vec![snake_at((5, 5), (1, 0), 3)]);
        world.obstacles.push(Obstacle::fixed(Position::new(6, 5)));

        assert_eq!(
            step_snake(&mut world, 0, &config),
            Some(CollisionType::Obstacle)
        );
    }

    #[test]
    fn test_consume_food() {
        let mut world = world_with(vec![snake_at((5, 5), (1, 0), 3)]);
        world.foods.push(Food::of_kind(
            Position::new(6, 5),
            crate::game::state::FoodKind::Grapes,
        ));

        step_snake(&mut world, 0, &GameConfig::classic());
        assert_eq!(consume_food(&mut world, 0), Some(0));
        assert_eq!(world.snakes[0].score, 3);
        assert_eq!(world.snakes[0].len(), 4);
        assert!(!world.foods[0].active);
        assert_eq!(consume_food(&mut world, 0), None);
    }

    #[test]
    fn test_dead_snake_does_not_eat() {
        let mut world = world_with(vec![snake_at((5, 5), (1, 0), 3)]);
        world.foods.push(Food::apple(Position::new(5, 5)));
        world.snakes[0].alive = false;

        assert_eq!(consume_food(&mut world, 0), None);
        assert!(world.foods[0].active);
    }

    #[test]
    fn test_drift_bounces_off_wall() {
        let grid = Grid::default();
        let (pos, v) = drift(Position::new(31, 4), Velocity::new(1, 1), &grid, |_| false);
        assert_eq!(v, Velocity::new(-1, 1));
        assert_eq!(pos, Position::new(30, 5));

        let (pos, v) = drift(Position::new(0, 0), Velocity::new(-1, -1), &grid, |_| false);
        assert_eq!(v, Velocity::new(1, 1));
        assert_eq!(pos, Position::new(1, 1));
    }

    #[test]
    fn test_drift_blocked_reverses_in_place() {
        let grid = Grid::default();
        let blocker = Position::new(6, 6);
        let (pos, v) = drift(Position::new(5, 5), Velocity::new(1, 1), &grid, |p| {
            p == blocker
        });
        assert_eq!(pos, Position::new(5, 5));
        assert_eq!(v, Velocity::new(-1, -1));
    }

    #[test]
    fn test_moving_entities_avoid_each_other() {
        let mut world = world_with(vec![]);
        let mut food = Food::apple(Position::new(10, 10));
        food.moving = true;
        food.velocity = Velocity::new(1, 0);
        world.foods.push(food);
        let mut obstacle = Obstacle::fixed(Position::new(12, 10));
        obstacle.moving = true;
        obstacle.velocity = Velocity::new(-1, 0);
        world.obstacles.push(obstacle);

        move_foods(&mut world);
        assert_eq!(world.foods[0].position, Position::new(11, 10));

        move_obstacles(&mut world);
        assert_eq!(world.obstacles[0].position, Position::new(12, 10));
        assert_eq!(world.obstacles[0].velocity, Velocity::new(1, 0));

        move_foods(&mut world);
        assert_eq!(world.foods[0].position, Position::new(11, 10));
        assert_eq!(world.foods[0].velocity, Velocity::new(-1, 0));
    }

    #[test]
    fn test_still_entities_stay_put() {
        let mut world = world_with(vec![]);
        world.foods.push(Food::apple(Position::new(3, 3)));
        world.obstacles.push(Obstacle::fixed(Position::new(4, 4)));

        move_foods(&mut world);
        move_obstacles(&mut world);
        assert_eq!(world.foods[0].position, Position::new(3, 3));
        assert_eq!(world.obstacles[0].position, Position::new(4, 4));
    }
}
