use snake_arcade::game::{
    Action, CollisionType, Control, Direction, Food, GameConfig, GameSession, GameState, Outcome,
    PlayerSlot, Position, Velocity,
};
use snake_arcade::persistence::{MemoryScoreStore, ScoreStore};
use std::time::Duration;

fn versus(seed: u64) -> GameSession {
    let mut session = GameSession::seeded(GameConfig::versus(), seed);
    session.apply(Control::Play.into()).unwrap();
    session
}

/// Empty the food pool so no random food is eaten during a scripted step
fn clear_foods(session: &mut GameSession) {
    for food in &mut session.world_mut().foods {
        *food = Food::inactive();
    }
}

#[test]
fn test_versus_spawns_two_snakes_and_two_foods() {
    let session = versus(3);
    let world = session.world();

    assert_eq!(world.snakes.len(), 2);
    assert_eq!(
        world.snakes[0].body,
        vec![Position::new(5, 5), Position::new(4, 5), Position::new(3, 5)]
    );
    assert_eq!(
        world.snakes[1].body,
        vec![
            Position::new(26, 18),
            Position::new(27, 18),
            Position::new(28, 18)
        ]
    );
    assert_eq!(world.foods.len(), 10);
    assert_eq!(world.active_foods().count(), 2);
    assert_eq!(session.time_remaining(), Some(Duration::from_secs(120)));
}

#[test]
fn test_each_player_steers_their_own_snake() {
    let mut session = versus(3);
    session
        .apply(Action::Steer {
            player: PlayerSlot::Two,
            direction: Direction::Up,
        })
        .unwrap();
    session.apply(Direction::Down.into()).unwrap();

    assert_eq!(session.world().snakes[0].velocity, Velocity::new(0, 1));
    assert_eq!(session.world().snakes[1].velocity, Velocity::new(0, -1));
}

#[test]
fn test_timer_expiry_ends_versus_with_draw() {
    let mut session = versus(5);
    let mut store = MemoryScoreStore::default();
    clear_foods(&mut session);

    session.update(Duration::from_secs(119), &mut store).unwrap();
    assert_eq!(session.state(), GameState::Playing);

    session.update(Duration::from_secs(1), &mut store).unwrap();
    assert_eq!(session.state(), GameState::GameOver);
    assert_eq!(session.outcome(), Some(Outcome::Draw));
    // Versus results are never persisted
    assert_eq!(store.best(), 0);
}

#[test]
fn test_one_dead_snake_does_not_end_versus() {
    let mut session = versus(9);
    let mut store = MemoryScoreStore::default();
    session.world_mut().snakes[1].alive = false;
    let frozen = session.world().snakes[1].body.clone();

    session.tick(&mut store).unwrap();
    assert_eq!(session.state(), GameState::Playing);
    assert_eq!(session.world().snakes[1].body, frozen);
}

#[test]
fn test_both_dead_ends_versus_and_higher_score_wins() {
    let mut session = versus(9);
    let mut store = MemoryScoreStore::default();
    {
        let world = session.world_mut();
        world.snakes[0].score = 2;
        world.snakes[1].score = 4;
        world.snakes[0].alive = false;
        world.snakes[1].alive = false;
    }

    session.tick(&mut store).unwrap();
    assert_eq!(session.state(), GameState::GameOver);
    assert_eq!(session.outcome(), Some(Outcome::Winner(PlayerSlot::Two)));
}

#[test]
fn test_first_snake_moves_before_second() {
    let mut session = versus(11);
    let mut store = MemoryScoreStore::default();
    clear_foods(&mut session);
    {
        let world = session.world_mut();
        world.snakes[0].body = vec![
            Position::new(10, 10),
            Position::new(9, 10),
            Position::new(8, 10),
        ];
        world.snakes[0].velocity = Velocity::new(1, 0);
        // B's tail sits where A's head is about to go
        world.snakes[1].body = vec![
            Position::new(11, 12),
            Position::new(11, 11),
            Position::new(11, 10),
        ];
        world.snakes[1].velocity = Velocity::new(0, 1);
    }

    let report = session.tick(&mut store).unwrap();
    assert_eq!(report.collision_for(0), Some(CollisionType::Opponent));
    assert_eq!(report.collision_for(1), None);
    assert!(!session.world().snakes[0].alive);
    assert!(session.world().snakes[1].alive);
    assert_eq!(session.state(), GameState::Playing);
}

#[test]
fn test_dead_snake_is_not_an_obstacle() {
    let mut session = versus(11);
    let mut store = MemoryScoreStore::default();
    clear_foods(&mut session);
    {
        let world = session.world_mut();
        world.snakes[0].body = vec![
            Position::new(10, 10),
            Position::new(9, 10),
            Position::new(8, 10),
        ];
        world.snakes[0].velocity = Velocity::new(1, 0);
        world.snakes[1].body = vec![
            Position::new(11, 10),
            Position::new(12, 10),
            Position::new(13, 10),
        ];
        world.snakes[1].alive = false;
    }

    let report = session.tick(&mut store).unwrap();
    assert!(report.collisions.is_empty());
    assert_eq!(session.world().snakes[0].head(), Position::new(11, 10));
}

#[test]
fn test_eaten_food_is_replaced_from_pool() {
    let mut session = versus(13);
    let mut store = MemoryScoreStore::default();
    clear_foods(&mut session);
    {
        let world = session.world_mut();
        world.foods[0] = Food::apple(Position::new(6, 5));
    }

    let report = session.tick(&mut store).unwrap();
    assert_eq!(report.eaten, vec![(0, 0)]);

    let world = session.world();
    assert_eq!(world.snakes[0].score, 1);
    assert_eq!(world.snakes[0].len(), 4);
    assert_eq!(world.active_foods().count(), 2);
}
