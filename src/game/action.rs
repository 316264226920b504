use super::config::Feature;
use super::state::Velocity;

/// Direction a snake can be steered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
                | (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
        )
    }

    /// Returns the delta (dx, dy) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// The direction a unit step moves in; `None` for a stationary or diagonal step
    pub fn from_velocity(velocity: Velocity) -> Option<Direction> {
        match (velocity.dx, velocity.dy) {
            (0, -1) => Some(Direction::Up),
            (0, 1) => Some(Direction::Down),
            (-1, 0) => Some(Direction::Left),
            (1, 0) => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn velocity(&self) -> Velocity {
        let (dx, dy) = self.delta();
        Velocity::new(dx, dy)
    }
}

/// Which snake an input belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerSlot {
    One,
    Two,
}

impl PlayerSlot {
    pub fn index(&self) -> usize {
        match self {
            PlayerSlot::One => 0,
            PlayerSlot::Two => 1,
        }
    }
}

/// A button or menu entry the player can activate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Play,
    PlayAgain,
    Menu,
    Exit,
    Toggle(Feature),
    Chaos,
}

/// Normalized input signal consumed by the game session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Steer {
        player: PlayerSlot,
        direction: Direction,
    },
    Activate(Control),
}

impl From<Direction> for Action {
    fn from(direction: Direction) -> Self {
        Action::Steer {
            player: PlayerSlot::One,
            direction,
        }
    }
}

impl From<Control> for Action {
    fn from(control: Control) -> Self {
        Action::Activate(control)
    }
}
