use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Action, Control, Direction, Feature, GameState, PlayerSlot, Variant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    GameAction(Action),
    Quit,
    None,
}

/// Maps key presses to the session's normalized actions for one variant
pub struct InputHandler {
    variant: Variant,
}

impl InputHandler {
    pub fn new(variant: Variant) -> Self {
        Self { variant }
    }

    pub fn handle_key_event(&self, key: KeyEvent, state: GameState) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        if let Some((player, direction)) = self.steering(key.code) {
            return steer(player, direction);
        }

        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => match state {
                GameState::Menu => activate(Control::Play),
                GameState::GameOver => activate(Control::PlayAgain),
                GameState::Playing => KeyAction::None,
            },
            KeyCode::Char('r') | KeyCode::Char('R') if state == GameState::GameOver => {
                activate(Control::PlayAgain)
            }
            KeyCode::Esc => activate(Control::Menu),
            KeyCode::Char('q') | KeyCode::Char('Q') => activate(Control::Exit),

            // Challenge feature toggles
            KeyCode::Char(c @ '1'..='5') if self.variant == Variant::Challenge => {
                let index = c as usize - '1' as usize;
                match Feature::ALL.get(index) {
                    Some(&feature) => activate(Control::Toggle(feature)),
                    None => KeyAction::None,
                }
            }
            KeyCode::Char('c') | KeyCode::Char('C') if self.variant == Variant::Challenge => {
                activate(Control::Chaos)
            }

            _ => KeyAction::None,
        }
    }

    fn steering(&self, code: KeyCode) -> Option<(PlayerSlot, Direction)> {
        let arrows = match code {
            KeyCode::Up => Some(Direction::Up),
            KeyCode::Down => Some(Direction::Down),
            KeyCode::Left => Some(Direction::Left),
            KeyCode::Right => Some(Direction::Right),
            _ => None,
        };
        let wasd = match code {
            KeyCode::Char('w') | KeyCode::Char('W') => Some(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => Some(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => Some(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => Some(Direction::Right),
            _ => None,
        };

        match self.variant {
            // Player A on WASD, player B on the arrows
            Variant::Versus => wasd
                .map(|d| (PlayerSlot::One, d))
                .or(arrows.map(|d| (PlayerSlot::Two, d))),
            Variant::Classic | Variant::Challenge => {
                arrows.or(wasd).map(|d| (PlayerSlot::One, d))
            }
        }
    }
}

fn steer(player: PlayerSlot, direction: Direction) -> KeyAction {
    KeyAction::GameAction(Action::Steer { player, direction })
}

fn activate(control: Control) -> KeyAction {
    KeyAction::GameAction(Action::Activate(control))
}
