//! Keyboard mapping for each phase of the game

use shatter_engine::prelude::*;

/// Which set of key bindings is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Start screen: only the start key is live
    #[default]
    Setup,
    /// In play: keys fly the ship
    Ship,
}

/// What a key press asks the game to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Begin a new game
    Start,
    /// Fire the thruster
    Accelerate,
    /// Cut the thruster
    Idle,
    /// Begin turning left
    TurnLeft,
    /// Begin turning right
    TurnRight,
    /// Release the left turn
    StopTurningLeft,
    /// Release the right turn
    StopTurningRight,
    /// Fire a missile
    Shoot,
}

impl InputMode {
    /// Map an event to an action under this mode's bindings
    pub fn map(self, event: &InputEvent) -> Option<InputAction> {
        match (self, event) {
            (Self::Setup, InputEvent::KeyUp(KeyCode::Space)) => Some(InputAction::Start),
            (Self::Ship, InputEvent::KeyDown(key)) => match key {
                KeyCode::ArrowUp => Some(InputAction::Accelerate),
                KeyCode::ArrowLeft => Some(InputAction::TurnLeft),
                KeyCode::ArrowRight => Some(InputAction::TurnRight),
                KeyCode::Space => Some(InputAction::Shoot),
                _ => None,
            },
            (Self::Ship, InputEvent::KeyUp(key)) => match key {
                KeyCode::ArrowUp => Some(InputAction::Idle),
                KeyCode::ArrowLeft => Some(InputAction::StopTurningLeft),
                KeyCode::ArrowRight => Some(InputAction::StopTurningRight),
                _ => None,
            },
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_starts_on_space_release() {
        assert_eq!(
            InputMode::Setup.map(&InputEvent::KeyUp(KeyCode::Space)),
            Some(InputAction::Start)
        );
        assert_eq!(InputMode::Setup.map(&InputEvent::KeyDown(KeyCode::Space)), None);
        assert_eq!(InputMode::Setup.map(&InputEvent::KeyDown(KeyCode::ArrowUp)), None);
    }

    #[test]
    fn test_ship_bindings() {
        let mode = InputMode::Ship;
        assert_eq!(mode.map(&InputEvent::KeyDown(KeyCode::ArrowUp)), Some(InputAction::Accelerate));
        assert_eq!(mode.map(&InputEvent::KeyUp(KeyCode::ArrowUp)), Some(InputAction::Idle));
        assert_eq!(mode.map(&InputEvent::KeyDown(KeyCode::ArrowLeft)), Some(InputAction::TurnLeft));
        assert_eq!(
            mode.map(&InputEvent::KeyUp(KeyCode::ArrowRight)),
            Some(InputAction::StopTurningRight)
        );
        assert_eq!(mode.map(&InputEvent::KeyDown(KeyCode::Space)), Some(InputAction::Shoot));
        assert_eq!(mode.map(&InputEvent::KeyUp(KeyCode::Space)), None);
        assert_eq!(mode.map(&InputEvent::MouseClick { x: 1.0, y: 1.0 }), None);
    }
}
