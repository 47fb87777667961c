use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::intent::{FrameInput, MoveIntent};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InputError {
    #[error("no action bound to key {0:?}")]
    Unbound(String),
}

/// A high-level action produced by any input device.
///
/// The controller consumes actions folded into a [`FrameInput`], never raw
/// key events, so keyboard and scripted input share the same path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Action {
    MoveForward,
    MoveBack,
    MoveLeft,
    MoveRight,
    Jump,
    /// Bound but inert (used for keys that are mapped to nothing yet).
    Noop,
}

impl Action {
    /// Default WASD + space binding. Key names are case-insensitive.
    pub fn from_key(name: &str) -> Result<Self, InputError> {
        let action = match name.to_ascii_lowercase().as_str() {
            "w" | "up" | "arrowup" => Action::MoveForward,
            "s" | "down" | "arrowdown" => Action::MoveBack,
            "a" | "left" | "arrowleft" => Action::MoveLeft,
            "d" | "right" | "arrowright" => Action::MoveRight,
            "space" | " " => Action::Jump,
            "escape" | "shift" => Action::Noop,
            _ => return Err(InputError::Unbound(name.to_owned())),
        };
        Ok(action)
    }
}

/// Tracks which actions are currently held.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: BTreeSet<Action>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, action: Action) {
        if self.held.insert(action) {
            tracing::trace!(?action, "pressed");
        }
    }

    pub fn release(&mut self, action: Action) {
        if self.held.remove(&action) {
            tracing::trace!(?action, "released");
        }
    }

    /// Apply a key event by name.
    pub fn key(&mut self, name: &str, pressed: bool) -> Result<Action, InputError> {
        let action = Action::from_key(name)?;
        if pressed {
            self.press(action);
        } else {
            self.release(action);
        }
        Ok(action)
    }

    pub fn is_held(&self, action: Action) -> bool {
        self.held.contains(&action)
    }

    /// Release everything, e.g. when the window loses focus.
    pub fn clear(&mut self) {
        self.held.clear();
    }

    pub fn intent(&self) -> MoveIntent {
        MoveIntent {
            forward: self.is_held(Action::MoveForward),
            back: self.is_held(Action::MoveBack),
            left: self.is_held(Action::MoveLeft),
            right: self.is_held(Action::MoveRight),
        }
    }

    /// Snapshot the held actions as one frame of controller input.
    pub fn frame(&self, dt: f32, yaw: f32) -> FrameInput {
        FrameInput {
            dt,
            intent: self.intent(),
            jump: self.is_held(Action::Jump),
            yaw,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wasd_binding() {
        assert_eq!(Action::from_key("W"), Ok(Action::MoveForward));
        assert_eq!(Action::from_key("a"), Ok(Action::MoveLeft));
        assert_eq!(Action::from_key("ArrowDown"), Ok(Action::MoveBack));
        assert_eq!(Action::from_key("d"), Ok(Action::MoveRight));
        assert_eq!(Action::from_key("Space"), Ok(Action::Jump));
        assert_eq!(Action::from_key("shift"), Ok(Action::Noop));
    }

    #[test]
    fn unbound_key_is_an_error() {
        assert_eq!(
            Action::from_key("q"),
            Err(InputError::Unbound("q".to_owned()))
        );
    }

    #[test]
    fn press_and_release_track_held_actions() {
        let mut input = InputState::new();
        input.press(Action::MoveForward);
        input.press(Action::MoveRight);
        assert_eq!(
            input.intent(),
            MoveIntent::forward().and(MoveIntent::right())
        );

        input.release(Action::MoveForward);
        assert_eq!(input.intent(), MoveIntent::right());

        input.clear();
        assert!(input.intent().is_idle());
    }

    #[test]
    fn key_events_by_name() {
        let mut input = InputState::new();
        assert_eq!(input.key("space", true), Ok(Action::Jump));
        assert!(input.frame(0.016, 0.0).jump);
        input.key("space", false).unwrap();
        assert!(!input.frame(0.016, 0.0).jump);
        assert!(input.key("?", true).is_err());
    }

    #[test]
    fn frame_carries_dt_and_yaw() {
        let mut input = InputState::new();
        input.press(Action::MoveBack);
        let frame = input.frame(0.05, 1.0);
        assert_eq!(frame.dt, 0.05);
        assert_eq!(frame.yaw, 1.0);
        assert_eq!(frame.intent, MoveIntent::back());
        assert!(!frame.jump);
    }

    #[test]
    fn noop_does_not_move() {
        let mut input = InputState::new();
        input.press(Action::Noop);
        assert!(input.intent().is_idle());
    }
}
