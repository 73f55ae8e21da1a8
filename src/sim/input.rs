//! Input events, held-key state and per-tick snapshots
//!
//! The UI layer pushes events into an `InputQueue`; the queue is drained at
//! the start of each frame, and the held keys are frozen into a `TickInput`
//! that the actor update reads.

use serde::{Deserialize, Serialize};

/// Logical keys the core understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    MoveLeft,
    MoveRight,
    Jump,
    Boost,
    Restart,
    Pause,
}

impl Key {
    /// Map a DOM `KeyboardEvent.code` to a logical key
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" => Some(Key::MoveLeft),
            "ArrowRight" => Some(Key::MoveRight),
            "Space" => Some(Key::Jump),
            "ShiftLeft" | "ShiftRight" => Some(Key::Boost),
            "KeyR" => Some(Key::Restart),
            "Escape" | "KeyP" => Some(Key::Pause),
            _ => None,
        }
    }
}

/// A discrete input event from the UI layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    /// A key with no game binding was pressed
    AnyKey,
    /// Click or tap anywhere on the game screen
    Pointer,
}

impl InputEvent {
    /// Key-down event for a DOM key code; unbound codes become `AnyKey`
    pub fn key_down(code: &str) -> Self {
        Key::from_code(code).map_or(InputEvent::AnyKey, InputEvent::KeyDown)
    }

    /// Key-up event for a DOM key code; unbound codes are ignored
    pub fn key_up(code: &str) -> Option<Self> {
        Key::from_code(code).map(InputEvent::KeyUp)
    }
}

/// Pending input events, applied at the next frame boundary
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(16),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Take all pending events in arrival order
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

/// Movement keys currently held down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl HeldKeys {
    /// Record a press or release; non-movement keys are ignored
    pub fn set(&mut self, key: Key, down: bool) {
        match key {
            Key::MoveLeft => self.left = down,
            Key::MoveRight => self.right = down,
            Key::Jump => self.jump = down,
            Key::Boost | Key::Restart | Key::Pause => {}
        }
    }

    /// Freeze the current state for one tick
    pub fn snapshot(&self) -> TickInput {
        TickInput {
            left: self.left,
            right: self.right,
            jump: self.jump,
        }
    }
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl TickInput {
    pub const IDLE: Self = Self {
        left: false,
        right: false,
        jump: false,
    };

    pub fn left() -> Self {
        Self {
            left: true,
            ..Self::IDLE
        }
    }

    pub fn right() -> Self {
        Self {
            right: true,
            ..Self::IDLE
        }
    }

    pub fn jump() -> Self {
        Self {
            jump: true,
            ..Self::IDLE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_codes() {
        assert_eq!(Key::from_code("ArrowLeft"), Some(Key::MoveLeft));
        assert_eq!(Key::from_code("ArrowRight"), Some(Key::MoveRight));
        assert_eq!(Key::from_code("Space"), Some(Key::Jump));
        assert_eq!(Key::from_code("ShiftLeft"), Some(Key::Boost));
        assert_eq!(Key::from_code("ShiftRight"), Some(Key::Boost));
        assert_eq!(Key::from_code("KeyR"), Some(Key::Restart));
        assert_eq!(Key::from_code("Escape"), Some(Key::Pause));
        assert_eq!(Key::from_code("KeyQ"), None);
    }

    #[test]
    fn test_unbound_key_down_is_any_key() {
        assert_eq!(InputEvent::key_down("Enter"), InputEvent::AnyKey);
        assert_eq!(InputEvent::key_up("Enter"), None);
        assert_eq!(
            InputEvent::key_down("Space"),
            InputEvent::KeyDown(Key::Jump)
        );
    }

    #[test]
    fn test_queue_drains_in_order() {
        let mut q = InputQueue::new();
        q.push(InputEvent::KeyDown(Key::MoveRight));
        q.push(InputEvent::KeyUp(Key::MoveRight));
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(
            events,
            vec![
                InputEvent::KeyDown(Key::MoveRight),
                InputEvent::KeyUp(Key::MoveRight)
            ]
        );
        assert!(q.is_empty());
    }

    #[test]
    fn test_held_keys_snapshot() {
        let mut held = HeldKeys::default();
        held.set(Key::MoveLeft, true);
        held.set(Key::Jump, true);
        held.set(Key::Boost, true);
        let snap = held.snapshot();
        assert!(snap.left && snap.jump && !snap.right);

        held.set(Key::Jump, false);
        // Earlier snapshot is unaffected
        assert!(snap.jump);
        assert!(!held.snapshot().jump);
    }
}
