//! Input boundary
//!
//! The host translates device events into [`InputEvent`]s and pushes them
//! into an [`InputQueue`]. The game drains the queue once per tick.

use std::collections::VecDeque;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Up arrow
    ArrowUp,
    /// Down arrow
    ArrowDown,
    /// Left arrow
    ArrowLeft,
    /// Right arrow
    ArrowRight,
    /// Space bar
    Space,
    /// Enter / Return
    Enter,
    /// Escape
    Escape,
    /// Any other printable key
    Char(char),
}

/// A discrete input event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A key was pressed
    KeyDown(KeyCode),
    /// A key was released
    KeyUp(KeyCode),
    /// A pointer click in world coordinates
    MouseClick {
        /// X position
        x: f64,
        /// Y position
        y: f64,
    },
}

/// FIFO buffer of pending input events
#[derive(Debug, Default)]
pub struct InputQueue {
    events: VecDeque<InputEvent>,
}

impl InputQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event
    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    /// Take every pending event, oldest first
    pub fn drain(&mut self) -> impl Iterator<Item = InputEvent> + '_ {
        self.events.drain(..)
    }

    /// Number of pending events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether no events are pending
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_preserves_order() {
        let mut queue = InputQueue::new();
        queue.push(InputEvent::KeyDown(KeyCode::ArrowUp));
        queue.push(InputEvent::KeyUp(KeyCode::ArrowUp));

        let events: Vec<InputEvent> = queue.drain().collect();
        assert_eq!(
            events,
            vec![
                InputEvent::KeyDown(KeyCode::ArrowUp),
                InputEvent::KeyUp(KeyCode::ArrowUp)
            ]
        );
        assert!(queue.is_empty());
    }
}
