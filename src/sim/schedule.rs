//! Deferred session transitions
//!
//! Presentation pauses (the level-complete overlay, the delay before the win
//! screen) are queued here with a due frame and fired by the frame tick, so
//! nothing ever races the main loop.

use serde::{Deserialize, Serialize};

/// A transition to apply once its frame comes up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    /// Raise the level-complete overlay
    ShowLevelComplete,
    /// Drop the overlay and load the next level
    AdvanceLevel,
    /// Enter the terminal win state
    Win,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct Scheduled {
    due: u64,
    transition: Transition,
}

/// Pending transitions ordered by due frame, then by insertion
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schedule {
    pending: Vec<Scheduled>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `transition` to fire on frame `due`
    pub fn at(&mut self, due: u64, transition: Transition) {
        // Insert after every entry due at or before `due` to keep FIFO ties
        let idx = self.pending.partition_point(|s| s.due <= due);
        self.pending.insert(idx, Scheduled { due, transition });
    }

    /// Remove and return every transition due on or before `now`
    pub fn take_due(&mut self, now: u64) -> Vec<Transition> {
        let split = self.pending.partition_point(|s| s.due <= now);
        self.pending.drain(..split).map(|s| s.transition).collect()
    }

    /// Drop everything pending
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Frame of the earliest pending transition
    pub fn next_due(&self) -> Option<u64> {
        self.pending.first().map(|s| s.due)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_in_due_order() {
        let mut schedule = Schedule::new();
        schedule.at(150, Transition::AdvanceLevel);
        schedule.at(30, Transition::ShowLevelComplete);
        assert_eq!(schedule.next_due(), Some(30));

        assert!(schedule.take_due(29).is_empty());
        assert_eq!(schedule.take_due(30), vec![Transition::ShowLevelComplete]);
        assert!(schedule.take_due(149).is_empty());
        assert_eq!(schedule.take_due(200), vec![Transition::AdvanceLevel]);
        assert!(schedule.is_empty());
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut schedule = Schedule::new();
        schedule.at(10, Transition::ShowLevelComplete);
        schedule.at(10, Transition::AdvanceLevel);
        schedule.at(5, Transition::Win);
        assert_eq!(schedule.len(), 3);
        assert_eq!(
            schedule.take_due(10),
            vec![
                Transition::Win,
                Transition::ShowLevelComplete,
                Transition::AdvanceLevel
            ]
        );
    }

    #[test]
    fn test_clear() {
        let mut schedule = Schedule::new();
        schedule.at(1, Transition::Win);
        schedule.clear();
        assert!(schedule.take_due(100).is_empty());
    }
}
