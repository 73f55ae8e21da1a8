//! Frame and countdown ticks
//!
//! `tick` is the per-frame entry point: queued input is applied first, the
//! held keys are frozen into a `TickInput`, due transitions fire, and then
//! the actor steps if the session is playing. `Session::countdown` is the
//! independent 1 Hz timer.

use super::actor::ActorEvent;
use super::input::{InputEvent, Key, TickInput};
use super::schedule::Transition;
use super::state::{GamePhase, Session};
use super::world::StepParams;

/// Advance the session by one frame, applying `events` first
pub fn tick(session: &mut Session, events: &[InputEvent]) {
    for event in events {
        session.handle_input(*event);
    }
    let input = session.held.snapshot();
    session.step_frame(&input);
}

impl Session {
    /// Apply one discrete input event
    pub fn handle_input(&mut self, event: InputEvent) {
        if self.phase == GamePhase::NotStarted {
            match event {
                // The activating key is consumed by the start screen
                InputEvent::KeyDown(_) | InputEvent::AnyKey | InputEvent::Pointer => self.start(),
                InputEvent::KeyUp(key) => self.held.set(key, false),
            }
            return;
        }

        match event {
            InputEvent::KeyDown(key) => {
                self.held.set(key, true);
                match key {
                    Key::Boost if self.phase != GamePhase::Paused => self.activate_boost(),
                    Key::Restart => self.restart(),
                    Key::Pause => self.toggle_pause(),
                    _ => {}
                }
            }
            InputEvent::KeyUp(key) => {
                self.held.set(key, false);
                if key == Key::Boost {
                    self.deactivate_boost();
                }
            }
            InputEvent::AnyKey | InputEvent::Pointer => {}
        }
    }

    /// One simulation frame with an already-frozen input snapshot
    pub fn step_frame(&mut self, input: &TickInput) {
        self.frame += 1;

        for transition in self.schedule.take_due(self.frame) {
            self.apply_transition(transition);
        }

        // Only a playing session moves the actor; paused and overlay
        // phases freeze it outright
        if self.phase != GamePhase::Playing {
            return;
        }

        let params = StepParams {
            motion: self.motion(),
            gravity: self.settings.gravity,
            controls_enabled: self.accepts_control(),
            hazard_grace_frames: self.settings.hazard_grace_frames,
        };
        let events = self.world.step(input, &params);
        for event in events {
            match event {
                ActorEvent::HitHazard { index } => {
                    log::debug!("Hit hazard {} on level {}", index, self.level);
                    if self.settings.reload_on_damage {
                        // The world was rebuilt; later events refer to the old one
                        self.lose_life();
                        break;
                    }
                    self.take_damage();
                }
                ActorEvent::ReachedExit { .. } => self.complete_level(),
            }
        }
    }

    /// The 1 Hz countdown. Runs only while playing.
    pub fn countdown(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            log::info!("Out of time");
            self.game_over();
        }
    }

    fn apply_transition(&mut self, transition: Transition) {
        if self.phase != GamePhase::LevelComplete {
            return;
        }
        match transition {
            Transition::ShowLevelComplete => self.level_complete_overlay = true,
            Transition::AdvanceLevel => {
                self.level_complete_overlay = false;
                let next = self.level + 1;
                match self.load_level(next) {
                    Ok(()) => self.phase = GamePhase::Playing,
                    // Past the last level counts as clearing the run
                    Err(_) => self.win(),
                }
            }
            Transition::Win => self.win(),
        }
    }

    fn win(&mut self) {
        self.phase = GamePhase::Won;
        self.level_complete_overlay = false;
        log::info!(
            "All {} levels cleared with {} left on the clock",
            self.levels.len(),
            crate::format_clock(self.time_left)
        );
    }
}
