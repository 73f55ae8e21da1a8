//! Single-threaded driver
//!
//! Hosts feed wall-clock deltas into `Runner::advance`. The runner turns them
//! into the two periodic sources the session needs, 60 Hz frames and the
//! 1 Hz countdown, and fires them in timestamp order on one thread so the
//! session is never touched concurrently.

use crate::consts::{COUNTDOWN_MS, MAX_FRAME_DELTA_MS, MAX_SUBSTEPS};
use crate::settings::Settings;
use crate::sim::{EntitySnapshot, Hud, InputEvent, InputQueue, Session, Viewport, tick};

/// Owns a session and the clocks that drive it
#[derive(Debug, Clone)]
pub struct Runner {
    session: Session,
    inputs: InputQueue,
    /// Virtual time consumed so far (ms)
    clock_ms: f64,
    frame_ms: f64,
    /// Frames fired by this runner
    frames: u64,
    /// Countdown ticks fired by this runner
    seconds: u64,
}

impl Runner {
    pub fn new(settings: Settings, viewport: Viewport) -> Self {
        Self::with_session(Session::new(settings, viewport))
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            frame_ms: session.settings().frame_ms(),
            session,
            inputs: InputQueue::new(),
            clock_ms: 0.0,
            frames: 0,
            seconds: 0,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Virtual milliseconds elapsed
    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    /// Queue an input event for the next frame
    pub fn push(&mut self, event: InputEvent) {
        self.inputs.push(event);
    }

    /// Queue a key press by DOM key code
    pub fn key_down(&mut self, code: &str) {
        self.push(InputEvent::key_down(code));
    }

    /// Queue a key release by DOM key code; unbound codes are dropped
    pub fn key_up(&mut self, code: &str) {
        if let Some(event) = InputEvent::key_up(code) {
            self.push(event);
        }
    }

    pub fn pointer_down(&mut self) {
        self.push(InputEvent::Pointer);
    }

    /// Inputs waiting for the next frame
    pub fn pending_inputs(&self) -> usize {
        self.inputs.len()
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.session.resize(Viewport::new(width, height));
    }

    pub fn hud(&self) -> Hud {
        self.session.hud()
    }

    pub fn entities(&self) -> Vec<EntitySnapshot> {
        self.session.world().snapshot()
    }

    /// Consume `dt_ms` of wall-clock time. Returns the number of frames run.
    ///
    /// Frames and countdown ticks fire in due order; a frame goes first when
    /// both are due at the same instant.
    pub fn advance(&mut self, dt_ms: f64) -> u32 {
        let dt = if dt_ms.is_finite() {
            dt_ms.clamp(0.0, MAX_FRAME_DELTA_MS)
        } else {
            0.0
        };
        let target = self.clock_ms + dt;
        let mut substeps = 0;

        loop {
            let frame_due = self.next_frame_at();
            let countdown_due = self.next_countdown_at();
            let frame_ready = frame_due <= target && substeps < MAX_SUBSTEPS;

            if frame_ready && frame_due <= countdown_due {
                self.run_frame();
                substeps += 1;
            } else if countdown_due <= target {
                self.session.countdown();
                self.seconds += 1;
            } else {
                break;
            }
        }

        if self.next_frame_at() <= target {
            // Substep cap hit; drop the backlog instead of catching up later.
            // Skipped frames never reach the session, so frame-counted delays
            // (level-complete overlay, win screen) stretch in wall-clock time.
            let behind = ((target - self.next_frame_at()) / self.frame_ms).floor() as u64 + 1;
            log::debug!("Skipping {} frames", behind);
            self.frames += behind;
        }

        self.clock_ms = target;
        substeps
    }

    fn next_frame_at(&self) -> f64 {
        (self.frames + 1) as f64 * self.frame_ms
    }

    fn next_countdown_at(&self) -> f64 {
        (self.seconds + 1) as f64 * COUNTDOWN_MS
    }

    fn run_frame(&mut self) {
        let events = self.inputs.drain();
        tick(&mut self.session, &events);
        self.frames += 1;
    }
}
