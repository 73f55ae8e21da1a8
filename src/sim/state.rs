//! Session state and lifecycle transitions
//!
//! One `Session` owns everything a run needs: the loaded world, lives,
//! countdown, level index, boost and the phase machine. Frame and countdown
//! ticks live in `tick.rs`.

use serde::{Deserialize, Serialize};

use super::actor::Actor;
use super::input::HeldKeys;
use super::level::LevelSet;
use super::rect::Viewport;
use super::schedule::{Schedule, Transition};
use super::world::World;
use crate::error::{Error, Result};
use crate::format_clock;
use crate::settings::{MotionProfile, Settings};

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start screen; the first key or click begins play
    NotStarted,
    /// Active gameplay
    Playing,
    /// Timer and actor frozen
    Paused,
    /// Exit reached; waiting for the next level (or the win screen)
    LevelComplete,
    /// Out of lives or time
    GameOver,
    /// Final level cleared
    Won,
}

impl GamePhase {
    /// Only a restart leaves these
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Won)
    }
}

/// Everything a HUD or overlay layer displays
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub level: usize,
    pub lives: u32,
    pub time_left: u32,
    /// `MM:SS`
    pub clock: String,
    pub phase: GamePhase,
    pub boosted: bool,
    pub level_complete_overlay: bool,
}

/// A single run of the game
#[derive(Debug, Clone)]
pub struct Session {
    pub(super) settings: Settings,
    pub(super) levels: LevelSet,
    pub(super) viewport: Viewport,
    pub(super) phase: GamePhase,
    /// 1-based level number
    pub(super) level: usize,
    pub(super) lives: u32,
    pub(super) time_left: u32,
    pub(super) boosted: bool,
    pub(super) held: HeldKeys,
    /// Frames stepped since the session was created
    pub(super) frame: u64,
    pub(super) schedule: Schedule,
    pub(super) level_complete_overlay: bool,
    pub(super) world: World,
}

impl Session {
    /// New run over the built-in levels, waiting on the start screen
    pub fn new(settings: Settings, viewport: Viewport) -> Self {
        Self::with_levels(settings, viewport, LevelSet::builtin())
    }

    /// New run over a custom level set
    pub fn with_levels(settings: Settings, viewport: Viewport, levels: LevelSet) -> Self {
        let world = World::build(levels.first(), viewport, settings.tile_divisor);
        Self {
            lives: settings.starting_lives,
            time_left: settings.time_limit_secs,
            settings,
            levels,
            viewport,
            phase: GamePhase::NotStarted,
            level: 1,
            boosted: false,
            held: HeldKeys::default(),
            frame: 0,
            schedule: Schedule::new(),
            level_complete_overlay: false,
            world,
        }
    }

    // === Accessors ===

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn is_boosted(&self) -> bool {
        self.boosted
    }

    /// Speed and jump force currently in effect
    pub fn motion(&self) -> MotionProfile {
        self.settings.motion(self.boosted)
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn actor(&self) -> &Actor {
        &self.world.actor
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn levels(&self) -> &LevelSet {
        &self.levels
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn held_keys(&self) -> HeldKeys {
        self.held
    }

    pub fn level_complete_overlay(&self) -> bool {
        self.level_complete_overlay
    }

    /// Whether movement input reaches the actor (playing, not paused)
    pub fn accepts_control(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Number of deferred transitions still waiting
    pub fn pending_transitions(&self) -> usize {
        self.schedule.len()
    }

    pub fn hud(&self) -> Hud {
        Hud {
            level: self.level,
            lives: self.lives,
            time_left: self.time_left,
            clock: format_clock(self.time_left),
            phase: self.phase,
            boosted: self.boosted,
            level_complete_overlay: self.level_complete_overlay,
        }
    }

    // === Lifecycle ===

    /// Leave the start screen
    pub fn start(&mut self) {
        if self.phase == GamePhase::NotStarted {
            self.phase = GamePhase::Playing;
            log::info!("Game started on level {}", self.level);
        }
    }

    pub fn pause(&mut self) {
        if self.phase == GamePhase::Playing {
            self.phase = GamePhase::Paused;
            log::debug!("Paused");
        }
    }

    pub fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Playing;
            log::debug!("Resumed");
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Playing => self.pause(),
            GamePhase::Paused => self.resume(),
            _ => {}
        }
    }

    /// Hazard contact: lose lives without reloading the level
    pub fn take_damage(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.lives = self.lives.saturating_sub(self.settings.hazard_damage);
        log::debug!("Took damage, {} lives left", self.lives);
        if self.lives == 0 {
            self.game_over();
        }
    }

    /// Lose a life and restart the current level from its spawn point.
    /// Boost is dropped; lives, countdown and level number carry over.
    pub fn lose_life(&mut self) {
        if !matches!(self.phase, GamePhase::Playing | GamePhase::Paused) {
            return;
        }
        self.lives = self.lives.saturating_sub(1);
        self.deactivate_boost();
        if self.lives == 0 {
            self.game_over();
        } else {
            self.reload_world();
            log::info!("Life lost, restarting level {} ({} lives left)", self.level, self.lives);
        }
    }

    /// Exit reached. Only the first call per level has any effect.
    pub fn complete_level(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.phase = GamePhase::LevelComplete;
        let now = self.frame;

        if self.levels.is_final(self.level) {
            log::info!("Final level {} cleared", self.level);
            self.schedule
                .at(now + u64::from(self.settings.win_delay_frames), Transition::Win);
        } else {
            log::info!("Level {} complete", self.level);
            let overlay_at = now + u64::from(self.settings.level_complete_delay_frames);
            let advance_at = overlay_at + u64::from(self.settings.level_transition_frames);
            self.schedule.at(overlay_at, Transition::ShowLevelComplete);
            self.schedule.at(advance_at, Transition::AdvanceLevel);
        }
    }

    /// Start a fresh run from level 1. Only valid after game over or a win.
    pub fn restart(&mut self) {
        if !self.phase.is_terminal() {
            return;
        }
        self.level = 1;
        self.lives = self.settings.starting_lives;
        self.time_left = self.settings.time_limit_secs;
        self.deactivate_boost();
        self.schedule.clear();
        self.level_complete_overlay = false;
        self.reload_world();
        self.phase = GamePhase::Playing;
        log::info!("Game restarted");
    }

    /// Switch to the boosted motion profile; no-op if already boosted
    pub fn activate_boost(&mut self) {
        if !self.boosted {
            self.boosted = true;
            log::debug!("Boost on");
        }
    }

    /// Back to normal motion, whatever the current state
    pub fn deactivate_boost(&mut self) {
        if self.boosted {
            log::debug!("Boost off");
        }
        self.boosted = false;
    }

    /// Load level `number` (1-based) without touching phase, lives or timer
    pub fn load_level(&mut self, number: usize) -> Result<()> {
        let Some(def) = self.levels.get(number) else {
            log::warn!("Refusing to load unknown level {}", number);
            return Err(Error::UnknownLevel(number));
        };
        self.world = World::build(def, self.viewport, self.settings.tile_divisor);
        self.level = number;
        log::info!("Loaded level {} ({})", number, def.name);
        Ok(())
    }

    /// New canvas size. Clamping follows immediately; geometry and tile size
    /// follow at the next level load.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.world.bounds = viewport;
    }

    pub(super) fn game_over(&mut self) {
        self.phase = GamePhase::GameOver;
        self.schedule.clear();
        log::info!("Game over on level {}", self.level);
    }

    pub(super) fn reload_world(&mut self) {
        if let Err(err) = self.load_level(self.level) {
            log::warn!("Level reload failed: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing() -> Session {
        let mut session = Session::new(Settings::default(), Viewport::new(800.0, 600.0));
        session.start();
        session
    }

    #[test]
    fn test_new_session_waits_for_start() {
        let session = Session::new(Settings::default(), Viewport::default());
        assert_eq!(session.phase(), GamePhase::NotStarted);
        assert_eq!(session.level(), 1);
        assert_eq!(session.lives(), 3);
        assert_eq!(session.time_left(), 120);
        assert_eq!(session.hud().clock, "02:00");
    }

    #[test]
    fn test_start_only_from_not_started() {
        let mut session = playing();
        assert_eq!(session.phase(), GamePhase::Playing);
        session.pause();
        session.start();
        assert_eq!(session.phase(), GamePhase::Paused);
    }

    #[test]
    fn test_pause_resume() {
        let mut session = playing();
        session.toggle_pause();
        assert_eq!(session.phase(), GamePhase::Paused);
        session.pause();
        assert_eq!(session.phase(), GamePhase::Paused);
        session.toggle_pause();
        assert_eq!(session.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_control_only_while_playing() {
        let mut session = Session::new(Settings::default(), Viewport::default());
        assert!(!session.accepts_control());
        session.start();
        assert!(session.accepts_control());
        session.pause();
        assert!(!session.accepts_control());
        session.resume();
        session.complete_level();
        assert!(!session.accepts_control());
    }

    #[test]
    fn test_damage_to_game_over() {
        let mut session = playing();
        session.take_damage();
        session.take_damage();
        assert_eq!(session.lives(), 1);
        assert_eq!(session.phase(), GamePhase::Playing);
        session.take_damage();
        assert_eq!(session.lives(), 0);
        assert_eq!(session.phase(), GamePhase::GameOver);
        // Nothing below zero
        session.take_damage();
        assert_eq!(session.lives(), 0);
    }

    #[test]
    fn test_damage_ignored_before_start() {
        let mut session = Session::new(Settings::default(), Viewport::default());
        session.take_damage();
        session.lose_life();
        assert_eq!(session.lives(), 3);
        assert_eq!(session.phase(), GamePhase::NotStarted);
    }

    #[test]
    fn test_lose_life_reloads_level() {
        let mut session = playing();
        session.world.actor.pos.x = 400.0;
        session.activate_boost();
        session.time_left = 77;

        session.lose_life();
        assert_eq!(session.lives(), 2);
        assert_eq!(session.actor().pos.x, 100.0);
        assert!(!session.is_boosted());
        assert_eq!(session.time_left(), 77);
        assert_eq!(session.level(), 1);
        assert_eq!(session.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_complete_level_is_idempotent() {
        let mut session = playing();
        session.complete_level();
        session.complete_level();
        session.complete_level();
        assert_eq!(session.phase(), GamePhase::LevelComplete);
        assert_eq!(session.pending_transitions(), 2);
    }

    #[test]
    fn test_final_level_schedules_win() {
        let mut session = playing();
        session.load_level(2).unwrap();
        session.complete_level();
        assert_eq!(session.pending_transitions(), 1);
    }

    #[test]
    fn test_restart_only_when_terminal() {
        let mut session = playing();
        session.take_damage();
        session.restart();
        assert_eq!(session.lives(), 2);

        session.take_damage();
        session.take_damage();
        session.restart();
        assert_eq!(session.phase(), GamePhase::Playing);
        assert_eq!(session.lives(), 3);
        assert_eq!(session.time_left(), 120);
        assert_eq!(session.level(), 1);
    }

    #[test]
    fn test_boost_idempotent() {
        let mut session = playing();
        session.activate_boost();
        let once = session.motion();
        session.activate_boost();
        assert_eq!(session.motion(), once);
        assert_eq!(once, MotionProfile::BOOSTED);
        session.deactivate_boost();
        session.deactivate_boost();
        assert_eq!(session.motion(), MotionProfile::NORMAL);
    }

    #[test]
    fn test_unknown_level_rejected() {
        let mut session = playing();
        let before = session.world().clone();
        assert!(matches!(session.load_level(3), Err(Error::UnknownLevel(3))));
        assert!(matches!(session.load_level(0), Err(Error::UnknownLevel(0))));
        assert_eq!(session.world(), &before);
        assert_eq!(session.level(), 1);
    }

    #[test]
    fn test_resize_updates_bounds_not_geometry() {
        let mut session = playing();
        session.resize(Viewport::new(1600.0, 900.0));
        assert_eq!(session.world().bounds.width, 1600.0);
        assert_eq!(session.world().tile, 30.0);
        session.load_level(1).unwrap();
        assert_eq!(session.world().tile, 45.0);
    }
}
