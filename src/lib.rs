//! Palace Run - a single-screen platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (actor physics, collisions, level state)
//! - `runner`: Single-threaded driver merging frame and countdown ticks
//! - `settings`: Data-driven tuning
//! - `error`: Crate error type

pub mod error;
pub mod runner;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::{Error, Result};
pub use runner::Runner;
pub use settings::{MotionProfile, Settings};

/// Game configuration constants
pub mod consts {
    /// Nominal frame rate of the simulation tick
    pub const FRAME_RATE: u32 = 60;
    /// Milliseconds per simulation frame
    pub const FRAME_MS: f64 = 1000.0 / FRAME_RATE as f64;
    /// Milliseconds per countdown tick
    pub const COUNTDOWN_MS: f64 = 1000.0;
    /// Maximum frames per `Runner::advance` call to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest wall-clock delta accepted per `Runner::advance` call (ms)
    pub const MAX_FRAME_DELTA_MS: f64 = 100.0;

    /// Downward acceleration per frame
    pub const GRAVITY: f64 = 0.3;
    pub const NORMAL_SPEED: f64 = 2.5;
    pub const BOOST_SPEED: f64 = 3.5;
    /// Jump impulses are negative (screen y grows downward)
    pub const NORMAL_JUMP_FORCE: f64 = -8.0;
    pub const BOOST_JUMP_FORCE: f64 = -10.0;

    /// Tile size is `min(width, height) / TILE_DIVISOR`
    pub const TILE_DIVISOR: f64 = 20.0;
    /// Actor size in tiles
    pub const ACTOR_WIDTH_TILES: f64 = 0.7;
    pub const ACTOR_HEIGHT_TILES: f64 = 1.5;

    pub const STARTING_LIVES: u32 = 3;
    pub const TIME_LIMIT_SECS: u32 = 120;
    pub const HAZARD_DAMAGE: u32 = 1;

    /// Pause before the win screen (500 ms)
    pub const WIN_DELAY_FRAMES: u32 = 30;
    /// Pause before the level-complete overlay shows (500 ms)
    pub const LEVEL_COMPLETE_DELAY_FRAMES: u32 = 30;
    /// How long the level-complete overlay stays up (2000 ms)
    pub const LEVEL_TRANSITION_FRAMES: u32 = 120;
}

/// Format whole seconds as `MM:SS`
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
