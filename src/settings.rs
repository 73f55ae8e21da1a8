//! Game tuning
//!
//! Every knob the simulation reads. Defaults reproduce the reference feel;
//! a JSON file can override any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};

/// Horizontal speed and jump impulse pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionProfile {
    /// Pixels per frame
    pub speed: f64,
    /// Initial vertical velocity of a jump (negative = up)
    pub jump_force: f64,
}

impl MotionProfile {
    pub const NORMAL: Self = Self {
        speed: NORMAL_SPEED,
        jump_force: NORMAL_JUMP_FORCE,
    };

    pub const BOOSTED: Self = Self {
        speed: BOOST_SPEED,
        jump_force: BOOST_JUMP_FORCE,
    };
}

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Physics ===
    /// Downward acceleration per frame
    pub gravity: f64,
    /// Motion while boost is off
    pub normal: MotionProfile,
    /// Motion while boost is held
    pub boosted: MotionProfile,
    /// Tile size is `min(width, height) / tile_divisor`
    pub tile_divisor: f64,

    // === Session ===
    pub starting_lives: u32,
    /// Countdown length in seconds
    pub time_limit_secs: u32,
    /// Lives lost per hazard contact
    pub hazard_damage: u32,
    /// Frames after a hazard hit during which further contact only pushes out.
    /// Zero keeps the reference damage rate.
    pub hazard_grace_frames: u32,
    /// Hazard contact reloads the level (costing a life) instead of a push-out
    pub reload_on_damage: bool,

    // === Timing (in frames) ===
    pub frame_rate: u32,
    pub win_delay_frames: u32,
    pub level_complete_delay_frames: u32,
    pub level_transition_frames: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            normal: MotionProfile::NORMAL,
            boosted: MotionProfile::BOOSTED,
            tile_divisor: TILE_DIVISOR,

            starting_lives: STARTING_LIVES,
            time_limit_secs: TIME_LIMIT_SECS,
            hazard_damage: HAZARD_DAMAGE,
            hazard_grace_frames: 0,
            reload_on_damage: false,

            frame_rate: FRAME_RATE,
            win_delay_frames: WIN_DELAY_FRAMES,
            level_complete_delay_frames: LEVEL_COMPLETE_DELAY_FRAMES,
            level_transition_frames: LEVEL_TRANSITION_FRAMES,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read and parse a JSON settings file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        if !self.gravity.is_finite() || self.gravity < 0.0 {
            return Err(Error::InvalidSettings("gravity must be finite and >= 0"));
        }
        for profile in [&self.normal, &self.boosted] {
            if !profile.speed.is_finite() || profile.speed <= 0.0 {
                return Err(Error::InvalidSettings("speed must be finite and > 0"));
            }
            if !profile.jump_force.is_finite() || profile.jump_force >= 0.0 {
                return Err(Error::InvalidSettings("jump_force must be finite and < 0"));
            }
        }
        if !self.tile_divisor.is_finite() || self.tile_divisor <= 0.0 {
            return Err(Error::InvalidSettings("tile_divisor must be > 0"));
        }
        if self.starting_lives == 0 {
            return Err(Error::InvalidSettings("starting_lives must be > 0"));
        }
        if self.time_limit_secs == 0 {
            return Err(Error::InvalidSettings("time_limit_secs must be > 0"));
        }
        if self.frame_rate == 0 {
            return Err(Error::InvalidSettings("frame_rate must be > 0"));
        }
        Ok(())
    }

    /// Motion pair for the current boost state
    pub fn motion(&self, boosted: bool) -> MotionProfile {
        if boosted { self.boosted } else { self.normal }
    }

    /// Milliseconds per frame at the configured rate
    pub fn frame_ms(&self) -> f64 {
        1000.0 / self.frame_rate as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.motion(false), MotionProfile::NORMAL);
        assert_eq!(settings.motion(true), MotionProfile::BOOSTED);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "starting_lives": 5, "gravity": 0.5 }"#).unwrap();
        assert_eq!(settings.starting_lives, 5);
        assert_eq!(settings.gravity, 0.5);
        assert_eq!(settings.time_limit_secs, TIME_LIMIT_SECS);
        assert_eq!(settings.normal, MotionProfile::NORMAL);
    }

    #[test]
    fn test_rejects_upward_gravity() {
        let err = Settings::from_json(r#"{ "gravity": -1.0 }"#).unwrap_err();
        assert!(matches!(err, Error::InvalidSettings(_)));
    }

    #[test]
    fn test_rejects_downward_jump() {
        let err = Settings::from_json(r#"{ "normal": { "speed": 2.0, "jump_force": 4.0 } }"#)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidSettings(_)));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Settings::from_json("{ not json").unwrap_err(),
            Error::Json(_)
        ));
    }
}
