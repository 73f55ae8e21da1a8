//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable iteration order (level declaration order)
//! - No rendering or platform dependencies

pub mod actor;
pub mod collision;
pub mod entities;
pub mod input;
pub mod level;
pub mod rect;
pub mod schedule;
pub mod state;
pub mod tick;
pub mod world;

pub use actor::{Actor, ActorEvent, Facing};
pub use collision::{Contact, intersects, resolve_solid};
pub use entities::{EntityKind, EntityRef, EntitySnapshot, ExitZone, Hazard, Platform, PlatformKind};
pub use input::{HeldKeys, InputEvent, InputQueue, Key, TickInput};
pub use level::{LevelDef, LevelSet};
pub use rect::{Metrics, Rect, Viewport};
pub use schedule::{Schedule, Transition};
pub use state::{GamePhase, Hud, Session};
pub use tick::tick;
pub use world::{StepParams, World};
