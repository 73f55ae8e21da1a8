//! Static world entities
//!
//! Platforms, hazards and exits never move; they are rebuilt wholesale on
//! every level load.

use serde::{Deserialize, Serialize};

use super::actor::Actor;
use super::rect::Rect;

/// Whether a platform blocks movement or can be climbed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlatformKind {
    #[default]
    Solid,
    Ladder,
}

/// A static platform or ladder
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Rect,
    pub kind: PlatformKind,
}

impl Platform {
    pub fn solid(rect: Rect) -> Self {
        Self {
            rect,
            kind: PlatformKind::Solid,
        }
    }

    pub fn ladder(rect: Rect) -> Self {
        Self {
            rect,
            kind: PlatformKind::Ladder,
        }
    }

    #[inline]
    pub fn is_ladder(&self) -> bool {
        self.kind == PlatformKind::Ladder
    }

    /// A ladder is climbable when the body's horizontal centre lies strictly
    /// inside it and the body overlaps it vertically.
    pub fn can_climb(&self, body: &Rect) -> bool {
        let cx = body.center_x();
        self.is_ladder()
            && cx > self.rect.x
            && cx < self.rect.right()
            && body.bottom() > self.rect.y
            && body.y < self.rect.bottom()
    }
}

/// Spikes: touching one costs a life
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hazard {
    pub rect: Rect,
}

/// The door that finishes a level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExitZone {
    pub rect: Rect,
}

/// Kind tag for a drawable entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Platform,
    Ladder,
    Hazard,
    Exit,
    Actor,
}

/// Borrowed view of one world entity, for renderers
#[derive(Debug, Clone, Copy)]
pub enum EntityRef<'a> {
    Platform(&'a Platform),
    Hazard(&'a Hazard),
    Exit(&'a ExitZone),
    Actor(&'a Actor),
}

impl EntityRef<'_> {
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityRef::Platform(p) if p.is_ladder() => EntityKind::Ladder,
            EntityRef::Platform(_) => EntityKind::Platform,
            EntityRef::Hazard(_) => EntityKind::Hazard,
            EntityRef::Exit(_) => EntityKind::Exit,
            EntityRef::Actor(_) => EntityKind::Actor,
        }
    }

    pub fn rect(&self) -> Rect {
        match self {
            EntityRef::Platform(p) => p.rect,
            EntityRef::Hazard(h) => h.rect,
            EntityRef::Exit(e) => e.rect,
            EntityRef::Actor(a) => a.rect(),
        }
    }
}

/// Flattened entity for serialization to a UI layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EntitySnapshot {
    pub kind: EntityKind,
    pub rect: Rect,
}

impl From<EntityRef<'_>> for EntitySnapshot {
    fn from(entity: EntityRef<'_>) -> Self {
        Self {
            kind: entity.kind(),
            rect: entity.rect(),
        }
    }
}
