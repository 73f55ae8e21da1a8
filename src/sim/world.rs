//! A loaded level: static entities plus the actor
//!
//! Built wholesale from a `LevelDef`; only the actor changes afterwards.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorEvent, StepContext};
use super::entities::{EntityRef, EntitySnapshot, ExitZone, Hazard, Platform};
use super::input::TickInput;
use super::level::{LevelDef, PieceKind};
use super::rect::Viewport;
use crate::settings::MotionProfile;

/// Per-step physics knobs handed down from the session
#[derive(Debug, Clone, Copy)]
pub struct StepParams {
    pub motion: MotionProfile,
    pub gravity: f64,
    pub controls_enabled: bool,
    pub hazard_grace_frames: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct World {
    /// Platforms and ladders in collision order
    pub platforms: Vec<Platform>,
    pub hazards: Vec<Hazard>,
    pub exits: Vec<ExitZone>,
    pub actor: Actor,
    /// Top edge of the floor row at load time
    pub floor_y: f64,
    /// Tile size at load time
    pub tile: f64,
    /// Canvas the actor is clamped to
    pub bounds: Viewport,
}

impl World {
    /// Lay out `def` on a canvas of `viewport`
    pub fn build(def: &LevelDef, viewport: Viewport, tile_divisor: f64) -> Self {
        let metrics = viewport.metrics(tile_divisor);
        let mut platforms = Vec::new();
        let mut hazards = Vec::new();
        let mut exits = Vec::new();

        for piece in &def.pieces {
            for rect in piece.rects(&metrics) {
                match piece.kind {
                    PieceKind::Solid => platforms.push(Platform::solid(rect)),
                    PieceKind::Ladder => platforms.push(Platform::ladder(rect)),
                    PieceKind::Hazard => hazards.push(Hazard { rect }),
                    PieceKind::Exit => exits.push(ExitZone { rect }),
                }
            }
        }

        let spawn = DVec2::new(def.spawn.x.resolve(&metrics), def.spawn.y.resolve(&metrics));

        Self {
            platforms,
            hazards,
            exits,
            actor: Actor::new(spawn, metrics.tile),
            floor_y: metrics.floor_y(),
            tile: metrics.tile,
            bounds: viewport,
        }
    }

    /// Advance the actor one frame against this world's obstacles
    pub fn step(&mut self, input: &TickInput, params: &StepParams) -> Vec<ActorEvent> {
        let ctx = StepContext {
            platforms: &self.platforms,
            hazards: &self.hazards,
            exits: &self.exits,
            bounds: self.bounds,
            motion: params.motion,
            gravity: params.gravity,
            controls_enabled: params.controls_enabled,
            hazard_grace_frames: params.hazard_grace_frames,
        };
        self.actor.update(input, &ctx)
    }

    /// Every entity in draw order: platforms, hazards, exits, then the actor
    pub fn entities(&self) -> impl Iterator<Item = EntityRef<'_>> {
        self.platforms
            .iter()
            .map(EntityRef::Platform)
            .chain(self.hazards.iter().map(EntityRef::Hazard))
            .chain(self.exits.iter().map(EntityRef::Exit))
            .chain(std::iter::once(EntityRef::Actor(&self.actor)))
    }

    /// Owned copy of `entities()` for serialization
    pub fn snapshot(&self) -> Vec<EntitySnapshot> {
        self.entities().map(EntitySnapshot::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entities::EntityKind;
    use crate::sim::level::LevelSet;
    use crate::sim::rect::Rect;

    fn build(number: usize) -> World {
        let levels = LevelSet::builtin();
        World::build(levels.get(number).unwrap(), Viewport::new(800.0, 600.0), 20.0)
    }

    #[test]
    fn test_level_one_geometry() {
        let world = build(1);
        let t = 30.0;
        let f = 570.0;

        let solids: Vec<Rect> = world.platforms.iter().map(|p| p.rect).collect();
        assert_eq!(
            solids,
            vec![
                Rect::new(0.0, f, 800.0, t),
                Rect::new(0.0, 0.0, t, 600.0),
                Rect::new(800.0 - t, 0.0, t, 600.0),
                Rect::new(0.0, 0.0, 800.0, t),
                Rect::new(44.0, f - 3.0 * t, 250.0, 250.0),
                Rect::new(450.0, f - 300.0, 3.0 * t, t),
                Rect::new(12.0 * t, f - 1.5 * t, 3.0 * t, 10.0 * t),
                Rect::new(18.0 * t, f - 6.0 * t, 3.0 * t, t),
                Rect::new(17.0 * t, f - 6.0 * t, t, 3.5 * t),
                Rect::new(25.0 * t, f - 7.0 * t, 4.0 * t, t),
                Rect::new(33.0 * t, f - 3.0 * t, 8.0 * t, t),
            ]
        );
        let ladders: Vec<usize> = world
            .platforms
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_ladder())
            .map(|(i, _)| i)
            .collect();
        assert_eq!(ladders, vec![8]);

        assert_eq!(world.hazards.len(), 1 + 4 + 32 + 1);
        assert_eq!(world.hazards[0].rect, Rect::new(300.0, f - 38.0, t, t));
        assert_eq!(world.hazards[1].rect, Rect::new(300.0, f - 38.0, t, t));
        assert_eq!(world.hazards[4].rect.x, 390.0);
        assert_eq!(world.hazards[5].rect.x, 520.0);
        assert_eq!(world.hazards[36].rect.x, 520.0 + 30.0 * 31.0);
        assert_eq!(world.hazards[37].rect, Rect::new(28.0 * t, f - 8.0 * t, t, t));

        assert_eq!(
            world.exits.iter().map(|e| e.rect).collect::<Vec<_>>(),
            vec![Rect::new(39.0 * t, f - 6.0 * t, 2.0 * t, 3.0 * t)]
        );
        assert_eq!(world.actor.pos, DVec2::new(100.0, 100.0));
        assert_eq!(world.floor_y, f);
    }

    #[test]
    fn test_level_two_geometry() {
        let world = build(2);
        assert_eq!(world.platforms.len(), 4);
        assert!(world.hazards.is_empty());
        assert_eq!(
            world.exits[0].rect,
            Rect::new(800.0 - 120.0, 570.0 - 90.0, 60.0, 90.0)
        );
        assert_eq!(world.actor.pos, DVec2::new(50.0, 570.0 - 120.0));
    }

    #[test]
    fn test_layout_follows_viewport() {
        let levels = LevelSet::builtin();
        let wide = World::build(levels.get(2).unwrap(), Viewport::new(1600.0, 900.0), 20.0);
        assert_eq!(wide.tile, 45.0);
        assert_eq!(wide.exits[0].rect.x, 1600.0 - 4.0 * 45.0);
        assert_eq!(wide.actor.height, 1.5 * 45.0);
    }

    #[test]
    fn test_entities_draw_order() {
        let world = build(2);
        let kinds: Vec<EntityKind> = world.entities().map(|e| e.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                EntityKind::Platform,
                EntityKind::Platform,
                EntityKind::Platform,
                EntityKind::Platform,
                EntityKind::Exit,
                EntityKind::Actor,
            ]
        );
        assert_eq!(world.snapshot().len(), 6);
    }
}
