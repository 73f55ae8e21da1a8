//! The controllable character
//!
//! `Actor::update` is the heart of the simulation. The steps run in a fixed
//! order and later steps deliberately override earlier ones; the order is
//! part of the game feel and must not be rearranged.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::collision::{Contact, hazard_push_out, intersects, resolve_solid};
use super::entities::{ExitZone, Hazard, Platform};
use super::input::TickInput;
use super::rect::{Rect, Viewport};
use crate::consts::{ACTOR_HEIGHT_TILES, ACTOR_WIDTH_TILES};
use crate::settings::MotionProfile;

/// Which way the actor is looking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// Something the session has to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActorEvent {
    /// Touched the hazard at this index in the world's hazard list
    HitHazard { index: usize },
    /// Touched the exit at this index in the world's exit list
    ReachedExit { index: usize },
}

/// Everything the actor collides with and moves by during one update
#[derive(Debug, Clone, Copy)]
pub struct StepContext<'a> {
    pub platforms: &'a [Platform],
    pub hazards: &'a [Hazard],
    pub exits: &'a [ExitZone],
    /// Canvas the actor is clamped to
    pub bounds: Viewport,
    pub motion: MotionProfile,
    pub gravity: f64,
    /// False while the session does not accept movement input
    pub controls_enabled: bool,
    /// Frames of damage immunity after a hazard hit
    pub hazard_grace_frames: u32,
}

/// The player character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Top-left corner
    pub pos: DVec2,
    /// Pixels per frame
    pub vel: DVec2,
    pub width: f64,
    pub height: f64,
    pub facing: Facing,
    pub on_ground: bool,
    pub climbing: bool,
    /// Frames until a hazard can damage again
    #[serde(default)]
    pub damage_cooldown: u32,
}

impl Actor {
    /// Spawn at rest with the size derived from the tile
    pub fn new(pos: DVec2, tile: f64) -> Self {
        Self {
            pos,
            vel: DVec2::ZERO,
            width: tile * ACTOR_WIDTH_TILES,
            height: tile * ACTOR_HEIGHT_TILES,
            facing: Facing::Right,
            on_ground: false,
            climbing: false,
            damage_cooldown: 0,
        }
    }

    /// Current bounding box
    pub fn rect(&self) -> Rect {
        Rect::at(self.pos, self.width, self.height)
    }

    /// Advance one frame. Returns hazard and exit contacts in that order.
    pub fn update(&mut self, input: &TickInput, ctx: &StepContext<'_>) -> Vec<ActorEvent> {
        let mut events = Vec::new();
        let control = ctx.controls_enabled;

        // 1. Gravity
        if !self.on_ground && !self.climbing {
            self.vel.y += ctx.gravity;
        }

        // 2. Horizontal intent (left wins when both are held)
        if input.left && control {
            self.vel.x = -ctx.motion.speed;
            self.facing = Facing::Left;
        } else if input.right && control {
            self.vel.x = ctx.motion.speed;
            self.facing = Facing::Right;
        } else {
            self.vel.x = 0.0;
        }

        // 3. Jump
        if input.jump && self.on_ground && control {
            self.vel.y = ctx.motion.jump_force;
            self.on_ground = false;
        }

        // 4. Ladders: holding jump on a ladder always climbs up
        self.climbing = false;
        if input.jump && control {
            let body = self.rect();
            if ctx.platforms.iter().any(|p| p.can_climb(&body)) {
                self.climbing = true;
                self.vel.y = -ctx.motion.speed;
            }
        }

        // 5. Integrate
        self.pos += self.vel;

        // 6. Screen clamp
        self.clamp_to(ctx.bounds);

        // 7. Solid platforms, in list order
        self.on_ground = false;
        for platform in ctx.platforms.iter().filter(|p| !p.is_ladder()) {
            match resolve_solid(&self.rect(), self.vel, &platform.rect) {
                Some(Contact::Landed { y }) => {
                    self.pos.y = y;
                    self.on_ground = true;
                    self.vel.y = 0.0;
                }
                Some(Contact::HeadBump { y }) => {
                    self.pos.y = y;
                    self.vel.y = 0.0;
                }
                Some(Contact::Side { x }) => self.pos.x = x,
                Some(Contact::Embedded) | None => {}
            }
        }

        // 8. Hazards: first hit wins
        let mut damaged = false;
        for (index, hazard) in ctx.hazards.iter().enumerate() {
            let body = self.rect();
            if intersects(&body, &hazard.rect) {
                if self.damage_cooldown == 0 {
                    events.push(ActorEvent::HitHazard { index });
                    self.damage_cooldown = ctx.hazard_grace_frames;
                    damaged = true;
                }
                self.pos.x = hazard_push_out(&body, &hazard.rect);
                break;
            }
        }
        if !damaged {
            self.damage_cooldown = self.damage_cooldown.saturating_sub(1);
        }

        // Solid and hazard push-outs can land past the canvas edge
        self.clamp_to(ctx.bounds);

        // 9. Exits: first hit wins
        let body = self.rect();
        if let Some(index) = ctx.exits.iter().position(|e| intersects(&body, &e.rect)) {
            events.push(ActorEvent::ReachedExit { index });
        }

        events
    }

    /// Keep the body on the canvas. Sequential so a tiny canvas cannot
    /// invert the range; resting on the bottom edge counts as ground.
    fn clamp_to(&mut self, bounds: Viewport) {
        if self.pos.x < 0.0 {
            self.pos.x = 0.0;
        }
        if self.pos.x + self.width > bounds.width {
            self.pos.x = bounds.width - self.width;
        }
        if self.pos.y < 0.0 {
            self.pos.y = 0.0;
        }
        if self.pos.y + self.height > bounds.height {
            self.pos.y = bounds.height - self.height;
            self.on_ground = true;
            self.vel.y = 0.0;
        }
    }
}
