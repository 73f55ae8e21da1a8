//! Collision detection and response for axis-aligned boxes
//!
//! Response is a velocity-direction heuristic, not a minimum translation
//! vector: the direction the actor was travelling decides which face of a
//! solid it is resolved against, and only one axis is corrected per solid.

use glam::DVec2;

use super::rect::Rect;

/// Strict AABB overlap. Touching edges and zero-sized rects do not count.
#[inline]
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    a.width > 0.0
        && a.height > 0.0
        && b.width > 0.0
        && b.height > 0.0
        && a.x < b.x + b.width
        && a.x + a.width > b.x
        && a.y < b.y + b.height
        && a.y + a.height > b.y
}

/// How an overlapping body gets separated from a solid
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Contact {
    /// Body was falling onto the top face; rest at `y`
    Landed { y: f64 },
    /// Body was rising into the bottom face; stop at `y`
    HeadBump { y: f64 },
    /// Body was moving horizontally into a side face; move to `x`
    Side { x: f64 },
    /// Overlap that the heuristic cannot attribute to any face
    Embedded,
}

/// Decide how `body` (already moved by `vel`) separates from `solid`.
///
/// Returns `None` when the two do not overlap. Each test checks whether the
/// body's leading edge was on the near side of the face before this frame's
/// motion.
pub fn resolve_solid(body: &Rect, vel: DVec2, solid: &Rect) -> Option<Contact> {
    if !intersects(body, solid) {
        return None;
    }

    if vel.y > 0.0 && body.bottom() <= solid.y + vel.y {
        return Some(Contact::Landed {
            y: solid.y - body.height,
        });
    }
    if vel.y < 0.0 && body.y >= solid.bottom() + vel.y {
        return Some(Contact::HeadBump { y: solid.bottom() });
    }
    if vel.x > 0.0 && body.right() <= solid.x + vel.x {
        return Some(Contact::Side {
            x: solid.x - body.width,
        });
    }
    if vel.x < 0.0 && body.x >= solid.right() + vel.x {
        return Some(Contact::Side { x: solid.right() });
    }

    Some(Contact::Embedded)
}

/// New x for a body knocked off a hazard: away from the hazard's centre
pub fn hazard_push_out(body: &Rect, hazard: &Rect) -> f64 {
    if body.x < hazard.center_x() {
        hazard.x - body.width
    } else {
        hazard.right()
    }
}
