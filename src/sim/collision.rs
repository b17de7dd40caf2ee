//! Collision detection and response for circular entities
//!
//! Detection is a plain center-distance test. Response is a two-step
//! elastic resolution: push the pair apart along the contact normal, then
//! exchange a scalar impulse along that normal.

use glam::Vec2;

use super::entity::Entity;

/// Result of an overlap check between two entities
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Vector from the first entity's center to the second's
    pub delta: Vec2,
    /// Center distance
    pub dist: f32,
}

impl Contact {
    /// Unit normal pointing from the first entity to the second.
    ///
    /// Coincident centers have no defined normal; the x axis is used so the
    /// positional correction still separates the pair.
    pub fn normal(&self) -> Vec2 {
        if self.dist > 0.0 {
            self.delta / self.dist
        } else {
            Vec2::X
        }
    }
}

/// Euclidean distance between centers
#[inline]
pub fn distance(a: &Entity, b: &Entity) -> f32 {
    a.pos.distance(b.pos)
}

/// Check whether two entities touch or overlap (`dist <= ra + rb`)
pub fn detect_collision(a: &Entity, b: &Entity) -> Option<Contact> {
    let delta = b.pos - a.pos;
    let dist = delta.length();
    if dist > a.radius() + b.radius() {
        return None;
    }
    Some(Contact { delta, dist })
}

/// Resolve a detected contact between two bounded entities
///
/// 1. Positional correction: each entity moves half the overlap along the
///    normal, leaving the centers exactly `ra + rb` apart.
/// 2. Impulse: `k = -2 (v_rel · n) / (1/ma + 1/mb)`, then
///    `va -= k n / ma` and `vb += k n / mb`.
pub fn resolve_collision(a: &mut Entity, b: &mut Entity, contact: &Contact) {
    let n = contact.normal();
    let overlap = a.radius() + b.radius() - contact.dist;
    a.pos -= n * overlap / 2.0;
    b.pos += n * overlap / 2.0;

    let rel = b.velocity.get() - a.velocity.get();
    let k = -2.0 * rel.dot(n) / (1.0 / a.mass() + 1.0 / b.mass());

    let va = a.velocity.get() - k * n / a.mass();
    let vb = b.velocity.get() + k * n / b.mass();
    a.velocity.set(va);
    b.velocity.set(vb);
}
