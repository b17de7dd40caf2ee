//! Entity rendering and per-frame UI signals

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use super::surface::Surface;
use crate::consts::TICK_MS;
use crate::sim::{Entity, Rgba, Status, World};

/// Faint stroke used for the health ring
pub const HEALTH_RING: Rgba = Rgba::rgba(0, 0, 0, 0.1);

/// Display fill for an entity this frame
///
/// Defeated entities draw solid black. Invincible entities pulse: their
/// alpha follows `|sin|` of the remaining invincibility time, capped at the
/// base alpha.
pub fn entity_color(entity: &Entity) -> Rgba {
    if entity.health() == 0.0 {
        return Rgba::BLACK;
    }
    let base = entity.color();
    if !entity.is_invincible() {
        return base;
    }
    let phase = 7.0 * PI / 2.0 * entity.invincible_remaining_ms() / TICK_MS / 100.0;
    base.with_alpha(phase.sin().abs().min(base.a))
}

/// Draw one entity: a filled disc plus a health ring swept anticlockwise
/// from twelve o'clock in proportion to `health / max_health`
pub fn render_entity<S: Surface + ?Sized>(entity: &Entity, surface: &mut S) {
    let center = entity.pos;
    let radius = entity.radius();

    surface.save();
    surface.set_fill(entity_color(entity));
    surface.fill_arc(center, radius, 0.0, TAU);

    let line_width = radius / 3.0;
    surface.set_stroke(HEALTH_RING, line_width);
    let start = -FRAC_PI_2;
    let end = start - TAU * entity.health() / entity.max_health();
    surface.stroke_arc(center, radius - line_width / 2.0, start, end, true);
    surface.restore();
}

/// Clear the frame and draw every entity in collection order (later entries
/// end up on top)
pub fn draw_world<S: Surface + ?Sized>(world: &World, surface: &mut S) {
    let (w, h) = (surface.width(), surface.height());
    surface.clear_rect(0.0, 0.0, w, h);
    for entity in &world.entities {
        render_entity(entity, surface);
    }
}

/// Display state recomputed every frame from the session status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameSignals {
    /// Desaturate the whole frame
    pub grayscale: bool,
    pub pause_visible: bool,
    pub gameover_visible: bool,
}

impl FrameSignals {
    pub fn from_status(status: Status) -> Self {
        Self {
            grayscale: matches!(status, Status::Paused | Status::Lost),
            pause_visible: status == Status::Paused,
            gameover_visible: status == Status::Lost,
        }
    }
}
