//! Shape generation for 2D primitives
//!
//! Arcs follow canvas conventions: angles in radians, y axis pointing down,
//! `anticlockwise` selects the sweep direction.

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;

/// Resolve an arc into `(from, span)` with `span` in `[0, TAU]`, so the arc
/// is always walked from `from` to `from + span`
pub fn arc_sweep(start: f32, end: f32, anticlockwise: bool) -> (f32, f32) {
    let delta = if anticlockwise { start - end } else { end - start };
    let span = if delta >= TAU { TAU } else { delta.rem_euclid(TAU) };
    if anticlockwise {
        (start - span, span)
    } else {
        (start, span)
    }
}

fn segment_count(span: f32, segments_per_radian: f32) -> u32 {
    ((span * segments_per_radian).ceil() as u32).max(1)
}

#[inline]
fn point_on(center: Vec2, radius: f32, theta: f32) -> Vec2 {
    Vec2::new(
        center.x + radius * theta.cos(),
        center.y + radius * theta.sin(),
    )
}

/// Generate vertices for a filled arc
///
/// Like a canvas `arc` + `fill`, the region is closed by the chord between
/// the arc's endpoints; a full sweep gives a disc.
pub fn filled_arc(
    center: Vec2,
    radius: f32,
    start: f32,
    end: f32,
    color: [f32; 4],
    segments_per_radian: f32,
) -> Vec<Vertex> {
    let (from, span) = arc_sweep(start, end, false);
    if span <= 0.0 || radius <= 0.0 {
        return Vec::new();
    }
    let segments = segment_count(span, segments_per_radian);
    let anchor = point_on(center, radius, from);
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 1..segments {
        let theta1 = from + (i as f32 / segments as f32) * span;
        let theta2 = from + ((i + 1) as f32 / segments as f32) * span;
        let p1 = point_on(center, radius, theta1);
        let p2 = point_on(center, radius, theta2);

        // Fan from the first point on the arc
        vertices.push(Vertex::new(anchor.x, anchor.y, color));
        vertices.push(Vertex::new(p1.x, p1.y, color));
        vertices.push(Vertex::new(p2.x, p2.y, color));
    }

    vertices
}

/// Generate vertices for a stroked arc (a band `line_width` thick centered
/// on `radius`)
#[allow(clippy::too_many_arguments)]
pub fn stroked_arc(
    center: Vec2,
    radius: f32,
    start: f32,
    end: f32,
    anticlockwise: bool,
    line_width: f32,
    color: [f32; 4],
    segments_per_radian: f32,
) -> Vec<Vertex> {
    let (from, span) = arc_sweep(start, end, anticlockwise);
    if span <= 0.0 || line_width <= 0.0 {
        return Vec::new();
    }
    let inner_r = (radius - line_width / 2.0).max(0.0);
    let outer_r = radius + line_width / 2.0;
    let segments = segment_count(span, segments_per_radian);
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = from + (i as f32 / segments as f32) * span;
        let theta2 = from + ((i + 1) as f32 / segments as f32) * span;

        let inner1 = point_on(center, inner_r, theta1);
        let outer1 = point_on(center, outer_r, theta1);
        let inner2 = point_on(center, inner_r, theta2);
        let outer2 = point_on(center, outer_r, theta2);

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(inner2.x, inner2.y, color));

        vertices.push(Vertex::new(inner2.x, inner2.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(outer2.x, outer2.y, color));
    }

    vertices
}
