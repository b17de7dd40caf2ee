//! Drawing surface abstraction
//!
//! The simulation draws through a small canvas-like API: rectangle clear,
//! filled and stroked arcs, and a save/restore stack of style state. No
//! pixel access.

use glam::Vec2;

use super::shapes::{filled_arc, stroked_arc};
use super::vertex::Vertex;
use crate::sim::Rgba;

/// Arc tessellation density
const SEGMENTS_PER_RADIAN: f32 = 6.0;

/// A fixed-size 2D drawing target
pub trait Surface {
    fn width(&self) -> f32;
    fn height(&self) -> f32;

    fn clear_rect(&mut self, x: f32, y: f32, w: f32, h: f32);

    /// Push the current style state
    fn save(&mut self);
    /// Pop the most recently saved style state
    fn restore(&mut self);

    fn set_fill(&mut self, color: Rgba);
    fn set_stroke(&mut self, color: Rgba, line_width: f32);

    fn fill_arc(&mut self, center: Vec2, radius: f32, start: f32, end: f32);
    fn stroke_arc(&mut self, center: Vec2, radius: f32, start: f32, end: f32, anticlockwise: bool);
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Style {
    fill: Rgba,
    stroke: Rgba,
    line_width: f32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: Rgba::BLACK,
            stroke: Rgba::BLACK,
            line_width: 1.0,
        }
    }
}

/// Surface that tessellates every draw call into triangles
///
/// The vertex list can be uploaded as-is to a GPU vertex buffer or inspected
/// directly.
#[derive(Debug, Clone)]
pub struct VertexSurface {
    width: f32,
    height: f32,
    style: Style,
    saved: Vec<Style>,
    vertices: Vec<Vertex>,
}

impl VertexSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            style: Style::default(),
            saved: Vec::new(),
            vertices: Vec::new(),
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Number of saved style states not yet restored
    pub fn save_depth(&self) -> usize {
        self.saved.len()
    }
}

impl Surface for VertexSurface {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    /// Drops every triangle touching the rectangle. A rectangle covering the
    /// whole surface drops everything, including geometry hanging off the
    /// edges.
    fn clear_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        if x <= 0.0 && y <= 0.0 && x + w >= self.width && y + h >= self.height {
            self.vertices.clear();
            return;
        }

        let touches = |tri: &[Vertex]| {
            let (mut min, mut max) = (Vec2::splat(f32::INFINITY), Vec2::splat(f32::NEG_INFINITY));
            for v in tri {
                let p = Vec2::from(v.position);
                min = min.min(p);
                max = max.max(p);
            }
            min.x <= x + w && max.x >= x && min.y <= y + h && max.y >= y
        };
        let kept: Vec<Vertex> = self
            .vertices
            .chunks_exact(3)
            .filter(|tri| !touches(tri))
            .flatten()
            .copied()
            .collect();
        self.vertices = kept;
    }

    fn save(&mut self) {
        self.saved.push(self.style);
    }

    fn restore(&mut self) {
        if let Some(style) = self.saved.pop() {
            self.style = style;
        }
    }

    fn set_fill(&mut self, color: Rgba) {
        self.style.fill = color;
    }

    fn set_stroke(&mut self, color: Rgba, line_width: f32) {
        self.style.stroke = color;
        self.style.line_width = line_width;
    }

    fn fill_arc(&mut self, center: Vec2, radius: f32, start: f32, end: f32) {
        self.vertices.extend(filled_arc(
            center,
            radius,
            start,
            end,
            self.style.fill.to_f32(),
            SEGMENTS_PER_RADIAN,
        ));
    }

    fn stroke_arc(&mut self, center: Vec2, radius: f32, start: f32, end: f32, anticlockwise: bool) {
        self.vertices.extend(stroked_arc(
            center,
            radius,
            start,
            end,
            anticlockwise,
            self.style.line_width,
            self.style.stroke.to_f32(),
            SEGMENTS_PER_RADIAN,
        ));
    }
}
