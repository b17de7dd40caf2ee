//! HTML canvas 2D surface (wasm32 only)

use glam::Vec2;
use web_sys::CanvasRenderingContext2d;

use super::surface::Surface;
use crate::sim::Rgba;

/// [`Surface`] backed by a `CanvasRenderingContext2d`
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    width: f32,
    height: f32,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d, width: f32, height: f32) -> Self {
        Self { ctx, width, height }
    }
}

impl Surface for CanvasSurface {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn clear_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.ctx.clear_rect(x as f64, y as f64, w as f64, h as f64);
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn set_fill(&mut self, color: Rgba) {
        self.ctx.set_fill_style_str(&color.css());
    }

    fn set_stroke(&mut self, color: Rgba, line_width: f32) {
        self.ctx.set_stroke_style_str(&color.css());
        self.ctx.set_line_width(line_width as f64);
    }

    fn fill_arc(&mut self, center: Vec2, radius: f32, start: f32, end: f32) {
        self.ctx.begin_path();
        if let Err(e) = self.ctx.arc(
            center.x as f64,
            center.y as f64,
            radius as f64,
            start as f64,
            end as f64,
        ) {
            log::warn!("arc failed: {:?}", e);
            return;
        }
        self.ctx.fill();
    }

    fn stroke_arc(&mut self, center: Vec2, radius: f32, start: f32, end: f32, anticlockwise: bool) {
        self.ctx.begin_path();
        if let Err(e) = self.ctx.arc_with_anticlockwise(
            center.x as f64,
            center.y as f64,
            radius as f64,
            start as f64,
            end as f64,
            anticlockwise,
        ) {
            log::warn!("arc failed: {:?}", e);
            return;
        }
        self.ctx.stroke();
    }
}
