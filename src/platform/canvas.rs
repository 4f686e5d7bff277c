//! `Surface` over a browser `CanvasRenderingContext2d`

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::renderer::{Color, Surface};

const TWO_PI: f64 = std::f64::consts::PI * 2.0;

/// CSS `rgba(...)` string for a color
fn css(color: Color, opacity: f32) -> String {
    format!(
        "rgba({}, {}, {}, {})",
        (color[0].clamp(0.0, 1.0) * 255.0).round() as u8,
        (color[1].clamp(0.0, 1.0) * 255.0).round() as u8,
        (color[2].clamp(0.0, 1.0) * 255.0).round() as u8,
        (color[3] * opacity).clamp(0.0, 1.0)
    )
}

/// Draws straight onto a canvas element
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    /// Grab the 2D context of `canvas`; `None` if the browser refuses one
    pub fn from_canvas(canvas: &HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self::new(ctx))
    }

    fn circle_path(&self, center: Vec2, radius: f32) {
        self.ctx.begin_path();
        let _ = self
            .ctx
            .arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TWO_PI);
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, origin: Vec2, extent: Vec2) {
        self.ctx
            .clear_rect(origin.x as f64, origin.y as f64, extent.x as f64, extent.y as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, opacity: f32) {
        self.circle_path(center, radius);
        self.ctx.set_fill_style_str(&css(color, opacity));
        self.ctx.fill();
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.circle_path(center, radius);
        self.ctx.set_stroke_style_str(&css(color, 1.0));
        self.ctx.stroke();
    }

    fn stroke_rect(&mut self, origin: Vec2, extent: Vec2, color: Color) {
        self.ctx.set_stroke_style_str(&css(color, 1.0));
        self.ctx
            .stroke_rect(origin.x as f64, origin.y as f64, extent.x as f64, extent.y as f64);
    }
}
