//! CPU-side frame recorder
//!
//! `VertexBatch` implements [`Surface`] by tessellating every draw call into
//! triangles. The packed vertex bytes are ready for upload to a GPU buffer,
//! and the headless binary uses it to run frames without a display.

use glam::Vec2;

use super::shapes::{self, DEFAULT_SEGMENTS};
use super::vertex::{Vertex, colors};
use super::{Color, Surface};

/// Outline thickness in pixels
const STROKE_WIDTH: f32 = 1.0;

/// Triangle list for one frame
#[derive(Debug, Clone)]
pub struct VertexBatch {
    vertices: Vec<Vertex>,
    segments: u32,
}

impl Default for VertexBatch {
    fn default() -> Self {
        Self::new(DEFAULT_SEGMENTS)
    }
}

impl VertexBatch {
    pub fn new(segments: u32) -> Self {
        Self {
            vertices: Vec::new(),
            segments: segments.max(3),
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Packed bytes for a vertex buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

impl Surface for VertexBatch {
    fn clear(&mut self, origin: Vec2, extent: Vec2) {
        self.vertices.clear();
        self.vertices
            .extend(shapes::rect(origin, extent, colors::BACKGROUND));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, opacity: f32) {
        let alpha = color[3] * opacity.clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }
        let color = [color[0], color[1], color[2], alpha];
        self.vertices
            .extend(shapes::circle(center, radius, color, self.segments));
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.vertices.extend(shapes::ring(
            center,
            (radius - STROKE_WIDTH).max(0.0),
            radius,
            color,
            self.segments,
        ));
    }

    fn stroke_rect(&mut self, origin: Vec2, extent: Vec2, color: Color) {
        self.vertices
            .extend(shapes::rect_outline(origin, extent, STROKE_WIDTH, color));
    }
}
