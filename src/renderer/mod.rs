//! Drawing surface abstraction
//!
//! The simulation never talks to a graphics API directly. Everything that
//! draws takes a `&mut dyn Surface` (or `impl Surface`) so the same frame can
//! be painted onto a browser canvas or recorded into a vertex batch.

pub mod batch;
pub mod shapes;
pub mod vertex;

use glam::Vec2;

pub use batch::VertexBatch;
pub use vertex::Vertex;

/// RGBA color, each channel in 0.0..=1.0
pub type Color = [f32; 4];

/// Something a frame can be drawn onto
pub trait Surface {
    /// Wipe the axis-aligned area starting at `origin`
    fn clear(&mut self, origin: Vec2, extent: Vec2);

    /// Filled circle; `opacity` multiplies the color's alpha
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, opacity: f32);

    /// Circle outline (debug views)
    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Color);

    /// Rectangle outline (debug views)
    fn stroke_rect(&mut self, origin: Vec2, extent: Vec2, color: Color);
}
