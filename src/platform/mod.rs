//! Platform abstraction layer
//!
//! Browser drawing goes through a 2D canvas context. Native builds have no
//! display and record frames with `renderer::VertexBatch` instead.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
