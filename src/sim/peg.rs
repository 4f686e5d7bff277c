//! Static circular obstacles

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use crate::consts::PEG_RADIUS;
use crate::renderer::vertex::colors;
use crate::renderer::{Color, Surface};

/// A peg the ball can bounce off. Position never changes; only the hit counter does.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Peg {
    /// Layout order on the board
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    pub fill: Color,
    /// Number of bounces off this peg so far
    pub num_hits: u32,
}

impl Peg {
    pub fn new(id: u32, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            radius: PEG_RADIUS,
            fill: colors::PEG,
            num_hits: 0,
        }
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = fill;
        self
    }

    /// Discrete overlap test, inclusive at exact contact.
    ///
    /// Only the current positions are compared, so a fast ball can step
    /// clean over a peg between two frames.
    #[inline]
    pub fn hit(&self, ball: &Ball) -> bool {
        ball.pos.distance(self.pos) <= self.radius + ball.size
    }

    pub fn draw(&self, surface: &mut dyn Surface, opacity: f32) {
        surface.fill_circle(self.pos, self.radius, self.fill, opacity);
    }

    pub fn draw_outline(&self, surface: &mut dyn Surface) {
        surface.stroke_circle(self.pos, self.radius, colors::DEBUG_OUTLINE);
    }
}
