//! The peg board
//!
//! Owns the pegs and the region index over them. Each frame `reckon` looks up
//! the ball's leaf, tests only that leaf's pegs, and bounces the ball off the
//! first one it touches.

use glam::Vec2;

use super::ball::Ball;
use super::peg::Peg;
use super::region::RegionTree;
use crate::consts::{BOUNCE_DAMPING, MAX_REGION_DEPTH, REGION_DEPTH};
use crate::renderer::Surface;
use crate::renderer::vertex::colors;
use crate::settings::Settings;

/// Index into the board's peg list
pub type PegId = usize;

/// A bounded board with a grid of pegs
#[derive(Debug, Clone)]
pub struct Board {
    dims: Vec2,
    regions: RegionTree<PegId>,
    pegs: Vec<Peg>,
}

impl Board {
    /// Board with the default region depth
    pub fn new(dims: Vec2, spacing: f32) -> Self {
        Self::with_depth(dims, spacing, REGION_DEPTH)
    }

    pub fn with_depth(dims: Vec2, spacing: f32, depth: u32) -> Self {
        let pegs = grid_positions(dims, spacing)
            .into_iter()
            .enumerate()
            .map(|(i, pos)| Peg::new(i as u32, pos))
            .collect();
        Self::from_pegs(dims, depth, pegs)
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let fill = settings.peg_color();
        let pegs = grid_positions(settings.dimensions(), settings.peg_spacing)
            .into_iter()
            .enumerate()
            .map(|(i, pos)| {
                Peg::new(i as u32, pos)
                    .with_radius(settings.peg_radius)
                    .with_fill(fill)
            })
            .collect();
        Self::from_pegs(settings.dimensions(), settings.region_depth, pegs)
    }

    /// Board with an arbitrary peg layout. Pegs outside `dims` are kept for
    /// drawing and stats but can never be hit. Depth is capped at
    /// `MAX_REGION_DEPTH`.
    pub fn from_pegs(dims: Vec2, depth: u32, pegs: Vec<Peg>) -> Self {
        let depth = if depth > MAX_REGION_DEPTH {
            log::warn!(
                "Region depth {} is too deep, using {}",
                depth,
                MAX_REGION_DEPTH
            );
            MAX_REGION_DEPTH
        } else {
            depth
        };

        let mut regions = RegionTree::new(Vec2::ZERO, dims, depth);
        for (id, peg) in pegs.iter().enumerate() {
            if regions.place(peg.pos, id) == 0 {
                log::warn!("Peg {} at {} lies outside the board", peg.id, peg.pos);
            }
        }

        log::info!(
            "Board {}x{}: {} pegs in {} leaf regions",
            dims.x,
            dims.y,
            pegs.len(),
            regions.leaf_count()
        );

        Self {
            dims,
            regions,
            pegs,
        }
    }

    pub fn dimensions(&self) -> Vec2 {
        self.dims
    }

    pub fn pegs(&self) -> &[Peg] {
        &self.pegs
    }

    pub fn regions(&self) -> &RegionTree<PegId> {
        &self.regions
    }

    pub fn total_hits(&self) -> u64 {
        self.pegs.iter().map(|p| p.num_hits as u64).sum()
    }

    /// Detect and resolve at most one ball-peg collision.
    ///
    /// On a hit the ball is pushed out along the peg-to-ball offset (its
    /// distance from the peg doubles), its velocity is replaced by the
    /// outward unit normal scaled to the old speed / 1.2, and the peg's hit
    /// counter goes up. This is not a reflection about the contact normal.
    pub fn reckon(&mut self, ball: &mut Ball) -> Option<&Peg> {
        let leaf = self.regions.find(ball.pos)?;
        if self.regions.region(leaf)?.contents().is_empty() {
            return None;
        }

        let (pegs, target): (&[Peg], &Ball) = (&self.pegs, ball);
        let id = self.regions.hits_contents(leaf, |&id| pegs[id].hit(target))?;
        let peg = &mut self.pegs[id];

        ball.pos += ball.pos - peg.pos;
        let speed = ball.vel.length();
        ball.vel = Vec2::ZERO;
        ball.acc = Vec2::ZERO;
        ball.vel = (ball.pos - peg.pos).normalize_or_zero() * (speed / BOUNCE_DAMPING);
        peg.num_hits += 1;

        log::trace!(
            "Ball bounced off peg {} (hits: {}), speed {:.2} -> {:.2}",
            peg.id,
            peg.num_hits,
            speed,
            ball.vel.length()
        );

        Some(&*peg)
    }

    /// Lowest and highest hit counts, `None` without pegs
    pub fn hit_range(&self) -> Option<(u32, u32)> {
        let min = self.pegs.iter().map(|p| p.num_hits).min()?;
        let max = self.pegs.iter().map(|p| p.num_hits).max()?;
        Some((min, max))
    }

    /// Heat-map opacity of every peg, in peg order
    pub fn opacities(&self) -> Vec<f32> {
        let Some((min, max)) = self.hit_range() else {
            return Vec::new();
        };
        self.pegs
            .iter()
            .map(|p| heat(p.num_hits, min, max))
            .collect()
    }

    /// Draw every peg with its heat-map opacity
    pub fn draw(&self, surface: &mut dyn Surface) {
        for (peg, opacity) in self.pegs.iter().zip(self.opacities()) {
            peg.draw(surface, opacity);
        }
    }

    /// Region outlines and peg rims
    pub fn draw_debug(&self, surface: &mut dyn Surface) {
        self.regions.draw_debug(surface, colors::DEBUG_OUTLINE);
        for (_, leaf) in self.regions.leaves() {
            for &id in leaf.contents() {
                self.pegs[id].draw_outline(surface);
            }
        }
    }
}

/// Map a hit count onto 0..=1 between the board's min and max.
/// All pegs are transparent while every count is equal.
pub fn heat(num_hits: u32, min: u32, max: u32) -> f32 {
    if max == min {
        return 0.0;
    }
    (num_hits.saturating_sub(min)) as f32 / (max - min) as f32
}

/// Regular grid starting at (spacing, 3 * spacing), column by column
fn grid_positions(dims: Vec2, spacing: f32) -> Vec<Vec2> {
    if spacing.is_nan() || spacing <= 0.0 {
        log::warn!("Peg spacing {} is not positive; board left empty", spacing);
        return Vec::new();
    }

    let mut positions = Vec::new();
    let mut col = 1;
    loop {
        let x = spacing * col as f32;
        if x >= dims.x {
            break;
        }
        let mut row = 3;
        loop {
            let y = spacing * row as f32;
            if y >= dims.y {
                break;
            }
            positions.push(Vec2::new(x, y));
            row += 1;
        }
        col += 1;
    }
    positions
}
