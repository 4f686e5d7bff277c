//! Plinko Heat - a falling ball bouncing through a peg board
//!
//! Core modules:
//! - `sim`: Deterministic simulation (region index, collisions, ball lifecycle)
//! - `renderer`: Drawing surface abstraction and vertex tessellation
//! - `platform`: Browser canvas surface
//! - `settings`: Board and ball configuration
//! - `stats`: Per-peg hit report (heat-map data)

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod stats;

pub use settings::{BallSettings, Settings};
pub use stats::{HitReport, PegStat};

/// Simulation defaults
pub mod consts {
    /// Board dimensions (pixels)
    pub const BOARD_WIDTH: f32 = 500.0;
    pub const BOARD_HEIGHT: f32 = 500.0;
    /// Distance between neighbouring pegs
    pub const PEG_SPACING: f32 = 50.0;
    /// Levels of subdivision below the root region
    pub const REGION_DEPTH: u32 = 3;
    /// Deepest subdivision a board accepts (4^8 leaves)
    pub const MAX_REGION_DEPTH: u32 = 8;

    /// Peg defaults
    pub const PEG_RADIUS: f32 = 5.0;

    /// Ball defaults - grows from a pixel, then falls
    pub const BALL_START_SIZE: f32 = 1.0;
    pub const BALL_TARGET_SIZE: f32 = 10.0;
    pub const BALL_GROWTH_RATE: f32 = 0.7;
    /// Downward pull applied every falling frame
    pub const GRAVITY: f32 = 0.9;

    /// Speed divisor applied on every peg bounce
    pub const BOUNCE_DAMPING: f32 = 1.2;

    /// Spawn point (x is jittered by up to ± SPAWN_JITTER)
    pub const SPAWN_Y: f32 = 50.0;
    pub const SPAWN_JITTER: f32 = 2.0;
}

/// Parse a `#RRGGBB` hex string into an opaque RGBA color
pub fn hex_color(hex: &str) -> Option<[f32; 4]> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 {
        return None;
    }
    let value = u32::from_str_radix(digits, 16).ok()?;
    let channel = |shift: u32| ((value >> shift) & 0xFF) as f32 / 255.0;
    Some([channel(16), channel(8), channel(0), 1.0])
}
