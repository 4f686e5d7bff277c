//! The falling ball
//!
//! A ball starts as a single pixel, grows to its target size, then falls
//! under gravity until it drops below the floor. Its physics step is driven
//! by the [`FiniteStateActor`] dispatch table.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::actor::{FiniteStateActor, StateHooks};
use crate::consts::*;
use crate::renderer::vertex::colors;
use crate::renderer::{Color, Surface};
use crate::settings::Settings;

/// Ball lifecycle: Growing -> Falling -> Dead
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BallState {
    /// Inflating in place until `size` passes `target_size`
    Growing { target_size: f32, growth_rate: f32 },
    /// Free fall, bouncing off pegs
    Falling,
    /// Below the floor; inert until replaced
    Dead,
}

/// A ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Current radius
    pub size: f32,
    pub vel: Vec2,
    /// One-frame impulse, zeroed after every falling step
    pub acc: Vec2,
    pub gravity: Vec2,
    /// The ball dies once it sinks half its size below this y
    pub floor: f32,
    pub fill: Color,
    state: BallState,
}

impl Ball {
    pub fn new(pos: Vec2, floor: f32) -> Self {
        Self {
            pos,
            size: BALL_START_SIZE,
            vel: Vec2::ZERO,
            acc: Vec2::ZERO,
            gravity: Vec2::new(0.0, GRAVITY),
            floor,
            fill: colors::BALL,
            state: BallState::Growing {
                target_size: BALL_TARGET_SIZE,
                growth_rate: BALL_GROWTH_RATE,
            },
        }
    }

    /// Ball at `pos` using the configured sizes, gravity and color
    pub fn from_settings(pos: Vec2, settings: &Settings) -> Self {
        let ball = &settings.ball;
        Self {
            pos,
            size: ball.start_size,
            vel: Vec2::ZERO,
            acc: Vec2::ZERO,
            gravity: Vec2::new(0.0, ball.gravity),
            floor: settings.height,
            fill: settings.ball_color(),
            state: BallState::Growing {
                target_size: ball.target_size,
                growth_rate: ball.growth_rate,
            },
        }
    }

    /// New ball at the spawn point, x jittered uniformly by the configured amount
    pub fn spawn<R: Rng>(settings: &Settings, rng: &mut R) -> Self {
        let mut jitter = settings.ball.spawn_jitter.abs();
        // The sampled range is 2 * jitter wide
        if !(jitter * 2.0).is_finite() {
            log::warn!(
                "Spawn jitter {} is out of range, using {}",
                settings.ball.spawn_jitter,
                SPAWN_JITTER
            );
            jitter = SPAWN_JITTER;
        }
        let offset = if jitter > 0.0 {
            rng.random_range(-jitter..jitter)
        } else {
            0.0
        };
        let pos = Vec2::new(settings.spawn_x() + offset, settings.ball.spawn_y);
        Self::from_settings(pos, settings)
    }

    pub fn is_dead(&self) -> bool {
        self.state == BallState::Dead
    }

    /// Add to this frame's impulse
    pub fn apply_force(&mut self, force: Vec2) {
        self.acc += force;
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.fill_circle(self.pos, self.size, self.fill, 1.0);
    }

    /// Growth speeds up with size: each step adds `growth_rate * size / 2`
    fn grow(&mut self) {
        if let BallState::Growing {
            target_size,
            growth_rate,
        } = self.state
        {
            if self.size <= target_size {
                self.size += growth_rate * (self.size / 2.0);
            } else {
                self.transition(BallState::Falling);
            }
        }
    }

    /// Semi-implicit Euler step
    fn fall(&mut self) {
        self.vel += self.gravity + self.acc;
        self.pos += self.vel;
        self.acc = Vec2::ZERO;

        if self.pos.y > self.floor + self.size / 2.0 {
            self.transition(BallState::Dead);
        }
    }
}

impl FiniteStateActor for Ball {
    type State = BallState;

    fn state(&self) -> BallState {
        self.state
    }

    fn store_state(&mut self, state: BallState) {
        self.state = state;
    }

    fn hooks(state: BallState) -> StateHooks<Self> {
        match state {
            BallState::Growing { .. } => StateHooks::during(Ball::grow),
            BallState::Falling => StateHooks::during(Ball::fall),
            BallState::Dead => StateHooks::none(),
        }
    }
}
