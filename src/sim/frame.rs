//! Per-frame driver
//!
//! One call to `frame` is one tick of the render loop: a dead ball is
//! replaced and nothing else happens that tick; otherwise the ball advances
//! and is drawn, collides with at most one peg, and the board is redrawn.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::actor::FiniteStateActor;
use super::ball::Ball;
use super::board::Board;
use crate::renderer::Surface;
use crate::settings::Settings;
use crate::stats::HitReport;

/// What happened during one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameEvent {
    /// Ball moved (or grew) without touching a peg
    Idle,
    /// Ball bounced off the peg with this id
    Hit { peg: u32 },
    /// Previous ball was dead and a fresh one was spawned
    Respawned,
}

/// A running board with its single live ball
#[derive(Debug, Clone)]
pub struct Simulation {
    settings: Settings,
    board: Board,
    ball: Ball,
    rng: Pcg32,
    frames: u64,
    balls: u64,
}

impl Simulation {
    pub fn new(settings: Settings) -> Self {
        let mut rng = Pcg32::seed_from_u64(settings.seed);
        let board = Board::from_settings(&settings);
        let ball = Ball::spawn(&settings, &mut rng);

        log::info!(
            "Simulation ready (seed {}), first ball at {}",
            settings.seed,
            ball.pos
        );

        Self {
            settings,
            board,
            ball,
            rng,
            frames: 0,
            balls: 1,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn ball_mut(&mut self) -> &mut Ball {
        &mut self.ball
    }

    /// Frames stepped so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Balls spawned so far, including the live one
    pub fn balls(&self) -> u64 {
        self.balls
    }

    /// Count the frame; replace a dead ball. True when the frame was spent respawning.
    fn begin_frame(&mut self) -> bool {
        self.frames += 1;
        if !self.ball.is_dead() {
            return false;
        }

        self.ball = Ball::spawn(&self.settings, &mut self.rng);
        self.balls += 1;
        log::debug!("Ball #{} spawned at {}", self.balls, self.ball.pos);
        true
    }

    fn collide(&mut self) -> FrameEvent {
        match self.board.reckon(&mut self.ball) {
            Some(peg) => FrameEvent::Hit { peg: peg.id },
            None => FrameEvent::Idle,
        }
    }

    /// Advance the simulation by one frame without drawing
    pub fn step(&mut self) -> FrameEvent {
        if self.begin_frame() {
            return FrameEvent::Respawned;
        }
        self.ball.advance();
        self.collide()
    }

    /// One drawn frame: clear, advance, draw the ball, collide, draw the board.
    /// The ball is painted where it moved to, before any bounce is applied.
    pub fn frame(&mut self, surface: &mut dyn Surface) -> FrameEvent {
        if self.begin_frame() {
            return FrameEvent::Respawned;
        }

        surface.clear(Vec2::ZERO, self.board.dimensions());
        self.ball.advance();
        self.ball.draw(surface);
        let event = self.collide();
        self.board.draw(surface);
        if self.settings.show_regions {
            self.board.draw_debug(surface);
        }
        event
    }

    /// Step `frames` times, returning how many bounces happened
    pub fn run(&mut self, frames: u64) -> u64 {
        let mut hits = 0;
        for _ in 0..frames {
            if let FrameEvent::Hit { .. } = self.step() {
                hits += 1;
            }
        }
        hits
    }

    pub fn report(&self) -> HitReport {
        HitReport::from_board(&self.board, self.frames, self.balls)
    }
}
