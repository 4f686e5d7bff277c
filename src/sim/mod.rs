//! Deterministic simulation module
//!
//! All board logic lives here. This module must be pure and deterministic:
//! - One fixed step per frame
//! - Seeded RNG only
//! - Stable iteration order (peg insertion order)
//! - Drawing only through the `Surface` trait

pub mod actor;
pub mod ball;
pub mod board;
pub mod frame;
pub mod peg;
pub mod region;

pub use actor::{FiniteStateActor, StateHooks};
pub use ball::{Ball, BallState};
pub use board::{Board, PegId, heat};
pub use frame::{FrameEvent, Simulation};
pub use peg::Peg;
pub use region::{ROOT, Region, RegionId, RegionTree};
