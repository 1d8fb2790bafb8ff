//! Deterministic game simulation
//!
//! Pure integer-math game logic with no rendering or input concerns. The
//! entry points are [`BreakoutState::new`] for validated construction and
//! [`BreakoutState::tick`] to advance the game; everything observable comes
//! back through snapshot queries.

pub mod alpha;
pub mod ball;
pub mod block;
pub mod geom;
pub mod links;
pub mod paddle;
pub mod particle;
pub mod state;
pub mod tick;

pub use alpha::Alpha;
pub use ball::{Ball, BallKind};
pub use block::{Block, BlockEffect, BlockKind, HitOutcome};
pub use geom::{Circle, Dir, Rect};
pub use links::Particles;
pub use paddle::{Paddle, PaddleKind, REPLICA_OFFSETS};
pub use particle::Particle;
pub use state::BreakoutState;
