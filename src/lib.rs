//! Alpha Breakout - a brick-breaking arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, collisions, game state)
//! - `error`: Failure taxonomy for construction and commands
//!
//! The crate is the tick engine only. Rendering, input polling and level
//! parsing are external collaborators that construct a
//! [`sim::BreakoutState`], drive it with [`sim::BreakoutState::tick`] and
//! read back snapshots through the query methods.

pub mod error;
pub mod sim;

pub use error::GameError;
pub use sim::{Alpha, Ball, BallKind, Block, BlockKind, BreakoutState, Paddle, PaddleKind};

/// Game configuration constants
pub mod consts {
    use glam::IVec2;

    /// Upper bound on the elapsed time accepted by a single tick
    /// (milliseconds). Larger steps would let fast particles tunnel
    /// through thin geometry.
    pub const MAX_ELAPSED_TIME: i32 = 50;

    /// Supercharge duration granted by a powerup block (milliseconds).
    pub const SUPERCHARGE_LIFETIME: i32 = 10_000;

    /// Field dimensions used by the default level builder.
    pub const FIELD_WIDTH: i32 = 50_000;
    pub const FIELD_HEIGHT: i32 = 30_000;

    /// Ball defaults
    pub const INIT_BALL_DIAMETER: i32 = 700;
    pub const INIT_BALL_VELOCITY: IVec2 = IVec2::new(5, 7);

    /// Paddle hit-box extent and travel speed (units per millisecond).
    pub const PADDLE_WIDTH: i32 = 5_500;
    pub const PADDLE_HEIGHT: i32 = 800;
    pub const PADDLE_SPEED: i32 = 10;

    /// Radial depth of the three boundary wall rects.
    pub const WALL_DEPTH: i32 = 1_000;

    /// Paddle-hit budget of a fresh replicator paddle.
    pub const REPLICATOR_USES: u32 = 3;

    /// Per-component cap on the magnetic wall-bounce correction.
    pub const MAX_MAGNET_KICK: i32 = 3;
}
