//! Simulation error types.
//!
//! Every fallible operation on the game state reports one of these variants
//! synchronously; nothing is swallowed and no partial mutation survives a
//! failure.

use std::fmt;

/// Top-level error enum for the breakout simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The field's bottom-right bound is not strictly down-and-right of the
    /// origin.
    InvalidBounds {
        /// The rejected bound, as (x, y).
        bottom_right: (i32, i32),
    },

    /// An entity's geometry is degenerate: a non-positive circle diameter
    /// or a rect whose corners are not strictly ordered.
    InvalidShape {
        /// Entity family ("ball", "alpha", "block").
        what: &'static str,
        /// Entity id, or the list index for blocks.
        id: u32,
    },

    /// An entity lies (partially) outside the playing field at construction
    /// time.
    OutOfField {
        /// Entity family ("ball", "alpha", "block", "paddle").
        what: &'static str,
        /// Entity id, where the family has ids.
        id: u32,
    },

    /// Two entities of the same family share an id.
    DuplicateId {
        what: &'static str,
        id: u32,
    },

    /// A link edge is present on one side of the ball/alpha relation only.
    AsymmetricLink {
        ball: u32,
        alpha: u32,
    },

    /// A ball id that is not present in the arena.
    UnknownBall { id: u32 },

    /// An alpha id that is not present in the arena.
    UnknownAlpha { id: u32 },

    /// Elapsed time outside `[0, MAX_ELAPSED_TIME]`.
    InvalidElapsed { got: i32 },

    /// A block that violates its variant invariant (e.g. a sturdy block
    /// with zero lives).
    InvalidBlock { reason: &'static str },

    /// A paddle that violates its variant invariant.
    InvalidPaddle { reason: &'static str },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidBounds { bottom_right } => write!(
                f,
                "field bound {:?} is not strictly down-right of the origin",
                bottom_right
            ),
            GameError::InvalidShape { what, id } => {
                write!(f, "{what} {id} has degenerate geometry")
            }
            GameError::OutOfField { what, id } => {
                write!(f, "{what} {id} lies outside the playing field")
            }
            GameError::DuplicateId { what, id } => {
                write!(f, "duplicate {what} id {id}")
            }
            GameError::AsymmetricLink { ball, alpha } => write!(
                f,
                "link between ball {ball} and alpha {alpha} is one-sided"
            ),
            GameError::UnknownBall { id } => write!(f, "no ball with id {id}"),
            GameError::UnknownAlpha { id } => write!(f, "no alpha with id {id}"),
            GameError::InvalidElapsed { got } => write!(
                f,
                "elapsed time {got} outside [0, {}]",
                crate::consts::MAX_ELAPSED_TIME
            ),
            GameError::InvalidBlock { reason } => write!(f, "invalid block: {reason}"),
            GameError::InvalidPaddle { reason } => write!(f, "invalid paddle: {reason}"),
        }
    }
}

impl std::error::Error for GameError {}
