//! The player's paddle
//!
//! A fixed-size hit-box around a movable center. The replicator variant
//! spawns extra balls for a limited number of paddle hits, then reverts to
//! normal.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::geom::Rect;
use crate::consts::{PADDLE_HEIGHT, PADDLE_WIDTH};

/// Velocity offsets for replicated balls, in spawn order. The spawn count
/// of one paddle hit is capped at this table's length.
pub const REPLICA_OFFSETS: [IVec2; 5] = [
    IVec2::new(2, -2),
    IVec2::new(-2, 2),
    IVec2::new(2, 2),
    IVec2::new(-2, -2),
    IVec2::new(4, 2),
];

/// Paddle variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaddleKind {
    /// Spawns no extra balls.
    Normal,
    /// Each ball hit spawns extra balls and burns one use; reverts to
    /// Normal when the budget runs out.
    Replicator { uses: u32 },
}

/// The player's paddle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paddle {
    pub center: IVec2,
    pub kind: PaddleKind,
}

impl Paddle {
    pub fn new(center: IVec2) -> Self {
        Self {
            center,
            kind: PaddleKind::Normal,
        }
    }

    /// The hit-box rect, centered on `center` with the fixed extent.
    pub fn location(&self) -> Rect {
        let half = IVec2::new(PADDLE_WIDTH / 2, PADDLE_HEIGHT / 2);
        Rect::new(self.center - half, self.center + half)
    }

    /// Apply one ball hit and return how many extra balls to spawn.
    ///
    /// A replicator returns its current budget then decrements it, so a
    /// fresh one yields the sequence 3, 2, 1 before reverting to normal.
    pub fn register_hit(&mut self) -> u32 {
        match self.kind {
            PaddleKind::Normal => 0,
            PaddleKind::Replicator { uses } => {
                if uses <= 1 {
                    self.kind = PaddleKind::Normal;
                } else {
                    self.kind = PaddleKind::Replicator { uses: uses - 1 };
                }
                uses
            }
        }
    }

    /// Display color for the rendering collaborator.
    pub fn color(&self) -> (u8, u8, u8) {
        match self.kind {
            PaddleKind::Normal => (0x99, 0xff, 0xff),
            PaddleKind::Replicator { .. } => (0xfa, 0xff, 0x7a),
        }
    }
}
