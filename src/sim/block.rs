//! Block variants and their impact reactions

use serde::{Deserialize, Serialize};

use super::geom::Rect;

/// Block variant with its variant-specific payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockKind {
    /// Destroyed by any hit.
    Normal,
    /// Survives `lives - 1` hits; each hit lowers the counter in place.
    Sturdy { lives: u32 },
    /// Destroyed by any hit, supercharges the striking ball.
    Powerup,
    /// Destroyed by any hit, turns the paddle into a replicator.
    Replicator,
}

/// Side effect a block hit asks the engine to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockEffect {
    None,
    /// Upgrade the striking ball to a fresh supercharge.
    SuperchargeBall,
    /// Give the paddle a fresh replicator budget.
    ReplicatePaddle,
}

/// Outcome of one block hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitOutcome {
    /// Whether the hit destroyed the block.
    pub destroyed: bool,
    pub effect: BlockEffect,
}

/// A destructible block occupying a fixed rectangle of the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub location: Rect,
    pub kind: BlockKind,
}

impl Block {
    pub fn new(location: Rect, kind: BlockKind) -> Self {
        Self { location, kind }
    }

    /// Apply one ball hit to this block and report what the engine must do.
    ///
    /// A sturdy block with more than one life is replaced by its
    /// lower-counter self; every other case destroys the block.
    pub fn register_hit(&mut self) -> HitOutcome {
        match self.kind {
            BlockKind::Normal => HitOutcome {
                destroyed: true,
                effect: BlockEffect::None,
            },
            BlockKind::Sturdy { lives } => {
                if lives > 1 {
                    self.kind = BlockKind::Sturdy { lives: lives - 1 };
                    HitOutcome {
                        destroyed: false,
                        effect: BlockEffect::None,
                    }
                } else {
                    HitOutcome {
                        destroyed: true,
                        effect: BlockEffect::None,
                    }
                }
            }
            BlockKind::Powerup => HitOutcome {
                destroyed: true,
                effect: BlockEffect::SuperchargeBall,
            },
            BlockKind::Replicator => HitOutcome {
                destroyed: true,
                effect: BlockEffect::ReplicatePaddle,
            },
        }
    }

    /// Display color for the rendering collaborator; sturdy blocks darken
    /// as they lose lives.
    pub fn color(&self) -> (u8, u8, u8) {
        match self.kind {
            BlockKind::Normal => (0x80, 0x00, 0xff),
            BlockKind::Sturdy { lives } => match lives {
                1 => (0xc0, 0xc0, 0xc0),
                2 => (0x80, 0x80, 0x80),
                _ => (0x40, 0x40, 0x40),
            },
            BlockKind::Powerup => (0xff, 0x00, 0xff),
            BlockKind::Replicator => (0xfa, 0xff, 0x7a),
        }
    }
}
