//! Aggregate game state
//!
//! [`BreakoutState`] exclusively owns the live balls, alphas, blocks and the
//! paddle. External collaborators only ever see deep snapshots - the
//! entities carry mutable cross-linked state, so handing out live
//! references would let callers break the link invariants.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::alpha::Alpha;
use super::ball::{Ball, BallKind};
use super::block::{Block, BlockKind};
use super::geom::{Circle, Rect, up_and_left_from};
use super::links::Particles;
use super::paddle::{Paddle, PaddleKind};
use crate::consts::{
    MAX_ELAPSED_TIME, PADDLE_SPEED, PADDLE_WIDTH, REPLICATOR_USES, SUPERCHARGE_LIFETIME,
    WALL_DEPTH,
};
use crate::error::GameError;

/// Reject elapsed times outside `[0, MAX_ELAPSED_TIME]`.
pub(crate) fn check_elapsed(elapsed: i32) -> Result<(), GameError> {
    if !(0..=MAX_ELAPSED_TIME).contains(&elapsed) {
        return Err(GameError::InvalidElapsed { got: elapsed });
    }
    Ok(())
}

/// Complete game state for one level.
///
/// Evolves only through [`tick`](Self::tick), the paddle-move commands and
/// the reaction mutators; every query returns copies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakoutState {
    pub(crate) particles: Particles,
    pub(crate) blocks: Vec<Block>,
    pub(crate) paddle: Paddle,
    pub(crate) bottom_right: IVec2,
    /// Next entity id, never reused.
    pub(crate) next_id: u32,
}

impl BreakoutState {
    /// Construct a validated initial state.
    ///
    /// The field spans from the origin to `bottom_right`. Every entity must
    /// have well-formed geometry (positive diameters, strictly ordered rect
    /// corners) and lie inside the field, ids must be unique per family,
    /// the ball/alpha link sets must be symmetric, and variant payloads
    /// must be positive.
    /// Charges are recomputed from the validated adjacency rather than
    /// trusted. On any violation nothing is constructed.
    pub fn new(
        balls: Vec<Ball>,
        alphas: Vec<Alpha>,
        blocks: Vec<Block>,
        bottom_right: IVec2,
        paddle: Paddle,
    ) -> Result<Self, GameError> {
        if !up_and_left_from(IVec2::ZERO, bottom_right) {
            return Err(GameError::InvalidBounds {
                bottom_right: (bottom_right.x, bottom_right.y),
            });
        }
        let field = Rect::new(IVec2::ZERO, bottom_right);

        for ball in &balls {
            if ball.location.diameter <= 0 {
                return Err(GameError::InvalidShape {
                    what: "ball",
                    id: ball.id,
                });
            }
            if !field.contains(&ball.location) {
                return Err(GameError::OutOfField {
                    what: "ball",
                    id: ball.id,
                });
            }
        }
        for alpha in &alphas {
            if alpha.location.diameter <= 0 {
                return Err(GameError::InvalidShape {
                    what: "alpha",
                    id: alpha.id,
                });
            }
            if !field.contains(&alpha.location) {
                return Err(GameError::OutOfField {
                    what: "alpha",
                    id: alpha.id,
                });
            }
        }
        for (i, block) in blocks.iter().enumerate() {
            if !up_and_left_from(block.location.top_left, block.location.bottom_right) {
                return Err(GameError::InvalidShape {
                    what: "block",
                    id: i as u32,
                });
            }
            if !field.contains_rect(&block.location) {
                return Err(GameError::OutOfField {
                    what: "block",
                    id: i as u32,
                });
            }
            if let BlockKind::Sturdy { lives } = block.kind
                && lives == 0
            {
                return Err(GameError::InvalidBlock {
                    reason: "sturdy block with zero lives",
                });
            }
        }
        if !field.contains_rect(&paddle.location()) {
            return Err(GameError::OutOfField {
                what: "paddle",
                id: 0,
            });
        }
        if let PaddleKind::Replicator { uses } = paddle.kind
            && uses == 0
        {
            return Err(GameError::InvalidPaddle {
                reason: "replicator paddle with zero uses",
            });
        }

        let particles = Particles::from_parts(balls, alphas)?;
        let next_id = particles
            .balls
            .iter()
            .map(|b| b.id)
            .chain(particles.alphas.iter().map(|a| a.id))
            .max()
            .map_or(1, |id| id + 1);

        Ok(Self {
            particles,
            blocks,
            paddle,
            bottom_right,
            next_id,
        })
    }

    /// Allocate a fresh entity id.
    pub(crate) fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    // === Queries (deep snapshots) ===

    /// Snapshot of the live balls, in engine iteration order.
    pub fn balls(&self) -> Vec<Ball> {
        self.particles.balls.clone()
    }

    /// Snapshot of the live alpha particles.
    pub fn alphas(&self) -> Vec<Alpha> {
        self.particles.alphas.clone()
    }

    /// Snapshot of the remaining blocks, in collision test order.
    pub fn blocks(&self) -> Vec<Block> {
        self.blocks.clone()
    }

    pub fn paddle(&self) -> Paddle {
        self.paddle
    }

    pub fn bottom_right(&self) -> IVec2 {
        self.bottom_right
    }

    /// The playing field, origin to the bottom-right bound.
    pub fn field(&self) -> Rect {
        Rect::new(IVec2::ZERO, self.bottom_right)
    }

    /// Won when every block is gone and at least one ball survives.
    pub fn is_won(&self) -> bool {
        self.blocks.is_empty() && !self.particles.balls.is_empty()
    }

    /// Dead when no ball remains.
    pub fn is_dead(&self) -> bool {
        self.particles.balls.is_empty()
    }

    // === Commands ===

    /// Advance the simulation by one step. See [`super::tick::tick`].
    pub fn tick(&mut self, paddle_dir: i32, elapsed: i32) -> Result<(), GameError> {
        super::tick::tick(self, paddle_dir, elapsed)
    }

    /// Move the paddle left by its fixed speed scaled with `elapsed`.
    pub fn move_paddle_left(&mut self, elapsed: i32) -> Result<(), GameError> {
        check_elapsed(elapsed)?;
        self.translate_paddle(-PADDLE_SPEED * elapsed);
        Ok(())
    }

    /// Move the paddle right by its fixed speed scaled with `elapsed`.
    pub fn move_paddle_right(&mut self, elapsed: i32) -> Result<(), GameError> {
        check_elapsed(elapsed)?;
        self.translate_paddle(PADDLE_SPEED * elapsed);
        Ok(())
    }

    fn translate_paddle(&mut self, dx: i32) {
        let half = PADDLE_WIDTH / 2;
        self.paddle.center.x = (self.paddle.center.x + dx)
            .max(half)
            .min(self.bottom_right.x - half);
    }

    // === Reaction mutators ===

    /// Revert a ball to the normal variant.
    pub fn make_ball_normal(&mut self, id: u32) -> Result<(), GameError> {
        let ball = self
            .particles
            .ball_mut(id)
            .ok_or(GameError::UnknownBall { id })?;
        ball.kind = BallKind::Normal;
        Ok(())
    }

    /// Grant a ball a fresh supercharge.
    pub fn make_ball_supercharged(&mut self, id: u32) -> Result<(), GameError> {
        let ball = self
            .particles
            .ball_mut(id)
            .ok_or(GameError::UnknownBall { id })?;
        ball.kind = BallKind::Supercharged {
            lifetime: SUPERCHARGE_LIFETIME,
        };
        log::debug!("ball {id} supercharged");
        Ok(())
    }

    /// Revert the paddle to the normal variant.
    pub fn make_paddle_normal(&mut self) {
        self.paddle.kind = PaddleKind::Normal;
    }

    /// Give the paddle a fresh replicator budget.
    pub fn make_paddle_replicator(&mut self) {
        self.paddle.kind = PaddleKind::Replicator {
            uses: REPLICATOR_USES,
        };
        log::debug!("paddle upgraded to replicator");
    }

    /// Add a fresh normal ball, returning its id. The location is clamped
    /// into the field like any moving entity's.
    pub fn add_ball(&mut self, location: Circle, velocity: IVec2) -> u32 {
        let id = self.next_entity_id();
        let location = self.field().constrain(&location);
        self.particles.balls.push(Ball::new(id, location, velocity));
        id
    }

    /// The three boundary walls: top, left, right. There is no bottom
    /// wall; the bottom edge kills.
    pub(crate) fn walls(&self) -> [Rect; 3] {
        let w = self.bottom_right.x;
        let h = self.bottom_right.y;
        [
            Rect::new(IVec2::new(0, -WALL_DEPTH), IVec2::new(w, 0)),
            Rect::new(IVec2::new(-WALL_DEPTH, 0), IVec2::new(0, h)),
            Rect::new(IVec2::new(w, 0), IVec2::new(w + WALL_DEPTH, h)),
        ]
    }
}
