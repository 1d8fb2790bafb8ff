//! Ball entity and its reaction behavior
//!
//! A ball is a moving circle with a variant tag (normal or supercharged),
//! a derived electric charge and the ids of the alpha particles it is
//! linked to. All link mutation goes through [`super::links::Particles`];
//! the fields here only mirror the relation for snapshot readers.

use std::collections::BTreeSet;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::geom::{Circle, Rect};
use super::particle::Particle;

/// Ball variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallKind {
    /// Reflects on every impact.
    Normal,
    /// Carries a countdown in simulated milliseconds; while it is positive
    /// the ball plows through blocks it destroys instead of reflecting.
    Supercharged { lifetime: i32 },
}

/// A ball entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub location: Circle,
    pub velocity: IVec2,
    pub kind: BallKind,
    /// Derived from the link graph; never zero. Positive while the linked
    /// alpha count is even, magnitude the largest ball-count among the
    /// linked alphas (1 when unlinked).
    pub charge: i32,
    /// Ids of the linked alpha particles.
    pub alphas: BTreeSet<u32>,
}

impl Ball {
    /// A fresh normal ball with no links and unit charge.
    pub fn new(id: u32, location: Circle, velocity: IVec2) -> Self {
        Self {
            id,
            location,
            velocity,
            kind: BallKind::Normal,
            charge: 1,
            alphas: BTreeSet::new(),
        }
    }

    /// Advance by `velocity * elapsed` and count down a supercharge.
    ///
    /// A supercharge that reaches zero or below reverts the ball to normal
    /// before any collision of this tick is processed.
    pub fn step(&mut self, elapsed: i32) {
        self.move_by(self.velocity * elapsed);
        if let BallKind::Supercharged { lifetime } = self.kind {
            let remaining = lifetime - elapsed;
            if remaining <= 0 {
                self.kind = BallKind::Normal;
            } else {
                self.kind = BallKind::Supercharged {
                    lifetime: remaining,
                };
            }
        }
    }

    /// Reaction to hitting a wall: reflect.
    pub fn hit_wall(&mut self, rect: &Rect) {
        if let Some(v) = self.bounce_on(rect) {
            self.velocity = v;
        }
    }

    /// Reaction to hitting the paddle: reflect, then pick up one fifth of
    /// the paddle's velocity. This is how horizontal paddle motion puts
    /// english on the ball.
    pub fn hit_paddle(&mut self, rect: &Rect, paddle_vel: IVec2) {
        if let Some(v) = self.bounce_on(rect) {
            self.velocity = v + paddle_vel / 5;
        }
    }

    /// Reaction to hitting a block, given whether the hit destroyed it.
    ///
    /// A live supercharge skips the reflection when the block was destroyed,
    /// letting the ball continue on its path.
    pub fn hit_block(&mut self, rect: &Rect, destroyed: bool) {
        if matches!(self.kind, BallKind::Supercharged { .. }) && destroyed {
            return;
        }
        if let Some(v) = self.bounce_on(rect) {
            self.velocity = v;
        }
    }

    /// A clone with a different id and velocity, used for paddle
    /// replication. Links are not inherited; the replica starts unlinked
    /// with unit charge.
    pub fn replica(&self, id: u32, velocity: IVec2) -> Self {
        Self {
            id,
            location: self.location,
            velocity,
            kind: self.kind,
            charge: 1,
            alphas: BTreeSet::new(),
        }
    }

    /// Content equality ignoring identity and links.
    pub fn same_shape(&self, other: &Ball) -> bool {
        self.location == other.location
            && self.velocity == other.velocity
            && self.kind == other.kind
            && self.charge == other.charge
    }

    /// Display color for the rendering collaborator.
    pub fn color(&self) -> (u8, u8, u8) {
        match self.kind {
            BallKind::Normal => (0xff, 0xff, 0x00),
            BallKind::Supercharged { .. } => (0xff, 0x00, 0x00),
        }
    }
}

impl Particle for Ball {
    fn location(&self) -> Circle {
        self.location
    }

    fn velocity(&self) -> IVec2 {
        self.velocity
    }

    fn set_location(&mut self, location: Circle) {
        self.location = location;
    }

    fn set_velocity(&mut self, velocity: IVec2) {
        self.velocity = velocity;
    }
}
