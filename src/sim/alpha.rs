//! Alpha particle entity
//!
//! Alphas are spawned on paddle contact, trail the ball that spawned them,
//! and only interact with walls and the paddle. Their gameplay effect comes
//! through the link relation: a wall bounce of an alpha re-steers every ball
//! linked to it.

use std::collections::BTreeSet;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::geom::{Circle, Rect};
use super::particle::Particle;

/// An alpha particle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alpha {
    pub id: u32,
    pub location: Circle,
    pub velocity: IVec2,
    /// Ids of the linked balls.
    pub balls: BTreeSet<u32>,
}

impl Alpha {
    /// A fresh alpha with no links.
    pub fn new(id: u32, location: Circle, velocity: IVec2) -> Self {
        Self {
            id,
            location,
            velocity,
            balls: BTreeSet::new(),
        }
    }

    /// Advance by `velocity * elapsed`.
    pub fn step(&mut self, elapsed: i32) {
        self.move_by(self.velocity * elapsed);
    }

    /// Reaction to hitting a wall: reflect.
    pub fn hit_wall(&mut self, rect: &Rect) {
        if let Some(v) = self.bounce_on(rect) {
            self.velocity = v;
        }
    }

    /// Reaction to hitting the paddle: reflect plus one fifth of the
    /// paddle's velocity, same momentum rule as for balls.
    pub fn hit_paddle(&mut self, rect: &Rect, paddle_vel: IVec2) {
        if let Some(v) = self.bounce_on(rect) {
            self.velocity = v + paddle_vel / 5;
        }
    }

    /// Content equality ignoring identity and links.
    pub fn same_shape(&self, other: &Alpha) -> bool {
        self.location == other.location && self.velocity == other.velocity
    }

    /// Display color for the rendering collaborator.
    pub fn color(&self) -> (u8, u8, u8) {
        (0x00, 0xff, 0xff)
    }
}

impl Particle for Alpha {
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
