//! Shared contract for the moving circular entities
//!
//! Balls and alpha particles move the same way and bounce the same way;
//! the trait captures that capability set so the tick engine can treat
//! both uniformly where their behavior does not diverge.

use glam::IVec2;

use super::geom::{Circle, Rect};

/// A moving circular entity: a ball or an alpha particle.
pub trait Particle {
    fn location(&self) -> Circle;
    fn velocity(&self) -> IVec2;
    fn set_location(&mut self, location: Circle);
    fn set_velocity(&mut self, velocity: IVec2);

    /// Whether this particle overlaps a side of `rect` while moving toward
    /// it. A particle that merely grazes a side while departing does not
    /// collide.
    fn collides_with(&self, rect: &Rect) -> bool {
        match rect.collide_with(&self.location()) {
            Some(dir) => self.velocity().dot(dir.unit()) > 0,
            None => false,
        }
    }

    /// The velocity this particle would have after bouncing on `rect`, or
    /// `None` when it is not overlapping a side or not moving toward it.
    ///
    /// The approach test is what prevents double-bouncing: a particle whose
    /// velocity was already reflected keeps its velocity even while still
    /// overlapping the rect.
    fn bounce_on(&self, rect: &Rect) -> Option<IVec2> {
        let dir = rect.collide_with(&self.location())?;
        if self.velocity().dot(dir.unit()) > 0 {
            Some(dir.mirror(self.velocity()))
        } else {
            None
        }
    }

    /// Translate the particle by `v`.
    fn move_by(&mut self, v: IVec2) {
        self.set_location(self.location().translated(v));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Ball;

    #[test]
    fn test_bounce_on_reflects_approaching_particle() {
        // Ball at (0,5) diameter 2 moving (2,2) into rect (1,1)-(3,8):
        // the bounce flips x, leaving the location untouched.
        let rect = Rect::new(IVec2::new(1, 1), IVec2::new(3, 8));
        let ball = Ball::new(1, Circle::new(IVec2::new(0, 5), 2), IVec2::new(2, 2));
        assert_eq!(ball.bounce_on(&rect), Some(IVec2::new(-2, 2)));
        assert_eq!(ball.location().center, IVec2::new(0, 5));
    }

    #[test]
    fn test_bounce_on_ignores_departing_particle() {
        // Same overlap, velocity already pointing away from the rect.
        let rect = Rect::new(IVec2::new(1, 1), IVec2::new(3, 8));
        let ball = Ball::new(1, Circle::new(IVec2::new(0, 5), 2), IVec2::new(-2, 2));
        assert_eq!(ball.bounce_on(&rect), None);
        assert!(!ball.collides_with(&rect));
    }

    #[test]
    fn test_bounce_on_misses_distant_rect() {
        let rect = Rect::new(IVec2::new(100, 100), IVec2::new(200, 200));
        let ball = Ball::new(1, Circle::new(IVec2::new(0, 5), 2), IVec2::new(2, 2));
        assert_eq!(ball.bounce_on(&rect), None);
    }

    #[test]
    fn test_move_by_translates_location() {
        let mut ball = Ball::new(1, Circle::new(IVec2::new(10, 10), 4), IVec2::new(1, 1));
        ball.move_by(IVec2::new(5, -3));
        assert_eq!(ball.location().center, IVec2::new(15, 7));
        assert_eq!(ball.location().diameter, 4);
    }
}
