//! Ball/alpha arena and the symmetric link relation
//!
//! Balls and alphas reference each other by stable id through a pair of
//! adjacency sets. Every mutation here updates both directions within the
//! same call and refreshes the derived charge of every ball the edit can
//! have affected, so the two invariants hold at every return:
//!
//! - symmetry: `alpha_id ∈ ball.alphas ⟺ ball_id ∈ alpha.balls`
//! - charge: never zero; sign positive iff the ball's linked-alpha count is
//!   even; magnitude 1 when unlinked, else the largest linked-ball count
//!   among the ball's alphas.

use glam::IVec2;

use serde::{Deserialize, Serialize};

use super::alpha::Alpha;
use super::ball::Ball;
use crate::consts::MAX_MAGNET_KICK;
use crate::error::GameError;

/// The arena owning every live ball and alpha, keyed by id.
///
/// Vectors keep insertion order, which the tick engine relies on for its
/// deterministic iteration; ids are never reused within one game.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Particles {
    pub balls: Vec<Ball>,
    pub alphas: Vec<Alpha>,
}

impl Particles {
    /// Build an arena from caller-supplied entities, validating id
    /// uniqueness and link symmetry, then normalizing every charge from the
    /// validated adjacency. Nothing is kept on failure.
    pub fn from_parts(balls: Vec<Ball>, alphas: Vec<Alpha>) -> Result<Self, GameError> {
        for (i, b) in balls.iter().enumerate() {
            if balls[..i].iter().any(|other| other.id == b.id) {
                return Err(GameError::DuplicateId {
                    what: "ball",
                    id: b.id,
                });
            }
        }
        for (i, a) in alphas.iter().enumerate() {
            if alphas[..i].iter().any(|other| other.id == a.id) {
                return Err(GameError::DuplicateId {
                    what: "alpha",
                    id: a.id,
                });
            }
        }
        for b in &balls {
            for &aid in &b.alphas {
                let alpha = alphas
                    .iter()
                    .find(|a| a.id == aid)
                    .ok_or(GameError::UnknownAlpha { id: aid })?;
                if !alpha.balls.contains(&b.id) {
                    return Err(GameError::AsymmetricLink {
                        ball: b.id,
                        alpha: aid,
                    });
                }
            }
        }
        for a in &alphas {
            for &bid in &a.balls {
                let ball = balls
                    .iter()
                    .find(|b| b.id == bid)
                    .ok_or(GameError::UnknownBall { id: bid })?;
                if !ball.alphas.contains(&a.id) {
                    return Err(GameError::AsymmetricLink {
                        ball: bid,
                        alpha: a.id,
                    });
                }
            }
        }

        let mut particles = Self { balls, alphas };
        let ids: Vec<u32> = particles.balls.iter().map(|b| b.id).collect();
        for id in ids {
            particles.refresh_charge(id);
        }
        Ok(particles)
    }

    pub fn ball(&self, id: u32) -> Option<&Ball> {
        self.balls.iter().find(|b| b.id == id)
    }

    pub fn alpha(&self, id: u32) -> Option<&Alpha> {
        self.alphas.iter().find(|a| a.id == id)
    }

    pub fn ball_mut(&mut self, id: u32) -> Option<&mut Ball> {
        self.balls.iter_mut().find(|b| b.id == id)
    }

    pub fn alpha_mut(&mut self, id: u32) -> Option<&mut Alpha> {
        self.alphas.iter_mut().find(|a| a.id == id)
    }

    /// Link a ball and an alpha. Both ids are checked before any mutation;
    /// linking an already-linked pair is a no-op apart from the charge
    /// refresh. Afterwards the charge of every ball linked to the alpha is
    /// recomputed - the alpha's ball count may have raised each member's
    /// charge ceiling.
    pub fn link(&mut self, ball_id: u32, alpha_id: u32) -> Result<(), GameError> {
        if self.alpha(alpha_id).is_none() {
            return Err(GameError::UnknownAlpha { id: alpha_id });
        }
        self.ball_mut(ball_id)
            .ok_or(GameError::UnknownBall { id: ball_id })?
            .alphas
            .insert(alpha_id);
        let alpha = self
            .alpha_mut(alpha_id)
            .ok_or(GameError::UnknownAlpha { id: alpha_id })?;
        alpha.balls.insert(ball_id);
        let affected: Vec<u32> = alpha.balls.iter().copied().collect();
        for id in affected {
            self.refresh_charge(id);
        }
        Ok(())
    }

    /// Remove the link between a ball and an alpha. The alpha's remaining
    /// balls are refreshed first, then the unlinked ball itself, whose
    /// charge is now computed over its remaining alpha set.
    pub fn unlink(&mut self, ball_id: u32, alpha_id: u32) -> Result<(), GameError> {
        if self.alpha(alpha_id).is_none() {
            return Err(GameError::UnknownAlpha { id: alpha_id });
        }
        self.ball_mut(ball_id)
            .ok_or(GameError::UnknownBall { id: ball_id })?
            .alphas
            .remove(&alpha_id);
        let alpha = self
            .alpha_mut(alpha_id)
            .ok_or(GameError::UnknownAlpha { id: alpha_id })?;
        alpha.balls.remove(&ball_id);
        let affected: Vec<u32> = alpha.balls.iter().copied().collect();
        for id in affected {
            self.refresh_charge(id);
        }
        self.refresh_charge(ball_id);
        Ok(())
    }

    /// Sever every link of one ball, leaving the ball itself in the arena.
    /// Used by death removal before the corpse is compacted away.
    pub fn sever_ball(&mut self, ball_id: u32) -> Result<(), GameError> {
        let linked: Vec<u32> = self
            .ball(ball_id)
            .ok_or(GameError::UnknownBall { id: ball_id })?
            .alphas
            .iter()
            .copied()
            .collect();
        for alpha_id in linked {
            self.unlink(ball_id, alpha_id)?;
        }
        Ok(())
    }

    /// Sever every link of one alpha.
    pub fn sever_alpha(&mut self, alpha_id: u32) -> Result<(), GameError> {
        let linked: Vec<u32> = self
            .alpha(alpha_id)
            .ok_or(GameError::UnknownAlpha { id: alpha_id })?
            .balls
            .iter()
            .copied()
            .collect();
        for ball_id in linked {
            self.unlink(ball_id, alpha_id)?;
        }
        Ok(())
    }

    /// Apply the magnetic wall-bounce correction of one alpha to every ball
    /// linked to it.
    pub fn apply_magnet(&mut self, alpha_id: u32) -> Result<(), GameError> {
        let alpha = self
            .alpha(alpha_id)
            .ok_or(GameError::UnknownAlpha { id: alpha_id })?;
        let alpha_center = alpha.location.center;
        let linked: Vec<u32> = alpha.balls.iter().copied().collect();
        for ball_id in linked {
            if let Some(ball) = self.ball_mut(ball_id) {
                ball.velocity = magnet_kick(
                    alpha_center,
                    ball.location.center,
                    ball.charge,
                    ball.velocity,
                );
            }
        }
        Ok(())
    }

    /// Recompute one ball's charge from the adjacency sets.
    fn refresh_charge(&mut self, ball_id: u32) {
        let Some(ball) = self.ball(ball_id) else {
            return;
        };
        let mut magnitude: i32 = 1;
        for &aid in &ball.alphas {
            if let Some(alpha) = self.alpha(aid) {
                magnitude = magnitude.max(alpha.balls.len() as i32);
            }
        }
        let odd = ball.alphas.len() % 2 == 1;
        let charge = if odd { -magnitude } else { magnitude };
        if let Some(ball) = self.ball_mut(ball_id) {
            ball.charge = charge;
        }
    }
}

/// The velocity a linked ball gets after its alpha bounces on a wall.
///
/// The kick is applied along the component-wise sign of the alpha-to-ball
/// axis: away from the alpha for positive charge, toward it for negative,
/// with per-component magnitude `min(|charge|, MAX_MAGNET_KICK)`. A ball
/// sitting exactly on its alpha is left alone.
pub fn magnet_kick(alpha_center: IVec2, ball_center: IVec2, charge: i32, vel: IVec2) -> IVec2 {
    let delta = ball_center - alpha_center;
    if delta == IVec2::ZERO || charge == 0 {
        return vel;
    }
    let kick = charge.abs().min(MAX_MAGNET_KICK) * charge.signum();
    vel + delta.signum() * kick
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geom::Circle;
    use proptest::prelude::*;

    fn arena(n_balls: u32, n_alphas: u32) -> Particles {
        let balls = (0..n_balls)
            .map(|i| {
                Ball::new(
                    i,
                    Circle::new(IVec2::new(100 * i as i32, 100), 10),
                    IVec2::new(1, 1),
                )
            })
            .collect();
        let alphas = (0..n_alphas)
            .map(|i| {
                Alpha::new(
                    i,
                    Circle::new(IVec2::new(100 * i as i32, 200), 10),
                    IVec2::new(1, -1),
                )
            })
            .collect();
        Particles { balls, alphas }
    }

    fn assert_invariants(p: &Particles) {
        for b in &p.balls {
            for aid in &b.alphas {
                let a = p.alpha(*aid).expect("linked alpha exists");
                assert!(a.balls.contains(&b.id), "asymmetric edge");
            }
            // Charge invariant
            assert_ne!(b.charge, 0);
            let expect_magnitude = b
                .alphas
                .iter()
                .map(|aid| p.alpha(*aid).unwrap().balls.len() as i32)
                .max()
                .unwrap_or(1)
                .max(1);
            assert_eq!(b.charge.abs(), expect_magnitude);
            if b.alphas.len() % 2 == 0 {
                assert!(b.charge > 0);
            } else {
                assert!(b.charge < 0);
            }
        }
        for a in &p.alphas {
            for bid in &a.balls {
                let b = p.ball(*bid).expect("linked ball exists");
                assert!(b.alphas.contains(&a.id), "asymmetric edge");
            }
        }
    }

    #[test]
    fn test_unlinked_ball_has_unit_charge() {
        let p = arena(1, 0);
        assert_eq!(p.balls[0].charge, 1);
    }

    #[test]
    fn test_single_link_flips_charge_to_minus_one() {
        let mut p = arena(1, 1);
        p.link(0, 0).unwrap();
        assert_eq!(p.ball(0).unwrap().charge, -1);
        assert_invariants(&p);
    }

    #[test]
    fn test_shared_alpha_raises_magnitude() {
        let mut p = arena(2, 1);
        p.link(0, 0).unwrap();
        p.link(1, 0).unwrap();
        // Both balls share one alpha carrying two balls: odd alpha count,
        // magnitude 2.
        assert_eq!(p.ball(0).unwrap().charge, -2);
        assert_eq!(p.ball(1).unwrap().charge, -2);
        assert_invariants(&p);
    }

    #[test]
    fn test_two_alphas_make_charge_positive_again() {
        let mut p = arena(1, 2);
        p.link(0, 0).unwrap();
        p.link(0, 1).unwrap();
        assert_eq!(p.ball(0).unwrap().charge, 1);
        assert_invariants(&p);
    }

    #[test]
    fn test_unlink_refreshes_both_sides() {
        let mut p = arena(2, 1);
        p.link(0, 0).unwrap();
        p.link(1, 0).unwrap();
        p.unlink(0, 0).unwrap();
        assert_eq!(p.ball(0).unwrap().charge, 1);
        // Ball 1 still linked, alpha now carries one ball.
        assert_eq!(p.ball(1).unwrap().charge, -1);
        assert_invariants(&p);
    }

    #[test]
    fn test_link_unknown_ids_rejected_before_mutation() {
        let mut p = arena(1, 1);
        assert_eq!(p.link(9, 0), Err(GameError::UnknownBall { id: 9 }));
        assert_eq!(p.link(0, 9), Err(GameError::UnknownAlpha { id: 9 }));
        assert!(p.balls[0].alphas.is_empty());
        assert!(p.alphas[0].balls.is_empty());
    }

    #[test]
    fn test_sever_ball_unlinks_everything() {
        let mut p = arena(2, 2);
        p.link(0, 0).unwrap();
        p.link(0, 1).unwrap();
        p.link(1, 0).unwrap();
        p.sever_ball(0).unwrap();
        assert!(p.ball(0).unwrap().alphas.is_empty());
        assert_eq!(p.ball(0).unwrap().charge, 1);
        assert_eq!(p.ball(1).unwrap().charge, -1);
        assert_invariants(&p);
    }

    #[test]
    fn test_from_parts_rejects_one_sided_edge() {
        let mut p = arena(1, 1);
        p.balls[0].alphas.insert(0);
        let err = Particles::from_parts(p.balls, p.alphas).unwrap_err();
        assert_eq!(err, GameError::AsymmetricLink { ball: 0, alpha: 0 });
    }

    #[test]
    fn test_from_parts_rejects_duplicate_ids() {
        let mut p = arena(2, 0);
        p.balls[1].id = 0;
        let err = Particles::from_parts(p.balls, p.alphas).unwrap_err();
        assert_eq!(err, GameError::DuplicateId { what: "ball", id: 0 });
    }

    #[test]
    fn test_magnet_kick_direction_follows_charge_sign() {
        let alpha = IVec2::new(0, 0);
        let ball = IVec2::new(10, -20);
        let vel = IVec2::new(5, 5);
        // Positive charge pushes away from the alpha.
        assert_eq!(magnet_kick(alpha, ball, 2, vel), IVec2::new(7, 3));
        // Negative charge pulls toward it.
        assert_eq!(magnet_kick(alpha, ball, -2, vel), IVec2::new(3, 7));
        // Magnitude saturates at the cap.
        assert_eq!(magnet_kick(alpha, ball, 9, vel), IVec2::new(8, 2));
        // Coincident centers: no kick.
        assert_eq!(magnet_kick(ball, ball, 2, vel), vel);
    }

    proptest! {
        // Symmetry and the charge invariant survive any sequence of link
        // and unlink calls over a small id space.
        #[test]
        fn prop_invariants_hold_after_any_op_sequence(
            ops in prop::collection::vec((0u32..4, 0u32..4, prop::bool::ANY), 0..64)
        ) {
            let mut p = arena(4, 4);
            for (ball_id, alpha_id, add) in ops {
                if add {
                    p.link(ball_id, alpha_id).unwrap();
                } else {
                    p.unlink(ball_id, alpha_id).unwrap();
                }
                assert_invariants(&p);
            }
        }
    }
}
