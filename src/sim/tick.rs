//! One simulation step
//!
//! [`tick`] advances the whole game by one elapsed-time slice in a fixed
//! phase order: step, wall bounce, death removal, block collision, paddle
//! collision, clamp, compaction. Running phases over all entities before
//! moving on keeps the result independent of entity ages; within a phase
//! the insertion order of the live vectors decides ties.

use std::collections::BTreeSet;

use glam::IVec2;

use super::alpha::Alpha;
use super::block::BlockEffect;
use super::geom::Rect;
use super::paddle::REPLICA_OFFSETS;
use super::particle::Particle;
use super::state::{BreakoutState, check_elapsed};
use crate::consts::PADDLE_SPEED;
use crate::error::GameError;

/// Velocity of a freshly spawned trailing alpha relative to its ball.
const ALPHA_TRAIL_OFFSET: IVec2 = IVec2::new(0, -2);

/// Advance the simulation by `elapsed` milliseconds.
///
/// `paddle_dir` is the sign of the paddle's current motion; it only feeds
/// the momentum transferred on paddle bounces, the paddle itself is moved
/// through the explicit move commands.
pub fn tick(state: &mut BreakoutState, paddle_dir: i32, elapsed: i32) -> Result<(), GameError> {
    check_elapsed(elapsed)?;
    let paddle_vel = IVec2::new(paddle_dir.signum() * PADDLE_SPEED, 0);

    step_particles(state, elapsed);
    bounce_on_walls(state)?;
    let (dead_balls, dead_alphas) = mark_dead(state)?;
    collide_blocks(state, &dead_balls)?;
    collide_paddle(state, paddle_vel, &dead_balls, &dead_alphas)?;
    clamp_to_field(state);

    state.particles.balls.retain(|b| !dead_balls.contains(&b.id));
    state
        .particles
        .alphas
        .retain(|a| !dead_alphas.contains(&a.id));
    Ok(())
}

fn step_particles(state: &mut BreakoutState, elapsed: i32) {
    for ball in &mut state.particles.balls {
        ball.step(elapsed);
    }
    for alpha in &mut state.particles.alphas {
        alpha.step(elapsed);
    }
}

/// Reflect every ball and alpha moving into a boundary wall. An alpha
/// bounce re-steers every ball linked to it through the magnet kick.
fn bounce_on_walls(state: &mut BreakoutState) -> Result<(), GameError> {
    let walls = state.walls();
    for ball in &mut state.particles.balls {
        for wall in &walls {
            ball.hit_wall(wall);
        }
    }
    let alpha_ids: Vec<u32> = state.particles.alphas.iter().map(|a| a.id).collect();
    for alpha_id in alpha_ids {
        let mut bounced = false;
        for wall in &walls {
            let alpha = state
                .particles
                .alpha_mut(alpha_id)
                .ok_or(GameError::UnknownAlpha { id: alpha_id })?;
            if let Some(v) = alpha.bounce_on(wall) {
                alpha.velocity = v;
                bounced = true;
            }
        }
        if bounced {
            state.particles.apply_magnet(alpha_id)?;
        }
    }
    Ok(())
}

/// Mark every ball and alpha whose lowest point reached the bottom edge and
/// sever its links. The corpses stay in the vectors until compaction so the
/// later phases can skip them by id.
fn mark_dead(state: &mut BreakoutState) -> Result<(BTreeSet<u32>, BTreeSet<u32>), GameError> {
    let floor = state.bottom_right().y;
    let dead_balls: BTreeSet<u32> = state
        .particles
        .balls
        .iter()
        .filter(|b| b.location.bottom() >= floor)
        .map(|b| b.id)
        .collect();
    let dead_alphas: BTreeSet<u32> = state
        .particles
        .alphas
        .iter()
        .filter(|a| a.location.bottom() >= floor)
        .map(|a| a.id)
        .collect();
    for &id in &dead_balls {
        log::debug!("ball {id} fell off the field");
        state.particles.sever_ball(id)?;
    }
    for &id in &dead_alphas {
        log::debug!("alpha {id} fell off the field");
        state.particles.sever_alpha(id)?;
    }
    Ok((dead_balls, dead_alphas))
}

/// Resolve at most one block hit per surviving ball. Blocks are tested in
/// list order and the first one the ball overlaps while approaching takes
/// the hit; a destroyed block is removed before the next ball is looked at.
fn collide_blocks(state: &mut BreakoutState, dead_balls: &BTreeSet<u32>) -> Result<(), GameError> {
    let ball_ids: Vec<u32> = state
        .particles
        .balls
        .iter()
        .map(|b| b.id)
        .filter(|id| !dead_balls.contains(id))
        .collect();

    for ball_id in ball_ids {
        let Some((idx, rect)) = first_hit_block(state, ball_id) else {
            continue;
        };
        let outcome = state.blocks[idx].register_hit();
        if outcome.destroyed {
            log::debug!("block at {:?} destroyed by ball {ball_id}", rect.top_left);
            state.blocks.remove(idx);
        }
        let ball = state
            .particles
            .ball_mut(ball_id)
            .ok_or(GameError::UnknownBall { id: ball_id })?;
        ball.hit_block(&rect, outcome.destroyed);
        match outcome.effect {
            BlockEffect::None => {}
            BlockEffect::SuperchargeBall => state.make_ball_supercharged(ball_id)?,
            BlockEffect::ReplicatePaddle => state.make_paddle_replicator(),
        }
    }
    Ok(())
}

/// Index and rect of the first block the ball overlaps while approaching.
fn first_hit_block(state: &BreakoutState, ball_id: u32) -> Option<(usize, Rect)> {
    let ball = state.particles.ball(ball_id)?;
    state
        .blocks
        .iter()
        .enumerate()
        .find(|(_, block)| {
            block
                .location
                .collide_with(&ball.location)
                .is_some_and(|dir| ball.velocity.dot(dir.unit()) > 0)
        })
        .map(|(idx, block)| (idx, block.location))
}

/// Resolve paddle contact for every surviving particle. A ball bounce also
/// spawns a trailing alpha linked to the ball, and asks the paddle how many
/// replicas of the ball to spawn on top.
fn collide_paddle(
    state: &mut BreakoutState,
    paddle_vel: IVec2,
    dead_balls: &BTreeSet<u32>,
    dead_alphas: &BTreeSet<u32>,
) -> Result<(), GameError> {
    let rect = state.paddle().location();

    let ball_ids: Vec<u32> = state
        .particles
        .balls
        .iter()
        .map(|b| b.id)
        .filter(|id| !dead_balls.contains(id))
        .collect();
    for ball_id in ball_ids {
        let ball = state
            .particles
            .ball_mut(ball_id)
            .ok_or(GameError::UnknownBall { id: ball_id })?;
        let approaching = rect
            .collide_with(&ball.location)
            .is_some_and(|dir| ball.velocity.dot(dir.unit()) > 0);
        if !approaching {
            continue;
        }
        ball.hit_paddle(&rect, paddle_vel);
        let (location, velocity) = (ball.location, ball.velocity);

        let replicas = state.paddle.register_hit() as usize;
        if replicas > 0 {
            log::debug!("paddle replicates ball {ball_id} x{replicas}");
        }
        for offset in REPLICA_OFFSETS.iter().take(replicas) {
            let id = state.next_entity_id();
            let replica = state
                .particles
                .ball(ball_id)
                .ok_or(GameError::UnknownBall { id: ball_id })?
                .replica(id, velocity + *offset);
            state.particles.balls.push(replica);
        }

        let alpha_id = state.next_entity_id();
        state.particles.alphas.push(Alpha::new(
            alpha_id,
            location,
            velocity + ALPHA_TRAIL_OFFSET,
        ));
        state.particles.link(ball_id, alpha_id)?;
    }

    let alpha_ids: Vec<u32> = state
        .particles
        .alphas
        .iter()
        .map(|a| a.id)
        .filter(|id| !dead_alphas.contains(id))
        .collect();
    for alpha_id in alpha_ids {
        let alpha = state
            .particles
            .alpha_mut(alpha_id)
            .ok_or(GameError::UnknownAlpha { id: alpha_id })?;
        alpha.hit_paddle(&rect, paddle_vel);
    }
    Ok(())
}

/// Undo boundary overshoot: every particle is pulled back inside the field.
fn clamp_to_field(state: &mut BreakoutState) {
    let field = state.field();
    for ball in &mut state.particles.balls {
        ball.location = field.constrain(&ball.location);
    }
    for alpha in &mut state.particles.alphas {
        alpha.location = field.constrain(&alpha.location);
    }
}
