//! Projectile vs target collision detection and response
//!
//! Targets are points with a hit radius. A target that has reached its hit cap
//! is inert: its distance is reported as [`MISS_DISTANCE`] so no check can
//! ever succeed against it.

use glam::Vec2;

use super::score::Score;
use super::state::{Projectile, Target};
use crate::consts::TARGET_HALF_SIZE;
use crate::tuning::Tuning;

/// Distance reported for inert targets
pub const MISS_DISTANCE: f32 = f32::INFINITY;

/// Knockback below this speed is dropped
const KNOCKBACK_EPSILON: f32 = 1e-4;

/// A registered hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitResult {
    pub target_id: u32,
    /// The hit took the target to its cap
    pub destroyed: bool,
    /// Score after the hit
    pub score: u8,
}

/// Distance from the projectile to a target, or [`MISS_DISTANCE`] if inert
#[inline]
pub fn target_distance(pos: Vec2, target: &Target, cap: u8) -> f32 {
    if !target.is_active(cap) {
        return MISS_DISTANCE;
    }
    pos.distance(target.pos)
}

/// Check the projectile against every armed target and apply the first hit
///
/// Targets are visited in slice order (callers keep them sorted by id). At most
/// one hit is registered per call.
pub fn resolve_target_hits(
    projectile: &mut Projectile,
    targets: &mut [Target],
    score: &mut Score,
    tuning: &Tuning,
) -> Option<HitResult> {
    let cap = tuning.target_hit_cap;

    for target in targets.iter_mut() {
        if target.cooldown > 0 {
            continue;
        }
        if target_distance(projectile.pos, target, cap) > tuning.hit_radius {
            continue;
        }

        let incoming = projectile.velocity();
        projectile.vx = -projectile.vx * tuning.hit_damping;
        projectile.vy = -projectile.vy * tuning.hit_damping;
        projectile.collided = true;

        target.vel += incoming * tuning.knockback_transfer;
        target.hits = (target.hits + 1).min(cap);
        // update_targets consumes one before the next check
        target.cooldown = tuning.cooldown_ticks + 1;

        score.increment();

        return Some(HitResult {
            target_id: target.id,
            destroyed: !target.is_active(cap),
            score: score.value(),
        });
    }

    None
}

/// Per-tick target housekeeping: cool-downs, knockback motion, bounds
pub fn update_targets(targets: &mut [Target], tuning: &Tuning, dt: f32) {
    let min_y = tuning.floor_y + TARGET_HALF_SIZE;
    let max_x = tuning.right_wall - TARGET_HALF_SIZE;

    for target in targets.iter_mut() {
        target.cooldown = target.cooldown.saturating_sub(1);

        if target.vel == Vec2::ZERO {
            continue;
        }
        target.pos += target.vel * dt;
        target.vel *= tuning.target_drag;

        if target.pos.y < min_y {
            target.pos.y = min_y;
            target.vel.y = 0.0;
        }
        if target.pos.x > max_x {
            target.pos.x = max_x;
            target.vel.x = 0.0;
        }
        if target.vel.length_squared() < KNOCKBACK_EPSILON * KNOCKBACK_EPSILON {
            target.vel = Vec2::ZERO;
        }
    }
}
