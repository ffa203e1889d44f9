//! Projectile integration and boundary response
//!
//! The vertical update `y += vy * sin(angle) * dt - t^2` is the game's own
//! trajectory formula, not textbook ballistics. Level layouts and feel depend
//! on it, so it is kept exactly.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Projectile;

/// Boundary and restitution parameters for [`step_projectile`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileConfig {
    /// Vertical rebound multiplier on floor contact
    pub restitution: f32,
    /// When false, floor contact zeroes vertical velocity
    pub bounce_enabled: bool,
    pub floor_y: f32,
    /// Flight ends when x drops below this
    pub left_limit: f32,
    /// x is clamped here and horizontal velocity inverted
    pub right_wall: f32,
    /// Flight ends when x exceeds this
    pub outer_limit: f32,
    /// Floor contact below this terminal speed ends the flight
    pub rest_speed: f32,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        crate::tuning::Tuning::default().projectile_config()
    }
}

/// Outcome of one integration step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepResult {
    pub pos: Vec2,
    pub vx: f32,
    pub vy: f32,
    pub t: f32,
    /// Speed proxy used by the continuation check
    pub terminal_speed: f32,
    pub floor_contact: bool,
    pub wall_contact: bool,
    pub out_of_bounds: bool,
    /// Settled on the floor too slowly to keep going
    pub at_rest: bool,
}

impl StepResult {
    /// Whether the flight should continue after this step
    #[inline]
    pub fn continues(&self) -> bool {
        !self.out_of_bounds && !self.at_rest
    }
}

/// Advance a projectile by one fixed step
///
/// Integrates position, then resolves floor and wall contact, then decides
/// whether the flight continues. Pure: the caller applies the result with
/// [`Projectile::apply_step`].
pub fn step_projectile(p: &Projectile, config: &ProjectileConfig, dt: f32) -> StepResult {
    let (sin, cos) = p.angle.sin_cos();

    let mut pos = p.pos;
    pos.x += p.vx * cos * dt;
    pos.y += p.vy * sin * dt - p.t * p.t;
    let mut t = p.t + dt;
    let mut vx = p.vx;
    let mut vy = p.vy;

    let terminal_speed = Vec2::new(vx * cos, vy * sin).length();

    let floor_contact = pos.y < config.floor_y;
    if floor_contact {
        pos.y = config.floor_y;
        vy = if config.bounce_enabled {
            config.restitution * vy.abs()
        } else {
            0.0
        };
        t = 0.0;
    }

    // Measured before the wall clamp: a step that carries past the outer
    // limit escapes even though the wall still reflects it
    let escaped_right = pos.x > config.outer_limit;

    let wall_contact = pos.x > config.right_wall;
    if wall_contact {
        pos.x = config.right_wall;
        vx = -vx;
    }

    let out_of_bounds = pos.x < config.left_limit || escaped_right;
    let at_rest = floor_contact && terminal_speed < config.rest_speed;

    StepResult {
        pos,
        vx,
        vy,
        t,
        terminal_speed,
        floor_contact,
        wall_contact,
        out_of_bounds,
        at_rest,
    }
}

impl Projectile {
    /// Copy the kinematic part of a step result into this projectile
    pub fn apply_step(&mut self, step: &StepResult) {
        self.pos = step.pos;
        self.vx = step.vx;
        self.vy = step.vy;
        self.t = step.t;
    }
}
