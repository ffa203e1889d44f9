//! Aim guide: where a shot would go if fired right now

use glam::Vec2;

use super::projectile::step_projectile;
use super::state::{GameState, Projectile};

/// Sample the path of a would-be launch from the cannon
///
/// Runs the real step function on a scratch projectile, so the guide matches
/// the actual first arc. Stops at the first floor contact or when the flight
/// would end. Targets are ignored.
pub fn predict_path(state: &GameState, max_steps: usize, dt: f32) -> Vec<Vec2> {
    let tuning = &state.tuning;
    let config = tuning.projectile_config();
    let cannon = &state.cannon;

    let mut scratch = Projectile::at_rest(cannon.pos);
    scratch.launch(cannon.pos, cannon.launch_speed(tuning), cannon.angle);

    let mut path = Vec::with_capacity(max_steps);
    for _ in 0..max_steps {
        let step = step_projectile(&scratch, &config, dt);
        scratch.apply_step(&step);
        path.push(step.pos);
        if step.floor_contact || step.wall_contact || !step.continues() {
            break;
        }
    }
    path
}
