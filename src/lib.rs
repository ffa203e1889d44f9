//! Lobshot - a 2D cannon-and-targets arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (projectile motion, target hits, score)
//! - `tuning`: Data-driven physics and gameplay constants
//! - `renderer`: WebGPU rendering pipeline
//! - `settings`: Player preferences

pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Visible world extents (world units, origin at screen center)
    pub const WORLD_HALF_WIDTH: f32 = 4.0;
    pub const WORLD_HALF_HEIGHT: f32 = 4.0;

    /// Cannon muzzle (projectile spawn and retract point)
    pub const CANNON_POS: Vec2 = Vec2::new(-3.2, -2.6);

    /// Projectile draw radius
    pub const PROJECTILE_RADIUS: f32 = 0.12;
    /// Target draw half-size (targets are squares)
    pub const TARGET_HALF_SIZE: f32 = 0.25;

    /// Region targets are placed in (min corner, max corner)
    pub const TARGET_ZONE_MIN: Vec2 = Vec2::new(0.0, -2.5);
    pub const TARGET_ZONE_MAX: Vec2 = Vec2::new(3.4, 0.5);
}

/// Degrees to radians
#[inline]
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees * std::f32::consts::PI / 180.0
}

/// Unit direction for an angle in radians
#[inline]
pub fn direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Map a canvas-space pointer (pixels, y down) to world space (y up)
///
/// Inverse of the renderer's letterboxed world-to-NDC mapping.
pub fn screen_to_world(px: f32, py: f32, width: f32, height: f32) -> Vec2 {
    let (width, height) = (width.max(1.0), height.max(1.0));
    let nx = (px / width) * 2.0 - 1.0;
    let ny = 1.0 - (py / height) * 2.0;

    let viewport_aspect = width / height;
    let world_aspect = consts::WORLD_HALF_WIDTH / consts::WORLD_HALF_HEIGHT;
    let (sx, sy) = if viewport_aspect > world_aspect {
        (world_aspect / viewport_aspect, 1.0)
    } else {
        (1.0, viewport_aspect / world_aspect)
    };
    Vec2::new(
        nx / sx * consts::WORLD_HALF_WIDTH,
        ny / sy * consts::WORLD_HALF_HEIGHT,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deg_to_rad() {
        assert!((deg_to_rad(180.0) - std::f32::consts::PI).abs() < 1e-6);
    }

    #[test]
    fn test_screen_to_world_corners() {
        let center = screen_to_world(400.0, 300.0, 800.0, 600.0);
        assert!(center.length() < 1e-5);

        let top_left = screen_to_world(0.0, 0.0, 600.0, 600.0);
        assert_eq!(top_left, Vec2::new(-consts::WORLD_HALF_WIDTH, consts::WORLD_HALF_HEIGHT));
    }

    #[test]
    fn test_screen_to_world_skips_letterbox_bars() {
        // 800x400: world square spans the middle 400 pixels
        let left_edge = screen_to_world(200.0, 200.0, 800.0, 400.0);
        assert!((left_edge.x + consts::WORLD_HALF_WIDTH).abs() < 1e-5);
        assert!(left_edge.y.abs() < 1e-5);

        let top = screen_to_world(400.0, 0.0, 800.0, 400.0);
        assert!((top.y - consts::WORLD_HALF_HEIGHT).abs() < 1e-5);
    }
}
