//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Vertex, colors};
use crate::consts::{PROJECTILE_RADIUS, TARGET_HALF_SIZE, WORLD_HALF_HEIGHT, WORLD_HALF_WIDTH};
use crate::settings::Settings;
use crate::sim::{GameState, Segment, digit_segments, predict_path};

/// Score digit placement (world units)
const DIGIT_ORIGIN: Vec2 = Vec2::new(-3.6, 2.6);
const DIGIT_WIDTH: f32 = 0.5;
const DIGIT_HEIGHT: f32 = 1.0;
const DIGIT_THICKNESS: f32 = 0.1;

const BARREL_LENGTH: f32 = 0.55;
const BARREL_HALF_WIDTH: f32 = 0.09;

/// Generate vertices for an axis-aligned rectangle
pub fn rect(min: Vec2, max: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, max.y, color),
        Vertex::new(min.x, max.y, color),
    ]
}

/// Generate vertices for a rectangle rotated about its base-center
pub fn rotated_bar(base: Vec2, length: f32, half_width: f32, angle: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = crate::direction(angle);
    let perp = Vec2::new(-dir.y, dir.x) * half_width;
    let tip = base + dir * length;

    let corners = [base - perp, base + perp, tip + perp, tip - perp];
    [0, 1, 2, 0, 2, 3]
        .iter()
        .map(|&i| Vertex::new(corners[i].x, corners[i].y, color))
        .collect()
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Box covered by one segment of a digit cell whose lower-left corner is `origin`
pub fn segment_rect(segment: Segment, origin: Vec2, width: f32, height: f32, thickness: f32) -> (Vec2, Vec2) {
    let (x, y) = (origin.x, origin.y);
    let mid = y + height / 2.0;
    match segment {
        Segment::A => (Vec2::new(x, y + height - thickness), Vec2::new(x + width, y + height)),
        Segment::B => (Vec2::new(x + width - thickness, mid), Vec2::new(x + width, y + height)),
        Segment::C => (Vec2::new(x + width - thickness, y), Vec2::new(x + width, mid)),
        Segment::D => (Vec2::new(x, y), Vec2::new(x + width, y + thickness)),
        Segment::E => (Vec2::new(x, y), Vec2::new(x + thickness, mid)),
        Segment::F => (Vec2::new(x, mid), Vec2::new(x + thickness, y + height)),
        Segment::G => (
            Vec2::new(x, mid - thickness / 2.0),
            Vec2::new(x + width, mid + thickness / 2.0),
        ),
    }
}

/// Generate vertices for a seven-segment digit (unlit segments drawn dimmed)
pub fn seven_segment_digit(origin: Vec2, digit: u8) -> Vec<Vertex> {
    let lit = digit_segments(digit);
    let mut vertices = Vec::with_capacity(7 * 6);
    for (segment, on) in Segment::ALL.iter().zip(lit) {
        let (min, max) = segment_rect(*segment, origin, DIGIT_WIDTH, DIGIT_HEIGHT, DIGIT_THICKNESS);
        let color = if on { colors::SEGMENT_LIT } else { colors::SEGMENT_UNLIT };
        vertices.extend(rect(min, max, color));
    }
    vertices
}

/// Build the whole frame for `state`
pub fn scene(state: &GameState, settings: &Settings) -> Vec<Vertex> {
    let tuning = &state.tuning;
    let mut vertices = Vec::with_capacity(2048);

    // Ground and right wall
    vertices.extend(rect(
        Vec2::new(-WORLD_HALF_WIDTH, -WORLD_HALF_HEIGHT),
        Vec2::new(WORLD_HALF_WIDTH, tuning.floor_y),
        colors::GROUND,
    ));
    vertices.extend(rect(
        Vec2::new(tuning.right_wall, tuning.floor_y),
        Vec2::new(WORLD_HALF_WIDTH, WORLD_HALF_HEIGHT),
        colors::WALL,
    ));

    // Aim guide
    let preview_steps = settings.effective_trajectory_steps();
    if preview_steps > 0 && !state.projectile.in_flight() {
        let stride = settings.trajectory_stride.max(1);
        let path = predict_path(state, preview_steps, crate::consts::SIM_DT);
        for point in path.iter().step_by(stride) {
            vertices.extend(circle(*point, 0.03, colors::PREVIEW, 8));
        }
    }

    // Targets
    let cap = tuning.target_hit_cap;
    let half = Vec2::splat(TARGET_HALF_SIZE);
    for target in &state.targets {
        let color = if target.is_armed(cap) {
            colors::TARGET
        } else if target.is_active(cap) {
            colors::TARGET_COOLING
        } else {
            colors::TARGET_INERT
        };
        vertices.extend(rect(target.pos - half, target.pos + half, color));
    }

    // Cannon
    let cannon = &state.cannon;
    vertices.extend(rotated_bar(cannon.pos, BARREL_LENGTH, BARREL_HALF_WIDTH, cannon.angle, colors::CANNON));
    vertices.extend(circle(cannon.pos, 0.2, colors::CANNON, 20));

    if settings.show_power {
        let span = tuning.power_max - tuning.power_min;
        let fill = if span > 0.0 {
            (cannon.power - tuning.power_min) / span
        } else {
            1.0
        };
        let base = cannon.pos + Vec2::new(-0.5, 0.4);
        vertices.extend(rect(base, base + Vec2::new(0.12, 1.0), colors::POWER_BACK));
        vertices.extend(rect(base, base + Vec2::new(0.12, fill.clamp(0.0, 1.0)), colors::POWER_FILL));
    }

    // Projectile
    vertices.extend(circle(state.projectile.pos, PROJECTILE_RADIUS, colors::PROJECTILE, 16));

    if settings.show_score {
        vertices.extend(seven_segment_digit(DIGIT_ORIGIN, state.score.value()));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    fn count_color(vertices: &[Vertex], color: [f32; 4]) -> usize {
        vertices.iter().filter(|v| v.color == color).count()
    }

    #[test]
    fn test_rect_is_two_triangles() {
        let v = rect(Vec2::ZERO, Vec2::ONE, colors::TARGET);
        assert_eq!(v.len(), 6);
    }

    #[test]
    fn test_rotated_bar_points_along_angle() {
        let v = rotated_bar(Vec2::ZERO, 1.0, 0.1, std::f32::consts::FRAC_PI_2, colors::CANNON);
        let top = v.iter().map(|v| v.position[1]).fold(f32::MIN, f32::max);
        assert!((top - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_segments_stay_inside_cell() {
        for segment in Segment::ALL {
            let (min, max) = segment_rect(segment, Vec2::ZERO, 0.5, 1.0, 0.1);
            assert!(min.x >= 0.0 && min.y >= -0.05);
            assert!(max.x <= 0.5 && max.y <= 1.0 + 1e-6);
            assert!(max.x > min.x && max.y > min.y);
        }
    }

    #[test]
    fn test_digit_lights_expected_segments() {
        let eight = seven_segment_digit(Vec2::ZERO, 8);
        assert_eq!(count_color(&eight, colors::SEGMENT_LIT), 7 * 6);

        let one = seven_segment_digit(Vec2::ZERO, 1);
        assert_eq!(count_color(&one, colors::SEGMENT_LIT), 2 * 6);
        assert_eq!(count_color(&one, colors::SEGMENT_UNLIT), 5 * 6);
    }

    #[test]
    fn test_scene_respects_settings() {
        let state = GameState::new(1, Tuning::default());
        let full = scene(&state, &Settings::default());
        assert!(count_color(&full, colors::PREVIEW) > 0);
        assert!(count_color(&full, colors::SEGMENT_UNLIT) > 0);

        let bare = Settings {
            show_trajectory: false,
            show_score: false,
            show_power: false,
            ..Default::default()
        };
        let minimal = scene(&state, &bare);
        assert_eq!(count_color(&minimal, colors::PREVIEW), 0);
        assert_eq!(count_color(&minimal, colors::SEGMENT_UNLIT), 0);
        assert!(minimal.len() < full.len());
        assert_eq!(minimal.len() % 3, 0);
    }

    #[test]
    fn test_inert_targets_are_dimmed() {
        let mut state = GameState::new(1, Tuning::default());
        state.targets[0].hits = state.tuning.target_hit_cap;
        let v = scene(&state, &Settings::default());
        assert_eq!(count_color(&v, colors::TARGET_INERT), 6);
    }
}
