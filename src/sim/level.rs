//! Target layouts
//!
//! Level 0 is hand-built. Later levels are laid out from a seeded PCG stream so
//! the same seed always yields the same targets.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::Target;
use crate::consts::{TARGET_HALF_SIZE, TARGET_ZONE_MAX, TARGET_ZONE_MIN};

/// Minimum spacing between generated target centers
const MIN_SPACING: f32 = 2.0 * TARGET_HALF_SIZE + 0.05;
/// Placement attempts per target before accepting an overlap
const MAX_PLACEMENT_TRIES: u32 = 64;

/// A set of targets to load into the game
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    pub targets: Vec<Target>,
}

impl Level {
    /// The opening layout: a three-high stack, two floor targets and a high one
    pub fn standard() -> Self {
        let floor = TARGET_ZONE_MIN.y;
        let step = 2.0 * TARGET_HALF_SIZE;
        let positions = [
            Vec2::new(0.8, floor),
            Vec2::new(1.6, floor),
            Vec2::new(2.6, floor),
            Vec2::new(2.6, floor + step),
            Vec2::new(2.6, floor + 2.0 * step),
            Vec2::new(3.2, -0.4),
        ];
        Self::from_positions(&positions)
    }

    /// Deterministic layout of `count` targets inside the target zone
    pub fn generate(seed: u64, count: usize) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut positions: Vec<Vec2> = Vec::with_capacity(count);

        for _ in 0..count {
            let mut candidate = random_point(&mut rng);
            for _ in 0..MAX_PLACEMENT_TRIES {
                if positions.iter().all(|p| p.distance(candidate) >= MIN_SPACING) {
                    break;
                }
                candidate = random_point(&mut rng);
            }
            positions.push(candidate);
        }

        Self::from_positions(&positions)
    }

    /// Layout for level `index` of a run seeded with `seed`
    pub fn for_index(seed: u64, index: u32, count: usize) -> Self {
        if index == 0 {
            return Self::standard();
        }
        let level_seed = seed.wrapping_add((index as u64).wrapping_mul(2654435761));
        log::info!("Generating level {} ({} targets)", index, count);
        Self::generate(level_seed, count)
    }

    fn from_positions(positions: &[Vec2]) -> Self {
        let targets = positions
            .iter()
            .enumerate()
            .map(|(i, &pos)| Target::new(i as u32 + 1, pos))
            .collect();
        Self { targets }
    }
}

fn random_point(rng: &mut Pcg32) -> Vec2 {
    // Half the time, sit the target on the floor
    let on_floor = rng.random_bool(0.5);
    let x = rng.random_range(TARGET_ZONE_MIN.x..TARGET_ZONE_MAX.x);
    let y = if on_floor {
        TARGET_ZONE_MIN.y
    } else {
        rng.random_range(TARGET_ZONE_MIN.y..TARGET_ZONE_MAX.y)
    };
    Vec2::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_zone(p: Vec2) -> bool {
        p.x >= TARGET_ZONE_MIN.x
            && p.x <= TARGET_ZONE_MAX.x
            && p.y >= TARGET_ZONE_MIN.y
            && p.y <= TARGET_ZONE_MAX.y
    }

    #[test]
    fn test_standard_layout() {
        let level = Level::standard();
        assert_eq!(level.targets.len(), 6);
        assert!(level.targets.iter().all(|t| in_zone(t.pos)));
        let ids: Vec<u32> = level.targets.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_generate_is_deterministic() {
        assert_eq!(Level::generate(1234, 5), Level::generate(1234, 5));
        assert_ne!(Level::generate(1234, 5), Level::generate(4321, 5));
    }

    #[test]
    fn test_generated_targets_stay_in_zone_and_apart() {
        for seed in 0..50 {
            let level = Level::generate(seed, 5);
            assert_eq!(level.targets.len(), 5);
            assert!(level.targets.iter().all(|t| in_zone(t.pos)));
            for (i, a) in level.targets.iter().enumerate() {
                for b in &level.targets[i + 1..] {
                    assert!(a.pos.distance(b.pos) >= MIN_SPACING, "seed {seed}");
                }
            }
        }
    }

    #[test]
    fn test_level_zero_is_standard() {
        assert_eq!(Level::for_index(99, 0, 5), Level::standard());
        assert_eq!(Level::for_index(99, 2, 4).targets.len(), 4);
    }
}
