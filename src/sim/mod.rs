//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (level generation)
//! - Stable iteration order (by target ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod level;
pub mod preview;
pub mod projectile;
pub mod score;
pub mod state;
pub mod tick;

pub use collision::{HitResult, MISS_DISTANCE, resolve_target_hits, target_distance, update_targets};
pub use level::Level;
pub use preview::predict_path;
pub use projectile::{ProjectileConfig, StepResult, step_projectile};
pub use score::{Score, Segment, digit_segments, segment_lit};
pub use state::{Cannon, FlightPhase, GameEvent, GameState, Projectile, Target};
pub use tick::{TickInput, tick};
