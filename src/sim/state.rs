//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in [`GameState`]; nothing is global.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::level::Level;
use super::score::Score;
use crate::consts::CANNON_POS;
use crate::tuning::Tuning;

/// Projectile lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlightPhase {
    /// Sitting in the cannon, waiting for launch input
    AtRest,
    /// Being integrated every tick
    InFlight,
}

/// The projectile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    /// Speed along x; multiplied by cos(angle) when integrating
    pub vx: f32,
    /// Speed along y; multiplied by sin(angle) when integrating
    pub vy: f32,
    /// Seconds since launch or since the last floor contact
    pub t: f32,
    /// Launch angle (radians)
    pub angle: f32,
    /// Set once the projectile has struck any target during this flight
    pub collided: bool,
    pub phase: FlightPhase,
}

impl Projectile {
    /// A projectile resting at `pos`
    pub fn at_rest(pos: Vec2) -> Self {
        Self {
            pos,
            vx: 0.0,
            vy: 0.0,
            t: 0.0,
            angle: 0.0,
            collided: false,
            phase: FlightPhase::AtRest,
        }
    }

    #[inline]
    pub fn in_flight(&self) -> bool {
        self.phase == FlightPhase::InFlight
    }

    /// Launch from `origin` with the given speed and angle
    pub fn launch(&mut self, origin: Vec2, speed: f32, angle: f32) {
        self.pos = origin;
        self.vx = speed;
        self.vy = speed;
        self.t = 0.0;
        self.angle = angle;
        self.collided = false;
        self.phase = FlightPhase::InFlight;
    }

    /// Pull the projectile back to `origin` and stop the flight
    pub fn retract(&mut self, origin: Vec2) {
        *self = Self::at_rest(origin);
    }

    /// Effective world-space velocity for this tick's formula (ignores the t² term)
    pub fn velocity(&self) -> Vec2 {
        Vec2::new(self.vx * self.angle.cos(), self.vy * self.angle.sin())
    }
}

/// A target that can be knocked a limited number of times
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub id: u32,
    pub pos: Vec2,
    /// Knockback velocity, damped every tick
    #[serde(default)]
    pub vel: Vec2,
    /// Hits taken so far
    pub hits: u8,
    /// Counted down at the start of every tick; hits are ignored while nonzero
    #[serde(default)]
    pub cooldown: u32,
}

impl Target {
    pub fn new(id: u32, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            hits: 0,
            cooldown: 0,
        }
    }

    /// Below the hit cap
    #[inline]
    pub fn is_active(&self, cap: u8) -> bool {
        self.hits < cap
    }

    /// Active and not cooling down
    #[inline]
    pub fn is_armed(&self, cap: u8) -> bool {
        self.is_active(cap) && self.cooldown == 0
    }
}

/// The player's cannon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cannon {
    pub pos: Vec2,
    /// Aim angle (radians, 0 = right, pi/2 = up)
    pub angle: f32,
    pub power: f32,
}

impl Cannon {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: CANNON_POS,
            angle: tuning.aim_default,
            power: tuning.power_default,
        }
    }

    /// Point the barrel at a world-space position
    pub fn aim_at(&mut self, point: Vec2, tuning: &Tuning) {
        let d = point - self.pos;
        if d.length_squared() < 1e-8 {
            return;
        }
        self.angle = tuning.clamp_aim(d.y.atan2(d.x));
    }

    pub fn adjust_aim(&mut self, delta: f32, tuning: &Tuning) {
        self.angle = tuning.clamp_aim(self.angle + delta);
    }

    pub fn adjust_power(&mut self, delta: f32, tuning: &Tuning) {
        self.power = tuning.clamp_power(self.power + delta);
    }

    /// Launch speed for the current power
    pub fn launch_speed(&self, tuning: &Tuning) -> f32 {
        self.power * tuning.power_scale
    }
}

/// Things that happened during a tick (for logging, sound, HUD flashes)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Launched { power: f32, angle: f32 },
    FloorBounce { x: f32 },
    WallBounce { y: f32 },
    TargetHit { id: u32, score: u8 },
    TargetDestroyed { id: u32 },
    Retracted,
    LevelCleared { level: u32 },
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub tuning: Tuning,
    /// Seed for generated levels
    pub seed: u64,
    /// Current level index (0 = the hand-built layout)
    pub level_index: u32,
    pub cannon: Cannon,
    pub projectile: Projectile,
    /// Targets (sorted by id for determinism)
    pub targets: Vec<Target>,
    pub score: Score,
    pub shots_fired: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events produced since the front end last drained them
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// New game on the hand-built level
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let cannon = Cannon::new(&tuning);
        let projectile = Projectile::at_rest(cannon.pos);
        let score = Score::new(tuning.max_score);
        Self {
            seed,
            level_index: 0,
            cannon,
            projectile,
            targets: Level::standard().targets,
            score,
            shots_fired: 0,
            time_ticks: 0,
            events: Vec::new(),
            tuning,
        }
    }

    /// Replace the targets with `level`
    pub fn load_level(&mut self, level: Level) {
        self.targets = level.targets;
        self.normalize_order();
    }

    /// Targets still below their hit cap
    pub fn active_targets(&self) -> impl Iterator<Item = &Target> {
        let cap = self.tuning.target_hit_cap;
        self.targets.iter().filter(move |t| t.is_active(cap))
    }

    /// Take the pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Ensure targets are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.targets.sort_by_key(|t| t.id);
    }
}
