//! Data-driven game balance
//!
//! Every physics and gameplay constant lives in [`Tuning`] so a level designer
//! can override it with a JSON document. Missing fields fall back to defaults.

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use thiserror::Error;

use crate::sim::ProjectileConfig;

/// Errors produced while loading tuning data
#[derive(Error, Debug)]
pub enum TuningError {
    #[error("tuning JSON could not be parsed: {source}")]
    Parse {
        #[from]
        source: serde_json::Error,
    },
    #[error("tuning field `{field}` is invalid: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Physics and gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Projectile ===
    /// Rebound multiplier applied to vertical velocity on floor contact
    pub restitution: f32,
    /// When false, floor contact zeroes vertical velocity instead of bouncing
    pub bounce_enabled: bool,
    /// Floor height (world units)
    pub floor_y: f32,
    /// Leaving past this x ends the flight
    pub left_limit: f32,
    /// Right wall the projectile bounces off
    pub right_wall: f32,
    /// Outer right bound, past which the flight ends
    pub outer_limit: f32,
    /// Flight ends once resting on the floor slower than this
    pub rest_speed: f32,

    // === Targets ===
    /// Hit distance between projectile and target centers
    pub hit_radius: f32,
    /// Projectile velocity multiplier after a hit (applied before negation)
    pub hit_damping: f32,
    /// Fraction of the projectile's velocity handed to the target
    pub knockback_transfer: f32,
    /// Per-tick multiplier on target knockback velocity
    pub target_drag: f32,
    /// Hits a target absorbs before it goes inert
    pub target_hit_cap: u8,
    /// Ticks a target ignores further hits after being struck
    pub cooldown_ticks: u32,
    /// Highest reachable score (single display digit)
    pub max_score: u8,

    // === Cannon ===
    pub power_min: f32,
    pub power_max: f32,
    pub power_default: f32,
    /// Power change per tick while a power key is held
    pub power_step: f32,
    /// Launch speed = power * power_scale
    pub power_scale: f32,
    pub aim_min: f32,
    pub aim_max: f32,
    pub aim_default: f32,
    /// Aim change per tick while an aim key is held (radians)
    pub aim_step: f32,

    /// Targets per generated level
    pub targets_per_level: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            restitution: 0.8,
            bounce_enabled: true,
            floor_y: -2.75,
            left_limit: -4.5,
            right_wall: 3.8,
            outer_limit: 4.5,
            rest_speed: 0.3,

            hit_radius: 0.4,
            hit_damping: 0.5,
            knockback_transfer: 0.3,
            target_drag: 0.9,
            target_hit_cap: 3,
            cooldown_ticks: 15,
            max_score: 9,

            power_min: 10.0,
            power_max: 60.0,
            power_default: 40.0,
            power_step: 0.5,
            power_scale: 0.25,
            aim_min: 0.05,
            aim_max: PI - 0.05,
            aim_default: PI / 4.0,
            aim_step: 0.02,

            targets_per_level: 5,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Parse `json` if present, falling back to defaults on any error
    pub fn load_or_default(json: Option<&str>) -> Self {
        match json.map(Self::from_json) {
            Some(Ok(tuning)) => {
                log::info!("Loaded custom tuning");
                tuning
            }
            Some(Err(e)) => {
                log::warn!("Ignoring tuning data: {}", e);
                Self::default()
            }
            None => Self::default(),
        }
    }

    /// Check value ranges the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        if !(0.0..=1.0).contains(&self.restitution) {
            return invalid("restitution", "must be within [0, 1]");
        }
        if !(self.left_limit < self.right_wall && self.right_wall <= self.outer_limit) {
            return invalid("right_wall", "must satisfy left_limit < right_wall <= outer_limit");
        }
        if self.rest_speed < 0.0 {
            return invalid("rest_speed", "must not be negative");
        }
        if self.hit_radius <= 0.0 {
            return invalid("hit_radius", "must be positive");
        }
        if !(0.0..=1.0).contains(&self.hit_damping) {
            return invalid("hit_damping", "must be within [0, 1]");
        }
        if !(0.0..=1.0).contains(&self.target_drag) {
            return invalid("target_drag", "must be within [0, 1]");
        }
        if self.target_hit_cap == 0 {
            return invalid("target_hit_cap", "must be at least 1");
        }
        if self.max_score == 0 || self.max_score > 9 {
            return invalid("max_score", "must be a single digit from 1 to 9");
        }
        if self.power_min <= 0.0 || self.power_min > self.power_max {
            return invalid("power_min", "must satisfy 0 < power_min <= power_max");
        }
        if !(self.power_min..=self.power_max).contains(&self.power_default) {
            return invalid("power_default", "must be within [power_min, power_max]");
        }
        if self.power_scale <= 0.0 {
            return invalid("power_scale", "must be positive");
        }
        if !(0.0 < self.aim_min && self.aim_min < self.aim_max && self.aim_max < PI) {
            return invalid("aim_min", "must satisfy 0 < aim_min < aim_max < pi");
        }
        if !(self.aim_min..=self.aim_max).contains(&self.aim_default) {
            return invalid("aim_default", "must be within [aim_min, aim_max]");
        }
        if self.targets_per_level == 0 {
            return invalid("targets_per_level", "must be at least 1");
        }
        Ok(())
    }

    /// Projectile step parameters derived from this tuning
    pub fn projectile_config(&self) -> ProjectileConfig {
        ProjectileConfig {
            restitution: self.restitution,
            bounce_enabled: self.bounce_enabled,
            floor_y: self.floor_y,
            left_limit: self.left_limit,
            right_wall: self.right_wall,
            outer_limit: self.outer_limit,
            rest_speed: self.rest_speed,
        }
    }

    /// Clamp a power value into the allowed range
    pub fn clamp_power(&self, power: f32) -> f32 {
        power.clamp(self.power_min, self.power_max)
    }

    /// Clamp an aim angle into the allowed range
    pub fn clamp_aim(&self, angle: f32) -> f32 {
        angle.clamp(self.aim_min, self.aim_max)
    }
}

fn invalid(field: &'static str, reason: &'static str) -> Result<(), TuningError> {
    Err(TuningError::Invalid { field, reason })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
        assert_eq!(Tuning::default().restitution, 0.8);
        assert_eq!(Tuning::default().hit_radius, 0.4);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "restitution": 0.5, "target_hit_cap": 5 }"#).unwrap();
        assert_eq!(tuning.restitution, 0.5);
        assert_eq!(tuning.target_hit_cap, 5);
        assert_eq!(tuning.floor_y, Tuning::default().floor_y);
    }

    #[test]
    fn test_rejects_out_of_range_restitution() {
        let err = Tuning::from_json(r#"{ "restitution": 1.5 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "restitution",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_two_digit_score_cap() {
        let err = Tuning::from_json(r#"{ "max_score": 12 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "max_score", .. }));
    }

    #[test]
    fn test_rejects_settings_the_game_cannot_recover_from() {
        let cases = [
            (r#"{ "targets_per_level": 0 }"#, "targets_per_level"),
            (r#"{ "rest_speed": -0.1 }"#, "rest_speed"),
            (r#"{ "power_default": 70.0 }"#, "power_default"),
            (r#"{ "power_default": 5.0 }"#, "power_default"),
            (r#"{ "aim_default": 3.2 }"#, "aim_default"),
            (r#"{ "aim_default": 0.0 }"#, "aim_default"),
        ];
        for (json, expected) in cases {
            match Tuning::from_json(json) {
                Err(TuningError::Invalid { field, .. }) => assert_eq!(field, expected, "{json}"),
                other => panic!("{json} was not rejected: {other:?}"),
            }
        }
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Tuning::from_json("{ restitution: ").unwrap_err();
        assert!(matches!(err, TuningError::Parse { .. }));
        assert!(err.to_string().starts_with("tuning JSON could not be parsed"));
    }

    #[test]
    fn test_load_or_default_falls_back() {
        assert_eq!(Tuning::load_or_default(None), Tuning::default());
        assert_eq!(Tuning::load_or_default(Some("not json")), Tuning::default());
        let custom = Tuning::load_or_default(Some(r#"{ "bounce_enabled": false }"#));
        assert!(!custom.bounce_enabled);
    }

    #[test]
    fn test_projectile_config_mirrors_tuning() {
        let tuning = Tuning::default();
        let config = tuning.projectile_config();
        assert_eq!(config.restitution, tuning.restitution);
        assert_eq!(config.floor_y, tuning.floor_y);
        assert_eq!(config.right_wall, tuning.right_wall);
    }
}
