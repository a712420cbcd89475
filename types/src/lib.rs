//! Shared configuration types for xivdps
//!
//! This crate contains serializable configuration types that are shared between
//! the processing engine (xivdps-core) and whatever host embeds it.
//!
//! Persistence (load/save) lives in xivdps-core behind the `ParserConfigExt`
//! trait, so this crate stays dependency-light.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Damage Model
// ─────────────────────────────────────────────────────────────────────────────

/// Constants used to reverse the game's hidden damage modifiers.
///
/// The defaults match the values observed for the current game patch. They are
/// exposed so a host can retune them after a balance patch without a rebuild.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageModelConfig {
    /// Divisor applied to a damage-per-potency estimate when the hit was a crit.
    #[serde(default = "default_crit_multiplier")]
    pub crit_multiplier: f64,

    /// Divisor applied to a damage-per-potency estimate when the hit was a direct hit.
    #[serde(default = "default_direct_hit_multiplier")]
    pub direct_hit_multiplier: f64,

    /// Lowest plausible crit parameter once raid buffs are removed. Anything below
    /// this is treated as a value that wrapped around the 8-bit wire encoding.
    #[serde(default = "default_crit_rate_floor")]
    pub crit_rate_floor: i64,

    /// Tolerance used when unwrapping a truncated dot magnitude against its
    /// potency-based guess.
    #[serde(default = "default_wrap_window")]
    pub wrap_window: f64,
}

fn default_crit_multiplier() -> f64 {
    1.54
}
fn default_direct_hit_multiplier() -> f64 {
    1.25
}
fn default_crit_rate_floor() -> i64 {
    50
}
fn default_wrap_window() -> f64 {
    128.0
}

impl Default for DamageModelConfig {
    fn default() -> Self {
        Self {
            crit_multiplier: default_crit_multiplier(),
            direct_hit_multiplier: default_direct_hit_multiplier(),
            crit_rate_floor: default_crit_rate_floor(),
            wrap_window: default_wrap_window(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Parser Config
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level configuration for an event processor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParserConfig {
    #[serde(default)]
    pub damage_model: DamageModelConfig,

    /// When a status is gained through a tick record (which carries no duration),
    /// fall back to the status table's default duration so a pending dot can still
    /// be confirmed. Disabling this leaves such dots unconfirmed.
    #[serde(default = "default_true")]
    pub dot_duration_fallback: bool,

    /// Ask the name store for player names the first time an id is seen.
    #[serde(default = "default_true")]
    pub resolve_player_names: bool,
}

fn default_true() -> bool {
    true
}

fn is_positive(value: f64) -> bool {
    value > 0.0
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            damage_model: DamageModelConfig::default(),
            dot_duration_fallback: true,
            resolve_player_names: true,
        }
    }
}

impl ParserConfig {
    /// Returns the name of the first field holding an unusable value, if any.
    pub fn invalid_field(&self) -> Option<(&'static str, &'static str)> {
        let model = &self.damage_model;
        if !is_positive(model.crit_multiplier) {
            return Some(("damage_model.crit_multiplier", "must be positive"));
        }
        if !is_positive(model.direct_hit_multiplier) {
            return Some(("damage_model.direct_hit_multiplier", "must be positive"));
        }
        if !is_positive(model.wrap_window) {
            return Some(("damage_model.wrap_window", "must be positive"));
        }
        if !(0..256).contains(&model.crit_rate_floor) {
            return Some(("damage_model.crit_rate_floor", "must be between 0 and 255"));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_uses_defaults() {
        let config: ParserConfig = toml::from_str("").unwrap();
        assert_eq!(config, ParserConfig::default());
        assert_eq!(config.damage_model.crit_multiplier, 1.54);
        assert!(config.dot_duration_fallback);
    }

    #[test]
    fn partial_damage_model_keeps_other_defaults() {
        let config: ParserConfig = toml::from_str(
            r#"
            dot_duration_fallback = false

            [damage_model]
            crit_multiplier = 1.6
            "#,
        )
        .unwrap();
        assert_eq!(config.damage_model.crit_multiplier, 1.6);
        assert_eq!(config.damage_model.direct_hit_multiplier, 1.25);
        assert_eq!(config.damage_model.crit_rate_floor, 50);
        assert!(!config.dot_duration_fallback);
        assert!(config.resolve_player_names);
    }

    #[test]
    fn invalid_multiplier_is_reported() {
        let mut config = ParserConfig::default();
        assert!(config.invalid_field().is_none());
        config.damage_model.direct_hit_multiplier = 0.0;
        assert_eq!(
            config.invalid_field().map(|(field, _)| field),
            Some("damage_model.direct_hit_multiplier")
        );
    }

    #[test]
    fn crit_rate_floor_must_fit_a_byte() {
        let mut config = ParserConfig::default();
        config.damage_model.crit_rate_floor = 255;
        assert!(config.invalid_field().is_none());

        for floor in [-1, 256, i64::MAX] {
            config.damage_model.crit_rate_floor = floor;
            assert_eq!(
                config.invalid_field().map(|(field, _)| field),
                Some("damage_model.crit_rate_floor")
            );
        }
    }
}
