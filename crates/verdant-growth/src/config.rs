//! Growth tuning.
//!
//! Mirrors the `growth` section of `verdant-config.yaml`. Passives shift
//! these bases; see [`GrowthParams`](crate::params::GrowthParams).

use serde::Deserialize;
use verdant_types::LeafPattern;

/// Base growth shape and cadence.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GrowthConfig {
    /// Shortest stem before passive adjustments.
    #[serde(default = "default_base_min_stem")]
    pub base_min_stem: i32,

    /// Longest stem before passive adjustments.
    #[serde(default = "default_base_max_stem")]
    pub base_max_stem: i32,

    /// Bare stems between leaf placements before adjustments.
    #[serde(default = "default_base_leaf_gap")]
    pub base_leaf_gap: i32,

    /// Direction randomness before adjustments, in `[0, 1]`.
    #[serde(default = "default_base_randomness")]
    pub base_randomness: f64,

    /// Leaf pattern when no passive sets one.
    #[serde(default)]
    pub leaf_pattern: LeafPattern,

    /// Growth progress needed per stem step. At neutral speed a value of
    /// `1.0` means one step per growth tick.
    #[serde(default = "default_ticks_per_stage")]
    pub ticks_per_stage: f64,

    /// Consecutive blocked steps before the machine gives up.
    #[serde(default = "default_max_blocked_attempts")]
    pub max_blocked_attempts: u32,
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            base_min_stem: default_base_min_stem(),
            base_max_stem: default_base_max_stem(),
            base_leaf_gap: default_base_leaf_gap(),
            base_randomness: default_base_randomness(),
            leaf_pattern: LeafPattern::default(),
            ticks_per_stage: default_ticks_per_stage(),
            max_blocked_attempts: default_max_blocked_attempts(),
        }
    }
}

const fn default_base_min_stem() -> i32 {
    3
}

const fn default_base_max_stem() -> i32 {
    5
}

const fn default_base_leaf_gap() -> i32 {
    1
}

const fn default_base_randomness() -> f64 {
    0.1
}

const fn default_ticks_per_stage() -> f64 {
    1.0
}

const fn default_max_blocked_attempts() -> u32 {
    8
}
