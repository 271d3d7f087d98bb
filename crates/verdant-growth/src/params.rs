//! Growth parameters derived from passive statistics.

use serde::{Deserialize, Serialize};
use verdant_genes::PassiveStats;
use verdant_types::LeafPattern;

use crate::config::GrowthConfig;

/// Effective shape of one organism's growth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthParams {
    /// Shortest stem, at least 1.
    pub min_stem: u32,
    /// Longest stem, at least `min_stem`.
    pub max_stem: u32,
    /// Bare stems between leaf placements.
    pub leaf_gap: u32,
    /// Direction randomness in `[0, 1]`.
    pub randomness: f64,
    /// Leaf arrangement.
    pub leaf_pattern: LeafPattern,
}

impl GrowthParams {
    /// Apply passive growth-shape totals to the configured bases.
    pub fn from_stats(stats: &PassiveStats, config: &GrowthConfig) -> Self {
        let min = config
            .base_min_stem
            .saturating_add(stats.stem_length_delta)
            .max(1);
        let max = config
            .base_max_stem
            .saturating_add(stats.stem_length_delta)
            .max(min);
        let gap = config
            .base_leaf_gap
            .saturating_add(stats.leaf_gap_delta)
            .max(0);
        let min_stem = u32::try_from(min).unwrap_or(1);
        Self {
            min_stem,
            max_stem: u32::try_from(max).unwrap_or(min_stem),
            leaf_gap: u32::try_from(gap).unwrap_or(0),
            randomness: (config.base_randomness + stats.randomness_delta).clamp(0.0, 1.0),
            leaf_pattern: stats.leaf_pattern.unwrap_or(config.leaf_pattern),
        }
    }

    /// Fixed parameters, for hosts and tests that bypass passives.
    pub const fn fixed(
        min_stem: u32,
        max_stem: u32,
        leaf_gap: u32,
        randomness: f64,
        leaf_pattern: LeafPattern,
    ) -> Self {
        Self {
            min_stem,
            max_stem,
            leaf_gap,
            randomness,
            leaf_pattern,
        }
    }
}
