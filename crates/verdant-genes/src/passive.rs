//! Passive stat aggregation.
//!
//! Folds an organism's passive instances into one multiplier per
//! [`StatTarget`] plus the summed growth-shape adjustments. Pure read: the
//! passive list is trusted to be valid already (stacking limits are
//! enforced when the organism is assembled, not here).
//!
//! For each stat, additive entries contribute `value - 1` to a sum and the
//! rest multiply into a product:
//!
//! ```text
//! multiplier = (1 + Σ(additive - 1)) * Π(multiplicative)
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use verdant_types::{LeafPattern, StatTarget};

use crate::instance::RuntimeEffectInstance;
use crate::registry::EffectRegistry;

/// Derived statistics for one organism.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PassiveStats {
    multipliers: BTreeMap<StatTarget, f64>,
    /// Sum of all stem-length deltas.
    pub stem_length_delta: i32,
    /// Sum of all leaf-gap deltas.
    pub leaf_gap_delta: i32,
    /// Sum of all randomness deltas.
    pub randomness_delta: f64,
    /// Leaf pattern set by the last passive that sets one.
    pub leaf_pattern: Option<LeafPattern>,
    /// Whether any passive makes the organism eligible to grow.
    pub has_growth_marker: bool,
    /// Passives with `StatTarget::None`, kept for decorative logic.
    pub unique_effects: Vec<String>,
}

impl PassiveStats {
    /// Multiplier for `stat`; `1.0` when nothing targets it.
    pub fn multiplier(&self, stat: StatTarget) -> f64 {
        self.multipliers.get(&stat).copied().unwrap_or(1.0)
    }
}

#[derive(Debug, Clone, Copy)]
struct Buckets {
    additive: f64,
    product: f64,
}

impl Default for Buckets {
    fn default() -> Self {
        Self {
            additive: 0.0,
            product: 1.0,
        }
    }
}

impl Buckets {
    fn add(&mut self, value: f64, additive: bool) {
        if additive {
            self.additive += value - 1.0;
        } else {
            self.product *= value;
        }
    }

    fn finish(self) -> f64 {
        (1.0 + self.additive) * self.product
    }
}

/// Combine `(value, stacks_additively)` entries for a single stat.
pub fn combine(entries: impl IntoIterator<Item = (f64, bool)>) -> f64 {
    let mut buckets = Buckets::default();
    for (value, additive) in entries {
        buckets.add(value, additive);
    }
    buckets.finish()
}

/// Aggregate every passive instance into derived statistics.
///
/// Instances that resolve to a non-passive definition, or to the
/// placeholder, contribute nothing.
pub fn aggregate(registry: &EffectRegistry, passives: &[RuntimeEffectInstance]) -> PassiveStats {
    let mut buckets: BTreeMap<StatTarget, Buckets> = BTreeMap::new();
    let mut stats = PassiveStats::default();

    for instance in passives {
        let definition = registry.resolve(instance);
        let Some(params) = definition.as_passive() else {
            continue;
        };
        if definition.is_placeholder() {
            continue;
        }

        stats.has_growth_marker |= params.is_growth_relevant();
        if let Some(shape) = params.growth {
            stats.stem_length_delta = stats.stem_length_delta.saturating_add(shape.stem_length_delta);
            stats.leaf_gap_delta = stats.leaf_gap_delta.saturating_add(shape.leaf_gap_delta);
            stats.randomness_delta += shape.randomness_delta;
            if shape.leaf_pattern.is_some() {
                stats.leaf_pattern = shape.leaf_pattern;
            }
        }

        if params.stat_target == StatTarget::None {
            stats.unique_effects.push(definition.name.clone());
            continue;
        }

        let value = params.base_value * instance.power_multiplier();
        buckets
            .entry(params.stat_target)
            .or_default()
            .add(value, params.stacks_additively);
    }

    stats.multipliers = buckets
        .into_iter()
        .map(|(stat, b)| (stat, b.finish()))
        .collect();
    stats
}
