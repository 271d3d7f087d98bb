//! Effect target that reports activations through tracing.
//!
//! The headless driver has no projectile or cloud systems, so every
//! activation is logged.

use tracing::info;
use verdant_genes::{Activation, ActiveBehavior, EffectTarget};

/// Logs each activation.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingTarget;

impl EffectTarget for LoggingTarget {
    fn activate(&mut self, activation: &Activation) {
        let payloads: Vec<&str> = activation.payloads.iter().map(|p| p.name.as_str()).collect();
        match activation.behavior {
            ActiveBehavior::SpawnFruit { fruit_count } => info!(
                organism_id = %activation.organism_id,
                slot = activation.slot_index,
                tick = activation.tick,
                fruit_count,
                "Fruit requested"
            ),
            ActiveBehavior::Projectile { base_damage, range } => info!(
                organism_id = %activation.organism_id,
                slot = activation.slot_index,
                tick = activation.tick,
                effect = activation.definition_name,
                damage = base_damage * activation.effect_multiplier,
                range,
                ?payloads,
                "Projectile launched"
            ),
            ActiveBehavior::Cloud {
                radius,
                duration_ticks,
            } => info!(
                organism_id = %activation.organism_id,
                slot = activation.slot_index,
                tick = activation.tick,
                effect = activation.definition_name,
                radius = radius * activation.effect_multiplier,
                duration_ticks,
                ?payloads,
                "Cloud released"
            ),
        }
    }
}
