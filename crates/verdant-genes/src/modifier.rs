//! Built-in modifier behaviors.
//!
//! Each [`ModifierKind`] acts through one or more of four hooks:
//!
//! | Kind        | Cost                          | Gate                         | Pre-execution            |
//! |-------------|-------------------------------|------------------------------|--------------------------|
//! | `Cost`      | `cost * power * efficiency`   | --                           | --                       |
//! | `Trigger`   | --                            | target within `power` tiles  | --                       |
//! | `Behavior`  | `cost * cost_scale`           | --                           | multiplier `*= power`    |
//! | `Condition` | --                            | energy fraction `>= power`   | --                       |
//!
//! `power` is further scaled by the instance's power multiplier for every
//! kind except `Cost`, which uses the `efficiency` override instead.

use tracing::trace;
use verdant_types::{ModifierKind, OrganismId};

use crate::definition::ModifierParams;
use crate::instance::{EFFICIENCY, RuntimeEffectInstance};
use crate::world::WorldQuery;

/// What a gating modifier may inspect during accumulation.
pub struct TriggerContext<'a> {
    /// Organism being evaluated.
    pub organism_id: OrganismId,
    /// Energy fraction before this cycle's spend.
    pub energy_fraction: f64,
    /// Environment.
    pub world: &'a dyn WorldQuery,
}

/// Per-slot state threaded through the execution hooks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExecutionContext {
    /// Organism executing.
    pub organism_id: OrganismId,
    /// Slot executing.
    pub slot_index: usize,
    /// Strength multiplier applied to the active and its payloads.
    pub effect_multiplier: f64,
}

impl ExecutionContext {
    /// A neutral context for one slot.
    pub const fn new(organism_id: OrganismId, slot_index: usize) -> Self {
        Self {
            organism_id,
            slot_index,
            effect_multiplier: 1.0,
        }
    }
}

impl ModifierParams {
    fn scaled_power(&self, instance: &RuntimeEffectInstance) -> f64 {
        self.power * instance.power_multiplier()
    }

    /// Fold this modifier into the running cost of its active.
    ///
    /// Never returns a negative cost.
    pub fn modify_energy_cost(&self, cost: f64, instance: &RuntimeEffectInstance) -> f64 {
        let modified = match self.kind {
            ModifierKind::Cost => cost * self.power * instance.override_or(EFFICIENCY, 1.0),
            ModifierKind::Behavior => cost * self.cost_scale,
            ModifierKind::Trigger | ModifierKind::Condition => cost,
        };
        modified.max(0.0)
    }

    /// Whether the slot may run this cycle as far as this modifier cares.
    pub fn check_trigger_condition(
        &self,
        instance: &RuntimeEffectInstance,
        context: &TriggerContext<'_>,
    ) -> bool {
        match self.kind {
            ModifierKind::Trigger => context
                .world
                .has_target_within(context.organism_id, self.scaled_power(instance)),
            ModifierKind::Condition => context.energy_fraction >= self.scaled_power(instance),
            ModifierKind::Cost | ModifierKind::Behavior => true,
        }
    }

    /// Hook run before the active dispatches.
    pub fn pre_execution(&self, instance: &RuntimeEffectInstance, context: &mut ExecutionContext) {
        if self.kind == ModifierKind::Behavior {
            context.effect_multiplier *= self.scaled_power(instance);
        }
    }

    /// Hook run after the active dispatches.
    pub fn post_execution(&self, instance: &RuntimeEffectInstance, context: &ExecutionContext) {
        trace!(
            organism_id = %context.organism_id,
            slot = context.slot_index,
            modifier = instance.definition_name,
            kind = ?self.kind,
            "Modifier post-execution"
        );
    }
}
