//! The active sequence executor.
//!
//! A cycle runs in three steps, always in ascending slot order:
//!
//! 1. **Accumulation** -- resolve every filled slot, validate its
//!    attachments, evaluate gating modifiers, and fold cost modifiers into
//!    the slot's cost. A slot whose gate fails is skipped and not charged.
//! 2. **Affordability gate** -- if the organism cannot pay the summed cost
//!    the cycle aborts with energy untouched. Otherwise the whole cost is
//!    spent before anything fires.
//! 3. **Execution** -- run pre-execution hooks, then either dispatch the
//!    active or park a continuation for its delay, then run post-execution
//!    hooks once it has dispatched.
//!
//! Slot contents are only ever read here.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use verdant_types::{EffectCategory, OrganismId};

use crate::definition::{ActiveParams, EffectDefinition, ModifierParams, PayloadParams};
use crate::dispatch::{Activation, EffectTarget, PayloadActivation};
use crate::instance::{POTENCY_MULTIPLIER, RuntimeEffectInstance};
use crate::modifier::{ExecutionContext, TriggerContext};
use crate::registry::EffectRegistry;
use crate::schedule::{Continuation, ContinuationTable};
use crate::sequence::{OrganismRuntimeState, SequenceSlot};
use crate::world::WorldQuery;

/// Shared, read-only inputs to a cycle.
pub struct CycleContext<'a> {
    /// Effect catalog.
    pub registry: &'a EffectRegistry,
    /// Environment, for gating modifiers.
    pub world: &'a dyn WorldQuery,
    /// Current tick.
    pub tick: u64,
}

/// Why a filled slot did not run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SkipReason {
    /// The active's definition could not be resolved.
    MissingActive,
    /// The slot's active resolved to a non-active definition.
    NotAnActive {
        /// Category the definition actually has.
        found: EffectCategory,
    },
    /// An attachment cannot attach to this active.
    IncompatibleAttachment {
        /// Name of the offending attachment.
        name: String,
    },
    /// More attachments than the active allows.
    CapacityExceeded {
        /// Which attachment list overflowed.
        category: EffectCategory,
    },
    /// No payloads attached to an active that needs one.
    EmptyPayload,
    /// A gating modifier's condition did not hold.
    TriggerNotMet {
        /// Name of the modifier that blocked the slot.
        modifier: String,
    },
}

impl SkipReason {
    /// Whether this skip stems from invalid configuration.
    pub const fn is_configuration_error(&self) -> bool {
        !matches!(self, Self::TriggerNotMet { .. })
    }
}

/// A slot skipped during accumulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedSlot {
    /// Index of the slot.
    pub slot_index: usize,
    /// Why it was skipped.
    pub reason: SkipReason,
}

/// Result of a completed cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CycleReport {
    /// Energy spent.
    pub total_cost: f64,
    /// Activations dispatched this tick, in slot order.
    pub fired: Vec<Activation>,
    /// Slots parked behind an execution delay.
    pub deferred: Vec<usize>,
    /// Slots that did not run.
    pub skipped: Vec<SkippedSlot>,
}

/// Result of [`run_cycle`].
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// Cost was paid and every eligible slot fired or was deferred.
    Completed(CycleReport),
    /// The organism could not pay; nothing was spent or fired.
    Aborted {
        /// Summed cost of the eligible slots.
        total_cost: f64,
        /// Energy available.
        available: f64,
        /// Slots skipped before the gate.
        skipped: Vec<SkippedSlot>,
    },
}

/// A slot's resolved cost for UI previews.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotPreview {
    /// Index of the slot.
    pub slot_index: usize,
    /// Resolved active name, if the slot is filled.
    pub active_name: Option<String>,
    /// Cost after modifiers, if the slot is valid.
    pub cost: Option<f64>,
    /// Configuration problem, if any.
    pub problem: Option<SkipReason>,
}

/// A filled slot with every reference resolved and validated.
struct ResolvedSlot<'r, 's> {
    index: usize,
    active: &'r EffectDefinition,
    params: &'r ActiveParams,
    modifiers: Vec<(&'r EffectDefinition, &'r ModifierParams, &'s RuntimeEffectInstance)>,
    payloads: Vec<(&'r EffectDefinition, &'r PayloadParams, &'s RuntimeEffectInstance)>,
}

impl<'r, 's> ResolvedSlot<'r, 's> {
    fn resolve(
        index: usize,
        slot: &'s SequenceSlot,
        registry: &'r EffectRegistry,
    ) -> Result<Self, SkipReason> {
        let Some(active_instance) = slot.active.as_ref() else {
            return Err(SkipReason::MissingActive);
        };
        let active = registry.resolve(active_instance);
        if active.is_placeholder() {
            return Err(SkipReason::MissingActive);
        }
        let Some(params) = active.as_active() else {
            return Err(SkipReason::NotAnActive {
                found: active.category(),
            });
        };

        if slot.modifiers.len() > params.slot_config.modifier_slots {
            return Err(SkipReason::CapacityExceeded {
                category: EffectCategory::Modifier,
            });
        }
        if slot.payloads.len() > params.slot_config.payload_slots {
            return Err(SkipReason::CapacityExceeded {
                category: EffectCategory::Payload,
            });
        }

        let mut modifiers = Vec::with_capacity(slot.modifiers.len());
        for instance in &slot.modifiers {
            let definition = registry.resolve(instance);
            if definition.is_placeholder() {
                continue;
            }
            match definition.as_modifier() {
                Some(m) if definition.can_attach_to(active) => {
                    modifiers.push((definition, m, instance));
                }
                _ => {
                    return Err(SkipReason::IncompatibleAttachment {
                        name: definition.name.clone(),
                    });
                }
            }
        }

        let mut payloads = Vec::with_capacity(slot.payloads.len());
        for instance in &slot.payloads {
            let definition = registry.resolve(instance);
            if definition.is_placeholder() {
                continue;
            }
            match definition.as_payload() {
                Some(p) if definition.can_attach_to(active) => {
                    payloads.push((definition, p, instance));
                }
                _ => {
                    return Err(SkipReason::IncompatibleAttachment {
                        name: definition.name.clone(),
                    });
                }
            }
        }

        if !params.accepts_payload_count(payloads.len()) {
            return Err(SkipReason::EmptyPayload);
        }

        Ok(Self {
            index,
            active,
            params,
            modifiers,
            payloads,
        })
    }

    /// Left-fold of every modifier over the base cost.
    fn cost(&self) -> f64 {
        self.modifiers
            .iter()
            .fold(self.params.base_energy_cost, |cost, (_, m, instance)| {
                m.modify_energy_cost(cost, instance)
            })
            .max(0.0)
    }

    /// Name of the first gating modifier whose condition fails.
    fn blocking_gate(&self, context: &TriggerContext<'_>) -> Option<&'r str> {
        self.modifiers
            .iter()
            .find(|(_, m, instance)| {
                m.kind.gates_slot() && !m.check_trigger_condition(instance, context)
            })
            .map(|(d, _, _)| d.name.as_str())
    }

    fn pre_execution(&self, context: &mut ExecutionContext) {
        for (_, m, instance) in &self.modifiers {
            m.pre_execution(instance, context);
        }
    }

    /// Dispatch the active and run post-execution hooks.
    fn fire(
        &self,
        context: &ExecutionContext,
        tick: u64,
        target: &mut dyn EffectTarget,
    ) -> Activation {
        let payloads = self
            .payloads
            .iter()
            .map(|(definition, p, instance)| PayloadActivation {
                definition_id: definition.id,
                name: definition.name.clone(),
                kind: p.kind,
                potency: p.base_potency
                    * instance.override_or(POTENCY_MULTIPLIER, 1.0)
                    * context.effect_multiplier,
            })
            .collect();
        let activation = Activation {
            organism_id: context.organism_id,
            slot_index: self.index,
            definition_id: self.active.id,
            definition_name: self.active.name.clone(),
            behavior: self.params.behavior,
            effect_multiplier: context.effect_multiplier,
            payloads,
            tick,
        };
        target.activate(&activation);
        for (_, m, instance) in &self.modifiers {
            m.post_execution(instance, context);
        }
        activation
    }
}

fn log_skip(organism_id: OrganismId, skipped: &SkippedSlot) {
    if skipped.reason.is_configuration_error() {
        warn!(
            %organism_id,
            slot = skipped.slot_index,
            reason = ?skipped.reason,
            "Slot skipped: invalid configuration"
        );
    } else {
        debug!(
            %organism_id,
            slot = skipped.slot_index,
            reason = ?skipped.reason,
            "Slot skipped: trigger not met"
        );
    }
}

/// Run one cycle for `state`.
///
/// Never panics and never partially spends: the result is either a
/// completed cycle with its full cost paid, or an abort with energy
/// unchanged.
pub fn run_cycle(
    state: &mut OrganismRuntimeState,
    context: &CycleContext<'_>,
    target: &mut dyn EffectTarget,
    continuations: &mut ContinuationTable,
) -> CycleOutcome {
    let organism_id = state.organism_id;
    let trigger_context = TriggerContext {
        organism_id,
        energy_fraction: state.energy.fraction(),
        world: context.world,
    };

    // Accumulation.
    let mut skipped = Vec::new();
    let mut eligible = Vec::new();
    for (index, slot) in state.slots.iter().enumerate() {
        if !slot.has_content() {
            continue;
        }
        let outcome = ResolvedSlot::resolve(index, slot, context.registry).and_then(|resolved| {
            match resolved.blocking_gate(&trigger_context) {
                Some(modifier) => Err(SkipReason::TriggerNotMet {
                    modifier: modifier.to_owned(),
                }),
                None => Ok(resolved),
            }
        });
        match outcome {
            Ok(resolved) => {
                let cost = resolved.cost();
                eligible.push((resolved, cost));
            }
            Err(reason) => {
                let entry = SkippedSlot {
                    slot_index: index,
                    reason,
                };
                log_skip(organism_id, &entry);
                skipped.push(entry);
            }
        }
    }
    let total_cost: f64 = eligible.iter().map(|(_, cost)| cost).sum();

    // Affordability gate.
    if let Err(err) = state.energy.spend(total_cost) {
        debug!(%organism_id, tick = context.tick, %err, "Cycle aborted");
        return CycleOutcome::Aborted {
            total_cost,
            available: state.energy.current(),
            skipped,
        };
    }

    // Execution.
    let mut report = CycleReport {
        total_cost,
        skipped,
        ..CycleReport::default()
    };
    for (resolved, _) in &eligible {
        let mut exec = ExecutionContext::new(organism_id, resolved.index);
        resolved.pre_execution(&mut exec);

        let delay = resolved.params.execution_delay_ticks;
        if delay > 0 {
            let due = context.tick.saturating_add(u64::from(delay));
            continuations.schedule(
                due,
                Continuation {
                    organism_id,
                    slot_index: resolved.index,
                    definition_id: resolved.active.id,
                    effect_multiplier: exec.effect_multiplier,
                    scheduled_at: context.tick,
                },
            );
            debug!(%organism_id, slot = resolved.index, due, "Slot deferred");
            report.deferred.push(resolved.index);
            continue;
        }

        report.fired.push(resolved.fire(&exec, context.tick, target));
    }

    debug!(
        %organism_id,
        tick = context.tick,
        total_cost,
        fired = report.fired.len(),
        deferred = report.deferred.len(),
        skipped = report.skipped.len(),
        "Cycle completed"
    );
    CycleOutcome::Completed(report)
}

/// Dispatch a continuation whose delay has elapsed.
///
/// The slot is resolved again against the current state. Returns `None`
/// if the slot has been emptied, no longer validates, or now holds a
/// different active than the one paid for; energy was paid at accumulation
/// and is not refunded.
pub fn resume(
    state: &OrganismRuntimeState,
    continuation: &Continuation,
    context: &CycleContext<'_>,
    target: &mut dyn EffectTarget,
) -> Option<Activation> {
    let slot = state.slots.get(continuation.slot_index)?;
    match ResolvedSlot::resolve(continuation.slot_index, slot, context.registry) {
        Ok(resolved) if resolved.active.id != continuation.definition_id => {
            warn!(
                organism_id = %state.organism_id,
                slot = continuation.slot_index,
                paid = %continuation.definition_id,
                current = %resolved.active.id,
                "Deferred slot holds a different active, dropped"
            );
            None
        }
        Ok(resolved) => {
            let exec = ExecutionContext {
                organism_id: state.organism_id,
                slot_index: continuation.slot_index,
                effect_multiplier: continuation.effect_multiplier,
            };
            Some(resolved.fire(&exec, context.tick, target))
        }
        Err(reason) => {
            warn!(
                organism_id = %state.organism_id,
                slot = continuation.slot_index,
                ?reason,
                "Deferred slot no longer valid, dropped"
            );
            None
        }
    }
}

/// Resolved per-slot costs for UI previews.
///
/// Gating conditions depend on the world and are not evaluated here.
pub fn preview_slots(state: &OrganismRuntimeState, registry: &EffectRegistry) -> Vec<SlotPreview> {
    state
        .slots
        .iter()
        .enumerate()
        .map(|(index, slot)| {
            let active_name = slot
                .active
                .as_ref()
                .map(|instance| registry.resolve(instance).name.clone());
            if !slot.has_content() {
                return SlotPreview {
                    slot_index: index,
                    active_name,
                    cost: None,
                    problem: None,
                };
            }
            match ResolvedSlot::resolve(index, slot, registry) {
                Ok(resolved) => SlotPreview {
                    slot_index: index,
                    active_name,
                    cost: Some(resolved.cost()),
                    problem: None,
                },
                Err(reason) => SlotPreview {
                    slot_index: index,
                    active_name,
                    cost: None,
                    problem: Some(reason),
                },
            }
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use verdant_types::{DefinitionId, ModifierKind, PayloadKind};

    use super::*;
    use crate::definition::{ActiveBehavior, EffectParams, SlotConfig};
    use crate::dispatch::RecordingTarget;
    use crate::energy::EnergyEconomy;
    use crate::world::UniformWorld;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn definition(name: &str, params: EffectParams) -> EffectDefinition {
        EffectDefinition {
            id: DefinitionId::new(),
            name: name.to_owned(),
            description: String::new(),
            tier: 0,
            version: 1,
            params,
        }
    }

    fn active(name: &str, cost: f64, delay: u32, can_execute_empty: bool) -> EffectDefinition {
        definition(
            name,
            EffectParams::Active(ActiveParams {
                base_energy_cost: cost,
                execution_delay_ticks: delay,
                slot_config: SlotConfig {
                    modifier_slots: 2,
                    payload_slots: 1,
                },
                can_execute_empty,
                behavior: ActiveBehavior::Projectile {
                    base_damage: 3.0,
                    range: 4.0,
                },
            }),
        )
    }

    fn modifier(name: &str, kind: ModifierKind, power: f64, cost_scale: f64) -> EffectDefinition {
        definition(
            name,
            EffectParams::Modifier(ModifierParams {
                kind,
                power,
                cost_scale,
            }),
        )
    }

    fn payload(name: &str, potency: f64) -> EffectDefinition {
        definition(
            name,
            EffectParams::Payload(PayloadParams {
                kind: PayloadKind::Substance,
                base_potency: potency,
            }),
        )
    }

    fn state(energy: f64, slots: Vec<SequenceSlot>) -> OrganismRuntimeState {
        OrganismRuntimeState {
            organism_id: OrganismId::new(),
            passives: Vec::new(),
            passive_slot_count: 3,
            slots,
            energy: EnergyEconomy::new(100.0, 10.0, 3).with_current(energy),
            cycle_period_ticks: 1,
            cycle_ticks_remaining: 1,
        }
    }

    fn slot(active: &EffectDefinition, modifiers: &[&EffectDefinition]) -> SequenceSlot {
        SequenceSlot {
            active: Some(RuntimeEffectInstance::new(active)),
            modifiers: modifiers.iter().map(|d| RuntimeEffectInstance::new(d)).collect(),
            payloads: Vec::new(),
        }
    }

    struct Fixture {
        registry: EffectRegistry,
        world: UniformWorld,
        target: RecordingTarget,
        continuations: ContinuationTable,
    }

    impl Fixture {
        fn new(definitions: Vec<EffectDefinition>) -> Self {
            Self {
                registry: EffectRegistry::new(definitions).unwrap(),
                world: UniformWorld::default(),
                target: RecordingTarget::default(),
                continuations: ContinuationTable::new(),
            }
        }

        fn run(&mut self, state: &mut OrganismRuntimeState, tick: u64) -> CycleOutcome {
            let context = CycleContext {
                registry: &self.registry,
                world: &self.world,
                tick,
            };
            run_cycle(state, &context, &mut self.target, &mut self.continuations)
        }
    }

    #[test]
    fn unaffordable_cycle_aborts_without_spending() {
        let shot = active("Shot", 20.0, 0, true);
        let mut fx = Fixture::new(vec![shot.clone()]);
        let mut s = state(15.0, vec![slot(&shot, &[])]);
        let outcome = fx.run(&mut s, 1);
        assert!(matches!(outcome, CycleOutcome::Aborted { total_cost, .. } if close(total_cost, 20.0)));
        assert!(close(s.energy.current(), 15.0));
        assert!(fx.target.activations.is_empty());
    }

    #[test]
    fn completed_cycle_spends_once_and_fires_in_order() {
        let a = active("A", 10.0, 0, true);
        let b = active("B", 5.0, 0, true);
        let mut fx = Fixture::new(vec![a.clone(), b.clone()]);
        let mut s = state(50.0, vec![slot(&b, &[]), SequenceSlot::default(), slot(&a, &[])]);
        let outcome = fx.run(&mut s, 1);
        assert!(matches!(outcome, CycleOutcome::Completed(ref r) if close(r.total_cost, 15.0)));
        assert!(close(s.energy.current(), 35.0));
        let order: Vec<usize> = fx.target.activations.iter().map(|a| a.slot_index).collect();
        assert_eq!(order, vec![0, 2]);
    }

    #[test]
    fn cost_modifiers_fold_left_in_slot_order() {
        let shot = active("Shot", 20.0, 0, true);
        let cheap = modifier("Cost Reduction", ModifierKind::Cost, 0.75, 1.0);
        let over = modifier("Overcharge", ModifierKind::Behavior, 1.4, 1.5);
        let fx = Fixture::new(vec![shot.clone(), cheap.clone(), over.clone()]);
        let s = state(100.0, vec![slot(&shot, &[&cheap, &over])]);
        let preview = preview_slots(&s, &fx.registry);
        assert!(preview
            .first()
            .and_then(|p| p.cost)
            .is_some_and(|c| close(c, 20.0 * 0.75 * 1.5)));
    }

    #[test]
    fn cost_grows_with_each_amplifying_cost_modifier() {
        let shot = active("Shot", 20.0, 0, true);
        let pricey = modifier("Pricey", ModifierKind::Cost, 1.2, 1.0);
        let fx = Fixture::new(vec![shot.clone(), pricey.clone()]);
        let mut previous = 0.0;
        for count in 0..=2 {
            let mods: Vec<&EffectDefinition> = std::iter::repeat_n(&pricey, count).collect();
            let s = state(100.0, vec![slot(&shot, &mods)]);
            let cost = preview_slots(&s, &fx.registry)
                .first()
                .and_then(|p| p.cost)
                .unwrap_or(f64::NAN);
            assert!(cost >= previous);
            previous = cost;
        }
    }

    #[test]
    fn failed_trigger_skips_slot_without_charge() {
        let shot = active("Shot", 20.0, 0, true);
        let proximity = modifier("Proximity", ModifierKind::Trigger, 2.0, 1.0);
        let mut fx = Fixture::new(vec![shot.clone(), proximity.clone()]);
        let mut s = state(100.0, vec![slot(&shot, &[&proximity]), slot(&shot, &[])]);
        let outcome = fx.run(&mut s, 1);
        let CycleOutcome::Completed(report) = outcome else {
            panic!("expected completed cycle");
        };
        assert!(close(report.total_cost, 20.0));
        assert_eq!(report.skipped.len(), 1);
        assert!(matches!(
            report.skipped.first().map(|s| &s.reason),
            Some(SkipReason::TriggerNotMet { .. })
        ));
        assert!(close(s.energy.current(), 80.0));

        fx.world.target_distance = Some(1.0);
        let outcome = fx.run(&mut s, 2);
        assert!(matches!(outcome, CycleOutcome::Completed(ref r) if r.fired.len() == 2));
    }

    #[test]
    fn empty_payload_active_is_skipped_with_warning() {
        let spit = active("Spit", 20.0, 0, false);
        let mut fx = Fixture::new(vec![spit.clone()]);
        let mut s = state(100.0, vec![slot(&spit, &[])]);
        let CycleOutcome::Completed(report) = fx.run(&mut s, 1) else {
            panic!("expected completed cycle");
        };
        assert!(report.fired.is_empty());
        assert!(matches!(
            report.skipped.first().map(|s| &s.reason),
            Some(SkipReason::EmptyPayload)
        ));
        assert!(close(s.energy.current(), 100.0));
    }

    #[test]
    fn payload_potency_includes_effect_multiplier() {
        let spit = active("Spit", 10.0, 0, false);
        let over = modifier("Overcharge", ModifierKind::Behavior, 1.4, 1.5);
        let poison = payload("Poison", 2.0);
        let mut fx = Fixture::new(vec![spit.clone(), over.clone(), poison.clone()]);
        let mut filled = slot(&spit, &[&over]);
        filled.payloads.push(
            RuntimeEffectInstance::new(&poison).with_override(POTENCY_MULTIPLIER, 1.5),
        );
        let mut s = state(100.0, vec![filled]);
        let _ = fx.run(&mut s, 1);
        let fired = fx.target.activations.first();
        assert!(fired.is_some_and(|a| close(a.effect_multiplier, 1.4)));
        assert!(fired
            .and_then(|a| a.payloads.first())
            .is_some_and(|p| close(p.potency, 2.0 * 1.5 * 1.4)));
        assert!(close(s.energy.current(), 85.0));
    }

    #[test]
    fn incompatible_attachment_skips_slot() {
        let shot = active("Shot", 10.0, 0, true);
        let other = active("Other", 10.0, 0, true);
        let mut fx = Fixture::new(vec![shot.clone(), other.clone()]);
        let mut s = state(100.0, vec![slot(&shot, &[&other])]);
        let CycleOutcome::Completed(report) = fx.run(&mut s, 1) else {
            panic!("expected completed cycle");
        };
        assert!(matches!(
            report.skipped.first().map(|s| &s.reason),
            Some(SkipReason::IncompatibleAttachment { .. })
        ));
    }

    #[test]
    fn missing_active_is_inert() {
        let shot = active("Shot", 10.0, 0, true);
        let mut fx = Fixture::new(Vec::new());
        let mut s = state(100.0, vec![slot(&shot, &[])]);
        let CycleOutcome::Completed(report) = fx.run(&mut s, 1) else {
            panic!("expected completed cycle");
        };
        assert_eq!(
            report.skipped.first().map(|s| s.reason.clone()),
            Some(SkipReason::MissingActive)
        );
        assert!(close(s.energy.current(), 100.0));
    }

    #[test]
    fn delayed_slot_fires_exactly_k_ticks_later() {
        let slow = active("Slow", 10.0, 3, true);
        let fast = active("Fast", 10.0, 0, true);
        let mut fx = Fixture::new(vec![slow.clone(), fast.clone()]);
        let mut s = state(100.0, vec![slot(&slow, &[]), slot(&fast, &[])]);
        let CycleOutcome::Completed(report) = fx.run(&mut s, 10) else {
            panic!("expected completed cycle");
        };
        assert_eq!(report.deferred, vec![0]);
        assert_eq!(report.fired.len(), 1);
        assert!(close(s.energy.current(), 80.0));

        assert!(fx.continuations.take_due(12).is_empty());
        let due = fx.continuations.take_due(13);
        assert_eq!(due.len(), 1);
        let context = CycleContext {
            registry: &fx.registry,
            world: &fx.world,
            tick: 13,
        };
        let fired: Vec<Activation> = due
            .iter()
            .filter_map(|c| resume(&s, c, &context, &mut fx.target))
            .collect();
        assert_eq!(fired.first().map(|a| (a.slot_index, a.tick)), Some((0, 13)));
    }

    #[test]
    fn resume_tolerates_emptied_slot() {
        let slow = active("Slow", 10.0, 2, true);
        let mut fx = Fixture::new(vec![slow.clone()]);
        let mut s = state(100.0, vec![slot(&slow, &[])]);
        let _ = fx.run(&mut s, 0);
        s.slots.clear();
        let context = CycleContext {
            registry: &fx.registry,
            world: &fx.world,
            tick: 2,
        };
        let due = fx.continuations.take_due(2);
        assert!(due
            .iter()
            .all(|c| resume(&s, c, &context, &mut fx.target).is_none()));
    }

    #[test]
    fn resume_refuses_swapped_active() {
        let slow = active("Slow", 5.0, 2, true);
        let big = active("Big", 80.0, 0, true);
        let mut fx = Fixture::new(vec![slow.clone(), big.clone()]);
        let mut s = state(100.0, vec![slot(&slow, &[])]);
        assert!(matches!(fx.run(&mut s, 0), CycleOutcome::Completed(ref r) if r.deferred == vec![0]));
        assert!(close(s.energy.current(), 95.0));

        s.slots = vec![slot(&big, &[])];
        let context = CycleContext {
            registry: &fx.registry,
            world: &fx.world,
            tick: 2,
        };
        let due = fx.continuations.take_due(2);
        assert_eq!(due.first().map(|c| c.definition_id), Some(slow.id));
        assert!(due
            .iter()
            .all(|c| resume(&s, c, &context, &mut fx.target).is_none()));
        assert!(fx.target.activations.is_empty());
        assert!(close(s.energy.current(), 95.0));
    }

    #[test]
    fn condition_modifier_reads_energy_before_spend() {
        let shot = active("Shot", 60.0, 0, true);
        let reserve = modifier("Reserve", ModifierKind::Condition, 0.7, 1.0);
        let mut fx = Fixture::new(vec![shot.clone(), reserve.clone()]);
        let mut s = state(80.0, vec![slot(&shot, &[&reserve])]);
        assert!(matches!(fx.run(&mut s, 1), CycleOutcome::Completed(ref r) if r.fired.len() == 1));
        assert!(close(s.energy.current(), 20.0));
        assert!(matches!(fx.run(&mut s, 2), CycleOutcome::Completed(ref r) if r.fired.is_empty()));
    }
}
