//! Seed templates: declarative organism configurations.
//!
//! A template names effects by key or name. Instantiating it resolves every
//! reference against the registry and enforces the attachment rules, slot
//! capacities, passive-slot count, and stacking limits, producing an
//! [`OrganismRuntimeState`] the executor can trust.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;
use verdant_types::{DefinitionId, EffectCategory, OrganismId, StatTarget};

use crate::config::EnergyConfig;
use crate::definition::EffectDefinition;
use crate::energy::EnergyEconomy;
use crate::error::GeneError;
use crate::instance::RuntimeEffectInstance;
use crate::passive;
use crate::registry::EffectRegistry;
use crate::sequence::{OrganismRuntimeState, SequenceSlot};

/// One effect reference with its instance overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateEntry {
    /// Definition key or name.
    pub effect: String,
    /// Instance overrides such as `power_multiplier`.
    #[serde(default)]
    pub overrides: BTreeMap<String, f64>,
}

impl TemplateEntry {
    /// An entry with no overrides.
    pub fn named(effect: &str) -> Self {
        Self {
            effect: effect.to_owned(),
            overrides: BTreeMap::new(),
        }
    }
}

/// One sequence slot in a template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlotTemplate {
    /// The active, or `None` for an empty slot.
    #[serde(default)]
    pub active: Option<TemplateEntry>,
    /// Attached modifiers.
    #[serde(default)]
    pub modifiers: Vec<TemplateEntry>,
    /// Attached payloads.
    #[serde(default)]
    pub payloads: Vec<TemplateEntry>,
}

/// A declarative organism configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedTemplate {
    /// Display name.
    pub name: String,
    /// Passive effects.
    #[serde(default)]
    pub passives: Vec<TemplateEntry>,
    /// Active sequence, in order.
    #[serde(default)]
    pub sequence: Vec<SlotTemplate>,
    /// Number of passive slots.
    #[serde(default = "default_passive_slot_count")]
    pub passive_slot_count: usize,
    /// Ticks between cycles; falls back to the simulation default.
    #[serde(default)]
    pub cycle_period_ticks: Option<u32>,
}

const fn default_passive_slot_count() -> usize {
    3
}

fn bind<'r>(
    registry: &'r EffectRegistry,
    entry: &TemplateEntry,
    expected: EffectCategory,
) -> Result<(&'r EffectDefinition, RuntimeEffectInstance), GeneError> {
    let definition = registry
        .lookup(&entry.effect)
        .ok_or_else(|| GeneError::UnknownEffect {
            reference: entry.effect.clone(),
        })?;
    if definition.category() != expected {
        return Err(GeneError::WrongCategory {
            name: definition.name.clone(),
            expected,
            actual: definition.category(),
        });
    }
    let mut instance = RuntimeEffectInstance::new(definition);
    instance.overrides.clone_from(&entry.overrides);
    Ok((definition, instance))
}

fn bind_attachments(
    registry: &EffectRegistry,
    parent: &EffectDefinition,
    entries: &[TemplateEntry],
    category: EffectCategory,
    capacity: usize,
    slot: usize,
) -> Result<Vec<RuntimeEffectInstance>, GeneError> {
    if entries.len() > capacity {
        return Err(GeneError::SlotCapacityExceeded {
            slot,
            category,
            count: entries.len(),
            capacity,
        });
    }
    entries
        .iter()
        .map(|entry| {
            let (definition, instance) = bind(registry, entry, category)?;
            if !definition.can_attach_to(parent) {
                return Err(GeneError::IncompatibleAttachment {
                    child: definition.name.clone(),
                    parent: parent.name.clone(),
                });
            }
            Ok(instance)
        })
        .collect()
}

impl SeedTemplate {
    /// Parse a template from YAML.
    ///
    /// # Errors
    ///
    /// Returns [`GeneError::CatalogYaml`] if the YAML does not match.
    pub fn from_yaml(yaml: &str) -> Result<Self, GeneError> {
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Resolve and validate the template into a fresh organism.
    ///
    /// # Errors
    ///
    /// Returns the first rule the template breaks: an unknown reference, a
    /// wrong category, an incompatible attachment, an over-full slot, too
    /// many passives, or a passive stacked past its limit.
    pub fn instantiate(
        &self,
        registry: &EffectRegistry,
        energy: &EnergyConfig,
        default_cycle_period_ticks: u32,
    ) -> Result<OrganismRuntimeState, GeneError> {
        if self.passives.len() > self.passive_slot_count {
            return Err(GeneError::PassiveSlotsExceeded {
                count: self.passives.len(),
                capacity: self.passive_slot_count,
            });
        }

        let mut stacks: BTreeMap<DefinitionId, usize> = BTreeMap::new();
        let mut passives = Vec::with_capacity(self.passives.len());
        for entry in &self.passives {
            let (definition, instance) = bind(registry, entry, EffectCategory::Passive)?;
            let count = stacks.entry(definition.id).or_insert(0);
            *count = count.saturating_add(1);
            let limit = definition.as_passive().and_then(|p| p.stack_limit());
            if let Some(max_stacks) = limit {
                if u32::try_from(*count).map_or(true, |c| c > max_stacks) {
                    return Err(GeneError::StackLimitExceeded {
                        name: definition.name.clone(),
                        count: *count,
                        max_stacks,
                    });
                }
            }
            passives.push(instance);
        }

        let mut slots = Vec::with_capacity(self.sequence.len());
        for (index, slot) in self.sequence.iter().enumerate() {
            let Some(active_entry) = slot.active.as_ref() else {
                slots.push(SequenceSlot::default());
                continue;
            };
            let (active, active_instance) = bind(registry, active_entry, EffectCategory::Active)?;
            let config = active
                .as_active()
                .map(|p| p.slot_config)
                .unwrap_or_default();
            let modifiers = bind_attachments(
                registry,
                active,
                &slot.modifiers,
                EffectCategory::Modifier,
                config.modifier_slots,
                index,
            )?;
            let payloads = bind_attachments(
                registry,
                active,
                &slot.payloads,
                EffectCategory::Payload,
                config.payload_slots,
                index,
            )?;
            slots.push(SequenceSlot {
                active: Some(active_instance),
                modifiers,
                payloads,
            });
        }

        let stats = passive::aggregate(registry, &passives);
        let period = self
            .cycle_period_ticks
            .unwrap_or(default_cycle_period_ticks)
            .max(1);
        let state = OrganismRuntimeState {
            organism_id: OrganismId::new(),
            passives,
            passive_slot_count: self.passive_slot_count,
            slots,
            energy: EnergyEconomy::from_config(energy, stats.multiplier(StatTarget::EnergyStorage)),
            cycle_period_ticks: period,
            cycle_ticks_remaining: period,
        };
        debug!(
            template = self.name,
            organism_id = %state.organism_id,
            passives = state.passives.len(),
            slots = state.slots.len(),
            "Template instantiated"
        );
        Ok(state)
    }
}
