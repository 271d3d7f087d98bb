//! The contract effects fire through.
//!
//! Projectiles, clouds, and visuals live in other systems. When a slot
//! executes, the engine hands an [`Activation`] to an [`EffectTarget`] and
//! does not care how it is resolved.

use serde::{Deserialize, Serialize};
use verdant_types::{DefinitionId, OrganismId, PayloadKind};

use crate::definition::ActiveBehavior;

/// A resolved payload riding on an activation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayloadActivation {
    /// Payload definition key.
    pub definition_id: DefinitionId,
    /// Payload definition name.
    pub name: String,
    /// What the payload delivers.
    pub kind: PayloadKind,
    /// Final potency after instance and effect multipliers.
    pub potency: f64,
}

/// One slot firing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activation {
    /// Organism that fired.
    pub organism_id: OrganismId,
    /// Slot that fired.
    pub slot_index: usize,
    /// Active definition key.
    pub definition_id: DefinitionId,
    /// Active definition name.
    pub definition_name: String,
    /// What the active does.
    pub behavior: ActiveBehavior,
    /// Strength multiplier from behavior modifiers.
    pub effect_multiplier: f64,
    /// Attached payloads, in slot order.
    pub payloads: Vec<PayloadActivation>,
    /// Tick at which the slot fired.
    pub tick: u64,
}

/// A collaborator that resolves activations.
pub trait EffectTarget {
    /// Resolve one activation.
    fn activate(&mut self, activation: &Activation);
}

/// Discards every activation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTarget;

impl EffectTarget for NullTarget {
    fn activate(&mut self, _activation: &Activation) {}
}

/// Keeps every activation, in firing order.
#[derive(Debug, Clone, Default)]
pub struct RecordingTarget {
    /// Activations received so far.
    pub activations: Vec<Activation>,
}

impl EffectTarget for RecordingTarget {
    fn activate(&mut self, activation: &Activation) {
        self.activations.push(activation.clone());
    }
}
