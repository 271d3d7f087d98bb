//! Sequence slots and the organism runtime state.

use serde::{Deserialize, Serialize};
use verdant_types::OrganismId;

use crate::energy::EnergyEconomy;
use crate::instance::RuntimeEffectInstance;

/// One ordered position in an organism's active sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SequenceSlot {
    /// The active effect, if the slot is filled.
    pub active: Option<RuntimeEffectInstance>,
    /// Modifiers attached to the active, in application order.
    #[serde(default)]
    pub modifiers: Vec<RuntimeEffectInstance>,
    /// Payloads attached to the active, in delivery order.
    #[serde(default)]
    pub payloads: Vec<RuntimeEffectInstance>,
}

impl SequenceSlot {
    /// A slot holding `active` with no attachments.
    pub const fn with_active(active: RuntimeEffectInstance) -> Self {
        Self {
            active: Some(active),
            modifiers: Vec::new(),
            payloads: Vec::new(),
        }
    }

    /// Whether the slot holds an active effect.
    pub const fn has_content(&self) -> bool {
        self.active.is_some()
    }
}

/// The mutable aggregate for one organism: passives, sequence, energy, and
/// cycle timer.
///
/// The engine reads passives and slots; only the configuration assembly
/// process writes them. Energy and timers are engine-owned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganismRuntimeState {
    /// Owning organism.
    pub organism_id: OrganismId,
    /// Passive instances, bounded by `passive_slot_count`.
    pub passives: Vec<RuntimeEffectInstance>,
    /// Fixed number of passive slots.
    pub passive_slot_count: usize,
    /// Active sequence, in execution order.
    pub slots: Vec<SequenceSlot>,
    /// Energy pool.
    pub energy: EnergyEconomy,
    /// Ticks between cycle attempts.
    pub cycle_period_ticks: u32,
    /// Ticks until the next cycle attempt.
    pub cycle_ticks_remaining: u32,
}

impl OrganismRuntimeState {
    /// Slots that hold an active, with their indices.
    pub fn filled_slots(&self) -> impl Iterator<Item = (usize, &SequenceSlot)> {
        self.slots.iter().enumerate().filter(|(_, s)| s.has_content())
    }

    /// Count down the cycle timer. Returns `true` when a cycle is due, and
    /// resets the timer in that case.
    pub fn cycle_timer_tick(&mut self) -> bool {
        self.cycle_ticks_remaining = self.cycle_ticks_remaining.saturating_sub(1);
        if self.cycle_ticks_remaining > 0 {
            return false;
        }
        self.cycle_ticks_remaining = self.cycle_period_ticks.max(1);
        true
    }
}
