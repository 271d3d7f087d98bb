//! Events emitted by the engine.
//!
//! Presentation and UI layers drain these after each tick: slot highlights,
//! cell spawning, and configuration warnings all come through here.

use serde::Serialize;
use verdant_genes::SkipReason;
use verdant_types::{CellKind, DefinitionId, GridCoord, OrganismId};

/// Something observable that happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum EngineEvent {
    /// A slot dispatched its active effect.
    SlotExecuted {
        /// Organism that fired.
        organism_id: OrganismId,
        /// Active definition key.
        definition_id: DefinitionId,
        /// Active definition name.
        definition_name: String,
        /// Slot that fired.
        slot_index: usize,
        /// Tick it fired on.
        tick: u64,
    },
    /// A slot was left out of a cycle.
    SlotSkipped {
        /// Organism.
        organism_id: OrganismId,
        /// Slot.
        slot_index: usize,
        /// Why.
        reason: SkipReason,
        /// Tick.
        tick: u64,
    },
    /// A cycle could not be paid for.
    CycleAborted {
        /// Organism.
        organism_id: OrganismId,
        /// Summed cost of the eligible slots.
        total_cost: f64,
        /// Energy available.
        available: f64,
        /// Tick.
        tick: u64,
    },
    /// An organism is misconfigured and will stay inert.
    ConfigurationWarning {
        /// Organism.
        organism_id: OrganismId,
        /// Description.
        message: String,
    },
    /// A cell appeared on an organism's grid.
    CellPlaced {
        /// Organism.
        organism_id: OrganismId,
        /// Where.
        coord: GridCoord,
        /// What.
        kind: CellKind,
    },
    /// A placement was refused because the coordinate was taken.
    PlacementRejected {
        /// Organism.
        organism_id: OrganismId,
        /// Description of the conflict.
        message: String,
    },
    /// An organism finished growing.
    GrowthCompleted {
        /// Organism.
        organism_id: OrganismId,
        /// Stems placed.
        placed_stems: u32,
    },
}

impl EngineEvent {
    /// The organism the event concerns.
    pub const fn organism_id(&self) -> OrganismId {
        match self {
            Self::SlotExecuted { organism_id, .. }
            | Self::SlotSkipped { organism_id, .. }
            | Self::CycleAborted { organism_id, .. }
            | Self::ConfigurationWarning { organism_id, .. }
            | Self::CellPlaced { organism_id, .. }
            | Self::PlacementRejected { organism_id, .. }
            | Self::GrowthCompleted { organism_id, .. } => *organism_id,
        }
    }
}

/// Events buffered until the host drains them.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<EngineEvent>,
}

impl EventLog {
    /// Record an event.
    pub fn push(&mut self, event: EngineEvent) {
        self.events.push(event);
    }

    /// Events recorded so far, oldest first.
    pub fn as_slice(&self) -> &[EngineEvent] {
        &self.events
    }

    /// Take every recorded event.
    pub fn drain(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    /// Number of buffered events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether nothing is buffered.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
