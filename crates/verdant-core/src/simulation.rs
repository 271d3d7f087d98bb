//! The simulation context and its tick entry points.
//!
//! The host delivers two independent signals per game tick:
//!
//! - [`Simulation::on_cycle_tick`] advances the tick counter, fires
//!   deferred slots that have come due, runs energy recharge, and runs a
//!   cycle for every organism whose cycle timer expires.
//! - [`Simulation::on_growth_tick`] advances every growing organism's
//!   growth state machine.
//!
//! Neither entry point fails. Problems are logged, surfaced as
//! [`EngineEvent`]s, and leave the organism doing nothing productive for
//! that tick.

use std::collections::BTreeMap;
use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{debug, info, warn};
use verdant_genes::executor::{self, CycleContext, CycleOutcome, SlotPreview};
use verdant_genes::{
    Activation, ActiveBehavior, ContinuationTable, EffectRegistry, EffectTarget, EnergyConfig,
    OrganismRuntimeState, RuntimeEffectInstance, SeedTemplate, SequenceSlot, SkippedSlot,
    WorldQuery,
};
use verdant_growth::{GrowthConfig, fruit};
use verdant_types::{CellKind, GridCoord, GrowthState, OrganismId};

use crate::clock::TickClock;
use crate::config::SimulationConfig;
use crate::error::SimulationError;
use crate::events::{EngineEvent, EventLog};
use crate::organism::Organism;
use crate::persistence;

/// Counts of what happened during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickSummary {
    /// Tick the summary describes.
    pub tick: u64,
    /// Cycles that paid and ran.
    pub cycles_completed: usize,
    /// Cycles that could not be paid for.
    pub cycles_aborted: usize,
    /// Slots dispatched, deferred ones included once they fire.
    pub slots_fired: usize,
    /// Slots parked behind a delay.
    pub slots_deferred: usize,
    /// Slots skipped by gates or configuration problems.
    pub slots_skipped: usize,
    /// Stem and leaf cells placed.
    pub cells_placed: usize,
    /// Fruit cells placed.
    pub fruit_placed: usize,
}

impl TickSummary {
    /// Add another summary's counts into this one.
    pub fn absorb(&mut self, other: &Self) {
        self.cycles_completed = self.cycles_completed.saturating_add(other.cycles_completed);
        self.cycles_aborted = self.cycles_aborted.saturating_add(other.cycles_aborted);
        self.slots_fired = self.slots_fired.saturating_add(other.slots_fired);
        self.slots_deferred = self.slots_deferred.saturating_add(other.slots_deferred);
        self.slots_skipped = self.slots_skipped.saturating_add(other.slots_skipped);
        self.cells_placed = self.cells_placed.saturating_add(other.cells_placed);
        self.fruit_placed = self.fruit_placed.saturating_add(other.fruit_placed);
    }
}

/// A set of organisms and the collaborators they share.
pub struct Simulation {
    registry: Arc<EffectRegistry>,
    world: Box<dyn WorldQuery>,
    target: Box<dyn EffectTarget>,
    energy_config: EnergyConfig,
    growth_config: GrowthConfig,
    default_cycle_period_ticks: u32,
    rng: SmallRng,
    clock: TickClock,
    organisms: BTreeMap<OrganismId, Organism>,
    continuations: ContinuationTable,
    events: EventLog,
}

impl Simulation {
    /// Create a simulation from its collaborators.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::Config`] if the configuration fails
    /// validation.
    pub fn new(
        config: &SimulationConfig,
        registry: Arc<EffectRegistry>,
        world: Box<dyn WorldQuery>,
        target: Box<dyn EffectTarget>,
    ) -> Result<Self, SimulationError> {
        config.validate()?;
        Ok(Self {
            registry,
            world,
            target,
            energy_config: config.energy.clone(),
            growth_config: config.growth.clone(),
            default_cycle_period_ticks: config.ticks.cycle_period_ticks,
            rng: SmallRng::seed_from_u64(config.world.seed),
            clock: TickClock::new(),
            organisms: BTreeMap::new(),
            continuations: ContinuationTable::new(),
            events: EventLog::default(),
        })
    }

    /// Create a simulation whose registry is built from `config.catalog`.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::Gene`] if the catalog is invalid, or
    /// [`SimulationError::Config`] if validation fails.
    pub fn from_config(
        config: &SimulationConfig,
        world: Box<dyn WorldQuery>,
        target: Box<dyn EffectTarget>,
    ) -> Result<Self, SimulationError> {
        let registry = EffectRegistry::new(config.catalog.iter().cloned())?;
        Self::new(config, Arc::new(registry), world, target)
    }

    // -----------------------------------------------------------------------
    // Organism management
    // -----------------------------------------------------------------------

    /// Instantiate a template and plant the result.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::Gene`] if the template is invalid.
    pub fn plant(&mut self, template: &SeedTemplate) -> Result<OrganismId, SimulationError> {
        let state = template.instantiate(
            &self.registry,
            &self.energy_config,
            self.default_cycle_period_ticks,
        )?;
        Ok(self.insert_organism(&template.name, state))
    }

    /// Plant an already assembled runtime state.
    ///
    /// An organism with the same id is replaced, and its pending deferred
    /// slots are dropped.
    pub fn insert_organism(&mut self, name: &str, state: OrganismRuntimeState) -> OrganismId {
        let organism = Organism::new(name, state, &self.registry, &self.growth_config, &mut self.rng);
        let id = organism.id();
        if organism.is_inert() {
            self.events.push(EngineEvent::ConfigurationWarning {
                organism_id: id,
                message: "no growth-relevant passive; organism is inert".to_owned(),
            });
        }
        if self.organisms.insert(id, organism).is_some() {
            self.continuations.cancel_organism(id);
        }
        info!(organism_id = %id, name, "Organism planted");
        id
    }

    /// Remove an organism, dropping its pending deferred slots.
    pub fn remove_organism(&mut self, organism_id: OrganismId) -> Option<Organism> {
        let removed = self.organisms.remove(&organism_id)?;
        let dropped = self.continuations.cancel_organism(organism_id);
        info!(%organism_id, dropped_continuations = dropped, "Organism removed");
        Some(removed)
    }

    /// Replace an organism's passives and sequence.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::UnknownOrganism`] for an unknown id.
    pub fn reconfigure(
        &mut self,
        organism_id: OrganismId,
        passives: Vec<RuntimeEffectInstance>,
        slots: Vec<SequenceSlot>,
    ) -> Result<(), SimulationError> {
        let organism = self
            .organisms
            .get_mut(&organism_id)
            .ok_or(SimulationError::UnknownOrganism { organism_id })?;
        organism.reconfigure(
            passives,
            slots,
            &self.registry,
            &self.growth_config,
            &mut self.rng,
        );
        Ok(())
    }

    /// Grow one fruit on request.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::UnknownOrganism`] for an unknown id.
    pub fn trigger_fruit(
        &mut self,
        organism_id: OrganismId,
    ) -> Result<Option<GridCoord>, SimulationError> {
        let organism = self
            .organisms
            .get_mut(&organism_id)
            .ok_or(SimulationError::UnknownOrganism { organism_id })?;
        let placed = fruit::place_fruit(organism.grid_mut(), &mut self.rng);
        if let Some(coord) = placed {
            self.events.push(EngineEvent::CellPlaced {
                organism_id,
                coord,
                kind: CellKind::Fruit,
            });
        }
        Ok(placed)
    }

    /// Remove a cell after the presentation layer despawned it.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::UnknownOrganism`] for an unknown id, or
    /// [`SimulationError::Growth`] for the seed or an empty coordinate.
    pub fn despawn_cell(
        &mut self,
        organism_id: OrganismId,
        coord: GridCoord,
    ) -> Result<CellKind, SimulationError> {
        let organism = self
            .organisms
            .get_mut(&organism_id)
            .ok_or(SimulationError::UnknownOrganism { organism_id })?;
        Ok(organism.grid_mut().remove(coord)?)
    }

    /// Serialize an organism's runtime state to a versioned save document.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::UnknownOrganism`] or
    /// [`SimulationError::Persistence`].
    pub fn save_organism(&self, organism_id: OrganismId) -> Result<String, SimulationError> {
        let organism = self
            .organisms
            .get(&organism_id)
            .ok_or(SimulationError::UnknownOrganism { organism_id })?;
        Ok(persistence::save_organism(organism.state())?)
    }

    /// Load a save document, migrating it if needed, and plant the result.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::Persistence`] if the document cannot be
    /// read.
    pub fn load_organism(&mut self, name: &str, document: &str) -> Result<OrganismId, SimulationError> {
        let state = persistence::load_organism(document)?;
        Ok(self.insert_organism(name, state))
    }

    // -----------------------------------------------------------------------
    // Tick entry points
    // -----------------------------------------------------------------------

    /// Deliver one cycle tick.
    pub fn on_cycle_tick(&mut self) -> TickSummary {
        let tick = match self.clock.advance() {
            Ok(tick) => tick,
            Err(err) => {
                warn!(%err, "Tick counter saturated");
                self.clock.tick()
            }
        };
        let mut summary = TickSummary {
            tick,
            ..TickSummary::default()
        };

        let context = CycleContext {
            registry: self.registry.as_ref(),
            world: self.world.as_ref(),
            tick,
        };

        for continuation in self.continuations.take_due(tick) {
            let Some(organism) = self.organisms.get_mut(&continuation.organism_id) else {
                debug!(
                    organism_id = %continuation.organism_id,
                    slot = continuation.slot_index,
                    "Deferred slot for removed organism dropped"
                );
                continue;
            };
            if let Some(activation) =
                executor::resume(organism.state(), &continuation, &context, self.target.as_mut())
            {
                apply_activation(organism, &activation, &mut self.rng, &mut self.events, &mut summary);
            }
        }

        for organism in self.organisms.values_mut() {
            if organism.is_inert() {
                continue;
            }
            if let Some(gained) = organism.recharge(context.world, self.energy_config.leaf_regen_bonus) {
                debug!(organism_id = %organism.id(), gained, "Energy recharged");
            }
            if !organism.state_mut().cycle_timer_tick() {
                continue;
            }
            let outcome = executor::run_cycle(
                organism.state_mut(),
                &context,
                self.target.as_mut(),
                &mut self.continuations,
            );
            record_outcome(
                organism,
                outcome,
                tick,
                &mut self.rng,
                &mut self.events,
                &mut summary,
            );
        }

        summary
    }

    /// Deliver one growth tick.
    pub fn on_growth_tick(&mut self) -> TickSummary {
        let mut summary = TickSummary {
            tick: self.clock.tick(),
            ..TickSummary::default()
        };
        for organism in self.organisms.values_mut() {
            if organism.is_inert() || organism.growth_state() == GrowthState::Complete {
                continue;
            }
            let organism_id = organism.id();
            let speed = organism.growth_speed(self.world.as_ref());
            let report = organism.growth_tick(speed, &mut self.rng);

            for (coord, kind) in report.placed {
                summary.cells_placed = summary.cells_placed.saturating_add(1);
                self.events.push(EngineEvent::CellPlaced {
                    organism_id,
                    coord,
                    kind,
                });
            }
            for conflict in report.conflicts {
                self.events.push(EngineEvent::PlacementRejected {
                    organism_id,
                    message: conflict.to_string(),
                });
            }
            if report.completed {
                self.events.push(EngineEvent::GrowthCompleted {
                    organism_id,
                    placed_stems: organism.growth().placed_stems(),
                });
            }
        }
        summary
    }

    /// Deliver a cycle tick followed by a growth tick.
    pub fn advance_tick(&mut self) -> TickSummary {
        let mut summary = self.on_cycle_tick();
        let growth = self.on_growth_tick();
        summary.absorb(&growth);
        summary
    }

    // -----------------------------------------------------------------------
    // Read accessors
    // -----------------------------------------------------------------------

    /// Current tick.
    pub const fn tick(&self) -> u64 {
        self.clock.tick()
    }

    /// The shared effect registry.
    pub fn registry(&self) -> &EffectRegistry {
        &self.registry
    }

    /// One organism.
    pub fn organism(&self, organism_id: OrganismId) -> Option<&Organism> {
        self.organisms.get(&organism_id)
    }

    /// Every organism, ordered by id.
    pub fn organisms(&self) -> impl Iterator<Item = &Organism> {
        self.organisms.values()
    }

    /// Number of organisms.
    pub fn organism_count(&self) -> usize {
        self.organisms.len()
    }

    /// Per-slot names and resolved costs, for UI previews.
    pub fn slot_previews(&self, organism_id: OrganismId) -> Option<Vec<SlotPreview>> {
        self.organisms
            .get(&organism_id)
            .map(|o| executor::preview_slots(o.state(), &self.registry))
    }

    /// Deferred slots not yet fired.
    pub fn pending_continuations(&self) -> usize {
        self.continuations.len()
    }

    /// Buffered events, oldest first.
    pub fn events(&self) -> &[EngineEvent] {
        self.events.as_slice()
    }

    /// Take every buffered event.
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        self.events.drain()
    }
}

fn push_skips(organism_id: OrganismId, skipped: Vec<SkippedSlot>, tick: u64, events: &mut EventLog) {
    for slot in skipped {
        events.push(EngineEvent::SlotSkipped {
            organism_id,
            slot_index: slot.slot_index,
            reason: slot.reason,
            tick,
        });
    }
}

fn record_outcome(
    organism: &mut Organism,
    outcome: CycleOutcome,
    tick: u64,
    rng: &mut SmallRng,
    events: &mut EventLog,
    summary: &mut TickSummary,
) {
    let organism_id = organism.id();
    match outcome {
        CycleOutcome::Completed(report) => {
            summary.cycles_completed = summary.cycles_completed.saturating_add(1);
            summary.slots_deferred = summary.slots_deferred.saturating_add(report.deferred.len());
            summary.slots_skipped = summary.slots_skipped.saturating_add(report.skipped.len());
            push_skips(organism_id, report.skipped, tick, events);
            for activation in &report.fired {
                apply_activation(organism, activation, rng, events, summary);
            }
        }
        CycleOutcome::Aborted {
            total_cost,
            available,
            skipped,
        } => {
            summary.cycles_aborted = summary.cycles_aborted.saturating_add(1);
            summary.slots_skipped = summary.slots_skipped.saturating_add(skipped.len());
            push_skips(organism_id, skipped, tick, events);
            events.push(EngineEvent::CycleAborted {
                organism_id,
                total_cost,
                available,
                tick,
            });
        }
    }
}

/// Report a fired slot and apply effects the engine owns itself.
fn apply_activation(
    organism: &mut Organism,
    activation: &Activation,
    rng: &mut SmallRng,
    events: &mut EventLog,
    summary: &mut TickSummary,
) {
    summary.slots_fired = summary.slots_fired.saturating_add(1);
    events.push(EngineEvent::SlotExecuted {
        organism_id: activation.organism_id,
        definition_id: activation.definition_id,
        definition_name: activation.definition_name.clone(),
        slot_index: activation.slot_index,
        tick: activation.tick,
    });

    if let ActiveBehavior::SpawnFruit { fruit_count } = activation.behavior {
        for _ in 0..organism.fruit_per_firing(fruit_count) {
            let Some(coord) = fruit::place_fruit(organism.grid_mut(), rng) else {
                break;
            };
            summary.fruit_placed = summary.fruit_placed.saturating_add(1);
            events.push(EngineEvent::CellPlaced {
                organism_id: activation.organism_id,
                coord,
                kind: CellKind::Fruit,
            });
        }
    }
}
