//! One planted organism.

use rand::Rng;
use tracing::warn;
use verdant_genes::passive::{self, PassiveStats};
use verdant_genes::{
    EffectRegistry, EnergyEconomy, OrganismRuntimeState, RuntimeEffectInstance, SequenceSlot,
    WorldQuery,
};
use verdant_growth::{GrowthConfig, GrowthGrid, GrowthMachine, GrowthParams};
use verdant_types::{CellKind, GrowthState, OrganismId, StatTarget};

/// An organism: its runtime state plus everything derived from it.
#[derive(Debug, Clone)]
pub struct Organism {
    name: String,
    state: OrganismRuntimeState,
    stats: PassiveStats,
    grid: GrowthGrid,
    growth: GrowthMachine,
    inert: bool,
}

impl Organism {
    /// Wrap a runtime state, deriving statistics and starting growth.
    ///
    /// An organism whose passives include nothing growth-relevant is inert:
    /// it neither grows nor runs cycles.
    pub fn new<R: Rng + ?Sized>(
        name: &str,
        state: OrganismRuntimeState,
        registry: &EffectRegistry,
        growth_config: &GrowthConfig,
        rng: &mut R,
    ) -> Self {
        let stats = passive::aggregate(registry, &state.passives);
        let inert = !stats.has_growth_marker;
        let growth = if inert {
            warn!(
                organism_id = %state.organism_id,
                name,
                "Organism has no growth-relevant passive, staying inert"
            );
            GrowthMachine::dormant()
        } else {
            GrowthMachine::new(GrowthParams::from_stats(&stats, growth_config), growth_config, rng)
        };
        let mut organism = Self {
            name: name.to_owned(),
            state,
            stats,
            grid: GrowthGrid::new(),
            growth,
            inert,
        };
        organism.apply_storage();
        organism
    }

    /// Replace passives and slots after an edit, then re-derive.
    ///
    /// Maximum energy and growth shape are recomputed; a growth machine
    /// already underway keeps its sampled target.
    pub fn reconfigure<R: Rng + ?Sized>(
        &mut self,
        passives: Vec<RuntimeEffectInstance>,
        slots: Vec<SequenceSlot>,
        registry: &EffectRegistry,
        growth_config: &GrowthConfig,
        rng: &mut R,
    ) {
        self.state.passives = passives;
        self.state.slots = slots;
        self.stats = passive::aggregate(registry, &self.state.passives);
        let was_inert = self.inert;
        self.inert = !self.stats.has_growth_marker;
        let params = GrowthParams::from_stats(&self.stats, growth_config);
        if was_inert && !self.inert {
            self.growth = GrowthMachine::new(params, growth_config, rng);
        } else {
            self.growth.set_params(params);
        }
        self.apply_storage();
    }

    fn apply_storage(&mut self) {
        let storage = self.stats.multiplier(StatTarget::EnergyStorage);
        self.state.energy.recompute_max(storage);
    }

    /// Organism id.
    pub const fn id(&self) -> OrganismId {
        self.state.organism_id
    }

    /// Template name the organism was planted from.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runtime state.
    pub const fn state(&self) -> &OrganismRuntimeState {
        &self.state
    }

    pub(crate) fn state_mut(&mut self) -> &mut OrganismRuntimeState {
        &mut self.state
    }

    /// Derived passive statistics.
    pub const fn stats(&self) -> &PassiveStats {
        &self.stats
    }

    /// The growth grid.
    pub const fn grid(&self) -> &GrowthGrid {
        &self.grid
    }

    pub(crate) fn grid_mut(&mut self) -> &mut GrowthGrid {
        &mut self.grid
    }

    /// Growth machine.
    pub const fn growth(&self) -> &GrowthMachine {
        &self.growth
    }

    /// Growing or complete.
    pub const fn growth_state(&self) -> GrowthState {
        self.growth.state()
    }

    /// Whether the organism is inert for misconfiguration.
    pub const fn is_inert(&self) -> bool {
        self.inert
    }

    /// Energy pool.
    pub const fn energy(&self) -> &EnergyEconomy {
        &self.state.energy
    }

    /// Current energy.
    pub const fn current_energy(&self) -> f64 {
        self.state.energy.current()
    }

    /// Maximum energy.
    pub const fn max_energy(&self) -> f64 {
        self.state.energy.max()
    }

    /// Progress toward the next recharge pulse, in `[0, 1]`.
    pub fn recharge_progress(&self) -> f64 {
        self.state.energy.recharge_progress()
    }

    /// The active sequence, in order.
    pub fn slots(&self) -> &[SequenceSlot] {
        &self.state.slots
    }

    /// Advance the recharge countdown, folding in generation, terrain, and
    /// leaf photosynthesis. Returns energy gained on a pulse.
    pub fn recharge(&mut self, world: &dyn WorldQuery, leaf_regen_bonus: f64) -> Option<f64> {
        let leaves = u32::try_from(self.grid.count(CellKind::Leaf)).unwrap_or(u32::MAX);
        let regen = self.state.energy.regen_amount(
            self.stats.multiplier(StatTarget::EnergyGeneration),
            world.energy_recharge_multiplier(self.id()),
            leaf_regen_bonus * f64::from(leaves),
        );
        self.state.energy.on_tick(regen)
    }

    /// Growth speed this tick: the `GrowthSpeed` multiplier times terrain.
    pub fn growth_speed(&self, world: &dyn WorldQuery) -> f64 {
        self.stats.multiplier(StatTarget::GrowthSpeed) * world.growth_speed_multiplier(self.id())
    }

    /// Fruit cells per firing of a fruiting active, after `FruitYield`.
    pub fn fruit_per_firing(&self, fruit_count: u32) -> u32 {
        let scaled = (f64::from(fruit_count) * self.stats.multiplier(StatTarget::FruitYield))
            .round()
            .max(0.0);
        // Saturating float-to-int conversion.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let count = scaled.min(f64::from(u32::MAX)) as u32;
        count
    }

    pub(crate) fn growth_tick<R: Rng + ?Sized>(
        &mut self,
        speed: f64,
        rng: &mut R,
    ) -> verdant_growth::GrowthTick {
        self.growth.tick(&mut self.grid, speed, rng)
    }
}
