//! Headless driver for the Verdant plant behavior engine.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `verdant-config.yaml`
//! 3. Build the simulation from the configured catalog
//! 4. Plant every configured seed template
//! 5. Deliver `ticks.max_ticks` cycle and growth ticks
//! 6. Log the final state of every organism

mod error;
mod target;

use std::path::Path;

use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use verdant_core::config::SimulationConfig;
use verdant_core::{Simulation, TickSummary, UniformWorld};

use crate::error::EngineError;
use crate::target::LoggingTarget;

/// Path of the configuration file, relative to the working directory.
const CONFIG_PATH: &str = "verdant-config.yaml";

fn main() -> Result<(), EngineError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("verdant-engine starting");

    let config = load_config()?;
    info!(
        world_name = config.world.name,
        seed = config.world.seed,
        catalog_size = config.catalog.len(),
        seed_templates = config.seeds.len(),
        max_ticks = config.ticks.max_ticks,
        "Configuration loaded"
    );

    let mut simulation = Simulation::from_config(
        &config,
        Box::new(UniformWorld::default()),
        Box::new(LoggingTarget::default()),
    )?;

    for template in &config.seeds {
        let organism_id = simulation.plant(template)?;
        info!(%organism_id, template = template.name, "Seed planted");
    }

    let mut totals = TickSummary::default();
    for _ in 0..config.ticks.max_ticks {
        let summary = simulation.advance_tick();
        totals.absorb(&summary);
        totals.tick = summary.tick;
        for event in simulation.drain_events() {
            match serde_json::to_string(&event) {
                Ok(json) => debug!(tick = summary.tick, event = json, "Engine event"),
                Err(err) => debug!(tick = summary.tick, %err, "Unserializable event"),
            }
        }
    }

    for organism in simulation.organisms() {
        info!(
            organism_id = %organism.id(),
            name = organism.name(),
            growth = ?organism.growth_state(),
            inert = organism.is_inert(),
            cells = organism.grid().len(),
            energy = organism.current_energy(),
            max_energy = organism.max_energy(),
            "Final organism state"
        );
    }

    info!(
        ticks = totals.tick,
        cycles_completed = totals.cycles_completed,
        cycles_aborted = totals.cycles_aborted,
        slots_fired = totals.slots_fired,
        slots_skipped = totals.slots_skipped,
        cells_placed = totals.cells_placed,
        fruit_placed = totals.fruit_placed,
        pending_continuations = simulation.pending_continuations(),
        "verdant-engine shutdown complete"
    );

    Ok(())
}

/// Load the simulation configuration from [`CONFIG_PATH`], falling back to
/// defaults when the file is absent.
fn load_config() -> Result<SimulationConfig, EngineError> {
    let config_path = Path::new(CONFIG_PATH);
    if config_path.exists() {
        Ok(SimulationConfig::from_file(config_path)?)
    } else {
        info!("Config file not found, using defaults");
        Ok(SimulationConfig::default())
    }
}
