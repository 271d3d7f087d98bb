//! Simulation context and tick entry points for the Verdant plant behavior
//! engine.
//!
//! A [`Simulation`] owns a set of organisms and everything they share: the
//! effect registry, the world query surface, the effect dispatch target,
//! the random source, and the table of deferred slot executions. Nothing
//! is global, so independent simulations coexist freely.
//!
//! # Modules
//!
//! - [`clock`] -- Tick counter.
//! - [`config`] -- Loading `verdant-config.yaml` into [`SimulationConfig`].
//! - [`error`] -- [`SimulationError`].
//! - [`events`] -- [`EngineEvent`]s emitted for UI and presentation layers.
//! - [`organism`] -- [`Organism`]: runtime state, grid, growth, statistics.
//! - [`persistence`] -- Versioned save documents and migrations.
//! - [`simulation`] -- [`Simulation`] and its tick entry points.
//!
//! [`SimulationConfig`]: config::SimulationConfig
//! [`SimulationError`]: error::SimulationError
//! [`EngineEvent`]: events::EngineEvent
//! [`Organism`]: organism::Organism
//! [`Simulation`]: simulation::Simulation

pub mod clock;
pub mod config;
pub mod error;
pub mod events;
pub mod organism;
pub mod persistence;
pub mod simulation;

pub use simulation::{Simulation, TickSummary};
pub use verdant_genes::{EffectTarget, UniformWorld, WorldQuery};
