//! Effect definitions and the active sequence executor for Verdant.
//!
//! A plant's behavior is composed from effects. Passive effects fold into
//! derived statistics. Active effects sit in an ordered sequence of slots,
//! each carrying attached modifiers and payloads, and run once per cycle
//! when the organism can pay their combined energy cost.
//!
//! # Modules
//!
//! - [`config`] -- Energy tuning loaded from `verdant-config.yaml`.
//! - [`definition`] -- Immutable [`EffectDefinition`]s and their parameters.
//! - [`dispatch`] -- The [`EffectTarget`] contract effects fire through.
//! - [`energy`] -- [`EnergyEconomy`]: current/max energy and recharge.
//! - [`error`] -- [`GeneError`].
//! - [`executor`] -- The two-phase cycle: accumulation, gate, execution.
//! - [`instance`] -- [`RuntimeEffectInstance`] with per-instance overrides.
//! - [`modifier`] -- Built-in modifier behaviors per [`ModifierKind`].
//! - [`passive`] -- The passive stat aggregator.
//! - [`registry`] -- [`EffectRegistry`] with placeholder fallback.
//! - [`schedule`] -- Tick-keyed continuations for delayed slots.
//! - [`sequence`] -- [`SequenceSlot`] and [`OrganismRuntimeState`].
//! - [`template`] -- Seed templates and configuration assembly.
//! - [`world`] -- [`WorldQuery`], the environmental surface.
//!
//! [`ModifierKind`]: verdant_types::ModifierKind

pub mod config;
pub mod definition;
pub mod dispatch;
pub mod energy;
pub mod error;
pub mod executor;
pub mod instance;
pub mod modifier;
pub mod passive;
pub mod registry;
pub mod schedule;
pub mod sequence;
pub mod template;
pub mod world;

pub use config::EnergyConfig;
pub use definition::{
    ActiveBehavior, ActiveParams, EffectDefinition, EffectParams, GrowthShape, ModifierParams,
    PassiveParams, PayloadParams, SlotConfig,
};
pub use dispatch::{Activation, EffectTarget, NullTarget, PayloadActivation, RecordingTarget};
pub use energy::EnergyEconomy;
pub use error::GeneError;
pub use executor::{CycleContext, CycleOutcome, CycleReport, SkipReason, SkippedSlot, SlotPreview};
pub use instance::RuntimeEffectInstance;
pub use passive::PassiveStats;
pub use registry::EffectRegistry;
pub use schedule::{Continuation, ContinuationTable};
pub use sequence::{OrganismRuntimeState, SequenceSlot};
pub use template::{SeedTemplate, SlotTemplate, TemplateEntry};
pub use world::{UniformWorld, WorldQuery};
