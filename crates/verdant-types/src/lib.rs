//! Shared type definitions for the Verdant plant behavior engine.
//!
//! This crate holds the vocabulary every other crate speaks: identifiers,
//! effect categories and stat targets, grid coordinates, and cell kinds.
//! It carries no behavior beyond small conversions and lookups.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for organisms and effect definitions.
//! - [`enums`] -- Effect categories, stat targets, modifier/payload kinds,
//!   cell kinds, growth directions, and leaf patterns.
//! - [`coord`] -- [`GridCoord`], the integer coordinate of a growth grid.

pub mod coord;
pub mod enums;
pub mod ids;

pub use coord::GridCoord;
pub use enums::{
    CellKind, EffectCategory, GrowthDirection, GrowthState, LeafPattern, LeafSide, ModifierKind,
    PayloadKind, StatTarget,
};
pub use ids::{DefinitionId, OrganismId};
