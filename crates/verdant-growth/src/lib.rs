//! Procedural growth for Verdant organisms.
//!
//! Each organism owns a small integer grid rooted at its seed. A growth
//! state machine extends a stem upward one cell per growth step, hangs
//! leaves beside it at a regular interval, and stops once the stem reaches
//! a length sampled when growth began. Fruit is placed separately, on
//! request.
//!
//! # Modules
//!
//! - [`config`] -- Base growth shape and cadence.
//! - [`direction`] -- Direction selection under a randomness parameter.
//! - [`error`] -- [`GrowthError`].
//! - [`fruit`] -- Fruit placement search.
//! - [`grid`] -- [`GrowthGrid`], coordinate to cell kind.
//! - [`machine`] -- [`GrowthMachine`], the `Growing`/`Complete` state machine.
//! - [`params`] -- [`GrowthParams`] derived from passive statistics.

pub mod config;
pub mod direction;
pub mod error;
pub mod fruit;
pub mod grid;
pub mod machine;
pub mod params;

pub use config::GrowthConfig;
pub use error::GrowthError;
pub use grid::GrowthGrid;
pub use machine::{GrowthMachine, GrowthTick};
pub use params::GrowthParams;
