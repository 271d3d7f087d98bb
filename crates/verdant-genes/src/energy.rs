//! Energy economy: current and maximum energy plus periodic recharge.
//!
//! Energy is never negative. A spend that cannot be covered is refused
//! whole; there are no partial spends.

use serde::{Deserialize, Serialize};

use crate::config::EnergyConfig;
use crate::error::GeneError;

/// An organism's energy pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyEconomy {
    current: f64,
    max: f64,
    base_max: f64,
    base_regen_per_period: f64,
    recharge_ticks_remaining: u32,
    recharge_period_ticks: u32,
}

impl EnergyEconomy {
    /// Create a pool from configuration and the organism's
    /// `EnergyStorage` multiplier.
    pub fn from_config(config: &EnergyConfig, storage_multiplier: f64) -> Self {
        let mut economy = Self::new(
            config.base_max_energy,
            config.base_regen_per_period,
            config.recharge_period_ticks,
        );
        economy.recompute_max(storage_multiplier);
        economy.current = (economy.max * config.starting_energy_fraction.clamp(0.0, 1.0)).max(0.0);
        economy
    }

    /// Create a full pool with an explicit maximum.
    ///
    /// A zero recharge period is treated as one tick.
    pub fn new(base_max: f64, base_regen_per_period: f64, recharge_period_ticks: u32) -> Self {
        let base_max = base_max.max(0.0);
        let period = recharge_period_ticks.max(1);
        Self {
            current: base_max,
            max: base_max,
            base_max,
            base_regen_per_period: base_regen_per_period.max(0.0),
            recharge_ticks_remaining: period,
            recharge_period_ticks: period,
        }
    }

    /// Set current energy, clamped to `[0, max]`.
    #[must_use]
    pub fn with_current(mut self, current: f64) -> Self {
        self.current = current.clamp(0.0, self.max);
        self
    }

    /// Current energy.
    pub const fn current(&self) -> f64 {
        self.current
    }

    /// Maximum energy.
    pub const fn max(&self) -> f64 {
        self.max
    }

    /// Current energy as a fraction of maximum; `0.0` when max is zero.
    pub fn fraction(&self) -> f64 {
        if self.max > 0.0 { self.current / self.max } else { 0.0 }
    }

    /// Ticks until the next recharge pulse.
    pub const fn recharge_ticks_remaining(&self) -> u32 {
        self.recharge_ticks_remaining
    }

    /// Ticks between recharge pulses.
    pub const fn recharge_period_ticks(&self) -> u32 {
        self.recharge_period_ticks
    }

    /// Progress toward the next pulse in `[0, 1]`, for progress bars.
    pub fn recharge_progress(&self) -> f64 {
        let remaining = f64::from(self.recharge_ticks_remaining);
        let period = f64::from(self.recharge_period_ticks.max(1));
        (1.0 - remaining / period).clamp(0.0, 1.0)
    }

    /// Whether `cost` can be paid from current energy.
    pub fn can_afford(&self, cost: f64) -> bool {
        self.current >= cost
    }

    /// Deduct `cost`.
    ///
    /// # Errors
    ///
    /// Returns [`GeneError::InsufficientEnergy`] and leaves energy untouched
    /// if the cost cannot be paid.
    pub fn spend(&mut self, cost: f64) -> Result<(), GeneError> {
        if !self.can_afford(cost) {
            return Err(GeneError::InsufficientEnergy {
                required: cost,
                available: self.current,
            });
        }
        self.current = (self.current - cost.max(0.0)).max(0.0);
        Ok(())
    }

    /// Add energy, clamped to maximum. Returns the amount actually added.
    pub fn add(&mut self, amount: f64) -> f64 {
        let before = self.current;
        self.current = (self.current + amount.max(0.0)).min(self.max);
        self.current - before
    }

    /// Regen for one pulse given the organism's multipliers.
    ///
    /// `bonus` is added to the base before multiplying (leaf
    /// photosynthesis).
    pub fn regen_amount(&self, generation_multiplier: f64, terrain_multiplier: f64, bonus: f64) -> f64 {
        ((self.base_regen_per_period + bonus) * generation_multiplier * terrain_multiplier).max(0.0)
    }

    /// Advance the recharge countdown by one tick.
    ///
    /// When the countdown reaches zero, `regen` is added (up to maximum),
    /// the countdown resets, and the amount gained is returned.
    pub fn on_tick(&mut self, regen: f64) -> Option<f64> {
        self.recharge_ticks_remaining = self.recharge_ticks_remaining.saturating_sub(1);
        if self.recharge_ticks_remaining > 0 {
            return None;
        }
        self.recharge_ticks_remaining = self.recharge_period_ticks;
        Some(self.add(regen))
    }

    /// Recompute maximum from the `EnergyStorage` multiplier, clamping
    /// current energy to the new maximum.
    pub fn recompute_max(&mut self, storage_multiplier: f64) {
        self.max = (self.base_max * storage_multiplier).max(0.0);
        self.current = self.current.min(self.max);
    }
}
