//! Energy tuning for organisms.
//!
//! Mirrors the `energy` section of `verdant-config.yaml`. Every field has a
//! default, so a partial or missing section still yields a working economy.

use serde::Deserialize;

/// Energy economy configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EnergyConfig {
    /// Maximum energy before the `EnergyStorage` multiplier is applied.
    #[serde(default = "default_base_max_energy")]
    pub base_max_energy: f64,

    /// Energy restored per recharge period before multipliers.
    #[serde(default = "default_base_regen_per_period")]
    pub base_regen_per_period: f64,

    /// Ticks between recharge pulses.
    #[serde(default = "default_recharge_period_ticks")]
    pub recharge_period_ticks: u32,

    /// Extra regen per placed leaf cell.
    #[serde(default)]
    pub leaf_regen_bonus: f64,

    /// Fraction of maximum energy a freshly planted organism starts with.
    #[serde(default = "default_starting_energy_fraction")]
    pub starting_energy_fraction: f64,
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self {
            base_max_energy: default_base_max_energy(),
            base_regen_per_period: default_base_regen_per_period(),
            recharge_period_ticks: default_recharge_period_ticks(),
            leaf_regen_bonus: 0.0,
            starting_energy_fraction: default_starting_energy_fraction(),
        }
    }
}

const fn default_base_max_energy() -> f64 {
    100.0
}

const fn default_base_regen_per_period() -> f64 {
    10.0
}

const fn default_recharge_period_ticks() -> u32 {
    3
}

const fn default_starting_energy_fraction() -> f64 {
    1.0
}
