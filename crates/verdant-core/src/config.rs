//! Configuration loading and typed config structures for Verdant.
//!
//! The canonical configuration lives in `verdant-config.yaml` at the
//! project root. Every section has defaults, so a missing file or a
//! partial one still produces a runnable simulation.

use std::path::Path;

use serde::Deserialize;
use verdant_genes::{EffectDefinition, EnergyConfig, SeedTemplate};
use verdant_growth::GrowthConfig;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// Values parsed but cannot drive a simulation.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// What is wrong.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `verdant-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// World-level settings.
    #[serde(default)]
    pub world: WorldConfig,

    /// Tick cadence.
    #[serde(default)]
    pub ticks: TickConfig,

    /// Energy economy.
    #[serde(default)]
    pub energy: EnergyConfig,

    /// Growth shape and cadence.
    #[serde(default)]
    pub growth: GrowthConfig,

    /// Effect definitions loaded into the registry.
    #[serde(default)]
    pub catalog: Vec<EffectDefinition>,

    /// Seed templates planted at startup.
    #[serde(default)]
    pub seeds: Vec<SeedTemplate>,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if validation fails.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if validation fails.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first problem.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ticks.cycle_period_ticks == 0 {
            return Err(invalid("ticks.cycle_period_ticks must be at least 1"));
        }
        if self.energy.recharge_period_ticks == 0 {
            return Err(invalid("energy.recharge_period_ticks must be at least 1"));
        }
        if self.energy.base_max_energy < 0.0 || self.energy.base_regen_per_period < 0.0 {
            return Err(invalid("energy values must not be negative"));
        }
        if self.growth.base_min_stem > self.growth.base_max_stem {
            return Err(invalid("growth.base_min_stem exceeds growth.base_max_stem"));
        }
        if self.growth.ticks_per_stage <= 0.0 {
            return Err(invalid("growth.ticks_per_stage must be positive"));
        }
        Ok(())
    }
}

fn invalid(reason: &str) -> ConfigError {
    ConfigError::Invalid {
        reason: reason.to_owned(),
    }
}

/// World-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldConfig {
    /// Human-readable simulation name.
    #[serde(default = "default_world_name")]
    pub name: String,

    /// Random seed for reproducibility.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            name: default_world_name(),
            seed: default_seed(),
        }
    }
}

/// Tick cadence configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TickConfig {
    /// Cycle ticks between cycle attempts for templates that do not set
    /// their own period.
    #[serde(default = "default_cycle_period_ticks")]
    pub cycle_period_ticks: u32,

    /// Ticks the engine binary runs before exiting.
    #[serde(default = "default_max_ticks")]
    pub max_ticks: u64,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            cycle_period_ticks: default_cycle_period_ticks(),
            max_ticks: default_max_ticks(),
        }
    }
}

fn default_world_name() -> String {
    "Verdant".to_owned()
}

const fn default_seed() -> u64 {
    42
}

const fn default_cycle_period_ticks() -> u32 {
    4
}

const fn default_max_ticks() -> u64 {
    100
}
