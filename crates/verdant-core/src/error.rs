//! Error types for the simulation context.

use verdant_types::OrganismId;

use crate::clock::ClockError;
use crate::config::ConfigError;
use crate::persistence::PersistenceError;

/// Errors surfaced by [`Simulation`](crate::simulation::Simulation)
/// management calls. The tick entry points never return these; they log
/// and degrade instead.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    /// No organism with this id.
    #[error("unknown organism {organism_id}")]
    UnknownOrganism {
        /// The id that was looked up.
        organism_id: OrganismId,
    },

    /// Assembly or catalog failure.
    #[error("gene error: {source}")]
    Gene {
        /// The underlying gene error.
        #[from]
        source: verdant_genes::GeneError,
    },

    /// Grid mutation failure.
    #[error("growth error: {source}")]
    Growth {
        /// The underlying growth error.
        #[from]
        source: verdant_growth::GrowthError,
    },

    /// Configuration failure.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ConfigError,
    },

    /// Clock failure.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: ClockError,
    },

    /// Save or load failure.
    #[error("persistence error: {source}")]
    Persistence {
        /// The underlying persistence error.
        #[from]
        source: PersistenceError,
    },
}
