//! Error types for effect definitions, assembly, and energy accounting.

use verdant_types::{DefinitionId, EffectCategory};

/// Errors raised while loading catalogs, assembling organisms, or spending
/// energy.
///
/// None of these are fatal to the host: the cycle entry points turn them
/// into logged, inert outcomes.
#[derive(Debug, thiserror::Error)]
pub enum GeneError {
    /// Two catalog entries share an identifier.
    #[error("duplicate effect definition id {id} ({name})")]
    DuplicateDefinition {
        /// The repeated identifier.
        id: DefinitionId,
        /// Name of the second definition with that identifier.
        name: String,
    },

    /// A template referenced an effect the registry does not contain.
    #[error("unknown effect '{reference}'")]
    UnknownEffect {
        /// The name or id as written in the template.
        reference: String,
    },

    /// An effect was placed into a slot that accepts another category.
    #[error("effect '{name}' is a {actual} effect, slot expects {expected}")]
    WrongCategory {
        /// Name of the offending effect.
        name: String,
        /// Category the slot accepts.
        expected: EffectCategory,
        /// Category of the effect.
        actual: EffectCategory,
    },

    /// A modifier or payload was attached to something other than an active.
    #[error("effect '{child}' cannot attach to '{parent}'")]
    IncompatibleAttachment {
        /// Name of the attached effect.
        child: String,
        /// Name of the effect it was attached to.
        parent: String,
    },

    /// More attachments than the active's slot configuration allows.
    #[error("slot {slot} holds {count} {category} effects, capacity is {capacity}")]
    SlotCapacityExceeded {
        /// Index of the sequence slot.
        slot: usize,
        /// Which attachment list overflowed.
        category: EffectCategory,
        /// Number of attachments present.
        count: usize,
        /// Number the active allows.
        capacity: usize,
    },

    /// More passives than the organism has passive slots.
    #[error("{count} passives exceed the {capacity} passive slots")]
    PassiveSlotsExceeded {
        /// Number of passives supplied.
        count: usize,
        /// Passive-slot count of the organism.
        capacity: usize,
    },

    /// A passive appears more often than its `max_stacks` allows.
    #[error("passive '{name}' stacked {count} times, limit is {max_stacks}")]
    StackLimitExceeded {
        /// Name of the passive.
        name: String,
        /// Number of copies supplied.
        count: usize,
        /// The definition's stacking limit.
        max_stacks: u32,
    },

    /// An attempt to spend more energy than is available.
    #[error("insufficient energy: need {required}, have {available}")]
    InsufficientEnergy {
        /// Energy requested.
        required: f64,
        /// Energy available at the time of the request.
        available: f64,
    },

    /// A catalog file could not be read.
    #[error("failed to read effect catalog: {source}")]
    CatalogIo {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// A catalog file is not valid YAML for the definition schema.
    #[error("failed to parse effect catalog: {source}")]
    CatalogYaml {
        /// The underlying YAML error.
        #[from]
        source: serde_yml::Error,
    },
}
