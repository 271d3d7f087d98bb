//! Per-organism bindings of effect definitions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use verdant_types::DefinitionId;

use crate::definition::EffectDefinition;

/// Override key scaling a passive's value or a modifier's strength.
pub const POWER_MULTIPLIER: &str = "power_multiplier";

/// Override key scaling a cost modifier's reduction.
pub const EFFICIENCY: &str = "efficiency";

/// Override key scaling a payload's potency.
pub const POTENCY_MULTIPLIER: &str = "potency_multiplier";

/// A definition placed on one organism, with instance-level overrides.
///
/// The definition name is stored alongside the key so a save whose key no
/// longer resolves can still be matched by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeEffectInstance {
    /// Key of the bound definition.
    pub definition_id: DefinitionId,
    /// Name of the bound definition at the time of binding.
    pub definition_name: String,
    /// Per-instance parameter overrides.
    #[serde(default)]
    pub overrides: BTreeMap<String, f64>,
}

impl RuntimeEffectInstance {
    /// Bind a definition with no overrides.
    pub fn new(definition: &EffectDefinition) -> Self {
        Self {
            definition_id: definition.id,
            definition_name: definition.name.clone(),
            overrides: BTreeMap::new(),
        }
    }

    /// Set an override, consuming and returning the instance.
    #[must_use]
    pub fn with_override(mut self, key: &str, value: f64) -> Self {
        self.overrides.insert(key.to_owned(), value);
        self
    }

    /// The override for `key`, or `default` when unset.
    pub fn override_or(&self, key: &str, default: f64) -> f64 {
        self.overrides.get(key).copied().unwrap_or(default)
    }

    /// The instance's power multiplier, `1.0` when unset.
    pub fn power_multiplier(&self) -> f64 {
        self.override_or(POWER_MULTIPLIER, 1.0)
    }
}
