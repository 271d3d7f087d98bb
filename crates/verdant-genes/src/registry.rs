//! The effect definition registry.
//!
//! Loaded once, then shared read-only by every organism. Lookups that fail
//! never produce a null: an instance whose key has gone stale is matched by
//! name, and failing that resolves to the inert placeholder.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::Mutex;

use tracing::{debug, error, warn};
use uuid::Uuid;
use verdant_types::{DefinitionId, EffectCategory};

use crate::definition::EffectDefinition;
use crate::error::GeneError;
use crate::instance::RuntimeEffectInstance;

/// Immutable catalog of effect definitions.
#[derive(Debug)]
pub struct EffectRegistry {
    definitions: BTreeMap<DefinitionId, EffectDefinition>,
    by_name: BTreeMap<String, DefinitionId>,
    placeholder: EffectDefinition,
    /// Keys already reported as missing, so each is logged loudly once.
    unresolved: Mutex<BTreeSet<DefinitionId>>,
}

impl EffectRegistry {
    /// Build a registry from a list of definitions.
    ///
    /// When two definitions share a name, the first one wins the name
    /// index; both stay reachable by key.
    ///
    /// # Errors
    ///
    /// Returns [`GeneError::DuplicateDefinition`] if two definitions share
    /// a key, or if a definition uses the reserved placeholder key.
    pub fn new(definitions: impl IntoIterator<Item = EffectDefinition>) -> Result<Self, GeneError> {
        let mut by_id = BTreeMap::new();
        let mut by_name = BTreeMap::new();
        for definition in definitions {
            if definition.is_placeholder() || by_id.contains_key(&definition.id) {
                return Err(GeneError::DuplicateDefinition {
                    id: definition.id,
                    name: definition.name,
                });
            }
            by_name
                .entry(definition.name.clone())
                .or_insert(definition.id);
            by_id.insert(definition.id, definition);
        }
        Ok(Self {
            definitions: by_id,
            by_name,
            placeholder: EffectDefinition::placeholder(),
            unresolved: Mutex::new(BTreeSet::new()),
        })
    }

    /// Load a registry from a YAML file holding a list of definitions.
    ///
    /// # Errors
    ///
    /// Returns [`GeneError::CatalogIo`], [`GeneError::CatalogYaml`], or any
    /// error from [`EffectRegistry::new`].
    pub fn from_file(path: &Path) -> Result<Self, GeneError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse a registry from a YAML list of definitions.
    ///
    /// # Errors
    ///
    /// Returns [`GeneError::CatalogYaml`] or any error from
    /// [`EffectRegistry::new`].
    pub fn from_yaml(yaml: &str) -> Result<Self, GeneError> {
        let definitions: Vec<EffectDefinition> = serde_yml::from_str(yaml)?;
        Self::new(definitions)
    }

    /// Look up a definition by key.
    pub fn get(&self, id: DefinitionId) -> Option<&EffectDefinition> {
        self.definitions.get(&id)
    }

    /// Look up a definition by name.
    pub fn get_by_name(&self, name: &str) -> Option<&EffectDefinition> {
        self.by_name.get(name).and_then(|id| self.definitions.get(id))
    }

    /// Look up a definition by a textual reference: a UUID key, or a name.
    pub fn lookup(&self, reference: &str) -> Option<&EffectDefinition> {
        Uuid::parse_str(reference)
            .ok()
            .and_then(|uuid| self.get(DefinitionId::from(uuid)))
            .or_else(|| self.get_by_name(reference))
    }

    /// Resolve an instance to its definition.
    ///
    /// Tries the key, then the stored name, then returns the placeholder.
    pub fn resolve(&self, instance: &RuntimeEffectInstance) -> &EffectDefinition {
        if let Some(definition) = self.get(instance.definition_id) {
            return definition;
        }
        if let Some(definition) = self.get_by_name(&instance.definition_name) {
            warn!(
                stale_id = %instance.definition_id,
                name = instance.definition_name,
                resolved_id = %definition.id,
                "Effect key not found, resolved by name"
            );
            return definition;
        }
        if self.first_miss(instance.definition_id) {
            error!(
                id = %instance.definition_id,
                name = instance.definition_name,
                "Effect definition missing, using placeholder"
            );
        } else {
            debug!(
                id = %instance.definition_id,
                name = instance.definition_name,
                "Effect definition still missing"
            );
        }
        &self.placeholder
    }

    /// Record a miss for `id`. True the first time `id` is seen.
    fn first_miss(&self, id: DefinitionId) -> bool {
        // A poisoned set only costs a repeated error line.
        let Ok(mut seen) = self.unresolved.lock() else {
            return true;
        };
        seen.insert(id)
    }

    /// Keys that have resolved to the placeholder so far, ordered.
    pub fn unresolved_keys(&self) -> Vec<DefinitionId> {
        self.unresolved
            .lock()
            .map(|seen| seen.iter().copied().collect())
            .unwrap_or_default()
    }

    /// The inert placeholder definition.
    pub const fn placeholder(&self) -> &EffectDefinition {
        &self.placeholder
    }

    /// Tooltip text for an instance, flagging unresolved references.
    pub fn describe(&self, instance: &RuntimeEffectInstance) -> String {
        let definition = self.resolve(instance);
        if definition.is_placeholder() {
            format!(
                "{} (unresolved: '{}' {})",
                definition.name, instance.definition_name, instance.definition_id
            )
        } else {
            format!("{}: {}", definition.name, definition.description)
        }
    }

    /// All definitions, ordered by key.
    pub fn iter(&self) -> impl Iterator<Item = &EffectDefinition> {
        self.definitions.values()
    }

    /// All definitions of one category.
    pub fn by_category(&self, category: EffectCategory) -> impl Iterator<Item = &EffectDefinition> {
        self.iter().filter(move |d| d.category() == category)
    }

    /// Number of definitions, excluding the placeholder.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Whether the registry holds no definitions.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
