//! Versioned save documents for organism runtime state.
//!
//! A save is a JSON object `{ "version": N, "state": { ... } }`. Loading
//! walks older documents forward one version at a time through explicit
//! migration functions on the JSON value, then deserializes.
//!
//! # Versions
//!
//! - **1** -- flat energy fields (`energy`, `max_energy`,
//!   `recharge_ticks_remaining`, `recharge_period_ticks`) and no cycle
//!   timer. Documents without a `version` key are treated as version 1.
//! - **2** -- energy nested as an object with its base values, plus
//!   `cycle_period_ticks` and `cycle_ticks_remaining`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::info;
use verdant_genes::OrganismRuntimeState;

/// Version written by [`save_organism`].
pub const CURRENT_VERSION: u64 = 2;

/// Regen assumed for version 1 saves, which did not record it.
const V1_BASE_REGEN_PER_PERIOD: f64 = 10.0;

/// Cycle period assumed for version 1 saves.
const V1_CYCLE_PERIOD_TICKS: u64 = 4;

/// Errors that can occur while saving or loading.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    /// JSON encoding or decoding failed.
    #[error("JSON error: {source}")]
    Json {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },

    /// The document is newer than this build understands.
    #[error("unsupported save version {found}")]
    UnsupportedVersion {
        /// Version found in the document.
        found: u64,
    },

    /// The document does not have the expected shape.
    #[error("malformed save document: {reason}")]
    Malformed {
        /// What is missing or wrong.
        reason: String,
    },
}

#[derive(Serialize, Deserialize)]
struct SaveDocument {
    version: u64,
    state: OrganismRuntimeState,
}

/// Serialize `state` as a current-version save document.
///
/// # Errors
///
/// Returns [`PersistenceError::Json`] if encoding fails.
pub fn save_organism(state: &OrganismRuntimeState) -> Result<String, PersistenceError> {
    let document = SaveDocument {
        version: CURRENT_VERSION,
        state: state.clone(),
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

/// Parse a save document of any supported version.
///
/// # Errors
///
/// Returns [`PersistenceError`] if the document is not JSON, is newer than
/// [`CURRENT_VERSION`], or does not match the expected shape.
pub fn load_organism(document: &str) -> Result<OrganismRuntimeState, PersistenceError> {
    let raw: Value = serde_json::from_str(document)?;
    let migrated = migrate(raw)?;
    let document: SaveDocument = serde_json::from_value(migrated)?;
    Ok(document.state)
}

/// Bring a save document up to [`CURRENT_VERSION`].
///
/// # Errors
///
/// Returns [`PersistenceError::UnsupportedVersion`] for future versions,
/// or [`PersistenceError::Malformed`] if a migration step cannot find the
/// fields it rewrites.
pub fn migrate(mut document: Value) -> Result<Value, PersistenceError> {
    let root = document
        .as_object_mut()
        .ok_or_else(|| malformed("document is not an object"))?;
    let mut version = root.get("version").and_then(Value::as_u64).unwrap_or(1);
    if version > CURRENT_VERSION {
        return Err(PersistenceError::UnsupportedVersion { found: version });
    }

    while version < CURRENT_VERSION {
        let state = root
            .get_mut("state")
            .and_then(Value::as_object_mut)
            .ok_or_else(|| malformed("missing state object"))?;
        match version {
            1 => migrate_v1_to_v2(state)?,
            other => return Err(PersistenceError::UnsupportedVersion { found: other }),
        }
        version = version.saturating_add(1);
        info!(version, "Save document migrated");
    }

    root.insert("version".to_owned(), Value::from(CURRENT_VERSION));
    Ok(document)
}

fn migrate_v1_to_v2(state: &mut Map<String, Value>) -> Result<(), PersistenceError> {
    let current = take_f64(state, "energy")?;
    let max = take_f64(state, "max_energy")?;
    let remaining = state
        .remove("recharge_ticks_remaining")
        .unwrap_or_else(|| Value::from(1));
    let period = state
        .remove("recharge_period_ticks")
        .unwrap_or_else(|| Value::from(1));

    state.insert(
        "energy".to_owned(),
        json!({
            "current": current,
            "max": max,
            "base_max": max,
            "base_regen_per_period": V1_BASE_REGEN_PER_PERIOD,
            "recharge_ticks_remaining": remaining,
            "recharge_period_ticks": period,
        }),
    );
    state
        .entry("cycle_period_ticks")
        .or_insert_with(|| Value::from(V1_CYCLE_PERIOD_TICKS));
    state
        .entry("cycle_ticks_remaining")
        .or_insert_with(|| Value::from(V1_CYCLE_PERIOD_TICKS));
    Ok(())
}

fn take_f64(state: &mut Map<String, Value>, key: &str) -> Result<f64, PersistenceError> {
    state
        .remove(key)
        .as_ref()
        .and_then(Value::as_f64)
        .ok_or_else(|| malformed(&format!("missing numeric field '{key}'")))
}

fn malformed(reason: &str) -> PersistenceError {
    PersistenceError::Malformed {
        reason: reason.to_owned(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use verdant_genes::definition::EffectDefinition;
    use verdant_genes::instance::POWER_MULTIPLIER;
    use verdant_genes::{EnergyEconomy, RuntimeEffectInstance, SequenceSlot};
    use verdant_types::OrganismId;

    use super::*;

    fn state() -> OrganismRuntimeState {
        let def = EffectDefinition::placeholder();
        OrganismRuntimeState {
            organism_id: OrganismId::new(),
            passives: vec![RuntimeEffectInstance::new(&def)],
            passive_slot_count: 2,
            slots: vec![
                SequenceSlot::default(),
                SequenceSlot::with_active(RuntimeEffectInstance::new(&def)),
            ],
            energy: EnergyEconomy::new(100.0, 10.0, 3).with_current(37.5),
            cycle_period_ticks: 4,
            cycle_ticks_remaining: 2,
        }
    }

    #[test]
    fn round_trip_preserves_state() {
        let original = state();
        let saved = save_organism(&original);
        assert!(saved.is_ok());
        let loaded = saved.and_then(|s| load_organism(&s));
        assert!(loaded.is_ok());
        assert_eq!(loaded.ok(), Some(original));
    }

    #[test]
    fn round_trip_keeps_every_float_bit() {
        let def = EffectDefinition::placeholder();
        let mut original = state();
        original.energy.recompute_max(1.1);
        original.energy = original.energy.with_current(100.0 / 3.0);
        original.passives = vec![
            RuntimeEffectInstance::new(&def).with_override(POWER_MULTIPLIER, 0.1 + 0.2),
        ];
        let loaded = load_organism(&save_organism(&original).unwrap()).unwrap();
        assert_eq!(
            loaded.energy.current().to_bits(),
            original.energy.current().to_bits()
        );
        assert_eq!(loaded.energy.max().to_bits(), original.energy.max().to_bits());
        assert_eq!(loaded, original);
    }

    #[test]
    fn migrates_version_one() {
        let original = state();
        let slots = serde_json::to_value(&original.slots).unwrap_or(Value::Null);
        let passives = serde_json::to_value(&original.passives).unwrap_or(Value::Null);
        let v1 = json!({
            "state": {
                "organism_id": original.organism_id,
                "passives": passives,
                "passive_slot_count": 2,
                "slots": slots,
                "energy": 15.0,
                "max_energy": 80.0,
                "recharge_ticks_remaining": 2,
                "recharge_period_ticks": 3,
            }
        });
        let loaded = load_organism(&v1.to_string());
        assert!(loaded.is_ok(), "{loaded:?}");
        let loaded = loaded.unwrap();
        assert!((loaded.energy.current() - 15.0).abs() < f64::EPSILON);
        assert!((loaded.energy.max() - 80.0).abs() < f64::EPSILON);
        assert_eq!(loaded.energy.recharge_ticks_remaining(), 2);
        assert_eq!(loaded.cycle_period_ticks, 4);
        assert_eq!(loaded.slots, original.slots);
    }

    #[test]
    fn rejects_future_version() {
        let doc = json!({ "version": 99, "state": {} }).to_string();
        assert!(matches!(
            load_organism(&doc),
            Err(PersistenceError::UnsupportedVersion { found: 99 })
        ));
    }

    #[test]
    fn rejects_v1_without_energy() {
        let doc = json!({ "version": 1, "state": { "slots": [] } }).to_string();
        assert!(matches!(
            load_organism(&doc),
            Err(PersistenceError::Malformed { .. })
        ));
    }
}
