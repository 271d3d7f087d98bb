//! Immutable effect definitions.
//!
//! A definition is the catalog entry for one kind of effect: its stable
//! key, display name, and category-specific parameters. Definitions never
//! change at runtime; per-organism variation lives on
//! [`RuntimeEffectInstance`](crate::instance::RuntimeEffectInstance).

use serde::{Deserialize, Serialize};
use verdant_types::{
    DefinitionId, EffectCategory, LeafPattern, ModifierKind, PayloadKind, StatTarget,
};

/// Name reported by the placeholder that stands in for unresolved effects.
pub const PLACEHOLDER_NAME: &str = "Missing Effect";

/// A catalog entry describing one effect kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectDefinition {
    /// Stable key referenced by instances and saves.
    pub id: DefinitionId,
    /// Human-readable name; also the fallback lookup key.
    pub name: String,
    /// Tooltip text.
    #[serde(default)]
    pub description: String,
    /// Unlock tier, for collaborators that gate availability.
    #[serde(default)]
    pub tier: u32,
    /// Authoring revision of this definition.
    #[serde(default = "default_version")]
    pub version: u32,
    /// Category-specific parameters.
    pub params: EffectParams,
}

const fn default_version() -> u32 {
    1
}

/// Category-specific parameters. The variant is the category, written as a
/// `category` key beside the parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum EffectParams {
    /// A passive stat contribution.
    Passive(PassiveParams),
    /// An executable effect.
    Active(ActiveParams),
    /// An attachment that alters an active.
    Modifier(ModifierParams),
    /// An attachment delivered by an active.
    Payload(PayloadParams),
}

/// Parameters of a passive effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassiveParams {
    /// Statistic this passive feeds.
    pub stat_target: StatTarget,
    /// Contribution before instance overrides; `1.0` is neutral.
    #[serde(default = "neutral")]
    pub base_value: f64,
    /// Whether the contribution joins the additive bucket.
    #[serde(default)]
    pub stacks_additively: bool,
    /// Copies allowed on one organism; `-1` means unlimited.
    #[serde(default = "unlimited")]
    pub max_stacks: i32,
    /// Growth-shape contribution. Its presence marks the passive as a
    /// seed-equivalent that lets the organism grow.
    #[serde(default)]
    pub growth: Option<GrowthShape>,
}

impl PassiveParams {
    /// The stacking limit, or `None` when unlimited.
    pub fn stack_limit(&self) -> Option<u32> {
        u32::try_from(self.max_stacks).ok()
    }

    /// Whether this passive makes an organism eligible to grow.
    pub const fn is_growth_relevant(&self) -> bool {
        self.growth.is_some() || matches!(self.stat_target, StatTarget::GrowthSpeed)
    }
}

const fn neutral() -> f64 {
    1.0
}

const fn unlimited() -> i32 {
    -1
}

/// How a passive shifts the stem and leaf layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GrowthShape {
    /// Added to both the minimum and maximum stem length.
    #[serde(default)]
    pub stem_length_delta: i32,
    /// Added to the number of bare stems between leaf placements.
    #[serde(default)]
    pub leaf_gap_delta: i32,
    /// Added to the direction randomness.
    #[serde(default)]
    pub randomness_delta: f64,
    /// Overrides the leaf pattern when set.
    #[serde(default)]
    pub leaf_pattern: Option<LeafPattern>,
}

/// Parameters of an active effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveParams {
    /// Energy cost before modifiers.
    #[serde(default = "default_base_energy_cost")]
    pub base_energy_cost: f64,
    /// Ticks between accumulation and dispatch.
    #[serde(default)]
    pub execution_delay_ticks: u32,
    /// How many modifiers and payloads may attach.
    #[serde(default)]
    pub slot_config: SlotConfig,
    /// Whether the active may fire with no payload attached.
    #[serde(default)]
    pub can_execute_empty: bool,
    /// What happens when the active fires.
    pub behavior: ActiveBehavior,
}

const fn default_base_energy_cost() -> f64 {
    20.0
}

/// Attachment capacity of an active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotConfig {
    /// Maximum attached modifiers.
    pub modifier_slots: usize,
    /// Maximum attached payloads.
    pub payload_slots: usize,
}

impl Default for SlotConfig {
    fn default() -> Self {
        Self {
            modifier_slots: 1,
            payload_slots: 1,
        }
    }
}

/// The closed set of things an active can do when dispatched, tagged by a
/// `kind` key.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActiveBehavior {
    /// Grow fruit on the organism's own grid.
    SpawnFruit {
        /// Fruit cells per firing before the `FruitYield` multiplier.
        fruit_count: u32,
    },
    /// Launch a projectile carrying the payloads.
    Projectile {
        /// Damage before the effect multiplier.
        base_damage: f64,
        /// Reach in tiles.
        range: f64,
    },
    /// Release a lingering cloud carrying the payloads.
    Cloud {
        /// Radius in tiles.
        radius: f64,
        /// Ticks the cloud persists.
        duration_ticks: u32,
    },
}

/// Parameters of a modifier effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifierParams {
    /// Which hook the modifier acts through.
    pub kind: ModifierKind,
    /// Kind-specific strength: cost factor, trigger range, effect factor,
    /// or required energy fraction.
    pub power: f64,
    /// Cost factor applied by behavior modifiers.
    #[serde(default = "neutral")]
    pub cost_scale: f64,
}

/// Parameters of a payload effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayloadParams {
    /// What the payload delivers.
    pub kind: PayloadKind,
    /// Strength before instance and effect multipliers.
    #[serde(default = "neutral")]
    pub base_potency: f64,
}

impl EffectDefinition {
    /// The category implied by the parameter variant.
    pub const fn category(&self) -> EffectCategory {
        match self.params {
            EffectParams::Passive(_) => EffectCategory::Passive,
            EffectParams::Active(_) => EffectCategory::Active,
            EffectParams::Modifier(_) => EffectCategory::Modifier,
            EffectParams::Payload(_) => EffectCategory::Payload,
        }
    }

    /// Whether an instance of this definition may attach to `parent`.
    pub const fn can_attach_to(&self, parent: &Self) -> bool {
        self.category().can_attach_to(parent.category())
    }

    /// Whether this is the inert stand-in for an unresolved reference.
    pub fn is_placeholder(&self) -> bool {
        self.id.is_placeholder()
    }

    /// Passive parameters, if this is a passive.
    pub const fn as_passive(&self) -> Option<&PassiveParams> {
        match &self.params {
            EffectParams::Passive(p) => Some(p),
            _ => None,
        }
    }

    /// Active parameters, if this is an active.
    pub const fn as_active(&self) -> Option<&ActiveParams> {
        match &self.params {
            EffectParams::Active(p) => Some(p),
            _ => None,
        }
    }

    /// Modifier parameters, if this is a modifier.
    pub const fn as_modifier(&self) -> Option<&ModifierParams> {
        match &self.params {
            EffectParams::Modifier(p) => Some(p),
            _ => None,
        }
    }

    /// Payload parameters, if this is a payload.
    pub const fn as_payload(&self) -> Option<&PayloadParams> {
        match &self.params {
            EffectParams::Payload(p) => Some(p),
            _ => None,
        }
    }

    /// The inert passive used when a reference cannot be resolved.
    pub fn placeholder() -> Self {
        Self {
            id: DefinitionId::PLACEHOLDER,
            name: PLACEHOLDER_NAME.to_owned(),
            description: "This effect's definition could not be found.".to_owned(),
            tier: 0,
            version: 0,
            params: EffectParams::Passive(PassiveParams {
                stat_target: StatTarget::None,
                base_value: 1.0,
                stacks_additively: false,
                max_stacks: -1,
                growth: None,
            }),
        }
    }
}

impl ActiveParams {
    /// An active with no payloads is only valid if it may execute empty.
    pub const fn accepts_payload_count(&self, payloads: usize) -> bool {
        self.can_execute_empty || payloads > 0
    }
}
