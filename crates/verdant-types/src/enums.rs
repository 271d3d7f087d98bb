//! Enumeration types for the Verdant plant behavior engine.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Effect taxonomy
// ---------------------------------------------------------------------------

/// The four categories an effect definition can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EffectCategory {
    /// Folds into derived organism statistics; never executes.
    Passive,
    /// Executes during a cycle and consumes energy.
    Active,
    /// Attaches to an active effect and alters cost, trigger, or behavior.
    Modifier,
    /// Attaches to an active effect and is delivered when it fires.
    Payload,
}

impl EffectCategory {
    /// Whether an instance of this category may attach to `parent`.
    ///
    /// Modifiers and payloads only ever attach to an active effect.
    /// Passives and actives occupy slots of their own and never attach.
    pub const fn can_attach_to(self, parent: Self) -> bool {
        matches!(
            (self, parent),
            (Self::Modifier | Self::Payload, Self::Active)
        )
    }
}

impl core::fmt::Display for EffectCategory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let label = match self {
            Self::Passive => "passive",
            Self::Active => "active",
            Self::Modifier => "modifier",
            Self::Payload => "payload",
        };
        f.write_str(label)
    }
}

/// The organism statistic a passive effect feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StatTarget {
    /// Rate at which the growth state machine advances.
    GrowthSpeed,
    /// Scales maximum energy.
    EnergyStorage,
    /// Scales energy regenerated per recharge period.
    EnergyGeneration,
    /// Scales fruit produced by fruiting actives.
    FruitYield,
    /// Defensive toughness, read by collaborators.
    Defense,
    /// Decorative or unique effects with no multiplier.
    None,
}

impl StatTarget {
    /// Every stat that produces a multiplier, in a stable order.
    pub const MULTIPLIER_STATS: [Self; 5] = [
        Self::GrowthSpeed,
        Self::EnergyStorage,
        Self::EnergyGeneration,
        Self::FruitYield,
        Self::Defense,
    ];
}

/// How a modifier influences the active effect it is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ModifierKind {
    /// Scales the energy cost of the active.
    Cost,
    /// Gates the slot on a world condition such as proximity.
    Trigger,
    /// Alters the strength of the effect when it fires.
    Behavior,
    /// Gates the slot on the organism's own state.
    Condition,
}

impl ModifierKind {
    /// Whether a failed condition check on this kind skips the slot.
    pub const fn gates_slot(self) -> bool {
        matches!(self, Self::Trigger | Self::Condition)
    }
}

/// What a payload delivers to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PayloadKind {
    /// A substance such as poison or sap.
    Substance,
    /// Nourishment for whoever consumes it.
    Nutrition,
    /// Anything else.
    Special,
}

// ---------------------------------------------------------------------------
// Growth
// ---------------------------------------------------------------------------

/// What occupies a grid coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CellKind {
    /// The organism's origin; exists for its whole lifetime.
    Seed,
    /// Structural stem.
    Stem,
    /// Leaf beside a stem.
    Leaf,
    /// Fruit beside a stem or the seed.
    Fruit,
}

impl CellKind {
    /// Whether fruit may be placed next to a cell of this kind.
    pub const fn bears_fruit(self) -> bool {
        matches!(self, Self::Seed | Self::Stem)
    }
}

/// One step of the stem cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GrowthDirection {
    /// Straight up.
    Up,
    /// Up and one to the left.
    DiagUpLeft,
    /// Up and one to the right.
    DiagUpRight,
}

impl GrowthDirection {
    /// All directions, in selection order.
    pub const ALL: [Self; 3] = [Self::Up, Self::DiagUpLeft, Self::DiagUpRight];

    /// The two diagonal directions.
    pub const DIAGONALS: [Self; 2] = [Self::DiagUpLeft, Self::DiagUpRight];

    /// The `(dx, dy)` offset this direction moves by.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, 1),
            Self::DiagUpLeft => (-1, 1),
            Self::DiagUpRight => (1, 1),
        }
    }
}

/// How leaves are arranged along the stem.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum LeafPattern {
    /// A leaf on both sides of each leaf-bearing stem.
    #[default]
    Parallel,
    /// A single leaf per leaf-bearing stem, alternating sides.
    Alternating,
}

/// A horizontal side of a stem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LeafSide {
    /// Negative `x`.
    Left,
    /// Positive `x`.
    Right,
}

impl LeafSide {
    /// The other side.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Lifecycle of an organism's growth state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GrowthState {
    /// Still placing stem cells.
    Growing,
    /// Target stem length reached, or growth was abandoned.
    Complete,
}
