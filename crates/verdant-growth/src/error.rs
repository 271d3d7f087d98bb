//! Error types for grid mutation.

use verdant_types::{CellKind, GridCoord};

/// Spatial conflicts on a growth grid. The earlier occupant always wins.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GrowthError {
    /// The coordinate already holds a cell.
    #[error("cannot place {attempted:?} at {coord}: occupied by {existing:?}")]
    Occupied {
        /// The contested coordinate.
        coord: GridCoord,
        /// What is already there.
        existing: CellKind,
        /// What was being placed.
        attempted: CellKind,
    },

    /// Only the grid itself places the seed.
    #[error("a grid has exactly one seed, at the origin")]
    SeedPlacement,

    /// The seed lives as long as the organism.
    #[error("the seed at the origin cannot be removed")]
    SeedRemoval,

    /// Nothing to remove at the coordinate.
    #[error("no cell at {coord}")]
    Vacant {
        /// The empty coordinate.
        coord: GridCoord,
    },

    /// The stem cursor would leave the `i32` coordinate range.
    #[error("coordinate overflow stepping from {from}")]
    CoordinateOverflow {
        /// The cursor position.
        from: GridCoord,
    },
}
