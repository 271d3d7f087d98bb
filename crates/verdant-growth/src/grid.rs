//! The organism-local growth grid.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use verdant_types::{CellKind, GridCoord};

use crate::error::GrowthError;

/// Map from coordinate to cell kind. One kind per coordinate; the seed
/// sits at the origin for the organism's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthGrid {
    cells: BTreeMap<GridCoord, CellKind>,
}

impl Default for GrowthGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl GrowthGrid {
    /// A grid holding only the seed.
    pub fn new() -> Self {
        let mut cells = BTreeMap::new();
        cells.insert(GridCoord::ORIGIN, CellKind::Seed);
        Self { cells }
    }

    /// Place a cell.
    ///
    /// # Errors
    ///
    /// Returns [`GrowthError::Occupied`] if the coordinate is taken, or
    /// [`GrowthError::SeedPlacement`] for a second seed.
    pub fn place(&mut self, coord: GridCoord, kind: CellKind) -> Result<(), GrowthError> {
        if kind == CellKind::Seed {
            return Err(GrowthError::SeedPlacement);
        }
        if let Some(existing) = self.cells.get(&coord) {
            return Err(GrowthError::Occupied {
                coord,
                existing: *existing,
                attempted: kind,
            });
        }
        self.cells.insert(coord, kind);
        Ok(())
    }

    /// Remove a cell after an external despawn.
    ///
    /// # Errors
    ///
    /// Returns [`GrowthError::SeedRemoval`] for the origin, or
    /// [`GrowthError::Vacant`] if nothing is there.
    pub fn remove(&mut self, coord: GridCoord) -> Result<CellKind, GrowthError> {
        if coord == GridCoord::ORIGIN {
            return Err(GrowthError::SeedRemoval);
        }
        self.cells.remove(&coord).ok_or(GrowthError::Vacant { coord })
    }

    /// What occupies `coord`, if anything.
    pub fn get(&self, coord: GridCoord) -> Option<CellKind> {
        self.cells.get(&coord).copied()
    }

    /// Whether `coord` is occupied.
    pub fn is_occupied(&self, coord: GridCoord) -> bool {
        self.cells.contains_key(&coord)
    }

    /// Every cell, in coordinate order.
    pub fn iter(&self) -> impl Iterator<Item = (GridCoord, CellKind)> + '_ {
        self.cells.iter().map(|(c, k)| (*c, *k))
    }

    /// Number of cells of `kind`.
    pub fn count(&self, kind: CellKind) -> usize {
        self.cells.values().filter(|k| **k == kind).count()
    }

    /// Total cells, seed included.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`: the seed is never removed.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
