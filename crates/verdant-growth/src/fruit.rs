//! Fruit placement.
//!
//! Fruit grows in a free cell directly above, left of, or right of a stem
//! or the seed. Placement is triggered explicitly, never by the growth
//! loop.

use std::collections::BTreeSet;

use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::debug;
use verdant_types::{CellKind, GridCoord};

use crate::grid::GrowthGrid;

/// Free coordinates where fruit could grow, in coordinate order.
pub fn fruit_sites(grid: &GrowthGrid) -> Vec<GridCoord> {
    let sites: BTreeSet<GridCoord> = grid
        .iter()
        .filter(|(_, kind)| kind.bears_fruit())
        .flat_map(|(coord, _)| coord.fruit_neighbours())
        .filter(|c| !grid.is_occupied(*c))
        .collect();
    sites.into_iter().collect()
}

/// Place one fruit at a uniformly chosen free site. Returns where it grew,
/// or `None` when there is no room.
pub fn place_fruit<R: Rng + ?Sized>(grid: &mut GrowthGrid, rng: &mut R) -> Option<GridCoord> {
    let sites = fruit_sites(grid);
    let Some(site) = sites.choose(rng).copied() else {
        debug!("No free fruit site");
        return None;
    };
    grid.place(site, CellKind::Fruit).ok()?;
    Some(site)
}
