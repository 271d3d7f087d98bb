//! Integer coordinates on an organism-local growth grid.
//!
//! The origin is the seed cell. `y` grows upward, `x` grows to the right.

use serde::{Deserialize, Serialize};

use crate::enums::{GrowthDirection, LeafSide};

/// A cell position on a growth grid.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct GridCoord {
    /// Horizontal offset from the seed.
    pub x: i32,
    /// Vertical offset from the seed.
    pub y: i32,
}

impl GridCoord {
    /// The seed's coordinate.
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    /// Construct a coordinate.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset this coordinate by `(dx, dy)`.
    ///
    /// Returns `None` if either axis would overflow.
    pub fn offset(self, dx: i32, dy: i32) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
        })
    }

    /// The neighbouring coordinate one step in `direction`.
    pub fn step(self, direction: GrowthDirection) -> Option<Self> {
        let (dx, dy) = direction.delta();
        self.offset(dx, dy)
    }

    /// The horizontal neighbour on `side`.
    pub fn beside(self, side: LeafSide) -> Option<Self> {
        match side {
            LeafSide::Left => self.offset(-1, 0),
            LeafSide::Right => self.offset(1, 0),
        }
    }

    /// Candidate fruit positions around a structural cell: up, left, right.
    pub fn fruit_neighbours(self) -> impl Iterator<Item = Self> {
        [(0, 1), (-1, 0), (1, 0)]
            .into_iter()
            .filter_map(move |(dx, dy)| self.offset(dx, dy))
    }
}

impl core::fmt::Display for GridCoord {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_follows_direction() {
        let c = GridCoord::ORIGIN;
        assert_eq!(c.step(GrowthDirection::Up), Some(GridCoord::new(0, 1)));
        assert_eq!(c.step(GrowthDirection::DiagUpLeft), Some(GridCoord::new(-1, 1)));
        assert_eq!(c.step(GrowthDirection::DiagUpRight), Some(GridCoord::new(1, 1)));
    }

    #[test]
    fn offset_rejects_overflow() {
        let edge = GridCoord::new(i32::MAX, 0);
        assert_eq!(edge.offset(1, 0), None);
    }

    #[test]
    fn fruit_neighbours_exclude_below() {
        let around: Vec<_> = GridCoord::new(2, 2).fruit_neighbours().collect();
        assert_eq!(
            around,
            vec![GridCoord::new(2, 3), GridCoord::new(1, 2), GridCoord::new(3, 2)]
        );
    }
}
