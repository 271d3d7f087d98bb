//! The environmental surface the engine reads from.
//!
//! Terrain, weather, and creature positions belong to other systems. The
//! engine only asks for multipliers and proximity through [`WorldQuery`].

use verdant_types::OrganismId;

/// Environmental multipliers and proximity checks for one organism.
pub trait WorldQuery {
    /// Terrain multiplier on growth speed.
    fn growth_speed_multiplier(&self, organism: OrganismId) -> f64;

    /// Terrain multiplier on energy recharge.
    fn energy_recharge_multiplier(&self, organism: OrganismId) -> f64;

    /// Whether a target is within `range` tiles of the organism.
    fn has_target_within(&self, organism: OrganismId, range: f64) -> bool;
}

/// A world that answers the same for every organism.
#[derive(Debug, Clone, PartialEq)]
pub struct UniformWorld {
    /// Growth speed multiplier for every organism.
    pub growth_speed: f64,
    /// Recharge multiplier for every organism.
    pub energy_recharge: f64,
    /// Distance to the nearest target, if any.
    pub target_distance: Option<f64>,
}

impl Default for UniformWorld {
    fn default() -> Self {
        Self {
            growth_speed: 1.0,
            energy_recharge: 1.0,
            target_distance: None,
        }
    }
}

impl WorldQuery for UniformWorld {
    fn growth_speed_multiplier(&self, _organism: OrganismId) -> f64 {
        self.growth_speed
    }

    fn energy_recharge_multiplier(&self, _organism: OrganismId) -> f64 {
        self.energy_recharge
    }

    fn has_target_within(&self, _organism: OrganismId, range: f64) -> bool {
        self.target_distance.is_some_and(|d| d <= range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proximity_respects_range() {
        let world = UniformWorld {
            target_distance: Some(3.0),
            ..UniformWorld::default()
        };
        let id = OrganismId::new();
        assert!(world.has_target_within(id, 3.0));
        assert!(!world.has_target_within(id, 2.5));
        assert!(!UniformWorld::default().has_target_within(id, 100.0));
    }
}
