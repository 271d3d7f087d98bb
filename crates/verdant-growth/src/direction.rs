//! Stem direction selection.
//!
//! The randomness parameter `r` is clamped to `[0, 1]` and picks the
//! candidate set; the direction is then drawn uniformly from it:
//!
//! | `r`                | Candidates                      |
//! |--------------------|---------------------------------|
//! | `r <= 0.01`        | `Up`                            |
//! | `0.01 < r < 0.99`  | `Up`, `DiagUpLeft`, `DiagUpRight` |
//! | `r >= 0.99`        | `DiagUpLeft`, `DiagUpRight`     |

use rand::Rng;
use rand::seq::IndexedRandom;
use verdant_types::GrowthDirection;

/// At or below this randomness the stem grows straight up.
pub const STRAIGHT_THRESHOLD: f64 = 0.01;

/// At or above this randomness the stem only grows diagonally.
pub const DIAGONAL_THRESHOLD: f64 = 0.99;

/// The directions eligible at randomness `r`.
pub fn candidates(randomness: f64) -> &'static [GrowthDirection] {
    let r = randomness.clamp(0.0, 1.0);
    if r <= STRAIGHT_THRESHOLD {
        &[GrowthDirection::Up]
    } else if r >= DIAGONAL_THRESHOLD {
        &GrowthDirection::DIAGONALS
    } else {
        &GrowthDirection::ALL
    }
}

/// Draw a direction at randomness `r`.
pub fn choose<R: Rng + ?Sized>(randomness: f64, rng: &mut R) -> GrowthDirection {
    candidates(randomness)
        .choose(rng)
        .copied()
        .unwrap_or(GrowthDirection::Up)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn up_share(randomness: f64, trials: usize) -> usize {
        let mut rng = SmallRng::seed_from_u64(42);
        (0..trials)
            .filter(|_| choose(randomness, &mut rng) == GrowthDirection::Up)
            .count()
    }

    #[test]
    fn zero_randomness_always_up() {
        assert_eq!(up_share(0.0, 1000), 1000);
    }

    #[test]
    fn full_randomness_never_up() {
        assert_eq!(up_share(1.0, 1000), 0);
    }

    #[test]
    fn interior_uses_all_three() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut seen = [false; 3];
        for _ in 0..300 {
            let d = choose(0.5, &mut rng);
            if let Some(slot) = GrowthDirection::ALL
                .iter()
                .position(|c| *c == d)
                .and_then(|i| seen.get_mut(i))
            {
                *slot = true;
            }
        }
        assert_eq!(seen, [true; 3]);
    }

    #[test]
    fn thresholds_are_inclusive_and_clamped() {
        assert_eq!(candidates(STRAIGHT_THRESHOLD), &[GrowthDirection::Up]);
        assert_eq!(candidates(DIAGONAL_THRESHOLD).len(), 2);
        assert_eq!(candidates(-3.0), &[GrowthDirection::Up]);
        assert_eq!(candidates(2.0).len(), 2);
    }
}
