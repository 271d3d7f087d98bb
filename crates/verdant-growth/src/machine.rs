//! The growth state machine.
//!
//! `Growing` until the stem reaches its target length, then `Complete`.
//! The target is sampled once, uniformly from `[min_stem, max_stem]`, when
//! the machine is created. Each growth tick adds the organism's speed to a
//! progress counter; when progress reaches `ticks_per_stage` one stem step
//! runs. At most one step runs per tick.
//!
//! A step picks a direction, moves the stem cursor, and places a stem cell.
//! Every `(leaf_gap + 1)`-th stem gets leaves beside it. A step that lands
//! on an occupied coordinate is logged and skipped; after
//! `max_blocked_attempts` consecutive blocked steps the machine gives up
//! and completes stunted.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use verdant_types::{CellKind, GridCoord, GrowthState, LeafPattern, LeafSide};

use crate::config::GrowthConfig;
use crate::direction;
use crate::error::GrowthError;
use crate::grid::GrowthGrid;
use crate::params::GrowthParams;

/// What one growth tick did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GrowthTick {
    /// Cells placed this tick, stem first.
    pub placed: Vec<(GridCoord, CellKind)>,
    /// Conflicts hit this tick; the earlier occupant kept its cell.
    pub conflicts: Vec<GrowthError>,
    /// Whether the machine reached `Complete` this tick.
    pub completed: bool,
}

/// Growth progress for one organism.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthMachine {
    state: GrowthState,
    params: GrowthParams,
    target_stem_length: u32,
    placed_stems: u32,
    cursor: GridCoord,
    next_leaf_side: LeafSide,
    progress: f64,
    ticks_per_stage: f64,
    blocked_attempts: u32,
    max_blocked_attempts: u32,
}

impl GrowthMachine {
    /// Start growing, sampling the target stem length.
    pub fn new<R: Rng + ?Sized>(params: GrowthParams, config: &GrowthConfig, rng: &mut R) -> Self {
        let max = params.max_stem.max(params.min_stem);
        let target_stem_length = rng.random_range(params.min_stem..=max);
        debug!(
            target_stem_length,
            leaf_gap = params.leaf_gap,
            randomness = params.randomness,
            "Growth started"
        );
        Self {
            state: GrowthState::Growing,
            params,
            target_stem_length,
            placed_stems: 0,
            cursor: GridCoord::ORIGIN,
            next_leaf_side: LeafSide::Left,
            progress: 0.0,
            ticks_per_stage: if config.ticks_per_stage > 0.0 {
                config.ticks_per_stage
            } else {
                1.0
            },
            blocked_attempts: 0,
            max_blocked_attempts: config.max_blocked_attempts.max(1),
        }
    }

    /// A machine that never grows, for organisms without a seed-equivalent.
    pub fn dormant() -> Self {
        Self {
            state: GrowthState::Complete,
            params: GrowthParams::fixed(1, 1, 0, 0.0, LeafPattern::Parallel),
            target_stem_length: 0,
            placed_stems: 0,
            cursor: GridCoord::ORIGIN,
            next_leaf_side: LeafSide::Left,
            progress: 0.0,
            ticks_per_stage: 1.0,
            blocked_attempts: 0,
            max_blocked_attempts: 1,
        }
    }

    /// Current state.
    pub const fn state(&self) -> GrowthState {
        self.state
    }

    /// Stem length this machine grows to.
    pub const fn target_stem_length(&self) -> u32 {
        self.target_stem_length
    }

    /// Stems placed so far.
    pub const fn placed_stems(&self) -> u32 {
        self.placed_stems
    }

    /// Parameters in effect.
    pub const fn params(&self) -> &GrowthParams {
        &self.params
    }

    /// Replace the shape parameters after the passive list changed. The
    /// sampled target length is kept.
    pub fn set_params(&mut self, params: GrowthParams) {
        self.params = params;
    }

    /// Advance by one growth tick at `speed` (growth-speed multiplier times
    /// terrain multiplier).
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        grid: &mut GrowthGrid,
        speed: f64,
        rng: &mut R,
    ) -> GrowthTick {
        let mut report = GrowthTick::default();
        if self.state == GrowthState::Complete {
            return report;
        }
        if self.placed_stems >= self.target_stem_length {
            self.complete(&mut report);
            return report;
        }

        self.progress += speed.max(0.0);
        if self.progress < self.ticks_per_stage {
            return report;
        }
        self.progress = (self.progress - self.ticks_per_stage).clamp(0.0, self.ticks_per_stage);

        self.step(grid, rng, &mut report);
        report
    }

    fn step<R: Rng + ?Sized>(&mut self, grid: &mut GrowthGrid, rng: &mut R, report: &mut GrowthTick) {
        let heading = direction::choose(self.params.randomness, rng);
        let placed = self
            .cursor
            .step(heading)
            .ok_or(GrowthError::CoordinateOverflow { from: self.cursor })
            .and_then(|next| grid.place(next, CellKind::Stem).map(|()| next));

        let next = match placed {
            Ok(next) => next,
            Err(err) => {
                warn!(%err, cursor = %self.cursor, ?heading, "Stem step blocked");
                report.conflicts.push(err);
                self.blocked_attempts = self.blocked_attempts.saturating_add(1);
                if self.blocked_attempts >= self.max_blocked_attempts {
                    warn!(
                        placed_stems = self.placed_stems,
                        target_stem_length = self.target_stem_length,
                        "Growth stunted after repeated conflicts"
                    );
                    self.complete(report);
                }
                return;
            }
        };

        self.cursor = next;
        self.blocked_attempts = 0;
        self.placed_stems = self.placed_stems.saturating_add(1);
        report.placed.push((next, CellKind::Stem));

        let interval = self.params.leaf_gap.saturating_add(1);
        if self.placed_stems.checked_rem(interval) == Some(0) {
            self.place_leaves(grid, report);
        }

        if self.placed_stems >= self.target_stem_length {
            self.complete(report);
        }
    }

    fn place_leaves(&mut self, grid: &mut GrowthGrid, report: &mut GrowthTick) {
        let sides: &[LeafSide] = match self.params.leaf_pattern {
            LeafPattern::Parallel => &[LeafSide::Left, LeafSide::Right],
            LeafPattern::Alternating => {
                let side = self.next_leaf_side;
                self.next_leaf_side = side.opposite();
                match side {
                    LeafSide::Left => &[LeafSide::Left],
                    LeafSide::Right => &[LeafSide::Right],
                }
            }
        };
        for side in sides {
            let Some(coord) = self.cursor.beside(*side) else {
                continue;
            };
            match grid.place(coord, CellKind::Leaf) {
                Ok(()) => report.placed.push((coord, CellKind::Leaf)),
                Err(err) => {
                    debug!(%err, "Leaf skipped");
                    report.conflicts.push(err);
                }
            }
        }
    }

    fn complete(&mut self, report: &mut GrowthTick) {
        self.state = GrowthState::Complete;
        report.completed = true;
        info!(
            placed_stems = self.placed_stems,
            target_stem_length = self.target_stem_length,
            "Growth complete"
        );
    }
}
