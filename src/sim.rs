//! Falling-glyph simulation.
//!
//! [`Simulator`] owns a fixed population of glyph instances and the cell
//! grid they fall within. The driver steps it with elapsed wall-clock
//! seconds and takes a [`Frame`] each cycle for the renderer. A `Frame`
//! borrows the simulator, so a snapshot cannot be kept alive across the
//! next `step` call.

use rand::Rng;
use thiserror::Error;
use tracing::debug;

use crate::vec::Vec2;

/// Glyph instances in the field, fixed for the life of a simulator.
pub const INSTANCE_COUNT: usize = 128;

/// Downward drift in grid cells per second.
pub const FALL_SPEED: f64 = 6.0;

/// Number of intensity tiers; instance tiers are `0..TIER_COUNT`.
pub const TIER_COUNT: u8 = 3;

/// One falling symbol on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphInstance {
    /// Cell position, bounded by the simulator's grid.
    pub pos: Vec2<usize>,
    /// Index into the glyph atlas.
    pub glyph: u8,
    /// Intensity class, 0 (head, brightest) to `TIER_COUNT - 1` (dim).
    pub tier: u8,
}

#[derive(Debug, Error)]
pub enum SimError {
    #[error("cannot reserve space for {count} glyph instances")]
    Allocation { count: usize },
    #[error("grid must have at least one cell, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },
}

/// Owned simulation state: the grid size and the glyph population.
///
/// Teardown is ordinary drop. A fresh field after teardown means
/// constructing a new value, so stepping or snapshotting a dead store is
/// not expressible.
pub struct Simulator {
    grid: Vec2<usize>,
    instances: Vec<GlyphInstance>,
}

impl Simulator {
    /// Builds a field of [`INSTANCE_COUNT`] randomized instances.
    ///
    /// Positions are drawn uniformly over the grid; glyph and tier are
    /// drawn uniformly over their full ranges. The caller supplies the
    /// RNG: the app passes `rand::thread_rng()`, tests a seeded `StdRng`.
    pub fn new<R: Rng>(grid: Vec2<usize>, rng: &mut R) -> Result<Self, SimError> {
        if grid.x == 0 || grid.y == 0 {
            return Err(SimError::EmptyGrid {
                width: grid.x,
                height: grid.y,
            });
        }

        let mut instances = Vec::new();
        instances
            .try_reserve_exact(INSTANCE_COUNT)
            .map_err(|_| SimError::Allocation {
                count: INSTANCE_COUNT,
            })?;
        for _ in 0..INSTANCE_COUNT {
            instances.push(GlyphInstance {
                pos: [rng.gen_range(0..grid.x), rng.gen_range(0..grid.y)].into(),
                glyph: rng.gen(),
                tier: rng.gen_range(0..TIER_COUNT),
            });
        }

        debug!(width = grid.x, height = grid.y, count = instances.len(), "glyph field seeded");
        Ok(Self { grid, instances })
    }

    /// Advances every instance by `floor(elapsed_seconds * FALL_SPEED)`
    /// cells. An instance pushed past the bottom edge snaps back to row 0.
    /// Only rows move; columns, glyphs and tiers are stable.
    pub fn step(&mut self, elapsed_seconds: f64) {
        let delta = fall_delta(elapsed_seconds);
        for inst in &mut self.instances {
            inst.pos.y = advance_row(inst.pos.y, delta, self.grid.y);
        }
    }

    /// Snapshot of the current field. Take a fresh one every render cycle;
    /// it cannot outlive the next [`step`](Self::step).
    pub fn frame(&self) -> Frame<'_> {
        Frame {
            instances: &self.instances,
        }
    }

    pub fn grid_size(&self) -> Vec2<usize> {
        self.grid
    }
}

impl Drop for Simulator {
    fn drop(&mut self) {
        debug!(count = self.instances.len(), "glyph field released");
    }
}

/// Cells fallen over `elapsed_seconds`. Negative and NaN elapsed times
/// count as zero rather than truncating through undefined casts; an
/// infinite elapsed time saturates.
fn fall_delta(elapsed_seconds: f64) -> usize {
    (elapsed_seconds.max(0.0) * FALL_SPEED) as usize
}

/// Next row after falling `delta` cells on a grid `height` cells tall.
/// Crossing the bottom edge resets to row 0 exactly, not modulo height,
/// so a large delta reads as a snap to the top.
fn advance_row(row: usize, delta: usize, height: usize) -> usize {
    let next = row.saturating_add(delta);
    if next >= height {
        0
    } else {
        next
    }
}

/// Borrowed, read-only view of the field for one render cycle.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    instances: &'a [GlyphInstance],
}

impl<'a> Frame<'a> {
    pub fn instances(&self) -> &'a [GlyphInstance] {
        self.instances
    }

    /// Always [`INSTANCE_COUNT`] for a live simulator.
    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn seeded_sim(width: usize, height: usize) -> Simulator {
        let mut rng = StdRng::seed_from_u64(0x5EED);
        Simulator::new([width, height].into(), &mut rng).expect("grid is non-empty")
    }

    #[test]
    fn fresh_field_is_full_and_in_bounds() {
        let sim = seeded_sim(80, 25);
        let frame = sim.frame();
        assert_eq!(frame.len(), INSTANCE_COUNT);
        assert!(!frame.is_empty());
        for inst in frame.instances() {
            assert!(inst.pos.x < 80);
            assert!(inst.pos.y < 25);
            assert!(inst.tier < TIER_COUNT);
        }
    }

    #[test]
    fn stepping_keeps_rows_in_bounds() {
        let mut sim = seeded_sim(80, 25);
        for _ in 0..1000 {
            sim.step(0.37);
        }
        assert_eq!(sim.frame().len(), INSTANCE_COUNT);
        assert!(sim.frame().instances().iter().all(|i| i.pos.y < 25));
    }

    #[test]
    fn bottom_edge_snaps_to_top() {
        // 24 + 6 lands outside a 25-row grid: reset, not 30 - 25.
        assert_eq!(advance_row(24, 6, 25), 0);
        // Not a modulo wrap either (31 % 25 would be 6).
        assert_eq!(advance_row(24, 7, 25), 0);
        // Inside the grid it is a plain drop.
        assert_eq!(advance_row(18, 6, 25), 24);
    }

    #[test]
    fn sub_cell_elapsed_time_is_a_zero_delta() {
        assert_eq!(fall_delta(1.0), 6);
        assert_eq!(fall_delta(0.1), 0);
        assert_eq!(fall_delta(0.0), 0);
    }

    #[test]
    fn hostile_elapsed_time_is_deterministic() {
        assert_eq!(fall_delta(-5.0), 0);
        assert_eq!(fall_delta(f64::NAN), 0);
        assert_eq!(fall_delta(f64::NEG_INFINITY), 0);
        assert_eq!(fall_delta(f64::INFINITY), usize::MAX);
    }

    #[test]
    fn infinite_step_resets_every_row() {
        let mut sim = seeded_sim(80, 25);
        sim.step(f64::INFINITY);
        assert!(sim.frame().instances().iter().all(|i| i.pos.y == 0));
    }

    #[test]
    fn single_row_grid_pins_to_top() {
        let mut sim = seeded_sim(10, 1);
        sim.step(1.0);
        assert!(sim.frame().instances().iter().all(|i| i.pos.y == 0));
    }

    #[test]
    fn step_only_touches_rows() {
        let mut sim = seeded_sim(40, 30);
        let before: Vec<GlyphInstance> = sim.frame().instances().to_vec();

        sim.step(0.0);
        assert_eq!(sim.frame().instances(), &before[..]);

        for _ in 0..50 {
            sim.step(0.7);
        }
        for (now, then) in sim.frame().instances().iter().zip(&before) {
            assert_eq!(now.pos.x, then.pos.x);
            assert_eq!(now.glyph, then.glyph);
            assert_eq!(now.tier, then.tier);
        }
    }

    #[test]
    fn teardown_and_reinit_yields_a_fresh_full_field() {
        let sim = seeded_sim(80, 25);
        drop(sim);

        let again = seeded_sim(80, 25);
        assert_eq!(again.frame().len(), INSTANCE_COUNT);
        assert!(again
            .frame()
            .instances()
            .iter()
            .all(|i| i.pos.x < 80 && i.pos.y < 25));
    }

    #[test]
    fn empty_grid_is_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            Simulator::new([0, 25].into(), &mut rng),
            Err(SimError::EmptyGrid {
                width: 0,
                height: 25
            })
        ));
        assert!(matches!(
            Simulator::new([80, 0].into(), &mut rng),
            Err(SimError::EmptyGrid { .. })
        ));
    }
}
