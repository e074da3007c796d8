//! Obstacle spawner
//!
//! Recycles pipe pairs that scrolled off the left edge: each one is moved to
//! one spacing past the rightmost pair and given a fresh gap height. The gap
//! sequence comes from a seeded PCG stream, so a run is reproducible.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::world::PipePair;
use crate::tuning::Tuning;

/// Repositions pipe pairs on a fixed distance cadence
#[derive(Debug, Clone)]
pub struct Spawner {
    seed: u64,
    rng: Pcg32,
    spacing: f32,
    gap: f32,
    floor_top: f32,
    band: (f32, f32),
    start_x: Vec<f32>,
    /// Scratch buffer for recycle ordering
    order: Vec<usize>,
}

impl Spawner {
    pub fn new(tuning: &Tuning, seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            spacing: tuning.pipe_spacing,
            gap: tuning.pipe_gap,
            floor_top: tuning.floor_top(),
            band: tuning.gap_band(),
            start_x: (0..tuning.pipe_count).map(|i| tuning.pipe_start_x(i)).collect(),
            order: Vec::with_capacity(tuning.pipe_count),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform sample from the safe gap band
    fn sample_gap_center(&mut self) -> f32 {
        let (lo, hi) = self.band;
        if lo < hi {
            self.rng.random_range(lo..=hi)
        } else {
            lo
        }
    }

    /// Put every pair back at its staggered start position with a fresh gap
    ///
    /// Reseeds from the run seed, so calling this twice yields the same layout.
    pub fn reset_pipes(&mut self, pipes: &mut [PipePair]) {
        self.rng = Pcg32::seed_from_u64(self.seed);

        for (i, pair) in pipes.iter_mut().enumerate() {
            let x = match self.start_x.get(i) {
                Some(&x) => x,
                // Extra pairs keep stepping by one spacing past the last start
                None => {
                    let extra = (i + 1 - self.start_x.len()) as f32;
                    self.start_x.last().copied().unwrap_or(0.0) + extra * self.spacing
                }
            };
            let center = self.sample_gap_center();
            pair.set_x(x);
            pair.set_gap(center, self.gap, self.floor_top);
            pair.scored = false;
        }

        log::debug!("Pipes reset (seed {}, {} pairs)", self.seed, pipes.len());
    }

    /// Move pairs whose right edge crossed the left viewport boundary
    ///
    /// Pairs are visited in ascending x so a recycled pair always lands after
    /// every pair still on screen. Returns the number of recycled pairs.
    pub fn recycle(&mut self, pipes: &mut [PipePair]) -> usize {
        if pipes.is_empty() {
            return 0;
        }

        self.order.clear();
        self.order.extend(0..pipes.len());
        self.order
            .sort_by(|&a, &b| pipes[a].x().total_cmp(&pipes[b].x()).then(a.cmp(&b)));

        let mut max_x = pipes
            .iter()
            .map(PipePair::x)
            .fold(f32::NEG_INFINITY, f32::max);

        let mut recycled = 0;
        for k in 0..self.order.len() {
            let i = self.order[k];
            if pipes[i].right() >= 0.0 {
                // Sorted by x with equal widths: nothing further right is off screen
                break;
            }

            let x = max_x + self.spacing;
            let center = self.sample_gap_center();
            let pair = &mut pipes[i];
            pair.set_x(x);
            pair.set_gap(center, self.gap, self.floor_top);
            pair.scored = false;

            max_x = x;
            recycled += 1;
            log::trace!("Recycled pipe {} to x={:.1}, gap={:.1}", i, x, center);
        }

        recycled
    }
}
