//! Frame index sampling with a minimum spacing between consecutive picks.

use crate::error::{DriverError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

/// Default spacing between consecutive frame indices
pub const DEFAULT_MIN_SPACING: u32 = 10;

/// Default highest frame index (inclusive)
pub const DEFAULT_MAX_INDEX: u32 = 254;

/// Sampling parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingConfig {
    /// Smallest allowed distance between consecutive indices
    pub min_spacing: u32,
    /// Indices are drawn from `0..=max_index`
    pub max_index: u32,
    /// Fixed seed for reproducible runs; entropy when `None`
    pub seed: Option<u64>,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            min_spacing: DEFAULT_MIN_SPACING,
            max_index: DEFAULT_MAX_INDEX,
            seed: None,
        }
    }
}

/// Iteration bounds, read like a half-open `start..nframes` stepped range.
///
/// Only the number of iterations matters: the loop counter never picks the
/// frame, the sampler does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    pub start: u32,
    pub nframes: u32,
    pub step: u32,
}

impl Schedule {
    pub fn new(start: u32, nframes: u32, step: u32) -> Self {
        Self { start, nframes, step }
    }

    /// `ceil((nframes - start) / step)`, zero for an empty range.
    ///
    /// A zero step has no iteration count and is rejected.
    pub fn iteration_count(&self) -> Result<usize> {
        if self.step == 0 {
            return Err(DriverError::ZeroStep {
                start: self.start,
                nframes: self.nframes,
            });
        }
        if self.nframes <= self.start {
            return Ok(0);
        }
        Ok((self.nframes - self.start).div_ceil(self.step) as usize)
    }
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            start: 125,
            nframes: 145,
            step: 1,
        }
    }
}

/// Draw a frame index in `0..=max_index` at least `min_spacing` away from
/// `previous`.
///
/// Redraws until the spacing holds, with no cap; see
/// [`FrameSampler::can_stall`] for the configurations where that never
/// happens.
pub fn sample_frame_index<R: Rng>(
    rng: &mut R,
    previous: Option<u32>,
    min_spacing: u32,
    max_index: u32,
) -> u32 {
    loop {
        let index = rng.gen_range(0..=max_index);
        match previous {
            Some(prev) if index.abs_diff(prev) < min_spacing => continue,
            _ => return index,
        }
    }
}

/// Stateful sampler that remembers the last index it handed out.
pub struct FrameSampler<R = StdRng> {
    rng: R,
    min_spacing: u32,
    max_index: u32,
    previous: Option<u32>,
}

impl FrameSampler<StdRng> {
    /// Build a sampler from config, seeding from entropy unless a seed is set.
    pub fn from_config(config: &SamplingConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(rng, config.min_spacing, config.max_index)
    }
}

impl<R: Rng> FrameSampler<R> {
    pub fn with_rng(rng: R, min_spacing: u32, max_index: u32) -> Self {
        let sampler = Self {
            rng,
            min_spacing,
            max_index,
            previous: None,
        };
        if sampler.can_stall() {
            warn!(
                "Frame spacing {} over 0..={} can leave no valid index; sampling may not terminate",
                min_spacing, max_index
            );
        }
        sampler
    }

    /// Next index, at least `min_spacing` from the one before it.
    pub fn next_index(&mut self) -> u32 {
        let index =
            sample_frame_index(&mut self.rng, self.previous, self.min_spacing, self.max_index);
        debug!(index, previous = ?self.previous, "Sampled frame");
        self.previous = Some(index);
        index
    }

    /// Last index handed out, if any
    pub fn previous(&self) -> Option<u32> {
        self.previous
    }

    /// True when some previous index leaves every candidate too close.
    ///
    /// A previous index `p` is a dead end when `p < spacing` and
    /// `p + spacing > max_index`; such a `p` exists exactly when
    /// `2 * spacing >= max_index + 2`.
    pub fn can_stall(&self) -> bool {
        let spacing = self.min_spacing as u64;
        spacing > 0 && 2 * spacing >= self.max_index as u64 + 2
    }
}

impl<R: Rng> Iterator for FrameSampler<R> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        Some(self.next_index())
    }
}
