//! Batch-parallel generation.
//!
//! `count` is split into contiguous batches; batch `i` draws from its own generator
//! seeded with [batch_seed]`(seed, i)`. Batches run on a Rayon pool and are concatenated
//! in batch-index order, so output depends on `(count, seed, batches)` only, never on
//! thread count or scheduling.

use rayon::prelude::*;

use crate::config::GeneratorConfig;
use crate::generator::{mix64, Generator, Record};
use crate::parallel::pool::{PoolError, WorkerPool};

/// Split `total` items into up to `num_batches` ranges `[start, end)`.
/// Batches are as equal in size as possible; earlier batches take the remainder.
///
/// # Example
/// ```
/// # use acme_synth::parallel::batch_ranges;
/// let ranges = batch_ranges(100, 4);
/// assert_eq!(ranges, vec![(0, 25), (25, 50), (50, 75), (75, 100)]);
/// ```
pub fn batch_ranges(total: usize, num_batches: usize) -> Vec<(usize, usize)> {
    if total == 0 || num_batches == 0 {
        return Vec::new();
    }
    let num_batches = num_batches.min(total);
    let base = total / num_batches;
    let remainder = total % num_batches;
    let mut ranges = Vec::with_capacity(num_batches);
    let mut start = 0;
    for i in 0..num_batches {
        let size = base + if i < remainder { 1 } else { 0 };
        let end = start + size;
        ranges.push((start, end));
        start = end;
    }
    ranges
}

/// Seed for batch `index`. Batch 0 keeps the run seed, so a single batch reproduces
/// sequential generation exactly.
pub fn batch_seed(seed: u64, index: usize) -> u64 {
    if index == 0 {
        seed
    } else {
        mix64(seed ^ mix64(index as u64))
    }
}

/// Generate `count` records in `batches` independently seeded batches on `pool`.
pub fn generate_parallel(
    config: &GeneratorConfig,
    count: usize,
    seed: u64,
    batches: usize,
    pool: &WorkerPool,
) -> Result<Vec<Record>, PoolError> {
    let ranges = batch_ranges(count, batches.max(1));
    tracing::debug!(count, seed, batches = ranges.len(), workers = pool.workers, "parallel generation");
    let generator = Generator::new(config);

    let chunks: Vec<Vec<Record>> = pool.install(|| {
        ranges
            .par_iter()
            .enumerate()
            .map(|(index, &(start, end))| generator.generate(end - start, batch_seed(seed, index)))
            .collect()
    })?;

    let mut records = Vec::with_capacity(count);
    for chunk in chunks {
        records.extend(chunk);
    }
    Ok(records)
}
