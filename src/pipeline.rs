use std::time::Instant;

use tracing::{info, instrument};

use crate::{
    error::{Error, Result},
    executor::Executor,
    ranges::{normalize, partition, RangeStore},
    report::Report,
    scan::{MillerRabin, DEFAULT_ROUNDS},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    pub workers: usize,
    pub rounds: usize,
    pub include_primes: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            workers: 1,
            rounds: DEFAULT_ROUNDS,
            include_primes: false,
        }
    }
}

/// Normalizes the stored ranges, scans them sequentially and in parallel, and
/// checks that both scans agree.
#[instrument(skip_all, fields(workers = config.workers, rounds = config.rounds))]
pub async fn run(config: &RunConfig, store: &RangeStore) -> Result<Report> {
    let executor = Executor::new(config.workers, MillerRabin::new(config.rounds))?;
    let ranges = store.ranges()?;

    let start = Instant::now();
    let normalized = normalize(ranges, config.workers);
    let normalization = start.elapsed();
    info!(
        "Normalized {} ranges into {} in {:?}",
        store.len(),
        normalized.len(),
        normalization
    );

    let sequential = executor.run_sequential(&normalized);

    // Partitioning is part of the measured parallel run
    let start = Instant::now();
    let shards = partition(&normalized, config.workers)?;
    let mut parallel = executor.run_parallel(shards).await?;
    parallel.elapsed = start.elapsed();

    if parallel.primes != sequential.primes {
        return Err(Error::Divergence {
            sequential: sequential.primes.len(),
            parallel: parallel.primes.len(),
        });
    }

    Ok(Report::new(
        config.rounds,
        &normalized,
        normalization,
        &sequential,
        &parallel,
        config.include_primes,
    ))
}
