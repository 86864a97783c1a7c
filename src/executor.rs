use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use num_bigint::BigUint;
use num_traits::ToPrimitive;
use tokio::sync::mpsc;
use tokio::task::JoinError;
use tracing::{debug, error, info, instrument};

use crate::{
    error::{Error, Result},
    metrics,
    ranges::{RangeSet, Shard},
    scan::{candidate_count, scan_with, PrimalityTest, PrimeSequence},
};

/// Wall-clock time one worker spent on the shards it pulled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimingSample {
    pub worker: usize,
    pub shards: usize,
    pub integers: BigUint,
    pub elapsed: Duration,
}

#[derive(Debug, Clone)]
pub struct SequentialRun {
    pub primes: PrimeSequence,
    pub elapsed: Duration,
}

#[derive(Debug, Clone)]
pub struct ParallelRun {
    pub primes: PrimeSequence,
    pub timings: Vec<TimingSample>,
    pub elapsed: Duration,
}

struct ShardOutcome {
    worker: usize,
    shard: usize,
    primes: PrimeSequence,
}

/// Runs scans over a fixed pool of workers.
///
/// Workers pull shard indices from a shared counter until none are left, so a
/// worker that finishes early takes over the remaining shards. Finished shards
/// travel over a channel to the caller, which is the only place results are
/// merged.
pub struct Executor<T> {
    workers: usize,
    test: Arc<T>,
}

impl<T: PrimalityTest + 'static> Executor<T> {
    pub fn new(workers: usize, test: T) -> Result<Self> {
        if workers == 0 {
            return Err(Error::NoWorkers);
        }
        Ok(Self {
            workers,
            test: Arc::new(test),
        })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Single-threaded baseline over the normalized ranges.
    #[instrument(skip_all, fields(ranges = ranges.len()))]
    pub fn run_sequential(&self, ranges: &RangeSet) -> SequentialRun {
        let start = Instant::now();
        let primes: PrimeSequence = ranges
            .iter()
            .flat_map(|range| scan_with(range, self.test.as_ref()))
            .collect();
        let elapsed = start.elapsed();
        info!("Sequential scan found {} primes in {:?}", primes.len(), elapsed);
        SequentialRun { primes, elapsed }
    }

    #[instrument(skip_all, fields(shards = shards.len(), workers = self.workers))]
    pub async fn run_parallel(&self, shards: Vec<Shard>) -> Result<ParallelRun> {
        let start = Instant::now();
        let shards = Arc::new(shards);
        let next_shard = Arc::new(AtomicUsize::new(0));
        let (results_tx, mut results_rx) = mpsc::unbounded_channel();

        let handles: Vec<_> = (0..self.workers)
            .map(|worker| {
                let shards = shards.clone();
                let next_shard = next_shard.clone();
                let results_tx = results_tx.clone();
                let test = self.test.clone();
                tokio::task::spawn_blocking(move || {
                    scan_shards(worker, &shards, &next_shard, test.as_ref(), &results_tx)
                })
            })
            .collect();
        // The channel closes once every worker has dropped its sender
        drop(results_tx);

        let mut primes = PrimeSequence::new();
        while let Some(outcome) = results_rx.recv().await {
            debug!(
                "Worker {} finished shard {} with {} primes",
                outcome.worker,
                outcome.shard,
                outcome.primes.len()
            );
            primes.extend(outcome.primes);
        }

        let mut timings = Vec::with_capacity(self.workers);
        for (worker, result) in futures::future::join_all(handles)
            .await
            .into_iter()
            .enumerate()
        {
            match result {
                Ok(sample) => timings.push(sample),
                Err(e) => {
                    metrics::WORKER_FAULTS.inc();
                    return Err(Error::WorkerFault {
                        worker,
                        reason: describe_join_error(e),
                    });
                }
            }
        }

        // Shards complete in any order
        primes.sort_unstable();
        let elapsed = start.elapsed();
        info!("Parallel scan found {} primes in {:?}", primes.len(), elapsed);
        Ok(ParallelRun {
            primes,
            timings,
            elapsed,
        })
    }
}

fn scan_shards<T: PrimalityTest>(
    worker: usize,
    shards: &[Shard],
    next_shard: &AtomicUsize,
    test: &T,
    results: &mpsc::UnboundedSender<ShardOutcome>,
) -> TimingSample {
    let start = Instant::now();
    let mut sample = TimingSample {
        worker,
        shards: 0,
        integers: BigUint::default(),
        elapsed: Duration::ZERO,
    };
    while let Some(shard) = shards.get(next_shard.fetch_add(1, Ordering::Relaxed)) {
        let mut primes = PrimeSequence::new();
        for range in &shard.ranges {
            primes.extend(scan_with(range, test));
        }

        let candidates: BigUint = shard.ranges.iter().map(candidate_count).sum();
        metrics::CANDIDATES_TESTED.inc_by(candidates.to_u64().unwrap_or(u64::MAX));
        metrics::PRIMES_FOUND.inc_by(primes.len() as u64);
        metrics::SHARDS_SCANNED.inc();
        sample.shards += 1;
        sample.integers += shard.total_len();

        let outcome = ShardOutcome {
            worker,
            shard: shard.index,
            primes,
        };
        if results.send(outcome).is_err() {
            error!("Shard result couldn't be sent");
            break;
        }
    }
    sample.elapsed = start.elapsed();
    sample
}

fn describe_join_error(err: JoinError) -> String {
    if !err.is_panic() {
        return err.to_string();
    }
    let payload = err.into_panic();
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "worker panicked".to_owned()
    }
}
