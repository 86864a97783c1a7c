use std::time::Duration;

use serde::Serialize;

use crate::executor::{ParallelRun, SequentialRun};
use crate::ranges::RangeSet;

#[derive(Debug, Clone, Serialize)]
pub struct WorkerReport {
    pub worker: usize,
    pub shards: usize,
    pub integers: String,
    pub elapsed_secs: f64,
    /// Share of the summed elapsed time of all workers.
    pub share_percent: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub workers: usize,
    pub rounds: usize,
    pub ranges: Vec<String>,
    pub range_count: usize,
    pub sequential_count: usize,
    pub parallel_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primes: Option<Vec<String>>,
    pub worker_timings: Vec<WorkerReport>,
    pub normalization_secs: f64,
    pub sequential_secs: f64,
    pub parallel_secs: f64,
    pub total_sequential_secs: f64,
    pub total_parallel_secs: f64,
    pub speedup: f64,
}

impl Report {
    pub fn new(
        rounds: usize,
        ranges: &RangeSet,
        normalization: Duration,
        sequential: &SequentialRun,
        parallel: &ParallelRun,
        include_primes: bool,
    ) -> Self {
        let worker_time: f64 = parallel
            .timings
            .iter()
            .map(|t| t.elapsed.as_secs_f64())
            .sum();
        let worker_timings = parallel
            .timings
            .iter()
            .map(|t| WorkerReport {
                worker: t.worker,
                shards: t.shards,
                integers: t.integers.to_string(),
                elapsed_secs: t.elapsed.as_secs_f64(),
                share_percent: percentage(t.elapsed.as_secs_f64(), worker_time),
            })
            .collect();

        let normalization_secs = normalization.as_secs_f64();
        let sequential_secs = sequential.elapsed.as_secs_f64();
        let parallel_secs = parallel.elapsed.as_secs_f64();
        Self {
            workers: parallel.timings.len(),
            rounds,
            ranges: ranges.iter().map(ToString::to_string).collect(),
            range_count: ranges.len(),
            sequential_count: sequential.primes.len(),
            parallel_count: parallel.primes.len(),
            primes: include_primes
                .then(|| parallel.primes.iter().map(ToString::to_string).collect()),
            worker_timings,
            normalization_secs,
            sequential_secs,
            parallel_secs,
            total_sequential_secs: normalization_secs + sequential_secs,
            total_parallel_secs: normalization_secs + parallel_secs,
            speedup: speedup(sequential_secs, parallel_secs),
        }
    }
}

fn percentage(part: f64, total: f64) -> f64 {
    if total > 0.0 {
        part / total * 100.0
    } else {
        0.0
    }
}

fn speedup(sequential: f64, parallel: f64) -> f64 {
    if parallel > 0.0 {
        sequential / parallel
    } else {
        0.0
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "--- Prime Numbers ---")?;
        if let Some(primes) = &self.primes {
            writeln!(f, "{}", primes.join(" "))?;
        }
        writeln!(
            f,
            "{} prime numbers found with sequential method",
            self.sequential_count
        )?;
        writeln!(
            f,
            "{} prime numbers found with parallel method",
            self.parallel_count
        )?;

        writeln!(f, "\n--- Optimized Intervals ---")?;
        writeln!(
            f,
            "{} intervals to handle during prime computing",
            self.range_count
        )?;
        for (index, range) in self.ranges.iter().enumerate() {
            writeln!(f, "Interval {index}: {range}")?;
        }

        writeln!(f, "\n--- Workers ---")?;
        writeln!(f, "{} workers, {} test rounds", self.workers, self.rounds)?;
        for w in &self.worker_timings {
            writeln!(
                f,
                "Worker {:2}: {:.6} sec ({:5.1}%), {} shards, {} integers",
                w.worker, w.elapsed_secs, w.share_percent, w.shards, w.integers
            )?;
        }

        writeln!(f, "\n--- Execution Time ---")?;
        writeln!(f, "Interval optimization time: {:.6} sec", self.normalization_secs)?;
        writeln!(
            f,
            "Total sequential execution time: {:.6} sec",
            self.total_sequential_secs
        )?;
        writeln!(
            f,
            "Total parallel execution time: {:.6} sec",
            self.total_parallel_secs
        )?;
        write!(f, "Speedup: {:.3}", self.speedup)
    }
}
