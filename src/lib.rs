//! Parallel prime search over arbitrary-precision integer ranges.
//!
//! Ranges are normalized into a disjoint set, partitioned into equally sized
//! shards and scanned with a probabilistic primality test by a fixed pool of
//! workers. A sequential scan over the same ranges serves as baseline.

pub mod error;
pub mod executor;
pub mod metrics;
pub mod pipeline;
pub mod ranges;
pub mod report;
pub mod scan;
pub mod util;

pub use error::{Error, Result};
pub use executor::{Executor, ParallelRun, SequentialRun, TimingSample};
pub use pipeline::RunConfig;
pub use ranges::{normalize, partition, split_range, Range, RangeSet, RangeStore, Shard};
pub use report::Report;
pub use scan::{scan, scan_with, MillerRabin, PrimalityTest, PrimeSequence, DEFAULT_ROUNDS};
