use num_bigint::BigUint;
use num_traits::{One, ToPrimitive};
use tracing::{debug, instrument};

use crate::error::{Error, Result};

use super::{Range, RangeSet};

/// Work assigned to a single worker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Shard {
    pub index: usize,
    pub ranges: RangeSet,
}

impl Shard {
    pub fn total_len(&self) -> BigUint {
        self.ranges.total_len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

/// Splits `range` into `min(pieces, range.len())` consecutive sub-ranges.
///
/// With `len = S` and `n` pieces, the first `S mod n` pieces hold `S / n + 1`
/// integers and the rest hold `S / n`.
pub fn split_range(range: &Range, pieces: usize) -> Vec<Range> {
    let span = range.len();
    let count = span
        .to_usize()
        .map_or(pieces.max(1), |s| s.min(pieces.max(1)));
    let divisor = BigUint::from(count);
    let length = &span / &divisor;
    // always below `count`
    let mut remainder = (&span % &divisor).to_usize().unwrap_or_default();

    let mut result = Vec::with_capacity(count);
    let mut begin = range.low.clone();
    for _ in 0..count {
        let size = if remainder > 0 {
            remainder -= 1;
            &length + BigUint::one()
        } else {
            length.clone()
        };
        let end = &begin + &size - BigUint::one();
        let next = &end + BigUint::one();
        result.push(Range { low: begin, high: end });
        begin = next;
    }
    result
}

/// Distributes `ranges` over exactly `worker_count` shards of near-equal size.
///
/// Every range is split into `worker_count` pieces which are dealt round-robin.
/// The dealing for each range starts where the larger pieces of the previous
/// range stopped, so shard sizes differ by at most one integer overall.
/// Shards may be empty when there are fewer integers than workers.
#[instrument(skip_all, fields(ranges = ranges.len(), worker_count = worker_count))]
pub fn partition(ranges: &RangeSet, worker_count: usize) -> Result<Vec<Shard>> {
    if worker_count == 0 {
        return Err(Error::NoWorkers);
    }
    let mut shards: Vec<Shard> = (0..worker_count)
        .map(|index| Shard {
            index,
            ranges: RangeSet::new(),
        })
        .collect();

    let workers = BigUint::from(worker_count);
    let mut cursor = 0;
    for range in ranges {
        for (offset, piece) in split_range(range, worker_count).into_iter().enumerate() {
            shards[(cursor + offset) % worker_count].ranges.push(piece);
        }
        let larger_pieces = (range.len() % &workers).to_usize().unwrap_or_default();
        cursor = (cursor + larger_pieces) % worker_count;
    }

    debug!(
        "Shard sizes: {:?}",
        shards.iter().map(|s| s.total_len().to_string()).collect::<Vec<_>>()
    );
    debug_assert!(shards.iter().map(Shard::total_len).sum::<BigUint>() == ranges.total_len());
    Ok(shards)
}
