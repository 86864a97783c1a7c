use std::ops::Deref;

use itertools::Itertools;
use num_bigint::BigUint;
use num_traits::One;

use crate::error::{Error, Result};

pub mod normalize;
pub mod partition;
pub mod store;

pub use normalize::normalize;
pub use partition::{partition, split_range, Shard};
pub use store::RangeStore;

/// Inclusive interval `[low, high]` of non-negative integers.
#[derive(PartialOrd, Ord, PartialEq, Eq, Debug, Clone, Hash)]
pub struct Range {
    // Field order matters: derived `Ord` sorts by `low`, then by `high`.
    low: BigUint,
    high: BigUint,
}

impl Range {
    pub fn new(low: impl Into<BigUint>, high: impl Into<BigUint>) -> Result<Self> {
        let (low, high) = (low.into(), high.into());
        if low > high {
            return Err(Error::InvalidRange { low, high });
        }
        Ok(Self { low, high })
    }

    pub fn low(&self) -> &BigUint {
        &self.low
    }

    pub fn high(&self) -> &BigUint {
        &self.high
    }

    /// Number of integers covered, never zero.
    pub fn len(&self) -> BigUint {
        &self.high - &self.low + BigUint::one()
    }

    pub fn contains(&self, value: &BigUint) -> bool {
        &self.low <= value && value <= &self.high
    }
}

impl std::fmt::Display for Range {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.low, self.high)
    }
}

/// Ascending sequence of strictly disjoint ranges.
#[repr(transparent)]
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct RangeSet {
    inner: Vec<Range>,
}

impl RangeSet {
    pub fn new() -> Self {
        Self { inner: Vec::new() }
    }

    // Callers uphold the ordering invariant; checked in debug builds only.
    pub(crate) fn from_sorted(inner: Vec<Range>) -> Self {
        debug_assert!(inner.iter().tuple_windows().all(|(a, b)| a.high < b.low));
        Self { inner }
    }

    pub(crate) fn push(&mut self, range: Range) {
        debug_assert!(self.inner.last().map_or(true, |last| last.high < range.low));
        self.inner.push(range);
    }

    /// Total number of integers covered by all ranges.
    pub fn total_len(&self) -> BigUint {
        self.inner.iter().map(Range::len).sum()
    }

    pub fn into_inner(self) -> Vec<Range> {
        self.inner
    }
}

impl Deref for RangeSet {
    type Target = [Range];
    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<'a> IntoIterator for &'a RangeSet {
    type Item = &'a Range;
    type IntoIter = std::slice::Iter<'a, Range>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use num_bigint::BigUint;

    use super::{Range, RangeSet};
    use crate::error::Error;

    pub fn range(low: u64, high: u64) -> Range {
        Range::new(low, high).unwrap()
    }

    /// Expands ranges into the integers they cover. Only for small test inputs.
    pub fn covered<'a>(ranges: impl IntoIterator<Item = &'a Range>) -> Vec<u64> {
        let mut result = Vec::new();
        for r in ranges {
            let low: u64 = r.low().try_into().unwrap();
            let high: u64 = r.high().try_into().unwrap();
            result.extend(low..=high);
        }
        result
    }

    #[test]
    fn test_range_new() {
        let r = range(3, 7);
        assert_eq!(r.len(), BigUint::from(5u32));
        assert!(r.contains(&BigUint::from(3u32)));
        assert!(r.contains(&BigUint::from(7u32)));
        assert!(!r.contains(&BigUint::from(8u32)));
        assert_eq!(range(4, 4).len(), BigUint::from(1u32));
        assert_eq!(r.to_string(), "[3, 7]");
    }

    #[test]
    fn test_invalid_range() {
        match Range::new(10u32, 1u32) {
            Err(Error::InvalidRange { low, high }) => {
                assert_eq!(low, BigUint::from(10u32));
                assert_eq!(high, BigUint::from(1u32));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_range_ordering() {
        let mut ranges = vec![range(5, 9), range(1, 10), range(1, 2)];
        ranges.sort();
        assert_eq!(ranges, vec![range(1, 2), range(1, 10), range(5, 9)]);
    }

    #[test]
    fn test_total_len() {
        let set = RangeSet::from_sorted(vec![range(0, 9), range(20, 24)]);
        assert_eq!(set.total_len(), BigUint::from(15u32));
        assert_eq!(RangeSet::new().total_len(), BigUint::from(0u32));
    }
}
