use num_bigint::BigUint;
use num_traits::One;
use tracing::{debug, instrument};

use super::{partition::split_range, Range, RangeSet};

/// Merges overlapping and adjacent ranges into a minimal ascending set.
///
/// If fewer than `min_count` ranges remain after merging, every range is split
/// into up to `min_count` consecutive pieces so that each worker can get some
/// work. Ranges narrower than `min_count` yield one piece per integer.
#[instrument(skip_all, fields(input = ranges.len(), min_count = min_count))]
pub fn normalize(mut ranges: Vec<Range>, min_count: usize) -> RangeSet {
    ranges.sort_unstable();

    let mut merged: Vec<Range> = Vec::with_capacity(ranges.len());
    for candidate in ranges {
        if let Some(acc) = merged.last_mut() {
            if &acc.high + BigUint::one() >= candidate.low {
                if candidate.high > acc.high {
                    acc.high = candidate.high;
                }
                continue;
            }
        }
        merged.push(candidate);
    }
    debug!("Merged into {} disjoint ranges", merged.len());

    if merged.len() >= min_count {
        return RangeSet::from_sorted(merged);
    }

    let subdivided: Vec<Range> = merged
        .iter()
        .flat_map(|range| split_range(range, min_count))
        .collect();
    debug!("Subdivided into {} ranges", subdivided.len());
    RangeSet::from_sorted(subdivided)
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::normalize;
    use crate::ranges::tests::{covered, range};
    use crate::ranges::Range;

    fn check_normalized(input: &[Range], min_count: usize) {
        let result = normalize(input.to_vec(), min_count);
        for (a, b) in result.iter().tuple_windows() {
            assert!(a.high() < b.low(), "{a} and {b} are not disjoint and ascending");
        }
        let expected: Vec<u64> = covered(input).into_iter().sorted().dedup().collect();
        assert_eq!(covered(result.iter()), expected);
    }

    #[test]
    fn test_merge_overlapping() {
        let result = normalize(vec![range(5, 15), range(1, 10)], 1);
        assert_eq!(result.to_vec(), vec![range(1, 15)]);
    }

    #[test]
    fn test_merge_adjacent_and_contained() {
        let result = normalize(
            vec![range(11, 20), range(1, 10), range(3, 4), range(30, 40), range(22, 25)],
            1,
        );
        assert_eq!(
            result.to_vec(),
            vec![range(1, 20), range(22, 25), range(30, 40)]
        );
    }

    #[test]
    fn test_no_subdivision_when_enough_ranges() {
        let result = normalize(vec![range(0, 100), range(200, 300)], 2);
        assert_eq!(result.to_vec(), vec![range(0, 100), range(200, 300)]);
    }

    #[test]
    fn test_subdivision() {
        let result = normalize(vec![range(1, 10)], 3);
        assert_eq!(result.to_vec(), vec![range(1, 4), range(5, 7), range(8, 10)]);

        let result = normalize(vec![range(0, 9), range(20, 21)], 4);
        assert_eq!(
            result.to_vec(),
            vec![
                range(0, 2),
                range(3, 5),
                range(6, 7),
                range(8, 9),
                range(20, 20),
                range(21, 21),
            ]
        );
    }

    #[test]
    fn test_narrow_range_yields_fewer_pieces() {
        let result = normalize(vec![range(7, 8)], 5);
        assert_eq!(result.to_vec(), vec![range(7, 7), range(8, 8)]);

        let result = normalize(vec![range(42, 42)], 64);
        assert_eq!(result.to_vec(), vec![range(42, 42)]);
    }

    #[test]
    fn test_empty_input() {
        assert!(normalize(vec![], 8).is_empty());
    }

    #[test]
    fn test_normalized_coverage() {
        let inputs = [
            vec![range(1, 10), range(5, 15)],
            vec![range(0, 0), range(0, 0), range(2, 2)],
            vec![range(100, 120), range(1, 3), range(4, 4), range(50, 99), range(121, 130)],
            vec![range(10, 20), range(12, 14), range(0, 50), range(60, 61)],
            vec![range(3, 3), range(9, 17), range(18, 18), range(30, 33), range(31, 32)],
        ];
        for input in &inputs {
            for min_count in [0, 1, 2, 3, 5, 8, 13, 64] {
                check_normalized(input, min_count);
            }
        }
    }
}
