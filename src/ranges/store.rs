use camino::Utf8Path as Path;
use num_bigint::BigUint;
use tracing::{debug, instrument};

use crate::error::{Error, Result};

use super::Range;

/// Raw `(low, high)` pairs as they were read, not yet validated.
#[derive(Default, Debug, Clone)]
pub struct RangeStore {
    pairs: Vec<(BigUint, BigUint)>,
}

impl RangeStore {
    pub fn from_pairs(pairs: impl IntoIterator<Item = (BigUint, BigUint)>) -> Self {
        Self {
            pairs: pairs.into_iter().collect(),
        }
    }

    #[instrument(skip_all, fields(path = %path.as_ref()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| Error::InputUnavailable {
            path: path.to_owned(),
            source,
        })?;
        let store: Self = contents.parse()?;
        debug!("Parsed {} range pairs", store.len());
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Validates every stored pair, failing on the first one with `low > high`.
    pub fn ranges(&self) -> Result<Vec<Range>> {
        self.pairs
            .iter()
            .map(|(low, high)| Range::new(low.clone(), high.clone()))
            .collect()
    }
}

impl std::str::FromStr for RangeStore {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut pairs = Vec::new();
        for (index, line) in s.lines().enumerate() {
            let line_number = index + 1;
            let tokens: Vec<&str> = line.split_whitespace().collect();
            match tokens.as_slice() {
                [] => continue,
                [low, high] => {
                    pairs.push((parse_bound(low, line_number)?, parse_bound(high, line_number)?))
                }
                _ => {
                    return Err(Error::MalformedInput {
                        line: line_number,
                        reason: format!("expected 2 integers, found {} tokens", tokens.len()),
                    })
                }
            }
        }
        Ok(Self { pairs })
    }
}

fn parse_bound(token: &str, line: usize) -> Result<BigUint> {
    // `BigUint` accepts a leading '+', plain decimal digits are required here
    if !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::MalformedInput {
            line,
            reason: format!("'{token}' is not a non-negative decimal integer"),
        });
    }
    token.parse().map_err(|e| Error::MalformedInput {
        line,
        reason: format!("couldn't parse '{token}': {e}"),
    })
}

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;

    use super::RangeStore;
    use crate::error::Error;
    use crate::ranges::tests::range;
    use crate::util::tests::tests_data;

    #[test]
    fn test_parse() {
        let store: RangeStore = "1 10\n\n  5\t15  \n100000000000000000000000 100000000000000000000100\n"
            .parse()
            .unwrap();
        assert_eq!(store.len(), 3);
        let ranges = store.ranges().unwrap();
        assert_eq!(ranges[0], range(1, 10));
        assert_eq!(ranges[1], range(5, 15));
        assert_eq!(
            ranges[2].low(),
            &"100000000000000000000000".parse::<BigUint>().unwrap()
        );
    }

    #[test]
    fn test_malformed_input() {
        for (input, bad_line) in [
            ("1 10\n7\n", 2),
            ("1 2 3\n", 1),
            ("1 10\n2 -5\n", 2),
            ("0x10 20\n", 1),
            ("1 10\n\n+3 4\n", 3),
        ] {
            match input.parse::<RangeStore>() {
                Err(Error::MalformedInput { line, .. }) => assert_eq!(line, bad_line, "{input:?}"),
                other => panic!("unexpected result for {input:?}: {other:?}"),
            }
        }
    }

    #[test]
    fn test_invalid_pair_is_rejected() {
        let store: RangeStore = "1 10\n20 3\n".parse().unwrap();
        assert!(matches!(store.ranges(), Err(Error::InvalidRange { .. })));
    }

    #[test]
    fn test_missing_file() {
        let result = RangeStore::load(tests_data().join("does-not-exist.txt"));
        assert!(matches!(result, Err(Error::InputUnavailable { .. })));
    }

    #[test]
    fn test_load_fixture() {
        let store = RangeStore::load(tests_data().join("ranges.txt")).unwrap();
        assert_eq!(store.ranges().unwrap().len(), 4);
    }
}
