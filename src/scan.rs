use num_bigint::BigUint;
use num_prime::PrimalityTestConfig;

use crate::ranges::Range;

/// Ascending, duplicate-free sequence of (probable) primes.
pub type PrimeSequence = Vec<BigUint>;

/// Repetitions of the strong probable prime test used unless configured otherwise.
pub const DEFAULT_ROUNDS: usize = 10;

pub trait PrimalityTest: Send + Sync {
    /// Returns `false` only for composites; may rarely return `true` for one.
    fn is_probably_prime(&self, n: &BigUint) -> bool;
}

/// Miller-Rabin with a fixed number of rounds over the smallest prime bases.
///
/// No random bases are drawn, so the verdict for a given number never changes
/// between runs. Numbers below 2^64 are decided exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MillerRabin {
    rounds: usize,
}

impl MillerRabin {
    pub fn new(rounds: usize) -> Self {
        Self {
            rounds: rounds.max(1),
        }
    }

    pub fn rounds(&self) -> usize {
        self.rounds
    }

    fn config(&self) -> PrimalityTestConfig {
        let mut config = PrimalityTestConfig::default();
        config.sprp_trials = self.rounds;
        config.sprp_random_trials = 0;
        config.slprp_test = false;
        config.eslprp_test = false;
        config
    }
}

impl Default for MillerRabin {
    fn default() -> Self {
        Self::new(DEFAULT_ROUNDS)
    }
}

impl PrimalityTest for MillerRabin {
    fn is_probably_prime(&self, n: &BigUint) -> bool {
        num_prime::nt_funcs::is_prime(n, Some(self.config())).probably()
    }
}

/// Finds the primes of `range` with a Miller-Rabin test of `rounds` repetitions.
pub fn scan(range: &Range, rounds: usize) -> PrimeSequence {
    scan_with(range, &MillerRabin::new(rounds))
}

/// Finds the primes of `range`, testing only 2 and odd candidates.
pub fn scan_with(range: &Range, test: &impl PrimalityTest) -> PrimeSequence {
    let two = BigUint::from(2u32);
    let three = BigUint::from(3u32);
    let mut result = PrimeSequence::new();

    if range.contains(&two) {
        result.push(two.clone());
    }

    let mut candidate = range.low().max(&three).clone();
    if !candidate.bit(0) {
        candidate += 1u32;
    }
    while &candidate <= range.high() {
        if test.is_probably_prime(&candidate) {
            result.push(candidate.clone());
        }
        candidate += &two;
    }
    result
}

/// Number of candidates [`scan_with`] hands to the primality test for `range`.
pub fn candidate_count(range: &Range) -> BigUint {
    let three = BigUint::from(3u32);
    let mut first = range.low().max(&three).clone();
    if !first.bit(0) {
        first += 1u32;
    }
    if &first > range.high() {
        return BigUint::default();
    }
    (range.high() - &first) / 2u32 + 1u32
}
