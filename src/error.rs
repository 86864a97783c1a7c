use camino::Utf8PathBuf as PathBuf;
use num_bigint::BigUint;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Invalid range [{low}, {high}]: lower bound is greater than upper bound")]
    InvalidRange { low: BigUint, high: BigUint },
    #[error("Couldn't read ranges from '{path}'")]
    InputUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed input at line {line}: {reason}")]
    MalformedInput { line: usize, reason: String },
    #[error("Worker {worker} failed: {reason}")]
    WorkerFault { worker: usize, reason: String },
    #[error("Worker count must be greater than 0")]
    NoWorkers,
    #[error("Parallel scan found {parallel} primes, sequential baseline found {sequential}")]
    Divergence { sequential: usize, parallel: usize },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
