use camino::Utf8PathBuf as PathBuf;
use clap::Parser;

use primescan::{RunConfig, DEFAULT_ROUNDS};

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Finds primes in integer ranges and measures parallel speedup")]
pub struct Args {
    /// File with one whitespace-separated `low high` pair per line
    #[clap(short, long, env = "RANGES_FILE", value_name = "PATH")]
    pub file: PathBuf,

    /// Number of parallel workers
    #[clap(
        short,
        long,
        env,
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub threads: u32,

    /// Repetitions of the probabilistic primality test
    #[clap(
        long,
        env,
        default_value_t = DEFAULT_ROUNDS as u32,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub rounds: u32,

    /// Print every prime found
    #[clap(long)]
    pub print_primes: bool,

    /// Print the report as JSON
    #[clap(long)]
    pub json: bool,

    /// Print collected metrics in Prometheus text format after the report
    #[clap(long)]
    pub print_metrics: bool,

    #[clap(long, env, hide(true))]
    pub log_span_durations: bool,
}

impl Args {
    pub fn run_config(&self) -> RunConfig {
        RunConfig {
            workers: self.threads as usize,
            rounds: self.rounds as usize,
            include_primes: self.print_primes,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::Args;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["primescan", "-f", "ranges.txt"]).unwrap();
        let config = args.run_config();
        assert_eq!(config.workers, 1);
        assert_eq!(config.rounds, 10);
        assert!(!config.include_primes);
        assert_eq!(args.file.as_str(), "ranges.txt");
    }

    #[test]
    fn test_flags() {
        let args = Args::try_parse_from([
            "primescan",
            "-t",
            "8",
            "--file",
            "input.txt",
            "--rounds",
            "25",
            "--print-primes",
            "--json",
        ])
        .unwrap();
        let config = args.run_config();
        assert_eq!(config.workers, 8);
        assert_eq!(config.rounds, 25);
        assert!(config.include_primes);
        assert!(args.json);
    }

    #[test]
    fn test_zero_threads_rejected() {
        assert!(Args::try_parse_from(["primescan", "-f", "x", "-t", "0"]).is_err());
    }
}
