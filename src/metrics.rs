use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::info::Info;
use prometheus_client::registry::Registry;

lazy_static::lazy_static! {
    pub static ref CANDIDATES_TESTED: Counter = Default::default();
    pub static ref PRIMES_FOUND: Counter = Default::default();
    pub static ref SHARDS_SCANNED: Counter = Default::default();
    pub static ref WORKER_FAULTS: Counter = Default::default();
}

pub fn register_metrics(registry: &mut Registry, info: Info<Vec<(String, String)>>) {
    registry.register("primescan_info", "Scanner info", info);
    registry.register(
        "num_candidates_tested",
        "Number of odd candidates passed to the primality test by parallel workers",
        CANDIDATES_TESTED.clone(),
    );
    registry.register(
        "num_primes_found",
        "Number of primes found by parallel workers",
        PRIMES_FOUND.clone(),
    );
    registry.register(
        "num_shards_scanned",
        "Number of shards completed by parallel workers",
        SHARDS_SCANNED.clone(),
    );
    registry.register(
        "num_worker_faults",
        "Number of workers that terminated abnormally",
        WORKER_FAULTS.clone(),
    );
}

pub fn encode(registry: &Registry) -> anyhow::Result<String> {
    let mut buffer = String::new();
    prometheus_client::encoding::text::encode(&mut buffer, registry)?;
    Ok(buffer)
}
