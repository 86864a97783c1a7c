use anyhow::Result;
use camino::Utf8PathBuf as PathBuf;
use tracing_subscriber::EnvFilter;

pub fn setup_tracing() -> Result<()> {
    // Several tests may race to install the subscriber, only the first one wins
    let _ = tracing_subscriber::fmt()
        .compact()
        .with_test_writer()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
    Ok(())
}

pub fn tests_data() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}
