// primescan, a parallel prime range scanner.

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use anyhow::{Context, Result};
use clap::Parser;
use prometheus_client::metrics::info::Info;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use primescan::{metrics, pipeline, RangeStore};

use crate::cli::Args;

mod cli;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn setup_tracing(args: &Args) -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::builder().parse_lossy(
        std::env::var(tracing_subscriber::EnvFilter::DEFAULT_ENV).unwrap_or("info".to_string()),
    );
    let fmt = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_span_events(if args.log_span_durations {
            FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        })
        .with_filter(env_filter);
    tracing_subscriber::registry().with(fmt).try_init()?;
    Ok(())
}

async fn run(args: Args) -> Result<()> {
    setup_tracing(&args)?;

    let mut metrics_registry = prometheus_client::registry::Registry::default();
    let info = Info::new(vec![(
        "version".to_owned(),
        env!("CARGO_PKG_VERSION").to_owned(),
    )]);
    metrics::register_metrics(&mut metrics_registry, info);

    let store = RangeStore::load(&args.file)?;
    tracing::info!("Loaded {} ranges from '{}'", store.len(), args.file);

    let report = pipeline::run(&args.run_config(), &store)
        .await
        .context("Scan aborted")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{report}");
    }
    if args.print_metrics {
        print!("{}", metrics::encode(&metrics_registry)?);
    }
    Ok(())
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(args))
}
