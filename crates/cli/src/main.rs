//! # Tollgate
//!
//! Event-ingestion admission gateway: accepts customer events over HTTP,
//! rejects malformed or blacklisted ones and keeps hourly per-customer
//! counters in SQLite.

mod bootstrap;
mod di;
mod server;

use clap::Parser;
use mimalloc::MiMalloc;
use std::net::SocketAddr;
use tokio_util::sync::CancellationToken;
use tollgate_domain::CliOverrides;
use tollgate_jobs::{JobRunner, ReferenceReloadJob, StatsFlushJob};
use tracing::{error, info, warn};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[command(name = "tollgate")]
#[command(version)]
#[command(about = "Event-ingestion admission gateway")]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short = 'c', long)]
    config: Option<String>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// HTTP port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// SQLite database path (":memory:" for a throwaway database)
    #[arg(short = 'd', long)]
    database: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let overrides = CliOverrides {
        bind_address: cli.bind,
        port: cli.port,
        database_path: cli.database,
        log_level: cli.log_level,
    };
    let config = bootstrap::load_config(cli.config.as_deref(), overrides)?;
    bootstrap::init_logging(&config.logging);

    info!("Tollgate v{} starting", env!("CARGO_PKG_VERSION"));

    let pool = bootstrap::init_database(&config.database).await?;
    let repos = di::Repositories::new(pool.clone());
    let services = di::Services::new(&repos);

    // a failed first load leaves the service not ready until the job retries
    if let Err(e) = services.cache.reload().await {
        warn!(error = %e, "Initial reference data load failed, starting not ready");
    }

    let shutdown = CancellationToken::new();
    let jobs = JobRunner::new()
        .with_reference_reload(
            ReferenceReloadJob::new(services.cache.clone())
                .with_interval(config.jobs.reload_interval())
                .with_cancellation(shutdown.clone()),
        )
        .with_stats_flush(
            StatsFlushJob::new(services.stats.clone())
                .with_interval(config.jobs.flush_interval())
                .with_cancellation(shutdown.clone()),
        )
        .start()
        .await;

    let addr: SocketAddr = format!("{}:{}", config.server.bind_address, config.server.port)
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid bind address: {}", e))?;

    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Shutdown signal received"),
            Err(e) => error!(error = %e, "Failed to listen for shutdown signal"),
        }
        signal_token.cancel();
    });

    let served = server::start_web_server(addr, services.app_state(), shutdown.clone()).await;
    shutdown.cancel();

    // the flush job hands remaining counters to the store before exiting
    for job in jobs {
        if let Err(e) = job.await {
            error!(error = %e, "Background job ended abnormally");
        }
    }
    pool.close().await;

    info!("Tollgate stopped");
    served
}
