#![forbid(unsafe_code)]

//! Iqaamah times daemon: keeps a cached snapshot of the upstream weekly
//! schedule and serves per-day views over HTTP.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use axum::{routing::get, Router};
use clap::Parser;
use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, EnvFilter};

mod api;
mod config;
mod fetch;
mod query;
mod scheduler;
mod store;

use crate::config::DaemonConfig;

const DEFAULT_UPSTREAM_URL: &str =
    "https://northerly-robin-8705.dataplicity.io/mtws-iqaamah-times/all";

#[derive(Debug, Parser)]
#[command(
    name = "iqaamah-daemon",
    version,
    about = "Cached proxy for the weekly iqaamah schedule"
)]
struct Cli {
    /// Upstream endpoint returning the weekly schedule.
    #[arg(long, default_value = DEFAULT_UPSTREAM_URL)]
    upstream_url: String,

    /// Listen port. A PORT environment variable takes precedence.
    #[arg(long, default_value_t = 8000)]
    port: u16,

    /// Seconds between background refresh attempts.
    #[arg(long, default_value_t = 43_200)]
    refresh_interval_seconds: u64,

    /// Upstream request timeout in seconds.
    #[arg(long, default_value_t = 10)]
    fetch_timeout_seconds: u64,

    /// IANA timezone used to resolve "today".
    #[arg(long, default_value = "US/Eastern")]
    timezone: chrono_tz::Tz,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_target(false)
        .with_max_level(Level::INFO)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let port = match std::env::var("PORT") {
        Ok(v) => v.parse()?,
        Err(_) => cli.port,
    };

    let config = DaemonConfig {
        upstream_url: cli.upstream_url,
        refresh_interval_secs: cli.refresh_interval_seconds,
        fetch_timeout_secs: cli.fetch_timeout_seconds,
        timezone: cli.timezone,
        listen: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), port),
    };

    info!("starting daemon with config: {:?}", config);

    let fetcher = fetch::ScheduleFetcher::new(&config)?;
    let store = store::SnapshotStore::new();
    let state = api::AppState::new(config.clone(), store, fetcher);

    // Populate the store before accepting traffic so the first request
    // cannot race an empty snapshot.
    if !scheduler::refresh_once(&state).await {
        warn!("initial fetch failed; serving 503 until a refresh succeeds");
    }
    scheduler::spawn_refresher(state.clone());

    let app = Router::new()
        .route("/prayer-times/today", get(api::get_today))
        .route("/prayer-times/all", get(api::get_all))
        .route("/prayer-times/{day}", get(api::get_day))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    info!("listening on http://{}", config.listen);

    axum::serve(tokio::net::TcpListener::bind(config.listen).await?, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = signal::ctrl_c().await;
    info!("shutdown requested");
}
