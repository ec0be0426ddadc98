//! `lostfoundd` — the lost-and-found server binary.
//!
//! Usage:
//!   lostfoundd --data-dir <dir> [--listen <addr>]
//!
//! Opens the embedded store under the data directory, seeds the admin
//! account and serves the workflow API.

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use clap::Parser;
use tracing::info;

use lostfound::LostFoundModule;
use lostfound::service::LostFoundService;
use lostfound_core::{Module, ServiceConfig};
use lostfound_kv::{KVStore, RedbStore};

/// Lost-and-found server.
#[derive(Parser, Debug)]
#[command(name = "lostfoundd", about = "School lost-and-found server")]
struct Cli {
    /// Directory holding durable state.
    #[arg(long = "data-dir", default_value = "./data")]
    data_dir: PathBuf,

    /// Listen address.
    #[arg(long = "listen", default_value = "0.0.0.0:8080")]
    listen: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let config = ServiceConfig {
        data_dir: Some(cli.data_dir.clone()),
        listen: cli.listen.clone(),
        ..Default::default()
    };
    std::fs::create_dir_all(&cli.data_dir)?;

    // Initialize the embedded store.
    let kv: Arc<dyn KVStore> = Arc::new(
        RedbStore::open(&config.resolve_db_path())
            .map_err(|e| anyhow::anyhow!("failed to open KV store: {}", e))?,
    );

    let service = LostFoundService::new(kv);

    // Bootstrap: the singleton admin account must exist before anyone can
    // moderate. Idempotent across restarts.
    service
        .ensure_admin_seed()
        .map_err(|e| anyhow::anyhow!("admin seed failed: {}", e))?;

    let module = LostFoundModule::new(service);
    info!("{} module initialized", module.name());

    let app = Router::new()
        .route("/healthz", get(|| async { "ok" }))
        .nest(&format!("/{}", module.name()), module.routes());

    let listener = tokio::net::TcpListener::bind(&cli.listen).await?;
    info!("lostfoundd listening on {}", cli.listen);
    axum::serve(listener, app).await?;

    Ok(())
}
