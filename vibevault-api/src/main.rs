//! vibevault-api - media library HTTP service
//!
//! Serves the media CRUD API plus read-only library, mood and stats views.
//! Storage is SQLite under the resolved root folder, or a transient
//! in-memory store for local prototyping.

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use vibevault_api::{build_router, AppState};
use vibevault_common::config::{self, StorageBackend, TomlConfig};
use vibevault_common::db;
use vibevault_common::store::{MemoryStore, SqliteStore};
use vibevault_common::MediaStore;

#[derive(Debug, Parser)]
#[command(name = "vibevault-api", version, about = "VibeVault media library service")]
struct Args {
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Address to bind
    #[arg(long)]
    host: Option<String>,

    /// HTTP port (also VIBEVAULT_PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Folder holding vibevault.db (also VIBEVAULT_ROOT_FOLDER)
    #[arg(long)]
    root_folder: Option<PathBuf>,

    /// Storage backend: sqlite or memory
    #[arg(long)]
    storage: Option<StorageBackend>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let toml = TomlConfig::load(args.config.as_deref())?;

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&toml.logging.level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!(
        "Starting VibeVault API (vibevault-api) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let store: Arc<dyn MediaStore> = match args.storage.unwrap_or(toml.storage) {
        StorageBackend::Memory => {
            warn!("Using in-memory storage: media will be lost on shutdown");
            Arc::new(MemoryStore::new())
        }
        StorageBackend::Sqlite => {
            let root_folder = config::resolve_root_folder(args.root_folder.as_deref(), &toml);
            let db_path = config::database_path(&root_folder);
            info!("Database path: {}", db_path.display());

            let pool = db::init_database(&db_path)
                .await
                .with_context(|| format!("Failed to open database {}", db_path.display()))?;
            Arc::new(SqliteStore::new(pool))
        }
    };

    let host = args.host.unwrap_or_else(|| toml.host.clone());
    let port = config::resolve_port(args.port, &toml)?;
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", host, port))?;

    let app = build_router(AppState::new(store));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("vibevault-api listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
