//! wsl-api - Worship song list REST service
//!
//! Serves the song lists of two worship leaders, each kept in its own
//! database, plus the single-page web UI.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use wsl_api::api::BUILD_INFO;
use wsl_api::{build_router, AppState, SongStores};
use wsl_common::config::{ConfigOverrides, ServiceConfig};

/// Command-line arguments for wsl-api
#[derive(Parser, Debug)]
#[command(name = "wsl-api")]
#[command(about = "Worship song list REST service")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Address to bind to
    #[arg(long, env = "HOST")]
    host: Option<String>,

    /// Storage connection string (directory URL, or URL containing `{db}`)
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Serve a built UI from this directory instead of the embedded one
    #[arg(long, env = "WSL_STATIC_DIR")]
    static_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, env = "WSL_LOG_LEVEL")]
    log_level: Option<String>,

    /// TOML config file
    #[arg(short, long, env = "WSL_CONFIG")]
    config: Option<PathBuf>,
}

impl From<Args> for ConfigOverrides {
    fn from(args: Args) -> Self {
        ConfigOverrides {
            host: args.host,
            port: args.port,
            database_url: args.database_url,
            static_dir: args.static_dir,
            log_level: args.log_level,
            config_file: args.config,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; real environment variables win
    let dotenv = dotenvy::dotenv();

    let args = Args::parse();
    let config = ServiceConfig::resolve(args.into()).context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("{},tower_http=info", config.log_level))),
        )
        .init();

    info!(
        "Starting Worship Song API (wsl-api) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        BUILD_INFO.commit,
        BUILD_INFO.built,
        BUILD_INFO.profile
    );
    if let Ok(path) = dotenv {
        info!("Loaded environment from {}", path.display());
    }
    info!("Database: {}", config.database_url);

    let stores = SongStores::open(&config)?;

    // Unreachable storage is logged, not fatal
    stores.initialize().await;

    if let Some(dir) = &config.static_dir {
        info!("Serving UI from {}", dir.display());
    }

    let state = AppState::new(stores).with_static_dir(config.static_dir.clone());
    let app = build_router(state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("Server is running on http://{}", addr);
    info!("Status check: http://{}/api", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down");
        },
    }
}
