//! fyyur-web - venue/artist/show listing service
//!
//! Resolves configuration, opens the database and serves the HTTP API
//! until Ctrl+C or SIGTERM.

use anyhow::{Context, Result};
use clap::Parser;
use fyyur_common::config::{Overrides, Settings};
use fyyur_common::db;
use fyyur_web::{build_router, AppState};
use std::path::PathBuf;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for fyyur-web
#[derive(Parser, Debug)]
#[command(name = "fyyur-web")]
#[command(about = "Venue, artist and show listing service")]
#[command(version)]
struct Args {
    /// Address to listen on (host:port)
    #[arg(short, long, env = "FYYUR_BIND")]
    bind: Option<String>,

    /// SQLite database file (":memory:" for a throwaway database)
    #[arg(short, long, env = "FYYUR_DATABASE")]
    database: Option<PathBuf>,

    /// TOML config file
    #[arg(short, long, env = "FYYUR_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let settings = Settings::resolve(Overrides {
        bind_address: args.bind,
        database_path: args.database,
        config_file: args.config,
    })
    .context("Failed to resolve configuration")?;

    // RUST_LOG wins over the configured level
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| settings.log_level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting fyyur-web v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let pool = if settings.is_in_memory() {
        warn!("Using in-memory database; data is lost on shutdown");
        db::init_in_memory().await
    } else {
        info!("Database path: {}", settings.database_path.display());
        db::init_database(&settings.database_path, settings.max_connections).await
    }
    .context("Failed to open database")?;

    if settings.listing.count_upcoming_shows {
        info!("Listing upcoming-show counts: computed");
    } else {
        info!("Listing upcoming-show counts: reported as zero");
    }

    let state = AppState::new(pool.clone(), settings.listing);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&settings.bind_address)
        .await
        .with_context(|| format!("Failed to bind to {}", settings.bind_address))?;
    info!("fyyur-web listening on http://{}", settings.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    pool.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
