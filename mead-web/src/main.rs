//! mead-web - song submission service
//!
//! Serves the submission API, the admin endpoints and the one-time Spotify
//! authorization flow. Submissions persist in `submissions.json` under the
//! data folder.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use mead_common::config::TomlConfig;
use mead_common::SubmissionStore;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mead_web::config::{Args, Settings};
use mead_web::services::keepalive::{spawn_keepalive, KEEPALIVE_INTERVAL};
use mead_web::services::{SpotifyAuth, SpotifyClient};
use mead_web::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Pick up .env before clap reads the environment
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mead_web=info,mead_common=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting mead-web v{} [{}] built {}",
        env!("CARGO_PKG_VERSION"),
        env!("MEAD_BUILD_ID"),
        env!("MEAD_BUILT_AT")
    );
    if let Ok(path) = dotenv {
        info!("Loaded environment from {}", path.display());
    }

    let args = Args::parse();
    let file_config = TomlConfig::load(args.config.as_deref()).context("Failed to load config")?;
    let settings = Settings::resolve(args, file_config);

    let store = SubmissionStore::in_dir(&settings.data_dir);
    store
        .ensure_file_exists()
        .await
        .with_context(|| format!("Failed to initialize {}", store.path().display()))?;
    info!("Submissions file: {}", store.path().display());

    if settings.admin_password.is_none() {
        warn!("ADMIN_PASSWORD is not set; admin endpoints will refuse all requests");
    }
    if settings.playlists.all().is_none() {
        warn!("Not all playlist IDs are set; playlist sync will fail");
    }

    let auth = Arc::new(
        SpotifyAuth::new(settings.spotify.clone()).context("Failed to build Spotify auth client")?,
    );
    if !auth.has_refresh_token() {
        warn!("SPOTIFY_REFRESH_TOKEN is not set; visit /auth/login to obtain one");
    }
    let catalog = Arc::new(
        SpotifyClient::new(settings.spotify.api_base.clone(), auth.clone())
            .context("Failed to build Spotify client")?,
    );

    if let Some(url) = settings.keepalive_url.clone() {
        info!("Keepalive ping to {} every {:?}", url, KEEPALIVE_INTERVAL);
        spawn_keepalive(url, KEEPALIVE_INTERVAL);
    }

    let addr = settings.bind_addr;
    let state = AppState::new(store, catalog, auth, settings);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("Server running on http://{}", addr);
    info!("Health check: http://{}/healthz", addr);

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
            Ok(mut sig) => {
                sig.recv().await;
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
            info!("Received terminate signal, shutting down");
        },
    }
}
