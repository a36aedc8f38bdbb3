//! Roster - Application Entry Point
//!
//! This is the main entry point for the Roster server.

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use roster::{
    config::{LogFormat, StorageBackend, CONFIG},
    db,
    services::MemberService,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    tracing::info!("Starting Roster server...");

    let state = match CONFIG.storage.backend {
        StorageBackend::Memory => {
            tracing::info!("Using in-memory storage");
            AppState::in_memory(CONFIG.clone())
        }
        StorageBackend::Postgres => {
            tracing::info!("Connecting to database...");
            let pool = db::create_pool(&CONFIG.database).await?;

            tracing::info!("Running database migrations...");
            db::run_migrations(&pool).await?;

            AppState::postgres(pool, CONFIG.clone())
        }
    };

    if CONFIG.storage.seed_members > 0 {
        MemberService::seed(state.members(), CONFIG.storage.seed_members).await?;
    }

    let app = roster::app(state);

    // Start the server
    let addr = SocketAddr::new(CONFIG.server.host.parse()?, CONFIG.server.port);
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Initialize tracing, honouring `RUST_LOG` and `LOG_FORMAT`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| CONFIG.server.rust_log.clone().into());
    let registry = tracing_subscriber::registry().with(filter);

    match CONFIG.server.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutting down"),
        Err(e) => {
            tracing::error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
