//! Roster - Member and Team Registry
//!
//! This library provides a small member/team registry whose queries are
//! expressed as composable specifications (see the `roster-spec` crate).
//! The same specification runs against PostgreSQL or an in-memory store.
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: Business logic
//! - **Repositories**: Persistence behind traits, PostgreSQL or in-memory
//! - **Models**: Domain models, schemas and paging types

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;

use axum::Router;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;

/// Build the application router with all layers applied
pub fn app(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", handlers::routes())
        .layer(axum::middleware::from_fn(middleware::logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
