//! Team handlers

mod handler;
pub mod request;

pub use handler::*;
pub use request::*;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Team routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_teams).post(handler::create_team))
        .route("/{id}", get(handler::get_team))
}
