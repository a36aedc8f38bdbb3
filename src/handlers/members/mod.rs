//! Member handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Member routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_members).post(handler::create_member))
        .route("/{id}", get(handler::get_username))
        .route("/bulk-age-plus", post(handler::bulk_age_plus))
}
