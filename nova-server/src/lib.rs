//! HTTP API for the Nova calendar.

pub mod refresh;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api/calendar", routes::calendar::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
