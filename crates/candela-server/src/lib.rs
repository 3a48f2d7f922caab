//! HTTP layer for the Candela storefront backend.
//!
//! Exposes [`app`] so integration tests can drive the router in-process;
//! the binary in `main.rs` wires it to a TCP listener.

pub mod config;
pub mod error;
pub mod extract;
pub mod media;
pub mod routes;
pub mod state;

use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use config::ServerConfig;
pub use state::AppState;

/// Build the full application router over the given state.
pub fn app(state: AppState) -> Router {
    // CORS is deliberately wide open; the API has no cookie-based trust.
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .nest("/api", routes::api_router())
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health() -> StatusCode {
    StatusCode::OK
}
