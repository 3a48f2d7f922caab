//! API routing: one module per resource, merged under `/api`.

mod bestselling;
mod blogs;
mod orders;
mod products;
mod upload;
mod users;

use axum::routing::post;
use axum::Router;

use crate::state::AppState;

pub fn api_router() -> Router<AppState> {
    Router::new()
        .nest("/products", products::router())
        .nest("/orders", orders::router())
        .nest("/users", users::router())
        .route("/login", post(users::login))
        .nest("/blogs", blogs::router())
        .nest("/bestselling", bestselling::router())
        .route("/upload", post(upload::upload_image))
}
