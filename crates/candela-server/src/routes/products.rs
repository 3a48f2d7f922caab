//! Product catalog routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use candela_core::model::{Product, ProductInput, ProductPatch};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::extract::{AdminUser, ApiJson};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/seed", post(seed))
        .route("/:id", get(get_one).put(update).delete(remove))
}

/// One object inserts a single product; an array bulk-inserts.
#[derive(Deserialize)]
#[serde(untagged)]
enum CreateProducts {
    Many(Vec<ProductInput>),
    One(ProductInput),
}

async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Product>>> {
    Ok(Json(state.services.catalog.list().await?))
}

async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Product>> {
    Ok(Json(state.services.catalog.get(id).await?))
}

async fn create(
    State(state): State<AppState>,
    _admin: AdminUser,
    ApiJson(body): ApiJson<CreateProducts>,
) -> ApiResult<Response> {
    let response = match body {
        CreateProducts::One(input) => {
            let product = state.services.catalog.create(input).await?;
            (StatusCode::CREATED, Json(json!(product))).into_response()
        }
        CreateProducts::Many(inputs) => {
            let products = state.services.catalog.create_many(inputs).await?;
            (StatusCode::CREATED, Json(json!(products))).into_response()
        }
    };
    Ok(response)
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    _admin: AdminUser,
    ApiJson(patch): ApiJson<ProductPatch>,
) -> ApiResult<Json<Product>> {
    Ok(Json(state.services.catalog.update(id, patch).await?))
}

async fn remove(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    _admin: AdminUser,
) -> ApiResult<Json<serde_json::Value>> {
    state.services.catalog.delete(id).await?;
    Ok(Json(json!({ "message": "Product deleted" })))
}

async fn seed(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> ApiResult<(StatusCode, Json<serde_json::Value>)> {
    let products = state.services.catalog.seed().await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Products seeded successfully", "products": products })),
    ))
}
