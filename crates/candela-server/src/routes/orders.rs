//! Order routes: single checkout, batch checkout with the duplicate guard,
//! and admin CRUD.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use candela_core::model::{BatchCheckout, Order, OrderInput, OrderPatch};
use serde_json::json;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::extract::{AdminUser, ApiJson};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/batch", post(create_batch))
        .route("/:id", get(get_one).put(update).delete(remove))
}

async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<OrderInput>,
) -> ApiResult<(StatusCode, Json<Order>)> {
    let order = state.services.orders.create(input).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

async fn create_batch(
    State(state): State<AppState>,
    ApiJson(batch): ApiJson<BatchCheckout>,
) -> ApiResult<(StatusCode, Json<serde_json::Value>)> {
    let orders = state.services.orders.create_batch(batch).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": format!("Successfully created {} orders", orders.len()),
            "orders": orders,
        })),
    ))
}

async fn list(State(state): State<AppState>, _admin: AdminUser) -> ApiResult<Json<Vec<Order>>> {
    Ok(Json(state.services.orders.list().await?))
}

async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    _admin: AdminUser,
) -> ApiResult<Json<Order>> {
    Ok(Json(state.services.orders.get(id).await?))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    _admin: AdminUser,
    ApiJson(patch): ApiJson<OrderPatch>,
) -> ApiResult<Json<Order>> {
    Ok(Json(state.services.orders.update(id, patch).await?))
}

async fn remove(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    _admin: AdminUser,
) -> ApiResult<Json<serde_json::Value>> {
    state.services.orders.delete(id).await?;
    Ok(Json(json!({ "message": "Order deleted" })))
}
