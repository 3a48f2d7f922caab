//! Blog content routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use candela_core::model::{Blog, BlogInput, BlogPatch};
use serde_json::json;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::extract::{AdminUser, ApiJson};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_published).post(create))
        .route("/:id", get(get_one).put(update).delete(remove))
}

async fn list_published(State(state): State<AppState>) -> ApiResult<Json<Vec<Blog>>> {
    Ok(Json(state.services.content.list_published().await?))
}

async fn get_one(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<Json<Blog>> {
    Ok(Json(state.services.content.get(id).await?))
}

async fn create(
    State(state): State<AppState>,
    _admin: AdminUser,
    ApiJson(input): ApiJson<BlogInput>,
) -> ApiResult<(StatusCode, Json<Blog>)> {
    let blog = state.services.content.create(input).await?;
    Ok((StatusCode::CREATED, Json(blog)))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    _admin: AdminUser,
    ApiJson(patch): ApiJson<BlogPatch>,
) -> ApiResult<Json<Blog>> {
    Ok(Json(state.services.content.update(id, patch).await?))
}

async fn remove(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    _admin: AdminUser,
) -> ApiResult<Json<serde_json::Value>> {
    state.services.content.delete(id).await?;
    Ok(Json(json!({ "message": "Blog deleted successfully" })))
}
