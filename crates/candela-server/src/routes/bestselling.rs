//! Best-selling curation routes.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use candela_core::model::{BestSeller, BestSellerPatch, CurationInput};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::extract::{AdminUser, ApiJson};
use crate::state::AppState;

/// Default size of the public featured strip.
const DEFAULT_FEATURED_LIMIT: usize = 8;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/featured", get(list_featured))
        .route("/:id", get(get_one).put(update).delete(remove))
}

async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<BestSeller>>> {
    Ok(Json(state.services.curation.list().await?))
}

#[derive(Deserialize)]
struct FeaturedParams {
    limit: Option<usize>,
}

async fn list_featured(
    State(state): State<AppState>,
    Query(params): Query<FeaturedParams>,
) -> ApiResult<Json<Vec<BestSeller>>> {
    let limit = params.limit.unwrap_or(DEFAULT_FEATURED_LIMIT);
    Ok(Json(state.services.curation.list_featured(limit).await?))
}

async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<BestSeller>> {
    Ok(Json(state.services.curation.get(id).await?))
}

async fn create(
    State(state): State<AppState>,
    _admin: AdminUser,
    ApiJson(input): ApiJson<CurationInput>,
) -> ApiResult<(StatusCode, Json<BestSeller>)> {
    let entry = state.services.curation.create(input).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    _admin: AdminUser,
    ApiJson(patch): ApiJson<BestSellerPatch>,
) -> ApiResult<Json<BestSeller>> {
    Ok(Json(state.services.curation.update(id, patch).await?))
}

async fn remove(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    _admin: AdminUser,
) -> ApiResult<Json<serde_json::Value>> {
    state.services.curation.delete(id).await?;
    Ok(Json(json!({ "message": "Best-selling entry deleted" })))
}
