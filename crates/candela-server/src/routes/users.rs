//! Account routes: open registration and login, admin-guarded user CRUD.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use candela_core::model::{PublicUser, RegisterInput, UserPatch};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::extract::{AdminUser, ApiJson};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(register))
        .route("/:id", get(get_one).put(update).delete(remove))
}

async fn register(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<RegisterInput>,
) -> ApiResult<(StatusCode, Json<serde_json::Value>)> {
    let user = state.services.accounts.register(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User registered successfully", "user": user })),
    ))
}

#[derive(Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// `POST /api/login`. The success body carries the sanitized user and the
/// bearer token for subsequent admin calls.
pub async fn login(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<LoginInput>,
) -> ApiResult<Json<serde_json::Value>> {
    let (user, token) = state.services.accounts.login(&input.email, &input.password).await?;
    Ok(Json(json!({ "message": "Login successful", "user": user, "token": token })))
}

async fn list(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> ApiResult<Json<Vec<PublicUser>>> {
    Ok(Json(state.services.accounts.list().await?))
}

async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    _admin: AdminUser,
) -> ApiResult<Json<PublicUser>> {
    Ok(Json(state.services.accounts.get(id).await?))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    _admin: AdminUser,
    ApiJson(patch): ApiJson<UserPatch>,
) -> ApiResult<Json<PublicUser>> {
    Ok(Json(state.services.accounts.update(id, patch).await?))
}

async fn remove(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    _admin: AdminUser,
) -> ApiResult<Json<serde_json::Value>> {
    state.services.accounts.delete(id).await?;
    Ok(Json(json!({ "message": "User deleted" })))
}
