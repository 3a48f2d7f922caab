//! Image upload forwarding route.

use axum::extract::{Multipart, State};
use axum::Json;
use candela_core::ServiceError;
use serde_json::json;

use crate::error::ApiResult;
use crate::extract::AdminUser;
use crate::state::AppState;

/// `POST /api/upload`: take one multipart `image` field, forward it to the
/// media provider, return `{ "url": ... }`.
pub async fn upload_image(
    State(state): State<AppState>,
    _admin: AdminUser,
    mut multipart: Multipart,
) -> ApiResult<Json<serde_json::Value>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ServiceError::bad_request(err.to_string()))?
    {
        if field.name() == Some("image") {
            let file_name = field.file_name().map(str::to_owned);
            let content_type = field.content_type().map(str::to_owned);
            let bytes = field
                .bytes()
                .await
                .map_err(|err| ServiceError::bad_request(err.to_string()))?;

            let url = state.media.upload(bytes.to_vec(), file_name, content_type).await?;
            return Ok(Json(json!({ "url": url })));
        }
    }
    Err(ServiceError::bad_request("No image file provided.").into())
}
