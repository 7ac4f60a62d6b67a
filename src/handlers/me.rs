// handlers/me.rs - the profile endpoint
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;

use crate::api::AppState;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::profile::Profile;

/// GET /api/me - current profile record
pub async fn get(State(state): State<AppState>) -> ApiResult<Profile> {
    Ok(ApiResponse::success(state.store.get().await))
}

/// PUT /api/me - apply a partial profile
///
/// The body may carry any subset of top-level fields, but a section it
/// carries must be complete. It is merged section by section; the updated
/// record is returned.
pub async fn put(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Profile> {
    let Json(payload) = payload.map_err(|e| ApiError::invalid_json(e.body_text()))?;
    let record = state.store.update(&payload).await?;
    Ok(ApiResponse::success(record))
}
