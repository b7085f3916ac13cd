// handlers/protected/complaints.rs - /api/complaints handlers

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Extension, Json,
};
use serde_json::Value;

use super::{json_object, path_id};

use crate::api::{ComplaintDto, ComplaintInput};
use crate::app::AppState;
use crate::auth::Principal;
use crate::error::ApiError;

/// POST /api/complaints - File a new complaint for `userId`
pub async fn create(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ComplaintDto>, ApiError> {
    let input: ComplaintInput = json_object(payload)?;
    tracing::debug!("{} filing complaint for user {:?}", principal.username, input.user_id);

    let created = state.complaints.create(input).await?;
    Ok(Json(created))
}

/// GET /api/complaints - List every complaint
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ComplaintDto>>, ApiError> {
    Ok(Json(state.complaints.list().await?))
}

/// GET /api/complaints/:id
pub async fn get(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ComplaintDto>, ApiError> {
    let id = path_id(id)?;
    Ok(Json(state.complaints.get(id).await?))
}

/// PUT /api/complaints/:id - Overwrite title, description and (optionally) status
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ComplaintDto>, ApiError> {
    let id = path_id(id)?;
    let input: ComplaintInput = json_object(payload)?;
    Ok(Json(state.complaints.update(id, input).await?))
}

/// DELETE /api/complaints/:id
pub async fn delete(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = path_id(id)?;
    state.complaints.delete(id).await?;
    tracing::info!("Complaint {} deleted by {}", id, principal.username);
    Ok(StatusCode::NO_CONTENT)
}
