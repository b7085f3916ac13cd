// handlers/protected/users.rs - /api/users handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde_json::Value;

use super::json_object;

use crate::api::{UserDto, UserInput};
use crate::app::AppState;
use crate::auth::Principal;
use crate::error::ApiError;

/// POST /api/users - Create a user with a hashed password
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<UserDto>, ApiError> {
    let input: UserInput = json_object(payload)?;
    Ok(Json(state.users.create(input).await?))
}

/// GET /api/users - List users; 404 when there are none
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<UserDto>>, ApiError> {
    Ok(Json(state.users.list().await?))
}

/// GET /api/users/me - The principal resolved for this request
pub async fn whoami(Extension(principal): Extension<Principal>) -> Json<Principal> {
    Json(principal)
}
