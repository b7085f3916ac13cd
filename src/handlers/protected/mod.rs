// handlers/protected/mod.rs - Handlers behind HTTP Basic authentication
//
// Every route here is mounted under the auth middleware, which guarantees a
// `Principal` in request extensions.

pub mod complaints;
pub mod users;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path,
    },
    http::Uri,
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

/// Decode a request body that must be a JSON object
///
/// Arrays are refused here; serde would otherwise fill struct fields by position.
pub(crate) fn json_object<T: DeserializeOwned>(
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<T, ApiError> {
    let Json(value) = payload.map_err(|e| ApiError::invalid_json(e.body_text()))?;
    if !value.is_object() {
        return Err(ApiError::invalid_json("Request body must be a JSON object"));
    }
    serde_json::from_value(value).map_err(|e| ApiError::invalid_json(e.to_string()))
}

/// Unmatched path under a protected prefix, reached only after authentication
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found(format!("No route for {}", uri.path()))
}

/// Numeric `:id` path segment
pub(crate) fn path_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|e| ApiError::bad_request(e.body_text()))
}
