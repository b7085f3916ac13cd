use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::ComplaintStatus;

/// Complaint as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintDto {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: Option<ComplaintStatus>,
    pub created_at: Option<DateTime<Utc>>,
    pub user_id: Option<i64>,
}

/// Request body for creating or updating a complaint
///
/// `status` is kept as raw text so an unknown value surfaces as a validation
/// error rather than a JSON error. `userId` is only read on create. Output-only
/// fields such as `id` and `createdAt` are accepted and ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintInput {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub user_id: Option<i64>,
}

/// User as returned by the API (no password material)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDto {
    pub id: i64,
    pub username: String,
    pub email: String,
}

/// Request body for creating a user
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserInput {
    pub username: String,
    pub email: String,
    pub password: String,
}
