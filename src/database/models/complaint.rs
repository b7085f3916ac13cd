use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Row in the `complaints` table
///
/// `status` is stored as free text so rows written by other tools still load;
/// it is parsed into [`crate::types::ComplaintStatus`] when mapped outward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Complaint {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub user_id: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewComplaint {
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub user_id: i64,
}
