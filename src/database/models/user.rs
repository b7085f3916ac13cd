use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Row in the `users` table
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    /// Argon2 PHC string; never serialized outward
    #[serde(skip_serializing)]
    pub password_hash: String,
}

/// Values for a user that has not been persisted yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}
