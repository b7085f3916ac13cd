use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::{Complaint, NewComplaint, NewUser, User};
use crate::database::repository::{ComplaintStore, StoreResult, UserStore};

const COMPLAINT_COLUMNS: &str = "id, title, description, status, created_at, user_id";
const USER_COLUMNS: &str = "id, username, email, password_hash";

/// `ComplaintStore` backed by the `complaints` table
#[derive(Clone)]
pub struct PgComplaintStore {
    pool: PgPool,
}

impl PgComplaintStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ComplaintStore for PgComplaintStore {
    async fn insert(&self, complaint: NewComplaint) -> StoreResult<Complaint> {
        let sql = format!(
            "INSERT INTO complaints (title, description, status, created_at, user_id) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            COMPLAINT_COLUMNS
        );

        let row = sqlx::query_as::<_, Complaint>(&sql)
            .bind(&complaint.title)
            .bind(&complaint.description)
            .bind(&complaint.status)
            .bind(complaint.created_at)
            .bind(complaint.user_id)
            .fetch_one(&self.pool)
            .await?;

        tracing::debug!("Inserted complaint {} for user {}", row.id, row.user_id);
        Ok(row)
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Complaint>> {
        let sql = format!("SELECT {} FROM complaints WHERE id = $1", COMPLAINT_COLUMNS);
        let row = sqlx::query_as::<_, Complaint>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list(&self) -> StoreResult<Vec<Complaint>> {
        let sql = format!("SELECT {} FROM complaints ORDER BY id", COMPLAINT_COLUMNS);
        let rows = sqlx::query_as::<_, Complaint>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn update(&self, complaint: Complaint) -> StoreResult<Complaint> {
        let sql = format!(
            "UPDATE complaints SET title = $2, description = $3, status = $4 \
             WHERE id = $1 RETURNING {}",
            COMPLAINT_COLUMNS
        );

        sqlx::query_as::<_, Complaint>(&sql)
            .bind(complaint.id)
            .bind(&complaint.title)
            .bind(&complaint.description)
            .bind(&complaint.status)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("complaint {}", complaint.id)))
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM complaints WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn exists(&self, id: i64) -> StoreResult<bool> {
        let found: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM complaints WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(found.0)
    }
}

/// `UserStore` backed by the `users` table
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_by(&self, column: &str, value: &str) -> StoreResult<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE {} = $1", USER_COLUMNS, column);
        let row = sqlx::query_as::<_, User>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn insert(&self, user: NewUser) -> StoreResult<User> {
        let sql = format!(
            "INSERT INTO users (username, email, password_hash) VALUES ($1, $2, $3) RETURNING {}",
            USER_COLUMNS
        );

        let row = sqlx::query_as::<_, User>(&sql)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .fetch_one(&self.pool)
            .await?;

        tracing::debug!("Inserted user {} ({})", row.username, row.id);
        Ok(row)
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let row = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        self.find_by("username", username).await
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        self.find_by("email", email).await
    }

    async fn list(&self) -> StoreResult<Vec<User>> {
        let sql = format!("SELECT {} FROM users ORDER BY id", USER_COLUMNS);
        let rows = sqlx::query_as::<_, User>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }
}
