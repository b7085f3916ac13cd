//! Postgres-backed checks; skipped unless DATABASE_URL is set.

use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;

use comptrack::api::{ComplaintInput, UserInput};
use comptrack::auth::Authenticator;
use comptrack::config::AppConfig;
use comptrack::database::{DatabaseManager, PgComplaintStore, PgUserStore};
use comptrack::services::{ComplaintService, ServiceError, UserService};
use sqlx::PgPool;

async fn pool() -> Result<Option<PgPool>> {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set, skipping");
        return Ok(None);
    };

    let mut config = AppConfig::development();
    config.database.url = Some(url);

    let pool = DatabaseManager::connect(&config.database).await?;
    DatabaseManager::migrate(&pool).await?;
    Ok(Some(pool))
}

fn unique(prefix: &str) -> String {
    format!("{}_{}", prefix, Utc::now().timestamp_nanos_opt().unwrap_or_default())
}

#[tokio::test]
async fn complaint_lifecycle_against_postgres() -> Result<()> {
    let Some(pool) = pool().await? else { return Ok(()) };

    let users = UserService::new(Arc::new(PgUserStore::new(pool.clone())));
    let complaints = ComplaintService::new(
        Arc::new(PgComplaintStore::new(pool.clone())),
        Arc::new(PgUserStore::new(pool.clone())),
    );

    let name = unique("pg_owner");
    let owner = users
        .create(UserInput {
            username: name.clone(),
            email: format!("{}@example.com", name),
            password: "pw".to_string(),
        })
        .await?;

    let created = complaints
        .create(ComplaintInput {
            title: "Cold water".to_string(),
            user_id: Some(owner.id),
            ..Default::default()
        })
        .await?;
    assert_eq!(created.user_id, Some(owner.id));
    assert!(created.created_at.is_some());

    let updated = complaints
        .update(
            created.id,
            ComplaintInput {
                title: "Hot water".to_string(),
                status: Some("resolved".to_string()),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(updated.title, "Hot water");
    assert_eq!(updated.created_at, created.created_at);

    complaints.delete(created.id).await?;
    assert!(matches!(
        complaints.get(created.id).await,
        Err(ServiceError::ComplaintNotFound(_))
    ));

    Ok(())
}

#[tokio::test]
async fn unknown_stored_status_reads_as_null() -> Result<()> {
    let Some(pool) = pool().await? else { return Ok(()) };

    let name = unique("pg_legacy");
    let user_id: i64 = sqlx::query_scalar(
        "INSERT INTO users (username, email, password_hash) VALUES ($1, $2, 'x') RETURNING id",
    )
    .bind(&name)
    .bind(format!("{}@example.com", name))
    .fetch_one(&pool)
    .await?;

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO complaints (title, status, user_id) VALUES ('Old', 'ESCALATED', $1) RETURNING id",
    )
    .bind(user_id)
    .fetch_one(&pool)
    .await?;

    let complaints = ComplaintService::new(
        Arc::new(PgComplaintStore::new(pool.clone())),
        Arc::new(PgUserStore::new(pool.clone())),
    );
    let dto = complaints.get(id).await?;
    assert_eq!(dto.status, None);
    assert_eq!(dto.created_at, None);

    Ok(())
}

#[tokio::test]
async fn stored_hash_authenticates() -> Result<()> {
    let Some(pool) = pool().await? else { return Ok(()) };

    let store = Arc::new(PgUserStore::new(pool.clone()));
    let users = UserService::new(store.clone());
    let name = unique("pg_login");
    users
        .create(UserInput {
            username: name.clone(),
            email: format!("{}@example.com", name),
            password: "correct horse".to_string(),
        })
        .await?;

    let authenticator = Authenticator::new(store);
    assert!(authenticator.authenticate(&name, "correct horse").await.is_ok());
    assert!(authenticator.authenticate(&name, "battery staple").await.is_err());

    Ok(())
}
