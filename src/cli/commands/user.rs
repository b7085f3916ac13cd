use std::sync::Arc;

use anyhow::Context;

use crate::api::UserInput;
use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::database::{DatabaseManager, PgUserStore};
use crate::services::UserService;

/// Provision a user directly in the database
///
/// Needs `DATABASE_URL`; the in-memory store does not outlive the process.
pub async fn create(
    config: &AppConfig,
    username: String,
    email: String,
    password: String,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("create-user needs DATABASE_URL")?;
    if config.database.run_migrations {
        DatabaseManager::migrate(&pool).await?;
    }

    let service = UserService::new(Arc::new(PgUserStore::new(pool.clone())));
    let user = service
        .create(UserInput {
            username,
            email,
            password,
        })
        .await
        .context("failed to create user")?;

    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&user)?),
        OutputFormat::Text => println!("Created user {} <{}> with id {}", user.username, user.email, user.id),
    }

    pool.close().await;
    Ok(())
}
