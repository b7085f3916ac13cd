use anyhow::Context;

use crate::config::AppConfig;
use crate::database::DatabaseManager;

/// Apply embedded migrations to `DATABASE_URL`
pub async fn handle(config: &AppConfig) -> anyhow::Result<()> {
    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to database")?;

    DatabaseManager::migrate(&pool)
        .await
        .context("failed to apply migrations")?;

    pool.close().await;
    Ok(())
}
