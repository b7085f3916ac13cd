pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod repository;

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::{AppConfig, Environment};

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::InMemoryStore;
pub use postgres::{PgComplaintStore, PgUserStore};
pub use repository::{ComplaintStore, StoreResult, UserStore};

/// The storage backend selected at startup
#[derive(Clone)]
pub enum Backend {
    Postgres(PgPool),
    Memory(InMemoryStore),
}

impl Backend {
    /// Select and prepare storage from configuration
    ///
    /// Without `DATABASE_URL` the in-memory store is used, except in
    /// production where a database is mandatory.
    pub async fn connect(config: &AppConfig) -> Result<Self, DatabaseError> {
        if config.database.url.is_none() {
            if config.environment == Environment::Production {
                return Err(DatabaseError::ConfigMissing("DATABASE_URL"));
            }
            tracing::warn!("DATABASE_URL not set, using in-memory storage (data is lost on restart)");
            return Ok(Backend::Memory(InMemoryStore::new()));
        }

        let pool = DatabaseManager::connect(&config.database).await?;
        if config.database.run_migrations {
            DatabaseManager::migrate(&pool).await?;
        }
        Ok(Backend::Postgres(pool))
    }

    pub fn complaint_store(&self) -> Arc<dyn ComplaintStore> {
        match self {
            Backend::Postgres(pool) => Arc::new(PgComplaintStore::new(pool.clone())),
            Backend::Memory(store) => Arc::new(store.clone()),
        }
    }

    pub fn user_store(&self) -> Arc<dyn UserStore> {
        match self {
            Backend::Postgres(pool) => Arc::new(PgUserStore::new(pool.clone())),
            Backend::Memory(store) => Arc::new(store.clone()),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Backend::Postgres(_) => "postgres",
            Backend::Memory(_) => "memory",
        }
    }

    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        match self {
            Backend::Postgres(pool) => DatabaseManager::health_check(pool).await,
            Backend::Memory(_) => Ok(()),
        }
    }
}
