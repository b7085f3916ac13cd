use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::models::{Complaint, NewComplaint, NewUser, User};
use crate::database::repository::{ComplaintStore, StoreResult, UserStore};

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    complaints: BTreeMap<i64, Complaint>,
    next_user_id: i64,
    next_complaint_id: i64,
}

/// In-memory implementation of both stores (for development and tests)
///
/// Enforces the same constraints as the Postgres schema: unique username and
/// email, and complaints must reference an existing user.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ComplaintStore for InMemoryStore {
    async fn insert(&self, complaint: NewComplaint) -> StoreResult<Complaint> {
        let mut tables = self.tables.write().await;

        if !tables.users.contains_key(&complaint.user_id) {
            return Err(DatabaseError::ForeignKeyViolation(
                "complaints_user_id_fkey".to_string(),
            ));
        }

        tables.next_complaint_id += 1;
        let record = Complaint {
            id: tables.next_complaint_id,
            title: complaint.title,
            description: complaint.description,
            status: Some(complaint.status),
            created_at: Some(complaint.created_at),
            user_id: complaint.user_id,
        };
        tables.complaints.insert(record.id, record.clone());

        tracing::debug!(complaint_id = record.id, user_id = record.user_id, "Inserted complaint");
        Ok(record)
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Complaint>> {
        let tables = self.tables.read().await;
        Ok(tables.complaints.get(&id).cloned())
    }

    async fn list(&self) -> StoreResult<Vec<Complaint>> {
        let tables = self.tables.read().await;
        Ok(tables.complaints.values().cloned().collect())
    }

    async fn update(&self, complaint: Complaint) -> StoreResult<Complaint> {
        let mut tables = self.tables.write().await;

        let stored = tables
            .complaints
            .get_mut(&complaint.id)
            .ok_or_else(|| DatabaseError::NotFound(format!("complaint {}", complaint.id)))?;

        stored.title = complaint.title;
        stored.description = complaint.description;
        stored.status = complaint.status;

        Ok(stored.clone())
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        Ok(tables.complaints.remove(&id).is_some())
    }

    async fn exists(&self, id: i64) -> StoreResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables.complaints.contains_key(&id))
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn insert(&self, user: NewUser) -> StoreResult<User> {
        let mut tables = self.tables.write().await;

        if tables.users.values().any(|u| u.username == user.username) {
            return Err(DatabaseError::UniqueViolation("users_username_key".to_string()));
        }
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(DatabaseError::UniqueViolation("users_email_key".to_string()));
        }

        tables.next_user_id += 1;
        let record = User {
            id: tables.next_user_id,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
        };
        tables.users.insert(record.id, record.clone());

        tracing::debug!(user_id = record.id, username = %record.username, "Inserted user");
        Ok(record)
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn list(&self) -> StoreResult<Vec<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().cloned().collect())
    }
}
