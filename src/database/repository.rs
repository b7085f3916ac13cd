use async_trait::async_trait;

use crate::database::manager::DatabaseError;
use crate::database::models::{Complaint, NewComplaint, NewUser, User};

pub type StoreResult<T> = Result<T, DatabaseError>;

/// Persistence for complaints
///
/// Implementations assign ids on insert and list in ascending id order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ComplaintStore: Send + Sync {
    /// Insert a new complaint and return it with its generated id
    async fn insert(&self, complaint: NewComplaint) -> StoreResult<Complaint>;

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Complaint>>;

    async fn list(&self) -> StoreResult<Vec<Complaint>>;

    /// Overwrite title, description and status of an existing row.
    /// Ownership and creation time are left as stored.
    async fn update(&self, complaint: Complaint) -> StoreResult<Complaint>;

    /// Returns `false` when no row had that id
    async fn delete(&self, id: i64) -> StoreResult<bool>;

    async fn exists(&self, id: i64) -> StoreResult<bool>;
}

/// Persistence for users
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert(&self, user: NewUser) -> StoreResult<User>;

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<User>>;

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    async fn list(&self) -> StoreResult<Vec<User>>;
}
