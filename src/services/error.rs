use thiserror::Error;

use crate::auth::AuthError;
use crate::database::DatabaseError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Complaint not found with ID: {0}")]
    ComplaintNotFound(i64),

    #[error("User not found with ID: {0}")]
    UserNotFound(i64),

    #[error("No users found")]
    NoUsers,

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
