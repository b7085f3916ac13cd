pub mod password;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::database::{DatabaseError, UserStore};

pub use password::{hash_password, verify_password};

/// Username that is granted the admin role
pub const ADMIN_USERNAME: &str = "admin";

/// Role derived from the username at authentication time (never stored)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn for_username(username: &str) -> Self {
        if username == ADMIN_USERNAME {
            Role::Admin
        } else {
            Role::User
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "ADMIN"),
            Role::User => write!(f, "USER"),
        }
    }
}

/// Authenticated identity attached to protected requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub user_id: i64,
    pub username: String,
    pub role: Role,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing or malformed Basic credentials")]
    MissingCredentials,

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Bad credentials")]
    BadCredentials,

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// Resolves Basic credentials against the user store
///
/// Every call performs a fresh lookup; nothing is cached between requests.
#[derive(Clone)]
pub struct Authenticator {
    users: Arc<dyn UserStore>,
}

impl Authenticator {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    pub async fn authenticate(&self, username: &str, password: &str) -> Result<Principal, AuthError> {
        tracing::debug!("Authenticating user: {}", username);

        let Some(user) = self.users.find_by_username(username).await? else {
            password::verify_unknown_user(password.to_string()).await;
            tracing::info!("User not found: {}", username);
            return Err(AuthError::UserNotFound(username.to_string()));
        };

        let role = Role::for_username(&user.username);
        tracing::debug!("User found: {}, Role: {}", user.username, role);

        if !password::verify(password.to_string(), user.password_hash.clone()).await {
            tracing::info!("Bad credentials for user: {}", username);
            return Err(AuthError::BadCredentials);
        }

        Ok(Principal {
            user_id: user.id,
            username: user.username,
            role,
        })
    }
}
