use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use once_cell::sync::Lazy;

use super::AuthError;

/// Hash checked when the username is unknown, so both failure paths cost one verify
static DUMMY_HASH: Lazy<Option<String>> = Lazy::new(|| match hash_password("comptrack-unknown-user") {
    Ok(hash) => Some(hash),
    Err(e) => {
        tracing::error!("Failed to prepare dummy password hash: {}", e);
        None
    }
});

fn dummy_hash() -> Option<&'static str> {
    DUMMY_HASH.as_deref()
}

/// Hash a plain-text password into an Argon2id PHC string
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::PasswordHash(e.to_string()))
}

/// Check a plain-text password against a stored PHC string
///
/// A stored value that is not a valid PHC string never matches.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::warn!("Stored password hash is unreadable: {}", e);
            false
        }
    }
}

/// [`hash_password`] on the blocking pool
pub async fn hash(password: String) -> Result<String, AuthError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AuthError::PasswordHash(e.to_string()))?
}

/// [`verify_password`] on the blocking pool
pub async fn verify(password: String, stored_hash: String) -> bool {
    match tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash)).await {
        Ok(matched) => matched,
        Err(e) => {
            tracing::error!("Password verification task failed: {}", e);
            false
        }
    }
}

/// Spend one verify against the dummy hash; the outcome is always a failure
pub async fn verify_unknown_user(password: String) {
    let spent = tokio::task::spawn_blocking(move || {
        if let Some(dummy) = dummy_hash() {
            verify_password(&password, dummy);
        }
    })
    .await;
    if let Err(e) = spent {
        tracing::error!("Password verification task failed: {}", e);
    }
}
