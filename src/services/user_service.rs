use std::sync::Arc;

use crate::api::{user_to_dto, UserDto, UserInput};
use crate::auth::password;
use crate::database::models::NewUser;
use crate::database::{DatabaseError, UserStore};
use crate::services::error::{ServiceError, ServiceResult};

/// User creation and listing
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Create a user after checking username and email are free
    pub async fn create(&self, input: UserInput) -> ServiceResult<UserDto> {
        validate_input(&input)?;

        if self.users.find_by_username(&input.username).await?.is_some() {
            return Err(ServiceError::Validation("Username already exists".to_string()));
        }
        if self.users.find_by_email(&input.email).await?.is_some() {
            return Err(ServiceError::Validation("Email already exists".to_string()));
        }

        let password_hash = password::hash(input.password).await?;

        let saved = self
            .users
            .insert(NewUser {
                username: input.username,
                email: input.email,
                password_hash,
            })
            .await
            .map_err(|e| match e {
                DatabaseError::UniqueViolation(constraint) => {
                    ServiceError::Validation(format!("User already exists ({})", constraint))
                }
                other => other.into(),
            })?;

        tracing::info!("Created user {} ({})", saved.username, saved.id);
        Ok(user_to_dto(saved))
    }

    /// Create the user unless the username is already taken
    ///
    /// Returns `None` when the user already existed.
    pub async fn ensure(&self, input: UserInput) -> ServiceResult<Option<UserDto>> {
        if self.users.find_by_username(&input.username).await?.is_some() {
            return Ok(None);
        }
        self.create(input).await.map(Some)
    }

    pub async fn list(&self) -> ServiceResult<Vec<UserDto>> {
        let users = self.users.list().await?;
        if users.is_empty() {
            return Err(ServiceError::NoUsers);
        }
        Ok(users.into_iter().map(user_to_dto).collect())
    }
}

fn validate_input(input: &UserInput) -> ServiceResult<()> {
    if input.username.trim().is_empty() {
        return Err(ServiceError::MissingField("username"));
    }
    if input.email.trim().is_empty() {
        return Err(ServiceError::MissingField("email"));
    }
    if input.password.is_empty() {
        return Err(ServiceError::MissingField("password"));
    }
    Ok(())
}
